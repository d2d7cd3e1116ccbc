use core::fmt;

use abi::{AbiCodec, Token};
use types::StatusCode;

/// Encodes an integer result code for the caller.
///
/// Codes in `0..128` go out as `uint256`, everything else as `int256`, so
/// negative error codes survive the caller's ABI decoding with their sign.
pub fn encode_result(codec: &AbiCodec, value: i64) -> Vec<u8> {
    if (0..128).contains(&value) {
        codec.encode(&[Token::Uint(value as u128)])
    } else {
        codec.encode(&[Token::Int(value as i128)])
    }
}

pub fn encode_status(codec: &AbiCodec, status: StatusCode) -> Vec<u8> {
    encode_result(codec, i64::from(status.code()))
}

/// Outcome of one precompiled call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrecompiledExecResult {
    /// ABI-encoded return data; empty when the call was not understood.
    pub exec_result: Vec<u8>,

    pub gas: u64,

    /// Store inconsistencies tolerated while serving the call (rows the
    /// store enumerated but could not return).
    pub anomalies: u32,
}

impl PrecompiledExecResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_exec_result(&mut self, data: Vec<u8>) {
        self.exec_result = data;
    }

    pub fn set_gas(&mut self, gas: u64) {
        self.gas = gas;
    }

    pub fn record_anomaly(&mut self) {
        self.anomalies = self.anomalies.saturating_add(1);
    }
}

impl fmt::Display for PrecompiledExecResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Precompiled Result ===")?;
        writeln!(f, "Gas: {}", self.gas)?;
        writeln!(f, "Anomalies: {}", self.anomalies)?;
        for (i, word) in self.exec_result.chunks(32).enumerate() {
            writeln!(f, "  [{:02}] {}", i, hex::encode(word))?;
        }
        Ok(())
    }
}
