use parity_scale_codec::{Decode, Encode, Input};
use types::address::{Address, ADDRESS_LEN};

use crate::abi::{ParamType, Token};
use crate::error::AbiError;

const WORD: usize = 32;

/// Wire layout selected by the execution context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodecMode {
    /// Solidity ABI: 32-byte head words, dynamic values behind offsets.
    #[default]
    Solidity,
    /// SCALE as used by wasm contracts: little-endian fixed-width integers,
    /// compact-length-prefixed byte strings, no padding.
    Scale,
}

impl CodecMode {
    pub fn from_wasm(is_wasm: bool) -> Self {
        if is_wasm {
            CodecMode::Scale
        } else {
            CodecMode::Solidity
        }
    }
}

/// Encodes call arguments and return values for one execution context.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbiCodec {
    mode: CodecMode,
}

impl AbiCodec {
    pub fn new(mode: CodecMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> CodecMode {
        self.mode
    }

    pub fn encode(&self, tokens: &[Token]) -> Vec<u8> {
        match self.mode {
            CodecMode::Solidity => encode_solidity(tokens),
            CodecMode::Scale => encode_scale(tokens),
        }
    }

    pub fn decode(&self, data: &[u8], types: &[ParamType]) -> Result<Vec<Token>, AbiError> {
        match self.mode {
            CodecMode::Solidity => decode_solidity(data, types),
            CodecMode::Scale => decode_scale(data, types),
        }
    }

    pub fn encode_string(&self, value: &str) -> Vec<u8> {
        self.encode(&[Token::String(value.to_string())])
    }

    pub fn decode_string(&self, data: &[u8]) -> Result<String, AbiError> {
        let mut tokens = self.decode(data, &[ParamType::String])?;
        match tokens.pop() {
            Some(Token::String(s)) => Ok(s),
            _ => Err(AbiError::UnknownType("string".to_string())),
        }
    }
}

// Solidity layout

fn uint_word(value: u128) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

fn int_word(value: i128) -> [u8; WORD] {
    let fill = if value < 0 { 0xff } else { 0x00 };
    let mut word = [fill; WORD];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

fn static_word(token: &Token) -> [u8; WORD] {
    match token {
        Token::Address(addr) => {
            let mut word = [0u8; WORD];
            word[WORD - ADDRESS_LEN..].copy_from_slice(&addr.0);
            word
        }
        Token::Uint(v) => uint_word(*v),
        Token::Int(v) => int_word(*v),
        Token::Bool(b) => uint_word(*b as u128),
        Token::Bytes(_) | Token::String(_) => unreachable!("dynamic token has no static word"),
    }
}

fn push_dynamic(tail: &mut Vec<u8>, bytes: &[u8]) {
    tail.extend_from_slice(&uint_word(bytes.len() as u128));
    tail.extend_from_slice(bytes);
    let padding = (WORD - bytes.len() % WORD) % WORD;
    tail.resize(tail.len() + padding, 0);
}

fn encode_solidity(tokens: &[Token]) -> Vec<u8> {
    let head_len = WORD * tokens.len();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for token in tokens {
        match token {
            Token::Bytes(bytes) => {
                head.extend_from_slice(&uint_word((head_len + tail.len()) as u128));
                push_dynamic(&mut tail, bytes);
            }
            Token::String(s) => {
                head.extend_from_slice(&uint_word((head_len + tail.len()) as u128));
                push_dynamic(&mut tail, s.as_bytes());
            }
            other => head.extend_from_slice(&static_word(other)),
        }
    }

    head.extend_from_slice(&tail);
    head
}

fn word_at(data: &[u8], offset: usize) -> Result<&[u8], AbiError> {
    let end = offset.checked_add(WORD).ok_or(AbiError::InvalidOffset(offset))?;
    data.get(offset..end).ok_or(AbiError::Truncated {
        offset,
        needed: WORD,
        available: data.len().saturating_sub(offset),
    })
}

fn word_to_usize(word: &[u8]) -> Option<usize> {
    if word[..24].iter().any(|b| *b != 0) {
        return None;
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&word[24..]);
    usize::try_from(u64::from_be_bytes(low)).ok()
}

fn check_uint_bits(value: u128, bits: usize) -> Result<u128, AbiError> {
    if bits < 128 && value >> bits != 0 {
        return Err(AbiError::Overflow(bits));
    }
    Ok(value)
}

fn check_int_bits(value: i128, bits: usize) -> Result<i128, AbiError> {
    if bits < 128 {
        let max = (1i128 << (bits - 1)) - 1;
        let min = -(1i128 << (bits - 1));
        if value < min || value > max {
            return Err(AbiError::Overflow(bits));
        }
    }
    Ok(value)
}

fn decode_static(kind: &ParamType, word: &[u8]) -> Result<Token, AbiError> {
    let mut low = [0u8; 16];
    low.copy_from_slice(&word[16..]);

    match kind {
        ParamType::Address => {
            if word[..WORD - ADDRESS_LEN].iter().any(|b| *b != 0) {
                return Err(AbiError::Overflow(160));
            }
            let mut bytes = [0u8; ADDRESS_LEN];
            bytes.copy_from_slice(&word[WORD - ADDRESS_LEN..]);
            Ok(Token::Address(Address(bytes)))
        }
        ParamType::Uint(bits) => {
            if word[..16].iter().any(|b| *b != 0) {
                return Err(AbiError::Overflow(*bits));
            }
            check_uint_bits(u128::from_be_bytes(low), *bits).map(Token::Uint)
        }
        ParamType::Int(bits) => {
            let fill = if word[16] & 0x80 != 0 { 0xff } else { 0x00 };
            if word[..16].iter().any(|b| *b != fill) {
                return Err(AbiError::Overflow(*bits));
            }
            check_int_bits(i128::from_be_bytes(low), *bits).map(Token::Int)
        }
        ParamType::Bool => match (word[..31].iter().all(|b| *b == 0), word[31]) {
            (true, 0) => Ok(Token::Bool(false)),
            (true, 1) => Ok(Token::Bool(true)),
            _ => Err(AbiError::InvalidBool),
        },
        ParamType::Bytes | ParamType::String => unreachable!("dynamic type decoded out of line"),
    }
}

fn decode_solidity(data: &[u8], types: &[ParamType]) -> Result<Vec<Token>, AbiError> {
    let mut tokens = Vec::with_capacity(types.len());

    for (i, kind) in types.iter().enumerate() {
        let word = word_at(data, i * WORD)?;
        if !kind.is_dynamic() {
            tokens.push(decode_static(kind, word)?);
            continue;
        }

        let offset = word_to_usize(word).ok_or(AbiError::InvalidOffset(usize::MAX))?;
        let len_word = word_at(data, offset).map_err(|_| AbiError::InvalidOffset(offset))?;
        let len = word_to_usize(len_word).ok_or(AbiError::Overflow(64))?;
        let start = offset + WORD;
        let bytes = start
            .checked_add(len)
            .and_then(|end| data.get(start..end))
            .ok_or(AbiError::Truncated {
                offset: start,
                needed: len,
                available: data.len().saturating_sub(start),
            })?;

        tokens.push(match kind {
            ParamType::String => Token::String(
                String::from_utf8(bytes.to_vec()).map_err(|_| AbiError::InvalidUtf8)?,
            ),
            _ => Token::Bytes(bytes.to_vec()),
        });
    }

    Ok(tokens)
}

// SCALE layout

fn encode_scale(tokens: &[Token]) -> Vec<u8> {
    let mut out = Vec::new();
    for token in tokens {
        match token {
            Token::Address(addr) => addr.0.encode_to(&mut out),
            Token::Uint(v) => (*v, 0u128).encode_to(&mut out),
            Token::Int(v) => {
                let high: i128 = if *v < 0 { -1 } else { 0 };
                (*v, high).encode_to(&mut out);
            }
            Token::Bool(b) => b.encode_to(&mut out),
            Token::Bytes(bytes) => bytes.encode_to(&mut out),
            Token::String(s) => s.encode_to(&mut out),
        }
    }
    out
}

fn scale_error(err: parity_scale_codec::Error) -> AbiError {
    AbiError::Scale(err.to_string())
}

/// Reads a `bits`-wide little-endian integer; the low 16 bytes come back
/// as-is, the rest stay in the returned buffer for range checks.
fn read_integer(input: &mut &[u8], bits: usize) -> Result<[u8; WORD], AbiError> {
    let mut raw = [0u8; WORD];
    let bytes = raw.get_mut(..bits / 8).ok_or(AbiError::Overflow(bits))?;
    input.read(bytes).map_err(scale_error)?;
    Ok(raw)
}

fn low_half(raw: &[u8; WORD]) -> [u8; 16] {
    let mut low = [0u8; 16];
    low.copy_from_slice(&raw[..16]);
    low
}

fn decode_scale(data: &[u8], types: &[ParamType]) -> Result<Vec<Token>, AbiError> {
    let mut input = data;
    let mut tokens = Vec::with_capacity(types.len());

    for kind in types {
        let token = match kind {
            ParamType::Address => {
                let bytes = <[u8; ADDRESS_LEN]>::decode(&mut input).map_err(scale_error)?;
                Token::Address(Address(bytes))
            }
            ParamType::Uint(bits) => {
                let raw = read_integer(&mut input, *bits)?;
                if raw[16..].iter().any(|b| *b != 0) {
                    return Err(AbiError::Overflow(*bits));
                }
                check_uint_bits(u128::from_le_bytes(low_half(&raw)), *bits).map(Token::Uint)?
            }
            ParamType::Int(bits) => {
                let width = bits / 8;
                let mut raw = read_integer(&mut input, *bits)?;
                let negative = width > 0 && raw[width - 1] & 0x80 != 0;
                let fill = if negative { 0xff } else { 0x00 };
                if raw[16.min(width)..width].iter().any(|b| *b != fill) {
                    return Err(AbiError::Overflow(*bits));
                }
                for byte in raw.iter_mut().skip(width) {
                    *byte = fill;
                }
                check_int_bits(i128::from_le_bytes(low_half(&raw)), *bits).map(Token::Int)?
            }
            ParamType::Bool => Token::Bool(bool::decode(&mut input).map_err(scale_error)?),
            ParamType::Bytes => Token::Bytes(Vec::<u8>::decode(&mut input).map_err(scale_error)?),
            ParamType::String => {
                let bytes = Vec::<u8>::decode(&mut input).map_err(scale_error)?;
                Token::String(String::from_utf8(bytes).map_err(|_| AbiError::InvalidUtf8)?)
            }
        };
        tokens.push(token);
    }

    if !input.is_empty() {
        return Err(AbiError::TrailingBytes(input.len()));
    }
    Ok(tokens)
}
