//! ABI model and codec for precompiled calls.
//!
//! Arguments arrive and results leave in one of two layouts: the Solidity
//! ABI for EVM contracts, or SCALE for wasm contracts. The execution context
//! decides which; handlers only see `AbiCodec`.

pub mod abi;
pub use abi::*;

pub mod codec;
pub use codec::{AbiCodec, CodecMode};

pub mod error;
pub use error::AbiError;

pub mod hash;
pub use hash::{Hasher, Sha256Hasher};
