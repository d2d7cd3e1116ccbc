use std::fmt;
use std::str::FromStr;

use types::address::Address;

use crate::error::AbiError;
use crate::hash::Hasher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Address,
    Uint(usize), // bits
    Int(usize),  // bits
    Bool,
    Bytes,
    String,
}

impl ParamType {
    /// Dynamic types are encoded out of line in the Solidity layout.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, ParamType::Bytes | ParamType::String)
    }

    /// Canonical name as it appears in a function signature.
    pub fn canonical(&self) -> String {
        match self {
            ParamType::Address => "address".to_string(),
            ParamType::Uint(bits) => format!("uint{}", bits),
            ParamType::Int(bits) => format!("int{}", bits),
            ParamType::Bool => "bool".to_string(),
            ParamType::Bytes => "bytes".to_string(),
            ParamType::String => "string".to_string(),
        }
    }
}

impl FromStr for ParamType {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sized = |digits: &str| -> Result<usize, AbiError> {
            if digits.is_empty() {
                return Ok(256);
            }
            match digits.parse::<usize>() {
                Ok(bits) if bits > 0 && bits <= 256 && bits % 8 == 0 => Ok(bits),
                _ => Err(AbiError::UnknownType(s.to_string())),
            }
        };
        match s {
            "address" => Ok(ParamType::Address),
            "bool" => Ok(ParamType::Bool),
            "bytes" => Ok(ParamType::Bytes),
            "string" => Ok(ParamType::String),
            s if s.starts_with("uint") => Ok(ParamType::Uint(sized(&s[4..])?)),
            s if s.starts_with("int") => Ok(ParamType::Int(sized(&s[3..])?)),
            _ => Err(AbiError::UnknownType(s.to_string())),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// A decoded or to-be-encoded ABI value.
///
/// Integers are carried in 128 bits and widened to 256 on the wire; wider
/// values are rejected on decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Address(Address),
    Uint(u128),
    Int(i128),
    Bool(bool),
    Bytes(Vec<u8>),
    String(String),
}

impl Token {
    pub fn param_type(&self) -> ParamType {
        match self {
            Token::Address(_) => ParamType::Address,
            Token::Uint(_) => ParamType::Uint(256),
            Token::Int(_) => ParamType::Int(256),
            Token::Bool(_) => ParamType::Bool,
            Token::Bytes(_) => ParamType::Bytes,
            Token::String(_) => ParamType::String,
        }
    }

    pub fn into_string(self) -> Option<String> {
        match self {
            Token::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u128> {
        match self {
            Token::Uint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i128> {
        match self {
            Token::Int(v) => Some(*v),
            _ => None,
        }
    }
}

/// A callable function: name plus ordered input types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionAbi {
    pub name: String,
    pub inputs: Vec<ParamType>,
}

impl FunctionAbi {
    /// Parses a signature such as `mkdir(string)` or `touch(string,string)`.
    pub fn parse(signature: &str) -> Result<Self, AbiError> {
        let invalid = || AbiError::InvalidSignature(signature.to_string());
        let open = signature.find('(').ok_or_else(invalid)?;
        let args = signature[open + 1..].strip_suffix(')').ok_or_else(invalid)?;
        let name = signature[..open].trim();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid());
        }

        let inputs = if args.trim().is_empty() {
            Vec::new()
        } else {
            args.split(',')
                .map(|arg| arg.trim().parse::<ParamType>())
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(Self {
            name: name.to_string(),
            inputs,
        })
    }

    /// Canonical signature string, the preimage of the selector.
    pub fn signature(&self) -> String {
        let inputs: Vec<String> = self.inputs.iter().map(ParamType::canonical).collect();
        format!("{}({})", self.name, inputs.join(","))
    }

    /// First four bytes of the signature hash, read big-endian.
    pub fn selector(&self, hasher: &dyn Hasher) -> u32 {
        selector_of(hasher, &self.signature())
    }
}

pub fn selector_of(hasher: &dyn Hasher, signature: &str) -> u32 {
    let digest = hasher.hash(signature.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Hex rendering of a selector, as it appears at the head of call data.
pub fn selector_hex(selector: u32) -> String {
    hex::encode(selector.to_be_bytes())
}
