use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AbiError {
    #[error("input too short: need {needed} bytes at offset {offset}, have {available}")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("dynamic offset {0} points outside the payload")]
    InvalidOffset(usize),

    #[error("value does not fit in {0} bits")]
    Overflow(usize),

    #[error("invalid bool word")]
    InvalidBool,

    #[error("string is not valid utf-8")]
    InvalidUtf8,

    #[error("unknown parameter type `{0}`")]
    UnknownType(String),

    #[error("malformed function signature `{0}`")]
    InvalidSignature(String),

    #[error("malformed SCALE input: {0}")]
    Scale(String),

    #[error("{0} bytes left over after the last argument")]
    TrailingBytes(usize),
}
