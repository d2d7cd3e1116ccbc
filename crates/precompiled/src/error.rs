use std::fmt;

use abi::AbiError;
use storage::StorageError;
use thiserror::Error;
use types::StatusCode;

/// Why a table or field name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameViolation {
    Empty,
    TableNameTooLong,
    FieldNameTooLong,
    IllegalCharacter(char),
    LeadingUnderscore,
}

impl fmt::Display for NameViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameViolation::Empty => write!(f, "name is empty"),
            NameViolation::TableNameTooLong => write!(f, "table name too long"),
            NameViolation::FieldNameTooLong => write!(f, "field name too long"),
            NameViolation::IllegalCharacter(c) => write!(f, "illegal character {:?}", c),
            NameViolation::LeadingUnderscore => write!(f, "field name starts with '_'"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrecompiledError {
    #[error("invalid name `{name}`: {reason}")]
    InvalidName { name: String, reason: NameViolation },

    #[error("duplicate field `{0}`")]
    DuplicateField(String),

    #[error("invalid path `{0}`")]
    InvalidPath(String),

    #[error("call data has {0} bytes, a selector needs 4")]
    TruncatedCall(usize),

    #[error("`{0}` does not exist")]
    NotFound(String),

    #[error("`{0}` already exists")]
    AlreadyExists(String),

    #[error("`{0}` exists and is not a directory")]
    NotADirectory(String),

    #[error("could not build directories for `{0}`")]
    BuildDirFailed(String),

    #[error("unknown file type `{0}`")]
    InvalidFileType(String),

    #[error("listing could not be serialized: {0}")]
    Serialization(String),

    #[error("rejected with status {0}")]
    Status(StatusCode),

    #[error(transparent)]
    Codec(#[from] AbiError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl PrecompiledError {
    /// Status reported to the on-chain caller for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PrecompiledError::InvalidName { reason, .. } => match reason {
                NameViolation::TableNameTooLong => StatusCode::TableNameLengthOverflow,
                NameViolation::FieldNameTooLong => StatusCode::TableFieldLengthOverflow,
                _ => StatusCode::TableInvalidateField,
            },
            PrecompiledError::DuplicateField(_) => StatusCode::TableDuplicateField,
            PrecompiledError::InvalidPath(_) => StatusCode::FileInvalidPath,
            PrecompiledError::TruncatedCall(_)
            | PrecompiledError::Codec(_)
            | PrecompiledError::Serialization(_) => StatusCode::InvalidInput,
            PrecompiledError::NotFound(_) => StatusCode::FileNotExist,
            PrecompiledError::AlreadyExists(_) => StatusCode::FileAlreadyExist,
            PrecompiledError::NotADirectory(_) | PrecompiledError::BuildDirFailed(_) => {
                StatusCode::FileBuildDirFailed
            }
            PrecompiledError::InvalidFileType(_) => StatusCode::FileInvalidType,
            PrecompiledError::Status(status) => *status,
            PrecompiledError::Storage(err) => match err {
                StorageError::TableAlreadyExists(_) => StatusCode::TableNameAlreadyExist,
                StorageError::TableNotFound(_) => StatusCode::FileNotExist,
                StorageError::UnknownField { .. } => StatusCode::TableInvalidateField,
                StorageError::CreateRefused(_) => StatusCode::FileBuildDirFailed,
            },
        }
    }
}
