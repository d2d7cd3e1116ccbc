use thiserror::Error;

/// Failures reported by a table store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("table already exists: {0}")]
    TableAlreadyExists(String),

    #[error("table not found: {0}")]
    TableNotFound(String),

    #[error("field `{field}` is not declared by table {table}")]
    UnknownField { table: String, field: String },

    #[error("store refused to create table {0}")]
    CreateRefused(String),
}
