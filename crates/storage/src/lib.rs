//! Key-value table store consumed by precompiled handlers.
//!
//! `TableStore` is the narrow contract handlers are written against;
//! `Storage` is the in-memory implementation and `FaultyStorage` wraps it to
//! inject failures.

pub mod entry;
pub mod error;
pub mod faulty;
pub mod memory;
pub mod table;

pub use entry::Entry;
pub use error::StorageError;
pub use faulty::{FailurePolicy, FaultyStorage};
pub use memory::Storage;
pub use table::{KeyPredicate, Table, TableInfo, TableStore};
