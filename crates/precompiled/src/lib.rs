//! Native contracts served by the node itself.
//!
//! A call arrives as ABI-encoded bytes at a reserved address. The handler
//! registered there picks the method from the 4-byte selector, works
//! against the table store, prices what it did, and answers with ABI bytes.
//! No outcome is a Rust error to the caller: failures travel as status
//! codes in the return data.

// external
pub extern crate hex;

// exports
pub mod condition;
pub mod error;
pub mod execution_context;
pub mod filesystem;
pub mod global;
pub mod metering;
pub mod naming;
pub mod path;
pub mod precompiled;
pub mod result;
pub mod router;

pub use condition::{Comparator, Condition, select_rows};
pub use error::{NameViolation, PrecompiledError};
pub use execution_context::ExecutiveContext;
pub use filesystem::{FileEntry, FileSystemPrecompiled, FileType, FsMethod};
pub use global::Config;
pub use metering::{GasSchedule, InterfaceOpcode, PrecompiledGas};
pub use precompiled::{Precompiled, PrecompiledRegistry};
pub use result::{PrecompiledExecResult, encode_result, encode_status};
pub use router::{Route, SelectorTable, compute_selector, split_call};
