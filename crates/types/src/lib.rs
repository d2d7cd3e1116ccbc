#![no_std]

pub mod address;
pub use address::{Address, ADDRESS_LEN};

pub mod status;
pub use status::StatusCode;
