use abi::{AbiCodec, CodecMode, Hasher};
use storage::TableStore;

/// Everything a handler may touch while serving one call.
#[derive(Clone, Copy)]
pub struct ExecutiveContext<'a> {
    /// The node's table store, already positioned at the caller's view.
    pub storage: &'a dyn TableStore,

    pub hasher: &'a dyn Hasher,

    /// Calls from wasm contracts speak SCALE instead of the Solidity ABI.
    pub is_wasm: bool,
}

impl<'a> ExecutiveContext<'a> {
    pub fn new(storage: &'a dyn TableStore, hasher: &'a dyn Hasher, is_wasm: bool) -> Self {
        Self {
            storage,
            hasher,
            is_wasm,
        }
    }

    pub fn codec(&self) -> AbiCodec {
        AbiCodec::new(CodecMode::from_wasm(self.is_wasm))
    }
}

impl core::fmt::Debug for ExecutiveContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ExecutiveContext")
            .field("hasher", &self.hasher)
            .field("is_wasm", &self.is_wasm)
            .finish()
    }
}
