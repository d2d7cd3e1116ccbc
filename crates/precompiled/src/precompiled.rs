use std::collections::BTreeMap;

use tracing::{debug, warn};
use types::address::Address;

use crate::execution_context::ExecutiveContext;
use crate::result::PrecompiledExecResult;

/// A native contract reachable at a fixed address.
pub trait Precompiled {
    fn name(&self) -> &str;

    /// Serves one call. Never fails: every outcome, including malformed
    /// input, is reported inside the returned result.
    fn call(
        &self,
        ctx: &ExecutiveContext<'_>,
        call_data: &[u8],
        origin: &Address,
        sender: &Address,
    ) -> PrecompiledExecResult;
}

/// Address book of the precompiled handlers a node exposes.
#[derive(Default)]
pub struct PrecompiledRegistry {
    handlers: BTreeMap<Address, Box<dyn Precompiled>>,
}

impl PrecompiledRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `handler` at `address`, returning the one it replaces.
    pub fn register(
        &mut self,
        address: Address,
        handler: Box<dyn Precompiled>,
    ) -> Option<Box<dyn Precompiled>> {
        debug!(address = %address, name = handler.name(), "registering precompiled");
        self.handlers.insert(address, handler)
    }

    pub fn get(&self, address: &Address) -> Option<&dyn Precompiled> {
        self.handlers.get(address).map(|h| h.as_ref())
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.handlers.contains_key(address)
    }

    pub fn addresses(&self) -> impl Iterator<Item = &Address> {
        self.handlers.keys()
    }

    /// `None` when nothing is registered at `address`.
    pub fn call(
        &self,
        address: &Address,
        ctx: &ExecutiveContext<'_>,
        call_data: &[u8],
        origin: &Address,
        sender: &Address,
    ) -> Option<PrecompiledExecResult> {
        match self.handlers.get(address) {
            Some(handler) => Some(handler.call(ctx, call_data, origin, sender)),
            None => {
                warn!(address = %address, "no precompiled at address");
                None
            }
        }
    }
}

impl core::fmt::Debug for PrecompiledRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(self.handlers.iter().map(|(a, h)| (a, h.name())))
            .finish()
    }
}
