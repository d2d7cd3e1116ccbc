use std::collections::BTreeMap;

use abi::{Hasher, selector_hex, selector_of};
use tracing::debug;

use crate::error::PrecompiledError;
use crate::global::Config;

/// First four bytes of the hashed canonical signature, big-endian.
pub fn compute_selector(hasher: &dyn Hasher, signature: &str) -> u32 {
    selector_of(hasher, signature)
}

/// Splits call data into its selector and the argument payload.
pub fn split_call(call_data: &[u8]) -> Result<(u32, &[u8]), PrecompiledError> {
    if call_data.len() < Config::SELECTOR_LEN {
        return Err(PrecompiledError::TruncatedCall(call_data.len()));
    }
    let (head, payload) = call_data.split_at(Config::SELECTOR_LEN);
    let selector = u32::from_be_bytes([head[0], head[1], head[2], head[3]]);
    Ok((selector, payload))
}

/// Where a selector leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<M> {
    Handler(M),
    Unrecognized(u32),
}

/// Selector lookup for one handler, built once from its signatures.
///
/// `M` is the handler's own closed set of methods; dispatch is one map
/// lookup followed by a `match` on the returned variant.
#[derive(Debug, Clone)]
pub struct SelectorTable<M: Copy> {
    routes: BTreeMap<u32, (M, String)>,
}

impl<M: Copy> SelectorTable<M> {
    pub fn new(hasher: &dyn Hasher, entries: &[(&str, M)]) -> Self {
        let routes = entries
            .iter()
            .map(|(signature, method)| {
                let selector = compute_selector(hasher, signature);
                debug!(
                    signature = *signature,
                    selector = %selector_hex(selector),
                    "registered selector"
                );
                (selector, (*method, signature.to_string()))
            })
            .collect();
        Self { routes }
    }

    pub fn route(&self, selector: u32) -> Route<M> {
        match self.routes.get(&selector) {
            Some((method, _)) => Route::Handler(*method),
            None => Route::Unrecognized(selector),
        }
    }

    /// Selector registered for `signature`, if any.
    pub fn selector_for(&self, signature: &str) -> Option<u32> {
        self.routes
            .iter()
            .find(|(_, (_, sig))| sig == signature)
            .map(|(selector, _)| *selector)
    }

    pub fn signatures(&self) -> impl Iterator<Item = (u32, &str)> {
        self.routes.iter().map(|(s, (_, sig))| (*s, sig.as_str()))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
