//! A `TableStore` wrapper that can simulate store failures.
//!
//! Used to pin down how handlers behave when the store refuses a write part
//! way through a multi-step operation, or returns rows inconsistent with its
//! own key listing.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;

use tracing::debug;

use crate::entry::Entry;
use crate::error::StorageError;
use crate::memory::Storage;
use crate::table::{KeyPredicate, TableInfo, TableStore};

/// When table creation should be refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Never fail (passthrough)
    Never,
    /// Allow N successful creations, refuse every one after that
    AfterCreations(usize),
    /// Refuse creating exactly these tables
    OnTables(Vec<String>),
}

#[derive(Debug)]
pub struct FaultyStorage {
    inner: Storage,
    policy: FailurePolicy,
    creations: Cell<usize>,
    hidden_rows: RefCell<BTreeSet<(String, String)>>,
}

impl FaultyStorage {
    pub fn new(inner: Storage, policy: FailurePolicy) -> Self {
        Self {
            inner,
            policy,
            creations: Cell::new(0),
            hidden_rows: RefCell::new(BTreeSet::new()),
        }
    }

    /// Makes bulk fetches (`get_rows`) report `key` as absent while key
    /// enumeration still lists it.
    pub fn hide_row(&self, table: &str, key: &str) {
        self.hidden_rows
            .borrow_mut()
            .insert((table.to_string(), key.to_string()));
    }

    pub fn inner(&self) -> &Storage {
        &self.inner
    }

    /// Number of successful table creations so far.
    pub fn creation_count(&self) -> usize {
        self.creations.get()
    }

    pub fn set_policy(&mut self, policy: FailurePolicy) {
        self.policy = policy;
        self.creations.set(0);
    }

    fn should_refuse(&self, name: &str) -> bool {
        match &self.policy {
            FailurePolicy::Never => false,
            FailurePolicy::AfterCreations(n) => self.creations.get() >= *n,
            FailurePolicy::OnTables(names) => names.iter().any(|t| t == name),
        }
    }
}

impl TableStore for FaultyStorage {
    fn table_info(&self, name: &str) -> Option<TableInfo> {
        self.inner.table_info(name)
    }

    fn create_table(
        &self,
        name: &str,
        key_field: &str,
        value_fields: &[&str],
    ) -> Result<TableInfo, StorageError> {
        if self.should_refuse(name) {
            debug!(table = %name, "injected create_table failure");
            return Err(StorageError::CreateRefused(name.to_string()));
        }
        let info = self.inner.create_table(name, key_field, value_fields)?;
        self.creations.set(self.creations.get() + 1);
        Ok(info)
    }

    fn get_row(&self, table: &str, key: &str) -> Option<Entry> {
        self.inner.get_row(table, key)
    }

    fn get_primary_keys(&self, table: &str, predicate: KeyPredicate<'_>) -> Vec<String> {
        self.inner.get_primary_keys(table, predicate)
    }

    fn get_rows(&self, table: &str, keys: &[String]) -> Vec<Option<Entry>> {
        let hidden = self.hidden_rows.borrow();
        self.inner
            .get_rows(table, keys)
            .into_iter()
            .zip(keys)
            .map(|(row, key)| {
                if hidden.contains(&(table.to_string(), key.clone())) {
                    None
                } else {
                    row
                }
            })
            .collect()
    }

    fn set_row(&self, table: &str, key: &str, entry: Entry) -> Result<(), StorageError> {
        self.inner.set_row(table, key, entry)
    }
}
