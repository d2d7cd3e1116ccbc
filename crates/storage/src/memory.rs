use std::cell::RefCell;
use std::collections::BTreeMap;

use tracing::trace;

use crate::entry::Entry;
use crate::error::StorageError;
use crate::table::{KeyPredicate, TableInfo, TableStore};

#[derive(Debug)]
struct TableData {
    info: TableInfo,
    rows: BTreeMap<String, Entry>,
}

/// In-memory table store.
///
/// Tables and rows live in ordered maps behind a `RefCell`, so iteration is
/// deterministic and a shared reference is enough to mutate. Not thread-safe;
/// a call runs on one thread against one store.
#[derive(Debug, Default)]
pub struct Storage {
    tables: RefCell<BTreeMap<String, TableData>>,
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_names(&self) -> Vec<String> {
        self.tables.borrow().keys().cloned().collect()
    }

    pub fn table_count(&self) -> usize {
        self.tables.borrow().len()
    }

    pub fn row_count(&self, table: &str) -> usize {
        self.tables
            .borrow()
            .get(table)
            .map_or(0, |data| data.rows.len())
    }

    /// Emits every table and row as trace events.
    pub fn dump(&self) {
        for (name, data) in self.tables.borrow().iter() {
            trace!(table = %name, key_field = %data.info.key_field, rows = data.rows.len(), "table");
            for (key, entry) in &data.rows {
                trace!(table = %name, key = %key, row = ?entry, "row");
            }
        }
    }
}

impl TableStore for Storage {
    fn table_info(&self, name: &str) -> Option<TableInfo> {
        self.tables.borrow().get(name).map(|data| data.info.clone())
    }

    fn create_table(
        &self,
        name: &str,
        key_field: &str,
        value_fields: &[&str],
    ) -> Result<TableInfo, StorageError> {
        let mut tables = self.tables.borrow_mut();
        if tables.contains_key(name) {
            return Err(StorageError::TableAlreadyExists(name.to_string()));
        }
        let info = TableInfo::new(name, key_field, value_fields);
        tables.insert(
            name.to_string(),
            TableData {
                info: info.clone(),
                rows: BTreeMap::new(),
            },
        );
        trace!(table = %name, "created table");
        Ok(info)
    }

    fn get_row(&self, table: &str, key: &str) -> Option<Entry> {
        self.tables.borrow().get(table)?.rows.get(key).cloned()
    }

    fn get_primary_keys(&self, table: &str, predicate: KeyPredicate<'_>) -> Vec<String> {
        let tables = self.tables.borrow();
        let Some(data) = tables.get(table) else {
            return Vec::new();
        };
        data.rows
            .keys()
            .filter(|key| predicate.is_none_or(|accept| accept(key)))
            .cloned()
            .collect()
    }

    fn get_rows(&self, table: &str, keys: &[String]) -> Vec<Option<Entry>> {
        let tables = self.tables.borrow();
        let data = tables.get(table);
        keys.iter()
            .map(|key| data.and_then(|d| d.rows.get(key).cloned()))
            .collect()
    }

    fn set_row(&self, table: &str, key: &str, entry: Entry) -> Result<(), StorageError> {
        let mut tables = self.tables.borrow_mut();
        let data = tables
            .get_mut(table)
            .ok_or_else(|| StorageError::TableNotFound(table.to_string()))?;
        if let Some((field, _)) = entry.fields().find(|(f, _)| !data.info.has_field(f)) {
            return Err(StorageError::UnknownField {
                table: table.to_string(),
                field: field.to_string(),
            });
        }
        data.rows.insert(key.to_string(), entry);
        Ok(())
    }
}
