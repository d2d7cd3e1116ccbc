use crate::entry::Entry;
use crate::error::StorageError;

/// Optional filter applied to primary keys while enumerating a table.
pub type KeyPredicate<'a> = Option<&'a dyn Fn(&str) -> bool>;

/// Schema of a table: one key column plus the declared value columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub name: String,
    pub key_field: String,
    pub value_fields: Vec<String>,
}

impl TableInfo {
    pub fn new(name: &str, key_field: &str, value_fields: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            key_field: key_field.to_string(),
            value_fields: value_fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.value_fields.iter().any(|f| f == field)
    }
}

/// Contract of the replicated key-value table store.
///
/// Ordering, isolation and commit/rollback are the store's business; callers
/// assume they see one consistent, already-serialized view for the duration
/// of a call. Implementations use interior mutability so a single shared
/// reference can be handed to every handler.
pub trait TableStore {
    /// Schema of `name`, or `None` when no such table exists.
    fn table_info(&self, name: &str) -> Option<TableInfo>;

    fn create_table(
        &self,
        name: &str,
        key_field: &str,
        value_fields: &[&str],
    ) -> Result<TableInfo, StorageError>;

    fn get_row(&self, table: &str, key: &str) -> Option<Entry>;

    /// Primary keys of `table` in ascending order, optionally filtered.
    fn get_primary_keys(&self, table: &str, predicate: KeyPredicate<'_>) -> Vec<String>;

    /// Bulk fetch; the result is aligned with `keys`.
    fn get_rows(&self, table: &str, keys: &[String]) -> Vec<Option<Entry>>;

    fn set_row(&self, table: &str, key: &str, entry: Entry) -> Result<(), StorageError>;
}

/// An opened table: a schema bound to the store it lives in.
pub struct Table<'s> {
    store: &'s dyn TableStore,
    info: TableInfo,
}

impl<'s> Table<'s> {
    /// Opens an existing table; `None` when it does not exist.
    pub fn open(store: &'s dyn TableStore, name: &str) -> Option<Self> {
        store.table_info(name).map(|info| Self { store, info })
    }

    pub fn create(
        store: &'s dyn TableStore,
        name: &str,
        key_field: &str,
        value_fields: &[&str],
    ) -> Result<Self, StorageError> {
        let info = store.create_table(name, key_field, value_fields)?;
        Ok(Self { store, info })
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// An empty row carrying every declared value field.
    pub fn new_entry(&self) -> Entry {
        Entry::with_fields(self.info.value_fields.iter().map(|f| (f.as_str(), "")))
    }

    pub fn get_row(&self, key: &str) -> Option<Entry> {
        self.store.get_row(&self.info.name, key)
    }

    pub fn get_primary_keys(&self, predicate: KeyPredicate<'_>) -> Vec<String> {
        self.store.get_primary_keys(&self.info.name, predicate)
    }

    pub fn get_rows(&self, keys: &[String]) -> Vec<Option<Entry>> {
        self.store.get_rows(&self.info.name, keys)
    }

    pub fn set_row(&self, key: &str, entry: Entry) -> Result<(), StorageError> {
        self.store.set_row(&self.info.name, key, entry)
    }
}

impl std::fmt::Debug for Table<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table").field("info", &self.info).finish()
    }
}
