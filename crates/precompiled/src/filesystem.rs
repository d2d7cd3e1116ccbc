//! Hierarchical filesystem over flat tables.
//!
//! Every directory is a table named by its absolute path, keyed by child
//! name, with `type` and `extra` columns. A child is visible once its row
//! sits in the parent's table; the root table `/` has no row anywhere and
//! is always a directory.

use std::str::FromStr;

use abi::{AbiCodec, AbiError, Hasher, ParamType, Token, selector_hex};
use serde::{Deserialize, Serialize};
use storage::{Entry, Table, TableStore};
use tracing::{debug, error, trace, warn};
use types::StatusCode;
use types::address::Address;

use crate::error::PrecompiledError;
use crate::execution_context::ExecutiveContext;
use crate::global::Config;
use crate::metering::{GasSchedule, InterfaceOpcode, PrecompiledGas};
use crate::naming::{check_length_validate, check_name_validate};
use crate::path::{join_path, normalize, path_segments, split_parent_and_base};
use crate::precompiled::Precompiled;
use crate::result::{PrecompiledExecResult, encode_status};
use crate::router::{Route, SelectorTable, split_call};

pub const FILE_SYSTEM_METHOD_LIST: &str = "list(string)";
pub const FILE_SYSTEM_METHOD_MKDIR: &str = "mkdir(string)";
pub const FILE_SYSTEM_METHOD_TOUCH: &str = "touch(string,string)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsMethod {
    List,
    Mkdir,
    Touch,
}

const FS_METHODS: [(&str, FsMethod); 3] = [
    (FILE_SYSTEM_METHOD_LIST, FsMethod::List),
    (FILE_SYSTEM_METHOD_MKDIR, FsMethod::Mkdir),
    (FILE_SYSTEM_METHOD_TOUCH, FsMethod::Touch),
];

/// Kinds of entry the filesystem can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Directory,
    Contract,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Directory => "directory",
            FileType::Contract => "contract",
        }
    }
}

impl FromStr for FileType {
    type Err = PrecompiledError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "directory" => Ok(FileType::Directory),
            "contract" => Ok(FileType::Contract),
            other => Err(PrecompiledError::InvalidFileType(other.to_string())),
        }
    }
}

/// One element of a `list` answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: String,
    pub extra: String,
}

impl FileEntry {
    fn from_row(name: &str, row: &Entry) -> Self {
        Self {
            name: name.to_string(),
            file_type: row.get_field(Config::FS_FIELD_TYPE).unwrap_or_default().to_string(),
            extra: row.get_field(Config::FS_FIELD_EXTRA).unwrap_or_default().to_string(),
        }
    }
}

fn is_directory(row: &Entry) -> bool {
    row.get_field(Config::FS_FIELD_TYPE) == Some(FileType::Directory.as_str())
}

/// The filesystem precompiled: `list`, `mkdir` and `touch`.
#[derive(Debug)]
pub struct FileSystemPrecompiled {
    selectors: SelectorTable<FsMethod>,
    schedule: GasSchedule,
}

impl FileSystemPrecompiled {
    pub fn new(hasher: &dyn Hasher) -> Self {
        Self::with_schedule(hasher, GasSchedule::default())
    }

    pub fn with_schedule(hasher: &dyn Hasher, schedule: GasSchedule) -> Self {
        Self {
            selectors: SelectorTable::new(hasher, &FS_METHODS),
            schedule,
        }
    }

    pub fn selectors(&self) -> &SelectorTable<FsMethod> {
        &self.selectors
    }

    pub fn schedule(&self) -> &GasSchedule {
        &self.schedule
    }

    fn dispatch(
        &self,
        ctx: &ExecutiveContext<'_>,
        codec: &AbiCodec,
        method: FsMethod,
        payload: &[u8],
        gas: &mut PrecompiledGas,
        result: &mut PrecompiledExecResult,
    ) -> Result<Vec<u8>, PrecompiledError> {
        match method {
            FsMethod::List => {
                let [path] = decode_strings::<1>(codec, payload)?;
                self.list(ctx.storage, codec, &path, gas, result)
            }
            FsMethod::Mkdir => {
                let [path] = decode_strings::<1>(codec, payload)?;
                self.mkdir(ctx.storage, codec, &path, gas)
            }
            FsMethod::Touch => {
                let [path, file_type] = decode_strings::<2>(codec, payload)?;
                self.touch(ctx.storage, codec, &path, &file_type, gas)
            }
        }
    }

    fn list(
        &self,
        storage: &dyn TableStore,
        codec: &AbiCodec,
        raw_path: &str,
        gas: &mut PrecompiledGas,
        result: &mut PrecompiledExecResult,
    ) -> Result<Vec<u8>, PrecompiledError> {
        let path = normalize(raw_path)?;
        debug!(path = %path, "list");

        gas.append_operation(InterfaceOpcode::OpenTable);
        let table =
            Table::open(storage, &path).ok_or_else(|| PrecompiledError::NotFound(path.clone()))?;

        let entries = if path == Config::FS_ROOT {
            list_directory(&table, gas, result)
        } else {
            let (parent, base) = split_parent_and_base(&path)?;
            gas.append_operation(InterfaceOpcode::OpenTable);
            let parent_table = match Table::open(storage, &parent) {
                Some(table) => table,
                None => {
                    warn!(path = %path, parent = %parent, "table exists without its parent");
                    result.record_anomaly();
                    return Err(PrecompiledError::NotFound(path));
                }
            };

            gas.append_operation(InterfaceOpcode::Select);
            let row = parent_table
                .get_row(&base)
                .ok_or_else(|| PrecompiledError::NotFound(path.clone()))?;

            if is_directory(&row) {
                list_directory(&table, gas, result)
            } else {
                vec![FileEntry::from_row(&base, &row)]
            }
        };

        let json = serde_json::to_string(&entries)
            .map_err(|e| PrecompiledError::Serialization(e.to_string()))?;
        trace!(path = %path, entries = entries.len(), "listed");
        Ok(codec.encode_string(&json))
    }

    fn mkdir(
        &self,
        storage: &dyn TableStore,
        codec: &AbiCodec,
        raw_path: &str,
        gas: &mut PrecompiledGas,
    ) -> Result<Vec<u8>, PrecompiledError> {
        let path = normalize(raw_path)?;
        debug!(path = %path, "mkdir");

        gas.append_operation(InterfaceOpcode::OpenTable);
        if Table::open(storage, &path).is_some() {
            return Err(PrecompiledError::AlreadyExists(path));
        }

        build_directories(storage, &path, gas).map_err(|e| {
            error!(path = %path, error = %e, "mkdir failed");
            PrecompiledError::BuildDirFailed(path.clone())
        })?;
        Ok(encode_status(codec, StatusCode::Success))
    }

    fn touch(
        &self,
        storage: &dyn TableStore,
        codec: &AbiCodec,
        raw_path: &str,
        raw_type: &str,
        gas: &mut PrecompiledGas,
    ) -> Result<Vec<u8>, PrecompiledError> {
        let path = normalize(raw_path)?;
        let file_type: FileType = raw_type.parse()?;
        debug!(path = %path, file_type = file_type.as_str(), "touch");

        let (parent, base) = split_parent_and_base(&path)?;
        // The base name becomes a row key. Today the path limit already keeps
        // it under the key limit.
        let status = check_length_validate(
            &base,
            Config::USER_TABLE_KEY_VALUE_MAX_LENGTH,
            StatusCode::TableKeyValueLengthOverflow,
        );
        if !status.is_success() {
            return Err(PrecompiledError::Status(status));
        }

        gas.append_operation(InterfaceOpcode::OpenTable);
        if Table::open(storage, &path).is_some() {
            return Err(PrecompiledError::AlreadyExists(path));
        }

        let created = build_directories(storage, &parent, gas)
            .and_then(|parent_table| create_child(storage, &parent_table, &base, file_type, gas));
        if let Err(e) = created {
            error!(path = %path, error = %e, "touch failed");
            return Err(PrecompiledError::BuildDirFailed(path));
        }
        Ok(encode_status(codec, StatusCode::Success))
    }
}

impl Precompiled for FileSystemPrecompiled {
    fn name(&self) -> &str {
        "FileSystemPrecompiled"
    }

    fn call(
        &self,
        ctx: &ExecutiveContext<'_>,
        call_data: &[u8],
        origin: &Address,
        sender: &Address,
    ) -> PrecompiledExecResult {
        let codec = ctx.codec();
        let mut gas = PrecompiledGas::new(self.schedule);
        gas.set_mem_used(call_data.len());
        let mut result = PrecompiledExecResult::new();

        let output = match split_call(call_data) {
            Err(e) => {
                error!(origin = %origin, sender = %sender, error = %e, "rejected call");
                encode_status(&codec, e.status_code())
            }
            Ok((selector, payload)) => match self.selectors.route(selector) {
                Route::Unrecognized(selector) => {
                    error!(
                        selector = %selector_hex(selector),
                        sender = %sender,
                        "call undefined function"
                    );
                    Vec::new()
                }
                Route::Handler(method) => {
                    trace!(?method, origin = %origin, sender = %sender, wasm = ctx.is_wasm, "dispatch");
                    self.dispatch(ctx, &codec, method, payload, &mut gas, &mut result)
                        .unwrap_or_else(|e| {
                            debug!(?method, error = %e, "call failed");
                            encode_status(&codec, e.status_code())
                        })
                }
            },
        };

        gas.update_mem_used(output.len());
        result.set_gas(gas.total_gas());
        result.set_exec_result(output);
        result
    }
}

fn decode_strings<const N: usize>(
    codec: &AbiCodec,
    payload: &[u8],
) -> Result<[String; N], PrecompiledError> {
    let tokens = codec.decode(payload, &[ParamType::String; N])?;
    let strings: Vec<String> = tokens.into_iter().filter_map(Token::into_string).collect();
    strings
        .try_into()
        .map_err(|_| AbiError::UnknownType("string".to_string()).into())
}

/// Children of a directory table, skipping keys whose row has gone missing.
fn list_directory(
    table: &Table<'_>,
    gas: &mut PrecompiledGas,
    result: &mut PrecompiledExecResult,
) -> Vec<FileEntry> {
    gas.append_operation(InterfaceOpcode::Select);
    let keys = table.get_primary_keys(None);
    gas.append_operation(InterfaceOpcode::Select);
    let rows = table.get_rows(&keys);

    let mut entries = Vec::with_capacity(keys.len());
    for (key, row) in keys.iter().zip(rows) {
        match row {
            Some(row) => entries.push(FileEntry::from_row(key, &row)),
            None => {
                warn!(table = table.name(), key = %key, "listed key has no row, skipped");
                result.record_anomaly();
            }
        }
    }
    entries
}

fn open_or_create_root<'s>(
    storage: &'s dyn TableStore,
    gas: &mut PrecompiledGas,
) -> Result<Table<'s>, PrecompiledError> {
    gas.append_operation(InterfaceOpcode::OpenTable);
    if let Some(root) = Table::open(storage, Config::FS_ROOT) {
        return Ok(root);
    }
    debug!("creating filesystem root");
    create_directory_table(storage, Config::FS_ROOT, gas)
}

fn create_directory_table<'s>(
    storage: &'s dyn TableStore,
    path: &str,
    gas: &mut PrecompiledGas,
) -> Result<Table<'s>, PrecompiledError> {
    check_name_validate(path, &[Config::FS_KEY_NAME], &Config::FS_VALUE_FIELDS)?;
    gas.append_operation(InterfaceOpcode::CreateTable);
    Ok(Table::create(
        storage,
        path,
        Config::FS_KEY_NAME,
        &Config::FS_VALUE_FIELDS,
    )?)
}

/// Creates the table for `name` under `parent`, then links it with a row.
/// The row is only written once the table exists.
fn create_child<'s>(
    storage: &'s dyn TableStore,
    parent: &Table<'s>,
    name: &str,
    file_type: FileType,
    gas: &mut PrecompiledGas,
) -> Result<Table<'s>, PrecompiledError> {
    let path = join_path(parent.name(), name);
    let table = create_directory_table(storage, &path, gas)?;

    let mut row = parent.new_entry();
    row.set_field(Config::FS_FIELD_TYPE, file_type.as_str());
    gas.append_operation(InterfaceOpcode::Insert);
    parent.set_row(name, row)?;
    trace!(path = %path, file_type = file_type.as_str(), "created");
    Ok(table)
}

/// Makes sure every directory from the root down to `path` exists and
/// returns the table at `path`.
///
/// Stops at the first failure; whatever was created before it stays.
fn build_directories<'s>(
    storage: &'s dyn TableStore,
    path: &str,
    gas: &mut PrecompiledGas,
) -> Result<Table<'s>, PrecompiledError> {
    let mut current = open_or_create_root(storage, gas)?;

    for segment in path_segments(path)? {
        gas.append_operation(InterfaceOpcode::Select);
        current = match current.get_row(segment) {
            Some(row) => {
                let child = join_path(current.name(), segment);
                if !is_directory(&row) {
                    return Err(PrecompiledError::NotADirectory(child));
                }
                gas.append_operation(InterfaceOpcode::OpenTable);
                Table::open(storage, &child).ok_or(PrecompiledError::NotFound(child))?
            }
            None => create_child(storage, &current, segment, FileType::Directory, gas)?,
        };
    }
    Ok(current)
}
