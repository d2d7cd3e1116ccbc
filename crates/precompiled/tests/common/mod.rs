#![allow(dead_code)]

use abi::{AbiCodec, CodecMode, ParamType, Sha256Hasher, Token, selector_of};
use precompiled::{
    Config, ExecutiveContext, FileEntry, FileSystemPrecompiled, Precompiled,
    PrecompiledExecResult,
};
use storage::TableStore;
use types::address::Address;

pub static HASHER: Sha256Hasher = Sha256Hasher;

pub const ORIGIN: Address = Address([0x11; 20]);
pub const SENDER: Address = Address([0x22; 20]);

/// Routes handler logs to the test output; set `RUST_LOG=trace` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}

pub fn codec(is_wasm: bool) -> AbiCodec {
    AbiCodec::new(CodecMode::from_wasm(is_wasm))
}

/// Selector followed by the encoded string arguments.
pub fn call_data(codec: &AbiCodec, signature: &str, args: &[&str]) -> Vec<u8> {
    let tokens: Vec<Token> = args.iter().map(|a| Token::String(a.to_string())).collect();
    let mut data = selector_of(&HASHER, signature).to_be_bytes().to_vec();
    data.extend(codec.encode(&tokens));
    data
}

/// Drives the filesystem handler against `storage`.
pub struct Fs<'a> {
    pub storage: &'a dyn TableStore,
    pub handler: FileSystemPrecompiled,
    pub is_wasm: bool,
}

impl<'a> Fs<'a> {
    pub fn new(storage: &'a dyn TableStore) -> Self {
        Self {
            storage,
            handler: FileSystemPrecompiled::new(&HASHER),
            is_wasm: false,
        }
    }

    pub fn wasm(storage: &'a dyn TableStore) -> Self {
        Self {
            is_wasm: true,
            ..Self::new(storage)
        }
    }

    pub fn codec(&self) -> AbiCodec {
        codec(self.is_wasm)
    }

    pub fn raw(&self, data: &[u8]) -> PrecompiledExecResult {
        let ctx = ExecutiveContext::new(self.storage, &HASHER, self.is_wasm);
        self.handler.call(&ctx, data, &ORIGIN, &SENDER)
    }

    pub fn call(&self, signature: &str, args: &[&str]) -> PrecompiledExecResult {
        self.raw(&call_data(&self.codec(), signature, args))
    }

    pub fn mkdir(&self, path: &str) -> PrecompiledExecResult {
        self.call("mkdir(string)", &[path])
    }

    pub fn touch(&self, path: &str, file_type: &str) -> PrecompiledExecResult {
        self.call("touch(string,string)", &[path, file_type])
    }

    pub fn list(&self, path: &str) -> PrecompiledExecResult {
        self.call("list(string)", &[path])
    }

    pub fn status(&self, result: &PrecompiledExecResult) -> i128 {
        status_of(&self.codec(), result)
    }

    pub fn entries(&self, result: &PrecompiledExecResult) -> Vec<FileEntry> {
        entries_of(&self.codec(), result)
    }
}

/// Integer status carried in the return data.
pub fn status_of(codec: &AbiCodec, result: &PrecompiledExecResult) -> i128 {
    let tokens = codec
        .decode(&result.exec_result, &[ParamType::Int(256)])
        .expect("status word");
    tokens[0].as_int().expect("int token")
}

/// JSON listing carried in the return data.
pub fn entries_of(codec: &AbiCodec, result: &PrecompiledExecResult) -> Vec<FileEntry> {
    let json = codec.decode_string(&result.exec_result).expect("string return");
    serde_json::from_str(&json).expect("json listing")
}

pub fn entry(name: &str, file_type: &str) -> FileEntry {
    FileEntry {
        name: name.to_string(),
        file_type: file_type.to_string(),
        extra: String::new(),
    }
}

pub fn fs_address() -> Address {
    Config::FILE_SYSTEM_ADDRESS
}
