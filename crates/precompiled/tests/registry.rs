mod common;

use common::{HASHER, ORIGIN, SENDER, call_data, codec, fs_address, status_of};
use precompiled::{
    ExecutiveContext, FileSystemPrecompiled, Precompiled, PrecompiledExecResult,
    PrecompiledRegistry,
};
use storage::Storage;
use types::address::Address;
use types::StatusCode;

/// Answers every call with its own input length.
struct Echo;

impl Precompiled for Echo {
    fn name(&self) -> &str {
        "Echo"
    }

    fn call(
        &self,
        ctx: &ExecutiveContext<'_>,
        call_data: &[u8],
        _origin: &Address,
        _sender: &Address,
    ) -> PrecompiledExecResult {
        let mut result = PrecompiledExecResult::new();
        result.set_exec_result(precompiled::encode_result(&ctx.codec(), call_data.len() as i64));
        result
    }
}

fn registry() -> PrecompiledRegistry {
    let mut registry = PrecompiledRegistry::new();
    registry.register(fs_address(), Box::new(FileSystemPrecompiled::new(&HASHER)));
    registry.register(Address::precompiled(0x2000), Box::new(Echo));
    registry
}

#[test]
fn filesystem_lives_at_its_reserved_address() {
    assert_eq!(
        fs_address().to_string(),
        "000000000000000000000000000000000000100e"
    );
}

#[test]
fn routes_by_address() {
    println!("=== Testing Registry: Routing ===");
    let storage = Storage::new();
    let ctx = ExecutiveContext::new(&storage, &HASHER, false);
    let registry = registry();
    println!("{:?}", registry);

    let codec = codec(false);
    let data = call_data(&codec, "mkdir(string)", &["/reg"]);
    let result = registry
        .call(&fs_address(), &ctx, &data, &ORIGIN, &SENDER)
        .expect("filesystem registered");
    assert_eq!(status_of(&codec, &result), 0);
    assert!(storage.table_names().contains(&"/reg".to_string()));

    let echoed = registry
        .call(&Address::precompiled(0x2000), &ctx, &data, &ORIGIN, &SENDER)
        .expect("echo registered");
    assert_eq!(status_of(&codec, &echoed), data.len() as i128);

    assert!(registry
        .call(&Address::precompiled(0x9999), &ctx, &data, &ORIGIN, &SENDER)
        .is_none());
    println!("✓ Calls reached the handler at each address");
}

#[test]
fn register_replaces_existing_handler() {
    let mut registry = registry();
    let replaced = registry.register(Address::precompiled(0x2000), Box::new(Echo));
    assert_eq!(replaced.map(|h| h.name().to_string()), Some("Echo".to_string()));
    assert_eq!(registry.addresses().count(), 2);
    assert!(registry.contains(&fs_address()));
    assert_eq!(registry.get(&fs_address()).map(|h| h.name()), Some("FileSystemPrecompiled"));
}

#[test]
fn unrecognized_selector_gets_empty_answer() {
    println!("=== Testing Registry: Unknown Selector ===");
    let storage = Storage::new();
    let ctx = ExecutiveContext::new(&storage, &HASHER, false);
    let registry = registry();

    let result = registry
        .call(&fs_address(), &ctx, &[0xde, 0xad, 0xbe, 0xef], &ORIGIN, &SENDER)
        .unwrap();
    assert!(result.exec_result.is_empty());
    assert_eq!(result.gas, 3);
    assert_eq!(storage.table_count(), 0);
}

#[test]
fn truncated_call_is_invalid_input() {
    let storage = Storage::new();
    let ctx = ExecutiveContext::new(&storage, &HASHER, false);
    let registry = registry();

    let result = registry
        .call(&fs_address(), &ctx, &[0x01, 0x02], &ORIGIN, &SENDER)
        .unwrap();
    assert_eq!(
        status_of(&codec(false), &result),
        i128::from(StatusCode::InvalidInput.code())
    );
}
