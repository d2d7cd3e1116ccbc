mod common;

use abi::selector_of;
use common::HASHER;
use precompiled::{PrecompiledError, Route, SelectorTable, compute_selector, split_call};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Set,
}

#[test]
fn selector_is_big_endian_hash_prefix() {
    let digest = abi::Hasher::hash(&HASHER, b"list(string)");
    let expected = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    assert_eq!(compute_selector(&HASHER, "list(string)"), expected);
}

#[test]
fn split_call_separates_selector() {
    let data = [0xde, 0xad, 0xbe, 0xef, 0x01, 0x02];
    let (selector, payload) = split_call(&data).unwrap();
    assert_eq!(selector, 0xdeadbeef);
    assert_eq!(payload, &[0x01, 0x02]);

    let (selector, payload) = split_call(&data[..4]).unwrap();
    assert_eq!(selector, 0xdeadbeef);
    assert!(payload.is_empty());
}

#[test]
fn split_call_rejects_short_input() {
    for len in 0..4 {
        let data = vec![0xaa; len];
        assert_eq!(split_call(&data), Err(PrecompiledError::TruncatedCall(len)));
    }
}

#[test]
fn table_routes_known_and_unknown_selectors() {
    println!("=== Testing Router: Selector Table ===");
    let table = SelectorTable::new(
        &HASHER,
        &[("get(string)", Method::Get), ("set(string,string)", Method::Set)],
    );
    assert_eq!(table.len(), 2);

    let get = selector_of(&HASHER, "get(string)");
    let set = selector_of(&HASHER, "set(string,string)");
    assert_eq!(table.route(get), Route::Handler(Method::Get));
    assert_eq!(table.route(set), Route::Handler(Method::Set));
    assert_eq!(table.selector_for("set(string,string)"), Some(set));
    assert_eq!(table.selector_for("nope()"), None);

    let unknown = get.wrapping_add(1);
    assert_eq!(table.route(unknown), Route::Unrecognized(unknown));

    for (selector, signature) in table.signatures() {
        println!("  {:08x} {}", selector, signature);
    }
}
