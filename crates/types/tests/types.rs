use types::{Address, StatusCode};

#[test]
fn precompiled_addresses_carry_id_in_last_bytes() {
    println!("=== Testing Address: Precompiled ===");
    let addr = Address::precompiled(0x100e);
    println!("{:?}", addr);
    assert_eq!(addr.0[18], 0x10);
    assert_eq!(addr.0[19], 0x0e);
    assert!(addr.0[..18].iter().all(|b| *b == 0));
    assert!(!addr.is_zero());
    assert!(Address::default().is_zero());
}

#[test]
fn hex_round_trip() {
    let text = "0x000000000000000000000000000000000000100E";
    let addr = Address::from_hex(text).expect("valid hex");
    assert_eq!(addr, Address::precompiled(0x100e));
    assert_eq!(format!("{:?}", addr), text.to_lowercase());
    assert_eq!(Address::from_hex(&addr.to_string()), Some(addr));

    assert_eq!(Address::from_hex("0x1234"), None);
    assert_eq!(Address::from_hex(&"zz".repeat(20)), None);
}

#[test]
fn from_slice_requires_exact_length() {
    assert_eq!(Address::from_slice(&[7u8; 20]), Some(Address([7; 20])));
    assert_eq!(Address::from_slice(&[7u8; 19]), None);
}

#[test]
fn status_codes_round_trip() {
    println!("=== Testing StatusCode ===");
    for status in StatusCode::ALL {
        println!("  {}", status);
        assert_eq!(StatusCode::from_code(status.code()), Some(status));
    }
    assert_eq!(StatusCode::from_code(1), None);
    assert!(StatusCode::Success.is_success());
    assert!(!StatusCode::FileNotExist.is_success());
    assert_eq!(i32::from(StatusCode::FileInvalidPath), -53005);
    assert_eq!(StatusCode::InvalidInput.to_string(), "InvalidInput(-50100)");
}
