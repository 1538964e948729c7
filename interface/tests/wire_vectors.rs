//! Known-answer vectors for the account layouts the remote program
//! persists, byte for byte.

use std::collections::BTreeMap;

use hello_ledger_interface::{
    codec::{decode, decode_lenient, encode, encode_padded},
    error::CodecError,
    schema::Record,
    size::expected_size,
    state::{GreetingAccount, LedgerAccount, LEDGER_ACCOUNT_SPACE},
};

#[test]
fn greeting_account_is_one_little_endian_u32() {
    assert_eq!(encode(&GreetingAccount::new(0)).unwrap(), [0, 0, 0, 0]);
    assert_eq!(encode(&GreetingAccount::new(1)).unwrap(), [1, 0, 0, 0]);
    assert_eq!(
        encode(&GreetingAccount::new(0x0403_0201)).unwrap(),
        [0x01, 0x02, 0x03, 0x04]
    );
    assert_eq!(
        decode::<GreetingAccount>(&[0x01, 0x02, 0x03, 0x04]).unwrap(),
        GreetingAccount::new(0x0403_0201)
    );
}

#[test]
fn ledger_account_vector_matches_the_deployed_program() {
    let record = LedgerAccount::with_balances(BTreeMap::from([("abc".to_string(), 5)]));
    let expected: Vec<u8> = vec![
        0x01, // initialized
        0x01, 0x00, 0x00, 0x00, // tree_length = 1
        0x03, 0x00, 0x00, 0x00, // key length = 3
        b'a', b'b', b'c', // key
        0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // balance = 5
    ];
    let bytes = encode(&record).unwrap();
    assert_eq!(bytes, expected);
    assert_eq!(decode_lenient::<LedgerAccount>(&bytes).unwrap(), record);
}

#[test]
fn ledger_account_decodes_from_its_full_allocated_buffer() {
    let record = LedgerAccount::with_balances(BTreeMap::from([
        ("FCSKqqjPcNRQE4QRVLrJASmhg95QMPKmD1BpcaWJvg1G".to_string(), 200_000_000),
    ]));
    let buffer = encode_padded(&record, LEDGER_ACCOUNT_SPACE).unwrap();
    assert_eq!(buffer.len(), LEDGER_ACCOUNT_SPACE);
    assert_eq!(decode_lenient::<LedgerAccount>(&buffer).unwrap(), record);

    // Strict decoding is the wrong mode for an over-allocated buffer.
    assert!(matches!(
        decode::<LedgerAccount>(&buffer),
        Err(CodecError::LengthMismatch { .. })
    ));
}

#[test]
fn provisioning_sizes_come_from_measured_defaults() {
    assert_eq!(expected_size::<GreetingAccount>().unwrap(), 4);
    assert_eq!(expected_size::<LedgerAccount>().unwrap(), 5);
    assert!(expected_size::<LedgerAccount>().unwrap() <= LEDGER_ACCOUNT_SPACE);
}

#[test]
fn field_order_is_wire_order() {
    let names: Vec<&str> = LedgerAccount::SCHEMA
        .fields
        .iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(names, ["initialized", "tree_length", "balances"]);
}
