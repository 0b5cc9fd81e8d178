//! Property tests: canonical values survive encode/decode unchanged, and the
//! decoder never panics on arbitrary input.

use std::collections::BTreeMap;

use bytes::Bytes;
use num_bigint::BigInt;
use proptest::prelude::*;
use rbit_bencode::{decode, encode, recode, Value};

fn arb_integer() -> impl Strategy<Value = BigInt> {
    prop_oneof![
        any::<i64>().prop_map(BigInt::from),
        any::<u64>().prop_map(|n| BigInt::from(n) + 1u64 + u64::MAX),
        (any::<i64>(), any::<u64>()).prop_map(|(hi, lo)| (BigInt::from(hi) << 64) - lo),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        arb_integer().prop_map(Value::Integer),
        prop::collection::vec(any::<u8>(), 0..32).prop_map(|b| Value::Bytes(Bytes::from(b))),
    ];

    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::List),
            prop::collection::btree_map(
                prop::collection::vec(any::<u8>(), 0..8).prop_map(Bytes::from),
                inner,
                0..8
            )
            .prop_map(Value::Dict),
        ]
    })
}

proptest! {
    #[test]
    fn prop_roundtrip(value in arb_value()) {
        let encoded = encode(&value).unwrap();
        prop_assert_eq!(decode(&encoded).unwrap(), value);
        prop_assert_eq!(recode(&encoded).unwrap(), encoded);
    }

    #[test]
    fn prop_decode_arbitrary_bytes_never_panics(data in prop::collection::vec(any::<u8>(), 0..256)) {
        // Anything the decoder accepts must be canonical.
        if let Ok(value) = decode(&data) {
            prop_assert_eq!(encode(&value).unwrap(), data);
        }
    }

    #[test]
    fn prop_integer_text_is_canonical(n in arb_integer()) {
        let encoded = encode(&Value::Integer(n.clone())).unwrap();
        prop_assert_eq!(encoded, format!("i{n}e").into_bytes());
    }

    #[test]
    fn prop_trailing_byte_rejected(value in arb_value(), extra in any::<u8>()) {
        let mut encoded = encode(&value).unwrap();
        encoded.push(extra);
        prop_assert!(decode(&encoded).is_err());
    }

    #[test]
    fn prop_truncation_rejected(value in arb_value(), cut in any::<prop::sample::Index>()) {
        let encoded = encode(&value).unwrap();
        let cut = cut.index(encoded.len());
        prop_assert!(decode(&encoded[..cut]).is_err());
    }
}

#[test]
fn test_dict_insertion_order_irrelevant() {
    let keys: [&[u8]; 3] = [b"kb", b"ka", b"kc"];
    let mut dict = BTreeMap::new();
    for (i, key) in keys.iter().enumerate() {
        dict.insert(Bytes::copy_from_slice(key), Value::from(i as i64));
    }
    assert_eq!(
        encode(&Value::Dict(dict)).unwrap(),
        b"d2:kai1e2:kbi0e2:kci2ee"
    );
}
