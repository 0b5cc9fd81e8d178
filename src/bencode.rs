//! Strict canonical bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format used throughout BitTorrent for storing
//! and transmitting structured data, including `.torrent` files and tracker
//! responses. Every value has exactly one valid encoding, which is what makes
//! hashes over encoded data (such as the info-hash) stable. This module only
//! accepts and produces that canonical encoding.
//!
//! # Data Types
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! Integers are arbitrary precision; `i18446744073709551616e` decodes and
//! re-encodes exactly.
//!
//! # Examples
//!
//! ## Decoding bencode data
//!
//! ```
//! use rbit_bencode::bencode::{decode, Value};
//!
//! let value = decode(b"i42e").unwrap();
//! assert_eq!(value.as_i64(), Some(42));
//!
//! let value = decode(b"l4:spami42ee").unwrap();
//! let list = value.as_list().unwrap();
//! assert_eq!(list.len(), 2);
//!
//! let value = decode(b"d1:ad2:id20:abcdefghij0123456789e1:q4:ping1:t2:aa1:y1:qe").unwrap();
//! let id = value.get(b"a").and_then(|a| a.get(b"id")).unwrap();
//! assert_eq!(id.as_str(), Some("abcdefghij0123456789"));
//! ```
//!
//! ## Encoding bencode data
//!
//! ```
//! use rbit_bencode::bencode::{encode, Value};
//! use bytes::Bytes;
//! use std::collections::BTreeMap;
//!
//! let mut dict = BTreeMap::new();
//! dict.insert(Bytes::from_static(b"kb"), Value::integer(2));
//! dict.insert(Bytes::from_static(b"ka"), Value::integer(1));
//! dict.insert(Bytes::from_static(b"kc"), Value::integer(3));
//! assert_eq!(encode(&Value::Dict(dict)).unwrap(), b"d2:kai1e2:kbi2e2:kci3ee");
//!
//! assert_eq!(encode(&Value::List(vec![])).unwrap(), b"le");
//! ```
//!
//! ## Encoding caller object graphs
//!
//! [`Object`] is the shape a host binding hands over: shared, mutable and
//! possibly cyclic. [`encode_object`] sorts its dictionary keys, rejects keys
//! that are neither text nor bytes, and reports cycles instead of recursing
//! forever.
//!
//! ```
//! use rbit_bencode::bencode::{encode_object, EncodeError, Object};
//!
//! let list = Object::list();
//! list.push(list.clone());
//! assert_eq!(encode_object(&list), Err(EncodeError::CircularReference));
//! list.clear();
//! ```
//!
//! # Error Handling
//!
//! Encoding fails with an [`EncodeError`]. Decoding fails with a single
//! [`DecodeError`] whose [`kind`](DecodeError::kind) tells the cause apart:
//!
//! - [`DecodeErrorKind::InvalidInteger`] - Malformed integer (leading zeros, `-0`, non-digits)
//! - [`DecodeErrorKind::InvalidLength`] - Malformed string length prefix
//! - [`DecodeErrorKind::TruncatedString`] - String length exceeds the remaining input
//! - [`DecodeErrorKind::UnterminatedList`] / [`DecodeErrorKind::UnterminatedDict`]
//! - [`DecodeErrorKind::UnsortedKeys`] / [`DecodeErrorKind::DuplicateKey`]
//! - [`DecodeErrorKind::TrailingData`] - Extra data after the value
//! - [`DecodeErrorKind::NestingTooDeep`] - Nesting limit exceeded
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod encode;
mod error;
mod limits;
mod object;
mod value;

pub use decode::{decode, decode_with};
pub use encode::{encode, encode_object, Encoder};
pub use error::{BencodeError, DecodeError, DecodeErrorKind, EncodeError};
pub use limits::Limits;
pub use object::Object;
pub use value::Value;

/// Decodes `data` and encodes the result again.
///
/// Canonical input comes back byte for byte, so this doubles as a check
/// that a buffer is the one valid encoding of its value.
///
/// # Examples
///
/// ```
/// use rbit_bencode::bencode::recode;
///
/// let torrent = b"d8:announce15:http://test.com4:infod4:name4:test12:piece lengthi16384eee";
/// assert_eq!(recode(torrent).unwrap(), torrent);
/// assert!(recode(b"i-0e").is_err());
/// ```
pub fn recode(data: &[u8]) -> Result<Vec<u8>, BencodeError> {
    let value = decode(data)?;
    Ok(encode(&value)?)
}
