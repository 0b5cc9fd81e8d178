//! rbit-bencode - A strict canonical bencode codec
//!
//! This library encodes and decodes the bencode format defined by BEP-3,
//! accepting and producing only the canonical encoding of each value.
//!
//! # Modules
//!
//! - [`bencode`] - Value model, encoder, decoder and errors
//! - [`constants`] - Wire delimiters and default limits
//!
//! # Examples
//!
//! ```
//! use rbit_bencode::{decode, encode, Value};
//!
//! let value = decode(b"i18446744073709551616e").unwrap();
//! assert_eq!(value.as_u64(), None);
//! assert_eq!(encode(&value).unwrap(), b"i18446744073709551616e");
//! ```

pub mod bencode;
pub mod constants;

pub use bencode::{
    decode, decode_with, encode, encode_object, recode, BencodeError, DecodeError, DecodeErrorKind,
    EncodeError, Encoder, Limits, Object, Value,
};
