use bytes::Bytes;
use num_bigint::BigInt;
use std::collections::HashSet;
use tracing::debug;

use super::error::EncodeError;
use super::limits::Limits;
use super::object::Object;
use super::value::Value;
use crate::constants::{DICT_START, END, INTEGER_START, LENGTH_SEPARATOR, LIST_START};

/// Encodes a bencode value to a byte vector.
///
/// The output follows the canonical bencode format:
/// - Integers: `i<number>e`
/// - Byte strings: `<length>:<data>`
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e` (keys sorted lexicographically)
///
/// # Errors
///
/// Returns [`EncodeError::NestingTooDeep`] if the value nests deeper than
/// [`MAX_DEPTH`](crate::constants::MAX_DEPTH).
///
/// # Examples
///
/// ```
/// use rbit_bencode::bencode::{encode, Value};
/// use std::collections::BTreeMap;
/// use bytes::Bytes;
///
/// // Encode an integer
/// let encoded = encode(&Value::integer(42)).unwrap();
/// assert_eq!(encoded, b"i42e");
///
/// // Encode a string
/// let encoded = encode(&Value::string("hello")).unwrap();
/// assert_eq!(encoded, b"5:hello");
///
/// // Encode a list
/// let list = Value::List(vec![Value::integer(1), Value::string("two")]);
/// let encoded = encode(&list).unwrap();
/// assert_eq!(encoded, b"li1e3:twoe");
///
/// // Encode a dictionary
/// let mut dict = BTreeMap::new();
/// dict.insert(Bytes::from_static(b"b"), Value::integer(2));
/// dict.insert(Bytes::from_static(b"a"), Value::integer(1));
/// let encoded = encode(&Value::Dict(dict)).unwrap();
/// assert_eq!(encoded, b"d1:ai1e1:bi2ee");
/// ```
pub fn encode(value: &Value) -> Result<Vec<u8>, EncodeError> {
    let mut encoder = Encoder::new();
    encoder.encode_value(value)?;
    Ok(encoder.into_bytes())
}

/// Encodes a caller object graph to a byte vector.
///
/// Booleans become `i1e`/`i0e`, text is written as its UTF-8 bytes, and
/// tuples are written as lists. Dictionary keys are sorted by their byte
/// form at encode time.
///
/// # Errors
///
/// - [`EncodeError::UnsupportedType`] for `None` and floats
/// - [`EncodeError::InvalidKeyType`] for dictionary keys that are not text or bytes
/// - [`EncodeError::DuplicateKey`] when two keys have the same bytes
/// - [`EncodeError::CircularReference`] when a container contains itself
/// - [`EncodeError::NestingTooDeep`] past the nesting limit
///
/// # Examples
///
/// ```
/// use rbit_bencode::bencode::{encode_object, EncodeError, Object};
///
/// let shared = Object::tuple([Object::from(1), Object::from(2)]);
/// let list = Object::list();
/// list.push(shared.clone());
/// list.push(shared);
/// assert_eq!(encode_object(&list).unwrap(), b"lli1ei2eeli1ei2eee");
///
/// let dict = Object::dict();
/// dict.insert("key", 1);
/// dict.insert(b"key".as_slice(), 2);
/// assert!(matches!(encode_object(&dict), Err(EncodeError::DuplicateKey(_))));
/// ```
pub fn encode_object(object: &Object) -> Result<Vec<u8>, EncodeError> {
    let mut encoder = Encoder::new();
    encoder.encode_object(object)?;
    Ok(encoder.into_bytes())
}

/// A reusable bencode writer.
///
/// Each successful call appends one complete value to the internal buffer.
/// A failed call leaves the buffer as it was before the call.
///
/// # Examples
///
/// ```
/// use rbit_bencode::bencode::{Encoder, Limits, Value};
///
/// let mut encoder = Encoder::with_limits(Limits::default().with_max_depth(8));
/// encoder.encode_value(&Value::integer(1)).unwrap();
/// encoder.encode_value(&Value::string("x")).unwrap();
/// assert_eq!(encoder.into_bytes(), b"i1e1:x");
/// ```
#[derive(Debug, Default)]
pub struct Encoder {
    buf: Vec<u8>,
    limits: Limits,
    depth: usize,
    // Containers on the current recursion path, by address.
    path: HashSet<usize>,
}

impl Encoder {
    /// Creates an encoder with an empty buffer and default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an encoder with an empty buffer and the given limits.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Appends the encoding of `value`.
    pub fn encode_value(&mut self, value: &Value) -> Result<(), EncodeError> {
        let start = self.buf.len();
        let result = self.write_value(value);
        if result.is_err() {
            self.buf.truncate(start);
        }
        result
    }

    /// Appends the encoding of `object`.
    pub fn encode_object(&mut self, object: &Object) -> Result<(), EncodeError> {
        let start = self.buf.len();
        let result = self.write_object(object);
        if result.is_err() {
            self.buf.truncate(start);
        }
        result
    }

    /// Everything written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the encoder, returning its buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn write_value(&mut self, value: &Value) -> Result<(), EncodeError> {
        match value {
            Value::Integer(i) => self.write_integer(i),
            Value::Bytes(b) => self.write_bytes(b),
            Value::List(l) => self.nested(None, |enc| {
                enc.buf.push(LIST_START);
                for item in l {
                    enc.write_value(item)?;
                }
                enc.buf.push(END);
                Ok(())
            })?,
            Value::Dict(d) => self.nested(None, |enc| {
                enc.buf.push(DICT_START);
                for (key, val) in d {
                    enc.write_bytes(key);
                    enc.write_value(val)?;
                }
                enc.buf.push(END);
                Ok(())
            })?,
        }
        Ok(())
    }

    fn write_object(&mut self, object: &Object) -> Result<(), EncodeError> {
        match object {
            Object::Bool(true) => self.buf.extend_from_slice(b"i1e"),
            Object::Bool(false) => self.buf.extend_from_slice(b"i0e"),
            Object::Int(i) => self.write_integer(i),
            Object::Str(s) => self.write_bytes(s.as_bytes()),
            Object::Bytes(b) => self.write_bytes(b),
            Object::List(items) => self.nested(object.identity(), |enc| {
                enc.write_object_list(&items.borrow())
            })?,
            Object::Tuple(items) => {
                self.nested(object.identity(), |enc| enc.write_object_list(items))?
            }
            Object::Dict(entries) => self.nested(object.identity(), |enc| {
                enc.write_object_dict(&entries.borrow())
            })?,
            Object::None | Object::Float(_) => {
                return Err(EncodeError::UnsupportedType(object.type_name()));
            }
        }
        Ok(())
    }

    fn write_object_list(&mut self, items: &[Object]) -> Result<(), EncodeError> {
        self.buf.push(LIST_START);
        for item in items {
            self.write_object(item)?;
        }
        self.buf.push(END);
        Ok(())
    }

    fn write_object_dict(&mut self, entries: &[(Object, Object)]) -> Result<(), EncodeError> {
        let mut sorted = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let key: &[u8] = match key {
                Object::Str(s) => s.as_bytes(),
                Object::Bytes(b) => &b[..],
                other => return Err(EncodeError::InvalidKeyType(other.type_name())),
            };
            sorted.push((key, value));
        }

        sorted.sort_by(|a, b| a.0.cmp(b.0));
        if let Some(pair) = sorted.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(EncodeError::DuplicateKey(Bytes::copy_from_slice(pair[0].0)));
        }

        self.buf.push(DICT_START);
        for (key, value) in sorted {
            self.write_bytes(key);
            self.write_object(value)?;
        }
        self.buf.push(END);
        Ok(())
    }

    /// Runs `f` one nesting level down, tracking `id` on the active path.
    fn nested<F>(&mut self, id: Option<usize>, f: F) -> Result<(), EncodeError>
    where
        F: FnOnce(&mut Self) -> Result<(), EncodeError>,
    {
        if let Some(id) = id {
            if !self.path.insert(id) {
                debug!(depth = self.depth, "circular reference found while encoding");
                return Err(EncodeError::CircularReference);
            }
        }

        let result = if self.depth >= self.limits.max_depth {
            Err(EncodeError::NestingTooDeep)
        } else {
            self.depth += 1;
            let result = f(self);
            self.depth -= 1;
            result
        };

        if let Some(id) = id {
            self.path.remove(&id);
        }
        result
    }

    fn write_integer(&mut self, i: &BigInt) {
        self.buf.push(INTEGER_START);
        self.buf.extend_from_slice(i.to_str_radix(10).as_bytes());
        self.buf.push(END);
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.buf.extend_from_slice(b.len().to_string().as_bytes());
        self.buf.push(LENGTH_SEPARATOR);
        self.buf.extend_from_slice(b);
    }
}
