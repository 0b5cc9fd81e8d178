use bytes::Bytes;
use num_bigint::BigInt;
use std::cell::RefCell;
use std::rc::Rc;

use super::value::Value;

/// A dynamically typed caller object, as handed over by a host binding.
///
/// Unlike [`Value`], an `Object` graph can share children and can contain
/// itself: lists and dictionaries are reference counted and mutable, the
/// way a scripting runtime's containers are. Dictionaries accept any key
/// type and keep insertion order. The encoder is responsible for sorting
/// keys, rejecting keys that are not text or bytes, rejecting keys that
/// collide once converted to bytes, and refusing to follow cycles.
///
/// Containers are `Rc<RefCell<_>>`, so a graph that contains itself is never
/// freed on its own. Callers that build cycles must break them, for example
/// with [`Object::clear`] once the graph is no longer needed.
///
/// # Examples
///
/// ```
/// use rbit_bencode::bencode::{encode_object, EncodeError, Object};
///
/// let dict = Object::dict();
/// dict.insert("kb", 2);
/// dict.insert("ka", 1);
/// assert_eq!(encode_object(&dict).unwrap(), b"d2:kai1e2:kbi2ee");
///
/// // A dictionary that contains itself cannot be encoded.
/// dict.insert("self", dict.clone());
/// assert_eq!(encode_object(&dict), Err(EncodeError::CircularReference));
/// dict.clear();
/// ```
#[derive(Debug, Clone)]
pub enum Object {
    /// Absent value; not encodable.
    None,
    /// Encodes as `i1e` or `i0e`.
    Bool(bool),
    Int(BigInt),
    /// Not encodable.
    Float(f64),
    /// Encodes as its UTF-8 bytes.
    Str(String),
    Bytes(Bytes),
    List(Rc<RefCell<Vec<Object>>>),
    /// Immutable sequence; encodes as a list.
    Tuple(Rc<[Object]>),
    /// Insertion-ordered mapping with keys of any type.
    Dict(Rc<RefCell<Vec<(Object, Object)>>>),
}

impl Object {
    /// Creates an empty list.
    pub fn list() -> Self {
        Object::List(Rc::new(RefCell::new(Vec::new())))
    }

    /// Creates an immutable sequence.
    pub fn tuple(items: impl IntoIterator<Item = Object>) -> Self {
        Object::Tuple(items.into_iter().collect())
    }

    /// Creates an empty dictionary.
    pub fn dict() -> Self {
        Object::Dict(Rc::new(RefCell::new(Vec::new())))
    }

    /// Appends to a list.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not a list.
    pub fn push(&self, item: impl Into<Object>) {
        match self {
            Object::List(items) => items.borrow_mut().push(item.into()),
            other => panic!("cannot push onto {}", other.type_name()),
        }
    }

    /// Sets `key` in a dictionary.
    ///
    /// An entry whose key has the same type and content is overwritten in
    /// place, the way a host mapping behaves. Keys that only match after
    /// conversion to bytes (`"k"` and `b"k"`) are kept apart and rejected at
    /// encode time.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not a dictionary.
    pub fn insert(&self, key: impl Into<Object>, value: impl Into<Object>) {
        let (key, value) = (key.into(), value.into());
        match self {
            Object::Dict(entries) => {
                let mut entries = entries.borrow_mut();
                match entries.iter_mut().find(|(k, _)| k.same_key(&key)) {
                    Some(entry) => entry.1 = value,
                    None => entries.push((key, value)),
                }
            }
            other => panic!("cannot insert into {}", other.type_name()),
        }
    }

    /// Empties a list or dictionary, dropping any references it held.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not a list or dictionary.
    pub fn clear(&self) {
        match self {
            Object::List(items) => items.borrow_mut().clear(),
            Object::Dict(entries) => entries.borrow_mut().clear(),
            other => panic!("cannot clear {}", other.type_name()),
        }
    }

    /// The name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::None => "none",
            Object::Bool(_) => "bool",
            Object::Int(_) => "int",
            Object::Float(_) => "float",
            Object::Str(_) => "str",
            Object::Bytes(_) => "bytes",
            Object::List(_) => "list",
            Object::Tuple(_) => "tuple",
            Object::Dict(_) => "dict",
        }
    }

    // Mapping key equality: same variant and content, containers by identity.
    fn same_key(&self, other: &Object) -> bool {
        match (self, other) {
            (Object::None, Object::None) => true,
            (Object::Bool(a), Object::Bool(b)) => a == b,
            (Object::Int(a), Object::Int(b)) => a == b,
            (Object::Float(a), Object::Float(b)) => a == b,
            (Object::Str(a), Object::Str(b)) => a == b,
            (Object::Bytes(a), Object::Bytes(b)) => a == b,
            _ => self.identity().is_some() && self.identity() == other.identity(),
        }
    }

    /// Identity of a container, used to find cycles. Scalars have none.
    pub(crate) fn identity(&self) -> Option<usize> {
        match self {
            Object::List(items) => Some(Rc::as_ptr(items) as *const () as usize),
            Object::Tuple(items) => Some(Rc::as_ptr(items) as *const () as usize),
            Object::Dict(entries) => Some(Rc::as_ptr(entries) as *const () as usize),
            _ => None,
        }
    }
}

impl From<bool> for Object {
    fn from(b: bool) -> Self {
        Object::Bool(b)
    }
}

impl From<i64> for Object {
    fn from(i: i64) -> Self {
        Object::Int(i.into())
    }
}

impl From<i32> for Object {
    fn from(i: i32) -> Self {
        Object::Int(i.into())
    }
}

impl From<BigInt> for Object {
    fn from(i: BigInt) -> Self {
        Object::Int(i)
    }
}

impl From<f64> for Object {
    fn from(f: f64) -> Self {
        Object::Float(f)
    }
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        Object::Str(s.to_owned())
    }
}

impl From<String> for Object {
    fn from(s: String) -> Self {
        Object::Str(s)
    }
}

impl From<&[u8]> for Object {
    fn from(b: &[u8]) -> Self {
        Object::Bytes(Bytes::copy_from_slice(b))
    }
}

impl From<Bytes> for Object {
    fn from(b: Bytes) -> Self {
        Object::Bytes(b)
    }
}

/// Converts a decoded value into host objects. Byte strings stay bytes.
impl From<Value> for Object {
    fn from(value: Value) -> Self {
        match value {
            Value::Integer(i) => Object::Int(i),
            Value::Bytes(b) => Object::Bytes(b),
            Value::List(l) => Object::List(Rc::new(RefCell::new(
                l.into_iter().map(Object::from).collect(),
            ))),
            Value::Dict(d) => Object::Dict(Rc::new(RefCell::new(
                d.into_iter()
                    .map(|(k, v)| (Object::Bytes(k), Object::from(v)))
                    .collect(),
            ))),
        }
    }
}
