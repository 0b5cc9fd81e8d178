use crate::constants::MAX_DEPTH;

/// Resource limits applied while encoding and decoding.
///
/// Both directions recurse once per nested list or dictionary, so the
/// nesting limit is what keeps adversarial input from exhausting the stack.
///
/// # Examples
///
/// ```
/// use rbit_bencode::bencode::{decode_with, DecodeErrorKind, Limits};
///
/// let limits = Limits::default().with_max_depth(2);
/// assert!(decode_with(b"llee", &limits).is_ok());
///
/// let err = decode_with(b"llleee", &limits).unwrap_err();
/// assert_eq!(err.kind(), &DecodeErrorKind::NestingTooDeep);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of nested lists and dictionaries.
    pub max_depth: usize,
}

impl Limits {
    /// Sets the maximum number of nested lists and dictionaries.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: MAX_DEPTH,
        }
    }
}
