use bytes::Bytes;
use thiserror::Error;

/// Errors raised while encoding a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The value has a type bencode cannot represent.
    #[error("unsupported object {0}")]
    UnsupportedType(&'static str),

    /// A dictionary key is neither text nor bytes.
    #[error("dict keys must be str or bytes, found {0}")]
    InvalidKeyType(&'static str),

    /// Two dictionary keys are equal once converted to bytes.
    #[error("found duplicated keys: {0:?}")]
    DuplicateKey(Bytes),

    /// A list or dictionary contains itself.
    #[error("circular reference found")]
    CircularReference,

    /// Lists and dictionaries are nested deeper than the configured limit.
    #[error("nesting too deep")]
    NestingTooDeep,
}

/// What went wrong while decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    /// The input has no bytes at all.
    #[error("can't decode empty bytes")]
    EmptyInput,

    /// The input ended where a value or delimiter was expected.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A value starts with a byte that opens no bencode type.
    #[error("invalid bencode prefix {0:?}")]
    UnexpectedByte(char),

    /// An integer is empty, non-numeric, `-0`, or has leading zeros.
    #[error("invalid int, {0}")]
    InvalidInteger(&'static str),

    /// A string length prefix is malformed or does not fit in `usize`.
    #[error("invalid bytes length, {0}")]
    InvalidLength(&'static str),

    /// The length prefix promises more bytes than the input holds.
    #[error("bytes length overflow, declared {declared} but {available} remain")]
    TruncatedString { declared: usize, available: usize },

    /// A list is missing its closing `e`.
    #[error("unterminated list")]
    UnterminatedList,

    /// A dictionary is missing its closing `e`.
    #[error("unterminated dict")]
    UnterminatedDict,

    /// A dictionary key is not a byte string.
    #[error("invalid dict, key is not a byte string")]
    NonStringKey,

    /// A dictionary key sorts before the previous one.
    #[error("invalid dict, key not sorted")]
    UnsortedKeys,

    /// A dictionary key repeats the previous one.
    #[error("invalid dict, duplicated key")]
    DuplicateKey,

    /// Bytes remain after the top-level value.
    #[error("trailing data after value")]
    TrailingData,

    /// Lists and dictionaries are nested deeper than the configured limit.
    #[error("nesting too deep")]
    NestingTooDeep,
}

/// A decode failure: the category of the violation and the byte offset
/// where it was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at byte {position}")]
pub struct DecodeError {
    kind: DecodeErrorKind,
    position: usize,
}

impl DecodeError {
    pub(crate) fn new(kind: DecodeErrorKind, position: usize) -> Self {
        Self { kind, position }
    }

    /// Category of the violation.
    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }

    /// Offset into the input at which decoding stopped.
    pub fn position(&self) -> usize {
        self.position
    }
}

/// Either side of the codec failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BencodeError {
    /// Encoding failed.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Decoding failed.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}
