//! Codec constants and tuning parameters.

// ============================================================================
// Resource limits
// ============================================================================

/// Default maximum nesting of lists and dictionaries, for both encoding and
/// decoding. Real-world metainfo and DHT messages stay well under ten levels;
/// the limit exists so hostile input fails with an error instead of
/// overflowing the stack.
pub const MAX_DEPTH: usize = 256;

// ============================================================================
// Wire format delimiters
// ============================================================================

/// Starts an integer.
pub const INTEGER_START: u8 = b'i';

/// Starts a list.
pub const LIST_START: u8 = b'l';

/// Starts a dictionary.
pub const DICT_START: u8 = b'd';

/// Ends an integer, list or dictionary.
pub const END: u8 = b'e';

/// Separates a string length from its payload.
pub const LENGTH_SEPARATOR: u8 = b':';
