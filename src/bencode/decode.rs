use super::error::{DecodeError, DecodeErrorKind};
use super::limits::Limits;
use super::value::Value;
use bytes::Bytes;
use num_bigint::BigInt;
use std::collections::BTreeMap;
use tracing::trace;

use crate::constants::{DICT_START, END, INTEGER_START, LENGTH_SEPARATOR, LIST_START};

type Result<T> = std::result::Result<T, DecodeError>;

/// Decodes exactly one bencode value from `data`.
///
/// The input must be in canonical form: no leading zeros, no `-0`, exact
/// string lengths, dictionary keys strictly increasing, and nothing after
/// the value.
///
/// # Examples
///
/// ```
/// use rbit_bencode::bencode::{decode, DecodeErrorKind, Value};
///
/// let value = decode(b"d3:cow3:moo4:spam4:eggse").unwrap();
/// assert_eq!(value.get(b"cow").and_then(|v| v.as_str()), Some("moo"));
///
/// let err = decode(b"d4:spam4:eggs3:cow3:mooe").unwrap_err();
/// assert_eq!(err.kind(), &DecodeErrorKind::UnsortedKeys);
///
/// let err = decode(b"i42eextra").unwrap_err();
/// assert_eq!(err.kind(), &DecodeErrorKind::TrailingData);
/// assert_eq!(err.position(), 4);
/// ```
pub fn decode(data: &[u8]) -> Result<Value> {
    decode_with(data, &Limits::default())
}

/// Like [`decode`], with explicit limits.
pub fn decode_with(data: &[u8], limits: &Limits) -> Result<Value> {
    decode_document(data, limits).inspect_err(|e| {
        trace!(kind = %e.kind(), position = e.position(), len = data.len(), "rejected bencode input");
    })
}

fn decode_document(data: &[u8], limits: &Limits) -> Result<Value> {
    if data.is_empty() {
        return Err(DecodeError::new(DecodeErrorKind::EmptyInput, 0));
    }

    let mut pos = 0;
    let value = decode_value(data, &mut pos, 0, limits)?;

    if pos != data.len() {
        return Err(DecodeError::new(DecodeErrorKind::TrailingData, pos));
    }

    Ok(value)
}

fn decode_value(data: &[u8], pos: &mut usize, depth: usize, limits: &Limits) -> Result<Value> {
    let Some(&c) = data.get(*pos) else {
        return Err(DecodeError::new(DecodeErrorKind::UnexpectedEof, *pos));
    };

    match c {
        INTEGER_START => decode_integer(data, pos),
        LIST_START => decode_list(data, pos, depth, limits),
        DICT_START => decode_dict(data, pos, depth, limits),
        b'0'..=b'9' => decode_string(data, pos).map(Value::Bytes),
        c => Err(DecodeError::new(
            DecodeErrorKind::UnexpectedByte(c as char),
            *pos,
        )),
    }
}

fn decode_integer(data: &[u8], pos: &mut usize) -> Result<Value> {
    let invalid = |reason, at| DecodeError::new(DecodeErrorKind::InvalidInteger(reason), at);

    *pos += 1;
    let start = *pos;
    let end = match data[start..].iter().position(|&b| b == END) {
        Some(offset) => start + offset,
        None => return Err(DecodeError::new(DecodeErrorKind::UnexpectedEof, data.len())),
    };

    let text = &data[start..end];
    let digits = text.strip_prefix(b"-").unwrap_or(text);
    let negative = digits.len() != text.len();

    match digits {
        [] if negative => return Err(invalid("missing digits after '-'", start)),
        [] => return Err(invalid("found 'ie'", start)),
        [b'0'] if negative => return Err(invalid("'-0' found", start)),
        [b'0', _, ..] if negative => return Err(invalid("'-0' found", start)),
        [b'0', _, ..] => return Err(invalid("non-zero int should not start with '0'", start)),
        _ => {}
    }

    let digits_start = end - digits.len();
    if let Some(offset) = digits.iter().position(|b| !b.is_ascii_digit()) {
        return Err(invalid("non-digit character", digits_start + offset));
    }

    let value = parse_integer(text).ok_or_else(|| invalid("unparseable", start))?;

    *pos = end + 1;
    Ok(Value::Integer(value))
}

/// Parses validated decimal text, through `i64` when it fits.
fn parse_integer(text: &[u8]) -> Option<BigInt> {
    let s = std::str::from_utf8(text).ok()?;
    match s.parse::<i64>() {
        Ok(small) => Some(BigInt::from(small)),
        Err(_) => BigInt::parse_bytes(text, 10),
    }
}

fn decode_string(data: &[u8], pos: &mut usize) -> Result<Bytes> {
    let start = *pos;
    let invalid = |reason, at| DecodeError::new(DecodeErrorKind::InvalidLength(reason), at);

    let mut len: usize = 0;
    while let Some(&c) = data.get(*pos) {
        if !c.is_ascii_digit() {
            break;
        }
        len = len
            .checked_mul(10)
            .and_then(|l| l.checked_add(usize::from(c - b'0')))
            .ok_or_else(|| invalid("length does not fit in memory", start))?;
        *pos += 1;
    }

    match data.get(*pos) {
        None => return Err(DecodeError::new(DecodeErrorKind::UnexpectedEof, *pos)),
        Some(&LENGTH_SEPARATOR) => {}
        Some(_) => return Err(invalid("expected ':' after length", *pos)),
    }

    if data[start] == b'0' && *pos - start > 1 {
        return Err(invalid("leading zeros", start));
    }

    *pos += 1;

    let available = data.len() - *pos;
    if len > available {
        return Err(DecodeError::new(
            DecodeErrorKind::TruncatedString {
                declared: len,
                available,
            },
            start,
        ));
    }

    let bytes = Bytes::copy_from_slice(&data[*pos..*pos + len]);
    *pos += len;

    Ok(bytes)
}

fn decode_list(data: &[u8], pos: &mut usize, depth: usize, limits: &Limits) -> Result<Value> {
    if depth >= limits.max_depth {
        return Err(DecodeError::new(DecodeErrorKind::NestingTooDeep, *pos));
    }

    *pos += 1;
    let mut list = Vec::new();

    while *pos < data.len() && data[*pos] != END {
        list.push(decode_value(data, pos, depth + 1, limits)?);
    }

    if *pos >= data.len() {
        return Err(DecodeError::new(DecodeErrorKind::UnterminatedList, *pos));
    }

    *pos += 1;
    Ok(Value::List(list))
}

fn decode_dict(data: &[u8], pos: &mut usize, depth: usize, limits: &Limits) -> Result<Value> {
    if depth >= limits.max_depth {
        return Err(DecodeError::new(DecodeErrorKind::NestingTooDeep, *pos));
    }

    *pos += 1;
    let mut dict = BTreeMap::new();
    let mut last_key: Option<Bytes> = None;

    while *pos < data.len() && data[*pos] != END {
        let key_pos = *pos;
        if !data[key_pos].is_ascii_digit() {
            return Err(DecodeError::new(DecodeErrorKind::NonStringKey, key_pos));
        }

        let key = decode_string(data, pos)?;

        if let Some(last) = &last_key {
            if key == *last {
                return Err(DecodeError::new(DecodeErrorKind::DuplicateKey, key_pos));
            }
            if key < *last {
                return Err(DecodeError::new(DecodeErrorKind::UnsortedKeys, key_pos));
            }
        }

        let value = decode_value(data, pos, depth + 1, limits)?;
        last_key = Some(key.clone());
        dict.insert(key, value);
    }

    if *pos >= data.len() {
        return Err(DecodeError::new(DecodeErrorKind::UnterminatedDict, *pos));
    }

    *pos += 1;
    Ok(Value::Dict(dict))
}
