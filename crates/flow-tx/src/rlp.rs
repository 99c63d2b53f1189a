//! Recursive Length Prefix encoding.
//!
//! The canonical byte form hashed and signed by the network:
//!
//! - a single byte < 0x80 encodes as itself
//! - a string of 0..=55 bytes: `0x80 + len` then the bytes
//! - a longer string: `0xb7 + len(len)`, big-endian len, then the bytes
//! - an integer: minimal big-endian bytes (0 is the empty string), then as a string
//! - a list: concatenated item encodings wrapped with `0xc0` / `0xf7` the same way

use crate::TxError;

const STRING_OFFSET: u8 = 0x80;
const LIST_OFFSET: u8 = 0xc0;
const SHORT_LIMIT: usize = 55;
/// A length prefix can describe at most 8 length bytes (0xb7 + 8 = 0xbf).
const MAX_LENGTH_OF_LENGTH: usize = 8;

/// One node of an RLP structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    Bytes(Vec<u8>),
    Uint(u64),
    List(Vec<RlpItem>),
}

impl From<Vec<u8>> for RlpItem {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for RlpItem {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<u64> for RlpItem {
    fn from(n: u64) -> Self {
        Self::Uint(n)
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(items: Vec<RlpItem>) -> Self {
        Self::List(items)
    }
}

/// Encode an item tree into its canonical byte string.
pub fn encode(item: &RlpItem) -> Result<Vec<u8>, TxError> {
    let mut out = Vec::new();
    encode_into(item, &mut out)?;
    Ok(out)
}

fn encode_into(item: &RlpItem, out: &mut Vec<u8>) -> Result<(), TxError> {
    match item {
        RlpItem::Bytes(bytes) => encode_bytes(bytes, out),
        RlpItem::Uint(n) => encode_bytes(minimal_be(&n.to_be_bytes()), out),
        RlpItem::List(items) => {
            let mut body = Vec::new();
            for item in items {
                encode_into(item, &mut body)?;
            }
            write_length(body.len(), LIST_OFFSET, out)?;
            out.extend_from_slice(&body);
            Ok(())
        }
    }
}

fn encode_bytes(bytes: &[u8], out: &mut Vec<u8>) -> Result<(), TxError> {
    if bytes.len() == 1 && bytes[0] < STRING_OFFSET {
        out.push(bytes[0]);
        return Ok(());
    }
    write_length(bytes.len(), STRING_OFFSET, out)?;
    out.extend_from_slice(bytes);
    Ok(())
}

fn write_length(len: usize, offset: u8, out: &mut Vec<u8>) -> Result<(), TxError> {
    if len <= SHORT_LIMIT {
        out.push(offset + len as u8);
        return Ok(());
    }
    let len_bytes = len.to_be_bytes();
    let len_bytes = minimal_be(&len_bytes);
    if len_bytes.len() > MAX_LENGTH_OF_LENGTH {
        return Err(TxError::Rlp(format!(
            "length {} needs {} length bytes, max {}",
            len,
            len_bytes.len(),
            MAX_LENGTH_OF_LENGTH
        )));
    }
    out.push(offset + SHORT_LIMIT as u8 + len_bytes.len() as u8);
    out.extend_from_slice(len_bytes);
    Ok(())
}

/// Strip leading zero bytes; all-zero input becomes empty.
fn minimal_be(bytes: &[u8]) -> &[u8] {
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[first..]
}
