//! Canonical field encoding.
//!
//! Converts the text forms callers hold (hex addresses, hex block ids,
//! script source, hex signatures) into the raw bytes that go into RLP.
//! Malformed input is rejected, never corrected.

use crate::TxError;
use flow_types::constants::BLOCK_ID_LENGTH;

/// Decode a hex account address. A leading `0x` is ignored.
pub fn address_bytes(address: &str) -> Result<Vec<u8>, TxError> {
    decode_hex("address", address)
}

/// Decode a hex block id, which must be exactly 32 bytes.
pub fn block_reference_bytes(block_id: &str) -> Result<[u8; BLOCK_ID_LENGTH], TxError> {
    let bytes = decode_hex("block reference", block_id)?;
    bytes.try_into().map_err(|b: Vec<u8>| TxError::MalformedField {
        field: "block reference",
        reason: format!("expected {} bytes, got {}", BLOCK_ID_LENGTH, b.len()),
    })
}

/// Script source as raw UTF-8.
pub fn script_bytes(script: &str) -> Vec<u8> {
    script.as_bytes().to_vec()
}

/// Decode a hex signature. Length is not checked here.
pub fn signature_bytes(signature: &str) -> Result<Vec<u8>, TxError> {
    decode_hex("signature", signature)
}

fn decode_hex(field: &'static str, value: &str) -> Result<Vec<u8>, TxError> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(stripped).map_err(|e| TxError::MalformedField {
        field,
        reason: e.to_string(),
    })
}
