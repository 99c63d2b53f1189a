//! Domain-separated transaction digests.
//!
//! digest = H(pad32(TRANSACTION_DOMAIN_TAG) || message)

use crate::{sha256, sha3_256, CryptoError};
use flow_types::constants::{DOMAIN_TAG_LENGTH, TRANSACTION_DOMAIN_TAG};
use flow_types::HashAlgorithm;

/// Right-pad an ASCII tag with zero bytes to 32 bytes.
///
/// A tag longer than 32 bytes is an error, never truncated.
pub fn domain_tag(tag: &str) -> Result<[u8; DOMAIN_TAG_LENGTH], CryptoError> {
    let bytes = tag.as_bytes();
    if bytes.len() > DOMAIN_TAG_LENGTH {
        return Err(CryptoError::DomainTagTooLong {
            len: bytes.len(),
            max: DOMAIN_TAG_LENGTH,
        });
    }
    let mut padded = [0u8; DOMAIN_TAG_LENGTH];
    padded[..bytes.len()].copy_from_slice(bytes);
    Ok(padded)
}

/// The padded transaction tag as 64 hex characters.
pub fn transaction_domain_tag_hex() -> Result<String, CryptoError> {
    Ok(hex::encode(domain_tag(TRANSACTION_DOMAIN_TAG)?))
}

/// Hash an encoded transaction message with the transaction domain tag.
pub fn transaction_digest(message: &[u8], hash_algo: HashAlgorithm) -> Result<[u8; 32], CryptoError> {
    let tag = domain_tag(TRANSACTION_DOMAIN_TAG)?;
    let mut tagged = Vec::with_capacity(tag.len() + message.len());
    tagged.extend_from_slice(&tag);
    tagged.extend_from_slice(message);

    match hash_algo {
        HashAlgorithm::Sha3_256 => Ok(sha3_256(&tagged)),
        HashAlgorithm::Sha2_256 => Ok(sha256(&tagged)),
        other => Err(CryptoError::UnsupportedHashAlgorithm(other)),
    }
}
