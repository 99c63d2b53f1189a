//! Crypto primitives for Flow transaction signing.
//!
//! - Domain-separated transaction digests (SHA3-256 by default)
//! - ECDSA P-256 signatures as raw 64-byte `r || s`
//! - P-256 key-pair generation
//!
//! The message bytes fed in here are produced by `flow-tx`; this crate knows
//! nothing about the transaction layout.

pub mod digest;
pub mod ecdsa;
pub mod keys;

pub use digest::{domain_tag, transaction_digest, transaction_domain_tag_hex};
pub use ecdsa::{sign, sign_bytes, verify};
pub use keys::{generate_key_pair, public_key_from_private, KeyPair};

use sha2::{Digest, Sha256};
use thiserror::Error;
use tiny_keccak::{Hasher, Sha3};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("signing key for {address}#{key_index} has no private key")]
    MissingPrivateKey { address: String, key_index: u64 },

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("domain tag is {len} bytes, longer than {max}")]
    DomainTagTooLong { len: usize, max: usize },

    #[error("unsupported hash algorithm: {0}")]
    UnsupportedHashAlgorithm(flow_types::HashAlgorithm),

    #[error("unsupported signature algorithm: {0}")]
    UnsupportedSignAlgorithm(flow_types::SignAlgorithm),

    #[error("signing failed: {0}")]
    Signing(String),
}

/// SHA3-256 (FIPS 202, not the Keccak-256 variant).
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    let mut sha3 = Sha3::v256();
    let mut output = [0u8; 32];
    sha3.update(data);
    sha3.finalize(&mut output);
    output
}

/// SHA-256
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}
