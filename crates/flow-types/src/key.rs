//! Account signing keys.

use crate::constants::{HashAlgorithm, SignAlgorithm, FULL_KEY_WEIGHT};
use std::fmt;

/// One cryptographic key bound to one account key slot.
///
/// The signing pipeline only borrows a `SigningKey`; it never stores or
/// logs the private component.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey {
    /// Account address, hex (with or without `0x`).
    pub address: String,
    /// Index of the key on the account.
    pub key_index: u64,
    /// Raw public key (`X || Y` for ECDSA keys).
    pub public_key: Vec<u8>,
    /// Raw private scalar. Keys without one can be described but not sign.
    pub private_key: Option<Vec<u8>>,
    pub sign_algo: SignAlgorithm,
    pub hash_algo: HashAlgorithm,
    pub weight: u32,
    pub sequence_number: u64,
    pub revoked: bool,
}

impl SigningKey {
    /// A P-256 / SHA3-256 key with full weight and sequence number 0.
    pub fn new(address: impl Into<String>, key_index: u64, public_key: Vec<u8>) -> Self {
        Self {
            address: address.into(),
            key_index,
            public_key,
            private_key: None,
            sign_algo: SignAlgorithm::EcdsaP256,
            hash_algo: HashAlgorithm::Sha3_256,
            weight: FULL_KEY_WEIGHT,
            sequence_number: 0,
            revoked: false,
        }
    }

    pub fn with_private_key(mut self, private_key: Vec<u8>) -> Self {
        self.private_key = Some(private_key);
        self
    }

    pub fn with_sequence_number(mut self, sequence_number: u64) -> Self {
        self.sequence_number = sequence_number;
        self
    }

    pub fn with_hash_algo(mut self, hash_algo: HashAlgorithm) -> Self {
        self.hash_algo = hash_algo;
        self
    }

    pub fn with_sign_algo(mut self, sign_algo: SignAlgorithm) -> Self {
        self.sign_algo = sign_algo;
        self
    }

    pub fn can_sign(&self) -> bool {
        self.private_key.is_some() && !self.revoked
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("address", &self.address)
            .field("key_index", &self.key_index)
            .field("public_key", &hex::encode(&self.public_key))
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("sign_algo", &self.sign_algo)
            .field("hash_algo", &self.hash_algo)
            .field("weight", &self.weight)
            .field("sequence_number", &self.sequence_number)
            .field("revoked", &self.revoked)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let key = SigningKey::new("f8d6e0586b0a20c7", 0, vec![0xaa; 64]);
        assert_eq!(key.sign_algo, SignAlgorithm::EcdsaP256);
        assert_eq!(key.hash_algo, HashAlgorithm::Sha3_256);
        assert_eq!(key.weight, 1000);
        assert!(!key.can_sign());
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let key = SigningKey::new("f8d6e0586b0a20c7", 0, vec![0xaa; 64])
            .with_private_key(vec![0x42; 32]);
        let shown = format!("{:?}", key);
        assert!(shown.contains("<redacted>"));
        assert!(!shown.contains(&hex::encode([0x42u8; 32])));
        assert!(key.can_sign());
    }

    #[test]
    fn test_revoked_key_cannot_sign() {
        let mut key = SigningKey::new("01", 1, vec![]).with_private_key(vec![1; 32]);
        key.revoked = true;
        assert!(!key.can_sign());
    }
}
