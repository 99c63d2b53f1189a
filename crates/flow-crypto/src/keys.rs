//! P-256 key-pair generation.

use crate::CryptoError;
use flow_types::constants::PRIVATE_KEY_LENGTH;
use p256::ecdsa::SigningKey as EcdsaSigningKey;
use rand::rngs::OsRng;

/// Hex-encoded P-256 key pair.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    /// 32-byte big-endian scalar.
    pub private_key: String,
    /// 64-byte uncompressed point, `X || Y` without the SEC1 tag.
    pub public_key: String,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// Generate a fresh key pair from OS randomness.
pub fn generate_key_pair() -> KeyPair {
    let signing_key = EcdsaSigningKey::random(&mut OsRng);
    KeyPair {
        private_key: hex::encode(signing_key.to_bytes()),
        public_key: raw_public_key(&signing_key),
    }
}

/// Derive the `X || Y` public key hex for a private key hex.
pub fn public_key_from_private(private_key_hex: &str) -> Result<String, CryptoError> {
    let bytes = hex::decode(private_key_hex.trim_start_matches("0x"))
        .map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?;
    if bytes.len() != PRIVATE_KEY_LENGTH {
        return Err(CryptoError::InvalidPrivateKey(format!(
            "expected {} bytes, got {}",
            PRIVATE_KEY_LENGTH,
            bytes.len()
        )));
    }
    let signing_key = EcdsaSigningKey::from_slice(&bytes)
        .map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?;
    Ok(raw_public_key(&signing_key))
}

fn raw_public_key(signing_key: &EcdsaSigningKey) -> String {
    let point = signing_key.verifying_key().to_encoded_point(false);
    // Skip the 0x04 uncompressed tag.
    hex::encode(&point.as_bytes()[1..])
}

#[cfg(test)]
mod tests {
    use super::*;

    // Flow emulator service account key.
    const SERVICE_PRIVATE: &str = "ec8cd232a763fb481711a0f9ce7d1241c7bc3865689afb31e6b213d781642ea7";
    const SERVICE_PUBLIC: &str = "81c12390330fdbb55340911b812b50ce7795eefe5478bc5659429f41bdf83d8b\
                                  6b50f9acc730b9cae67dc29e594ade93cac33f085f07275b8d45331a754497dd";

    #[test]
    fn test_generated_widths() {
        let pair = generate_key_pair();
        assert_eq!(pair.private_key.len(), 64);
        assert_eq!(pair.public_key.len(), 128);
        assert_eq!(public_key_from_private(&pair.private_key).unwrap(), pair.public_key);
    }

    #[test]
    fn test_generated_keys_differ() {
        assert_ne!(generate_key_pair().private_key, generate_key_pair().private_key);
    }

    #[test]
    fn test_service_key_derivation() {
        assert_eq!(public_key_from_private(SERVICE_PRIVATE).unwrap(), SERVICE_PUBLIC);
    }

    #[test]
    fn test_generator_point() {
        let one = format!("{:064x}", 1);
        assert_eq!(
            public_key_from_private(&one).unwrap(),
            "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296\
             4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5"
        );
    }

    #[test]
    fn test_debug_hides_private_key() {
        let pair = generate_key_pair();
        assert!(!format!("{:?}", pair).contains(&pair.private_key));
    }

    #[test]
    fn test_rejects_short_scalar() {
        // 31 bytes would otherwise be accepted and left-padded.
        let short = "11".repeat(31);
        assert_eq!(
            public_key_from_private(&short),
            Err(CryptoError::InvalidPrivateKey("expected 32 bytes, got 31".into()))
        );
        assert!(public_key_from_private(&"11".repeat(33)).is_err());
    }

    #[test]
    fn test_rejects_bad_hex() {
        assert!(matches!(
            public_key_from_private("zz"),
            Err(CryptoError::InvalidPrivateKey(_))
        ));
    }
}
