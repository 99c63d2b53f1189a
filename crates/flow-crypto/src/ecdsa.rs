//! ECDSA P-256 over domain-tagged transaction digests.
//!
//! Signatures are returned as fixed-width big-endian `r || s` (64 bytes).
//! Nonces are hedged with OS randomness, so two signatures over the same
//! message differ; both verify.

use crate::digest::transaction_digest;
use crate::CryptoError;
use flow_types::constants::{PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use flow_types::{HashAlgorithm, SignAlgorithm, SigningKey};
use p256::ecdsa::{Signature, SigningKey as EcdsaSigningKey, VerifyingKey};
use rand::rngs::OsRng;
use signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};

/// Sign an encoded transaction message, returning the signature as hex.
pub fn sign(message: &[u8], key: &SigningKey) -> Result<String, CryptoError> {
    Ok(hex::encode(sign_bytes(message, key)?))
}

/// Sign an encoded transaction message with the key's hash algorithm.
pub fn sign_bytes(message: &[u8], key: &SigningKey) -> Result<[u8; SIGNATURE_LENGTH], CryptoError> {
    let private_key = key
        .private_key
        .as_deref()
        .ok_or_else(|| CryptoError::MissingPrivateKey {
            address: key.address.clone(),
            key_index: key.key_index,
        })?;
    if key.sign_algo != SignAlgorithm::EcdsaP256 {
        return Err(CryptoError::UnsupportedSignAlgorithm(key.sign_algo));
    }
    if key.revoked {
        log::warn!("signing with revoked key {}#{}", key.address, key.key_index);
    }

    let signing_key = EcdsaSigningKey::from_slice(private_key)
        .map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?;
    let digest = transaction_digest(message, key.hash_algo)?;

    let sig: Signature = signing_key
        .sign_prehash_with_rng(&mut OsRng, &digest)
        .map_err(|e| CryptoError::Signing(e.to_string()))?;

    let mut out = [0u8; SIGNATURE_LENGTH];
    out.copy_from_slice(&sig.to_bytes());
    Ok(out)
}

/// Verify a raw `r || s` signature over an encoded transaction message.
///
/// `public_key` is the 64-byte `X || Y` form stored on accounts. Returns
/// `Ok(false)` for a well-formed signature that does not verify.
pub fn verify(
    message: &[u8],
    signature: &[u8],
    public_key: &[u8],
    hash_algo: HashAlgorithm,
) -> Result<bool, CryptoError> {
    let verifying_key = verifying_key_from_raw(public_key)?;
    let sig = Signature::from_slice(signature)
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
    let digest = transaction_digest(message, hash_algo)?;
    Ok(verifying_key.verify_prehash(&digest, &sig).is_ok())
}

fn verifying_key_from_raw(public_key: &[u8]) -> Result<VerifyingKey, CryptoError> {
    if public_key.len() != PUBLIC_KEY_LENGTH {
        return Err(CryptoError::InvalidPublicKey(format!(
            "expected {} bytes, got {}",
            PUBLIC_KEY_LENGTH,
            public_key.len()
        )));
    }
    let mut sec1 = Vec::with_capacity(PUBLIC_KEY_LENGTH + 1);
    sec1.push(0x04);
    sec1.extend_from_slice(public_key);
    VerifyingKey::from_sec1_bytes(&sec1).map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
}
