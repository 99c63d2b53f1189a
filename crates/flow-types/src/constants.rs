//! Flow protocol constants and algorithm identifiers.
//!
//! Reference: flow-go crypto/hash and model/flow/constants.go

use crate::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Protocol Constants
// =============================================================================

/// Domain separation tag for transaction messages. Right-padded with zero
/// bytes to `DOMAIN_TAG_LENGTH` before it is mixed into the digest.
pub const TRANSACTION_DOMAIN_TAG: &str = "FLOW-V0.0-transaction";

/// Width of a padded domain tag in bytes.
pub const DOMAIN_TAG_LENGTH: usize = 32;

/// Length of a block identifier in bytes.
pub const BLOCK_ID_LENGTH: usize = 32;

/// Length of a raw P-256 signature (`r || s`).
pub const SIGNATURE_LENGTH: usize = 64;

/// Length of an uncompressed P-256 public key without the SEC1 tag (`X || Y`).
pub const PUBLIC_KEY_LENGTH: usize = 64;

/// Length of a P-256 private scalar.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Gas limit used when the caller does not set one.
pub const DEFAULT_GAS_LIMIT: u64 = 9999;

/// Weight a single key needs to authorize alone.
pub const FULL_KEY_WEIGHT: u32 = 1000;

// =============================================================================
// Network Types
// =============================================================================

/// Network identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    Localhost,
    Testnet,
    Mainnet,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Localhost => write!(f, "localhost"),
            Self::Testnet => write!(f, "testnet"),
            Self::Mainnet => write!(f, "mainnet"),
        }
    }
}

impl FromStr for Network {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, TypesError> {
        match s.to_lowercase().as_str() {
            "localhost" | "local" | "emulator" => Ok(Self::Localhost),
            "testnet" | "test" => Ok(Self::Testnet),
            "mainnet" | "main" => Ok(Self::Mainnet),
            _ => Err(TypesError::UnknownNetwork(s.to_string())),
        }
    }
}

// =============================================================================
// Algorithms
// =============================================================================

/// Signature algorithm of an account key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignAlgorithm {
    BlsBls12381,
    EcdsaP256,
    EcdsaSecp256k1,
}

impl SignAlgorithm {
    /// Numeric code used on chain.
    pub fn code(self) -> u32 {
        match self {
            Self::BlsBls12381 => 1,
            Self::EcdsaP256 => 2,
            Self::EcdsaSecp256k1 => 3,
        }
    }

    pub fn from_code(code: u32) -> Result<Self, TypesError> {
        match code {
            1 => Ok(Self::BlsBls12381),
            2 => Ok(Self::EcdsaP256),
            3 => Ok(Self::EcdsaSecp256k1),
            other => Err(TypesError::UnknownSignAlgorithm(other.to_string())),
        }
    }

    /// Name as reported by the REST API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BlsBls12381 => "BLS_BLS12_381",
            Self::EcdsaP256 => "ECDSA_P256",
            Self::EcdsaSecp256k1 => "ECDSA_secp256k1",
        }
    }
}

impl fmt::Display for SignAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignAlgorithm {
    type Err = TypesError;

    /// Accepts both `ECDSA_P256` and the underscore-free `ECDSAP256` spelling.
    fn from_str(s: &str) -> Result<Self, TypesError> {
        match normalize(s).as_str() {
            "BLSBLS12381" => Ok(Self::BlsBls12381),
            "ECDSAP256" => Ok(Self::EcdsaP256),
            "ECDSASECP256K1" => Ok(Self::EcdsaSecp256k1),
            _ => Err(TypesError::UnknownSignAlgorithm(s.to_string())),
        }
    }
}

/// Hash algorithm of an account key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    Sha2_256,
    Sha2_384,
    Sha3_256,
    Sha3_384,
    Kmac128,
}

impl HashAlgorithm {
    pub fn code(self) -> u32 {
        match self {
            Self::Sha2_256 => 1,
            Self::Sha2_384 => 2,
            Self::Sha3_256 => 3,
            Self::Sha3_384 => 4,
            Self::Kmac128 => 5,
        }
    }

    pub fn from_code(code: u32) -> Result<Self, TypesError> {
        match code {
            1 => Ok(Self::Sha2_256),
            2 => Ok(Self::Sha2_384),
            3 => Ok(Self::Sha3_256),
            4 => Ok(Self::Sha3_384),
            5 => Ok(Self::Kmac128),
            other => Err(TypesError::UnknownHashAlgorithm(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sha2_256 => "SHA2_256",
            Self::Sha2_384 => "SHA2_384",
            Self::Sha3_256 => "SHA3_256",
            Self::Sha3_384 => "SHA3_384",
            Self::Kmac128 => "KMAC128",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, TypesError> {
        match normalize(s).as_str() {
            "SHA2256" => Ok(Self::Sha2_256),
            "SHA2384" => Ok(Self::Sha2_384),
            "SHA3256" => Ok(Self::Sha3_256),
            "SHA3384" => Ok(Self::Sha3_384),
            "KMAC128" => Ok(Self::Kmac128),
            _ => Err(TypesError::UnknownHashAlgorithm(s.to_string())),
        }
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '_' && *c != '-')
        .collect::<String>()
        .to_uppercase()
}
