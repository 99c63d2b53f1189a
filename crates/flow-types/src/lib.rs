//! Core types and constants for the Flow REST client.
//!
//! This crate provides the foundational types shared by the other crates:
//! network identifiers, signature and hash algorithm codes, protocol
//! constants, and the `SigningKey` bound to an on-chain account key slot.

pub mod constants;
pub mod key;

pub use constants::{HashAlgorithm, Network, SignAlgorithm};
pub use key::SigningKey;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("unknown signature algorithm: {0}")]
    UnknownSignAlgorithm(String),

    #[error("unknown hash algorithm: {0}")]
    UnknownHashAlgorithm(String),

    #[error("unknown network: {0} (use localhost, testnet, or mainnet)")]
    UnknownNetwork(String),
}
