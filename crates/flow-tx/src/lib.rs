//! Flow transaction encoding and signing.
//!
//! Turns a transaction skeleton into the exact bytes the network verifies:
//! canonical field encoding, RLP, payload/envelope layout, and the two-stage
//! payload → envelope signing order. Also encodes typed script arguments.
//! Delegates digests and ECDSA to flow-crypto.

pub mod argument;
pub mod builder;
pub mod encode;
pub mod payload;
pub mod rlp;
pub mod sign;
pub mod types;

pub use argument::{encode_argument, encode_arguments, Argument, Value};
pub use builder::TransactionBuilder;
pub use payload::{encode_envelope, encode_payload};
pub use rlp::RlpItem;
pub use sign::{sign_payload, sign_transaction};
pub use types::{
    PayloadSignedTransaction, ProposalKey, SignedTransaction, TransactionPayload,
    TransactionSignature,
};

use flow_crypto::CryptoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TxError {
    #[error("malformed {field}: {reason}")]
    MalformedField { field: &'static str, reason: String },

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("RLP encoding error: {0}")]
    Rlp(String),

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
