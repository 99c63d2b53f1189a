//! REST request and response models.
//!
//! The access API sends 64-bit integers as decimal strings; those fields are
//! decoded to `u64` through `u64_string`. Unknown fields land in `extra`.

use crate::RestError;
use flow_types::{HashAlgorithm, SignAlgorithm, SigningKey};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// (De)serialize a `u64` carried as a decimal string. Plain JSON numbers are
/// accepted on input too.
pub mod u64_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(u64),
        }
        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => s.parse().map_err(de::Error::custom),
            Repr::Number(n) => Ok(n),
        }
    }
}

// =============================================================================
// Blocks
// =============================================================================

/// Block from `/blocks`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockResponse {
    pub header: BlockHeader,
    #[serde(default)]
    pub payload: Option<BlockPayload>,
    #[serde(default)]
    pub execution_result: Option<ExecutionResult>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockHeader {
    pub id: String,
    pub parent_id: String,
    #[serde(with = "u64_string")]
    pub height: u64,
    pub timestamp: String,
    #[serde(default)]
    pub parent_voter_signature: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockPayload {
    #[serde(default)]
    pub collection_guarantees: Vec<CollectionGuarantee>,
    #[serde(default)]
    pub block_seals: Vec<BlockSeal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionGuarantee {
    pub collection_id: String,
    #[serde(default)]
    pub signer_ids: Vec<String>,
    #[serde(default)]
    pub signature: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockSeal {
    pub block_id: String,
    pub result_id: String,
    #[serde(default)]
    pub final_state: String,
    #[serde(default)]
    pub aggregated_approval_signatures: Vec<AggregatedSignature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AggregatedSignature {
    #[serde(default)]
    pub verifier_signatures: Vec<String>,
    #[serde(default)]
    pub signer_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecutionResult {
    pub id: String,
    pub block_id: String,
    #[serde(default)]
    pub events: Vec<EventResult>,
    #[serde(default)]
    pub chunks: Vec<Chunk>,
    #[serde(default)]
    pub previous_result_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chunk {
    pub block_id: String,
    #[serde(with = "u64_string")]
    pub collection_index: u64,
    #[serde(default)]
    pub start_state: String,
    #[serde(default)]
    pub end_state: String,
    #[serde(with = "u64_string")]
    pub index: u64,
    #[serde(with = "u64_string")]
    pub number_of_transactions: u64,
    #[serde(with = "u64_string")]
    pub total_computation_used: u64,
}

// =============================================================================
// Events
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct EventResult {
    #[serde(rename = "type")]
    pub event_type: String,
    pub transaction_id: String,
    #[serde(with = "u64_string")]
    pub transaction_index: u64,
    #[serde(with = "u64_string")]
    pub event_index: u64,
    /// Base64 JSON-Cadence.
    pub payload: String,
}

/// Events of one block, from `/events`.
#[derive(Debug, Clone, Deserialize)]
pub struct EventsResponse {
    pub block_id: String,
    #[serde(with = "u64_string")]
    pub block_height: u64,
    pub block_timestamp: String,
    #[serde(default)]
    pub events: Vec<EventResult>,
}

// =============================================================================
// Transactions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalKeyJson {
    pub address: String,
    #[serde(with = "u64_string")]
    pub key_index: u64,
    #[serde(with = "u64_string")]
    pub sequence_number: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureJson {
    pub address: String,
    #[serde(with = "u64_string")]
    pub key_index: u64,
    /// Base64 raw `r || s`.
    pub signature: String,
}

/// Body of `POST /transactions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// Base64 Cadence source.
    pub script: String,
    /// Base64 JSON-Cadence arguments.
    pub arguments: Vec<String>,
    pub reference_block_id: String,
    #[serde(with = "u64_string")]
    pub gas_limit: u64,
    pub payer: String,
    pub proposal_key: ProposalKeyJson,
    pub authorizers: Vec<String>,
    pub payload_signatures: Vec<SignatureJson>,
    pub envelope_signatures: Vec<SignatureJson>,
}

/// Transaction from `/transactions/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionResponse {
    pub id: String,
    #[serde(default)]
    pub script: String,
    #[serde(default)]
    pub arguments: Vec<String>,
    #[serde(default)]
    pub reference_block_id: String,
    #[serde(default, with = "u64_string")]
    pub gas_limit: u64,
    #[serde(default)]
    pub payer: String,
    pub proposal_key: Option<ProposalKeyJson>,
    #[serde(default)]
    pub authorizers: Vec<String>,
    #[serde(default)]
    pub payload_signatures: Vec<SignatureJson>,
    #[serde(default)]
    pub envelope_signatures: Vec<SignatureJson>,
    /// Present when requested with `expand=result`.
    #[serde(default)]
    pub result: Option<TransactionResultResponse>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Execution status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Unknown,
    Pending,
    Finalized,
    Executed,
    Sealed,
    Expired,
}

impl TransactionStatus {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Pending" => Self::Pending,
            "Finalized" => Self::Finalized,
            "Executed" => Self::Executed,
            "Sealed" => Self::Sealed,
            "Expired" => Self::Expired,
            _ => Self::Unknown,
        }
    }

    /// Sealed or expired: the status will not change any more.
    pub fn is_final(self) -> bool {
        matches!(self, Self::Sealed | Self::Expired)
    }
}

/// Result from `/transaction_results/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionResultResponse {
    #[serde(default)]
    pub block_id: String,
    #[serde(default)]
    pub execution: String,
    pub status: String,
    #[serde(default)]
    pub status_code: u32,
    #[serde(default)]
    pub error_message: String,
    #[serde(default, with = "u64_string")]
    pub computation_used: u64,
    #[serde(default)]
    pub events: Vec<EventResult>,
}

impl TransactionResultResponse {
    pub fn status(&self) -> TransactionStatus {
        TransactionStatus::from_name(&self.status)
    }

    pub fn is_error(&self) -> bool {
        !self.error_message.is_empty()
    }
}

// =============================================================================
// Accounts
// =============================================================================

/// Account from `/accounts/{address}`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountResponse {
    pub address: String,
    #[serde(with = "u64_string")]
    pub balance: u64,
    #[serde(default)]
    pub keys: Vec<AccountKeyResponse>,
    #[serde(default)]
    pub contracts: BTreeMap<String, String>,
}

impl AccountResponse {
    pub fn key(&self, index: u64) -> Option<&AccountKeyResponse> {
        self.keys.iter().find(|k| k.index == index)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountKeyResponse {
    #[serde(with = "u64_string")]
    pub index: u64,
    /// Hex, usually `0x`-prefixed.
    pub public_key: String,
    pub signing_algorithm: String,
    pub hashing_algorithm: String,
    #[serde(with = "u64_string")]
    pub sequence_number: u64,
    #[serde(with = "u64_string")]
    pub weight: u64,
    #[serde(default)]
    pub revoked: bool,
}

impl AccountKeyResponse {
    /// Describe this on-chain key as a (public-only) `SigningKey`.
    pub fn to_signing_key(&self, address: &str) -> Result<SigningKey, RestError> {
        let public_key = hex::decode(self.public_key.trim_start_matches("0x"))
            .map_err(|e| RestError::Other(format!("bad public key hex: {}", e)))?;
        let mut key = SigningKey::new(address, self.index, public_key)
            .with_sign_algo(self.signing_algorithm.parse::<SignAlgorithm>()?)
            .with_hash_algo(self.hashing_algorithm.parse::<HashAlgorithm>()?)
            .with_sequence_number(self.sequence_number);
        key.weight = u32::try_from(self.weight).unwrap_or(u32::MAX);
        key.revoked = self.revoked;
        Ok(key)
    }
}

// =============================================================================
// Scripts
// =============================================================================

/// Body of `POST /scripts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecuteScriptRequest {
    /// Base64 Cadence source.
    pub script: String,
    /// Base64 JSON-Cadence arguments.
    pub arguments: Vec<String>,
}

impl ExecuteScriptRequest {
    /// Encode a script and its argument values.
    pub fn new(script: &str, arguments: &[flow_tx::Value]) -> Result<Self, RestError> {
        use base64::Engine;
        Ok(Self {
            script: base64::engine::general_purpose::STANDARD.encode(script.as_bytes()),
            arguments: flow_tx::encode_arguments(arguments)?,
        })
    }
}
