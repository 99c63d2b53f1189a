//! Typed transaction structures.
//!
//! A transaction moves through three values, each produced by consuming the
//! previous one:
//!
//!   `TransactionPayload` → `PayloadSignedTransaction` → `SignedTransaction`
//!
//! Once a payload has been signed it is only reachable through shared
//! references, so its bytes cannot drift away from the signatures over them.

/// The proposer's key slot and the sequence number being consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalKey {
    pub address: Vec<u8>,
    pub key_index: u64,
    pub sequence_number: u64,
}

/// Transaction payload. Field order matches the signed layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionPayload {
    /// Cadence source, raw UTF-8.
    pub script: Vec<u8>,
    /// JSON-Cadence encoded arguments, opaque to the encoder.
    pub arguments: Vec<Vec<u8>>,
    pub reference_block_id: [u8; 32],
    pub gas_limit: u64,
    pub proposal_key: ProposalKey,
    pub payer: Vec<u8>,
    pub authorizers: Vec<Vec<u8>>,
}

/// One signature by one account key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSignature {
    pub address: Vec<u8>,
    pub key_index: u64,
    /// Raw `r || s`.
    pub signature: Vec<u8>,
}

/// A payload together with its completed payload signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadSignedTransaction {
    pub(crate) payload: TransactionPayload,
    pub(crate) payload_signatures: Vec<TransactionSignature>,
}

impl PayloadSignedTransaction {
    /// Assemble from signatures collected elsewhere (e.g. another party
    /// signed the payload on their own machine).
    pub fn from_parts(payload: TransactionPayload, payload_signatures: Vec<TransactionSignature>) -> Self {
        Self {
            payload,
            payload_signatures,
        }
    }

    pub fn payload(&self) -> &TransactionPayload {
        &self.payload
    }

    /// Payload signatures in the order the signers produced them.
    pub fn payload_signatures(&self) -> &[TransactionSignature] {
        &self.payload_signatures
    }
}

/// A fully signed transaction, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub(crate) payload: TransactionPayload,
    pub(crate) payload_signatures: Vec<TransactionSignature>,
    pub(crate) envelope_signatures: Vec<TransactionSignature>,
}

impl SignedTransaction {
    pub fn payload(&self) -> &TransactionPayload {
        &self.payload
    }

    pub fn payload_signatures(&self) -> &[TransactionSignature] {
        &self.payload_signatures
    }

    pub fn envelope_signatures(&self) -> &[TransactionSignature] {
        &self.envelope_signatures
    }

    /// Split back into payload and both signature lists.
    pub fn into_parts(
        self,
    ) -> (
        TransactionPayload,
        Vec<TransactionSignature>,
        Vec<TransactionSignature>,
    ) {
        (self.payload, self.payload_signatures, self.envelope_signatures)
    }
}
