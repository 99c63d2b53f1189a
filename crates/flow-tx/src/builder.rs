//! Transaction builder.
//!
//! Collects the text-form fields a caller usually has (script source, hex
//! addresses, a hex block id, native argument values) and produces a
//! `TransactionPayload`, running every field through the canonical encoder.

use crate::argument::{argument_bytes, Value};
use crate::encode::{address_bytes, block_reference_bytes, script_bytes};
use crate::types::{ProposalKey, TransactionPayload};
use crate::TxError;
use flow_types::constants::DEFAULT_GAS_LIMIT;
use flow_types::SigningKey;

/// An argument as the caller supplied it.
#[derive(Debug, Clone)]
enum PendingArgument {
    /// Already JSON-Cadence encoded.
    Raw(Vec<u8>),
    Native(Value),
}

/// Builder for transaction payloads.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    script: String,
    /// Positional, in call order.
    arguments: Vec<PendingArgument>,
    reference_block_id: Option<String>,
    gas_limit: u64,
    proposal_key: Option<(String, u64, u64)>,
    payer: Option<String>,
    authorizers: Vec<String>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self {
            script: String::new(),
            arguments: Vec::new(),
            reference_block_id: None,
            gas_limit: DEFAULT_GAS_LIMIT,
            proposal_key: None,
            payer: None,
            authorizers: Vec::new(),
        }
    }

    /// Set the Cadence source.
    pub fn script(mut self, script: impl Into<String>) -> Self {
        self.script = script.into();
        self
    }

    /// Append a native argument value.
    pub fn argument(mut self, value: impl Into<Value>) -> Self {
        self.arguments.push(PendingArgument::Native(value.into()));
        self
    }

    /// Append several native argument values.
    pub fn arguments<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.arguments
            .extend(values.into_iter().map(|v| PendingArgument::Native(v.into())));
        self
    }

    /// Append an argument that is already JSON-Cadence encoded.
    pub fn raw_argument(mut self, json: impl Into<Vec<u8>>) -> Self {
        self.arguments.push(PendingArgument::Raw(json.into()));
        self
    }

    pub fn reference_block_id(mut self, block_id: impl Into<String>) -> Self {
        self.reference_block_id = Some(block_id.into());
        self
    }

    pub fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    pub fn proposal_key(
        mut self,
        address: impl Into<String>,
        key_index: u64,
        sequence_number: u64,
    ) -> Self {
        self.proposal_key = Some((address.into(), key_index, sequence_number));
        self
    }

    /// Use a signing key's slot and current sequence number as the proposal key.
    pub fn proposer(self, key: &SigningKey) -> Self {
        self.proposal_key(key.address.clone(), key.key_index, key.sequence_number)
    }

    pub fn payer(mut self, address: impl Into<String>) -> Self {
        self.payer = Some(address.into());
        self
    }

    /// Append an authorizer. Order is significant.
    pub fn authorizer(mut self, address: impl Into<String>) -> Self {
        self.authorizers.push(address.into());
        self
    }

    /// Encode all fields into a payload.
    pub fn build(self) -> Result<TransactionPayload, TxError> {
        let reference_block_id = self
            .reference_block_id
            .ok_or(TxError::MissingField("reference_block_id"))?;
        let (proposer, key_index, sequence_number) =
            self.proposal_key.ok_or(TxError::MissingField("proposal_key"))?;
        let payer = self.payer.ok_or(TxError::MissingField("payer"))?;

        let arguments = self
            .arguments
            .into_iter()
            .map(|arg| match arg {
                PendingArgument::Raw(json) => Ok(json),
                PendingArgument::Native(value) => argument_bytes(&value),
            })
            .collect::<Result<Vec<_>, TxError>>()?;

        Ok(TransactionPayload {
            script: script_bytes(&self.script),
            arguments,
            reference_block_id: block_reference_bytes(&reference_block_id)?,
            gas_limit: self.gas_limit,
            proposal_key: ProposalKey {
                address: address_bytes(&proposer)?,
                key_index,
                sequence_number,
            },
            payer: address_bytes(&payer)?,
            authorizers: self
                .authorizers
                .iter()
                .map(|a| address_bytes(a))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::encode_payload;

    const SERVICE: &str = "f8d6e0586b0a20c7";

    fn zero_block() -> String {
        "00".repeat(32)
    }

    #[test]
    fn test_builder_matches_golden_payload() {
        let payload = TransactionBuilder::new()
            .script("transaction{}")
            .reference_block_id(zero_block())
            .gas_limit(100)
            .proposal_key(SERVICE, 0, 0)
            .payer(SERVICE)
            .build()
            .unwrap();
        assert_eq!(
            hex::encode(encode_payload(&payload).unwrap()),
            "f8468d7472616e73616374696f6e7b7dc0a00000000000000000000000000000\
             0000000000000000000000000000000000006488f8d6e0586b0a20c7808088f8\
             d6e0586b0a20c7c0"
        );
    }

    #[test]
    fn test_default_gas_limit() {
        let payload = TransactionBuilder::new()
            .reference_block_id(zero_block())
            .proposal_key(SERVICE, 0, 0)
            .payer(SERVICE)
            .build()
            .unwrap();
        assert_eq!(payload.gas_limit, 9999);
    }

    #[test]
    fn test_missing_fields() {
        let err = TransactionBuilder::new().build().unwrap_err();
        assert!(matches!(err, TxError::MissingField("reference_block_id")));

        let err = TransactionBuilder::new()
            .reference_block_id(zero_block())
            .build()
            .unwrap_err();
        assert!(matches!(err, TxError::MissingField("proposal_key")));

        let err = TransactionBuilder::new()
            .reference_block_id(zero_block())
            .proposal_key(SERVICE, 0, 0)
            .build()
            .unwrap_err();
        assert!(matches!(err, TxError::MissingField("payer")));
    }

    #[test]
    fn test_short_reference_block_rejected() {
        let err = TransactionBuilder::new()
            .reference_block_id("abcd")
            .proposal_key(SERVICE, 0, 0)
            .payer(SERVICE)
            .build()
            .unwrap_err();
        assert!(matches!(err, TxError::MalformedField { field: "block reference", .. }));
    }

    #[test]
    fn test_arguments_and_authorizers() {
        let key = SigningKey::new(SERVICE, 2, vec![]).with_sequence_number(11);
        let payload = TransactionBuilder::new()
            .script("transaction(a: Int) {}")
            .raw_argument(br#"{"type":"Bool","value":true}"#.to_vec())
            .argument(5)
            .reference_block_id(zero_block())
            .proposer(&key)
            .payer(SERVICE)
            .authorizer("0x01cf0e2f2f715450")
            .authorizer(SERVICE)
            .build()
            .unwrap();

        assert_eq!(payload.arguments.len(), 2);
        assert_eq!(payload.arguments[1], br#"{"type":"Int","value":"5"}"#.to_vec());
        assert_eq!(payload.proposal_key.key_index, 2);
        assert_eq!(payload.proposal_key.sequence_number, 11);
        assert_eq!(hex::encode(&payload.authorizers[0]), "01cf0e2f2f715450");
        assert_eq!(payload.authorizers.len(), 2);
    }

    #[test]
    fn test_mixed_arguments_keep_call_order() {
        const BOOL: &[u8] = br#"{"type":"Bool","value":true}"#;
        const INT: &[u8] = br#"{"type":"Int","value":"5"}"#;
        let base = || {
            TransactionBuilder::new()
                .reference_block_id(zero_block())
                .proposal_key(SERVICE, 0, 0)
                .payer(SERVICE)
        };

        let native_first = base().argument(5).raw_argument(BOOL).build().unwrap();
        assert_eq!(native_first.arguments, vec![INT.to_vec(), BOOL.to_vec()]);

        let raw_first = base().raw_argument(BOOL).argument(5).build().unwrap();
        assert_eq!(raw_first.arguments, vec![BOOL.to_vec(), INT.to_vec()]);

        let interleaved = base()
            .argument("a")
            .raw_argument(BOOL)
            .arguments(vec![1, 2])
            .build()
            .unwrap();
        let tags: Vec<String> = interleaved
            .arguments
            .iter()
            .map(|a| {
                let json: serde_json::Value = serde_json::from_slice(a).unwrap();
                json["type"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(tags, vec!["String", "Bool", "Int", "Int"]);
        assert_ne!(
            encode_payload(&native_first).unwrap(),
            encode_payload(&raw_first).unwrap()
        );
    }
}
