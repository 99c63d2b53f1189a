//! Signed transaction → REST request.

use crate::error::RestError;
use crate::flow::FlowRest;
use crate::models::{ProposalKeyJson, SignatureJson, TransactionRequest};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flow_tx::{sign_transaction, SignedTransaction, TransactionBuilder, TransactionSignature, Value};
use flow_types::SigningKey;

impl From<&SignedTransaction> for TransactionRequest {
    fn from(tx: &SignedTransaction) -> Self {
        let payload = tx.payload();
        Self {
            script: STANDARD.encode(&payload.script),
            arguments: payload.arguments.iter().map(|a| STANDARD.encode(a)).collect(),
            reference_block_id: hex::encode(payload.reference_block_id),
            gas_limit: payload.gas_limit,
            payer: hex::encode(&payload.payer),
            proposal_key: ProposalKeyJson {
                address: hex::encode(&payload.proposal_key.address),
                key_index: payload.proposal_key.key_index,
                sequence_number: payload.proposal_key.sequence_number,
            },
            authorizers: payload.authorizers.iter().map(hex::encode).collect(),
            payload_signatures: tx.payload_signatures().iter().map(signature_json).collect(),
            envelope_signatures: tx.envelope_signatures().iter().map(signature_json).collect(),
        }
    }
}

fn signature_json(sig: &TransactionSignature) -> SignatureJson {
    SignatureJson {
        address: hex::encode(&sig.address),
        key_index: sig.key_index,
        signature: STANDARD.encode(&sig.signature),
    }
}

/// Build and sign a transaction where one account key proposes, pays and
/// authorizes.
///
/// Fetches the latest sealed block as reference and the key's current
/// sequence number, then signs only the envelope (a single account playing
/// every role needs no payload signature).
pub async fn prepare_simple_transaction(
    flow: &FlowRest,
    script: &str,
    arguments: Vec<Value>,
    key: &SigningKey,
) -> Result<TransactionRequest, RestError> {
    let block = flow.get_latest_block(true).await?;
    let account = flow.get_account(&key.address).await?;
    let on_chain = account.key(key.key_index).ok_or_else(|| {
        RestError::NotFound(format!("key {} on account {}", key.key_index, key.address))
    })?;
    if on_chain.revoked {
        return Err(RestError::Other(format!(
            "key {} on account {} is revoked",
            key.key_index, key.address
        )));
    }
    let described = on_chain.to_signing_key(&key.address)?;
    if described.public_key != key.public_key {
        log::warn!(
            "public key for {}#{} differs from the one on chain",
            key.address,
            key.key_index
        );
    }
    log::debug!(
        "reference block {} at height {}, sequence number {}",
        block.header.id,
        block.header.height,
        described.sequence_number
    );

    // The account's registered hash algorithm decides the digest.
    let signer = key
        .clone()
        .with_sequence_number(described.sequence_number)
        .with_hash_algo(described.hash_algo);
    let payload = TransactionBuilder::new()
        .script(script)
        .arguments(arguments)
        .reference_block_id(block.header.id.as_str())
        .proposer(&signer)
        .payer(signer.address.as_str())
        .authorizer(signer.address.as_str())
        .build()?;

    let signed = sign_transaction(payload, &[], &[signer])?;
    Ok(TransactionRequest::from(&signed))
}
