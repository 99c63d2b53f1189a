//! Payload and envelope layout.
//!
//! payload  = [script, [args..], ref_block, gas_limit, proposer, key_index,
//!             sequence_number, payer, [authorizers..]]
//! envelope = [payload, [[authorizer_index, key_index, signature]..]]

use crate::rlp::{self, RlpItem};
use crate::types::{TransactionPayload, TransactionSignature};
use crate::TxError;

/// Payload fields in signing order.
pub fn payload_fields(payload: &TransactionPayload) -> RlpItem {
    RlpItem::List(vec![
        RlpItem::Bytes(payload.script.clone()),
        RlpItem::List(payload.arguments.iter().cloned().map(RlpItem::Bytes).collect()),
        RlpItem::Bytes(payload.reference_block_id.to_vec()),
        RlpItem::Uint(payload.gas_limit),
        RlpItem::Bytes(payload.proposal_key.address.clone()),
        RlpItem::Uint(payload.proposal_key.key_index),
        RlpItem::Uint(payload.proposal_key.sequence_number),
        RlpItem::Bytes(payload.payer.clone()),
        RlpItem::List(payload.authorizers.iter().cloned().map(RlpItem::Bytes).collect()),
    ])
}

/// Order payload signatures for the envelope.
///
/// Walks `authorizers` in order and, for each, takes every signature whose
/// address matches, keeping signer order within one authorizer. Signatures
/// from accounts that are not authorizers are left out. Returns
/// `(authorizer_index, signature)` pairs.
pub fn ordered_payload_signatures<'a>(
    authorizers: &[Vec<u8>],
    signatures: &'a [TransactionSignature],
) -> Vec<(usize, &'a TransactionSignature)> {
    authorizers
        .iter()
        .enumerate()
        .flat_map(|(index, authorizer)| {
            signatures
                .iter()
                .filter(move |sig| &sig.address == authorizer)
                .map(move |sig| (index, sig))
        })
        .collect()
}

/// Envelope fields: the payload list followed by the ordered payload
/// signature triples.
pub fn envelope_fields(
    payload: &TransactionPayload,
    payload_signatures: &[TransactionSignature],
) -> RlpItem {
    let triples = ordered_payload_signatures(&payload.authorizers, payload_signatures)
        .into_iter()
        .map(|(index, sig)| {
            RlpItem::List(vec![
                RlpItem::Uint(index as u64),
                RlpItem::Uint(sig.key_index),
                RlpItem::Bytes(sig.signature.clone()),
            ])
        })
        .collect();
    RlpItem::List(vec![payload_fields(payload), RlpItem::List(triples)])
}

/// RLP bytes of the payload, the message payload signers sign.
pub fn encode_payload(payload: &TransactionPayload) -> Result<Vec<u8>, TxError> {
    rlp::encode(&payload_fields(payload))
}

/// RLP bytes of the envelope, the message envelope signers sign.
pub fn encode_envelope(
    payload: &TransactionPayload,
    payload_signatures: &[TransactionSignature],
) -> Result<Vec<u8>, TxError> {
    rlp::encode(&envelope_fields(payload, payload_signatures))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProposalKey;

    const SERVICE: [u8; 8] = [0xf8, 0xd6, 0xe0, 0x58, 0x6b, 0x0a, 0x20, 0xc7];

    fn empty_payload() -> TransactionPayload {
        TransactionPayload {
            script: b"transaction{}".to_vec(),
            arguments: vec![],
            reference_block_id: [0u8; 32],
            gas_limit: 100,
            proposal_key: ProposalKey {
                address: SERVICE.to_vec(),
                key_index: 0,
                sequence_number: 0,
            },
            payer: SERVICE.to_vec(),
            authorizers: vec![],
        }
    }

    fn sig(address: u8, key_index: u64, fill: u8) -> TransactionSignature {
        TransactionSignature {
            address: vec![address; 8],
            key_index,
            signature: vec![fill; 64],
        }
    }

    #[test]
    fn test_payload_golden_vector() {
        assert_eq!(
            hex::encode(encode_payload(&empty_payload()).unwrap()),
            "f8468d7472616e73616374696f6e7b7dc0a00000000000000000000000000000\
             0000000000000000000000000000000000006488f8d6e0586b0a20c7808088f8\
             d6e0586b0a20c7c0"
        );
    }

    #[test]
    fn test_envelope_without_signatures() {
        assert_eq!(
            hex::encode(encode_envelope(&empty_payload(), &[]).unwrap()),
            "f849f8468d7472616e73616374696f6e7b7dc0a0000000000000000000000000\
             00000000000000000000000000000000000000006488f8d6e0586b0a20c78080\
             88f8d6e0586b0a20c7c0c0"
        );
    }

    #[test]
    fn test_arguments_are_opaque() {
        let mut payload = empty_payload();
        payload.arguments = vec![br#"{"type":"Int","value":"1"}"#.to_vec()];
        match payload_fields(&payload) {
            RlpItem::List(fields) => {
                assert_eq!(fields.len(), 9);
                assert_eq!(
                    fields[1],
                    RlpItem::List(vec![RlpItem::Bytes(payload.arguments[0].clone())])
                );
            }
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_field_order_matters() {
        let a = empty_payload();
        let mut b = empty_payload();
        b.proposal_key.sequence_number = 1;
        assert_ne!(encode_payload(&a).unwrap(), encode_payload(&b).unwrap());
    }

    #[test]
    fn test_signatures_follow_authorizer_order() {
        let authorizers = vec![vec![0xaa; 8], vec![0xbb; 8]];
        // B signs first, then A.
        let signatures = vec![sig(0xbb, 0, 2), sig(0xaa, 0, 1)];
        let ordered = ordered_payload_signatures(&authorizers, &signatures);
        assert_eq!(ordered.len(), 2);
        assert_eq!(ordered[0].0, 0);
        assert_eq!(ordered[0].1.address, vec![0xaa; 8]);
        assert_eq!(ordered[1].0, 1);
        assert_eq!(ordered[1].1.address, vec![0xbb; 8]);
    }

    #[test]
    fn test_multiple_keys_per_authorizer_keep_signer_order() {
        let authorizers = vec![vec![0xaa; 8]];
        let signatures = vec![sig(0xaa, 2, 1), sig(0xaa, 0, 2)];
        let ordered = ordered_payload_signatures(&authorizers, &signatures);
        let key_indices: Vec<u64> = ordered.iter().map(|(_, s)| s.key_index).collect();
        assert_eq!(key_indices, vec![2, 0]);
    }

    #[test]
    fn test_non_authorizer_signatures_dropped() {
        let authorizers = vec![vec![0xaa; 8]];
        let signatures = vec![sig(0xcc, 0, 1), sig(0xaa, 0, 2)];
        let ordered = ordered_payload_signatures(&authorizers, &signatures);
        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].1.address, vec![0xaa; 8]);
    }

    #[test]
    fn test_envelope_triple_layout() {
        let mut payload = empty_payload();
        payload.authorizers = vec![vec![0xaa; 8]];
        let signatures = vec![sig(0xaa, 5, 7)];
        match envelope_fields(&payload, &signatures) {
            RlpItem::List(parts) => {
                assert_eq!(parts[0], payload_fields(&payload));
                assert_eq!(
                    parts[1],
                    RlpItem::List(vec![RlpItem::List(vec![
                        RlpItem::Uint(0),
                        RlpItem::Uint(5),
                        RlpItem::Bytes(vec![7; 64]),
                    ])])
                );
            }
            other => panic!("expected list, got {:?}", other),
        }
    }
}
