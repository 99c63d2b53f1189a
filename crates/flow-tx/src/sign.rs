//! Multi-party signing pipeline.
//!
//! 1. Every payload signer signs the encoded payload (in caller order).
//! 2. The payload signatures are frozen into the envelope.
//! 3. Every envelope signer signs the encoded envelope (in caller order).
//!
//! The stage types make step 3 impossible before step 2 has completed.
//! Delegates digests and ECDSA to flow-crypto.

use crate::encode::address_bytes;
use crate::payload::{encode_envelope, encode_payload};
use crate::types::{
    PayloadSignedTransaction, SignedTransaction, TransactionPayload, TransactionSignature,
};
use crate::TxError;
use flow_types::SigningKey;

/// Sign a payload with each payload signer.
pub fn sign_payload(
    payload: TransactionPayload,
    signers: &[SigningKey],
) -> Result<PayloadSignedTransaction, TxError> {
    let message = encode_payload(&payload)?;
    log::trace!("payload message: {}", hex::encode(&message));

    let payload_signatures = signers
        .iter()
        .map(|signer| sign_message(&message, signer, "payload"))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PayloadSignedTransaction {
        payload,
        payload_signatures,
    })
}

impl PayloadSignedTransaction {
    /// Sign the envelope with each envelope signer, finalizing the transaction.
    pub fn sign_envelope(self, signers: &[SigningKey]) -> Result<SignedTransaction, TxError> {
        let message = encode_envelope(&self.payload, &self.payload_signatures)?;
        log::trace!("envelope message: {}", hex::encode(&message));

        let envelope_signatures = signers
            .iter()
            .map(|signer| sign_message(&message, signer, "envelope"))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SignedTransaction {
            payload: self.payload,
            payload_signatures: self.payload_signatures,
            envelope_signatures,
        })
    }
}

/// Sign a transaction end to end: payload signatures first, then envelope.
///
/// When one account is proposer, payer and authorizer, passing its key only
/// as an envelope signer is sufficient.
pub fn sign_transaction(
    payload: TransactionPayload,
    payload_signers: &[SigningKey],
    envelope_signers: &[SigningKey],
) -> Result<SignedTransaction, TxError> {
    sign_payload(payload, payload_signers)?.sign_envelope(envelope_signers)
}

fn sign_message(
    message: &[u8],
    signer: &SigningKey,
    stage: &str,
) -> Result<TransactionSignature, TxError> {
    let address = address_bytes(&signer.address)?;
    let signature = flow_crypto::sign_bytes(message, signer)?;
    log::debug!(
        "{} signature by {}#{}",
        stage,
        signer.address,
        signer.key_index
    );
    Ok(TransactionSignature {
        address,
        key_index: signer.key_index,
        signature: signature.to_vec(),
    })
}

impl SignedTransaction {
    /// Check every payload and envelope signature against the matching key
    /// in `keys` (by address and key index).
    ///
    /// Returns `Ok(false)` if a signature does not verify or has no matching
    /// key.
    pub fn verify_signatures(&self, keys: &[SigningKey]) -> Result<bool, TxError> {
        let payload_message = encode_payload(&self.payload)?;
        let envelope_message = encode_envelope(&self.payload, &self.payload_signatures)?;

        let stages = [
            (&payload_message, &self.payload_signatures),
            (&envelope_message, &self.envelope_signatures),
        ];
        for (message, signatures) in stages {
            for sig in signatures.iter() {
                let key = match find_key(keys, sig)? {
                    Some(key) => key,
                    None => return Ok(false),
                };
                if !flow_crypto::verify(message, &sig.signature, &key.public_key, key.hash_algo)? {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}

fn find_key<'a>(
    keys: &'a [SigningKey],
    sig: &TransactionSignature,
) -> Result<Option<&'a SigningKey>, TxError> {
    for key in keys {
        if key.key_index == sig.key_index && address_bytes(&key.address)? == sig.address {
            return Ok(Some(key));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::ordered_payload_signatures;
    use crate::types::ProposalKey;
    use flow_crypto::generate_key_pair;

    fn key_for(address: &str, key_index: u64) -> SigningKey {
        let pair = generate_key_pair();
        SigningKey::new(address, key_index, hex::decode(&pair.public_key).unwrap())
            .with_private_key(hex::decode(&pair.private_key).unwrap())
    }

    fn payload(authorizers: &[&str], payer: &str) -> TransactionPayload {
        TransactionPayload {
            script: b"transaction { execute {} }".to_vec(),
            arguments: vec![],
            reference_block_id: [7u8; 32],
            gas_limit: 9999,
            proposal_key: ProposalKey {
                address: hex::decode(authorizers[0]).unwrap(),
                key_index: 0,
                sequence_number: 4,
            },
            payer: hex::decode(payer).unwrap(),
            authorizers: authorizers.iter().map(|a| hex::decode(a).unwrap()).collect(),
        }
    }

    const A: &str = "01cf0e2f2f715450";
    const B: &str = "179b6b1cb6755e31";
    const PAYER: &str = "f8d6e0586b0a20c7";

    #[test]
    fn test_single_envelope_signer() {
        let key = key_for(PAYER, 0);
        let signed = sign_transaction(payload(&[PAYER], PAYER), &[], &[key.clone()]).unwrap();
        assert!(signed.payload_signatures().is_empty());
        assert_eq!(signed.envelope_signatures().len(), 1);
        assert_eq!(signed.envelope_signatures()[0].signature.len(), 64);
        assert!(signed.verify_signatures(&[key]).unwrap());
    }

    #[test]
    fn test_payload_signers_in_caller_order() {
        let (ka, kb, kp) = (key_for(A, 0), key_for(B, 1), key_for(PAYER, 0));
        let signed =
            sign_transaction(payload(&[A, B], PAYER), &[kb.clone(), ka.clone()], &[kp.clone()])
                .unwrap();

        let addrs: Vec<String> = signed
            .payload_signatures()
            .iter()
            .map(|s| hex::encode(&s.address))
            .collect();
        assert_eq!(addrs, vec![B, A]);
        assert_eq!(signed.payload_signatures()[0].key_index, 1);
        assert!(signed.verify_signatures(&[ka, kb, kp]).unwrap());
    }

    #[test]
    fn test_envelope_embeds_authorizer_order() {
        let (ka, kb, kp) = (key_for(A, 0), key_for(B, 0), key_for(PAYER, 0));
        let signed =
            sign_transaction(payload(&[A, B], PAYER), &[kb, ka], &[kp.clone()]).unwrap();

        let ordered = ordered_payload_signatures(
            &signed.payload().authorizers,
            signed.payload_signatures(),
        );
        assert_eq!(hex::encode(&ordered[0].1.address), A);
        assert_eq!(hex::encode(&ordered[1].1.address), B);

        // The payer's envelope signature covers exactly that ordering.
        let message = encode_envelope(signed.payload(), signed.payload_signatures()).unwrap();
        assert!(flow_crypto::verify(
            &message,
            &signed.envelope_signatures()[0].signature,
            &kp.public_key,
            kp.hash_algo,
        )
        .unwrap());
    }

    #[test]
    fn test_envelope_depends_on_payload_signatures() {
        let (ka, kp) = (key_for(A, 0), key_for(PAYER, 0));
        let staged = sign_payload(payload(&[A], PAYER), &[ka]).unwrap();
        let with_sigs = encode_envelope(staged.payload(), staged.payload_signatures()).unwrap();
        let without = encode_envelope(staged.payload(), &[]).unwrap();
        assert_ne!(with_sigs, without);

        let signed = staged.sign_envelope(&[kp.clone()]).unwrap();
        assert!(!flow_crypto::verify(
            &without,
            &signed.envelope_signatures()[0].signature,
            &kp.public_key,
            kp.hash_algo,
        )
        .unwrap());
    }

    #[test]
    fn test_missing_private_key_fails_whole_call() {
        let pair = generate_key_pair();
        let public_only = SigningKey::new(PAYER, 0, hex::decode(pair.public_key).unwrap());
        let err = sign_transaction(payload(&[PAYER], PAYER), &[], &[public_only]).unwrap_err();
        assert!(matches!(
            err,
            TxError::Crypto(flow_crypto::CryptoError::MissingPrivateKey { .. })
        ));
    }

    #[test]
    fn test_malformed_signer_address() {
        let mut key = key_for(PAYER, 0);
        key.address = "not-hex".into();
        let err = sign_payload(payload(&[PAYER], PAYER), &[key]).unwrap_err();
        assert!(matches!(err, TxError::MalformedField { field: "address", .. }));
    }

    #[test]
    fn test_verify_rejects_unknown_key() {
        let kp = key_for(PAYER, 0);
        let stranger = key_for(PAYER, 1);
        let signed = sign_transaction(payload(&[PAYER], PAYER), &[], &[kp]).unwrap();
        assert!(!signed.verify_signatures(&[stranger]).unwrap());
    }

    #[test]
    fn test_from_parts_continues_pipeline() {
        let (ka, kp) = (key_for(A, 0), key_for(PAYER, 0));
        let staged = sign_payload(payload(&[A], PAYER), &[ka.clone()]).unwrap();
        let resumed = PayloadSignedTransaction::from_parts(
            staged.payload().clone(),
            staged.payload_signatures().to_vec(),
        );
        let signed = resumed.sign_envelope(&[kp.clone()]).unwrap();
        assert!(signed.verify_signatures(&[ka, kp]).unwrap());
    }

    #[test]
    fn test_into_parts_returns_every_stage() {
        let (ka, kp) = (key_for(A, 0), key_for(PAYER, 0));
        let signed = sign_transaction(payload(&[A], PAYER), &[ka], &[kp]).unwrap();
        let expected = signed.clone();

        let (payload, payload_sigs, envelope_sigs) = signed.into_parts();
        assert_eq!(&payload, expected.payload());
        assert_eq!(payload_sigs, expected.payload_signatures());
        assert_eq!(envelope_sigs, expected.envelope_signatures());
        assert_eq!(hex::encode(&payload_sigs[0].address), A);
        assert_eq!(hex::encode(&envelope_sigs[0].address), PAYER);
    }
}
