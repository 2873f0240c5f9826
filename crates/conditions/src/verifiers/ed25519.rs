//! Ed25519 signature verification.

use ed25519_dalek::{PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH, Signature, VerifyingKey};
use signature::Verifier;

use crate::errors::{ConditionError, ConditionResult};
use crate::type_ids::ConditionType;
use crate::verifier::SignatureVerifier;

/// Ed25519 signature verifier.
///
/// Public keys are 32-byte compressed Edwards points and signatures are the
/// 64-byte `R || s` encoding.
pub(crate) struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    type PublicKey = VerifyingKey;
    type Signature = Signature;

    fn parse_key(&self, key: &[u8]) -> ConditionResult<Self::PublicKey> {
        let key: &[u8; PUBLIC_KEY_LENGTH] =
            key.try_into().map_err(|_| ConditionError::PublicKeyInvalid {
                ty: ConditionType::Ed25519Sha256,
                reason: format!("expected {PUBLIC_KEY_LENGTH} bytes, got {}", key.len()),
            })?;

        VerifyingKey::from_bytes(key).map_err(|e| ConditionError::PublicKeyInvalid {
            ty: ConditionType::Ed25519Sha256,
            reason: e.to_string(),
        })
    }

    fn parse_signature(&self, signature: &[u8]) -> ConditionResult<Self::Signature> {
        Signature::from_slice(signature).map_err(|_| ConditionError::SignatureInvalid {
            ty: ConditionType::Ed25519Sha256,
            reason: format!("expected {SIGNATURE_LENGTH} bytes, got {}", signature.len()),
        })
    }

    fn verify_inner(
        &self,
        key: &Self::PublicKey,
        message: &[u8],
        signature: &Self::Signature,
    ) -> ConditionResult<()> {
        key.verify(message, signature)
            .map_err(|e| ConditionError::SignatureInvalid {
                ty: ConditionType::Ed25519Sha256,
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use signature::Signer;

    use super::*;
    use crate::test_utils::{assert_semantic_violation, ed25519_signing_key};

    #[test]
    fn test_valid_signature() {
        let sk = ed25519_signing_key();
        let msg = b"attack at dawn";
        let sig = sk.sign(msg);

        let res = Ed25519Verifier.verify(sk.verifying_key().as_bytes(), msg, &sig.to_bytes());
        assert!(res.is_ok());
    }

    #[test]
    fn test_wrong_message() {
        let sk = ed25519_signing_key();
        let sig = sk.sign(b"attack at dawn");

        let key = sk.verifying_key();
        let res = Ed25519Verifier.verify(key.as_bytes(), b"attack at dusk", &sig.to_bytes());
        assert_semantic_violation(res);
    }

    #[test]
    fn test_tampered_signature() {
        let sk = ed25519_signing_key();
        let msg = b"attack at dawn";
        let mut sig = sk.sign(msg).to_bytes();
        sig[10] ^= 0x01;

        let res = Ed25519Verifier.verify(sk.verifying_key().as_bytes(), msg, &sig);
        assert_semantic_violation(res);
    }

    #[test]
    fn test_bad_key_length() {
        let res = Ed25519Verifier.verify(&[0; 31], b"msg", &[0; 64]);
        assert!(matches!(
            res,
            Err(ConditionError::PublicKeyInvalid {
                ty: ConditionType::Ed25519Sha256,
                ..
            })
        ));
    }

    #[test]
    fn test_bad_signature_length() {
        let sk = ed25519_signing_key();
        let res = Ed25519Verifier.verify(sk.verifying_key().as_bytes(), b"msg", &[0; 63]);
        assert!(matches!(
            res,
            Err(ConditionError::SignatureInvalid {
                ty: ConditionType::Ed25519Sha256,
                ..
            })
        ));
    }
}
