//! RSASSA-PSS signature verification with SHA-256.
//!
//! Keys are given as a big-endian modulus only, the public exponent is always
//! 65537.  The salt length is the digest length.

use rsa::pss::{Signature, VerifyingKey};
use rsa::{BigUint, RsaPublicKey};
use sha2::Sha256;
use signature::Verifier;

use crate::errors::{ConditionError, ConditionResult};
use crate::type_ids::ConditionType;
use crate::verifier::SignatureVerifier;

/// Fixed public exponent.
const RSA_EXPONENT: u32 = 65537;

/// RSASSA-PSS verifier.
pub(crate) struct RsaPssVerifier;

fn key_err(reason: impl ToString) -> ConditionError {
    ConditionError::PublicKeyInvalid {
        ty: ConditionType::RsaSha256,
        reason: reason.to_string(),
    }
}

fn sig_err(reason: impl ToString) -> ConditionError {
    ConditionError::SignatureInvalid {
        ty: ConditionType::RsaSha256,
        reason: reason.to_string(),
    }
}

impl SignatureVerifier for RsaPssVerifier {
    type PublicKey = VerifyingKey<Sha256>;
    type Signature = Signature;

    fn parse_key(&self, modulus: &[u8]) -> ConditionResult<Self::PublicKey> {
        let n = BigUint::from_bytes_be(modulus);
        let e = BigUint::from(RSA_EXPONENT);
        let key = RsaPublicKey::new(n, e).map_err(key_err)?;
        Ok(VerifyingKey::new(key))
    }

    fn parse_signature(&self, signature: &[u8]) -> ConditionResult<Self::Signature> {
        Signature::try_from(signature).map_err(sig_err)
    }

    fn verify_inner(
        &self,
        key: &Self::PublicKey,
        message: &[u8],
        signature: &Self::Signature,
    ) -> ConditionResult<()> {
        key.verify(message, signature).map_err(sig_err)
    }
}
