//! Signature verification trait definition.
//!
//! This module provides the [`SignatureVerifier`] trait that defines how the
//! signature-based condition types parse their public keys and signatures,
//! and verify messages.  The cryptography itself comes from the RustCrypto
//! and dalek crates.

use crate::errors::ConditionResult;

/// Base trait for implementing scheme-specific signature verification logic.
pub(crate) trait SignatureVerifier {
    /// Parsed public key.
    type PublicKey;

    /// Parsed signature.
    type Signature;

    /// Parses raw public key bytes into the structured key type.
    fn parse_key(&self, key: &[u8]) -> ConditionResult<Self::PublicKey>;

    /// Parses raw signature bytes into the structured signature type.
    fn parse_signature(&self, signature: &[u8]) -> ConditionResult<Self::Signature>;

    /// Internal verification method that takes parsed key and signature types.
    fn verify_inner(
        &self,
        key: &Self::PublicKey,
        message: &[u8],
        signature: &Self::Signature,
    ) -> ConditionResult<()>;

    /// Verifies that a signature over a message was made with a key.
    ///
    /// This method handles parsing and verification in one step.
    fn verify(&self, key: &[u8], message: &[u8], signature: &[u8]) -> ConditionResult<()> {
        let key = self.parse_key(key)?;
        let signature = self.parse_signature(signature)?;
        self.verify_inner(&key, message, &signature)
    }
}
