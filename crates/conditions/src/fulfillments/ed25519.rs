//! Ed25519 signature fulfillments.

use cryptocond_codec::{FixedOctets, impl_tagged_struct};

use super::{FulfillmentVariant, fingerprint_of, impl_variant_common};
use crate::condition::Condition;
use crate::errors::ConditionResult;
use crate::type_ids::ConditionType;
use crate::verifier::SignatureVerifier;
use crate::verifiers::Ed25519Verifier;

/// Fixed cost of an Ed25519 condition.
pub const ED25519_COST: u64 = 131_072;

/// Length of a public key.
const PUBLIC_KEY_LEN: usize = 32;

/// Length of a signature.
const SIGNATURE_LEN: usize = 64;

impl_tagged_struct! {
    /// An Ed25519 public key and a signature made with it.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct Ed25519Sha256 {
        public_key: FixedOctets<PUBLIC_KEY_LEN> = 0,
        signature: FixedOctets<SIGNATURE_LEN> = 1,
    }
}

impl_tagged_struct! {
    /// What the fingerprint commits to.
    struct Ed25519FingerprintContents {
        public_key: FixedOctets<PUBLIC_KEY_LEN> = 0,
    }
}

impl Ed25519Sha256 {
    /// Constructs a new instance.  The key isn't checked to be a valid point
    /// until validation.
    pub fn new(public_key: [u8; PUBLIC_KEY_LEN], signature: [u8; SIGNATURE_LEN]) -> Self {
        Self {
            public_key: FixedOctets(public_key),
            signature: FixedOctets(signature),
        }
    }

    /// Gets the public key.
    pub fn public_key(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.public_key.0
    }

    /// Gets the signature.
    pub fn signature(&self) -> &[u8; SIGNATURE_LEN] {
        &self.signature.0
    }
}

impl_variant_common!(Ed25519Sha256);

impl FulfillmentVariant for Ed25519Sha256 {
    const TYPE: ConditionType = ConditionType::Ed25519Sha256;

    fn derive_condition(&self) -> ConditionResult<Condition> {
        let fingerprint = fingerprint_of(&Ed25519FingerprintContents {
            public_key: self.public_key,
        })?;
        Condition::new_simple(Self::TYPE, fingerprint, ED25519_COST)
    }

    fn verify_message(&self, message: &[u8]) -> ConditionResult<()> {
        Ed25519Verifier.verify(self.public_key(), message, self.signature())
    }
}
