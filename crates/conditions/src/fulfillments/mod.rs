//! Fulfillment variants.
//!
//! Each variant knows how to derive its own condition and how to check a
//! message once the parent has confirmed that condition is the one being
//! asked about.

mod ed25519;
mod prefix;
mod preimage;
mod rsa_sha256;
mod threshold;

use cryptocond_codec::{Codec, encode_to_vec};
use sha2::{Digest, Sha256};

pub use ed25519::{ED25519_COST, Ed25519Sha256};
pub use prefix::{MAX_PREFIX_LEN, PREFIX_OVERHEAD, PrefixSha256};
pub use preimage::PreimageSha256;
pub use rsa_sha256::{RSA_MAX_MODULUS_LEN, RSA_MIN_MODULUS_LEN, RsaSha256};
pub use threshold::{THRESHOLD_OVERHEAD, ThresholdSha256};

use crate::condition::{Condition, Fingerprint};
use crate::errors::{ConditionError, ConditionResult};
use crate::type_ids::ConditionType;

/// Derivation and verification logic shared by every variant.
pub(crate) trait FulfillmentVariant {
    /// Condition type of the variant.
    const TYPE: ConditionType;

    /// Derives the condition this fulfillment satisfies.
    ///
    /// Compound variants derive each sub-condition exactly once per call, so
    /// the work is linear in the size of the tree.
    fn derive_condition(&self) -> ConditionResult<Condition>;

    /// Checks the message, assuming the caller already checked the condition.
    fn verify_message(&self, message: &[u8]) -> ConditionResult<()>;
}

/// SHA-256 digest of a buffer.
pub(crate) fn sha256(buf: &[u8]) -> Fingerprint {
    Sha256::digest(buf).into()
}

/// Hashes the canonical encoding of some fingerprint contents.
///
/// The contents come from values that already passed construction checks, so
/// an encoding failure here is an internal error.
pub(crate) fn fingerprint_of<T: Codec>(contents: &T) -> ConditionResult<Fingerprint> {
    let buf = encode_to_vec(contents).map_err(|source| ConditionError::Internal {
        context: "encoding fingerprint contents",
        source,
    })?;
    Ok(sha256(&buf))
}

/// Implements the public accessors that every variant shares.
macro_rules! impl_variant_common {
    ($name:ident) => {
        impl $name {
            /// Derives the condition this fulfillment satisfies.
            pub fn condition(&self) -> $crate::errors::ConditionResult<$crate::Condition> {
                <Self as $crate::fulfillments::FulfillmentVariant>::derive_condition(self)
            }
        }
    };
}

pub(crate) use impl_variant_common;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_empty() {
        assert_eq!(
            sha256(b""),
            [
                0xe3, 0xb0, 0xc4, 0x42, 0x98, 0xfc, 0x1c, 0x14, 0x9a, 0xfb, 0xf4, 0xc8, 0x99, 0x6f,
                0xb9, 0x24, 0x27, 0xae, 0x41, 0xe4, 0x64, 0x9b, 0x93, 0x4c, 0xa4, 0x95, 0x99, 0x1b,
                0x78, 0x52, 0xb8, 0x55,
            ]
        );
    }
}
