//! # Crypto-conditions
//!
//! This crate implements crypto-conditions: compact, composable commitments
//! to predicates over a message, and the fulfillments that satisfy them.
//!
//! ## Core Concepts
//!
//! - **Conditions**: A fixed-size commitment made of a condition type, a
//!   SHA-256 fingerprint, and an estimated verification cost.  Compound
//!   conditions also carry the set of condition types found beneath them.
//!   Represented by the [`Condition`] struct.
//! - **Fulfillments**: The evidence behind a condition, such as a hash
//!   preimage or a signature.  A fulfillment always derives the condition it
//!   satisfies and can be validated against a condition and a message.
//!   Represented by the [`Fulfillment`] enum.
//! - **Messages**: Flat byte arrays that signatures are made over.
//!
//! ## Supported Condition Types
//!
//! - **PREIMAGE-SHA-256** ([`ConditionType::PreimageSha256`] = 0):
//!   Reveals a secret whose SHA-256 digest is the fingerprint.  Ignores the
//!   message.
//!
//! - **PREFIX-SHA-256** ([`ConditionType::PrefixSha256`] = 1):
//!   Prepends a fixed prefix to the message and delegates to a
//!   sub-fulfillment, bounding the length of the message.
//!
//! - **THRESHOLD-SHA-256** ([`ConditionType::ThresholdSha256`] = 2):
//!   Requires M of N sub-fulfillments to validate.  Unrevealed elements are
//!   represented by their conditions.
//!
//! - **RSA-SHA-256** ([`ConditionType::RsaSha256`] = 3):
//!   RSASSA-PSS signature with SHA-256, using a 1024 to 4096 bit modulus.
//!
//! - **ED25519-SHA-256** ([`ConditionType::Ed25519Sha256`] = 4):
//!   Ed25519 signature.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cryptocond::{Fulfillment, PreimageSha256, validate_fulfillment};
//!
//! let fulfillment = Fulfillment::from(PreimageSha256::new(b"secret".to_vec())?);
//! let condition = fulfillment.condition()?;
//!
//! // Share the condition, then later check the revealed fulfillment.
//! let condition_bytes = condition.to_vec()?;
//! let fulfillment_bytes = fulfillment.to_vec()?;
//! cryptocond::verify_fulfillment_bytes(&fulfillment_bytes, &condition_bytes, b"")?;
//! ```
//!
//! ## Feature Flags
//!
//! - `arbitrary`: Enables `Arbitrary` implementations for [`ConditionType`]
//!   and [`Condition`]

mod condition;
mod config;
mod errors;
mod features;
mod fulfillment;
mod fulfillments;
pub mod type_ids;
mod verifier;
mod verifiers;

#[cfg(feature = "arbitrary")]
mod arbitrary;

#[cfg(test)]
mod test_utils;


use cryptocond_codec::{decode_buf_exact, encode_to_vec};

pub use condition::{Condition, FINGERPRINT_LEN, Fingerprint};
pub use config::ValidateConfig;
pub use errors::{ConditionError, ConditionResult, ErrorKind};
pub use features::{ConditionTypeSet, Features};
pub use fulfillment::{Fulfillment, MAX_NESTING_DEPTH, SubElement};
pub use fulfillments::{
    ED25519_COST, Ed25519Sha256, MAX_PREFIX_LEN, PREFIX_OVERHEAD, PrefixSha256, PreimageSha256,
    RSA_MAX_MODULUS_LEN, RSA_MIN_MODULUS_LEN, RsaSha256, THRESHOLD_OVERHEAD, ThresholdSha256,
};
pub use type_ids::ConditionType;

/// Encodes a condition.
pub fn encode_condition(condition: &Condition) -> ConditionResult<Vec<u8>> {
    Ok(encode_to_vec(condition)?)
}

/// Decodes a condition, rejecting trailing bytes.
pub fn decode_condition(buf: &[u8]) -> ConditionResult<Condition> {
    Ok(decode_buf_exact(buf)?)
}

/// Encodes a fulfillment.
pub fn encode_fulfillment(fulfillment: &Fulfillment) -> ConditionResult<Vec<u8>> {
    Ok(encode_to_vec(fulfillment)?)
}

/// Decodes a fulfillment of any type, rejecting trailing bytes.
pub fn decode_fulfillment(buf: &[u8]) -> ConditionResult<Fulfillment> {
    Ok(decode_buf_exact(buf)?)
}

/// Decodes a fulfillment that must be of a particular type.
///
/// Returns [`ConditionError::TypeMismatch`] if the bytes are a well-formed
/// fulfillment of some other type.
pub fn decode_fulfillment_as<T>(buf: &[u8]) -> ConditionResult<T>
where
    T: TryFrom<Fulfillment, Error = ConditionError>,
{
    T::try_from(decode_fulfillment(buf)?)
}

/// Derives the condition a fulfillment satisfies.
pub fn derive_condition(fulfillment: &Fulfillment) -> ConditionResult<Condition> {
    fulfillment.condition()
}

/// Validates a fulfillment against a condition and message.
pub fn validate_fulfillment(
    fulfillment: &Fulfillment,
    condition: &Condition,
    message: &[u8],
) -> ConditionResult<()> {
    fulfillment.validate(condition, message)
}

/// Decodes a fulfillment and a condition and validates one against the other
/// for a message.
///
/// # Arguments
/// * `fulfillment` - The encoded fulfillment
/// * `condition` - The encoded condition
/// * `message` - The message to validate
///
/// # Returns
/// * `Ok(())` if the fulfillment satisfies the condition for the message
/// * `Err(ConditionError)` if decoding or validation fails
pub fn verify_fulfillment_bytes(
    fulfillment: &[u8],
    condition: &[u8],
    message: &[u8],
) -> ConditionResult<()> {
    let fulfillment =
        decode_fulfillment(fulfillment).map_err(|e| e.context("decoding fulfillment"))?;
    let condition = decode_condition(condition).map_err(|e| e.context("decoding condition"))?;
    fulfillment.validate(&condition, message)
}
