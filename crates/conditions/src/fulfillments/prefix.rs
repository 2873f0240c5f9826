//! Prefix fulfillments.
//!
//! A prefix fulfillment prepends a fixed prefix to the message and hands the
//! result to its sub-fulfillment.  The declared maximum message length is
//! part of the fingerprint, so a verifier knows the worst-case cost up front.

use cryptocond_codec::{
    Codec, CodecError, Decoder, Encoder, Frame, MAX_LENGTH, decode_explicit, encode_explicit,
    encoded_len, impl_tagged_struct,
};
use tracing::{debug, trace};

use super::{FulfillmentVariant, fingerprint_of, impl_variant_common};
use crate::condition::Condition;
use crate::errors::{ConditionError, ConditionResult};
use crate::fulfillment::SubElement;
use crate::type_ids::ConditionType;

/// Fixed cost added on top of the sub-condition's.
pub const PREFIX_OVERHEAD: u64 = 1024;

/// Longest prefix we accept, leaving room for the field framing.
pub const MAX_PREFIX_LEN: usize = MAX_LENGTH - 4;

/// Tag of the sub-element field.
const SUB_TAG: u8 = 2;

/// Prepends a prefix to the message before delegating to a sub-element.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrefixSha256 {
    prefix: Vec<u8>,
    max_message_length: u32,
    sub: SubElement,
}

impl_tagged_struct! {
    /// The prefix as a lone field, whose encoded length counts toward the cost.
    struct PrefixField {
        prefix: Vec<u8> = 0,
    }
}

impl_tagged_struct! {
    /// What the fingerprint commits to.
    struct PrefixFingerprintContents {
        prefix: Vec<u8> = 0,
        max_message_length: u32 = 1,
        sub_condition: Condition = 2,
    }
}

impl PrefixSha256 {
    /// Constructs a new instance.
    pub fn new(
        prefix: Vec<u8>,
        max_message_length: u32,
        sub: impl Into<SubElement>,
    ) -> ConditionResult<Self> {
        if prefix.len() > MAX_PREFIX_LEN {
            return Err(ConditionError::UnsupportedValue(format!(
                "prefix of {} bytes",
                prefix.len()
            )));
        }
        Ok(Self {
            prefix,
            max_message_length,
            sub: sub.into(),
        })
    }

    /// Gets the prefix.
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Gets the maximum length of messages this accepts.
    pub fn max_message_length(&self) -> u32 {
        self.max_message_length
    }

    /// Gets the sub-element.
    pub fn sub(&self) -> &SubElement {
        &self.sub
    }

    /// Returns if the sub-element is a fulfillment rather than a bare
    /// condition.
    pub fn is_fulfilled(&self) -> bool {
        self.sub.is_fulfilled()
    }

    /// Derives the condition of the sub-element.
    pub fn sub_condition(&self) -> ConditionResult<Condition> {
        self.sub.condition()
    }

    /// Decodes the fields, with the prefix itself sitting `depth` levels
    /// below the outermost fulfillment.
    pub(crate) fn decode_nested(dec: &mut impl Decoder, depth: usize) -> Result<Self, CodecError> {
        let prefix = decode_explicit::<Vec<u8>>(dec, 0)?;
        let max_message_length = decode_explicit::<u32>(dec, 1)?;

        let mut frame = Frame::read(dec)?;
        frame.expect_tag(SUB_TAG)?;
        let sub = SubElement::decode_nested(frame.body(), depth)?;
        frame.finish()?;

        Ok(Self {
            prefix,
            max_message_length,
            sub,
        })
    }

    /// Total cost given the cost of the sub-condition.
    fn cost_over(&self, sub_cost: u64) -> ConditionResult<u64> {
        let field_len = encoded_len(&PrefixField {
            prefix: self.prefix.clone(),
        })
        .map_err(|source| ConditionError::Internal {
            context: "encoding prefix field",
            source,
        })?;

        [
            field_len as u64,
            self.max_message_length as u64,
            PREFIX_OVERHEAD,
        ]
        .into_iter()
        .try_fold(sub_cost, u64::checked_add)
        .ok_or_else(|| ConditionError::UnsupportedValue("prefix cost overflows".to_owned()))
    }
}

impl Codec for PrefixSha256 {
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        Self::decode_nested(dec, 0)
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        encode_explicit(enc, 0, &self.prefix)?;
        encode_explicit(enc, 1, &self.max_message_length)?;
        encode_explicit(enc, SUB_TAG, &self.sub)
    }
}

impl_variant_common!(PrefixSha256);

impl FulfillmentVariant for PrefixSha256 {
    const TYPE: ConditionType = ConditionType::PrefixSha256;

    fn derive_condition(&self) -> ConditionResult<Condition> {
        let sub_condition = self.sub.condition()?;
        let cost = self.cost_over(sub_condition.cost())?;
        let subtypes = sub_condition.type_set();
        let fingerprint = fingerprint_of(&PrefixFingerprintContents {
            prefix: self.prefix.clone(),
            max_message_length: self.max_message_length,
            sub_condition,
        })?;
        Condition::new_compound(Self::TYPE, fingerprint, cost, subtypes)
    }

    fn verify_message(&self, message: &[u8]) -> ConditionResult<()> {
        let SubElement::Fulfilled(sub) = &self.sub else {
            return Err(ConditionError::Unfulfilled(Self::TYPE));
        };

        if message.len() > self.max_message_length as usize {
            debug!(
                len = message.len(),
                max = self.max_message_length,
                "message too long for prefix"
            );
            return Err(ConditionError::MessageTooLong {
                len: message.len(),
                max: self.max_message_length,
            });
        }

        let mut composed = Vec::with_capacity(self.prefix.len() + message.len());
        composed.extend_from_slice(&self.prefix);
        composed.extend_from_slice(message);

        trace!(
            sub_type = %sub.condition_type(),
            len = composed.len(),
            "delegating to prefix sub-fulfillment"
        );
        sub.verify_message(&composed).map_err(|e| {
            e.context(format!(
                "failed to validate sub-fulfillment with message {}",
                hex::encode(&composed)
            ))
        })
    }
}
