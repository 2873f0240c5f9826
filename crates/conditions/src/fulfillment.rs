//! Fulfillments, the evidence that satisfies a condition.
//!
//! A [`Fulfillment`] is a closed choice over the five variants.  On the wire
//! it's a tagged frame whose tag is the condition type ordinal and whose body
//! is the variant's fields.  Compound variants hold [`SubElement`]s, each
//! either a nested fulfillment or just the condition it would satisfy.
//!
//! Decoding rejects fulfillments nested more than [`MAX_NESTING_DEPTH`] levels
//! below the outermost one.

use cryptocond_codec::{
    Codec, CodecError, Decoder, Encoder, Frame, encode_explicit, encode_to_vec, write_frame,
};
use tracing::{debug, trace};

use crate::condition::Condition;
use crate::config::ValidateConfig;
use crate::errors::{ConditionError, ConditionResult};
use crate::fulfillments::{
    Ed25519Sha256, FulfillmentVariant, PrefixSha256, PreimageSha256, RsaSha256, ThresholdSha256,
};
use crate::type_ids::ConditionType;

/// Tag of a sub-element holding a fulfillment.
const SUB_FULFILLMENT_TAG: u8 = 0;

/// Tag of a sub-element holding a bare condition.
const SUB_CONDITION_TAG: u8 = 1;

/// How many levels of sub-fulfillments may sit below the outermost
/// fulfillment in decoded input.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Fulfillment of any condition type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Fulfillment {
    /// Hash preimage.
    PreimageSha256(PreimageSha256),

    /// Prefix over a sub-element.
    PrefixSha256(PrefixSha256),

    /// M-of-N threshold over sub-elements.
    ThresholdSha256(ThresholdSha256),

    /// RSA-PSS signature.
    RsaSha256(RsaSha256),

    /// Ed25519 signature.
    Ed25519Sha256(Ed25519Sha256),
}

/// Runs an expression against whichever variant a fulfillment holds.
macro_rules! dispatch {
    ($self:expr, $v:ident => $body:expr) => {
        match $self {
            Fulfillment::PreimageSha256($v) => $body,
            Fulfillment::PrefixSha256($v) => $body,
            Fulfillment::ThresholdSha256($v) => $body,
            Fulfillment::RsaSha256($v) => $body,
            Fulfillment::Ed25519Sha256($v) => $body,
        }
    };
}

impl Fulfillment {
    /// Gets the condition type.
    pub fn condition_type(&self) -> ConditionType {
        match self {
            Self::PreimageSha256(_) => ConditionType::PreimageSha256,
            Self::PrefixSha256(_) => ConditionType::PrefixSha256,
            Self::ThresholdSha256(_) => ConditionType::ThresholdSha256,
            Self::RsaSha256(_) => ConditionType::RsaSha256,
            Self::Ed25519Sha256(_) => ConditionType::Ed25519Sha256,
        }
    }

    /// Derives the condition this fulfillment satisfies.
    ///
    /// This is a pure function of the fulfillment's contents.
    pub fn condition(&self) -> ConditionResult<Condition> {
        dispatch!(self, f => f.derive_condition())
    }

    /// Encodes the fulfillment into a new vec.
    pub fn to_vec(&self) -> ConditionResult<Vec<u8>> {
        Ok(encode_to_vec(self)?)
    }

    /// Validates the fulfillment against a condition and message with the
    /// default config.
    pub fn validate(&self, condition: &Condition, message: &[u8]) -> ConditionResult<()> {
        self.validate_with(&ValidateConfig::default(), condition, message)
    }

    /// Validates the fulfillment against a condition and message.
    ///
    /// The derived condition must equal `condition` in every field before any
    /// message checks run.
    pub fn validate_with(
        &self,
        config: &ValidateConfig,
        condition: &Condition,
        message: &[u8],
    ) -> ConditionResult<()> {
        let ty = self.condition_type();
        trace!(%ty, msg_len = message.len(), "validating fulfillment");

        config.check_condition(condition)?;

        let derived = self.condition()?;
        if &derived != condition {
            debug!(%ty, "fulfillment does not match condition");
            return Err(ConditionError::FulfillmentMismatch(ty));
        }

        self.verify_message(message).inspect_err(|e| {
            debug!(%ty, %e, "fulfillment rejected");
        })
    }

    /// Checks the message against the fulfillment's own condition.
    pub(crate) fn verify_message(&self, message: &[u8]) -> ConditionResult<()> {
        dispatch!(self, f => f.verify_message(message))
    }

    /// Decodes a fulfillment sitting `depth` levels below the outermost one.
    pub(crate) fn decode_nested(dec: &mut impl Decoder, depth: usize) -> Result<Self, CodecError> {
        if depth > MAX_NESTING_DEPTH {
            return Err(CodecError::DepthLimitExceeded(MAX_NESTING_DEPTH));
        }

        let mut frame = Frame::read(dec)?;
        let ty = ConditionType::try_from(frame.tag())
            .map_err(|_| CodecError::UnknownChoice(frame.tag()))?;

        let body = frame.body();
        let fulfillment = match ty {
            ConditionType::PreimageSha256 => Self::PreimageSha256(PreimageSha256::decode(body)?),
            ConditionType::PrefixSha256 => {
                Self::PrefixSha256(PrefixSha256::decode_nested(body, depth)?)
            }
            ConditionType::ThresholdSha256 => {
                Self::ThresholdSha256(ThresholdSha256::decode_nested(body, depth)?)
            }
            ConditionType::RsaSha256 => Self::RsaSha256(RsaSha256::decode(body)?),
            ConditionType::Ed25519Sha256 => Self::Ed25519Sha256(Ed25519Sha256::decode(body)?),
        };

        frame.finish()?;
        Ok(fulfillment)
    }
}

impl Codec for Fulfillment {
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        Self::decode_nested(dec, 0)
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        let body = dispatch!(self, f => encode_to_vec(f))?;
        write_frame(enc, self.condition_type().as_u8(), &body)
    }
}

/// Generates the conversions between a variant and the enum.
macro_rules! impl_variant_conversions {
    ($($name:ident),*) => {
        $(
            impl From<$name> for Fulfillment {
                fn from(value: $name) -> Self {
                    Self::$name(value)
                }
            }

            impl TryFrom<Fulfillment> for $name {
                type Error = ConditionError;

                fn try_from(value: Fulfillment) -> Result<Self, Self::Error> {
                    match value {
                        Fulfillment::$name(inner) => Ok(inner),
                        other => Err(ConditionError::TypeMismatch {
                            expected: ConditionType::$name,
                            found: other.condition_type(),
                        }),
                    }
                }
            }
        )*
    };
}

impl_variant_conversions!(
    PreimageSha256,
    PrefixSha256,
    ThresholdSha256,
    RsaSha256,
    Ed25519Sha256
);

/// Element nested inside a compound fulfillment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubElement {
    /// Revealed sub-fulfillment.
    Fulfilled(Box<Fulfillment>),

    /// Only the condition, as a placeholder.
    Unfulfilled(Condition),
}

impl SubElement {
    /// Gets the condition of the element, deriving it if needed.
    pub fn condition(&self) -> ConditionResult<Condition> {
        match self {
            Self::Fulfilled(f) => f.condition(),
            Self::Unfulfilled(c) => Ok(c.clone()),
        }
    }

    /// Gets the fulfillment, if revealed.
    pub fn fulfillment(&self) -> Option<&Fulfillment> {
        match self {
            Self::Fulfilled(f) => Some(f),
            Self::Unfulfilled(_) => None,
        }
    }

    /// Returns if the element is a revealed fulfillment.
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Self::Fulfilled(_))
    }

    /// Decodes an element of a compound fulfillment that sits `depth` levels
    /// below the outermost one.
    pub(crate) fn decode_nested(dec: &mut impl Decoder, depth: usize) -> Result<Self, CodecError> {
        let mut frame = Frame::read(dec)?;
        let sub = match frame.tag() {
            SUB_FULFILLMENT_TAG => {
                let inner = Fulfillment::decode_nested(frame.body(), depth + 1)?;
                Self::Fulfilled(Box::new(inner))
            }
            SUB_CONDITION_TAG => Self::Unfulfilled(Condition::decode(frame.body())?),
            tag => return Err(CodecError::UnknownChoice(tag)),
        };
        frame.finish()?;
        Ok(sub)
    }
}

impl From<Fulfillment> for SubElement {
    fn from(value: Fulfillment) -> Self {
        Self::Fulfilled(Box::new(value))
    }
}

impl From<Condition> for SubElement {
    fn from(value: Condition) -> Self {
        Self::Unfulfilled(value)
    }
}

impl Codec for SubElement {
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        Self::decode_nested(dec, 0)
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        match self {
            Self::Fulfilled(f) => encode_explicit(enc, SUB_FULFILLMENT_TAG, f.as_ref()),
            Self::Unfulfilled(c) => encode_explicit(enc, SUB_CONDITION_TAG, c),
        }
    }
}
