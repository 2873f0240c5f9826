//! Conditions, the compact commitments that fulfillments satisfy.

use cryptocond_codec::{
    Codec, CodecError, Decoder, Encoder, FixedOctets, Frame, decode_explicit, encode_explicit,
    encode_to_vec, write_frame,
};

use crate::errors::{ConditionError, ConditionResult};
use crate::features::{ConditionTypeSet, Features};
use crate::type_ids::ConditionType;

/// Length of a fingerprint, which is always a SHA-256 digest.
pub const FINGERPRINT_LEN: usize = 32;

/// Fingerprint of a condition.
pub type Fingerprint = [u8; FINGERPRINT_LEN];

/// An immutable commitment to a predicate.
///
/// Compound condition types (prefix and threshold) carry the set of condition
/// types found below them, simple ones never do.  Two conditions are equal
/// iff every field is equal.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Condition {
    ty: ConditionType,
    fingerprint: Fingerprint,
    cost: u64,
    subtypes: Option<ConditionTypeSet>,
}

impl Condition {
    /// Creates a condition of a simple type.
    pub fn new_simple(
        ty: ConditionType,
        fingerprint: Fingerprint,
        cost: u64,
    ) -> ConditionResult<Self> {
        if ty.is_compound() {
            return Err(ConditionError::UnsupportedValue(format!(
                "{ty} conditions require subtypes"
            )));
        }
        Ok(Self {
            ty,
            fingerprint,
            cost,
            subtypes: None,
        })
    }

    /// Creates a condition of a compound type.
    pub fn new_compound(
        ty: ConditionType,
        fingerprint: Fingerprint,
        cost: u64,
        subtypes: ConditionTypeSet,
    ) -> ConditionResult<Self> {
        if !ty.is_compound() {
            return Err(ConditionError::UnsupportedValue(format!(
                "{ty} conditions have no subtypes"
            )));
        }
        Ok(Self {
            ty,
            fingerprint,
            cost,
            subtypes: Some(subtypes),
        })
    }

    /// Gets the condition type.
    pub fn condition_type(&self) -> ConditionType {
        self.ty
    }

    /// Gets the fingerprint.
    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// Gets the cost.
    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// Gets the subtypes, for compound conditions.
    pub fn subtypes(&self) -> Option<ConditionTypeSet> {
        self.subtypes
    }

    /// Set of types a verifier needs to handle this condition, including its
    /// own.
    pub fn type_set(&self) -> ConditionTypeSet {
        let mut set = self.subtypes.unwrap_or_default();
        set.insert(self.ty);
        set
    }

    /// Feature mask a verifier needs for this condition.
    pub fn features(&self) -> Features {
        self.type_set().features()
    }

    /// Encodes the condition into a new vec.
    pub fn to_vec(&self) -> ConditionResult<Vec<u8>> {
        Ok(encode_to_vec(self)?)
    }
}

impl Codec for Condition {
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        let mut frame = Frame::read(dec)?;
        let ty = ConditionType::try_from(frame.tag())
            .map_err(|_| CodecError::UnknownChoice(frame.tag()))?;

        let body = frame.body();
        let fingerprint = decode_explicit::<FixedOctets<FINGERPRINT_LEN>>(body, 0)?.into_inner();
        let cost = decode_explicit::<u64>(body, 1)?;
        let subtypes = if ty.is_compound() {
            let features = decode_explicit::<Features>(body, 2)?;
            Some(ConditionTypeSet::try_from(features)?)
        } else {
            None
        };

        frame.finish()?;
        Ok(Self {
            ty,
            fingerprint,
            cost,
            subtypes,
        })
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        let mut body = Vec::new();
        encode_explicit(&mut body, 0, &FixedOctets(self.fingerprint))?;
        encode_explicit(&mut body, 1, &self.cost)?;
        if let Some(subtypes) = self.subtypes {
            encode_explicit(&mut body, 2, &subtypes.features())?;
        }
        write_frame(enc, self.ty.as_u8(), &body)
    }
}
