//! Feature masks and condition type sets.
//!
//! A [`Features`] mask describes the primitives a verifier needs.  Bit 0 is
//! SHA-256 and bit `ordinal + 1` is each condition type.  On the wire it's a
//! [`VarUInt`] restricted to a single octet.

use cryptocond_codec::{Codec, CodecError, Decoder, Encoder, VarUInt};

use crate::type_ids::ConditionType;

/// Bit for SHA-256, which every known condition type uses.
const SHA256_BIT: u8 = 0x01;

/// Bits that map to a known condition type or SHA-256.
const KNOWN_BITS: u8 = 0x3f;

/// Raw 8-bit feature mask.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Features(u8);

impl Features {
    /// Constructs a mask from raw bits.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns if the SHA-256 bit is set.
    pub fn has_sha256(self) -> bool {
        self.0 & SHA256_BIT != 0
    }

    /// Returns if a condition type's bit is set.
    pub fn has_type(self, ty: ConditionType) -> bool {
        self.0 & type_bit(ty) != 0
    }

    /// Returns if only bits we know about are set.
    pub fn is_known(self) -> bool {
        self.0 & !KNOWN_BITS == 0
    }
}

impl Codec for Features {
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        let mask = VarUInt::decode(dec)?.inner();
        let bits = u8::try_from(mask).map_err(|_| CodecError::UnknownFeatureBits(mask))?;
        Ok(Self(bits))
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        // Always in range for a single octet.
        VarUInt::new(self.0 as u32)
            .ok_or(CodecError::ValueOutOfRange(self.0 as u64))?
            .encode(enc)
    }
}

fn type_bit(ty: ConditionType) -> u8 {
    1 << (ty.as_u8() + 1)
}

/// Set of condition types, as collected over a condition subtree.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct ConditionTypeSet(u8);

impl ConditionTypeSet {
    /// Empty set.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Adds a type to the set.
    pub fn insert(&mut self, ty: ConditionType) {
        self.0 |= 1 << ty.as_u8();
    }

    /// Adds every type from another set.
    pub fn extend(&mut self, other: ConditionTypeSet) {
        self.0 |= other.0;
    }

    /// Returns if the type is in the set.
    pub fn contains(&self, ty: ConditionType) -> bool {
        self.0 & (1 << ty.as_u8()) != 0
    }

    /// Returns if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of types in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates over the types in the set, in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = ConditionType> + '_ {
        ConditionType::ALL
            .into_iter()
            .filter(move |ty| self.contains(*ty))
    }

    /// Feature mask a verifier needs for these types.
    pub fn features(&self) -> Features {
        let bits = self.iter().fold(SHA256_BIT, |acc, ty| acc | type_bit(ty));
        Features(bits)
    }
}

impl FromIterator<ConditionType> for ConditionTypeSet {
    fn from_iter<I: IntoIterator<Item = ConditionType>>(iter: I) -> Self {
        let mut set = Self::new();
        for ty in iter {
            set.insert(ty);
        }
        set
    }
}

impl TryFrom<Features> for ConditionTypeSet {
    type Error = CodecError;

    fn try_from(features: Features) -> Result<Self, Self::Error> {
        if !features.is_known() {
            return Err(CodecError::UnknownFeatureBits(features.bits() as u32));
        }
        if !features.has_sha256() {
            return Err(CodecError::NonCanonical("feature mask without SHA-256"));
        }
        Ok(ConditionType::ALL
            .into_iter()
            .filter(|ty| features.has_type(*ty))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use cryptocond_codec::{decode_buf_exact, encode_to_vec};

    use super::*;

    #[test]
    fn test_mask_boundary() {
        let buf = encode_to_vec(&Features::from_bits(255)).unwrap();
        assert_eq!(buf, [0x01, 0xff]);
        assert_eq!(decode_buf_exact::<Features>(&buf).unwrap().bits(), 255);

        // 256 is a valid varuint but not a valid mask.
        let res = decode_buf_exact::<Features>(&[0x02, 0x01, 0x00]);
        assert!(matches!(res, Err(CodecError::UnknownFeatureBits(256))));
    }

    #[test]
    fn test_type_set_features() {
        let set: ConditionTypeSet = [ConditionType::PreimageSha256, ConditionType::Ed25519Sha256]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);

        let features = set.features();
        assert_eq!(features.bits(), 0b10_0011);
        assert!(features.has_sha256());
        assert!(features.has_type(ConditionType::Ed25519Sha256));
        assert!(!features.has_type(ConditionType::RsaSha256));

        assert_eq!(ConditionTypeSet::try_from(features).unwrap(), set);
    }

    #[test]
    fn test_type_set_monotonic() {
        let mut set = ConditionTypeSet::new();
        assert!(set.is_empty());
        for ty in ConditionType::ALL {
            let before = set;
            set.insert(ty);
            assert!(before.iter().all(|t| set.contains(t)));
            assert!(set.contains(ty));
        }
        assert_eq!(set.len(), 5);

        let mut other = ConditionTypeSet::new();
        other.insert(ConditionType::PrefixSha256);
        other.extend(set);
        assert_eq!(other, set);
    }

    #[test]
    fn test_type_set_rejects_unknown_bits() {
        let res = ConditionTypeSet::try_from(Features::from_bits(0xff));
        assert!(matches!(res, Err(CodecError::UnknownFeatureBits(0xff))));

        let res = ConditionTypeSet::try_from(Features::from_bits(0b10));
        assert!(matches!(res, Err(CodecError::NonCanonical(_))));
    }
}
