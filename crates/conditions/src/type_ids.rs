//! Condition type identifiers and the static type registry.
//!
//! This module defines the [`ConditionType`] enum, whose ordinals are both the
//! wire discriminants of the condition and fulfillment choices and the
//! indices into the feature bitmask.  The ordinals are stable and must never
//! be reassigned.
//!
//! The registry is a fixed table built at compile time.  It is never mutated,
//! so it can be read from any number of threads without synchronization.

use core::fmt;
use std::str::FromStr;

use crate::errors::ConditionError;

/// Condition type identifiers.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConditionType {
    /// SHA-256 hash preimage.
    PreimageSha256 = 0,

    /// Prefixes the message and delegates to a sub-condition.
    PrefixSha256 = 1,

    /// M-of-N combination of sub-conditions.
    ThresholdSha256 = 2,

    /// RSASSA-PSS signature with SHA-256.
    RsaSha256 = 3,

    /// Ed25519 signature.
    Ed25519Sha256 = 4,
}

/// Static information about a condition type.
#[derive(Debug)]
pub struct TypeInfo {
    /// The type this entry describes.
    pub ty: ConditionType,

    /// Canonical name.
    pub name: &'static str,

    /// Whether conditions of this type carry a subtype set.
    pub compound: bool,
}

/// The registry, indexed by ordinal.
static REGISTRY: [TypeInfo; 5] = [
    TypeInfo {
        ty: ConditionType::PreimageSha256,
        name: "PREIMAGE-SHA-256",
        compound: false,
    },
    TypeInfo {
        ty: ConditionType::PrefixSha256,
        name: "PREFIX-SHA-256",
        compound: true,
    },
    TypeInfo {
        ty: ConditionType::ThresholdSha256,
        name: "THRESHOLD-SHA-256",
        compound: true,
    },
    TypeInfo {
        ty: ConditionType::RsaSha256,
        name: "RSA-SHA-256",
        compound: false,
    },
    TypeInfo {
        ty: ConditionType::Ed25519Sha256,
        name: "ED25519-SHA-256",
        compound: false,
    },
];

impl ConditionType {
    /// All condition types, in ordinal order.
    pub const ALL: [ConditionType; 5] = [
        ConditionType::PreimageSha256,
        ConditionType::PrefixSha256,
        ConditionType::ThresholdSha256,
        ConditionType::RsaSha256,
        ConditionType::Ed25519Sha256,
    ];

    /// Converts the enum to its underlying u8 value.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Looks up the registry entry for this type.
    pub fn info(self) -> &'static TypeInfo {
        &REGISTRY[self as usize]
    }

    /// Canonical name.
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Returns if conditions of this type carry subtypes.
    pub fn is_compound(self) -> bool {
        self.info().compound
    }
}

impl From<ConditionType> for u8 {
    fn from(ty: ConditionType) -> Self {
        ty as u8
    }
}

impl TryFrom<u8> for ConditionType {
    type Error = ConditionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ConditionType::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| ConditionError::UnsupportedValue(format!("condition type {value}")))
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConditionType {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        REGISTRY
            .iter()
            .find(|info| info.name.eq_ignore_ascii_case(s))
            .map(|info| info.ty)
            .ok_or_else(|| ConditionError::UnsupportedValue(format!("condition type name {s:?}")))
    }
}

#[cfg(test)]
mod test {
    use crate::ConditionType;

    #[test]
    fn test_roundtrip() {
        for (i, ty) in ConditionType::ALL.iter().enumerate() {
            assert_eq!(ty.as_u8() as usize, i);
            assert_eq!(ConditionType::try_from(i as u8).unwrap(), *ty);
            assert_eq!(ty.info().ty, *ty);
        }

        // Check an arbitrary invalid type ID
        assert!(ConditionType::try_from(5).is_err());
        assert!(ConditionType::try_from(255).is_err());
    }

    #[test]
    fn test_names() {
        for ty in ConditionType::ALL {
            assert_eq!(ty.to_string().parse::<ConditionType>().unwrap(), ty);
        }
        assert_eq!(
            "ed25519-sha-256".parse::<ConditionType>().unwrap(),
            ConditionType::Ed25519Sha256
        );
        assert!("SHA-512".parse::<ConditionType>().is_err());
    }

    #[test]
    fn test_compound_split() {
        assert!(ConditionType::PrefixSha256.is_compound());
        assert!(ConditionType::ThresholdSha256.is_compound());
        assert!(!ConditionType::PreimageSha256.is_compound());
        assert!(!ConditionType::RsaSha256.is_compound());
        assert!(!ConditionType::Ed25519Sha256.is_compound());
    }
}
