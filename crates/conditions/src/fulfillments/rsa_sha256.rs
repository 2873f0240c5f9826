//! RSA-PSS signature fulfillments.

use cryptocond_codec::{
    Codec, CodecError, Decoder, Encoder, decode_explicit, encode_explicit, impl_tagged_struct,
};

use super::{FulfillmentVariant, fingerprint_of, impl_variant_common};
use crate::condition::Condition;
use crate::errors::{ConditionError, ConditionResult};
use crate::type_ids::ConditionType;
use crate::verifier::SignatureVerifier;
use crate::verifiers::RsaPssVerifier;

/// Smallest accepted modulus, in bytes.
pub const RSA_MIN_MODULUS_LEN: usize = 128;

/// Largest accepted modulus, in bytes.
pub const RSA_MAX_MODULUS_LEN: usize = 512;

/// An RSA modulus and an RSASSA-PSS signature made with the matching key.
///
/// The public exponent is always 65537.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RsaSha256 {
    modulus: Vec<u8>,
    signature: Vec<u8>,
}

impl_tagged_struct! {
    /// What the fingerprint commits to.
    struct RsaFingerprintContents {
        modulus: Vec<u8> = 0,
    }
}

/// Checks the modulus and signature lengths.
fn check_lengths(modulus: &[u8], signature: &[u8]) -> Result<(), &'static str> {
    if !(RSA_MIN_MODULUS_LEN..=RSA_MAX_MODULUS_LEN).contains(&modulus.len()) {
        return Err("modulus length out of range");
    }
    if modulus[0] == 0 {
        return Err("modulus has leading zero octet");
    }
    if signature.len() != modulus.len() {
        return Err("signature length differs from modulus length");
    }
    Ok(())
}

impl RsaSha256 {
    /// Constructs a new instance, checking the lengths of the modulus and
    /// signature.
    pub fn new(modulus: Vec<u8>, signature: Vec<u8>) -> ConditionResult<Self> {
        check_lengths(&modulus, &signature)
            .map_err(|reason| ConditionError::UnsupportedValue(reason.to_owned()))?;
        Ok(Self { modulus, signature })
    }

    /// Gets the big-endian modulus.
    pub fn modulus(&self) -> &[u8] {
        &self.modulus
    }

    /// Gets the signature.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }
}

impl Codec for RsaSha256 {
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        let modulus = decode_explicit::<Vec<u8>>(dec, 0)?;
        let signature = decode_explicit::<Vec<u8>>(dec, 1)?;
        check_lengths(&modulus, &signature).map_err(CodecError::InvalidValue)?;
        Ok(Self { modulus, signature })
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        encode_explicit(enc, 0, &self.modulus)?;
        encode_explicit(enc, 1, &self.signature)
    }
}

impl_variant_common!(RsaSha256);

impl FulfillmentVariant for RsaSha256 {
    const TYPE: ConditionType = ConditionType::RsaSha256;

    fn derive_condition(&self) -> ConditionResult<Condition> {
        let fingerprint = fingerprint_of(&RsaFingerprintContents {
            modulus: self.modulus.clone(),
        })?;
        let len = self.modulus.len() as u64;
        Condition::new_simple(Self::TYPE, fingerprint, len * len)
    }

    fn verify_message(&self, message: &[u8]) -> ConditionResult<()> {
        RsaPssVerifier.verify(&self.modulus, message, &self.signature)
    }
}

#[cfg(test)]
mod tests {
    use cryptocond_codec::{decode_buf_exact, encode_to_vec};

    use super::*;
    use crate::test_utils::{assert_semantic_violation, rsa_fulfillment};

    #[test]
    fn test_derivation() {
        let f = rsa_fulfillment(b"msg");
        let cond = f.condition().unwrap();
        assert_eq!(f.modulus().len(), 128);
        assert_eq!(cond.cost(), 128 * 128);
        assert_eq!(cond.subtypes(), None);
    }

    #[test]
    fn test_verify_message() {
        let f = rsa_fulfillment(b"msg");
        assert!(f.verify_message(b"msg").is_ok());
        assert_semantic_violation(f.verify_message(b"other"));
    }

    #[test]
    fn test_length_checks() {
        let res = RsaSha256::new(vec![1; 127], vec![1; 127]);
        assert!(matches!(res, Err(ConditionError::UnsupportedValue(_))));

        let res = RsaSha256::new(vec![1; 513], vec![1; 513]);
        assert!(matches!(res, Err(ConditionError::UnsupportedValue(_))));

        let mut modulus = vec![1; 128];
        modulus[0] = 0;
        let res = RsaSha256::new(modulus, vec![1; 128]);
        assert!(matches!(res, Err(ConditionError::UnsupportedValue(_))));

        let res = RsaSha256::new(vec![1; 128], vec![1; 129]);
        assert!(matches!(res, Err(ConditionError::UnsupportedValue(_))));

        assert!(RsaSha256::new(vec![1; 512], vec![1; 512]).is_ok());
    }

    #[test]
    fn test_decode_checks_lengths() {
        let f = RsaSha256 {
            modulus: vec![1; 128],
            signature: vec![1; 100],
        };
        let buf = encode_to_vec(&f).unwrap();
        let res = decode_buf_exact::<RsaSha256>(&buf);
        assert!(matches!(res, Err(CodecError::InvalidValue(_))));

        let f = RsaSha256::new(vec![1; 128], vec![2; 128]).unwrap();
        let buf = encode_to_vec(&f).unwrap();
        assert_eq!(decode_buf_exact::<RsaSha256>(&buf).unwrap(), f);
    }
}
