//! Hash preimage fulfillments.

use cryptocond_codec::{MAX_LENGTH, impl_tagged_struct};

use super::{FulfillmentVariant, impl_variant_common, sha256};
use crate::condition::Condition;
use crate::errors::{ConditionError, ConditionResult};
use crate::type_ids::ConditionType;

impl_tagged_struct! {
    /// Reveals a secret whose SHA-256 digest is the fingerprint.
    ///
    /// The message is ignored when validating.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub struct PreimageSha256 {
        preimage: Vec<u8> = 0,
    }
}

impl PreimageSha256 {
    /// Constructs a new instance, if the preimage is short enough to encode.
    pub fn new(preimage: Vec<u8>) -> ConditionResult<Self> {
        if preimage.len() > MAX_LENGTH {
            return Err(ConditionError::UnsupportedValue(format!(
                "preimage of {} bytes",
                preimage.len()
            )));
        }
        Ok(Self { preimage })
    }

    /// Gets the preimage.
    pub fn preimage(&self) -> &[u8] {
        &self.preimage
    }
}

impl_variant_common!(PreimageSha256);

impl FulfillmentVariant for PreimageSha256 {
    const TYPE: ConditionType = ConditionType::PreimageSha256;

    fn derive_condition(&self) -> ConditionResult<Condition> {
        Condition::new_simple(Self::TYPE, sha256(&self.preimage), self.preimage.len() as u64)
    }

    fn verify_message(&self, _message: &[u8]) -> ConditionResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use cryptocond_codec::{decode_buf_exact, encode_to_vec};

    use super::*;

    #[test]
    fn test_derivation() {
        let f = PreimageSha256::new(b"hello".to_vec()).unwrap();
        let cond = f.condition().unwrap();

        assert_eq!(cond.condition_type(), ConditionType::PreimageSha256);
        assert_eq!(cond.cost(), 5);
        assert_eq!(cond.subtypes(), None);
        assert_eq!(cond.fingerprint(), &sha256(b"hello"));
        assert_eq!(cond, f.condition().unwrap());
    }

    #[test]
    fn test_empty_preimage() {
        let f = PreimageSha256::new(Vec::new()).unwrap();
        assert_eq!(f.condition().unwrap().cost(), 0);
        assert_eq!(encode_to_vec(&f).unwrap(), [0xa0, 0x01, 0x00]);
    }

    #[test]
    fn test_body_layout() {
        let f = PreimageSha256::new(b"abc".to_vec()).unwrap();
        let buf = encode_to_vec(&f).unwrap();
        assert_eq!(buf, [0xa0, 0x04, 0x03, b'a', b'b', b'c']);
        assert_eq!(decode_buf_exact::<PreimageSha256>(&buf).unwrap(), f);
    }

    #[test]
    fn test_too_long() {
        let res = PreimageSha256::new(vec![0; MAX_LENGTH + 1]);
        assert!(matches!(res, Err(ConditionError::UnsupportedValue(_))));
    }
}
