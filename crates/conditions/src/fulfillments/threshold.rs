//! Threshold fulfillments.
//!
//! An M-of-N threshold commits to all N sub-conditions, but only needs M of
//! them revealed as fulfillments to validate.  The fingerprint hashes the
//! sub-conditions in sorted order, so it doesn't depend on which M are
//! revealed or on the order they're given in.

use cryptocond_codec::{
    Codec, CodecError, Decoder, Encoder, Frame, decode_explicit, encode_explicit, encode_to_vec,
    write_frame,
};
use tracing::{debug, trace};

use super::{FulfillmentVariant, impl_variant_common, sha256};
use crate::condition::{Condition, Fingerprint};
use crate::errors::{ConditionError, ConditionResult};
use crate::features::ConditionTypeSet;
use crate::fulfillment::SubElement;
use crate::type_ids::ConditionType;

/// Fixed cost added per required sub-fulfillment.
pub const THRESHOLD_OVERHEAD: u64 = 1024;

/// Tag of the sub-element sequence.
const SUBS_TAG: u8 = 1;

/// M-of-N combination of sub-elements.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ThresholdSha256 {
    threshold: u16,
    subs: Vec<SubElement>,
}

/// Checks `1 <= threshold <= subs <= u16::MAX`.
fn check_threshold(threshold: u16, subs: usize) -> Result<(), &'static str> {
    if threshold == 0 {
        return Err("threshold must be at least 1");
    }
    if subs > u16::MAX as usize {
        return Err("too many sub-elements");
    }
    if threshold as usize > subs {
        return Err("threshold exceeds number of sub-elements");
    }
    Ok(())
}

impl ThresholdSha256 {
    /// Constructs a new instance from sub-elements as given.
    pub fn new(threshold: u16, subs: Vec<SubElement>) -> ConditionResult<Self> {
        check_threshold(threshold, subs.len())
            .map_err(|reason| ConditionError::UnsupportedValue(reason.to_owned()))?;
        Ok(Self { threshold, subs })
    }

    /// Constructs a new instance from a pool of candidates, revealing the
    /// cheapest `threshold` fulfillments.
    ///
    /// Candidates are ordered by ascending cost, ties broken by their encoded
    /// condition.  The first `threshold` candidates carrying a fulfillment are
    /// kept as such, every other candidate is reduced to its condition.  The
    /// result keeps that order.
    pub fn select(threshold: u16, candidates: Vec<SubElement>) -> ConditionResult<Self> {
        check_threshold(threshold, candidates.len())
            .map_err(|reason| ConditionError::UnsupportedValue(reason.to_owned()))?;

        let mut keyed = candidates
            .into_iter()
            .map(|sub| -> ConditionResult<_> {
                let cond = sub.condition()?;
                let encoded = cond.to_vec()?;
                Ok((cond.cost(), encoded, cond, sub))
            })
            .collect::<ConditionResult<Vec<_>>>()?;
        keyed.sort_by(|a, b| (a.0, &a.1).cmp(&(b.0, &b.1)));

        let need = threshold as usize;
        let mut revealed = 0;
        let mut subs = Vec::with_capacity(keyed.len());
        for (_, _, cond, sub) in keyed {
            match sub {
                SubElement::Fulfilled(f) if revealed < need => {
                    revealed += 1;
                    subs.push(SubElement::Fulfilled(f));
                }
                _ => subs.push(SubElement::Unfulfilled(cond)),
            }
        }

        if revealed < need {
            debug!(have = revealed, need, "not enough fulfillments to select");
            return Err(ConditionError::InsufficientFulfillments {
                have: revealed,
                need,
            });
        }

        debug!(threshold, total = subs.len(), "selected threshold sub-fulfillments");
        Ok(Self { threshold, subs })
    }

    /// Gets the threshold.
    pub fn threshold(&self) -> u16 {
        self.threshold
    }

    /// Gets the sub-elements, in the order given.
    pub fn subs(&self) -> &[SubElement] {
        &self.subs
    }

    /// Number of sub-elements carrying a fulfillment.
    pub fn fulfilled_count(&self) -> usize {
        self.subs.iter().filter(|s| s.is_fulfilled()).count()
    }

    /// Derives the conditions of every sub-element.
    pub fn sub_conditions(&self) -> ConditionResult<Vec<Condition>> {
        self.subs.iter().map(SubElement::condition).collect()
    }

    /// Decodes the fields, with the threshold itself sitting `depth` levels
    /// below the outermost fulfillment.
    pub(crate) fn decode_nested(dec: &mut impl Decoder, depth: usize) -> Result<Self, CodecError> {
        let threshold = decode_explicit::<u16>(dec, 0)?;

        let mut seq = Frame::read(dec)?;
        seq.expect_tag(SUBS_TAG)?;
        let mut subs = Vec::new();
        while seq.has_remaining() {
            subs.push(SubElement::decode_nested(seq.body(), depth)?);
        }
        seq.finish()?;

        check_threshold(threshold, subs.len()).map_err(CodecError::InvalidValue)?;
        Ok(Self { threshold, subs })
    }

    /// Hashes the threshold and the sorted encodings of `subs`.
    fn fingerprint_over(&self, subs: &[Condition]) -> ConditionResult<Fingerprint> {
        let internal = |source: CodecError| ConditionError::Internal {
            context: "encoding threshold fingerprint contents",
            source,
        };

        let mut encoded = subs
            .iter()
            .map(|c| encode_to_vec(c).map_err(internal))
            .collect::<ConditionResult<Vec<_>>>()?;
        encoded.sort();

        let mut contents = Vec::new();
        encode_explicit(&mut contents, 0, &self.threshold).map_err(internal)?;
        write_frame(&mut contents, SUBS_TAG, &encoded.concat()).map_err(internal)?;
        Ok(sha256(&contents))
    }

    /// Sums the overhead and the `threshold` cheapest costs in `subs`.
    fn cost_over(&self, subs: &[Condition]) -> ConditionResult<u64> {
        let mut costs = subs.iter().map(Condition::cost).collect::<Vec<_>>();
        costs.sort_unstable();

        let overflow = || ConditionError::UnsupportedValue("threshold cost overflows".to_owned());
        let overhead = THRESHOLD_OVERHEAD
            .checked_mul(self.threshold as u64)
            .ok_or_else(overflow)?;
        costs
            .into_iter()
            .take(self.threshold as usize)
            .try_fold(overhead, u64::checked_add)
            .ok_or_else(overflow)
    }
}

impl Codec for ThresholdSha256 {
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        Self::decode_nested(dec, 0)
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        encode_explicit(enc, 0, &self.threshold)?;
        let mut seq = Vec::new();
        for sub in &self.subs {
            sub.encode(&mut seq)?;
        }
        write_frame(enc, SUBS_TAG, &seq)
    }
}

impl_variant_common!(ThresholdSha256);

impl FulfillmentVariant for ThresholdSha256 {
    const TYPE: ConditionType = ConditionType::ThresholdSha256;

    fn derive_condition(&self) -> ConditionResult<Condition> {
        let subs = self.sub_conditions()?;
        let fingerprint = self.fingerprint_over(&subs)?;
        let cost = self.cost_over(&subs)?;

        let mut subtypes = ConditionTypeSet::new();
        for cond in &subs {
            subtypes.extend(cond.type_set());
        }
        Condition::new_compound(Self::TYPE, fingerprint, cost, subtypes)
    }

    fn verify_message(&self, message: &[u8]) -> ConditionResult<()> {
        let have = self.fulfilled_count();
        let need = self.threshold as usize;
        if have < need {
            debug!(have, need, "threshold not met");
            return Err(ConditionError::InsufficientFulfillments { have, need });
        }

        for (i, sub) in self.subs.iter().enumerate() {
            if let SubElement::Fulfilled(f) = sub {
                trace!(
                    index = i,
                    sub_type = %f.condition_type(),
                    "validating threshold sub-fulfillment"
                );
                f.verify_message(message)
                    .map_err(|e| e.context(format!("threshold sub-fulfillment {i}")))?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use cryptocond_codec::decode_buf_exact;

    use super::*;
    use crate::fulfillment::Fulfillment;
    use crate::test_utils::{ed25519_fulfillment, ed25519_signing_key, preimage};

    fn pool() -> Vec<SubElement> {
        vec![
            preimage(b"one").into(),
            preimage(b"two!").into(),
            preimage(b"three").into(),
        ]
    }

    fn unfulfilled(sub: &SubElement) -> SubElement {
        SubElement::Unfulfilled(sub.condition().unwrap())
    }

    #[test]
    fn test_fingerprint_independent_of_revealed_subset() {
        let subs = pool();
        let reveal = |keep: [usize; 2]| {
            let subs = subs
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    if keep.contains(&i) {
                        s.clone()
                    } else {
                        unfulfilled(s)
                    }
                })
                .collect();
            ThresholdSha256::new(2, subs).unwrap().condition().unwrap()
        };

        let a = reveal([0, 1]);
        let b = reveal([0, 2]);
        let c = reveal([1, 2]);
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_fingerprint_independent_of_order() {
        let mut subs = pool();
        let a = ThresholdSha256::new(2, subs.clone()).unwrap();
        subs.reverse();
        let b = ThresholdSha256::new(2, subs).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.condition().unwrap(), b.condition().unwrap());
    }

    #[test]
    fn test_threshold_in_fingerprint() {
        let a = ThresholdSha256::new(1, pool()).unwrap();
        let b = ThresholdSha256::new(2, pool()).unwrap();
        assert_ne!(
            a.condition().unwrap().fingerprint(),
            b.condition().unwrap().fingerprint()
        );
    }

    #[test]
    fn test_cost_uses_cheapest() {
        // Costs are 3, 4 and 5.
        let f = ThresholdSha256::new(2, pool()).unwrap();
        assert_eq!(f.condition().unwrap().cost(), 3 + 4 + 2 * THRESHOLD_OVERHEAD);

        let f = ThresholdSha256::new(3, pool()).unwrap();
        assert_eq!(f.condition().unwrap().cost(), 3 + 4 + 5 + 3 * THRESHOLD_OVERHEAD);
    }

    #[test]
    fn test_subtypes_union() {
        let sig = ed25519_fulfillment(&ed25519_signing_key(), b"msg");
        let subs = vec![
            preimage(b"a").into(),
            SubElement::Unfulfilled(sig.condition().unwrap()),
        ];
        let cond = ThresholdSha256::new(1, subs).unwrap().condition().unwrap();
        let subtypes = cond.subtypes().unwrap();
        assert!(subtypes.contains(ConditionType::PreimageSha256));
        assert!(subtypes.contains(ConditionType::Ed25519Sha256));
        assert!(!subtypes.contains(ConditionType::ThresholdSha256));
    }

    #[test]
    fn test_insufficient() {
        let subs = pool();
        let subs = vec![subs[0].clone(), unfulfilled(&subs[1]), unfulfilled(&subs[2])];
        let f = ThresholdSha256::new(2, subs).unwrap();
        let res = f.verify_message(b"");
        assert!(matches!(
            res,
            Err(ConditionError::InsufficientFulfillments { have: 1, need: 2 })
        ));
    }

    #[test]
    fn test_extra_fulfillments_accepted() {
        let f = ThresholdSha256::new(1, pool()).unwrap();
        assert_eq!(f.fulfilled_count(), 3);
        assert!(f.verify_message(b"anything").is_ok());
    }

    #[test]
    fn test_failing_sub_rejects() {
        let sk = ed25519_signing_key();
        let subs = vec![
            preimage(b"a").into(),
            Fulfillment::from(ed25519_fulfillment(&sk, b"signed")).into(),
        ];
        let f = ThresholdSha256::new(1, subs).unwrap();
        assert!(f.verify_message(b"signed").is_ok());

        let err = f.verify_message(b"unsigned").unwrap_err();
        assert!(matches!(err.root(), ConditionError::SignatureInvalid { .. }));
    }

    #[test]
    fn test_bounds() {
        assert!(ThresholdSha256::new(0, pool()).is_err());
        assert!(ThresholdSha256::new(4, pool()).is_err());
        assert!(ThresholdSha256::new(3, pool()).is_ok());
    }

    #[test]
    fn test_decode_checks_bounds() {
        let f = ThresholdSha256 {
            threshold: 4,
            subs: pool(),
        };
        let buf = encode_to_vec(&f).unwrap();
        let res = decode_buf_exact::<ThresholdSha256>(&buf);
        assert!(matches!(res, Err(CodecError::InvalidValue(_))));

        let f = ThresholdSha256::new(2, pool()).unwrap();
        let buf = encode_to_vec(&f).unwrap();
        assert_eq!(decode_buf_exact::<ThresholdSha256>(&buf).unwrap(), f);
    }

    /// Nests `levels` 1-of-1 thresholds around a preimage.
    fn threshold_chain(levels: usize) -> Fulfillment {
        (0..levels).fold(preimage(b"leaf"), |inner, _| {
            ThresholdSha256::new(1, vec![inner.into()]).unwrap().into()
        })
    }

    #[test]
    fn test_deep_chain_derives() {
        let f = threshold_chain(64);
        let cond = f.condition().unwrap();
        assert_eq!(cond.cost(), 4 + 64 * THRESHOLD_OVERHEAD);
        assert!(f.validate(&cond, b"").is_ok());

        let buf = f.to_vec().unwrap();
        assert_eq!(decode_buf_exact::<Fulfillment>(&buf).unwrap(), f);
    }

    #[test]
    fn test_wide_threshold() {
        let subs = (0..1000u32)
            .map(|i| SubElement::from(preimage(&i.to_be_bytes())))
            .collect::<Vec<_>>();
        let f = Fulfillment::from(ThresholdSha256::new(500, subs).unwrap());

        let cond = f.condition().unwrap();
        assert_eq!(cond.cost(), 500 * (4 + THRESHOLD_OVERHEAD));

        let decoded = decode_buf_exact::<Fulfillment>(&f.to_vec().unwrap()).unwrap();
        assert_eq!(decoded.condition().unwrap(), cond);
        assert!(decoded.validate(&cond, b"msg").is_ok());
    }

    #[test]
    fn test_select_cheapest() {
        let mut candidates = pool();
        candidates.reverse();
        let f = ThresholdSha256::select(2, candidates).unwrap();

        let revealed = f
            .subs()
            .iter()
            .filter_map(SubElement::fulfillment)
            .cloned()
            .collect::<Vec<_>>();
        assert_eq!(revealed, vec![preimage(b"one"), preimage(b"two!")]);

        let costs = f
            .sub_conditions()
            .unwrap()
            .iter()
            .map(Condition::cost)
            .collect::<Vec<_>>();
        assert_eq!(costs, vec![3, 4, 5]);

        // Same commitment as when built directly.
        let direct = ThresholdSha256::new(2, pool()).unwrap();
        assert_eq!(f.condition().unwrap(), direct.condition().unwrap());
    }

    #[test]
    fn test_select_skips_bare_conditions() {
        let subs = pool();
        let candidates = vec![unfulfilled(&subs[0]), subs[1].clone(), subs[2].clone()];
        let f = ThresholdSha256::select(2, candidates).unwrap();
        assert_eq!(f.fulfilled_count(), 2);
        assert!(!f.subs()[0].is_fulfilled());
        assert!(f.verify_message(b"").is_ok());
    }

    #[test]
    fn test_select_tie_break_is_deterministic() {
        let a = preimage(b"aaa");
        let b = preimage(b"bbb");
        let first = ThresholdSha256::select(1, vec![a.clone().into(), b.clone().into()]).unwrap();
        let second = ThresholdSha256::select(1, vec![b.into(), a.into()]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_select_insufficient() {
        let subs = pool();
        let candidates = vec![subs[0].clone(), unfulfilled(&subs[1]), unfulfilled(&subs[2])];
        let res = ThresholdSha256::select(2, candidates);
        assert!(matches!(
            res,
            Err(ConditionError::InsufficientFulfillments { have: 1, need: 2 })
        ));
    }
}
