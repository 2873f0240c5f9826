use arbitrary::{Arbitrary, Unstructured};

use crate::{Condition, ConditionType, ConditionTypeSet};

impl<'a> Arbitrary<'a> for ConditionType {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(*u.choose(&ConditionType::ALL)?)
    }
}

impl<'a> Arbitrary<'a> for ConditionTypeSet {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let mut set = ConditionTypeSet::new();
        for ty in ConditionType::ALL {
            if bool::arbitrary(u)? {
                set.insert(ty);
            }
        }
        Ok(set)
    }
}

impl<'a> Arbitrary<'a> for Condition {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let ty = ConditionType::arbitrary(u)?;
        let fingerprint = <[u8; 32]>::arbitrary(u)?;
        let cost = u64::arbitrary(u)?;
        let cond = if ty.is_compound() {
            let subtypes = ConditionTypeSet::arbitrary(u)?;
            Condition::new_compound(ty, fingerprint, cost, subtypes)
        } else {
            Condition::new_simple(ty, fingerprint, cost)
        };
        cond.map_err(|_| arbitrary::Error::IncorrectFormat)
    }
}
