//! Validation configuration.

use crate::condition::Condition;
use crate::errors::{ConditionError, ConditionResult};
use crate::fulfillment::Fulfillment;

/// Config for validating fulfillments.
#[derive(Clone, Debug, Default)]
pub struct ValidateConfig {
    max_cost: Option<u64>,
}

impl ValidateConfig {
    /// Constructs a new instance with no limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects conditions whose cost is above `max_cost`.
    pub fn with_max_cost(mut self, max_cost: u64) -> Self {
        self.max_cost = Some(max_cost);
        self
    }

    /// Gets the configured cost limit, if any.
    pub fn max_cost(&self) -> Option<u64> {
        self.max_cost
    }

    /// Validates a fulfillment against a condition and message under this
    /// config.
    pub fn validate(
        &self,
        fulfillment: &Fulfillment,
        condition: &Condition,
        message: &[u8],
    ) -> ConditionResult<()> {
        fulfillment.validate_with(self, condition, message)
    }

    /// Checks a target condition against the configured limits.
    pub(crate) fn check_condition(&self, condition: &Condition) -> ConditionResult<()> {
        match self.max_cost {
            Some(max) if condition.cost() > max => Err(ConditionError::CostExceeded {
                cost: condition.cost(),
                max,
            }),
            _ => Ok(()),
        }
    }
}
