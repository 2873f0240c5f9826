//! Error types for condition and fulfillment handling.
//!
//! Every failure is reported through [`ConditionError`].  Callers that only
//! care about the broad category of a failure (malformed input versus a
//! fulfillment that simply doesn't satisfy a condition, say) can use
//! [`ConditionError::kind`], which looks through any added context.
use cryptocond_codec::CodecError;
use thiserror::Error;

use crate::type_ids::ConditionType;

/// Broad classification of a [`ConditionError`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Malformed or non-canonical bytes, or a value that can't be written.
    Encoding,
    /// A decoded value isn't the condition type the caller asked for.
    TypeMismatch,
    /// A fulfillment's own condition differs from the one supplied.
    ValidationMismatch,
    /// A well-formed fulfillment that does not satisfy its predicate.
    SemanticViolation,
    /// Values or feature bits outside what we support.
    UnsupportedValue,
    /// An internal invariant was broken.  Not caused by user input.
    Internal,
}

/// Errors that can occur when working with conditions and fulfillments.
#[derive(Debug, Error)]
pub enum ConditionError {
    // === Encoding Errors ===
    /// Encoding or decoding failed.
    #[error("encoding: {0}")]
    Encoding(#[from] CodecError),

    /// Value decoded fine but is of a different condition type.
    #[error("type mismatch (expected {expected}, found {found})")]
    TypeMismatch {
        /// The type the caller expected.
        expected: ConditionType,
        /// The type actually present.
        found: ConditionType,
    },

    // === Validation Errors ===
    /// The fulfillment does not match the given condition.
    #[error("the fulfillment does not match the given condition ({0})")]
    FulfillmentMismatch(ConditionType),

    /// Message is longer than a prefix fulfillment allows.
    #[error("message length of {len} exceeds limit of {max}")]
    MessageTooLong {
        /// Length of the message.
        len: usize,
        /// Declared maximum message length.
        max: u32,
    },

    /// Not enough sub-fulfillments revealed to meet a threshold.
    #[error("threshold of {need} not met, only {have} sub-fulfillments")]
    InsufficientFulfillments {
        /// Number of sub-fulfillments present.
        have: usize,
        /// Number required.
        need: usize,
    },

    /// Compound fulfillment carries only a sub-condition.
    #[error("cannot validate unfulfilled {0} fulfillment")]
    Unfulfilled(ConditionType),

    /// Public key could not be parsed or isn't usable.
    #[error("invalid public key for {ty}: {reason}")]
    PublicKeyInvalid {
        /// The signature scheme the key is for.
        ty: ConditionType,
        /// The reason for the failure.
        reason: String,
    },

    /// Signature verification failed.
    #[error("signature verification failed for {ty}: {reason}")]
    SignatureInvalid {
        /// The signature scheme that failed.
        ty: ConditionType,
        /// The reason for the failure.
        reason: String,
    },

    /// Condition cost above the configured limit.
    #[error("condition cost {cost} exceeds limit of {max}")]
    CostExceeded {
        /// Cost of the condition.
        cost: u64,
        /// Configured maximum.
        max: u64,
    },

    // === Domain Errors ===
    /// Value outside the supported domain.
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    /// An internal invariant failed, such as a value that passed construction
    /// checks failing to encode.
    #[error("internal error while {context}: {source}")]
    Internal {
        /// What we were doing.
        context: &'static str,
        /// The underlying failure.
        source: CodecError,
    },

    /// Wraps another error with a description of what was being done.
    #[error("{context}: {source}")]
    Context {
        /// What we were doing.
        context: String,
        /// The underlying failure.
        source: Box<ConditionError>,
    },
}

impl ConditionError {
    /// Wraps this error with some context.
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, looking through any context wrappers.
    pub fn root(&self) -> &ConditionError {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Context { source, .. } => source.kind(),
            Self::Encoding(CodecError::UnknownFeatureBits(_)) => ErrorKind::UnsupportedValue,
            Self::Encoding(_) => ErrorKind::Encoding,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::FulfillmentMismatch(_) => ErrorKind::ValidationMismatch,
            Self::MessageTooLong { .. }
            | Self::InsufficientFulfillments { .. }
            | Self::Unfulfilled(_)
            | Self::PublicKeyInvalid { .. }
            | Self::SignatureInvalid { .. }
            | Self::CostExceeded { .. } => ErrorKind::SemanticViolation,
            Self::UnsupportedValue(_) => ErrorKind::UnsupportedValue,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }
}

/// Result type alias for condition operations.
pub type ConditionResult<T> = std::result::Result<T, ConditionError>;
