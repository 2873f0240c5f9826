use thiserror::Error;

/// Errors from cryptocond-codec.
#[derive(Debug, Error)]
pub enum CodecError {
    /// If we tried to read past the end of the underlying buffer.
    #[error("would overrun end of input")]
    OverrunInput,

    /// If there was extra data in a buffer than we didn't consume reading a
    /// message.
    #[error("extra unnecessary input leftover")]
    ExtraInput,

    /// Tried to write a length that doesn't fit in three length octets.
    #[error("length {0} exceeds the supported maximum")]
    LengthTooLarge(usize),

    /// Length indicator declared more length octets than we support.
    #[error("length-of-length {0} not supported (max 3 octets)")]
    LengthOfLengthTooLarge(u8),

    /// An encoding that has a shorter form that should have been used.
    #[error("noncanonical encoding: {0}")]
    NonCanonical(&'static str),

    /// Read a context tag other than the one expected at this position.
    #[error("unexpected tag (expected {expected}, found {found})")]
    UnexpectedTag {
        /// Tag number the decoder wanted.
        expected: u8,
        /// Tag number present in the input.
        found: u8,
    },

    /// Tag of a choice didn't correspond to any known alternative.
    #[error("unknown choice alternative {0}")]
    UnknownChoice(u8),

    /// Identifier octet was not a context-specific constructed tag.
    #[error("invalid tag octet {0:#04x}")]
    InvalidTag(u8),

    /// Fixed-size field had the wrong length.
    #[error("invalid length (expected {expected}, found {found})")]
    InvalidLength {
        /// Length required by the field.
        expected: usize,
        /// Length present in the input.
        found: usize,
    },

    /// Value does not fit the range supported by the field.
    #[error("value {0} out of range")]
    ValueOutOfRange(u64),

    /// Feature mask contained bits we don't know about.
    #[error("unknown feature bits encountered: {0:#x}")]
    UnknownFeatureBits(u32),

    /// Values nested deeper than the decoder allows.
    #[error("nesting deeper than {0} levels")]
    DepthLimitExceeded(usize),

    /// Structurally valid but semantically unacceptable value.
    #[error("invalid value: {0}")]
    InvalidValue(&'static str),

    /// Underlying reader or writer failed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
