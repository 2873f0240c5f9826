//! DER-style length indicators.
//!
//! Permitted layouts, always big-endian and always of minimal width:
//!
//! ```txt
//! 0bbbbbbb                                    (0 ..= 127)
//! 10000001 bbbbbbbb                           (128 ..= 255)
//! 10000010 bbbbbbbb bbbbbbbb                  (256 ..= 65535)
//! 10000011 bbbbbbbb bbbbbbbb bbbbbbbb         (65536 ..= 16777215)
//! ```

use crate::errors::CodecError;
use crate::types::{Codec, Decoder, Encoder};

/// The largest length we can represent, which fits in three length octets.
pub const MAX_LENGTH: usize = 0xff_ffff;

/// Max number of octets following a long-form length-of-length octet.
const MAX_LENGTH_OCTETS: u8 = 3;

/// Bit marking the long form.
const LONG_FORM: u8 = 0x80;

/// A length indicator, as prefixed to octet strings and tagged values.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct LengthIndicator(usize);

impl LengthIndicator {
    /// Constructs a new instance, if the length is representable.
    pub fn new(len: usize) -> Option<Self> {
        if len > MAX_LENGTH {
            return None;
        }
        Some(Self(len))
    }

    /// Converts to inner value.
    pub fn inner(self) -> usize {
        self.0
    }

    /// Number of octets needed after the first octet.
    fn long_octets(&self) -> u8 {
        if self.0 < 0x80 {
            0
        } else if self.0 <= 0xff {
            1
        } else if self.0 <= 0xffff {
            2
        } else {
            3
        }
    }

    /// Convenience function for returning the encoded length in bytes.
    pub fn byte_len(&self) -> usize {
        1 + self.long_octets() as usize
    }
}

impl Codec for LengthIndicator {
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        let first = u8::decode(dec)?;
        if first & LONG_FORM == 0 {
            return Ok(Self(first as usize));
        }

        let n = first & !LONG_FORM;
        if n == 0 {
            return Err(CodecError::NonCanonical("bare long-form length octet"));
        }
        if n > MAX_LENGTH_OCTETS {
            return Err(CodecError::LengthOfLengthTooLarge(n));
        }

        let mut bytes = [0u8; 4];
        dec.read_buf(&mut bytes[4 - n as usize..])?;
        if bytes[4 - n as usize] == 0 {
            return Err(CodecError::NonCanonical("leading zero length octet"));
        }

        let len = u32::from_be_bytes(bytes) as usize;
        if len < 0x80 {
            return Err(CodecError::NonCanonical("long form for short length"));
        }

        Ok(Self(len))
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        // Constructors already bound this, but the inner value is reachable
        // through `write_length`.
        if self.0 > MAX_LENGTH {
            return Err(CodecError::LengthTooLarge(self.0));
        }

        let n = self.long_octets();
        if n == 0 {
            return (self.0 as u8).encode(enc);
        }

        let bytes = (self.0 as u32).to_be_bytes();
        enc.write_buf(&[LONG_FORM | n])?;
        enc.write_buf(&bytes[4 - n as usize..])
    }
}

/// Writes a length indicator, failing if the length is too large.
pub fn write_length(enc: &mut impl Encoder, len: usize) -> Result<(), CodecError> {
    LengthIndicator(len).encode(enc)
}

/// Reads a length indicator.
pub fn read_length(dec: &mut impl Decoder) -> Result<usize, CodecError> {
    LengthIndicator::decode(dec).map(LengthIndicator::inner)
}
