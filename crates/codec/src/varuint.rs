//! Bounded unsigned integers prefixed with a length indicator.
//!
//! The value is written as the minimal number of big-endian octets (1 to 3),
//! preceded by a short-form length indicator giving that count.
//!
//! ```txt
//! 00000001 bbbbbbbb
//! 00000010 bbbbbbbb bbbbbbbb
//! 00000011 bbbbbbbb bbbbbbbb bbbbbbbb
//! ```

use crate::errors::CodecError;
use crate::length::read_length;
use crate::types::{Codec, Decoder, Encoder};

/// The max value one of these can have.
pub const VARUINT_MAX: u32 = 0xff_ffff;

/// Bounded unsigned integer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VarUInt(u32);

impl VarUInt {
    /// Construct a new instance.
    pub fn new(v: u32) -> Option<Self> {
        if v > VARUINT_MAX {
            return None;
        }
        Some(Self(v))
    }

    /// Converts to inner value.
    pub fn inner(self) -> u32 {
        self.0
    }

    /// Number of value octets, not counting the length prefix.
    pub fn width(&self) -> usize {
        if self.0 <= 0xff {
            1
        } else if self.0 <= 0xffff {
            2
        } else {
            3
        }
    }
}

impl Codec for VarUInt {
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        let width = read_length(dec)?;
        if width == 0 {
            return Err(CodecError::InvalidValue("zero-width varuint"));
        }
        if width > 3 {
            return Err(CodecError::ValueOutOfRange(width as u64));
        }

        let mut bytes = [0u8; 4];
        dec.read_buf(&mut bytes[4 - width..])?;
        if width > 1 && bytes[4 - width] == 0 {
            return Err(CodecError::NonCanonical("leading zero varuint octet"));
        }

        Ok(Self(u32::from_be_bytes(bytes)))
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        if self.0 > VARUINT_MAX {
            return Err(CodecError::ValueOutOfRange(self.0 as u64));
        }

        let width = self.width();
        let bytes = self.0.to_be_bytes();
        enc.write_buf(&[width as u8])?;
        enc.write_buf(&bytes[4 - width..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode_buf_exact, encode_to_vec};

    #[test]
    fn test_varuint_new() {
        assert!(VarUInt::new(0).is_some());
        assert!(VarUInt::new(VARUINT_MAX).is_some());
        assert!(VarUInt::new(VARUINT_MAX + 1).is_none());
    }

    #[test]
    fn test_varuint_layouts() {
        let cases: [(u32, &[u8]); 5] = [
            (0, &[0x01, 0x00]),
            (255, &[0x01, 0xff]),
            (256, &[0x02, 0x01, 0x00]),
            (65535, &[0x02, 0xff, 0xff]),
            (VARUINT_MAX, &[0x03, 0xff, 0xff, 0xff]),
        ];

        for (val, expected) in cases {
            let v = VarUInt::new(val).unwrap();
            let buf = encode_to_vec(&v).unwrap();
            assert_eq!(buf, expected);
            assert_eq!(buf.len(), 1 + v.width());

            let decoded: VarUInt = decode_buf_exact(&buf).unwrap();
            assert_eq!(decoded.inner(), val);
        }
    }

    #[test]
    fn test_varuint_rejects_wide() {
        let res = decode_buf_exact::<VarUInt>(&[0x04, 0x01, 0x00, 0x00, 0x00]);
        assert!(matches!(res, Err(CodecError::ValueOutOfRange(4))));
    }

    #[test]
    fn test_varuint_rejects_empty_and_nonminimal() {
        let res = decode_buf_exact::<VarUInt>(&[0x00]);
        assert!(matches!(res, Err(CodecError::InvalidValue(_))));

        let res = decode_buf_exact::<VarUInt>(&[0x02, 0x00, 0x05]);
        assert!(matches!(res, Err(CodecError::NonCanonical(_))));
    }
}
