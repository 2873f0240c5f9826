//! Length-prefixed octet strings.

use crate::errors::CodecError;
use crate::length::{read_length, write_length};
use crate::types::{Codec, Decoder, Encoder};

/// Vecs of bytes are octet strings: a length indicator and then the raw bytes.
impl Codec for Vec<u8> {
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        let len = read_length(dec)?;
        if len == 0 {
            return Ok(Vec::new());
        }
        dec.read_vec(len)
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        write_length(enc, self.len())?;
        enc.write_buf(self)
    }
}

/// Octet string that must be exactly `N` bytes long.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FixedOctets<const N: usize>(pub [u8; N]);

impl<const N: usize> FixedOctets<N> {
    /// Converts to the inner array.
    pub fn into_inner(self) -> [u8; N] {
        self.0
    }
}

impl<const N: usize> From<[u8; N]> for FixedOctets<N> {
    fn from(value: [u8; N]) -> Self {
        Self(value)
    }
}

impl<const N: usize> Codec for FixedOctets<N> {
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
        let len = read_length(dec)?;
        if len != N {
            return Err(CodecError::InvalidLength {
                expected: N,
                found: len,
            });
        }
        dec.read_arr::<N>().map(Self)
    }

    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
        write_length(enc, N)?;
        enc.write_buf(&self.0)
    }
}
