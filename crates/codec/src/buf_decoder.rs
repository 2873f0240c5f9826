//! Simple decoder for a flat buffer.

use std::borrow::Cow;

use crate::errors::CodecError;
use crate::types::Decoder;

/// Decoder for an arbitrary [`AsRef`] on a byte slice.
///
/// You probably don't need to use this directly as a consumer of this library,
/// you can directly call [`crate::decode_buf_exact`] and
/// [`crate::encode_to_vec`].
///
/// Every length read from the input is checked against the bytes actually
/// left before anything is allocated.  Frame bodies are lent out as
/// subslices of the buffer, so a [`crate::Frame`] read from a `BufDecoder`
/// and every frame nested inside it share the one buffer.  A failed read
/// consumes nothing.
#[derive(Debug)]
pub struct BufDecoder<B> {
    buf: B,
    at: usize,
}

impl<B: AsRef<[u8]>> BufDecoder<B> {
    /// Constructs a new instance by wrapping a buffer and starting at the
    /// beginning.
    pub fn new(buf: B) -> Self {
        Self { buf, at: 0 }
    }

    /// Returns the length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.buf.as_ref().len()
    }

    /// Returns if the underlying buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.as_ref().is_empty()
    }

    /// Returns the total number of remaining bytes that can be read.
    pub fn remaining(&self) -> usize {
        self.len() - self.at
    }

    /// Returns the slice of the remaining unread bytes, which might be empty.
    fn rest(&self) -> &[u8] {
        &self.buf.as_ref()[self.at..]
    }
}

impl<B: AsRef<[u8]>> Decoder for BufDecoder<B> {
    fn read_buf(&mut self, into: &mut [u8]) -> Result<(), CodecError> {
        if into.len() > self.remaining() {
            return Err(CodecError::OverrunInput);
        }

        into.copy_from_slice(&self.rest()[..into.len()]);
        self.at += into.len();
        Ok(())
    }

    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>, CodecError> {
        self.read_body(len).map(Cow::into_owned)
    }

    fn read_body(&mut self, len: usize) -> Result<Cow<'_, [u8]>, CodecError> {
        if len > self.remaining() {
            return Err(CodecError::OverrunInput);
        }

        let start = self.at;
        self.at += len;
        Ok(Cow::Borrowed(&self.buf.as_ref()[start..start + len]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_advance() {
        let mut dec = BufDecoder::new([1u8, 2, 3, 4, 5]);
        assert_eq!(dec.read_arr::<2>().unwrap(), [1, 2]);
        assert_eq!(dec.remaining(), 3);
        assert_eq!(dec.read_vec(3).unwrap(), vec![3, 4, 5]);
        assert_eq!(dec.remaining(), 0);
        assert!(matches!(dec.read_arr::<1>(), Err(CodecError::OverrunInput)));
    }

    #[test]
    fn test_body_is_borrowed() {
        let mut dec = BufDecoder::new([1u8, 2, 3, 4]);
        dec.read_arr::<1>().unwrap();
        let body = dec.read_body(2).unwrap();
        assert!(matches!(body, Cow::Borrowed(&[2, 3])));
        assert_eq!(dec.remaining(), 1);
    }

    #[test]
    fn test_huge_declared_length() {
        // Rejected by the length check alone.
        let mut dec = BufDecoder::new([0u8; 4]);
        assert!(matches!(dec.read_vec(0xff_ffff), Err(CodecError::OverrunInput)));
        assert!(matches!(dec.read_body(0xff_ffff), Err(CodecError::OverrunInput)));
        assert_eq!(dec.remaining(), 4);
    }

    #[test]
    fn test_overrun_does_not_consume() {
        let mut dec = BufDecoder::new(vec![9u8]);
        assert!(matches!(dec.read_vec(2), Err(CodecError::OverrunInput)));
        assert_eq!(dec.remaining(), 1);
    }
}
