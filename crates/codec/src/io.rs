//! Adapters between the codec traits and `std::io` streams.
//!
//! Each primitive is a single `read_exact`/`write_all` call.  Failures are
//! surfaced as they happen and never retried.

use std::io::{ErrorKind, Read, Write};

use crate::errors::CodecError;
use crate::types::{Codec, Decoder, Encoder};

/// Decoder reading from a [`Read`] stream.
#[derive(Debug)]
pub struct IoDecoder<R> {
    inner: R,
}

impl<R: Read> IoDecoder<R> {
    /// Wraps a reader.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Unwraps the reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Decoder for IoDecoder<R> {
    fn read_buf(&mut self, into: &mut [u8]) -> Result<(), CodecError> {
        self.inner.read_exact(into).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => CodecError::OverrunInput,
            _ => CodecError::Io(e),
        })
    }

    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::new();
        (&mut self.inner).take(len as u64).read_to_end(&mut buf)?;
        if buf.len() < len {
            return Err(CodecError::OverrunInput);
        }
        Ok(buf)
    }
}

/// Encoder writing to a [`Write`] stream.
#[derive(Debug)]
pub struct IoEncoder<W> {
    inner: W,
}

impl<W: Write> IoEncoder<W> {
    /// Wraps a writer.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Unwraps the writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Encoder for IoEncoder<W> {
    fn write_buf(&mut self, buf: &[u8]) -> Result<(), CodecError> {
        self.inner.write_all(buf)?;
        Ok(())
    }
}

/// Decodes a single value from a reader.  Doesn't check for trailing data,
/// since the stream may carry more values.
pub fn decode_from_reader<T: Codec>(reader: impl Read) -> Result<T, CodecError> {
    T::decode(&mut IoDecoder::new(reader))
}

/// Encodes a value into a writer.
pub fn encode_to_writer<T: Codec>(v: &T, writer: impl Write) -> Result<(), CodecError> {
    v.encode(&mut IoEncoder::new(writer))
}
