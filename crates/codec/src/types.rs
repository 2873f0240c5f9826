use std::borrow::Cow;

use crate::CodecError;

/// Size of the chunks [`Decoder::read_vec`] grows its buffer by, so a large
/// declared length can't force a large allocation up front.
const READ_CHUNK: usize = 4096;

/// Values with a single canonical binary encoding.
pub trait Codec: Sized {
    /// Decodes self from a decoder.
    fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError>;

    /// Encodes self into an encoder.
    fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError>;
}

/// Source of raw bytes for decoding.
pub trait Decoder {
    /// Reads a variable-size buf.  This does NOT include length tagging.
    fn read_buf(&mut self, into: &mut [u8]) -> Result<(), CodecError>;

    /// Reads a fixed size buf.  This does NOT include length tagging.
    fn read_arr<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut buf = [0; N];
        self.read_buf(&mut buf)?;
        Ok(buf)
    }

    /// Reads exactly `len` bytes into a new vec.  This does NOT include
    /// length tagging.
    ///
    /// The buffer only grows as data actually arrives.
    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>, CodecError> {
        let mut buf = Vec::with_capacity(len.min(READ_CHUNK));
        while buf.len() < len {
            let start = buf.len();
            let n = (len - start).min(READ_CHUNK);
            buf.resize(start + n, 0);
            self.read_buf(&mut buf[start..])?;
        }
        Ok(buf)
    }

    /// Reads the `len` byte body of a tagged frame.
    ///
    /// In-memory decoders lend out the bytes instead of copying them, which
    /// keeps nested frames from duplicating their parents' contents.
    fn read_body(&mut self, len: usize) -> Result<Cow<'_, [u8]>, CodecError> {
        self.read_vec(len).map(Cow::Owned)
    }
}

/// Sink for encoded bytes.
pub trait Encoder {
    /// Writes a buf.  This does NOT include length tagging.
    fn write_buf(&mut self, buf: &[u8]) -> Result<(), CodecError>;
}

/// Encoding to a vec buffer.
impl Encoder for Vec<u8> {
    fn write_buf(&mut self, buf: &[u8]) -> Result<(), CodecError> {
        self.extend_from_slice(buf);
        Ok(())
    }
}

/// Simple macro to wrap the fixed size int types, not much to see.
macro_rules! impl_int_codec {
    ( $ity:ident $bytes:literal ) => {
        impl Codec for $ity {
            fn decode(dec: &mut impl Decoder) -> Result<Self, CodecError> {
                let arr: [u8; $bytes] = dec.read_arr()?;
                Ok(<$ity>::from_be_bytes(arr))
            }

            fn encode(&self, enc: &mut impl Encoder) -> Result<(), CodecError> {
                enc.write_buf(&self.to_be_bytes())
            }
        }
    };
}

impl_int_codec!(u8 1);
impl_int_codec!(u16 2);
impl_int_codec!(u32 4);
impl_int_codec!(u64 8);
