//! Explicit context-specific tagging.
//!
//! Every tagged value is written as an identifier octet, a length indicator,
//! and then the encoded value:
//!
//! ```txt
//! 101ttttt <length> <value...>
//! ```
//!
//! Only the low-tag-number form is supported, so tags are limited to 0..=30.

use std::borrow::Cow;

use crate::buf_decoder::BufDecoder;
use crate::errors::CodecError;
use crate::length::{read_length, write_length};
use crate::types::{Codec, Decoder, Encoder};
use crate::util::encode_to_vec;

/// Largest tag number representable in a single identifier octet.
pub const MAX_TAG: u8 = 30;

/// Class and constructed bits of a context-specific constructed identifier.
const CONTEXT_CONSTRUCTED: u8 = 0xa0;

/// Mask for the class and constructed bits.
const CLASS_MASK: u8 = 0xe0;

/// Writes the identifier octet for a context tag.
pub fn write_tag(enc: &mut impl Encoder, tag: u8) -> Result<(), CodecError> {
    if tag > MAX_TAG {
        return Err(CodecError::ValueOutOfRange(tag as u64));
    }
    enc.write_buf(&[CONTEXT_CONSTRUCTED | tag])
}

/// Reads the identifier octet for a context tag and returns the tag number.
pub fn read_tag(dec: &mut impl Decoder) -> Result<u8, CodecError> {
    let id = u8::decode(dec)?;
    let tag = id & !CLASS_MASK;
    if id & CLASS_MASK != CONTEXT_CONSTRUCTED || tag > MAX_TAG {
        return Err(CodecError::InvalidTag(id));
    }
    Ok(tag)
}

/// Writes a tagged frame around an already-encoded body.
pub fn write_frame(enc: &mut impl Encoder, tag: u8, body: &[u8]) -> Result<(), CodecError> {
    write_tag(enc, tag)?;
    write_length(enc, body.len())?;
    enc.write_buf(body)
}

/// Encodes a value wrapped in an explicit context tag.
pub fn encode_explicit<T: Codec>(
    enc: &mut impl Encoder,
    tag: u8,
    value: &T,
) -> Result<(), CodecError> {
    let body = encode_to_vec(value)?;
    write_frame(enc, tag, &body)
}

/// Decodes a value wrapped in an explicit context tag, requiring that the tag
/// matches and that the value consumes the whole frame.
pub fn decode_explicit<T: Codec>(dec: &mut impl Decoder, tag: u8) -> Result<T, CodecError> {
    let mut frame = Frame::read(dec)?;
    frame.expect_tag(tag)?;
    let value = T::decode(frame.body())?;
    frame.finish()?;
    Ok(value)
}

/// A tagged value that has been read but whose body is not yet interpreted.
///
/// Used for choices, where the tag picks how to decode the body, and for
/// bodies with optional trailing fields or repeated elements.
///
/// When read from a [`BufDecoder`] the body borrows from the outer buffer, and
/// the body decoder is always the same type however deep frames nest.
#[derive(Debug)]
pub struct Frame<'a> {
    tag: u8,
    body: BufDecoder<Cow<'a, [u8]>>,
}

impl<'a> Frame<'a> {
    /// Reads the tag and the whole body of a frame.
    pub fn read<D: Decoder>(dec: &'a mut D) -> Result<Self, CodecError> {
        let tag = read_tag(dec)?;
        let len = read_length(dec)?;
        let body = dec.read_body(len)?;
        Ok(Self {
            tag,
            body: BufDecoder::new(body),
        })
    }

    /// Gets the tag number.
    pub fn tag(&self) -> u8 {
        self.tag
    }

    /// Checks that the tag is the one expected at this position.
    pub fn expect_tag(&self, expected: u8) -> Result<(), CodecError> {
        if self.tag != expected {
            return Err(CodecError::UnexpectedTag {
                expected,
                found: self.tag,
            });
        }
        Ok(())
    }

    /// Decoder over the body.
    pub fn body(&mut self) -> &mut BufDecoder<Cow<'a, [u8]>> {
        &mut self.body
    }

    /// Returns if there's still unread data in the body.
    pub fn has_remaining(&self) -> bool {
        self.body.remaining() > 0
    }

    /// Finishes reading the frame, rejecting any unread trailing data.
    pub fn finish(self) -> Result<(), CodecError> {
        if self.has_remaining() {
            return Err(CodecError::ExtraInput);
        }
        Ok(())
    }
}
