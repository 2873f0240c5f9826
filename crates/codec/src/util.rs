//! Whole-buffer helpers.

use crate::{BufDecoder, Codec, CodecError};

/// Decodes a value that must take up the entire buffer.
pub fn decode_buf_exact<T: Codec>(buf: &[u8]) -> Result<T, CodecError> {
    let mut dec = BufDecoder::new(buf);
    let v = T::decode(&mut dec)?;
    if dec.remaining() > 0 {
        return Err(CodecError::ExtraInput);
    }
    Ok(v)
}

/// Encodes a value into a new vec.
pub fn encode_to_vec<T: Codec>(v: &T) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::new();
    v.encode(&mut buf)?;
    Ok(buf)
}

/// Length of a value's encoding, in bytes.
pub fn encoded_len<T: Codec>(v: &T) -> Result<usize, CodecError> {
    encode_to_vec(v).map(|buf| buf.len())
}
