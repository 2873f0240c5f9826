//! Canonical binary encoding framework for crypto-conditions.
//!
//! This is a small DER-style subset: fixed-width big-endian integers, length
//! indicators of at most three length octets, length-prefixed octet strings,
//! bounded unsigned integers, and explicit context-specific tags.  Every value
//! has exactly one accepted encoding.

mod errors;
pub use errors::CodecError;

mod types;
pub use types::{Codec, Decoder, Encoder};

mod buf_decoder;
pub use buf_decoder::BufDecoder;

mod length;
pub use length::{LengthIndicator, MAX_LENGTH, read_length, write_length};

mod varuint;
pub use varuint::{VARUINT_MAX, VarUInt};

mod octets;
pub use octets::FixedOctets;

mod tagged;
pub use tagged::{
    Frame, MAX_TAG, decode_explicit, encode_explicit, read_tag, write_frame, write_tag,
};

mod io;
pub use io::{IoDecoder, IoEncoder, decode_from_reader, encode_to_writer};

mod macros;

mod util;
pub use util::{decode_buf_exact, encode_to_vec, encoded_len};
