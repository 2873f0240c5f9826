//! Property testing macros and utilities for cryptocond-codec.
//!
//! This crate provides macros to generate property tests for types that
//! implement the `Codec` trait from cryptocond-codec.  The main export is the
//! `generate_codec_tests!` macro.

// Re-export dependencies for macro usage
pub use cryptocond_codec;
pub use paste;
pub use proptest;

/// Generates property tests for a type that implements `Codec` using a
/// proptest strategy.
///
/// The generated tests check that:
/// 1. Encoding then decoding produces the original value (round-trip property)
/// 2. Re-encoding the decoded value reproduces the exact same bytes, so the
///    encoding is canonical
/// 3. The encoding is deterministic (same input always produces same output)
/// 4. Different inputs produce different encodings
///
/// # Requirements
///
/// The type must implement `cryptocond_codec::Codec` and `Debug + PartialEq`,
/// and the strategy expression must produce values of that type.
///
/// # Example
/// ```rust,ignore
/// use cryptocond_codec_tests::generate_codec_tests;
///
/// fn my_type_strategy() -> impl Strategy<Value = MyType> { ... }
///
/// generate_codec_tests!(MyType, my_type_strategy(), "my_type");
/// ```
#[macro_export]
macro_rules! generate_codec_tests {
    ($type:ty, $strategy:expr, $name:expr) => {
        $crate::paste::paste! {
            mod [<proptest_ $name _codec>] {
                use super::*;
                use $crate::proptest::prelude::{prop_assert_eq, prop_assert_ne, prop_assume};
                use $crate::cryptocond_codec::{encode_to_vec, decode_buf_exact};

                $crate::proptest::proptest! {
                    #[test]
                    fn [<test_codec_roundtrip>](value in $strategy) {
                        let encoded = encode_to_vec(&value).expect("test: encoding should succeed");
                        let decoded = decode_buf_exact::<$type>(&encoded).expect("test: decoding should succeed");
                        let reencoded = encode_to_vec(&decoded).expect("test: re-encoding should succeed");
                        prop_assert_eq!(&value, &decoded);
                        prop_assert_eq!(encoded, reencoded);
                    }

                    #[test]
                    fn [<test_codec_deterministic>](value in $strategy) {
                        let encoded1 = encode_to_vec(&value).expect("encoding should succeed");
                        let encoded2 = encode_to_vec(&value).expect("encoding should succeed");
                        prop_assert_eq!(encoded1, encoded2, "test: unexpected inequality");
                    }

                    #[test]
                    fn [<test_codec_different_inputs>](
                        value1 in $strategy,
                        value2 in $strategy
                    ) {
                        prop_assume!(value1 != value2);
                        let encoded1 = encode_to_vec(&value1).expect("test: encoding should succeed");
                        let encoded2 = encode_to_vec(&value2).expect("test: encoding should succeed");
                        prop_assert_ne!(encoded1, encoded2, "test: unexpected equality");
                    }
                }
            }
        }
    };
}
