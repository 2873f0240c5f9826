//! Simple macros for basic codec impls.

/// Generates a struct whose fields are each wrapped in an explicit context
/// tag, along with its `Codec` impl.  Fields are written in declaration order
/// and must carry ascending tag numbers.
#[macro_export]
macro_rules! impl_tagged_struct {
    {
        $( #[ $sattr:meta ] )*
        $v:vis struct $name:ident {
            $(
                $( #[ $fattr:meta ] )*
                $fvis:vis $fname:ident : $fty:ty = $tag:literal,
            )*
        }
    } => {
        $( #[ $sattr ] )*
        $v struct $name {
            $(
                $( #[ $fattr ] )*
                $fvis $fname : $fty,
            )*
        }

        impl $crate::Codec for $name {
            fn decode(dec: &mut impl $crate::Decoder) -> Result<Self, $crate::CodecError> {
                $(
                    let $fname = $crate::decode_explicit::<$fty>(dec, $tag)?;
                )*
                Ok(Self { $( $fname ),* })
            }

            fn encode(&self, enc: &mut impl $crate::Encoder) -> Result<(), $crate::CodecError> {
                $( $crate::encode_explicit::<$fty>(enc, $tag, &self.$fname)?; )*
                Ok(())
            }
        }
    }
}
