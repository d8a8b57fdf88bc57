//! Protocol codec and key schedule core for a TLS testing framework.
//!
//! The parsing layer is intentionally permissive. Messages whose declared
//! lengths disagree with the bytes on the wire still parse, and every parsed
//! message can be re-serialized byte-identically, so malformed handshakes can
//! be captured, mutated, and replayed. The key material layer covers both
//! schedule generations: HKDF-Expand-Label for TLS 1.3 and PRF-based key
//! block expansion for everything earlier.

pub mod algorithms;
pub mod codec;
pub mod context;
pub mod error;
pub mod iana;
pub mod keys;
pub mod protocol;

mod discriminant {
    macro_rules! impl_byte_value {
        ($enum:ident, $repr:ty) => {
            impl $enum {
                #[allow(dead_code)]
                pub fn byte_value(&self) -> $repr {
                    // SAFETY: Because the enum is marked #[repr($repr)], we can read
                    // the discriminant directly from the memory representation.
                    // https://doc.rust-lang.org/std/mem/fn.discriminant.html#accessing-the-numeric-value-of-the-discriminant
                    unsafe { *<*const _>::from(self).cast::<$repr>() }
                }
            }
        };
    }

    pub(crate) use impl_byte_value;
}
