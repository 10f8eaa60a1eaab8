//! Leaf codecs.
//!
//! - [`primitive`]: little-endian numbers, `bool`, `()`, [`Address`](solana_address::Address)
//!   and `[T; N]`, all fixed.
//! - [`variable`]: `String` and `Option<T>`, sized by value.
//!
//! Structs and data enums are composed from these by `#[derive(Beet)]`.

pub mod primitive;
pub mod variable;

pub use primitive::{decode_fixed_array, encode_fixed_array, fixed_array};
pub use variable::STRING_LEN_PREFIX;
