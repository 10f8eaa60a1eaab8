//! Fixed-width codecs: unsigned integers, `f64`, `bool`, the unit type,
//! 32-byte identities and fixed-length arrays.

use solana_address::Address;

use crate::error::{CodecError, Result};
use crate::traits::{put, take, Beet, FixableSize, FixedSize};

/// Implements the three codec traits for a little-endian number type.
macro_rules! impl_le_number {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl FixedSize for $ty {
                const BYTE_SIZE: usize = core::mem::size_of::<$ty>();
            }

            impl FixableSize for $ty {
                #[inline]
                fn byte_size(&self) -> usize {
                    <$ty as FixedSize>::BYTE_SIZE
                }
            }

            impl Beet for $ty {
                const FIXED_SIZE: Option<usize> = Some(<$ty as FixedSize>::BYTE_SIZE);
                const TYPE_NAME: &'static str = $name;

                #[inline]
                fn write(&self, buf: &mut [u8], offset: usize) -> Result<usize> {
                    put(buf, offset, &self.to_le_bytes(), $name)
                }

                #[inline]
                fn read(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
                    let bytes = take(buf, offset, <$ty as FixedSize>::BYTE_SIZE, $name)?;
                    let mut raw = [0u8; core::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    Ok((<$ty>::from_le_bytes(raw), offset + raw.len()))
                }
            }
        )*
    };
}

impl_le_number! {
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    f64 => "f64",
}

impl FixedSize for bool {
    const BYTE_SIZE: usize = 1;
}

impl FixableSize for bool {
    #[inline]
    fn byte_size(&self) -> usize {
        1
    }
}

impl Beet for bool {
    const FIXED_SIZE: Option<usize> = Some(1);
    const TYPE_NAME: &'static str = "bool";

    #[inline]
    fn write(&self, buf: &mut [u8], offset: usize) -> Result<usize> {
        put(buf, offset, &[u8::from(*self)], Self::TYPE_NAME)
    }

    fn read(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        match take(buf, offset, 1, Self::TYPE_NAME)?[0] {
            0 => Ok((false, offset + 1)),
            1 => Ok((true, offset + 1)),
            value => Err(CodecError::InvalidTag {
                type_name: Self::TYPE_NAME,
                value,
                offset,
            }),
        }
    }
}

/// Zero-byte codec, used as the argument type of instructions without arguments.
impl FixedSize for () {
    const BYTE_SIZE: usize = 0;
}

impl FixableSize for () {
    #[inline]
    fn byte_size(&self) -> usize {
        0
    }
}

impl Beet for () {
    const FIXED_SIZE: Option<usize> = Some(0);
    const TYPE_NAME: &'static str = "()";

    #[inline]
    fn write(&self, _buf: &mut [u8], offset: usize) -> Result<usize> {
        Ok(offset)
    }

    #[inline]
    fn read(_buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        Ok(((), offset))
    }
}

/// Public keys travel as their raw 32 bytes, uninterpreted.
impl FixedSize for Address {
    const BYTE_SIZE: usize = 32;
}

impl FixableSize for Address {
    #[inline]
    fn byte_size(&self) -> usize {
        32
    }
}

impl Beet for Address {
    const FIXED_SIZE: Option<usize> = Some(32);
    const TYPE_NAME: &'static str = "Address";

    #[inline]
    fn write(&self, buf: &mut [u8], offset: usize) -> Result<usize> {
        put(buf, offset, self.as_ref(), Self::TYPE_NAME)
    }

    #[inline]
    fn read(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let bytes = take(buf, offset, 32, Self::TYPE_NAME)?;
        let mut raw = [0u8; 32];
        raw.copy_from_slice(bytes);
        Ok((Address::new_from_array(raw), offset + 32))
    }
}

impl<T: FixedSize, const N: usize> FixedSize for [T; N] {
    const BYTE_SIZE: usize = T::BYTE_SIZE * N;
}

impl<T: Beet, const N: usize> FixableSize for [T; N] {
    fn byte_size(&self) -> usize {
        match <Self as Beet>::FIXED_SIZE {
            Some(n) => n,
            None => self.iter().map(FixableSize::byte_size).sum(),
        }
    }
}

/// `N` consecutive element encodings with no length prefix.
impl<T: Beet, const N: usize> Beet for [T; N] {
    const FIXED_SIZE: Option<usize> = match T::FIXED_SIZE {
        Some(n) => Some(n * N),
        None => None,
    };
    const TYPE_NAME: &'static str = "fixed array";

    fn write(&self, buf: &mut [u8], offset: usize) -> Result<usize> {
        encode_fixed_array(buf, offset, self, N)
    }

    fn read(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (items, end) = decode_fixed_array::<T>(buf, offset, N)?;
        let array = fixed_array(items)?;
        Ok((array, end))
    }
}

/// Encode exactly `n` items with no length prefix.
///
/// The length check happens before anything is written, so a mismatched
/// slice never leaves a partially written buffer behind.
///
/// # Errors
///
/// Returns [`CodecError::InvalidFixedLength`] if `items.len() != n`.
pub fn encode_fixed_array<T: Beet>(buf: &mut [u8], offset: usize, items: &[T], n: usize) -> Result<usize> {
    if items.len() != n {
        return Err(CodecError::InvalidFixedLength {
            expected: n,
            actual: items.len(),
        });
    }
    if let Some(size) = T::FIXED_SIZE {
        let needed = size * n;
        let remaining = buf.len().saturating_sub(offset);
        if offset > buf.len() || remaining < needed {
            return Err(CodecError::BufferTooSmall {
                type_name: "fixed array",
                offset,
                needed,
                remaining,
            });
        }
    }
    items.iter().try_fold(offset, |offset, item| item.write(buf, offset))
}

/// Decode exactly `n` consecutive items.
pub fn decode_fixed_array<T: Beet>(buf: &[u8], offset: usize, n: usize) -> Result<(Vec<T>, usize)> {
    // Reject early when even a fixed element size shows the buffer is short.
    if let Some(size) = T::FIXED_SIZE {
        take(buf, offset, size * n, T::TYPE_NAME)?;
    }
    let mut items = Vec::with_capacity(n);
    let mut offset = offset;
    for _ in 0..n {
        let (item, next) = T::read(buf, offset)?;
        items.push(item);
        offset = next;
    }
    Ok((items, offset))
}

/// Validate a dynamically sized collection into a fixed-size array.
///
/// This is where the fixed-length precondition is enforced for values built
/// from runtime data (RPC payloads, user input) before any encoding happens.
///
/// # Example
///
/// ```ignore
/// let alpha: [u8; 72] = solbeet::fixed_array(seed_bytes.to_vec())?;
/// ```
pub fn fixed_array<T, const N: usize>(items: impl Into<Vec<T>>) -> Result<[T; N]> {
    let items: Vec<T> = items.into();
    let actual = items.len();
    items
        .try_into()
        .map_err(|_| CodecError::InvalidFixedLength { expected: N, actual })
}
