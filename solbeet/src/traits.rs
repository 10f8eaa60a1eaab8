//! Core codec traits.
//!
//! Every encodable type implements [`Beet`], which pairs an encoder, a decoder
//! and a size function. Sizing comes in two flavours:
//!
//! - [`FixedSize`]: the encoded length is a constant of the type (integers,
//!   booleans, identities, fixed arrays of fixed elements).
//! - [`FixableSize`]: the encoded length is a pure function of the value
//!   (strings, optionals, data enums, and any struct holding one of those).
//!
//! Composite codecs generated by `#[derive(Beet)]` work out their own category
//! at compile time from their members through [`Beet::FIXED_SIZE`].

use crate::error::{CodecError, Result};

/// Types whose encoded length never depends on the value.
///
/// Only leaf codecs (numbers, `bool`, `()`, `Address`, arrays of those)
/// implement this trait. Types from `#[derive(Beet)]` do not; a derived
/// struct or enum reports its category through [`Beet::FIXED_SIZE`].
pub trait FixedSize {
    /// Exact number of bytes every value encodes to.
    const BYTE_SIZE: usize;
}

/// Types whose encoded length can be computed from a value without encoding it.
///
/// Every [`Beet`] implements this; for fixed types it simply returns the
/// constant size.
pub trait FixableSize {
    /// Number of bytes `self` encodes to.
    fn byte_size(&self) -> usize;
}

/// A binary codec with a byte-exact, little-endian wire layout.
///
/// # Example
///
/// ```ignore
/// use solbeet::Beet;
///
/// #[derive(Beet, Debug, PartialEq)]
/// pub struct Deposit {
///     pub lamports: u64,
///     pub memo: Option<String>,
/// }
///
/// let value = Deposit { lamports: 5, memo: None };
/// let bytes = value.encode()?;
/// assert_eq!(bytes.len(), value.byte_size());
/// let (decoded, read) = Deposit::decode(&bytes, 0)?;
/// assert_eq!((decoded, read), (value, bytes.len()));
/// ```
pub trait Beet: FixableSize + Sized {
    /// `Some(n)` when every value of the type encodes to exactly `n` bytes,
    /// `None` when the size depends on the value.
    const FIXED_SIZE: Option<usize>;

    /// Name used in error messages.
    const TYPE_NAME: &'static str;

    /// Write `self` into `buf` starting at `offset`, returning the offset just
    /// past the written bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::BufferTooSmall`] if `buf` cannot hold the value.
    fn write(&self, buf: &mut [u8], offset: usize) -> Result<usize>;

    /// Read a value from `buf` starting at `offset`, returning it with the
    /// offset just past the consumed bytes.
    ///
    /// # Errors
    ///
    /// Fails without returning a partial value if the bytes are truncated or
    /// malformed.
    fn read(buf: &[u8], offset: usize) -> Result<(Self, usize)>;

    /// Whether the type belongs to the fixed category.
    #[inline]
    fn is_fixed() -> bool {
        Self::FIXED_SIZE.is_some()
    }

    /// Encode into a freshly allocated buffer of exactly [`byte_size`](FixableSize::byte_size) bytes.
    fn encode(&self) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; self.byte_size()];
        let written = self.write(&mut buf, 0)?;
        debug_assert_eq!(written, buf.len(), "{} wrote a different length than it sized", Self::TYPE_NAME);
        Ok(buf)
    }

    /// Decode a value starting at `offset`, returning it with the offset up to
    /// which the buffer was read.
    #[inline]
    fn decode(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        Self::read(buf, offset)
    }

    /// Decode a value that must span the whole buffer.
    fn decode_exact(buf: &[u8]) -> Result<Self> {
        let (value, end) = Self::read(buf, 0)?;
        if end != buf.len() {
            return Err(CodecError::TrailingBytes {
                type_name: Self::TYPE_NAME,
                trailing: buf.len() - end,
            });
        }
        Ok(value)
    }
}

/// Field metadata generated by `#[derive(Beet)]` on structs.
pub trait BeetStruct: Beet {
    /// Field names in wire order.
    const FIELDS: &'static [&'static str];

    /// Fixed size of each field in wire order (`None` for fixable fields).
    const FIELD_SIZES: &'static [Option<usize>];

    /// Byte offset of a field, if every field before it is fixed.
    ///
    /// Returns `None` for unknown names or when a fixable field precedes it.
    fn field_offset(name: &str) -> Option<usize> {
        let mut offset = 0usize;
        for (field, size) in Self::FIELDS.iter().zip(Self::FIELD_SIZES) {
            if *field == name {
                return Some(offset);
            }
            offset += (*size)?;
        }
        None
    }
}

/// Variant metadata generated by `#[derive(Beet)]` on enums.
pub trait DataEnum: Beet {
    /// Variant names in declaration (discriminant) order.
    const VARIANTS: &'static [&'static str];

    /// The wire discriminant of this value's variant.
    fn discriminant(&self) -> u8;

    /// The declared name of this value's variant.
    #[inline]
    fn variant_name(&self) -> &'static str {
        Self::VARIANTS[self.discriminant() as usize]
    }
}

/// Sum the fixed sizes of a struct's fields.
///
/// Returns `None` as soon as any field is fixable. Used by the derive to
/// compute [`Beet::FIXED_SIZE`] in a const context.
pub const fn sum_fixed_sizes(sizes: &[Option<usize>]) -> Option<usize> {
    let mut total = 0usize;
    let mut i = 0;
    while i < sizes.len() {
        match sizes[i] {
            Some(n) => total += n,
            None => return None,
        }
        i += 1;
    }
    Some(total)
}

/// Bounds-checked view of `len` bytes at `offset`.
///
/// This is the single place decoders check for truncation. An offset past the
/// end of `buf` is truncated even when `len` is zero.
#[inline]
pub fn take<'a>(buf: &'a [u8], offset: usize, len: usize, type_name: &'static str) -> Result<&'a [u8]> {
    offset
        .checked_add(len)
        .and_then(|end| buf.get(offset..end))
        .ok_or(CodecError::Truncated {
            type_name,
            offset,
            needed: len,
            remaining: buf.len().saturating_sub(offset),
        })
}

/// Copy `bytes` into `buf` at `offset`, returning the new offset.
#[inline]
pub fn put(buf: &mut [u8], offset: usize, bytes: &[u8], type_name: &'static str) -> Result<usize> {
    let remaining = buf.len().saturating_sub(offset);
    let end = offset.checked_add(bytes.len());
    match end.and_then(|end| buf.get_mut(offset..end)) {
        Some(window) => {
            window.copy_from_slice(bytes);
            Ok(offset + bytes.len())
        }
        None => Err(CodecError::BufferTooSmall {
            type_name,
            offset,
            needed: bytes.len(),
            remaining,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_fixed_sizes() {
        assert_eq!(sum_fixed_sizes(&[]), Some(0));
        assert_eq!(sum_fixed_sizes(&[Some(1), Some(32), Some(8)]), Some(41));
        assert_eq!(sum_fixed_sizes(&[Some(1), None, Some(8)]), None);
    }

    #[test]
    fn test_take_reports_truncation() {
        let data = [1u8, 2, 3];
        assert_eq!(take(&data, 1, 2, "u16").unwrap(), &[2, 3]);
        assert_eq!(
            take(&data, 2, 4, "u32"),
            Err(CodecError::Truncated {
                type_name: "u32",
                offset: 2,
                needed: 4,
                remaining: 1,
            })
        );
        // An offset past the end is truncation, not a panic.
        assert!(take(&data, 10, 1, "u8").is_err());
    }

    #[test]
    fn test_zero_width_past_end() {
        let data = [1u8, 2, 3];
        assert_eq!(take(&data, 3, 0, "()").unwrap(), &[] as &[u8]);
        assert_eq!(
            take(&data, 5, 0, "fixed array"),
            Err(CodecError::Truncated {
                type_name: "fixed array",
                offset: 5,
                needed: 0,
                remaining: 0,
            })
        );
        assert!(matches!(
            <[u8; 0]>::decode(&[], 5),
            Err(CodecError::Truncated { offset: 5, .. })
        ));
        assert_eq!(<[u8; 0]>::decode(&[9], 1).unwrap(), ([], 1));

        let mut buf = [0u8; 2];
        assert!(matches!(
            put(&mut buf, 4, &[], "fixed array"),
            Err(CodecError::BufferTooSmall { offset: 4, .. })
        ));
        assert!(matches!(
            [0u8; 0].write(&mut buf, 4),
            Err(CodecError::BufferTooSmall { .. })
        ));
    }

    #[test]
    fn test_put_reports_overflow() {
        let mut buf = [0u8; 3];
        assert_eq!(put(&mut buf, 1, &[7, 8], "u16"), Ok(3));
        assert_eq!(buf, [0, 7, 8]);
        assert!(matches!(
            put(&mut buf, 2, &[1, 2], "u16"),
            Err(CodecError::BufferTooSmall { needed: 2, remaining: 1, .. })
        ));
    }
}
