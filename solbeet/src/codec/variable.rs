//! Value-sized codecs: length-prefixed UTF-8 strings and optionals.

use crate::error::{CodecError, Result};
use crate::traits::{put, take, Beet, FixableSize};

/// Width of the little-endian length prefix in front of every string.
pub const STRING_LEN_PREFIX: usize = 4;

impl FixableSize for String {
    #[inline]
    fn byte_size(&self) -> usize {
        STRING_LEN_PREFIX + self.len()
    }
}

/// `u32` LE byte length followed by the UTF-8 bytes.
impl Beet for String {
    const FIXED_SIZE: Option<usize> = None;
    const TYPE_NAME: &'static str = "string";

    fn write(&self, buf: &mut [u8], offset: usize) -> Result<usize> {
        // Size the whole write up front so a short buffer is left untouched.
        let needed = self.byte_size();
        let remaining = buf.len().saturating_sub(offset);
        if remaining < needed {
            return Err(CodecError::BufferTooSmall {
                type_name: Self::TYPE_NAME,
                offset,
                needed,
                remaining,
            });
        }
        let len = u32::try_from(self.len()).map_err(|_| CodecError::AccountTooLarge {
            size: self.len(),
            max: u32::MAX as usize,
        })?;
        let offset = put(buf, offset, &len.to_le_bytes(), Self::TYPE_NAME)?;
        put(buf, offset, self.as_bytes(), Self::TYPE_NAME)
    }

    fn read(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (len, start) = u32::read(buf, offset).map_err(|_| truncated_prefix(buf, offset))?;
        let len = len as usize;
        let bytes = take(buf, start, len, Self::TYPE_NAME)?;
        let text = core::str::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8 { offset: start })?;
        Ok((text.to_owned(), start + len))
    }
}

fn truncated_prefix(buf: &[u8], offset: usize) -> CodecError {
    CodecError::Truncated {
        type_name: String::TYPE_NAME,
        offset,
        needed: STRING_LEN_PREFIX,
        remaining: buf.len().saturating_sub(offset),
    }
}

const OPTION_NONE: u8 = 0;
const OPTION_SOME: u8 = 1;

impl<T: Beet> FixableSize for Option<T> {
    #[inline]
    fn byte_size(&self) -> usize {
        1 + self.as_ref().map_or(0, FixableSize::byte_size)
    }
}

/// One tag byte (`0` absent, `1` present) followed by the inner value when present.
///
/// Always fixable: the encoded size depends on presence even when `T` is fixed.
impl<T: Beet> Beet for Option<T> {
    const FIXED_SIZE: Option<usize> = None;
    const TYPE_NAME: &'static str = "option";

    fn write(&self, buf: &mut [u8], offset: usize) -> Result<usize> {
        match self {
            None => put(buf, offset, &[OPTION_NONE], Self::TYPE_NAME),
            Some(inner) => {
                let offset = put(buf, offset, &[OPTION_SOME], Self::TYPE_NAME)?;
                inner.write(buf, offset)
            }
        }
    }

    fn read(buf: &[u8], offset: usize) -> Result<(Self, usize)> {
        match take(buf, offset, 1, Self::TYPE_NAME)?[0] {
            OPTION_NONE => Ok((None, offset + 1)),
            OPTION_SOME => {
                let (inner, end) = T::read(buf, offset + 1)?;
                Ok((Some(inner), end))
            }
            value => Err(CodecError::InvalidTag {
                type_name: Self::TYPE_NAME,
                value,
                offset,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use solana_address::Address;

    #[test]
    fn test_string_layout() {
        let name = "bob".to_string();
        assert_eq!(name.byte_size(), 7);
        assert_eq!(name.encode().unwrap(), vec![3, 0, 0, 0, b'b', b'o', b'b']);

        let empty = String::new();
        assert_eq!(empty.encode().unwrap(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_string_multibyte_len_is_in_bytes() {
        let text = "héllo".to_string();
        assert_eq!(text.byte_size(), 4 + 6);
        let bytes = text.encode().unwrap();
        assert_eq!(&bytes[..4], &[6, 0, 0, 0]);
        assert_eq!(String::decode(&bytes, 0).unwrap(), (text, 10));
    }

    #[test]
    fn test_string_truncated_payload() {
        // Declares 5 bytes, carries 2.
        let err = String::decode(&[5, 0, 0, 0, b'a', b'b'], 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedData);
        assert!(matches!(err, CodecError::Truncated { needed: 5, remaining: 2, .. }));

        let err = String::decode(&[1, 0], 0).unwrap_err();
        assert!(matches!(err, CodecError::Truncated { type_name: "string", .. }));
    }

    #[test]
    fn test_string_rejects_invalid_utf8() {
        let err = String::decode(&[2, 0, 0, 0, 0xc3, 0x28], 0).unwrap_err();
        assert_eq!(err, CodecError::InvalidUtf8 { offset: 4 });
    }

    #[test]
    fn test_string_short_buffer_left_untouched() {
        let mut buf = [0xeeu8; 5];
        let err = "abc".to_string().write(&mut buf, 0).unwrap_err();
        assert!(matches!(err, CodecError::BufferTooSmall { needed: 7, remaining: 5, .. }));
        assert_eq!(buf, [0xee; 5]);
    }

    #[test]
    fn test_option_layout() {
        let absent: Option<u32> = None;
        assert_eq!(absent.encode().unwrap(), vec![0]);
        assert_eq!(absent.byte_size(), 1);

        let present = Some(7u32);
        assert_eq!(present.encode().unwrap(), vec![1, 7, 0, 0, 0]);
        assert_eq!(present.byte_size(), 5);
        assert_eq!(<Option<u32> as Beet>::FIXED_SIZE, None);
    }

    #[test]
    fn test_option_of_address() {
        let key = Address::new_from_array([3u8; 32]);
        let bytes = Some(key.clone()).encode().unwrap();
        assert_eq!(bytes.len(), 33);
        assert_eq!(bytes[0], 1);
        assert_eq!(<Option<Address>>::decode(&bytes, 0).unwrap(), (Some(key), 33));
    }

    #[test]
    fn test_option_rejects_bad_tag() {
        assert_eq!(
            <Option<u8>>::decode(&[2, 0], 0),
            Err(CodecError::InvalidTag {
                type_name: "option",
                value: 2,
                offset: 0,
            })
        );
    }

    #[test]
    fn test_nested_option_string() {
        let value = Some("hi".to_string());
        let bytes = value.encode().unwrap();
        assert_eq!(bytes, vec![1, 2, 0, 0, 0, b'h', b'i']);
        assert_eq!(<Option<String>>::decode(&bytes, 0).unwrap(), (value, 7));
    }
}
