//! Error type shared by every codec, account wrapper and instruction descriptor.
//!
//! All failures are local and synchronous. Nothing in this crate retries; a
//! caller that wants to re-fetch account bytes does so in its own RPC layer.
//!
//! On-chain callers can propagate a [`CodecError`] with `?` into a
//! [`ProgramError`] through the provided `From` impl.

use pinocchio::error::ProgramError;
use thiserror::Error;

/// Coarse classification of a [`CodecError`].
///
/// | Kind | Meaning |
/// |------|---------|
/// | `NotFound` | The requested address has no backing bytes |
/// | `MalformedData` | Bytes are truncated or carry an invalid value |
/// | `UnknownVariant` | A discriminant byte names no declared variant |
/// | `InvalidFixedLength` | A fixed array was built from the wrong number of items |
/// | `InvalidInput` | The caller passed arguments the operation cannot use |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    MalformedData,
    UnknownVariant,
    InvalidFixedLength,
    InvalidInput,
}

/// Errors produced while encoding, decoding or assembling records.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodecError {
    /// No account data exists at the requested address.
    #[error("unable to find {account} account at {address}")]
    NotFound {
        account: &'static str,
        address: String,
    },

    /// The buffer ended before a value was fully read.
    #[error("truncated {type_name} at offset {offset}: needs {needed} bytes, {remaining} remaining")]
    Truncated {
        type_name: &'static str,
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// A tag byte (bool, option presence) holds a value outside its domain.
    #[error("invalid {type_name} tag {value:#04x} at offset {offset}")]
    InvalidTag {
        type_name: &'static str,
        value: u8,
        offset: usize,
    },

    /// A length-prefixed string is not valid UTF-8.
    #[error("string at offset {offset} is not valid utf-8")]
    InvalidUtf8 { offset: usize },

    /// Bytes were left over after decoding a value that must consume everything.
    #[error("{trailing} trailing bytes after {type_name}")]
    TrailingBytes {
        type_name: &'static str,
        trailing: usize,
    },

    /// The account-type header names a different (or no) account type.
    #[error("expected {expected} account (type {expected_tag}), found type {found}")]
    AccountTypeMismatch {
        expected: &'static str,
        expected_tag: u8,
        found: u8,
    },

    /// A data-enum discriminant does not index a declared variant.
    #[error("unknown {type_name} variant {discriminant} at offset {offset}")]
    UnknownVariant {
        type_name: &'static str,
        discriminant: u8,
        offset: usize,
    },

    /// A fixed-size array was supplied with the wrong number of items.
    #[error("fixed array expects exactly {expected} items, got {actual}")]
    InvalidFixedLength { expected: usize, actual: usize },

    /// The output buffer cannot hold the value being written.
    #[error("buffer too small for {type_name} at offset {offset}: needs {needed} bytes, {remaining} remaining")]
    BufferTooSmall {
        type_name: &'static str,
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// An encoded record exceeds the runtime's maximum account size.
    #[error("{size} bytes exceeds the maximum account size of {max}")]
    AccountTooLarge { size: usize, max: usize },

    /// The rent-exempt balance does not fit in a `u64` of lamports.
    #[error("rent exemption for {data_len} bytes overflows u64 lamports")]
    RentOverflow { data_len: usize },

    /// A required account role was not given an address.
    #[error("{instruction} requires an address for `{role}`")]
    MissingAccount {
        instruction: &'static str,
        role: &'static str,
    },

    /// More addresses were supplied than the instruction declares roles.
    #[error("{instruction} declares {expected} accounts, {actual} supplied")]
    TooManyAccounts {
        instruction: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Instruction data does not start with the expected discriminant.
    #[error("{instruction} expects discriminant {expected}, found {found:?}")]
    InstructionMismatch {
        instruction: &'static str,
        expected: u8,
        found: Option<u8>,
    },
}

impl CodecError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::NotFound { .. } => ErrorKind::NotFound,
            CodecError::Truncated { .. }
            | CodecError::InvalidTag { .. }
            | CodecError::InvalidUtf8 { .. }
            | CodecError::TrailingBytes { .. }
            | CodecError::AccountTypeMismatch { .. } => ErrorKind::MalformedData,
            CodecError::UnknownVariant { .. } => ErrorKind::UnknownVariant,
            CodecError::InvalidFixedLength { .. } => ErrorKind::InvalidFixedLength,
            CodecError::BufferTooSmall { .. }
            | CodecError::AccountTooLarge { .. }
            | CodecError::RentOverflow { .. }
            | CodecError::MissingAccount { .. }
            | CodecError::TooManyAccounts { .. }
            | CodecError::InstructionMismatch { .. } => ErrorKind::InvalidInput,
        }
    }
}

impl From<CodecError> for ProgramError {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::NotFound { .. } => ProgramError::UninitializedAccount,
            CodecError::AccountTypeMismatch { found: 0, .. } => ProgramError::UninitializedAccount,
            CodecError::BufferTooSmall { .. } => ProgramError::AccountDataTooSmall,
            CodecError::InvalidFixedLength { .. }
            | CodecError::AccountTooLarge { .. }
            | CodecError::RentOverflow { .. } => ProgramError::InvalidArgument,
            CodecError::MissingAccount { .. } | CodecError::TooManyAccounts { .. } => {
                ProgramError::NotEnoughAccountKeys
            }
            CodecError::InstructionMismatch { .. } => ProgramError::InvalidInstructionData,
            _ => ProgramError::InvalidAccountData,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_taxonomy() {
        let truncated = CodecError::Truncated {
            type_name: "u32",
            offset: 4,
            needed: 4,
            remaining: 1,
        };
        assert_eq!(truncated.kind(), ErrorKind::MalformedData);

        let unknown = CodecError::UnknownVariant {
            type_name: "BetInput",
            discriminant: 9,
            offset: 0,
        };
        assert_eq!(unknown.kind(), ErrorKind::UnknownVariant);

        let fixed = CodecError::InvalidFixedLength { expected: 72, actual: 71 };
        assert_eq!(fixed.kind(), ErrorKind::InvalidFixedLength);
    }

    #[test]
    fn test_program_error_mapping() {
        let uninitialized = CodecError::AccountTypeMismatch {
            expected: "UserAccount",
            expected_tag: 2,
            found: 0,
        };
        assert_eq!(ProgramError::from(uninitialized), ProgramError::UninitializedAccount);

        let wrong_type = CodecError::AccountTypeMismatch {
            expected: "UserAccount",
            expected_tag: 2,
            found: 4,
        };
        assert_eq!(ProgramError::from(wrong_type), ProgramError::InvalidAccountData);

        let mismatch = CodecError::InstructionMismatch {
            instruction: "GameSetActive",
            expected: 6,
            found: Some(7),
        };
        assert_eq!(ProgramError::from(mismatch), ProgramError::InvalidInstructionData);
    }

    #[test]
    fn test_display_is_readable() {
        let e = CodecError::InvalidTag {
            type_name: "bool",
            value: 2,
            offset: 7,
        };
        assert_eq!(e.to_string(), "invalid bool tag 0x02 at offset 7");
    }
}
