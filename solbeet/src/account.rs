//! Account records: typed, encodable views of persisted account state.
//!
//! This module binds a codec to a named account shape:
//!
//! - [`AccountRecord`]: validated construction, strict loading from raw
//!   account data, fetching through an [`AccountFetcher`], sizing and rent
//! - [`RentParams`]: the Rent sysvar parameters, decoded with the codec itself
//! - [`AccountFilter`]: program-account scan filters (discriminator, data
//!   size, memcmp on fixed-offset fields)
//! - [`rent_exempt_minimum`]: the `const` rent approximation for a data length
//!
//! # Example
//!
//! ```ignore
//! use solbeet::{AccountRecord, RentParams};
//!
//! // Size and fund the account before it exists on-chain.
//! let fields = UserAccount { username: Some("alice".into()), ..user };
//! let space = UserAccount::byte_size_of(fields.clone())?;
//! let lamports = UserAccount::rent_exempt_minimum_for(fields, &RentParams::default())?;
//!
//! // Later, load it back.
//! let user = UserAccount::fetch(&rpc, &address)?;
//! log::info!("{}", user.describe());
//! ```

use serde_json::{json, Value};
use solana_address::Address;

use crate::describe::Describe;
use crate::error::{CodecError, Result};
use crate::programs::RENT_SYSVAR_ID;
use crate::traits::BeetStruct;
use crate::Beet;

/// Maximum account size on Solana (10 MB).
///
/// This is a hard limit enforced by the Solana runtime. Sizing a record
/// beyond it fails with [`CodecError::AccountTooLarge`].
pub const MAX_ACCOUNT_SIZE: usize = 10 * 1024 * 1024;

/// Bytes of account metadata the runtime charges rent for on top of the data.
pub const ACCOUNT_STORAGE_OVERHEAD: u64 = 128;

/// Approximate lamports required per byte for rent exemption.
///
/// Equals `lamports_per_byte_year * exemption_threshold` under the default
/// [`RentParams`]. For exact figures read the Rent sysvar with
/// [`RentParams::fetch`].
pub const LAMPORTS_PER_BYTE: u64 = 6960;

/// Calculate the minimum rent-exempt balance for an account of the given size.
///
/// The calculation includes the 128-byte account metadata overhead that
/// Solana adds to all accounts.
///
/// # Example
///
/// ```ignore
/// const USER_ACCOUNT_RENT: u64 = rent_exempt_minimum(60);
/// ```
#[inline]
pub const fn rent_exempt_minimum(data_len: usize) -> u64 {
    (ACCOUNT_STORAGE_OVERHEAD + data_len as u64) * LAMPORTS_PER_BYTE
}

/// Rent parameters, laid out exactly as the Rent sysvar stores them
/// (17 bytes: `u64`, `f64`, `u8`).
#[derive(Beet, Clone, Copy, Debug, PartialEq)]
pub struct RentParams {
    pub lamports_per_byte_year: u64,
    pub exemption_threshold: f64,
    pub burn_percent: u8,
}

impl Default for RentParams {
    fn default() -> Self {
        Self {
            lamports_per_byte_year: 3480,
            exemption_threshold: 2.0,
            burn_percent: 50,
        }
    }
}

impl RentParams {
    /// Minimum lamports that make an account of `data_len` bytes rent exempt.
    ///
    /// # Errors
    ///
    /// [`CodecError::RentOverflow`] when parameters read from an untrusted
    /// source push the balance past `u64::MAX` (or make it non-finite).
    pub fn minimum_balance(&self, data_len: usize) -> Result<u64> {
        let overflow = || CodecError::RentOverflow { data_len };
        let bytes = (data_len as u64)
            .checked_add(ACCOUNT_STORAGE_OVERHEAD)
            .ok_or_else(overflow)?;
        let per_year = bytes
            .checked_mul(self.lamports_per_byte_year)
            .ok_or_else(overflow)?;
        let lamports = per_year as f64 * self.exemption_threshold;
        if !lamports.is_finite() || lamports < 0.0 || lamports >= u64::MAX as f64 {
            log::debug!("rejecting rent parameters {:?} for {} bytes", self, data_len);
            return Err(overflow());
        }
        Ok(lamports as u64)
    }

    /// Read the live parameters from the Rent sysvar.
    pub fn fetch<F: AccountFetcher + ?Sized>(fetcher: &F) -> Result<Self> {
        let data = fetcher
            .fetch_account_data(&RENT_SYSVAR_ID)
            .ok_or_else(|| not_found("Rent", &RENT_SYSVAR_ID))?;
        let (rent, _) = Self::decode(&data, 0)?;
        Ok(rent)
    }
}

/// Source of raw account bytes, typically an RPC client.
///
/// Returns `None` when no account exists at the address. Timeouts and retries
/// belong to the implementor; the codec never retries.
pub trait AccountFetcher {
    fn fetch_account_data(&self, address: &Address) -> Option<Vec<u8>>;
}

impl<F> AccountFetcher for F
where
    F: Fn(&Address) -> Option<Vec<u8>>,
{
    #[inline]
    fn fetch_account_data(&self, address: &Address) -> Option<Vec<u8>> {
        self(address)
    }
}

fn not_found(account: &'static str, address: &Address) -> CodecError {
    CodecError::NotFound {
        account,
        address: bs58::encode(address.as_ref()).into_string(),
    }
}

/// A persisted account shape.
///
/// The record's first encoded byte is its account-type tag, and
/// [`DISCRIMINATOR`](Self::DISCRIMINATOR) is the tag a live account of this
/// type carries. Plain [`Beet::decode`] does not check it; use
/// [`from_account_data`](Self::from_account_data) when loading state.
pub trait AccountRecord: Beet + Describe {
    /// Account name used in errors and logs.
    const NAME: &'static str;

    /// Leading account-type tag of an initialized account.
    const DISCRIMINATOR: u8;

    /// Input to [`from_fields`](Self::from_fields).
    type Fields;

    /// Build a record, validating field invariants.
    ///
    /// # Errors
    ///
    /// [`CodecError::InvalidFixedLength`] when a dynamically sized input does
    /// not match its fixed array length.
    fn from_fields(fields: Self::Fields) -> Result<Self>;

    /// Decode raw account data, checking the account-type tag first.
    ///
    /// Bytes past the record are ignored: accounts may be allocated larger
    /// than their current encoding.
    fn from_account_data(data: &[u8]) -> Result<Self> {
        let result = match data.first() {
            None => Err(CodecError::Truncated {
                type_name: Self::NAME,
                offset: 0,
                needed: 1,
                remaining: 0,
            }),
            Some(&found) if found != Self::DISCRIMINATOR => Err(CodecError::AccountTypeMismatch {
                expected: Self::NAME,
                expected_tag: Self::DISCRIMINATOR,
                found,
            }),
            Some(_) => Self::decode(data, 0).map(|(record, _)| record),
        };
        if let Err(e) = &result {
            log::debug!("failed to load {} account: {}", Self::NAME, e);
        }
        result
    }

    /// Fetch and decode the account at `address`.
    ///
    /// # Errors
    ///
    /// [`CodecError::NotFound`] when the fetcher reports no account.
    fn fetch<F: AccountFetcher + ?Sized>(fetcher: &F, address: &Address) -> Result<Self> {
        let Some(data) = fetcher.fetch_account_data(address) else {
            log::debug!("no {} account at {}", Self::NAME, bs58::encode(address.as_ref()).into_string());
            return Err(not_found(Self::NAME, address));
        };
        Self::from_account_data(&data)
    }

    /// Encoded size of the record built from `fields`.
    ///
    /// Must be called with the same fields that will later be encoded.
    fn byte_size_of(fields: Self::Fields) -> Result<usize> {
        Ok(Self::from_fields(fields)?.byte_size())
    }

    /// Lamports needed to make an account holding these fields rent exempt.
    fn rent_exempt_minimum_for(fields: Self::Fields, rent: &RentParams) -> Result<u64> {
        let size = Self::byte_size_of(fields)?;
        if size > MAX_ACCOUNT_SIZE {
            return Err(CodecError::AccountTooLarge {
                size,
                max: MAX_ACCOUNT_SIZE,
            });
        }
        rent.minimum_balance(size)
    }

    /// Filters selecting every account of this type owned by the program.
    ///
    /// Fixed-size records also filter on their exact data size.
    fn program_account_filters() -> Vec<AccountFilter> {
        let mut filters = vec![AccountFilter::Memcmp {
            offset: 0,
            bytes: vec![Self::DISCRIMINATOR],
        }];
        if let Some(size) = Self::FIXED_SIZE {
            filters.push(AccountFilter::DataSize(size));
        }
        filters
    }
}

/// A program-account scan filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountFilter {
    /// Account data is exactly this many bytes.
    DataSize(usize),
    /// Account data holds `bytes` at `offset`.
    Memcmp { offset: usize, bytes: Vec<u8> },
}

impl AccountFilter {
    /// Memcmp filter matching `value` in field `name` of `T`.
    ///
    /// Returns `Ok(None)` if `T` has no such field or the field follows a
    /// variable-size one (its offset is not constant).
    ///
    /// # Errors
    ///
    /// Propagates the error if `value` fails to encode.
    pub fn field<T: BeetStruct, V: Beet>(name: &str, value: &V) -> Result<Option<Self>> {
        let Some(offset) = T::field_offset(name) else {
            return Ok(None);
        };
        let bytes = value.encode()?;
        Ok(Some(AccountFilter::Memcmp { offset, bytes }))
    }

    /// Whether raw account data passes this filter.
    pub fn matches(&self, data: &[u8]) -> bool {
        match self {
            AccountFilter::DataSize(size) => data.len() == *size,
            AccountFilter::Memcmp { offset, bytes } => data
                .get(*offset..offset.saturating_add(bytes.len()))
                .is_some_and(|window| window == bytes.as_slice()),
        }
    }

    /// JSON-RPC `getProgramAccounts` filter object.
    pub fn to_rpc_json(&self) -> Value {
        match self {
            AccountFilter::DataSize(size) => json!({ "dataSize": size }),
            AccountFilter::Memcmp { offset, bytes } => json!({
                "memcmp": {
                    "offset": offset,
                    "bytes": bs58::encode(bytes).into_string(),
                }
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{put, FixableSize};
    use crate::Pretty;

    #[derive(Beet, Clone, Debug, PartialEq)]
    struct Counter {
        account_type: u8,
        authority: Address,
        count: u64,
    }

    impl AccountRecord for Counter {
        const NAME: &'static str = "Counter";
        const DISCRIMINATOR: u8 = 3;
        type Fields = Self;

        fn from_fields(fields: Self) -> Result<Self> {
            Ok(fields)
        }
    }

    #[derive(Beet, Clone, Debug, PartialEq)]
    struct Profile {
        account_type: u8,
        name: String,
        level: u8,
    }

    fn counter() -> Counter {
        Counter {
            account_type: 3,
            authority: Address::new_from_array([7u8; 32]),
            count: 11,
        }
    }

    #[test]
    fn test_rent_exempt_minimum() {
        // 128 bytes overhead * 6960
        assert_eq!(rent_exempt_minimum(0), 890_880);
        assert_eq!(rent_exempt_minimum(100), 228 * 6960);
    }

    #[test]
    fn test_default_rent_agrees_with_const() {
        let rent = RentParams::default();
        for len in [0usize, 41, 60, 1_000, 10_240] {
            assert_eq!(rent.minimum_balance(len).unwrap(), rent_exempt_minimum(len));
        }
    }

    #[test]
    fn test_hostile_rent_params_do_not_panic() {
        let huge = RentParams {
            lamports_per_byte_year: u64::MAX / 2,
            ..RentParams::default()
        };
        let data = huge.encode().unwrap();
        let fetcher = |_: &Address| Some(data.clone());
        let fetched = RentParams::fetch(&fetcher).unwrap();
        assert_eq!(fetched.minimum_balance(60), Err(CodecError::RentOverflow { data_len: 60 }));
        assert_eq!(
            Counter::rent_exempt_minimum_for(counter(), &fetched),
            Err(CodecError::RentOverflow { data_len: 41 })
        );

        // Fits the multiply but not the threshold scaling.
        let scaled = RentParams {
            lamports_per_byte_year: 1 << 50,
            exemption_threshold: 1e9,
            burn_percent: 0,
        };
        assert!(scaled.minimum_balance(0).is_err());

        let nan = RentParams {
            exemption_threshold: f64::NAN,
            ..RentParams::default()
        };
        assert_eq!(nan.minimum_balance(1).unwrap_err().kind(), crate::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_rent_sysvar_layout() {
        assert_eq!(<RentParams as Beet>::FIXED_SIZE, Some(17));
        let mut data = RentParams::default().encode().unwrap();
        assert_eq!(&data[..8], &3480u64.to_le_bytes());
        assert_eq!(data[16], 50);

        // The sysvar account may be larger than the struct.
        data.extend_from_slice(&[0u8; 8]);
        let fetcher = |address: &Address| (address == &RENT_SYSVAR_ID).then(|| data.clone());
        assert_eq!(RentParams::fetch(&fetcher).unwrap(), RentParams::default());
    }

    #[test]
    fn test_from_account_data_checks_tag() {
        let bytes = counter().encode().unwrap();
        assert_eq!(Counter::from_account_data(&bytes).unwrap(), counter());

        let mut uninitialized = bytes.clone();
        uninitialized[0] = 0;
        assert_eq!(
            Counter::from_account_data(&uninitialized),
            Err(CodecError::AccountTypeMismatch {
                expected: "Counter",
                expected_tag: 3,
                found: 0,
            })
        );

        assert!(matches!(
            Counter::from_account_data(&[]),
            Err(CodecError::Truncated { remaining: 0, .. })
        ));
        assert!(matches!(
            Counter::from_account_data(&bytes[..20]),
            Err(CodecError::Truncated { .. })
        ));
    }

    #[test]
    fn test_from_account_data_ignores_slack() {
        let mut bytes = counter().encode().unwrap();
        bytes.extend_from_slice(&[0u8; 16]);
        assert_eq!(Counter::from_account_data(&bytes).unwrap(), counter());
    }

    #[test]
    fn test_fetch_not_found() {
        let empty = |_: &Address| -> Option<Vec<u8>> { None };
        let address = Address::new_from_array([0u8; 32]);
        let err = Counter::fetch(&empty, &address).unwrap_err();
        assert_eq!(
            err,
            CodecError::NotFound {
                account: "Counter",
                address: "11111111111111111111111111111111".into(),
            }
        );
        assert_eq!(err.kind(), crate::ErrorKind::NotFound);
    }

    #[test]
    fn test_sizing_and_rent() {
        assert_eq!(Counter::byte_size_of(counter()).unwrap(), 41);
        assert_eq!(
            Counter::rent_exempt_minimum_for(counter(), &RentParams::default()).unwrap(),
            rent_exempt_minimum(41)
        );
    }

    #[test]
    fn test_program_account_filters() {
        let filters = Counter::program_account_filters();
        assert_eq!(
            filters,
            vec![
                AccountFilter::Memcmp {
                    offset: 0,
                    bytes: vec![3],
                },
                AccountFilter::DataSize(41),
            ]
        );
        let bytes = counter().encode().unwrap();
        assert!(filters.iter().all(|f| f.matches(&bytes)));
        assert!(!filters[1].matches(&bytes[..40]));
    }

    #[test]
    fn test_field_filter() {
        let authority = Address::new_from_array([7u8; 32]);
        let filter = AccountFilter::field::<Counter, _>("authority", &authority).unwrap().unwrap();
        assert_eq!(
            filter,
            AccountFilter::Memcmp {
                offset: 1,
                bytes: vec![7u8; 32],
            }
        );
        assert!(filter.matches(&counter().encode().unwrap()));

        // `level` follows a string, so its offset is not constant.
        assert_eq!(AccountFilter::field::<Profile, _>("level", &1u8), Ok(None));
        assert_eq!(AccountFilter::field::<Counter, _>("missing", &1u8), Ok(None));
    }

    /// Sizes itself one byte short of what it writes.
    struct Undersized;

    impl FixableSize for Undersized {
        fn byte_size(&self) -> usize {
            1
        }
    }

    impl Beet for Undersized {
        const FIXED_SIZE: Option<usize> = None;
        const TYPE_NAME: &'static str = "Undersized";

        fn write(&self, buf: &mut [u8], offset: usize) -> Result<usize> {
            put(buf, offset, &[1, 2], Self::TYPE_NAME)
        }

        fn read(_buf: &[u8], offset: usize) -> Result<(Self, usize)> {
            Ok((Undersized, offset))
        }
    }

    #[test]
    fn test_field_filter_reports_encode_failure() {
        let err = AccountFilter::field::<Counter, _>("count", &Undersized).unwrap_err();
        assert!(matches!(err, CodecError::BufferTooSmall { type_name: "Undersized", .. }));
        // An unknown field is still not an error.
        assert_eq!(AccountFilter::field::<Counter, _>("missing", &Undersized), Ok(None));
    }

    #[test]
    fn test_filter_rpc_json() {
        let filter = AccountFilter::Memcmp {
            offset: 0,
            bytes: vec![3],
        };
        assert_eq!(
            filter.to_rpc_json().to_string(),
            r#"{"memcmp":{"bytes":"4","offset":0}}"#
        );
        assert_eq!(AccountFilter::DataSize(41).to_rpc_json().to_string(), r#"{"dataSize":41}"#);
    }

    #[test]
    fn test_describe_record() {
        let pretty = counter().describe();
        assert_eq!(pretty.field("count"), Some(&Pretty::Number(11)));
        assert!(matches!(pretty.field("authority"), Some(Pretty::Identity(_))));
    }
}
