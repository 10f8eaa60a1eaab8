use shank::ShankAccount;
use solana_address::Address;
use solbeet::{AccountRecord, Beet, Result};

use super::StateAccountType;

/// A bettor's (or host's) balance held by the program.
#[derive(Beet, ShankAccount, Clone, Debug, PartialEq)]
pub struct UserAccount {
    pub account_type: StateAccountType,
    pub authority: Address,
    pub total_bets: u32,
    pub current_lamports: u64,
    pub active_vrf_results: u32,
    pub referral: Option<Address>,
    pub username: Option<String>,
}

impl UserAccount {
    /// A freshly created account with no balance.
    pub fn new(authority: Address, referral: Option<Address>, username: Option<String>) -> Self {
        Self {
            account_type: StateAccountType::UserAccount,
            authority,
            total_bets: 0,
            current_lamports: 0,
            active_vrf_results: 0,
            referral,
            username,
        }
    }
}

impl AccountRecord for UserAccount {
    const NAME: &'static str = "UserAccount";
    const DISCRIMINATOR: u8 = StateAccountType::UserAccount as u8;
    type Fields = Self;

    fn from_fields(fields: Self) -> Result<Self> {
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solbeet::{AccountFilter, CodecError, Describe, FixableSize, Pretty};

    fn alice() -> UserAccount {
        UserAccount {
            current_lamports: 1_000_000,
            ..UserAccount::new(Address::new_from_array([1u8; 32]), None, Some("alice".to_string()))
        }
    }

    #[test]
    fn test_size_tracks_optionals() {
        let bare = UserAccount::new(Address::new_from_array([1u8; 32]), None, None);
        assert_eq!(bare.byte_size(), 51);
        assert_eq!(UserAccount::byte_size_of(bare).unwrap(), 51);

        let full = UserAccount::new(
            Address::new_from_array([1u8; 32]),
            Some(Address::new_from_array([2u8; 32])),
            Some("bob".to_string()),
        );
        assert_eq!(full.byte_size(), 51 + 32 + 4 + 3);
    }

    #[test]
    fn test_load_rejects_other_account_types() {
        let mut bytes = alice().encode().unwrap();
        assert_eq!(UserAccount::from_account_data(&bytes).unwrap(), alice());

        bytes[0] = StateAccountType::Game as u8;
        assert_eq!(
            UserAccount::from_account_data(&bytes),
            Err(CodecError::AccountTypeMismatch {
                expected: "UserAccount",
                expected_tag: 2,
                found: 4,
            })
        );
    }

    #[test]
    fn test_truncated_username() {
        let bytes = alice().encode().unwrap();
        let err = UserAccount::decode(&bytes[..bytes.len() - 2], 0).unwrap_err();
        assert!(matches!(err, CodecError::Truncated { type_name: "string", .. }));
    }

    #[test]
    fn test_describe() {
        let pretty = alice().describe();
        assert_eq!(pretty.field("username"), Some(&Pretty::Text("alice".to_string())));
        assert_eq!(pretty.field("referral"), Some(&Pretty::Absent));
        assert_eq!(pretty.field("current_lamports"), Some(&Pretty::Number(1_000_000)));
        assert_eq!(
            pretty.field("authority"),
            Some(&Pretty::Identity(
                "4vJ9JU1bJJE96FWSJKvHsmmFADCg4gpZQff4P3bkLKi".to_string()
            ))
        );
    }

    #[test]
    fn test_filter_by_authority() {
        let filter = AccountFilter::field::<UserAccount, _>("authority", &alice().authority).unwrap().unwrap();
        assert_eq!(
            filter,
            AccountFilter::Memcmp {
                offset: 1,
                bytes: vec![1u8; 32],
            }
        );
        // Behind the optional referral, username has no constant offset.
        assert_eq!(AccountFilter::field::<UserAccount, _>("username", &Some("alice".to_string())), Ok(None));
    }
}
