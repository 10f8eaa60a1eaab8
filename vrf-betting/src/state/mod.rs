//! Persisted account state.
//!
//! Every record starts with a [`StateAccountType`] tag; a zeroed tag marks
//! an allocated but uninitialized account.

mod game;
mod stats;
mod user_account;
mod vrf_result;

use solbeet::Beet;

pub use game::{BetInput, CoinFlipConfig, CoinFlipInput, CoinFlipSide, CommonGameConfig, CrashConfig, CrashInput, Game, GameTypeConfig};
pub use stats::Stats;
pub use user_account::UserAccount;
pub use vrf_result::{VrfResult, VrfResultFields, ALPHA_LEN, BETA_LEN, PI_LEN};

/// Leading tag of every program account.
#[derive(Beet, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateAccountType {
    Uninitialized,
    Stats,
    UserAccount,
    Vrf,
    Game,
}

#[cfg(test)]
mod tests {
    use super::*;
    use solbeet::{CodecError, DataEnum, Describe, Pretty};

    #[test]
    fn test_account_type_is_one_fixed_byte() {
        assert_eq!(<StateAccountType as Beet>::FIXED_SIZE, Some(1));
        assert_eq!(StateAccountType::Game.encode().unwrap(), vec![4]);
        assert_eq!(StateAccountType::decode(&[2], 0).unwrap(), (StateAccountType::UserAccount, 1));
        assert_eq!(StateAccountType::Vrf.variant_name(), "Vrf");
    }

    #[test]
    fn test_account_type_unknown_tag() {
        assert_eq!(
            StateAccountType::decode(&[5], 0),
            Err(CodecError::UnknownVariant {
                type_name: "StateAccountType",
                discriminant: 5,
                offset: 0,
            })
        );
    }

    #[test]
    fn test_account_type_describes_symbolically() {
        assert_eq!(
            StateAccountType::Stats.describe(),
            Pretty::Symbol("StateAccountType.Stats".to_string())
        );
    }
}
