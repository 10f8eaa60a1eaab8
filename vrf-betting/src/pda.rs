//! Program-derived addresses of the betting program's accounts.
//!
//! Every helper returns the canonical `(address, bump)` pair for
//! [`PROGRAM_ID`](crate::PROGRAM_ID). Deriving a PDA costs a few curve checks
//! per bump tried; cache the result when deriving in a loop.

use solana_address::Address;
use solbeet::{Beet, Result};

use crate::state::{CommonGameConfig, GameTypeConfig, UserAccount};
use crate::PROGRAM_ID;

pub const STATS_SEED: &[u8] = b"Stats";
pub const USER_ACCOUNT_SEED: &[u8] = b"UserAccount";
pub const GAME_SEED: &[u8] = b"Game";
pub const VRF_RESULT_SEED: &[u8] = b"VrfResult";

#[inline]
fn find(seeds: &[&[u8]]) -> (Address, u8) {
    Address::find_program_address(seeds, &PROGRAM_ID)
}

/// The program-wide [`Stats`](crate::Stats) singleton.
pub fn stats_address() -> (Address, u8) {
    find(&[STATS_SEED])
}

/// The [`UserAccount`] owned by `authority`.
pub fn user_account_address(authority: &Address) -> (Address, u8) {
    find(&[USER_ACCOUNT_SEED, authority.as_ref()])
}

/// The [`Game`](crate::Game) hosted with this configuration.
///
/// The seeds are the encoded configs alone, with no host key, so at most one
/// game can exist per configuration across all hosts.
pub fn game_address(common_config: &CommonGameConfig, game_type_config: &GameTypeConfig) -> Result<(Address, u8)> {
    let common = common_config.encode()?;
    let game_type = game_type_config.encode()?;
    Ok(find(&[GAME_SEED, common.as_slice(), game_type.as_slice()]))
}

/// The [`VrfResult`](crate::VrfResult) of bet number `bet_id` placed by
/// `owner` on `game`.
pub fn vrf_result_address(game: &Address, owner: &Address, bet_id: u32) -> (Address, u8) {
    find(&[VRF_RESULT_SEED, game.as_ref(), owner.as_ref(), &bet_id.to_le_bytes()])
}

/// Where the next bet of `bettor` on `game` lands: bet ids count the
/// bettor's placed bets.
pub fn next_vrf_result_address(game: &Address, bettor: &UserAccount) -> (Address, u8) {
    vrf_result_address(game, &bettor.authority, bettor.total_bets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CoinFlipConfig, CrashConfig, Game};

    fn common() -> CommonGameConfig {
        CommonGameConfig {
            min_wager: 1_000,
            max_wager: 1_000_000,
        }
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let authority = Address::new_from_array([3u8; 32]);
        assert_eq!(user_account_address(&authority), user_account_address(&authority));
        assert_ne!(
            user_account_address(&authority).0,
            user_account_address(&Address::new_from_array([4u8; 32])).0
        );
        assert_eq!(stats_address(), find(&[&b"Stats"[..]]));
    }

    #[test]
    fn test_game_seeds_include_both_configs() {
        let crash = GameTypeConfig::Crash {
            config: CrashConfig {
                multiplier_straight_one_possibility: 100,
            },
        };
        let coin = GameTypeConfig::CoinFlip {
            config: CoinFlipConfig {
                host_probability_advantage: 100,
                payout_rate: 9_800,
            },
        };
        let (crash_game, _) = game_address(&common(), &crash).unwrap();
        let (coin_game, _) = game_address(&common(), &coin).unwrap();
        assert_ne!(crash_game, coin_game);

        let expected = find(&[
            &b"Game"[..],
            &[0xe8, 0x03, 0, 0, 0, 0, 0, 0, 0x40, 0x42, 0x0f, 0, 0, 0, 0, 0][..],
            &[1, 100, 0, 0, 0, 0, 0, 0, 0][..],
        ]);
        assert_eq!(game_address(&common(), &crash).unwrap(), expected);
    }

    #[test]
    fn test_game_address_ignores_host() {
        let crash = GameTypeConfig::Crash {
            config: CrashConfig {
                multiplier_straight_one_possibility: 100,
            },
        };
        let mut game = Game::new(Address::new_from_array([1u8; 32]), 1_000, 1_000_000, crash);
        let first = game_address(&game.common_config, &game.game_type_config).unwrap();
        game.host = Address::new_from_array([2u8; 32]);
        let second = game_address(&game.common_config, &game.game_type_config).unwrap();
        assert_eq!(first, second, "a second host with the same configuration hits the same address");
    }

    #[test]
    fn test_vrf_result_uses_bet_count() {
        let game = Address::new_from_array([5u8; 32]);
        let mut bettor = UserAccount::new(Address::new_from_array([6u8; 32]), None, None);
        bettor.total_bets = 41;

        let next = next_vrf_result_address(&game, &bettor);
        assert_eq!(next, vrf_result_address(&game, &bettor.authority, 41));
        assert_ne!(next.0, vrf_result_address(&game, &bettor.authority, 42).0);
    }
}
