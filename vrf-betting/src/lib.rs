//! # VRF Betting - Account and Instruction Schema
//!
//! Typed records and instruction descriptors for the VRF betting program,
//! built on the `solbeet` codecs. Hosts create games (coin flip or crash),
//! bettors place bets funded from their user account, and an operator
//! fulfills each bet's VRF result before the game resolves it.
//!
//! ## Accounts
//!
//! | Record | Tag | Seeds |
//! |--------|-----|-------|
//! | [`Stats`] | 1 | `"Stats"` |
//! | [`UserAccount`] | 2 | `"UserAccount"`, authority |
//! | [`VrfResult`] | 3 | `"VrfResult"`, game, owner, bet id (LE) |
//! | [`Game`] | 4 | `"Game"`, common config, game type config |
//!
//! ## Example
//!
//! ```ignore
//! use vrf_betting::{instructions, pda, GameSetActiveArgs};
//!
//! let (game, _) = pda::game_address(&common_config, &game_type_config)?;
//! let ix = instructions::GAME_SET_ACTIVE.build(
//!     &[Some(host), Some(game)],
//!     &GameSetActiveArgs { is_active: false },
//! )?;
//! ```

use solana_address::Address;

pub mod instructions;
pub mod pda;
pub mod state;

pub use instructions::{
    BettingInstruction, GameCreateArgs, GamePlaceBetArgs, GameSetActiveArgs, UserAccountCreateArgs,
    UserAccountDepositArgs, UserAccountWithdrawArgs, VrfResultFullfillArgs,
};
pub use state::{
    BetInput, CoinFlipConfig, CoinFlipInput, CoinFlipSide, CommonGameConfig, CrashConfig, CrashInput, Game,
    GameTypeConfig, StateAccountType, Stats, UserAccount, VrfResult, VrfResultFields,
};

/// Program ID
pub const PROGRAM_ID: Address =
    Address::new_from_array(pinocchio_pubkey::pubkey!("9f2Yc9UYah7ARVMvJLVTqnJCnDv3ofSG1PSvJwikgEn4"));

/// The operator wallet allowed to create stats and fulfill VRF results.
pub const OPERATOR_ID: Address = Address::new_from_array([
    34, 72, 149, 62, 248, 255, 6, 27, 196, 250, 44, 189, 21, 35, 70, 134, 103, 80, 185, 50, 9, 76, 168, 111, 226, 48,
    58, 221, 46, 143, 217, 96,
]);
