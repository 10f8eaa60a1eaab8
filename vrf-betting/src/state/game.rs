use shank::ShankAccount;
use solana_address::Address;
use solbeet::{AccountRecord, Beet, Result};

use super::StateAccountType;

/// Wager bounds shared by every game type.
#[derive(Beet, Clone, Debug, PartialEq, Eq)]
pub struct CommonGameConfig {
    pub min_wager: u64,
    pub max_wager: u64,
}

/// Coin flip parameters, both in basis points.
#[derive(Beet, Clone, Debug, PartialEq, Eq)]
pub struct CoinFlipConfig {
    pub host_probability_advantage: u64,
    pub payout_rate: u64,
}

#[derive(Beet, Clone, Debug, PartialEq, Eq)]
pub struct CrashConfig {
    /// Chance, in basis points, that the multiplier crashes at exactly 1x.
    pub multiplier_straight_one_possibility: u64,
}

#[derive(Beet, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoinFlipSide {
    Head,
    Tail,
}

#[derive(Beet, Clone, Debug, PartialEq, Eq)]
pub struct CoinFlipInput {
    pub wager: u64,
    pub side: CoinFlipSide,
}

#[derive(Beet, Clone, Debug, PartialEq, Eq)]
pub struct CrashInput {
    /// Cash-out multiplier in hundredths (`250` is 2.5x).
    pub target_multiplier: u64,
    pub wager: u64,
}

/// Per-game-type configuration of a [`Game`].
#[derive(Beet, Clone, Debug, PartialEq, Eq)]
pub enum GameTypeConfig {
    CoinFlip { config: CoinFlipConfig },
    Crash { config: CrashConfig },
}

/// A bettor's input, matching the game type it is placed on.
#[derive(Beet, Clone, Debug, PartialEq, Eq)]
pub enum BetInput {
    CoinFlip { input: CoinFlipInput },
    Crash { input: CrashInput },
}

impl BetInput {
    pub fn wager(&self) -> u64 {
        match self {
            BetInput::CoinFlip { input } => input.wager,
            BetInput::Crash { input } => input.wager,
        }
    }

    /// Whether this input can be placed on a game configured with `config`.
    pub fn fits(&self, config: &GameTypeConfig) -> bool {
        matches!(
            (self, config),
            (BetInput::CoinFlip { .. }, GameTypeConfig::CoinFlip { .. })
                | (BetInput::Crash { .. }, GameTypeConfig::Crash { .. })
        )
    }
}

/// A hosted game.
#[derive(Beet, ShankAccount, Clone, Debug, PartialEq)]
pub struct Game {
    pub account_type: StateAccountType,
    pub host: Address,
    pub is_active: bool,
    pub unresolved_vrf_result: u32,
    pub total_lamports_in: u64,
    pub total_lamports_out: u64,
    pub common_config: CommonGameConfig,
    pub game_type_config: GameTypeConfig,
}

impl Game {
    /// A freshly created, active game.
    pub fn new(host: Address, min_wager: u64, max_wager: u64, game_type_config: GameTypeConfig) -> Self {
        Self {
            account_type: StateAccountType::Game,
            host,
            is_active: true,
            unresolved_vrf_result: 0,
            total_lamports_in: 0,
            total_lamports_out: 0,
            common_config: CommonGameConfig { min_wager, max_wager },
            game_type_config,
        }
    }
}

impl AccountRecord for Game {
    const NAME: &'static str = "Game";
    const DISCRIMINATOR: u8 = StateAccountType::Game as u8;
    type Fields = Self;

    fn from_fields(fields: Self) -> Result<Self> {
        Ok(fields)
    }
}
