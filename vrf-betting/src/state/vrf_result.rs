use shank::ShankAccount;
use solana_address::Address;
use solbeet::{fixed_array, AccountRecord, Beet, Result};

use super::{BetInput, StateAccountType};

/// Length of the VRF input (alpha) derived when a bet is placed.
pub const ALPHA_LEN: usize = 72;
/// Length of the VRF output (beta).
pub const BETA_LEN: usize = 64;
/// Length of the VRF proof (pi).
pub const PI_LEN: usize = 80;

/// One placed bet awaiting, or holding, its VRF output.
#[derive(Beet, ShankAccount, Clone, Debug, PartialEq)]
pub struct VrfResult {
    pub account_type: StateAccountType,
    pub is_fullfilled: bool,
    pub is_used: bool,
    pub marked_for_close: bool,
    pub owner: Address,
    pub game: Address,
    pub bet_id: u32,
    pub alpha: [u8; 72],
    pub beta: [u8; 64],
    pub pi: [u8; 80],
    pub bet_input: BetInput,
}

/// [`VrfResult`] fields with the VRF byte strings as they arrive from
/// outside (RPC JSON, user input): unchecked, dynamically sized.
#[derive(Clone, Debug, PartialEq)]
pub struct VrfResultFields {
    pub account_type: StateAccountType,
    pub is_fullfilled: bool,
    pub is_used: bool,
    pub marked_for_close: bool,
    pub owner: Address,
    pub game: Address,
    pub bet_id: u32,
    pub alpha: Vec<u8>,
    pub beta: Vec<u8>,
    pub pi: Vec<u8>,
    pub bet_input: BetInput,
}

impl VrfResult {
    /// A pending result as created by `GamePlaceBet`: no output or proof yet.
    pub fn new(owner: Address, game: Address, bet_id: u32, alpha: [u8; ALPHA_LEN], bet_input: BetInput) -> Self {
        Self {
            account_type: StateAccountType::Vrf,
            is_fullfilled: false,
            is_used: false,
            marked_for_close: false,
            owner,
            game,
            bet_id,
            alpha,
            beta: [0; BETA_LEN],
            pi: [0; PI_LEN],
            bet_input,
        }
    }

    /// Whether the game can resolve this bet now.
    pub fn is_resolvable(&self) -> bool {
        self.is_fullfilled && !self.is_used
    }
}

impl AccountRecord for VrfResult {
    const NAME: &'static str = "VrfResult";
    const DISCRIMINATOR: u8 = StateAccountType::Vrf as u8;
    type Fields = VrfResultFields;

    fn from_fields(fields: VrfResultFields) -> Result<Self> {
        let alpha = fixed_array(fields.alpha);
        let beta = fixed_array(fields.beta);
        let pi = fixed_array(fields.pi);
        let (alpha, beta, pi) = match (alpha, beta, pi) {
            (Ok(alpha), Ok(beta), Ok(pi)) => (alpha, beta, pi),
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                log::debug!("rejecting VrfResult fields for bet {}: {}", fields.bet_id, e);
                return Err(e);
            }
        };
        Ok(Self {
            account_type: fields.account_type,
            is_fullfilled: fields.is_fullfilled,
            is_used: fields.is_used,
            marked_for_close: fields.marked_for_close,
            owner: fields.owner,
            game: fields.game,
            bet_id: fields.bet_id,
            alpha,
            beta,
            pi,
            bet_input: fields.bet_input,
        })
    }
}

impl From<VrfResult> for VrfResultFields {
    fn from(record: VrfResult) -> Self {
        Self {
            account_type: record.account_type,
            is_fullfilled: record.is_fullfilled,
            is_used: record.is_used,
            marked_for_close: record.marked_for_close,
            owner: record.owner,
            game: record.game,
            bet_id: record.bet_id,
            alpha: record.alpha.to_vec(),
            beta: record.beta.to_vec(),
            pi: record.pi.to_vec(),
            bet_input: record.bet_input,
        }
    }
}
