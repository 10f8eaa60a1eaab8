//! Instruction descriptors of the betting program.
//!
//! Each instruction has a `const` [`InstructionDescriptor`] whose
//! discriminant is its position in [`BettingInstruction`]. Role lists follow
//! the program's account order; flags are declared, never inferred.

use shank::ShankInstruction;
use solana_address::Address;
use solbeet::{AccountRole, Beet, DataEnum, Instruction, InstructionDescriptor, Result, SLOT_HASHES_SYSVAR_ID, SYSTEM_PROGRAM_ID};

use crate::state::{BetInput, CommonGameConfig, GameTypeConfig, BETA_LEN, PI_LEN};
use crate::{OPERATOR_ID, PROGRAM_ID};

#[derive(Beet, Clone, Debug, PartialEq, Eq)]
pub struct UserAccountCreateArgs {
    pub username: Option<String>,
    pub referral: Option<Address>,
}

#[derive(Beet, Clone, Debug, PartialEq, Eq)]
pub struct UserAccountDepositArgs {
    pub lamports: u64,
}

#[derive(Beet, Clone, Debug, PartialEq, Eq)]
pub struct UserAccountWithdrawArgs {
    pub lamports: u64,
}

#[derive(Beet, Clone, Debug, PartialEq, Eq)]
pub struct GameCreateArgs {
    pub common_config: CommonGameConfig,
    pub game_type_config: GameTypeConfig,
}

#[derive(Beet, Clone, Debug, PartialEq, Eq)]
pub struct GameSetActiveArgs {
    pub is_active: bool,
}

#[derive(Beet, Clone, Debug, PartialEq, Eq)]
pub struct GamePlaceBetArgs {
    pub bet_input: BetInput,
}

/// Output and proof the operator submits for a pending VRF result.
#[derive(Beet, Clone, Debug, PartialEq, Eq)]
pub struct VrfResultFullfillArgs {
    pub beta: [u8; BETA_LEN],
    pub pi: [u8; PI_LEN],
}

const OPERATOR_DESC: &str = "Operator Account";
const STATS_DESC: &str = "Stats PDA Account";
const SYSTEM_DESC: &str = "System Program Account";
const WALLET_DESC: &str = "User Wallet Account";
const USER_ACCOUNT_DESC: &str = "User Betting Account";
const HOST_DESC: &str = "The wallet account of the host";
const GAME_DESC: &str = "Game PDA Account";
const BETTOR_DESC: &str = "Bettor wallet account";
const BETTOR_USER_DESC: &str = "Bettor user account";
const HOST_USER_DESC: &str = "Host user account";
const VRF_RESULT_DESC: &str = "VRF result PDA account";

const fn system_program() -> AccountRole {
    AccountRole::new("system_program")
        .desc(SYSTEM_DESC)
        .default_address(SYSTEM_PROGRAM_ID)
}

const STATS_ACCOUNT_CREATE_ROLES: &[AccountRole] = &[
    AccountRole::new("operator").writable().signer().desc(OPERATOR_DESC),
    AccountRole::new("stats_pda").writable().desc(STATS_DESC),
    system_program(),
];

const USER_ACCOUNT_CREATE_ROLES: &[AccountRole] = &[
    AccountRole::new("user_wallet_account").writable().signer().desc(WALLET_DESC),
    AccountRole::new("user_account").writable().desc(USER_ACCOUNT_DESC),
    AccountRole::new("stats_pda").writable().desc(STATS_DESC),
    system_program(),
];

const USER_ACCOUNT_DEPOSIT_ROLES: &[AccountRole] = &[
    AccountRole::new("depositor")
        .writable()
        .signer()
        .desc("The account to transfer lamports from"),
    AccountRole::new("user_account").writable().desc(USER_ACCOUNT_DESC),
    AccountRole::new("stats_pda").writable().desc(STATS_DESC),
    system_program(),
];

const USER_ACCOUNT_WITHDRAW_ROLES: &[AccountRole] = &[
    AccountRole::new("user_wallet_account").writable().signer().desc(WALLET_DESC),
    AccountRole::new("user_account").writable().desc(USER_ACCOUNT_DESC),
    AccountRole::new("stats_pda").writable().desc(STATS_DESC),
    AccountRole::new("operator")
        .writable()
        .desc(OPERATOR_DESC)
        .default_address(OPERATOR_ID),
    AccountRole::new("referall_account")
        .writable()
        .optional()
        .desc("Referral Wallet Account"),
];

const USER_ACCOUNT_CLOSE_ROLES: &[AccountRole] = &[
    AccountRole::new("user_wallet_account").writable().signer().desc(WALLET_DESC),
    AccountRole::new("user_account").writable().desc(USER_ACCOUNT_DESC),
    AccountRole::new("stats_pda").writable().desc(STATS_DESC),
    system_program(),
];

const GAME_CREATE_ROLES: &[AccountRole] = &[
    AccountRole::new("host").writable().signer().desc(HOST_DESC),
    AccountRole::new("user_account")
        .writable()
        .desc("User Betting Account of the host"),
    AccountRole::new("stats_pda").writable().desc(STATS_DESC),
    AccountRole::new("game_pda").writable().desc(GAME_DESC),
    system_program(),
];

const GAME_SET_ACTIVE_ROLES: &[AccountRole] = &[
    AccountRole::new("host").signer().desc(HOST_DESC),
    AccountRole::new("game_pda").writable().desc(GAME_DESC),
];

const GAME_PLACE_BET_ROLES: &[AccountRole] = &[
    AccountRole::new("bettor").writable().signer().desc(BETTOR_DESC),
    AccountRole::new("bettor_user_account").writable().desc(BETTOR_USER_DESC),
    AccountRole::new("stats_pda").writable().desc(STATS_DESC),
    AccountRole::new("game_pda").writable().desc(GAME_DESC),
    AccountRole::new("host_user_account").writable().desc(HOST_USER_DESC),
    AccountRole::new("vrf_result_pda").writable().desc(VRF_RESULT_DESC),
    AccountRole::new("slot_hashes")
        .desc("Slot hashes account")
        .default_address(SLOT_HASHES_SYSVAR_ID),
    system_program(),
];

const VRF_RESULT_FULLFILL_ROLES: &[AccountRole] = &[
    AccountRole::new("operator").signer().desc(OPERATOR_DESC),
    AccountRole::new("vrf_result_pda").writable().desc(VRF_RESULT_DESC),
];

const VRF_RESULT_MARK_CLOSE_ROLES: &[AccountRole] = &[
    AccountRole::new("bettor").signer().desc(BETTOR_DESC),
    AccountRole::new("vrf_result_pda").writable().desc(VRF_RESULT_DESC),
];

const VRF_RESULT_CLOSE_ROLES: &[AccountRole] = &[
    AccountRole::new("vrf_result_pda").writable().desc(VRF_RESULT_DESC),
    AccountRole::new("bettor").writable().signer().desc(BETTOR_DESC),
    AccountRole::new("bettor_user_account").writable().desc(BETTOR_USER_DESC),
    system_program(),
];

const GAME_RESOLVE_VRF_RESULT_ROLES: &[AccountRole] = &[
    AccountRole::new("game_pda").writable().desc(GAME_DESC),
    AccountRole::new("vrf_result_pda").writable().desc(VRF_RESULT_DESC),
    AccountRole::new("host_user_account").writable().desc(HOST_USER_DESC),
    AccountRole::new("bettor_user_account").writable().desc(BETTOR_USER_DESC),
    AccountRole::new("stats_pda").writable().desc(STATS_DESC),
];

const GAME_CLOSE_ROLES: &[AccountRole] = &[
    AccountRole::new("host").writable().signer().desc(HOST_DESC),
    AccountRole::new("host_user_account").writable().desc(HOST_USER_DESC),
    AccountRole::new("stats_pda").writable().desc(STATS_DESC),
    AccountRole::new("game_pda").writable().desc(GAME_DESC),
    system_program(),
];

pub const STATS_ACCOUNT_CREATE: InstructionDescriptor<()> =
    InstructionDescriptor::new(PROGRAM_ID, "StatsAccountCreate", 0, STATS_ACCOUNT_CREATE_ROLES);

pub const USER_ACCOUNT_CREATE: InstructionDescriptor<UserAccountCreateArgs> =
    InstructionDescriptor::new(PROGRAM_ID, "UserAccountCreate", 1, USER_ACCOUNT_CREATE_ROLES);

pub const USER_ACCOUNT_DEPOSIT: InstructionDescriptor<UserAccountDepositArgs> =
    InstructionDescriptor::new(PROGRAM_ID, "UserAccountDeposit", 2, USER_ACCOUNT_DEPOSIT_ROLES);

/// The operator defaults to [`OPERATOR_ID`]; the referral wallet is optional
/// and the program id stands in when the account has none.
pub const USER_ACCOUNT_WITHDRAW: InstructionDescriptor<UserAccountWithdrawArgs> =
    InstructionDescriptor::new(PROGRAM_ID, "UserAccountWithdraw", 3, USER_ACCOUNT_WITHDRAW_ROLES);

pub const USER_ACCOUNT_CLOSE: InstructionDescriptor<()> =
    InstructionDescriptor::new(PROGRAM_ID, "UserAccountClose", 4, USER_ACCOUNT_CLOSE_ROLES);

pub const GAME_CREATE: InstructionDescriptor<GameCreateArgs> =
    InstructionDescriptor::new(PROGRAM_ID, "GameCreate", 5, GAME_CREATE_ROLES);

pub const GAME_SET_ACTIVE: InstructionDescriptor<GameSetActiveArgs> =
    InstructionDescriptor::new(PROGRAM_ID, "GameSetActive", 6, GAME_SET_ACTIVE_ROLES);

pub const GAME_PLACE_BET: InstructionDescriptor<GamePlaceBetArgs> =
    InstructionDescriptor::new(PROGRAM_ID, "GamePlaceBet", 7, GAME_PLACE_BET_ROLES);

pub const VRF_RESULT_FULLFILL: InstructionDescriptor<VrfResultFullfillArgs> =
    InstructionDescriptor::new(PROGRAM_ID, "VrfResultFullfill", 8, VRF_RESULT_FULLFILL_ROLES);

pub const VRF_RESULT_MARK_CLOSE: InstructionDescriptor<()> =
    InstructionDescriptor::new(PROGRAM_ID, "VrfResultMarkClose", 9, VRF_RESULT_MARK_CLOSE_ROLES);

pub const VRF_RESULT_CLOSE: InstructionDescriptor<()> =
    InstructionDescriptor::new(PROGRAM_ID, "VrfResultClose", 10, VRF_RESULT_CLOSE_ROLES);

/// Permissionless: anyone may crank a fulfilled result into its game.
pub const GAME_RESOLVE_VRF_RESULT: InstructionDescriptor<()> =
    InstructionDescriptor::new(PROGRAM_ID, "GameResolveVrfResult", 11, GAME_RESOLVE_VRF_RESULT_ROLES);

pub const GAME_CLOSE: InstructionDescriptor<()> =
    InstructionDescriptor::new(PROGRAM_ID, "GameClose", 12, GAME_CLOSE_ROLES);

/// Every instruction of the program, tagged by its discriminant.
#[derive(Beet, ShankInstruction, Clone, Debug, PartialEq, Eq)]
pub enum BettingInstruction {
    #[account(0, writable, signer, name = "operator", desc = "Operator Account")]
    #[account(1, writable, name = "stats_pda", desc = "Stats PDA Account")]
    #[account(2, name = "system_program", desc = "System Program Account")]
    StatsAccountCreate,

    #[account(0, writable, signer, name = "user_wallet_account", desc = "User Wallet Account")]
    #[account(1, writable, name = "user_account", desc = "User Betting Account")]
    #[account(2, writable, name = "stats_pda", desc = "Stats PDA Account")]
    #[account(3, name = "system_program", desc = "System Program Account")]
    UserAccountCreate { args: UserAccountCreateArgs },

    #[account(0, writable, signer, name = "depositor", desc = "The account to transfer lamports from")]
    #[account(1, writable, name = "user_account", desc = "User Betting Account")]
    #[account(2, writable, name = "stats_pda", desc = "Stats PDA Account")]
    #[account(3, name = "system_program", desc = "System Program Account")]
    UserAccountDeposit { args: UserAccountDepositArgs },

    #[account(0, writable, signer, name = "user_wallet_account", desc = "User Wallet Account")]
    #[account(1, writable, name = "user_account", desc = "User Betting Account")]
    #[account(2, writable, name = "stats_pda", desc = "Stats PDA Account")]
    #[account(3, writable, name = "operator", desc = "Operator Account")]
    #[account(4, writable, optional, name = "referall_account", desc = "Referral Wallet Account")]
    UserAccountWithdraw { args: UserAccountWithdrawArgs },

    #[account(0, writable, signer, name = "user_wallet_account", desc = "User Wallet Account")]
    #[account(1, writable, name = "user_account", desc = "User Betting Account")]
    #[account(2, writable, name = "stats_pda", desc = "Stats PDA Account")]
    #[account(3, name = "system_program", desc = "System Program Account")]
    UserAccountClose,

    #[account(0, writable, signer, name = "host", desc = "The wallet account of the host")]
    #[account(1, writable, name = "user_account", desc = "User Betting Account of the host")]
    #[account(2, writable, name = "stats_pda", desc = "Stats PDA Account")]
    #[account(3, writable, name = "game_pda", desc = "Game PDA Account")]
    #[account(4, name = "system_program", desc = "System Program Account")]
    GameCreate { args: GameCreateArgs },

    #[account(0, signer, name = "host", desc = "The wallet account of the host")]
    #[account(1, writable, name = "game_pda", desc = "Game PDA Account")]
    GameSetActive { args: GameSetActiveArgs },

    #[account(0, writable, signer, name = "bettor", desc = "Bettor wallet account")]
    #[account(1, writable, name = "bettor_user_account", desc = "Bettor user account")]
    #[account(2, writable, name = "stats_pda", desc = "Stats PDA Account")]
    #[account(3, writable, name = "game_pda", desc = "Game PDA Account")]
    #[account(4, writable, name = "host_user_account", desc = "Host user account")]
    #[account(5, writable, name = "vrf_result_pda", desc = "VRF result PDA account")]
    #[account(6, name = "slot_hashes", desc = "Slot hashes account")]
    #[account(7, name = "system_program", desc = "System Program Account")]
    GamePlaceBet { args: GamePlaceBetArgs },

    #[account(0, signer, name = "operator", desc = "Operator Account")]
    #[account(1, writable, name = "vrf_result_pda", desc = "VRF result PDA account")]
    VrfResultFullfill { args: VrfResultFullfillArgs },

    #[account(0, signer, name = "bettor", desc = "Bettor wallet account")]
    #[account(1, writable, name = "vrf_result_pda", desc = "VRF result PDA account")]
    VrfResultMarkClose,

    #[account(0, writable, name = "vrf_result_pda", desc = "VRF result PDA account")]
    #[account(1, writable, signer, name = "bettor", desc = "Bettor wallet account")]
    #[account(2, writable, name = "bettor_user_account", desc = "Bettor user account")]
    #[account(3, name = "system_program", desc = "System Program Account")]
    VrfResultClose,

    #[account(0, writable, name = "game_pda", desc = "Game PDA Account")]
    #[account(1, writable, name = "vrf_result_pda", desc = "VRF result PDA account")]
    #[account(2, writable, name = "host_user_account", desc = "Host user account")]
    #[account(3, writable, name = "bettor_user_account", desc = "Bettor user account")]
    #[account(4, writable, name = "stats_pda", desc = "Stats PDA Account")]
    GameResolveVrfResult,

    #[account(0, writable, signer, name = "host", desc = "The wallet account of the host")]
    #[account(1, writable, name = "host_user_account", desc = "Host user account")]
    #[account(2, writable, name = "stats_pda", desc = "Stats PDA Account")]
    #[account(3, writable, name = "game_pda", desc = "Game PDA Account")]
    #[account(4, name = "system_program", desc = "System Program Account")]
    GameClose,
}

impl BettingInstruction {
    /// Decode a full instruction payload, discriminant included.
    pub fn unpack(data: &[u8]) -> Result<Self> {
        Self::decode_exact(data).inspect_err(|e| log::debug!("unrecognized betting instruction: {}", e))
    }

    /// Declared account roles of this instruction.
    pub fn roles(&self) -> &'static [AccountRole] {
        match self {
            Self::StatsAccountCreate => STATS_ACCOUNT_CREATE.roles,
            Self::UserAccountCreate { .. } => USER_ACCOUNT_CREATE.roles,
            Self::UserAccountDeposit { .. } => USER_ACCOUNT_DEPOSIT.roles,
            Self::UserAccountWithdraw { .. } => USER_ACCOUNT_WITHDRAW.roles,
            Self::UserAccountClose => USER_ACCOUNT_CLOSE.roles,
            Self::GameCreate { .. } => GAME_CREATE.roles,
            Self::GameSetActive { .. } => GAME_SET_ACTIVE.roles,
            Self::GamePlaceBet { .. } => GAME_PLACE_BET.roles,
            Self::VrfResultFullfill { .. } => VRF_RESULT_FULLFILL.roles,
            Self::VrfResultMarkClose => VRF_RESULT_MARK_CLOSE.roles,
            Self::VrfResultClose => VRF_RESULT_CLOSE.roles,
            Self::GameResolveVrfResult => GAME_RESOLVE_VRF_RESULT.roles,
            Self::GameClose => GAME_CLOSE.roles,
        }
    }

    /// Build through this variant's descriptor.
    pub fn build(&self, accounts: &[Option<Address>]) -> Result<Instruction> {
        log::debug!("building {}", self.variant_name());
        match self {
            Self::StatsAccountCreate => STATS_ACCOUNT_CREATE.build(accounts, &()),
            Self::UserAccountCreate { args } => USER_ACCOUNT_CREATE.build(accounts, args),
            Self::UserAccountDeposit { args } => USER_ACCOUNT_DEPOSIT.build(accounts, args),
            Self::UserAccountWithdraw { args } => USER_ACCOUNT_WITHDRAW.build(accounts, args),
            Self::UserAccountClose => USER_ACCOUNT_CLOSE.build(accounts, &()),
            Self::GameCreate { args } => GAME_CREATE.build(accounts, args),
            Self::GameSetActive { args } => GAME_SET_ACTIVE.build(accounts, args),
            Self::GamePlaceBet { args } => GAME_PLACE_BET.build(accounts, args),
            Self::VrfResultFullfill { args } => VRF_RESULT_FULLFILL.build(accounts, args),
            Self::VrfResultMarkClose => VRF_RESULT_MARK_CLOSE.build(accounts, &()),
            Self::VrfResultClose => VRF_RESULT_CLOSE.build(accounts, &()),
            Self::GameResolveVrfResult => GAME_RESOLVE_VRF_RESULT.build(accounts, &()),
            Self::GameClose => GAME_CLOSE.build(accounts, &()),
        }
    }
}
