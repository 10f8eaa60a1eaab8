//! Instruction descriptors: a discriminant, an argument codec and an ordered
//! list of account roles, turned into an [`Instruction`] by [`build`].
//!
//! Account flags come from the declared [`AccountRole`]s and are never
//! inferred from the addresses. A role may declare a [`RoleDefault`] that is
//! substituted when the caller leaves its slot empty; the substitution is
//! part of the descriptor, visible in its declaration.
//!
//! # Example
//!
//! ```ignore
//! use solbeet::{AccountRole, InstructionDescriptor, SYSTEM_PROGRAM_ID};
//!
//! const DEPOSIT_ROLES: &[AccountRole] = &[
//!     AccountRole::new("depositor").writable().signer(),
//!     AccountRole::new("user_account").writable(),
//!     AccountRole::new("system_program").default_address(SYSTEM_PROGRAM_ID),
//! ];
//!
//! pub const DEPOSIT: InstructionDescriptor<DepositArgs> =
//!     InstructionDescriptor::new(PROGRAM_ID, "Deposit", 2, DEPOSIT_ROLES);
//!
//! let ix = DEPOSIT.build(&[Some(wallet), Some(user_account)], &DepositArgs { lamports: 5 })?;
//! ```
//!
//! [`build`]: InstructionDescriptor::build

use core::marker::PhantomData;

use pinocchio::instruction::{InstructionAccount, InstructionView};
use solana_address::Address;

use crate::error::{CodecError, Result};
use crate::traits::Beet;

/// Address used when the caller supplies none for a role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoleDefault {
    /// The caller must supply an address.
    Required,
    /// A well-known account (a program or sysvar).
    Address(Address),
    /// The program's own id, the placeholder for an omitted optional account.
    ProgramId,
}

/// One declared account slot of an instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountRole {
    pub name: &'static str,
    pub desc: &'static str,
    pub is_writable: bool,
    pub is_signer: bool,
    pub default: RoleDefault,
}

impl AccountRole {
    /// A required, read-only, non-signer role.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            desc: "",
            is_writable: false,
            is_signer: false,
            default: RoleDefault::Required,
        }
    }

    pub const fn writable(mut self) -> Self {
        self.is_writable = true;
        self
    }

    pub const fn signer(mut self) -> Self {
        self.is_signer = true;
        self
    }

    pub const fn desc(mut self, desc: &'static str) -> Self {
        self.desc = desc;
        self
    }

    /// Substitute `address` when the caller omits this account.
    pub const fn default_address(mut self, address: Address) -> Self {
        self.default = RoleDefault::Address(address);
        self
    }

    /// Mark the account optional; the program id stands in when omitted.
    pub const fn optional(mut self) -> Self {
        self.default = RoleDefault::ProgramId;
        self
    }

    /// Whether the caller may leave this slot empty.
    pub fn is_optional(&self) -> bool {
        self.default != RoleDefault::Required
    }

    /// Format this role as a Shank `#[account(...)]` attribute.
    pub fn to_shank_attribute(&self, index: usize) -> String {
        let mut parts = vec![index.to_string()];

        if self.is_writable {
            parts.push(String::from("writable"));
        }
        if self.is_signer {
            parts.push(String::from("signer"));
        }
        if self.default == RoleDefault::ProgramId {
            parts.push(String::from("optional"));
        }

        parts.push(format!("name=\"{}\"", self.name));
        if !self.desc.is_empty() {
            parts.push(format!("desc=\"{}\"", self.desc));
        }

        format!("#[account({})]", parts.join(", "))
    }
}

/// An account reference in a built instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountMeta {
    pub address: Address,
    pub is_writable: bool,
    pub is_signer: bool,
}

/// A built instruction, ready for an external transaction builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub program_id: Address,
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

impl Instruction {
    /// Borrow this instruction as a pinocchio [`InstructionView`], e.g. to
    /// hand it to `pinocchio::cpi::invoke`.
    pub fn with_view<R>(&self, f: impl FnOnce(&InstructionView) -> R) -> R {
        let accounts: Vec<InstructionAccount> = self
            .accounts
            .iter()
            .map(|meta| InstructionAccount {
                address: &meta.address,
                is_writable: meta.is_writable,
                is_signer: meta.is_signer,
            })
            .collect();

        let view = InstructionView {
            program_id: &self.program_id,
            accounts: &accounts,
            data: &self.data,
        };
        f(&view)
    }
}

/// Template for one instruction of a program.
///
/// `A` is the argument codec; use `()` for instructions without arguments,
/// whose payload is the discriminant byte alone.
#[derive(Debug)]
pub struct InstructionDescriptor<A> {
    pub program_id: Address,
    pub name: &'static str,
    pub discriminant: u8,
    pub roles: &'static [AccountRole],
    _args: PhantomData<fn() -> A>,
}

impl<A> InstructionDescriptor<A> {
    pub const fn new(
        program_id: Address,
        name: &'static str,
        discriminant: u8,
        roles: &'static [AccountRole],
    ) -> Self {
        Self {
            program_id,
            name,
            discriminant,
            roles,
            _args: PhantomData,
        }
    }

    /// Position of the role called `name`.
    pub fn role_index(&self, name: &str) -> Option<usize> {
        self.roles.iter().position(|role| role.name == name)
    }

    /// Shank `#[account(...)]` attributes for every role, in order.
    pub fn shank_attributes(&self) -> Vec<String> {
        self.roles
            .iter()
            .enumerate()
            .map(|(index, role)| role.to_shank_attribute(index))
            .collect()
    }
}

impl<A: Beet> InstructionDescriptor<A> {
    /// Build the instruction against the descriptor's program id.
    ///
    /// `accounts[i]` fills role `i`; `None` or a missing trailing entry falls
    /// back to the role's declared default.
    ///
    /// # Errors
    ///
    /// - [`CodecError::TooManyAccounts`] if more addresses than roles are given
    /// - [`CodecError::MissingAccount`] if a required role has no address
    pub fn build(&self, accounts: &[Option<Address>], args: &A) -> Result<Instruction> {
        self.build_for(&self.program_id, accounts, args)
    }

    /// Build the instruction for a program deployed at `program_id`.
    pub fn build_for(&self, program_id: &Address, accounts: &[Option<Address>], args: &A) -> Result<Instruction> {
        if accounts.len() > self.roles.len() {
            return Err(CodecError::TooManyAccounts {
                instruction: self.name,
                expected: self.roles.len(),
                actual: accounts.len(),
            });
        }

        let metas = self
            .roles
            .iter()
            .enumerate()
            .map(|(index, role)| {
                let address = match (accounts.get(index).cloned().flatten(), &role.default) {
                    (Some(address), _) => address,
                    (None, RoleDefault::Required) => {
                        return Err(CodecError::MissingAccount {
                            instruction: self.name,
                            role: role.name,
                        })
                    }
                    (None, RoleDefault::Address(address)) => {
                        log::debug!("{}: defaulting `{}` to its well-known address", self.name, role.name);
                        address.clone()
                    }
                    (None, RoleDefault::ProgramId) => {
                        log::debug!("{}: omitted optional `{}`, using the program id", self.name, role.name);
                        program_id.clone()
                    }
                };
                Ok(AccountMeta {
                    address,
                    is_writable: role.is_writable,
                    is_signer: role.is_signer,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let data = self.encode_data(args)?;
        log::trace!("{}: {} accounts, {} data bytes", self.name, metas.len(), data.len());

        Ok(Instruction {
            program_id: program_id.clone(),
            accounts: metas,
            data,
        })
    }

    /// Instruction data: the discriminant byte followed by the arguments.
    pub fn encode_data(&self, args: &A) -> Result<Vec<u8>> {
        let mut data = vec![0u8; 1 + args.byte_size()];
        data[0] = self.discriminant;
        args.write(&mut data, 1)?;
        Ok(data)
    }

    /// Decode instruction data produced for this descriptor.
    ///
    /// # Errors
    ///
    /// [`CodecError::InstructionMismatch`] if the first byte is missing or is
    /// not this descriptor's discriminant.
    pub fn parse(&self, data: &[u8]) -> Result<A> {
        match data.split_first() {
            Some((&tag, rest)) if tag == self.discriminant => A::decode_exact(rest),
            other => Err(CodecError::InstructionMismatch {
                instruction: self.name,
                expected: self.discriminant,
                found: other.map(|(&tag, _)| tag),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Beet;

    const PROGRAM: Address = Address::new_from_array([1u8; 32]);
    const SYSTEM: Address = Address::new_from_array([0u8; 32]);

    #[derive(Beet, Clone, Debug, PartialEq)]
    struct Amount {
        lamports: u64,
    }

    const SET_ACTIVE_ROLES: &[AccountRole] = &[
        AccountRole::new("host").signer().desc("The wallet account of the host"),
        AccountRole::new("game_pda").writable(),
    ];

    const SET_ACTIVE: InstructionDescriptor<()> = InstructionDescriptor::new(PROGRAM, "SetActive", 6, SET_ACTIVE_ROLES);

    const WITHDRAW_ROLES: &[AccountRole] = &[
        AccountRole::new("wallet").writable().signer(),
        AccountRole::new("referral").writable().optional(),
        AccountRole::new("system_program").default_address(SYSTEM),
    ];

    const WITHDRAW: InstructionDescriptor<Amount> = InstructionDescriptor::new(PROGRAM, "Withdraw", 3, WITHDRAW_ROLES);

    fn key(byte: u8) -> Address {
        Address::new_from_array([byte; 32])
    }

    #[test]
    fn test_no_args_payload_is_discriminant_only() {
        let ix = SET_ACTIVE.build(&[Some(key(9)), Some(key(8))], &()).unwrap();
        assert_eq!(ix.data, vec![6]);
        assert_eq!(ix.program_id, PROGRAM);
        assert_eq!(
            ix.accounts,
            vec![
                AccountMeta {
                    address: key(9),
                    is_writable: false,
                    is_signer: true,
                },
                AccountMeta {
                    address: key(8),
                    is_writable: true,
                    is_signer: false,
                },
            ]
        );
    }

    #[test]
    fn test_flags_follow_roles_not_addresses() {
        // Same address in both slots still gets each role's own flags.
        let ix = SET_ACTIVE.build(&[Some(key(4)), Some(key(4))], &()).unwrap();
        assert!(ix.accounts[0].is_signer && !ix.accounts[0].is_writable);
        assert!(!ix.accounts[1].is_signer && ix.accounts[1].is_writable);
    }

    #[test]
    fn test_args_follow_discriminant() {
        let ix = WITHDRAW
            .build(&[Some(key(2)), Some(key(3)), Some(key(4))], &Amount { lamports: 500 })
            .unwrap();
        assert_eq!(ix.data, vec![3, 0xf4, 0x01, 0, 0, 0, 0, 0, 0]);
        assert_eq!(ix.accounts.len(), 3);
    }

    #[test]
    fn test_defaults_are_substituted() {
        let ix = WITHDRAW.build(&[Some(key(2))], &Amount { lamports: 1 }).unwrap();
        assert_eq!(ix.accounts[1].address, PROGRAM);
        assert!(ix.accounts[1].is_writable);
        assert_eq!(ix.accounts[2].address, SYSTEM);

        let ix = WITHDRAW.build(&[Some(key(2)), None, None], &Amount { lamports: 1 }).unwrap();
        assert_eq!(ix.accounts[1].address, PROGRAM);
    }

    #[test]
    fn test_build_for_other_deployment() {
        let devnet = key(0xde);
        let ix = WITHDRAW.build_for(&devnet, &[Some(key(2))], &Amount { lamports: 1 }).unwrap();
        assert_eq!(ix.program_id, devnet);
        // The optional placeholder follows the deployment actually targeted.
        assert_eq!(ix.accounts[1].address, devnet);
    }

    #[test]
    fn test_missing_and_extra_accounts() {
        assert_eq!(
            WITHDRAW.build(&[None], &Amount { lamports: 1 }),
            Err(CodecError::MissingAccount {
                instruction: "Withdraw",
                role: "wallet",
            })
        );
        assert_eq!(
            SET_ACTIVE.build(&[Some(key(1)), Some(key(2)), Some(key(3))], &()),
            Err(CodecError::TooManyAccounts {
                instruction: "SetActive",
                expected: 2,
                actual: 3,
            })
        );
    }

    #[test]
    fn test_parse() {
        let data = WITHDRAW.encode_data(&Amount { lamports: 77 }).unwrap();
        assert_eq!(WITHDRAW.parse(&data).unwrap(), Amount { lamports: 77 });
        assert_eq!(SET_ACTIVE.parse(&[6]), Ok(()));

        assert_eq!(
            SET_ACTIVE.parse(&[7]),
            Err(CodecError::InstructionMismatch {
                instruction: "SetActive",
                expected: 6,
                found: Some(7),
            })
        );
        assert!(matches!(
            SET_ACTIVE.parse(&[]),
            Err(CodecError::InstructionMismatch { found: None, .. })
        ));
        assert!(matches!(
            SET_ACTIVE.parse(&[6, 0]),
            Err(CodecError::TrailingBytes { trailing: 1, .. })
        ));
    }

    #[test]
    fn test_shank_attributes() {
        assert_eq!(
            SET_ACTIVE.shank_attributes(),
            vec![
                "#[account(0, signer, name=\"host\", desc=\"The wallet account of the host\")]".to_string(),
                "#[account(1, writable, name=\"game_pda\")]".to_string(),
            ]
        );
        assert_eq!(
            WITHDRAW_ROLES[1].to_shank_attribute(1),
            "#[account(1, writable, optional, name=\"referral\")]"
        );
        assert_eq!(WITHDRAW.role_index("system_program"), Some(2));
        assert_eq!(WITHDRAW.role_index("nope"), None);
        assert!(WITHDRAW_ROLES[2].is_optional());
        assert!(!WITHDRAW_ROLES[0].is_optional());
    }

    #[test]
    fn test_with_view() {
        let ix = WITHDRAW.build(&[Some(key(2))], &Amount { lamports: 1 }).unwrap();
        let (count, first_signer, data_len) = ix.with_view(|view| {
            assert_eq!(view.program_id, &PROGRAM);
            (view.accounts.len(), view.accounts[0].is_signer, view.data.len())
        });
        assert_eq!((count, first_signer, data_len), (3, true, 9));
    }
}
