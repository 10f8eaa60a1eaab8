//! # Solbeet - Binary Codecs for Solana Account and Instruction Data
//!
//! Solbeet encodes and decodes the byte layouts Solana programs persist in
//! accounts and accept as instruction data, computes their sizes without
//! encoding, and builds instructions from typed arguments.
//!
//! ## Philosophy
//!
//! - **Byte-exact**: the wire layout is a contract; every codec documents it
//! - **Fixed vs fixable**: sizes known from the type are `const`, sizes that
//!   depend on the value are computed from the value, never by encoding
//! - **Closed unions**: data enums are Rust enums, so every consumer matches
//!   exhaustively
//! - **Pure**: no I/O, no signing, no shared state; fetching goes through a
//!   caller-supplied [`AccountFetcher`]
//!
//! ## Wire Layout
//!
//! | Type | Encoding |
//! |------|----------|
//! | `u8`/`u16`/`u32`/`u64`/`u128`/`f64` | little-endian, fixed width |
//! | `bool` | 1 byte, `0` or `1` |
//! | `[T; N]` | `N` elements, no prefix |
//! | `String` | `u32` LE byte length + UTF-8 bytes |
//! | `Option<T>` | tag `0` / `1` + payload when present |
//! | [`Address`](solana_address::Address) | 32 raw bytes |
//! | struct | fields in declaration order, no padding |
//! | data enum | `u8` declaration index + variant fields |
//! | instruction | `u8` discriminant + argument encoding |
//!
//! ## Quick Start
//!
//! ```ignore
//! use solbeet::{AccountRecord, Beet, Describe};
//!
//! #[derive(Beet, Clone, Debug, PartialEq)]
//! pub struct Counter {
//!     pub account_type: u8,
//!     pub authority: Address,
//!     pub label: Option<String>,
//! }
//!
//! impl AccountRecord for Counter {
//!     const NAME: &'static str = "Counter";
//!     const DISCRIMINATOR: u8 = 1;
//!     type Fields = Self;
//!
//!     fn from_fields(fields: Self) -> solbeet::Result<Self> {
//!         Ok(fields)
//!     }
//! }
//!
//! let bytes = counter.encode()?;
//! assert_eq!(bytes.len(), counter.byte_size());
//! let loaded = Counter::from_account_data(&bytes)?;
//! log::info!("{}", loaded.describe());
//! ```
//!
//! ## Module Organization
//!
//! - [`codec`]: leaf codecs and fixed-array helpers
//! - [`programs`]: well-known program and sysvar ids
//! - Records: [`AccountRecord`], [`RentParams`], [`AccountFilter`]
//! - Instructions: [`InstructionDescriptor`], [`AccountRole`], [`Instruction`]
//! - Display: [`Describe`], [`Pretty`]

extern crate self as solbeet;

mod account;
pub mod codec;
mod describe;
mod error;
mod instruction;
pub mod programs;
mod traits;

pub use account::{
    rent_exempt_minimum, AccountFetcher, AccountFilter, AccountRecord, RentParams, ACCOUNT_STORAGE_OVERHEAD,
    LAMPORTS_PER_BYTE, MAX_ACCOUNT_SIZE,
};
pub use codec::{decode_fixed_array, encode_fixed_array, fixed_array, STRING_LEN_PREFIX};
pub use describe::{Describe, Pretty, MAX_SAFE_INTEGER};
pub use error::{CodecError, ErrorKind, Result};
pub use instruction::{AccountMeta, AccountRole, Instruction, InstructionDescriptor, RoleDefault};
pub use programs::{RENT_SYSVAR_ID, SLOT_HASHES_SYSVAR_ID, SYSTEM_PROGRAM_ID};
pub use traits::{put, sum_fixed_sizes, take, Beet, BeetStruct, DataEnum, FixableSize, FixedSize};

// Re-export derive macros
pub use solbeet_macros::Beet;
