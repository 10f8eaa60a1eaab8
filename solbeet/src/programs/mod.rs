//! Well-known Solana programs and sysvars.
//!
//! # Example
//!
//! ```ignore
//! use solbeet::{AccountRole, SYSTEM_PROGRAM_ID};
//!
//! const ROLE: AccountRole = AccountRole::new("system_program").default_address(SYSTEM_PROGRAM_ID);
//! ```

pub mod ids;

pub use ids::*;
