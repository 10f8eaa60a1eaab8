//! Well-known program and sysvar addresses.
//!
//! These are the accounts instruction descriptors commonly name as role
//! defaults, so callers can omit them when building.
//!
//! | Constant | Account | Typical role |
//! |----------|---------|--------------|
//! | [`SYSTEM_PROGRAM_ID`] | System program | `system_program` for account creation and transfers |
//! | [`SLOT_HASHES_SYSVAR_ID`] | SlotHashes sysvar | randomness seed for VRF inputs |
//! | [`RENT_SYSVAR_ID`] | Rent sysvar | source of [`RentParams`](crate::RentParams) |

use solana_address::Address;

/// The Solana System Program ID.
///
/// Address: `11111111111111111111111111111111`
pub const SYSTEM_PROGRAM_ID: Address =
    Address::new_from_array(pinocchio_pubkey::pubkey!("11111111111111111111111111111111"));

/// The SlotHashes sysvar address.
///
/// Holds up to 512 recent (slot, hash) pairs. Large (~16KB); only pass it to
/// instructions that read it.
///
/// Address: `SysvarS1otHashes111111111111111111111111111`
pub const SLOT_HASHES_SYSVAR_ID: Address =
    Address::new_from_array(pinocchio_pubkey::pubkey!("SysvarS1otHashes111111111111111111111111111"));

/// The Rent sysvar address.
///
/// Address: `SysvarRent111111111111111111111111111111111`
pub const RENT_SYSVAR_ID: Address =
    Address::new_from_array(pinocchio_pubkey::pubkey!("SysvarRent111111111111111111111111111111111"));

#[cfg(test)]
mod tests {
    use super::*;

    fn base58(address: &Address) -> String {
        bs58::encode(address.as_ref()).into_string()
    }

    #[test]
    fn test_ids_render_back_to_their_literals() {
        assert_eq!(base58(&SYSTEM_PROGRAM_ID), "11111111111111111111111111111111");
        assert_eq!(base58(&SLOT_HASHES_SYSVAR_ID), "SysvarS1otHashes111111111111111111111111111");
        assert_eq!(base58(&RENT_SYSVAR_ID), "SysvarRent111111111111111111111111111111111");
    }
}
