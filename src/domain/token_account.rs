//! Associated Token Account derivation

use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address;

/// Derive the owner's associated token account for a mint (classic SPL token program)
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    get_associated_token_address(owner, mint)
}
