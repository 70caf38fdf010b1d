use anchor_lang::prelude::*;

// 8 discriminator, 32 pubkey, 1 bump
pub const VAULT_ACCOUNT_SIZE: usize = 8 + 32 + 1;

/// Holds the pooled entry lamports on top of its own rent-exempt minimum.
#[account]
pub struct Vault {
    pub lottery: Pubkey,
    pub bump: u8,
}
