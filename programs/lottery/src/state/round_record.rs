use anchor_lang::prelude::*;

// 8 discriminator + 32 lottery + 8 round + 32 winner + 8 amount + 8 player_count + 8 drawn_at
pub const ROUND_RECORD_ACCOUNT_SIZE: usize = 8 + 32 + 8 + 32 + 8 + 8 + 8;

/// Outcome of one completed draw. Written once by `pick_winner`, never updated.
#[account]
pub struct RoundRecord {
    pub lottery: Pubkey,
    pub round: u64,
    pub winner: Pubkey,
    pub amount: u64,
    pub player_count: u64,
    pub drawn_at: i64,
}
