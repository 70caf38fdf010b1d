use anchor_lang::error_code;

#[error_code]
pub enum LotteryError {
    Overflow,
    #[msg("Attached value is below the minimum entry")]
    InsufficientStake,
    #[msg("Only the lottery manager can pick a winner")]
    Unauthorized,
    #[msg("No players have entered this round")]
    NoParticipants,
    #[msg("Prize transfer failed")]
    TransferFailed,
    #[msg("The player registry is full for this round")]
    LotteryFull,
    #[msg("Minimum entry must be greater than zero")]
    MinimumEntryTooLow,
    #[msg("Invalid SlotHashes account provided")]
    InvalidSlotHashesAccount,
    #[msg("Vault account does not belong to this lottery")]
    InvalidVault,
}
