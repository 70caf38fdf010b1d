use anchor_lang::prelude::*;

use crate::{
    constants::{DEFAULT_MINIMUM_ENTRY, LOTTERY_SEED, VAULT_SEED},
    error::LotteryError,
    state::{Lottery, Vault, LOTTERY_ACCOUNT_SIZE, VAULT_ACCOUNT_SIZE},
};

/// Event emitted when a lottery is created
#[event]
pub struct LotteryInitialized {
    /// The pubkey of the lottery
    pub lottery: Pubkey,
    /// The manager allowed to draw
    pub manager: Pubkey,
    /// The vault holding the pot
    pub vault: Pubkey,
    /// Minimum stake per entry in lamports
    pub minimum_entry: u64,
}

/// Instruction to create a lottery owned by the signer
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `minimum_entry` - Minimum stake per entry in lamports, `DEFAULT_MINIMUM_ENTRY` when omitted
///
/// # Account Validations
/// * Lottery - New PDA with seeds ["lottery", manager_key]
/// * Vault - New PDA with seeds ["vault", lottery_key]
/// * Manager - Signer pays for both accounts and is recorded as the only key allowed to draw
pub fn initialize(ctx: Context<Initialize>, minimum_entry: Option<u64>) -> Result<()> {
    let minimum_entry = minimum_entry.unwrap_or(DEFAULT_MINIMUM_ENTRY);
    require!(minimum_entry > 0, LotteryError::MinimumEntryTooLow);

    let lottery_key = ctx.accounts.lottery.key();
    let vault_key = ctx.accounts.vault.key();
    let manager = ctx.accounts.manager.key();

    ctx.accounts.lottery.set_inner(Lottery::new(
        manager,
        vault_key,
        minimum_entry,
        ctx.bumps.lottery,
    ));
    ctx.accounts.vault.lottery = lottery_key;
    ctx.accounts.vault.bump = ctx.bumps.vault;

    emit!(LotteryInitialized {
        lottery: lottery_key,
        manager,
        vault: vault_key,
        minimum_entry,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = manager,
        space = LOTTERY_ACCOUNT_SIZE,
        seeds = [LOTTERY_SEED, manager.key().as_ref()],
        bump
    )]
    pub lottery: Account<'info, Lottery>,

    #[account(
        init,
        payer = manager,
        space = VAULT_ACCOUNT_SIZE,
        seeds = [VAULT_SEED, lottery.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, Vault>,

    #[account(mut)]
    pub manager: Signer<'info>,

    pub system_program: Program<'info, System>,
}
