use anchor_lang::prelude::*;

use crate::{
    constants::{LOTTERY_SEED, VAULT_SEED},
    error::LotteryError,
    state::{Lottery, Vault},
};

/// Event emitted when a player enters the current round
#[event]
pub struct PlayerEntered {
    /// The pubkey of the lottery
    pub lottery: Pubkey,
    /// The entering player
    pub player: Pubkey,
    /// Stake paid in lamports
    pub amount: u64,
    /// Round the entry belongs to
    pub round: u64,
    /// Registry length after this entry
    pub player_count: u64,
    /// Pot after this entry in lamports
    pub pot: u64,
}

/// Instruction to enter the current round by staking `amount` lamports
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `amount` - The stake in lamports, moved from the player into the vault
///
/// # Security Considerations
/// 1. Rejects stakes below the lottery's minimum entry
/// 2. Rejects entries once the registry is full
/// 3. Verifies the vault matches the one stored in the lottery
/// 4. Re-reads the vault balance after the transfer
///
/// # Implementation Notes
/// - The same key may enter more than once; each entry is a separate ticket
/// - Updates state before performing external calls
pub fn enter(ctx: Context<Enter>, amount: u64) -> Result<()> {
    let player = ctx.accounts.player.key();
    ctx.accounts.lottery.record_entry(player, amount)?;

    let pre_transfer_balance = ctx.accounts.vault.to_account_info().lamports();

    anchor_lang::solana_program::program::invoke(
        &anchor_lang::solana_program::system_instruction::transfer(
            &player,
            &ctx.accounts.vault.key(),
            amount,
        ),
        &[
            ctx.accounts.player.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
            ctx.accounts.vault.to_account_info(),
        ],
    )?;

    let post_transfer_balance = ctx.accounts.vault.to_account_info().lamports();
    require!(
        post_transfer_balance
            == pre_transfer_balance
                .checked_add(amount)
                .ok_or(LotteryError::Overflow)?,
        LotteryError::TransferFailed
    );

    let lottery = &ctx.accounts.lottery;
    emit!(PlayerEntered {
        lottery: lottery.key(),
        player,
        amount,
        round: lottery.round,
        player_count: lottery.players.len() as u64,
        pot: lottery.pot,
    });

    Ok(())
}

/// Accounts required for the enter instruction
#[derive(Accounts)]
pub struct Enter<'info> {
    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.manager.as_ref()],
        bump = lottery.bump,
        has_one = vault @ LotteryError::InvalidVault,
    )]
    pub lottery: Account<'info, Lottery>,

    /// Vault receiving the stake
    /// PDA with seeds ["vault", lottery_key]
    #[account(
        mut,
        seeds = [VAULT_SEED, lottery.key().as_ref()],
        bump = vault.bump,
    )]
    pub vault: Account<'info, Vault>,

    #[account(mut)]
    pub player: Signer<'info>,

    pub system_program: Program<'info, System>,
}
