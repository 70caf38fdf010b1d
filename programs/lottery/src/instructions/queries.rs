use anchor_lang::prelude::*;

use crate::{constants::LOTTERY_SEED, state::Lottery};

/// Returns the current round's registry in entry order. Needs no signer.
pub fn get_players(ctx: Context<GetPlayers>) -> Result<Vec<Pubkey>> {
    Ok(ctx.accounts.lottery.players.clone())
}

/// Returns the lamports staked in the current round. Needs no signer.
pub fn get_pool_balance(ctx: Context<GetPoolBalance>) -> Result<u64> {
    Ok(ctx.accounts.lottery.pot)
}

#[derive(Accounts)]
pub struct GetPlayers<'info> {
    #[account(seeds = [LOTTERY_SEED, lottery.manager.as_ref()], bump = lottery.bump)]
    pub lottery: Account<'info, Lottery>,
}

#[derive(Accounts)]
pub struct GetPoolBalance<'info> {
    #[account(seeds = [LOTTERY_SEED, lottery.manager.as_ref()], bump = lottery.bump)]
    pub lottery: Account<'info, Lottery>,
}
