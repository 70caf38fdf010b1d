use anchor_lang::prelude::*;
use instructions::*;

pub mod constants;
pub mod entropy;
pub mod error;
pub mod instructions;
pub mod state;

declare_id!("LoTTeRyXbq3uQx6gG5T2nW3qs1Ctu8rVw7mkJ8AHsJd");

#[program]
pub mod lottery_program {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>, minimum_entry: Option<u64>) -> Result<()> {
        instructions::initialize::initialize(ctx, minimum_entry)
    }

    pub fn enter(ctx: Context<Enter>, amount: u64) -> Result<()> {
        instructions::enter::enter(ctx, amount)
    }

    pub fn pick_winner(ctx: Context<PickWinner>) -> Result<()> {
        instructions::pick_winner::pick_winner(ctx)
    }

    pub fn get_players(ctx: Context<GetPlayers>) -> Result<Vec<Pubkey>> {
        instructions::queries::get_players(ctx)
    }

    pub fn get_pool_balance(ctx: Context<GetPoolBalance>) -> Result<u64> {
        instructions::queries::get_pool_balance(ctx)
    }
}
