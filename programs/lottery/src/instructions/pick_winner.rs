use anchor_lang::{prelude::*, solana_program::sysvar::slot_hashes};

use crate::{
    constants::{LOTTERY_SEED, ROUND_SEED, VAULT_SEED},
    entropy,
    error::LotteryError,
    state::{Lottery, RoundRecord, Vault, ROUND_RECORD_ACCOUNT_SIZE, VAULT_ACCOUNT_SIZE},
};

/// Event emitted when a round is drawn and paid out
#[event]
pub struct WinnerPicked {
    /// The pubkey of the lottery
    pub lottery: Pubkey,
    /// The round that was drawn
    pub round: u64,
    /// The winner's address
    pub winner: Pubkey,
    /// Index of the winning entry in the registry
    pub winning_index: u64,
    /// Lamports paid to the winner
    pub amount: u64,
    /// Number of entries in the round
    pub player_count: u64,
}

/// Draws a winner for the current round, pays them the whole pot and opens
/// the next round.
///
/// The winning entry is chosen from the newest SlotHashes block hash, the
/// clock and the manager's key (see `entropy` for why this is not secure).
///
/// Execution requirements:
/// 1. The signer must be the lottery manager
/// 2. At least one player must have entered
/// 3. The winner's account must be passed as a writable remaining account.
///    Callers cannot know the winner in advance, so they pass every distinct
///    player in the registry. `MAX_PLAYERS` keeps that within a legacy
///    transaction.
///
/// Because only the supplied accounts can be paid, a manager who passes just
/// a favoured player's account makes every other draw fail and roll back,
/// and can resubmit until that player is drawn.
///
/// After execution:
/// - The pot has moved from the vault to the winner
/// - A `RoundRecord` for the drawn round exists
/// - The registry is empty, the pot is zero and `round` is incremented
///
/// # Errors
/// - `Unauthorized` if the signer is not the manager
/// - `NoParticipants` if nobody has entered this round
/// - `InvalidSlotHashesAccount` if the SlotHashes sysvar is missing or malformed
/// - `TransferFailed` if the winner's account was not supplied as writable,
///   the vault cannot cover the pot, or balances do not match after the move
pub fn pick_winner(ctx: Context<PickWinner>) -> Result<()> {
    let manager = ctx.accounts.manager.key();
    let player_count = ctx.accounts.lottery.check_draw(&manager)?;

    let hash_words = {
        let data = ctx.accounts.recent_slothashes.try_borrow_data()?;
        entropy::recent_hash_words(&data)?
    };
    let clock = Clock::get()?;
    let winning_index =
        entropy::draw_index(hash_words, clock.unix_timestamp, &manager, player_count)?;
    let payout = ctx.accounts.lottery.payout(winning_index)?;

    let rent_lamports = Rent::get()?.minimum_balance(VAULT_ACCOUNT_SIZE);
    transfer_pot(
        &ctx.accounts.vault.to_account_info(),
        ctx.remaining_accounts,
        &payout.winner,
        payout.amount,
        rent_lamports,
    )?;

    let lottery_key = ctx.accounts.lottery.key();
    let record = &mut ctx.accounts.round_record;
    record.lottery = lottery_key;
    record.round = payout.round;
    record.winner = payout.winner;
    record.amount = payout.amount;
    record.player_count = payout.player_count;
    record.drawn_at = clock.unix_timestamp;

    ctx.accounts.lottery.close_round(&payout)?;

    emit!(WinnerPicked {
        lottery: lottery_key,
        round: payout.round,
        winner: payout.winner,
        winning_index,
        amount: payout.amount,
        player_count: payout.player_count,
    });

    Ok(())
}

/// Accounts required for the pick_winner instruction
#[derive(Accounts)]
pub struct PickWinner<'info> {
    #[account(
        mut,
        seeds = [LOTTERY_SEED, lottery.manager.as_ref()],
        bump = lottery.bump,
        has_one = vault @ LotteryError::InvalidVault,
    )]
    pub lottery: Account<'info, Lottery>,

    /// Vault paying out the pot
    /// PDA with seeds ["vault", lottery_key]
    #[account(
        mut,
        seeds = [VAULT_SEED, lottery.key().as_ref()],
        bump = vault.bump,
    )]
    pub vault: Account<'info, Vault>,

    /// Winner log entry for the round being drawn
    /// PDA with seeds ["round", lottery_key, round]
    #[account(
        init,
        payer = manager,
        space = ROUND_RECORD_ACCOUNT_SIZE,
        seeds = [
            ROUND_SEED,
            lottery.key().as_ref(),
            lottery.round.to_le_bytes().as_ref(),
        ],
        bump
    )]
    pub round_record: Account<'info, RoundRecord>,

    /// Must match `lottery.manager`; checked in the handler
    #[account(mut)]
    pub manager: Signer<'info>,

    /// The SlotHashes sysvar contains the most recent block hashes
    /// CHECK: Using UncheckedAccount because Anchor cannot deserialize the
    /// SlotHashes sysvar; the address is pinned to the sysvar id.
    #[account(address = slot_hashes::ID @ LotteryError::InvalidSlotHashesAccount)]
    pub recent_slothashes: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Moves `amount` lamports from `vault` to the writable account in
/// `candidates` keyed `winner`, leaving at least `rent_lamports` behind.
///
/// # Errors
/// - `TransferFailed` if no writable candidate matches `winner`, the vault
///   holds less than `rent_lamports + amount`, or either balance is off
///   after the move
pub fn transfer_pot<'a, 'b>(
    vault: &AccountInfo<'a>,
    candidates: &[AccountInfo<'b>],
    winner: &Pubkey,
    amount: u64,
    rent_lamports: u64,
) -> Result<()> {
    let winner = candidates
        .iter()
        .find(|account| account.key == winner && account.is_writable)
        .ok_or(LotteryError::TransferFailed)?;

    let available = vault
        .lamports()
        .checked_sub(rent_lamports)
        .ok_or(LotteryError::TransferFailed)?;
    require!(available >= amount, LotteryError::TransferFailed);

    let pre_vault_balance = vault.lamports();
    let pre_winner_balance = winner.lamports();

    // The vault is a PDA owned by this program, so lamports can be moved
    // directly instead of through the system program.
    vault
        .sub_lamports(amount)
        .map_err(|_| error!(LotteryError::TransferFailed))?;
    winner
        .add_lamports(amount)
        .map_err(|_| error!(LotteryError::TransferFailed))?;

    require!(
        winner.lamports()
            == pre_winner_balance
                .checked_add(amount)
                .ok_or(LotteryError::Overflow)?,
        LotteryError::TransferFailed
    );
    require!(
        vault.lamports()
            == pre_vault_balance
                .checked_sub(amount)
                .ok_or(LotteryError::Overflow)?,
        LotteryError::TransferFailed
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_PLAYERS;

    const RENT: u64 = 1_113_600;
    const POT: u64 = 2_000_000_000;
    const WINNER_START: u64 = 5_000;

    #[test]
    fn pot_moves_from_vault_to_winner() {
        let program_id = crate::ID;
        let system_id = Pubkey::default();
        let vault_key = Pubkey::new_unique();
        let other_key = Pubkey::new_unique();
        let winner_key = Pubkey::new_unique();
        let mut vault_lamports = RENT + POT;
        let mut other_lamports = WINNER_START;
        let mut winner_lamports = WINNER_START;
        let mut vault_data = [0u8; VAULT_ACCOUNT_SIZE];
        let mut other_data = [0u8; 0];
        let mut winner_data = [0u8; 0];

        let vault = AccountInfo::new(
            &vault_key, false, true, &mut vault_lamports, &mut vault_data, &program_id, false, 0,
        );
        let candidates = [
            AccountInfo::new(
                &other_key, false, true, &mut other_lamports, &mut other_data, &system_id, false, 0,
            ),
            AccountInfo::new(
                &winner_key, false, true, &mut winner_lamports, &mut winner_data, &system_id, false, 0,
            ),
        ];

        transfer_pot(&vault, &candidates, &winner_key, POT, RENT).unwrap();

        assert_eq!(vault.lamports(), RENT);
        assert_eq!(candidates[0].lamports(), WINNER_START);
        assert_eq!(candidates[1].lamports(), WINNER_START + POT);
    }

    #[test]
    fn missing_winner_fails_without_moving_lamports() {
        let program_id = crate::ID;
        let system_id = Pubkey::default();
        let vault_key = Pubkey::new_unique();
        let other_key = Pubkey::new_unique();
        let mut vault_lamports = RENT + POT;
        let mut other_lamports = WINNER_START;
        let mut vault_data = [0u8; VAULT_ACCOUNT_SIZE];
        let mut other_data = [0u8; 0];

        let vault = AccountInfo::new(
            &vault_key, false, true, &mut vault_lamports, &mut vault_data, &program_id, false, 0,
        );
        let candidates = [AccountInfo::new(
            &other_key, false, true, &mut other_lamports, &mut other_data, &system_id, false, 0,
        )];

        let result = transfer_pot(&vault, &candidates, &Pubkey::new_unique(), POT, RENT);

        assert_eq!(result.unwrap_err(), LotteryError::TransferFailed.into());
        assert_eq!(vault.lamports(), RENT + POT);
        assert_eq!(candidates[0].lamports(), WINNER_START);
    }

    #[test]
    fn read_only_winner_fails_without_moving_lamports() {
        let program_id = crate::ID;
        let system_id = Pubkey::default();
        let vault_key = Pubkey::new_unique();
        let winner_key = Pubkey::new_unique();
        let mut vault_lamports = RENT + POT;
        let mut winner_lamports = WINNER_START;
        let mut vault_data = [0u8; VAULT_ACCOUNT_SIZE];
        let mut winner_data = [0u8; 0];

        let vault = AccountInfo::new(
            &vault_key, false, true, &mut vault_lamports, &mut vault_data, &program_id, false, 0,
        );
        let candidates = [AccountInfo::new(
            &winner_key, false, false, &mut winner_lamports, &mut winner_data, &system_id, false, 0,
        )];

        let result = transfer_pot(&vault, &candidates, &winner_key, POT, RENT);

        assert_eq!(result.unwrap_err(), LotteryError::TransferFailed.into());
        assert_eq!(vault.lamports(), RENT + POT);
        assert_eq!(candidates[0].lamports(), WINNER_START);
    }

    #[test]
    fn vault_must_cover_rent_and_pot() {
        let program_id = crate::ID;
        let system_id = Pubkey::default();
        let vault_key = Pubkey::new_unique();
        let winner_key = Pubkey::new_unique();
        let mut vault_lamports = RENT + POT - 1;
        let mut winner_lamports = WINNER_START;
        let mut vault_data = [0u8; VAULT_ACCOUNT_SIZE];
        let mut winner_data = [0u8; 0];

        let vault = AccountInfo::new(
            &vault_key, false, true, &mut vault_lamports, &mut vault_data, &program_id, false, 0,
        );
        let candidates = [AccountInfo::new(
            &winner_key, false, true, &mut winner_lamports, &mut winner_data, &system_id, false, 0,
        )];

        let short = transfer_pot(&vault, &candidates, &winner_key, POT, RENT);
        let below_rent = transfer_pot(&vault, &candidates, &winner_key, 0, RENT + POT);

        assert_eq!(short.unwrap_err(), LotteryError::TransferFailed.into());
        assert_eq!(below_rent.unwrap_err(), LotteryError::TransferFailed.into());
        assert_eq!(vault.lamports(), RENT + POT - 1);
        assert_eq!(candidates[0].lamports(), WINNER_START);
    }

    /// Serialized size of a legacy transaction with one signature and one
    /// instruction, for key counts below 128.
    fn legacy_transaction_size(
        account_keys: usize,
        instruction_accounts: usize,
        data_len: usize,
    ) -> usize {
        let signatures = 1 + 64;
        let header = 3;
        let keys = 1 + 32 * account_keys;
        let blockhash = 32;
        let instruction = 1 + 1 + instruction_accounts + 1 + data_len;
        signatures + header + keys + blockhash + 1 + instruction
    }

    #[test]
    fn full_round_draw_fits_a_legacy_transaction() {
        // lottery, vault, round_record, manager, slot hashes, system program
        let fixed_accounts = 6;
        let program_id = 1;
        let discriminator = 8;

        let size = legacy_transaction_size(
            fixed_accounts + program_id + MAX_PLAYERS,
            fixed_accounts + MAX_PLAYERS,
            discriminator,
        );

        assert!(size <= 1232, "pick_winner with {MAX_PLAYERS} players is {size} bytes");
        assert_eq!(legacy_transaction_size(38, 37, 8), 1366);
    }
}
