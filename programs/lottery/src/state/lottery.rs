use anchor_lang::prelude::*;

use crate::{constants::MAX_PLAYERS, error::LotteryError};

// Space calculation:
// 8 (discriminator) +
// 32 (manager) +
// 32 (vault) +
// 8 (minimum_entry) +
// 8 (pot) +
// 8 (round) +
// 8 (total_deposited) +
// 8 (total_disbursed) +
// 4 (length of players) +
// 32 * MAX_PLAYERS (players) +
// 1 (bump)
pub const LOTTERY_ACCOUNT_SIZE: usize = 8 + 32 + 32 + 8 + 8 + 8 + 8 + 8 + 4 + 32 * MAX_PLAYERS + 1;

/// The ledger for one manager's lottery.
///
/// `pot` only counts lamports accepted through `enter` since the last draw.
/// Lamports sent to the vault by other means are never paid out.
#[account]
pub struct Lottery {
    /// Fixed at initialization; the only key allowed to draw.
    pub manager: Pubkey,
    pub vault: Pubkey,
    pub minimum_entry: u64,
    pub pot: u64,
    /// Number of completed draws.
    pub round: u64,
    pub total_deposited: u64,
    pub total_disbursed: u64,
    /// Entries for the current round in the order they were made.
    /// A key appears once per entry.
    pub players: Vec<Pubkey>,
    pub bump: u8,
}

/// What a draw pays out, computed before any lamports move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payout {
    pub round: u64,
    pub winner: Pubkey,
    pub amount: u64,
    pub player_count: u64,
}

impl Lottery {
    pub fn new(manager: Pubkey, vault: Pubkey, minimum_entry: u64, bump: u8) -> Self {
        Self {
            manager,
            vault,
            minimum_entry,
            pot: 0,
            round: 0,
            total_deposited: 0,
            total_disbursed: 0,
            players: Vec::new(),
            bump,
        }
    }

    /// Adds one entry for `player`. Nothing is written unless every check passes.
    ///
    /// # Errors
    /// - `InsufficientStake` if `amount` is below `minimum_entry`
    /// - `LotteryFull` if the round already holds `MAX_PLAYERS` entries
    /// - `Overflow` if the pot or the running deposit total would overflow
    pub fn record_entry(&mut self, player: Pubkey, amount: u64) -> Result<()> {
        require!(
            amount >= self.minimum_entry,
            LotteryError::InsufficientStake
        );
        require!(self.players.len() < MAX_PLAYERS, LotteryError::LotteryFull);

        let pot = self.pot.checked_add(amount).ok_or(LotteryError::Overflow)?;
        let total_deposited = self
            .total_deposited
            .checked_add(amount)
            .ok_or(LotteryError::Overflow)?;

        self.players.push(player);
        self.pot = pot;
        self.total_deposited = total_deposited;

        Ok(())
    }

    /// Checks that `caller` may draw now and returns the number of entries.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the manager
    /// - `NoParticipants` if nobody has entered this round
    pub fn check_draw(&self, caller: &Pubkey) -> Result<u64> {
        require_keys_eq!(*caller, self.manager, LotteryError::Unauthorized);
        require!(!self.players.is_empty(), LotteryError::NoParticipants);

        Ok(self.players.len() as u64)
    }

    /// Resolves the drawn `index` to a winner and the full pot.
    pub fn payout(&self, index: u64) -> Result<Payout> {
        let winner = usize::try_from(index)
            .ok()
            .and_then(|index| self.players.get(index))
            .copied()
            .ok_or(LotteryError::NoParticipants)?;

        Ok(Payout {
            round: self.round,
            winner,
            amount: self.pot,
            player_count: self.players.len() as u64,
        })
    }

    /// Resets the registry and pot after `payout` has been disbursed and
    /// opens the next round.
    pub fn close_round(&mut self, payout: &Payout) -> Result<()> {
        let total_disbursed = self
            .total_disbursed
            .checked_add(payout.amount)
            .ok_or(LotteryError::Overflow)?;
        require!(
            total_disbursed <= self.total_deposited,
            LotteryError::TransferFailed
        );
        let round = self.round.checked_add(1).ok_or(LotteryError::Overflow)?;

        self.players.clear();
        self.pot = 0;
        self.total_disbursed = total_disbursed;
        self.round = round;

        Ok(())
    }
}
