//! Winner selection from on-chain entropy.
//!
//! The draw index is derived from the most recent block hash in the
//! SlotHashes sysvar, the cluster clock and the key of the account that
//! triggers the draw. None of these inputs are secret. A block producer can
//! see them before the draw commits, and the manager chooses the slot the
//! draw lands in, so either can retry or withhold until a favourable index
//! comes up. The manager can also pass only a favoured player's account to
//! `pick_winner`, which makes every other outcome fail and roll back.
//! Selection is deterministic for identical inputs and spread
//! evenly over the registry, but it is not secure randomness.

use anchor_lang::prelude::*;
use arrayref::array_ref;

use crate::error::LotteryError;

/// 8 (entry count) + 8 (slot) + 32 (hash) of the newest SlotHashes entry.
const NEWEST_ENTRY_END: usize = 48;

/// Rejection sampling rounds before settling for a plain modulo.
const MAX_ATTEMPTS: u8 = 3;

/// Reads the first two little-endian words of the newest block hash out of
/// raw SlotHashes sysvar data.
pub fn recent_hash_words(data: &[u8]) -> Result<[u64; 2]> {
    require!(
        data.len() >= NEWEST_ENTRY_END,
        LotteryError::InvalidSlotHashesAccount
    );

    let entry_count = u64::from_le_bytes(*array_ref![data, 0, 8]);
    require!(entry_count > 0, LotteryError::InvalidSlotHashesAccount);

    let hash = array_ref![data, 16, 32];
    Ok([
        u64::from_le_bytes(*array_ref![hash, 0, 8]),
        u64::from_le_bytes(*array_ref![hash, 8, 8]),
    ])
}

/// Picks an index in `[0, player_count)` from the block hash words, the
/// unix timestamp and the caller's key.
///
/// # Errors
/// - `NoParticipants` if `player_count` is zero
pub fn draw_index(
    hash_words: [u64; 2],
    timestamp: i64,
    caller: &Pubkey,
    player_count: u64,
) -> Result<u64> {
    require!(player_count > 0, LotteryError::NoParticipants);

    let mut value = mix(hash_words[0], timestamp as u64);
    value = mix(value, hash_words[1]);

    let caller_bytes = caller.to_bytes();
    for chunk in caller_bytes.chunks_exact(8) {
        value = mix(value, u64::from_le_bytes(*array_ref![chunk, 0, 8]));
    }

    Ok(unbiased_range(value, player_count))
}

/// splitmix64 finaliser over the sum of both inputs.
fn mix(a: u64, b: u64) -> u64 {
    let mut z = a.wrapping_add(b);

    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Maps `x` into `[0, range)`. Values in the incomplete top bucket are
/// remixed so that every index keeps the same share of the input space.
/// `range` must be non-zero.
fn unbiased_range(x: u64, range: u64) -> u64 {
    if range.is_power_of_two() {
        return x & (range - 1);
    }

    let threshold = u64::MAX - (u64::MAX % range);
    let mut value = x;

    for attempt in 0..MAX_ATTEMPTS {
        if value < threshold {
            return value % range;
        }
        value = mix(value, u64::from(attempt) + 1);
    }

    value % range
}
