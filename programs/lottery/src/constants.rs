/// Minimum stake accepted by `enter` when `initialize` is not given one: 0.01 SOL.
pub const DEFAULT_MINIMUM_ENTRY: u64 = 10_000_000;

/// Upper bound on registry entries per round. Two limits apply:
/// - `get_players` return data: 4 (vec length) + 32 per entry must stay
///   within 1024 bytes, so at most 31 entries.
/// - `pick_winner` takes every distinct player as a remaining account. With
///   its 7 fixed keys (6 accounts + program id) a legacy transaction is
///   343 + 33 * players bytes, which must stay within the 1232 byte packet
///   limit, so at most 26 players.
pub const MAX_PLAYERS: usize = 26;

pub const LOTTERY_SEED: &[u8] = b"lottery";
pub const VAULT_SEED: &[u8] = b"vault";
pub const ROUND_SEED: &[u8] = b"round";
