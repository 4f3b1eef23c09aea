// Centralized Program Constants

// Raffle Weights
// ==============

/// Weight of a reservation placed strictly before `Config::priority_time`.
pub const PRIORITY_WEIGHT: u64 = 9527;

/// Weight of a reservation placed at or after `Config::priority_time`.
pub const NORMAL_WEIGHT: u64 = 1000;

/// Size of the weight universe a draw is taken from.
/// An entrant wins when its roll in `[0, WEIGHT_DENOMINATOR)` falls below its weight,
/// so PRIORITY_WEIGHT ~ 95.27% and NORMAL_WEIGHT ~ 10%.
pub const WEIGHT_DENOMINATOR: u64 = 10_000;

// Defaults
// ========

/// Default reservation price in lamports (0.19527 SOL).
pub const DEFAULT_RESERVE_PRICE: u64 = 195_270_000;

/// Default priority cutoff (unix seconds, 2024-02-01T13:00:00Z).
pub const DEFAULT_PRIORITY_TIME: i64 = 1_706_792_400;

// Limits
// ======

/// Upper bound on random words a single oracle request may ask for.
/// Keeps the Raffle account size deterministic.
pub const MAX_RANDOM_WORDS: usize = 8;

/// Initial version for account structures.
pub const INITIAL_VERSION: u16 = 1;

/// First batch number accepted by `execute_raffle`.
pub const FIRST_BATCH_NUMBER: u64 = 1;
