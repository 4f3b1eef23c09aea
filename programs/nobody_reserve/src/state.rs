use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace)]
pub struct Config {
    pub admin: Pubkey,
    pub bump: u8,

    pub reserve_price: u64,
    /// Reservations strictly before this unix timestamp get PRIORITY_WEIGHT.
    pub priority_time: i64,

    pub whitelist_reserve_active: bool,
    pub public_reserve_active: bool,
    pub refund_active: bool,

    // oracle allowed to deliver random words (direct signer or ed25519 attestation)
    pub oracle: Pubkey,
    pub vrf_subscription_id: u64,

    // System-owned PDA vault (holds lamports, no data)
    pub vault: Pubkey,
    pub vault_bump: u8,

    pub version: u16,
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Whitelist = 0,
    Public = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RafflePhase {
    Open,
    Closed,
    RandomnessRequested,
    RandomnessFulfilled,
    Executing,
    Complete,
    RefundOpen,
}

#[account]
#[derive(InitSpace)]
pub struct Raffle {
    pub bump: u8,

    // ledger totals
    pub total_reserved: u64,
    pub total_weight: u64,
    pub priority_count: u64,

    // randomness request (one-shot)
    pub randomness_requested: bool,
    pub request_id: u64,
    pub key_hash: [u8; 32],
    pub request_confirmations: u16,
    pub callback_gas_limit: u32,
    pub num_words: u32,
    pub requested_slot: u64,

    pub randomness_fulfilled: bool,
    /// NOTE: max_len must track MAX_RANDOM_WORDS.
    #[max_len(8)]
    pub random_words: Vec<[u8; 32]>,
    pub fulfilled_slot: u64,

    // batch execution cursor
    pub processed_count: u64,
    pub next_batch_number: u64,
    pub won_count: u64,

    // settlement
    pub refunded_count: u64,
    pub refunded_amount: u64,

    pub version: u16,
}

impl Raffle {
    pub fn is_complete(&self) -> bool {
        self.randomness_fulfilled && self.processed_count == self.total_reserved
    }

    pub fn phase(&self, cfg: &Config) -> RafflePhase {
        if !self.randomness_requested {
            if cfg.whitelist_reserve_active || cfg.public_reserve_active {
                return RafflePhase::Open;
            }
            return RafflePhase::Closed;
        }
        if !self.randomness_fulfilled {
            return RafflePhase::RandomnessRequested;
        }
        if self.processed_count == 0 && self.total_reserved > 0 {
            return RafflePhase::RandomnessFulfilled;
        }
        if self.processed_count < self.total_reserved {
            return RafflePhase::Executing;
        }
        if cfg.refund_active {
            RafflePhase::RefundOpen
        } else {
            RafflePhase::Complete
        }
    }
}

#[account]
#[derive(InitSpace)]
pub struct Reservation {
    pub user: Pubkey,
    pub bump: u8,

    // false only while the PDA is freshly allocated (init_if_needed)
    pub reserved: bool,

    pub order_index: u64,
    pub weight: u64,
    pub channel: u8,
    pub paid_amount: u64,
    pub reserved_at: i64,
    pub reserved_slot: u64,

    // outcome
    pub processed: bool,
    pub won: bool,
    pub batch_number: u64,

    // refund guard
    pub refunded: bool,
    pub refunded_slot: u64,
}

impl Reservation {
    pub fn raffle_won(&self) -> bool {
        self.reserved && self.processed && self.won
    }
}

#[account]
#[derive(InitSpace)]
pub struct WhitelistEntry {
    pub user: Pubkey,
    pub bump: u8,
    pub allowed: bool,
    pub updated_slot: u64,
}
