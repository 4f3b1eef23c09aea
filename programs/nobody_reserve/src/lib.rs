use anchor_lang::prelude::*;

pub mod constants;
pub mod contexts;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod raffle;
pub mod state;
pub mod utils;

pub use constants::*;
pub use contexts::*;
pub use errors::*;
pub use events::*;
pub use instructions::*;
pub use state::*;
pub use utils::*;

use solana_security_txt::security_txt;

security_txt! {
    // Required fields
    name: "Nobody Reserve",
    project_url: "https://github.com/nobody-reserve/nobody-reserve",
    contacts: "link:https://github.com/nobody-reserve/nobody-reserve/issues",
    policy: "https://github.com/nobody-reserve/nobody-reserve/blob/main/SECURITY.md",

    // Optional fields
    preferred_languages: "en",
    source_code: "https://github.com/nobody-reserve/nobody-reserve"
}

declare_id!("3vNzts2bFKX6GxBx2DMZbprL25fruwRAQsQ6GtCbZn9d");

#[program]
pub mod nobody_reserve {
    use super::*;
    use crate::instructions::{admin, execute, oracle, reserve, settlement, views};

    pub fn initialize(
        ctx: Context<Initialize>,
        reserve_price: u64,
        priority_time: i64,
        oracle: Pubkey,
        vrf_subscription_id: u64,
    ) -> Result<()> {
        admin::initialize(ctx, reserve_price, priority_time, oracle, vrf_subscription_id)
    }

    // ----------------------------
    // Operator settings
    // ----------------------------
    pub fn set_reserve_price(ctx: Context<UpdateConfig>, reserve_price: u64) -> Result<()> {
        admin::set_reserve_price(ctx, reserve_price)
    }

    pub fn set_priority_time(ctx: Context<UpdateConfig>, priority_time: i64) -> Result<()> {
        admin::set_priority_time(ctx, priority_time)
    }

    pub fn set_is_whitelist_reserve_active(ctx: Context<UpdateConfig>, active: bool) -> Result<()> {
        admin::set_is_whitelist_reserve_active(ctx, active)
    }

    pub fn set_is_public_reserve_active(ctx: Context<UpdateConfig>, active: bool) -> Result<()> {
        admin::set_is_public_reserve_active(ctx, active)
    }

    pub fn set_is_refund_active(ctx: Context<UpdateConfig>, active: bool) -> Result<()> {
        admin::set_is_refund_active(ctx, active)
    }

    pub fn set_vrf_subscription_id(ctx: Context<UpdateConfig>, subscription_id: u64) -> Result<()> {
        admin::set_vrf_subscription_id(ctx, subscription_id)
    }

    pub fn set_oracle(ctx: Context<UpdateConfig>, oracle: Pubkey) -> Result<()> {
        admin::set_oracle(ctx, oracle)
    }

    pub fn set_whitelist<'info>(
        ctx: Context<'_, '_, 'info, 'info, SetWhitelist<'info>>,
        users: Vec<Pubkey>,
        allowed: bool,
    ) -> Result<()> {
        admin::set_whitelist(ctx, users, allowed)
    }

    // ----------------------------
    // Reservations
    // ----------------------------
    pub fn whitelist_reserve(ctx: Context<Reserve>, amount: u64) -> Result<()> {
        reserve::whitelist_reserve(ctx, amount)
    }

    pub fn public_reserve(ctx: Context<Reserve>, amount: u64) -> Result<()> {
        reserve::public_reserve(ctx, amount)
    }

    // ----------------------------
    // Randomness
    // ----------------------------
    pub fn request_raffle_random_words(
        ctx: Context<RequestRandomWords>,
        key_hash: [u8; 32],
        request_confirmations: u16,
        callback_gas_limit: u32,
        num_words: u32,
    ) -> Result<()> {
        oracle::request_raffle_random_words(
            ctx,
            key_hash,
            request_confirmations,
            callback_gas_limit,
            num_words,
        )
    }

    pub fn fulfill_random_words(
        ctx: Context<FulfillRandomWords>,
        request_id: u64,
        random_words: Vec<[u8; 32]>,
    ) -> Result<()> {
        oracle::fulfill_random_words(ctx, request_id, random_words)
    }

    pub fn fulfill_random_words_signed(
        ctx: Context<FulfillRandomWordsSigned>,
        request_id: u64,
        random_words: Vec<[u8; 32]>,
    ) -> Result<()> {
        oracle::fulfill_random_words_signed(ctx, request_id, random_words)
    }

    #[cfg(feature = "mock-vrf")]
    pub fn fulfill_random_words_mock(
        ctx: Context<FulfillRandomWordsMock>,
        request_id: u64,
        random_words: Vec<[u8; 32]>,
    ) -> Result<()> {
        oracle::fulfill_random_words_mock(ctx, request_id, random_words)
    }

    // ----------------------------
    // Raffle + settlement
    // ----------------------------
    pub fn execute_raffle<'info>(
        ctx: Context<'_, '_, 'info, 'info, ExecuteRaffle<'info>>,
        batch_number: u64,
        count: u64,
    ) -> Result<()> {
        execute::execute_raffle(ctx, batch_number, count)
    }

    pub fn refund(ctx: Context<Refund>) -> Result<()> {
        settlement::refund(ctx)
    }

    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        settlement::withdraw(ctx, amount)
    }

    // ----------------------------
    // Views
    // ----------------------------
    pub fn is_reserved(ctx: Context<ReservationView>, user: Pubkey) -> Result<bool> {
        views::is_reserved(ctx, user)
    }

    pub fn total_reserved(ctx: Context<TotalReserved>) -> Result<u64> {
        views::total_reserved(ctx)
    }

    pub fn raffle_won(ctx: Context<ReservationView>, user: Pubkey) -> Result<bool> {
        views::raffle_won(ctx, user)
    }
}
