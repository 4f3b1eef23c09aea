// programs/nobody_reserve/src/contexts.rs

use anchor_lang::prelude::*;

use crate::state::{Config, Raffle, Reservation};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + Config::INIT_SPACE,
        seeds = [crate::CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = admin,
        space = 8 + Raffle::INIT_SPACE,
        seeds = [crate::RAFFLE_SEED, config.key().as_ref()],
        bump
    )]
    pub raffle: Account<'info, Raffle>,

    /// Reservation payments are held here until refunded or withdrawn.
    /// CHECK: system-owned PDA (owner = system program). Address enforced by seeds/bump.
    #[account(
        init,
        payer = admin,
        space = 0,
        owner = anchor_lang::solana_program::system_program::ID,
        seeds = [crate::VAULT_SEED, config.key().as_ref()],
        bump
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

/// Shared by every operator setter (price, cutoff, channel flags, oracle, subscription).
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    pub admin: Signer<'info>,
}

// remaining_accounts: one WhitelistEntry PDA per user, same order as the `users` arg
#[derive(Accounts)]
pub struct SetWhitelist<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct Reserve<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::RAFFLE_SEED, config.key().as_ref()],
        bump = raffle.bump
    )]
    pub raffle: Account<'info, Raffle>,

    // Existing reservations deserialize with `reserved == true` and are rejected in the handler.
    #[account(
        init_if_needed,
        payer = user,
        space = 8 + Reservation::INIT_SPACE,
        seeds = [crate::RESERVATION_SEED, user.key().as_ref()],
        bump
    )]
    pub reservation: Account<'info, Reservation>,

    /// CHECK: WhitelistEntry PDA for `user`; may be uninitialized (= not whitelisted).
    #[account(
        seeds = [crate::WHITELIST_SEED, user.key().as_ref()],
        bump
    )]
    pub whitelist_entry: UncheckedAccount<'info>,

    /// CHECK: System-owned PDA used only as a lamport vault. Address is enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::VAULT_SEED, config.key().as_ref()],
        bump = config.vault_bump
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct RequestRandomWords<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::RAFFLE_SEED, config.key().as_ref()],
        bump = raffle.bump
    )]
    pub raffle: Account<'info, Raffle>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct FulfillRandomWords<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::RAFFLE_SEED, config.key().as_ref()],
        bump = raffle.bump
    )]
    pub raffle: Account<'info, Raffle>,

    pub oracle: Signer<'info>,
}

#[derive(Accounts)]
pub struct FulfillRandomWordsSigned<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::RAFFLE_SEED, config.key().as_ref()],
        bump = raffle.bump
    )]
    pub raffle: Account<'info, Raffle>,

    pub payer: Signer<'info>,

    /// CHECK: instruction sysvar (for ed25519 introspection). Address enforced.
    #[account(address = anchor_lang::solana_program::sysvar::instructions::ID)]
    pub instructions: UncheckedAccount<'info>,
}

#[cfg(feature = "mock-vrf")]
#[derive(Accounts)]
pub struct FulfillRandomWordsMock<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::RAFFLE_SEED, config.key().as_ref()],
        bump = raffle.bump
    )]
    pub raffle: Account<'info, Raffle>,

    pub admin: Signer<'info>,
}

// remaining_accounts: the `count` Reservation PDAs that come next in order_index order (writable)
#[derive(Accounts)]
pub struct ExecuteRaffle<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::RAFFLE_SEED, config.key().as_ref()],
        bump = raffle.bump
    )]
    pub raffle: Account<'info, Raffle>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct Refund<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::RAFFLE_SEED, config.key().as_ref()],
        bump = raffle.bump
    )]
    pub raffle: Account<'info, Raffle>,

    /// CHECK: Reservation PDA for `user`; may be uninitialized (-> NotRefundable).
    /// Owner checked in handler.
    #[account(
        mut,
        seeds = [crate::RESERVATION_SEED, user.key().as_ref()],
        bump
    )]
    pub reservation: UncheckedAccount<'info>,

    /// CHECK: System-owned PDA used only as a lamport vault. Address is enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::VAULT_SEED, config.key().as_ref()],
        bump = config.vault_bump
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    /// CHECK: System-owned PDA used only as a lamport vault. Address is enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::VAULT_SEED, config.key().as_ref()],
        bump = config.vault_bump
    )]
    pub vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

// ----------------------------
// Read-only views
// ----------------------------
#[derive(Accounts)]
pub struct TotalReserved<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [crate::RAFFLE_SEED, config.key().as_ref()],
        bump = raffle.bump
    )]
    pub raffle: Account<'info, Raffle>,
}

#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct ReservationView<'info> {
    /// CHECK: Reservation PDA for `user`; may be uninitialized.
    #[account(
        seeds = [crate::RESERVATION_SEED, user.as_ref()],
        bump
    )]
    pub reservation: UncheckedAccount<'info>,
}
