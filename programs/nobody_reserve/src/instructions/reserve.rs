use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

use crate::{
    events::{PublicReserved, WhitelistReserved},
    raffle::reserve_core,
    state::Channel,
    utils::read_whitelist_flag,
    Reserve,
};

pub fn whitelist_reserve(ctx: Context<Reserve>, amount: u64) -> Result<()> {
    let (user, order_index, weight) = reserve(ctx, Channel::Whitelist, amount)?;

    emit!(WhitelistReserved {
        user,
        order_index,
        weight,
    });
    Ok(())
}

pub fn public_reserve(ctx: Context<Reserve>, amount: u64) -> Result<()> {
    let (user, order_index, weight) = reserve(ctx, Channel::Public, amount)?;

    emit!(PublicReserved {
        user,
        order_index,
        weight,
    });
    Ok(())
}

// Records the reservation, then moves `amount` lamports from the user into the vault.
fn reserve(ctx: Context<Reserve>, channel: Channel, amount: u64) -> Result<(Pubkey, u64, u64)> {
    let clock = Clock::get()?;
    let user = ctx.accounts.user.key();

    let whitelisted = read_whitelist_flag(
        &ctx.accounts.whitelist_entry.to_account_info(),
        ctx.program_id,
    )?;

    reserve_core(
        &ctx.accounts.config,
        &mut ctx.accounts.raffle,
        &mut ctx.accounts.reservation,
        user,
        ctx.bumps.reservation,
        channel,
        whitelisted,
        amount,
        clock.unix_timestamp,
        clock.slot,
    )?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            Transfer {
                from: ctx.accounts.user.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
            },
        ),
        amount,
    )?;

    let reservation = &ctx.accounts.reservation;
    msg!(
        "reserve: user={} channel={:?} order_index={} weight={} total={}",
        user,
        channel,
        reservation.order_index,
        reservation.weight,
        ctx.accounts.raffle.total_reserved
    );

    Ok((user, reservation.order_index, reservation.weight))
}
