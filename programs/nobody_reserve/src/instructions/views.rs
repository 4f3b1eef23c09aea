use anchor_lang::prelude::*;

use crate::{utils::read_reservation, ReservationView, TotalReserved};

pub fn is_reserved(ctx: Context<ReservationView>, _user: Pubkey) -> Result<bool> {
    let reservation_ai = ctx.accounts.reservation.to_account_info();
    let reservation = read_reservation(&reservation_ai, ctx.program_id)?;
    Ok(reservation.is_some())
}

pub fn total_reserved(ctx: Context<TotalReserved>) -> Result<u64> {
    Ok(ctx.accounts.raffle.total_reserved)
}

pub fn raffle_won(ctx: Context<ReservationView>, _user: Pubkey) -> Result<bool> {
    let reservation_ai = ctx.accounts.reservation.to_account_info();
    let reservation = read_reservation(&reservation_ai, ctx.program_id)?;
    Ok(reservation.map(|r| r.raffle_won()).unwrap_or(false))
}
