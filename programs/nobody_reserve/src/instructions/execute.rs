use anchor_lang::prelude::*;

use crate::{
    errors::ReserveError,
    events::{RaffleBatchExecuted, RaffleWon},
    raffle::execute_batch_core,
    state::Reservation,
    utils::{MAX_BATCH, RESERVATION_SEED},
    ExecuteRaffle,
};

/// Decides the next `count` entrants in order_index order.
/// remaining_accounts: their Reservation PDAs, writable, same order.
pub fn execute_raffle<'info>(
    ctx: Context<'_, '_, 'info, 'info, ExecuteRaffle<'info>>,
    batch_number: u64,
    count: u64,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ReserveError::Unauthorized);
    require!(
        ctx.remaining_accounts.len() <= MAX_BATCH,
        ReserveError::TooManyEntries
    );

    // --- load ---
    let mut entrants: Vec<Reservation> = Vec::with_capacity(ctx.remaining_accounts.len());
    for reservation_ai in ctx.remaining_accounts.iter() {
        require_keys_eq!(
            *reservation_ai.owner,
            *ctx.program_id,
            ReserveError::AccountNotOwnedByProgram
        );

        let reservation = {
            let data = reservation_ai
                .try_borrow_data()
                .map_err(|_| error!(ReserveError::AccountBorrowFailed))?;
            let mut slice: &[u8] = &data;
            Reservation::try_deserialize(&mut slice)?
        };

        let expected_pda = Pubkey::create_program_address(
            &[RESERVATION_SEED, reservation.user.as_ref(), &[reservation.bump]],
            ctx.program_id,
        )
        .map_err(|_| error!(ReserveError::ReservationMismatch))?;
        require_keys_eq!(expected_pda, *reservation_ai.key, ReserveError::ReservationMismatch);

        entrants.push(reservation);
    }

    // --- decide ---
    let raffle = &mut ctx.accounts.raffle;
    let winners = execute_batch_core(raffle, batch_number, count, &mut entrants)?;

    // --- persist ---
    for (reservation_ai, reservation) in ctx.remaining_accounts.iter().zip(entrants.iter()) {
        require!(reservation_ai.is_writable, ReserveError::ReservationMismatch);

        let mut data = reservation_ai
            .try_borrow_mut_data()
            .map_err(|_| error!(ReserveError::AccountBorrowFailed))?;
        let mut w = std::io::Cursor::new(&mut data[..]);
        reservation.try_serialize(&mut w)?;

        if reservation.won {
            emit!(RaffleWon {
                user: reservation.user,
                order_index: reservation.order_index,
                batch_number,
            });
        }
    }

    msg!(
        "execute_raffle: batch={} count={} winners={} processed={}/{}",
        batch_number,
        count,
        winners,
        raffle.processed_count,
        raffle.total_reserved
    );
    emit!(RaffleBatchExecuted {
        batch_number,
        processed_count: raffle.processed_count,
        winners,
    });
    Ok(())
}
