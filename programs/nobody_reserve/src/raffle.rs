// programs/nobody_reserve/src/raffle.rs
//
// Account-agnostic core of the reservation -> raffle -> refund engine.
// Instruction handlers load accounts, call into here, then persist and emit.
// Every function validates all of its inputs before mutating anything.

use anchor_lang::prelude::*;

use crate::{
    constants::{MAX_RANDOM_WORDS, NORMAL_WEIGHT, PRIORITY_WEIGHT},
    errors::ReserveError,
    state::{Channel, Config, Raffle, Reservation},
    utils::{draw, MAX_BATCH},
};

pub fn weight_for(reserved_at: i64, priority_time: i64) -> u64 {
    if reserved_at < priority_time {
        PRIORITY_WEIGHT
    } else {
        NORMAL_WEIGHT
    }
}

// -------------------------
// ReservationLedger
// -------------------------
#[allow(clippy::too_many_arguments)]
pub fn reserve_core(
    cfg: &Config,
    raffle: &mut Raffle,
    reservation: &mut Reservation,
    user: Pubkey,
    bump: u8,
    channel: Channel,
    whitelisted: bool,
    paid_amount: u64,
    now: i64,
    current_slot: u64,
) -> Result<()> {
    require!(!reservation.reserved, ReserveError::AlreadyReserved);

    // entrant set is frozen once randomness has been requested
    require!(!raffle.randomness_requested, ReserveError::NotActive);

    match channel {
        Channel::Whitelist => {
            require!(cfg.whitelist_reserve_active, ReserveError::NotActive);
            require!(whitelisted, ReserveError::InvalidAddress);
        }
        Channel::Public => {
            require!(cfg.public_reserve_active, ReserveError::NotActive);
            require!(!whitelisted, ReserveError::InvalidAddress);
        }
    }

    require!(paid_amount == cfg.reserve_price, ReserveError::InvalidValue);

    let weight = weight_for(now, cfg.priority_time);
    let order_index = raffle.total_reserved;

    let total_reserved = raffle
        .total_reserved
        .checked_add(1)
        .ok_or_else(|| error!(ReserveError::MathOverflow))?;
    let total_weight = raffle
        .total_weight
        .checked_add(weight)
        .ok_or_else(|| error!(ReserveError::MathOverflow))?;
    let priority_count = if weight == PRIORITY_WEIGHT {
        raffle
            .priority_count
            .checked_add(1)
            .ok_or_else(|| error!(ReserveError::MathOverflow))?
    } else {
        raffle.priority_count
    };

    reservation.user = user;
    reservation.bump = bump;
    reservation.reserved = true;
    reservation.order_index = order_index;
    reservation.weight = weight;
    reservation.channel = channel as u8;
    reservation.paid_amount = paid_amount;
    reservation.reserved_at = now;
    reservation.reserved_slot = current_slot;
    reservation.processed = false;
    reservation.won = false;
    reservation.batch_number = 0;
    reservation.refunded = false;
    reservation.refunded_slot = 0;

    raffle.total_reserved = total_reserved;
    raffle.total_weight = total_weight;
    raffle.priority_count = priority_count;

    Ok(())
}

// -------------------------
// RandomnessGateway
// -------------------------
pub fn request_core(
    raffle: &mut Raffle,
    request_id: u64,
    key_hash: [u8; 32],
    request_confirmations: u16,
    callback_gas_limit: u32,
    num_words: u32,
    current_slot: u64,
) -> Result<()> {
    require!(
        !raffle.randomness_requested && !raffle.randomness_fulfilled,
        ReserveError::AlreadyRequested
    );
    require!(
        num_words > 0 && (num_words as usize) <= MAX_RANDOM_WORDS,
        ReserveError::InvalidRandomWords
    );

    raffle.randomness_requested = true;
    raffle.request_id = request_id;
    raffle.key_hash = key_hash;
    raffle.request_confirmations = request_confirmations;
    raffle.callback_gas_limit = callback_gas_limit;
    raffle.num_words = num_words;
    raffle.requested_slot = current_slot;

    Ok(())
}

pub fn fulfill_core(
    raffle: &mut Raffle,
    request_id: u64,
    random_words: Vec<[u8; 32]>,
    current_slot: u64,
) -> Result<()> {
    require!(raffle.randomness_requested, ReserveError::UnknownRequest);
    require!(!raffle.randomness_fulfilled, ReserveError::AlreadyFulfilled);
    require!(raffle.request_id == request_id, ReserveError::UnknownRequest);
    require!(
        random_words.len() == raffle.num_words as usize,
        ReserveError::InvalidRandomWords
    );

    // one-shot, all words at once
    raffle.random_words = random_words;
    raffle.randomness_fulfilled = true;
    raffle.fulfilled_slot = current_slot;

    Ok(())
}

// -------------------------
// RaffleExecutor
// -------------------------

/// Decides the next `count` entrants. `entrants` must be the reservations with
/// order_index `processed_count..processed_count + count`, in that order.
/// Returns the number of winners in the batch.
pub fn execute_batch_core(
    raffle: &mut Raffle,
    batch_number: u64,
    count: u64,
    entrants: &mut [Reservation],
) -> Result<u64> {
    require!(raffle.randomness_fulfilled, ReserveError::InvalidRaffle);
    require!(!raffle.random_words.is_empty(), ReserveError::InvalidRaffle);
    require!(batch_number == raffle.next_batch_number, ReserveError::InvalidRaffle);
    require!(count > 0, ReserveError::InvalidRaffle);
    require!(count as usize <= MAX_BATCH, ReserveError::TooManyEntries);

    let end = raffle
        .processed_count
        .checked_add(count)
        .ok_or_else(|| error!(ReserveError::InvalidRaffle))?;
    require!(end <= raffle.total_reserved, ReserveError::InvalidRaffle);
    require!(entrants.len() as u64 == count, ReserveError::ReservationMismatch);

    for (i, entrant) in entrants.iter().enumerate() {
        require!(entrant.reserved, ReserveError::ReservationMismatch);
        require!(!entrant.processed, ReserveError::ReservationMismatch);
        require!(
            entrant.order_index == raffle.processed_count + i as u64,
            ReserveError::ReservationMismatch
        );
    }

    let next_batch_number = batch_number
        .checked_add(1)
        .ok_or_else(|| error!(ReserveError::MathOverflow))?;

    let outcomes: Vec<bool> = entrants
        .iter()
        .map(|e| draw(&raffle.random_words, e.order_index, e.weight))
        .collect();
    let winners = outcomes.iter().filter(|won| **won).count() as u64;
    let won_count = raffle
        .won_count
        .checked_add(winners)
        .ok_or_else(|| error!(ReserveError::MathOverflow))?;

    for (entrant, won) in entrants.iter_mut().zip(outcomes) {
        entrant.processed = true;
        entrant.won = won;
        entrant.batch_number = batch_number;
    }

    raffle.won_count = won_count;
    raffle.processed_count = end;
    raffle.next_batch_number = next_batch_number;

    Ok(winners)
}

// -------------------------
// SettlementLedger
// -------------------------

/// Marks the reservation refunded and returns the lamports owed.
/// The caller performs the transfer only after this returns.
pub fn refund_core(
    cfg: &Config,
    raffle: &mut Raffle,
    reservation: Option<&mut Reservation>,
    current_slot: u64,
) -> Result<u64> {
    require!(cfg.refund_active, ReserveError::RefundNotActive);

    let reservation = reservation.ok_or_else(|| error!(ReserveError::NotRefundable))?;
    require!(reservation.reserved, ReserveError::NotRefundable);
    require!(
        reservation.processed && !reservation.won,
        ReserveError::NotRefundable
    );
    require!(!reservation.refunded, ReserveError::AlreadyRefund);

    let amount = reservation.paid_amount;
    let refunded_count = raffle
        .refunded_count
        .checked_add(1)
        .ok_or_else(|| error!(ReserveError::MathOverflow))?;
    let refunded_amount = raffle
        .refunded_amount
        .checked_add(amount)
        .ok_or_else(|| error!(ReserveError::MathOverflow))?;

    reservation.refunded = true;
    reservation.refunded_slot = current_slot;
    raffle.refunded_count = refunded_count;
    raffle.refunded_amount = refunded_amount;

    Ok(amount)
}

/// Lamports that may leave the vault. `requested == 0` means everything above
/// the rent-exempt floor.
pub fn vault_outflow(requested: u64, vault_lamports: u64, rent_floor: u64) -> Result<u64> {
    let available = vault_lamports.saturating_sub(rent_floor);
    let amount = if requested == 0 { available } else { requested };
    require!(amount <= available, ReserveError::InsufficientVaultFunds);
    Ok(amount)
}
