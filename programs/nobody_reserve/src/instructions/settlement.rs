use anchor_lang::prelude::*;
use anchor_lang::solana_program::{program::invoke_signed, system_instruction};

use crate::{
    errors::ReserveError,
    events::{Refunded, Withdrawn},
    raffle::{refund_core, vault_outflow},
    utils::{read_reservation, VAULT_SEED},
    Refund, Withdraw,
};

/// Pays a losing entrant back its reservation payment, at most once.
pub fn refund(ctx: Context<Refund>) -> Result<()> {
    let current_slot = Clock::get()?.slot;
    let reservation_ai = ctx.accounts.reservation.to_account_info();
    let mut reservation = read_reservation(&reservation_ai, ctx.program_id)?;

    let amount = refund_core(
        &ctx.accounts.config,
        &mut ctx.accounts.raffle,
        reservation.as_mut(),
        current_slot,
    )?;

    // vault must keep its rent-exempt floor
    let rent_floor = Rent::get()?.minimum_balance(0);
    let vault_lamports = ctx.accounts.vault.lamports();
    require!(
        vault_lamports >= amount.saturating_add(rent_floor),
        ReserveError::InsufficientVaultFunds
    );

    // persist the refunded flag before any lamports move
    if let Some(reservation) = reservation.as_ref() {
        let mut data = reservation_ai
            .try_borrow_mut_data()
            .map_err(|_| error!(ReserveError::AccountBorrowFailed))?;
        let mut w = std::io::Cursor::new(&mut data[..]);
        reservation.try_serialize(&mut w)?;
    }

    let config_key = ctx.accounts.config.key();
    let signer_seeds: &[&[u8]] = &[
        VAULT_SEED,
        config_key.as_ref(),
        &[ctx.accounts.config.vault_bump],
    ];

    let ix = system_instruction::transfer(
        &ctx.accounts.vault.key(),
        &ctx.accounts.user.key(),
        amount,
    );
    invoke_signed(
        &ix,
        &[
            ctx.accounts.vault.to_account_info(),
            ctx.accounts.user.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
        ],
        &[signer_seeds],
    )?;

    msg!("refund: user={} amount={}", ctx.accounts.user.key(), amount);
    emit!(Refunded {
        user: ctx.accounts.user.key(),
        amount,
    });
    Ok(())
}

/// Moves vault lamports to the admin. `amount == 0` withdraws everything above rent.
pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ReserveError::Unauthorized);

    let rent_floor = Rent::get()?.minimum_balance(0); // system account
    let withdraw_amount = vault_outflow(amount, ctx.accounts.vault.lamports(), rent_floor)?;
    if withdraw_amount == 0 {
        return Ok(());
    }

    let config_key = cfg.key();
    let signer_seeds: &[&[u8]] = &[VAULT_SEED, config_key.as_ref(), &[cfg.vault_bump]];

    let ix = system_instruction::transfer(
        &ctx.accounts.vault.key(),
        &ctx.accounts.admin.key(),
        withdraw_amount,
    );
    invoke_signed(
        &ix,
        &[
            ctx.accounts.vault.to_account_info(),
            ctx.accounts.admin.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
        ],
        &[signer_seeds],
    )?;

    msg!("withdraw: to={} amount={}", ctx.accounts.admin.key(), withdraw_amount);
    emit!(Withdrawn {
        to: ctx.accounts.admin.key(),
        amount: withdraw_amount,
    });
    Ok(())
}
