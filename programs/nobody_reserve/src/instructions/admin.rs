use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    program::{invoke, invoke_signed},
    system_instruction,
};

use crate::{
    constants::{FIRST_BATCH_NUMBER, INITIAL_VERSION},
    errors::ReserveError,
    events::WhitelistUpdated,
    state::WhitelistEntry,
    utils::{pda_funding, PdaFunding, MAX_BATCH, WHITELIST_SEED},
    Initialize, SetWhitelist, UpdateConfig,
};

pub fn initialize(
    ctx: Context<Initialize>,
    reserve_price: u64,
    priority_time: i64,
    oracle: Pubkey,
    vrf_subscription_id: u64,
) -> Result<()> {
    require!(reserve_price > 0, ReserveError::InvalidPrice);

    let cfg = &mut ctx.accounts.config;
    cfg.admin = ctx.accounts.admin.key();
    cfg.bump = ctx.bumps.config;
    cfg.reserve_price = reserve_price;
    cfg.priority_time = priority_time;
    cfg.whitelist_reserve_active = false;
    cfg.public_reserve_active = false;
    cfg.refund_active = false;
    cfg.oracle = oracle;
    cfg.vrf_subscription_id = vrf_subscription_id;
    cfg.vault = ctx.accounts.vault.key();
    cfg.vault_bump = ctx.bumps.vault;
    cfg.version = INITIAL_VERSION;

    let raffle = &mut ctx.accounts.raffle;
    raffle.bump = ctx.bumps.raffle;
    raffle.next_batch_number = FIRST_BATCH_NUMBER;
    raffle.random_words = Vec::new();
    raffle.version = INITIAL_VERSION;

    msg!(
        "initialize: admin={} price={} priority_time={}",
        cfg.admin,
        reserve_price,
        priority_time
    );
    Ok(())
}

pub fn set_reserve_price(ctx: Context<UpdateConfig>, reserve_price: u64) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ReserveError::Unauthorized);
    require!(reserve_price > 0, ReserveError::InvalidPrice);

    cfg.reserve_price = reserve_price;
    Ok(())
}

pub fn set_priority_time(ctx: Context<UpdateConfig>, priority_time: i64) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ReserveError::Unauthorized);

    cfg.priority_time = priority_time;
    Ok(())
}

pub fn set_is_whitelist_reserve_active(ctx: Context<UpdateConfig>, active: bool) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ReserveError::Unauthorized);

    cfg.whitelist_reserve_active = active;
    msg!("whitelist reserve active={}", active);
    Ok(())
}

pub fn set_is_public_reserve_active(ctx: Context<UpdateConfig>, active: bool) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ReserveError::Unauthorized);

    cfg.public_reserve_active = active;
    msg!("public reserve active={}", active);
    Ok(())
}

pub fn set_is_refund_active(ctx: Context<UpdateConfig>, active: bool) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ReserveError::Unauthorized);

    cfg.refund_active = active;
    msg!("refund active={}", active);
    Ok(())
}

pub fn set_vrf_subscription_id(ctx: Context<UpdateConfig>, subscription_id: u64) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ReserveError::Unauthorized);

    cfg.vrf_subscription_id = subscription_id;
    Ok(())
}

pub fn set_oracle(ctx: Context<UpdateConfig>, oracle: Pubkey) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ReserveError::Unauthorized);

    cfg.oracle = oracle;
    Ok(())
}

/// Creates or updates one WhitelistEntry PDA per user.
/// remaining_accounts[i] must be the entry PDA of users[i].
pub fn set_whitelist<'info>(
    ctx: Context<'_, '_, 'info, 'info, SetWhitelist<'info>>,
    users: Vec<Pubkey>,
    allowed: bool,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ReserveError::Unauthorized);

    require!(users.len() <= MAX_BATCH, ReserveError::TooManyEntries);
    require!(
        ctx.remaining_accounts.len() == users.len(),
        ReserveError::InvalidAddress
    );

    let admin_pk = ctx.accounts.admin.key();
    let current_slot = Clock::get()?.slot;
    let space = 8 + WhitelistEntry::INIT_SPACE;
    let rent_minimum = Rent::get()?.minimum_balance(space);

    for (i, user) in users.iter().enumerate() {
        require!(*user != Pubkey::default(), ReserveError::InvalidAddress);

        let entry_ai = ctx.remaining_accounts[i].clone();
        let (expected_pda, bump) =
            Pubkey::find_program_address(&[WHITELIST_SEED, user.as_ref()], ctx.program_id);
        require_keys_eq!(expected_pda, *entry_ai.key, ReserveError::InvalidAddress);

        if entry_ai.data_is_empty() {
            let entry_seeds: &[&[u8]] = &[WHITELIST_SEED, user.as_ref(), &[bump]];

            match pda_funding(entry_ai.lamports(), rent_minimum) {
                PdaFunding::Create { lamports } => {
                    let ix = system_instruction::create_account(
                        &admin_pk,
                        entry_ai.key,
                        lamports,
                        space as u64,
                        ctx.program_id,
                    );
                    invoke_signed(
                        &ix,
                        &[
                            ctx.accounts.admin.to_account_info(),
                            entry_ai.clone(),
                            ctx.accounts.system_program.to_account_info(),
                        ],
                        &[entry_seeds],
                    )?;
                }
                // pre-funded by a third party: create_account would fail, so adopt it
                PdaFunding::Adopt { top_up } => {
                    if top_up > 0 {
                        invoke(
                            &system_instruction::transfer(&admin_pk, entry_ai.key, top_up),
                            &[
                                ctx.accounts.admin.to_account_info(),
                                entry_ai.clone(),
                                ctx.accounts.system_program.to_account_info(),
                            ],
                        )?;
                    }
                    invoke_signed(
                        &system_instruction::allocate(entry_ai.key, space as u64),
                        &[entry_ai.clone(), ctx.accounts.system_program.to_account_info()],
                        &[entry_seeds],
                    )?;
                    invoke_signed(
                        &system_instruction::assign(entry_ai.key, ctx.program_id),
                        &[entry_ai.clone(), ctx.accounts.system_program.to_account_info()],
                        &[entry_seeds],
                    )?;
                }
            }
        } else {
            require_keys_eq!(
                *entry_ai.owner,
                *ctx.program_id,
                ReserveError::AccountNotOwnedByProgram
            );
        }

        let entry = WhitelistEntry {
            user: *user,
            bump,
            allowed,
            updated_slot: current_slot,
        };

        let mut data = entry_ai
            .try_borrow_mut_data()
            .map_err(|_| error!(ReserveError::AccountBorrowFailed))?;
        let mut w = std::io::Cursor::new(&mut data[..]);
        entry.try_serialize(&mut w)?;

        emit!(WhitelistUpdated {
            user: *user,
            allowed,
        });
    }

    msg!("set_whitelist: n={} allowed={}", users.len(), allowed);
    Ok(())
}
