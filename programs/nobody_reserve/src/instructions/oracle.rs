use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::instructions::{
    load_current_index_checked, load_instruction_at_checked,
};

use crate::{
    errors::ReserveError,
    events::{RandomWordsFulfilled, RandomWordsRequested},
    raffle::{fulfill_core, request_core},
    utils::{assert_ed25519_ix_matches, derive_request_id, expected_random_words_msg},
    FulfillRandomWords, FulfillRandomWordsSigned, RequestRandomWords,
};

#[cfg(feature = "mock-vrf")]
use crate::FulfillRandomWordsMock;

pub fn request_raffle_random_words(
    ctx: Context<RequestRandomWords>,
    key_hash: [u8; 32],
    request_confirmations: u16,
    callback_gas_limit: u32,
    num_words: u32,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ReserveError::Unauthorized);
    require!(cfg.oracle != Pubkey::default(), ReserveError::OracleNotSet);

    let current_slot = Clock::get()?.slot;
    let raffle_key = ctx.accounts.raffle.key();
    let request_id =
        derive_request_id(&raffle_key, cfg.vrf_subscription_id, &key_hash, current_slot);

    let raffle = &mut ctx.accounts.raffle;
    request_core(
        raffle,
        request_id,
        key_hash,
        request_confirmations,
        callback_gas_limit,
        num_words,
        current_slot,
    )?;

    msg!(
        "request_random_words: request_id={} num_words={} entrants={}",
        request_id,
        num_words,
        raffle.total_reserved
    );
    emit!(RandomWordsRequested {
        request_id,
        key_hash,
        num_words,
    });
    Ok(())
}

// Oracle signs the fulfillment tx directly.
pub fn fulfill_random_words(
    ctx: Context<FulfillRandomWords>,
    request_id: u64,
    random_words: Vec<[u8; 32]>,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(cfg.oracle != Pubkey::default(), ReserveError::OracleNotSet);
    require_keys_eq!(cfg.oracle, ctx.accounts.oracle.key(), ReserveError::Unauthorized);

    let current_slot = Clock::get()?.slot;
    let raffle = &mut ctx.accounts.raffle;
    fulfill_core(raffle, request_id, random_words, current_slot)?;

    msg!("fulfill_random_words: request_id={}", request_id);
    emit!(RandomWordsFulfilled {
        request_id,
        random_words: raffle.random_words.clone(),
    });
    Ok(())
}

// Tx layout must be: [ ed25519_verify(oracle, msg), fulfill_random_words_signed ]
pub fn fulfill_random_words_signed(
    ctx: Context<FulfillRandomWordsSigned>,
    request_id: u64,
    random_words: Vec<[u8; 32]>,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(cfg.oracle != Pubkey::default(), ReserveError::OracleNotSet);

    // --- ed25519 introspection ---
    let ix_sys = ctx.accounts.instructions.to_account_info();
    let current_ix = load_current_index_checked(&ix_sys)? as usize;
    require!(current_ix >= 1, ReserveError::MissingOrInvalidEd25519Ix);

    let ed_ix = load_instruction_at_checked(current_ix - 1, &ix_sys)
        .map_err(|_| error!(ReserveError::MissingOrInvalidEd25519Ix))?;

    let expected = expected_random_words_msg(ctx.program_id, request_id, &random_words);
    assert_ed25519_ix_matches(&ed_ix, &cfg.oracle, expected.as_slice())?;

    let current_slot = Clock::get()?.slot;
    let raffle = &mut ctx.accounts.raffle;
    fulfill_core(raffle, request_id, random_words, current_slot)?;

    msg!(
        "fulfill_random_words_signed: request_id={} relayer={}",
        request_id,
        ctx.accounts.payer.key()
    );
    emit!(RandomWordsFulfilled {
        request_id,
        random_words: raffle.random_words.clone(),
    });
    Ok(())
}

// Local testing only: the admin stands in for the oracle.
#[cfg(feature = "mock-vrf")]
pub fn fulfill_random_words_mock(
    ctx: Context<FulfillRandomWordsMock>,
    request_id: u64,
    random_words: Vec<[u8; 32]>,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require_keys_eq!(cfg.admin, ctx.accounts.admin.key(), ReserveError::Unauthorized);

    let current_slot = Clock::get()?.slot;
    let raffle = &mut ctx.accounts.raffle;
    fulfill_core(raffle, request_id, random_words, current_slot)?;

    msg!("fulfill_random_words_mock: request_id={}", request_id);
    emit!(RandomWordsFulfilled {
        request_id,
        random_words: raffle.random_words.clone(),
    });
    Ok(())
}
