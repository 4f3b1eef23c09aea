use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use solana_sha256_hasher::hashv;

// Ed25519SigVerify111111111111111111111111111
pub fn ed25519_program_id() -> Pubkey {
    Pubkey::new_from_array([
        3, 125, 70, 214, 124, 147, 251, 190, 18, 249, 66, 143, 131, 141, 64, 255,
        5, 112, 116, 73, 39, 244, 138, 100, 252, 202, 112, 68, 128, 0, 0, 0,
    ])
}

use crate::{
    constants::WEIGHT_DENOMINATOR,
    errors::ReserveError,
    state::{Reservation, WhitelistEntry},
};

// -----------------
// Seeds / constants
// -----------------
pub const CONFIG_SEED: &[u8] = b"config_v1";
pub const RAFFLE_SEED: &[u8] = b"raffle_v1";
pub const VAULT_SEED: &[u8] = b"vault_v1";
pub const RESERVATION_SEED: &[u8] = b"reservation_v1";
pub const WHITELIST_SEED: &[u8] = b"whitelist_v1";

pub const MAX_BATCH: usize = 16;

// -------------------------
// Weighted draw
// -------------------------

/// Win/lose decision for the entrant at `order_index`.
///
/// Pure function of the delivered random words, the entrant's order index and
/// its weight, so anyone can re-derive every outcome from public data:
///
/// ```text
/// word = random_words[order_index % len]
/// roll = le64(sha256("nobody-reserve:draw_v1" || word || le64(order_index))[0..8])
///        % WEIGHT_DENOMINATOR
/// ```
///
/// The entrant wins iff `roll < weight`.
pub fn draw(random_words: &[[u8; 32]], order_index: u64, weight: u64) -> bool {
    draw_roll(random_words, order_index) < weight
}

pub fn draw_roll(random_words: &[[u8; 32]], order_index: u64) -> u64 {
    if random_words.is_empty() {
        return WEIGHT_DENOMINATOR;
    }
    let word = &random_words[(order_index % random_words.len() as u64) as usize];
    let h = hashv(&[
        b"nobody-reserve:draw_v1".as_ref(),
        word.as_ref(),
        order_index.to_le_bytes().as_ref(),
    ])
    .to_bytes();

    let mut head = [0u8; 8];
    head.copy_from_slice(&h[..8]);
    u64::from_le_bytes(head) % WEIGHT_DENOMINATOR
}

// -------------------------
// Request id
// -------------------------
pub fn derive_request_id(
    raffle: &Pubkey,
    subscription_id: u64,
    key_hash: &[u8; 32],
    slot: u64,
) -> u64 {
    let h = hashv(&[
        b"nobody-reserve:request_v1".as_ref(),
        subscription_id.to_le_bytes().as_ref(),
        key_hash.as_ref(),
        slot.to_le_bytes().as_ref(),
        raffle.as_ref(),
    ])
    .to_bytes();

    let mut head = [0u8; 8];
    head.copy_from_slice(&h[..8]);
    u64::from_le_bytes(head)
}

// -------------------------
// Account readers (PDAs that may not exist yet)
// -------------------------

/// Whitelist flag stored in a (possibly uninitialized) WhitelistEntry PDA.
/// An empty account means "not whitelisted".
pub fn read_whitelist_flag(entry_ai: &AccountInfo, program_id: &Pubkey) -> Result<bool> {
    if entry_ai.data_is_empty() {
        return Ok(false);
    }
    require_keys_eq!(*entry_ai.owner, *program_id, ReserveError::AccountNotOwnedByProgram);

    let data = entry_ai
        .try_borrow_data()
        .map_err(|_| error!(ReserveError::AccountBorrowFailed))?;
    let mut slice: &[u8] = &data;
    let entry = WhitelistEntry::try_deserialize(&mut slice)?;
    Ok(entry.allowed)
}

/// Reservation stored in a (possibly uninitialized) Reservation PDA.
pub fn read_reservation(
    reservation_ai: &AccountInfo,
    program_id: &Pubkey,
) -> Result<Option<Reservation>> {
    if reservation_ai.data_is_empty() {
        return Ok(None);
    }
    require_keys_eq!(
        *reservation_ai.owner,
        *program_id,
        ReserveError::AccountNotOwnedByProgram
    );

    let data = reservation_ai
        .try_borrow_data()
        .map_err(|_| error!(ReserveError::AccountBorrowFailed))?;
    let mut slice: &[u8] = &data;
    let reservation = Reservation::try_deserialize(&mut slice)?;
    Ok(Some(reservation).filter(|r| r.reserved))
}

/// How a data-less PDA is brought up to rent exemption before the program writes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PdaFunding {
    /// No balance yet: one `create_account` paying the full rent minimum.
    Create { lamports: u64 },
    /// Already holds lamports (anyone can send to a PDA address): top up the
    /// shortfall, then `allocate` + `assign`.
    Adopt { top_up: u64 },
}

pub fn pda_funding(current_lamports: u64, rent_minimum: u64) -> PdaFunding {
    if current_lamports == 0 {
        PdaFunding::Create {
            lamports: rent_minimum,
        }
    } else {
        PdaFunding::Adopt {
            top_up: rent_minimum.saturating_sub(current_lamports),
        }
    }
}

// -------------------------
// Oracle attestation msg + ed25519 parsing
// -------------------------
const RANDOM_WORDS_MSG_PREFIX: &[u8] = b"nobody-reserve:random_words_v1";

/// `prefix || program_id || le64(request_id) || word_0 || .. || word_n`
pub fn expected_random_words_msg(
    program_id: &Pubkey,
    request_id: u64,
    random_words: &[[u8; 32]],
) -> Vec<u8> {
    let len = RANDOM_WORDS_MSG_PREFIX.len() + 32 + 8 + 32 * random_words.len();
    let mut out = Vec::with_capacity(len);
    out.extend_from_slice(RANDOM_WORDS_MSG_PREFIX);
    out.extend_from_slice(program_id.as_ref());
    out.extend_from_slice(&request_id.to_le_bytes());
    for word in random_words {
        out.extend_from_slice(word);
    }
    out
}

// Ed25519SigVerify data: [num_sigs: u8, pad: u8, seven le16 offset fields, payload..]
const ED25519_OFFSETS_AT: usize = 2;
const ED25519_HEADER_LEN: usize = ED25519_OFFSETS_AT + 7 * 2;
// offset field positions
const SIG_IX: usize = 1;
const PUBKEY_OFF: usize = 2;
const PUBKEY_IX: usize = 3;
const MSG_OFF: usize = 4;
const MSG_LEN: usize = 5;
const MSG_IX: usize = 6;
// instruction index meaning "this same instruction"
const SAME_IX: u16 = u16::MAX;

fn offset_field(data: &[u8], field: usize) -> u16 {
    let at = ED25519_OFFSETS_AT + 2 * field;
    u16::from_le_bytes([data[at], data[at + 1]])
}

/// Signer pubkey and signed message of a single-signature ed25519 verify instruction.
pub fn parse_ed25519_ix_pubkey_and_msg(ix: &Instruction) -> Result<(Pubkey, Vec<u8>)> {
    require!(
        ix.program_id == ed25519_program_id(),
        ReserveError::MissingOrInvalidEd25519Ix
    );

    let data = ix.data.as_slice();
    require!(
        data.len() >= ED25519_HEADER_LEN && data[0] == 1,
        ReserveError::MissingOrInvalidEd25519Ix
    );

    // signature, pubkey and message must all be read from this instruction
    let self_contained = [SIG_IX, PUBKEY_IX, MSG_IX]
        .iter()
        .all(|field| offset_field(data, *field) == SAME_IX);
    require!(self_contained, ReserveError::MissingOrInvalidEd25519Ix);

    let pk_off = offset_field(data, PUBKEY_OFF) as usize;
    let msg_off = offset_field(data, MSG_OFF) as usize;
    let msg_len = offset_field(data, MSG_LEN) as usize;

    let pubkey: [u8; 32] = data
        .get(pk_off..pk_off + 32)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| error!(ReserveError::MissingOrInvalidEd25519Ix))?;
    let msg = data
        .get(msg_off..msg_off + msg_len)
        .ok_or_else(|| error!(ReserveError::MissingOrInvalidEd25519Ix))?;

    Ok((Pubkey::new_from_array(pubkey), msg.to_vec()))
}

pub fn assert_ed25519_ix_matches(
    ix: &Instruction,
    expected_pubkey: &Pubkey,
    expected_msg: &[u8],
) -> Result<()> {
    let (pk, msg) = parse_ed25519_ix_pubkey_and_msg(ix)?;

    require_keys_eq!(pk, *expected_pubkey, ReserveError::Ed25519PubkeyMismatch);
    require!(msg.as_slice() == expected_msg, ReserveError::Ed25519MessageMismatch);

    Ok(())
}

#[cfg(test)]
mod draw_tests {
    use super::*;
    use crate::constants::{NORMAL_WEIGHT, PRIORITY_WEIGHT};

    fn words() -> Vec<[u8; 32]> {
        vec![[7u8; 32], [42u8; 32], [255u8; 32]]
    }

    #[test]
    fn draw_is_reproducible() {
        let w = words();
        for i in 0..64u64 {
            assert_eq!(draw_roll(&w, i), draw_roll(&w, i));
            assert_eq!(draw(&w, i, NORMAL_WEIGHT), draw(&w, i, NORMAL_WEIGHT));
        }
    }

    #[test]
    fn draw_roll_stays_inside_weight_universe() {
        let w = words();
        for i in 0..256u64 {
            assert!(draw_roll(&w, i) < WEIGHT_DENOMINATOR);
        }
    }

    #[test]
    fn draw_depends_on_random_words() {
        let a = words();
        let b = vec![[1u8; 32], [2u8; 32], [3u8; 32]];
        let differing = (0..64u64).filter(|i| draw_roll(&a, *i) != draw_roll(&b, *i)).count();
        assert!(differing > 0);
    }

    #[test]
    fn weight_scales_win_rate() {
        let w = words();
        let n = 1000u64;
        let priority_wins = (0..n).filter(|i| draw(&w, *i, PRIORITY_WEIGHT)).count();
        let normal_wins = (0..n).filter(|i| draw(&w, *i, NORMAL_WEIGHT)).count();

        assert!(priority_wins > 900, "priority wins: {}", priority_wins);
        assert!(normal_wins < 200, "normal wins: {}", normal_wins);
        assert!(priority_wins > normal_wins);
    }

    #[test]
    fn full_weight_always_wins_and_zero_never_does() {
        let w = words();
        for i in 0..128u64 {
            assert!(draw(&w, i, WEIGHT_DENOMINATOR));
            assert!(!draw(&w, i, 0));
        }
    }

    #[test]
    fn draw_without_randomness_never_wins() {
        assert!(!draw(&[], 0, PRIORITY_WEIGHT));
    }

    #[test]
    fn request_id_binds_slot_and_key_hash() {
        let raffle = Pubkey::new_unique();
        let base = derive_request_id(&raffle, 1, &[9u8; 32], 100);
        assert_eq!(base, derive_request_id(&raffle, 1, &[9u8; 32], 100));
        assert_ne!(base, derive_request_id(&raffle, 1, &[9u8; 32], 101));
        assert_ne!(base, derive_request_id(&raffle, 1, &[8u8; 32], 100));
        assert_ne!(base, derive_request_id(&raffle, 2, &[9u8; 32], 100));
    }

    #[test]
    fn random_words_msg_layout() {
        let program_id = Pubkey::new_unique();
        let w = words();
        let msg = expected_random_words_msg(&program_id, 77, &w);
        let prefix = RANDOM_WORDS_MSG_PREFIX.len();

        assert_eq!(msg.len(), prefix + 32 + 8 + 32 * w.len());
        assert_eq!(&msg[prefix..prefix + 32], program_id.as_ref());
        assert_eq!(&msg[prefix + 32..prefix + 40], &77u64.to_le_bytes());
        assert_eq!(&msg[msg.len() - 32..], &w[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error as AnchorErr;

    fn error_number<T: std::fmt::Debug>(res: Result<T>) -> u32 {
        match res.expect_err("expected failure") {
            AnchorErr::AnchorError(e) => e.error_code_number,
            other => panic!("unexpected error: {:?}", other),
        }
    }

    /// Single-signature ed25519 verify ix. The signature bytes stay zeroed:
    /// the runtime verifies them, the program only reads pubkey + message.
    fn ed25519_ix(signer: &Pubkey, msg: &[u8], msg_ix: u16) -> Instruction {
        let sig_off = ED25519_HEADER_LEN as u16;
        let pk_off = sig_off + 64;
        let msg_off = pk_off + 32;
        let offsets = [
            sig_off,
            SAME_IX,
            pk_off,
            SAME_IX,
            msg_off,
            msg.len() as u16,
            msg_ix,
        ];

        let mut data = vec![1u8, 0];
        for field in offsets {
            data.extend_from_slice(&field.to_le_bytes());
        }
        data.extend_from_slice(&[0u8; 64]);
        data.extend_from_slice(signer.as_ref());
        data.extend_from_slice(msg);

        Instruction {
            program_id: ed25519_program_id(),
            accounts: vec![],
            data,
        }
    }

    /// What the oracle submits ahead of `fulfill_random_words_signed`.
    fn attestation_ix(oracle: &Pubkey, request_id: u64, words: &[[u8; 32]]) -> Instruction {
        let msg = expected_random_words_msg(&crate::ID, request_id, words);
        ed25519_ix(oracle, &msg, SAME_IX)
    }

    #[test]
    fn attestation_parses_back_to_oracle_and_words() {
        let oracle = Pubkey::new_unique();
        let words = [[3u8; 32], [4u8; 32]];
        let ix = attestation_ix(&oracle, 77, &words);

        let (pk, msg) = parse_ed25519_ix_pubkey_and_msg(&ix).expect("should parse");
        assert_eq!(pk, oracle);
        assert_eq!(msg, expected_random_words_msg(&crate::ID, 77, &words));
        assert!(assert_ed25519_ix_matches(&ix, &oracle, &msg).is_ok());
    }

    #[test]
    fn message_from_another_instruction_is_rejected() {
        let ix = ed25519_ix(&Pubkey::new_unique(), b"words", 0);
        assert_eq!(
            error_number(parse_ed25519_ix_pubkey_and_msg(&ix)),
            u32::from(ReserveError::MissingOrInvalidEd25519Ix)
        );
    }

    #[test]
    fn foreign_program_is_rejected() {
        let mut ix = attestation_ix(&Pubkey::new_unique(), 1, &[[1u8; 32]]);
        ix.program_id = Pubkey::new_unique();
        assert!(parse_ed25519_ix_pubkey_and_msg(&ix).is_err());
    }

    #[test]
    fn truncated_payload_is_rejected() {
        let mut ix = attestation_ix(&Pubkey::new_unique(), 1, &[[1u8; 32]]);
        ix.data.pop();
        assert!(parse_ed25519_ix_pubkey_and_msg(&ix).is_err());

        ix.data.truncate(ED25519_HEADER_LEN - 1);
        assert!(parse_ed25519_ix_pubkey_and_msg(&ix).is_err());
    }

    #[test]
    fn attestation_must_match_oracle_and_delivered_words() {
        let oracle = Pubkey::new_unique();
        let ix = attestation_ix(&oracle, 5, &[[9u8; 32]]);

        let signed = expected_random_words_msg(&crate::ID, 5, &[[9u8; 32]]);
        let swapped = expected_random_words_msg(&crate::ID, 5, &[[8u8; 32]]);
        let other_request = expected_random_words_msg(&crate::ID, 6, &[[9u8; 32]]);

        assert_eq!(
            error_number(assert_ed25519_ix_matches(&ix, &Pubkey::new_unique(), &signed)),
            u32::from(ReserveError::Ed25519PubkeyMismatch)
        );
        assert_eq!(
            error_number(assert_ed25519_ix_matches(&ix, &oracle, &swapped)),
            u32::from(ReserveError::Ed25519MessageMismatch)
        );
        assert_eq!(
            error_number(assert_ed25519_ix_matches(&ix, &oracle, &other_request)),
            u32::from(ReserveError::Ed25519MessageMismatch)
        );
    }

    // ---------------- PDA funding ----------------

    #[test]
    fn empty_pda_is_created_with_full_rent() {
        assert_eq!(
            pda_funding(0, 1_113_600),
            PdaFunding::Create {
                lamports: 1_113_600
            }
        );
    }

    #[test]
    fn prefunded_pda_is_adopted_instead_of_blocking() {
        // a stranger sent 1 lamport to the whitelist PDA before the operator got to it
        assert_eq!(pda_funding(1, 1_113_600), PdaFunding::Adopt { top_up: 1_113_599 });
        // enough already there: no transfer, still allocate + assign
        assert_eq!(pda_funding(5_000_000, 1_113_600), PdaFunding::Adopt { top_up: 0 });
        assert_eq!(pda_funding(1_113_600, 1_113_600), PdaFunding::Adopt { top_up: 0 });
    }
}
