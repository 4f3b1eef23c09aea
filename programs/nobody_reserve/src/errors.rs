use anchor_lang::prelude::*;

#[error_code]
pub enum ReserveError {
    #[msg("Unauthorized")]
    Unauthorized,

    // -----------------
    // Reservation
    // -----------------
    #[msg("Reserve not active")]
    NotActive,
    #[msg("Invalid address")]
    InvalidAddress,
    #[msg("Already reserved")]
    AlreadyReserved,
    #[msg("Invalid value (must equal reserve price)")]
    InvalidValue,
    #[msg("Invalid reserve price")]
    InvalidPrice,

    // -----------------
    // Randomness
    // -----------------
    #[msg("Random words already requested")]
    AlreadyRequested,
    #[msg("Unknown randomness request")]
    UnknownRequest,
    #[msg("Random words already fulfilled")]
    AlreadyFulfilled,
    #[msg("Invalid number of random words")]
    InvalidRandomWords,
    #[msg("Oracle pubkey not set")]
    OracleNotSet,

    #[msg("Missing or invalid ed25519 verify instruction")]
    MissingOrInvalidEd25519Ix,
    #[msg("Ed25519 pubkey mismatch")]
    Ed25519PubkeyMismatch,
    #[msg("Ed25519 message mismatch")]
    Ed25519MessageMismatch,

    // -----------------
    // Raffle execution
    // -----------------
    #[msg("Invalid raffle")]
    InvalidRaffle,
    #[msg("Too many entries")]
    TooManyEntries,
    #[msg("Reservation account mismatch")]
    ReservationMismatch,
    #[msg("Account not owned by program")]
    AccountNotOwnedByProgram,
    #[msg("Failed to borrow account data")]
    AccountBorrowFailed,

    // -----------------
    // Settlement
    // -----------------
    #[msg("Refund not active")]
    RefundNotActive,
    #[msg("Not refundable")]
    NotRefundable,
    #[msg("Already refunded")]
    AlreadyRefund,
    #[msg("Insufficient vault funds")]
    InsufficientVaultFunds,

    #[msg("Math overflow")]
    MathOverflow,
}
