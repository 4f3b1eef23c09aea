use anchor_lang::prelude::*;

#[event] pub struct WhitelistReserved    { pub user: Pubkey, pub order_index: u64, pub weight: u64 }
#[event] pub struct PublicReserved       { pub user: Pubkey, pub order_index: u64, pub weight: u64 }
#[event] pub struct WhitelistUpdated     { pub user: Pubkey, pub allowed: bool }
#[event] pub struct RandomWordsRequested { pub request_id: u64, pub key_hash: [u8; 32], pub num_words: u32 }
#[event] pub struct RandomWordsFulfilled { pub request_id: u64, pub random_words: Vec<[u8; 32]> }
#[event] pub struct RaffleWon            { pub user: Pubkey, pub order_index: u64, pub batch_number: u64 }
#[event] pub struct RaffleBatchExecuted  { pub batch_number: u64, pub processed_count: u64, pub winners: u64 }
#[event] pub struct Refunded             { pub user: Pubkey, pub amount: u64 }
#[event] pub struct Withdrawn            { pub to: Pubkey, pub amount: u64 }
