use anchor_lang::prelude::*;

/// A paid entry was appended to the current round.
#[event]
#[derive(Debug, PartialEq)]
pub struct EntryRecorded {
    pub caller: Pubkey,
    pub round: u64,
    /// Zero-based position in the round's entrant list.
    pub index: u64,
    pub amount: u64,
}

#[event]
#[derive(Debug, PartialEq)]
pub struct DrawRequested {
    pub request_id: u64,
    pub round: u64,
    pub entrant_count: u64,
    pub randomness_account: Pubkey,
}

#[event]
#[derive(Debug, PartialEq)]
pub struct WinnerPicked {
    pub winner: Pubkey,
    pub round: u64,
    pub request_id: u64,
    pub amount: u64,
}

/// The winner is known but the transfer was rejected. The round stays
/// calculating until `retry_payout` succeeds.
#[event]
#[derive(Debug, PartialEq)]
pub struct PayoutDeferred {
    pub winner: Pubkey,
    pub round: u64,
    pub request_id: u64,
    pub amount: u64,
}

#[event]
#[derive(Debug, PartialEq)]
pub struct DrawCancelled {
    pub request_id: u64,
    pub round: u64,
}
