/// Seed for the lottery PDA. One lottery per program deployment.
pub const LOTTERY_SEED: &[u8] = b"lottery";

/// Upper bound on entrants in a single round. Must match the `max_len`
/// annotations on `EntryLedger::entrants` and `RandomnessRequest::snapshot`.
pub const MAX_ENTRANTS: usize = 100;

/// Number of `u64` words carved out of a revealed Switchboard value.
pub const NUM_WORDS: usize = 4;

/// First request id handed out by the tracker. Zero is never a valid id.
pub const FIRST_REQUEST_ID: u64 = 1;
