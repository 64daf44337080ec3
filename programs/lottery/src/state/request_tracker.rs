use anchor_lang::prelude::*;

use crate::constants::FIRST_REQUEST_ID;
use crate::error::ErrorCode;

/// The oracle-side binding of a request: the Switchboard randomness account
/// committed for it and the slot it was seeded at.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, InitSpace)]
pub struct RandomnessCommitment {
    pub randomness_account: Pubkey,
    pub seed_slot: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, InitSpace)]
pub struct RandomnessRequest {
    pub id: u64,
    pub round: u64,
    pub commitment: RandomnessCommitment,

    /// Entrants frozen at trigger time. The winner is drawn from this list,
    /// never from the live ledger.
    #[max_len(100)]
    pub snapshot: Vec<Pubkey>,
}

/// Result of resolving a request. A pure function of the random word and
/// the snapshot, so anyone can recompute it from the revealed value.
#[derive(Clone, Debug, PartialEq)]
pub struct WinnerSelection {
    pub request_id: u64,
    pub round: u64,
    pub winner: Pubkey,
    pub winner_index: u64,
    pub random_word: u64,
    pub snapshot: Vec<Pubkey>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, InitSpace)]
pub struct RandomnessRequestTracker {
    pub next_request_id: u64,
    pub pending: Option<RandomnessRequest>,
}

impl Default for RandomnessRequestTracker {
    fn default() -> Self {
        Self {
            next_request_id: FIRST_REQUEST_ID,
            pending: None,
        }
    }
}

impl RandomnessRequestTracker {
    pub fn issue_request(
        &mut self,
        snapshot: Vec<Pubkey>,
        round: u64,
        commitment: RandomnessCommitment,
    ) -> Result<u64> {
        require!(self.pending.is_none(), ErrorCode::RequestAlreadyPending);
        require!(!snapshot.is_empty(), ErrorCode::EmptySnapshot);

        let id = self.next_request_id;
        self.next_request_id = id.checked_add(1).ok_or(ErrorCode::MathOverflow)?;
        self.pending = Some(RandomnessRequest {
            id,
            round,
            commitment,
            snapshot,
        });

        Ok(id)
    }

    /// Consumes the pending request and picks `random_words[0] % len`.
    ///
    /// Requests are single use: once resolved, the same id is rejected with
    /// `UnknownRequestId` like an id that was never issued.
    pub fn resolve(&mut self, id: u64, random_words: &[u64]) -> Result<WinnerSelection> {
        let request = self.pending_with_id(id)?;
        let random_word = *random_words.first().ok_or(ErrorCode::MissingRandomWords)?;
        require!(!request.snapshot.is_empty(), ErrorCode::EmptySnapshot);

        let winner_index = random_word % request.snapshot.len() as u64;
        let winner = request.snapshot[winner_index as usize];

        let request = self.pending.take().ok_or(ErrorCode::UnknownRequestId)?;
        Ok(WinnerSelection {
            request_id: request.id,
            round: request.round,
            winner,
            winner_index,
            random_word,
            snapshot: request.snapshot,
        })
    }

    /// The randomness account a pending request must be fulfilled from.
    pub fn bound_account(&self, id: u64) -> Result<Pubkey> {
        Ok(self.pending_with_id(id)?.commitment.randomness_account)
    }

    pub fn pending_id(&self) -> Option<u64> {
        self.pending.as_ref().map(|request| request.id)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn cancel(&mut self) -> Result<RandomnessRequest> {
        self.pending.take().ok_or_else(|| error!(ErrorCode::NotCalculating))
    }

    fn pending_with_id(&self, id: u64) -> Result<&RandomnessRequest> {
        match &self.pending {
            Some(request) if request.id == id => Ok(request),
            _ => err!(ErrorCode::UnknownRequestId),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_of<T: std::fmt::Debug>(result: Result<T>) -> u32 {
        match result {
            Err(anchor_lang::error::Error::AnchorError(err)) => err.error_code_number,
            other => panic!("expected an anchor error, got {:?}", other),
        }
    }

    fn entrants(n: usize) -> Vec<Pubkey> {
        (0..n).map(|_| Pubkey::new_unique()).collect()
    }

    fn commitment() -> RandomnessCommitment {
        RandomnessCommitment {
            randomness_account: Pubkey::new_unique(),
            seed_slot: 41,
        }
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut tracker = RandomnessRequestTracker::default();
        let first = tracker.issue_request(entrants(1), 0, commitment()).unwrap();
        tracker.resolve(first, &[0]).unwrap();
        let second = tracker.issue_request(entrants(1), 1, commitment()).unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn only_one_request_in_flight() {
        let mut tracker = RandomnessRequestTracker::default();
        let id = tracker.issue_request(entrants(2), 0, commitment()).unwrap();
        let result = tracker.issue_request(entrants(2), 0, commitment());
        assert_eq!(code_of(result), u32::from(ErrorCode::RequestAlreadyPending));
        assert_eq!(tracker.pending_id(), Some(id));
    }

    #[test]
    fn empty_snapshot_is_rejected() {
        let mut tracker = RandomnessRequestTracker::default();
        let result = tracker.issue_request(Vec::new(), 0, commitment());
        assert_eq!(code_of(result), u32::from(ErrorCode::EmptySnapshot));
        assert!(!tracker.is_pending());
        assert_eq!(tracker.next_request_id, FIRST_REQUEST_ID);
    }

    #[test]
    fn winner_is_word_modulo_snapshot_len() {
        let mut tracker = RandomnessRequestTracker::default();
        let players = entrants(4);
        let id = tracker.issue_request(players.clone(), 3, commitment()).unwrap();

        let selection = tracker.resolve(id, &[42, 7, 9]).unwrap();

        assert_eq!(selection.winner_index, 2);
        assert_eq!(selection.winner, players[2]);
        assert_eq!(selection.random_word, 42);
        assert_eq!(selection.round, 3);
        assert_eq!(selection.snapshot, players);
    }

    #[test]
    fn unknown_id_leaves_request_pending() {
        let mut tracker = RandomnessRequestTracker::default();
        let id = tracker.issue_request(entrants(2), 0, commitment()).unwrap();
        let before = tracker.clone();

        for _ in 0..2 {
            let result = tracker.resolve(id + 1, &[5]);
            assert_eq!(code_of(result), u32::from(ErrorCode::UnknownRequestId));
            assert_eq!(tracker, before);
        }
    }

    #[test]
    fn empty_words_leave_request_pending() {
        let mut tracker = RandomnessRequestTracker::default();
        let id = tracker.issue_request(entrants(2), 0, commitment()).unwrap();
        let result = tracker.resolve(id, &[]);
        assert_eq!(code_of(result), u32::from(ErrorCode::MissingRandomWords));
        assert_eq!(tracker.pending_id(), Some(id));
    }

    #[test]
    fn resolved_id_cannot_be_replayed() {
        let mut tracker = RandomnessRequestTracker::default();
        let id = tracker.issue_request(entrants(3), 0, commitment()).unwrap();
        tracker.resolve(id, &[1]).unwrap();

        let replay = tracker.resolve(id, &[1]);
        assert_eq!(code_of(replay), u32::from(ErrorCode::UnknownRequestId));
        assert_eq!(code_of(tracker.bound_account(id)), u32::from(ErrorCode::UnknownRequestId));
    }

    #[test]
    fn bound_account_matches_commitment() {
        let mut tracker = RandomnessRequestTracker::default();
        let commitment = commitment();
        let id = tracker.issue_request(entrants(1), 0, commitment).unwrap();
        assert_eq!(tracker.bound_account(id).unwrap(), commitment.randomness_account);
    }

    #[test]
    fn snapshot_capacity_matches_entrant_capacity() {
        // `#[max_len(100)]` on `snapshot` must track MAX_ENTRANTS.
        assert_eq!(crate::constants::MAX_ENTRANTS, 100);
        let request = RandomnessRequest {
            id: 1,
            round: 0,
            commitment: commitment(),
            snapshot: entrants(crate::constants::MAX_ENTRANTS),
        };
        assert_eq!(request.try_to_vec().unwrap().len(), RandomnessRequest::INIT_SPACE);
    }

    #[test]
    fn cancel_drops_the_request() {
        let mut tracker = RandomnessRequestTracker::default();
        let id = tracker.issue_request(entrants(1), 0, commitment()).unwrap();
        let cancelled = tracker.cancel().unwrap();
        assert_eq!(cancelled.id, id);
        assert!(!tracker.is_pending());
        assert_eq!(code_of(tracker.cancel()), u32::from(ErrorCode::NotCalculating));
    }
}
