use anchor_lang::prelude::*;

use crate::error::{reject, ErrorCode};
use crate::events::{DrawCancelled, DrawRequested, EntryRecorded, WinnerPicked};
use crate::payout::PrizeTransfer;
use crate::state::{
    ClockGate, EntryLedger, RandomnessCommitment, RandomnessRequestTracker, WinnerSelection,
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub enum LotteryState {
    #[default]
    Open,
    Calculating,
}

/// Immutable parameters fixed by `initialize_config`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LotteryConfig {
    /// Minimum lamports per entry.
    pub entrance_fee: u64,
    /// Seconds that must pass between draws.
    pub draw_interval: u64,
    /// Switchboard queue every randomness account must belong to.
    pub oracle_queue: Pubkey,
}

/// A resolved round whose prize has not been transferred yet.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, InitSpace)]
pub struct PendingPayout {
    pub request_id: u64,
    pub round: u64,
    pub winner: Pubkey,
    pub amount: u64,
}

/// Returned by `check_upkeep`. `perform_data` is always empty;
/// `perform_upkeep` re-derives everything it needs.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct UpkeepCheck {
    pub upkeep_needed: bool,
    pub perform_data: Vec<u8>,
}

#[account]
#[derive(Debug, Default, PartialEq, InitSpace)]
pub struct Lottery {
    /// The bump seed used for deriving the PDA address of this account.
    pub bump: u8,

    /// May cancel a draw the oracle never answered.
    pub authority: Pubkey,

    pub entrance_fee: u64,

    /// Opaque handle of the randomness oracle (a Switchboard queue).
    pub oracle_queue: Pubkey,

    /// `Calculating` exactly while a request or a payout is pending.
    pub state: LotteryState,

    pub ledger: EntryLedger,
    pub clock: ClockGate,
    pub requests: RandomnessRequestTracker,

    pub pending_payout: Option<PendingPayout>,

    /// Winner of the last completed round, default key before the first.
    pub recent_winner: Pubkey,
}

impl Lottery {
    pub fn initialize(
        &mut self,
        bump: u8,
        authority: Pubkey,
        config: LotteryConfig,
        now: i64,
    ) -> Result<()> {
        require!(config.entrance_fee > 0, ErrorCode::InvalidConfig);
        require!(config.draw_interval > 0, ErrorCode::InvalidConfig);

        self.bump = bump;
        self.authority = authority;
        self.entrance_fee = config.entrance_fee;
        self.oracle_queue = config.oracle_queue;
        self.state = LotteryState::Open;
        self.ledger = EntryLedger::default();
        self.clock = ClockGate::new(config.draw_interval, now);
        self.requests = RandomnessRequestTracker::default();
        self.pending_payout = None;
        self.recent_winner = Pubkey::default();
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.state == LotteryState::Open
    }

    pub fn enter_lottery(&mut self, caller: Pubkey, paid_amount: u64) -> Result<EntryRecorded> {
        require!(self.is_open(), ErrorCode::NotOpen);
        self.ledger.enter(caller, paid_amount, self.entrance_fee)
    }

    pub fn upkeep_needed(&self, now: i64) -> bool {
        self.clock.upkeep_needed(
            now,
            self.ledger.has_balance(),
            self.ledger.has_players(),
            self.is_open(),
        )
    }

    pub fn check_upkeep(&self, now: i64) -> UpkeepCheck {
        UpkeepCheck {
            upkeep_needed: self.upkeep_needed(now),
            perform_data: Vec::new(),
        }
    }

    /// Freezes the entrant list and opens a randomness request bound to
    /// `commitment`. Re-checks upkeep instead of trusting the caller.
    pub fn perform_upkeep(
        &mut self,
        now: i64,
        commitment: RandomnessCommitment,
    ) -> Result<DrawRequested> {
        if !self.upkeep_needed(now) {
            msg!(
                "Upkeep not needed: state {:?}, players {}, pot {}",
                self.state,
                self.ledger.len(),
                self.ledger.pot
            );
            return err!(ErrorCode::UpkeepNotNeeded);
        }

        let round = self.ledger.round;
        let request_id = self
            .requests
            .issue_request(self.ledger.snapshot(), round, commitment)?;
        self.state = LotteryState::Calculating;

        Ok(DrawRequested {
            request_id,
            round,
            entrant_count: self.ledger.len() as u64,
            randomness_account: commitment.randomness_account,
        })
    }

    /// Oracle callback. Picks the winner and records what is owed; the
    /// round stays `Calculating` until `settle_payout` confirms the transfer.
    pub fn fulfill_random_words(
        &mut self,
        request_id: u64,
        random_words: &[u64],
    ) -> Result<WinnerSelection> {
        if self.requests.pending_id() != Some(request_id) {
            msg!(
                "Rejected callback for request {} (pending: {:?})",
                request_id,
                self.requests.pending_id()
            );
            return Err(reject(ErrorCode::UnknownRequestId));
        }
        // Entries are closed while calculating, so the live round must still
        // be the one the request was issued for.
        let request_round = self
            .requests
            .pending
            .as_ref()
            .map(|request| request.round);
        require!(
            request_round == Some(self.ledger.round),
            ErrorCode::UnknownRequestId
        );

        let selection = self.requests.resolve(request_id, random_words)?;
        self.pending_payout = Some(PendingPayout {
            request_id: selection.request_id,
            round: selection.round,
            winner: selection.winner,
            amount: self.ledger.pot,
        });

        msg!(
            "Request {} resolved: word {}, winner #{} {}",
            selection.request_id,
            selection.random_word,
            selection.winner_index,
            selection.winner
        );
        Ok(selection)
    }

    /// Transfers the pot to the recorded winner and opens the next round.
    ///
    /// If the transfer is rejected nothing changes, so the same call can be
    /// repeated once the cause is fixed.
    pub fn settle_payout<T: PrizeTransfer>(
        &mut self,
        transfer: &mut T,
        now: i64,
    ) -> Result<WinnerPicked> {
        let payout = self.pending_payout.ok_or(ErrorCode::NoPendingPayout)?;

        transfer
            .transfer(&payout.winner, payout.amount)
            .map_err(|err| {
                msg!("Payout to {} rejected: {}", payout.winner, err);
                error!(ErrorCode::PayoutFailed)
            })?;

        self.pending_payout = None;
        self.recent_winner = payout.winner;
        self.ledger.reset();
        self.clock.mark_draw(now);
        self.state = LotteryState::Open;

        Ok(WinnerPicked {
            winner: payout.winner,
            round: payout.round,
            request_id: payout.request_id,
            amount: payout.amount,
        })
    }

    /// Operator escape hatch for a request the oracle never answers. The
    /// round reopens with its entrants and pot untouched.
    ///
    /// `randomness_account` must be the account the request is bound to, and
    /// its value must still be unrevealed: once the word is public, the only
    /// way forward is `fulfill_random_words`.
    pub fn cancel_draw(
        &mut self,
        randomness_account: &Pubkey,
        randomness_revealed: bool,
    ) -> Result<DrawCancelled> {
        require!(self.pending_payout.is_none(), ErrorCode::PayoutPending);
        require!(
            self.state == LotteryState::Calculating,
            ErrorCode::NotCalculating
        );
        let request_id = self
            .requests
            .pending_id()
            .ok_or(ErrorCode::NotCalculating)?;
        if self.requests.bound_account(request_id)? != *randomness_account {
            return Err(reject(ErrorCode::IncorrectRandomnessAccount));
        }
        if randomness_revealed {
            msg!("Request {} already revealed, fulfill it instead", request_id);
            return Err(reject(ErrorCode::RandomnessAlreadyRevealed));
        }

        let request = self.requests.cancel()?;
        self.state = LotteryState::Open;

        Ok(DrawCancelled {
            request_id: request.id,
            round: request.round,
        })
    }
}
