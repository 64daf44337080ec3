use anchor_lang::prelude::*;

use crate::constants::MAX_ENTRANTS;
use crate::error::ErrorCode;
use crate::events::EntryRecorded;

/// Entrants and pot of the round currently accepting entries.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, InitSpace)]
pub struct EntryLedger {
    /// Incremented every time the ledger is reset after a payout. Entry
    /// positions are only meaningful together with the round they were
    /// recorded in.
    pub round: u64,

    /// Entrants in entry order. The same key may appear more than once.
    #[max_len(100)]
    pub entrants: Vec<Pubkey>,

    /// Sum of all lamports paid in since the last reset.
    pub pot: u64,
}

impl EntryLedger {
    /// Appends `caller` to the round and adds `paid_amount` to the pot.
    ///
    /// Anything paid above the fee stays in the pot. Nothing is mutated when
    /// an error is returned.
    pub fn enter(
        &mut self,
        caller: Pubkey,
        paid_amount: u64,
        entrance_fee: u64,
    ) -> Result<EntryRecorded> {
        require!(paid_amount >= entrance_fee, ErrorCode::InsufficientPayment);
        require!(self.entrants.len() < MAX_ENTRANTS, ErrorCode::LotteryFull);

        let pot = self
            .pot
            .checked_add(paid_amount)
            .ok_or(ErrorCode::MathOverflow)?;
        let index = self.entrants.len() as u64;

        self.entrants.push(caller);
        self.pot = pot;

        Ok(EntryRecorded {
            caller,
            round: self.round,
            index,
            amount: paid_amount,
        })
    }

    pub fn player_at(&self, index: u64) -> Result<Pubkey> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.entrants.get(i))
            .copied()
            .ok_or_else(|| error!(ErrorCode::IndexOutOfRange))
    }

    /// Looks up an entry by the `(round, index)` pair from its
    /// `EntryRecorded` event. Positions from an earlier round are invalid,
    /// exactly like positions past the end of the current one.
    pub fn entry_at(&self, round: u64, index: u64) -> Result<Pubkey> {
        require!(round == self.round, ErrorCode::IndexOutOfRange);
        self.player_at(index)
    }

    pub fn len(&self) -> usize {
        self.entrants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrants.is_empty()
    }

    pub fn has_players(&self) -> bool {
        !self.entrants.is_empty()
    }

    pub fn has_balance(&self) -> bool {
        self.pot > 0
    }

    pub fn snapshot(&self) -> Vec<Pubkey> {
        self.entrants.clone()
    }

    /// Starts the next round. Only the payout step may call this.
    pub(crate) fn reset(&mut self) {
        self.entrants.clear();
        self.pot = 0;
        self.round += 1;
    }
}
