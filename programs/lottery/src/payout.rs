use anchor_lang::prelude::*;
use solana_program::rent::Rent;

use crate::error::ErrorCode;

/// Moves the pot to the winner. Returning an error means nothing moved.
pub trait PrizeTransfer {
    fn transfer(&mut self, winner: &Pubkey, amount: u64) -> Result<()>;
}

/// Debits the program-owned lottery PDA directly, the same way a winner is
/// credited when claiming a prize.
pub struct LamportTransfer<'a, 'info> {
    pub vault: &'a AccountInfo<'info>,
    pub recipient: &'a AccountInfo<'info>,
    pub rent: Rent,
}

impl<'a, 'info> LamportTransfer<'a, 'info> {
    /// Lamports the vault can give away without dropping below rent exemption.
    fn spendable(&self) -> u64 {
        let reserve = self.rent.minimum_balance(self.vault.data_len());
        self.vault.lamports().saturating_sub(reserve)
    }
}

impl<'a, 'info> PrizeTransfer for LamportTransfer<'a, 'info> {
    fn transfer(&mut self, winner: &Pubkey, amount: u64) -> Result<()> {
        if self.recipient.key != winner {
            msg!("Recipient {} is not the winner {}", self.recipient.key, winner);
            return err!(ErrorCode::PayoutFailed);
        }
        if !self.recipient.is_writable {
            msg!("Winner account {} is not writable", winner);
            return err!(ErrorCode::PayoutFailed);
        }
        if self.spendable() < amount {
            msg!("Vault holds {} spendable, owes {}", self.spendable(), amount);
            return err!(ErrorCode::PayoutFailed);
        }

        let credited = self
            .recipient
            .lamports()
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;

        **self.vault.try_borrow_mut_lamports()? -= amount;
        **self.recipient.try_borrow_mut_lamports()? = credited;

        Ok(())
    }
}
