use anchor_lang::prelude::*;

use crate::constants::LOTTERY_SEED;
use crate::payout::LamportTransfer;
use crate::state::Lottery;

/// Accounts required to finish a round whose payout was deferred.
///
/// Anyone may submit it; the prize only ever goes to the recorded winner.
#[derive(Accounts)]
pub struct RetryPayout<'info> {
    /// The account paying transaction fees.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The main lottery state account.
    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// The recorded winner receiving the pot.
    /// CHECK: Only receives lamports; compared against the recorded winner.
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,
}

/// Transfers the pot of a resolved round and reopens the lottery.
/// Fails with `PayoutFailed` and changes nothing if the transfer is rejected.
pub fn process_retry_payout(ctx: Context<RetryPayout>) -> Result<()> {
    let clock = Clock::get()?;
    let vault = ctx.accounts.lottery.to_account_info();
    let recipient = ctx.accounts.winner.to_account_info();
    let mut transfer = LamportTransfer {
        vault: &vault,
        recipient: &recipient,
        rent: Rent::get()?,
    };

    let picked = ctx
        .accounts
        .lottery
        .settle_payout(&mut transfer, clock.unix_timestamp)?;

    msg!("Deferred payout of {} settled to {}", picked.amount, picked.winner);
    emit!(picked);
    Ok(())
}
