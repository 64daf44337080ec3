use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::LOTTERY_SEED;
use crate::state::Lottery;

/// Accounts required to enter the current round.
#[derive(Accounts)]
pub struct EnterLottery<'info> {
    /// The entrant, paying the entry amount.
    #[account(mut)]
    pub player: Signer<'info>,

    /// Lottery state account; the entry amount is moved into it.
    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// System program for the lamport transfer.
    pub system_program: Program<'info, System>,
}

/// Records the player in the current round and moves `amount` lamports
/// into the pot.
///
/// # Arguments
/// * `ctx` - Context containing EnterLottery accounts
/// * `amount` - Lamports attached to the entry, at least the entrance fee
pub fn process_enter_lottery(ctx: Context<EnterLottery>, amount: u64) -> Result<()> {
    let player = ctx.accounts.player.key();
    let entry = ctx.accounts.lottery.enter_lottery(player, amount)?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.player.to_account_info(),
                to: ctx.accounts.lottery.to_account_info(),
            },
        ),
        amount,
    )?;

    msg!("Entry #{} in round {}: {}", entry.index, entry.round, player);
    emit!(entry);
    Ok(())
}
