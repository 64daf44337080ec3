use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::constants::LOTTERY_SEED;
use crate::error::ErrorCode;
use crate::state::Lottery;

/// Accounts required to abandon a randomness request the oracle never
/// answered. Only the lottery authority may do this, and only while the
/// bound randomness is still unrevealed.
#[derive(Accounts)]
pub struct CancelDraw<'info> {
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
        has_one = authority @ ErrorCode::NotAuthorized,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// Randomness account the pending request is bound to.
    /// CHECK: Compared against the pending request and parsed in the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

pub fn process_cancel_draw(ctx: Context<CancelDraw>) -> Result<()> {
    let clock = Clock::get()?;

    let randomness_revealed = {
        let randomness_data =
            RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
                .map_err(|_| ErrorCode::InvalidRandomnessAccount)?;
        randomness_data.get_value(&clock).is_ok()
    };

    let cancelled = ctx.accounts.lottery.cancel_draw(
        &ctx.accounts.randomness_account_data.key(),
        randomness_revealed,
    )?;

    msg!(
        "Draw cancelled: request {}, round {}",
        cancelled.request_id,
        cancelled.round
    );
    emit!(cancelled);
    Ok(())
}
