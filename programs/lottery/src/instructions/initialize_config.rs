use anchor_lang::prelude::*;

use crate::constants::LOTTERY_SEED;
use crate::state::{Lottery, LotteryConfig};

/// Accounts required to create the lottery.
/// The payer becomes the authority allowed to cancel stalled draws.
#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    /// The account paying for account creation and fees.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The lottery state account, which also holds the pot.
    #[account(
        init,
        payer = payer,
        space = 8 + Lottery::INIT_SPACE,
        seeds = [LOTTERY_SEED],
        bump
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// System program to create accounts.
    pub system_program: Program<'info, System>,
}

/// Writes the immutable configuration and opens round zero.
///
/// # Arguments
/// * `ctx` - Context holding the InitializeConfig accounts
/// * `entrance_fee` - Minimum lamports per entry
/// * `draw_interval` - Seconds between draws
/// * `oracle_queue` - Switchboard queue randomness must come from
pub fn process_initialize_config(
    ctx: Context<InitializeConfig>,
    entrance_fee: u64,
    draw_interval: u64,
    oracle_queue: Pubkey,
) -> Result<()> {
    let clock = Clock::get()?;
    let authority = ctx.accounts.payer.key();

    ctx.accounts.lottery.initialize(
        ctx.bumps.lottery,
        authority,
        LotteryConfig {
            entrance_fee,
            draw_interval,
            oracle_queue,
        },
        clock.unix_timestamp,
    )?;

    msg!(
        "Lottery initialized: fee {}, interval {}s, queue {}",
        entrance_fee,
        draw_interval,
        oracle_queue
    );
    Ok(())
}
