use anchor_lang::prelude::*;

/// Program-wide constants: PDA seeds, round capacity and oracle word count.
pub mod constants;

/// Error codes returned by every instruction, with their classification.
pub mod error;

/// Events emitted once per state transition.
pub mod events;

/// Anchor instruction handlers. Thin: clock, oracle parsing, lamports, events.
pub mod instructions;

/// Prize transfer used by the payout step.
pub mod payout;

/// The lottery account and the state machine it implements.
pub mod state;

pub use instructions::*;

use state::{LotteryState, UpkeepCheck};

declare_id!("h8R31MPNzZbrUQKePNiFhgbSzgZyBfeu7Tj7adYCALz");

#[program]
pub mod lottery {
    use super::*;

    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        entrance_fee: u64,
        draw_interval: u64,
        oracle_queue: Pubkey,
    ) -> Result<()> {
        process_initialize_config(ctx, entrance_fee, draw_interval, oracle_queue)
    }

    pub fn enter_lottery(ctx: Context<EnterLottery>, amount: u64) -> Result<()> {
        process_enter_lottery(ctx, amount)
    }

    pub fn check_upkeep(ctx: Context<ReadLottery>, _check_data: Vec<u8>) -> Result<UpkeepCheck> {
        let clock = Clock::get()?;
        Ok(ctx.accounts.lottery.check_upkeep(clock.unix_timestamp))
    }

    pub fn perform_upkeep(ctx: Context<PerformUpkeep>, perform_data: Vec<u8>) -> Result<()> {
        process_perform_upkeep(ctx, perform_data)
    }

    pub fn fulfill_random_words(ctx: Context<FulfillRandomWords>, request_id: u64) -> Result<()> {
        process_fulfill_random_words(ctx, request_id)
    }

    pub fn retry_payout(ctx: Context<RetryPayout>) -> Result<()> {
        process_retry_payout(ctx)
    }

    pub fn cancel_draw(ctx: Context<CancelDraw>) -> Result<()> {
        process_cancel_draw(ctx)
    }

    pub fn get_entrance_fee(ctx: Context<ReadLottery>) -> Result<u64> {
        Ok(ctx.accounts.lottery.entrance_fee)
    }

    pub fn get_interval(ctx: Context<ReadLottery>) -> Result<u64> {
        Ok(ctx.accounts.lottery.clock.draw_interval)
    }

    pub fn get_lottery_state(ctx: Context<ReadLottery>) -> Result<LotteryState> {
        Ok(ctx.accounts.lottery.state)
    }

    pub fn get_recent_winner(ctx: Context<ReadLottery>) -> Result<Pubkey> {
        Ok(ctx.accounts.lottery.recent_winner)
    }

    pub fn get_player(ctx: Context<ReadLottery>, index: u64) -> Result<Pubkey> {
        ctx.accounts.lottery.ledger.player_at(index)
    }

    pub fn get_number_of_players(ctx: Context<ReadLottery>) -> Result<u64> {
        Ok(ctx.accounts.lottery.ledger.len() as u64)
    }

    pub fn get_last_timestamp(ctx: Context<ReadLottery>) -> Result<i64> {
        Ok(ctx.accounts.lottery.clock.last_draw_timestamp)
    }

    pub fn get_entry(ctx: Context<ReadLottery>, round: u64, index: u64) -> Result<Pubkey> {
        ctx.accounts.lottery.ledger.entry_at(round, index)
    }

    pub fn get_next_draw_at(ctx: Context<ReadLottery>) -> Result<i64> {
        Ok(ctx.accounts.lottery.clock.next_draw_at())
    }

    pub fn get_oracle_queue(ctx: Context<ReadLottery>) -> Result<Pubkey> {
        Ok(ctx.accounts.lottery.oracle_queue)
    }

    pub fn get_pending_request_id(ctx: Context<ReadLottery>) -> Result<Option<u64>> {
        Ok(ctx.accounts.lottery.requests.pending_id())
    }

    pub fn get_round(ctx: Context<ReadLottery>) -> Result<u64> {
        Ok(ctx.accounts.lottery.ledger.round)
    }

    pub fn get_pot(ctx: Context<ReadLottery>) -> Result<u64> {
        Ok(ctx.accounts.lottery.ledger.pot)
    }
}
