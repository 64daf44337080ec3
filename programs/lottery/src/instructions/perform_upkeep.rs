use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::constants::LOTTERY_SEED;
use crate::error::{reject, ErrorCode};
use crate::state::{Lottery, RandomnessCommitment};

/// Accounts required to trigger a draw.
///
/// Any signer may act as the automation caller; upkeep is re-checked on
/// chain. The randomness account must be freshly committed on the
/// configured Switchboard queue.
#[derive(Accounts)]
pub struct PerformUpkeep<'info> {
    /// The automation caller paying transaction fees.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The main lottery state account.
    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// Randomness account from Switchboard.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,
}

/// Queue and seed slot read from a Switchboard randomness account.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CommittedRandomness {
    pub queue: Pubkey,
    pub seed_slot: u64,
}

/// Pre-checks for a draw trigger, in order: upkeep first, then the
/// randomness account. `read_randomness` is only invoked when a draw is due,
/// so a caller polling too early always sees `UpkeepNotNeeded`.
pub fn validate_draw_trigger<F>(
    lottery: &Lottery,
    now: i64,
    current_slot: u64,
    randomness_account: Pubkey,
    read_randomness: F,
) -> Result<RandomnessCommitment>
where
    F: FnOnce() -> Result<CommittedRandomness>,
{
    require!(lottery.upkeep_needed(now), ErrorCode::UpkeepNotNeeded);

    let committed = read_randomness()?;
    if committed.queue != lottery.oracle_queue {
        return Err(reject(ErrorCode::IncorrectOracleQueue));
    }
    if committed.seed_slot != current_slot.saturating_sub(1) {
        msg!("Seed slot: {}", committed.seed_slot);
        msg!("Current slot: {}", current_slot);
        return Err(reject(ErrorCode::RandomnessAlreadyRevealed));
    }

    Ok(RandomnessCommitment {
        randomness_account,
        seed_slot: committed.seed_slot,
    })
}

/// Flips the lottery to calculating and binds a randomness request to the
/// supplied Switchboard account.
///
/// `_perform_data` is accepted for automation compatibility and ignored.
pub fn process_perform_upkeep(ctx: Context<PerformUpkeep>, _perform_data: Vec<u8>) -> Result<()> {
    let clock = Clock::get()?;
    let randomness_info = &ctx.accounts.randomness_account_data;
    let lottery = &mut ctx.accounts.lottery;

    let commitment = validate_draw_trigger(
        lottery,
        clock.unix_timestamp,
        clock.slot,
        randomness_info.key(),
        || {
            let randomness_data = RandomnessAccountData::parse(randomness_info.data.borrow())
                .map_err(|_| reject(ErrorCode::InvalidRandomnessAccount))?;
            Ok(CommittedRandomness {
                queue: randomness_data.queue,
                seed_slot: randomness_data.seed_slot,
            })
        },
    )?;

    let requested = lottery.perform_upkeep(clock.unix_timestamp, commitment)?;

    msg!(
        "Draw requested: request {}, round {}, {} entrants",
        requested.request_id,
        requested.round,
        requested.entrant_count
    );
    emit!(requested);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LotteryConfig;

    const START: i64 = 1_700_000_000;
    const SLOT: u64 = 500;

    fn code_of<T: std::fmt::Debug>(result: Result<T>) -> u32 {
        match result {
            Err(anchor_lang::error::Error::AnchorError(err)) => err.error_code_number,
            other => panic!("expected an anchor error, got {:?}", other),
        }
    }

    fn lottery(queue: Pubkey) -> Lottery {
        let mut lottery = Lottery::default();
        lottery
            .initialize(
                254,
                Pubkey::new_unique(),
                LotteryConfig {
                    entrance_fee: 100,
                    draw_interval: 60,
                    oracle_queue: queue,
                },
                START,
            )
            .unwrap();
        lottery
    }

    #[test]
    fn upkeep_is_checked_before_the_randomness_account() {
        let lottery = lottery(Pubkey::new_unique());
        let mut read = false;

        let result = validate_draw_trigger(&lottery, START + 3_600, SLOT, Pubkey::new_unique(), || {
            read = true;
            err!(ErrorCode::InvalidRandomnessAccount)
        });

        assert_eq!(code_of(result), u32::from(ErrorCode::UpkeepNotNeeded));
        assert!(!read);
    }

    #[test]
    fn stale_commit_is_rejected_once_upkeep_is_due() {
        let queue = Pubkey::new_unique();
        let mut lottery = lottery(queue);
        lottery.enter_lottery(Pubkey::new_unique(), 100).unwrap();

        let result = validate_draw_trigger(&lottery, START + 60, SLOT, Pubkey::new_unique(), || {
            Ok(CommittedRandomness { queue, seed_slot: SLOT - 10 })
        });

        assert_eq!(code_of(result), u32::from(ErrorCode::RandomnessAlreadyRevealed));
    }

    #[test]
    fn foreign_queue_is_rejected() {
        let mut lottery = lottery(Pubkey::new_unique());
        lottery.enter_lottery(Pubkey::new_unique(), 100).unwrap();

        let result = validate_draw_trigger(&lottery, START + 60, SLOT, Pubkey::new_unique(), || {
            Ok(CommittedRandomness { queue: Pubkey::new_unique(), seed_slot: SLOT - 1 })
        });

        assert_eq!(code_of(result), u32::from(ErrorCode::IncorrectOracleQueue));
    }

    #[test]
    fn fresh_commit_binds_the_account() {
        let queue = Pubkey::new_unique();
        let account = Pubkey::new_unique();
        let mut lottery = lottery(queue);
        lottery.enter_lottery(Pubkey::new_unique(), 100).unwrap();

        let commitment = validate_draw_trigger(&lottery, START + 60, SLOT, account, || {
            Ok(CommittedRandomness { queue, seed_slot: SLOT - 1 })
        })
        .unwrap();

        assert_eq!(commitment.randomness_account, account);
        assert_eq!(commitment.seed_slot, SLOT - 1);
    }
}
