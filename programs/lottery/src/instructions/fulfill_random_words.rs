use anchor_lang::prelude::*;
use switchboard_on_demand::accounts::RandomnessAccountData;

use crate::constants::{LOTTERY_SEED, NUM_WORDS};
use crate::error::{reject, ErrorCode};
use crate::events::PayoutDeferred;
use crate::payout::LamportTransfer;
use crate::state::Lottery;

/// Accounts required to deliver randomness for a pending request.
///
/// Permissionless: the value is read from the Switchboard account bound to
/// the request, so the caller cannot influence it.
#[derive(Accounts)]
pub struct FulfillRandomWords<'info> {
    /// Account paying for any transaction fees.
    #[account(mut)]
    pub payer: Signer<'info>,

    /// The main lottery state account.
    #[account(
        mut,
        seeds = [LOTTERY_SEED],
        bump = lottery.bump,
    )]
    pub lottery: Box<Account<'info, Lottery>>,

    /// The randomness oracle account providing verifiable randomness.
    /// CHECK: The account's data is validated manually within the handler.
    pub randomness_account_data: UncheckedAccount<'info>,

    /// Expected to be the selected winner. A mismatch defers the payout
    /// instead of failing the callback.
    /// CHECK: Only receives lamports; compared against the recorded winner.
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,
}

/// Splits a revealed Switchboard value into little-endian words.
pub fn random_words_from(value: &[u8; 32]) -> [u64; NUM_WORDS] {
    let mut words = [0u64; NUM_WORDS];
    for (word, chunk) in words.iter_mut().zip(value.chunks_exact(8)) {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(chunk);
        *word = u64::from_le_bytes(bytes);
    }
    words
}

/// Resolves the request, then tries to pay the winner in the same
/// instruction. A rejected transfer is not an error here: the winner stays
/// recorded and `retry_payout` finishes the round.
pub fn process_fulfill_random_words(ctx: Context<FulfillRandomWords>, request_id: u64) -> Result<()> {
    let clock = Clock::get()?;
    let rent = Rent::get()?;

    let bound = ctx
        .accounts
        .lottery
        .requests
        .bound_account(request_id)
        .map_err(|_| reject(ErrorCode::UnknownRequestId))?;
    if ctx.accounts.randomness_account_data.key() != bound {
        return Err(reject(ErrorCode::IncorrectRandomnessAccount));
    }

    let randomness_data =
        RandomnessAccountData::parse(ctx.accounts.randomness_account_data.data.borrow())
            .map_err(|_| ErrorCode::InvalidRandomnessAccount)?;
    let revealed_random_value = randomness_data
        .get_value(&clock)
        .map_err(|_| ErrorCode::RandomnessNotResolved)?;
    let random_words = random_words_from(&revealed_random_value);

    ctx.accounts
        .lottery
        .fulfill_random_words(request_id, &random_words)?;

    let vault = ctx.accounts.lottery.to_account_info();
    let recipient = ctx.accounts.winner.to_account_info();
    let mut transfer = LamportTransfer {
        vault: &vault,
        recipient: &recipient,
        rent,
    };

    match ctx
        .accounts
        .lottery
        .settle_payout(&mut transfer, clock.unix_timestamp)
    {
        Ok(picked) => {
            msg!("Winner: {}", picked.winner);
            emit!(picked);
        }
        Err(err) => {
            let Some(payout) = ctx.accounts.lottery.pending_payout else {
                return err!(ErrorCode::NoPendingPayout);
            };
            msg!("Payout deferred for {}: {}", payout.winner, err);
            emit!(PayoutDeferred {
                winner: payout.winner,
                round: payout.round,
                request_id: payout.request_id,
                amount: payout.amount,
            });
        }
    }

    Ok(())
}
