use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Send more to enter the lottery")]
    InsufficientPayment,
    #[msg("Lottery is not open")]
    NotOpen,
    #[msg("Upkeep not needed")]
    UpkeepNotNeeded,
    #[msg("Lottery has reached its entrant capacity")]
    LotteryFull,
    #[msg("Player index out of range")]
    IndexOutOfRange,
    #[msg("Entrance fee and draw interval must be non-zero")]
    InvalidConfig,
    #[msg("Not authorized")]
    NotAuthorized,
    #[msg("Lottery has no draw in progress")]
    NotCalculating,
    #[msg("Winner already selected, payout pending")]
    PayoutPending,
    #[msg("No payout pending")]
    NoPendingPayout,
    #[msg("Unknown randomness request id")]
    UnknownRequestId,
    #[msg("A randomness request is already pending")]
    RequestAlreadyPending,
    #[msg("Cannot request randomness for an empty round")]
    EmptySnapshot,
    #[msg("Randomness callback carried no words")]
    MissingRandomWords,
    #[msg("Randomness account does not match the pending request")]
    IncorrectRandomnessAccount,
    #[msg("Randomness account belongs to a different oracle queue")]
    IncorrectOracleQueue,
    #[msg("Randomness account could not be parsed")]
    InvalidRandomnessAccount,
    #[msg("Randomness already revealed")]
    RandomnessAlreadyRevealed,
    #[msg("Randomness not resolved")]
    RandomnessNotResolved,
    #[msg("Prize transfer failed")]
    PayoutFailed,
    #[msg("Arithmetic overflow")]
    MathOverflow,
}

/// How a failure should be treated by whoever called into the lottery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Caller error. Nothing changed; the caller may retry later.
    CallerPrecondition,
    /// Misuse or replay of the oracle protocol. Nothing changed.
    ProtocolIntegrity,
    /// The round needs out-of-band recovery.
    FatalOperational,
}

impl ErrorCode {
    pub fn class(&self) -> ErrorClass {
        match self {
            ErrorCode::InsufficientPayment
            | ErrorCode::NotOpen
            | ErrorCode::UpkeepNotNeeded
            | ErrorCode::LotteryFull
            | ErrorCode::IndexOutOfRange
            | ErrorCode::InvalidConfig
            | ErrorCode::NotAuthorized
            | ErrorCode::NotCalculating
            | ErrorCode::PayoutPending
            | ErrorCode::NoPendingPayout => ErrorClass::CallerPrecondition,
            ErrorCode::UnknownRequestId
            | ErrorCode::RequestAlreadyPending
            | ErrorCode::EmptySnapshot
            | ErrorCode::MissingRandomWords
            | ErrorCode::IncorrectRandomnessAccount
            | ErrorCode::IncorrectOracleQueue
            | ErrorCode::InvalidRandomnessAccount
            | ErrorCode::RandomnessAlreadyRevealed
            | ErrorCode::RandomnessNotResolved => ErrorClass::ProtocolIntegrity,
            ErrorCode::PayoutFailed | ErrorCode::MathOverflow => ErrorClass::FatalOperational,
        }
    }
}

/// Turns `code` into a program error, flagging protocol misuse and
/// operational failures in the program log.
pub fn reject(code: ErrorCode) -> anchor_lang::error::Error {
    match code.class() {
        ErrorClass::ProtocolIntegrity => msg!("Suspicious request: {}", code),
        ErrorClass::FatalOperational => msg!("Operational failure: {}", code),
        ErrorClass::CallerPrecondition => {}
    }
    error!(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_of(error: anchor_lang::error::Error) -> u32 {
        match error {
            anchor_lang::error::Error::AnchorError(err) => err.error_code_number,
            other => panic!("expected an anchor error, got {:?}", other),
        }
    }

    #[test]
    fn reject_keeps_the_code() {
        for code in [
            ErrorCode::NotOpen,
            ErrorCode::UnknownRequestId,
            ErrorCode::PayoutFailed,
        ] {
            assert_eq!(code_of(reject(code)), u32::from(code));
        }
    }

    #[test]
    fn caller_errors_are_preconditions() {
        for code in [
            ErrorCode::InsufficientPayment,
            ErrorCode::NotOpen,
            ErrorCode::UpkeepNotNeeded,
        ] {
            assert_eq!(code.class(), ErrorClass::CallerPrecondition);
        }
    }

    #[test]
    fn replay_errors_are_protocol_integrity() {
        assert_eq!(ErrorCode::UnknownRequestId.class(), ErrorClass::ProtocolIntegrity);
        assert_eq!(ErrorCode::RequestAlreadyPending.class(), ErrorClass::ProtocolIntegrity);
    }

    #[test]
    fn payout_failure_is_fatal() {
        assert_eq!(ErrorCode::PayoutFailed.class(), ErrorClass::FatalOperational);
    }
}
