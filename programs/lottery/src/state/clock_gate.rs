use anchor_lang::prelude::*;

/// Time gate between draws.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, InitSpace)]
pub struct ClockGate {
    /// Minimum number of seconds between two draws.
    pub draw_interval: u64,

    /// Unix timestamp of the last completed payout, or of initialization.
    pub last_draw_timestamp: i64,
}

impl ClockGate {
    pub fn new(draw_interval: u64, now: i64) -> Self {
        Self {
            draw_interval,
            last_draw_timestamp: now,
        }
    }

    /// Pure readiness check. Never mutates, so any observer may call it at
    /// any time. A clock that reads earlier than the last draw is never due.
    pub fn upkeep_needed(
        &self,
        now: i64,
        has_balance: bool,
        has_players: bool,
        is_open: bool,
    ) -> bool {
        is_open && has_players && has_balance && self.interval_elapsed(now)
    }

    pub fn interval_elapsed(&self, now: i64) -> bool {
        match now.checked_sub(self.last_draw_timestamp) {
            Some(elapsed) if elapsed >= 0 => elapsed as u64 >= self.draw_interval,
            _ => false,
        }
    }

    /// Earliest timestamp at which a draw can become due.
    pub fn next_draw_at(&self) -> i64 {
        i64::try_from(self.draw_interval)
            .ok()
            .and_then(|interval| self.last_draw_timestamp.checked_add(interval))
            .unwrap_or(i64::MAX)
    }

    pub(crate) fn mark_draw(&mut self, now: i64) {
        self.last_draw_timestamp = now;
    }
}
