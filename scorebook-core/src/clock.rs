//! Logical epoch-day clock
use serde::{Deserialize, Serialize};

use crate::error::PortalError;

/// Integer day counter serving as the portal's logical clock unit.
pub type EpochDay = u32;

/// Forward-only logical clock.
///
/// A fresh portal starts at day 0 so tests can script absolute days. Every
/// time-dependent computation takes the current day as an explicit input;
/// nothing in the portal reads an ambient wall clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalClock {
    day: EpochDay,
}

impl LogicalClock {
    #[must_use]
    pub const fn new() -> Self {
        Self { day: 0 }
    }

    /// The current epoch day.
    #[must_use]
    pub const fn current(self) -> EpochDay {
        self.day
    }

    /// Move the clock to `day`. Setting the current day again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `IllegalOperation` when `day` lies before the current day;
    /// the clock never moves backward.
    pub const fn set(&mut self, day: EpochDay) -> Result<(), PortalError> {
        if day < self.day {
            return Err(PortalError::IllegalOperation {
                reason: "the clock cannot move backward",
            });
        }
        self.day = day;
        Ok(())
    }

    /// Advance the clock by one day and return the new current day.
    pub const fn advance(&mut self) -> EpochDay {
        self.day += 1;
        self.day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_at_zero_and_only_moves_forward() {
        let mut clock = LogicalClock::new();
        assert_eq!(clock.current(), 0);

        clock.set(100).unwrap();
        assert_eq!(clock.current(), 100);

        // Same day is a no-op, earlier days are rejected.
        clock.set(100).unwrap();
        assert!(clock.set(99).is_err());
        assert_eq!(clock.current(), 100);
    }

    #[test]
    fn advance_returns_the_new_day() {
        let mut clock = LogicalClock::new();
        assert_eq!(clock.advance(), 1);
        assert_eq!(clock.advance(), 2);
        assert_eq!(clock.current(), 2);
    }
}
