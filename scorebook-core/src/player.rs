//! Player identities and lifetime statistics
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::EpochDay;

/// Portal-allocated player identifier. Strictly increasing, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Round counters folded in when a league is removed, so lifetime player
/// statistics keep counting leagues that no longer exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedRounds {
    pub played: u32,
    pub eligible: u32,
}

impl ArchivedRounds {
    /// Fold one removed league's counts into the archive.
    pub const fn fold(&mut self, played: u32, eligible: u32) {
        self.played = self.played.saturating_add(played);
        self.eligible = self.eligible.saturating_add(eligible);
    }
}

/// A registered platform member.
///
/// Deactivation keeps the entry (ids are never reused and ranking tables
/// must stay intact) but replaces the personal fields with placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub email: String,
    pub join_day: EpochDay,
    pub active: bool,
    #[serde(default)]
    pub archived_rounds: ArchivedRounds,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, display_name: &str, email: &str, join_day: EpochDay) -> Self {
        Self {
            id,
            display_name: display_name.to_string(),
            email: email.to_string(),
            join_day,
            active: true,
            archived_rounds: ArchivedRounds::default(),
        }
    }

    /// Stable display-name placeholder derived from the player id.
    #[must_use]
    pub fn placeholder_display_name(id: PlayerId) -> String {
        format!("player-{id}")
    }

    /// Stable email placeholder derived from the player id. The reserved
    /// `.invalid` TLD keeps placeholders out of the real address space, so
    /// email uniqueness holds and the original address is freed for reuse.
    #[must_use]
    pub fn placeholder_email(id: PlayerId) -> String {
        format!("deactivated-{id}@invalid")
    }

    /// Replace the personal fields with placeholders and mark the account
    /// inactive. Join day and archived statistics are retained.
    pub fn anonymize(&mut self) {
        self.display_name = Self::placeholder_display_name(self.id);
        self.email = Self::placeholder_email(self.id);
        self.active = false;
    }

    #[must_use]
    pub const fn is_deactivated(&self) -> bool {
        !self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymize_replaces_identity_and_keeps_the_rest() {
        let mut player = Player::new(PlayerId(9), "Jo", "jo@example.com", 42);
        player.archived_rounds.fold(3, 10);

        player.anonymize();

        assert_eq!(player.display_name, "player-9");
        assert_eq!(player.email, "deactivated-9@invalid");
        assert!(player.is_deactivated());
        assert_eq!(player.join_day, 42);
        assert_eq!(player.archived_rounds.played, 3);
        assert_eq!(player.archived_rounds.eligible, 10);
    }

    #[test]
    fn placeholder_display_name_fits_the_name_bounds() {
        // Largest possible id still yields a name within 20 characters.
        let name = Player::placeholder_display_name(PlayerId(u32::MAX));
        assert!(name.chars().count() <= crate::validate::NAME_MAX_CHARS);
    }

    #[test]
    fn archived_rounds_saturate() {
        let mut rounds = ArchivedRounds {
            played: u32::MAX - 1,
            eligible: 0,
        };
        rounds.fold(5, 2);
        assert_eq!(rounds.played, u32::MAX);
        assert_eq!(rounds.eligible, 2);
    }
}
