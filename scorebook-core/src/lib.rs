//! Scorebook Core
//!
//! Platform-agnostic league logic for the Scorebook portal: players,
//! leagues, the daily results ledger, rankings and the logical clock.
//! Everything here is deterministic and free of UI concerns; persistence
//! enters only through the [`SnapshotStorage`] seam.

pub mod clock;
pub mod error;
pub mod league;
pub mod ledger;
pub mod player;
pub mod portal;
pub mod snapshot;
pub mod standings;
pub mod validate;

// Re-export commonly used types
pub use clock::{EpochDay, LogicalClock};
pub use error::{EntityKind, PortalError};
pub use league::{GameType, League, LeagueId, RosterEntry, Status};
pub use ledger::{DaySheet, GameRecord, Score, ScoreSheet};
pub use player::{ArchivedRounds, Player, PlayerId};
pub use portal::{Portal, PortalState};
pub use snapshot::{JsonFileStorage, SnapshotError};
pub use standings::{Period, dense_ranking, period_block};

/// Trait for abstracting snapshot persistence
/// Platform-specific implementations should provide this
pub trait SnapshotStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist the full portal state under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be saved.
    fn save(&self, name: &str, state: &PortalState) -> Result<(), Self::Error>;

    /// Load the portal state saved under `name`, `None` when no such
    /// snapshot exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be loaded or decoded.
    fn load(&self, name: &str) -> Result<Option<PortalState>, Self::Error>;

    /// Delete the snapshot saved under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be deleted.
    fn delete(&self, name: &str) -> Result<(), Self::Error>;
}
