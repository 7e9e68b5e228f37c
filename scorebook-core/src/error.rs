//! Portal error kinds
use std::fmt;

use thiserror::Error;

use crate::clock::EpochDay;
use crate::league::Status;

/// Entity families that carry portal-allocated ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    League,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::League => "league",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by portal operations.
///
/// Every failing mutating call leaves portal state untouched; callers must
/// correct their input and resubmit. Id existence is always checked before
/// any other validation, so an unknown id reports `IdNotFound` even when
/// other arguments are also bad.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PortalError {
    #[error("no {kind} with id {id}")]
    IdNotFound { kind: EntityKind, id: u32 },
    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },
    #[error("invalid email address {email:?}")]
    InvalidEmail { email: String },
    #[error("email {email:?} already belongs to a registered player")]
    DuplicateEmail { email: String },
    #[error("league name {name:?} is already in use")]
    DuplicateName { name: String },
    #[error("league is {actual}, operation requires {expected}")]
    InvalidState { expected: Status, actual: Status },
    #[error("day {day} is not valid here: {reason}")]
    InvalidDate { day: EpochDay, reason: &'static str },
    #[error("{reason}")]
    IllegalOperation { reason: &'static str },
}
