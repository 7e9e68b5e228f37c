//! Leagues: lifecycle, roster, ownership and invites
use std::collections::BTreeSet;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::clock::EpochDay;
use crate::error::PortalError;
use crate::ledger::ScoreSheet;
use crate::player::PlayerId;

/// Unique, never-reused league identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeagueId(pub u32);

impl Display for LeagueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The game a league competes in. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    DiceRoll,
    WordMaster,
}

impl GameType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DiceRoll => "dice_roll",
            Self::WordMaster => "word_master",
        }
    }
}

impl Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shared lifecycle vocabulary for leagues and ranking periods.
///
/// A league walks `Pending -> InProgress -> Closed` one way (reset excepted);
/// a ranking period reports whichever of the three applies to its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pending,
    InProgress,
    Closed,
}

impl Status {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One roster seat. Seats are appended in acceptance order and never removed,
/// so ranking rows keep a stable shape for the league's whole life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub player: PlayerId,
    /// Inactive members keep their seat and history but are ignored when
    /// results are registered.
    pub active: bool,
}

/// A league: one game, one roster, one ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub id: LeagueId,
    pub name: String,
    pub game_type: GameType,
    /// Owner list; always non-empty and a subset of the roster.
    pub owners: Vec<PlayerId>,
    pub roster: Vec<RosterEntry>,
    /// Invites addressed to email addresses not yet registered as players.
    pub email_invites: BTreeSet<String>,
    /// Invites addressed to registered players.
    pub player_invites: BTreeSet<PlayerId>,
    pub status: Status,
    pub start_day: Option<EpochDay>,
    pub close_day: Option<EpochDay>,
    pub sheet: ScoreSheet,
}

impl League {
    /// A fresh league owned and rostered by its creator.
    #[must_use]
    pub fn new(id: LeagueId, name: &str, game_type: GameType, creator: PlayerId) -> Self {
        Self {
            id,
            name: name.to_string(),
            game_type,
            owners: vec![creator],
            roster: vec![RosterEntry {
                player: creator,
                active: true,
            }],
            email_invites: BTreeSet::new(),
            player_invites: BTreeSet::new(),
            status: Status::Pending,
            start_day: None,
            close_day: None,
            sheet: ScoreSheet::default(),
        }
    }

    /// A restart of `source` under a new identity: same game and owners,
    /// every previous roster member re-invited, no history carried over.
    /// The owners take their roster seats as they accept, like everyone
    /// else.
    #[must_use]
    pub fn cloned_from(id: LeagueId, name: &str, source: &League) -> Self {
        Self {
            id,
            name: name.to_string(),
            game_type: source.game_type,
            owners: source.owners.clone(),
            roster: Vec::new(),
            email_invites: BTreeSet::new(),
            player_invites: source.roster.iter().map(|entry| entry.player).collect(),
            status: Status::Pending,
            start_day: None,
            close_day: None,
            sheet: ScoreSheet::default(),
        }
    }

    #[must_use]
    pub fn member(&self, player: PlayerId) -> Option<&RosterEntry> {
        self.roster.iter().find(|entry| entry.player == player)
    }

    fn member_mut(&mut self, player: PlayerId) -> Option<&mut RosterEntry> {
        self.roster.iter_mut().find(|entry| entry.player == player)
    }

    #[must_use]
    pub fn is_member(&self, player: PlayerId) -> bool {
        self.member(player).is_some()
    }

    /// Whether the player holds a roster seat that currently counts for
    /// results registration.
    #[must_use]
    pub fn member_is_active(&self, player: PlayerId) -> bool {
        self.member(player).is_some_and(|entry| entry.active)
    }

    #[must_use]
    pub fn is_owner(&self, player: PlayerId) -> bool {
        self.owners.contains(&player)
    }

    /// True when removing this player's ownership would leave none.
    #[must_use]
    pub fn is_sole_owner(&self, player: PlayerId) -> bool {
        self.owners.len() == 1 && self.owners[0] == player
    }

    /// Roster player ids in seat order.
    #[must_use]
    pub fn roster_ids(&self) -> Vec<PlayerId> {
        self.roster.iter().map(|entry| entry.player).collect()
    }

    /// Record an invite for an address with no registered player. Repeat
    /// invites collapse into one.
    pub fn invite_email(&mut self, email: &str) {
        self.email_invites.insert(email.to_string());
    }

    /// Record an invite for a registered player. Repeat invites collapse
    /// into one.
    pub fn invite_player(&mut self, player: PlayerId) {
        self.player_invites.insert(player);
    }

    /// Turn a pending email invite into a player invite once the address
    /// registers. No-op when no such invite exists.
    pub fn convert_email_invite(&mut self, email: &str, player: PlayerId) {
        if self.email_invites.remove(email) {
            self.player_invites.insert(player);
        }
    }

    /// Consume the player's invite and append them to the roster, active.
    ///
    /// # Errors
    ///
    /// [`PortalError::IllegalOperation`] when no invite is pending for the
    /// player.
    pub fn accept_invite(&mut self, player: PlayerId) -> Result<(), PortalError> {
        if !self.player_invites.remove(&player) {
            return Err(PortalError::IllegalOperation {
                reason: "no pending invite for this player",
            });
        }
        self.roster.push(RosterEntry {
            player,
            active: true,
        });
        Ok(())
    }

    /// Withdraw the invite addressed to `email`. When the address belongs
    /// to a registered player the invite lives on the player side, so the
    /// caller passes the resolved id along.
    ///
    /// # Errors
    ///
    /// [`PortalError::IllegalOperation`] when no invite matches.
    pub fn remove_invite(
        &mut self,
        email: &str,
        resolved: Option<PlayerId>,
    ) -> Result<(), PortalError> {
        if self.email_invites.remove(email) {
            return Ok(());
        }
        if let Some(player) = resolved {
            if self.player_invites.remove(&player) {
                return Ok(());
            }
        }
        Err(PortalError::IllegalOperation {
            reason: "no pending invite for this email",
        })
    }

    /// Grant ownership to a roster member. Granting twice changes nothing.
    ///
    /// # Errors
    ///
    /// [`PortalError::IllegalOperation`] when the player holds no roster
    /// seat.
    pub fn add_owner(&mut self, player: PlayerId) -> Result<(), PortalError> {
        if !self.is_member(player) {
            return Err(PortalError::IllegalOperation {
                reason: "an owner must be a roster member",
            });
        }
        if !self.owners.contains(&player) {
            self.owners.push(player);
        }
        Ok(())
    }

    /// Withdraw ownership from a current owner.
    ///
    /// # Errors
    ///
    /// [`PortalError::IllegalOperation`] when the player is not an owner,
    /// or is the only one left.
    pub fn remove_owner(&mut self, player: PlayerId) -> Result<(), PortalError> {
        if !self.owners.contains(&player) {
            return Err(PortalError::IllegalOperation {
                reason: "player is not an owner of this league",
            });
        }
        if self.owners.len() == 1 {
            return Err(PortalError::IllegalOperation {
                reason: "a league cannot be left without an owner",
            });
        }
        self.owners.retain(|owner| *owner != player);
        Ok(())
    }

    /// Flip a member's active flag.
    ///
    /// # Errors
    ///
    /// [`PortalError::IllegalOperation`] when the player holds no roster
    /// seat.
    pub fn set_member_active(&mut self, player: PlayerId, active: bool) -> Result<(), PortalError> {
        match self.member_mut(player) {
            Some(entry) => {
                entry.active = active;
                Ok(())
            }
            None => Err(PortalError::IllegalOperation {
                reason: "player is not a member of this league",
            }),
        }
    }

    /// Read a member's active flag.
    ///
    /// # Errors
    ///
    /// [`PortalError::IllegalOperation`] when the player holds no roster
    /// seat.
    pub fn member_active(&self, player: PlayerId) -> Result<bool, PortalError> {
        self.member(player)
            .map(|entry| entry.active)
            .ok_or(PortalError::IllegalOperation {
                reason: "player is not a member of this league",
            })
    }

    /// Deactivation-protocol write: clear the seat's active flag without
    /// touching non-members.
    pub fn deactivate_member(&mut self, player: PlayerId) {
        if let Some(entry) = self.member_mut(player) {
            entry.active = false;
        }
    }

    /// Open play as of `day`.
    ///
    /// # Errors
    ///
    /// [`PortalError::InvalidState`] unless the league is pending.
    pub fn start(&mut self, day: EpochDay) -> Result<(), PortalError> {
        if self.status != Status::Pending {
            return Err(PortalError::InvalidState {
                expected: Status::Pending,
                actual: self.status,
            });
        }
        self.status = Status::InProgress;
        self.start_day = Some(day);
        Ok(())
    }

    /// Close play as of `day`. The close day still belongs to the playable
    /// span.
    ///
    /// # Errors
    ///
    /// [`PortalError::InvalidState`] unless the league is in progress.
    pub fn close(&mut self, day: EpochDay) -> Result<(), PortalError> {
        if self.status != Status::InProgress {
            return Err(PortalError::InvalidState {
                expected: Status::InProgress,
                actual: self.status,
            });
        }
        self.status = Status::Closed;
        self.close_day = Some(day);
        Ok(())
    }

    /// Wipe the ledger and return to pending, keeping roster, owners and
    /// invites. No stats are archived; the history simply ceases to exist.
    pub fn reset(&mut self) {
        self.status = Status::Pending;
        self.start_day = None;
        self.close_day = None;
        self.sheet.clear();
    }

    /// Verify that `day` falls inside the league's playable span and return
    /// the start day.
    ///
    /// # Errors
    ///
    /// [`PortalError::InvalidDate`] when the league has not started, the day
    /// predates the start, or the day postdates the close.
    pub fn check_day_in_span(&self, day: EpochDay) -> Result<EpochDay, PortalError> {
        let Some(start) = self.start_day else {
            return Err(PortalError::InvalidDate {
                day,
                reason: "league has not started",
            });
        };
        if day < start {
            return Err(PortalError::InvalidDate {
                day,
                reason: "day is before the league start",
            });
        }
        if let Some(close) = self.close_day {
            if day > close {
                return Err(PortalError::InvalidDate {
                    day,
                    reason: "day is after the league close",
                });
            }
        }
        Ok(start)
    }

    /// Days of play the league has offered up to `today`: the inclusive
    /// stretch from start to the earlier of today and the close day.
    #[must_use]
    pub fn elapsed_playable_days(&self, today: EpochDay) -> u32 {
        let Some(start) = self.start_day else {
            return 0;
        };
        let end = self.close_day.map_or(today, |close| close.min(today));
        if end < start {
            return 0;
        }
        end - start + 1
    }
}
