//! The portal: one authority over players, leagues, ledger and clock
use serde::{Deserialize, Serialize};

use crate::SnapshotStorage;
use crate::clock::{EpochDay, LogicalClock};
use crate::error::{EntityKind, PortalError};
use crate::league::{GameType, League, LeagueId, Status};
use crate::player::{Player, PlayerId};
use crate::standings::{self, Period};
use crate::validate;

/// Everything the portal owns, as one serializable value. Snapshots persist
/// exactly this; comparing two states is how tests pin down atomicity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalState {
    pub players: Vec<Player>,
    pub leagues: Vec<League>,
    pub next_player_id: u32,
    pub next_league_id: u32,
    pub clock: LogicalClock,
}

impl Default for PortalState {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            leagues: Vec::new(),
            next_player_id: 1,
            next_league_id: 1,
            clock: LogicalClock::new(),
        }
    }
}

/// The single entry point for every operation on the platform.
///
/// All mutating operations validate first and write second, so a returned
/// error means nothing changed. Exclusive access via `&mut self` is the
/// whole concurrency story; there is no interior locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Portal {
    state: PortalState,
}

impl Portal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the full state, for snapshot comparison.
    #[must_use]
    pub const fn state(&self) -> &PortalState {
        &self.state
    }

    fn alloc_player_id(&mut self) -> PlayerId {
        let id = self.state.next_player_id;
        self.state.next_player_id += 1;
        PlayerId(id)
    }

    fn alloc_league_id(&mut self) -> LeagueId {
        let id = self.state.next_league_id;
        self.state.next_league_id += 1;
        LeagueId(id)
    }

    fn player(&self, id: PlayerId) -> Result<&Player, PortalError> {
        self.state
            .players
            .iter()
            .find(|player| player.id == id)
            .ok_or(PortalError::IdNotFound {
                kind: EntityKind::Player,
                id: id.0,
            })
    }

    fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, PortalError> {
        self.state
            .players
            .iter_mut()
            .find(|player| player.id == id)
            .ok_or(PortalError::IdNotFound {
                kind: EntityKind::Player,
                id: id.0,
            })
    }

    fn league(&self, id: LeagueId) -> Result<&League, PortalError> {
        self.state
            .leagues
            .iter()
            .find(|league| league.id == id)
            .ok_or(PortalError::IdNotFound {
                kind: EntityKind::League,
                id: id.0,
            })
    }

    fn league_mut(&mut self, id: LeagueId) -> Result<&mut League, PortalError> {
        self.state
            .leagues
            .iter_mut()
            .find(|league| league.id == id)
            .ok_or(PortalError::IdNotFound {
                kind: EntityKind::League,
                id: id.0,
            })
    }
}

// Players
impl Portal {
    /// Register a player and hand back their portal-allocated id. Any
    /// league invite pending against this email address becomes a player
    /// invite on the spot.
    ///
    /// # Errors
    ///
    /// [`PortalError::InvalidName`], [`PortalError::InvalidEmail`] or
    /// [`PortalError::DuplicateEmail`].
    pub fn create_player(
        &mut self,
        display_name: &str,
        email: &str,
    ) -> Result<PlayerId, PortalError> {
        validate::name(display_name)?;
        validate::email(email)?;
        if self.state.players.iter().any(|player| player.email == email) {
            return Err(PortalError::DuplicateEmail {
                email: email.to_string(),
            });
        }
        let id = self.alloc_player_id();
        let join_day = self.state.clock.current();
        self.state
            .players
            .push(Player::new(id, display_name, email, join_day));
        for league in &mut self.state.leagues {
            league.convert_email_invite(email, id);
        }
        Ok(id)
    }

    /// Permanently deactivate a player: placeholder identity, blanked
    /// report texts, inactive in every league. Scores, roster seats and
    /// the id itself survive so ranking tables keep their shape.
    ///
    /// The whole protocol runs or none of it does: a player who is the
    /// sole owner of any league is rejected before anything changes.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`], or [`PortalError::IllegalOperation`]
    /// when the player is already deactivated or solely owns a league.
    pub fn deactivate_player(&mut self, id: PlayerId) -> Result<(), PortalError> {
        if self.player(id)?.is_deactivated() {
            return Err(PortalError::IllegalOperation {
                reason: "player is already deactivated",
            });
        }
        if self.state.leagues.iter().any(|league| league.is_sole_owner(id)) {
            return Err(PortalError::IllegalOperation {
                reason: "player is the sole owner of a league",
            });
        }
        // Past this point every write is infallible.
        for league in &mut self.state.leagues {
            league.sheet.blank_reports_of(id);
            league.deactivate_member(id);
        }
        if let Some(player) = self.state.players.iter_mut().find(|player| player.id == id) {
            player.anonymize();
        }
        Ok(())
    }

    /// # Errors
    ///
    /// [`PortalError::IdNotFound`].
    pub fn is_player_deactivated(&self, id: PlayerId) -> Result<bool, PortalError> {
        Ok(self.player(id)?.is_deactivated())
    }

    /// # Errors
    ///
    /// [`PortalError::IdNotFound`].
    pub fn player_display_name(&self, id: PlayerId) -> Result<String, PortalError> {
        Ok(self.player(id)?.display_name.clone())
    }

    /// # Errors
    ///
    /// [`PortalError::IdNotFound`].
    pub fn player_email(&self, id: PlayerId) -> Result<String, PortalError> {
        Ok(self.player(id)?.email.clone())
    }

    /// # Errors
    ///
    /// [`PortalError::IdNotFound`].
    pub fn player_join_day(&self, id: PlayerId) -> Result<EpochDay, PortalError> {
        Ok(self.player(id)?.join_day)
    }

    /// Change a player's display name. Deactivated identities are frozen.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`], [`PortalError::IllegalOperation`] for a
    /// deactivated player, or [`PortalError::InvalidName`].
    pub fn update_player_display_name(
        &mut self,
        id: PlayerId,
        display_name: &str,
    ) -> Result<(), PortalError> {
        if self.player(id)?.is_deactivated() {
            return Err(PortalError::IllegalOperation {
                reason: "a deactivated player's display name cannot change",
            });
        }
        validate::name(display_name)?;
        self.player_mut(id)?.display_name = display_name.to_string();
        Ok(())
    }

    /// The player currently registered under `email`, if any. Deactivation
    /// frees an address, so a placeholder never shadows a new signup.
    #[must_use]
    pub fn lookup_player_by_email(&self, email: &str) -> Option<PlayerId> {
        self.state
            .players
            .iter()
            .find(|player| player.email == email)
            .map(|player| player.id)
    }

    /// All player ids in ascending order.
    #[must_use]
    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.state.players.iter().map(|player| player.id).collect()
    }

    /// Ids of the leagues the player holds a roster seat in, ascending.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`].
    pub fn player_leagues(&self, id: PlayerId) -> Result<Vec<LeagueId>, PortalError> {
        self.player(id)?;
        Ok(self
            .state
            .leagues
            .iter()
            .filter(|league| league.is_member(id))
            .map(|league| league.id)
            .collect())
    }

    /// Ids of the leagues the player owns, ascending.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`].
    pub fn player_owned_leagues(&self, id: PlayerId) -> Result<Vec<LeagueId>, PortalError> {
        self.player(id)?;
        Ok(self
            .state
            .leagues
            .iter()
            .filter(|league| league.is_owner(id))
            .map(|league| league.id)
            .collect())
    }

    /// Ids of the leagues holding a pending invite for the player,
    /// ascending.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`].
    pub fn player_invited_leagues(&self, id: PlayerId) -> Result<Vec<LeagueId>, PortalError> {
        self.player(id)?;
        Ok(self
            .state
            .leagues
            .iter()
            .filter(|league| league.player_invites.contains(&id))
            .map(|league| league.id)
            .collect())
    }

    /// Lifetime count of rounds the player filed a report for, including
    /// rounds archived from removed leagues.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`].
    pub fn player_rounds_played(&self, id: PlayerId) -> Result<u32, PortalError> {
        let player = self.player(id)?;
        let mut played = player.archived_rounds.played;
        for league in &self.state.leagues {
            if league.is_member(id) {
                played = played.saturating_add(league.sheet.rounds_reported(id));
            }
        }
        Ok(played)
    }

    /// Lifetime participation rate: rounds played over rounds eligible,
    /// as a percentage. A player eligible for nothing sits at 0.0.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`].
    pub fn player_rounds_percentage(&self, id: PlayerId) -> Result<f64, PortalError> {
        let player = self.player(id)?;
        let today = self.state.clock.current();
        let mut played = player.archived_rounds.played;
        let mut eligible = player.archived_rounds.eligible;
        for league in &self.state.leagues {
            if league.is_member(id) {
                played = played.saturating_add(league.sheet.rounds_reported(id));
                eligible = eligible.saturating_add(league.elapsed_playable_days(today));
            }
        }
        if eligible == 0 {
            return Ok(0.0);
        }
        Ok(f64::from(played) / f64::from(eligible) * 100.0)
    }
}

// Leagues
impl Portal {
    /// Create a league owned by `owner`, who takes the first roster seat.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`], [`PortalError::IllegalOperation`] for a
    /// deactivated owner, [`PortalError::InvalidName`] or
    /// [`PortalError::DuplicateName`].
    pub fn create_league(
        &mut self,
        owner: PlayerId,
        name: &str,
        game_type: GameType,
    ) -> Result<LeagueId, PortalError> {
        if self.player(owner)?.is_deactivated() {
            return Err(PortalError::IllegalOperation {
                reason: "a deactivated player cannot create a league",
            });
        }
        validate::name(name)?;
        if self.state.leagues.iter().any(|league| league.name == name) {
            return Err(PortalError::DuplicateName {
                name: name.to_string(),
            });
        }
        let id = self.alloc_league_id();
        self.state
            .leagues
            .push(League::new(id, name, game_type, owner));
        Ok(id)
    }

    /// Remove a league outright. Each roster member's played and eligible
    /// round counts are folded into their lifetime archive first, so
    /// player statistics survive the league.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`].
    pub fn remove_league(&mut self, id: LeagueId) -> Result<(), PortalError> {
        let index = self
            .state
            .leagues
            .iter()
            .position(|league| league.id == id)
            .ok_or(PortalError::IdNotFound {
                kind: EntityKind::League,
                id: id.0,
            })?;
        let today = self.state.clock.current();
        let league = &self.state.leagues[index];
        let eligible = league.elapsed_playable_days(today);
        let folds: Vec<(PlayerId, u32)> = league
            .roster
            .iter()
            .map(|entry| (entry.player, league.sheet.rounds_reported(entry.player)))
            .collect();
        for (player_id, played) in folds {
            if let Some(player) = self
                .state
                .players
                .iter_mut()
                .find(|player| player.id == player_id)
            {
                player.archived_rounds.fold(played, eligible);
            }
        }
        self.state.leagues.remove(index);
        Ok(())
    }

    /// Rename a league. Renaming a league to its current name succeeds and
    /// changes nothing.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`], [`PortalError::InvalidName`] or
    /// [`PortalError::DuplicateName`].
    pub fn rename_league(&mut self, id: LeagueId, name: &str) -> Result<(), PortalError> {
        self.league(id)?;
        validate::name(name)?;
        if self
            .state
            .leagues
            .iter()
            .any(|league| league.id != id && league.name == name)
        {
            return Err(PortalError::DuplicateName {
                name: name.to_string(),
            });
        }
        self.league_mut(id)?.name = name.to_string();
        Ok(())
    }

    /// Start a fresh league from an existing one: same game and owners,
    /// every previous roster member re-invited, no carried history.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`], [`PortalError::InvalidName`] or
    /// [`PortalError::DuplicateName`].
    pub fn clone_league(&mut self, source: LeagueId, name: &str) -> Result<LeagueId, PortalError> {
        self.league(source)?;
        validate::name(name)?;
        if self.state.leagues.iter().any(|league| league.name == name) {
            return Err(PortalError::DuplicateName {
                name: name.to_string(),
            });
        }
        let id = self.alloc_league_id();
        let copy = League::cloned_from(id, name, self.league(source)?);
        self.state.leagues.push(copy);
        Ok(id)
    }

    /// All league ids in ascending order.
    #[must_use]
    pub fn league_ids(&self) -> Vec<LeagueId> {
        self.state.leagues.iter().map(|league| league.id).collect()
    }

    /// # Errors
    ///
    /// [`PortalError::IdNotFound`].
    pub fn league_name(&self, id: LeagueId) -> Result<String, PortalError> {
        Ok(self.league(id)?.name.clone())
    }

    /// # Errors
    ///
    /// [`PortalError::IdNotFound`].
    pub fn league_game_type(&self, id: LeagueId) -> Result<GameType, PortalError> {
        Ok(self.league(id)?.game_type)
    }

    /// # Errors
    ///
    /// [`PortalError::IdNotFound`].
    pub fn league_status(&self, id: LeagueId) -> Result<Status, PortalError> {
        Ok(self.league(id)?.status)
    }

    /// # Errors
    ///
    /// [`PortalError::IdNotFound`].
    pub fn league_start_day(&self, id: LeagueId) -> Result<Option<EpochDay>, PortalError> {
        Ok(self.league(id)?.start_day)
    }

    /// # Errors
    ///
    /// [`PortalError::IdNotFound`].
    pub fn league_close_day(&self, id: LeagueId) -> Result<Option<EpochDay>, PortalError> {
        Ok(self.league(id)?.close_day)
    }

    /// Roster player ids in seat order: acceptance order, never reshuffled.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`].
    pub fn league_roster(&self, id: LeagueId) -> Result<Vec<PlayerId>, PortalError> {
        Ok(self.league(id)?.roster_ids())
    }

    /// # Errors
    ///
    /// [`PortalError::IdNotFound`].
    pub fn league_owners(&self, id: LeagueId) -> Result<Vec<PlayerId>, PortalError> {
        Ok(self.league(id)?.owners.clone())
    }

    /// Pending invites addressed to unregistered email addresses.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`].
    pub fn league_email_invites(&self, id: LeagueId) -> Result<Vec<String>, PortalError> {
        Ok(self.league(id)?.email_invites.iter().cloned().collect())
    }

    /// Pending invites addressed to registered players.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`].
    pub fn league_player_invites(&self, id: LeagueId) -> Result<Vec<PlayerId>, PortalError> {
        Ok(self.league(id)?.player_invites.iter().copied().collect())
    }

    /// Invite an email address to a league. When the address belongs to a
    /// registered player the invite attaches to the player instead.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`], [`PortalError::InvalidEmail`], or
    /// [`PortalError::IllegalOperation`] when the address resolves to a
    /// current roster member.
    pub fn invite_player_to_league(
        &mut self,
        id: LeagueId,
        email: &str,
    ) -> Result<(), PortalError> {
        self.league(id)?;
        validate::email(email)?;
        let resolved = self.lookup_player_by_email(email);
        if let Some(player) = resolved {
            if self.league(id)?.is_member(player) {
                return Err(PortalError::IllegalOperation {
                    reason: "player is already a member of this league",
                });
            }
        }
        let league = self.league_mut(id)?;
        match resolved {
            Some(player) => league.invite_player(player),
            None => league.invite_email(email),
        }
        Ok(())
    }

    /// Accept a league invite; the player takes the next roster seat,
    /// active.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`], or [`PortalError::IllegalOperation`]
    /// when the player is deactivated or holds no invite.
    pub fn accept_invite_to_league(
        &mut self,
        id: LeagueId,
        player: PlayerId,
    ) -> Result<(), PortalError> {
        self.league(id)?;
        if self.player(player)?.is_deactivated() {
            return Err(PortalError::IllegalOperation {
                reason: "a deactivated player cannot join a league",
            });
        }
        self.league_mut(id)?.accept_invite(player)
    }

    /// Withdraw a pending invite by email address, whichever side of the
    /// registration boundary it currently sits on.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`], [`PortalError::InvalidEmail`], or
    /// [`PortalError::IllegalOperation`] when no matching invite exists.
    pub fn remove_invite_from_league(
        &mut self,
        id: LeagueId,
        email: &str,
    ) -> Result<(), PortalError> {
        self.league(id)?;
        validate::email(email)?;
        let resolved = self.lookup_player_by_email(email);
        self.league_mut(id)?.remove_invite(email, resolved)
    }

    /// Grant league ownership to a roster member. Granting twice changes
    /// nothing.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`], or [`PortalError::IllegalOperation`]
    /// when the player is not on the roster.
    pub fn add_league_owner(&mut self, id: LeagueId, player: PlayerId) -> Result<(), PortalError> {
        self.league(id)?;
        self.player(player)?;
        self.league_mut(id)?.add_owner(player)
    }

    /// Withdraw league ownership. The last owner cannot leave.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`], or [`PortalError::IllegalOperation`]
    /// when the player is not an owner or is the only one.
    pub fn remove_league_owner(&mut self, id: LeagueId, player: PlayerId) -> Result<(), PortalError> {
        self.league(id)?;
        self.player(player)?;
        self.league_mut(id)?.remove_owner(player)
    }

    /// Flip a roster member's active flag. Inactive members keep their
    /// seat and history but are skipped when results are registered.
    /// A deactivated player cannot be switched back on.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`], or [`PortalError::IllegalOperation`]
    /// when the player is not on the roster or is deactivated.
    pub fn set_league_member_active(
        &mut self,
        id: LeagueId,
        player: PlayerId,
        active: bool,
    ) -> Result<(), PortalError> {
        self.league(id)?;
        let deactivated = self.player(player)?.is_deactivated();
        if active && deactivated {
            return Err(PortalError::IllegalOperation {
                reason: "a deactivated player cannot be reactivated in a league",
            });
        }
        self.league_mut(id)?.set_member_active(player, active)
    }

    /// # Errors
    ///
    /// [`PortalError::IdNotFound`], or [`PortalError::IllegalOperation`]
    /// when the player is not on the roster.
    pub fn is_league_member_active(
        &self,
        id: LeagueId,
        player: PlayerId,
    ) -> Result<bool, PortalError> {
        let league = self.league(id)?;
        self.player(player)?;
        league.member_active(player)
    }

    /// Open play: the league becomes in-progress and today becomes its
    /// start day, the anchor for every ranking period.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`], or [`PortalError::InvalidState`] unless
    /// the league is pending.
    pub fn start_league(&mut self, id: LeagueId) -> Result<(), PortalError> {
        let day = self.state.clock.current();
        self.league_mut(id)?.start(day)
    }

    /// Close play as of today. The close day itself remains playable and
    /// correctable inside the registration window.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`], or [`PortalError::InvalidState`] unless
    /// the league is in progress.
    pub fn close_league(&mut self, id: LeagueId) -> Result<(), PortalError> {
        let day = self.state.clock.current();
        self.league_mut(id)?.close(day)
    }

    /// Wipe the league's ledger and dates and return it to pending. The
    /// roster, owners and invites stay; nothing is archived.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`].
    pub fn reset_league(&mut self, id: LeagueId) -> Result<(), PortalError> {
        self.league_mut(id)?.reset();
        Ok(())
    }
}

// Results and rankings
impl Portal {
    /// File or replace a member's gameplay report for a day. Open until
    /// the day's results are registered or the day is voided.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`], [`PortalError::IllegalOperation`] for a
    /// non-member, [`PortalError::InvalidState`] for a closed league, or
    /// [`PortalError::InvalidDate`] outside the playable span or once the
    /// day is locked.
    pub fn register_game_report(
        &mut self,
        day: EpochDay,
        id: LeagueId,
        player: PlayerId,
        report: &str,
    ) -> Result<(), PortalError> {
        let league = self.league(id)?;
        self.player(player)?;
        if !league.is_member(player) {
            return Err(PortalError::IllegalOperation {
                reason: "player is not a member of this league",
            });
        }
        if league.status == Status::Closed {
            return Err(PortalError::InvalidState {
                expected: Status::InProgress,
                actual: Status::Closed,
            });
        }
        league.check_day_in_span(day)?;
        if league.sheet.is_voided(day) {
            return Err(PortalError::InvalidDate {
                day,
                reason: "day is void-locked",
            });
        }
        if league.sheet.is_finalized(day) {
            return Err(PortalError::InvalidDate {
                day,
                reason: "day results are already registered",
            });
        }
        self.league_mut(id)?.sheet.upsert_report(day, player, report);
        Ok(())
    }

    /// The report a member filed for a day, "" when none was.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`], or [`PortalError::InvalidDate`] outside
    /// the playable span.
    pub fn game_report(
        &self,
        day: EpochDay,
        id: LeagueId,
        player: PlayerId,
    ) -> Result<String, PortalError> {
        let league = self.league(id)?;
        self.player(player)?;
        league.check_day_in_span(day)?;
        Ok(league.sheet.report_text(day, player).to_string())
    }

    /// Register final scores for a day, one per roster seat in seat order,
    /// and finalize it. Only active seats take the new scores; inactive
    /// seats keep what they had. Re-registration inside the two-day
    /// correction window overwrites cleanly.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`]; [`PortalError::InvalidDate`] outside
    /// the playable span, on a voided day, or past the correction window;
    /// [`PortalError::IllegalOperation`] when `scores` does not match the
    /// roster.
    pub fn register_day_results(
        &mut self,
        day: EpochDay,
        id: LeagueId,
        scores: &[u32],
    ) -> Result<(), PortalError> {
        let league = self.league(id)?;
        league.check_day_in_span(day)?;
        if league.sheet.is_voided(day) {
            return Err(PortalError::InvalidDate {
                day,
                reason: "day is void-locked",
            });
        }
        if self.state.clock.current() >= day.saturating_add(2) {
            return Err(PortalError::InvalidDate {
                day,
                reason: "outside the two-day correction window",
            });
        }
        if scores.len() != league.roster.len() {
            return Err(PortalError::IllegalOperation {
                reason: "scores must match the roster in length and order",
            });
        }
        let pairs: Vec<(PlayerId, u32)> = league
            .roster
            .iter()
            .zip(scores)
            .filter(|(entry, _)| entry.active)
            .map(|(entry, score)| (entry.player, *score))
            .collect();
        self.league_mut(id)?.sheet.finalize_day(day, &pairs);
        Ok(())
    }

    /// Void a day: every roster seat drops to zero and the day locks
    /// permanently. Reports stay on record.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`], or [`PortalError::InvalidDate`] outside
    /// the playable span, on an already-voided day, or past the correction
    /// window.
    pub fn void_day_results(&mut self, day: EpochDay, id: LeagueId) -> Result<(), PortalError> {
        let league = self.league(id)?;
        league.check_day_in_span(day)?;
        if league.sheet.is_voided(day) {
            return Err(PortalError::InvalidDate {
                day,
                reason: "day is already void-locked",
            });
        }
        if self.state.clock.current() >= day.saturating_add(2) {
            return Err(PortalError::InvalidDate {
                day,
                reason: "outside the two-day correction window",
            });
        }
        let roster = league.roster_ids();
        self.league_mut(id)?.sheet.void_day(day, &roster);
        Ok(())
    }

    /// Status of the ranking period containing `day`.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`], or [`PortalError::InvalidDate`] outside
    /// the playable span.
    pub fn period_status(
        &self,
        id: LeagueId,
        period: Period,
        day: EpochDay,
    ) -> Result<Status, PortalError> {
        standings::period_status(self.league(id)?, period, day, self.state.clock.current())
    }

    /// Accumulated points per roster seat for the period containing `day`.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`], or [`PortalError::InvalidDate`] outside
    /// the playable span.
    pub fn period_scores(
        &self,
        id: LeagueId,
        period: Period,
        day: EpochDay,
    ) -> Result<Vec<u32>, PortalError> {
        standings::period_scores(self.league(id)?, period, day, self.state.clock.current())
    }

    /// Dense positions per roster seat for the period containing `day`.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`], or [`PortalError::InvalidDate`] outside
    /// the playable span.
    pub fn period_ranking(
        &self,
        id: LeagueId,
        period: Period,
        day: EpochDay,
    ) -> Result<Vec<u32>, PortalError> {
        standings::period_ranking(self.league(id)?, period, day, self.state.clock.current())
    }

    /// Registered scores per roster seat for one day; empty until the day
    /// is finalized.
    ///
    /// # Errors
    ///
    /// [`PortalError::IdNotFound`], or [`PortalError::InvalidDate`] outside
    /// the playable span.
    pub fn day_points(&self, id: LeagueId, day: EpochDay) -> Result<Vec<u32>, PortalError> {
        standings::day_points(self.league(id)?, day)
    }
}

// Clock and whole-store operations
impl Portal {
    /// The current epoch day.
    #[must_use]
    pub const fn current_day(&self) -> EpochDay {
        self.state.clock.current()
    }

    /// Move the clock forward to `day`.
    ///
    /// # Errors
    ///
    /// [`PortalError::IllegalOperation`] when `day` lies in the past.
    pub fn set_current_day(&mut self, day: EpochDay) -> Result<(), PortalError> {
        self.state.clock.set(day)
    }

    /// Advance the clock by one day and return the new current day.
    pub fn increment_day(&mut self) -> EpochDay {
        self.state.clock.advance()
    }

    /// Factory reset: forget every player, league, id counter and the
    /// clock.
    pub fn erase(&mut self) {
        self.state = PortalState::default();
    }

    /// Persist the full state under `name`.
    ///
    /// # Errors
    ///
    /// Whatever the storage backend reports.
    pub fn save_snapshot<S: SnapshotStorage>(
        &self,
        storage: &S,
        name: &str,
    ) -> Result<(), S::Error> {
        storage.save(name, &self.state)
    }

    /// Replace the full state with the snapshot stored under `name`.
    /// Returns `false`, leaving the current state untouched, when no such
    /// snapshot exists; a decode failure also leaves it untouched.
    ///
    /// # Errors
    ///
    /// Whatever the storage backend reports.
    pub fn load_snapshot<S: SnapshotStorage>(
        &mut self,
        storage: &S,
        name: &str,
    ) -> Result<bool, S::Error> {
        match storage.load(name)? {
            Some(state) => {
                self.state = state;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
