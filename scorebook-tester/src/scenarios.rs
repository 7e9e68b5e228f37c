//! QA scenario catalog for the portal
use std::path::PathBuf;

use anyhow::{Result, ensure};
use scorebook_core::{
    GameType, JsonFileStorage, LeagueId, Period, PlayerId, Portal, PortalError,
    SnapshotStorage, Status,
};

/// Shared inputs for one scenario run.
pub struct ScenarioCtx {
    /// Directory for snapshot files written by persistence scenarios.
    pub artifacts_dir: PathBuf,
}

/// One named, self-contained portal exercise. Every scenario builds its own
/// portal from scratch so runs never interfere.
pub struct Scenario {
    name: &'static str,
    description: &'static str,
    run: fn(&ScenarioCtx) -> Result<()>,
}

impl Scenario {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// # Errors
    ///
    /// Returns the first expectation the portal failed to meet.
    pub fn run(&self, ctx: &ScenarioCtx) -> Result<()> {
        (self.run)(ctx)
    }
}

pub fn all_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "smoke",
            description: "one league, one day, reports to ranking",
            run: smoke,
        },
        Scenario {
            name: "day-in-the-life",
            description: "a full day: pending, reports, results, closed",
            run: day_in_the_life,
        },
        Scenario {
            name: "void-day",
            description: "voiding zeroes a day and locks it forever",
            run: void_day,
        },
        Scenario {
            name: "correction-window",
            description: "results correct for two days, then settle",
            run: correction_window,
        },
        Scenario {
            name: "period-blocks",
            description: "week and month windows anchored at the start day",
            run: period_blocks,
        },
        Scenario {
            name: "membership-rules",
            description: "invites, seats, ownership guards",
            run: membership_rules,
        },
        Scenario {
            name: "league-cloning",
            description: "cloning reinvites the roster without history",
            run: league_cloning,
        },
        Scenario {
            name: "deactivation-protocol",
            description: "anonymization sweeps every league atomically",
            run: deactivation_protocol,
        },
        Scenario {
            name: "player-statistics",
            description: "round counts survive league removal",
            run: player_statistics,
        },
        Scenario {
            name: "snapshot-roundtrip",
            description: "state survives disk and full rollback",
            run: snapshot_roundtrip,
        },
    ]
}

#[must_use]
pub fn find_scenario(name: &str) -> Option<Scenario> {
    all_scenarios()
        .into_iter()
        .find(|scenario| scenario.name == name)
}

/// Two players in one started league, day 100.
fn league_of_two() -> Result<(Portal, LeagueId, PlayerId, PlayerId)> {
    let mut portal = Portal::new();
    let ana = portal.create_player("Ana", "ana@qa.test")?;
    let ben = portal.create_player("Ben", "ben@qa.test")?;
    let league = portal.create_league(ana, "qa-dice", GameType::DiceRoll)?;
    portal.invite_player_to_league(league, "ben@qa.test")?;
    portal.accept_invite_to_league(league, ben)?;
    portal.set_current_day(100)?;
    portal.start_league(league)?;
    Ok((portal, league, ana, ben))
}

fn smoke(_ctx: &ScenarioCtx) -> Result<()> {
    let (mut portal, league, ana, _) = league_of_two()?;
    portal.register_game_report(100, league, ana, "qa roll")?;
    portal.register_day_results(100, league, &[3, 5])?;
    ensure!(
        portal.day_points(league, 100)? == vec![3, 5],
        "day points should be [3, 5]"
    );
    ensure!(
        portal.period_ranking(league, Period::Day, 100)? == vec![2, 1],
        "day ranking should be [2, 1]"
    );
    Ok(())
}

fn day_in_the_life(_ctx: &ScenarioCtx) -> Result<()> {
    let (mut portal, league, ana, ben) = league_of_two()?;

    ensure!(
        portal.period_status(league, Period::Day, 100)? == Status::Pending,
        "an untouched day should be pending"
    );

    portal.register_game_report(100, league, ana, "two quick rounds")?;
    portal.register_game_report(100, league, ben, "a lucky streak")?;
    ensure!(
        portal.period_status(league, Period::Day, 100)? == Status::InProgress,
        "a reported day should be in progress"
    );
    ensure!(
        portal.day_points(league, 100)?.is_empty(),
        "points should be withheld until results arrive"
    );

    portal.register_day_results(100, league, &[10, 20])?;
    ensure!(
        portal.period_status(league, Period::Day, 100)? == Status::Closed,
        "a finalized day should be closed"
    );
    ensure!(
        portal.period_scores(league, Period::Day, 100)? == vec![10, 20],
        "scores should follow roster order"
    );
    ensure!(
        portal.period_ranking(league, Period::Day, 100)? == vec![2, 1],
        "twenty beats ten"
    );
    Ok(())
}

fn void_day(_ctx: &ScenarioCtx) -> Result<()> {
    let (mut portal, league, ana, _) = league_of_two()?;
    portal.register_game_report(100, league, ana, "deleted by steward")?;
    portal.register_day_results(100, league, &[10, 20])?;

    portal.void_day_results(100, league)?;
    ensure!(
        portal.day_points(league, 100)? == vec![0, 0],
        "a voided day should read all zeros"
    );
    ensure!(
        portal.game_report(100, league, ana)? == "deleted by steward",
        "reports should survive a void"
    );
    ensure!(
        portal.period_ranking(league, Period::Day, 100)? == vec![1, 1],
        "all-zero scores tie for first"
    );

    ensure!(
        matches!(
            portal.register_day_results(100, league, &[1, 1]),
            Err(PortalError::InvalidDate { .. })
        ),
        "a voided day should refuse new results"
    );
    ensure!(
        matches!(
            portal.register_game_report(100, league, ana, "reopened?"),
            Err(PortalError::InvalidDate { .. })
        ),
        "a voided day should refuse new reports"
    );
    ensure!(
        matches!(
            portal.void_day_results(100, league),
            Err(PortalError::InvalidDate { .. })
        ),
        "a voided day should refuse a second void"
    );
    Ok(())
}

fn correction_window(_ctx: &ScenarioCtx) -> Result<()> {
    let (mut portal, league, _, _) = league_of_two()?;

    portal.register_day_results(100, league, &[10, 20])?;
    log::debug!("initial results registered for day 100");

    portal.set_current_day(101)?;
    portal.register_day_results(100, league, &[11, 19])?;
    ensure!(
        portal.day_points(league, 100)? == vec![11, 19],
        "a next-day correction should overwrite"
    );

    portal.set_current_day(102)?;
    ensure!(
        matches!(
            portal.register_day_results(100, league, &[0, 0]),
            Err(PortalError::InvalidDate { .. })
        ),
        "day 100 should be settled once day 102 arrives"
    );
    ensure!(
        portal.day_points(league, 100)? == vec![11, 19],
        "the settled scores should be the corrected ones"
    );

    portal.register_day_results(101, league, &[1, 2])?;
    ensure!(
        matches!(
            portal.void_day_results(100, league),
            Err(PortalError::InvalidDate { .. })
        ),
        "voiding obeys the same window"
    );
    Ok(())
}

fn period_blocks(_ctx: &ScenarioCtx) -> Result<()> {
    let (mut portal, league, _, _) = league_of_two()?;

    portal.register_day_results(100, league, &[10, 20])?;
    portal.register_day_results(101, league, &[5, 1])?;
    portal.register_day_results(107, league, &[8, 8])?;

    ensure!(
        portal.period_scores(league, Period::Week, 103)? == vec![15, 21],
        "week one should sum days 100-106 only"
    );
    ensure!(
        portal.period_scores(league, Period::Week, 107)? == vec![8, 8],
        "day 107 should open week two"
    );
    ensure!(
        portal.period_ranking(league, Period::Week, 107)? == vec![1, 1],
        "equal totals tie for first"
    );
    ensure!(
        portal.period_scores(league, Period::Month, 115)? == vec![23, 29],
        "the month block should swallow both weeks"
    );

    portal.set_current_day(400)?;
    ensure!(
        portal.period_status(league, Period::Week, 200)? == Status::Pending,
        "an untouched week stays pending even in the past"
    );
    ensure!(
        portal.period_scores(league, Period::Week, 200)?.is_empty(),
        "a pending week has no score rows"
    );
    Ok(())
}

fn membership_rules(_ctx: &ScenarioCtx) -> Result<()> {
    let (mut portal, league, ana, ben) = league_of_two()?;

    ensure!(
        matches!(
            portal.invite_player_to_league(league, "ben@qa.test"),
            Err(PortalError::IllegalOperation { .. })
        ),
        "a current member cannot be re-invited"
    );

    portal.invite_player_to_league(league, "cleo@qa.test")?;
    let cleo = portal.create_player("Cleo", "cleo@qa.test")?;
    ensure!(
        portal.league_player_invites(league)? == vec![cleo],
        "signup should convert the email invite"
    );
    portal.remove_invite_from_league(league, "cleo@qa.test")?;
    ensure!(
        matches!(
            portal.accept_invite_to_league(league, cleo),
            Err(PortalError::IllegalOperation { .. })
        ),
        "a withdrawn invite cannot be accepted"
    );

    portal.add_league_owner(league, ben)?;
    portal.remove_league_owner(league, ana)?;
    ensure!(
        matches!(
            portal.remove_league_owner(league, ben),
            Err(PortalError::IllegalOperation { .. })
        ),
        "the last owner must stay"
    );

    portal.set_league_member_active(league, ana, false)?;
    ensure!(
        !portal.is_league_member_active(league, ana)?,
        "the inactive flag should stick"
    );
    ensure!(
        portal.league_roster(league)? == vec![ana, ben],
        "inactive members keep their seats"
    );
    Ok(())
}

fn league_cloning(_ctx: &ScenarioCtx) -> Result<()> {
    let (mut portal, league, ana, ben) = league_of_two()?;
    portal.register_day_results(100, league, &[10, 20])?;
    portal.set_league_member_active(league, ben, false)?;

    let copy = portal.clone_league(league, "qa-dice-ii")?;

    ensure!(
        portal.league_game_type(copy)? == GameType::DiceRoll,
        "the clone plays the same game"
    );
    ensure!(
        portal.league_owners(copy)? == vec![ana],
        "the clone keeps the owner list"
    );
    ensure!(
        portal.league_roster(copy)?.is_empty(),
        "the clone starts with an empty roster"
    );
    ensure!(
        portal.league_player_invites(copy)? == vec![ana, ben],
        "every old member should hold an invite"
    );
    ensure!(
        portal.league_status(copy)? == Status::Pending,
        "the clone starts pending"
    );

    // The original is untouched, history included.
    ensure!(
        portal.day_points(league, 100)? == vec![10, 20],
        "cloning must not disturb the original ledger"
    );
    ensure!(
        portal.league_status(league)? == Status::InProgress,
        "cloning must not disturb the original lifecycle"
    );

    portal.accept_invite_to_league(copy, ben)?;
    ensure!(
        portal.is_league_member_active(copy, ben)?,
        "a rebuilt seat starts active regardless of old flags"
    );
    Ok(())
}

fn deactivation_protocol(_ctx: &ScenarioCtx) -> Result<()> {
    let (mut portal, league, ana, ben) = league_of_two()?;
    portal.register_game_report(100, league, ana, "to be blanked")?;
    portal.register_day_results(100, league, &[10, 20])?;

    // Ana is the sole owner, so the protocol must refuse outright.
    let before = portal.state().clone();
    ensure!(
        matches!(
            portal.deactivate_player(ana),
            Err(PortalError::IllegalOperation { .. })
        ),
        "a sole owner cannot be deactivated"
    );
    ensure!(
        portal.state() == &before,
        "a refused deactivation must change nothing"
    );

    portal.add_league_owner(league, ben)?;
    portal.deactivate_player(ana)?;

    ensure!(
        portal.is_player_deactivated(ana)?,
        "the account should read deactivated"
    );
    ensure!(
        portal.player_display_name(ana)? == "player-1",
        "the display name should be the placeholder"
    );
    ensure!(
        portal.player_email(ana)? == "deactivated-1@invalid",
        "the email should be the placeholder"
    );
    ensure!(
        portal.game_report(100, league, ana)?.is_empty(),
        "authored reports should be blanked"
    );
    ensure!(
        portal.day_points(league, 100)? == vec![10, 20],
        "scores must survive anonymization"
    );
    ensure!(
        !portal.is_league_member_active(league, ana)?,
        "every membership should go inactive"
    );
    ensure!(
        portal.lookup_player_by_email("ana@qa.test").is_none(),
        "the old address should be freed"
    );
    Ok(())
}

fn player_statistics(_ctx: &ScenarioCtx) -> Result<()> {
    let (mut portal, league, ana, _) = league_of_two()?;
    portal.register_game_report(100, league, ana, "day one")?;
    portal.set_current_day(103)?;
    portal.register_game_report(103, league, ana, "day four")?;

    ensure!(
        portal.player_rounds_played(ana)? == 2,
        "two filed reports should count as two rounds"
    );
    let pct = portal.player_rounds_percentage(ana)?;
    ensure!(
        (pct - 50.0).abs() < f64::EPSILON,
        "two of four eligible days is 50%, got {pct}"
    );

    portal.remove_league(league)?;
    ensure!(
        portal.player_rounds_played(ana)? == 2,
        "removal should archive the played rounds"
    );
    let pct = portal.player_rounds_percentage(ana)?;
    ensure!(
        (pct - 50.0).abs() < f64::EPSILON,
        "the archived percentage should match, got {pct}"
    );
    Ok(())
}

fn snapshot_roundtrip(ctx: &ScenarioCtx) -> Result<()> {
    let storage = JsonFileStorage::new(ctx.artifacts_dir.join("snapshots"));
    let (mut portal, league, _, _) = league_of_two()?;
    portal.register_day_results(100, league, &[10, 20])?;
    portal.save_snapshot(&storage, "qa-checkpoint")?;
    let checkpoint = portal.state().clone();

    portal.create_player("Dev", "dev@qa.test")?;
    portal.set_current_day(200)?;
    ensure!(
        portal.load_snapshot(&storage, "qa-checkpoint")?,
        "the checkpoint should exist on disk"
    );
    ensure!(
        portal.state() == &checkpoint,
        "loading should roll the whole portal back"
    );
    ensure!(
        !portal.load_snapshot(&storage, "no-such-checkpoint")?,
        "a missing snapshot should report false"
    );
    ensure!(
        portal.state() == &checkpoint,
        "a missing snapshot should change nothing"
    );

    portal.erase();
    ensure!(
        portal.player_ids().is_empty() && portal.current_day() == 0,
        "erase should leave a factory-fresh portal"
    );
    ensure!(
        portal.load_snapshot(&storage, "qa-checkpoint")?,
        "the snapshot should outlive the erase"
    );
    ensure!(
        portal.state() == &checkpoint,
        "disk should bring everything back"
    );

    storage.delete("qa-checkpoint")?;
    Ok(())
}
