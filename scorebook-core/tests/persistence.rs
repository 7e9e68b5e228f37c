use scorebook_core::{GameType, JsonFileStorage, Period, PlayerId, Portal};

/// A portal exercising every corner of the data model: players active and
/// deactivated, leagues in all three states, reports, finalized and voided
/// days, invites on both sides of the registration boundary.
fn rich_portal() -> Portal {
    let mut portal = Portal::new();
    let ana = portal.create_player("Ana", "ana@example.com").unwrap();
    let ben = portal.create_player("Ben", "ben@example.com").unwrap();
    let cleo = portal.create_player("Cleo", "cleo@example.com").unwrap();

    let dice = portal.create_league(ana, "dice-nights", GameType::DiceRoll).unwrap();
    portal.invite_player_to_league(dice, "ben@example.com").unwrap();
    portal.accept_invite_to_league(dice, ben).unwrap();
    portal.add_league_owner(dice, ben).unwrap();
    portal.invite_player_to_league(dice, "nobody-yet@example.com").unwrap();

    portal.set_current_day(100).unwrap();
    portal.start_league(dice).unwrap();
    portal.register_game_report(100, dice, ana, "opening night").unwrap();
    portal.register_day_results(100, dice, &[10, 20]).unwrap();
    portal.set_current_day(101).unwrap();
    portal.void_day_results(101, dice).unwrap();

    let words = portal.create_league(cleo, "word-club", GameType::WordMaster).unwrap();
    portal.invite_player_to_league(words, "ana@example.com").unwrap();

    portal.clone_league(dice, "dice-nights-ii").unwrap();
    portal.deactivate_player(ana).unwrap();
    portal
}

#[test]
fn a_full_portal_roundtrips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path());
    let portal = rich_portal();
    portal.save_snapshot(&storage, "full").unwrap();

    let mut restored = Portal::new();
    assert!(restored.load_snapshot(&storage, "full").unwrap());
    assert_eq!(restored.state(), portal.state());

    // Derived views agree, not just raw state.
    let dice = restored.league_ids()[0];
    assert_eq!(restored.day_points(dice, 100).unwrap(), vec![10, 20]);
    assert_eq!(
        restored.period_ranking(dice, Period::Week, 100).unwrap(),
        vec![2, 1]
    );
    assert!(restored.is_player_deactivated(PlayerId(1)).unwrap());
}

#[test]
fn loading_rolls_the_portal_back_wholesale() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path());

    let mut portal = rich_portal();
    portal.save_snapshot(&storage, "checkpoint").unwrap();
    let checkpoint = portal.state().clone();

    // Life goes on past the checkpoint.
    let dev = portal.create_player("Dev", "dev@example.com").unwrap();
    portal.set_current_day(200).unwrap();
    assert_ne!(portal.state(), &checkpoint);

    // Loading is full replacement: the clock and the id counters rewind
    // with everything else.
    assert!(portal.load_snapshot(&storage, "checkpoint").unwrap());
    assert_eq!(portal.state(), &checkpoint);
    assert_eq!(portal.current_day(), 101);
    let dev_again = portal.create_player("Dev", "dev@example.com").unwrap();
    assert_eq!(dev_again, dev);
}

#[test]
fn a_missing_snapshot_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path());

    let mut portal = rich_portal();
    let before = portal.state().clone();
    assert!(!portal.load_snapshot(&storage, "never-saved").unwrap());
    assert_eq!(portal.state(), &before);
}

#[test]
fn erase_clears_memory_but_not_disk() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonFileStorage::new(dir.path());

    let mut portal = rich_portal();
    portal.save_snapshot(&storage, "backup").unwrap();
    let saved = portal.state().clone();

    portal.erase();
    assert!(portal.player_ids().is_empty());
    assert!(portal.league_ids().is_empty());
    assert_eq!(portal.current_day(), 0);

    assert!(portal.load_snapshot(&storage, "backup").unwrap());
    assert_eq!(portal.state(), &saved);
}
