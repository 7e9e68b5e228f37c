use scorebook_core::{GameType, LeagueId, Period, PlayerId, Portal, PortalError, Status};

fn league_started_on_day_100(player_count: usize) -> (Portal, LeagueId, Vec<PlayerId>) {
    let mut portal = Portal::new();
    let names = ["Ana", "Ben", "Cleo", "Dev"];
    let ids: Vec<PlayerId> = names
        .iter()
        .take(player_count)
        .map(|name| {
            let email = format!("{}@example.com", name.to_lowercase());
            portal.create_player(name, &email).unwrap()
        })
        .collect();
    let league = portal
        .create_league(ids[0], "dice-nights", GameType::DiceRoll)
        .unwrap();
    for (player, name) in ids.iter().zip(names.iter()).skip(1) {
        let email = format!("{}@example.com", name.to_lowercase());
        portal.invite_player_to_league(league, &email).unwrap();
        portal.accept_invite_to_league(league, *player).unwrap();
    }
    portal.set_current_day(100).unwrap();
    portal.start_league(league).unwrap();
    (portal, league, ids)
}

#[test]
fn one_day_from_reports_to_ranking() {
    let (mut portal, league, ids) = league_started_on_day_100(2);
    let (ana, ben) = (ids[0], ids[1]);

    // Both play and report; the day is live but unsettled.
    portal.register_game_report(100, league, ana, "two rounds in").unwrap();
    portal.register_game_report(100, league, ben, "lucky streak").unwrap();
    assert_eq!(
        portal.period_status(league, Period::Day, 100).unwrap(),
        Status::InProgress
    );
    assert_eq!(portal.day_points(league, 100).unwrap(), Vec::<u32>::new());

    // The operator registers the final scores in roster order.
    portal.register_day_results(100, league, &[10, 20]).unwrap();

    assert_eq!(
        portal.period_status(league, Period::Day, 100).unwrap(),
        Status::Closed
    );
    assert_eq!(portal.day_points(league, 100).unwrap(), vec![10, 20]);
    assert_eq!(
        portal.period_scores(league, Period::Day, 100).unwrap(),
        vec![10, 20]
    );
    assert_eq!(
        portal.period_ranking(league, Period::Day, 100).unwrap(),
        vec![2, 1]
    );
}

#[test]
fn week_blocks_sum_only_their_own_days() {
    let (mut portal, league, _) = league_started_on_day_100(2);

    portal.register_day_results(100, league, &[10, 20]).unwrap();
    portal.register_day_results(101, league, &[5, 1]).unwrap();
    // First day of the second week.
    portal.register_day_results(107, league, &[100, 100]).unwrap();

    assert_eq!(
        portal.period_scores(league, Period::Week, 100).unwrap(),
        vec![15, 21]
    );
    assert_eq!(
        portal.period_scores(league, Period::Week, 106).unwrap(),
        vec![15, 21]
    );
    assert_eq!(
        portal.period_ranking(league, Period::Week, 101).unwrap(),
        vec![2, 1]
    );
    assert_eq!(
        portal.period_scores(league, Period::Week, 107).unwrap(),
        vec![100, 100]
    );
    assert_eq!(
        portal.period_ranking(league, Period::Week, 107).unwrap(),
        vec![1, 1]
    );
}

#[test]
fn a_week_closes_by_finalization_or_by_calendar() {
    let (mut portal, league, _) = league_started_on_day_100(2);

    // Scores for every day of the week, registered as the days come up.
    for day in 100..107 {
        portal.set_current_day(day).unwrap();
        portal.register_day_results(day, league, &[1, 2]).unwrap();
    }
    // The calendar still reads day 106, but there is nothing left to play.
    assert_eq!(
        portal.period_status(league, Period::Week, 100).unwrap(),
        Status::Closed
    );

    // Week two: one day played, the rest skipped. Time closes it instead.
    portal.register_day_results(107, league, &[3, 3]).unwrap();
    assert_eq!(
        portal.period_status(league, Period::Week, 107).unwrap(),
        Status::InProgress
    );
    portal.set_current_day(114).unwrap();
    assert_eq!(
        portal.period_status(league, Period::Week, 107).unwrap(),
        Status::Closed
    );
    assert_eq!(
        portal.period_scores(league, Period::Week, 107).unwrap(),
        vec![3, 3]
    );
}

#[test]
fn untouched_periods_stay_pending_forever() {
    let (mut portal, league, _) = league_started_on_day_100(2);
    portal.set_current_day(500).unwrap();

    for period in [Period::Day, Period::Week, Period::Month, Period::Year] {
        assert_eq!(
            portal.period_status(league, period, 150).unwrap(),
            Status::Pending
        );
        assert_eq!(portal.period_scores(league, period, 150).unwrap(), Vec::<u32>::new());
        assert_eq!(portal.period_ranking(league, period, 150).unwrap(), Vec::<u32>::new());
    }
}

#[test]
fn month_and_year_blocks_anchor_at_the_start_day() {
    let (mut portal, league, _) = league_started_on_day_100(2);

    portal.register_day_results(100, league, &[1, 0]).unwrap();
    // Last day of the first month block and first day of the second.
    portal.register_day_results(129, league, &[2, 0]).unwrap();
    portal.register_day_results(130, league, &[4, 0]).unwrap();

    assert_eq!(
        portal.period_scores(league, Period::Month, 115).unwrap(),
        vec![3, 0]
    );
    assert_eq!(
        portal.period_scores(league, Period::Month, 130).unwrap(),
        vec![4, 0]
    );

    // The year block swallows both months.
    assert_eq!(
        portal.period_scores(league, Period::Year, 400).unwrap(),
        vec![7, 0]
    );
}

#[test]
fn ties_share_a_dense_position() {
    let (mut portal, league, _) = league_started_on_day_100(3);
    portal.register_day_results(100, league, &[50, 50, 30]).unwrap();
    assert_eq!(
        portal.period_ranking(league, Period::Day, 100).unwrap(),
        vec![1, 1, 2]
    );
}

#[test]
fn rankings_accumulate_across_a_week() {
    let (mut portal, league, _) = league_started_on_day_100(4);
    portal.register_day_results(100, league, &[5, 10, 5, 20]).unwrap();
    portal.register_day_results(101, league, &[0, 20, 0, 30]).unwrap();

    assert_eq!(
        portal.period_scores(league, Period::Week, 101).unwrap(),
        vec![5, 30, 5, 50]
    );
    assert_eq!(
        portal.period_ranking(league, Period::Week, 101).unwrap(),
        vec![3, 2, 3, 1]
    );
}

#[test]
fn inactive_and_deactivated_seats_keep_their_rows() {
    let (mut portal, league, ids) = league_started_on_day_100(3);
    let (ben, cleo) = (ids[1], ids[2]);
    portal.register_day_results(100, league, &[10, 30, 20]).unwrap();

    portal.set_league_member_active(league, ben, false).unwrap();
    portal.deactivate_player(cleo).unwrap();

    // Three seats in, three rows out, scores intact.
    assert_eq!(
        portal.period_scores(league, Period::Week, 100).unwrap(),
        vec![10, 30, 20]
    );
    assert_eq!(
        portal.period_ranking(league, Period::Week, 100).unwrap(),
        vec![3, 1, 2]
    );
}

#[test]
fn period_queries_respect_the_playable_span() {
    let (mut portal, league, _) = league_started_on_day_100(2);
    assert!(matches!(
        portal.period_status(league, Period::Week, 99),
        Err(PortalError::InvalidDate { .. })
    ));

    portal.set_current_day(110).unwrap();
    portal.close_league(league).unwrap();
    assert!(matches!(
        portal.period_scores(league, Period::Day, 111),
        Err(PortalError::InvalidDate { .. })
    ));
    // The close day itself still answers.
    assert!(portal.period_status(league, Period::Day, 110).is_ok());
}

#[test]
fn voided_days_count_as_zero_in_period_totals() {
    let (mut portal, league, _) = league_started_on_day_100(2);
    portal.register_day_results(100, league, &[10, 20]).unwrap();
    portal.register_day_results(101, league, &[7, 2]).unwrap();
    portal.void_day_results(100, league).unwrap();

    assert_eq!(
        portal.period_scores(league, Period::Week, 100).unwrap(),
        vec![7, 2]
    );
    // A voided day still counts as gameplay, so the day block reads
    // closed rather than pending.
    assert_eq!(
        portal.period_status(league, Period::Day, 100).unwrap(),
        Status::Closed
    );
    assert_eq!(portal.day_points(league, 100).unwrap(), vec![0, 0]);
}
