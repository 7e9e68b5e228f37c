//! Per-league gameplay ledger
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::clock::EpochDay;
use crate::player::PlayerId;

/// A player's score state for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Score {
    /// Gameplay reported, final score not yet registered.
    Pending,
    /// Registered (or voided-to-zero) score.
    Scored(u32),
}

impl Score {
    /// Numeric value used by aggregation; pending scores count as 0.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::Pending => 0,
            Self::Scored(points) => points,
        }
    }
}

/// One (day, player) cell of the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub score: Score,
    /// `None` when the player never filed a report (a results-only record).
    /// Anonymization blanks authored reports to `Some("")`, preserving the
    /// fact of participation.
    pub report: Option<String>,
}

impl GameRecord {
    /// A record created by results registration without any player report.
    #[must_use]
    pub const fn results_only() -> Self {
        Self {
            score: Score::Pending,
            report: None,
        }
    }
}

/// All records for a single day, plus the day's locking flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySheet {
    /// Set when results were registered or the day was voided; a finalized
    /// day no longer accepts reports.
    pub finalized: bool,
    /// Permanent lock; a voided day is forever frozen at zero scores.
    pub voided: bool,
    pub records: BTreeMap<PlayerId, GameRecord>,
}

/// The day-keyed ledger of one league.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSheet {
    days: BTreeMap<EpochDay, DaySheet>,
}

impl ScoreSheet {
    #[must_use]
    pub fn day(&self, day: EpochDay) -> Option<&DaySheet> {
        self.days.get(&day)
    }

    #[must_use]
    pub fn record(&self, day: EpochDay, player: PlayerId) -> Option<&GameRecord> {
        self.days.get(&day).and_then(|sheet| sheet.records.get(&player))
    }

    /// The report text for a (day, player) cell, "" when none was filed.
    #[must_use]
    pub fn report_text(&self, day: EpochDay, player: PlayerId) -> &str {
        self.record(day, player)
            .and_then(|record| record.report.as_deref())
            .unwrap_or("")
    }

    /// The aggregation value for a (day, player) cell; absent and pending
    /// records contribute 0.
    #[must_use]
    pub fn score_for(&self, day: EpochDay, player: PlayerId) -> u32 {
        self.record(day, player)
            .map_or(0, |record| record.score.points())
    }

    #[must_use]
    pub fn is_finalized(&self, day: EpochDay) -> bool {
        self.days.get(&day).is_some_and(|sheet| sheet.finalized)
    }

    #[must_use]
    pub fn is_voided(&self, day: EpochDay) -> bool {
        self.days.get(&day).is_some_and(|sheet| sheet.voided)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Days within the inclusive `[first, last]` window that hold records.
    pub fn days_in(
        &self,
        first: EpochDay,
        last: EpochDay,
    ) -> impl Iterator<Item = (EpochDay, &DaySheet)> {
        self.days.range(first..=last).map(|(day, sheet)| (*day, sheet))
    }

    /// Store or replace the report text for a (day, player) cell. A fresh
    /// record starts with a pending score. Callers gate finalized and
    /// voided days before writing.
    pub fn upsert_report(&mut self, day: EpochDay, player: PlayerId, report: &str) {
        let sheet = self.days.entry(day).or_default();
        let record = sheet
            .records
            .entry(player)
            .or_insert_with(GameRecord::results_only);
        record.report = Some(report.to_string());
    }

    /// Write registered scores for the given players and close the day for
    /// ranking purposes. Reports are retained; players absent from `scores`
    /// keep whatever record they had.
    pub fn finalize_day(&mut self, day: EpochDay, scores: &[(PlayerId, u32)]) {
        let sheet = self.days.entry(day).or_default();
        for &(player, points) in scores {
            let record = sheet
                .records
                .entry(player)
                .or_insert_with(GameRecord::results_only);
            record.score = Score::Scored(points);
        }
        sheet.finalized = true;
    }

    /// Zero every listed player's score for the day and lock it for good.
    pub fn void_day(&mut self, day: EpochDay, roster: &[PlayerId]) {
        let sheet = self.days.entry(day).or_default();
        for &player in roster {
            let record = sheet
                .records
                .entry(player)
                .or_insert_with(GameRecord::results_only);
            record.score = Score::Scored(0);
        }
        sheet.voided = true;
        sheet.finalized = true;
    }

    /// Number of days on which the player filed a report. Blanked reports
    /// still count: participation is part of the ranking-table history.
    #[must_use]
    pub fn rounds_reported(&self, player: PlayerId) -> u32 {
        let count = self
            .days
            .values()
            .filter(|sheet| {
                sheet
                    .records
                    .get(&player)
                    .is_some_and(|record| record.report.is_some())
            })
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Replace every report authored by the player with empty text.
    pub fn blank_reports_of(&mut self, player: PlayerId) {
        for sheet in self.days.values_mut() {
            if let Some(record) = sheet.records.get_mut(&player) {
                if record.report.is_some() {
                    record.report = Some(String::new());
                }
            }
        }
    }

    /// Drop every record and flag; used by league reset.
    pub fn clear(&mut self) {
        self.days.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANA: PlayerId = PlayerId(1);
    const BEN: PlayerId = PlayerId(2);

    #[test]
    fn report_creates_a_pending_record() {
        let mut sheet = ScoreSheet::default();
        sheet.upsert_report(5, ANA, "three guesses");

        let record = sheet.record(5, ANA).unwrap();
        assert_eq!(record.score, Score::Pending);
        assert_eq!(sheet.report_text(5, ANA), "three guesses");
        assert_eq!(sheet.score_for(5, ANA), 0);
        assert!(!sheet.is_finalized(5));
    }

    #[test]
    fn finalize_scores_and_keeps_reports() {
        let mut sheet = ScoreSheet::default();
        sheet.upsert_report(5, ANA, "three guesses");
        sheet.finalize_day(5, &[(ANA, 10), (BEN, 20)]);

        assert!(sheet.is_finalized(5));
        assert!(!sheet.is_voided(5));
        assert_eq!(sheet.score_for(5, ANA), 10);
        assert_eq!(sheet.score_for(5, BEN), 20);
        assert_eq!(sheet.report_text(5, ANA), "three guesses");
        // Ben never reported; his record exists only through results.
        assert_eq!(sheet.record(5, BEN).unwrap().report, None);
    }

    #[test]
    fn void_zeroes_everyone_and_locks() {
        let mut sheet = ScoreSheet::default();
        sheet.finalize_day(7, &[(ANA, 33)]);
        sheet.void_day(7, &[ANA, BEN]);

        assert!(sheet.is_voided(7));
        assert!(sheet.is_finalized(7));
        assert_eq!(sheet.score_for(7, ANA), 0);
        assert_eq!(sheet.score_for(7, BEN), 0);
    }

    #[test]
    fn blanking_keeps_participation_visible() {
        let mut sheet = ScoreSheet::default();
        sheet.upsert_report(1, ANA, "a");
        sheet.upsert_report(2, ANA, "b");
        sheet.finalize_day(3, &[(ANA, 4)]);

        sheet.blank_reports_of(ANA);

        assert_eq!(sheet.report_text(1, ANA), "");
        assert_eq!(sheet.record(1, ANA).unwrap().report, Some(String::new()));
        // Day 3 had no authored report and stays that way.
        assert_eq!(sheet.record(3, ANA).unwrap().report, None);
        assert_eq!(sheet.rounds_reported(ANA), 2);
    }

    #[test]
    fn days_in_respects_bounds() {
        let mut sheet = ScoreSheet::default();
        for day in [1, 5, 9] {
            sheet.upsert_report(day, ANA, "x");
        }
        let seen: Vec<EpochDay> = sheet.days_in(2, 9).map(|(day, _)| day).collect();
        assert_eq!(seen, vec![5, 9]);
    }
}
