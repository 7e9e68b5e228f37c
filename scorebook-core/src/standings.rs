//! Temporal aggregation and ranking over league ledgers
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::clock::EpochDay;
use crate::error::PortalError;
use crate::league::{League, Status};

/// Ranking window granularity. Weeks, months and years are fixed-length
/// blocks anchored at the league start day, not calendar units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    #[must_use]
    pub const fn span_days(self) -> u32 {
        match self {
            Self::Day => 1,
            Self::Week => 7,
            Self::Month => 30,
            Self::Year => 365,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inclusive day bounds of the period block containing `day`, for a league
/// whose play began on `start`. Day 0 of every granularity is the start day
/// itself.
#[must_use]
pub const fn period_block(start: EpochDay, period: Period, day: EpochDay) -> (EpochDay, EpochDay) {
    let len = period.span_days();
    let index = day.saturating_sub(start) / len;
    let first = start.saturating_add(index * len);
    (first, first.saturating_add(len - 1))
}

fn block_of(
    league: &League,
    period: Period,
    day: EpochDay,
) -> Result<(EpochDay, EpochDay), PortalError> {
    let start = league.check_day_in_span(day)?;
    Ok(period_block(start, period, day))
}

fn block_status(league: &League, first: EpochDay, last: EpochDay, today: EpochDay) -> Status {
    let any_active_play = league.sheet.days_in(first, last).any(|(_, sheet)| {
        sheet
            .records
            .keys()
            .any(|player| league.member_is_active(*player))
    });
    if !any_active_play {
        // A block nobody active touched stays pending, even once the
        // calendar has moved past it.
        return Status::Pending;
    }
    let every_day_finalized = (first..=last).all(|day| league.sheet.is_finalized(day));
    if every_day_finalized || today > last {
        return Status::Closed;
    }
    Status::InProgress
}

/// Status of the period block containing `day`.
///
/// # Errors
///
/// [`PortalError::InvalidDate`] when `day` is outside the league's playable
/// span.
pub fn period_status(
    league: &League,
    period: Period,
    day: EpochDay,
    today: EpochDay,
) -> Result<Status, PortalError> {
    let (first, last) = block_of(league, period, day)?;
    Ok(block_status(league, first, last, today))
}

/// Accumulated points per roster seat for the block containing `day`, in
/// seat order. Empty while the block is pending; pending and absent records
/// count as zero.
///
/// # Errors
///
/// [`PortalError::InvalidDate`] when `day` is outside the league's playable
/// span.
pub fn period_scores(
    league: &League,
    period: Period,
    day: EpochDay,
    today: EpochDay,
) -> Result<Vec<u32>, PortalError> {
    let (first, last) = block_of(league, period, day)?;
    if block_status(league, first, last, today) == Status::Pending {
        return Ok(Vec::new());
    }
    let totals = league
        .roster
        .iter()
        .map(|entry| {
            league
                .sheet
                .days_in(first, last)
                .fold(0u32, |acc, (_, sheet)| {
                    let points = sheet
                        .records
                        .get(&entry.player)
                        .map_or(0, |record| record.score.points());
                    acc.saturating_add(points)
                })
        })
        .collect();
    Ok(totals)
}

/// Dense positions per roster seat for the block containing `day`, in seat
/// order. Empty while the block is pending.
///
/// # Errors
///
/// [`PortalError::InvalidDate`] when `day` is outside the league's playable
/// span.
pub fn period_ranking(
    league: &League,
    period: Period,
    day: EpochDay,
    today: EpochDay,
) -> Result<Vec<u32>, PortalError> {
    Ok(dense_ranking(&period_scores(league, period, day, today)?))
}

/// Registered scores per roster seat for one day, in seat order. Empty
/// until the day's results are finalized.
///
/// # Errors
///
/// [`PortalError::InvalidDate`] when `day` is outside the league's playable
/// span.
pub fn day_points(league: &League, day: EpochDay) -> Result<Vec<u32>, PortalError> {
    league.check_day_in_span(day)?;
    if !league.sheet.is_finalized(day) {
        return Ok(Vec::new());
    }
    Ok(league
        .roster
        .iter()
        .map(|entry| league.sheet.score_for(day, entry.player))
        .collect())
}

/// Dense ranking, highest score first: ties share a position and the next
/// distinct score takes the next consecutive one, so `[50, 50, 30]` ranks
/// as `[1, 1, 2]`.
#[must_use]
pub fn dense_ranking(scores: &[u32]) -> Vec<u32> {
    let mut distinct: Vec<u32> = scores.to_vec();
    distinct.sort_unstable_by(|a, b| b.cmp(a));
    distinct.dedup();
    scores
        .iter()
        .map(|score| {
            let position = distinct.iter().position(|d| d == score).unwrap_or(0);
            u32::try_from(position + 1).unwrap_or(u32::MAX)
        })
        .collect()
}
