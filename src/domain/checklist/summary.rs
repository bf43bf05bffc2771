//! Season-by-season and portfolio-level completion summaries.

use serde::Serialize;

use super::{ChecklistStats, Season};
use crate::domain::foundation::PropertyId;

/// Stats for each of the four seasons of one property (or of many, summed).
///
/// A season whose fetch failed holds zeroed stats and is listed in
/// `failed_seasons`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeasonalSummary {
    pub spring: ChecklistStats,
    pub summer: ChecklistStats,
    pub fall: ChecklistStats,
    pub winter: ChecklistStats,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_seasons: Vec<Season>,
}

impl SeasonalSummary {
    pub fn get(&self, season: Season) -> ChecklistStats {
        match season {
            Season::Spring => self.spring,
            Season::Summer => self.summer,
            Season::Fall => self.fall,
            Season::Winter => self.winter,
        }
    }

    pub fn set(&mut self, season: Season, stats: ChecklistStats) {
        match season {
            Season::Spring => self.spring = stats,
            Season::Summer => self.summer = stats,
            Season::Fall => self.fall = stats,
            Season::Winter => self.winter = stats,
        }
    }

    /// Adds `stats` to whatever the season already holds.
    pub fn accumulate(&mut self, season: Season, stats: &ChecklistStats) {
        let combined = self.get(season).combine(stats);
        self.set(season, combined);
    }

    pub fn mark_failed(&mut self, season: Season) {
        if !self.failed_seasons.contains(&season) {
            self.failed_seasons.push(season);
            self.failed_seasons.sort();
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failed_seasons.is_empty()
    }

    /// All four seasons summed.
    pub fn overall(&self) -> ChecklistStats {
        Season::ALL
            .iter()
            .fold(ChecklistStats::EMPTY, |acc, season| acc.combine(&self.get(*season)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Season, ChecklistStats)> + '_ {
        Season::ALL.iter().map(move |season| (*season, self.get(*season)))
    }
}

/// Seasonal stats summed across several properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PortfolioSummary {
    pub property_count: usize,
    pub seasons: SeasonalSummary,
    /// `(property, season)` cells whose fetch failed and counted as zero.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_cells: Vec<(PropertyId, Season)>,
}

impl PortfolioSummary {
    pub fn season(&self, season: Season) -> ChecklistStats {
        self.seasons.get(season)
    }
}
