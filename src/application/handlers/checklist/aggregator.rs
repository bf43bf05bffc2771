//! ChecklistAggregator - Fetches checklists and computes completion stats.
//!
//! Also runs the fan-outs behind seasonal and portfolio summaries, where
//! each `(property, season)` fetch is an isolated cell: one failure zeroes
//! that cell and nothing else.

use std::sync::Arc;

use futures::future::join_all;

use super::errors::ChecklistError;
use super::normalize::normalize_checklist_payload;
use crate::domain::checklist::{
    ChecklistStats, ChecklistView, PortfolioSummary, Season, SeasonalSummary,
};
use crate::domain::foundation::PropertyId;
use crate::ports::ChecklistApi;

/// Read side of the checklist engine.
#[derive(Clone)]
pub struct ChecklistAggregator {
    api: Arc<dyn ChecklistApi>,
}

impl ChecklistAggregator {
    pub fn new(api: Arc<dyn ChecklistApi>) -> Self {
        Self { api }
    }

    /// Loads the view for one property and season.
    ///
    /// On failure the caller gets `FetchFailed`; `ChecklistView::empty(season)`
    /// is the view to display alongside it.
    pub async fn fetch_checklist(
        &self,
        property_id: &PropertyId,
        season: Season,
    ) -> Result<ChecklistView, ChecklistError> {
        tracing::debug!(%property_id, %season, "Fetching checklist");

        let payload = self
            .api
            .get_checklist(property_id, season)
            .await
            .map_err(|e| {
                tracing::error!(%property_id, %season, error = %e, "Checklist fetch failed");
                ChecklistError::fetch_failed(season, e)
            })?;

        let items = normalize_checklist_payload(&payload, property_id, season);
        let view = ChecklistView::new(season, items);
        tracing::debug!(
            %property_id,
            %season,
            total = view.stats().total_items,
            completed = view.stats().completed_items,
            "Checklist loaded"
        );
        Ok(view)
    }

    /// Fetches all four seasons concurrently.
    ///
    /// A failed season reports zeroed stats and is listed in `failed_seasons`.
    pub async fn fetch_all_seasons_summary(&self, property_id: &PropertyId) -> SeasonalSummary {
        let results = join_all(
            Season::ALL
                .iter()
                .map(|season| self.season_stats(property_id, *season)),
        )
        .await;

        let mut summary = SeasonalSummary::default();
        for (season, result) in Season::ALL.iter().zip(results) {
            match result {
                Some(stats) => summary.set(*season, stats),
                None => summary.mark_failed(*season),
            }
        }
        summary
    }

    /// Sums seasonal stats across properties, fetching every cell concurrently.
    ///
    /// Percentages are recomputed from the summed counts, not averaged.
    pub async fn fetch_portfolio_summary(&self, property_ids: &[PropertyId]) -> PortfolioSummary {
        let cells: Vec<(&PropertyId, Season)> = property_ids
            .iter()
            .flat_map(|property_id| Season::ALL.iter().map(move |season| (property_id, *season)))
            .collect();

        let results = join_all(
            cells
                .iter()
                .map(|(property_id, season)| self.season_stats(property_id, *season)),
        )
        .await;

        let mut portfolio = PortfolioSummary {
            property_count: property_ids.len(),
            ..PortfolioSummary::default()
        };
        for ((property_id, season), result) in cells.into_iter().zip(results) {
            match result {
                Some(stats) => portfolio.seasons.accumulate(season, &stats),
                None => portfolio.failed_cells.push((property_id.clone(), season)),
            }
        }
        if !portfolio.failed_cells.is_empty() {
            tracing::warn!(
                failed = portfolio.failed_cells.len(),
                properties = property_ids.len(),
                "Portfolio summary is partial"
            );
        }
        portfolio
    }

    async fn season_stats(&self, property_id: &PropertyId, season: Season) -> Option<ChecklistStats> {
        match self.fetch_checklist(property_id, season).await {
            Ok(view) => Some(view.stats()),
            Err(e) => {
                tracing::warn!(%property_id, %season, error = %e, "Counting season as empty");
                None
            }
        }
    }
}
