//! One full derivation pass over a fetched snapshot.

use crate::domain::{HistorySource, Position, RawSnapshot};
use crate::engine::{
    group_positions, normalize_records, reshape_history, ChartProjection, GroupedPositions,
    Grouping, PortfolioSummary, ReshapedHistory, TrendSelection,
};
use serde::Serialize;
use tracing::debug;

/// Everything the dashboard renders, rebuilt from scratch per snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub positions: Vec<Position>,
    pub summary: PortfolioSummary,
    pub grouped: GroupedPositions,
    pub history: ReshapedHistory,
    pub chart: ChartProjection,
}

impl Dashboard {
    /// Normalize, aggregate, group, reshape and project, in that order.
    ///
    /// `selection` is updated in place: a pending focus request is consumed.
    pub fn build(
        snapshot: &RawSnapshot,
        grouping: Grouping,
        selection: &mut TrendSelection,
    ) -> Self {
        let positions = normalize_records(&snapshot.assets);
        let summary = PortfolioSummary::from_positions(&positions);
        let grouped = group_positions(&positions, grouping);
        let history = reshape_history(&snapshot.history);
        let chart = selection.project(&history);

        if snapshot.history_source == HistorySource::Legacy {
            debug!("Snapshot supplied history under the legacy field name");
        }
        debug!(
            positions = positions.len(),
            dropped = snapshot.assets.len() - positions.len(),
            history_points = history.processed_points.len(),
            "Built dashboard"
        );

        Dashboard {
            positions,
            summary,
            grouped,
            history,
            chart,
        }
    }
}
