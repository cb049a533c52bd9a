use crate::api::AppState;
use crate::dashboard::Dashboard;
use crate::engine::{
    group_positions, normalize_records, reshape_history, ChartProjection, GroupedPositions,
    Grouping, PortfolioSummary, ReshapedHistory, TrendSelection, ViewMode,
};
use crate::error::AppError;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    /// `none`, `name` or `owner`; defaults to the configured grouping.
    pub grouping: Option<String>,
    /// `category` or `instrument`.
    pub view: Option<String>,
    /// Comma-separated instrument keys to draw in instrument view.
    pub keys: Option<String>,
    /// Instrument to focus; switches to instrument view when it exists.
    pub focus: Option<String>,
}

impl DashboardQuery {
    fn grouping(&self, default: Grouping) -> Result<Grouping, AppError> {
        match self.grouping.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::BadRequest(format!("Invalid grouping: {}", e))),
            None => Ok(default),
        }
    }

    fn selection(&self, top_n: usize) -> Result<TrendSelection, AppError> {
        let mut selection = TrendSelection::new(top_n);

        if let Some(raw) = self.view.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let mode: ViewMode = raw
                .parse()
                .map_err(|e| AppError::BadRequest(format!("Invalid view: {}", e)))?;
            selection.set_view_mode(mode);
        }

        if let Some(raw) = self.keys.as_deref() {
            let keys: Vec<String> = raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !keys.is_empty() {
                selection.user_selection = Some(keys);
            }
        }

        if let Some(focus) = self.focus.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            selection.request_focus(focus);
        }

        Ok(selection)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub history: ReshapedHistory,
    pub chart: ChartProjection,
}

pub async fn get_dashboard(
    Query(params): Query<DashboardQuery>,
    State(state): State<AppState>,
) -> Result<Json<Dashboard>, AppError> {
    let grouping = params.grouping(state.config.default_grouping)?;
    let mut selection = params.selection(state.config.trend_top_n)?;

    let snapshot = state.load_snapshot().await?;
    Ok(Json(Dashboard::build(&snapshot, grouping, &mut selection)))
}

pub async fn get_positions(
    Query(params): Query<DashboardQuery>,
    State(state): State<AppState>,
) -> Result<Json<GroupedPositions>, AppError> {
    let grouping = params.grouping(state.config.default_grouping)?;

    let snapshot = state.load_snapshot().await?;
    let positions = normalize_records(&snapshot.assets);
    Ok(Json(group_positions(&positions, grouping)))
}

pub async fn get_summary(State(state): State<AppState>) -> Result<Json<PortfolioSummary>, AppError> {
    let snapshot = state.load_snapshot().await?;
    let positions = normalize_records(&snapshot.assets);
    Ok(Json(PortfolioSummary::from_positions(&positions)))
}

pub async fn get_history(
    Query(params): Query<DashboardQuery>,
    State(state): State<AppState>,
) -> Result<Json<HistoryResponse>, AppError> {
    let mut selection = params.selection(state.config.trend_top_n)?;

    let snapshot = state.load_snapshot().await?;
    let history = reshape_history(&snapshot.history);
    let chart = selection.project(&history);
    Ok(Json(HistoryResponse { history, chart }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_defaults_when_blank() {
        let query = DashboardQuery {
            grouping: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.grouping(Grouping::Owner).unwrap(), Grouping::Owner);
    }

    #[test]
    fn test_invalid_view_is_bad_request() {
        let query = DashboardQuery {
            view: Some("pie".to_string()),
            ..Default::default()
        };
        assert!(matches!(query.selection(5), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_selection_from_query() {
        let query = DashboardQuery {
            view: Some("instrument".to_string()),
            keys: Some("Toyota, Sony,,".to_string()),
            focus: Some("Nintendo".to_string()),
            ..Default::default()
        };
        let selection = query.selection(3).unwrap();
        assert_eq!(selection.view_mode, ViewMode::Instrument);
        assert_eq!(
            selection.user_selection,
            Some(vec!["Toyota".to_string(), "Sony".to_string()])
        );
        assert_eq!(selection.focus_request.as_deref(), Some("Nintendo"));
        assert_eq!(selection.top_n(), 3);
    }
}
