//! Chart projections over a reshaped history.
//!
//! The category view stacks every category that is non-zero somewhere. The
//! instrument view draws a selection of instrument keys as separate lines;
//! the selection defaults to the largest holdings at the latest point and can
//! be overridden by an external one-shot focus request.

use crate::domain::Decimal;
use crate::engine::history::ReshapedHistory;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Category,
    Instrument,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "category" => Ok(ViewMode::Category),
            "instrument" | "individual" => Ok(ViewMode::Instrument),
            other => Err(format!("must be category or instrument, got {}", other)),
        }
    }
}

/// Series to draw for the current view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartProjection {
    pub view_mode: ViewMode,
    pub series_keys: Vec<String>,
    /// Per point, the sum of the stacked category series. Empty in instrument view.
    pub spot_totals: Vec<Decimal>,
}

/// Category keys with a non-zero value on at least one point.
pub fn active_category_keys(history: &ReshapedHistory) -> Vec<String> {
    history
        .category_keys
        .iter()
        .filter(|k| {
            history
                .processed_points
                .iter()
                .any(|p| !p.get(k.as_str()).is_zero())
        })
        .cloned()
        .collect()
}

/// The `n` instrument keys with the largest value at the latest point.
///
/// Ties keep discovery order.
pub fn top_instruments(history: &ReshapedHistory, n: usize) -> Vec<String> {
    let mut keys = history.instrument_keys.clone();
    if let Some(latest) = history.latest() {
        keys.sort_by(|a, b| latest.get(b).cmp(&latest.get(a)));
    }
    keys.truncate(n);
    keys
}

/// View state carried between reshaping passes.
///
/// `user_selection` is the caller's multi-selection; `focus_request` is a
/// one-shot request that wins over it on the next [`TrendSelection::project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendSelection {
    pub view_mode: ViewMode,
    pub user_selection: Option<Vec<String>>,
    pub focus_request: Option<String>,
    top_n: usize,
}

impl Default for TrendSelection {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N)
    }
}

impl TrendSelection {
    pub fn new(top_n: usize) -> Self {
        Self {
            view_mode: ViewMode::Category,
            user_selection: None,
            focus_request: None,
            top_n,
        }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    pub fn request_focus(&mut self, key: impl Into<String>) {
        self.focus_request = Some(key.into());
    }

    /// Replace the selection with a single key.
    pub fn select_single_instrument(&mut self, key: impl Into<String>) {
        self.user_selection = Some(vec![key.into()]);
    }

    /// Add or remove a key, starting from the default selection if none is set.
    ///
    /// Removing the last key reverts to the default selection.
    pub fn toggle_instrument(&mut self, key: &str, history: &ReshapedHistory) {
        let mut selection = self.selected_instruments(history);
        match selection.iter().position(|k| k == key) {
            Some(idx) => {
                selection.remove(idx);
            }
            None => selection.push(key.to_string()),
        }
        self.user_selection = if selection.is_empty() {
            None
        } else {
            Some(selection)
        };
    }

    /// Instrument keys currently selected, restricted to keys the history has.
    pub fn selected_instruments(&self, history: &ReshapedHistory) -> Vec<String> {
        match self.user_selection.as_ref().filter(|s| !s.is_empty()) {
            Some(selection) => selection
                .iter()
                .filter(|k| history.instrument_keys.contains(k))
                .cloned()
                .collect(),
            None => top_instruments(history, self.top_n),
        }
    }

    /// Apply any pending focus request, then compute the series to draw.
    pub fn project(&mut self, history: &ReshapedHistory) -> ChartProjection {
        if let Some(focus) = self.focus_request.take() {
            if history.instrument_keys.contains(&focus) {
                self.view_mode = ViewMode::Instrument;
                self.user_selection = Some(vec![focus]);
            } else {
                debug!(key = %focus, "Ignoring focus request for unknown instrument");
            }
        }

        match self.view_mode {
            ViewMode::Category => {
                let series_keys = active_category_keys(history);
                let spot_totals: Vec<Decimal> = history
                    .processed_points
                    .iter()
                    .map(|p| series_keys.iter().map(|k| p.get(k)).sum::<Decimal>())
                    .collect();
                ChartProjection {
                    view_mode: ViewMode::Category,
                    series_keys,
                    spot_totals,
                }
            }
            ViewMode::Instrument => ChartProjection {
                view_mode: ViewMode::Instrument,
                series_keys: self.selected_instruments(history),
                spot_totals: Vec::new(),
            },
        }
    }
}
