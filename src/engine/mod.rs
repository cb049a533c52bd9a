//! Pure computation engine(s) for positions, totals and history series.
//!
//! Everything here is synchronous and free of I/O; callers sequence
//! normalize → aggregate → group → reshape once per fetched snapshot.

pub mod aggregator;
pub mod coerce;
pub mod grouper;
pub mod history;
pub mod normalizer;
pub mod trend;

pub use aggregator::{category_breakdown, CategorySlice, PortfolioSummary};
pub use coerce::{coerce_field, coerce_number, coerce_strict};
pub use grouper::{group_positions, GroupedPositions, Grouping, PositionGroup, UNCLASSIFIED};
pub use history::{reshape_history, HistoryStatus, ReshapedHistory};
pub use normalizer::{normalize_record, normalize_records};
pub use trend::{
    active_category_keys, top_instruments, ChartProjection, TrendSelection, ViewMode,
    DEFAULT_TOP_N,
};
