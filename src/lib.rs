pub mod api;
pub mod config;
pub mod dashboard;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;

pub use config::Config;
pub use dashboard::Dashboard;
pub use datasource::{DataSourceError, HttpSnapshotSource, MockSnapshotSource, SnapshotSource};
pub use domain::{
    Decimal, HistorySource, InstrumentType, Position, ProcessedPoint, RawSnapshot, SnapshotError,
};
pub use engine::{
    GroupedPositions, Grouping, PortfolioSummary, PositionGroup, ReshapedHistory, TrendSelection,
    ViewMode,
};
pub use error::AppError;
