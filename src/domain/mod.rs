//! Domain types for the dashboard engine.
//!
//! This module provides:
//! - Lossless numeric handling via Decimal wrapper
//! - The closed InstrumentType classification
//! - Position records and reshaped history rows
//! - Snapshot payload validation

pub mod decimal;
pub mod history;
pub mod instrument;
pub mod position;
pub mod snapshot;

pub use decimal::Decimal;
pub use history::{ProcessedPoint, DATE_KEY, LEGACY_VALUE_KEY, NET_WORTH_KEY};
pub use instrument::{InstrumentType, UnknownInstrumentType};
pub use position::Position;
pub use snapshot::{HistorySource, RawSnapshot, SnapshotError};
