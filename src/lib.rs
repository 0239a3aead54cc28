//! table-chart-rs: chart geometry for small tabular datasets.
//!
//! Rows of numbers extracted from a table or a JSON payload are aggregated,
//! scaled onto a drawing surface and turned into backend-agnostic drawing
//! primitives plus the title, legend and axis labels placed around them.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ApplyStatus, ChartConfig, ChartEngine, ChartType, RetryPolicy};
pub use error::{ChartError, ChartResult};
