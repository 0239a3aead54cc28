mod chart_config;
mod engine;
mod json_contract;
pub mod label_layout;
mod surface_retry;

pub use chart_config::{ChartConfig, ChartType, DEFAULT_PALETTE};
pub use engine::ChartEngine;
pub use json_contract::{FRAME_JSON_SCHEMA_V1, RenderFrameJsonContractV1};
pub use label_layout::{FrameLabels, LabelLayoutConfig, format_tick, layout_frame_labels};
pub use surface_retry::{ApplyStatus, RetryPolicy};
