mod frame;
mod null_renderer;
mod primitives;

pub use frame::{AxisKind, AxisLabel, LegendEntry, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, DrawingPrimitive, Fill, GradientStop, Stroke, TextHAlign, TextPrimitive,
};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame` only after the whole
/// geometry pass succeeded, so a failed pass never leaves a half-drawn chart.
pub trait Renderer {
    /// Whether the drawing surface can accept a frame right now.
    fn surface_ready(&self) -> bool {
        true
    }

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
