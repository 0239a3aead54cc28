use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests catch invalid geometry, and its
/// surface can be held "not ready" to exercise deferred data application.
#[derive(Debug)]
pub struct NullRenderer {
    pub surface_ready: bool,
    pub render_count: usize,
    pub last_primitive_count: usize,
    pub last_label_count: usize,
}

impl NullRenderer {
    /// Renderer whose surface reports not ready until `surface_ready` is set.
    #[must_use]
    pub fn not_ready() -> Self {
        Self {
            surface_ready: false,
            ..Self::default()
        }
    }
}

impl Default for NullRenderer {
    fn default() -> Self {
        Self {
            surface_ready: true,
            render_count: 0,
            last_primitive_count: 0,
            last_label_count: 0,
        }
    }
}

impl Renderer for NullRenderer {
    fn surface_ready(&self) -> bool {
        self.surface_ready
    }

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.render_count += 1;
        self.last_primitive_count = frame.primitives.len();
        self.last_label_count = frame.label_count();
        Ok(())
    }
}
