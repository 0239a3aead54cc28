use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingPrimitive, TextPrimitive};

/// Which axis an axis label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisKind {
    /// Category labels along the bottom edge.
    Category,
    /// Value tick labels along the left edge.
    Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub axis: AxisKind,
    pub label: TextPrimitive,
}

/// Legend row: label text next to a color swatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: TextPrimitive,
    pub swatch_color: Color,
    pub swatch_x: f64,
    pub swatch_y: f64,
    pub swatch_size_px: f64,
}

/// Backend-agnostic scene for one chart draw pass.
///
/// `primitives` are translated by `origin` before drawing; the title, legend
/// and axis labels are already in surface coordinates and may fall outside
/// the surface bounds (left of it, under it, above it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub origin: (f64, f64),
    pub primitives: Vec<DrawingPrimitive>,
    pub title: Option<TextPrimitive>,
    pub legend: Vec<LegendEntry>,
    pub axis_labels: Vec<AxisLabel>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            origin: (0.0, 0.0),
            primitives: Vec::new(),
            title: None,
            legend: Vec::new(),
            axis_labels: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.origin = (x, y);
        self
    }

    #[must_use]
    pub fn with_primitives(mut self, primitives: Vec<DrawingPrimitive>) -> Self {
        self.primitives = primitives;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: TextPrimitive) -> Self {
        self.title = Some(title);
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: Vec<LegendEntry>) -> Self {
        self.legend = legend;
        self
    }

    #[must_use]
    pub fn with_axis_labels(mut self, labels: Vec<AxisLabel>) -> Self {
        self.axis_labels = labels;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for primitive in &self.primitives {
            primitive.validate()?;
        }
        if let Some(title) = &self.title {
            title.validate()?;
        }
        for entry in &self.legend {
            entry.label.validate()?;
            entry.swatch_color.validate()?;
        }
        for axis_label in &self.axis_labels {
            axis_label.label.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn label_count(&self) -> usize {
        usize::from(self.title.is_some()) + self.legend.len() + self.axis_labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty() && self.label_count() == 0
    }
}
