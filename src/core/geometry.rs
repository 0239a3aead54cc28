use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::bar_series::{project_grouped_bars, project_stacked_bars};
use crate::core::dataset::{Dataset, Row};
use crate::core::line_series::project_lines;
use crate::core::pie_series::project_pie;
use crate::core::scale::{DEFAULT_BAND_PX, ScaleRequest, TickRounding, ValueScale};
use crate::core::source::DataSource;
use crate::core::types::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingPrimitive, Stroke};

/// Chart family selected for one geometry pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartFamily {
    Line,
    Bar,
    CumulativeLine,
    CumulativeBar,
    Pie,
}

impl ChartFamily {
    #[must_use]
    pub fn is_cumulative(self) -> bool {
        matches!(self, Self::CumulativeLine | Self::CumulativeBar)
    }

    /// `true` for families drawn against category/value axes.
    #[must_use]
    pub fn has_axes(self) -> bool {
        !matches!(self, Self::Pie)
    }
}

/// Styling inputs shared by every family.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryOptions {
    /// Row colors, indexed by each row's palette slot.
    pub palette: Vec<Color>,
    pub filled: bool,
    pub gradient_fills: bool,
    pub grid_lines: bool,
    pub line_width_px: f64,
    pub band_px: f64,
    pub tick_rounding: TickRounding,
    pub pie_radius_inset_px: f64,
}

impl GeometryOptions {
    #[must_use]
    pub fn new(palette: Vec<Color>) -> Self {
        Self {
            palette,
            filled: false,
            gradient_fills: false,
            grid_lines: false,
            line_width_px: 3.0,
            band_px: DEFAULT_BAND_PX,
            tick_rounding: TickRounding::Exact,
            pie_radius_inset_px: 20.0,
        }
    }

    /// Palette color for `row`; running past the palette is an error, not a wrap.
    pub fn row_color(&self, dataset: &Dataset, row: &Row) -> ChartResult<Color> {
        let slot = row.color().unwrap_or_default();
        self.palette
            .get(slot)
            .copied()
            .ok_or(ChartError::PaletteExhausted {
                rows: dataset.row_count().max(slot.saturating_add(1)),
                colors: self.palette.len(),
            })
    }
}

/// Values are plotted on a non-negative domain; negatives sit on the baseline.
#[must_use]
pub(crate) fn plotted_value(value: f64) -> f64 {
    value.max(0.0)
}

/// Output of one geometry pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub family: ChartFamily,
    pub primitives: Vec<DrawingPrimitive>,
    pub scale: Option<ValueScale>,
    /// Horizontal distance between categories; `None` for pies and empty data.
    pub x_interval: Option<f64>,
    /// Translation the backend applies before drawing `primitives`.
    pub origin: (f64, f64),
}

/// Turns one data source into drawing primitives for one family.
///
/// Every family runs the same two phases: `compute_scale`, then `emit`.
/// Nothing is shared between passes; each builder borrows its inputs.
#[derive(Debug, Clone, Copy)]
pub struct GeometryBuilder<'a> {
    family: ChartFamily,
    source: &'a DataSource,
    options: &'a GeometryOptions,
    viewport: Viewport,
}

impl<'a> GeometryBuilder<'a> {
    #[must_use]
    pub fn new(
        family: ChartFamily,
        source: &'a DataSource,
        options: &'a GeometryOptions,
        viewport: Viewport,
    ) -> Self {
        Self {
            family,
            source,
            options,
            viewport,
        }
    }

    /// Value scale for XY families; `None` for pies and for datasets without
    /// rows or categories.
    pub fn compute_scale(&self) -> ChartResult<Option<ValueScale>> {
        if !self.family.has_axes() || self.source.dataset().is_empty() {
            return Ok(None);
        }

        let aggregates = self.source.aggregates();
        let domain_max = if self.family.is_cumulative() {
            aggregates.max_column_total
        } else {
            aggregates.max_point
        };
        let request =
            ScaleRequest::from_band_size(domain_max, self.viewport.height_px(), self.options.band_px)
                .with_rounding(self.options.tick_rounding);
        ValueScale::compute(request).map(Some)
    }

    #[must_use]
    pub fn x_interval(&self) -> Option<f64> {
        let categories = self.source.dataset().category_count();
        (self.family.has_axes() && categories > 0)
            .then(|| self.viewport.width_px() / categories as f64)
    }

    pub fn emit(&self, scale: Option<&ValueScale>) -> ChartResult<Vec<DrawingPrimitive>> {
        let dataset = self.source.dataset();
        if self.family == ChartFamily::Pie {
            return project_pie(
                dataset,
                &self.source.aggregates().row_totals,
                self.viewport,
                self.options,
            );
        }

        let (Some(scale), Some(x_interval)) = (scale, self.x_interval()) else {
            if dataset.is_empty() {
                return Ok(Vec::new());
            }
            return Err(ChartError::InvalidData(
                "xy geometry needs a value scale".to_owned(),
            ));
        };

        let mut primitives = if self.options.grid_lines {
            grid_primitives(scale, self.viewport)
        } else {
            Vec::new()
        };
        let series = match self.family {
            ChartFamily::Line => project_lines(dataset, scale, x_interval, self.options, false)?,
            ChartFamily::CumulativeLine => {
                project_lines(dataset, scale, x_interval, self.options, true)?
            }
            ChartFamily::Bar => project_grouped_bars(dataset, scale, x_interval, self.options)?,
            ChartFamily::CumulativeBar => {
                project_stacked_bars(dataset, scale, x_interval, self.options)?
            }
            ChartFamily::Pie => Vec::new(),
        };
        primitives.extend(series);
        Ok(primitives)
    }

    pub fn build(&self) -> ChartResult<ChartGeometry> {
        let negatives = self
            .source
            .dataset()
            .rows()
            .iter()
            .flat_map(|row| row.points())
            .filter(|point| **point < 0.0)
            .count();
        if negatives > 0 {
            debug!(negatives, "negative values clamped to the baseline");
        }

        let scale = self.compute_scale()?;
        let primitives = self.emit(scale.as_ref())?;
        trace!(
            family = ?self.family,
            source = self.source.id().get(),
            primitives = primitives.len(),
            "built chart geometry"
        );

        let origin = if self.family.has_axes() {
            (0.0, self.viewport.height_px())
        } else {
            (0.0, 0.0)
        };
        Ok(ChartGeometry {
            family: self.family,
            primitives,
            scale,
            x_interval: self.x_interval(),
            origin,
        })
    }
}

/// Axis frame along the left and bottom edges plus one hairline per tick.
fn grid_primitives(scale: &ValueScale, viewport: Viewport) -> Vec<DrawingPrimitive> {
    let width = viewport.width_px();
    let mut primitives = Vec::with_capacity(scale.ticks().len() + 1);
    primitives.push(DrawingPrimitive::Polyline {
        points: vec![(0.0, -viewport.height_px()), (0.0, 0.0), (width, 0.0)],
        stroke: Stroke::new(Color::BLACK, 1.0),
        fill: None,
    });
    for tick in scale.ticks() {
        let y = -scale.value_to_offset(*tick);
        primitives.push(DrawingPrimitive::Polyline {
            points: vec![(0.0, y), (width, y)],
            stroke: Stroke::new(Color::BLACK, 0.2),
            fill: None,
        });
    }
    primitives
}
