use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

use crate::core::dataset::Dataset;
use crate::core::geometry::{GeometryOptions, plotted_value};
use crate::core::types::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingPrimitive, Fill, GradientStop, Stroke};

/// Overall opacity of gradient-filled wedges.
pub const PIE_GRADIENT_ALPHA: f64 = 0.8;

/// Angular extent of one pie slice.
///
/// `start_turn`/`end_turn` are fractions of a full turn measured clockwise
/// from 12 o'clock; the `*_angle` fields are the same positions in radians
/// using the canvas convention (0 at 3 o'clock).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub fraction: f64,
    pub start_turn: f64,
    pub end_turn: f64,
}

impl PieSlice {
    #[must_use]
    pub fn start_angle(self) -> f64 {
        self.start_turn * TAU - FRAC_PI_2
    }

    #[must_use]
    pub fn end_angle(self) -> f64 {
        self.end_turn * TAU - FRAC_PI_2
    }

    #[must_use]
    pub fn mid_turn(self) -> f64 {
        self.start_turn + self.fraction / 2.0
    }

    /// Share of the whole pie as a rounded percentage label, e.g. `"30%"`.
    #[must_use]
    pub fn percent_label(self) -> String {
        format!("{}%", (self.fraction * 100.0).round())
    }
}

/// Consecutive slices for `totals`, clockwise from 12 o'clock.
///
/// Negative totals are treated as zero. Fails with `EmptyDataset` when there
/// is nothing to divide by.
pub fn pie_slices(totals: &[f64]) -> ChartResult<Vec<PieSlice>> {
    let grand_total: f64 = totals.iter().copied().map(plotted_value).sum();
    if !grand_total.is_finite() || grand_total <= 0.0 {
        return Err(ChartError::EmptyDataset(format!(
            "pie needs a positive grand total, got {grand_total}"
        )));
    }

    let mut counter = 0.0;
    Ok(totals
        .iter()
        .map(|total| {
            let fraction = plotted_value(*total) / grand_total;
            let slice = PieSlice {
                fraction,
                start_turn: counter,
                end_turn: counter + fraction,
            };
            counter += fraction;
            slice
        })
        .collect())
}

/// Wedges for every row followed by one percentage label per wedge.
///
/// Labels sit halfway between the center and the rim on each wedge's
/// bisector.
pub fn project_pie(
    dataset: &Dataset,
    row_totals: &[f64],
    viewport: Viewport,
    options: &GeometryOptions,
) -> ChartResult<Vec<DrawingPrimitive>> {
    let slices = pie_slices(row_totals)?;

    let center = (viewport.width_px() / 2.0, viewport.height_px() / 2.0);
    let radius = (viewport.width_px().min(viewport.height_px()) / 2.0
        - options.pie_radius_inset_px)
        .max(0.0);
    let outline = Stroke::new(Color::from_hex("#444444")?, 1.0);

    let mut wedges = Vec::with_capacity(slices.len());
    let mut labels = Vec::with_capacity(slices.len());
    for (row, slice) in dataset.rows().iter().zip(&slices) {
        let color = options.row_color(dataset, row)?;
        let fill = if options.gradient_fills {
            Fill::RadialGradient {
                center,
                radius,
                stops: Fill::ramp_stops(color)
                    .into_iter()
                    .map(|stop| {
                        GradientStop::new(
                            stop.offset,
                            stop.color.with_alpha(stop.color.alpha * PIE_GRADIENT_ALPHA),
                        )
                    })
                    .collect(),
            }
        } else {
            Fill::Solid(color)
        };

        wedges.push(DrawingPrimitive::Wedge {
            center,
            radius,
            start_angle: slice.start_angle(),
            end_angle: slice.end_angle(),
            fill,
            stroke: Some(outline),
        });

        let mid = slice.mid_turn() * TAU;
        labels.push(DrawingPrimitive::LabelAnchor {
            text: slice.percent_label(),
            x: center.0 + mid.sin() * (radius / 2.0),
            y: center.1 - mid.cos() * (radius / 2.0),
        });
    }

    wedges.extend(labels);
    Ok(wedges)
}
