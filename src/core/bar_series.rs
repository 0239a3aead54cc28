use crate::core::aggregate::stacked_value;
use crate::core::dataset::Dataset;
use crate::core::geometry::{GeometryOptions, plotted_value};
use crate::core::scale::ValueScale;
use crate::error::ChartResult;
use crate::render::{Color, DrawingPrimitive, Fill, Stroke};

/// Fraction of a category interval covered by an overlaid stacked bar.
pub const STACKED_BAR_WIDTH_RATIO: f64 = 0.8;

/// Width of one bar when `row_count` bars share a category interval.
///
/// One slot is left empty so neighbouring groups stay apart.
#[must_use]
pub fn grouped_bar_width(x_interval: f64, row_count: usize) -> f64 {
    x_interval / (row_count + 1) as f64
}

/// Grouped bars: row `r` sits at `category * x_interval + r * bar_width`.
pub fn project_grouped_bars(
    dataset: &Dataset,
    scale: &ValueScale,
    x_interval: f64,
    options: &GeometryOptions,
) -> ChartResult<Vec<DrawingPrimitive>> {
    let bar_width = grouped_bar_width(x_interval, dataset.row_count());
    let mut primitives = Vec::with_capacity(dataset.row_count() * dataset.category_count());
    for (row_index, row) in dataset.rows().iter().enumerate() {
        let color = options.row_color(dataset, row)?;
        for (category_index, point) in row.points().iter().enumerate() {
            let x = category_index as f64 * x_interval + row_index as f64 * bar_width;
            let height = -scale.value_to_offset(plotted_value(*point));
            primitives.push(bar_rect(x, bar_width, height, color, options));
        }
    }
    Ok(primitives)
}

/// Stacked bars overlaid per category, each row at its bounded stacked value.
///
/// Rows are emitted first to last, so the tallest layer (row 0) is drawn
/// first and later rows paint over its lower part.
pub fn project_stacked_bars(
    dataset: &Dataset,
    scale: &ValueScale,
    x_interval: f64,
    options: &GeometryOptions,
) -> ChartResult<Vec<DrawingPrimitive>> {
    let bar_width = x_interval * STACKED_BAR_WIDTH_RATIO;
    let mut primitives = Vec::with_capacity(dataset.row_count() * dataset.category_count());
    for (row_index, row) in dataset.rows().iter().enumerate() {
        let color = options.row_color(dataset, row)?;
        for category_index in 0..dataset.category_count() {
            let x = category_index as f64 * x_interval;
            let value = stacked_value(dataset, row_index, category_index);
            let height = -scale.value_to_offset(plotted_value(value));
            primitives.push(bar_rect(x, bar_width, height, color, options));
        }
    }
    Ok(primitives)
}

fn bar_rect(
    x: f64,
    width: f64,
    height: f64,
    color: Color,
    options: &GeometryOptions,
) -> DrawingPrimitive {
    let fill = if options.gradient_fills {
        Fill::LinearGradient {
            start: (x, 0.0),
            end: (x, height),
            stops: Fill::ramp_stops(color),
        }
    } else {
        Fill::Solid(color)
    };

    DrawingPrimitive::Rect {
        x,
        y: 0.0,
        width,
        height,
        stroke: Some(Stroke::new(Color::BLACK, 1.0)),
        fill,
    }
}

#[cfg(test)]
mod tests {
    use super::grouped_bar_width;

    #[test]
    fn grouped_width_leaves_one_empty_slot() {
        assert_eq!(grouped_bar_width(300.0, 2), 100.0);
        assert_eq!(grouped_bar_width(300.0, 0), 300.0);
    }
}
