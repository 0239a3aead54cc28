use crate::core::aggregate::stacked_value;
use crate::core::dataset::Dataset;
use crate::core::geometry::{GeometryOptions, plotted_value};
use crate::core::scale::ValueScale;
use crate::error::ChartResult;
use crate::render::{DrawingPrimitive, Fill, Stroke};

/// Alpha applied to the row color when a line is filled down to the baseline.
pub const LINE_FILL_ALPHA: f64 = 0.3;

/// Plot-space vertices for one row: `(category * x_interval, -value * scale)`.
///
/// The function is deterministic and side-effect free so rendering and tests
/// consume the exact same geometry.
#[must_use]
pub fn line_vertices(
    values: impl IntoIterator<Item = f64>,
    x_interval: f64,
    scale: &ValueScale,
) -> Vec<(f64, f64)> {
    values
        .into_iter()
        .enumerate()
        .map(|(category_index, value)| {
            (
                category_index as f64 * x_interval,
                -scale.value_to_offset(value),
            )
        })
        .collect()
}

/// One polyline per row, optionally closed to the baseline and filled.
///
/// With `cumulative` set, each row is drawn at its stacked value (its own
/// point plus the two following rows) instead of its raw point.
pub fn project_lines(
    dataset: &Dataset,
    scale: &ValueScale,
    x_interval: f64,
    options: &GeometryOptions,
    cumulative: bool,
) -> ChartResult<Vec<DrawingPrimitive>> {
    let mut primitives = Vec::with_capacity(dataset.row_count());
    for (row_index, row) in dataset.rows().iter().enumerate() {
        let color = options.row_color(dataset, row)?;
        let values = (0..dataset.category_count()).map(|category_index| {
            let value = if cumulative {
                stacked_value(dataset, row_index, category_index)
            } else {
                row.point(category_index).unwrap_or_default()
            };
            plotted_value(value)
        });

        let mut points = line_vertices(values, x_interval, scale);
        let fill = if options.filled {
            let last_x = points.last().map_or(0.0, |point| point.0);
            points.push((last_x, 0.0));
            points.push((0.0, 0.0));
            Some(Fill::Solid(color.with_alpha(LINE_FILL_ALPHA)))
        } else {
            None
        };

        primitives.push(DrawingPrimitive::Polyline {
            points,
            stroke: Stroke::new(color, options.line_width_px),
            fill,
        });
    }
    Ok(primitives)
}

#[cfg(test)]
mod tests {
    use super::line_vertices;
    use crate::core::scale::{ScaleRequest, ValueScale};

    #[test]
    fn vertices_grow_upwards_from_baseline() {
        let scale = ValueScale::compute(ScaleRequest::new(20.0, 400.0, 10.0)).expect("scale");
        let vertices = line_vertices([10.0, 20.0], 300.0, &scale);
        assert_eq!(vertices, vec![(0.0, -200.0), (300.0, -400.0)]);
    }
}
