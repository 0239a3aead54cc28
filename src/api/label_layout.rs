use serde::{Deserialize, Serialize};

use crate::core::{ChartGeometry, Dataset, GeometryOptions, ValueScale, Viewport};
use crate::error::ChartResult;
use crate::render::{AxisKind, AxisLabel, Color, LegendEntry, TextHAlign, TextPrimitive};

/// Sizes and offsets of the text placed around the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelLayoutConfig {
    pub font_size_px: f64,
    pub title_font_size_px: f64,
    pub text_color: Color,
    /// Distance between the surface edge and axis labels / title.
    pub gap_px: f64,
    /// Distance between the surface's right edge and the legend.
    pub legend_offset_px: f64,
    pub legend_row_height_px: f64,
    pub swatch_size_px: f64,
}

impl Default for LabelLayoutConfig {
    fn default() -> Self {
        Self {
            font_size_px: 10.0,
            title_font_size_px: 14.0,
            text_color: Color::BLACK,
            gap_px: 5.0,
            legend_offset_px: 10.0,
            legend_row_height_px: 16.0,
            swatch_size_px: 10.0,
        }
    }
}

/// Labels for one frame, all in surface coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameLabels {
    pub title: Option<TextPrimitive>,
    pub legend: Vec<LegendEntry>,
    pub axis_labels: Vec<AxisLabel>,
}

/// Axis tick text: integers without a fraction, otherwise up to two decimals.
#[must_use]
pub fn format_tick(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        return format!("{}", value.round());
    }
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

pub fn layout_frame_labels(
    geometry: &ChartGeometry,
    dataset: &Dataset,
    title_override: Option<&str>,
    options: &GeometryOptions,
    viewport: Viewport,
    config: &LabelLayoutConfig,
) -> ChartResult<FrameLabels> {
    let title = title_override
        .or(dataset.title())
        .filter(|text| !text.trim().is_empty())
        .map(|text| title_label(text, viewport, config));

    let mut axis_labels = Vec::new();
    if let Some(x_interval) = geometry.x_interval {
        axis_labels.extend(category_labels(dataset, x_interval, viewport, config));
    }
    if let Some(scale) = &geometry.scale {
        axis_labels.extend(value_labels(scale, viewport, config));
    }

    Ok(FrameLabels {
        title,
        legend: legend_entries(dataset, options, viewport, config)?,
        axis_labels,
    })
}

/// Centered above the surface.
#[must_use]
pub fn title_label(text: &str, viewport: Viewport, config: &LabelLayoutConfig) -> TextPrimitive {
    TextPrimitive::new(
        text,
        viewport.width_px() / 2.0,
        -(config.gap_px + config.title_font_size_px),
        config.title_font_size_px,
        config.text_color,
        TextHAlign::Center,
    )
}

/// One entry per row, stacked to the right of the surface.
pub fn legend_entries(
    dataset: &Dataset,
    options: &GeometryOptions,
    viewport: Viewport,
    config: &LabelLayoutConfig,
) -> ChartResult<Vec<LegendEntry>> {
    let swatch_x = viewport.width_px() + config.legend_offset_px;
    let mut entries = Vec::with_capacity(dataset.row_count());
    for (row_index, row) in dataset.rows().iter().enumerate() {
        let text = row
            .label()
            .filter(|label| !label.trim().is_empty())
            .map_or_else(|| format!("Series {}", row_index + 1), str::to_owned);
        let y = row_index as f64 * config.legend_row_height_px;
        entries.push(LegendEntry {
            label: TextPrimitive::new(
                text,
                swatch_x + config.swatch_size_px + config.gap_px,
                y,
                config.font_size_px,
                config.text_color,
                TextHAlign::Left,
            ),
            swatch_color: options.row_color(dataset, row)?,
            swatch_x,
            swatch_y: y,
            swatch_size_px: config.swatch_size_px,
        });
    }
    Ok(entries)
}

/// Category headers under the surface, one per `x_interval` slot.
#[must_use]
pub fn category_labels(
    dataset: &Dataset,
    x_interval: f64,
    viewport: Viewport,
    config: &LabelLayoutConfig,
) -> Vec<AxisLabel> {
    dataset
        .categories()
        .iter()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(category_index, text)| AxisLabel {
            axis: AxisKind::Category,
            label: TextPrimitive::new(
                text.as_str(),
                category_index as f64 * x_interval,
                viewport.height_px() + config.gap_px,
                config.font_size_px,
                config.text_color,
                TextHAlign::Left,
            ),
        })
        .collect()
}

/// Tick values left of the surface at their pixel height.
#[must_use]
pub fn value_labels(
    scale: &ValueScale,
    viewport: Viewport,
    config: &LabelLayoutConfig,
) -> Vec<AxisLabel> {
    scale
        .ticks()
        .iter()
        .map(|tick| AxisLabel {
            axis: AxisKind::Value,
            label: TextPrimitive::new(
                format_tick(*tick),
                -config.gap_px,
                viewport.height_px() - scale.value_to_offset(*tick),
                config.font_size_px,
                config.text_color,
                TextHAlign::Right,
            ),
        })
        .collect()
}
