use serde::{Deserialize, Serialize};

use crate::core::{
    ChartFamily, DataSourceOptions, GeometryOptions, TickRounding, Viewport, scale::DEFAULT_BAND_PX,
};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::{LabelLayoutConfig, RetryPolicy};

/// Row colors used when a config does not name its own.
pub const DEFAULT_PALETTE: [&str; 9] = [
    "#e9e744", "#ee8310", "#f45a90", "#666699", "#5a3b16", "#26a4ed", "#be1e2d", "#8d10ee",
    "#92d5ea",
];

/// Chart type requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartType {
    #[default]
    #[serde(alias = "line")]
    Line,
    #[serde(alias = "bar")]
    Bar,
    #[serde(alias = "cumulativeLine", alias = "cumulative_line")]
    CumulativeLine,
    #[serde(alias = "cumulativeBar", alias = "cumulative_bar")]
    CumulativeBar,
    #[serde(alias = "pie")]
    Pie,
}

/// Immutable chart setup handed to each `ChartEngine`.
///
/// Every field has a serde default so hosts can load partial JSON configs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub chart_type: ChartType,
    #[serde(default)]
    pub filled: bool,
    #[serde(default)]
    pub dimensions: Viewport,
    #[serde(default = "default_colors")]
    pub colors: Vec<String>,
    /// Legacy switch: upgrades `Line`/`Bar` to their cumulative variant.
    #[serde(default, alias = "additive")]
    pub cumulative: bool,
    #[serde(default)]
    pub gradient_fills: bool,
    #[serde(default)]
    pub grid_lines: bool,
    #[serde(default)]
    pub tick_rounding: TickRounding,
    #[serde(default = "default_band_px")]
    pub band_px: f64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_pie_radius_inset_px")]
    pub pie_radius_inset_px: f64,
    #[serde(default)]
    pub data: DataSourceOptions,
    #[serde(default)]
    pub labels: LabelLayoutConfig,
    #[serde(default)]
    pub retry: RetryPolicy,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::new(ChartType::default())
    }
}

impl ChartConfig {
    #[must_use]
    pub fn new(chart_type: ChartType) -> Self {
        Self {
            chart_type,
            filled: false,
            dimensions: Viewport::default(),
            colors: default_colors(),
            cumulative: false,
            gradient_fills: false,
            grid_lines: false,
            tick_rounding: TickRounding::default(),
            band_px: default_band_px(),
            title: None,
            pie_radius_inset_px: default_pie_radius_inset_px(),
            data: DataSourceOptions::default(),
            labels: LabelLayoutConfig::default(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Viewport::new(width, height);
        self
    }

    #[must_use]
    pub fn with_filled(mut self, filled: bool) -> Self {
        self.filled = filled;
        self
    }

    #[must_use]
    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_cumulative(mut self, cumulative: bool) -> Self {
        self.cumulative = cumulative;
        self
    }

    #[must_use]
    pub fn with_gradient_fills(mut self, enabled: bool) -> Self {
        self.gradient_fills = enabled;
        self
    }

    #[must_use]
    pub fn with_grid_lines(mut self, enabled: bool) -> Self {
        self.grid_lines = enabled;
        self
    }

    #[must_use]
    pub fn with_tick_rounding(mut self, rounding: TickRounding) -> Self {
        self.tick_rounding = rounding;
        self
    }

    #[must_use]
    pub fn with_band_px(mut self, band_px: f64) -> Self {
        self.band_px = band_px;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_data_options(mut self, options: DataSourceOptions) -> Self {
        self.data = options;
        self
    }

    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Family actually drawn once the legacy `cumulative` flag is applied.
    #[must_use]
    pub fn family(&self) -> ChartFamily {
        match (self.chart_type, self.cumulative) {
            (ChartType::Line, false) => ChartFamily::Line,
            (ChartType::Bar, false) => ChartFamily::Bar,
            (ChartType::Line | ChartType::CumulativeLine, _) => ChartFamily::CumulativeLine,
            (ChartType::Bar | ChartType::CumulativeBar, _) => ChartFamily::CumulativeBar,
            (ChartType::Pie, _) => ChartFamily::Pie,
        }
    }

    pub fn palette(&self) -> ChartResult<Vec<Color>> {
        self.colors.iter().map(|hex| Color::from_hex(hex)).collect()
    }

    pub fn geometry_options(&self) -> ChartResult<GeometryOptions> {
        let mut options = GeometryOptions::new(self.palette()?);
        options.filled = self.filled;
        options.gradient_fills = self.gradient_fills;
        options.grid_lines = self.grid_lines;
        options.band_px = self.band_px;
        options.tick_rounding = self.tick_rounding;
        options.pie_radius_inset_px = self.pie_radius_inset_px;
        Ok(options)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.dimensions.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.dimensions.width,
                height: self.dimensions.height,
            });
        }
        if !self.band_px.is_finite() || self.band_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "band size must be finite and > 0".to_owned(),
            ));
        }
        if !self.pie_radius_inset_px.is_finite() || self.pie_radius_inset_px < 0.0 {
            return Err(ChartError::InvalidData(
                "pie radius inset must be finite and >= 0".to_owned(),
            ));
        }
        if self.colors.is_empty() {
            return Err(ChartError::InvalidData(
                "palette must contain at least one color".to_owned(),
            ));
        }
        self.palette()?;
        self.labels.text_color.validate()?;
        self.retry.validate()
    }
}

fn default_colors() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|hex| (*hex).to_owned()).collect()
}

fn default_band_px() -> f64 {
    DEFAULT_BAND_PX
}

fn default_pie_radius_inset_px() -> f64 {
    20.0
}

#[cfg(test)]
mod tests {
    use super::{ChartConfig, ChartType};
    use crate::core::ChartFamily;

    #[test]
    fn cumulative_flag_upgrades_xy_types_only() {
        let line = ChartConfig::new(ChartType::Line).with_cumulative(true);
        let bar = ChartConfig::new(ChartType::Bar).with_cumulative(true);
        let pie = ChartConfig::new(ChartType::Pie).with_cumulative(true);
        assert_eq!(line.family(), ChartFamily::CumulativeLine);
        assert_eq!(bar.family(), ChartFamily::CumulativeBar);
        assert_eq!(pie.family(), ChartFamily::Pie);
    }

    #[test]
    fn partial_json_uses_defaults_and_aliases() {
        let config = ChartConfig::from_json_str(
            r#"{ "chart_type": "bar", "additive": true, "dimensions": { "width": 300, "height": 200 } }"#,
        )
        .expect("config");
        assert_eq!(config.family(), ChartFamily::CumulativeBar);
        assert_eq!(config.colors.len(), 9);
        assert_eq!(config.band_px, 30.0);
    }

    #[test]
    fn rejects_bad_palette_entry() {
        let config = ChartConfig::default().with_colors(["#zzzzzz"]);
        assert!(config.validate().is_err());
    }
}
