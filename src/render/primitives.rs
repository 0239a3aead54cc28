use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#rgb` or `#rrggbb` (leading `#` optional).
    pub fn from_hex(input: &str) -> ChartResult<Self> {
        let digits = input.trim().trim_start_matches('#');
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_owned(),
            _ => {
                return Err(ChartError::InvalidData(format!(
                    "color `{input}` must be #rgb or #rrggbb"
                )));
            }
        };

        let channel = |offset: usize| -> ChartResult<f64> {
            let hex = expanded.get(offset..offset + 2).ok_or_else(|| {
                ChartError::InvalidData(format!("color `{input}` must be #rgb or #rrggbb"))
            })?;
            u8::from_str_radix(hex, 16)
                .map(|value| f64::from(value) / 255.0)
                .map_err(|_| ChartError::InvalidData(format!("color `{input}` is not hex")))
        };

        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

impl GradientStop {
    #[must_use]
    pub const fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Paint used to fill a closed shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Fill {
    Solid(Color),
    LinearGradient {
        start: (f64, f64),
        end: (f64, f64),
        stops: Vec<GradientStop>,
    },
    RadialGradient {
        center: (f64, f64),
        radius: f64,
        stops: Vec<GradientStop>,
    },
}

impl Fill {
    /// Translucent-to-opaque ramp: 0.5 alpha at the start, 0.9 at 80%, opaque at the end.
    #[must_use]
    pub fn ramp_stops(color: Color) -> Vec<GradientStop> {
        vec![
            GradientStop::new(0.0, color.with_alpha(0.5)),
            GradientStop::new(0.8, color.with_alpha(0.9)),
            GradientStop::new(1.0, color),
        ]
    }

    fn validate(&self) -> ChartResult<()> {
        let stops = match self {
            Self::Solid(color) => return color.validate(),
            Self::LinearGradient { start, end, stops } => {
                finite_point(*start, "gradient start")?;
                finite_point(*end, "gradient end")?;
                stops
            }
            Self::RadialGradient {
                center,
                radius,
                stops,
            } => {
                finite_point(*center, "gradient center")?;
                if !radius.is_finite() || *radius < 0.0 {
                    return Err(ChartError::InvalidData(
                        "gradient radius must be finite and >= 0".to_owned(),
                    ));
                }
                stops
            }
        };
        if stops.is_empty() {
            return Err(ChartError::InvalidData(
                "gradient needs at least one stop".to_owned(),
            ));
        }
        for stop in stops {
            if !(0.0..=1.0).contains(&stop.offset) {
                return Err(ChartError::InvalidData(
                    "gradient stop offset must be in [0, 1]".to_owned(),
                ));
            }
            stop.color.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    #[must_use]
    pub const fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }

    fn validate(self) -> ChartResult<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(ChartError::InvalidData(
                "stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// One drawing instruction for a render backend.
///
/// XY chart primitives live in plot space: origin at the bottom-left corner of
/// the surface, so values above the baseline have negative `y`. Pie primitives
/// use surface space. `RenderFrame::origin` tells the backend which one applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawingPrimitive {
    Polyline {
        points: Vec<(f64, f64)>,
        stroke: Stroke,
        /// When set, the path is closed and filled before stroking.
        fill: Option<Fill>,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        stroke: Option<Stroke>,
        fill: Fill,
    },
    Wedge {
        center: (f64, f64),
        radius: f64,
        /// Radians, canvas convention: 0 points right, angles grow clockwise.
        start_angle: f64,
        end_angle: f64,
        fill: Fill,
        stroke: Option<Stroke>,
    },
    LabelAnchor {
        text: String,
        x: f64,
        y: f64,
    },
}

impl DrawingPrimitive {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Polyline {
                points,
                stroke,
                fill,
            } => {
                for point in points {
                    finite_point(*point, "polyline point")?;
                }
                stroke.validate()?;
                fill.as_ref().map_or(Ok(()), Fill::validate)
            }
            Self::Rect {
                x,
                y,
                width,
                height,
                stroke,
                fill,
            } => {
                if ![*x, *y, *width, *height].iter().all(|value| value.is_finite()) {
                    return Err(ChartError::InvalidData(
                        "rect geometry must be finite".to_owned(),
                    ));
                }
                if let Some(stroke) = stroke {
                    stroke.validate()?;
                }
                fill.validate()
            }
            Self::Wedge {
                center,
                radius,
                start_angle,
                end_angle,
                fill,
                stroke,
            } => {
                finite_point(*center, "wedge center")?;
                if !radius.is_finite() || *radius < 0.0 {
                    return Err(ChartError::InvalidData(
                        "wedge radius must be finite and >= 0".to_owned(),
                    ));
                }
                if !start_angle.is_finite() || !end_angle.is_finite() {
                    return Err(ChartError::InvalidData(
                        "wedge angles must be finite".to_owned(),
                    ));
                }
                if let Some(stroke) = stroke {
                    stroke.validate()?;
                }
                fill.validate()
            }
            Self::LabelAnchor { text, x, y } => {
                if text.is_empty() {
                    return Err(ChartError::InvalidData(
                        "label anchor text must not be empty".to_owned(),
                    ));
                }
                finite_point((*x, *y), "label anchor")
            }
        }
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// One label placed around the drawing surface, in surface coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        finite_point((self.x, self.y), "text")?;
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

fn finite_point(point: (f64, f64), what: &str) -> ChartResult<()> {
    if point.0.is_finite() && point.1.is_finite() {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!(
            "{what} coordinates must be finite"
        )))
    }
}
