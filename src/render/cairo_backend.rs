use cairo::{Context, Format, Gradient, ImageSurface, LinearGradient, RadialGradient};
use pango::FontDescription;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, DrawingPrimitive, Fill, GradientStop, RenderFrame, Renderer, Stroke, TextHAlign,
    TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub polylines_drawn: usize,
    pub rects_drawn: usize,
    pub wedges_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a toolkit draw callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// The chart surface is placed at `content_offset` inside the image so the
/// title, legend and axis labels around it stay visible.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    content_offset: (f64, f64),
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::WHITE,
            content_offset: (0.0, 0.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn with_content_offset(mut self, x: f64, y: f64) -> Self {
        self.content_offset = (x, y);
        self
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        context
            .save()
            .map_err(|err| map_backend_error("failed to save context", err))?;
        context.translate(self.content_offset.0, self.content_offset.1);

        context
            .save()
            .map_err(|err| map_backend_error("failed to save context", err))?;
        context.translate(frame.origin.0, frame.origin.1);
        for primitive in &frame.primitives {
            draw_primitive(context, primitive, &mut stats)?;
        }
        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context", err))?;

        if let Some(title) = &frame.title {
            draw_text(context, title);
            stats.texts_drawn += 1;
        }
        for entry in &frame.legend {
            context.rectangle(
                entry.swatch_x,
                entry.swatch_y,
                entry.swatch_size_px,
                entry.swatch_size_px,
            );
            apply_color(context, entry.swatch_color);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill legend swatch", err))?;
            draw_text(context, &entry.label);
            stats.texts_drawn += 1;
        }
        for axis_label in &frame.axis_labels {
            draw_text(context, &axis_label.label);
            stats.texts_drawn += 1;
        }

        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context", err))?;
        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn draw_primitive(
    context: &Context,
    primitive: &DrawingPrimitive,
    stats: &mut CairoRenderStats,
) -> ChartResult<()> {
    match primitive {
        DrawingPrimitive::Polyline {
            points,
            stroke,
            fill,
        } => {
            let Some((first, rest)) = points.split_first() else {
                return Ok(());
            };
            context.move_to(first.0, first.1);
            for point in rest {
                context.line_to(point.0, point.1);
            }
            if let Some(fill) = fill {
                context.close_path();
                fill_preserve(context, fill)?;
            }
            stroke_path(context, *stroke)?;
            stats.polylines_drawn += 1;
        }
        DrawingPrimitive::Rect {
            x,
            y,
            width,
            height,
            stroke,
            fill,
        } => {
            context.rectangle(*x, *y, *width, *height);
            fill_preserve(context, fill)?;
            match stroke {
                Some(stroke) => stroke_path(context, *stroke)?,
                None => context.new_path(),
            }
            stats.rects_drawn += 1;
        }
        DrawingPrimitive::Wedge {
            center,
            radius,
            start_angle,
            end_angle,
            fill,
            stroke,
        } => {
            context.move_to(center.0, center.1);
            context.arc(center.0, center.1, *radius, *start_angle, *end_angle);
            context.close_path();
            fill_preserve(context, fill)?;
            match stroke {
                Some(stroke) => stroke_path(context, *stroke)?,
                None => context.new_path(),
            }
            stats.wedges_drawn += 1;
        }
        DrawingPrimitive::LabelAnchor { text, x, y } => {
            let label = TextPrimitive::new(
                text.as_str(),
                *x,
                *y,
                12.0,
                Color::BLACK,
                TextHAlign::Center,
            );
            draw_text(context, &label);
            stats.texts_drawn += 1;
        }
    }
    Ok(())
}

fn fill_preserve(context: &Context, fill: &Fill) -> ChartResult<()> {
    match fill {
        Fill::Solid(color) => apply_color(context, *color),
        Fill::LinearGradient { start, end, stops } => {
            let gradient = LinearGradient::new(start.0, start.1, end.0, end.1);
            add_stops(&gradient, stops);
            context
                .set_source(&gradient)
                .map_err(|err| map_backend_error("failed to set linear gradient", err))?;
        }
        Fill::RadialGradient {
            center,
            radius,
            stops,
        } => {
            let gradient = RadialGradient::new(center.0, center.1, 0.0, center.0, center.1, *radius);
            add_stops(&gradient, stops);
            context
                .set_source(&gradient)
                .map_err(|err| map_backend_error("failed to set radial gradient", err))?;
        }
    }
    context
        .fill_preserve()
        .map_err(|err| map_backend_error("failed to fill path", err))
}

fn add_stops(gradient: &Gradient, stops: &[GradientStop]) {
    for stop in stops {
        gradient.add_color_stop_rgba(
            stop.offset,
            stop.color.red,
            stop.color.green,
            stop.color.blue,
            stop.color.alpha,
        );
    }
}

fn stroke_path(context: &Context, stroke: Stroke) -> ChartResult<()> {
    apply_color(context, stroke.color);
    context.set_line_width(stroke.width);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke path", err))
}

fn draw_text(context: &Context, text: &TextPrimitive) {
    let layout = pangocairo::functions::create_layout(context);
    let font_description = FontDescription::from_string(&format!("Sans {}", text.font_size_px));
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, _text_height) = layout.pixel_size();
    let x = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
        TextHAlign::Right => text.x - f64::from(text_width),
    };

    apply_color(context, text.color);
    context.move_to(x, text.y);
    pangocairo::functions::show_layout(context, &layout);
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
