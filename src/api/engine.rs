use tracing::{debug, trace, warn};

use crate::core::{DataSource, GeometryBuilder, GeometryOptions, TableSource};
use crate::error::{ChartError, ChartResult};
use crate::render::{RenderFrame, Renderer};

use super::label_layout::layout_frame_labels;
use super::surface_retry::PendingApply;
use super::{ApplyStatus, ChartConfig};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns one immutable `ChartConfig`, the current `DataSource`
/// and the renderer. Every data change builds a complete `RenderFrame` first;
/// the renderer only ever sees finished frames.
pub struct ChartEngine<R: Renderer> {
    renderer: R,
    config: ChartConfig,
    geometry_options: GeometryOptions,
    source: Option<DataSource>,
    last_frame: Option<RenderFrame>,
    pending: Option<PendingApply>,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let geometry_options = config.geometry_options()?;
        debug!(
            family = ?config.family(),
            width = config.dimensions.width,
            height = config.dimensions.height,
            "chart engine created"
        );
        Ok(Self {
            renderer,
            config,
            geometry_options,
            source: None,
            last_frame: None,
            pending: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Source behind the last rendered frame.
    #[must_use]
    pub fn data_source(&self) -> Option<&DataSource> {
        self.source.as_ref()
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }

    #[must_use]
    pub fn has_pending_apply(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Runs the geometry pass and label layout for `source` without rendering.
    pub fn build_frame(&self, source: &DataSource) -> ChartResult<RenderFrame> {
        let viewport = self.config.dimensions;
        let geometry =
            GeometryBuilder::new(self.config.family(), source, &self.geometry_options, viewport)
                .build()?;
        let labels = layout_frame_labels(
            &geometry,
            source.dataset(),
            self.config.title.as_deref(),
            &self.geometry_options,
            viewport,
            &self.config.labels,
        )?;

        let mut frame = RenderFrame::new(viewport)
            .with_origin(geometry.origin.0, geometry.origin.1)
            .with_primitives(geometry.primitives)
            .with_legend(labels.legend)
            .with_axis_labels(labels.axis_labels);
        if let Some(title) = labels.title {
            frame = frame.with_title(title);
        }
        Ok(frame)
    }

    /// Replaces the chart data.
    ///
    /// Input and geometry errors are returned right away. When the surface is
    /// not ready the built frame is kept and `retry_pending` must be called
    /// after the returned delay; any earlier pending apply is discarded.
    pub fn set_data(&mut self, source: DataSource) -> ChartResult<ApplyStatus> {
        if let Some(superseded) = self.pending.take() {
            debug!(
                source = superseded.source.id().get(),
                attempts = superseded.attempts,
                "pending apply superseded"
            );
        }

        let frame = self.build_frame(&source)?;
        let mut pending = PendingApply::new(source, frame);
        if self.renderer.surface_ready() {
            return self.commit(pending);
        }

        let status = pending.record_miss(self.config.retry).inspect_err(|_| {
            warn!(
                source = pending.source.id().get(),
                "surface not ready and retry policy allows no further attempts"
            );
        })?;
        debug!(
            source = pending.source.id().get(),
            attempt = pending.attempts,
            delay_ms = self.config.retry.delay_ms,
            "surface not ready, apply deferred"
        );
        self.pending = Some(pending);
        Ok(status)
    }

    pub fn set_table_data(&mut self, table: &TableSource) -> ChartResult<ApplyStatus> {
        let source = DataSource::from_table(table, self.config.data)?;
        self.set_data(source)
    }

    pub fn set_json_data(&mut self, input: &str) -> ChartResult<ApplyStatus> {
        let source = DataSource::from_json_str(input, self.config.data)?;
        self.set_data(source)
    }

    /// Checks the surface again for the pending apply, if any.
    pub fn retry_pending(&mut self) -> ChartResult<ApplyStatus> {
        let Some(mut pending) = self.pending.take() else {
            return Ok(ApplyStatus::Idle);
        };
        if self.renderer.surface_ready() {
            return self.commit(pending);
        }

        match pending.record_miss(self.config.retry) {
            Ok(status) => {
                debug!(
                    source = pending.source.id().get(),
                    attempt = pending.attempts,
                    "surface still not ready"
                );
                self.pending = Some(pending);
                Ok(status)
            }
            Err(err) => {
                warn!(
                    source = pending.source.id().get(),
                    attempts = pending.attempts,
                    "giving up on deferred apply"
                );
                Err(err)
            }
        }
    }

    /// Draws the current frame again, e.g. after the host surface was cleared.
    ///
    /// A redraw is a single attempt: an unavailable surface fails with
    /// `SurfaceNotReady { attempts: 1 }` and nothing is scheduled.
    pub fn render(&mut self) -> ChartResult<()> {
        let Some(frame) = &self.last_frame else {
            return Ok(());
        };
        if !self.renderer.surface_ready() {
            debug!("redraw skipped, surface not ready");
            return Err(ChartError::SurfaceNotReady { attempts: 1 });
        }
        self.renderer.render(frame)
    }

    /// Renders the current frame into an external cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> ChartResult<()>
    where
        R: CairoContextRenderer,
    {
        match &self.last_frame {
            Some(frame) => self.renderer.render_on_cairo_context(context, frame),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn commit(&mut self, pending: PendingApply) -> ChartResult<ApplyStatus> {
        self.renderer.render(&pending.frame)?;
        let primitives = pending.frame.primitives.len();
        trace!(
            source = pending.source.id().get(),
            primitives,
            labels = pending.frame.label_count(),
            attempts = pending.attempts,
            "rendered frame"
        );
        self.source = Some(pending.source);
        self.last_frame = Some(pending.frame);
        Ok(ApplyStatus::Rendered { primitives })
    }
}
