use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::DataSource;
use crate::error::{ChartError, ChartResult};
use crate::render::RenderFrame;

/// Bound on how long a data apply waits for the drawing surface.
///
/// `max_attempts` counts every readiness check, including the first one made
/// by `ChartEngine::set_data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            delay_ms: 100,
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_attempts: u32, delay_ms: u64) -> Self {
        Self {
            max_attempts,
            delay_ms,
        }
    }

    #[must_use]
    pub fn delay(self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn validate(self) -> ChartResult<()> {
        if self.max_attempts == 0 {
            return Err(ChartError::InvalidData(
                "retry policy needs at least one attempt".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Result of handing data to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyStatus {
    /// The frame reached the renderer.
    Rendered { primitives: usize },
    /// Surface not ready; call `ChartEngine::retry_pending` after `retry_after`.
    Deferred { attempt: u32, retry_after: Duration },
    /// Nothing was waiting to be applied.
    Idle,
}

/// A fully built frame waiting for the surface to become ready.
#[derive(Debug)]
pub(super) struct PendingApply {
    pub(super) source: DataSource,
    pub(super) frame: RenderFrame,
    pub(super) attempts: u32,
}

impl PendingApply {
    pub(super) fn new(source: DataSource, frame: RenderFrame) -> Self {
        Self {
            source,
            frame,
            attempts: 0,
        }
    }

    /// Counts one failed readiness check; `Err` once the policy is exhausted.
    pub(super) fn record_miss(&mut self, policy: RetryPolicy) -> ChartResult<ApplyStatus> {
        self.attempts += 1;
        if self.attempts >= policy.max_attempts {
            return Err(ChartError::SurfaceNotReady {
                attempts: self.attempts,
            });
        }
        Ok(ApplyStatus::Deferred {
            attempt: self.attempts,
            retry_after: policy.delay(),
        })
    }
}
