use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Default vertical pixels per tick band.
pub const DEFAULT_BAND_PX: f64 = 30.0;

/// How the value axis domain and its tick step are aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TickRounding {
    /// Domain is the data maximum; step is `M / N` rounded to an integer.
    #[default]
    Exact,
    /// Domain (for the scale factor) and step are both rounded to the nearest
    /// multiple of ten; the last tick still is the exact maximum.
    NearestTen,
}

/// Inputs of one scale computation.
///
/// `band_count` is the unfloored `extent / band_px` ratio. The step divides the
/// domain by this ratio; only its whole part limits how many regular ticks are
/// emitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRequest {
    pub domain_max: f64,
    pub extent_px: f64,
    pub band_count: f64,
    pub rounding: TickRounding,
}

impl ScaleRequest {
    #[must_use]
    pub fn new(domain_max: f64, extent_px: f64, band_count: f64) -> Self {
        Self {
            domain_max,
            extent_px,
            band_count,
            rounding: TickRounding::Exact,
        }
    }

    /// Derives the band count from the extent and a per-band pixel size.
    #[must_use]
    pub fn from_band_size(domain_max: f64, extent_px: f64, band_px: f64) -> Self {
        Self::new(domain_max, extent_px, band_count_for(extent_px, band_px))
    }

    #[must_use]
    pub fn with_rounding(mut self, rounding: TickRounding) -> Self {
        self.rounding = rounding;
        self
    }
}

/// Fractional number of `band_px` bands in `extent_px`, at least one.
#[must_use]
pub fn band_count_for(extent_px: f64, band_px: f64) -> f64 {
    if !extent_px.is_finite() || !band_px.is_finite() || band_px <= 0.0 {
        return 1.0;
    }
    (extent_px / band_px).max(1.0)
}

#[must_use]
pub fn round_to(value: f64, multiple: f64) -> f64 {
    (value / multiple).round() * multiple
}

/// Vertical scale factor plus the value-axis ticks for one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    scale_factor: f64,
    domain_max: f64,
    ticks: Vec<f64>,
}

impl ValueScale {
    /// Computes `extent / domain` and the tick sequence `0, step, 2*step, ...`
    /// whose last entry is exactly the requested maximum, even when
    /// `NearestTen` rounded the domain used for the scale factor.
    ///
    /// Regular ticks that would reach or pass the maximum are dropped before the
    /// maximum is appended, so the sequence is always strictly increasing.
    pub fn compute(request: ScaleRequest) -> ChartResult<Self> {
        if !request.extent_px.is_finite() || request.extent_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "scale extent must be finite and > 0".to_owned(),
            ));
        }
        if !request.band_count.is_finite() || request.band_count < 1.0 {
            return Err(ChartError::InvalidData(
                "scale band count must be finite and >= 1".to_owned(),
            ));
        }
        if !request.domain_max.is_finite() || request.domain_max <= 0.0 {
            return Err(ChartError::EmptyDataset(format!(
                "value domain maximum must be > 0, got {}",
                request.domain_max
            )));
        }

        let exact_max = request.domain_max;
        let domain_max = match request.rounding {
            TickRounding::Exact => exact_max,
            TickRounding::NearestTen => round_to(exact_max, 10.0).max(10.0),
        };

        let raw_step = domain_max / request.band_count;
        let rounded_step = match request.rounding {
            TickRounding::Exact => raw_step.round(),
            TickRounding::NearestTen => round_to(raw_step, 10.0),
        };
        // Tiny domains would round the step away entirely.
        let step = if rounded_step > 0.0 {
            rounded_step
        } else {
            raw_step
        };

        let whole_bands = request.band_count.floor() as usize;
        let mut ticks: Vec<f64> = (0..whole_bands)
            .map(|band| band as f64 * step)
            .take_while(|tick| *tick < exact_max)
            .collect();
        ticks.push(exact_max);

        Ok(Self {
            scale_factor: request.extent_px / domain_max,
            domain_max,
            ticks,
        })
    }

    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    #[must_use]
    pub fn domain_max(&self) -> f64 {
        self.domain_max
    }

    #[must_use]
    pub fn ticks(&self) -> &[f64] {
        &self.ticks
    }

    /// Pixel distance above the baseline for `value`.
    #[must_use]
    pub fn value_to_offset(&self, value: f64) -> f64 {
        value * self.scale_factor
    }
}

#[cfg(test)]
mod tests {
    use super::{ScaleRequest, TickRounding, ValueScale, band_count_for};
    use crate::error::ChartError;

    #[test]
    fn final_tick_is_replaced_by_exact_maximum() {
        // 400 / 30 -> 13.33 bands, step round(7.5) = 8, regular tick 13 * 8 = 104.
        let scale =
            ValueScale::compute(ScaleRequest::from_band_size(100.0, 400.0, 30.0)).expect("scale");
        assert_eq!(scale.ticks().first(), Some(&0.0));
        assert_eq!(scale.ticks().last(), Some(&100.0));
        assert_eq!(scale.ticks()[12], 96.0);
        assert_eq!(scale.scale_factor(), 4.0);
    }

    #[test]
    fn small_fractional_domain_keeps_increasing_ticks() {
        let scale = ValueScale::compute(ScaleRequest::new(0.8, 400.0, 13.0)).expect("scale");
        assert!(scale.ticks().windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(scale.ticks().last(), Some(&0.8));
    }

    #[test]
    fn nearest_ten_rounds_domain_and_factor() {
        let scale = ValueScale::compute(
            ScaleRequest::new(87.0, 400.0, 10.0).with_rounding(TickRounding::NearestTen),
        )
        .expect("scale");
        assert_eq!(scale.domain_max(), 90.0);
        assert_eq!(scale.ticks(), &[0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 87.0]);
        assert!((scale.scale_factor() - 400.0 / 90.0).abs() <= 1e-12);
    }

    #[test]
    fn zero_maximum_is_an_empty_dataset() {
        let err = ValueScale::compute(ScaleRequest::new(0.0, 400.0, 10.0)).expect_err("zero max");
        assert!(matches!(err, ChartError::EmptyDataset(_)));
    }

    #[test]
    fn step_uses_the_unfloored_band_ratio() {
        // 1000 * 30 / 400 = 75, not round(1000 / 13) = 77.
        let scale =
            ValueScale::compute(ScaleRequest::from_band_size(1000.0, 400.0, 30.0)).expect("scale");
        let expected: Vec<f64> = (0..13)
            .map(|band| f64::from(band) * 75.0)
            .chain(std::iter::once(1000.0))
            .collect();
        assert_eq!(scale.ticks(), expected.as_slice());
    }

    #[test]
    fn sub_unit_band_count_is_rejected() {
        let err = ValueScale::compute(ScaleRequest::new(10.0, 400.0, 0.5)).expect_err("band count");
        assert!(matches!(err, ChartError::InvalidData(_)));
    }

    #[test]
    fn band_count_never_drops_below_one() {
        assert_eq!(band_count_for(10.0, 30.0), 1.0);
        assert_eq!(band_count_for(400.0, 40.0), 10.0);
        assert_eq!(band_count_for(400.0, 0.0), 1.0);
        assert!((band_count_for(400.0, 30.0) - 40.0 / 3.0).abs() <= 1e-12);
    }
}
