//! High-cardinality generation loop.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::error::{CardstormError, Result};
use crate::labels;
use crate::registry::SeriesStore;

pub const DEFAULT_SERIES_COUNT: u64 = 10_000;
pub const DEFAULT_VALUE_RANGE: f64 = 1_000.0;
pub const DEFAULT_PROGRESS_EVERY: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerateRequest {
    /// Indices `0..series_count` are touched.
    pub series_count: u64,
    /// Gauge values are drawn from `[0, value_range)`.
    pub value_range: f64,
    /// Log progress every this many series; 0 disables.
    pub progress_every: u64,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            series_count: DEFAULT_SERIES_COUNT,
            value_range: DEFAULT_VALUE_RANGE,
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }
}

impl GenerateRequest {
    pub fn validate(&self) -> Result<()> {
        if !self.value_range.is_finite() || self.value_range <= 0.0 {
            return Err(CardstormError::BadRequest(format!(
                "value_range must be a positive number, got {}",
                self.value_range
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationReport {
    pub generated: u64,
    pub elapsed: Duration,
}

impl GenerationReport {
    /// Elapsed seconds rounded to two decimals, as reported to clients.
    pub fn duration_secs_rounded(&self) -> f64 {
        (self.elapsed.as_secs_f64() * 100.0).round() / 100.0
    }
}

/// Touch `req.series_count` series in both high-cardinality families.
///
/// Each index sets the gauge to a fresh uniform draw and bumps the counter by
/// one. Indices reached by an earlier call reuse their series; new indices add
/// new ones. Runs to completion; there is no partial result.
pub fn generate<R: Rng>(
    store: &SeriesStore,
    req: &GenerateRequest,
    rng: &mut R,
) -> Result<GenerationReport> {
    req.validate()?;

    let start = Instant::now();
    tracing::info!(series_count = req.series_count, "starting high-cardinality generation");

    let mut generated = 0u64;
    for i in 0..req.series_count {
        let labels = labels::derive(i);
        store.set_gauge(&labels, rng.gen_range(0.0..req.value_range));
        store.inc_counter(&labels);

        generated += 1;
        if req.progress_every > 0 && generated.is_multiple_of(req.progress_every) {
            tracing::info!(generated, "generated series");
        }
    }

    let report = GenerationReport {
        generated,
        elapsed: start.elapsed(),
    };
    tracing::info!(
        generated,
        duration_secs = %format!("{:.2}", report.elapsed.as_secs_f64()),
        "finished high-cardinality generation"
    );
    Ok(report)
}
