use crate::error::TransformError;
use chrono::Datelike;
use core_types::{Observation, Series};

/// One calendar month's worth of accumulated values.
struct MonthBucket {
    year: i32,
    month: u32,
    first_present: Option<Observation>,
    sum: f64,
    count: usize,
}

impl MonthBucket {
    fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            first_present: None,
            sum: 0.0,
            count: 0,
        }
    }

    fn absorb(&mut self, obs: Observation) {
        if let Some(value) = obs.value {
            if self.first_present.is_none() {
                self.first_present = Some(obs);
            }
            self.sum += value;
            self.count += 1;
        }
    }

    /// The month's mean, dated at its first non-missing observation.
    /// A month where every value was missing yields nothing.
    fn finish(self) -> Option<Observation> {
        let first = self.first_present?;
        Some(Observation::new(first.date, Some(self.sum / self.count as f64)))
    }
}

/// Resamples a series to monthly granularity by arithmetic mean.
///
/// Observations are grouped strictly by calendar month; missing values are
/// excluded from the mean, and a month with zero non-missing values produces
/// no output point. Each output point carries the date of the month's first
/// non-missing observation, which makes the transform idempotent on input
/// that is already one point per month.
pub fn monthly_mean(series: &Series) -> Result<Series, TransformError> {
    let mut out = Series::new(series.id.clone(), series.label.clone());
    let mut bucket: Option<MonthBucket> = None;

    for obs in series.observations().iter().copied() {
        let (year, month) = (obs.date.year(), obs.date.month());
        match bucket.as_mut() {
            Some(b) if b.year == year && b.month == month => b.absorb(obs),
            _ => {
                // Input dates are strictly increasing, so a new (year, month)
                // key means the previous bucket is complete.
                if let Some(point) = bucket.take().and_then(MonthBucket::finish) {
                    out.push(point)
                        .map_err(|e| TransformError::Internal(e.to_string()))?;
                }
                let mut next = MonthBucket::new(year, month);
                next.absorb(obs);
                bucket = Some(next);
            }
        }
    }
    if let Some(point) = bucket.take().and_then(MonthBucket::finish) {
        out.push(point)
            .map_err(|e| TransformError::Internal(e.to_string()))?;
    }

    if out.is_empty() {
        return Err(TransformError::EmptySeries(series.id.clone()));
    }
    Ok(out)
}
