use crate::error::SeriesError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single dated data point in a time series.
///
/// The value is `None` when the source reports no data for that date (FRED
/// encodes these as `"."`). Missing values are never coerced to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

impl Observation {
    pub fn new(date: NaiveDate, value: Option<f64>) -> Self {
        Self { date, value }
    }
}

/// An ordered-by-date sequence of observations under one series code.
///
/// Invariant: observation dates are strictly increasing. `push` is the only
/// way to grow a series and it rejects duplicates and regressions, so any
/// `Series` handed to a transform can rely on the ordering.
///
/// A `Series` is built fresh on each fetch and discarded after the
/// transform/render pass; nothing in the workspace caches or persists one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// The source series code (e.g., "CPIAUCSL").
    pub id: String,
    /// A human-readable label for display (e.g., "CPI index").
    pub label: String,
    observations: Vec<Observation>,
}

impl Series {
    /// Creates an empty series for the given code and display label.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            observations: Vec::new(),
        }
    }

    /// Appends an observation, enforcing the strictly-increasing-date
    /// invariant.
    pub fn push(&mut self, obs: Observation) -> Result<(), SeriesError> {
        if let Some(last) = self.observations.last() {
            if obs.date == last.date {
                return Err(SeriesError::DuplicateDate {
                    series_id: self.id.clone(),
                    date: obs.date,
                });
            }
            if obs.date < last.date {
                return Err(SeriesError::OutOfOrderDate {
                    series_id: self.id.clone(),
                    date: obs.date,
                    previous: last.date,
                });
            }
        }
        self.observations.push(obs);
        Ok(())
    }

    /// Builds a series from pre-ordered observations, validating as it goes.
    pub fn from_observations(
        id: impl Into<String>,
        label: impl Into<String>,
        observations: impl IntoIterator<Item = Observation>,
    ) -> Result<Self, SeriesError> {
        let mut series = Self::new(id, label);
        for obs in observations {
            series.push(obs)?;
        }
        Ok(series)
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// The most recent observation that carries a value, if any.
    ///
    /// This feeds the dashboard's "latest reading" display; trailing missing
    /// observations (common while FRED awaits a release) are skipped.
    pub fn latest_value(&self) -> Option<(NaiveDate, f64)> {
        self.observations
            .iter()
            .rev()
            .find_map(|obs| obs.value.map(|v| (obs.date, v)))
    }
}
