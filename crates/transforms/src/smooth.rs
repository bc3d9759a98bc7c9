use crate::error::TransformError;
use core_types::{Observation, Series};

/// Applies a trailing rolling mean for display smoothing.
///
/// The output has a point at position `t` only when the `window`
/// observations ending at `t` are all present; a window touching a missing
/// value produces no point, so gaps in the input stay visible as gaps.
pub fn rolling_mean(series: &Series, window: usize) -> Result<Series, TransformError> {
    if window == 0 {
        return Err(TransformError::InvalidParameter(
            "rolling mean window must be at least 1".to_string(),
        ));
    }

    let obs = series.observations();
    let mut out = Series::new(series.id.clone(), series.label.clone());

    for t in (window - 1)..obs.len() {
        let window_values: Option<Vec<f64>> =
            obs[t + 1 - window..=t].iter().map(|o| o.value).collect();
        let Some(values) = window_values else {
            continue;
        };
        let mean = values.iter().sum::<f64>() / window as f64;
        out.push(Observation::new(obs[t].date, Some(mean)))
            .map_err(|e| TransformError::Internal(e.to_string()))?;
    }

    if out.is_empty() {
        return Err(TransformError::EmptySeries(series.id.clone()));
    }
    Ok(out)
}
