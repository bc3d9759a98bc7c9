use crate::error::TransformError;
use core_types::{Observation, Series};

/// How many periods apart "a year" is for a monthly-sampled series.
const YOY_LAG: usize = 12;

/// Computes the year-over-year percentage change of a monthly index series.
///
/// For each position `t >= 12` where both `value[t]` and `value[t-12]` are
/// present, the output point is `(value[t] - value[t-12]) / value[t-12] *
/// 100` at `t`'s date. Positions with a missing current value, a missing
/// prior value, or a prior value of exactly zero produce no output point:
/// the change there is undefined, and an omitted point renders as a gap
/// rather than a fabricated zero or an infinity.
///
/// Returns `EmptySeries` when no position qualifies, so the caller can show
/// an empty-chart message instead of a blank axis.
pub fn year_over_year(series: &Series) -> Result<Series, TransformError> {
    let obs = series.observations();
    let mut out = Series::new(series.id.clone(), series.label.clone());

    for t in YOY_LAG..obs.len() {
        let (Some(current), Some(prior)) = (obs[t].value, obs[t - YOY_LAG].value) else {
            continue;
        };
        if prior == 0.0 {
            continue;
        }
        let change = (current - prior) / prior * 100.0;
        out.push(Observation::new(obs[t].date, Some(change)))
            .map_err(|e| TransformError::Internal(e.to_string()))?;
    }

    if out.is_empty() {
        return Err(TransformError::EmptySeries(series.id.clone()));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn month(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    /// Builds a monthly series starting January of `start_year`.
    fn monthly_series(start_year: i32, values: &[Option<f64>]) -> Series {
        let mut out = Series::new("CPIAUCSL", "CPI index");
        let mut year = start_year;
        let mut m = 1;
        for value in values {
            out.push(Observation::new(month(year, m), *value)).unwrap();
            m += 1;
            if m > 12 {
                m = 1;
                year += 1;
            }
        }
        out
    }

    #[test]
    fn thirteen_monthly_points_yield_exactly_one_yoy_point() {
        // Jan Y1 = 100.0 ... Jan Y2 = 104.0: only Jan Y2 has a 12-back prior.
        let mut values: Vec<Option<f64>> = (0..12).map(|i| Some(100.0 + i as f64 * 0.3)).collect();
        values.push(Some(104.0));
        let input = monthly_series(2023, &values);

        let yoy = year_over_year(&input).unwrap();
        assert_eq!(yoy.len(), 1);
        let point = yoy.observations()[0];
        assert_eq!(point.date, month(2024, 1));
        assert!((point.value.unwrap() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn first_twelve_periods_never_appear() {
        let values: Vec<Option<f64>> = (0..30).map(|i| Some(100.0 + i as f64)).collect();
        let input = monthly_series(2020, &values);

        let yoy = year_over_year(&input).unwrap();
        assert_eq!(yoy.len(), 30 - 12);
        let cutoff = input.observations()[12].date;
        assert!(yoy.observations().iter().all(|o| o.date >= cutoff));
    }

    #[test]
    fn formula_is_exact_where_defined() {
        let values: Vec<Option<f64>> = (0..24).map(|i| Some(100.0 * 1.01f64.powi(i))).collect();
        let input = monthly_series(2020, &values);

        let yoy = year_over_year(&input).unwrap();
        for (t, point) in (12..24).zip(yoy.observations()) {
            let expected = (values[t].unwrap() - values[t - 12].unwrap()) / values[t - 12].unwrap()
                * 100.0;
            assert!((point.value.unwrap() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn missing_prior_is_omitted_not_filled() {
        let mut values: Vec<Option<f64>> = (0..26).map(|i| Some(100.0 + i as f64)).collect();
        values[2] = None; // prior of position 14

        let input = monthly_series(2020, &values);
        let yoy = year_over_year(&input).unwrap();

        let gap_date = input.observations()[14].date;
        assert!(yoy.observations().iter().all(|o| o.date != gap_date));
        assert_eq!(yoy.len(), 26 - 12 - 1);
    }

    #[test]
    fn missing_current_is_omitted() {
        let mut values: Vec<Option<f64>> = (0..26).map(|i| Some(100.0 + i as f64)).collect();
        values[20] = None;

        let input = monthly_series(2020, &values);
        let yoy = year_over_year(&input).unwrap();

        let gap_date = input.observations()[20].date;
        assert!(yoy.observations().iter().all(|o| o.date != gap_date));
    }

    #[test]
    fn zero_prior_is_omitted_not_infinite() {
        let mut values: Vec<Option<f64>> = (0..26).map(|i| Some(100.0 + i as f64)).collect();
        values[5] = Some(0.0); // prior of position 17

        let input = monthly_series(2020, &values);
        let yoy = year_over_year(&input).unwrap();

        let gap_date = input.observations()[17].date;
        assert!(yoy.observations().iter().all(|o| o.date != gap_date));
        assert!(yoy
            .observations()
            .iter()
            .all(|o| o.value.unwrap().is_finite()));
    }

    #[test]
    fn too_short_series_is_empty_error() {
        let values: Vec<Option<f64>> = (0..12).map(|i| Some(100.0 + i as f64)).collect();
        let input = monthly_series(2023, &values);
        let err = year_over_year(&input).unwrap_err();
        assert_eq!(err, TransformError::EmptySeries("CPIAUCSL".to_string()));
    }
}
