use crate::error::PanelError;
use chrono::NaiveDate;
use core_types::Series;
use fred_client::ObservationSource;
use serde::Serialize;
use transforms::{monthly_mean, rolling_mean, year_over_year, TransformError};

/// The display-only smoothing window, in periods.
const SMOOTH_WINDOW: usize = 3;

/// Which derivation a panel applies to its raw series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Derivation {
    /// Year-over-year percentage change of a monthly index.
    YearOverYear,
    /// Calendar-month arithmetic mean of a higher-frequency series.
    MonthlyMean,
    /// The series as the source reports it.
    AsReported,
}

/// The static description of one dashboard panel.
///
/// The FRED codes are configuration constants of the dashboard, not user
/// input; changing the lineup means editing this table.
pub struct PanelSpec {
    pub series_id: &'static str,
    pub label: &'static str,
    pub title: &'static str,
    pub unit: &'static str,
    pub derivation: Derivation,
}

/// The three panels of the macro dashboard.
pub const PANELS: [PanelSpec; 3] = [
    PanelSpec {
        series_id: "CPIAUCSL",
        label: "CPI index",
        title: "CPI Year-over-Year (computed from CPIAUCSL)",
        unit: "%",
        derivation: Derivation::YearOverYear,
    },
    PanelSpec {
        series_id: "UNRATE",
        label: "Unemployment rate",
        title: "Unemployment Rate (UNRATE)",
        unit: "%",
        derivation: Derivation::AsReported,
    },
    PanelSpec {
        series_id: "DFII10",
        label: "10Y real yield",
        title: "10-Year Real Yield (DFII10 monthly average)",
        unit: "%",
        derivation: Derivation::MonthlyMean,
    },
];

/// A single point ready for chart rendering. Omitted periods simply have no
/// entry; the frontend draws gaps, it never invents values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// The most recent reading of a panel, for the metric row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatestReading {
    pub date: NaiveDate,
    pub value: f64,
}

/// The outcome of one panel's fetch-and-transform pass.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PanelOutcome {
    Ok {
        points: Vec<ChartPoint>,
        latest: LatestReading,
    },
    Error {
        message: String,
    },
}

/// One rendered dashboard panel: static description plus outcome.
#[derive(Debug, Clone, Serialize)]
pub struct Panel {
    pub series_id: &'static str,
    pub title: &'static str,
    pub unit: &'static str,
    pub derivation: Derivation,
    #[serde(flatten)]
    pub outcome: PanelOutcome,
}

/// The full dashboard payload.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub start: NaiveDate,
    pub smooth: bool,
    pub panels: Vec<Panel>,
}

/// Fetches, transforms, and assembles all panels.
///
/// The three fetches run concurrently as a latency optimization; the
/// dashboard is assembled only once every panel has settled. Failures are
/// isolated per panel: a dead series yields an error message on its own
/// chart and leaves the others untouched.
pub async fn build_dashboard(
    source: &dyn ObservationSource,
    start: NaiveDate,
    smooth: bool,
) -> Dashboard {
    let outcomes = futures::future::join_all(
        PANELS
            .iter()
            .map(|spec| build_panel(source, spec, start, smooth)),
    )
    .await;

    let panels = PANELS
        .iter()
        .zip(outcomes)
        .map(|(spec, outcome)| Panel {
            series_id: spec.series_id,
            title: spec.title,
            unit: spec.unit,
            derivation: spec.derivation,
            outcome,
        })
        .collect();

    Dashboard {
        start,
        smooth,
        panels,
    }
}

async fn build_panel(
    source: &dyn ObservationSource,
    spec: &PanelSpec,
    start: NaiveDate,
    smooth: bool,
) -> PanelOutcome {
    match panel_series(source, spec, start, smooth).await {
        Ok(series) => {
            // Derived series only carry present values, so `latest_value`
            // is `Some` whenever the series is non-empty.
            match series.latest_value() {
                Some((date, value)) => PanelOutcome::Ok {
                    points: chart_points(&series),
                    latest: LatestReading { date, value },
                },
                None => PanelOutcome::Error {
                    message: TransformError::EmptySeries(spec.series_id.to_string()).to_string(),
                },
            }
        }
        Err(err) => {
            tracing::warn!(series_id = spec.series_id, error = %err, "panel failed");
            PanelOutcome::Error {
                message: err.to_string(),
            }
        }
    }
}

async fn panel_series(
    source: &dyn ObservationSource,
    spec: &PanelSpec,
    start: NaiveDate,
    smooth: bool,
) -> Result<Series, PanelError> {
    let raw = source
        .fetch_series(spec.series_id, spec.label, Some(start))
        .await?;

    let derived = match spec.derivation {
        Derivation::YearOverYear => year_over_year(&raw)?,
        Derivation::MonthlyMean => monthly_mean(&raw)?,
        Derivation::AsReported => {
            if raw.latest_value().is_none() {
                return Err(TransformError::EmptySeries(spec.series_id.to_string()).into());
            }
            raw
        }
    };

    if smooth {
        Ok(rolling_mean(&derived, SMOOTH_WINDOW)?)
    } else {
        Ok(derived)
    }
}

fn chart_points(series: &Series) -> Vec<ChartPoint> {
    series
        .observations()
        .iter()
        .filter_map(|obs| {
            obs.value.map(|value| ChartPoint {
                date: obs.date,
                value,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use core_types::Observation;
    use fred_client::ApiError;
    use std::collections::HashMap;

    /// A canned source: series by id, with explicitly failing ids.
    struct MockSource {
        series: HashMap<&'static str, Vec<Observation>>,
        failing: Vec<&'static str>,
    }

    #[async_trait]
    impl ObservationSource for MockSource {
        async fn fetch_series(
            &self,
            series_id: &str,
            label: &str,
            _start: Option<NaiveDate>,
        ) -> Result<Series, ApiError> {
            if self.failing.contains(&series_id) {
                return Err(ApiError::UnknownSeries(series_id.to_string()));
            }
            let observations = self
                .series
                .get(series_id)
                .cloned()
                .unwrap_or_default();
            Series::from_observations(series_id, label, observations)
                .map_err(|e| ApiError::MalformedResponse(e.to_string()))
        }
    }

    fn month(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// 13 monthly CPI points (Jan 2023 .. Jan 2024), 100.0 rising to 104.0.
    fn cpi_observations() -> Vec<Observation> {
        let mut out: Vec<Observation> = (0..12)
            .map(|i| {
                let (y, m) = (2023, i as u32 + 1);
                Observation::new(month(y, m), Some(100.0 + i as f64 * 0.3))
            })
            .collect();
        out.push(Observation::new(month(2024, 1), Some(104.0)));
        out
    }

    fn unrate_observations() -> Vec<Observation> {
        vec![
            Observation::new(month(2024, 1), Some(3.7)),
            Observation::new(month(2024, 2), Some(3.9)),
            Observation::new(month(2024, 3), Some(3.8)),
        ]
    }

    fn dfii10_observations() -> Vec<Observation> {
        vec![
            Observation::new(date(2024, 3, 1), Some(1.80)),
            Observation::new(date(2024, 3, 4), Some(1.82)),
            Observation::new(date(2024, 3, 5), Some(1.78)),
        ]
    }

    fn full_source() -> MockSource {
        MockSource {
            series: HashMap::from([
                ("CPIAUCSL", cpi_observations()),
                ("UNRATE", unrate_observations()),
                ("DFII10", dfii10_observations()),
            ]),
            failing: vec![],
        }
    }

    fn start() -> NaiveDate {
        month(2000, 1)
    }

    #[tokio::test]
    async fn all_panels_render_from_a_healthy_source() {
        let dashboard = build_dashboard(&full_source(), start(), false).await;

        assert_eq!(dashboard.panels.len(), 3);
        for panel in &dashboard.panels {
            assert!(
                matches!(panel.outcome, PanelOutcome::Ok { .. }),
                "panel {} failed",
                panel.series_id
            );
        }

        // CPI panel: exactly one YoY point of 4.0 at Jan 2024.
        let PanelOutcome::Ok { points, latest } = &dashboard.panels[0].outcome else {
            unreachable!()
        };
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date, month(2024, 1));
        assert!((points[0].value - 4.0).abs() < 1e-9);
        assert!((latest.value - 4.0).abs() < 1e-9);

        // Real-yield panel: one March point near 1.8.
        let PanelOutcome::Ok { points, .. } = &dashboard.panels[2].outcome else {
            unreachable!()
        };
        assert_eq!(points.len(), 1);
        assert!((points[0].value - 1.8).abs() < 1e-9);
    }

    #[tokio::test]
    async fn one_failing_series_leaves_the_other_panels_intact() {
        let mut source = full_source();
        source.failing.push("UNRATE");

        let dashboard = build_dashboard(&source, start(), false).await;

        assert!(matches!(
            dashboard.panels[0].outcome,
            PanelOutcome::Ok { .. }
        ));
        assert!(matches!(
            dashboard.panels[2].outcome,
            PanelOutcome::Ok { .. }
        ));
        let PanelOutcome::Error { message } = &dashboard.panels[1].outcome else {
            panic!("expected the UNRATE panel to fail");
        };
        assert!(message.contains("UNRATE"));
    }

    #[tokio::test]
    async fn an_empty_series_degrades_to_a_panel_message() {
        let mut source = full_source();
        source.series.insert("UNRATE", vec![]);

        let dashboard = build_dashboard(&source, start(), false).await;

        let PanelOutcome::Error { message } = &dashboard.panels[1].outcome else {
            panic!("expected the UNRATE panel to report an empty series");
        };
        assert!(message.contains("zero points"));
        assert!(matches!(
            dashboard.panels[0].outcome,
            PanelOutcome::Ok { .. }
        ));
    }

    #[tokio::test]
    async fn smoothing_applies_a_trailing_window() {
        let dashboard = build_dashboard(&full_source(), start(), true).await;

        // UNRATE has three points; a 3-period trailing mean leaves one.
        let PanelOutcome::Ok { points, .. } = &dashboard.panels[1].outcome else {
            panic!("expected the UNRATE panel to render");
        };
        assert_eq!(points.len(), 1);
        assert!((points[0].value - (3.7 + 3.9 + 3.8) / 3.0).abs() < 1e-9);
    }
}
