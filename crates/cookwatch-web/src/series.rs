//! Per-session time series (temperature, motion) and the closest-sample query.

use std::fmt;

use chrono::NaiveDateTime;
use cookwatch_types::{ClosestSample, SeriesPoint};
use tracing::error;

use crate::db::{self, Db};
use crate::util::time::{format_datetime, parse_local_datetime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Temperature,
    Motion,
}

impl SeriesKind {
    pub fn name(self) -> &'static str {
        match self {
            SeriesKind::Temperature => "temperature",
            SeriesKind::Motion => "motion",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample<V> {
    pub at: NaiveDateTime,
    pub value: V,
}

impl<V: Copy> Sample<V> {
    pub fn to_point(&self) -> SeriesPoint<V> {
        SeriesPoint {
            datetime: format_datetime(&self.at),
            value: self.value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClosestError {
    NoData(SeriesKind),
    InvalidDatetime,
}

impl fmt::Display for ClosestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClosestError::NoData(kind) => write!(f, "No {} data available", kind.name()),
            ClosestError::InvalidDatetime => f.write_str("Invalid datetime format"),
        }
    }
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Temperature samples for a session in Celsius, ascending by time.
/// Storage failures degrade to an empty series.
pub fn temperature_series(db: &Db, session_number: i64) -> Vec<Sample<f64>> {
    match db::load_temperature_samples(db, session_number) {
        Ok(samples) => samples
            .into_iter()
            .map(|sample| Sample {
                at: sample.at,
                value: fahrenheit_to_celsius(sample.value),
            })
            .collect(),
        Err(error) => {
            error!(%error, session_number, "failed to load temperature series");
            Vec::new()
        }
    }
}

pub fn motion_series(db: &Db, session_number: i64) -> Vec<Sample<bool>> {
    db::load_motion_samples(db, session_number).unwrap_or_else(|error| {
        error!(%error, session_number, "failed to load motion series");
        Vec::new()
    })
}

/// Sample nearest to `target` by absolute whole-second distance. The scan
/// runs in series order and only a strictly smaller distance replaces the
/// current best, so ties go to the earlier sample.
pub fn nearest<V>(samples: &[Sample<V>], target: NaiveDateTime) -> Option<(usize, &Sample<V>)> {
    let mut best: Option<(usize, &Sample<V>, i64)> = None;
    for (index, sample) in samples.iter().enumerate() {
        let distance = (sample.at - target).num_seconds().abs();
        match best {
            Some((_, _, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, sample, distance)),
        }
    }
    best.map(|(index, sample, _)| (index, sample))
}

/// Parses `raw_target` and finds the nearest sample. The target is validated
/// before the series is inspected.
pub fn closest<V: Copy>(
    kind: SeriesKind,
    samples: &[Sample<V>],
    raw_target: &str,
) -> Result<ClosestSample<V>, ClosestError> {
    let target = parse_local_datetime(raw_target).ok_or(ClosestError::InvalidDatetime)?;
    let (index, sample) = nearest(samples, target).ok_or(ClosestError::NoData(kind))?;
    Ok(ClosestSample {
        datetime: format_datetime(&sample.at),
        value: sample.value,
        index: Some(index),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{exec, scratch_db};
    use chrono::{Duration, NaiveDate};

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .expect("valid fixture datetime")
    }

    #[test]
    fn closest_picks_nearer_later_sample() {
        let db = scratch_db("series-scenario");
        exec(
            &db,
            "INSERT INTO temperature (session, datetime, value) VALUES
               (42, '2024-03-01 10:00:00', 70.0),
               (42, '2024-03-01 10:05:00', 75.0);",
        );
        let samples = temperature_series(&db, 42);
        let found = closest(SeriesKind::Temperature, &samples, "2024-03-01T10:03")
            .expect("closest sample");

        assert_eq!(found.datetime, "2024-03-01T10:05:00");
        assert_eq!(found.index, Some(1));
        assert!(
            (found.value - 23.89).abs() < 0.01,
            "75F should read as ~23.89C, got {}",
            found.value
        );
    }

    #[test]
    fn tie_goes_to_earlier_sample() {
        let target = at(10, 0, 0);
        let samples = vec![
            Sample {
                at: target - Duration::seconds(5),
                value: 1.0,
            },
            Sample {
                at: target + Duration::seconds(5),
                value: 2.0,
            },
        ];
        let (index, sample) = nearest(&samples, target).expect("non-empty");
        assert_eq!(index, 0);
        assert_eq!(sample.value, 1.0);
    }

    #[test]
    fn empty_series_reports_no_data_per_kind() {
        let empty: Vec<Sample<bool>> = Vec::new();
        let error = closest(SeriesKind::Motion, &empty, "2024-03-01T10:00:00")
            .expect_err("empty series");
        assert_eq!(error.to_string(), "No motion data available");

        let empty: Vec<Sample<f64>> = Vec::new();
        let error = closest(SeriesKind::Temperature, &empty, "2024-03-01T10:00:00")
            .expect_err("empty series");
        assert_eq!(error.to_string(), "No temperature data available");
    }

    #[test]
    fn malformed_target_is_rejected_regardless_of_data() {
        let samples = vec![Sample {
            at: at(10, 0, 0),
            value: true,
        }];
        for raw in ["", "10:00", "2024-03-01T10:00:00Z", "2024-03-01 10:00:00"] {
            let error = closest(SeriesKind::Motion, &samples, raw).expect_err(raw);
            assert_eq!(error, ClosestError::InvalidDatetime, "input {raw:?}");
        }
        let empty: Vec<Sample<bool>> = Vec::new();
        assert_eq!(
            closest(SeriesKind::Motion, &empty, "garbage"),
            Err(ClosestError::InvalidDatetime)
        );
    }

    #[test]
    fn distance_is_absolute() {
        let samples = vec![
            Sample {
                at: at(9, 0, 0),
                value: 0,
            },
            Sample {
                at: at(9, 59, 0),
                value: 1,
            },
            Sample {
                at: at(11, 0, 0),
                value: 2,
            },
        ];
        let (index, _) = nearest(&samples, at(10, 0, 0)).expect("non-empty");
        assert_eq!(index, 1);
        let (index, _) = nearest(&samples, at(23, 0, 0)).expect("non-empty");
        assert_eq!(index, 2);
    }

    #[test]
    fn conversion_matches_reference_points() {
        assert_eq!(fahrenheit_to_celsius(32.0), 0.0);
        assert_eq!(fahrenheit_to_celsius(212.0), 100.0);
    }

    #[test]
    fn storage_failure_yields_empty_series() {
        let db = Db::new(
            std::env::temp_dir()
                .join("cookwatch-no-such-dir")
                .join("series.sqlite"),
        );
        assert!(temperature_series(&db, 1).is_empty());
        assert!(motion_series(&db, 1).is_empty());
    }
}
