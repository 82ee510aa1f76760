//! Synthetic daily blood pressure and glucose series for the analytics chart.
//!
//! The values are random draws, not patient data. Systolic pressure is sampled from
//! Normal(140, 10) and glucose from Normal(150, 20), one reading per calendar day.

use crate::config::validate_analytics_days;
use crate::constants::{BLOOD_PRESSURE_MEAN, BLOOD_PRESSURE_SD, GLUCOSE_MEAN, GLUCOSE_SD};
use crate::{CareError, CareResult};
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyReading {
    pub date: NaiveDate,
    pub blood_pressure: f64,
    pub glucose: f64,
}

/// Mean, minimum and maximum of one metric across the series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub blood_pressure: MetricSummary,
    pub glucose: MetricSummary,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSeries {
    pub readings: Vec<DailyReading>,
}

/// Generates `days` consecutive daily readings starting at `start`.
///
/// # Arguments
///
/// * `start` - Date of the first reading.
/// * `days` - Number of readings, `1..=MAX_ANALYTICS_DAYS`.
/// * `seed` - Fixes the random draws when given; otherwise the RNG is seeded from entropy.
///
/// # Errors
///
/// Returns `CareError::InvalidInput` if `days` is out of range or the window runs past the
/// last representable date.
pub fn generate_series(
    start: NaiveDate,
    days: usize,
    seed: Option<u64>,
) -> CareResult<AnalyticsSeries> {
    validate_analytics_days(days)?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut readings = Vec::with_capacity(days);
    for offset in 0..days {
        let date = start
            .checked_add_days(Days::new(offset as u64))
            .ok_or_else(|| {
                CareError::InvalidInput("analytics window overflows the calendar".into())
            })?;
        readings.push(DailyReading {
            date,
            blood_pressure: gaussian(BLOOD_PRESSURE_MEAN, BLOOD_PRESSURE_SD, &mut rng),
            glucose: gaussian(GLUCOSE_MEAN, GLUCOSE_SD, &mut rng),
        });
    }

    tracing::debug!(%start, days, seeded = seed.is_some(), "generated analytics series");
    Ok(AnalyticsSeries { readings })
}

/// Box-Muller draw from Normal(mean, sd).
fn gaussian(mean: f64, sd: f64, rng: &mut impl Rng) -> f64 {
    // Lower bound keeps ln() finite.
    let u1: f64 = rng.gen_range(f64::MIN_POSITIVE..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    let r = (-2.0 * u1.ln()).sqrt();
    let theta = 2.0 * std::f64::consts::PI * u2;
    mean + sd * r * theta.cos()
}

impl AnalyticsSeries {
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Summarises both metrics, or `None` for an empty series.
    pub fn summary(&self) -> Option<SeriesSummary> {
        Some(SeriesSummary {
            blood_pressure: summarise(self.readings.iter().map(|r| r.blood_pressure))?,
            glucose: summarise(self.readings.iter().map(|r| r.glucose))?,
        })
    }

    /// CSV export with a `Date,Blood Pressure,Glucose` header, values to two decimals.
    pub fn to_csv(&self) -> String {
        let mut output = String::from("Date,Blood Pressure,Glucose\n");
        for reading in &self.readings {
            output.push_str(&format!(
                "{},{:.2},{:.2}\n",
                reading.date, reading.blood_pressure, reading.glucose
            ));
        }
        output
    }
}

fn summarise(values: impl Iterator<Item = f64>) -> Option<MetricSummary> {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        count += 1;
        sum += v;
        min = min.min(v);
        max = max.max(v);
    }
    if count == 0 {
        return None;
    }
    Some(MetricSummary {
        mean: sum / count as f64,
        min,
        max,
    })
}
