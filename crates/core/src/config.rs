//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services.
//! Request handlers never read environment variables; binaries call the `*_from_env_value`
//! helpers with whatever `std::env::var` returned and build a [`CoreConfig`] from the result.

use crate::constants::{DEFAULT_ANALYTICS_DAYS, MAX_ANALYTICS_DAYS};
use crate::{CareError, CareResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    analytics_days: usize,
    analytics_seed: Option<u64>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `CareError::InvalidInput` if `analytics_days` is zero or exceeds
    /// [`MAX_ANALYTICS_DAYS`].
    pub fn new(analytics_days: usize, analytics_seed: Option<u64>) -> CareResult<Self> {
        validate_analytics_days(analytics_days)?;

        Ok(Self {
            analytics_days,
            analytics_seed,
        })
    }

    /// Default analytics window used when a request does not name one.
    pub fn analytics_days(&self) -> usize {
        self.analytics_days
    }

    /// Seed applied to analytics requests that do not carry their own.
    pub fn analytics_seed(&self) -> Option<u64> {
        self.analytics_seed
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            analytics_days: DEFAULT_ANALYTICS_DAYS,
            analytics_seed: None,
        }
    }
}

pub(crate) fn validate_analytics_days(days: usize) -> CareResult<()> {
    if days == 0 {
        return Err(CareError::InvalidInput(
            "analytics window must cover at least one day".into(),
        ));
    }
    if days > MAX_ANALYTICS_DAYS {
        return Err(CareError::InvalidInput(format!(
            "analytics window exceeds maximum of {} days",
            MAX_ANALYTICS_DAYS
        )));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the analytics window length from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_ANALYTICS_DAYS`].
pub fn analytics_days_from_env_value(value: Option<String>) -> CareResult<usize> {
    match non_blank(value) {
        None => Ok(DEFAULT_ANALYTICS_DAYS),
        Some(v) => v.parse::<usize>().map_err(|e| {
            CareError::InvalidInput(format!("DIABP_ANALYTICS_DAYS is not a number: {e}"))
        }),
    }
}

/// Parse an optional analytics seed. Blank values mean "draw from entropy".
pub fn analytics_seed_from_env_value(value: Option<String>) -> CareResult<Option<u64>> {
    non_blank(value)
        .map(|v| {
            v.parse::<u64>().map_err(|e| {
                CareError::InvalidInput(format!("DIABP_ANALYTICS_SEED is not a number: {e}"))
            })
        })
        .transpose()
}
