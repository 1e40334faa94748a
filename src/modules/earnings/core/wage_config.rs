// Wage configuration: what the user earns and how to turn it into an hourly rate.
//
// Invariants
// - `rate` and `hours_per_week` are either unset or strictly positive and finite.
// - `hours_per_week` is only kept for the yearly kind.
// - The derived hourly rate is finite.

use serde::{Deserialize, Serialize};

pub const WEEKS_PER_YEAR: f64 = 52.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WageKind {
    #[default]
    Hourly,
    Yearly,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum WageConfigError {
    #[error("wage must be a positive number, got {0}")]
    NonPositiveRate(f64),

    #[error("hours per week must be a positive number, got {0}")]
    NonPositiveHours(f64),

    #[error("{salary} a year over {hours_per_week} hours a week is not a finite hourly rate")]
    UnboundedHourlyRate { salary: f64, hours_per_week: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct WageConfig {
    kind: WageKind,
    rate: Option<f64>,
    hours_per_week: Option<f64>,
}

fn validate(value: Option<f64>, error: fn(f64) -> WageConfigError) -> Result<Option<f64>, WageConfigError> {
    match value {
        Some(v) if !v.is_finite() || v <= 0.0 => Err(error(v)),
        other => Ok(other),
    }
}

impl WageConfig {
    pub fn new(
        kind: WageKind,
        rate: Option<f64>,
        hours_per_week: Option<f64>,
    ) -> Result<Self, WageConfigError> {
        let rate = validate(rate, WageConfigError::NonPositiveRate)?;
        let hours_per_week = match kind {
            WageKind::Hourly => None,
            WageKind::Yearly => validate(hours_per_week, WageConfigError::NonPositiveHours)?,
        };
        let config = Self {
            kind,
            rate,
            hours_per_week,
        };
        if !config.hourly_rate().is_finite() {
            return Err(WageConfigError::UnboundedHourlyRate {
                salary: rate.unwrap_or_default(),
                hours_per_week: hours_per_week.unwrap_or_default(),
            });
        }
        Ok(config)
    }

    /// An empty configuration of the given kind.
    pub fn unset(kind: WageKind) -> Self {
        Self {
            kind,
            rate: None,
            hours_per_week: None,
        }
    }

    pub fn kind(&self) -> WageKind {
        self.kind
    }

    pub fn rate(&self) -> Option<f64> {
        self.rate
    }

    pub fn hours_per_week(&self) -> Option<f64> {
        self.hours_per_week
    }

    /// Dollars per hour. Zero while a required field is unset.
    pub fn hourly_rate(&self) -> f64 {
        match (self.kind, self.rate, self.hours_per_week) {
            (WageKind::Hourly, Some(rate), _) => rate,
            (WageKind::Yearly, Some(salary), Some(hours)) => salary / (hours * WEEKS_PER_YEAR),
            _ => 0.0,
        }
    }

    /// Whether every field the kind requires is set, which is what starting the timer needs.
    pub fn can_run(&self) -> bool {
        match self.kind {
            WageKind::Hourly => self.rate.is_some(),
            WageKind::Yearly => self.rate.is_some() && self.hours_per_week.is_some(),
        }
    }
}
