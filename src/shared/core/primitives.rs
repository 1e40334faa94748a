// Small value helpers shared by every module.
//
// Purpose
// - Currency display in the en-US style used by notes and views ("$1,234.56").
// - Plain number text for exported values.
// - A wall clock port so records and change history entries get testable timestamps.

use chrono::{DateTime, Local};

/// Formats an amount as US dollars with thousands separators and exactly two decimals.
/// Works from the decimal expansion, so magnitudes of any size keep every whole digit.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${amount}");
    }
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (position, digit) in whole.chars().enumerate() {
        if position > 0 && (whole.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let rounds_to_zero = fixed.bytes().all(|byte| matches!(byte, b'0' | b'.'));
    let sign = if amount < 0.0 && !rounds_to_zero { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// Shortest decimal text that reads back as the same number. Magnitudes below 1e-6 or
/// from 1e21 up switch to exponent notation with a signed exponent (`8.333e-7`, `1e+21`).
pub fn number_text(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 || !value.is_finite() || (1e-6..1e21).contains(&magnitude) {
        return if value == 0.0 { "0".to_string() } else { value.to_string() };
    }
    let exponential = format!("{value:e}");
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{mantissa}e+{exponent}"),
        _ => exponential,
    }
}

/// Renders a local date-time the way an en-US locale string does: `1/15/2024, 9:30:00 AM`.
pub fn locale_timestamp(at: &DateTime<Local>) -> String {
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

pub trait WallClock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    fn timestamp(&self) -> String {
        locale_timestamp(&self.now())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemWallClock;

impl WallClock for SystemWallClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always reports the same instant. Used by tests and fixtures.
#[derive(Debug, Clone, Copy)]
pub struct FixedWallClock {
    at: DateTime<Local>,
}

impl FixedWallClock {
    pub fn new(at: DateTime<Local>) -> Self {
        Self { at }
    }
}

impl WallClock for FixedWallClock {
    fn now(&self) -> DateTime<Local> {
        self.at
    }
}
