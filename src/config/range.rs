use std::fmt;

use rand::Rng;
use serde::Serialize;

use crate::foundation::error::KeepResult;
use crate::foundation::time::{hms_to_seconds, normalize_hms, seconds_to_hms};

/// Closed numeric interval sampled uniformly.
///
/// Bounds are swapped on construction when given inverted, so `low <= high` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NumberRange {
    low: f64,
    high: f64,
    precision: i32,
}

impl NumberRange {
    /// Range over `[low, high]`, swapping inverted bounds.
    pub fn new(low: f64, high: f64, precision: i32) -> Self {
        let (low, high) = if low > high { (high, low) } else { (low, high) };
        Self {
            low,
            high,
            precision,
        }
    }

    /// Degenerate range `[v, v]`.
    pub fn exact(v: f64, precision: i32) -> Self {
        Self::new(v, v, precision)
    }

    /// Lower bound.
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Upper bound.
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Decimal digits kept when sampling; `<= 0` means integers.
    pub fn precision(&self) -> i32 {
        self.precision
    }

    /// Uniform draw from `[low, high]`, rounded to the range's precision.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Sampled {
        let raw = if (self.high - self.low).is_finite() {
            rng.gen_range(self.low..=self.high)
        } else {
            // Span overflows f64; interpolate so the bounds never get subtracted.
            let t: f64 = rng.r#gen();
            self.low * (1.0 - t) + self.high * t
        };
        Sampled::new(raw, self.precision)
    }
}

/// A sampled number together with the precision it was rounded to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Sampled {
    value: f64,
    precision: i32,
}

impl Sampled {
    /// Round `raw` to `precision` decimal digits (to an integer when `precision <= 0`).
    pub fn new(raw: f64, precision: i32) -> Self {
        let value = if precision <= 0 {
            raw.round()
        } else {
            let scale = 10f64.powi(precision);
            (raw * scale).round() / scale
        };
        Self { value, precision }
    }

    /// Rounded value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Precision the value was rounded to.
    pub fn precision(&self) -> i32 {
        self.precision
    }
}

impl fmt::Display for Sampled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.precision <= 0 {
            write!(f, "{}", self.value as i64)
        } else {
            write!(f, "{:.*}", self.precision as usize, self.value)
        }
    }
}

/// Window between two `HH:MM:SS` values, sampled at whole-second resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    start: String,
    end: String,
    #[serde(skip)]
    start_secs: u32,
    #[serde(skip)]
    end_secs: u32,
}

impl TimeRange {
    /// Window from `start` to `end`, both normalized to `HH:MM:SS`.
    pub fn new(start: &str, end: &str) -> KeepResult<Self> {
        let start = normalize_hms(start)?;
        let end = normalize_hms(end)?;
        Ok(Self {
            start_secs: hms_to_seconds(&start)?,
            end_secs: hms_to_seconds(&end)?,
            start,
            end,
        })
    }

    pub(crate) fn from_seconds(start_secs: u32, end_secs: u32) -> Self {
        Self {
            start: seconds_to_hms(start_secs),
            end: seconds_to_hms(end_secs),
            start_secs,
            end_secs,
        }
    }

    /// Degenerate window `[t, t]`.
    pub fn exact(t: &str) -> KeepResult<Self> {
        Self::new(t, t)
    }

    /// Normalized start time.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Normalized end time.
    pub fn end(&self) -> &str {
        &self.end
    }

    /// Uniform whole-second draw from the window, as `HH:MM:SS`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let (s, e) = if self.start_secs > self.end_secs {
            (self.end_secs, self.start_secs)
        } else {
            (self.start_secs, self.end_secs)
        };
        let t = rng.gen_range(f64::from(s)..=f64::from(e)).round() as u32;
        seconds_to_hms(t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/range.rs"]
mod tests;
