//! Quantities derived from sampled metrics.

use chrono::{NaiveTime, TimeDelta};

use crate::foundation::error::{KeepError, KeepResult};
use crate::foundation::time::{format_pace, hms_to_seconds, normalize_hms};

/// Calories per hour of total time.
pub const KCAL_PER_HOUR: f64 = 700.0;

/// `end_time - duration` on the 24h clock.
///
/// Underflow past midnight wraps around; there is no date to roll back.
pub fn start_time(end_time: &str, duration: &str) -> KeepResult<String> {
    let end_norm = normalize_hms(end_time)?;
    let end = NaiveTime::parse_from_str(&end_norm, "%H:%M:%S")
        .map_err(|e| KeepError::format(format!("invalid time of day {end_time:?}: {e}")))?;
    let secs = hms_to_seconds(duration)?;
    let (start, _) = end.overflowing_sub_signed(TimeDelta::seconds(i64::from(secs)));
    Ok(start.format("%H:%M:%S").to_string())
}

/// Average pace over `distance_km`, formatted `mm'ss"`.
pub fn pace(distance_km: f64, time_hms: &str) -> KeepResult<String> {
    let total_sec = hms_to_seconds(time_hms)?;
    if distance_km.is_nan() || distance_km <= 0.0 {
        return Err(KeepError::domain(format!(
            "distance_km must be positive, got {distance_km}"
        )));
    }
    Ok(format_pace(f64::from(total_sec) / distance_km))
}

/// Calorie cost in kcal, proportional to total time.
pub fn cost(total_time_hms: &str) -> KeepResult<u32> {
    let total_sec = hms_to_seconds(total_time_hms)?;
    Ok((KCAL_PER_HOUR * f64::from(total_sec) / 3600.0).round() as u32)
}

/// Stride length in metres with two decimals; `"0.00"` when cadence or sport time is not positive.
pub fn stride(distance_km: f64, average_cadence: f64, sport_secs: u32) -> String {
    let sport_min = f64::from(sport_secs) / 60.0;
    if average_cadence > 0.0 && sport_min > 0.0 {
        format!("{:.2}", distance_km * 1000.0 / (average_cadence * sport_min))
    } else {
        "0.00".to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/metrics/derive.rs"]
mod tests;
