//! Time-of-day and duration strings.
//!
//! Every time value in the configuration is carried as a canonical `HH:MM:SS` string. Durations
//! (sport time, total time) and clock times (end time) share the representation; this module
//! owns the conversions between the string form and whole seconds.

use crate::foundation::error::{KeepError, KeepResult};

pub const SECONDS_PER_DAY: u32 = 24 * 3600;

/// Validate and normalize a time string to zero-padded `HH:MM:SS`.
///
/// Accepts `H:M`, `HH:MM`, `H:M:S` and `HH:MM:SS` (surrounding whitespace is ignored). Each
/// component must fit in two digits; no calendar range check is applied, so `00:75:00` is a
/// valid 75 minute duration.
pub fn normalize_hms(s: &str) -> KeepResult<String> {
    let parts: Vec<&str> = s.trim().split(':').collect();
    let (h, m, sec) = match parts.as_slice() {
        [h, m] => (*h, *m, "0"),
        [h, m, sec] => (*h, *m, *sec),
        _ => return Err(KeepError::format(format!("invalid time string: {s:?}"))),
    };

    let h = time_component(h, s)?;
    let m = time_component(m, s)?;
    let sec = time_component(sec, s)?;
    Ok(format!("{h:02}:{m:02}:{sec:02}"))
}

fn time_component(part: &str, whole: &str) -> KeepResult<u32> {
    let v: u32 = part
        .trim()
        .parse()
        .map_err(|_| KeepError::format(format!("invalid time string: {whole:?}")))?;
    if v > 99 {
        return Err(KeepError::format(format!("invalid time format: {whole:?}")));
    }
    Ok(v)
}

/// Convert a time string (any shape [`normalize_hms`] accepts) to seconds.
pub fn hms_to_seconds(s: &str) -> KeepResult<u32> {
    let norm = normalize_hms(s)?;
    let mut total = 0u32;
    for part in norm.split(':') {
        // normalize_hms guarantees three numeric parts
        let v: u32 = part
            .parse()
            .map_err(|_| KeepError::format(format!("invalid time string: {s:?}")))?;
        total = total * 60 + v;
    }
    Ok(total)
}

/// Format whole seconds as `HH:MM:SS`. Hours are not wrapped at 24.
pub fn seconds_to_hms(secs: u32) -> String {
    let hh = secs / 3600;
    let mm = (secs % 3600) / 60;
    let ss = secs % 60;
    format!("{hh:02}:{mm:02}:{ss:02}")
}

/// Format seconds-per-kilometre as `mm'ss"`.
pub fn format_pace(sec_per_km: f64) -> String {
    let total = sec_per_km.round().max(0.0) as u64;
    let mm = total / 60;
    let ss = total % 60;
    format!("{mm:02}'{ss:02}\"")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/time.rs"]
mod tests;
