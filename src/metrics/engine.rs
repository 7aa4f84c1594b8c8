use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use super::clock::Clock;
use super::derive;
use crate::config::{AppConfig, DATE_TODAY, END_TIME_NOW, Sampled};
use crate::foundation::error::{KeepError, KeepResult};
use crate::foundation::time::{hms_to_seconds, normalize_hms};

/// Every value drawn on the card, already formatted where formatting is fixed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderData {
    pub date: String,
    pub username: String,
    /// `HH:MM:SS`.
    pub end_time: String,
    /// `HH:MM:SS`, `end_time - total_time` on the 24h clock.
    pub start_time: String,
    pub total_time: String,
    /// Never longer than `total_time`.
    pub sport_time: String,
    pub total_km: Sampled,
    pub pace: String,
    pub cost: u32,
    pub cumulative_climb: Sampled,
    pub average_cadence: Sampled,
    pub exercise_load: Sampled,
    pub average_power: Sampled,
    pub stride: String,
    pub weather: String,
    pub temp: Sampled,
    pub battery: Sampled,
}

impl RenderData {
    /// Distance with exactly two decimals, whatever precision it was sampled at.
    pub fn total_km_text(&self) -> String {
        format!("{:.2}", self.total_km.value())
    }

    /// Status-bar clock, `HH:MM`.
    pub fn clock(&self) -> &str {
        hh_mm(&self.end_time)
    }

    /// `date start - end location · weather · temp℃` header line.
    pub fn summary_line(&self, location: &str) -> String {
        format!(
            "{} {} - {} {} · {} · {}℃",
            self.date,
            hh_mm(&self.start_time),
            hh_mm(&self.end_time),
            location,
            self.weather,
            self.temp
        )
    }
}

fn hh_mm(hms: &str) -> &str {
    hms.get(..5).unwrap_or(hms)
}

/// Sample and derive the card's metrics.
///
/// Draw order is fixed so one seed reproduces one card: total_time, sport_time, total_km,
/// cumulative_climb, average_cadence, exercise_load, average_power, weather, temp, battery,
/// then the optional stride override.
pub fn generate<R: Rng + ?Sized>(
    cfg: &AppConfig,
    rng: &mut R,
    clock: &dyn Clock,
) -> KeepResult<RenderData> {
    let now = clock.now();
    let date = if cfg.date == DATE_TODAY {
        now.format("%Y/%m/%d").to_string()
    } else {
        cfg.date.clone()
    };
    let end_time = if cfg.end_time == END_TIME_NOW {
        now.format("%H:%M:%S").to_string()
    } else {
        normalize_hms(&cfg.end_time)?
    };

    let total_time = cfg.total_time.sample(rng);
    let mut sport_time = cfg.sport_time.sample(rng);
    let total_secs = hms_to_seconds(&total_time)?;
    let mut sport_secs = hms_to_seconds(&sport_time)?;
    if sport_secs > total_secs {
        sport_time = total_time.clone();
        sport_secs = total_secs;
    }

    let total_km = cfg.total_km.sample(rng);
    let cumulative_climb = cfg.cumulative_climb.sample(rng);
    let average_cadence = cfg.average_cadence.sample(rng);
    let exercise_load = cfg.exercise_load.sample(rng);
    let average_power = cfg.average_power.sample(rng);
    let weather = cfg
        .weather
        .choose(rng)
        .cloned()
        .ok_or_else(|| KeepError::format("weather candidate list is empty"))?;
    let temp = cfg.temp.sample(rng);
    let battery = cfg.battery.sample(rng);

    let start_time = derive::start_time(&end_time, &total_time)?;
    let pace = derive::pace(total_km.value(), &total_time)?;
    let cost = derive::cost(&total_time)?;
    let stride = match &cfg.average_stride {
        Some(range) => range.sample(rng).to_string(),
        None => derive::stride(total_km.value(), average_cadence.value(), sport_secs),
    };

    let data = RenderData {
        date,
        username: cfg.username.clone(),
        end_time,
        start_time,
        total_time,
        sport_time,
        total_km,
        pace,
        cost,
        cumulative_climb,
        average_cadence,
        exercise_load,
        average_power,
        stride,
        weather,
        temp,
        battery,
    };

    tracing::info!(
        date = %data.date,
        username = %data.username,
        start_time = %data.start_time,
        end_time = %data.end_time,
        total_km = %data.total_km_text(),
        sport_time = %data.sport_time,
        total_time = %data.total_time,
        pace = %data.pace,
        cost = data.cost,
        cumulative_climb = %data.cumulative_climb,
        average_cadence = %data.average_cadence,
        exercise_load = %data.exercise_load,
        "generated metrics"
    );

    Ok(data)
}

#[cfg(test)]
#[path = "../../tests/unit/metrics/engine.rs"]
mod tests;
