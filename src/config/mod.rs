//! Typed render configuration.
//!
//! [`AppConfig`] is built once per render by merging a raw JSON document (the Config Store) over
//! the built-in defaults. Every recognized key has its own converter; unknown keys are ignored and
//! all conversion failures of one document are reported together.

mod convert;
pub mod range;
pub mod style;

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde_json::{Value, json};

use crate::foundation::error::{KeepError, KeepResult};

pub use range::{NumberRange, Sampled, TimeRange};
pub use style::{StyleRole, TextStyle, TextStyles};

/// Sentinel for [`AppConfig::date`]: substitute the current date at render time.
pub const DATE_TODAY: &str = "today";
/// Sentinel for [`AppConfig::end_time`]: substitute the current wall-clock time at render time.
pub const END_TIME_NOW: &str = "now";

/// Precision used for an `average_stride` override that does not name its own.
pub const STRIDE_PRECISION: i32 = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Background template, local path or HTTP(S) URL.
    pub template: String,
    /// Route map image; empty to omit.
    pub map: String,
    /// Avatar image; empty to omit.
    pub avatar: String,
    pub username: String,

    /// Literal date text or [`DATE_TODAY`].
    pub date: String,
    /// Literal time of day or [`END_TIME_NOW`].
    pub end_time: String,

    pub battery: NumberRange,
    pub temp: NumberRange,
    pub total_km: NumberRange,
    pub sport_time: TimeRange,
    pub total_time: TimeRange,
    pub exercise_load: NumberRange,
    pub cumulative_climb: NumberRange,
    pub average_cadence: NumberRange,
    pub average_power: NumberRange,
    /// `None` derives the stride from distance, cadence and sport time.
    pub average_stride: Option<NumberRange>,
    pub weather: Vec<String>,

    pub styles: TextStyles,

    pub prefs_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            template: "scr/template.png".to_string(),
            map: "scr/map.png".to_string(),
            avatar: String::new(),
            username: String::new(),
            date: DATE_TODAY.to_string(),
            end_time: END_TIME_NOW.to_string(),
            battery: NumberRange::new(22.0, 94.0, 0),
            temp: NumberRange::new(5.0, 10.0, 0),
            total_km: NumberRange::new(3.02, 3.30, 2),
            sport_time: TimeRange::from_seconds(21 * 60, 23 * 60),
            total_time: TimeRange::from_seconds(34 * 60, 39 * 60),
            exercise_load: NumberRange::new(30.0, 35.0, 0),
            cumulative_climb: NumberRange::new(90.0, 96.0, 0),
            average_cadence: NumberRange::new(130.0, 135.0, 0),
            average_power: NumberRange::new(140.0, 160.0, 0),
            average_stride: None,
            weather: vec!["晴".to_string(), "多云".to_string(), "阴".to_string()],
            styles: TextStyles::default(),
            prefs_file: "keepsultan_prefs.json".to_string(),
        }
    }
}

impl AppConfig {
    /// Merge `raw` over `defaults`.
    ///
    /// `raw` must be a JSON object (or `null`, which yields `defaults` unchanged). Keys that are
    /// absent keep their default; unknown keys are ignored.
    pub fn merge(raw: &Value, defaults: AppConfig) -> KeepResult<AppConfig> {
        let obj = match raw {
            Value::Null => return Ok(defaults),
            Value::Object(obj) => obj,
            other => {
                return Err(KeepError::format(format!(
                    "config document must be a JSON object, got {}",
                    convert::kind(other)
                )));
            }
        };

        let mut cfg = defaults;
        let mut errors = Vec::new();
        for (key, value) in obj {
            if let Err(err) = cfg.apply_key(key, value) {
                let msg = match err {
                    KeepError::Format(msg) => msg,
                    other => other.to_string(),
                };
                errors.push(format!("{key}: {msg}"));
            }
        }

        if errors.is_empty() {
            Ok(cfg)
        } else {
            Err(KeepError::format(errors.join("; ")))
        }
    }

    /// Merge `raw` over [`AppConfig::default`].
    pub fn from_value(raw: &Value) -> KeepResult<AppConfig> {
        Self::merge(raw, AppConfig::default())
    }

    /// Read a Config Store file. A missing file yields the defaults.
    pub fn from_path(path: impl AsRef<Path>) -> KeepResult<AppConfig> {
        let path = path.as_ref();
        if !path.is_file() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(AppConfig::default());
        }
        let f = File::open(path)?;
        let raw: Value = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| KeepError::format(format!("parse config '{}': {e}", path.display())))?;
        Self::from_value(&raw)
    }

    /// Serialize back into the Config Store shape.
    pub fn to_value(&self) -> Value {
        let mut styles = serde_json::Map::new();
        for (role, style) in self.styles.iter() {
            styles.insert(role.key().to_string(), json!(style));
        }

        let mut out = json!({
            "template": self.template,
            "map": self.map,
            "avatar": self.avatar,
            "username": self.username,
            "date": self.date,
            "end_time": self.end_time,
            "battery": self.battery,
            "temp": self.temp,
            "total_km": self.total_km,
            "sport_time": self.sport_time,
            "total_time": self.total_time,
            "exercise_load": self.exercise_load,
            "cumulative_climb": self.cumulative_climb,
            "average_cadence": self.average_cadence,
            "average_power": self.average_power,
            "average_stride": self.average_stride,
            "weather": self.weather,
            "prefs_file": self.prefs_file,
        });
        if let Value::Object(map) = &mut out {
            map.extend(styles);
        }
        out
    }

    /// Write the Config Store file as pretty JSON, creating parent directories.
    pub fn write_json(&self, path: impl AsRef<Path>) -> KeepResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut w = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut w, &self.to_value())
            .map_err(|e| KeepError::format(format!("serialize config: {e}")))?;
        w.write_all(b"\n")?;
        w.flush()?;
        Ok(())
    }

    fn apply_key(&mut self, key: &str, v: &Value) -> KeepResult<()> {
        use convert::*;

        match key {
            "template" => self.template = to_text(v)?,
            "map" => self.map = to_text(v)?,
            "avatar" => self.avatar = to_text(v)?,
            "username" => self.username = to_text(v)?,
            "date" => self.date = to_text(v)?,
            "end_time" => self.end_time = to_text(v)?,
            "prefs_file" => self.prefs_file = to_text(v)?,
            "weather" => self.weather = to_weather(v)?,
            "battery" => self.battery = to_number_range(v, &self.battery)?,
            "temp" => self.temp = to_number_range(v, &self.temp)?,
            "total_km" => self.total_km = to_number_range(v, &self.total_km)?,
            "exercise_load" => self.exercise_load = to_number_range(v, &self.exercise_load)?,
            "cumulative_climb" => {
                self.cumulative_climb = to_number_range(v, &self.cumulative_climb)?
            }
            "average_cadence" => {
                self.average_cadence = to_number_range(v, &self.average_cadence)?
            }
            "average_power" => self.average_power = to_number_range(v, &self.average_power)?,
            "average_stride" => {
                self.average_stride = to_optional_range(v, self.average_stride.as_ref())?
            }
            "sport_time" => self.sport_time = to_time_range(v, &self.sport_time)?,
            "total_time" => self.total_time = to_time_range(v, &self.total_time)?,
            other => {
                if let Some(role) = StyleRole::from_key(other) {
                    let merged = to_text_style(v, self.styles.get(role))?;
                    *self.styles.get_mut(role) = merged;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
