//! Per-field converters from raw JSON values to typed config values.

use serde_json::Value;

use super::{NumberRange, STRIDE_PRECISION, TextStyle, TimeRange};
use crate::foundation::error::{KeepError, KeepResult};

pub(super) fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn unexpected(expected: &str, got: &Value) -> KeepError {
    KeepError::format(format!("expected {expected}, got {}", kind(got)))
}

/// Plain text field. Numbers are stringified; `null` clears the field.
pub(super) fn to_text(v: &Value) -> KeepResult<String> {
    match v {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(unexpected("a string", other)),
    }
}

fn to_f64(v: &Value) -> KeepResult<f64> {
    match v {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| KeepError::format(format!("number {n} is out of range"))),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|x| x.is_finite())
            .ok_or_else(|| KeepError::format(format!("cannot parse {s:?} as a number"))),
        other => Err(unexpected("a number", other)),
    }
}

fn to_precision(v: &Value) -> KeepResult<i32> {
    let p = to_f64(v)?;
    if p.fract() != 0.0 || p.abs() > 15.0 {
        return Err(KeepError::format(format!(
            "precision must be a small integer, got {p}"
        )));
    }
    Ok(p as i32)
}

/// `{low, high, precision}` object (missing members from `base`), a number or a numeric string.
pub(super) fn to_number_range(v: &Value, base: &NumberRange) -> KeepResult<NumberRange> {
    match v {
        Value::Null => Ok(*base),
        Value::Object(obj) => {
            let low = obj.get("low").map(to_f64).transpose()?.unwrap_or(base.low());
            let high = obj
                .get("high")
                .map(to_f64)
                .transpose()?
                .unwrap_or(base.high());
            let precision = obj
                .get("precision")
                .map(to_precision)
                .transpose()?
                .unwrap_or(base.precision());
            if !(high - low).is_finite() {
                return Err(KeepError::format(format!(
                    "range [{low}, {high}] is too wide to sample"
                )));
            }
            Ok(NumberRange::new(low, high, precision))
        }
        Value::Number(_) | Value::String(_) => Ok(NumberRange::exact(to_f64(v)?, base.precision())),
        other => Err(unexpected("a number or a {low, high, precision} object", other)),
    }
}

/// Like [`to_number_range`], but `null` means "derive, don't override".
pub(super) fn to_optional_range(
    v: &Value,
    base: Option<&NumberRange>,
) -> KeepResult<Option<NumberRange>> {
    if v.is_null() {
        return Ok(None);
    }
    let base = base
        .copied()
        .unwrap_or_else(|| NumberRange::exact(0.0, STRIDE_PRECISION));
    to_number_range(v, &base).map(Some)
}

fn to_time_text(v: &Value) -> KeepResult<&str> {
    v.as_str().ok_or_else(|| unexpected("a time string", v))
}

/// `{start, end}` object (missing members from `base`) or a single time string.
pub(super) fn to_time_range(v: &Value, base: &TimeRange) -> KeepResult<TimeRange> {
    match v {
        Value::Null => Ok(base.clone()),
        Value::String(s) => TimeRange::exact(s),
        Value::Object(obj) => {
            let start = obj
                .get("start")
                .map(to_time_text)
                .transpose()?
                .unwrap_or(base.start());
            let end = obj
                .get("end")
                .map(to_time_text)
                .transpose()?
                .unwrap_or(base.end());
            TimeRange::new(start, end)
        }
        other => Err(unexpected("a time string or a {start, end} object", other)),
    }
}

/// List of weather descriptors, or a single descriptor.
pub(super) fn to_weather(v: &Value) -> KeepResult<Vec<String>> {
    let list = match v {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                Value::Number(n) => Ok(n.to_string()),
                other => Err(unexpected("a string", other)),
            })
            .collect::<KeepResult<Vec<_>>>()?,
        Value::String(s) => vec![s.clone()],
        other => return Err(unexpected("a list of strings", other)),
    };
    if list.is_empty() {
        return Err(KeepError::format("weather candidate list is empty"));
    }
    Ok(list)
}

fn to_font_size(v: &Value) -> KeepResult<u32> {
    let size = to_f64(v)?;
    if size < 1.0 || size > f64::from(u16::MAX) {
        return Err(KeepError::format(format!(
            "font_size must be a positive pixel size, got {size}"
        )));
    }
    Ok(size.round() as u32)
}

fn to_color(v: &Value) -> KeepResult<[u8; 3]> {
    let items = v
        .as_array()
        .filter(|items| items.len() == 3)
        .ok_or_else(|| unexpected("an [r, g, b] array", v))?;
    let mut out = [0u8; 3];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = item
            .as_u64()
            .and_then(|c| u8::try_from(c).ok())
            .ok_or_else(|| KeepError::format(format!("color channel {item} is not in 0..=255")))?;
    }
    Ok(out)
}

/// `{font_path, font_size, color}` object; missing members come from `base`.
pub(super) fn to_text_style(v: &Value, base: &TextStyle) -> KeepResult<TextStyle> {
    match v {
        Value::Null => Ok(base.clone()),
        Value::Object(obj) => {
            let font_path = match obj.get("font_path") {
                Some(p) => p
                    .as_str()
                    .ok_or_else(|| unexpected("a font path string", p))?
                    .to_string(),
                None => base.font_path.clone(),
            };
            let font_size = obj
                .get("font_size")
                .map(to_font_size)
                .transpose()?
                .unwrap_or(base.font_size);
            let color = obj
                .get("color")
                .map(to_color)
                .transpose()?
                .unwrap_or(base.color);
            Ok(TextStyle::new(font_path, font_size, color))
        }
        other => Err(unexpected("a {font_path, font_size, color} object", other)),
    }
}
