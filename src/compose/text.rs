use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};

use crate::foundation::error::{KeepError, KeepResult};

/// Horizontal reference of a text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HAlign {
    #[default]
    Left,
    Middle,
    Right,
}

/// Vertical reference of a text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VAlign {
    /// Top of the ascender.
    #[default]
    Ascender,
    Middle,
    Baseline,
    /// Bottom of the descender.
    Descender,
}

/// Two-letter text anchor such as `la` (left, ascender) or `ms` (middle, baseline).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Anchor {
    pub h: HAlign,
    pub v: VAlign,
}

impl Anchor {
    /// Anchor from its horizontal and vertical parts.
    pub const fn new(h: HAlign, v: VAlign) -> Self {
        Self { h, v }
    }

    /// Top-left corner for `imageproc`'s draw call, given the requested point and the
    /// laid-out text metrics.
    pub fn origin(&self, at: (i32, i32), metrics: &TextMetrics) -> (i32, i32) {
        let dx = match self.h {
            HAlign::Left => 0.0,
            HAlign::Middle => metrics.width / 2.0,
            HAlign::Right => metrics.width,
        };
        let dy = match self.v {
            VAlign::Ascender => 0.0,
            VAlign::Middle => (metrics.ascent - metrics.descent) / 2.0,
            VAlign::Baseline => metrics.ascent,
            VAlign::Descender => metrics.ascent - metrics.descent,
        };
        (at.0 - dx.round() as i32, at.1 - dy.round() as i32)
    }
}

impl FromStr for Anchor {
    type Err = KeepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(h), Some(v), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(KeepError::format(format!(
                "anchor must be two letters, got {s:?}"
            )));
        };
        let h = match h {
            'l' => HAlign::Left,
            'm' => HAlign::Middle,
            'r' => HAlign::Right,
            other => {
                return Err(KeepError::format(format!(
                    "unknown horizontal anchor {other:?} in {s:?}"
                )));
            }
        };
        let v = match v {
            'a' => VAlign::Ascender,
            'm' => VAlign::Middle,
            's' => VAlign::Baseline,
            'd' => VAlign::Descender,
            other => {
                return Err(KeepError::format(format!(
                    "unknown vertical anchor {other:?} in {s:?}"
                )));
            }
        };
        Ok(Self { h, v })
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = match self.h {
            HAlign::Left => 'l',
            HAlign::Middle => 'm',
            HAlign::Right => 'r',
        };
        let v = match self.v {
            VAlign::Ascender => 'a',
            VAlign::Middle => 'm',
            VAlign::Baseline => 's',
            VAlign::Descender => 'd',
        };
        write!(f, "{h}{v}")
    }
}

/// Horizontal advance and vertical metrics of one laid-out string, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    pub ascent: f32,
    /// Negative below the baseline.
    pub descent: f32,
}

/// Pixel scale for an em size in pixels.
///
/// `ab_glyph` scales by line height, so the em size is converted through the font's own
/// height/units-per-em ratio.
pub fn px_scale(font: &impl Font, size: u32) -> PxScale {
    let size = size as f32;
    match font.units_per_em() {
        Some(upem) if upem > 0.0 => PxScale::from(size * font.height_unscaled() / upem),
        _ => PxScale::from(size),
    }
}

/// Measure `text` the way it will be drawn.
pub fn measure(font: &impl Font, scale: PxScale, text: &str) -> TextMetrics {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev = None;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(p) = prev {
            width += scaled.kern(p, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }
    TextMetrics {
        width,
        ascent: scaled.ascent(),
        descent: scaled.descent(),
    }
}

/// Parsed fonts keyed by the path they were loaded from.
#[derive(Default)]
pub struct FontCache {
    fonts: HashMap<String, FontArc>,
}

impl fmt::Debug for FontCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontCache")
            .field("fonts", &self.fonts.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FontCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fonts loaded so far.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// True before the first font is loaded.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Font at `path`, read and parsed on first use.
    pub fn get(&mut self, path: &str) -> KeepResult<FontArc> {
        if let Some(font) = self.fonts.get(path) {
            return Ok(font.clone());
        }

        let bytes = std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                KeepError::not_found(format!("font file {path:?}"))
            } else {
                KeepError::Io(e)
            }
        })?;
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| KeepError::format(format!("font {path:?}: {e}")))?;
        tracing::debug!(path, "loaded font");
        self.fonts.insert(path.to_owned(), font.clone());
        Ok(font)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/text.rs"]
mod tests;
