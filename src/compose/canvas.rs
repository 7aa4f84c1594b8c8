use std::path::Path;

use image::{DynamicImage, ImageError, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

use super::ops::blend_masked;
use super::text::{self, Anchor, FontCache};
use crate::config::TextStyle;
use crate::foundation::error::{KeepError, KeepResult};

/// Owns the canvas being built and the fonts drawn on it.
#[derive(Debug, Default)]
pub struct Compositor {
    canvas: Option<RgbaImage>,
    fonts: FontCache,
}

impl Compositor {
    /// Compositor with no canvas yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new canvas from a copy of `base`.
    pub fn load_base(&mut self, base: &RgbaImage) {
        self.canvas = Some(base.clone());
    }

    /// Current canvas, or a state error before [`Compositor::load_base`].
    pub fn canvas(&self) -> KeepResult<&RgbaImage> {
        self.canvas.as_ref().ok_or_else(KeepError::no_base_image)
    }

    /// Take the finished canvas.
    pub fn into_canvas(self) -> KeepResult<RgbaImage> {
        self.canvas.ok_or_else(KeepError::no_base_image)
    }

    fn canvas_mut(&mut self) -> KeepResult<&mut RgbaImage> {
        self.canvas.as_mut().ok_or_else(KeepError::no_base_image)
    }

    /// Paste `layer` with its top-left corner at `at`, using the layer's own alpha as the mask.
    /// Pixels falling outside the canvas are clipped.
    pub fn paste(&mut self, layer: &RgbaImage, at: (i32, i32)) -> KeepResult<()> {
        let canvas = self.canvas_mut()?;
        let (cw, ch) = (i64::from(canvas.width()), i64::from(canvas.height()));

        for (x, y, src) in layer.enumerate_pixels() {
            let dx = i64::from(at.0) + i64::from(x);
            let dy = i64::from(at.1) + i64::from(y);
            if dx < 0 || dy < 0 || dx >= cw || dy >= ch {
                continue;
            }
            let dst = canvas.get_pixel_mut(dx as u32, dy as u32);
            *dst = blend_masked(*dst, *src, src.0[3]);
        }
        Ok(())
    }

    /// Draw `text` in `style` so that `anchor` (default `la`) lands on `at`.
    pub fn draw_text(
        &mut self,
        text: &str,
        at: (i32, i32),
        style: &TextStyle,
        anchor: Option<Anchor>,
    ) -> KeepResult<()> {
        if self.canvas.is_none() {
            return Err(KeepError::no_base_image());
        }
        let font = self.fonts.get(&style.font_path)?;
        let scale = text::px_scale(&font, style.font_size);
        let metrics = text::measure(&font, scale, text);
        let (x, y) = anchor.unwrap_or_default().origin(at, &metrics);

        let [r, g, b] = style.color;
        let canvas = self.canvas_mut()?;
        draw_text_mut(canvas, Rgba([r, g, b, 255]), x, y, scale, &font, text);
        Ok(())
    }

    /// Encode the canvas to `path`, creating parent directories. The format follows the file
    /// extension; formats without alpha get an RGB copy.
    pub fn save(&self, path: impl AsRef<Path>) -> KeepResult<()> {
        let path = path.as_ref();
        let canvas = self.canvas()?;
        let format = ImageFormat::from_path(path).map_err(|e| {
            KeepError::format(format!("output format for {}: {e}", path.display()))
        })?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let result = if format == ImageFormat::Jpeg {
            DynamicImage::ImageRgba8(canvas.clone())
                .to_rgb8()
                .save_with_format(path, format)
        } else {
            canvas.save_with_format(path, format)
        };
        result.map_err(|e| encode_error(path, e))?;

        tracing::info!(
            path = %path.display(),
            width = canvas.width(),
            height = canvas.height(),
            "saved"
        );
        Ok(())
    }
}

fn encode_error(path: &Path, err: ImageError) -> KeepError {
    match err {
        ImageError::IoError(e) => KeepError::Io(e),
        other => KeepError::format(format!("encode {}: {other}", path.display())),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/canvas.rs"]
mod tests;
