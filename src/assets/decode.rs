use image::RgbaImage;

use crate::foundation::error::{KeepError, KeepResult};

/// Decode encoded image bytes (any format the `image` crate sniffs) to straight RGBA8.
pub fn decode_rgba(bytes: &[u8], origin: &str) -> KeepResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| KeepError::format(format!("decode image '{origin}': {e}")))?;
    Ok(dyn_img.to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
