//! Pure bitmap operations used to prepare layers before they are pasted.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, Rgba, RgbaImage};

pub const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Crop `src` to its largest centered square.
pub fn center_square(src: &RgbaImage) -> RgbaImage {
    let (w, h) = src.dimensions();
    if w == h {
        return src.clone();
    }
    let m = w.min(h);
    let left = (w - m) / 2;
    let top = (h - m) / 2;
    imageops::crop_imm(src, left, top, m, m).to_image()
}

/// Single-channel mask with a filled ellipse inscribed in `(w, h)`.
///
/// A pixel is inside when its center lies within the ellipse spanning the whole box, so the mask
/// is symmetric for odd and even sizes alike.
pub fn ellipse_mask(w: u32, h: u32) -> GrayImage {
    let rx = f64::from(w) / 2.0;
    let ry = f64::from(h) / 2.0;
    GrayImage::from_fn(w, h, |x, y| {
        let dx = (f64::from(x) + 0.5 - rx) / rx;
        let dy = (f64::from(y) + 0.5 - ry) / ry;
        if dx * dx + dy * dy <= 1.0 {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

/// Circular cutout of `src`: center-square crop, resize to `size`, mask with the inscribed
/// ellipse over a fully transparent canvas.
pub fn make_circular_avatar(src: &RgbaImage, size: (u32, u32)) -> RgbaImage {
    let square = center_square(src);
    let resized = imageops::resize(&square, size.0, size.1, RESIZE_FILTER);
    let mask = ellipse_mask(size.0, size.1);

    let mut out = RgbaImage::from_pixel(size.0, size.1, Rgba([0, 0, 0, 0]));
    for (x, y, px) in out.enumerate_pixels_mut() {
        let m = mask.get_pixel(x, y).0[0];
        *px = blend_masked(*px, *resized.get_pixel(x, y), m);
    }
    out
}

/// Resize to `size`, keeping the alpha channel.
pub fn resize_keep_alpha(src: &RgbaImage, size: (u32, u32)) -> RgbaImage {
    imageops::resize(src, size.0, size.1, RESIZE_FILTER)
}

/// Interpolate every channel (alpha included) from `dst` towards `src` by `mask / 255`.
pub fn blend_masked(dst: Rgba<u8>, src: Rgba<u8>, mask: u8) -> Rgba<u8> {
    match mask {
        0 => dst,
        255 => src,
        m => {
            let m = u16::from(m);
            let inv = 255 - m;
            let mut out = [0u8; 4];
            for i in 0..4 {
                out[i] = mul_div255(u16::from(src.0[i]), m)
                    .saturating_add(mul_div255(u16::from(dst.0[i]), inv));
            }
            Rgba(out)
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/compose/ops.rs"]
mod tests;
