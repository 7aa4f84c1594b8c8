use std::io::Cursor;

use super::*;

#[test]
fn decode_png_keeps_straight_alpha() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let decoded = decode_rgba(&buf, "mem").unwrap();
    assert_eq!(decoded.dimensions(), (1, 1));
    assert_eq!(decoded.as_raw().as_slice(), &[100u8, 50, 200, 128]);
}

#[test]
fn decode_rgb_source_becomes_opaque_rgba() {
    let img = image::RgbImage::from_raw(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let decoded = decode_rgba(&buf, "mem").unwrap();
    assert_eq!(decoded.get_pixel(1, 0).0, [4, 5, 6, 255]);
}

#[test]
fn garbage_bytes_are_a_format_error() {
    let err = decode_rgba(b"not an image", "junk.bin").unwrap_err();
    assert!(matches!(err, KeepError::Format(_)));
    assert!(err.to_string().contains("junk.bin"));
}
