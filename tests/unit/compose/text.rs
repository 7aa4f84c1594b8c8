use super::*;

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

fn system_font() -> Option<&'static str> {
    SYSTEM_FONTS
        .iter()
        .copied()
        .find(|p| std::path::Path::new(p).is_file())
}

#[test]
fn anchor_parses_every_combination() {
    for (s, h, v) in [
        ("la", HAlign::Left, VAlign::Ascender),
        ("mm", HAlign::Middle, VAlign::Middle),
        ("rs", HAlign::Right, VAlign::Baseline),
        ("ld", HAlign::Left, VAlign::Descender),
    ] {
        let anchor: Anchor = s.parse().unwrap();
        assert_eq!(anchor, Anchor::new(h, v));
        assert_eq!(anchor.to_string(), s);
    }
    assert_eq!(Anchor::default().to_string(), "la");
}

#[test]
fn anchor_rejects_bad_input() {
    for s in ["", "l", "lax", "xa", "lx", "LA"] {
        let err = s.parse::<Anchor>().unwrap_err();
        assert!(matches!(err, KeepError::Format(_)), "{s:?}");
    }
}

#[test]
fn anchor_origin_offsets() {
    let m = TextMetrics {
        width: 100.0,
        ascent: 30.0,
        descent: -10.0,
    };
    assert_eq!("la".parse::<Anchor>().unwrap().origin((200, 50), &m), (200, 50));
    assert_eq!("ma".parse::<Anchor>().unwrap().origin((200, 50), &m), (150, 50));
    assert_eq!("rs".parse::<Anchor>().unwrap().origin((200, 50), &m), (100, 20));
    assert_eq!("lm".parse::<Anchor>().unwrap().origin((200, 50), &m), (200, 30));
    assert_eq!("ld".parse::<Anchor>().unwrap().origin((200, 50), &m), (200, 10));
}

#[test]
fn missing_font_is_not_found() {
    let mut cache = FontCache::new();
    let err = cache.get("/definitely/not/here/font.ttf").unwrap_err();
    assert!(matches!(err, KeepError::NotFound(_)));
    assert!(cache.is_empty());
}

#[test]
fn garbage_font_is_a_format_error() {
    let path = std::env::temp_dir().join(format!("keepsultan_bad_font_{}.ttf", std::process::id()));
    std::fs::write(&path, b"not a font at all").unwrap();
    let mut cache = FontCache::new();
    let err = cache.get(path.to_str().unwrap()).unwrap_err();
    let _ = std::fs::remove_file(&path);
    assert!(matches!(err, KeepError::Format(_)));
}

#[test]
fn fonts_are_cached_by_path() {
    let Some(path) = system_font() else {
        return;
    };
    let mut cache = FontCache::new();
    cache.get(path).unwrap();
    cache.get(path).unwrap();
    assert_eq!(cache.len(), 1);
}

#[test]
fn measure_scales_with_size() {
    let Some(path) = system_font() else {
        return;
    };
    let font = FontCache::new().get(path).unwrap();
    let small = measure(&font, px_scale(&font, 20), "12:34");
    let big = measure(&font, px_scale(&font, 40), "12:34");
    assert!(small.width > 0.0);
    assert!(small.ascent > 0.0 && small.descent <= 0.0);
    assert!((big.width / small.width - 2.0).abs() < 0.05);
    assert_eq!(measure(&font, px_scale(&font, 20), "").width, 0.0);
}

#[test]
fn em_size_maps_to_ascent_plus_descent_ratio() {
    let Some(path) = system_font() else {
        return;
    };
    let font = FontCache::new().get(path).unwrap();
    let scale = px_scale(&font, 100);
    let m = measure(&font, scale, "x");
    // ascent - descent equals the line height scale, which is at least one em for text fonts.
    assert!(m.ascent - m.descent >= 99.0);
}
