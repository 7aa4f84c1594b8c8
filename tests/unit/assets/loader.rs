use std::io::{Cursor, Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "keepsultan_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

/// Serve `body` as `image/png` to exactly one request; the handle yields the raw request head.
fn serve_once(body: Vec<u8>) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut head = Vec::new();
        let mut chunk = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&chunk[..n]);
        }
        let header = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        stream.write_all(header.as_bytes()).unwrap();
        stream.write_all(&body).unwrap();
        stream.flush().unwrap();
        String::from_utf8_lossy(&head).into_owned()
    });
    (format!("http://{addr}"), handle)
}

#[test]
fn new_creates_cache_dir() {
    let tmp = temp_dir("loader_new");
    let dir = tmp.join("nested").join("cache");
    let loader = AssetLoader::new(&dir).unwrap();
    assert!(dir.is_dir());
    assert_eq!(loader.cache_dir(), dir.as_path());
    fs::remove_dir_all(&tmp).ok();
}

#[test]
fn loads_local_file_as_rgba() {
    let tmp = temp_dir("loader_local");
    fs::create_dir_all(&tmp).unwrap();
    let path = tmp.join("a.png");
    fs::write(&path, png_bytes(3, 2, [9, 8, 7, 255])).unwrap();

    let loader = AssetLoader::new(tmp.join("cache")).unwrap();
    let img = loader.load(path.to_str().unwrap()).unwrap();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(2, 1).0, [9, 8, 7, 255]);

    fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_or_non_file_path_is_not_found() {
    let tmp = temp_dir("loader_missing");
    fs::create_dir_all(&tmp).unwrap();
    let loader = AssetLoader::new(tmp.join("cache")).unwrap();

    let missing = tmp.join("nope.png");
    let err = loader.load(missing.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, KeepError::NotFound(_)), "{err}");

    let err = loader.load(tmp.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, KeepError::NotFound(_)), "{err}");

    fs::remove_dir_all(&tmp).ok();
}

#[test]
fn empty_reference_is_rejected() {
    let tmp = temp_dir("loader_empty");
    let loader = AssetLoader::new(&tmp).unwrap();
    let err = loader.load("").unwrap_err();
    assert!(matches!(err, KeepError::Format(_)));
    fs::remove_dir_all(&tmp).ok();
}

#[test]
fn remote_reference_is_served_from_cache_without_network() {
    let tmp = temp_dir("loader_cache_hit");
    let loader = AssetLoader::new(&tmp).unwrap();

    // Unresolvable host: only a cache hit can satisfy this load.
    let url = "https://assets.invalid/avatars/me.png";
    fs::write(
        cache::cache_path(loader.cache_dir(), url),
        png_bytes(4, 4, [1, 2, 3, 4]),
    )
    .unwrap();

    let img = loader.load(url).unwrap();
    assert_eq!(img.dimensions(), (4, 4));
    assert_eq!(img.get_pixel(0, 0).0, [1, 2, 3, 4]);

    fs::remove_dir_all(&tmp).ok();
}

#[test]
fn failed_fetch_is_fatal_and_leaves_no_cache_entry() {
    let tmp = temp_dir("loader_fetch_fail");
    let loader = AssetLoader::new(&tmp).unwrap();

    let url = "http://127.0.0.1:9/map.png";
    let err = loader.load(url).unwrap_err();
    assert!(matches!(err, KeepError::Fetch(_)), "{err}");
    assert!(!cache::cache_path(loader.cache_dir(), url).exists());

    fs::remove_dir_all(&tmp).ok();
}

#[test]
fn cache_miss_downloads_once_then_serves_from_disk() {
    let tmp = temp_dir("loader_fetch_miss");
    let loader = AssetLoader::new(&tmp).unwrap();

    let body = png_bytes(3, 2, [9, 8, 7, 255]);
    let (base, server) = serve_once(body.clone());
    let url = format!("{base}/maps/route.png?v=2");

    let img = loader.load(&url).unwrap();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(2, 1).0, [9, 8, 7, 255]);

    let request = server.join().unwrap().to_ascii_lowercase();
    assert!(request.starts_with("get /maps/route.png?v=2 "), "{request}");
    assert!(request.contains("user-agent: keepsultan/1.0"), "{request}");

    let cached = cache::cache_path(loader.cache_dir(), &url);
    assert_eq!(cached.extension().and_then(|e| e.to_str()), Some("png"));
    assert_eq!(fs::read(&cached).unwrap(), body);

    // The listener is gone; only the cache can answer now.
    let again = loader.load(&url).unwrap();
    assert_eq!(again, img);

    fs::remove_dir_all(&tmp).ok();
}
