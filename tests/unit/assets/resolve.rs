use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([1, 2, 3, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("unit_resolve")
        .join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn fs_resolver_reads_relative_png() {
    let dir = scratch_dir("png");
    std::fs::write(dir.join("art.png"), png_bytes(7, 5)).unwrap();

    let r = FsSourceResolver::new(&dir, SourceLimits::default());
    let src = r.resolve(&SourceRef::parse("art.png").unwrap()).unwrap();
    assert_eq!(src.dimensions().unwrap(), (7, 5));
    assert!(!src.is_vector());
}

#[test]
fn fs_resolver_missing_file_is_invalid_input() {
    let r = FsSourceResolver::new(scratch_dir("missing"), SourceLimits::default());
    let err = r
        .resolve(&SourceRef::parse("nope.png").unwrap())
        .err()
        .unwrap();
    assert!(err.is_invalid_input());
}

#[test]
fn fs_resolver_rejects_oversized_file_before_reading() {
    let dir = scratch_dir("big");
    std::fs::write(dir.join("big.png"), png_bytes(16, 16)).unwrap();
    let limits = SourceLimits {
        max_encoded_bytes: 8,
        ..SourceLimits::default()
    };
    let r = FsSourceResolver::new(&dir, limits);
    let err = r
        .resolve(&SourceRef::parse("big.png").unwrap())
        .err()
        .unwrap();
    assert!(err.is_resource_exceeded());
}

#[test]
fn remote_sources_must_be_prefetched() {
    let r = FsSourceResolver::new(".", SourceLimits::default());
    let err = r
        .resolve(&SourceRef::parse("https://x.test/a.png").unwrap())
        .err()
        .unwrap();
    assert!(err.is_invalid_input());
}

#[test]
fn memory_resolver_serves_paths_urls_and_svg() {
    let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="8"/>"#.to_vec();
    let r = MemorySourceResolver::new(SourceLimits::default())
        .with("a.png", png_bytes(3, 3))
        .with("https://x.test/logo", svg);

    let a = r.resolve(&SourceRef::parse("a.png").unwrap()).unwrap();
    assert_eq!(a.dimensions().unwrap(), (3, 3));

    let logo = r
        .resolve(&SourceRef::parse("https://x.test/logo").unwrap())
        .unwrap();
    assert!(logo.is_vector());
    assert_eq!(logo.dimensions().unwrap(), (4, 8));

    assert!(r.resolve(&SourceRef::parse("b.png").unwrap()).is_err());
}
