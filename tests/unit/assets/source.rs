use super::*;

#[test]
fn normalize_path_slash_normalization() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("C:\\x.png").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn parse_plain_path() {
    assert_eq!(
        SourceRef::parse("art/design.png").unwrap(),
        SourceRef::Path("art/design.png".to_string())
    );
}

#[test]
fn parse_remote_url_is_kept_unfetched() {
    let s = SourceRef::parse("https://cdn.example.com/x.png").unwrap();
    assert_eq!(s, SourceRef::Remote("https://cdn.example.com/x.png".to_string()));
}

#[test]
fn parse_base64_data_url() {
    let s = SourceRef::parse("data:image/png;base64,AAEC").unwrap();
    let SourceRef::Inline { mime, bytes } = s else {
        panic!("expected inline source");
    };
    assert_eq!(mime, "image/png");
    assert_eq!(bytes.as_slice(), &[0u8, 1, 2]);
}

#[test]
fn parse_rejects_bad_data_urls() {
    assert!(SourceRef::parse("data:image/png,plain").is_err());
    assert!(SourceRef::parse("data:image/png;base64").is_err());
    assert!(SourceRef::parse("data:image/png;base64,!!!").is_err());
    assert!(SourceRef::parse("data:image/png;base64,").is_err());
    assert!(SourceRef::parse("   ").unwrap_err().is_invalid_input());
}

#[test]
fn svg_detection() {
    assert!(SourceRef::parse("logo.SVG").unwrap().looks_like_svg());
    assert!(
        SourceRef::parse("data:image/svg+xml;base64,PHN2Zy8+")
            .unwrap()
            .looks_like_svg()
    );
    assert!(!SourceRef::parse("logo.png").unwrap().looks_like_svg());
}

#[test]
fn display_hides_inline_payload() {
    let s = SourceRef::parse("data:image/png;base64,AAEC").unwrap();
    assert_eq!(s.to_string(), "data:image/png (3 bytes)");
}

#[test]
fn oversized_inline_payload_is_rejected_before_decoding() {
    let limits = SourceLimits {
        max_encoded_bytes: 4,
        ..SourceLimits::default()
    };
    // 12 base64 chars decode to 9 bytes; invalid characters prove nothing was decoded.
    let err = SourceRef::parse_with_limits("data:image/png;base64,!!!!!!!!!!!!", &limits).unwrap_err();
    assert!(err.is_resource_exceeded(), "{err}");

    // Exactly at the limit: 8 chars with two padding bytes decode to 4 bytes.
    let ok = SourceRef::parse_with_limits("data:image/png;base64,AAECAw==", &limits).unwrap();
    let SourceRef::Inline { bytes, .. } = ok else {
        panic!("expected inline source");
    };
    assert_eq!(bytes.len(), 4);
}
