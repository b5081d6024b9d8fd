use std::path::PathBuf;

use super::*;

#[test]
fn empty_json_yields_defaults() {
    let cfg = CompositorConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, CompositorConfig::default());
    assert_eq!(cfg.canvas, PrintCanvas::DTG_12X16);
    assert_eq!(cfg.text.base_percent_of_width, 8.0);
    assert_eq!(cfg.vertical_clamp, VerticalClamp::Legacy);
    assert_eq!(cfg.editor.snap_px, 8.0);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let cfg = CompositorConfig::from_reader(
        r#"{"quality":{"warnPpi":150},"limits":{"maxDimension":8000},"verticalClamp":"contained"}"#
            .as_bytes(),
    )
    .unwrap();
    assert_eq!(cfg.quality.ok_ppi, 300);
    assert_eq!(cfg.quality.warn_ppi, 150);
    assert_eq!(cfg.limits.max_dimension, 8000);
    assert_eq!(cfg.limits.max_pixels, 100_000_000);
    assert_eq!(cfg.vertical_clamp, VerticalClamp::Contained);
}

#[test]
fn invalid_configs_are_rejected() {
    let bad = [
        r#"{"canvas":{"width":0,"height":10,"dpi":300}}"#,
        r#"{"quality":{"okPpi":100,"warnPpi":200}}"#,
        r#"{"text":{"basePercentOfWidth":0}}"#,
        r#"{"editor":{"minWidthFraction":0.9,"maxWidthFraction":0.5}}"#,
        r#"{"defaultFont":"Missing"}"#,
        r#"{"canvas":"#,
    ];
    for json in bad {
        let err = CompositorConfig::from_reader(json.as_bytes()).unwrap_err();
        assert!(err.is_invalid_input(), "{json}: {err}");
    }
}

#[test]
fn fonts_load_relative_to_root() {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/fonts");
    let cfg = CompositorConfig::from_reader(
        r#"{"fonts":{"Sans":"DejaVuSans.ttf"},"defaultFont":"sans"}"#.as_bytes(),
    )
    .unwrap();
    let book = cfg.load_fonts(&root).unwrap();
    assert_eq!(book.resolve("unknown").unwrap().0, "sans");
}

#[test]
fn missing_config_file_is_invalid_input() {
    assert!(
        CompositorConfig::from_path("/definitely/not/here.json")
            .unwrap_err()
            .is_invalid_input()
    );
}
