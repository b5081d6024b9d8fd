use super::*;

#[test]
fn bounds_edges_and_center() {
    let b = Bounds::new(10.0, 20.0, 300.0, 400.0);
    assert_eq!(b.right(), 310.0);
    assert_eq!(b.bottom(), 420.0);
    assert_eq!(b.center(), Point::new(160.0, 220.0));
    assert!(!b.is_degenerate());
    assert!(Bounds::new(0.0, 0.0, 0.0, 10.0).is_degenerate());
    assert!(Bounds::new(0.0, 0.0, f64::NAN, 10.0).is_degenerate());
}

#[test]
fn contains_bounds_respects_epsilon() {
    let outer = Bounds::from_size(100.0, 100.0);
    assert!(outer.contains_bounds(Bounds::new(0.0, 0.0, 100.0, 100.0), 0.0));
    assert!(!outer.contains_bounds(Bounds::new(0.5, 0.0, 100.0, 100.0), 0.0));
    assert!(outer.contains_bounds(Bounds::new(0.5, 0.0, 100.0, 100.0), 1.0));
}

#[test]
fn dtg_canvas_is_12_by_16_inches() {
    let c = PrintCanvas::DTG_12X16;
    assert_eq!((c.width, c.height, c.dpi), (3600, 4800, 300));
    assert_eq!(c.inches(), (12.0, 16.0));
    assert_eq!(c.bounds(), Bounds::from_size(3600.0, 4800.0));
}

#[test]
fn canvas_validation_rejects_zero_and_oversize() {
    assert!(PrintCanvas::new(0, 10, 300).is_err());
    assert!(PrintCanvas::new(10, 10, 0).is_err());
    assert!(PrintCanvas::new(70_000, 10, 300).is_err());
    assert!(PrintCanvas::new(3600, 4800, 300).is_ok());
}

#[test]
fn preview_canvas_keeps_aspect_and_physical_size() {
    let p = PrintCanvas::DTG_12X16.scaled_to_width(360).unwrap();
    assert_eq!((p.width, p.height, p.dpi), (360, 480, 30));
    assert_eq!(p.inches(), (12.0, 16.0));
    assert!(PrintCanvas::DTG_12X16.scaled_to_width(0).is_err());
}

#[test]
fn hex_colors_parse() {
    assert_eq!(Rgba8::parse_hex("#fff").unwrap(), Rgba8::WHITE);
    assert_eq!(
        Rgba8::parse_hex("#102030").unwrap(),
        Rgba8::opaque(0x10, 0x20, 0x30)
    );
    assert_eq!(
        Rgba8::parse_hex("10203080").unwrap(),
        Rgba8 {
            r: 0x10,
            g: 0x20,
            b: 0x30,
            a: 0x80
        }
    );
    assert!(Rgba8::parse_hex("#12345").is_err());
    assert!(Rgba8::parse_hex("#zzzzzz").is_err());
    assert!(Rgba8::parse_hex("#ééé").is_err());
}
