use super::*;

fn text(scale: f64) -> TextLayer {
    TextLayer {
        placement: PlacementSpec::default(),
        text: "Hello".to_owned(),
        font_family: "Sans".to_owned(),
        fill: Rgba8::BLACK,
        scale_percent: scale,
    }
}

#[test]
fn font_px_follows_base_percent_and_scale() {
    assert_eq!(text(100.0).font_px(3600.0, 8.0), 288.0);
    assert_eq!(text(50.0).font_px(3600.0, 8.0), 144.0);
}

#[test]
fn text_layers_ignore_width_fraction() {
    let mut t = text(100.0);
    t.placement.width_fraction = 0.0;
    Layer::Text(t).validate().unwrap();
}

#[test]
fn empty_text_and_bad_scale_are_rejected() {
    let mut t = text(100.0);
    t.text = "  ".to_owned();
    assert!(Layer::Text(t).validate().unwrap_err().is_invalid_input());
    assert!(Layer::Text(text(0.0)).validate().is_err());
}

#[test]
fn image_layer_rejects_bad_aspect() {
    let layer = Layer::Image(ImageLayer {
        placement: PlacementSpec::default(),
        source: SourceRef::parse("a.png").unwrap(),
        aspect_ratio: Some(-1.0),
    });
    assert!(layer.validate().unwrap_err().is_invalid_input());
    assert_eq!(layer.kind(), "image");
}
