use super::*;

fn assert_three_by_four(zone: Bounds) {
    assert!(
        (zone.height * 3.0 - zone.width * 4.0).abs() < 1e-9,
        "{zone:?} is not 3:4"
    );
}

#[test]
fn preset_inside_garment_is_used_as_is() {
    let garment = Bounds::new(0.0, 0.0, 1000.0, 1200.0);
    let zone = derive_safe_zone(garment, SafeZonePreset::new(0.3, 0.2, 0.4));
    assert_eq!(zone.x, 300.0);
    assert_eq!(zone.y, 240.0);
    assert_eq!(zone.width, 400.0);
    assert_three_by_four(zone);
    assert!(garment.contains_bounds(zone, 1e-9));
}

#[test]
fn corner_overflow_shrinks_inside_garment_keeping_ratio() {
    let garment = Bounds::new(0.0, 0.0, 1000.0, 1000.0);
    let zone = derive_safe_zone(garment, SafeZonePreset::new(0.8, 0.8, 0.5));
    assert!(garment.contains_bounds(zone, 1e-9));
    assert_three_by_four(zone);
    assert_eq!((zone.x, zone.y), (800.0, 800.0));
    assert!((zone.width - 150.0).abs() < 1e-9);
    assert!((zone.height - 200.0).abs() < 1e-9);
}

#[test]
fn width_only_overflow_is_width_constrained() {
    let garment = Bounds::new(10.0, 10.0, 1000.0, 4000.0);
    let zone = derive_safe_zone(garment, SafeZonePreset::new(0.75, 0.0, 0.5));
    assert!((zone.width - 250.0).abs() < 1e-9);
    assert_three_by_four(zone);
    assert!(garment.contains_bounds(zone, 1e-9));
}

#[test]
fn any_preset_converges_inside_garment() {
    let garment = Bounds::new(-20.0, 35.0, 640.0, 480.0);
    for l in 0..=12 {
        for t in 0..=12 {
            for w in 1..=12 {
                let preset = SafeZonePreset::new(
                    f64::from(l) / 10.0,
                    f64::from(t) / 10.0,
                    f64::from(w) / 10.0,
                );
                let zone = derive_safe_zone(garment, preset);
                assert!(garment.contains_bounds(zone, 1e-9), "{preset:?} -> {zone:?}");
                assert_three_by_four(zone);
            }
        }
    }
}

#[test]
fn fallback_is_proportional_and_centered() {
    let container = Bounds::new(0.0, 0.0, 500.0, 600.0);
    let zone = fallback_safe_zone(container);
    assert!((zone.width - 180.0).abs() < 1e-9);
    assert!((zone.x + zone.width * 0.5 - 250.0).abs() < 1e-9);
    assert!((zone.y - 132.0).abs() < 1e-9);
    assert_three_by_four(zone);
    assert!(container.contains_bounds(zone, 1e-9));
}

#[test]
fn fallback_in_short_container_still_fits() {
    let container = Bounds::new(0.0, 0.0, 1000.0, 200.0);
    let zone = fallback_safe_zone(container);
    assert!(container.contains_bounds(zone, 1e-9));
    assert_three_by_four(zone);
}

#[test]
fn garment_box_letterboxes_mockup() {
    let container = Bounds::new(0.0, 0.0, 800.0, 600.0);
    let b = garment_box_in_container(container, Size::new(1000.0, 1000.0)).unwrap();
    assert_eq!(b, Bounds::new(100.0, 0.0, 600.0, 600.0));

    let b = garment_box_in_container(container, Size::new(1600.0, 600.0)).unwrap();
    assert_eq!(b, Bounds::new(0.0, 150.0, 800.0, 300.0));

    assert!(garment_box_in_container(container, Size::new(0.0, 10.0)).is_err());
}

#[test]
fn presets_validate_and_select_side() {
    let presets = SafeZonePresets::default();
    presets.validate().unwrap();
    assert_eq!(presets.for_side(Side::Back), presets.back);
    assert!(SafeZonePreset::new(0.1, 0.1, 0.0).validate().is_err());
    assert!(SafeZonePreset::new(f64::NAN, 0.1, 0.3).validate().is_err());
}

#[test]
fn side_parses_case_insensitively() {
    assert_eq!("FRONT".parse::<Side>().unwrap(), Side::Front);
    assert_eq!(" back ".parse::<Side>().unwrap(), Side::Back);
    assert!("sleeve".parse::<Side>().unwrap_err().is_invalid_input());
}

#[test]
fn side_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Side::Back).unwrap(), "\"back\"");
}
