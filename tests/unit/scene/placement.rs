use super::*;

#[test]
fn centered_default_is_valid() {
    let p = PlacementSpec::default();
    assert_eq!((p.center_x, p.center_y), (0.5, 0.5));
    assert_eq!(p.width_fraction, 0.4);
    assert_eq!(p.opacity(), 1.0);
    p.validate().unwrap();
}

#[test]
fn validate_rejects_out_of_range_fields() {
    let base = PlacementSpec::default();
    let cases = [
        PlacementSpec { center_x: 1.5, ..base },
        PlacementSpec { center_y: f64::NAN, ..base },
        PlacementSpec { width_fraction: 0.0, ..base },
        PlacementSpec { width_fraction: -0.2, ..base },
        PlacementSpec { width_fraction: 1.01, ..base },
        PlacementSpec { rotation_degrees: 181.0, ..base },
        PlacementSpec { opacity_percent: 101, ..base },
    ];
    for p in cases {
        assert!(p.validate().unwrap_err().is_invalid_input(), "{p:?}");
    }
}

#[test]
fn full_rotation_range_is_accepted() {
    for deg in [-180.0, -45.0, 90.0, 180.0] {
        PlacementSpec {
            rotation_degrees: deg,
            ..PlacementSpec::default()
        }
        .validate()
        .unwrap();
    }
}

#[test]
fn serde_uses_camel_case() {
    let json = serde_json::to_value(PlacementSpec::default()).unwrap();
    assert_eq!(json["centerX"], 0.5);
    assert_eq!(json["widthFraction"], 0.4);
    assert_eq!(json["opacityPercent"], 100);
}
