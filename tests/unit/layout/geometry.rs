use super::*;

const EPS: f64 = 1e-9;

fn approx(a: (f64, f64), b: (f64, f64)) -> bool {
    (a.0 - b.0).abs() < EPS && (a.1 - b.1).abs() < EPS
}

fn sample_bounds() -> Vec<Bounds> {
    vec![
        Bounds::new(0.0, 0.0, 500.0, 500.0),
        Bounds::new(12.5, 40.0, 300.0, 400.0),
        Bounds::new(-100.0, -50.0, 3600.0, 4800.0),
        Bounds::new(7.0, 3.0, 1.0, 0.25),
    ]
}

#[test]
fn zero_rotation_is_half_size() {
    assert_eq!(rotated_half_extents(400.0, 100.0, 0.0), (200.0, 50.0));
    assert_eq!(rotated_half_extents(3.0, 7.0, 360.0), (1.5, 3.5));
}

#[test]
fn quarter_turns_are_exact() {
    assert_eq!(rotated_half_extents(400.0, 100.0, 90.0), (50.0, 200.0));
    assert_eq!(rotated_half_extents(400.0, 100.0, -90.0), (50.0, 200.0));
    assert_eq!(rotated_half_extents(400.0, 100.0, 180.0), (200.0, 50.0));
    assert_eq!(rotated_half_extents(400.0, 100.0, -180.0), (200.0, 50.0));
}

#[test]
fn rotation_symmetry_half_turn_and_swapped_quarter_turn() {
    for &(w, h) in &[(400.0, 100.0), (1.0, 1.0), (37.5, 912.0)] {
        let mut theta = -180.0;
        while theta <= 180.0 {
            let base = rotated_half_extents(w, h, theta);
            assert!(approx(base, rotated_half_extents(w, h, theta + 180.0)));
            assert!(approx(base, rotated_half_extents(h, w, theta + 90.0)));
            theta += 7.5;
        }
    }
}

#[test]
fn forty_five_degrees_of_400_by_100() {
    let (hw, hh) = rotated_half_extents(400.0, 100.0, 45.0);
    let expected = 0.5 * (500.0 * std::f64::consts::FRAC_1_SQRT_2);
    assert!((hw - expected).abs() < 1e-9);
    assert!((hh - expected).abs() < 1e-9);
    assert!((hw - 176.776_695).abs() < 1e-5);
}

#[test]
fn max_rotation_layer_fits_in_500_zone_without_clamp() {
    let zone = Bounds::from_size(500.0, 500.0);
    let (hw, hh) = rotated_half_extents(400.0, 100.0, 45.0);
    let c = zone.center();
    let out = clamp_center_to_bounds(c.x, c.y, hw, hh, zone, VerticalClamp::Contained);
    assert!(!out.clamped);
    assert!(!out.degenerate);
    assert_eq!(out.point(), c);
}

#[test]
fn oversized_extents_in_small_zone_fall_back_to_center() {
    let zone = Bounds::new(50.0, 60.0, 300.0, 300.0);
    let out = clamp_center_to_bounds(0.0, 0.0, 300.0, 300.0, zone, VerticalClamp::Legacy);
    assert!(out.degenerate);
    assert!(out.clamped);
    assert_eq!((out.x, out.y), (200.0, 210.0));

    // Only one axis too large is still degenerate.
    let out = clamp_center_to_bounds(100.0, 100.0, 10.0, 151.0, zone, VerticalClamp::Contained);
    assert!(out.degenerate);
    assert_eq!((out.x, out.y), (200.0, 210.0));
}

#[test]
fn contained_clamp_keeps_box_inside_bounds() {
    let requests = [
        (-1e6, -1e6),
        (1e6, 1e6),
        (0.0, 0.0),
        (250.0, 4000.0),
        (3.0, -8.0),
        (f64::NAN, 10.0),
    ];
    let halves = [(0.0, 0.0), (10.0, 20.0), (149.0, 1.0), (0.1, 0.12), (2000.0, 10.0)];

    for bounds in sample_bounds() {
        for &(hw, hh) in &halves {
            for &(x, y) in &requests {
                let out = clamp_center_to_bounds(x, y, hw, hh, bounds, VerticalClamp::Contained);
                if 2.0 * hw > bounds.width || 2.0 * hh > bounds.height {
                    assert!(out.degenerate);
                    assert_eq!(out.point(), bounds.center());
                } else {
                    assert!(!out.degenerate);
                    let placed = Bounds::around(out.x, out.y, hw, hh);
                    assert!(
                        bounds.contains_bounds(placed, 1e-9),
                        "{placed:?} escapes {bounds:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn legacy_clamp_contains_horizontally_but_allows_bottom_overhang() {
    let zone = Bounds::from_size(500.0, 500.0);
    let out = clamp_center_to_bounds(1e6, 1e6, 100.0, 50.0, zone, VerticalClamp::Legacy);
    assert_eq!(out.x, 400.0);
    assert_eq!(out.y, 500.0);
    assert!(out.clamped);

    let top = clamp_center_to_bounds(-1e6, -1e6, 100.0, 50.0, zone, VerticalClamp::Legacy);
    assert_eq!((top.x, top.y), (100.0, 50.0));
}

#[test]
fn unclamped_request_is_reported_as_such() {
    let zone = Bounds::from_size(500.0, 500.0);
    let out = clamp_center_to_bounds(250.0, 260.0, 10.0, 10.0, zone, VerticalClamp::Legacy);
    assert!(!out.clamped);
    assert_eq!((out.x, out.y), (250.0, 260.0));
}

#[test]
fn normalize_round_trips_inside_bounds() {
    for bounds in sample_bounds() {
        for i in 0..=10 {
            for j in 0..=10 {
                let x = bounds.x + bounds.width * f64::from(i) / 10.0;
                let y = bounds.y + bounds.height * f64::from(j) / 10.0;
                let (nx, ny) = normalize(x, y, bounds);
                let (rx, ry) = denormalize(nx, ny, bounds);
                assert!((rx - x).abs() < 1e-6);
                assert!((ry - y).abs() < 1e-6);
            }
        }
    }
}

#[test]
fn normalize_maps_corners_and_center() {
    let b = Bounds::new(100.0, 200.0, 300.0, 400.0);
    assert_eq!(normalize(100.0, 200.0, b), (0.0, 0.0));
    assert_eq!(normalize(400.0, 600.0, b), (1.0, 1.0));
    assert_eq!(normalize(250.0, 400.0, b), (0.5, 0.5));
    assert_eq!(denormalize(0.5, 0.5, b), (250.0, 400.0));
}

#[test]
fn degenerate_bounds_normalize_to_half() {
    let b = Bounds::new(10.0, 10.0, 0.0, 0.0);
    assert_eq!(normalize(999.0, -3.0, b), (0.5, 0.5));
    let b = Bounds::new(10.0, 10.0, 0.0, 50.0);
    assert_eq!(normalize(999.0, 35.0, b), (0.5, 0.5));
}
