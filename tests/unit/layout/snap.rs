use super::*;

fn zone() -> Bounds {
    Bounds::new(100.0, 50.0, 300.0, 400.0)
}

#[test]
fn near_center_snaps_to_center_lines() {
    let out = snap_to_guides(247.0, 252.0, 20.0, 20.0, zone(), 5.0);
    assert_eq!((out.x, out.y), (250.0, 250.0));
    assert_eq!(out.guides, vec![Guide::CenterX, Guide::CenterY]);
}

#[test]
fn far_from_guides_is_untouched() {
    let out = snap_to_guides(180.0, 140.0, 20.0, 20.0, zone(), 5.0);
    assert_eq!((out.x, out.y), (180.0, 140.0));
    assert!(out.guides.is_empty());
}

#[test]
fn inner_edges_snap_box_flush_with_bounds() {
    // Left edge of a 40px wide box sits 3px inside the zone.
    let out = snap_to_guides(123.0, 250.0, 20.0, 20.0, zone(), 5.0);
    assert_eq!(out.x, 120.0);
    assert!(out.guides.contains(&Guide::Left));

    let out = snap_to_guides(250.0, 428.0, 20.0, 20.0, zone(), 5.0);
    assert_eq!(out.y, 430.0);
    assert!(out.guides.contains(&Guide::Bottom));

    let out = snap_to_guides(379.0, 71.0, 20.0, 20.0, zone(), 5.0);
    assert_eq!((out.x, out.y), (380.0, 70.0));
    assert_eq!(out.guides, vec![Guide::Right, Guide::Top]);
}

#[test]
fn nearest_candidate_wins_when_several_are_in_range() {
    // Box half-width 145 puts the left-edge target at 245 and the center at 250.
    let out = snap_to_guides(246.0, 100.0, 145.0, 20.0, zone(), 10.0);
    assert_eq!(out.x, 245.0);
    assert!(out.guides.contains(&Guide::Left));
    assert!(!out.guides.contains(&Guide::CenterX));
}

#[test]
fn full_width_box_reports_every_coincident_guide() {
    let out = snap_to_guides(250.0, 250.0, 150.0, 20.0, zone(), 1.0);
    assert_eq!(out.x, 250.0);
    assert!(out.guides.contains(&Guide::CenterX));
    assert!(out.guides.contains(&Guide::Left));
    assert!(out.guides.contains(&Guide::Right));
}

#[test]
fn snapping_is_idempotent() {
    let b = zone();
    let halves = [(20.0, 20.0), (145.0, 30.0), (1.0, 199.0), (150.0, 200.0)];
    for &(hw, hh) in &halves {
        let mut x = b.x;
        while x <= b.right() {
            let mut y = b.y;
            while y <= b.bottom() {
                let once = snap_to_guides(x, y, hw, hh, b, 8.0);
                let twice = snap_to_guides(once.x, once.y, hw, hh, b, 8.0);
                assert_eq!(once, twice);
                y += 3.7;
            }
            x += 3.3;
        }
    }
}

#[test]
fn negative_or_nan_snap_distance_disables_snapping() {
    let out = snap_to_guides(249.0, 249.0, 10.0, 10.0, zone(), -1.0);
    assert_eq!((out.x, out.y), (249.0, 249.0));
    let out = snap_to_guides(249.0, 249.0, 10.0, 10.0, zone(), f64::NAN);
    assert_eq!((out.x, out.y), (249.0, 249.0));
}
