use crate::foundation::core::Bounds;

/// A guide line a layer can snap to. Only used for UI highlighting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Guide {
    /// Vertical center line of the bounds.
    CenterX,
    /// Horizontal center line of the bounds.
    CenterY,
    Left,
    Right,
    Top,
    Bottom,
}

/// Result of [`snap_to_guides`].
#[derive(Clone, Debug, PartialEq)]
pub struct SnapOutcome {
    pub x: f64,
    pub y: f64,
    /// Every guide the snapped box lines up with, horizontal axis first.
    pub guides: Vec<Guide>,
}

// Values this close are the same guide line.
const COINCIDENT_EPS: f64 = 1e-9;

/// Snap a (clamped) center to the bounds' center lines or inner edges.
///
/// Per axis, the nearest candidate within `snap_px` wins. The reported guides are every candidate
/// that coincides with the final value, so snapping an already snapped point returns the same
/// point and the same guides.
pub fn snap_to_guides(
    x: f64,
    y: f64,
    half_w: f64,
    half_h: f64,
    bounds: Bounds,
    snap_px: f64,
) -> SnapOutcome {
    let c = bounds.center();
    let x_candidates = [
        (Guide::CenterX, c.x),
        (Guide::Left, bounds.x + half_w),
        (Guide::Right, bounds.right() - half_w),
    ];
    let y_candidates = [
        (Guide::CenterY, c.y),
        (Guide::Top, bounds.y + half_h),
        (Guide::Bottom, bounds.bottom() - half_h),
    ];

    let sx = snap_axis(x, &x_candidates, snap_px);
    let sy = snap_axis(y, &y_candidates, snap_px);

    let mut guides = Vec::new();
    coincident(sx, &x_candidates, &mut guides);
    coincident(sy, &y_candidates, &mut guides);

    SnapOutcome {
        x: sx,
        y: sy,
        guides,
    }
}

fn snap_axis(v: f64, candidates: &[(Guide, f64)], snap_px: f64) -> f64 {
    if snap_px.is_nan() || snap_px < 0.0 || !v.is_finite() {
        return v;
    }
    let mut best: Option<(f64, f64)> = None;
    for &(_, target) in candidates {
        let d = (v - target).abs();
        if d > snap_px {
            continue;
        }
        match best {
            Some((bd, _)) if bd <= d => {}
            _ => best = Some((d, target)),
        }
    }
    best.map_or(v, |(_, target)| target)
}

fn coincident(v: f64, candidates: &[(Guide, f64)], out: &mut Vec<Guide>) {
    for &(g, target) in candidates {
        if (v - target).abs() <= COINCIDENT_EPS {
            out.push(g);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/snap.rs"]
mod tests;
