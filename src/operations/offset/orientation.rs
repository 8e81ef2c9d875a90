use crate::math::polygon_2d::signed_area_2d;
use crate::math::{Point2, TOLERANCE};

/// Returns `+1.0` or `-1.0`: the factor applied to every distance so that
/// the distance sign follows the caller's declared winding.
///
/// `reference_orient == 0.0` keeps distances literal (positive = left of the
/// walking direction). A non-zero value declares the winding the distances
/// were written for; when the polygon's actual winding disagrees, the sign
/// flips. Polylines with no measurable area keep the literal convention.
#[must_use]
pub fn resolve_sign(points: &[Point2], reference_orient: f64) -> f64 {
    if reference_orient.abs() < TOLERANCE {
        return 1.0;
    }
    let area = signed_area_2d(points);
    if area.abs() < TOLERANCE {
        return 1.0;
    }
    if area * reference_orient > 0.0 {
        1.0
    } else {
        -1.0
    }
}
