use crate::error::{GeometryError, PolyoffsetError, Result};
use crate::math::intersect_2d::{line_line_intersect_2d, point_at};
use crate::math::polygon_2d::{cross_2d, left_normal, points_coincide};
use crate::math::{Point2, Vector2, COLLINEAR_TOLERANCE};

use super::filter::FilteredPolyline;
use super::params::UTurnPolicy;

/// A segment translated along its left-hand normal by its signed distance.
///
/// Only lives for the duration of one corner computation.
#[derive(Debug, Clone, Copy)]
pub struct OffsetLine {
    pub start: Point2,
    pub end: Point2,
    pub dir: Vector2,
    pub distance: f64,
}

impl OffsetLine {
    /// Builds the offset line of segment `k`, with its distance scaled by `sign`.
    #[must_use]
    pub fn of_segment(polyline: &FilteredPolyline, k: usize, sign: f64) -> Self {
        let (a, b) = polyline.segment(k);
        let dir = polyline.directions[k];
        let distance = polyline.distances[k] * sign;
        let shift = left_normal(dir) * distance;
        Self {
            start: a + shift,
            end: b + shift,
            dir,
            distance,
        }
    }
}

/// How a vertex turns, as seen walking the polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerKind {
    /// Left turn.
    Convex,
    /// Right turn.
    Reflex,
    /// Turn sharper than the U-turn threshold.
    NearReversal,
    /// No turn: both segments point the same way.
    Collinear,
}

/// A classified interior vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    /// Vertex index in the de-duplicated point list.
    pub index: usize,
    /// Cosine of the angle between incoming and outgoing directions.
    pub cos: f64,
    /// Cross product of incoming and outgoing directions (positive = left turn).
    pub cross: f64,
    pub kind: CornerKind,
}

/// Classifies the turn at vertex `index` between two unit directions.
#[must_use]
pub fn classify(
    index: usize,
    dir_in: &Vector2,
    dir_out: &Vector2,
    collinear: bool,
    cos_threshold: f64,
) -> Corner {
    let cos = dir_in.dot(dir_out).clamp(-1.0, 1.0);
    let cross = cross_2d(dir_in, dir_out);
    let kind = if collinear {
        CornerKind::Collinear
    } else if cos < cos_threshold {
        CornerKind::NearReversal
    } else if cross >= 0.0 {
        CornerKind::Convex
    } else {
        CornerKind::Reflex
    };
    tracing::trace!(index, cos, cross, ?kind, "classified corner");
    Corner {
        index,
        cos,
        cross,
        kind,
    }
}

/// Pushes the offset point(s) for a non-collinear corner into `out`.
///
/// - Convex / Reflex: the intersection of both offset lines.
/// - NearReversal: resolved by `uturn`.
///
/// # Errors
///
/// Returns `GeometryError::Reversal` when the offset lines are anti-parallel
/// and do not touch: an exact 180° turn has no side to chamfer towards.
pub fn join(
    corner: &Corner,
    incoming: &OffsetLine,
    outgoing: &OffsetLine,
    uturn: UTurnPolicy,
    out: &mut Vec<Point2>,
) -> Result<()> {
    match corner.kind {
        CornerKind::NearReversal
            if corner.cross.abs() < COLLINEAR_TOLERANCE
                && !points_coincide(&incoming.end, &outgoing.start) =>
        {
            return Err(reversal(corner, incoming));
        }
        CornerKind::NearReversal => match uturn {
            UTurnPolicy::Chamfer => {
                tracing::debug!(index = corner.index, cos = corner.cos, "chamfering U-turn");
                push_pair(out, incoming.end, outgoing.start);
            }
        },
        CornerKind::Convex | CornerKind::Reflex | CornerKind::Collinear => {
            match line_line_intersect_2d(&incoming.end, &incoming.dir, &outgoing.start, &outgoing.dir)
            {
                Some((t, _u)) => out.push(point_at(&incoming.end, &incoming.dir, t)),
                None if points_coincide(&incoming.end, &outgoing.start) => out.push(incoming.end),
                None => return Err(reversal(corner, incoming)),
            }
        }
    }
    Ok(())
}

fn reversal(corner: &Corner, incoming: &OffsetLine) -> PolyoffsetError {
    GeometryError::Reversal {
        index: corner.index,
        x: incoming.end.x,
        y: incoming.end.y,
    }
    .into()
}

/// Pushes `a`, then `b` unless it coincides with `a`.
pub(super) fn push_pair(out: &mut Vec<Point2>, a: Point2, b: Point2) {
    out.push(a);
    if !points_coincide(&a, &b) {
        out.push(b);
    }
}
