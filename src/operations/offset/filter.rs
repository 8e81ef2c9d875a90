use crate::error::{ArgumentError, Result};
use crate::math::polygon_2d::{cross_2d, is_closed, points_coincide, segment_direction};
use crate::math::{Point2, Vector2, COLLINEAR_TOLERANCE};

use super::params::DistanceSpec;

/// A polyline cleaned of consecutive duplicates, with its segment distances
/// and directions resolved.
///
/// Adjacency is positional: segment `k` runs from `points[k]` to
/// `points[(k + 1) % len]`, and vertex `i` joins segments `i - 1` and `i`
/// (modulo the vertex count when `cyclic`).
#[derive(Debug, Clone)]
pub struct FilteredPolyline {
    /// Distinct vertices. A closing point equal to the first is not repeated.
    pub points: Vec<Point2>,
    /// One signed distance per segment.
    pub distances: Vec<f64>,
    /// One unit direction per segment.
    pub directions: Vec<Vector2>,
    /// `true` if the last vertex connects back to the first.
    pub cyclic: bool,
    /// `true` if the input repeated its first point at the end.
    pub closed: bool,
    /// Per vertex: both adjoining segments point the same way.
    pub collinear: Vec<bool>,
}

impl FilteredPolyline {
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.directions.len()
    }

    /// Start and end point of segment `k`.
    #[must_use]
    pub fn segment(&self, k: usize) -> (Point2, Point2) {
        let n = self.points.len();
        (self.points[k], self.points[(k + 1) % n])
    }

    /// Indices of the segments entering and leaving vertex `i`, if both exist.
    #[must_use]
    pub fn adjoining(&self, i: usize) -> Option<(usize, usize)> {
        let n = self.points.len();
        if self.cyclic {
            Some(((i + n - 1) % n, i))
        } else if i == 0 || i + 1 >= n {
            None
        } else {
            Some((i - 1, i))
        }
    }

    /// Number of segments in the input, before duplicates are dropped.
    #[must_use]
    pub fn input_segment_count(points: &[Point2], force_loop: bool) -> usize {
        let n = points.len();
        if is_closed(points) {
            n - 1
        } else if force_loop {
            n
        } else {
            n.saturating_sub(1)
        }
    }
}

/// Validates the input and removes consecutive duplicate points.
///
/// A zero-length segment is dropped together with its distance; the segment
/// that follows keeps its own distance. Collinear vertices are kept but
/// flagged, so corner classification never sees a zero-angle turn.
///
/// # Errors
///
/// Returns `ArgumentError::TooFewPoints` for fewer than 2 points, a distance
/// error from [`DistanceSpec::per_segment`], or
/// `ArgumentError::TooFewDistinctPoints` if everything collapses to one point.
pub fn apply(
    points: &[Point2],
    distances: &DistanceSpec,
    force_loop: bool,
) -> Result<FilteredPolyline> {
    let n = points.len();
    if n < 2 {
        return Err(ArgumentError::TooFewPoints { count: n }.into());
    }

    let closed = is_closed(points);
    let cyclic = closed || force_loop;
    let base = if closed { &points[..n - 1] } else { points };
    let segment_count = FilteredPolyline::input_segment_count(points, force_loop);
    let distances = distances.per_segment(segment_count)?;

    let mut kept: Vec<Point2> = Vec::with_capacity(base.len());
    let mut kept_distances: Vec<f64> = Vec::with_capacity(segment_count);
    kept.push(base[0]);
    for (s, next) in base.iter().enumerate().skip(1) {
        if kept.last().is_some_and(|last| points_coincide(last, next)) {
            continue;
        }
        kept.push(*next);
        kept_distances.push(distances[s - 1]);
    }

    if cyclic {
        if kept.len() > 1 && points_coincide(&kept[kept.len() - 1], &kept[0]) {
            // The segment into the dropped point now closes the loop.
            kept.pop();
        } else {
            kept_distances.push(distances[segment_count - 1]);
        }
    }

    if kept.len() < 2 {
        return Err(ArgumentError::TooFewDistinctPoints { count: kept.len() }.into());
    }

    let dropped = base.len() - kept.len();
    if dropped > 0 {
        tracing::debug!(dropped, "removed duplicate points before offsetting");
    }

    let m = kept.len();
    let directions = (0..kept_distances.len())
        .map(|k| segment_direction(&kept[k], &kept[(k + 1) % m]))
        .collect::<Result<Vec<_>>>()?;

    let mut filtered = FilteredPolyline {
        points: kept,
        distances: kept_distances,
        directions,
        cyclic,
        closed,
        collinear: Vec::new(),
    };
    filtered.collinear = (0..m)
        .map(|i| {
            filtered.adjoining(i).is_some_and(|(a, b)| {
                let (da, db) = (&filtered.directions[a], &filtered.directions[b]);
                cross_2d(da, db).abs() < COLLINEAR_TOLERANCE && da.dot(db) > 0.0
            })
        })
        .collect();

    Ok(filtered)
}
