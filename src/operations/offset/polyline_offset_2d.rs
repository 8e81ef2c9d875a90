use crate::error::Result;
use crate::math::{Point2, NEAR_PARALLEL_TOLERANCE, TOLERANCE};

use super::corner::{self, Corner, CornerKind, OffsetLine};
use super::filter::{self, FilteredPolyline};
use super::orientation::resolve_sign;
use super::params::{DistanceSpec, OffsetParams, UTurnPolicy, VarDistParallel};
use super::var_dist;

/// Offsets a 2D polyline by one distance or one distance per segment.
///
/// # Algorithm
///
/// 1. Drop consecutive duplicate points and flag collinear vertices
/// 2. Resolve the distance sign from `reference_orient`
/// 3. Translate every segment along its left-hand normal
/// 4. Per vertex, classify the corner and join the adjoining offset lines:
///    intersection for ordinary corners, a chamfer for U-turns, the
///    [`VarDistParallel`] policy for collinear segments with different distances
///
/// # Sign Convention
///
/// - Positive distance: left offset (relative to walking direction), i.e.
///   inward for a counter-clockwise polygon
/// - Negative distance: right offset
///
/// The output is a new point list with the same open/closed-ness as the input.
/// Global self-intersections of the result are not removed.
#[derive(Debug, Clone)]
pub struct PolylineOffset2D {
    points: Vec<Point2>,
    distances: DistanceSpec,
    params: OffsetParams,
}

impl PolylineOffset2D {
    /// Creates a new polyline offset operation with default parameters.
    #[must_use]
    pub fn new(points: Vec<Point2>, distances: impl Into<DistanceSpec>) -> Self {
        Self {
            points,
            distances: distances.into(),
            params: OffsetParams::default(),
        }
    }

    /// Sets custom offset parameters.
    #[must_use]
    pub fn with_params(mut self, params: OffsetParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the offset operation.
    ///
    /// # Errors
    ///
    /// - `ArgumentError` for fewer than 2 (distinct) points, a distance list
    ///   whose length differs from the segment count, or invalid parameters
    /// - `GeometryError::Reversal` for an exact 180° turn with U-turn
    ///   handling disabled
    pub fn execute(&self) -> Result<Vec<Point2>> {
        self.params.validate()?;
        let filtered = filter::apply(&self.points, &self.distances, self.params.force_loop)?;

        if filtered.distances.iter().all(|d| d.abs() < TOLERANCE) {
            return Ok(close_if(filtered.points, filtered.closed));
        }

        let sign = resolve_sign(&filtered.points, self.params.reference_orient);
        let lines: Vec<OffsetLine> = (0..filtered.segment_count())
            .map(|k| OffsetLine::of_segment(&filtered, k, sign))
            .collect();

        let n = filtered.points.len();
        let mut out = Vec::with_capacity(n + 2);
        for i in 0..n {
            let Some((a, b)) = filtered.adjoining(i) else {
                // Open end: offset perpendicular to its only segment.
                if i == 0 {
                    out.push(lines[0].start);
                } else {
                    out.push(lines[lines.len() - 1].end);
                }
                continue;
            };
            let corner = self.corner_at(&filtered, i, &lines[a], &lines[b]);
            let parallel = corner.kind == CornerKind::Collinear
                || joins_as_parallel(&corner, &lines[a], &lines[b]);
            if parallel {
                var_dist::join_collinear(&corner, &lines[a], &lines[b], self.params.var_dist, &mut out);
            } else {
                corner::join(&corner, &lines[a], &lines[b], self.params.uturn, &mut out)?;
            }
        }

        tracing::debug!(
            input = self.points.len(),
            output = out.len() + usize::from(filtered.closed),
            closed = filtered.closed,
            "offset polyline"
        );
        Ok(close_if(out, filtered.closed))
    }

    /// Classifies every vertex that has two adjoining segments.
    ///
    /// Indices refer to the de-duplicated point list.
    ///
    /// # Errors
    ///
    /// Same argument errors as [`execute`](Self::execute).
    pub fn corners(&self) -> Result<Vec<Corner>> {
        self.params.validate()?;
        let filtered = filter::apply(&self.points, &self.distances, self.params.force_loop)?;
        let corners = (0..filtered.points.len())
            .filter_map(|i| {
                filtered.adjoining(i).map(|(a, b)| {
                    corner::classify(
                        i,
                        &filtered.directions[a],
                        &filtered.directions[b],
                        filtered.collinear[i],
                        self.params.cos_threshold,
                    )
                })
            })
            .collect();
        Ok(corners)
    }

    fn corner_at(
        &self,
        filtered: &FilteredPolyline,
        i: usize,
        incoming: &OffsetLine,
        outgoing: &OffsetLine,
    ) -> Corner {
        corner::classify(
            i,
            &incoming.dir,
            &outgoing.dir,
            filtered.collinear[i],
            self.params.cos_threshold,
        )
    }
}

/// Near-parallel edges with different distances: their offset lines meet far
/// from both endpoints, so they go through the variable-distance policy.
fn joins_as_parallel(corner: &Corner, incoming: &OffsetLine, outgoing: &OffsetLine) -> bool {
    matches!(corner.kind, CornerKind::Convex | CornerKind::Reflex)
        && corner.cos > 0.0
        && corner.cross.abs() < NEAR_PARALLEL_TOLERANCE
        && (incoming.distance - outgoing.distance).abs() >= TOLERANCE
}

/// Repeats the first point at the end when `closed`.
fn close_if(mut points: Vec<Point2>, closed: bool) -> Vec<Point2> {
    if closed {
        if let Some(&first) = points.first() {
            points.push(first);
        }
    }
    points
}

/// Offsets `points` by one distance for every segment.
///
/// Closed input (first point equal to last) gives closed output.
///
/// # Errors
///
/// See [`PolylineOffset2D::execute`].
pub fn offset(points: &[Point2], distance: f64) -> Result<Vec<Point2>> {
    PolylineOffset2D::new(points.to_vec(), distance).execute()
}

/// Offsets `points` with one distance per segment.
///
/// # Errors
///
/// Returns `ArgumentError::DistanceCountMismatch` if `distances.len()` is not
/// `points.len() - 1`; otherwise see [`PolylineOffset2D::execute`].
pub fn offset_variable(points: &[Point2], distances: &[f64]) -> Result<Vec<Point2>> {
    PolylineOffset2D::new(points.to_vec(), distances).execute()
}

/// Offsets `points` by one distance with an explicit U-turn threshold and policy.
///
/// # Errors
///
/// See [`PolylineOffset2D::execute`].
pub fn offset_with_threshold(
    points: &[Point2],
    distance: f64,
    cos_threshold: f64,
    uturn: UTurnPolicy,
) -> Result<Vec<Point2>> {
    let params = OffsetParams::default()
        .with_cos_threshold(cos_threshold)
        .with_uturn(uturn);
    PolylineOffset2D::new(points.to_vec(), distance)
        .with_params(params)
        .execute()
}

/// Offsets `points` with one distance per segment and explicit join policies.
///
/// # Errors
///
/// See [`offset_variable`].
pub fn offset_variable_with(
    points: &[Point2],
    distances: &[f64],
    uturn: UTurnPolicy,
    var_dist: VarDistParallel,
) -> Result<Vec<Point2>> {
    let params = OffsetParams::default()
        .with_uturn(uturn)
        .with_var_dist(var_dist);
    PolylineOffset2D::new(points.to_vec(), distances)
        .with_params(params)
        .execute()
}

/// Classifies the corners of `points` without offsetting them.
///
/// # Errors
///
/// See [`PolylineOffset2D::corners`].
pub fn classify_corners(points: &[Point2], params: OffsetParams) -> Result<Vec<Corner>> {
    PolylineOffset2D::new(points.to_vec(), 0.0)
        .with_params(params)
        .corners()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::{ArgumentError, GeometryError, PolyoffsetError};
    use crate::math::polygon_2d::signed_area_2d;

    /// Helper: asserts two point lists are pointwise equal within `tol`.
    fn assert_points_near(actual: &[Point2], expected: &[Point2], tol: f64) {
        assert_eq!(
            actual.len(),
            expected.len(),
            "point count: expected {expected:?}, got {actual:?}"
        );
        for (a, e) in actual.iter().zip(expected) {
            assert_abs_diff_eq!(*a, *e, epsilon = tol);
        }
    }

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    fn square_10() -> Vec<Point2> {
        pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)])
    }

    fn l_shape_ccw() -> Vec<Point2> {
        pts(&[
            (0.0, 0.0),
            (6.0, 0.0),
            (6.0, 2.0),
            (2.0, 2.0),
            (2.0, 6.0),
            (0.0, 6.0),
            (0.0, 0.0),
        ])
    }

    fn reversed(points: &[Point2]) -> Vec<Point2> {
        points.iter().rev().copied().collect()
    }

    /// Distance from `p` to the infinite line through `a` and `b`.
    fn distance_to_line(p: &Point2, a: &Point2, b: &Point2) -> f64 {
        let dir = (b - a).normalize();
        let rel = p - a;
        (rel.x * dir.y - rel.y * dir.x).abs()
    }

    #[test]
    fn closed_square_uniform_inset() {
        let result = offset(&square_10(), 2.0).unwrap();
        assert_points_near(
            &result,
            &pts(&[(2.0, 2.0), (8.0, 2.0), (8.0, 8.0), (2.0, 8.0), (2.0, 2.0)]),
            1e-9,
        );
    }

    #[test]
    fn closed_square_per_edge_distances() {
        // Only the two bottom corners move with the wider bottom edge.
        let result = offset_variable(&square_10(), &[4.0, 2.0, 2.0, 2.0]).unwrap();
        assert_points_near(
            &result,
            &pts(&[(2.0, 4.0), (8.0, 4.0), (8.0, 8.0), (2.0, 8.0), (2.0, 4.0)]),
            1e-9,
        );
    }

    #[test]
    fn open_zigzag_keeps_point_count() {
        let input = pts(&[(0.0, 0.0), (1.0, 0.0), (1.1, 1.0), (2.0, 1.0), (2.1, 0.0)]);
        let result = offset(&input, -0.3).unwrap();

        assert_eq!(result.len(), 5);
        assert!(((result[0] - input[0]).norm() - 0.3).abs() < 1e-12);
        assert!(((result[4] - input[4]).norm() - 0.3).abs() < 1e-12);
        // Mitred away from the 84° corner, further than the plain distance.
        assert!((result[1] - input[1]).norm() > 0.31);
    }

    #[test]
    fn round_trip_uniform_both_windings() {
        for input in [l_shape_ccw(), reversed(&l_shape_ccw())] {
            let there = offset(&input, 0.5).unwrap();
            let back = offset(&there, -0.5).unwrap();
            assert_points_near(&back, &input, 1e-6);
        }
    }

    #[test]
    fn round_trip_per_segment_both_windings() {
        let distances = [0.5, 0.3, 0.2, 0.4, 0.3, 0.6];
        let negated: Vec<f64> = distances.iter().map(|d| -d).collect();
        for input in [l_shape_ccw(), reversed(&l_shape_ccw())] {
            let there = offset_variable(&input, &distances).unwrap();
            assert_eq!(there.len(), input.len());
            let back = offset_variable(&there, &negated).unwrap();
            assert_points_near(&back, &input, 1e-6);
        }
    }

    #[test]
    fn zero_distance_closed_is_identity() {
        let input = l_shape_ccw();
        assert_eq!(offset(&input, 0.0).unwrap(), input);
        assert_eq!(offset_variable(&input, &[0.0; 6]).unwrap(), input);
    }

    #[test]
    fn zero_distance_open_is_identity() {
        let input = pts(&[(1.0, 2.0), (3.0, 4.0), (5.0, 1.0)]);
        assert_eq!(offset(&input, 0.0).unwrap(), input);
    }

    #[test]
    fn zero_distance_open_drops_trailing_duplicate() {
        let input = pts(&[(0.0, 0.0), (3.0, 0.0), (3.0, 3.0), (3.0, 3.0)]);
        let result = offset(&input, 0.0).unwrap();
        assert_eq!(result, input[..3].to_vec());
    }

    #[test]
    fn positive_distance_shrinks_ccw_and_grows_cw() {
        let ccw = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]);
        let inset = offset(&ccw, 0.2).unwrap();
        assert!((signed_area_2d(&inset) - 0.36).abs() < 1e-9);

        let cw = reversed(&ccw);
        let outset = offset(&cw, 0.2).unwrap();
        assert!((signed_area_2d(&outset).abs() - 1.96).abs() < 1e-9);
    }

    #[test]
    fn distance_count_must_match_segments() {
        for distances in [vec![1.0; 3], vec![1.0; 5]] {
            let err = offset_variable(&square_10(), &distances).unwrap_err();
            assert!(matches!(
                err,
                PolyoffsetError::Argument(ArgumentError::DistanceCountMismatch {
                    expected: 4,
                    ..
                })
            ));
        }
    }

    #[test]
    fn open_segment_offsets_left() {
        let input = pts(&[(0.0, 0.0), (10.0, 0.0)]);
        assert_points_near(&offset(&input, 1.0).unwrap(), &pts(&[(0.0, 1.0), (10.0, 1.0)]), 1e-12);
        assert_points_near(
            &offset(&input, -1.0).unwrap(),
            &pts(&[(0.0, -1.0), (10.0, -1.0)]),
            1e-12,
        );
    }

    #[test]
    fn spike_is_chamfered() {
        let input = pts(&[(0.0, 0.0), (10.0, 0.0), (0.0, 0.5)]);
        let result = offset(&input, 1.0).unwrap();

        assert_eq!(result.len(), 4);
        // Each chamfer point sits exactly on its own segment's offset line.
        assert!((distance_to_line(&result[1], &input[0], &input[1]) - 1.0).abs() < 1e-9);
        assert!((distance_to_line(&result[2], &input[1], &input[2]) - 1.0).abs() < 1e-9);
        assert!((result[1] - input[1]).norm() < 1.1);
        assert!((result[2] - input[1]).norm() < 1.1);
    }

    #[test]
    fn spike_without_chamfer_mitres_far_away() {
        let input = pts(&[(0.0, 0.0), (10.0, 0.0), (0.0, 0.5)]);
        let result = offset_with_threshold(&input, 1.0, -1.0, UTurnPolicy::Chamfer).unwrap();
        assert_eq!(result.len(), 3);
        assert!((result[1] - input[1]).norm() > 10.0);
    }

    #[test]
    fn exact_reversal_is_rejected() {
        let input = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 5.0), (10.0, 0.0), (20.0, 0.0)]);
        for threshold in [OffsetParams::default().cos_threshold, -1.0] {
            let err = offset_with_threshold(&input, 1.0, threshold, UTurnPolicy::Chamfer)
                .unwrap_err();
            assert!(matches!(
                err,
                PolyoffsetError::Geometry(GeometryError::Reversal { index: 2, .. })
            ));
        }

        // Zero-area closed spike.
        let spike = pts(&[(0.0, 0.0), (5.0, 0.0), (0.0, 0.0)]);
        assert!(matches!(
            offset(&spike, 1.0).unwrap_err(),
            PolyoffsetError::Geometry(GeometryError::Reversal { .. })
        ));
    }

    #[test]
    fn sharp_tip_is_chamfered() {
        let input = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 5.0), (10.2, 0.0), (20.0, 0.0)]);
        let result = offset(&input, 1.0).unwrap();
        // Two chamfer points at the tip replace the single corner.
        assert_eq!(result.len(), 6);
        assert_abs_diff_eq!(result[2], Point2::new(9.0, 5.0), epsilon = 1e-9);
        assert!((distance_to_line(&result[3], &input[2], &input[3]) - 1.0).abs() < 1e-9);
        assert!((result[3] - input[2]).norm() < 1.1);
    }

    #[test]
    fn near_parallel_distance_mismatch_is_not_mitred() {
        for rise in [1e-6, 1e-3] {
            let input = pts(&[(0.0, 0.0), (5.0, 0.0), (10.0, rise)]);
            let result = offset_variable(&input, &[1.0, 3.0]).unwrap();

            assert_eq!(result.len(), 4);
            assert!((distance_to_line(&result[1], &input[0], &input[1]) - 1.0).abs() < 1e-9);
            assert!((distance_to_line(&result[2], &input[1], &input[2]) - 3.0).abs() < 1e-9);
            for p in &result {
                assert!(p.x.abs() < 11.0 && p.y.abs() < 4.0, "({}, {}) diverged", p.x, p.y);
            }
        }

        // Equal distances still meet at the mitre.
        let input = pts(&[(0.0, 0.0), (5.0, 0.0), (10.0, 1e-3)]);
        let result = offset_variable(&input, &[1.0, 1.0]).unwrap();
        assert_eq!(result.len(), 3);
        assert!((result[1] - Point2::new(5.0, 1.0)).norm() < 1e-3);
    }

    #[test]
    fn collinear_run_stays_straight() {
        let input = pts(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0), (10.0, 4.0)]);
        let result = offset(&input, -1.0).unwrap();
        assert_points_near(
            &result,
            &pts(&[(0.0, -1.0), (5.0, -1.0), (11.0, -1.0), (11.0, 4.0)]),
            1e-9,
        );
    }

    #[test]
    fn parallel_distance_mismatch_policies() {
        let input = pts(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
        let distances = [1.0, 3.0];
        let run = |policy| {
            offset_variable_with(&input, &distances, UTurnPolicy::Chamfer, policy).unwrap()
        };

        assert_points_near(
            &run(VarDistParallel::Skip),
            &pts(&[(0.0, 1.0), (10.0, 3.0)]),
            1e-12,
        );
        assert_points_near(
            &run(VarDistParallel::Proportional),
            &pts(&[(0.0, 1.0), (5.0, 1.5), (10.0, 3.0)]),
            1e-12,
        );
        assert_points_near(
            &run(VarDistParallel::StepWithTwoPoints),
            &pts(&[(0.0, 1.0), (5.0, 1.0), (5.0, 3.0), (10.0, 3.0)]),
            1e-12,
        );
        // The default policy is the step.
        assert_eq!(
            offset_variable(&input, &distances).unwrap(),
            run(VarDistParallel::StepWithTwoPoints)
        );
    }

    #[test]
    fn duplicate_points_are_ignored() {
        let input = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
        let result = offset(&input, 2.0).unwrap();
        assert_points_near(
            &result,
            &pts(&[(2.0, 2.0), (8.0, 2.0), (8.0, 8.0), (2.0, 8.0), (2.0, 2.0)]),
            1e-9,
        );
    }

    #[test]
    fn forced_loop_keeps_open_output() {
        let input = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let params = OffsetParams::default().with_loop(true);
        let result = PolylineOffset2D::new(input, 2.0)
            .with_params(params)
            .execute()
            .unwrap();
        assert_points_near(&result, &pts(&[(2.0, 2.0), (8.0, 2.0), (8.0, 8.0), (2.0, 8.0)]), 1e-9);
    }

    #[test]
    fn reference_orientation_pins_inward() {
        let cw = reversed(&square_10());
        let params = OffsetParams::default().with_reference_orient(1.0);
        let result = PolylineOffset2D::new(cw, 2.0)
            .with_params(params)
            .execute()
            .unwrap();
        assert!((signed_area_2d(&result).abs() - 36.0).abs() < 1e-9);
    }

    #[test]
    fn corners_are_reported() {
        let input = pts(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0), (10.0, 5.0), (0.0, 5.2)]);
        let corners = classify_corners(&input, OffsetParams::default()).unwrap();
        let kinds: Vec<CornerKind> = corners.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![CornerKind::Collinear, CornerKind::Convex, CornerKind::Convex]
        );
        assert_eq!(corners[0].index, 1);

        let spike = pts(&[(0.0, 0.0), (10.0, 0.0), (0.0, -0.5)]);
        let corners = classify_corners(&spike, OffsetParams::default()).unwrap();
        assert_eq!(corners[0].kind, CornerKind::NearReversal);
    }

    #[test]
    fn invalid_threshold_rejected() {
        let err = offset_with_threshold(&square_10(), 1.0, -2.0, UTurnPolicy::Chamfer).unwrap_err();
        assert!(matches!(
            err,
            PolyoffsetError::Argument(ArgumentError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn input_is_not_aliased() {
        let input = square_10();
        let before = input.clone();
        let result = offset(&input, 1.0).unwrap();
        assert_eq!(input, before);
        assert_ne!(result, input);
    }
}
