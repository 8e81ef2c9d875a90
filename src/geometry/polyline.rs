use crate::error::{ArgumentError, Result};
use crate::math::polygon_2d::{is_closed, path_length, signed_area_2d};
use crate::math::{Point2, TOLERANCE};
use crate::operations::offset::{DistanceSpec, OffsetParams, PolylineOffset2D};

/// An ordered sequence of 2D points.
///
/// The polyline is closed when its last point repeats its first; there is no
/// separate flag. Offsetting always returns a new polyline and leaves `self`
/// untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline2D {
    points: Vec<Point2>,
}

impl Polyline2D {
    /// Creates a polyline from its points.
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Creates a polyline from `(x, y)` pairs.
    #[must_use]
    pub fn from_coords(coords: &[(f64, f64)]) -> Self {
        Self::new(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[must_use]
    pub fn into_points(self) -> Vec<Point2> {
        self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        is_closed(&self.points)
    }

    /// Returns the number of segments in this polyline.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// First point.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::EmptyPolyline` if there are no points.
    pub fn start(&self) -> Result<Point2> {
        self.points
            .first()
            .copied()
            .ok_or_else(|| ArgumentError::EmptyPolyline.into())
    }

    /// Last point.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::EmptyPolyline` if there are no points.
    pub fn end(&self) -> Result<Point2> {
        self.points
            .last()
            .copied()
            .ok_or_else(|| ArgumentError::EmptyPolyline.into())
    }

    /// Total length of all segments.
    #[must_use]
    pub fn length(&self) -> f64 {
        path_length(&self.points)
    }

    /// Signed area enclosed by the polyline, read as implicitly closed.
    ///
    /// Positive for counter-clockwise, negative for clockwise.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.points)
    }

    #[must_use]
    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Returns a new polyline with the points in reverse order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.points.iter().rev().copied().collect())
    }

    /// Offsets every segment by `distance`.
    ///
    /// `force_loop` treats an open polyline as closed for corner computation
    /// (the output stays open). `reference_orient` pins the winding the
    /// distance sign refers to. `0.0` means automatic: positive is inward for
    /// closed or looped polylines of either winding, and the literal left-hand
    /// side for open ones.
    ///
    /// # Errors
    ///
    /// See [`PolylineOffset2D::execute`].
    pub fn offset(&self, distance: f64, force_loop: bool, reference_orient: f64) -> Result<Self> {
        let params = OffsetParams::default()
            .with_loop(force_loop)
            .with_reference_orient(reference_orient);
        self.offset_with(distance, params)
    }

    /// Offsets with one distance per segment.
    ///
    /// With `force_loop` on an open polyline the closing segment counts, so
    /// `distances.len()` must equal the point count.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::DistanceCountMismatch` for a wrong number of
    /// distances; otherwise see [`PolylineOffset2D::execute`].
    pub fn offset_variable(
        &self,
        distances: &[f64],
        force_loop: bool,
        reference_orient: f64,
    ) -> Result<Self> {
        let params = OffsetParams::default()
            .with_loop(force_loop)
            .with_reference_orient(reference_orient);
        self.offset_with(distances, params)
    }

    /// Offsets with full control over distances and parameters.
    ///
    /// An automatic `reference_orient` on a closed or looped polyline reads
    /// the winding, so positive distances always shrink the loop.
    ///
    /// # Errors
    ///
    /// See [`PolylineOffset2D::execute`].
    pub fn offset_with(
        &self,
        distances: impl Into<DistanceSpec>,
        params: OffsetParams,
    ) -> Result<Self> {
        let automatic = params.reference_orient.abs() < TOLERANCE;
        let params = if automatic && (params.force_loop || self.is_closed()) {
            params.with_reference_orient(1.0)
        } else {
            params
        };
        PolylineOffset2D::new(self.points.clone(), distances)
            .with_params(params)
            .execute()
            .map(Self::new)
    }
}

impl From<Vec<Point2>> for Polyline2D {
    fn from(points: Vec<Point2>) -> Self {
        Self::new(points)
    }
}
