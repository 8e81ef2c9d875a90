//! Offsetting of open and closed 2D polylines.
//!
//! The engine translates every segment along its left-hand normal by a signed
//! distance and joins neighbouring offset lines corner by corner. Sharp
//! near-180° turns are chamfered, collinear runs stay straight, and
//! per-segment distances are reconciled by a [`VarDistParallel`] policy.
//!
//! ```
//! use polyoffset::math::Point2;
//! use polyoffset::offset;
//!
//! let square = [
//!     Point2::new(0.0, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(10.0, 10.0),
//!     Point2::new(0.0, 10.0),
//!     Point2::new(0.0, 0.0),
//! ];
//! let inset = offset(&square, 2.0).unwrap();
//! assert_eq!(inset.len(), 5);
//! assert!((inset[0] - Point2::new(2.0, 2.0)).norm() < 1e-9);
//! ```

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{ArgumentError, GeometryError, PolyoffsetError, Result};
pub use geometry::Polyline2D;
pub use operations::offset::{
    classify_corners, offset, offset_variable, offset_variable_with, offset_with_threshold,
    Corner, CornerKind, DistanceSpec, OffsetParams, PolylineOffset2D, UTurnPolicy,
    VarDistParallel,
};
