pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Two points closer than this are treated as the same point.
///
/// Drives duplicate removal and the closed/open decision.
pub const DUPLICATE_TOLERANCE: f64 = 1e-9;

/// Two unit directions whose cross product is below this are parallel.
///
/// Must stay above [`TOLERANCE`] so that line intersection never sees a
/// corner the collinear filter let through.
pub const COLLINEAR_TOLERANCE: f64 = 1e-9;

/// Neighbouring edges with different distances whose unit directions have a
/// cross product below this are joined as parallel, not intersected.
///
/// Their mitre would sit roughly `|d_in - d_out| / cross` away from the vertex.
pub const NEAR_PARALLEL_TOLERANCE: f64 = 1e-3;
