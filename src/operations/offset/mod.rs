mod corner;
mod filter;
mod orientation;
mod params;
mod polyline_offset_2d;
mod var_dist;

pub use corner::{Corner, CornerKind};
pub use orientation::resolve_sign;
pub use params::{DistanceSpec, OffsetParams, UTurnPolicy, VarDistParallel, DEFAULT_UTURN_COS};
pub use polyline_offset_2d::{
    classify_corners, offset, offset_variable, offset_variable_with, offset_with_threshold,
    PolylineOffset2D,
};
