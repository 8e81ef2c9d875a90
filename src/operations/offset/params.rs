use crate::error::{ArgumentError, Result};

/// Cosine of 170°. Corners turning sharper than this are U-turns.
pub const DEFAULT_UTURN_COS: f64 = -0.984_807_753_012_208;

/// How a near-180° corner (U-turn) is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UTurnPolicy {
    /// Replace the corner point with the independently offset end of the
    /// incoming segment and start of the outgoing segment.
    #[default]
    Chamfer,
}

/// How two parallel neighbouring segments with different distances are joined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VarDistParallel {
    /// Emit no point for the shared vertex.
    Skip,
    /// Emit one point halfway between the two offset endpoints.
    Proportional,
    /// Emit both offset endpoints, producing a step.
    #[default]
    StepWithTwoPoints,
}

/// Offset distance for a polyline: one value, or one value per segment.
#[derive(Debug, Clone, PartialEq)]
pub enum DistanceSpec {
    Uniform(f64),
    PerSegment(Vec<f64>),
}

impl DistanceSpec {
    /// Expands into one distance per segment.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::DistanceCountMismatch` if a per-segment list
    /// does not have exactly `segment_count` entries, or
    /// `ArgumentError::NonFiniteDistance` for NaN or infinite values.
    pub fn per_segment(&self, segment_count: usize) -> Result<Vec<f64>> {
        let distances = match self {
            Self::Uniform(d) => vec![*d; segment_count],
            Self::PerSegment(ds) => {
                if ds.len() != segment_count {
                    return Err(ArgumentError::DistanceCountMismatch {
                        expected: segment_count,
                        actual: ds.len(),
                    }
                    .into());
                }
                ds.clone()
            }
        };
        if let Some((index, &value)) = distances.iter().enumerate().find(|(_, d)| !d.is_finite()) {
            return Err(ArgumentError::NonFiniteDistance { index, value }.into());
        }
        Ok(distances)
    }
}

impl From<f64> for DistanceSpec {
    fn from(d: f64) -> Self {
        Self::Uniform(d)
    }
}

impl From<Vec<f64>> for DistanceSpec {
    fn from(ds: Vec<f64>) -> Self {
        Self::PerSegment(ds)
    }
}

impl From<&[f64]> for DistanceSpec {
    fn from(ds: &[f64]) -> Self {
        Self::PerSegment(ds.to_vec())
    }
}

/// Tuning knobs for a polyline offset.
///
/// `reference_orient` pins the winding the distance sign refers to:
/// `0.0` applies distances literally to each segment's left-hand normal,
/// a positive value reads them as if the polyline were counter-clockwise,
/// a negative value as if it were clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetParams {
    pub cos_threshold: f64,
    pub uturn: UTurnPolicy,
    pub var_dist: VarDistParallel,
    pub force_loop: bool,
    pub reference_orient: f64,
}

impl Default for OffsetParams {
    fn default() -> Self {
        Self {
            cos_threshold: DEFAULT_UTURN_COS,
            uturn: UTurnPolicy::default(),
            var_dist: VarDistParallel::default(),
            force_loop: false,
            reference_orient: 0.0,
        }
    }
}

impl OffsetParams {
    /// Sets the cosine below which a corner counts as a U-turn.
    ///
    /// `-1.0` disables U-turn handling entirely.
    #[must_use]
    pub fn with_cos_threshold(mut self, cos_threshold: f64) -> Self {
        self.cos_threshold = cos_threshold;
        self
    }

    #[must_use]
    pub fn with_uturn(mut self, uturn: UTurnPolicy) -> Self {
        self.uturn = uturn;
        self
    }

    #[must_use]
    pub fn with_var_dist(mut self, var_dist: VarDistParallel) -> Self {
        self.var_dist = var_dist;
        self
    }

    /// Treats an open polyline as if its last point connected back to the first.
    #[must_use]
    pub fn with_loop(mut self, force_loop: bool) -> Self {
        self.force_loop = force_loop;
        self
    }

    #[must_use]
    pub fn with_reference_orient(mut self, reference_orient: f64) -> Self {
        self.reference_orient = reference_orient;
        self
    }

    /// Checks that every numeric knob is usable.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentError::InvalidThreshold` or
    /// `ArgumentError::InvalidOrientation`.
    pub fn validate(&self) -> Result<()> {
        if !self.cos_threshold.is_finite() || !(-1.0..=1.0).contains(&self.cos_threshold) {
            return Err(ArgumentError::InvalidThreshold(self.cos_threshold).into());
        }
        if !self.reference_orient.is_finite() {
            return Err(ArgumentError::InvalidOrientation(self.reference_orient).into());
        }
        Ok(())
    }
}
