use crate::math::{Point2, TOLERANCE};

use super::corner::{push_pair, Corner, OffsetLine};
use super::params::VarDistParallel;

/// Pushes the offset point(s) for a collinear vertex into `out`.
///
/// With equal distances both offset lines are the same line and the shared
/// endpoint is emitted once. Otherwise the two endpoints sit at different
/// distances on the same normal and `policy` decides what to keep:
///
/// - `Skip`: nothing, both neighbouring edges end independently.
/// - `Proportional`: one point between the two endpoints, `|d_in| / (|d_in| + |d_out|)`
///   of the way from the incoming one. Same-sign distances land on their
///   harmonic mean; opposite signs land on the input vertex.
/// - `StepWithTwoPoints`: both endpoints, incoming first.
pub fn join_collinear(
    corner: &Corner,
    incoming: &OffsetLine,
    outgoing: &OffsetLine,
    policy: VarDistParallel,
    out: &mut Vec<Point2>,
) {
    if (incoming.distance - outgoing.distance).abs() < TOLERANCE {
        out.push(incoming.end);
        return;
    }
    tracing::debug!(
        index = corner.index,
        incoming = incoming.distance,
        outgoing = outgoing.distance,
        ?policy,
        "joining parallel segments with different distances"
    );
    match policy {
        VarDistParallel::Skip => {}
        VarDistParallel::Proportional => {
            let (a, b) = (incoming.distance.abs(), outgoing.distance.abs());
            let t = a / (a + b);
            out.push(incoming.end + (outgoing.start - incoming.end) * t);
        }
        VarDistParallel::StepWithTwoPoints => push_pair(out, incoming.end, outgoing.start),
    }
}
