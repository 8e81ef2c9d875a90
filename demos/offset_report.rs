//! Prints the offsets of a few sample polylines.
//!
//! Usage:
//! ```text
//! cargo run --example offset_report
//! RUST_LOG=polyoffset=trace cargo run --example offset_report
//! ```

use polyoffset::{classify_corners, OffsetParams, Polyline2D, Result, VarDistParallel};

fn print(label: &str, polyline: &Polyline2D) {
    println!("{label} ({} points, closed: {})", polyline.len(), polyline.is_closed());
    for p in polyline.points() {
        println!("  ({:.4}, {:.4})", p.x, p.y);
    }
}

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for polyoffset.
    // Override with RUST_LOG env var (e.g. RUST_LOG=polyoffset=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("polyoffset=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let square =
        Polyline2D::from_coords(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
    print("square", &square);
    print("square inset 2", &square.offset(2.0, false, 0.0)?);
    print(
        "square, wide bottom edge",
        &square.offset_variable(&[4.0, 2.0, 2.0, 2.0], false, 0.0)?,
    );

    let zigzag = Polyline2D::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.1, 1.0), (2.0, 1.0), (2.1, 0.0)]);
    print("zigzag offset -0.3", &zigzag.offset(-0.3, false, 0.0)?);

    let spike = Polyline2D::from_coords(&[(0.0, 0.0), (10.0, 0.0), (0.0, 0.5)]);
    for corner in classify_corners(spike.points(), OffsetParams::default())? {
        println!("spike corner {}: {:?} (cos {:.4})", corner.index, corner.kind, corner.cos);
    }
    print("spike offset 1 (chamfered)", &spike.offset(1.0, false, 0.0)?);

    let step = Polyline2D::from_coords(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
    for policy in [
        VarDistParallel::Skip,
        VarDistParallel::Proportional,
        VarDistParallel::StepWithTwoPoints,
    ] {
        let params = OffsetParams::default().with_var_dist(policy);
        print(&format!("step {policy:?}"), &step.offset_with(vec![1.0, 3.0], params)?);
    }

    Ok(())
}
