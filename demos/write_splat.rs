//! This example generates a SPLAT file containing 3 hardcoded splats.
//!
//! Run with:
//!
//! ```sh
//! cargo run --example write-splat -- "path/to/output.splat"
//! ```

use glam::*;
use splat_convert::{DEFAULT_SCALE, Splat, Splats};

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "target/output.splat".to_string());

    let splats = [
        Splat {
            pos: Vec3::ZERO,
            color: Vec3::new(1.0, 0.5, 0.5),
            scale: DEFAULT_SCALE,
            rot: Quat::IDENTITY,
        },
        Splat {
            pos: Vec3::new(0.0, 8.0, 4.0),
            color: Vec3::new(0.5, 1.0, 0.5),
            scale: DEFAULT_SCALE,
            rot: Quat::IDENTITY,
        },
        Splat {
            pos: Vec3::new(4.0, 0.0, 6.0),
            color: Vec3::new(0.5, 0.5, 1.0),
            scale: DEFAULT_SCALE,
            rot: Quat::IDENTITY,
        },
    ]
    .iter()
    .map(Splat::to_pod)
    .collect::<Splats>();

    println!(
        "Writing {} splats ({} bytes) to {path}",
        splats.len(),
        splats.byte_len()
    );

    splats.write_splat_file(&path).expect("write SPLAT file");
}
