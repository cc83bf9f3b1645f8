//! This example converts a Gaussian splatting PLY file into a SPLAT file.
//!
//! Run with:
//!
//! ```sh
//! cargo run --example convert-ply -- "path/to/input.ply" "path/to/output.splat"
//! ```

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/model.ply".to_string());
    let output = std::env::args()
        .nth(2)
        .unwrap_or_else(|| "target/model.splat".to_string());

    let summary = splat_convert::convert(&input, &output).expect("conversion");

    println!(
        "Converted {} splats ({} bytes) to {output}",
        summary.splat_count, summary.bytes_written,
    );
}
