use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Convert 3D Gaussian splatting PLY files into the compact binary SPLAT format"
)]
struct Cli {
    /// PLY file to convert.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// SPLAT file to write.
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match splat_convert::convert(&cli.input, &cli.output) {
        Ok(summary) => {
            println!(
                "Converted {} splats ({} bytes) to {}",
                summary.splat_count,
                summary.bytes_written,
                cli.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Conversion failed: {e}");
            ExitCode::FAILURE
        }
    }
}
