use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::{ConvertError, PlyVertices, SplatPod, Splats};

/// How often the conversion loop reports progress, in records.
const PROGRESS_INTERVAL: usize = 10_000;

/// The outcome of a successful conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    /// The number of splat records written.
    pub splat_count: usize,
    /// The total size of the output file in bytes.
    pub bytes_written: usize,
}

/// Convert a Gaussian splatting PLY file into a SPLAT file.
///
/// Vertices are streamed, each one is converted and written as it is parsed, in
/// file order. The parent directory of `output_path` is created if absent and
/// any existing output file is truncated.
///
/// The output is written in place, so a failure mid stream propagates but may
/// leave a truncated file behind.
pub fn convert(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<ConvertSummary, ConvertError> {
    let input_path = input_path.as_ref();
    let output_path = output_path.as_ref();

    if !input_path.exists() {
        return Err(ConvertError::InputNotFound(input_path.to_path_buf()));
    }

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let input = std::fs::File::open(input_path)?;
    let mut reader = BufReader::new(input);

    let header = PlyVertices::read_ply_header(&mut reader)?;
    let count = header.count();

    log::info!(
        "Converting {count} vertices from {} to {}",
        input_path.display(),
        output_path.display()
    );

    let output = std::fs::File::create(output_path)?;
    let mut writer = BufWriter::new(output);

    Splats::write_splat_header(&mut writer, count)?;

    for (i, vertex) in PlyVertices::read_ply_vertices(&mut reader, header).enumerate() {
        SplatPod::from(&vertex?).write_to(&mut writer)?;

        if i % PROGRESS_INTERVAL == 0 {
            log::info!("Converted {i}/{count} vertices");
        }
    }

    writer.flush()?;

    let bytes_written = Splats::HEADER_SIZE + count * SplatPod::SIZE;
    log::info!(
        "Conversion complete, wrote {bytes_written} bytes to {}",
        output_path.display()
    );

    Ok(ConvertSummary {
        splat_count: count,
        bytes_written,
    })
}
