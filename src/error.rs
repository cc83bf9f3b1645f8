use std::path::PathBuf;

use thiserror::Error;

/// The error type for reading PLY vertices.
#[derive(Debug, Error)]
pub enum ReadPlyError {
    #[error("vertex element not found in PLY header")]
    MissingVertexElement,
    #[error("vertex property {name} not found in PLY header")]
    MissingProperty { name: &'static str },
    #[error("vertex element property invalid or missing in PLY")]
    InvalidElementProperty,
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// The error type for reading SPLAT files.
#[derive(Debug, Error)]
pub enum ReadSplatError {
    #[error("invalid SPLAT magic bytes: {found:02X?}, expected {:02X?}", crate::MAGIC)]
    InvalidMagic { found: [u8; 6] },
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// The error type for [`convert`](crate::convert).
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("{0}")]
    ReadPly(#[from] ReadPlyError),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
