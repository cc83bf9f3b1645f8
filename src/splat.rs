use std::io::{Read, Write};

use glam::*;

use crate::{PlyVertex, PlyVertices, ReadSplatError};

/// The SPLAT format magic bytes, `"SPLAT\0"`.
pub const MAGIC: [u8; 6] = *b"SPLAT\0";

/// The scale assigned to every converted splat.
pub const DEFAULT_SCALE: Vec3 = Vec3::splat(0.01);

/// The color channel value for a vertex carrying no SH coefficients, and the
/// shift applied to each coefficient otherwise.
pub const COLOR_SHIFT: f32 = 0.5;

/// A single splat primitive.
///
/// This is an intermediate representation used on the CPU before packing into
/// [`SplatPod`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Splat {
    pub pos: Vec3,
    pub color: Vec3,
    pub scale: Vec3,
    pub rot: Quat,
}

impl Splat {
    /// Derive a splat from a PLY vertex.
    ///
    /// Each color channel is the corresponding SH coefficient shifted by
    /// [`COLOR_SHIFT`], or [`COLOR_SHIFT`] itself when the vertex carries no
    /// coefficients. Scale and rotation are fixed defaults, the source files this
    /// converter targets do not retain them.
    pub fn from_vertex(vertex: &PlyVertex) -> Self {
        let pos = Vec3::from_array(vertex.pos);

        let color = match vertex.color() {
            Some(f_dc) => Vec3::from_array(f_dc) + Vec3::splat(COLOR_SHIFT),
            None => Vec3::splat(COLOR_SHIFT),
        };

        Self {
            pos,
            color,
            scale: DEFAULT_SCALE,
            rot: Quat::IDENTITY,
        }
    }

    /// Convert from [`SplatPod`].
    pub fn from_pod(pod: &SplatPod) -> Self {
        Self {
            pos: Vec3::from_array(pod.pos),
            color: Vec3::from_array(pod.color),
            scale: Vec3::from_array(pod.scale),
            rot: Quat::from_xyzw(pod.rot[1], pod.rot[2], pod.rot[3], pod.rot[0]),
        }
    }

    /// Convert to [`SplatPod`].
    pub fn to_pod(&self) -> SplatPod {
        SplatPod {
            pos: self.pos.to_array(),
            color: self.color.to_array(),
            scale: self.scale.to_array(),
            rot: [self.rot.w, self.rot.x, self.rot.y, self.rot.z],
        }
    }
}

impl From<PlyVertex> for Splat {
    fn from(vertex: PlyVertex) -> Self {
        Self::from_vertex(&vertex)
    }
}

impl From<&PlyVertex> for Splat {
    fn from(vertex: &PlyVertex) -> Self {
        Self::from_vertex(vertex)
    }
}

impl From<Splat> for SplatPod {
    fn from(splat: Splat) -> Self {
        splat.to_pod()
    }
}

impl From<&Splat> for SplatPod {
    fn from(splat: &Splat) -> Self {
        splat.to_pod()
    }
}

/// The POD representation of a splat record on disk.
///
/// Fields are stored as arrays because using glam types would add padding
/// according to C alignment rules. The quaternion is stored in `(w, x, y, z)`
/// order.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SplatPod {
    pub pos: [f32; 3],
    pub color: [f32; 3],
    pub scale: [f32; 3],
    pub rot: [f32; 4],
}

impl SplatPod {
    /// The size of one record on disk in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Write the record as little endian floats.
    pub fn write_to(&self, writer: &mut impl Write) -> Result<(), std::io::Error> {
        let floats: [f32; 13] = bytemuck::cast(*self);

        let mut bytes = [0u8; Self::SIZE];
        for (chunk, value) in bytes.chunks_exact_mut(4).zip(floats) {
            chunk.copy_from_slice(&value.to_le_bytes());
        }

        writer.write_all(&bytes)
    }

    /// Read one record of little endian floats.
    pub fn read_from(reader: &mut impl Read) -> Result<Self, std::io::Error> {
        let mut bytes = [0u8; Self::SIZE];
        reader.read_exact(&mut bytes)?;

        let mut floats = [0f32; 13];
        for (value, chunk) in floats.iter_mut().zip(bytes.chunks_exact(4)) {
            *value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        Ok(bytemuck::cast(floats))
    }
}

impl From<&PlyVertex> for SplatPod {
    fn from(vertex: &PlyVertex) -> Self {
        Splat::from_vertex(vertex).to_pod()
    }
}

/// An ordered collection of splats as stored in a SPLAT file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Splats(pub Vec<SplatPod>);

impl Splats {
    /// The size of the file header in bytes, the magic followed by the count.
    pub const HEADER_SIZE: usize = MAGIC.len() + std::mem::size_of::<u32>();

    /// Get the number of splats.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no splats.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the splats.
    pub fn iter(&self) -> impl Iterator<Item = &SplatPod> {
        self.0.iter()
    }

    /// Iterate over the splats mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SplatPod> {
        self.0.iter_mut()
    }

    /// The total file size in bytes these splats serialize to.
    pub fn byte_len(&self) -> usize {
        Self::HEADER_SIZE + self.0.len() * SplatPod::SIZE
    }

    /// Write the file header, the magic bytes followed by the record count as a
    /// little endian 32-bit unsigned integer.
    pub fn write_splat_header(
        writer: &mut impl Write,
        count: usize,
    ) -> Result<(), std::io::Error> {
        let count = u32::try_from(count).map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("too many splats for SPLAT header: {count}"),
            )
        })?;

        writer.write_all(&MAGIC)?;
        writer.write_all(&count.to_le_bytes())
    }

    /// Write the splats to a SPLAT file.
    ///
    /// The parent directory is created if absent. Any existing file is truncated.
    pub fn write_splat_file(&self, path: impl AsRef<std::path::Path>) -> Result<(), std::io::Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write_splat(&mut writer)?;
        writer.flush()
    }

    /// Write the splats to a SPLAT buffer.
    ///
    /// The output is the header followed by one 52-byte record per splat, all
    /// values little endian.
    pub fn write_splat(&self, writer: &mut impl Write) -> Result<(), std::io::Error> {
        Self::write_splat_header(writer, self.0.len())?;

        self.0.iter().try_for_each(|splat| splat.write_to(writer))
    }

    /// Read a SPLAT from file.
    pub fn read_splat_file(path: impl AsRef<std::path::Path>) -> Result<Self, ReadSplatError> {
        let file = std::fs::File::open(path)?;
        let mut reader = std::io::BufReader::new(file);
        Self::read_splat(&mut reader)
    }

    /// Read a SPLAT from buffer.
    ///
    /// Reads exactly the number of records the header declares.
    pub fn read_splat(reader: &mut impl Read) -> Result<Self, ReadSplatError> {
        let mut magic = [0u8; MAGIC.len()];
        reader.read_exact(&mut magic)?;
        if magic != MAGIC {
            return Err(ReadSplatError::InvalidMagic { found: magic });
        }

        let mut count_bytes = [0u8; std::mem::size_of::<u32>()];
        reader.read_exact(&mut count_bytes)?;
        let count = u32::from_le_bytes(count_bytes) as usize;

        let mut splats = Vec::with_capacity(count);
        for _ in 0..count {
            splats.push(SplatPod::read_from(reader)?);
        }

        Ok(Self(splats))
    }
}

impl From<&PlyVertices> for Splats {
    fn from(vertices: &PlyVertices) -> Self {
        vertices.iter().map(SplatPod::from).collect()
    }
}

impl From<Vec<SplatPod>> for Splats {
    fn from(splats: Vec<SplatPod>) -> Self {
        Self(splats)
    }
}

impl FromIterator<SplatPod> for Splats {
    fn from_iter<T: IntoIterator<Item = SplatPod>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
