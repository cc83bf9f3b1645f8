use std::io::BufRead;

use crate::ReadPlyError;

/// A single vertex parsed from a Gaussian splatting PLY file.
///
/// Only the properties the SPLAT format derives from are kept: the position and
/// the zeroth-order SH color coefficients. Every other property in the file is
/// skipped.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PlyVertex {
    pub pos: [f32; 3],
    pub f_dc: [Option<f32>; 3],
}

impl PlyVertex {
    /// The position properties every PLY file must declare for its vertex element.
    pub const POSITION_PROPERTIES: &[&str] = &["x", "y", "z"];

    /// The properties a splat is derived from.
    pub const SPLAT_PROPERTIES: &[&str] = &["x", "y", "z", "f_dc_0", "f_dc_1", "f_dc_2"];

    /// Set the value of a property by name.
    ///
    /// Properties other than [`PlyVertex::SPLAT_PROPERTIES`] are ignored.
    pub fn set_value(&mut self, name: &str, value: f32) {
        match name {
            "x" => self.pos[0] = value,
            "y" => self.pos[1] = value,
            "z" => self.pos[2] = value,
            "f_dc_0" => self.f_dc[0] = Some(value),
            "f_dc_1" => self.f_dc[1] = Some(value),
            "f_dc_2" => self.f_dc[2] = Some(value),
            _ => {}
        }
    }

    /// The SH color coefficients, if the vertex carries all three.
    ///
    /// A vertex missing any one of the coefficients is treated as carrying none.
    pub fn color(&self) -> Option<[f32; 3]> {
        match self.f_dc {
            [Some(r), Some(g), Some(b)] => Some([r, g, b]),
            _ => None,
        }
    }
}

impl ply_rs::ply::PropertyAccess for PlyVertex {
    fn new() -> Self {
        PlyVertex::default()
    }

    fn set_property(&mut self, property_name: String, property: ply_rs::ply::Property) {
        match property {
            ply_rs::ply::Property::Float(value) => self.set_value(&property_name, value),
            _ if PlyVertex::SPLAT_PROPERTIES.contains(&property_name.as_str()) => {
                log::error!("Property {property_name} is not a float");
            }
            _ => {}
        }
    }
}

/// Header of a PLY file.
///
/// This represents the header parsed by [`PlyVertices::read_ply_header`], with
/// the vertex element already validated to declare the position properties.
#[derive(Debug, Clone)]
pub struct PlyHeader {
    encoding: ply_rs::ply::Encoding,
    vertex: ply_rs::ply::ElementDef,
}

impl PlyHeader {
    /// Get the number of vertices.
    pub fn count(&self) -> usize {
        self.vertex.count
    }

    /// Get the encoding of the vertex data.
    pub fn encoding(&self) -> ply_rs::ply::Encoding {
        self.encoding
    }
}

/// An ordered collection of PLY vertices.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlyVertices(pub Vec<PlyVertex>);

impl PlyVertices {
    /// Get the number of vertices.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no vertices.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the vertices.
    pub fn iter(&self) -> impl Iterator<Item = &PlyVertex> {
        self.0.iter()
    }

    /// Iterate over the vertices mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PlyVertex> {
        self.0.iter_mut()
    }

    /// Read a PLY from file.
    pub fn read_ply_file(path: impl AsRef<std::path::Path>) -> Result<Self, ReadPlyError> {
        let file = std::fs::File::open(path)?;
        let mut reader = std::io::BufReader::new(file);
        Self::read_ply(&mut reader)
    }

    /// Read a PLY from buffer.
    ///
    /// The vertex element must declare the `x`, `y` and `z` properties; the SH
    /// color coefficients `f_dc_0`, `f_dc_1` and `f_dc_2` are optional.
    pub fn read_ply(reader: &mut impl BufRead) -> Result<Self, ReadPlyError> {
        let header = Self::read_ply_header(reader)?;

        let mut vertices = Vec::with_capacity(header.count());
        for vertex in Self::read_ply_vertices(reader, header) {
            vertices.push(vertex?);
        }

        Ok(Self(vertices))
    }

    /// Read a PLY header.
    ///
    /// Fails if the `vertex` element is missing or does not declare all of
    /// [`PlyVertex::POSITION_PROPERTIES`].
    pub fn read_ply_header(reader: &mut impl BufRead) -> Result<PlyHeader, ReadPlyError> {
        let parser = ply_rs::parser::Parser::<ply_rs::ply::DefaultElement>::new();
        let header = parser.read_header(reader)?;

        let vertex = header
            .elements
            .get("vertex")
            .ok_or(ReadPlyError::MissingVertexElement)?
            .clone();

        for &name in PlyVertex::POSITION_PROPERTIES {
            if !vertex.properties.contains_key(name) {
                return Err(ReadPlyError::MissingProperty { name });
            }
        }

        Ok(PlyHeader {
            encoding: header.encoding,
            vertex,
        })
    }

    /// Read the PLY vertices into [`PlyVertex`], lazily and in file order.
    ///
    /// `header` may be parsed by calling [`PlyVertices::read_ply_header`].
    pub fn read_ply_vertices(
        reader: &mut impl BufRead,
        header: PlyHeader,
    ) -> impl Iterator<Item = Result<PlyVertex, ReadPlyError>> {
        let count = header.count();
        log::info!("Reading PLY vertex element with {count} vertices");

        let parser = ply_rs::parser::Parser::<PlyVertex>::new();

        (0..count).map(move |_| {
            Ok(match header.encoding {
                ply_rs::ply::Encoding::Ascii => {
                    let mut line = String::new();
                    reader.read_line(&mut line)?;

                    let mut vertex = PlyVertex::default();
                    header
                        .vertex
                        .properties
                        .keys()
                        .zip(
                            line.split_whitespace()
                                .map(|s| Some(s.parse::<f32>()))
                                .chain(std::iter::repeat(None)),
                        )
                        .try_for_each(|(name, value)| match value {
                            Some(Ok(value)) => {
                                vertex.set_value(name, value);
                                Ok(())
                            }
                            Some(Err(_)) | None => Err(ReadPlyError::InvalidElementProperty),
                        })?;

                    vertex
                }
                ply_rs::ply::Encoding::BinaryLittleEndian => {
                    parser.read_little_endian_element(reader, &header.vertex)?
                }
                ply_rs::ply::Encoding::BinaryBigEndian => {
                    parser.read_big_endian_element(reader, &header.vertex)?
                }
            })
        })
    }
}

impl From<Vec<PlyVertex>> for PlyVertices {
    fn from(vertices: Vec<PlyVertex>) -> Self {
        Self(vertices)
    }
}

impl FromIterator<PlyVertex> for PlyVertices {
    fn from_iter<T: IntoIterator<Item = PlyVertex>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
