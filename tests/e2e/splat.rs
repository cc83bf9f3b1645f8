use assert_matches::assert_matches;
use splat_convert::{
    COLOR_SHIFT, DEFAULT_SCALE, MAGIC, PlyVertices, ReadSplatError, Splat, SplatPod, Splats,
    glam::*,
};

use crate::common::given;

fn f32_at(bytes: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn given_splats() -> Splats {
    Splats::from(&PlyVertices(given::mixed_color_vertices()))
}

#[test]
fn test_splat_pod_size_should_be_52_bytes() {
    assert_eq!(SplatPod::SIZE, 52);
    assert_eq!(Splats::HEADER_SIZE, 10);
}

#[test]
fn test_splat_from_vertex_with_color_should_shift_coefficients() {
    let vertex = given::vertex_with_color(0);

    let splat = Splat::from_vertex(&vertex);

    assert_eq!(splat.pos, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(
        splat.color,
        Vec3::new(0.1 + COLOR_SHIFT, 0.2 + COLOR_SHIFT, 0.3 + COLOR_SHIFT)
    );
    assert_eq!(splat.scale, DEFAULT_SCALE);
    assert_eq!(splat.rot, Quat::IDENTITY);
}

#[test]
fn test_splat_from_vertex_without_color_should_use_default_color() {
    let vertex = given::vertex_without_color(0);

    let splat = Splat::from_vertex(&vertex);

    assert_eq!(splat.color, Vec3::splat(COLOR_SHIFT));
}

#[test]
fn test_splat_from_vertex_with_partial_color_should_use_default_color() {
    let mut vertex = given::vertex_with_color(0);
    vertex.f_dc[1] = None;

    let splat = Splat::from_vertex(&vertex);

    assert_eq!(splat.color, Vec3::splat(COLOR_SHIFT));
}

#[test]
fn test_splat_to_pod_should_store_quaternion_w_first() {
    let splat = Splat {
        pos: Vec3::ZERO,
        color: Vec3::splat(COLOR_SHIFT),
        scale: DEFAULT_SCALE,
        rot: Quat::IDENTITY,
    };

    let pod = splat.to_pod();

    assert_eq!(pod.rot, [1.0, 0.0, 0.0, 0.0]);
    assert_eq!(Splat::from_pod(&pod), splat);
}

#[test]
fn test_splat_pod_write_to_should_be_little_endian() {
    let pod = SplatPod {
        pos: [1.0, 0.0, 0.0],
        color: [0.5; 3],
        scale: [0.01; 3],
        rot: [1.0, 0.0, 0.0, 0.0],
    };

    let mut buffer = Vec::new();
    pod.write_to(&mut buffer).unwrap();

    assert_eq!(buffer.len(), SplatPod::SIZE);
    assert_eq!(&buffer[0..4], &[0x00, 0x00, 0x80, 0x3F]);
}

#[test]
fn test_splats_write_splat_should_emit_header_then_records() {
    let splats = given_splats();

    let mut buffer = Vec::new();
    splats.write_splat(&mut buffer).unwrap();

    assert_eq!(buffer.len(), 10 + 52 * 2);
    assert_eq!(buffer.len(), splats.byte_len());

    // Header
    assert_eq!(&buffer[0..6], b"SPLAT\0");
    assert_eq!(&buffer[0..6], &MAGIC);
    assert_eq!(u32::from_le_bytes([buffer[6], buffer[7], buffer[8], buffer[9]]), 2);

    // First record carries SH coefficients
    assert_eq!(f32_at(&buffer, 10), 1.0);
    assert_eq!(f32_at(&buffer, 14), 2.0);
    assert_eq!(f32_at(&buffer, 18), 3.0);
    assert_eq!(f32_at(&buffer, 22), 0.1 + COLOR_SHIFT);
    assert_eq!(f32_at(&buffer, 26), 0.2 + COLOR_SHIFT);
    assert_eq!(f32_at(&buffer, 30), 0.3 + COLOR_SHIFT);

    // Second record falls back to the default color
    assert_eq!(f32_at(&buffer, 62), 4.0);
    assert_eq!(f32_at(&buffer, 74), COLOR_SHIFT);
    assert_eq!(f32_at(&buffer, 78), COLOR_SHIFT);
    assert_eq!(f32_at(&buffer, 82), COLOR_SHIFT);

    // Scale and rotation are constant across records
    for record in 0..2 {
        let base = 10 + 52 * record;
        for i in 0..3 {
            assert_eq!(f32_at(&buffer, base + 24 + 4 * i), 0.01);
        }
        assert_eq!(f32_at(&buffer, base + 36), 1.0);
        for i in 1..4 {
            assert_eq!(f32_at(&buffer, base + 36 + 4 * i), 0.0);
        }
    }
}

#[test]
fn test_splats_write_splat_empty_should_emit_header_only() {
    let splats = Splats::default();

    let mut buffer = Vec::new();
    splats.write_splat(&mut buffer).unwrap();

    assert_eq!(buffer.len(), 10);
    assert_eq!(&buffer[0..6], &MAGIC);
    assert_eq!(&buffer[6..10], &[0, 0, 0, 0]);
}

#[test]
fn test_splats_write_splat_and_read_splat_should_be_equal() {
    let splats = given_splats();

    let mut buffer = Vec::new();
    splats.write_splat(&mut buffer).unwrap();
    let read = Splats::read_splat(&mut buffer.as_slice()).unwrap();

    assert_eq!(splats, read);
}

#[test]
fn test_splats_write_splat_file_and_read_splat_file_should_be_equal() {
    let splats = given_splats();
    let path = given::temp_path(".splat");

    splats.write_splat_file(path.path()).unwrap();
    let read = Splats::read_splat_file(path.path()).unwrap();

    assert_eq!(splats, read);
}

#[test]
fn test_splats_read_splat_with_invalid_magic_should_fail() {
    let mut buffer = Vec::new();
    given_splats().write_splat(&mut buffer).unwrap();
    buffer[5] = b'!';

    let result = Splats::read_splat(&mut buffer.as_slice());

    assert_matches!(result, Err(ReadSplatError::InvalidMagic { .. }));
}

#[test]
fn test_splats_read_splat_with_truncated_records_should_fail() {
    let mut buffer = Vec::new();
    given_splats().write_splat(&mut buffer).unwrap();
    buffer.truncate(buffer.len() - 4);

    let result = Splats::read_splat(&mut buffer.as_slice());

    assert_matches!(result, Err(ReadSplatError::Io(_)));
}
