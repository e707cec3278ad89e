use cinnabar_engine::gpu::program::{ProgramDesc, ProgramKey, MAX_BLEND_TEXTURES};
use cinnabar_engine::gpu::uniform::{UniformKind, UniformLayout, UniformValue};

#[test]
fn identical_source_pairs_share_one_key() {
    let a = ProgramKey::of("vertex source", "fragment source");
    let b = ProgramKey::of("vertex source", "fragment source");
    assert_eq!(a, b);
}

#[test]
fn different_sources_get_different_keys() {
    let base = ProgramKey::of("vertex source", "fragment source");
    assert_ne!(base, ProgramKey::of("vertex source!", "fragment source"));
    assert_ne!(base, ProgramKey::of("vertex source", "fragment source!"));
    // swapping the pair is a different program
    assert_ne!(base, ProgramKey::of("fragment source", "vertex source"));
}

#[test]
fn builtin_templates_have_stable_keys() {
    // constructing a template twice must resolve to the same cache slot
    assert_eq!(
        ProgramDesc::solid_polygon().key(),
        ProgramDesc::solid_polygon().key()
    );
    assert_eq!(
        ProgramDesc::textured_polygon(2).unwrap().key(),
        ProgramDesc::textured_polygon(2).unwrap().key()
    );
    // the blend variants are distinct programs
    assert_ne!(
        ProgramDesc::textured_polygon(1).unwrap().key(),
        ProgramDesc::textured_polygon(2).unwrap().key()
    );
    assert_ne!(
        ProgramDesc::solid_polygon().key(),
        ProgramDesc::vertex_color_polygon().key()
    );
}

#[test]
fn texture_count_is_bounded() {
    assert!(ProgramDesc::textured_polygon(MAX_BLEND_TEXTURES).is_ok());
    assert!(ProgramDesc::textured_polygon(MAX_BLEND_TEXTURES + 1).is_err());
}

#[test]
fn transform_block_offsets() {
    let layout = UniformLayout::new(&[
        ("translation", UniformKind::Vec2),
        ("rotation", UniformKind::Vec2),
        ("scale", UniformKind::Vec2),
        ("center", UniformKind::Vec2),
        ("color", UniformKind::Vec4),
    ]);
    assert_eq!(layout.offset_of("translation").unwrap().0, 0);
    assert_eq!(layout.offset_of("rotation").unwrap().0, 8);
    assert_eq!(layout.offset_of("scale").unwrap().0, 16);
    assert_eq!(layout.offset_of("center").unwrap().0, 24);
    // the vec4 aligns to 16
    assert_eq!(layout.offset_of("color").unwrap().0, 32);
    assert_eq!(layout.byte_size(), 48);
}

#[test]
fn float_packing_respects_alignment() {
    let layout = UniformLayout::new(&[
        ("theta", UniformKind::Float),
        ("offset", UniformKind::Vec2),
        ("weight", UniformKind::Float),
    ]);
    assert_eq!(layout.offset_of("theta").unwrap().0, 0);
    // vec2 skips up to its 8-byte alignment
    assert_eq!(layout.offset_of("offset").unwrap().0, 8);
    assert_eq!(layout.offset_of("weight").unwrap().0, 16);
    // block rounds up to 16
    assert_eq!(layout.byte_size(), 32);
}

#[test]
fn unknown_names_miss() {
    let layout = UniformLayout::new(&[("translation", UniformKind::Vec2)]);
    assert!(layout.contains("translation"));
    assert!(!layout.contains("color"));
    assert!(layout.offset_of("color").is_none());
}

#[test]
fn matrix_rows_pad_to_vec4() {
    let m = UniformValue::Mat3([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
    let bytes = m.to_bytes();
    assert_eq!(bytes.len(), 48);
    // second row starts at byte 16, after one padding float
    assert_eq!(&bytes[16..20], &4.0f32.to_le_bytes());
    assert_eq!(&bytes[12..16], &0.0f32.to_le_bytes());
}

#[test]
fn value_kinds_match_tags() {
    assert_eq!(UniformValue::Float(1.0).kind(), UniformKind::Float);
    assert_eq!(UniformValue::Vec4([0.0; 4]).kind(), UniformKind::Vec4);
    assert_eq!(
        UniformValue::Mat4([[0.0; 4]; 4]).kind().byte_size(),
        64
    );
}
