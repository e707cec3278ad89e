use cinnabar_engine::assets::bmp;
use cinnabar_engine::error::EngineError;

/// Builds a minimal 24-bit bitmap: 54-byte header followed by bottom-up BGR
/// rows padded to 4 bytes. `fields_zeroed` leaves the pixel-offset and
/// image-size header fields at zero so decoding has to infer them.
fn build_bmp(width: u32, height: u32, rows_bottom_up: &[Vec<[u8; 3]>], fields_zeroed: bool) -> Vec<u8> {
    let row_stride = (width as usize * 3 + 3) / 4 * 4;
    let mut bytes = vec![0u8; 54];
    bytes[0] = b'B';
    bytes[1] = b'M';
    if !fields_zeroed {
        bytes[0x0A..0x0E].copy_from_slice(&54u32.to_le_bytes());
        let size = (row_stride * height as usize) as u32;
        bytes[0x22..0x26].copy_from_slice(&size.to_le_bytes());
    }
    bytes[0x12..0x16].copy_from_slice(&width.to_le_bytes());
    bytes[0x16..0x1A].copy_from_slice(&height.to_le_bytes());
    bytes[0x1C..0x1E].copy_from_slice(&24u16.to_le_bytes());

    for row in rows_bottom_up {
        let mut written = 0;
        for bgr in row {
            bytes.extend_from_slice(bgr);
            written += 3;
        }
        while written < row_stride {
            bytes.push(0);
            written += 1;
        }
    }
    bytes
}

#[test]
fn decodes_bgr_rows_into_topdown_rgba() {
    // 2x2, bottom row first on disk: bottom is blue/green, top is red/white
    let bytes = build_bmp(
        2,
        2,
        &[
            vec![[255, 0, 0], [0, 255, 0]],     // bottom: blue, green
            vec![[0, 0, 255], [255, 255, 255]], // top: red, white
        ],
        false,
    );
    let bitmap = bmp::decode(&bytes, "test.bmp").unwrap();
    assert_eq!(bitmap.width, 2);
    assert_eq!(bitmap.height, 2);
    // output is top-down RGBA
    assert_eq!(&bitmap.rgba[0..4], &[255, 0, 0, 255]); // red
    assert_eq!(&bitmap.rgba[4..8], &[255, 255, 255, 255]); // white
    assert_eq!(&bitmap.rgba[8..12], &[0, 0, 255, 255]); // blue
    assert_eq!(&bitmap.rgba[12..16], &[0, 255, 0, 255]); // green
}

#[test]
fn zeroed_header_fields_are_inferred() {
    let bytes = build_bmp(4, 1, &[vec![[1, 2, 3]; 4]], true);
    let bitmap = bmp::decode(&bytes, "test.bmp").unwrap();
    assert_eq!(bitmap.width, 4);
    assert_eq!(bitmap.height, 1);
    // zero size field infers width * height * 3
    assert_eq!(bitmap.declared_size, 12);
    assert_eq!(bitmap.byte_len(), 16);
}

#[test]
fn rejects_missing_magic() {
    let mut bytes = build_bmp(1, 1, &[vec![[0, 0, 0]]], false);
    bytes[0] = b'X';
    match bmp::decode(&bytes, "bad.bmp") {
        Err(EngineError::BadMagic { .. }) => {}
        other => panic!("expected BadMagic, got {other:?}"),
    }
}

#[test]
fn rejects_truncated_header() {
    match bmp::decode(&[0u8; 20], "short.bmp") {
        Err(EngineError::TruncatedHeader { len: 20, .. }) => {}
        other => panic!("expected TruncatedHeader, got {other:?}"),
    }
}

#[test]
fn rejects_zero_dimensions() {
    let bytes = build_bmp(0, 4, &[], false);
    match bmp::decode(&bytes, "zero.bmp") {
        Err(EngineError::ZeroDimension { .. }) => {}
        other => panic!("expected ZeroDimension, got {other:?}"),
    }
}

#[test]
fn rejects_unsupported_depth() {
    let mut bytes = build_bmp(1, 1, &[vec![[0, 0, 0]]], false);
    bytes[0x1C..0x1E].copy_from_slice(&32u16.to_le_bytes());
    match bmp::decode(&bytes, "deep.bmp") {
        Err(EngineError::UnsupportedDepth {
            bits_per_pixel: 32, ..
        }) => {}
        other => panic!("expected UnsupportedDepth, got {other:?}"),
    }
}

#[test]
fn rejects_truncated_pixel_data() {
    let mut bytes = build_bmp(2, 2, &[vec![[0, 0, 0]; 2], vec![[0, 0, 0]; 2]], false);
    bytes.truncate(54 + 8); // one row missing
    match bmp::decode(&bytes, "cut.bmp") {
        Err(EngineError::TruncatedPixelData { .. }) => {}
        other => panic!("expected TruncatedPixelData, got {other:?}"),
    }
}

#[test]
fn decode_file_reports_missing_files() {
    match bmp::decode_file("definitely/not/here.bmp") {
        Err(EngineError::Io { .. }) => {}
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn odd_width_rows_honor_padding() {
    // width 3: 9 payload bytes pad to a 12-byte row
    let bytes = build_bmp(
        3,
        2,
        &[
            vec![[10, 20, 30]; 3],
            vec![[40, 50, 60]; 3],
        ],
        false,
    );
    let bitmap = bmp::decode(&bytes, "padded.bmp").unwrap();
    // top row decodes from the second stored row
    assert_eq!(&bitmap.rgba[0..4], &[60, 50, 40, 255]);
    assert_eq!(&bitmap.rgba[12..16], &[30, 20, 10, 255]);
}
