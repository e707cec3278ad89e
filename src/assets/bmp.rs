use std::path::{Path, PathBuf};

use crate::error::EngineError;

/// Byte length of the BITMAPFILEHEADER + BITMAPINFOHEADER pair.
pub const HEADER_LEN: usize = 54;

const PIXEL_OFFSET_FIELD: usize = 0x0A;
const WIDTH_FIELD: usize = 0x12;
const HEIGHT_FIELD: usize = 0x16;
const DEPTH_FIELD: usize = 0x1C;
const IMAGE_SIZE_FIELD: usize = 0x22;

/// A decoded 24-bit bitmap, converted to top-down RGBA8 ready for upload.
#[derive(Debug, Clone)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    /// Pixel-array byte count declared by the header, or width * height * 3
    /// when the header left the field at zero.
    pub declared_size: usize,
    pub rgba: Vec<u8>,
}

impl Bitmap {
    pub fn byte_len(&self) -> usize {
        self.rgba.len()
    }
}

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

pub fn decode_file(path: impl AsRef<Path>) -> Result<Bitmap, EngineError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&bytes, path)
}

/// Decodes a 24-bit bottom-up BGR bitmap.
///
/// Header fields left at zero are inferred the way the classic loader does:
/// a zero pixel offset means the data starts right after the 54-byte header,
/// and a zero image size means width * height * 3. Rows are read with the
/// standard 4-byte padding and flipped so the output is top-down.
pub fn decode(bytes: &[u8], path: impl AsRef<Path>) -> Result<Bitmap, EngineError> {
    let path: PathBuf = path.as_ref().to_path_buf();

    if bytes.len() < HEADER_LEN {
        return Err(EngineError::TruncatedHeader {
            path,
            len: bytes.len(),
        });
    }
    if &bytes[0..2] != b"BM" {
        return Err(EngineError::BadMagic { path });
    }

    let bits_per_pixel = read_u16(bytes, DEPTH_FIELD);
    if bits_per_pixel != 24 {
        return Err(EngineError::UnsupportedDepth {
            path,
            bits_per_pixel,
        });
    }

    let width = read_u32(bytes, WIDTH_FIELD);
    let height = read_u32(bytes, HEIGHT_FIELD);
    if width == 0 || height == 0 {
        return Err(EngineError::ZeroDimension { path });
    }

    let mut pixel_offset = read_u32(bytes, PIXEL_OFFSET_FIELD) as usize;
    if pixel_offset == 0 {
        pixel_offset = HEADER_LEN;
    }
    let mut image_size = read_u32(bytes, IMAGE_SIZE_FIELD) as usize;
    if image_size == 0 {
        image_size = width as usize * height as usize * 3;
    }

    // rows pad to 4-byte boundaries on disk
    let row_stride = (width as usize * 3 + 3) / 4 * 4;
    let need = pixel_offset + row_stride * height as usize;
    if bytes.len() < need {
        return Err(EngineError::TruncatedPixelData {
            path,
            have: bytes.len(),
            need,
        });
    }
    let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
    // bottom-up BGR to top-down RGBA
    for row in (0..height as usize).rev() {
        let start = pixel_offset + row * row_stride;
        for col in 0..width as usize {
            let px = start + col * 3;
            rgba.push(bytes[px + 2]);
            rgba.push(bytes[px + 1]);
            rgba.push(bytes[px]);
            rgba.push(255);
        }
    }

    Ok(Bitmap {
        width,
        height,
        declared_size: image_size,
        rgba,
    })
}
