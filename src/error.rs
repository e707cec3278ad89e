use std::path::PathBuf;

/// Errors surfaced by fallible engine operations.
///
/// GPU-side failures (invalid shaders, device loss) are not represented here:
/// those are routed through wgpu's uncaptured-error handler and are fatal.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: not a bitmap file (missing BM magic)")]
    BadMagic { path: PathBuf },

    #[error("{path}: bitmap header truncated ({len} bytes, need 54)")]
    TruncatedHeader { path: PathBuf, len: usize },

    #[error("{path}: unsupported bitmap depth {bits_per_pixel} (only 24-bit supported)")]
    UnsupportedDepth { path: PathBuf, bits_per_pixel: u16 },

    #[error("{path}: bitmap has zero width or height")]
    ZeroDimension { path: PathBuf },

    #[error("{path}: bitmap pixel data truncated (have {have} bytes, need {need})")]
    TruncatedPixelData {
        path: PathBuf,
        have: usize,
        need: usize,
    },

    #[error("vertex data length {len} is not a multiple of the layout stride {stride_floats}")]
    StrideMismatch { len: usize, stride_floats: usize },

    #[error("a textured surface needs between 1 and {max} textures, got {got}")]
    TextureCount { got: usize, max: usize },

    #[error("an animation needs at least one cycle, each with at least one frame")]
    EmptyAnimation,
}
