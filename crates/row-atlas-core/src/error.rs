use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Incompatible image for key '{key}': {reason}")]
    IncompatibleImage { key: String, reason: String },
    #[error("Atlas of {width}x{height} exceeds the maximum of {max_width}x{max_height}")]
    AtlasTooLarge {
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },
    #[error("Combined width of {total} pixels does not fit in u32")]
    WidthOverflow { total: u64 },
    #[error("Atlas already generated; call cleanup() and re-register before generating again")]
    AlreadyGenerated,
    #[error("Invalid maximum dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, AtlasError>;
