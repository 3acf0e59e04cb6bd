use thiserror::Error;

/// Failure reported by a [`Renderer`](crate::encoder::render::Renderer)
#[derive(Debug, Error)]
pub enum RenderError {
    /// Payload cannot be placed in any symbol at the chosen level
    #[error("cannot encode payload: {0}")]
    Encode(String),
    /// Color is not `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`
    #[error("invalid hex color {0:?}")]
    InvalidColor(String),
    /// Requested image is larger than the renderer allows
    #[error("image of {modules} modules with margin {margin} at width {pixel_width} exceeds the size limit")]
    Dimensions {
        /// Modules per symbol side
        modules: usize,
        /// Requested quiet zone
        margin: u32,
        /// Requested width
        pixel_width: u32,
    },
    /// Pixel encoding into the output format failed
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Generic encode-path failure
///
/// Deliberately opaque: the renderer cause is logged, never carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("failed to generate QR code")]
pub struct QrGenerationError;

/// Failure while handing an image to a download host
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Not a base64 `data:` URI
    #[error("invalid data URI")]
    InvalidDataUri,
    /// Empty name or one that escapes the target directory
    #[error("invalid download filename {0:?}")]
    InvalidFilename(String),
    /// Host filesystem failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
