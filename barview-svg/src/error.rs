#[derive(Debug, thiserror::Error)]
pub enum SvgError {
    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("format error")]
    FmtError(#[from] std::fmt::Error),

    #[error("Invalid image size: {width}x{height}")]
    InvalidImageSize { width: f32, height: f32 },

    #[cfg(feature = "png")]
    #[error("usvg error: {0}")]
    UsvgError(#[from] usvg::Error),

    #[cfg(feature = "png")]
    #[error("roxml Error: {0}")]
    RoxmlError(#[from] usvg::roxmltree::Error),
}
