use barview_scales::error::ScaleError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GuidesError {
    #[error("Invalid scale: {0}")]
    InvalidScale(#[from] ScaleError),

    #[error("Axis range ({0}, {1}) is not finite")]
    NonFiniteRange(f32, f32),
}
