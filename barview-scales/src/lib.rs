pub mod array;
pub mod band;
pub mod error;
pub mod format;
pub mod numeric;
pub mod ordinal;
