pub mod error;
pub mod writer;

#[cfg(feature = "png")]
pub mod png;

pub use writer::{scene_graph_to_svg, SvgWriter};
