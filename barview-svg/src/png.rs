use lazy_static::lazy_static;
use resvg::render;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use usvg::fontdb::Database;

use barview_common::canvas::CanvasDimensions;

use crate::error::SvgError;

lazy_static! {
    pub static ref FONT_DB: Mutex<usvg::fontdb::Database> = Mutex::new(init_font_db());
}

fn init_font_db() -> usvg::fontdb::Database {
    let mut font_database = Database::new();
    font_database.load_system_fonts();
    font_database
}

/// Rasterizes an SVG document to PNG bytes, scaling the document size by `scale`
pub fn svg_to_png(svg: &str, scale: f32) -> Result<Vec<u8>, SvgError> {
    let fontdb = {
        let font_database = FONT_DB
            .lock()
            .map_err(|_| SvgError::InternalError("Failed to acquire fontdb lock".to_string()))?;
        Arc::new(font_database.clone())
    };

    // catch_unwind so a usvg/resvg panic surfaces as an error
    let response = panic::catch_unwind(AssertUnwindSafe(|| {
        let xml_opt = usvg::roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let opts = usvg::Options {
            fontdb,
            ..Default::default()
        };
        let doc = usvg::roxmltree::Document::parse_with_options(svg, xml_opt)?;
        let rtree = usvg::Tree::from_xmltree(&doc, &opts)?;

        let dimensions =
            CanvasDimensions::new(rtree.size().width(), rtree.size().height()).with_scale(scale);
        let mut pixmap = tiny_skia::Pixmap::new(
            dimensions.to_physical_width(),
            dimensions.to_physical_height(),
        )
        .ok_or(SvgError::InvalidImageSize {
            width: dimensions.size[0] * scale,
            height: dimensions.size[1] * scale,
        })?;

        let transform = tiny_skia::Transform::from_scale(scale, scale);
        render(&rtree, transform, &mut pixmap.as_mut());
        pixmap
            .encode_png()
            .map_err(|err| SvgError::InternalError(err.to_string()))
    }));

    match response {
        Ok(result) => {
            if let Ok(png) = &result {
                log::trace!("encoded {} byte png", png.len());
            }
            result
        }
        Err(_) => Err(SvgError::InternalError(
            "svg rasterization panicked".to_string(),
        )),
    }
}
