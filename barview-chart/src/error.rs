use barview_guides::error::GuidesError;
use barview_scales::error::ScaleError;
use barview_scenegraph::error::SceneGraphError;
use barview_svg::error::SvgError;

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("dataset is empty")]
    EmptyDataset,

    #[error("record {index} ({category:?}) has a non-finite value")]
    NonFiniteValue { index: usize, category: String },

    #[error("category {0:?} is not in the band scale domain")]
    UnknownCategory(String),

    #[error("Scale error: {0}")]
    Scale(#[from] ScaleError),

    #[error("Guides error: {0}")]
    Guides(#[from] GuidesError),

    #[error("Scene graph error: {0}")]
    SceneGraph(#[from] SceneGraphError),

    #[error("SVG error: {0}")]
    Svg(#[from] SvgError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported data format: {0}")]
    UnsupportedDataFormat(String),
}
