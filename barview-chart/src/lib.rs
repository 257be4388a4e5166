pub mod config;
pub mod data;
pub mod error;
pub mod html;
pub mod join;
pub mod view;

pub use config::{ChartConfig, Margin};
pub use data::{load_records, Record};
pub use error::ChartError;
pub use join::{JoinPlan, RenderSummary};
pub use view::{BarElement, ChartView};
