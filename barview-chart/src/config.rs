use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Space between the container edges and the inner chart area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 70.0,
            right: 50.0,
            bottom: 100.0,
            left: 50.0,
        }
    }
}

/// Chart construction parameters.
///
/// Deserializes from either snake_case or camelCase keys. Only missing
/// fields fall back to their defaults; an explicit `0` is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Selector of the element the chart is embedded in (`#id`, `.class` or a tag name)
    #[serde(alias = "parentElement")]
    pub parent_element: String,

    #[serde(default = "default_container_width", alias = "containerWidth")]
    pub container_width: f32,

    #[serde(default = "default_container_height", alias = "containerHeight")]
    pub container_height: f32,

    #[serde(default)]
    pub margin: Margin,
}

fn default_container_width() -> f32 {
    1000.0
}

fn default_container_height() -> f32 {
    600.0
}

impl ChartConfig {
    pub fn new(parent_element: impl Into<String>) -> Self {
        Self {
            parent_element: parent_element.into(),
            container_width: default_container_width(),
            container_height: default_container_height(),
            margin: Margin::default(),
        }
    }

    pub fn with_container_width(mut self, width: f32) -> Self {
        self.container_width = width;
        self
    }

    pub fn with_container_height(mut self, height: f32) -> Self {
        self.container_height = height;
        self
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ChartError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn inner_width(&self) -> f32 {
        self.container_width - self.margin.left - self.margin.right
    }

    pub fn inner_height(&self) -> f32 {
        self.container_height - self.margin.top - self.margin.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChartConfig::new("#chart");
        assert_eq!(config.container_width, 1000.0);
        assert_eq!(config.container_height, 600.0);
        assert_eq!(config.margin, Margin::default());
        assert_eq!(config.inner_width(), 900.0);
        assert_eq!(config.inner_height(), 430.0);
    }

    #[test]
    fn test_from_json_missing_fields() {
        let config = ChartConfig::from_json_str(r##"{"parentElement": "#chart"}"##).unwrap();
        assert_eq!(config, ChartConfig::new("#chart"));
    }

    #[test]
    fn test_from_json_partial_margin() {
        let config = ChartConfig::from_json_str(
            r#"{"parent_element": "body", "containerWidth": 500, "margin": {"left": 20}}"#,
        )
        .unwrap();
        assert_eq!(config.container_width, 500.0);
        assert_eq!(config.container_height, 600.0);
        assert_eq!(config.margin.left, 20.0);
        assert_eq!(config.margin.top, 70.0);
        assert_eq!(config.inner_width(), 430.0);
    }

    #[test]
    fn test_explicit_zero_is_kept() {
        let config =
            ChartConfig::from_json_str(r#"{"parentElement": "body", "containerHeight": 0}"#)
                .unwrap();
        assert_eq!(config.container_height, 0.0);
        assert_eq!(config.inner_height(), -170.0);
    }

    #[test]
    fn test_missing_parent_element() {
        assert!(matches!(
            ChartConfig::from_json_str("{}"),
            Err(ChartError::Json(_))
        ));
    }
}
