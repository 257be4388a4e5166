use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// One bar: a category and its numeric value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "state")]
    pub category: String,
    #[serde(rename = "percent")]
    pub value: f32,
}

impl Record {
    pub fn new(category: impl Into<String>, value: f32) -> Self {
        Self {
            category: category.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Json,
}

impl DataFormat {
    pub fn from_path(path: &Path) -> Result<Self, ChartError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(ChartError::UnsupportedDataFormat(
                path.display().to_string(),
            )),
        }
    }
}

/// Loads records from a `.csv` or `.json` file
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>, ChartError> {
    let path = path.as_ref();
    let format = DataFormat::from_path(path)?;
    let reader = BufReader::new(File::open(path)?);
    let records = match format {
        DataFormat::Csv => read_csv(reader)?,
        DataFormat::Json => read_json(reader)?,
    };
    log::debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Reads CSV with a header row naming `state` and `percent`; other columns are ignored
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Record>, ChartError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let records = rdr.deserialize().collect::<Result<Vec<Record>, _>>()?;
    Ok(records)
}

/// Reads a JSON array of `{"state": .., "percent": ..}` objects
pub fn read_json<R: Read>(reader: R) -> Result<Vec<Record>, ChartError> {
    Ok(serde_json::from_reader(reader)?)
}
