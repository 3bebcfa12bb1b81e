//! Chart Request Module
//! Form settings and their validation into a `ChartRequest`.

use crate::color::ChartColor;
use crate::config::{AppConfig, MAX_BINS, MIN_BINS};
use crate::data::{ColumnInfo, Dataset};
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Please load data first.")]
    NoData,
    #[error("{}", missing_column_message(.0))]
    MissingColumn(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Failed to compute chart data: {0}")]
    Polars(#[from] PolarsError),
}

fn missing_column_message(column: &str) -> String {
    if column.is_empty() {
        "Please select a column.".to_string()
    } else {
        format!("Column '{column}' not found in the loaded data.")
    }
}

/// Supported chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Histogram,
    BarChart,
    LinePlot,
    ScatterPlot,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Histogram,
        ChartKind::BarChart,
        ChartKind::LinePlot,
        ChartKind::ScatterPlot,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Histogram => "Histogram",
            ChartKind::BarChart => "Bar Chart",
            ChartKind::LinePlot => "Line Plot",
            ChartKind::ScatterPlot => "Scatter Plot",
        }
    }
}

/// Raw values from the visualization form. Not validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    pub column: String,
    pub kind: ChartKind,
    pub bins: usize,
    pub normalize: bool,
    pub color: String,
    pub title: String,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl ChartSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            column: String::new(),
            kind: ChartKind::default(),
            bins: config.default_bins,
            normalize: false,
            color: config.default_color.clone(),
            title: String::new(),
        }
    }
}

/// Validated configuration for one chart render. Only constructible against
/// a loaded dataset that contains `column`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    column: String,
    kind: ChartKind,
    bins: usize,
    normalize: bool,
    color: ChartColor,
    title: String,
}

impl ChartRequest {
    pub fn new(dataset: Option<&Dataset>, settings: &ChartSettings) -> Result<Self, ChartError> {
        let dataset = dataset.ok_or(ChartError::NoData)?;
        lookup_column(dataset, &settings.column)?;

        if settings.kind == ChartKind::Histogram
            && !(MIN_BINS..=MAX_BINS).contains(&settings.bins)
        {
            return Err(ChartError::InvalidParameter(format!(
                "number of bins must be between {MIN_BINS} and {MAX_BINS}, got {}",
                settings.bins
            )));
        }

        let color = settings
            .color
            .parse::<ChartColor>()
            .map_err(|e| ChartError::InvalidParameter(e.to_string()))?;

        Ok(Self {
            column: settings.column.clone(),
            kind: settings.kind,
            bins: settings.bins.clamp(MIN_BINS, MAX_BINS),
            normalize: settings.normalize,
            color,
            title: settings.title.clone(),
        })
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn normalize(&self) -> bool {
        self.normalize
    }

    pub fn color(&self) -> ChartColor {
        self.color
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Resolve `column` in the dataset schema. Empty or unknown names are a
/// `MissingColumn` error.
pub(crate) fn lookup_column<'a>(
    dataset: &'a Dataset,
    column: &str,
) -> Result<&'a ColumnInfo, ChartError> {
    if column.is_empty() {
        return Err(ChartError::MissingColumn(String::new()));
    }
    dataset
        .column(column)
        .ok_or_else(|| ChartError::MissingColumn(column.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn ages() -> Dataset {
        let df = DataFrame::new(vec![Column::new("age".into(), vec![10i64, 20, 20, 30])]).unwrap();
        Dataset::new(df)
    }

    fn settings(column: &str) -> ChartSettings {
        ChartSettings {
            column: column.to_string(),
            ..ChartSettings::default()
        }
    }

    #[test]
    fn defaults_follow_config() {
        let s = ChartSettings::default();
        assert_eq!(s.bins, 10);
        assert_eq!(s.color, "skyblue");
        assert!(!s.normalize);
        assert!(s.title.is_empty());
        assert_eq!(s.kind, ChartKind::Histogram);
    }

    #[test]
    fn valid_request_is_built() {
        let ds = ages();
        let req = ChartRequest::new(Some(&ds), &settings("age")).unwrap();
        assert_eq!(req.column(), "age");
        assert_eq!(req.bins(), 10);
        assert_eq!(req.color(), ChartColor::rgb(135, 206, 235));
    }

    #[test]
    fn no_dataset_is_rejected() {
        let err = ChartRequest::new(None, &settings("age")).unwrap_err();
        assert!(matches!(err, ChartError::NoData));
    }

    #[test]
    fn empty_or_unknown_column_is_rejected() {
        let ds = ages();
        let empty = ChartRequest::new(Some(&ds), &settings("")).unwrap_err();
        assert!(matches!(&empty, ChartError::MissingColumn(c) if c.is_empty()));
        assert_eq!(empty.to_string(), "Please select a column.");

        let unknown = ChartRequest::new(Some(&ds), &settings("height")).unwrap_err();
        assert!(matches!(&unknown, ChartError::MissingColumn(c) if c == "height"));
    }

    #[test]
    fn out_of_range_bins_are_rejected_for_histograms() {
        let ds = ages();
        for bins in [0, 51] {
            let s = ChartSettings {
                bins,
                ..settings("age")
            };
            let err = ChartRequest::new(Some(&ds), &s).unwrap_err();
            assert!(matches!(err, ChartError::InvalidParameter(_)));
        }

        let bar = ChartSettings {
            bins: 0,
            kind: ChartKind::BarChart,
            ..settings("age")
        };
        assert_eq!(ChartRequest::new(Some(&ds), &bar).unwrap().bins(), MIN_BINS);
    }

    #[test]
    fn unknown_color_is_rejected() {
        let ds = ages();
        let s = ChartSettings {
            color: "blurple-ish".to_string(),
            ..settings("age")
        };
        let err = ChartRequest::new(Some(&ds), &s).unwrap_err();
        assert!(matches!(err, ChartError::InvalidParameter(_)));
    }
}
