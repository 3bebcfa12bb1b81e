//! Dataset Module
//! A loaded table plus the typed schema inferred once at load time.

use polars::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};

/// Coarse column type used to decide what can be plotted or summarised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Text,
    DateTime,
    Boolean,
}

impl ColumnKind {
    pub fn from_dtype(dtype: &DataType) -> Self {
        match dtype {
            DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64 => ColumnKind::Numeric,
            DataType::Date | DataType::Datetime(_, _) | DataType::Time => ColumnKind::DateTime,
            DataType::Boolean => ColumnKind::Boolean,
            _ => ColumnKind::Text,
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Text => "text",
            ColumnKind::DateTime => "datetime",
            ColumnKind::Boolean => "boolean",
        };
        f.write_str(label)
    }
}

/// Name and kind of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub kind: ColumnKind,
}

/// In-memory table with an implicit row index.
#[derive(Debug, Clone)]
pub struct Dataset {
    df: DataFrame,
    schema: Vec<ColumnInfo>,
    source: Option<PathBuf>,
}

impl Dataset {
    pub fn new(df: DataFrame) -> Self {
        let schema = df
            .get_columns()
            .iter()
            .map(|col| ColumnInfo {
                name: col.name().to_string(),
                kind: ColumnKind::from_dtype(col.dtype()),
            })
            .collect();

        Self {
            df,
            schema,
            source: None,
        }
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    #[cfg(test)]
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn schema(&self) -> &[ColumnInfo] {
        &self.schema
    }

    pub fn column_names(&self) -> Vec<String> {
        self.schema.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.schema.iter().find(|c| c.name == name)
    }

    /// Numeric columns in schema order (datetime and boolean excluded).
    pub fn numeric_columns(&self) -> Vec<String> {
        self.schema
            .iter()
            .filter(|c| c.kind == ColumnKind::Numeric)
            .map(|c| c.name.clone())
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    /// Column values as `f64`, one entry per row. NaN is reported as null.
    /// Datetime values come back as their physical integer (ms since epoch).
    pub fn numeric_values(&self, name: &str) -> PolarsResult<Vec<Option<f64>>> {
        let column = self.df.column(name)?;
        let column = match column.dtype() {
            DataType::Date | DataType::Datetime(_, _) | DataType::Time => {
                column.cast(&DataType::Int64)?
            }
            _ => column.clone(),
        };
        let as_f64 = column.cast(&DataType::Float64)?;
        let values = as_f64
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        Ok(values)
    }

    /// Column values rendered as text, one entry per row. Float NaN is
    /// reported as null, matching `numeric_values`.
    pub fn text_values(&self, name: &str) -> PolarsResult<Vec<Option<String>>> {
        let column = self.df.column(name)?;
        let nan_rows: Vec<bool> = if column.dtype().is_float() {
            column
                .cast(&DataType::Float64)?
                .f64()?
                .into_iter()
                .map(|v| v.is_some_and(f64::is_nan))
                .collect()
        } else {
            Vec::new()
        };

        let as_str = column.cast(&DataType::String)?;
        let values = as_str
            .str()?
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                if nan_rows.get(i).copied().unwrap_or(false) {
                    None
                } else {
                    v.map(|s| s.to_string())
                }
            })
            .collect();
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let df = DataFrame::new(vec![
            Column::new("age".into(), vec![Some(10i64), None, Some(30)]),
            Column::new("score".into(), vec![1.5f64, f64::NAN, 3.0]),
            Column::new("name".into(), vec!["a", "b", "c"]),
            Column::new("flag".into(), vec![true, false, true]),
        ])
        .unwrap();
        Dataset::new(df)
    }

    #[test]
    fn schema_is_inferred_in_order() {
        let ds = sample();
        let kinds: Vec<ColumnKind> = ds.schema().iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ColumnKind::Numeric,
                ColumnKind::Numeric,
                ColumnKind::Text,
                ColumnKind::Boolean
            ]
        );
        assert_eq!(ds.numeric_columns(), vec!["age", "score"]);
        assert!(ds.column("name").is_some());
        assert!(ds.column("missing").is_none());
    }

    #[test]
    fn numeric_values_treat_nan_as_null() {
        let ds = sample();
        assert_eq!(
            ds.numeric_values("score").unwrap(),
            vec![Some(1.5), None, Some(3.0)]
        );
        assert_eq!(
            ds.numeric_values("age").unwrap(),
            vec![Some(10.0), None, Some(30.0)]
        );
    }

    #[test]
    fn text_values_keep_nulls() {
        let ds = sample();
        assert_eq!(
            ds.text_values("age").unwrap(),
            vec![Some("10".to_string()), None, Some("30".to_string())]
        );
    }

    #[test]
    fn text_values_treat_nan_as_null() {
        let df = DataFrame::new(vec![Column::new(
            "ratio".into(),
            vec![1.0f64, f64::NAN, 1.0, f64::NAN],
        )])
        .unwrap();
        let ds = Dataset::new(df);
        let text = ds.text_values("ratio").unwrap();
        assert_eq!(text.iter().flatten().count(), 2);
        assert_eq!(text[1], None);
        assert_eq!(text[0], text[2]);
    }

    #[test]
    fn missing_column_is_an_error() {
        assert!(sample().numeric_values("nope").is_err());
    }
}
