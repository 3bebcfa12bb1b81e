//! Spreadsheet Data Loader Module
//! Reads the first worksheet of a workbook (calamine) or a CSV file (Polars)
//! into a `Dataset`.

use crate::data::Dataset;
use calamine::{open_workbook_auto, Data, Reader};
use polars::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Extensions offered by the file picker.
pub const SPREADSHEET_EXTENSIONS: [&str; 6] = ["xls", "xlsx", "xlsm", "xlsb", "ods", "csv"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read the spreadsheet file: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("Failed to read the spreadsheet file: {0}")]
    Polars(#[from] PolarsError),
    #[error("Failed to read the spreadsheet file: the workbook has no worksheet")]
    NoWorksheet,
    #[error("Failed to read the spreadsheet file: unsupported extension '.{0}'")]
    UnsupportedExtension(String),
}

/// Holds the currently loaded dataset.
pub struct DataLoader {
    dataset: Option<Dataset>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self { dataset: None }
    }

    /// Load a file and replace the current dataset. On error the previous
    /// dataset is kept.
    pub fn load_file(&mut self, path: &Path) -> Result<&Dataset, LoaderError> {
        let dataset = read_file(path)?;
        log::info!(
            "Loaded {} ({} rows, {} columns)",
            path.display(),
            dataset.row_count(),
            dataset.column_count()
        );
        Ok(self.dataset.insert(dataset))
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }
}

/// Read a file into a dataset, dispatching on its extension.
pub fn read_file(path: &Path) -> Result<Dataset, LoaderError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let df = match ext.as_str() {
        "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => read_workbook(path)?,
        "csv" => read_csv(path)?,
        other => return Err(LoaderError::UnsupportedExtension(other.to_string())),
    };

    Ok(Dataset::new(df).with_source(path))
}

fn read_workbook(path: &Path) -> Result<DataFrame, LoaderError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(LoaderError::NoWorksheet)?;
    let range = workbook.worksheet_range(&sheet)?;

    let rows: Vec<&[Data]> = range.rows().collect();
    Ok(frame_from_rows(&rows)?)
}

fn read_csv(path: &Path) -> Result<DataFrame, LoaderError> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .with_ignore_errors(true)
        .finish()?
        .collect()?;
    Ok(df)
}

/// Cell type observed across a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Empty,
    Int,
    Float,
    Bool,
    DateTime,
    Text,
}

impl CellKind {
    fn of(cell: &Data) -> Option<Self> {
        match cell {
            Data::Empty | Data::Error(_) => None,
            Data::Int(_) => Some(CellKind::Int),
            Data::Float(_) => Some(CellKind::Float),
            Data::Bool(_) => Some(CellKind::Bool),
            Data::DateTime(_) => Some(CellKind::DateTime),
            _ => Some(CellKind::Text),
        }
    }

    fn merge(self, other: CellKind) -> CellKind {
        match (self, other) {
            (CellKind::Empty, k) => k,
            (a, b) if a == b => a,
            (CellKind::Int, CellKind::Float) | (CellKind::Float, CellKind::Int) => CellKind::Float,
            _ => CellKind::Text,
        }
    }
}

/// Build a frame from worksheet rows. The first row holds the headers.
fn frame_from_rows(rows: &[&[Data]]) -> PolarsResult<DataFrame> {
    let Some((header, body)) = rows.split_first() else {
        return Ok(DataFrame::empty());
    };

    let names = header_names(header);
    let columns = names
        .into_iter()
        .enumerate()
        .map(|(idx, name)| build_column(name, body.iter().map(|row| row.get(idx))))
        .collect::<PolarsResult<Vec<Column>>>()?;

    DataFrame::new(columns)
}

/// Header cells as column names. Blank cells become `Unnamed: {idx}` and
/// repeated names get a `.1`, `.2`, ... suffix.
fn header_names(header: &[Data]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();

    header
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let base = match cell {
                Data::Empty | Data::Error(_) => format!("Unnamed: {idx}"),
                other => other.to_string(),
            };

            let mut name = base.clone();
            let mut suffix = 1;
            while seen.contains(&name) {
                name = format!("{base}.{suffix}");
                suffix += 1;
            }
            seen.insert(name.clone());
            name
        })
        .collect()
}

/// Excel serial date (days since 1899-12-30) to milliseconds since epoch.
fn excel_serial_to_millis(serial: f64) -> i64 {
    ((serial - 25569.0) * 86_400_000.0).round() as i64
}

/// Float cells that fit an `i64` exactly. Other cells do not block the cast.
fn is_whole_number(cell: &Data) -> bool {
    match cell {
        Data::Float(f) => f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15,
        _ => true,
    }
}

fn build_column<'a, I>(name: String, cells: I) -> PolarsResult<Column>
where
    I: Iterator<Item = Option<&'a Data>> + Clone,
{
    let kind = cells
        .clone()
        .flatten()
        .filter_map(CellKind::of)
        .fold(CellKind::Empty, CellKind::merge);

    // xlsx stores every number as a float; whole numbers read back as integers
    let kind = if kind == CellKind::Float && cells.clone().flatten().all(is_whole_number) {
        CellKind::Int
    } else {
        kind
    };

    let column = match kind {
        CellKind::Int => {
            let values: Vec<Option<i64>> = cells
                .map(|c| match c {
                    Some(Data::Int(i)) => Some(*i),
                    Some(Data::Float(f)) => Some(*f as i64),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
        }
        CellKind::Float => {
            let values: Vec<Option<f64>> = cells
                .map(|c| match c {
                    Some(Data::Int(i)) => Some(*i as f64),
                    Some(Data::Float(f)) => Some(*f),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
        }
        CellKind::Bool => {
            let values: Vec<Option<bool>> = cells
                .map(|c| match c {
                    Some(Data::Bool(b)) => Some(*b),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
        }
        CellKind::DateTime => {
            let values: Vec<Option<i64>> = cells
                .map(|c| match c {
                    Some(Data::DateTime(dt)) => Some(excel_serial_to_millis(dt.as_f64())),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
                .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
        }
        CellKind::Text => {
            let values: Vec<Option<String>> = cells
                .map(|c| match c {
                    None | Some(Data::Empty) | Some(Data::Error(_)) => None,
                    Some(other) => Some(other.to_string()),
                })
                .collect();
            Column::new(name.into(), values)
        }
        CellKind::Empty => {
            let values: Vec<Option<f64>> = cells.map(|_| None).collect();
            Column::new(name.into(), values)
        }
    };

    Ok(column)
}
