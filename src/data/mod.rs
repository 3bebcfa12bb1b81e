//! Data module - spreadsheet loading and the typed dataset

mod dataset;
mod loader;

pub use dataset::{ColumnInfo, ColumnKind, Dataset};
pub use loader::{DataLoader, SPREADSHEET_EXTENSIONS};
