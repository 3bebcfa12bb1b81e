//! Statistics Calculator Module
//! Descriptive statistics and Pearson correlation over numeric columns.

use crate::data::Dataset;
use polars::prelude::*;
use rayon::prelude::*;

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Default for ColumnSummary {
    fn default() -> Self {
        Self {
            column: String::new(),
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            median: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// One summary row per numeric column, in schema order.
#[derive(Debug, Clone, Default)]
pub struct SummaryTable {
    pub rows: Vec<ColumnSummary>,
}

const SUMMARY_HEADERS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

impl SummaryTable {
    #[cfg(test)]
    pub fn get(&self, column: &str) -> Option<&ColumnSummary> {
        self.rows.iter().find(|r| r.column == column)
    }

    /// Plain-text table, columns right-aligned.
    pub fn to_text(&self) -> String {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| {
                [
                    r.count as f64,
                    r.mean,
                    r.std,
                    r.min,
                    r.q25,
                    r.median,
                    r.q75,
                    r.max,
                ]
                .iter()
                .map(|v| format!("{v:.6}"))
                .collect()
            })
            .collect();

        let name_width = self
            .rows
            .iter()
            .map(|r| r.column.chars().count())
            .max()
            .unwrap_or(0);

        let widths: Vec<usize> = SUMMARY_HEADERS
            .iter()
            .enumerate()
            .map(|(i, h)| {
                cells
                    .iter()
                    .map(|row| row[i].len())
                    .chain(std::iter::once(h.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = format!("{:name_width$}", "");
        for (h, &w) in SUMMARY_HEADERS.iter().zip(&widths) {
            out.push_str(&format!("  {h:>w$}"));
        }
        for (row, summary) in cells.iter().zip(&self.rows) {
            out.push('\n');
            out.push_str(&format!("{:<name_width$}", summary.column));
            for (cell, &w) in row.iter().zip(&widths) {
                out.push_str(&format!("  {cell:>w$}"));
            }
        }
        out
    }
}

/// Pairwise Pearson correlations between numeric columns.
#[derive(Debug, Clone, Default)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    #[cfg(test)]
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == row)?;
        let j = self.labels.iter().position(|l| l == col)?;
        Some(self.values[i][j])
    }

    /// Cell annotation text, two decimals.
    pub fn format_value(value: f64) -> String {
        if value.is_nan() {
            "nan".to_string()
        } else {
            format!("{value:.2}")
        }
    }
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(values: &[f64]) -> ColumnSummary {
        use statrs::statistics::Statistics;

        let n = values.len();
        if n == 0 {
            return ColumnSummary::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        ColumnSummary {
            column: String::new(),
            count: n,
            mean: values.iter().mean(),
            // sample standard deviation, NaN for a single value
            std: values.iter().std_dev(),
            min: sorted[0],
            q25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            q75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Summarise every numeric column of the dataset in parallel.
    pub fn describe(dataset: &Dataset) -> PolarsResult<SummaryTable> {
        let columns = Self::numeric_columns(dataset)?;

        let rows = columns
            .par_iter()
            .map(|(name, values)| {
                let present: Vec<f64> = values.iter().flatten().copied().collect();
                let mut summary = Self::compute_descriptive_stats(&present);
                summary.column = name.clone();
                summary
            })
            .collect();

        Ok(SummaryTable { rows })
    }

    /// Pearson correlation over rows where both values are present.
    /// NaN when fewer than two such rows exist or either side is constant.
    pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
        use statrs::statistics::Statistics;

        let (a, b): (Vec<f64>, Vec<f64>) = xs
            .iter()
            .zip(ys)
            .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
            .unzip();

        if a.len() < 2 {
            return f64::NAN;
        }

        let sx = a.iter().std_dev();
        let sy = b.iter().std_dev();
        if !(sx > 0.0 && sy > 0.0) {
            return f64::NAN;
        }

        (a.iter().covariance(b.iter()) / (sx * sy)).clamp(-1.0, 1.0)
    }

    /// Correlation matrix over all numeric columns, rows computed in parallel.
    pub fn correlation_matrix(dataset: &Dataset) -> PolarsResult<CorrelationMatrix> {
        let columns = Self::numeric_columns(dataset)?;

        let values: Vec<Vec<f64>> = (0..columns.len())
            .into_par_iter()
            .map(|i| {
                (0..columns.len())
                    .map(|j| {
                        let r = Self::pearson(&columns[i].1, &columns[j].1);
                        if i == j && !r.is_nan() {
                            1.0
                        } else {
                            r
                        }
                    })
                    .collect::<Vec<f64>>()
            })
            .collect();

        Ok(CorrelationMatrix {
            labels: columns.into_iter().map(|(name, _)| name).collect(),
            values,
        })
    }

    fn numeric_columns(dataset: &Dataset) -> PolarsResult<Vec<(String, Vec<Option<f64>>)>> {
        dataset
            .numeric_columns()
            .into_iter()
            .map(|name| {
                let values = dataset.numeric_values(&name)?;
                Ok((name, values))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(columns: Vec<Column>) -> Dataset {
        Dataset::new(DataFrame::new(columns).unwrap())
    }

    #[test]
    fn descriptive_stats_match_linear_quartiles() {
        let s = StatsCalculator::compute_descriptive_stats(&[10.0, 20.0, 20.0, 30.0]);
        assert_eq!(s.count, 4);
        assert_eq!(s.mean, 20.0);
        assert!((s.std - 8.164965809277259).abs() < 1e-12);
        assert_eq!(s.min, 10.0);
        assert_eq!(s.q25, 17.5);
        assert_eq!(s.median, 20.0);
        assert_eq!(s.q75, 22.5);
        assert_eq!(s.max, 30.0);
    }

    #[test]
    fn single_value_has_nan_std() {
        let s = StatsCalculator::compute_descriptive_stats(&[4.0]);
        assert_eq!(s.count, 1);
        assert!(s.std.is_nan());
        assert_eq!(s.median, 4.0);
    }

    #[test]
    fn describe_skips_text_and_nulls() {
        let ds = dataset(vec![
            Column::new("x".into(), vec![Some(1.0f64), None, Some(3.0)]),
            Column::new("name".into(), vec!["a", "b", "c"]),
        ]);
        let table = StatsCalculator::describe(&ds).unwrap();
        assert_eq!(table.rows.len(), 1);
        let x = table.get("x").unwrap();
        assert_eq!(x.count, 2);
        assert_eq!(x.mean, 2.0);

        let text = table.to_text();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().contains("count"));
        assert!(lines.next().unwrap().starts_with("x "));
    }

    #[test]
    fn perfectly_correlated_columns() {
        let ds = dataset(vec![
            Column::new("x".into(), vec![1.0f64, 2.0, 3.0, 4.0]),
            Column::new("y".into(), vec![2.0f64, 4.0, 6.0, 8.0]),
            Column::new("z".into(), vec![4.0f64, 3.0, 2.0, 1.0]),
        ]);
        let m = StatsCalculator::correlation_matrix(&ds).unwrap();
        assert_eq!(m.labels, vec!["x", "y", "z"]);
        let xy = m.get("x", "y").unwrap();
        assert!((xy - 1.0).abs() < 1e-12);
        assert_eq!(CorrelationMatrix::format_value(xy), "1.00");
        assert_eq!(CorrelationMatrix::format_value(m.get("x", "z").unwrap()), "-1.00");
        assert_eq!(m.get("y", "y"), Some(1.0));
    }

    #[test]
    fn constant_or_sparse_columns_are_nan() {
        let xs = [Some(1.0), Some(2.0), Some(3.0)];
        assert!(StatsCalculator::pearson(&xs, &[Some(5.0), Some(5.0), Some(5.0)]).is_nan());
        assert!(StatsCalculator::pearson(&xs, &[Some(1.0), None, None]).is_nan());
        assert_eq!(CorrelationMatrix::format_value(f64::NAN), "nan");
    }
}
