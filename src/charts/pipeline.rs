//! Render Pipeline
//! Turns a validated request (or an analysis action) plus the loaded dataset
//! into an artifact and installs it in a display region.

use crate::charts::request::lookup_column;
use crate::charts::{
    Artifact, ChartBody, ChartError, ChartFigure, ChartKind, ChartRequest, ComplexityPlot,
    DisplayRegion, IndexSeries, ValueAxis,
};
use crate::color::ChartColor;
use crate::data::{ColumnInfo, ColumnKind, Dataset};
use crate::stats::{self, complexity, StatsCalculator};
use std::collections::HashMap;

/// Compute the chart described by `request` without touching any region.
pub fn build_chart(
    dataset: Option<&Dataset>,
    request: &ChartRequest,
) -> Result<ChartFigure, ChartError> {
    let dataset = dataset.ok_or(ChartError::NoData)?;
    // re-checked here: the request may predate a reload
    let info = lookup_column(dataset, request.column())?;
    let column = request.column();

    let body = match request.kind() {
        ChartKind::Histogram => {
            if info.kind == ColumnKind::Text {
                return Err(ChartError::InvalidParameter(format!(
                    "a histogram needs numeric values, '{column}' holds {}",
                    info.kind
                )));
            }
            let values: Vec<f64> = dataset.numeric_values(column)?.into_iter().flatten().collect();
            ChartBody::Histogram(stats::histogram(
                &values,
                request.bins(),
                request.normalize(),
            ))
        }
        ChartKind::BarChart => ChartBody::Bars(stats::value_counts(&dataset.text_values(column)?)),
        ChartKind::LinePlot => ChartBody::Line(index_series(dataset, info)?),
        ChartKind::ScatterPlot => ChartBody::Scatter(index_series(dataset, info)?),
    };

    let y_label = match request.kind() {
        ChartKind::Histogram => "Frequency".to_string(),
        _ => column.to_string(),
    };

    Ok(ChartFigure {
        kind: request.kind(),
        column: column.to_string(),
        title: request.title().to_string(),
        x_label: column.to_string(),
        y_label,
        color: request.color(),
        body,
    })
}

/// Build the chart and install it in `region`, replacing the previous one.
/// On error the region is left as it was.
pub fn render<'r>(
    dataset: Option<&Dataset>,
    request: &ChartRequest,
    region: &'r mut DisplayRegion,
) -> Result<&'r Artifact, ChartError> {
    let figure = build_chart(dataset, request)?;
    log::info!(
        "Rendered {} of '{}' into {}",
        figure.kind.label(),
        figure.column,
        region.name()
    );
    Ok(region.replace(Artifact::Chart(figure)))
}

/// Non-null values against their row index. Text columns are plotted as
/// category codes in first-seen order.
fn index_series(dataset: &Dataset, info: &ColumnInfo) -> Result<IndexSeries, ChartError> {
    if info.kind != ColumnKind::Text {
        let points = dataset
            .numeric_values(&info.name)?
            .into_iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|y| [i as f64, y]))
            .collect();
        return Ok(IndexSeries {
            points,
            axis: ValueAxis::Continuous,
        });
    }

    let mut codes: HashMap<String, usize> = HashMap::new();
    let mut labels: Vec<String> = Vec::new();
    let mut points = Vec::new();

    for (i, value) in dataset.text_values(&info.name)?.into_iter().enumerate() {
        let Some(value) = value else { continue };
        let code = *codes.entry(value.clone()).or_insert_with(|| {
            labels.push(value);
            labels.len() - 1
        });
        points.push([i as f64, code as f64]);
    }

    Ok(IndexSeries {
        points,
        axis: ValueAxis::Categories(labels),
    })
}

/// Buttons of the analysis tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Analysis {
    Correlation,
    Summary,
    TimeComplexity,
    SpaceComplexity,
}

impl Analysis {
    pub const ALL: [Analysis; 4] = [
        Analysis::Correlation,
        Analysis::Summary,
        Analysis::TimeComplexity,
        Analysis::SpaceComplexity,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Analysis::Correlation => "Generate Correlation Matrix",
            Analysis::Summary => "Show Statistical Summary",
            Analysis::TimeComplexity => "Calculate Time Complexity",
            Analysis::SpaceComplexity => "Calculate Space Complexity",
        }
    }
}

/// Compute the artifact for an analysis action. The complexity demos do not
/// need a dataset.
pub fn analyze(analysis: Analysis, dataset: Option<&Dataset>) -> Result<Artifact, ChartError> {
    match analysis {
        Analysis::Correlation => {
            let dataset = dataset.ok_or(ChartError::NoData)?;
            let matrix = StatsCalculator::correlation_matrix(dataset)?;
            if matrix.labels.is_empty() {
                return Err(ChartError::InvalidParameter(
                    "the loaded data has no numeric columns to correlate".to_string(),
                ));
            }
            Ok(Artifact::Correlation(matrix))
        }
        Analysis::Summary => {
            let dataset = dataset.ok_or(ChartError::NoData)?;
            Ok(Artifact::Summary(StatsCalculator::describe(dataset)?))
        }
        Analysis::TimeComplexity => Ok(Artifact::Complexity(ComplexityPlot {
            title: "Time Complexity".to_string(),
            x_label: "Input Size".to_string(),
            y_label: "Time (seconds)".to_string(),
            color: ChartColor::rgb(0, 0, 255),
            points: to_points(complexity::time_samples(&complexity::DEMO_SIZES)),
        })),
        Analysis::SpaceComplexity => Ok(Artifact::Complexity(ComplexityPlot {
            title: "Space Complexity".to_string(),
            x_label: "Input Size".to_string(),
            y_label: "Space (bytes)".to_string(),
            color: ChartColor::rgb(0, 128, 0),
            points: to_points(complexity::space_samples(&complexity::DEMO_SIZES)),
        })),
    }
}

/// Run an analysis and install its artifact in `region`.
pub fn run_analysis<'r>(
    analysis: Analysis,
    dataset: Option<&Dataset>,
    region: &'r mut DisplayRegion,
) -> Result<&'r Artifact, ChartError> {
    let artifact = analyze(analysis, dataset)?;
    log::info!("{} shown in {}", artifact.title(), region.name());
    Ok(region.replace(artifact))
}

fn to_points(samples: Vec<(f64, f64)>) -> Vec<[f64; 2]> {
    samples.into_iter().map(|(x, y)| [x, y]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartSettings;
    use polars::prelude::*;

    fn dataset(columns: Vec<Column>) -> Dataset {
        Dataset::new(DataFrame::new(columns).unwrap())
    }

    fn ages() -> Dataset {
        dataset(vec![
            Column::new("age".into(), vec![10i64, 20, 20, 30]),
            Column::new("city".into(), vec!["Oslo", "Rome", "Oslo", "Lima"]),
        ])
    }

    fn request(ds: &Dataset, column: &str, kind: ChartKind) -> ChartRequest {
        let settings = ChartSettings {
            column: column.to_string(),
            kind,
            ..ChartSettings::default()
        };
        ChartRequest::new(Some(ds), &settings).unwrap()
    }

    #[test]
    fn bar_chart_counts_distinct_values() {
        let ds = ages();
        let fig = build_chart(Some(&ds), &request(&ds, "age", ChartKind::BarChart)).unwrap();
        let ChartBody::Bars(bars) = &fig.body else {
            panic!("expected bars");
        };
        assert_eq!(
            bars,
            &vec![
                ("20".to_string(), 2),
                ("10".to_string(), 1),
                ("30".to_string(), 1)
            ]
        );
        assert_eq!(bars.iter().map(|(_, c)| c).sum::<usize>(), ds.row_count());
        assert_eq!(fig.x_label, "age");
        assert_eq!(fig.y_label, "age");
    }

    #[test]
    fn bar_chart_skips_nan_cells() {
        let ds = dataset(vec![Column::new(
            "ratio".into(),
            vec![1.0f64, f64::NAN, 1.0, f64::NAN],
        )]);
        let fig = build_chart(Some(&ds), &request(&ds, "ratio", ChartKind::BarChart)).unwrap();
        let ChartBody::Bars(bars) = &fig.body else {
            panic!("expected bars");
        };
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].1, 2);
        assert!(bars.iter().all(|(label, _)| label != "NaN"));
    }

    #[test]
    fn histogram_labels_and_density() {
        let ds = ages();
        let settings = ChartSettings {
            column: "age".to_string(),
            normalize: true,
            bins: 4,
            title: "Ages".to_string(),
            ..ChartSettings::default()
        };
        let req = ChartRequest::new(Some(&ds), &settings).unwrap();
        let fig = build_chart(Some(&ds), &req).unwrap();
        assert_eq!(fig.y_label, "Frequency");
        assert_eq!(fig.title, "Ages");
        let ChartBody::Histogram(h) = &fig.body else {
            panic!("expected histogram");
        };
        assert_eq!(h.bins.len(), 4);
        assert!((h.area() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn histogram_rejects_text_columns() {
        let ds = ages();
        let err = build_chart(Some(&ds), &request(&ds, "city", ChartKind::Histogram)).unwrap_err();
        assert!(matches!(err, ChartError::InvalidParameter(_)));
    }

    #[test]
    fn line_and_scatter_follow_row_index() {
        let ds = ages();
        let fig = build_chart(Some(&ds), &request(&ds, "age", ChartKind::LinePlot)).unwrap();
        let ChartBody::Line(series) = &fig.body else {
            panic!("expected line");
        };
        assert_eq!(
            series.points,
            vec![[0.0, 10.0], [1.0, 20.0], [2.0, 20.0], [3.0, 30.0]]
        );

        let fig = build_chart(Some(&ds), &request(&ds, "city", ChartKind::ScatterPlot)).unwrap();
        let ChartBody::Scatter(series) = &fig.body else {
            panic!("expected scatter");
        };
        assert_eq!(
            series.points,
            vec![[0.0, 0.0], [1.0, 1.0], [2.0, 0.0], [3.0, 2.0]]
        );
        assert_eq!(series.category_label(2.0), Some("Lima"));
        assert_eq!(series.category_label(0.5), None);
    }

    #[test]
    fn render_replaces_previous_artifact() {
        let ds = ages();
        let mut region = DisplayRegion::new("chart");
        render(Some(&ds), &request(&ds, "age", ChartKind::BarChart), &mut region).unwrap();
        let first = region.current_id().unwrap();
        render(Some(&ds), &request(&ds, "age", ChartKind::LinePlot), &mut region).unwrap();

        assert!(region.current_id().unwrap() > first);
        let Some(Artifact::Chart(fig)) = region.current() else {
            panic!("expected chart");
        };
        assert_eq!(fig.kind, ChartKind::LinePlot);
    }

    #[test]
    fn render_without_dataset_fails_and_installs_nothing() {
        let ds = ages();
        let req = request(&ds, "age", ChartKind::BarChart);
        let mut region = DisplayRegion::new("chart");
        let err = render(None, &req, &mut region).unwrap_err();
        assert!(matches!(err, ChartError::NoData));
        assert!(region.is_empty());
    }

    #[test]
    fn stale_column_fails_and_keeps_previous() {
        let ds = ages();
        let req = request(&ds, "age", ChartKind::BarChart);
        let mut region = DisplayRegion::new("chart");
        render(Some(&ds), &req, &mut region).unwrap();
        let before = region.current_id();

        let reloaded = dataset(vec![Column::new("height".into(), vec![1.0f64, 2.0])]);
        let err = render(Some(&reloaded), &req, &mut region).unwrap_err();
        assert!(matches!(err, ChartError::MissingColumn(c) if c == "age"));
        assert_eq!(region.current_id(), before);
    }

    #[test]
    fn empty_dataset_renders_empty_charts() {
        let ds = dataset(vec![Column::new("age".into(), Vec::<f64>::new())]);
        for kind in ChartKind::ALL {
            let fig = build_chart(Some(&ds), &request(&ds, "age", kind)).unwrap();
            match fig.body {
                ChartBody::Histogram(h) => assert_eq!(h.total(), 0),
                ChartBody::Bars(bars) => assert!(bars.is_empty()),
                ChartBody::Line(s) | ChartBody::Scatter(s) => assert!(s.points.is_empty()),
            }
        }
    }

    #[test]
    fn correlation_needs_data_and_numeric_columns() {
        assert!(matches!(
            analyze(Analysis::Correlation, None),
            Err(ChartError::NoData)
        ));
        let text_only = dataset(vec![Column::new("name".into(), vec!["a", "b"])]);
        assert!(matches!(
            analyze(Analysis::Correlation, Some(&text_only)),
            Err(ChartError::InvalidParameter(_))
        ));

        let ds = dataset(vec![
            Column::new("x".into(), vec![1.0f64, 2.0, 3.0]),
            Column::new("y".into(), vec![2.0f64, 4.0, 6.0]),
        ]);
        let Ok(Artifact::Correlation(m)) = analyze(Analysis::Correlation, Some(&ds)) else {
            panic!("expected correlation matrix");
        };
        assert_eq!(
            crate::stats::CorrelationMatrix::format_value(m.get("x", "y").unwrap()),
            "1.00"
        );
    }

    #[test]
    fn summary_needs_data() {
        assert!(matches!(analyze(Analysis::Summary, None), Err(ChartError::NoData)));
        let ds = ages();
        let Ok(Artifact::Summary(table)) = analyze(Analysis::Summary, Some(&ds)) else {
            panic!("expected summary");
        };
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.get("age").unwrap().count, 4);
    }

    #[test]
    fn complexity_demos_run_without_data() {
        let mut region = DisplayRegion::new("analysis");
        let artifact = run_analysis(Analysis::SpaceComplexity, None, &mut region).unwrap();
        let Artifact::Complexity(plot) = artifact else {
            panic!("expected complexity plot");
        };
        assert_eq!(plot.y_label, "Space (bytes)");
        assert_eq!(plot.points.last(), Some(&[10000.0, 40000.0]));

        run_analysis(Analysis::TimeComplexity, None, &mut region).unwrap();
        assert_eq!(region.current().map(|a| a.title()), Some("Time Complexity"));
    }
}
