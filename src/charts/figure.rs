//! Figure Module
//! Computed, toolkit-independent contents of every displayable artifact.

use crate::charts::ChartKind;
use crate::color::ChartColor;
use crate::stats::{CorrelationMatrix, Histogram, SummaryTable};

/// How the value axis of a line or scatter plot is labeled.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueAxis {
    Continuous,
    /// Text values plotted as codes; code `i` is `labels[i]`.
    Categories(Vec<String>),
}

/// Column values against the row index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSeries {
    pub points: Vec<[f64; 2]>,
    pub axis: ValueAxis,
}

impl IndexSeries {
    /// `(min, max)` over x and y, `None` when there are no points.
    pub fn bounds(&self) -> Option<([f64; 2], [f64; 2])> {
        let first = self.points.first()?;
        Some(self.points.iter().fold(
            ([first[0], first[0]], [first[1], first[1]]),
            |(x, y), p| ([x[0].min(p[0]), x[1].max(p[0])], [y[0].min(p[1]), y[1].max(p[1])]),
        ))
    }

    pub fn category_label(&self, value: f64) -> Option<&str> {
        let ValueAxis::Categories(labels) = &self.axis else {
            return None;
        };
        let rounded = value.round();
        if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
            return None;
        }
        labels.get(rounded as usize).map(|s| s.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    Histogram(Histogram),
    /// `(value, count)` pairs, most frequent first.
    Bars(Vec<(String, usize)>),
    Line(IndexSeries),
    Scatter(IndexSeries),
}

/// A rendered column chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFigure {
    pub kind: ChartKind,
    pub column: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color: ChartColor,
    pub body: ChartBody,
}

/// Line-with-markers plot used by the complexity demos.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexityPlot {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color: ChartColor,
    pub points: Vec<[f64; 2]>,
}

/// Anything a display region can hold.
#[derive(Debug, Clone)]
pub enum Artifact {
    Chart(ChartFigure),
    Correlation(CorrelationMatrix),
    Summary(SummaryTable),
    Complexity(ComplexityPlot),
}

impl Artifact {
    pub fn title(&self) -> &str {
        match self {
            Artifact::Chart(fig) => &fig.title,
            Artifact::Correlation(_) => "Correlation Matrix",
            Artifact::Summary(_) => "Statistical Summary",
            Artifact::Complexity(plot) => &plot.title,
        }
    }

    /// Short name used in logs and default export file names.
    pub fn slug(&self) -> &'static str {
        match self {
            Artifact::Chart(_) => "chart",
            Artifact::Correlation(_) => "correlation_matrix",
            Artifact::Summary(_) => "statistical_summary",
            Artifact::Complexity(_) => "complexity",
        }
    }
}
