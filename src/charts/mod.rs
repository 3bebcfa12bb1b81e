//! Charts module - Chart requests, rendering and display regions

mod figure;
mod pipeline;
mod plotter;
mod region;
mod renderer;
mod request;

pub use figure::{Artifact, ChartBody, ChartFigure, ComplexityPlot, IndexSeries, ValueAxis};
pub use pipeline::{render, run_analysis, Analysis};
pub use plotter::ChartPlotter;
pub use region::DisplayRegion;
pub use renderer::StaticChartRenderer;
pub use request::{ChartError, ChartKind, ChartRequest, ChartSettings};
