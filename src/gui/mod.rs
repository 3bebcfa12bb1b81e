//! GUI module - User interface components

mod analysis_panel;
mod app;
mod chart_viewer;
mod control_panel;
mod dialog;

pub use analysis_panel::{AnalysisAction, AnalysisPanel};
pub use app::DataVisualizerApp;
pub use chart_viewer::ChartViewer;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use dialog::MessageDialog;
