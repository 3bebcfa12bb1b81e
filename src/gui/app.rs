//! Data Visualizer Main Application
//! Main window with the loading, visualization and analysis tabs.

use crate::charts::{
    render, run_analysis, Analysis, ChartRequest, DisplayRegion, StaticChartRenderer,
};
use crate::config::AppConfig;
use crate::data::{DataLoader, SPREADSHEET_EXTENSIONS};
use crate::gui::{
    AnalysisAction, AnalysisPanel, ChartViewer, ControlPanel, ControlPanelAction, MessageDialog,
};
use egui::{Color32, RichText, SidePanel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Load,
    Visualize,
    Analyze,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Load, Tab::Visualize, Tab::Analyze];

    fn label(self) -> &'static str {
        match self {
            Tab::Load => "Data Loading",
            Tab::Visualize => "Data Visualization",
            Tab::Analyze => "Data Analysis",
        }
    }
}

/// Main application window.
pub struct DataVisualizerApp {
    config: AppConfig,
    loader: DataLoader,
    tab: Tab,
    control_panel: ControlPanel,
    chart_region: DisplayRegion,
    analysis_region: DisplayRegion,
    dialog: Option<MessageDialog>,
    status: String,
}

impl DataVisualizerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        Self {
            control_panel: ControlPanel::new(&config),
            config,
            loader: DataLoader::new(),
            tab: Tab::Load,
            chart_region: DisplayRegion::new("chart"),
            analysis_region: DisplayRegion::new("analysis"),
            dialog: None,
            status: "Ready".to_string(),
        }
    }

    fn handle_load(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Spreadsheet files", &SPREADSHEET_EXTENSIONS)
            .pick_file()
        else {
            return;
        };

        match self.loader.load_file(&path) {
            Ok(dataset) => {
                self.status = format!(
                    "Loaded {} rows, {} columns",
                    dataset.row_count(),
                    dataset.column_count()
                );
                self.control_panel.update_columns(dataset.column_names());
                self.chart_region.clear();
                self.dialog = Some(MessageDialog::info(
                    "Success",
                    "File loaded successfully! Please go to the Data Visualization tab.",
                ));
            }
            Err(e) => {
                log::error!("Loading {} failed: {e:#}", path.display());
                self.status = "Load failed".to_string();
                self.dialog = Some(MessageDialog::error("Error", e.to_string()));
            }
        }
    }

    fn handle_plot(&mut self) {
        let dataset = self.loader.dataset();
        let result = ChartRequest::new(dataset, &self.control_panel.settings)
            .and_then(|request| render(dataset, &request, &mut self.chart_region).map(|_| ()));

        match result {
            Ok(()) => self.status = "Chart updated".to_string(),
            Err(e) => {
                log::warn!("Plot rejected: {e}");
                self.dialog = Some(MessageDialog::error("Error", e.to_string()));
            }
        }
    }

    fn handle_analysis(&mut self, analysis: Analysis) {
        let result = run_analysis(analysis, self.loader.dataset(), &mut self.analysis_region)
            .map(|artifact| artifact.title().to_string());

        match result {
            Ok(title) => self.status = format!("{title} ready"),
            Err(e) => {
                log::warn!("{} rejected: {e}", analysis.label());
                self.dialog = Some(MessageDialog::error("Error", e.to_string()));
            }
        }
    }

    fn handle_export(&mut self, tab: Tab) {
        let region = match tab {
            Tab::Analyze => &self.analysis_region,
            _ => &self.chart_region,
        };
        let Some(artifact) = region.current() else {
            self.status = "Nothing to export".to_string();
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name(format!("{}.png", artifact.slug()))
            .save_file()
        else {
            return;
        };

        match StaticChartRenderer::save_png(
            artifact,
            &path,
            self.config.export_width,
            self.config.export_height,
        ) {
            Ok(()) => {
                self.status = format!("Exported {}", path.display());
                if self.config.open_after_export {
                    if let Err(e) = open::that(&path) {
                        log::warn!("Could not open {}: {e}", path.display());
                    }
                }
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.dialog = Some(MessageDialog::error("Export failed", format!("{e:#}")));
            }
        }
    }

    fn show_load_tab(&mut self, ctx: &egui::Context, blocked: bool) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if blocked {
                ui.disable();
            }

            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.label(
                    RichText::new("📊 Excel Data Visualizer")
                        .size(26.0)
                        .color(Color32::from_rgb(100, 149, 237)),
                );
                ui.add_space(10.0);
                ui.label("Load a spreadsheet, then explore it in the other tabs.");
                ui.add_space(15.0);

                let button = egui::Button::new(RichText::new("📂 Load Excel File").size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() {
                    self.handle_load();
                }
            });

            ui.add_space(20.0);
            ui.separator();
            ui.add_space(10.0);

            let Some(dataset) = self.loader.dataset() else {
                ui.label(RichText::new("No file loaded").color(Color32::GRAY));
                return;
            };

            if let Some(source) = dataset.source() {
                ui.label(RichText::new(source.display().to_string()).size(12.0));
            }
            ui.label(format!(
                "{} rows, {} columns",
                dataset.row_count(),
                dataset.column_count()
            ));
            ui.add_space(8.0);

            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("schema_grid")
                    .striped(true)
                    .num_columns(2)
                    .show(ui, |ui| {
                        ui.label(RichText::new("Column").strong());
                        ui.label(RichText::new("Type").strong());
                        ui.end_row();
                        for info in dataset.schema() {
                            ui.label(&info.name);
                            ui.label(info.kind.to_string());
                            ui.end_row();
                        }
                    });
            });
        });
    }

    fn show_visualize_tab(&mut self, ctx: &egui::Context, blocked: bool) {
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                if blocked {
                    ui.disable();
                }
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let has_chart = !self.chart_region.is_empty();
                    match self.control_panel.show(ui, has_chart) {
                        ControlPanelAction::Plot => self.handle_plot(),
                        ControlPanelAction::Reset => {
                            self.chart_region.clear();
                        }
                        ControlPanelAction::Export => self.handle_export(Tab::Visualize),
                        ControlPanelAction::None => {}
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if blocked {
                ui.disable();
            }
            let placeholder = if self.loader.dataset().is_some() {
                ""
            } else {
                "Load a file first"
            };
            ChartViewer::show(ui, &self.chart_region, placeholder);
        });
    }

    fn show_analyze_tab(&mut self, ctx: &egui::Context, blocked: bool) {
        SidePanel::left("analysis_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                if blocked {
                    ui.disable();
                }
                ui.add_space(10.0);
                match AnalysisPanel::show(ui, !self.analysis_region.is_empty()) {
                    AnalysisAction::Run(analysis) => self.handle_analysis(analysis),
                    AnalysisAction::Reset => {
                        self.analysis_region.clear();
                    }
                    AnalysisAction::Export => self.handle_export(Tab::Analyze),
                    AnalysisAction::None => {}
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if blocked {
                ui.disable();
            }
            ChartViewer::show(
                ui,
                &self.analysis_region,
                "Select an analysis to display results.",
            );
        });
    }
}

impl eframe::App for DataVisualizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let blocked = self.dialog.is_some();

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            if blocked {
                ui.disable();
            }
            ui.horizontal(|ui| {
                for tab in Tab::ALL {
                    ui.selectable_value(&mut self.tab, tab, RichText::new(tab.label()).size(14.0));
                }
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(RichText::new(&self.status).size(11.0).color(Color32::GRAY));
        });

        match self.tab {
            Tab::Load => self.show_load_tab(ctx, blocked),
            Tab::Visualize => self.show_visualize_tab(ctx, blocked),
            Tab::Analyze => self.show_analyze_tab(ctx, blocked),
        }

        if let Some(dialog) = &self.dialog {
            if dialog.show(ctx) {
                self.dialog = None;
            }
        }
    }
}
