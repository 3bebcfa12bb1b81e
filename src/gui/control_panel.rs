//! Control Panel Widget
//! Left side panel of the visualization tab with the chart form.

use crate::charts::{ChartKind, ChartSettings};
use crate::color::ChartColor;
use crate::config::{AppConfig, MAX_BINS, MIN_BINS};
use egui::{Color32, ComboBox, RichText};

/// Chart form state. The settings are handed to the pipeline unvalidated.
pub struct ControlPanel {
    pub settings: ChartSettings,
    pub columns: Vec<String>,
    /// Color picker state, kept in sync with `settings.color`.
    picked: [u8; 3],
}

impl ControlPanel {
    pub fn new(config: &AppConfig) -> Self {
        let settings = ChartSettings::from_config(config);
        let picked = Self::parse_components(&settings.color).unwrap_or([135, 206, 235]);
        Self {
            settings,
            columns: Vec::new(),
            picked,
        }
    }

    /// Rebuild the column list after a load. The previous selection is dropped.
    pub fn update_columns(&mut self, columns: Vec<String>) {
        self.columns = columns;
        self.settings.column.clear();
    }

    fn parse_components(text: &str) -> Option<[u8; 3]> {
        text.parse::<ChartColor>().ok().map(|c| c.components())
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, has_chart: bool) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Chart Settings")
                    .size(18.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        let label_width = 90.0;
        let combo_width = 170.0;

        // ===== Column and kind =====
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Column:"));
            ComboBox::from_id_salt("chart_column")
                .width(combo_width)
                .selected_text(&self.settings.column)
                .show_ui(ui, |ui| {
                    for col in &self.columns {
                        ui.selectable_value(&mut self.settings.column, col.clone(), col);
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Chart Type:"));
            ComboBox::from_id_salt("chart_kind")
                .width(combo_width)
                .selected_text(self.settings.kind.label())
                .show_ui(ui, |ui| {
                    for kind in ChartKind::ALL {
                        ui.selectable_value(&mut self.settings.kind, kind, kind.label());
                    }
                });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Histogram options =====
        ui.label(RichText::new("⚙️ Options").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Bins:"));
            ui.add(egui::DragValue::new(&mut self.settings.bins).range(MIN_BINS..=MAX_BINS));
        });
        ui.checkbox(&mut self.settings.normalize, "Normalize");

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Color:"));
            if ui.color_edit_button_srgb(&mut self.picked).changed() {
                let [r, g, b] = self.picked;
                self.settings.color = ChartColor::rgb(r, g, b).to_hex();
            }
            let edit = ui.add(
                egui::TextEdit::singleline(&mut self.settings.color).desired_width(100.0),
            );
            if edit.changed() {
                if let Some(components) = Self::parse_components(&self.settings.color) {
                    self.picked = components;
                }
            }
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Title:"));
            ui.add(egui::TextEdit::singleline(&mut self.settings.title).desired_width(combo_width));
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            let plot_button = egui::Button::new(RichText::new("▶ Plot").size(16.0))
                .min_size(egui::vec2(200.0, 35.0));
            if ui.add(plot_button).clicked() {
                action = ControlPanelAction::Plot;
            }

            ui.add_space(8.0);

            ui.add_enabled_ui(has_chart, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("↺ Reset").clicked() {
                        action = ControlPanelAction::Reset;
                    }
                    if ui.button("💾 Export PNG").clicked() {
                        action = ControlPanelAction::Export;
                    }
                });
            });
        });

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Plot,
    Reset,
    Export,
}
