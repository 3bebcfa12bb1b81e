//! Analysis Panel Widget
//! Buttons of the analysis tab.

use crate::charts::Analysis;
use egui::RichText;

pub struct AnalysisPanel;

impl AnalysisPanel {
    pub fn show(ui: &mut egui::Ui, has_result: bool) -> AnalysisAction {
        let mut action = AnalysisAction::None;

        ui.label(RichText::new("🔬 Analysis").size(14.0).strong());
        ui.add_space(8.0);

        for analysis in Analysis::ALL {
            let button = egui::Button::new(analysis.label()).min_size(egui::vec2(220.0, 30.0));
            if ui.add(button).clicked() {
                action = AnalysisAction::Run(analysis);
            }
            ui.add_space(4.0);
        }

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        ui.add_enabled_ui(has_result, |ui| {
            ui.horizontal(|ui| {
                if ui.button("↺ Reset").clicked() {
                    action = AnalysisAction::Reset;
                }
                if ui.button("💾 Export PNG").clicked() {
                    action = AnalysisAction::Export;
                }
            });
        });

        action
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnalysisAction {
    None,
    Run(Analysis),
    Reset,
    Export,
}
