//! Chart Viewer Widget
//! Draws the occupant of a display region inside a bordered card.

use crate::charts::{ChartPlotter, DisplayRegion};
use egui::{Color32, RichText, ScrollArea};

pub struct ChartViewer;

impl ChartViewer {
    /// Draw the region, or `placeholder` when it is empty.
    pub fn show(ui: &mut egui::Ui, region: &DisplayRegion, placeholder: &str) {
        let Some(artifact) = region.current() else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new(placeholder).size(18.0).color(Color32::GRAY));
            });
            return;
        };

        // id changes with every install so plot zoom/pan starts fresh
        let id = format!("{}_{}", region.name(), region.current_id().unwrap_or_default());

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Frame::none()
                    .rounding(8.0)
                    .stroke(egui::Stroke::new(1.0, Color32::from_rgb(100, 149, 237)))
                    .fill(ui.visuals().widgets.noninteractive.bg_fill)
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ChartPlotter::draw_artifact(ui, artifact, &id);
                    });
            });
    }
}
