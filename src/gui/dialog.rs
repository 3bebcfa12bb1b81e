//! Message Dialog
//! Modal notification shown over the whole window.

use egui::{Color32, RichText};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Info,
    Error,
}

/// A blocking message with a single OK button.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

impl MessageDialog {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Draw the dialog. Returns true once it has been dismissed.
    pub fn show(&self, ctx: &egui::Context) -> bool {
        let mut dismissed = false;
        let accent = match self.kind {
            DialogKind::Info => Color32::from_rgb(40, 167, 69),
            DialogKind::Error => Color32::from_rgb(220, 53, 69),
        };

        egui::Window::new(RichText::new(&self.title).color(accent).strong())
            .id(egui::Id::new("message_dialog"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(280.0);
                ui.add_space(6.0);
                ui.label(&self.message);
                ui.add_space(10.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        dismissed || ctx.input(|i| i.key_pressed(egui::Key::Enter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind() {
        let info = MessageDialog::info("Success", "File loaded");
        assert_eq!(info.kind, DialogKind::Info);
        assert_eq!(info.message, "File loaded");

        let err = MessageDialog::error("Error", "Please load data first.");
        assert_eq!(err.kind, DialogKind::Error);
        assert_eq!(err.title, "Error");
    }
}
