use super::KitshelfApp;
use super::notice::render_notice;
use super::properties_window::render_kit_fields;
use eframe::egui::{self, Align2};

impl KitshelfApp {
    pub(super) fn render_save_window(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.controller.save_dialog.as_mut() else {
            return;
        };
        if let Some(notice) = dialog.notice() {
            if render_notice(ctx, "Save drumkit", notice) {
                dialog.dismiss_notice();
            }
        }
        let mut open = true;
        let mut save = false;
        let mut close = false;
        egui::Window::new("Save sound library")
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .collapsible(false)
            .resizable(false)
            .auto_sized()
            .open(&mut open)
            .show(ctx, |ui| {
                ui.set_min_width(420.0);
                render_kit_fields(ui, "save_fields", &mut dialog.fields);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        close = true;
                    }
                    if ui.button("Save").clicked() {
                        save = true;
                    }
                });
            });
        if save {
            self.controller.save_as();
        } else if close || !open {
            self.controller.close_save_dialog();
        }
    }
}
