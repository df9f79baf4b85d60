use super::KitshelfApp;
use super::notice::{render_confirm, render_notice};
use super::style;
use crate::dialogs::PropertiesDialog;
use crate::dialogs::properties::RENAME_WARNING;
use crate::drumkit::KitFields;
use eframe::egui::{self, Align2, RichText};

impl KitshelfApp {
    pub(super) fn render_properties_window(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.controller.properties_dialog.as_mut() else {
            return;
        };
        if let Some(notice) = dialog.notice() {
            if render_notice(ctx, "Drumkit properties", notice) {
                dialog.dismiss_notice();
            }
        }
        if dialog.awaiting_rename_confirmation() {
            if let Some(accepted) = render_confirm(ctx, "Rename drumkit", RENAME_WARNING) {
                self.controller.confirm_rename(accepted);
            }
            return;
        }
        let mut open = true;
        let mut save = false;
        let mut close = false;
        egui::Window::new("Sound library properties")
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .collapsible(false)
            .resizable(false)
            .auto_sized()
            .open(&mut open)
            .show(ctx, |ui| {
                render_properties_body(ui, dialog, &mut save, &mut close);
            });
        if save {
            self.controller.save_properties();
        } else if close || !open {
            self.controller.close_properties_dialog();
        }
    }
}

fn render_properties_body(
    ui: &mut egui::Ui,
    dialog: &mut PropertiesDialog,
    save: &mut bool,
    close: &mut bool,
) {
    let palette = style::palette();
    ui.set_min_width(420.0);
    ui.label(
        RichText::new(dialog.kit().path.display().to_string()).color(palette.text_muted),
    );
    ui.add_space(6.0);
    render_kit_fields(ui, "properties_fields", &mut dialog.fields);
    ui.add_space(6.0);
    ui.checkbox(
        &mut dialog.save_into_active,
        "Save instrument changes into the loaded kit",
    );
    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if ui.button("Cancel").clicked() {
            *close = true;
        }
        if ui.button("Save").clicked() {
            *save = true;
        }
    });
}

/// Name/author/info/license form shared with the save dialog.
pub(super) fn render_kit_fields(ui: &mut egui::Ui, id: &str, fields: &mut KitFields) {
    egui::Grid::new(id)
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            ui.label("Name");
            ui.text_edit_singleline(&mut fields.name);
            ui.end_row();
            ui.label("Author");
            ui.text_edit_singleline(&mut fields.author);
            ui.end_row();
            ui.label("Info");
            ui.add(egui::TextEdit::multiline(&mut fields.info).desired_rows(4));
            ui.end_row();
            ui.label("License");
            ui.text_edit_singleline(&mut fields.license);
            ui.end_row();
        });
}
