use super::KitshelfApp;
use super::notice::render_notice;
use super::style;
use crate::dialogs::ExportDialog;
use eframe::egui::{self, Align2, RichText};

#[derive(Default)]
struct ExportActions {
    browse: bool,
    export: bool,
    close: bool,
}

impl KitshelfApp {
    pub(super) fn render_export_window(&mut self, ctx: &egui::Context) {
        let busy = self.controller.export_pending();
        let Some(dialog) = self.controller.export_dialog.as_mut() else {
            return;
        };
        if let Some(notice) = dialog.notice() {
            if render_notice(ctx, "Export drumkit", notice) {
                dialog.dismiss_notice();
            }
        }
        let mut open = true;
        let mut actions = ExportActions::default();
        egui::Window::new("Export sound library")
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .collapsible(false)
            .resizable(false)
            .auto_sized()
            .open(&mut open)
            .show(ctx, |ui| render_export_body(ui, dialog, busy, &mut actions));
        if actions.browse {
            self.controller.browse_export_destination();
        }
        if actions.export {
            self.controller.request_export();
        }
        if actions.close || (!open && !busy) {
            self.controller.close_export_dialog();
        }
    }
}

fn render_export_body(
    ui: &mut egui::Ui,
    dialog: &mut ExportDialog,
    busy: bool,
    actions: &mut ExportActions,
) {
    let palette = style::palette();
    ui.set_min_width(380.0);
    let selected_text = dialog
        .selected()
        .map(|entry| entry.kit.name.clone())
        .unwrap_or_default();
    let mut picked = None;
    ui.horizontal(|ui| {
        ui.label("Drumkit");
        egui::ComboBox::from_id_salt("export_kit")
            .selected_text(selected_text)
            .width(260.0)
            .show_ui(ui, |ui| {
                let current = dialog.selected_index();
                for (index, entry) in dialog.kits().iter().enumerate() {
                    let label = format!("{} ({})", entry.kit.name, entry.origin.label());
                    if ui.selectable_label(current == Some(index), label).clicked() {
                        picked = Some(index);
                    }
                }
            });
    });
    if let Some(index) = picked {
        dialog.select(index);
    }
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label("Directory");
        ui.add(egui::TextEdit::singleline(&mut dialog.destination).desired_width(240.0));
        if ui.add_enabled(!busy, egui::Button::new("Browse…")).clicked() {
            actions.browse = true;
        }
    });
    if dialog.kits().is_empty() {
        ui.label(RichText::new("No drumkits available").color(palette.text_muted));
    }
    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if ui.add_enabled(!busy, egui::Button::new("Cancel")).clicked() {
            actions.close = true;
        }
        if ui
            .add_enabled(dialog.can_export() && !busy, egui::Button::new("Export"))
            .clicked()
        {
            actions.export = true;
        }
    });
}
