use super::style;
use crate::dialogs::Notice;
use eframe::egui::{self, Align2, RichText};

/// Show `notice` as a centered modal window. Returns true once dismissed.
pub(super) fn render_notice(ctx: &egui::Context, title: &str, notice: &Notice) -> bool {
    let mut open = true;
    let mut dismissed = false;
    egui::Window::new(title)
        .id(egui::Id::new(("notice", title)))
        .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .order(egui::Order::Foreground)
        .collapsible(false)
        .resizable(false)
        .auto_sized()
        .open(&mut open)
        .show(ctx, |ui| {
            ui.set_min_width(280.0);
            for line in notice.message.lines() {
                ui.label(RichText::new(line).color(style::notice_color(notice.tone)));
            }
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    dismissed || !open
}

/// Yes/No prompt. `Some(answer)` once the user picks one.
pub(super) fn render_confirm(ctx: &egui::Context, title: &str, message: &str) -> Option<bool> {
    let mut answer = None;
    egui::Window::new(title)
        .id(egui::Id::new(("confirm", title)))
        .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .order(egui::Order::Foreground)
        .collapsible(false)
        .resizable(false)
        .auto_sized()
        .show(ctx, |ui| {
            ui.set_min_width(320.0);
            for line in message.lines() {
                ui.label(line);
            }
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("No").clicked() {
                    answer = Some(false);
                }
                if ui.button("Yes").clicked() {
                    answer = Some(true);
                }
            });
        });
    answer
}
