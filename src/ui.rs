//! egui renderer for the drumkit library.
mod browser_panel;
mod export_window;
mod notice;
mod properties_window;
mod save_window;
pub mod style;

use crate::controller::KitshelfController;
use eframe::egui::{self, Color32, Frame, RichText, Vec2};

/// Smallest window size that keeps the dialogs usable.
pub const MIN_VIEWPORT_SIZE: Vec2 = egui::vec2(640.0, 420.0);

/// Renders the egui UI using the shared controller state.
pub struct KitshelfApp {
    controller: KitshelfController,
    visuals_set: bool,
}

impl KitshelfApp {
    /// Create the app, loading persisted configuration.
    pub fn new() -> Result<Self, String> {
        let controller = KitshelfController::load()
            .map_err(|err| format!("Failed to load config: {err}"))?;
        Ok(Self::with_controller(controller))
    }

    pub fn with_controller(controller: KitshelfController) -> Self {
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let locked = self.controller.rename_pending() || self.controller.export_pending();
        let has_selection = self.controller.browser.selected().is_some();
        egui::TopBottomPanel::top("top_bar")
            .frame(Frame::new().fill(style::palette().toolbar).inner_margin(6.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Sound Library").color(Color32::WHITE));
                    ui.add_space(8.0);
                    ui.separator();
                    if ui.add_enabled(!locked, egui::Button::new("Refresh")).clicked() {
                        self.controller.refresh_browser();
                    }
                    if ui
                        .add_enabled(has_selection && !locked, egui::Button::new("Load"))
                        .clicked()
                    {
                        self.controller.load_selected_kit();
                    }
                    if ui
                        .add_enabled(has_selection && !locked, egui::Button::new("Properties…"))
                        .clicked()
                    {
                        self.controller.open_properties_dialog();
                    }
                    if ui.add_enabled(!locked, egui::Button::new("Export…")).clicked() {
                        self.controller.open_export_dialog();
                    }
                    if ui.add_enabled(!locked, egui::Button::new("Save as…")).clicked() {
                        self.controller.open_save_dialog();
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Close").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::new().fill(Color32::from_rgb(0, 0, 0)))
            .show(ctx, |ui| {
                let status = &self.controller.status;
                let (badge_label, badge_color) = style::status_badge(status.tone);
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.painter().circle_filled(
                        ui.cursor().min + egui::vec2(9.0, 11.0),
                        9.0,
                        badge_color,
                    );
                    ui.add_space(22.0);
                    ui.label(RichText::new(badge_label).color(Color32::WHITE));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(Color32::WHITE));
                    if let Some(name) = self.controller.session.active_kit_name() {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                RichText::new(format!("Loaded: {name}"))
                                    .color(style::palette().text_muted),
                            );
                        });
                    }
                });
            });
    }
}

impl eframe::App for KitshelfApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.run_due_export();
        self.render_top_bar(ctx);
        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_browser_panel(ui);
        });
        self.render_export_window(ctx);
        self.render_properties_window(ctx);
        self.render_save_window(ctx);
        self.controller.end_frame();
        if self.controller.export_pending() {
            ctx.set_cursor_icon(egui::CursorIcon::Progress);
            ctx.request_repaint();
        }
    }
}
