use super::KitshelfApp;
use super::style;
use crate::drumkit::KitOrigin;
use eframe::egui::{self, RichText, Ui};

enum RowAction {
    Select(usize),
    Load(usize),
    Toggle(String),
}

impl KitshelfApp {
    pub(super) fn render_browser_panel(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        let mut action = None;
        egui::ScrollArea::vertical()
            .id_salt("kit_browser_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if self.controller.browser.entries().is_empty() {
                    ui.label(RichText::new("No drumkits found").color(palette.text_muted));
                    return;
                }
                for origin in [KitOrigin::System, KitOrigin::User] {
                    ui.add_space(4.0);
                    ui.label(RichText::new(origin.label()).color(palette.heading).strong());
                    ui.separator();
                    self.render_origin_rows(ui, origin, &mut action);
                }
            });
        match action {
            Some(RowAction::Select(index)) => {
                self.controller.browser.select(index);
            }
            Some(RowAction::Load(index)) => {
                self.controller.browser.select(index);
                self.controller.load_selected_kit();
            }
            Some(RowAction::Toggle(name)) => self.controller.browser.toggle_expanded(&name),
            None => {}
        }
    }

    fn render_origin_rows(&self, ui: &mut Ui, origin: KitOrigin, action: &mut Option<RowAction>) {
        let palette = style::palette();
        let browser = &self.controller.browser;
        let selected = browser.selected_index();
        for (index, entry) in browser.entries().iter().enumerate() {
            if entry.origin != origin {
                continue;
            }
            let name = &entry.kit.name;
            let expanded = browser.is_expanded(name);
            let loaded = self.controller.session.is_active(name);
            ui.push_id(index, |ui| {
                ui.horizontal(|ui| {
                    let arrow = if expanded { "▾" } else { "▸" };
                    if ui.small_button(arrow).clicked() {
                        *action = Some(RowAction::Toggle(name.clone()));
                    }
                    let mut text = RichText::new(name);
                    if loaded {
                        text = text.strong().color(palette.loaded);
                    }
                    let response = ui.selectable_label(selected == Some(index), text);
                    if response.double_clicked() {
                        *action = Some(RowAction::Load(index));
                    } else if response.clicked() {
                        *action = Some(RowAction::Select(index));
                    }
                    if !entry.kit.author.is_empty() {
                        ui.label(
                            RichText::new(format!("by {}", entry.kit.author))
                                .color(palette.text_muted),
                        );
                    }
                });
                if expanded {
                    ui.indent("instruments", |ui| {
                        if entry.kit.instruments.is_empty() {
                            ui.label(RichText::new("No instruments").color(palette.text_muted));
                        }
                        for instrument in &entry.kit.instruments {
                            ui.label(format!("{:>3}  {}", instrument.id, instrument.name));
                        }
                    });
                }
            });
        }
    }
}
