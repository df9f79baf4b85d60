use eframe::egui::{Color32, Stroke, Visuals, epaint::CornerRadius};

use crate::controller::StatusTone;
use crate::dialogs::NoticeTone;

/// Warm charcoal with a brass accent for the shelf.
#[derive(Clone, Copy)]
pub struct Palette {
    pub panel: Color32,
    pub window: Color32,
    pub toolbar: Color32,
    pub outline: Color32,
    pub text: Color32,
    pub text_muted: Color32,
    /// Origin headers ("System", "User").
    pub heading: Color32,
    /// Name of the loaded kit.
    pub loaded: Color32,
    pub error: Color32,
}

pub fn palette() -> Palette {
    Palette {
        panel: Color32::from_rgb(30, 27, 24),
        window: Color32::from_rgb(22, 20, 18),
        toolbar: Color32::from_rgb(48, 41, 34),
        outline: Color32::from_rgb(70, 60, 48),
        text: Color32::from_rgb(222, 212, 196),
        text_muted: Color32::from_rgb(150, 138, 120),
        heading: Color32::from_rgb(214, 168, 92),
        loaded: Color32::from_rgb(150, 196, 120),
        error: Color32::from_rgb(222, 104, 84),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.panel_fill = palette.panel;
    visuals.window_fill = palette.window;
    visuals.extreme_bg_color = palette.window;
    visuals.override_text_color = Some(palette.text);
    visuals.error_fg_color = palette.error;
    visuals.warn_fg_color = palette.heading;
    visuals.selection.bg_fill = palette.toolbar;
    visuals.selection.stroke = Stroke::new(1.0, palette.heading);
    visuals.window_stroke = Stroke::new(1.0, palette.outline);
    visuals.window_corner_radius = CornerRadius::same(4);
    for widget in [
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        widget.bg_stroke = Stroke::new(1.0, palette.outline);
    }
}

/// Badge label and color for the footer.
pub fn status_badge(tone: StatusTone) -> (&'static str, Color32) {
    let palette = palette();
    match tone {
        StatusTone::Idle => ("Idle", palette.outline),
        StatusTone::Busy => ("Exporting", palette.heading),
        StatusTone::Info => ("Ready", palette.loaded),
        StatusTone::Warning => ("Check", Color32::from_rgb(230, 150, 60)),
        StatusTone::Error => ("Error", palette.error),
    }
}

pub fn notice_color(tone: NoticeTone) -> Color32 {
    let palette = palette();
    match tone {
        NoticeTone::Info => palette.text,
        NoticeTone::Error => palette.error,
    }
}
