use eframe::egui;

use crate::{
    controller::{health::Connectivity, notifier::NotificationKind},
    preferences::ThemePreference,
};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(79, 70, 229);

pub fn visuals_for_theme(theme: ThemePreference) -> egui::Visuals {
    let mut visuals = match theme {
        ThemePreference::Light => {
            let mut v = egui::Visuals::light();
            v.panel_fill = egui::Color32::from_rgb(248, 250, 252);
            v.window_fill = egui::Color32::WHITE;
            v.faint_bg_color = egui::Color32::from_rgb(241, 245, 249);
            v
        }
        ThemePreference::Dark => {
            let mut v = egui::Visuals::dark();
            v.override_text_color = Some(egui::Color32::from_rgb(226, 232, 240));
            v.panel_fill = egui::Color32::from_rgb(15, 23, 42);
            v.window_fill = egui::Color32::from_rgb(30, 41, 59);
            v.extreme_bg_color = egui::Color32::from_rgb(2, 6, 23);
            v.faint_bg_color = egui::Color32::from_rgb(30, 41, 59);
            v
        }
    };

    visuals.hyperlink_color = ACCENT;
    visuals.selection.bg_fill = ACCENT;
    visuals.widgets.active.bg_fill = ACCENT;
    visuals.widgets.hovered.bg_fill = ACCENT.gamma_multiply(0.85);

    let radius = egui::CornerRadius::same(6);
    visuals.widgets.noninteractive.corner_radius = radius;
    visuals.widgets.inactive.corner_radius = radius;
    visuals.widgets.hovered.corner_radius = radius;
    visuals.widgets.active.corner_radius = radius;
    visuals.widgets.open.corner_radius = radius;

    visuals
}

pub fn connectivity_color(indicator: Connectivity) -> egui::Color32 {
    match indicator {
        Connectivity::Online => egui::Color32::from_rgb(34, 197, 94),
        Connectivity::Error => egui::Color32::from_rgb(245, 158, 11),
        Connectivity::Offline => egui::Color32::from_rgb(239, 68, 68),
        Connectivity::Checking => egui::Color32::from_rgb(148, 163, 184),
    }
}

/// Badge color for a row's `status-*` class. Unknown statuses stay neutral.
pub fn status_color(status_class: &str) -> egui::Color32 {
    match status_class.strip_prefix("status-").unwrap_or(status_class) {
        "sent" => egui::Color32::from_rgb(59, 130, 246),
        "replied" | "completed" => egui::Color32::from_rgb(34, 197, 94),
        "needs_review" | "needs_manual_check" => egui::Color32::from_rgb(245, 158, 11),
        "failed" | "error" => egui::Color32::from_rgb(239, 68, 68),
        _ => egui::Color32::from_rgb(148, 163, 184),
    }
}

pub fn notification_colors(kind: NotificationKind) -> (egui::Color32, egui::Stroke) {
    match kind {
        NotificationKind::Success => (
            egui::Color32::from_rgb(22, 101, 52),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(74, 222, 128)),
        ),
        NotificationKind::Error => (
            egui::Color32::from_rgb(127, 29, 29),
            egui::Stroke::new(1.0, egui::Color32::from_rgb(248, 113, 113)),
        ),
    }
}
