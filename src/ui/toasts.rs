use eframe::egui;

use crate::model::notification::{NotificationKind, Notifications};

pub fn draw_toasts(ctx: &egui::Context, notifications: &Notifications) {
    if notifications.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
        .order(egui::Order::Tooltip)
        .show(ctx, |ui| {
            for note in notifications.iter() {
                let fill = match note.kind {
                    NotificationKind::Info => egui::Color32::from_rgb(40, 90, 60),
                    NotificationKind::Warning => egui::Color32::from_rgb(140, 80, 30),
                };

                egui::Frame::new()
                    .fill(fill)
                    .corner_radius(egui::CornerRadius::same(8))
                    .inner_margin(egui::Margin::symmetric(10, 6))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(&note.text).color(egui::Color32::WHITE));
                    });
                ui.add_space(4.0);
            }
        });
}
