use eframe::egui;

use crate::model::theme::Theme;
use crate::ui::commands::AppCommand;

pub const HEADER_PANEL_ID: &str = "header";

/// Full-width title bar; draw before any side panel.
pub fn draw_header(ctx: &egui::Context, theme: Theme, commands: &mut Vec<AppCommand>) {
    egui::TopBottomPanel::top(HEADER_PANEL_ID).show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("StoryCrafter");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let label = if theme.is_dark() { "☀ Light" } else { "🌙 Dark" };
                if ui.button(label).clicked() {
                    commands.push(AppCommand::ToggleTheme);
                }
            });
        });
    });
}

pub fn draw_input_panel(ctx: &egui::Context, input: &mut String, commands: &mut Vec<AppCommand>) {
    let input_id = egui::Id::new("word_input");

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_space(12.0);
        ui.label("Enter a few words and let the story unfold.");
        ui.add_space(6.0);

        let mut generate = false;

        ui.horizontal(|ui| {
            let response = ui.add_sized(
                [(ui.available_width() - 200.0).max(120.0), 28.0],
                egui::TextEdit::singleline(input)
                    .id(input_id)
                    .hint_text("e.g. moon, river, whisper"),
            );

            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                generate = true;
            }

            if ui.button("✨ Generate").clicked() {
                generate = true;
            }

            if ui.button("🎲 Surprise me").clicked() {
                commands.push(AppCommand::SurpriseMe);
            }
        });

        if generate {
            commands.push(AppCommand::Generate);
            ui.memory_mut(|m| m.request_focus(input_id));
        }
    });
}
