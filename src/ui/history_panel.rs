use eframe::egui;

use crate::model::history::HistoryLog;
use crate::ui::commands::AppCommand;

const PREVIEW_CHARS: usize = 90;

pub fn draw_history_panel(ctx: &egui::Context, log: &HistoryLog, commands: &mut Vec<AppCommand>) {
    egui::SidePanel::right("history")
        .resizable(true)
        .default_width(300.0)
        .min_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Recent stories");
            ui.separator();

            if log.is_empty() {
                ui.label("Your generated stories will appear here.");
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                for (i, entry) in log.entries().iter().enumerate() {
                    let card = egui::Frame::group(ui.style())
                        .inner_margin(egui::Margin::symmetric(10, 8))
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.add(egui::Label::new(egui::RichText::new(&entry.words).strong()).truncate());
                            ui.add(egui::Label::new(egui::RichText::new(preview(&entry.story)).weak()).truncate());
                            ui.label(
                                egui::RichText::new(entry.created_at.format("%Y-%m-%d %H:%M").to_string())
                                    .small()
                                    .weak(),
                            );
                        })
                        .response
                        .interact(egui::Sense::click())
                        .on_hover_cursor(egui::CursorIcon::PointingHand);

                    if card.clicked() {
                        commands.push(AppCommand::SelectHistory(i));
                    }

                    ui.add_space(6.0);
                }
            });
        });
}

/// First line of the story, cut to a fixed number of characters.
fn preview(story: &str) -> String {
    let line = story.lines().find(|l| !l.trim().is_empty()).unwrap_or_default().trim();
    if line.chars().count() > PREVIEW_CHARS {
        let cut: String = line.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", cut.trim_end())
    } else {
        line.to_string()
    }
}
