use eframe::egui;

use crate::model::story_view::StoryView;
use crate::ui::commands::AppCommand;

/// The story output surface, shown whenever the view is not idle.
pub fn draw_story_window(ctx: &egui::Context, view: &StoryView, commands: &mut Vec<AppCommand>) {
    if !view.is_open() {
        return;
    }

    egui::Window::new("Your Story")
        .id(egui::Id::new("story_output_window"))
        .collapsible(false)
        .resizable(true)
        .default_size([560.0, 420.0])
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            match view {
                StoryView::Idle => {}
                StoryView::Loading => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.add(egui::Spinner::new().size(32.0));
                        ui.label("Crafting your story…");
                        ui.add_space(40.0);
                    });
                }
                StoryView::Displaying(story) => {
                    egui::ScrollArea::vertical()
                        .max_height(320.0)
                        .show(ui, |ui| {
                            ui.add(egui::Label::new(story.as_str()).wrap());
                        });
                }
                StoryView::Error(message) => {
                    ui.colored_label(egui::Color32::from_rgb(220, 60, 60), message);
                }
            }

            ui.separator();

            ui.horizontal(|ui| {
                let has_story = view.story().is_some();

                ui.add_enabled_ui(has_story, |ui| {
                    if ui.button("📋 Copy").clicked() {
                        commands.push(AppCommand::CopyStory);
                    }
                    if ui.button("💾 Save").clicked() {
                        commands.push(AppCommand::SaveStory);
                    }
                    if ui.button("📄 Export…").clicked() {
                        commands.push(AppCommand::ExportStory);
                    }
                    if ui.button("✉ Share").clicked() {
                        commands.push(AppCommand::ShareStory);
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let closable = !matches!(view, StoryView::Loading);
                    if ui.add_enabled(closable, egui::Button::new("Close")).clicked() {
                        commands.push(AppCommand::CloseStory);
                    }
                });
            });
        });
}
