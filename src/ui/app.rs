use std::time::{Duration, Instant};

use eframe::egui;

use crate::model::storage::KeyValueStore;
use crate::model::story_view::StoryView;
use crate::model::theme::Theme;
use crate::ui::commands::{AppCommand, AppState, Controller};
use crate::ui::history_panel::draw_history_panel;
use crate::ui::input_panel::{draw_header, draw_input_panel};
use crate::ui::platform::DesktopPlatform;
use crate::ui::story_window::draw_story_window;
use crate::ui::toasts::draw_toasts;

pub struct StoryApp<S> {
    controller: Controller<S>,
    platform: DesktopPlatform,
    applied_theme: Option<Theme>,
}

impl<S: KeyValueStore> StoryApp<S> {
    pub fn new(ctx: &egui::Context, controller: Controller<S>) -> Self {
        Self {
            controller,
            platform: DesktopPlatform::new(ctx.clone()),
            applied_theme: None,
        }
    }

    fn apply_theme(&mut self, ctx: &egui::Context) {
        let theme = self.controller.theme();
        if self.applied_theme == Some(theme) {
            return;
        }
        ctx.set_visuals(if theme.is_dark() {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
        self.applied_theme = Some(theme);
    }
}

impl<S: KeyValueStore> eframe::App for StoryApp<S> {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        if self.controller.poll_engine() {
            ctx.request_repaint();
        }
        self.apply_theme(ctx);

        let mut commands: Vec<AppCommand> = Vec::new();
        let state = &mut self.controller.state;
        state.notifications.expire(Instant::now());
        draw_frame(ctx, state, &mut commands);

        for cmd in commands {
            self.controller.dispatch(cmd, &mut self.platform);
        }

        // Keep polling the worker and aging toasts while something is pending.
        let state = &self.controller.state;
        if state.view == StoryView::Loading || !state.notifications.is_empty() {
            ctx.request_repaint_after(Duration::from_millis(200));
        }
    }
}

/// Header spans the window, history sits under it on the right, the input
/// fills what is left. Panels must be added in that order.
fn draw_frame<S: KeyValueStore>(ctx: &egui::Context, state: &mut AppState<S>, commands: &mut Vec<AppCommand>) {
    draw_header(ctx, state.theme.theme(), commands);
    draw_history_panel(ctx, state.history.log(), commands);
    draw_input_panel(ctx, &mut state.input, commands);
    draw_story_window(ctx, &state.view, commands);
    draw_toasts(ctx, &state.notifications);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::storage::MemoryStore;
    use crate::ui::input_panel::HEADER_PANEL_ID;
    use egui::containers::panel::PanelState;

    #[test]
    fn header_spans_full_window_width() {
        let ctx = egui::Context::default();
        let mut state = AppState::new(MemoryStore::new(), MemoryStore::new());
        state.history.append("moon", "a tale");

        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(900.0, 600.0),
            )),
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            let mut commands = Vec::new();
            draw_frame(ctx, &mut state, &mut commands);
            assert!(commands.is_empty());
        });

        let header = PanelState::load(&ctx, egui::Id::new(HEADER_PANEL_ID)).unwrap();
        assert!((header.rect.width() - 900.0).abs() < 1.0, "header rect {:?}", header.rect);
    }
}
