use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{error, info, warn};

use crate::engine::engine::EngineHandle;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::error::PlatformError;
use crate::model::history::HistoryStore;
use crate::model::notification::Notifications;
use crate::model::storage::KeyValueStore;
use crate::model::story_view::StoryView;
use crate::model::theme::{Theme, ThemeStore};
use crate::ui::platform::{export_file_name, Platform, SHARE_TITLE};

pub const RANDOM_WORDS: [&str; 15] = [
    "moon", "river", "whisper", "key", "shadow", "clock", "dream", "forest", "star", "phoenix",
    "labyrinth", "mirror", "ocean", "journey", "silence",
];

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter some words to generate a story.";

/// Every user action the UI can dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Generate,
    SurpriseMe,
    ToggleTheme,
    CloseStory,
    CopyStory,
    SaveStory,
    ExportStory,
    ShareStory,
    SelectHistory(usize),
}

/// Everything the UI reads and the commands mutate. Injected at startup.
pub struct AppState<S> {
    pub input: String,
    pub view: StoryView,
    /// Keywords behind the story on screen.
    pub displayed_words: Option<String>,
    pub history: HistoryStore<S>,
    pub theme: ThemeStore<S>,
    pub notifications: Notifications,
}

impl<S: KeyValueStore> AppState<S> {
    pub fn new(history_storage: S, theme_storage: S) -> Self {
        Self {
            input: String::new(),
            view: StoryView::default(),
            displayed_words: None,
            history: HistoryStore::new(history_storage),
            theme: ThemeStore::new(theme_storage),
            notifications: Notifications::default(),
        }
    }
}

pub struct Controller<S> {
    pub state: AppState<S>,
    engine: EngineHandle,
}

impl<S: KeyValueStore> Controller<S> {
    pub fn new(state: AppState<S>, engine: EngineHandle) -> Self {
        Self { state, engine }
    }

    pub fn theme(&self) -> Theme {
        self.state.theme.theme()
    }

    pub fn dispatch(&mut self, cmd: AppCommand, platform: &mut dyn Platform) {
        match cmd {
            AppCommand::Generate => self.generate(),
            AppCommand::SurpriseMe => {
                self.state.input = surprise_words(&mut rand::thread_rng());
            }
            AppCommand::ToggleTheme => {
                let theme = self.state.theme.toggle();
                info!(theme = theme.as_str(), "theme toggled");
            }
            AppCommand::CloseStory => self.state.view.close(),
            AppCommand::CopyStory => self.copy_story(platform),
            AppCommand::SaveStory => {
                if self.state.view.story().is_some() {
                    self.state.notifications.info("Story saved to your history!");
                }
            }
            AppCommand::ExportStory => self.export_story(platform),
            AppCommand::ShareStory => self.share_story(platform),
            AppCommand::SelectHistory(index) => self.select_history(index),
        }
    }

    fn generate(&mut self) {
        let words = self.state.input.trim().to_string();
        if words.is_empty() {
            self.state.notifications.warning(EMPTY_INPUT_MESSAGE);
            return;
        }

        self.state.view.start_loading();
        self.state.displayed_words = Some(words.clone());

        if self
            .engine
            .cmd_tx
            .send(EngineCommand::GenerateStory { words })
            .is_err()
        {
            error!("story worker is not running");
            self.state.view.show_error();
        }
    }

    /// Drains finished requests. Each one overwrites the surface, so the
    /// last response to arrive wins.
    pub fn poll_engine(&mut self) -> bool {
        let mut changed = false;
        while let Ok(resp) = self.engine.resp_rx.try_recv() {
            self.on_response(resp);
            changed = true;
        }
        changed
    }

    pub fn on_response(&mut self, resp: EngineResponse) {
        match resp {
            EngineResponse::StoryReady { words, story } => {
                self.state.view.show_story(story.clone());
                self.state.history.append(&words, &story);
                self.state.displayed_words = Some(words);
            }
            EngineResponse::StoryFailed { words, error } => {
                warn!(%words, %error, "showing generation failure");
                self.state.view.show_error();
            }
        }
    }

    fn select_history(&mut self, index: usize) {
        let Some(entry) = self.state.history.log().get(index).cloned() else {
            warn!(index, "history entry out of range");
            return;
        };
        self.state.view.show_story(entry.story);
        self.state.displayed_words = Some(entry.words);
    }

    fn copy_story(&mut self, platform: &mut dyn Platform) {
        let Some(story) = self.state.view.story() else {
            self.state.notifications.warning("Nothing to copy.");
            return;
        };

        match platform.copy_text(story) {
            Ok(()) => self.state.notifications.info("Story copied to clipboard!"),
            Err(e) => {
                warn!(error = %e, "failed to copy story");
                self.state.notifications.warning("Failed to copy the story.");
            }
        }
    }

    fn share_story(&mut self, platform: &mut dyn Platform) {
        let Some(story) = self.state.view.story() else {
            self.state.notifications.warning("Nothing to share.");
            return;
        };

        match platform.share(SHARE_TITLE, story) {
            Ok(()) => self.state.notifications.info("Opening your mail app to share the story."),
            Err(PlatformError::Unsupported) => self
                .state
                .notifications
                .warning("Sharing is not supported on this system."),
            Err(e) => {
                warn!(error = %e, "share failed");
                self.state.notifications.warning("Could not share the story.");
            }
        }
    }

    fn export_story(&mut self, platform: &mut dyn Platform) {
        let Some(story) = self.state.view.story() else {
            return;
        };
        let file_name = export_file_name(self.state.displayed_words.as_deref().unwrap_or_default());

        match platform.export_text(&file_name, story) {
            Ok(Some(path)) => self
                .state
                .notifications
                .info(format!("Story exported to {}", path.display())),
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "export failed");
                self.state.notifications.warning("Could not export the story.");
            }
        }
    }
}

/// Three distinct words from [`RANDOM_WORDS`], comma separated.
pub fn surprise_words<R: Rng + ?Sized>(rng: &mut R) -> String {
    RANDOM_WORDS
        .choose_multiple(rng, 3)
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RequestError;
    use crate::model::history::HISTORY_CAPACITY;
    use crate::model::storage::MemoryStore;
    use crate::model::story_view::GENERIC_ERROR_MESSAGE;
    use crate::model::theme::THEME_KEY;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::path::PathBuf;
    use std::sync::mpsc::{self, Receiver, Sender};

    #[derive(Default, Clone, Copy, PartialEq)]
    enum ShareMode {
        #[default]
        Unsupported,
        Launches,
        LaunchFails,
    }

    #[derive(Default, Clone, Copy, PartialEq)]
    enum ExportMode {
        #[default]
        Writes,
        Cancelled,
        WriteFails,
    }

    #[derive(Default)]
    struct FakePlatform {
        copied: Vec<String>,
        copy_fails: bool,
        shared: Vec<(String, String)>,
        share_mode: ShareMode,
        exported: Vec<(String, String)>,
        export_mode: ExportMode,
    }

    impl Platform for FakePlatform {
        fn copy_text(&mut self, text: &str) -> Result<(), PlatformError> {
            if self.copy_fails {
                return Err(PlatformError::Launch("clipboard unavailable".into()));
            }
            self.copied.push(text.to_string());
            Ok(())
        }

        fn share(&mut self, title: &str, text: &str) -> Result<(), PlatformError> {
            match self.share_mode {
                ShareMode::Unsupported => Err(PlatformError::Unsupported),
                ShareMode::LaunchFails => Err(PlatformError::Launch("no mail handler".into())),
                ShareMode::Launches => {
                    self.shared.push((title.to_string(), text.to_string()));
                    Ok(())
                }
            }
        }

        fn export_text(&mut self, file_name: &str, text: &str) -> Result<Option<PathBuf>, PlatformError> {
            match self.export_mode {
                ExportMode::Cancelled => Ok(None),
                ExportMode::WriteFails => Err(PlatformError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                ))),
                ExportMode::Writes => {
                    self.exported.push((file_name.to_string(), text.to_string()));
                    Ok(Some(PathBuf::from(file_name)))
                }
            }
        }
    }

    struct Harness {
        controller: Controller<MemoryStore>,
        platform: FakePlatform,
        sent: Receiver<EngineCommand>,
        respond: Sender<EngineResponse>,
    }

    impl Harness {
        fn new() -> Self {
            let (cmd_tx, sent) = mpsc::channel();
            let (respond, resp_rx) = mpsc::channel();
            let state = AppState::new(MemoryStore::new(), MemoryStore::new());
            Self {
                controller: Controller::new(state, EngineHandle { cmd_tx, resp_rx }),
                platform: FakePlatform::default(),
                sent,
                respond,
            }
        }

        fn run(&mut self, cmd: AppCommand) {
            self.controller.dispatch(cmd, &mut self.platform);
        }

        fn generate(&mut self, words: &str) {
            self.controller.state.input = words.to_string();
            self.run(AppCommand::Generate);
        }

        fn state(&self) -> &AppState<MemoryStore> {
            &self.controller.state
        }

        fn last_note(&self) -> Option<&str> {
            self.controller.state.notifications.latest().map(|n| n.text.as_str())
        }

        fn note_count(&self) -> usize {
            self.controller.state.notifications.iter().count()
        }
    }

    #[test]
    fn empty_input_stays_idle_and_warns() {
        let mut h = Harness::new();
        h.generate("   ");

        assert_eq!(h.state().view, StoryView::Idle);
        assert!(h.sent.try_recv().is_err());
        assert_eq!(
            h.state().notifications.latest().map(|n| n.text.as_str()),
            Some(EMPTY_INPUT_MESSAGE)
        );
    }

    #[test]
    fn successful_generation_displays_and_records() {
        let mut h = Harness::new();
        h.generate("  moon, river ");

        assert_eq!(h.state().view, StoryView::Loading);
        match h.sent.try_recv().unwrap() {
            EngineCommand::GenerateStory { words } => assert_eq!(words, "moon, river"),
        }

        h.respond
            .send(EngineResponse::StoryReady {
                words: "moon, river".into(),
                story: "Once upon a time...".into(),
            })
            .unwrap();
        assert!(h.controller.poll_engine());

        assert_eq!(h.state().view.story(), Some("Once upon a time..."));
        let log = h.state().history.log();
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].words, "moon, river");
    }

    #[test]
    fn server_error_shows_error_and_leaves_history() {
        let mut h = Harness::new();
        h.generate("moon");
        h.respond
            .send(EngineResponse::StoryFailed {
                words: "moon".into(),
                error: RequestError::Status { status: 500 },
            })
            .unwrap();
        h.controller.poll_engine();

        assert_eq!(h.state().view, StoryView::Error(GENERIC_ERROR_MESSAGE.into()));
        assert!(h.state().history.log().is_empty());

        h.run(AppCommand::CloseStory);
        assert_eq!(h.state().view, StoryView::Idle);
    }

    #[test]
    fn last_response_wins() {
        let mut h = Harness::new();
        h.generate("first");
        h.generate("second");

        for (words, story) in [("first", "story one"), ("second", "story two")] {
            h.respond
                .send(EngineResponse::StoryReady {
                    words: words.into(),
                    story: story.into(),
                })
                .unwrap();
        }
        h.controller.poll_engine();

        assert_eq!(h.state().view.story(), Some("story two"));
        assert_eq!(h.state().history.log().entries()[0].words, "second");
        assert_eq!(h.state().history.log().len(), 2);
    }

    #[test]
    fn history_never_exceeds_capacity_through_controller() {
        let mut h = Harness::new();
        for i in 0..9 {
            h.controller.on_response(EngineResponse::StoryReady {
                words: format!("w{i}"),
                story: format!("s{i}"),
            });
        }
        let log = h.state().history.log();
        assert_eq!(log.len(), HISTORY_CAPACITY);
        assert_eq!(log.entries()[0].words, "w8");
    }

    #[test]
    fn selecting_history_displays_without_loading() {
        let mut h = Harness::new();
        h.controller.on_response(EngineResponse::StoryReady {
            words: "old".into(),
            story: "old story".into(),
        });
        h.controller.on_response(EngineResponse::StoryReady {
            words: "new".into(),
            story: "new story".into(),
        });

        h.run(AppCommand::SelectHistory(1));
        assert_eq!(h.state().view, StoryView::Displaying("old story".into()));
        assert_eq!(h.state().displayed_words.as_deref(), Some("old"));
        assert!(h.sent.try_recv().is_err());

        h.run(AppCommand::SelectHistory(42));
        assert_eq!(h.state().view.story(), Some("old story"));
    }

    #[test]
    fn worker_gone_surfaces_error() {
        let mut h = Harness::new();
        let (cmd_tx, cmd_rx) = mpsc::channel();
        drop(cmd_rx);
        let (_, resp_rx) = mpsc::channel();
        h.controller.engine = EngineHandle { cmd_tx, resp_rx };

        h.generate("moon");
        assert_eq!(h.state().view, StoryView::Error(GENERIC_ERROR_MESSAGE.into()));
    }

    #[test]
    fn copy_and_share_use_displayed_story() {
        let mut h = Harness::new();
        h.run(AppCommand::CopyStory);
        assert!(h.platform.copied.is_empty());

        h.controller.state.view.show_story("a tale");
        h.run(AppCommand::CopyStory);
        assert_eq!(h.platform.copied, ["a tale"]);
        assert_eq!(
            h.state().notifications.latest().map(|n| n.text.as_str()),
            Some("Story copied to clipboard!")
        );

        h.run(AppCommand::ShareStory);
        assert_eq!(
            h.state().notifications.latest().map(|n| n.text.as_str()),
            Some("Sharing is not supported on this system.")
        );

        h.platform.share_mode = ShareMode::Launches;
        h.run(AppCommand::ShareStory);
        assert_eq!(h.platform.shared, [(SHARE_TITLE.to_string(), "a tale".to_string())]);
    }

    #[test]
    fn export_uses_words_for_file_name() {
        let mut h = Harness::new();
        h.controller.on_response(EngineResponse::StoryReady {
            words: "moon, river".into(),
            story: "a tale".into(),
        });

        h.run(AppCommand::ExportStory);
        assert_eq!(
            h.platform.exported,
            [("moon-river.txt".to_string(), "a tale".to_string())]
        );
    }

    #[test]
    fn toggle_theme_persists() {
        let mut h = Harness::new();
        assert_eq!(h.controller.theme(), Theme::Light);

        h.run(AppCommand::ToggleTheme);
        assert_eq!(h.controller.theme(), Theme::Dark);
        assert_eq!(h.state().theme.storage().get(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn surprise_fills_three_distinct_known_words() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let text = surprise_words(&mut rng);
            let words: Vec<&str> = text.split(", ").collect();
            assert_eq!(words.len(), 3);
            assert!(words.iter().all(|w| RANDOM_WORDS.contains(w)));
            assert_ne!(words[0], words[1]);
            assert_ne!(words[1], words[2]);
            assert_ne!(words[0], words[2]);
        }
    }

    #[test]
    fn surprise_me_replaces_input() {
        let mut h = Harness::new();
        h.controller.state.input = "old".into();
        h.run(AppCommand::SurpriseMe);
        assert_eq!(h.state().input.split(", ").count(), 3);
    }

    #[test]
    fn copy_failure_warns_and_keeps_story() {
        let mut h = Harness::new();
        h.controller.state.view.show_story("a tale");
        h.platform.copy_fails = true;

        h.run(AppCommand::CopyStory);

        assert_eq!(h.last_note(), Some("Failed to copy the story."));
        assert_eq!(h.state().view, StoryView::Displaying("a tale".into()));
    }

    #[test]
    fn nothing_to_copy_or_share_without_story() {
        let mut h = Harness::new();

        h.run(AppCommand::CopyStory);
        assert_eq!(h.last_note(), Some("Nothing to copy."));

        h.platform.share_mode = ShareMode::Launches;
        h.run(AppCommand::ShareStory);
        assert_eq!(h.last_note(), Some("Nothing to share."));
        assert!(h.platform.shared.is_empty());
        assert_eq!(h.state().view, StoryView::Idle);
    }

    #[test]
    fn share_launch_failure_warns() {
        let mut h = Harness::new();
        h.controller.state.view.show_story("a tale");
        h.platform.share_mode = ShareMode::LaunchFails;

        h.run(AppCommand::ShareStory);

        assert_eq!(h.last_note(), Some("Could not share the story."));
        assert_eq!(h.state().view, StoryView::Displaying("a tale".into()));
    }

    #[test]
    fn share_success_confirms() {
        let mut h = Harness::new();
        h.controller.state.view.show_story("a tale");
        h.platform.share_mode = ShareMode::Launches;

        h.run(AppCommand::ShareStory);
        assert_eq!(h.last_note(), Some("Opening your mail app to share the story."));
    }

    #[test]
    fn save_confirms_only_with_story() {
        let mut h = Harness::new();
        h.run(AppCommand::SaveStory);
        assert_eq!(h.note_count(), 0);

        h.controller.on_response(EngineResponse::StoryReady {
            words: "moon".into(),
            story: "a tale".into(),
        });
        h.run(AppCommand::SaveStory);

        assert_eq!(h.last_note(), Some("Story saved to your history!"));
        assert_eq!(h.state().history.log().len(), 1);
        assert_eq!(h.state().view.story(), Some("a tale"));
    }

    #[test]
    fn export_success_reports_path() {
        let mut h = Harness::new();
        h.controller.state.view.show_story("a tale");

        h.run(AppCommand::ExportStory);
        assert_eq!(h.last_note(), Some("Story exported to story.txt"));
    }

    #[test]
    fn export_cancel_is_silent() {
        let mut h = Harness::new();
        h.controller.state.view.show_story("a tale");
        h.platform.export_mode = ExportMode::Cancelled;

        h.run(AppCommand::ExportStory);

        assert_eq!(h.note_count(), 0);
        assert_eq!(h.state().view, StoryView::Displaying("a tale".into()));
    }

    #[test]
    fn export_failure_warns() {
        let mut h = Harness::new();
        h.controller.state.view.show_story("a tale");
        h.platform.export_mode = ExportMode::WriteFails;

        h.run(AppCommand::ExportStory);

        assert_eq!(h.last_note(), Some("Could not export the story."));
        assert_eq!(h.state().view, StoryView::Displaying("a tale".into()));
    }
}
