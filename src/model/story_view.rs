/// State of the story output surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StoryView {
    #[default]
    Idle,
    Loading,
    Displaying(String),
    Error(String),
}

pub const GENERIC_ERROR_MESSAGE: &str =
    "Sorry, something went wrong. Please check your API key and network connection.";

impl StoryView {
    /// Callers check the input first; an empty input never reaches here.
    pub fn start_loading(&mut self) {
        *self = StoryView::Loading;
    }

    pub fn show_story(&mut self, story: impl Into<String>) {
        *self = StoryView::Displaying(story.into());
    }

    pub fn show_error(&mut self) {
        *self = StoryView::Error(GENERIC_ERROR_MESSAGE.to_string());
    }

    /// Closing while a request is in flight is ignored; its response reopens the surface.
    pub fn close(&mut self) {
        if matches!(self, StoryView::Displaying(_) | StoryView::Error(_)) {
            *self = StoryView::Idle;
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, StoryView::Idle)
    }

    pub fn story(&self) -> Option<&str> {
        match self {
            StoryView::Displaying(story) => Some(story),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_success_close_cycle() {
        let mut view = StoryView::default();
        assert!(!view.is_open());

        view.start_loading();
        assert_eq!(view, StoryView::Loading);

        view.show_story("Once upon a time");
        assert_eq!(view.story(), Some("Once upon a time"));

        view.close();
        assert_eq!(view, StoryView::Idle);
    }

    #[test]
    fn failure_shows_generic_message() {
        let mut view = StoryView::Loading;
        view.show_error();
        assert_eq!(view, StoryView::Error(GENERIC_ERROR_MESSAGE.into()));
        assert_eq!(view.story(), None);

        view.close();
        assert!(!view.is_open());
    }

    #[test]
    fn close_does_not_interrupt_loading() {
        let mut view = StoryView::Loading;
        view.close();
        assert_eq!(view, StoryView::Loading);
    }

    #[test]
    fn selecting_history_replaces_displayed_story() {
        let mut view = StoryView::Displaying("first".into());
        view.show_story("second");
        assert_eq!(view.story(), Some("second"));
    }
}
