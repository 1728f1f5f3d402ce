/// Formats the story prompt. No validation, no networking.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn story(words: &str) -> String {
        format!(
            "Write a creative, engaging, and well-structured short story that prominently features these words: {words}."
        )
    }
}
