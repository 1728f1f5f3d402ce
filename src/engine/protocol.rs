use crate::error::RequestError;

pub enum EngineCommand {
    GenerateStory { words: String },
}

pub enum EngineResponse {
    StoryReady { words: String, story: String },
    StoryFailed { words: String, error: RequestError },
}
