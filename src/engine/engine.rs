use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::{error, info, warn};

use crate::engine::llm_client::{HttpTransport, StoryRequester};
use crate::engine::protocol::{EngineCommand, EngineResponse};

/// Background story worker. Owns the requester, answers one response per command.
pub struct Engine<T> {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    requester: StoryRequester<T>,
}

impl<T: HttpTransport> Engine<T> {
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        requester: StoryRequester<T>,
    ) -> Self {
        Self { rx, tx, requester }
    }

    /// Runs until the UI side hangs up.
    pub fn run(&mut self) {
        while let Ok(cmd) = self.rx.recv() {
            let resp = self.handle(cmd);
            if self.tx.send(resp).is_err() {
                break;
            }
        }
        info!("story worker stopped");
    }

    fn handle(&self, cmd: EngineCommand) -> EngineResponse {
        match cmd {
            EngineCommand::GenerateStory { words } => match self.requester.generate_story(&words) {
                Ok(story) => EngineResponse::StoryReady { words, story },
                Err(error) => {
                    error!(kind = error.kind(), %error, "story generation failed");
                    EngineResponse::StoryFailed { words, error }
                }
            },
        }
    }
}

/// UI side of the worker channels.
pub struct EngineHandle {
    pub cmd_tx: Sender<EngineCommand>,
    pub resp_rx: Receiver<EngineResponse>,
}

/// Starts the story worker once at startup.
pub fn register_worker<T>(requester: StoryRequester<T>) -> io::Result<EngineHandle>
where
    T: HttpTransport + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();

    thread::Builder::new()
        .name("story-worker".into())
        .spawn(move || {
            let mut engine = Engine::new(cmd_rx, resp_tx, requester);
            engine.run();
        })?;

    info!("story worker registered");
    Ok(EngineHandle { cmd_tx, resp_rx })
}

/// A handle whose worker never started. Every command sent through it fails
/// to deliver, which the UI reports as a failed generation.
pub fn detached_handle() -> EngineHandle {
    let (cmd_tx, _) = mpsc::channel();
    let (_, resp_rx) = mpsc::channel();
    warn!("running without a story worker");
    EngineHandle { cmd_tx, resp_rx }
}
