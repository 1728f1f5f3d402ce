mod config;
mod engine;
mod error;
mod logging;
mod model;
mod ui;

use anyhow::Context;
use eframe::egui;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::engine::engine::{detached_handle, register_worker};
use crate::engine::llm_client::StoryRequester;
use crate::model::storage::FileStore;
use crate::ui::commands::{AppState, Controller};

fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let config = AppConfig::load();
    info!(endpoint = %config.endpoint, "starting StoryCrafter");

    let requester = StoryRequester::from_config(&config).context("failed to build HTTP client")?;

    // Worker failure is not fatal; generate requests then surface an error.
    let engine = match register_worker(requester) {
        Ok(handle) => handle,
        Err(e) => {
            error!(error = %e, "story worker registration failed");
            detached_handle()
        }
    };

    let state = AppState::new(FileStore::in_config_dir(), FileStore::in_config_dir());
    let controller = Controller::new(state, engine);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "StoryCrafter",
        options,
        Box::new(|cc| Ok(Box::new(ui::app::StoryApp::new(&cc.egui_ctx, controller)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe exited with an error: {e}"))
}
