//! Main TUI runner - entry point and event loop

use std::sync::Arc;

use sdash_api::StorageApi;
use sdash_app::{Engine, Settings};
use sdash_core::prelude::*;

use super::{event, render, terminal};

/// Run the dashboard in the terminal until the user quits
pub async fn run<A>(api: Arc<A>, settings: Settings) -> Result<()>
where
    A: StorageApi + Sync + 'static,
{
    // Install panic hook for terminal restoration
    terminal::install_panic_hook();

    let mut engine = Engine::new(api, settings);
    info!("Starting dashboard in {} mode", engine.state.mode);
    engine.start();

    let mut term = ratatui::init();
    let result = run_loop(&mut term, &mut engine);

    engine.shutdown().await;
    ratatui::restore();

    result
}

/// Main event loop
fn run_loop<A>(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine<A>) -> Result<()>
where
    A: StorageApi + Sync + 'static,
{
    while !engine.should_quit() {
        // Results of background requests, timer ticks and signals
        engine.drain_pending_messages();

        terminal.draw(|frame| render::view(frame, &engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }
    Ok(())
}
