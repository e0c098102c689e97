//! Headless mode - one load of one mode, printed as JSON
//!
//! Runs the same engine as the TUI without a terminal: the start mode is
//! loaded once, and the renderer's fragments for it are written to stdout.
//!
//! ```json
//! {"mode":"simple","title":"Simple","health":{"state":"live","updated":"14:02:11"},...}
//! ```

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use sdash_api::StorageApi;
use sdash_app::{mode_view, Engine, ModeView, NoticeLevel, Settings};
use sdash_core::prelude::*;

/// Slack on top of the request timeout before giving up on a load
const LOAD_GRACE: Duration = Duration::from_secs(2);

/// What headless mode prints
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    #[serde(flatten)]
    pub view: ModeView,
    pub notices: Vec<SnapshotNotice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotNotice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Load the configured start mode once and return its fragments
pub async fn snapshot<A>(api: Arc<A>, settings: Settings) -> Result<Snapshot>
where
    A: StorageApi + Sync + 'static,
{
    let wait = settings.server.timeout() + LOAD_GRACE;
    let mut engine = Engine::new(api, settings);
    let mode = engine.state.mode;
    engine.start();

    let deadline = tokio::time::Instant::now() + wait;
    let outcome = loop {
        if !engine.state.current().is_loading() || engine.should_quit() {
            break Ok(());
        }
        match tokio::time::timeout_at(deadline, engine.recv()).await {
            Ok(Some(msg)) => engine.process_message(msg),
            Ok(None) => break Err(Error::ChannelClosed),
            Err(_) => {
                break Err(Error::transport(format!(
                    "Timed out waiting for {mode} data"
                )))
            }
        }
    };
    engine.shutdown().await;
    outcome?;

    let notices = engine
        .state
        .notices
        .iter()
        .map(|n| SnapshotNotice {
            level: n.level,
            message: n.message.clone(),
        })
        .collect();

    Ok(Snapshot {
        view: mode_view(&engine.state, mode),
        notices,
    })
}

/// Run headless mode: print the snapshot as pretty JSON on stdout
pub async fn run_headless<A>(api: Arc<A>, settings: Settings) -> Result<()>
where
    A: StorageApi + Sync + 'static,
{
    let snapshot = snapshot(api, settings).await?;
    let json = serde_json::to_string_pretty(&snapshot)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")?;
    stdout.flush()?;
    Ok(())
}
