//! Engine - shared orchestration state for TUI and headless runners
//!
//! The Engine owns the TEA state, the message channel, the action context
//! (gateway handle, upload worker) and the shutdown signal for the refresh
//! timer. Both frontends drive it the same way: feed it messages, let it
//! dispatch actions, read `state` to render.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use sdash_api::StorageApi;
use sdash_core::prelude::*;

use crate::actions::{spawn_refresh_timer, ActionContext};
use crate::config::Settings;
use crate::message::Message;
use crate::process;
use crate::signals;
use crate::state::AppState;

/// Capacity of the unified message channel
const MESSAGE_CAPACITY: usize = 256;

/// Orchestration engine for the dashboard
pub struct Engine<A> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources.
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel
    pub msg_rx: mpsc::Receiver<Message>,

    ctx: ActionContext<A>,

    /// Send `true` to stop background tasks
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,

    refresh_task: Option<JoinHandle<()>>,
}

impl<A> Engine<A>
where
    A: StorageApi + Sync + 'static,
{
    /// Create an engine around a storage gateway.
    ///
    /// Must be called inside a tokio runtime: the upload worker and the
    /// signal handler are spawned here.
    pub fn new(api: Arc<A>, settings: Settings) -> Self {
        let download_dir = settings.download.resolved_dir();
        let state = AppState::with_settings(settings);

        let (msg_tx, msg_rx) = mpsc::channel::<Message>(MESSAGE_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        signals::spawn_signal_handler(msg_tx.clone());
        let ctx = ActionContext::new(api, msg_tx.clone(), download_dir);

        Self {
            state,
            msg_tx,
            msg_rx,
            ctx,
            shutdown_tx,
            shutdown_rx,
            refresh_task: None,
        }
    }

    /// Load the start mode and begin the periodic refresh
    pub fn start(&mut self) {
        let period = self.state.settings.refresh.interval();
        info!(
            "Starting in {} mode, refreshing every {}s",
            self.state.mode,
            period.as_secs()
        );

        self.refresh_task = Some(spawn_refresh_timer(
            self.msg_tx.clone(),
            period,
            self.shutdown_rx.clone(),
        ));
        self.process_message(Message::ReloadMode);
    }

    /// Process a single message through the TEA update cycle
    pub fn process_message(&mut self, msg: Message) {
        process::process_message(&mut self.state, msg, &self.ctx);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next message from a background task
    pub async fn recv(&mut self) -> Option<Message> {
        self.msg_rx.recv().await
    }

    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Stop the refresh timer. In-flight requests are left to finish and
    /// their results are dropped with the channel.
    pub async fn shutdown(&mut self) {
        let _ = self.shutdown_tx.send(true);

        if let Some(handle) = self.refresh_task.take() {
            match tokio::time::timeout(Duration::from_secs(2), handle).await {
                Ok(Ok(())) => debug!("Refresh timer joined"),
                Ok(Err(e)) => warn!("Refresh timer panicked: {}", e),
                Err(_) => warn!("Refresh timer shutdown timed out"),
            }
        }
        info!("Engine shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdash_api::test_utils::FakeApi;
    use sdash_core::{Mode, NodeRecord};
    use tokio::time::timeout;

    async fn pump_until_idle(engine: &mut Engine<FakeApi>) {
        while engine.state.current().is_loading() {
            let msg = timeout(Duration::from_secs(2), engine.recv())
                .await
                .unwrap()
                .unwrap();
            engine.process_message(msg);
        }
    }

    #[tokio::test]
    async fn test_start_loads_start_mode() {
        let api = Arc::new(
            FakeApi::new().with_nodes(Mode::Simple, vec![NodeRecord::new("local", "active")]),
        );
        let mut engine = Engine::new(api.clone(), Settings::default());
        engine.start();
        pump_until_idle(&mut engine).await;

        assert_eq!(engine.state.current().nodes.len(), 1);
        assert_eq!(api.call_count("nodes simple"), 1);
        engine.shutdown().await;
    }

    #[tokio::test]
    async fn test_failed_start_shows_placeholder() {
        let api = Arc::new(FakeApi::new().fail_mode(Mode::Simple));
        let mut engine = Engine::new(api, Settings::default());
        engine.start();
        pump_until_idle(&mut engine).await;

        let data = engine.state.current();
        assert!(data.health.is_placeholder());
        assert_eq!(data.nodes[0].node_id, "local");
        engine.shutdown().await;
    }

    #[tokio::test]
    async fn test_quit_message_sets_phase() {
        let mut engine = Engine::new(Arc::new(FakeApi::new()), Settings::default());
        engine.msg_sender().send(Message::Quit).await.unwrap();
        assert_eq!(engine.drain_pending_messages(), 1);
        assert!(engine.should_quit());
    }
}
