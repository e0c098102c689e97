//! Periodic refresh timer

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;

use crate::message::Message;

/// Send [`Message::RefreshTick`] every `period` until shutdown.
///
/// The first tick fires one full period after start. The loop ends when
/// `shutdown_rx` reads `true` or the message channel closes.
pub fn spawn_refresh_timer(
    msg_tx: mpsc::Sender<Message>,
    period: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let start = tokio::time::Instant::now() + period;
        let mut ticker = tokio::time::interval_at(start, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if msg_tx.send(Message::RefreshTick).await.is_err() {
                        break;
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }
        tracing::debug!("Refresh timer stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_timer_ticks_each_period() {
        let (tx, mut rx) = mpsc::channel(8);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_refresh_timer(tx, Duration::from_millis(20), shutdown_rx);

        for _ in 0..2 {
            let msg = timeout(Duration::from_secs(2), rx.recv()).await.unwrap();
            assert!(matches!(msg, Some(Message::RefreshTick)));
        }

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_timer_stops_on_shutdown() {
        let (tx, mut rx) = mpsc::channel(8);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_refresh_timer(tx, Duration::from_secs(30), shutdown_rx);

        shutdown_tx.send(true).unwrap();
        timeout(Duration::from_secs(2), handle).await.unwrap().unwrap();
        assert!(rx.recv().await.is_none());
    }
}
