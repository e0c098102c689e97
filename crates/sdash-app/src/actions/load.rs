//! Per-mode fetch groups
//!
//! Each mode's reload is a group of independent requests joined with
//! `try_join!`; the first failure discards the whole group.

use std::sync::Arc;

use tokio::sync::mpsc;

use sdash_api::StorageApi;
use sdash_core::prelude::*;
use sdash_core::Mode;

use crate::message::{Message, ModePayload};
use crate::state::LoadTicket;

/// Fetch everything `mode` displays
pub async fn load_mode<A>(
    api: &A,
    mode: Mode,
    token: Option<&str>,
    include_health: bool,
) -> Result<ModePayload>
where
    A: StorageApi + Sync,
{
    match mode {
        Mode::Simple | Mode::Distributed => {
            let (files, nodes, stats) = tokio::try_join!(
                api.list_files(mode, None),
                api.list_nodes(mode),
                api.storage_stats(mode),
            )?;
            Ok(ModePayload::Storage {
                files,
                nodes,
                stats,
            })
        }
        Mode::Production => {
            let (stats, cluster, logs) =
                tokio::try_join!(api.production_stats(), api.cluster(), api.logs())?;
            Ok(ModePayload::Production {
                stats,
                cluster,
                logs,
            })
        }
        Mode::Secure => {
            let token = token.ok_or(Error::Unauthenticated)?;
            if include_health {
                let (stats, files, health) = tokio::try_join!(
                    api.secure_stats(Some(token)),
                    api.list_files(Mode::Secure, Some(token)),
                    api.health(),
                )?;
                Ok(ModePayload::Secure {
                    stats,
                    files,
                    health: Some(health),
                })
            } else {
                let (stats, files) = tokio::try_join!(
                    api.secure_stats(Some(token)),
                    api.list_files(Mode::Secure, Some(token)),
                )?;
                Ok(ModePayload::Secure {
                    stats,
                    files,
                    health: None,
                })
            }
        }
    }
}

/// Run [`load_mode`] in the background and report the outcome for `ticket`
pub(super) fn spawn_mode_load<A>(
    api: Arc<A>,
    msg_tx: mpsc::Sender<Message>,
    ticket: LoadTicket,
    token: Option<String>,
    include_health: bool,
) where
    A: StorageApi + Sync + 'static,
{
    tokio::spawn(async move {
        let msg = match load_mode(api.as_ref(), ticket.mode, token.as_deref(), include_health).await
        {
            Ok(payload) => Message::ModeDataLoaded {
                ticket,
                payload: Box::new(payload),
            },
            Err(e) => {
                if e.is_recoverable() {
                    debug!("{} reload failed: {}", ticket.mode, e);
                } else {
                    error!("{} reload failed: {}", ticket.mode, e);
                }
                Message::ModeDataFailed {
                    ticket,
                    error: e.to_string(),
                }
            }
        };
        let _ = msg_tx.send(msg).await;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdash_api::test_utils::FakeApi;
    use sdash_core::{FileRecord, NodeRecord};

    #[tokio::test]
    async fn test_storage_group_fetches_three() {
        let api = FakeApi::new()
            .with_files(Mode::Simple, vec![FileRecord::new("1", "a", 1_048_576)])
            .with_nodes(Mode::Simple, vec![NodeRecord::new("local", "active")]);

        let payload = load_mode(&api, Mode::Simple, None, false).await.unwrap();
        match payload {
            ModePayload::Storage { files, nodes, stats } => {
                assert_eq!(files.len(), 1);
                assert_eq!(nodes.len(), 1);
                assert_eq!(stats.total_storage, 1_048_576);
            }
            other => panic!("unexpected payload {other:?}"),
        }
        assert_eq!(api.call_count("files simple"), 1);
        assert_eq!(api.call_count("nodes simple"), 1);
        assert_eq!(api.call_count("stats simple"), 1);
    }

    #[tokio::test]
    async fn test_production_group() {
        let api = FakeApi::new();
        let payload = load_mode(&api, Mode::Production, None, false).await.unwrap();
        assert!(matches!(payload, ModePayload::Production { .. }));
        assert_eq!(api.call_count("cluster"), 1);
        assert_eq!(api.call_count("logs"), 1);
    }

    #[tokio::test]
    async fn test_group_fails_as_a_whole() {
        let api = FakeApi::new().fail_mode(Mode::Distributed);
        let err = load_mode(&api, Mode::Distributed, None, false)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport { .. }));
    }

    #[tokio::test]
    async fn test_secure_requires_token() {
        let api = FakeApi::new();
        let err = load_mode(&api, Mode::Secure, None, false).await.unwrap_err();
        assert!(matches!(err, Error::Unauthenticated));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_secure_admin_includes_health() {
        let api = FakeApi::new();
        let payload = load_mode(&api, Mode::Secure, Some("t"), true).await.unwrap();
        match payload {
            ModePayload::Secure { health, .. } => assert!(health.is_some()),
            other => panic!("unexpected payload {other:?}"),
        }
    }
}
