//! Action handlers: UpdateAction dispatch and background task spawning

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;

use sdash_api::StorageApi;
use sdash_core::prelude::*;
use sdash_core::Mode;

use crate::message::Message;
use crate::upload::UploadQueue;
use crate::UpdateAction;

pub mod load;
pub mod refresh;

pub use load::load_mode;
pub use refresh::spawn_refresh_timer;

/// Everything a spawned action needs
#[derive(Debug)]
pub struct ActionContext<A> {
    pub api: Arc<A>,
    pub msg_tx: mpsc::Sender<Message>,
    pub uploads: UploadQueue,
    pub download_dir: PathBuf,
}

impl<A> ActionContext<A>
where
    A: StorageApi + Sync + 'static,
{
    /// Build a context and start the upload worker
    pub fn new(api: Arc<A>, msg_tx: mpsc::Sender<Message>, download_dir: PathBuf) -> Self {
        let uploads = UploadQueue::spawn(api.clone(), msg_tx.clone());
        Self {
            api,
            msg_tx,
            uploads,
            download_dir,
        }
    }
}

/// Execute an action by spawning a background task
pub fn handle_action<A>(action: UpdateAction, ctx: &ActionContext<A>)
where
    A: StorageApi + Sync + 'static,
{
    match action {
        UpdateAction::LoadMode {
            ticket,
            token,
            include_health,
        } => {
            load::spawn_mode_load(
                ctx.api.clone(),
                ctx.msg_tx.clone(),
                ticket,
                token,
                include_health,
            );
        }

        UpdateAction::Login { username, password } => {
            let api = ctx.api.clone();
            let tx = ctx.msg_tx.clone();
            tokio::spawn(async move {
                let msg = match api.login(&username, &password).await {
                    Ok(outcome) => Message::LoginSucceeded(outcome),
                    Err(e) => Message::LoginFailed {
                        status: match &e {
                            Error::Server { status, .. } => Some(*status),
                            _ => None,
                        },
                        message: e.summary(),
                    },
                };
                let _ = tx.send(msg).await;
            });
        }

        UpdateAction::Register {
            username,
            password,
            is_admin,
        } => {
            let api = ctx.api.clone();
            let tx = ctx.msg_tx.clone();
            tokio::spawn(async move {
                let msg = match api.register(&username, &password, is_admin).await {
                    Ok(message) => Message::RegisterSucceeded(message),
                    Err(e) => Message::RegisterFailed(e.summary()),
                };
                let _ = tx.send(msg).await;
            });
        }

        UpdateAction::EnqueueUpload(job) => {
            let batch_id = job.batch_id;
            if let Err(e) = ctx.uploads.enqueue(job) {
                error!("Failed to queue upload batch {}: {}", batch_id, e);
                let tx = ctx.msg_tx.clone();
                tokio::spawn(async move {
                    let _ = tx
                        .send(Message::UploadRejected {
                            batch_id,
                            error: e.summary(),
                        })
                        .await;
                });
            }
        }

        UpdateAction::Download {
            mode,
            file_id,
            filename,
            token,
        } => {
            let api = ctx.api.clone();
            let tx = ctx.msg_tx.clone();
            let dir = ctx.download_dir.clone();
            tokio::spawn(async move {
                let url = api.download_url(mode, &file_id);
                let result = download_to(api.as_ref(), mode, &file_id, &filename, token.as_deref(), &dir)
                    .await
                    .map_err(|e| e.summary());
                let _ = tx
                    .send(Message::DownloadFinished {
                        filename,
                        url,
                        result,
                    })
                    .await;
            });
        }

        UpdateAction::DeleteFile { file_id, token } => {
            let api = ctx.api.clone();
            let tx = ctx.msg_tx.clone();
            tokio::spawn(async move {
                let result = api
                    .delete_file(&file_id, token.as_deref())
                    .await
                    .map_err(|e| e.summary());
                let _ = tx.send(Message::DeleteFinished { result }).await;
            });
        }

        UpdateAction::Redistribute => {
            let api = ctx.api.clone();
            let tx = ctx.msg_tx.clone();
            tokio::spawn(async move {
                let result = api
                    .redistribute()
                    .await
                    .map(|report| report.message)
                    .map_err(|e| e.summary());
                let _ = tx.send(Message::RedistributeFinished { result }).await;
            });
        }
    }
}

/// Fetch a file and write it into `dir` under its own name
async fn download_to<A>(
    api: &A,
    mode: Mode,
    file_id: &str,
    filename: &str,
    token: Option<&str>,
    dir: &Path,
) -> Result<PathBuf>
where
    A: StorageApi + Sync,
{
    let bytes = api.download(mode, file_id, token).await?;
    tokio::fs::create_dir_all(dir).await?;

    // Never let a server-provided name escape the download directory
    let name = Path::new(filename)
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| file_id.into());
    let path = dir.join(name);

    tokio::fs::write(&path, &bytes).await?;
    Ok(path)
}
