//! Upload coordinator: a single worker that runs upload batches in order
//!
//! Batches are queued on an mpsc channel and handled one at a time, and the
//! files of a batch are uploaded one after another. Each file reports its own
//! outcome, so one failure never aborts the rest of the batch.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;

use sdash_api::StorageApi;
use sdash_core::prelude::*;
use sdash_core::Mode;

use crate::message::Message;

/// Pending batches the worker will accept before `enqueue` fails
const QUEUE_CAPACITY: usize = 16;

/// One batch of files for one mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadJob {
    pub batch_id: u64,
    pub mode: Mode,
    pub files: Vec<PathBuf>,
    pub token: Option<String>,
}

/// Handle to the upload worker task
#[derive(Debug, Clone)]
pub struct UploadQueue {
    tx: mpsc::Sender<UploadJob>,
}

impl UploadQueue {
    /// Spawn the worker. It exits when every queue handle is dropped.
    pub fn spawn<A>(api: Arc<A>, msg_tx: mpsc::Sender<Message>) -> Self
    where
        A: StorageApi + Sync + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<UploadJob>(QUEUE_CAPACITY);

        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                if !run_batch(api.as_ref(), job, &msg_tx).await {
                    break;
                }
            }
            debug!("Upload worker stopped");
        });

        Self { tx }
    }

    /// A queue whose worker is gone; every `enqueue` fails
    #[cfg(test)]
    pub(crate) fn closed() -> Self {
        let (tx, _) = mpsc::channel::<UploadJob>(1);
        Self { tx }
    }

    pub fn enqueue(&self, job: UploadJob) -> Result<()> {
        self.tx
            .try_send(job)
            .map_err(|e| Error::channel_send(format!("upload queue: {e}")))
    }
}

/// Upload every file of `job` in order, reporting progress on `msg_tx`.
///
/// Returns `false` once the message channel is closed.
pub async fn run_batch<A>(api: &A, job: UploadJob, msg_tx: &mpsc::Sender<Message>) -> bool
where
    A: StorageApi + Sync,
{
    let UploadJob {
        batch_id,
        mode,
        files,
        token,
    } = job;
    let total = files.len();

    if msg_tx
        .send(Message::UploadBatchStarted {
            batch_id,
            mode,
            total,
        })
        .await
        .is_err()
    {
        return false;
    }

    for (index, path) in files.iter().enumerate() {
        let filename = display_name(path);

        if msg_tx
            .send(Message::UploadFileStarted {
                batch_id,
                index,
                filename: filename.clone(),
            })
            .await
            .is_err()
        {
            return false;
        }

        let error = upload_one(api, mode, path, &filename, token.as_deref())
            .await
            .err()
            .map(|e| e.summary());

        if msg_tx
            .send(Message::UploadFileFinished {
                batch_id,
                index,
                total,
                filename,
                error,
            })
            .await
            .is_err()
        {
            return false;
        }
    }

    msg_tx
        .send(Message::UploadBatchFinished { batch_id, mode })
        .await
        .is_ok()
}

async fn upload_one<A>(
    api: &A,
    mode: Mode,
    path: &Path,
    filename: &str,
    token: Option<&str>,
) -> Result<()>
where
    A: StorageApi + Sync,
{
    let data = tokio::fs::read(path).await?;
    api.upload(mode, filename, data, token).await?;
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdash_api::test_utils::FakeApi;
    use tempfile::tempdir;

    async fn collect(mut rx: mpsc::Receiver<Message>) -> Vec<Message> {
        let mut out = Vec::new();
        while let Some(msg) = rx.recv().await {
            out.push(msg);
        }
        out
    }

    #[tokio::test]
    async fn test_batch_continues_after_failure() {
        let temp = tempdir().unwrap();
        let mut files = Vec::new();
        for name in ["a.txt", "b.txt", "c.txt"] {
            let path = temp.path().join(name);
            std::fs::write(&path, name).unwrap();
            files.push(path);
        }
        let api = FakeApi::new().fail_upload("b.txt");
        let (tx, rx) = mpsc::channel(64);

        let job = UploadJob {
            batch_id: 1,
            mode: Mode::Simple,
            files,
            token: None,
        };
        assert!(run_batch(&api, job, &tx).await);
        drop(tx);

        let messages = collect(rx).await;
        let outcomes: Vec<_> = messages
            .iter()
            .filter_map(|m| match m {
                Message::UploadFileFinished {
                    filename, error, ..
                } => Some((filename.clone(), error.is_none())),
                _ => None,
            })
            .collect();
        assert_eq!(
            outcomes,
            vec![
                ("a.txt".to_string(), true),
                ("b.txt".to_string(), false),
                ("c.txt".to_string(), true),
            ]
        );
        assert!(matches!(
            messages.last(),
            Some(Message::UploadBatchFinished { batch_id: 1, .. })
        ));
        assert_eq!(api.call_count("upload"), 3);
    }

    #[tokio::test]
    async fn test_unreadable_file_is_a_per_file_failure() {
        let api = FakeApi::new();
        let (tx, rx) = mpsc::channel(16);
        let job = UploadJob {
            batch_id: 7,
            mode: Mode::Distributed,
            files: vec![PathBuf::from("/definitely/not/here.bin")],
            token: None,
        };
        run_batch(&api, job, &tx).await;
        drop(tx);

        let messages = collect(rx).await;
        let failed = messages.iter().any(|m| {
            matches!(m, Message::UploadFileFinished { filename, error: Some(_), .. } if filename == "here.bin")
        });
        assert!(failed);
        assert_eq!(api.call_count("upload"), 0);
    }

    #[tokio::test]
    async fn test_queue_runs_batches_in_order() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("one.txt");
        std::fs::write(&path, "1").unwrap();

        let api = Arc::new(FakeApi::new());
        let (tx, mut rx) = mpsc::channel(64);
        let queue = UploadQueue::spawn(api.clone(), tx);

        for batch_id in 1..=2 {
            queue
                .enqueue(UploadJob {
                    batch_id,
                    mode: Mode::Simple,
                    files: vec![path.clone()],
                    token: None,
                })
                .unwrap();
        }

        let mut finished = Vec::new();
        while finished.len() < 2 {
            if let Some(Message::UploadBatchFinished { batch_id, .. }) = rx.recv().await {
                finished.push(batch_id);
            }
        }
        assert_eq!(finished, vec![1, 2]);
    }
}
