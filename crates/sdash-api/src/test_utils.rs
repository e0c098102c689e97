//! Test utilities for the storage gateway
//!
//! Provides [`FakeApi`], a scripted in-memory backend that records every call.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use bytes::Bytes;

use sdash_core::prelude::*;
use sdash_core::{
    ClusterSnapshot, FileRecord, HealthReport, LogEntry, Mode, NodeRecord, NodeSummary,
    ProductionStats, RedistributeReport, SecureStats, StorageStats, UploadReceipt, User,
};

use crate::auth::LoginOutcome;
use crate::client::StorageApi;

#[derive(Debug, Default)]
struct Script {
    files: HashMap<Mode, Vec<FileRecord>>,
    nodes: HashMap<Mode, Vec<NodeRecord>>,
    cluster: Option<ClusterSnapshot>,
    logs: Vec<LogEntry>,
    secure_stats: SecureStats,
    failing_modes: HashSet<Mode>,
    failing_uploads: HashSet<String>,
    users: HashMap<String, (String, bool)>,
    calls: Vec<String>,
}

/// Scripted backend for app-level tests.
///
/// Every method appends `"<operation> <mode>"` to the call log. Modes marked
/// with [`FakeApi::fail_mode`] answer every data call with a transport error.
#[derive(Debug, Default)]
pub struct FakeApi {
    script: Mutex<Script>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_files(self, mode: Mode, files: Vec<FileRecord>) -> Self {
        self.edit(|s| {
            s.files.insert(mode, files);
        });
        self
    }

    pub fn with_nodes(self, mode: Mode, nodes: Vec<NodeRecord>) -> Self {
        self.edit(|s| {
            s.nodes.insert(mode, nodes);
        });
        self
    }

    pub fn with_cluster(self, cluster: ClusterSnapshot) -> Self {
        self.edit(|s| s.cluster = Some(cluster));
        self
    }

    pub fn with_logs(self, logs: Vec<LogEntry>) -> Self {
        self.edit(|s| s.logs = logs);
        self
    }

    pub fn with_user(self, username: &str, password: &str, is_admin: bool) -> Self {
        self.edit(|s| {
            s.users
                .insert(username.to_string(), (password.to_string(), is_admin));
        });
        self
    }

    pub fn fail_mode(self, mode: Mode) -> Self {
        self.edit(|s| {
            s.failing_modes.insert(mode);
        });
        self
    }

    /// Uploads of `filename` are rejected with a 500
    pub fn fail_upload(self, filename: &str) -> Self {
        self.edit(|s| {
            s.failing_uploads.insert(filename.to_string());
        });
        self
    }

    /// Recorded calls in order
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Number of recorded calls starting with `prefix`
    pub fn call_count(&self, prefix: &str) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn edit(&self, f: impl FnOnce(&mut Script)) {
        f(&mut self.lock());
    }

    fn record(&self, op: &str, mode: Mode) -> Result<()> {
        let mut script = self.lock();
        script.calls.push(format!("{op} {mode}"));
        if script.failing_modes.contains(&mode) {
            return Err(Error::transport("connection refused"));
        }
        Ok(())
    }
}

/// Default production cluster used when none is scripted
pub fn test_cluster() -> ClusterSnapshot {
    ClusterSnapshot {
        master: test_summary("m1", "healthy"),
        slaves: vec![test_summary("s1", "active")],
    }
}

pub fn test_summary(node_id: &str, status: &str) -> NodeSummary {
    NodeSummary {
        node_id: node_id.to_string(),
        files: 0,
        chunks: 0,
        status: Some(status.to_string()),
        last_sync: None,
    }
}

impl StorageApi for FakeApi {
    async fn list_files(&self, mode: Mode, _token: Option<&str>) -> Result<Vec<FileRecord>> {
        self.record("files", mode)?;
        Ok(self.lock().files.get(&mode).cloned().unwrap_or_default())
    }

    async fn list_nodes(&self, mode: Mode) -> Result<Vec<NodeRecord>> {
        self.record("nodes", mode)?;
        Ok(self.lock().nodes.get(&mode).cloned().unwrap_or_default())
    }

    async fn storage_stats(&self, mode: Mode) -> Result<StorageStats> {
        self.record("stats", mode)?;
        let script = self.lock();
        let files = script.files.get(&mode).cloned().unwrap_or_default();
        let nodes = script.nodes.get(&mode).cloned().unwrap_or_default();
        Ok(StorageStats::derive(&files, &nodes))
    }

    async fn production_stats(&self) -> Result<ProductionStats> {
        self.record("stats", Mode::Production)?;
        let script = self.lock();
        let files = script
            .files
            .get(&Mode::Production)
            .cloned()
            .unwrap_or_default();
        let nodes = script
            .nodes
            .get(&Mode::Production)
            .cloned()
            .unwrap_or_default();
        Ok(ProductionStats::derive(&files, &nodes))
    }

    async fn cluster(&self) -> Result<ClusterSnapshot> {
        self.record("cluster", Mode::Production)?;
        Ok(self.lock().cluster.clone().unwrap_or_else(test_cluster))
    }

    async fn logs(&self) -> Result<Vec<LogEntry>> {
        self.record("logs", Mode::Production)?;
        Ok(self.lock().logs.clone())
    }

    async fn secure_stats(&self, token: Option<&str>) -> Result<SecureStats> {
        self.record("stats", Mode::Secure)?;
        if token.is_none() {
            return Err(Error::server(401, "Token required"));
        }
        Ok(self.lock().secure_stats.clone())
    }

    async fn upload(
        &self,
        mode: Mode,
        filename: &str,
        data: Vec<u8>,
        _token: Option<&str>,
    ) -> Result<UploadReceipt> {
        self.record("upload", mode)?;
        let mut script = self.lock();
        if script.failing_uploads.contains(filename) {
            return Err(Error::server(500, "Storage node unavailable"));
        }
        let file_id = format!("id-{}", script.calls.len());
        script
            .files
            .entry(mode)
            .or_default()
            .push(FileRecord::new(file_id.clone(), filename, data.len() as u64));
        Ok(UploadReceipt {
            message: Some("File uploaded successfully".to_string()),
            file_id: Some(file_id),
        })
    }

    fn download_url(&self, mode: Mode, file_id: &str) -> String {
        format!("http://fake/{}/download/{}", mode, file_id)
    }

    async fn download(&self, mode: Mode, file_id: &str, _token: Option<&str>) -> Result<Bytes> {
        self.record("download", mode)?;
        let script = self.lock();
        let found = script
            .files
            .get(&mode)
            .and_then(|files| files.iter().find(|f| f.file_id == file_id));
        match found {
            Some(file) => Ok(Bytes::from(vec![0u8; file.file_size as usize])),
            None => Err(Error::server(404, "File not found")),
        }
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome> {
        self.record("login", Mode::Secure)?;
        match self.lock().users.get(username) {
            Some((expected, is_admin)) if expected == password => Ok(LoginOutcome {
                user: User {
                    username: username.to_string(),
                    is_admin: *is_admin,
                },
                token: Some(format!("token-{username}")),
            }),
            _ => Err(Error::server(401, "Invalid credentials")),
        }
    }

    async fn register(&self, username: &str, password: &str, is_admin: bool) -> Result<String> {
        self.record("register", Mode::Secure)?;
        let mut script = self.lock();
        if script.users.contains_key(username) {
            return Err(Error::server(400, "Username already exists"));
        }
        script
            .users
            .insert(username.to_string(), (password.to_string(), is_admin));
        Ok("User registered successfully".to_string())
    }

    async fn delete_file(&self, file_id: &str, _token: Option<&str>) -> Result<String> {
        self.record("delete", Mode::Secure)?;
        let mut script = self.lock();
        let files = script.files.entry(Mode::Secure).or_default();
        let before = files.len();
        files.retain(|f| f.file_id != file_id);
        if files.len() == before {
            return Err(Error::server(404, "File not found or access denied"));
        }
        Ok("File deleted successfully".to_string())
    }

    async fn redistribute(&self) -> Result<RedistributeReport> {
        self.record("redistribute", Mode::Distributed)?;
        Ok(RedistributeReport {
            message: "Redistributed 0 chunks".to_string(),
            timestamp: None,
        })
    }

    async fn health(&self) -> Result<HealthReport> {
        self.lock().calls.push("health".to_string());
        Ok(HealthReport {
            status: "healthy".to_string(),
            message: "SDFBS Unified Server is running".to_string(),
            modes: Mode::ALL.iter().map(|m| m.to_string()).collect(),
            timestamp: None,
        })
    }
}
