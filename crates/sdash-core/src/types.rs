//! Domain types shared by the API client, the application state and the views

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Error;

/// Point in time reported by the backend, converted to local time.
pub type Timestamp = DateTime<Local>;

// ─────────────────────────────────────────────────────────────────────────────
// Mode
// ─────────────────────────────────────────────────────────────────────────────

/// One of the four parallel API namespaces exposed by the storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Simple,
    Distributed,
    Production,
    Secure,
}

impl Mode {
    /// All modes in tab order
    pub const ALL: [Mode; 4] = [
        Mode::Simple,
        Mode::Distributed,
        Mode::Production,
        Mode::Secure,
    ];

    /// Path segment of this mode's API namespace (`{server}/{segment}`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Simple => "simple",
            Mode::Distributed => "distributed",
            Mode::Production => "production",
            Mode::Secure => "secure",
        }
    }

    /// Capitalized display name
    pub fn title(&self) -> &'static str {
        match self {
            Mode::Simple => "Simple",
            Mode::Distributed => "Distributed",
            Mode::Production => "Production",
            Mode::Secure => "Secure",
        }
    }

    /// Theme accent as an RGB triple
    pub fn accent_rgb(&self) -> (u8, u8, u8) {
        match self {
            Mode::Simple => (0x66, 0x7e, 0xea),
            Mode::Distributed => (0xf5, 0x57, 0x6c),
            Mode::Production => (0xfc, 0xb6, 0x9f),
            Mode::Secure => (0x00, 0xff, 0xff),
        }
    }

    /// Position in [`Mode::ALL`]
    pub fn index(&self) -> usize {
        match self {
            Mode::Simple => 0,
            Mode::Distributed => 1,
            Mode::Production => 2,
            Mode::Secure => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Mode> {
        Mode::ALL.get(index).copied()
    }

    /// Next mode in tab order (wraps)
    pub fn next(&self) -> Mode {
        Mode::ALL[(self.index() + 1) % Mode::ALL.len()]
    }

    /// Previous mode in tab order (wraps)
    pub fn prev(&self) -> Mode {
        Mode::ALL[(self.index() + Mode::ALL.len() - 1) % Mode::ALL.len()]
    }

    /// Whether this mode lists storage nodes
    pub fn has_node_list(&self) -> bool {
        matches!(self, Mode::Simple | Mode::Distributed)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Mode::Simple),
            "distributed" => Ok(Mode::Distributed),
            "production" => Ok(Mode::Production),
            "secure" => Ok(Mode::Secure),
            _ => Err(Error::invalid_mode(s)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Lenient field decoding
// ─────────────────────────────────────────────────────────────────────────────

/// Parse a backend timestamp.
///
/// Accepts RFC 3339 and the offset-less ISO form the backend emits
/// (`2024-05-01T12:30:00.123456`), which is interpreted as local time.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Local.from_local_datetime(&naive).earliest();
        }
    }
    None
}

/// Unparseable or missing timestamps become `None` instead of failing the record.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

/// `null` counts are treated as zero.
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<u64> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or(0))
}

fn is_active_status(status: Option<&str>) -> bool {
    status == Some("active")
}

// ─────────────────────────────────────────────────────────────────────────────
// Entities
// ─────────────────────────────────────────────────────────────────────────────

/// Chunk availability summary attached to distributed-mode files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultTolerance {
    #[serde(default, deserialize_with = "lenient_count")]
    pub available_chunks: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_chunks: u64,
    #[serde(default)]
    pub reconstructable: bool,
    #[serde(default)]
    pub failed_nodes: Vec<String>,
}

/// A stored file as listed by `/files`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    #[serde(default)]
    pub file_id: String,
    #[serde(default)]
    pub filename: String,
    /// Size in bytes
    #[serde(default, deserialize_with = "lenient_count")]
    pub file_size: u64,
    /// Owning node (`local`, `distributed`, ...)
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub upload_time: Option<Timestamp>,
    #[serde(default)]
    pub fault_tolerance: Option<FaultTolerance>,
    /// Secure mode only
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub encrypted: bool,
}

impl FileRecord {
    pub fn new(file_id: impl Into<String>, filename: impl Into<String>, file_size: u64) -> Self {
        Self {
            file_id: file_id.into(),
            filename: filename.into(),
            file_size,
            node_id: None,
            upload_time: None,
            fault_tolerance: None,
            owner: None,
            encrypted: false,
        }
    }
}

/// A storage node's health/capacity telemetry as listed by `/nodes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(default)]
    pub node_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub files_count: u64,
    /// Bytes
    #[serde(default, deserialize_with = "lenient_count")]
    pub storage_used: u64,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_heartbeat: Option<Timestamp>,
}

impl NodeRecord {
    pub fn new(node_id: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            status: Some(status.into()),
            files_count: 0,
            storage_used: 0,
            last_heartbeat: None,
        }
    }

    pub fn is_active(&self) -> bool {
        is_active_status(self.status.as_deref())
    }
}

/// One node of the production cluster snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSummary {
    #[serde(default)]
    pub node_id: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub files: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub chunks: u64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_sync: Option<Timestamp>,
}

impl NodeSummary {
    pub fn is_active(&self) -> bool {
        is_active_status(self.status.as_deref())
    }
}

/// Point-in-time view of the production master and its replicas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    pub master: NodeSummary,
    #[serde(default)]
    pub slaves: Vec<NodeSummary>,
}

/// A replication log line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<Timestamp>,
    /// Wire name is `type` (`replication`, `success`, ...)
    #[serde(rename = "type", default)]
    pub category: String,
    #[serde(default)]
    pub message: String,
}

impl LogEntry {
    pub fn new(
        timestamp: Option<Timestamp>,
        category: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            category: category.into(),
            message: message.into(),
        }
    }
}

/// Authenticated user as returned by `/secure/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Secure-mode authentication state. Lives only for the process lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub authenticated: bool,
    pub user: Option<User>,
    /// Bearer token for secure-namespace requests
    pub token: Option<String>,
}

impl Session {
    pub fn sign_in(&mut self, user: User, token: Option<String>) {
        self.authenticated = true;
        self.user = Some(user);
        self.token = token;
    }

    pub fn clear(&mut self) {
        *self = Session::default();
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_admin)
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Aggregates
// ─────────────────────────────────────────────────────────────────────────────

/// Stats derived from the simple/distributed file and node lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    pub total_files: usize,
    pub active_nodes: usize,
    /// Bytes
    pub total_storage: u64,
}

impl StorageStats {
    pub fn derive(files: &[FileRecord], nodes: &[NodeRecord]) -> Self {
        Self {
            total_files: files.len(),
            active_nodes: nodes.iter().filter(|n| n.is_active()).count(),
            total_storage: files.iter().map(|f| f.file_size).sum(),
        }
    }
}

/// Master/slave counts for the production overview
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductionStats {
    pub total_files: usize,
    pub master_nodes: usize,
    pub slave_nodes: usize,
    pub replication_status: String,
}

impl ProductionStats {
    pub fn derive(files: &[FileRecord], nodes: &[NodeRecord]) -> Self {
        let master_nodes = nodes.iter().filter(|n| n.node_id == "master").count();
        let replication_status = if nodes.iter().all(|n| n.is_active()) {
            "Healthy"
        } else {
            "Degraded"
        };
        Self {
            total_files: files.len(),
            master_nodes,
            slave_nodes: nodes.len() - master_nodes,
            replication_status: replication_status.to_string(),
        }
    }
}

/// Per-user statistics from `/secure/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecureStats {
    #[serde(default, deserialize_with = "lenient_count")]
    pub files_count: u64,
    #[serde(default)]
    pub storage_used_mb: f64,
    #[serde(default = "default_last_activity")]
    pub last_activity: String,
}

fn default_last_activity() -> String {
    "No downloads yet".to_string()
}

/// Aggregate statistics shown in a mode's stats panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModeStats {
    Storage(StorageStats),
    Production(ProductionStats),
    Secure(SecureStats),
}

// ─────────────────────────────────────────────────────────────────────────────
// Small response bodies
// ─────────────────────────────────────────────────────────────────────────────

/// Successful `/upload` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub file_id: Option<String>,
}

/// `/distributed/redistribute` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RedistributeReport {
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<Timestamp>,
}

/// `/health` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub modes: Vec<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_mode_round_trips_through_str() {
        for mode in Mode::ALL {
            assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
        }
        assert_eq!("Production".parse::<Mode>().unwrap(), Mode::Production);
        assert!("turbo".parse::<Mode>().is_err());
    }

    #[test]
    fn test_mode_cycling_wraps() {
        assert_eq!(Mode::Secure.next(), Mode::Simple);
        assert_eq!(Mode::Simple.prev(), Mode::Secure);
        assert_eq!(Mode::from_index(2), Some(Mode::Production));
        assert_eq!(Mode::from_index(4), None);
    }

    #[test]
    fn test_parse_timestamp_accepts_naive_iso() {
        let ts = parse_timestamp("2024-05-01T12:30:45.123456").unwrap();
        assert_eq!(ts.year(), 2024);
        assert_eq!(ts.hour(), 12);
        assert_eq!(ts.second(), 45);
    }

    #[test]
    fn test_parse_timestamp_accepts_rfc3339() {
        assert!(parse_timestamp("2024-05-01T12:30:45Z").is_some());
        assert!(parse_timestamp("2024-05-01T12:30:45+02:00").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_file_record_ignores_unknown_fields() {
        let json = r#"{
            "file_id": "abc",
            "filename": "a.txt",
            "file_size": 2048,
            "node_id": "distributed",
            "upload_time": "2024-05-01T12:30:45",
            "chunks": [{"chunk_id": "c1"}],
            "checksum": "deadbeef",
            "fault_tolerance": {
                "available_chunks": 2,
                "total_chunks": 3,
                "reconstructable": false,
                "failed_nodes": ["node-02"]
            }
        }"#;
        let file: FileRecord = serde_json::from_str(json).unwrap();
        assert_eq!(file.file_id, "abc");
        assert_eq!(file.file_size, 2048);
        assert!(file.upload_time.is_some());
        let ft = file.fault_tolerance.unwrap();
        assert_eq!(ft.failed_nodes, vec!["node-02".to_string()]);
        assert!(!ft.reconstructable);
    }

    #[test]
    fn test_node_record_defaults_missing_fields() {
        let node: NodeRecord = serde_json::from_str(r#"{"node_id": "n1"}"#).unwrap();
        assert_eq!(node.status, None);
        assert_eq!(node.files_count, 0);
        assert_eq!(node.storage_used, 0);
        assert!(node.last_heartbeat.is_none());
        assert!(!node.is_active());
    }

    #[test]
    fn test_node_record_null_counts_are_zero() {
        let node: NodeRecord = serde_json::from_str(
            r#"{"node_id": "n1", "status": "active", "files_count": null, "last_heartbeat": null}"#,
        )
        .unwrap();
        assert_eq!(node.files_count, 0);
        assert!(node.is_active());
    }

    #[test]
    fn test_log_entry_reads_type_field() {
        let entry: LogEntry = serde_json::from_str(
            r#"{"timestamp": "2024-05-01T12:00:00", "type": "replication", "message": "synced"}"#,
        )
        .unwrap();
        assert_eq!(entry.category, "replication");
        assert_eq!(entry.message, "synced");
    }

    #[test]
    fn test_storage_stats_derive() {
        let files = vec![
            FileRecord::new("1", "a", 524_288),
            FileRecord::new("2", "b", 524_288),
        ];
        let nodes = vec![
            NodeRecord::new("n1", "active"),
            NodeRecord::new("n2", "failed"),
        ];
        let stats = StorageStats::derive(&files, &nodes);
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.active_nodes, 1);
        assert_eq!(stats.total_storage, 1_048_576);
    }

    #[test]
    fn test_storage_stats_zero_active_nodes() {
        let nodes = vec![NodeRecord::new("n1", "failed")];
        assert_eq!(StorageStats::derive(&[], &nodes).active_nodes, 0);
        assert_eq!(StorageStats::derive(&[], &[]).active_nodes, 0);
    }

    #[test]
    fn test_production_stats_splits_master_and_slaves() {
        let nodes = vec![
            NodeRecord::new("master", "active"),
            NodeRecord::new("slave-01", "active"),
            NodeRecord::new("slave-02", "active"),
        ];
        let stats = ProductionStats::derive(&[], &nodes);
        assert_eq!(stats.master_nodes, 1);
        assert_eq!(stats.slave_nodes, 2);
        assert_eq!(stats.replication_status, "Healthy");
    }

    #[test]
    fn test_session_sign_in_and_clear() {
        let mut session = Session::default();
        assert!(!session.is_authenticated());

        session.sign_in(
            User {
                username: "alice".into(),
                is_admin: true,
            },
            Some("tok".into()),
        );
        assert!(session.is_authenticated());
        assert!(session.is_admin());
        assert_eq!(session.username(), Some("alice"));

        session.clear();
        assert_eq!(session, Session::default());
    }
}
