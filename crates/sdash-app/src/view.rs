//! Renderer: pure mapping from cached entities to display fragments
//!
//! Every function here takes state by reference and returns plain data. The
//! fragments carry finished display strings (units converted, defaults
//! applied) and know nothing about the terminal; `sdash-tui` draws them and
//! headless mode serializes them.

use serde::Serialize;

use sdash_core::{
    format_clock, format_kb, format_mb, format_mb_value, format_timestamp, ClusterSnapshot,
    FaultTolerance, FileRecord, HealthReport, LogEntry, Mode, ModeStats, NodeRecord, NodeSummary,
};

use crate::state::{AppState, DataHealth};

const UNKNOWN_STATUS: &str = "unknown";
const NEVER: &str = "Never";

/// Indicator class for a node or cluster block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    Healthy,
    Unhealthy,
}

impl StatusClass {
    /// `active` is the only healthy status a node reports
    pub fn for_status(status: Option<&str>) -> Self {
        if status == Some("active") {
            StatusClass::Healthy
        } else {
            StatusClass::Unhealthy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusClass::Healthy => "healthy",
            StatusClass::Unhealthy => "unhealthy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileItem {
    pub file_id: String,
    pub filename: String,
    /// Size in KB, two decimals
    pub size: String,
    pub node: String,
    pub uploaded: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fault_tolerance: Option<String>,
}

/// The file list panel: items, or the inline error shown in their place
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum FileListView {
    Items(Vec<FileItem>),
    Error(String),
}

impl FileListView {
    pub fn items(&self) -> &[FileItem] {
        match self {
            FileListView::Items(items) => items,
            FileListView::Error(_) => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeCard {
    pub title: String,
    pub status: String,
    pub class: StatusClass,
    pub files: u64,
    pub storage: String,
    pub heartbeat: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Master,
    Slave,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterBlock {
    pub role: NodeRole,
    pub title: String,
    pub files: u64,
    pub chunks: u64,
    pub status: String,
    pub last_sync: String,
    pub class: StatusClass,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogLine {
    pub timestamp: String,
    pub category: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatTile {
    pub label: &'static str,
    pub value: String,
}

/// Whether the panel shows live data
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum HealthBadge {
    Loading,
    Live { updated: String },
    Degraded { reason: String, placeholder: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminPanel {
    pub status: String,
    pub message: String,
    pub modes: String,
}

/// Everything one mode displays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeView {
    pub mode: Mode,
    pub title: &'static str,
    pub health: HealthBadge,
    pub stats: Vec<StatTile>,
    pub files: FileListView,
    pub nodes: Vec<NodeCard>,
    pub cluster: Vec<ClusterBlock>,
    pub logs: Vec<LogLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<AdminPanel>,
}

// ─────────────────────────────────────────────────────────────────
// Per-collection renderers
// ─────────────────────────────────────────────────────────────────

pub fn render_file(file: &FileRecord) -> FileItem {
    FileItem {
        file_id: file.file_id.clone(),
        filename: file.filename.clone(),
        size: format_kb(file.file_size),
        node: file.node_id.clone().unwrap_or_else(|| "-".to_string()),
        uploaded: format_timestamp(file.upload_time.as_ref(), "Unknown"),
        owner: file.owner.clone(),
        fault_tolerance: file.fault_tolerance.as_ref().map(fault_tolerance_text),
    }
}

pub fn render_files(files: &[FileRecord], error: Option<&str>) -> FileListView {
    match error {
        Some(message) => FileListView::Error(message.to_string()),
        None => FileListView::Items(files.iter().map(render_file).collect()),
    }
}

pub fn render_node(node: &NodeRecord) -> NodeCard {
    NodeCard {
        title: format!("Node: {}", node.node_id),
        status: node
            .status
            .clone()
            .unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
        class: StatusClass::for_status(node.status.as_deref()),
        files: node.files_count,
        storage: format_mb(node.storage_used),
        heartbeat: format_timestamp(node.last_heartbeat.as_ref(), NEVER),
    }
}

pub fn render_nodes(nodes: &[NodeRecord]) -> Vec<NodeCard> {
    nodes.iter().map(render_node).collect()
}

fn cluster_block(role: NodeRole, node: &NodeSummary) -> ClusterBlock {
    let (title, class) = match role {
        NodeRole::Master => (format!("Master Node {}", node.node_id), StatusClass::Healthy),
        NodeRole::Slave => (
            format!("Slave Node {}", node.node_id),
            StatusClass::for_status(node.status.as_deref()),
        ),
    };
    ClusterBlock {
        role,
        title,
        files: node.files,
        chunks: node.chunks,
        status: node
            .status
            .clone()
            .unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
        last_sync: format_clock(node.last_sync.as_ref()),
        class,
    }
}

/// One master block followed by one block per slave, in order
pub fn render_cluster(cluster: &ClusterSnapshot) -> Vec<ClusterBlock> {
    std::iter::once(cluster_block(NodeRole::Master, &cluster.master))
        .chain(
            cluster
                .slaves
                .iter()
                .map(|slave| cluster_block(NodeRole::Slave, slave)),
        )
        .collect()
}

/// Newest first, at most `limit` lines. Entries without a timestamp sort last.
pub fn render_logs(logs: &[LogEntry], limit: usize) -> Vec<LogLine> {
    let mut sorted: Vec<&LogEntry> = logs.iter().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    sorted
        .into_iter()
        .take(limit)
        .map(|log| LogLine {
            timestamp: format_timestamp(log.timestamp.as_ref(), "-"),
            category: log.category.clone(),
            message: log.message.clone(),
        })
        .collect()
}

pub fn render_stats(stats: &ModeStats) -> Vec<StatTile> {
    match stats {
        ModeStats::Storage(s) => vec![
            StatTile {
                label: "Total Files",
                value: s.total_files.to_string(),
            },
            StatTile {
                label: "Active Nodes",
                value: s.active_nodes.to_string(),
            },
            StatTile {
                label: "Total Storage",
                value: format_mb(s.total_storage),
            },
        ],
        ModeStats::Production(s) => vec![
            StatTile {
                label: "Total Files",
                value: s.total_files.to_string(),
            },
            StatTile {
                label: "Master Nodes",
                value: s.master_nodes.to_string(),
            },
            StatTile {
                label: "Slave Nodes",
                value: s.slave_nodes.to_string(),
            },
            StatTile {
                label: "Replication",
                value: s.replication_status.clone(),
            },
        ],
        ModeStats::Secure(s) => vec![
            StatTile {
                label: "My Files",
                value: s.files_count.to_string(),
            },
            StatTile {
                label: "Storage Used",
                value: format_mb_value(s.storage_used_mb),
            },
            StatTile {
                label: "Last Activity",
                value: s.last_activity.clone(),
            },
        ],
    }
}

pub fn fault_tolerance_text(ft: &FaultTolerance) -> String {
    let chunks = format!("{}/{} chunks", ft.available_chunks, ft.total_chunks);
    if ft.reconstructable {
        format!("{chunks}, reconstructable")
    } else if ft.failed_nodes.is_empty() {
        format!("{chunks}, NOT reconstructable")
    } else {
        format!(
            "{chunks}, NOT reconstructable (failed: {})",
            ft.failed_nodes.join(", ")
        )
    }
}

fn render_admin(report: &HealthReport) -> AdminPanel {
    AdminPanel {
        status: report.status.clone(),
        message: report.message.clone(),
        modes: report.modes.join(", "),
    }
}

fn health_badge(health: &DataHealth, updated: Option<String>, loading: bool) -> HealthBadge {
    match health {
        DataHealth::Degraded {
            reason,
            placeholder,
        } => HealthBadge::Degraded {
            reason: reason.clone(),
            placeholder: *placeholder,
        },
        DataHealth::Live if !loading => HealthBadge::Live {
            updated: updated.unwrap_or_else(|| NEVER.to_string()),
        },
        DataHealth::Live => HealthBadge::Loading,
        DataHealth::Unloaded => HealthBadge::Loading,
    }
}

/// Assemble every fragment `mode` shows from the state store
pub fn mode_view(state: &AppState, mode: Mode) -> ModeView {
    let data = state.data(mode);
    let updated = data.last_updated.as_ref().map(|t| format_clock(Some(t)));

    let admin = if mode == Mode::Secure && state.session.is_admin() {
        data.server_health.as_ref().map(render_admin)
    } else {
        None
    };

    ModeView {
        mode,
        title: mode.title(),
        health: health_badge(&data.health, updated, data.is_loading()),
        stats: data.stats.as_ref().map(render_stats).unwrap_or_default(),
        files: render_files(&data.files, data.files_error.as_deref()),
        nodes: if mode.has_node_list() {
            render_nodes(&data.nodes)
        } else {
            Vec::new()
        },
        cluster: data
            .cluster
            .as_ref()
            .map(render_cluster)
            .unwrap_or_default(),
        logs: render_logs(&data.logs, state.settings.ui.log_limit),
        user: if mode == Mode::Secure {
            state.session.username().map(str::to_string)
        } else {
            None
        },
        admin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local};
    use sdash_core::{StorageStats, User};

    fn summary(id: &str, status: &str) -> NodeSummary {
        NodeSummary {
            node_id: id.to_string(),
            files: 0,
            chunks: 0,
            status: Some(status.to_string()),
            last_sync: Some(Local::now()),
        }
    }

    #[test]
    fn test_cluster_master_and_slave_blocks() {
        let cluster = ClusterSnapshot {
            master: NodeSummary {
                files: 10,
                chunks: 30,
                ..summary("m1", "healthy")
            },
            slaves: vec![NodeSummary {
                files: 5,
                chunks: 15,
                ..summary("s1", "active")
            }],
        };

        let blocks = render_cluster(&cluster);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].role, NodeRole::Master);
        assert_eq!(blocks[0].title, "Master Node m1");
        assert_eq!(blocks[0].class, StatusClass::Healthy);
        assert_eq!(blocks[1].role, NodeRole::Slave);
        assert_eq!(blocks[1].files, 5);
        assert_eq!(blocks[1].chunks, 15);
        assert_eq!(blocks[1].class.as_str(), "healthy");
    }

    #[test]
    fn test_slave_with_other_status_is_unhealthy() {
        let cluster = ClusterSnapshot {
            master: summary("m1", "degraded"),
            slaves: vec![summary("s1", "offline")],
        };
        let blocks = render_cluster(&cluster);
        assert_eq!(blocks[0].class, StatusClass::Healthy);
        assert_eq!(blocks[1].class, StatusClass::Unhealthy);
    }

    #[test]
    fn test_node_defaults() {
        let node = NodeRecord {
            node_id: "n1".to_string(),
            status: None,
            files_count: 0,
            storage_used: 0,
            last_heartbeat: None,
        };
        let card = render_node(&node);
        assert_eq!(card.title, "Node: n1");
        assert_eq!(card.status, "unknown");
        assert_eq!(card.class, StatusClass::Unhealthy);
        assert_eq!(card.files, 0);
        assert_eq!(card.storage, "0.00 MB");
        assert_eq!(card.heartbeat, "Never");
    }

    #[test]
    fn test_empty_collections_render_nothing() {
        assert!(render_nodes(&[]).is_empty());
        assert!(render_logs(&[], 10).is_empty());
        assert_eq!(render_files(&[], None), FileListView::Items(Vec::new()));
    }

    #[test]
    fn test_total_storage_one_megabyte() {
        let files = vec![
            FileRecord::new("1", "a", 524_288),
            FileRecord::new("2", "b", 524_288),
        ];
        let stats = StorageStats::derive(&files, &[]);
        let tiles = render_stats(&ModeStats::Storage(stats));
        let storage = tiles.iter().find(|t| t.label == "Total Storage").unwrap();
        assert_eq!(storage.value, "1.00 MB");
    }

    #[test]
    fn test_no_active_nodes_counts_zero() {
        let nodes = vec![NodeRecord::new("a", "offline"), NodeRecord::new("b", "failed")];
        let tiles = render_stats(&ModeStats::Storage(StorageStats::derive(&[], &nodes)));
        let active = tiles.iter().find(|t| t.label == "Active Nodes").unwrap();
        assert_eq!(active.value, "0");
    }

    #[test]
    fn test_file_size_in_kb() {
        let item = render_file(&FileRecord::new("1", "a.txt", 2048));
        assert_eq!(item.size, "2.00 KB");
        assert_eq!(item.node, "-");
    }

    #[test]
    fn test_file_error_replaces_list() {
        let files = vec![FileRecord::new("1", "a", 1)];
        let view = render_files(&files, Some("Error loading files: boom"));
        assert_eq!(view, FileListView::Error("Error loading files: boom".into()));
        assert!(view.items().is_empty());
    }

    #[test]
    fn test_logs_newest_first_and_capped() {
        let now = Local::now();
        let logs: Vec<LogEntry> = (0..15)
            .map(|i| {
                LogEntry::new(
                    Some(now - Duration::seconds(i)),
                    "replication",
                    format!("entry {i}"),
                )
            })
            .rev()
            .collect();

        let lines = render_logs(&logs, 10);
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0].message, "entry 0");
        assert_eq!(lines[9].message, "entry 9");
    }

    #[test]
    fn test_fault_tolerance_text() {
        let ok = FaultTolerance {
            available_chunks: 4,
            total_chunks: 4,
            reconstructable: true,
            failed_nodes: vec![],
        };
        assert_eq!(fault_tolerance_text(&ok), "4/4 chunks, reconstructable");

        let broken = FaultTolerance {
            available_chunks: 2,
            total_chunks: 4,
            reconstructable: false,
            failed_nodes: vec!["node-02".into()],
        };
        assert_eq!(
            fault_tolerance_text(&broken),
            "2/4 chunks, NOT reconstructable (failed: node-02)"
        );
    }

    #[test]
    fn test_mode_view_admin_panel_only_for_admins() {
        let mut state = AppState::new();
        state.data_mut(Mode::Secure).server_health = Some(HealthReport {
            status: "healthy".into(),
            message: "running".into(),
            modes: vec!["simple".into(), "secure".into()],
            timestamp: None,
        });

        state.session.sign_in(
            User {
                username: "bob".into(),
                is_admin: false,
            },
            Some("t".into()),
        );
        assert!(mode_view(&state, Mode::Secure).admin.is_none());

        state.session.sign_in(
            User {
                username: "alice".into(),
                is_admin: true,
            },
            Some("t".into()),
        );
        let view = mode_view(&state, Mode::Secure);
        assert_eq!(view.user.as_deref(), Some("alice"));
        assert_eq!(view.admin.unwrap().modes, "simple, secure");
    }

    #[test]
    fn test_mode_view_flags_placeholder() {
        let mut state = AppState::new();
        state.data_mut(Mode::Simple).health = DataHealth::Degraded {
            reason: "down".into(),
            placeholder: true,
        };
        let view = mode_view(&state, Mode::Simple);
        assert_eq!(
            view.health,
            HealthBadge::Degraded {
                reason: "down".into(),
                placeholder: true
            }
        );
    }
}
