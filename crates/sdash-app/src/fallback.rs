//! Placeholder data shown when a mode cannot reach the server
//!
//! Everything here is synthetic. Callers must flag the mode as degraded
//! whenever these values are shown.

use chrono::{Duration, Local};

use sdash_core::{
    ClusterSnapshot, LogEntry, Mode, ModeStats, NodeRecord, NodeSummary, ProductionStats,
    SecureStats, StorageStats, Timestamp,
};

use crate::state::ModeData;

/// Replace `data`'s nodes, stats, cluster and logs with placeholders for `mode`
pub fn apply_placeholder(mode: Mode, data: &mut ModeData) {
    let now = Local::now();
    match mode {
        Mode::Simple | Mode::Distributed => {
            let nodes = placeholder_nodes(mode, now);
            data.stats = Some(ModeStats::Storage(stats_from_nodes(&nodes)));
            data.nodes = nodes;
        }
        Mode::Production => {
            data.stats = Some(ModeStats::Production(ProductionStats {
                total_files: 15,
                master_nodes: 1,
                slave_nodes: 1,
                replication_status: "Healthy".to_string(),
            }));
            data.cluster = Some(placeholder_cluster(now));
            data.logs = placeholder_logs(now);
        }
        Mode::Secure => {
            data.stats = Some(ModeStats::Secure(SecureStats {
                files_count: 0,
                storage_used_mb: 0.0,
                last_activity: "Unavailable".to_string(),
            }));
        }
    }
}

pub fn placeholder_nodes(mode: Mode, now: Timestamp) -> Vec<NodeRecord> {
    let node = |id: &str, files_count, storage_used| NodeRecord {
        node_id: id.to_string(),
        status: Some("active".to_string()),
        files_count,
        storage_used,
        last_heartbeat: Some(now),
    };
    match mode {
        Mode::Simple => vec![node("local", 2, 1_024_000)],
        Mode::Distributed => vec![
            node("node-01", 3, 2_048_000),
            node("node-02", 2, 1_536_000),
        ],
        Mode::Production | Mode::Secure => Vec::new(),
    }
}

fn stats_from_nodes(nodes: &[NodeRecord]) -> StorageStats {
    StorageStats {
        total_files: nodes.iter().map(|n| n.files_count as usize).sum(),
        active_nodes: nodes.iter().filter(|n| n.is_active()).count(),
        total_storage: nodes.iter().map(|n| n.storage_used).sum(),
    }
}

pub fn placeholder_cluster(now: Timestamp) -> ClusterSnapshot {
    let summary = |id: &str| NodeSummary {
        node_id: id.to_string(),
        files: 15,
        chunks: 45,
        status: Some("healthy".to_string()),
        last_sync: Some(now),
    };
    ClusterSnapshot {
        master: summary("master"),
        slaves: vec![summary("Slave Node 01")],
    }
}

pub fn placeholder_logs(now: Timestamp) -> Vec<LogEntry> {
    vec![
        LogEntry::new(Some(now), "replication", "File chunk replicated to slave-01"),
        LogEntry::new(
            Some(now - Duration::seconds(15)),
            "success",
            "Master-slave sync completed",
        ),
        LogEntry::new(
            Some(now - Duration::seconds(30)),
            "replication",
            "File chunk replicated to slave-02",
        ),
        LogEntry::new(
            Some(now - Duration::seconds(45)),
            "replication",
            "File chunk replicated to slave-03",
        ),
    ]
}
