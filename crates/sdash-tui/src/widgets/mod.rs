//! Custom widget components

mod auth_form;
mod cluster;
mod files;
mod header;
mod logs;
mod nodes;
mod notices;
mod stats;
mod status_bar;
mod upload;

pub use auth_form::AuthFormView;
pub use cluster::ClusterGrid;
pub use files::FileList;
pub use header::ModeHeader;
pub use logs::ReplicationLog;
pub use nodes::NodeList;
pub use notices::NoticeBar;
pub use stats::{AdminSummary, StatsPanel};
pub use status_bar::KeyHints;
pub use upload::UploadPanel;
