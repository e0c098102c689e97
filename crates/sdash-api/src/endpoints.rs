//! URL construction for the per-mode API namespaces

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

use sdash_core::prelude::*;
use sdash_core::Mode;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Endpoint URLs rooted at one server base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// Validate `base_url` (absolute http/https) and strip trailing slashes.
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed =
            Url::parse(base_url).map_err(|e| Error::invalid_url(base_url, e.to_string()))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::invalid_url(
                base_url,
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }

        Ok(Self {
            base: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `{server}/{mode}`
    pub fn mode_base(&self, mode: Mode) -> String {
        format!("{}/{}", self.base, mode.as_str())
    }

    /// `{server}/{mode}/{path}`
    pub fn mode_path(&self, mode: Mode, path: &str) -> String {
        format!("{}/{}", self.mode_base(mode), path.trim_start_matches('/'))
    }

    pub fn files(&self, mode: Mode) -> String {
        self.mode_path(mode, "files")
    }

    pub fn nodes(&self, mode: Mode) -> String {
        self.mode_path(mode, "nodes")
    }

    pub fn upload(&self, mode: Mode) -> String {
        self.mode_path(mode, "upload")
    }

    pub fn download(&self, mode: Mode, file_id: &str) -> String {
        self.mode_path(mode, &format!("download/{}", encode_segment(file_id)))
    }

    pub fn delete(&self, mode: Mode, file_id: &str) -> String {
        self.mode_path(mode, &format!("delete/{}", encode_segment(file_id)))
    }

    pub fn health(&self) -> String {
        format!("{}/health", self.base)
    }
}

fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}
