//! Local node config: the CLI's stand-in for the dashboard's settings,
//! profile, and note providers.
//!
//! The file is JSON with three optional sections. Any of them may be absent,
//! mirroring providers that are unconfigured or still loading; the copy
//! actions report that case instead of failing hard.
//!
//! ```json
//! {
//!   "settings": { "agent_secret_key": "shared", "install_host": "example.com", "tls": true },
//!   "profile": { "agent_secret": "abc123", "role": 1 },
//!   "note": { "private": "door code 4711", "public": "rack 12" }
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::command::{AgentProfile, ConnectionSettings};
use crate::menu::Note;

/// Config file looked up when `--config` is not given.
pub const DEFAULT_PATH: &str = "agentctl.json";

/// Everything the copy actions read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeConfig {
    #[serde(default)]
    pub settings: Option<ConnectionSettings>,
    #[serde(default)]
    pub profile: Option<AgentProfile>,
    #[serde(default)]
    pub note: Option<Note>,
}

impl NodeConfig {
    /// Load the config from `path`. A missing file yields the empty config;
    /// an unreadable or malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }
}
