//! Error taxonomy for command generation and the copy menus.
//!
//! Every variant is recoverable at the UI boundary: the menus catch these and
//! report them through the notifier, the one-shot CLI paths print them to
//! stderr and exit non-zero. Nothing here aborts the process on its own.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// No operator profile is available (provider absent or still loading).
    #[error("profile is not found")]
    MissingProfile,

    /// No connection settings are available.
    #[error("settings is not found")]
    MissingSettings,

    /// `install_host` is absent or empty.
    #[error("install host required")]
    MissingHost,

    /// The profile carries no secret and its role has no shared-key fallback.
    #[error("agent secret required")]
    MissingSecret,

    /// A raw selector (CLI string, legacy numeric value) named no known OS.
    #[error("unknown OS: {0}")]
    UnknownOs(String),

    /// The system clipboard rejected the write.
    #[error("clipboard: {0}")]
    Clipboard(String),
}

impl CommandError {
    /// Translation key for the human-facing description of this error.
    pub fn message_key(&self) -> &'static str {
        match self {
            CommandError::MissingProfile => "profile-not-found",
            CommandError::MissingSettings => "settings-not-found",
            CommandError::MissingHost => "install-host-required",
            CommandError::MissingSecret => "agent-secret-required",
            CommandError::UnknownOs(_) => "unknown-os",
            CommandError::Clipboard(_) => "clipboard-failed",
        }
    }
}
