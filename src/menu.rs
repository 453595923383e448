//! Copy menus and their shared acknowledgment window.
//!
//! Both menus follow the same two-state pattern: a selection arms a short
//! "copied" window, and further selections are ignored until it lapses. The
//! window stores a deadline instead of scheduling a reset callback, so
//! dropping a menu mid-window leaves nothing behind and re-entry is decided
//! by comparing against the caller's clock.

use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::clipboard::ClipboardWriter;
use crate::command::{self, AgentProfile, ConnectionSettings, OsTarget};
use crate::error::CommandError;
use crate::notify::Notifier;
use crate::text::Translator;

/// How long the copied acknowledgment lasts.
pub const COPY_HOLD: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CopyState {
    Idle,
    Copying { until: Instant },
}

/// Leading-edge guard around a copy action: `Idle` until armed, `Copying`
/// until a deadline. One window per menu instance, no cross-menu state.
#[derive(Debug, Clone, Copy)]
pub struct CopyWindow {
    state: CopyState,
    hold: Duration,
}

impl CopyWindow {
    pub fn new() -> Self {
        Self::with_hold(COPY_HOLD)
    }

    /// A window that rejects re-entry for `hold` instead of the default.
    pub fn with_hold(hold: Duration) -> Self {
        Self {
            state: CopyState::Idle,
            hold,
        }
    }

    /// Whether the acknowledgment is still showing at `now`.
    pub fn is_copying(&self, now: Instant) -> bool {
        match self.state {
            CopyState::Idle => false,
            CopyState::Copying { until } => now < until,
        }
    }

    /// Arm the window unless a previous copy is still acknowledged. Returns
    /// false on re-entry, which serializes copy attempts per instance.
    pub fn try_begin(&mut self, now: Instant) -> bool {
        if self.is_copying(now) {
            return false;
        }
        self.state = CopyState::Copying {
            until: now + self.hold,
        };
        true
    }
}

impl Default for CopyWindow {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives the install-command dropdown: selecting a target generates the
/// command for the current settings and profile and places it on the
/// clipboard. Every failure is reported through the notifier; none is fatal
/// to the menu.
pub struct InstallMenu<C, N, T> {
    clipboard: C,
    notifier: N,
    translator: T,
    window: CopyWindow,
}

impl<C: ClipboardWriter, N: Notifier, T: Translator> InstallMenu<C, N, T> {
    pub fn new(clipboard: C, notifier: N, translator: T) -> Self {
        Self {
            clipboard,
            notifier,
            translator,
            window: CopyWindow::new(),
        }
    }

    /// Whether the copied acknowledgment is showing at `now`.
    pub fn is_copying(&self, now: Instant) -> bool {
        self.window.is_copying(now)
    }

    /// Handle a target selection at `now`. A selection while a previous copy
    /// is still acknowledged is a no-op; the window runs its course whether
    /// or not the copy succeeds.
    pub fn select(
        &mut self,
        target: OsTarget,
        settings: Option<&ConnectionSettings>,
        profile: Option<&AgentProfile>,
        now: Instant,
    ) {
        if !self.window.try_begin(now) {
            return;
        }
        if let Err(e) = self.copy_command(target, settings, profile) {
            let title = self.translator.text("error");
            let detail = self.translator.text(e.message_key());
            self.notifier.show(&title, &detail);
        }
    }

    fn copy_command(
        &mut self,
        target: OsTarget,
        settings: Option<&ConnectionSettings>,
        profile: Option<&AgentProfile>,
    ) -> Result<(), CommandError> {
        let profile = profile.ok_or(CommandError::MissingProfile)?;
        let settings = settings.ok_or(CommandError::MissingSettings)?;
        let cmd = command::generate(target, settings, profile)?;
        self.clipboard.copy(&cmd).map_err(CommandError::Clipboard)
    }
}

/// A node's operator notes. Either side may be unset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Note {
    #[serde(default)]
    pub private: Option<String>,
    #[serde(default)]
    pub public: Option<String>,
}

impl Note {
    /// The requested note text, treating empty strings as absent.
    pub fn get(&self, kind: NoteKind) -> Option<&str> {
        let text = match kind {
            NoteKind::Private => self.private.as_deref(),
            NoteKind::Public => self.public.as_deref(),
        };
        text.filter(|t| !t.is_empty())
    }
}

/// Which of the two notes to copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    Private,
    Public,
}

/// Copies a node note to the clipboard. A missing note is a warning, not an
/// error, and does not arm the acknowledgment window; the write itself is
/// fire-and-forget.
pub struct NoteMenu<C, N, T> {
    note: Note,
    clipboard: C,
    notifier: N,
    translator: T,
    window: CopyWindow,
}

impl<C: ClipboardWriter, N: Notifier, T: Translator> NoteMenu<C, N, T> {
    pub fn new(note: Note, clipboard: C, notifier: N, translator: T) -> Self {
        Self {
            note,
            clipboard,
            notifier,
            translator,
            window: CopyWindow::new(),
        }
    }

    /// Whether the copied acknowledgment is showing at `now`.
    pub fn is_copying(&self, now: Instant) -> bool {
        self.window.is_copying(now)
    }

    /// Copy the requested note at `now`.
    pub fn copy(&mut self, kind: NoteKind, now: Instant) {
        let Some(text) = self.note.get(kind) else {
            let title = self.translator.text("warning");
            let detail = self.translator.text("no-note");
            self.notifier.show(&title, &detail);
            return;
        };
        if !self.window.try_begin(now) {
            return;
        }
        let _ = self.clipboard.copy(text);
    }
}
