//! Key-based message catalog.
//!
//! The copy menus pass message keys, never final copy, so a different
//! localization backend can be swapped in without touching command
//! generation. The built-in [`Catalog`] resolves keys to English.

/// Resolves a message key to user-facing text.
pub trait Translator {
    fn text(&self, key: &str) -> String;
}

/// Built-in English catalog. Unknown keys echo back, which keeps a missing
/// entry visible instead of rendering blank.
#[derive(Debug, Default, Clone, Copy)]
pub struct Catalog;

impl Translator for Catalog {
    fn text(&self, key: &str) -> String {
        lookup(key).unwrap_or(key).to_string()
    }
}

fn lookup(key: &str) -> Option<&'static str> {
    match key {
        "error" => Some("Error"),
        "warning" => Some("Warning"),
        "profile-not-found" => Some("Profile is not found."),
        "settings-not-found" => Some("Settings is not found."),
        "install-host-required" => Some("An install host is required."),
        "agent-secret-required" => Some("An agent secret is required."),
        "unknown-os" => Some("Unknown OS selection."),
        "clipboard-failed" => Some("Could not write to the clipboard."),
        "no-note" => Some("You didn't have any note."),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_key_resolves() {
        assert_eq!(Catalog.text("no-note"), "You didn't have any note.");
    }

    #[test]
    fn unknown_key_echoes() {
        assert_eq!(Catalog.text("not-a-key"), "not-a-key");
    }
}
