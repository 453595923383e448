//! Agentctl library crate
//!
//! This crate provides the core functionality for the `agentctl` CLI. It is
//! organized into small modules: `command` (install-command generation),
//! `menu` (the install and note copy menus with their shared acknowledgment
//! window), `clipboard` (cross-platform clipboard helper), `notify` and
//! `text` (user-facing messages), and `config` (local node config). The
//! binary `src/main.rs` calls `agentctl_lib::run()` to execute the CLI.
//!
//! Public API
//!
//! - `run()` — CLI entrypoint used by the binary.
//!
//! See each module for detailed documentation on functions and behavior.

pub mod clipboard;
pub mod command;
pub mod config;
pub mod error;
pub mod menu;
pub mod notify;
pub mod text;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use clap::{ArgAction, Parser, Subcommand};

use crate::clipboard::{SystemClipboard, copy_to_clipboard};
use crate::command::{AgentProfile, ConnectionSettings, OsTarget};
use crate::config::NodeConfig;
use crate::error::CommandError;
use crate::menu::{InstallMenu, NoteKind, NoteMenu};
use crate::notify::StderrNotifier;
use crate::text::{Catalog, Translator};

/// Top-level CLI types and runner. Keep `main.rs` thin.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the agent install command for a target OS
    Install {
        /// Target: linux, macos, windows, linux-cn, macos-cn, windows-cn
        #[arg(long = "os")]
        os: String,

        /// Node config file (settings, profile, note)
        #[arg(long = "config", default_value = config::DEFAULT_PATH)]
        config: PathBuf,

        /// Override the install host from the config
        #[arg(long = "server")]
        server: Option<String>,

        /// Agents connect over TLS
        #[arg(long = "tls", action = ArgAction::SetTrue)]
        tls: bool,

        /// Override the client secret from the config
        #[arg(long = "secret")]
        secret: Option<String>,

        /// Copy the command to the clipboard
        #[arg(long = "copy", action = ArgAction::SetTrue)]
        copy: bool,
    },
    /// Print a node note
    Note {
        /// Which note: private or public
        which: String,

        /// Node config file (settings, profile, note)
        #[arg(long = "config", default_value = config::DEFAULT_PATH)]
        config: PathBuf,

        /// Copy the note to the clipboard
        #[arg(long = "copy", action = ArgAction::SetTrue)]
        copy: bool,
    },
    /// Interactive menu over the same copy actions
    Menu {
        /// Node config file (settings, profile, note)
        #[arg(long = "config", default_value = config::DEFAULT_PATH)]
        config: PathBuf,
    },
}

/// Run the agentctl CLI.
///
/// This function is the high-level entrypoint used by the `agentctl` binary.
/// It parses CLI arguments and dispatches to module functions. Errors are
/// printed to stderr and cause the process to exit with a non-zero code
/// where appropriate.
///
/// Behavior summary:
/// - `install` — print the install one-liner for a target OS, optionally
///   copying it to the clipboard.
/// - `note` — print the node's private or public note, optionally copying it.
/// - `menu` — interactive loop driving the same copy actions the dashboard
///   menus expose, with the copied acknowledgment window live.
pub fn run() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Install {
            os,
            config,
            server,
            tls,
            secret,
            copy,
        } => {
            let target = OsTarget::from_str(&os).unwrap_or_else(|e| {
                eprintln!("error: {}", e);
                std::process::exit(1);
            });
            let cfg = load_config(&config);

            let mut settings = cfg.settings;
            if let Some(server) = server {
                settings
                    .get_or_insert_with(ConnectionSettings::default)
                    .install_host = Some(server);
            }
            if tls {
                settings.get_or_insert_with(ConnectionSettings::default).tls = Some(true);
            }
            let mut profile = cfg.profile;
            if let Some(secret) = secret {
                profile.get_or_insert_with(AgentProfile::default).agent_secret = Some(secret);
            }

            let cmd = install_command(target, settings.as_ref(), profile.as_ref())
                .unwrap_or_else(|e| {
                    eprintln!("error: {}", e);
                    std::process::exit(1);
                });

            println!("{}", cmd);

            if copy && let Err(e) = copy_to_clipboard(&cmd) {
                eprintln!("warning: failed to copy to clipboard: {}", e);
            }
        }
        Commands::Note {
            which,
            config,
            copy,
        } => {
            let kind = match which.as_str() {
                "private" => NoteKind::Private,
                "public" => NoteKind::Public,
                other => {
                    eprintln!("error: unknown note: {}", other);
                    std::process::exit(1);
                }
            };
            let cfg = load_config(&config);
            let note = cfg.note.unwrap_or_default();

            match note.get(kind) {
                Some(text) => {
                    println!("{}", text);
                    if copy && let Err(e) = copy_to_clipboard(text) {
                        eprintln!("warning: failed to copy to clipboard: {}", e);
                    }
                }
                None => {
                    eprintln!("warning: {}", Catalog.text("no-note"));
                    std::process::exit(1);
                }
            }
        }
        Commands::Menu { config } => {
            let cfg = load_config(&config);
            run_menu(cfg);
        }
    }
}

/// Resolve the providers the way the install menu does, then generate.
fn install_command(
    target: OsTarget,
    settings: Option<&ConnectionSettings>,
    profile: Option<&AgentProfile>,
) -> Result<String, CommandError> {
    let profile = profile.ok_or(CommandError::MissingProfile)?;
    let settings = settings.ok_or(CommandError::MissingSettings)?;
    command::generate(target, settings, profile)
}

fn load_config(path: &Path) -> NodeConfig {
    NodeConfig::load(path).unwrap_or_else(|e| {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    })
}

/// Interactive loop over the same copy actions the one-shot commands expose.
///
/// Selections route through the real menu components, so the copied
/// acknowledgment (the `[copied]` prompt) and the re-entrancy guard behave
/// exactly as they do for the dashboard menus.
fn run_menu(cfg: NodeConfig) {
    let mut install = InstallMenu::new(SystemClipboard, StderrNotifier, Catalog);
    let mut notes = NoteMenu::new(
        cfg.note.clone().unwrap_or_default(),
        SystemClipboard,
        StderrNotifier,
        Catalog,
    );

    println!("Targets: linux, macos, windows, linux-cn, macos-cn, windows-cn");
    println!("Notes: 'note private', 'note public'. Type 'exit' to quit.");

    let stdin = io::stdin();
    let mut handle = stdin.lock();
    let mut input = String::new();

    loop {
        let now = Instant::now();
        let copying = install.is_copying(now) || notes.is_copying(now);
        print!("{} ", if copying { "[copied]" } else { ">" });
        let _ = io::stdout().flush();

        input.clear();
        match handle.read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("error: {}", e);
                break;
            }
        }

        let line = input.trim();
        if line == "exit" {
            break;
        }
        if line.is_empty() {
            continue;
        }

        let now = Instant::now();
        match line {
            "note private" => notes.copy(NoteKind::Private, now),
            "note public" => notes.copy(NoteKind::Public, now),
            _ => match OsTarget::from_str(line) {
                Ok(target) => {
                    install.select(target, cfg.settings.as_ref(), cfg.profile.as_ref(), now)
                }
                Err(e) => eprintln!("error: {}", e),
            },
        }
    }
}
