//! Install-command templates.
//!
//! This module exposes a single public entry point, `generate`, which renders
//! the one-liner that enrolls a node: download the install script for the
//! chosen OS, then run it with the connection parameters passed as `NZ_*`
//! variables. CN targets fetch the same script through a mirror proxy
//! reachable from mainland networks; the variables are identical to their
//! plain counterparts.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::CommandError;

const SHELL_SCRIPT: &str =
    "https://raw.githubusercontent.com/lsjnb/scripts/new-world/agent/install.sh";
const SHELL_SCRIPT_CN: &str =
    "https://github.geekery.cn/https://raw.githubusercontent.com/lsjnb/scripts/new-world/agent/install.sh";
const POWERSHELL_SCRIPT: &str =
    "https://raw.githubusercontent.com/lsjnb/scripts/new-world/agent/install.ps1";
const POWERSHELL_SCRIPT_CN: &str =
    "https://github.geekery.cn/https://raw.githubusercontent.com/lsjnb/scripts/new-world/agent/install.ps1";

/// Where the PowerShell installer lands before it is executed.
const POWERSHELL_LOCAL_PATH: &str = r"C:\install.ps1";

/// Protocol negotiation forced before the download, for hosts with old
/// Windows defaults.
const SECURITY_PROTOCOLS: &str = "[Net.ServicePointManager]::SecurityProtocol = \
     [Net.SecurityProtocolType]::Ssl3 -bor [Net.SecurityProtocolType]::Tls -bor \
     [Net.SecurityProtocolType]::Tls11 -bor [Net.SecurityProtocolType]::Tls12";

/// Deployment target for the install command.
///
/// Each variant carries a fixed script URL and template family, so `generate`
/// matches exhaustively; an unrecognized raw selector is rejected when it is
/// parsed, not when the command is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsTarget {
    Linux,
    MacOs,
    Windows,
    LinuxCn,
    MacOsCn,
    WindowsCn,
}

impl OsTarget {
    pub const ALL: [OsTarget; 6] = [
        OsTarget::Linux,
        OsTarget::MacOs,
        OsTarget::Windows,
        OsTarget::LinuxCn,
        OsTarget::MacOsCn,
        OsTarget::WindowsCn,
    ];

    /// Script URL the generated command downloads.
    pub fn script_url(self) -> &'static str {
        match self {
            OsTarget::Linux | OsTarget::MacOs => SHELL_SCRIPT,
            OsTarget::LinuxCn | OsTarget::MacOsCn => SHELL_SCRIPT_CN,
            OsTarget::Windows => POWERSHELL_SCRIPT,
            OsTarget::WindowsCn => POWERSHELL_SCRIPT_CN,
        }
    }

    fn is_windows(self) -> bool {
        matches!(self, OsTarget::Windows | OsTarget::WindowsCn)
    }
}

impl fmt::Display for OsTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OsTarget::Linux => "linux",
            OsTarget::MacOs => "macos",
            OsTarget::Windows => "windows",
            OsTarget::LinuxCn => "linux-cn",
            OsTarget::MacOsCn => "macos-cn",
            OsTarget::WindowsCn => "windows-cn",
        };
        f.write_str(name)
    }
}

impl FromStr for OsTarget {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linux" => Ok(OsTarget::Linux),
            "macos" => Ok(OsTarget::MacOs),
            "windows" => Ok(OsTarget::Windows),
            "linux-cn" => Ok(OsTarget::LinuxCn),
            "macos-cn" => Ok(OsTarget::MacOsCn),
            "windows-cn" => Ok(OsTarget::WindowsCn),
            _ => Err(CommandError::UnknownOs(s.to_string())),
        }
    }
}

/// Connection parameters the server hands out for agent enrollment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectionSettings {
    /// Shared enrollment key configured server-side.
    #[serde(default)]
    pub agent_secret_key: String,
    /// Host (and optional port) agents connect back to.
    #[serde(default)]
    pub install_host: Option<String>,
    /// Whether agents connect over TLS. Absent means plain.
    #[serde(default)]
    pub tls: Option<bool>,
}

/// The operator profile the command is generated for.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentProfile {
    /// Per-operator secret; absent for accounts that never issued one.
    #[serde(default)]
    pub agent_secret: Option<String>,
    /// Role 0 is the default administrative role.
    #[serde(default)]
    pub role: i64,
}

/// Build the install one-liner for `target`.
///
/// The effective client secret is the profile's `agent_secret`; a profile in
/// the default role (0) without one falls back to the shared
/// `agent_secret_key`, any other role must carry its own secret. Empty
/// strings count as absent, matching how the dashboard config treats them.
///
/// Returns
/// - `Ok(String)` with the complete command.
/// - `Err(CommandError)` when the host or secret cannot be resolved.
pub fn generate(
    target: OsTarget,
    settings: &ConnectionSettings,
    profile: &AgentProfile,
) -> Result<String, CommandError> {
    let host = non_empty(settings.install_host.as_deref()).ok_or(CommandError::MissingHost)?;

    let secret = match non_empty(profile.agent_secret.as_deref()) {
        Some(s) => s,
        None if profile.role == 0 => settings.agent_secret_key.as_str(),
        None => return Err(CommandError::MissingSecret),
    };

    let tls = settings.tls.unwrap_or(false);
    let url = target.script_url();

    if target.is_windows() {
        let env = format!(
            "$env:NZ_SERVER=\"{host}\";$env:NZ_TLS=\"{tls}\";$env:NZ_CLIENT_SECRET=\"{secret}\";"
        );
        Ok(format!(
            "{env} {SECURITY_PROTOCOLS};set-ExecutionPolicy RemoteSigned;\
             Invoke-WebRequest {url} -OutFile {POWERSHELL_LOCAL_PATH};\
             powershell.exe {POWERSHELL_LOCAL_PATH}"
        ))
    } else {
        let env = format!("NZ_SERVER={host} NZ_TLS={tls} NZ_CLIENT_SECRET={secret}");
        Ok(format!(
            "curl -L {url} -o agent.sh && chmod +x agent.sh && env {env} ./agent.sh"
        ))
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(host: Option<&str>, tls: Option<bool>) -> ConnectionSettings {
        ConnectionSettings {
            agent_secret_key: "shared-key".into(),
            install_host: host.map(str::to_owned),
            tls,
        }
    }

    fn profile(secret: Option<&str>, role: i64) -> AgentProfile {
        AgentProfile {
            agent_secret: secret.map(str::to_owned),
            role,
        }
    }

    #[test]
    fn every_target_embeds_the_server() {
        for target in OsTarget::ALL {
            let cmd = generate(target, &settings(Some("example.com"), None), &profile(Some("s"), 1))
                .expect("generate");
            assert!(!cmd.is_empty());
            assert!(cmd.contains("NZ_SERVER="), "{target}: {cmd}");
            assert!(cmd.contains("example.com"), "{target}: {cmd}");
        }
    }

    #[test]
    fn linux_output_is_exact() {
        let cmd = generate(
            OsTarget::Linux,
            &settings(Some("example.com"), Some(true)),
            &profile(Some("abc123"), 1),
        )
        .expect("generate");
        assert_eq!(
            cmd,
            "curl -L https://raw.githubusercontent.com/lsjnb/scripts/new-world/agent/install.sh \
             -o agent.sh && chmod +x agent.sh && env NZ_SERVER=example.com NZ_TLS=true \
             NZ_CLIENT_SECRET=abc123 ./agent.sh"
        );
    }

    #[test]
    fn default_role_falls_back_to_shared_key() {
        let cmd = generate(
            OsTarget::MacOs,
            &settings(Some("example.com"), None),
            &profile(None, 0),
        )
        .expect("generate");
        assert!(cmd.contains("NZ_CLIENT_SECRET=shared-key"));
    }

    #[test]
    fn restricted_role_requires_its_own_secret() {
        let err = generate(
            OsTarget::Linux,
            &settings(Some("example.com"), None),
            &profile(None, 2),
        )
        .unwrap_err();
        assert_eq!(err, CommandError::MissingSecret);
    }

    #[test]
    fn empty_secret_counts_as_absent() {
        let err = generate(
            OsTarget::Linux,
            &settings(Some("example.com"), None),
            &profile(Some(""), 2),
        )
        .unwrap_err();
        assert_eq!(err, CommandError::MissingSecret);
    }

    #[test]
    fn missing_host_wins_over_missing_secret() {
        let err = generate(OsTarget::Windows, &settings(None, Some(true)), &profile(None, 2))
            .unwrap_err();
        assert_eq!(err, CommandError::MissingHost);
        let err = generate(OsTarget::Linux, &settings(Some(""), None), &profile(Some("s"), 0))
            .unwrap_err();
        assert_eq!(err, CommandError::MissingHost);
    }

    #[test]
    fn cn_targets_download_through_the_mirror() {
        for (cn, plain) in [
            (OsTarget::LinuxCn, OsTarget::Linux),
            (OsTarget::MacOsCn, OsTarget::MacOs),
            (OsTarget::WindowsCn, OsTarget::Windows),
        ] {
            let s = settings(Some("example.com"), None);
            let p = profile(Some("s"), 1);
            let mirrored = generate(cn, &s, &p).expect("generate");
            let direct = generate(plain, &s, &p).expect("generate");
            assert!(mirrored.contains("https://github.geekery.cn/"), "{mirrored}");
            assert!(!direct.contains("github.geekery.cn"), "{direct}");
        }
    }

    #[test]
    fn windows_output_forces_protocols_and_local_path() {
        for target in [OsTarget::Windows, OsTarget::WindowsCn] {
            let cmd = generate(target, &settings(Some("example.com"), None), &profile(Some("s"), 1))
                .expect("generate");
            assert!(cmd.contains("Ssl3"), "{cmd}");
            assert!(cmd.contains("Tls12"), "{cmd}");
            assert!(cmd.contains(r"C:\install.ps1"), "{cmd}");
            assert!(cmd.contains("$env:NZ_TLS=\"false\""), "{cmd}");
        }
    }

    #[test]
    fn inputs_are_not_mutated() {
        let s = settings(Some("example.com"), None);
        let p = profile(None, 0);
        let _ = generate(OsTarget::Linux, &s, &p).expect("generate");
        assert_eq!(s.agent_secret_key, "shared-key");
        assert!(p.agent_secret.is_none());
    }

    #[test]
    fn selector_parsing_rejects_unknown_names() {
        assert_eq!("macos-cn".parse::<OsTarget>().unwrap(), OsTarget::MacOsCn);
        assert_eq!("Windows".parse::<OsTarget>().unwrap(), OsTarget::Windows);
        let err = "freebsd".parse::<OsTarget>().unwrap_err();
        assert_eq!(err, CommandError::UnknownOs("freebsd".into()));
    }
}
