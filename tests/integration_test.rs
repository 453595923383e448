use agentctl_lib::command::{AgentProfile, ConnectionSettings, OsTarget, generate};
use agentctl_lib::config::NodeConfig;

#[test]
fn integration_generate_linux_one_liner() {
    // The documented enrollment flow: settings plus a restricted-role profile
    // with its own secret.
    let settings = ConnectionSettings {
        agent_secret_key: "shared".into(),
        install_host: Some("example.com".into()),
        tls: Some(true),
    };
    let profile = AgentProfile {
        agent_secret: Some("abc123".into()),
        role: 1,
    };
    let cmd = generate(OsTarget::Linux, &settings, &profile).expect("generate");
    assert_eq!(
        cmd,
        "curl -L https://raw.githubusercontent.com/lsjnb/scripts/new-world/agent/install.sh \
         -o agent.sh && chmod +x agent.sh && env NZ_SERVER=example.com NZ_TLS=true \
         NZ_CLIENT_SECRET=abc123 ./agent.sh"
    );
}

#[test]
fn integration_config_to_windows_command() {
    let cfg: NodeConfig = serde_json::from_str(
        r#"{
            "settings": { "agent_secret_key": "shared", "install_host": "example.com" },
            "profile": { "role": 0 }
        }"#,
    )
    .expect("parse");
    let cmd = generate(
        OsTarget::WindowsCn,
        &cfg.settings.expect("settings"),
        &cfg.profile.expect("profile"),
    )
    .expect("generate");
    assert!(cmd.contains("$env:NZ_CLIENT_SECRET=\"shared\""));
    assert!(cmd.contains("https://github.geekery.cn/"));
    assert!(cmd.contains(r"C:\install.ps1"));
}
