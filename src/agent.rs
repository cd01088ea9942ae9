/// Environment variable package managers set when running a create script.
pub const USER_AGENT_ENV: &str = "npm_config_user_agent";

pub const FALLBACK_PACKAGE_MANAGER: &str = "npm";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSpec {
    pub name: String,
    pub version: String,
}

/// Best-effort parse of `name/version ...`. Never fails: malformed input
/// yields whatever pieces are present, empty strings otherwise.
pub fn parse_agent_spec(agent: Option<&str>) -> Option<AgentSpec> {
    let agent = agent.filter(|agent| !agent.is_empty())?;
    let spec = agent.split(char::is_whitespace).next().unwrap_or_default();
    let mut parts = spec.split('/');
    Some(AgentSpec {
        name: parts.next().unwrap_or_default().to_string(),
        version: parts.next().unwrap_or_default().to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManager(String);

impl PackageManager {
    /// Picks the manager named by `agent`, or `fallback` when absent.
    pub fn detect(agent: Option<&str>, fallback: &str) -> Self {
        let name = parse_agent_spec(agent)
            .map(|spec| spec.name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        Self(name)
    }

    /// Deno projects are driven by `deno`, whatever launched the scaffolder.
    pub fn deno() -> Self {
        Self("deno".into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Install and dev-server commands to suggest after scaffolding.
    pub fn next_commands(&self) -> [String; 2] {
        let pm = &self.0;
        match pm.as_str() {
            "yarn" => ["yarn".into(), "yarn dev".into()],
            "deno" => ["deno install".into(), "deno task dev".into()],
            _ => [format!("{pm} install"), format!("{pm} run dev")],
        }
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
