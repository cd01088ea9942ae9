use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::Deserialize;

use create_webcomp::agent::FALLBACK_PACKAGE_MANAGER;

const CONFIG_FILE: &str = ".create-webcomp.toml";
const TEMPLATES_DIR: &str = "templates";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    /// Installation root holding the `template-*` directories.
    #[serde(default)]
    pub(crate) templates: Option<PathBuf>,
    #[serde(default = "default_package_manager")]
    pub(crate) package_manager: String,
}

fn default_package_manager() -> String {
    FALLBACK_PACKAGE_MANAGER.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates: None,
            package_manager: default_package_manager(),
        }
    }
}

impl Config {
    /// Reads `~/.create-webcomp.toml` when it exists; defaults otherwise.
    pub(crate) fn init() -> Result<Self> {
        let Some(home) = home::home_dir() else {
            return Ok(Self::default());
        };
        Self::load(home.join(CONFIG_FILE))
    }

    pub(crate) fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .context(format!("failed to read config file: '{}'", path.display()))?;
        toml::from_str(&contents)
            .context(format!("failed to parse config file: '{}'", path.display()))
    }

    /// Configured root, then `templates/` beside the executable, then the one
    /// in the source tree.
    pub(crate) fn template_root(&self) -> PathBuf {
        if let Some(templates) = &self.templates {
            return templates.clone();
        }
        let beside_exe = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(TEMPLATES_DIR)))
            .filter(|dir| dir.is_dir());
        beside_exe.unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join(TEMPLATES_DIR))
    }
}
