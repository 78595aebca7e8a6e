//! Project configuration read from `.minihub/config.toml`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

const CONFIG_DIR: &str = ".minihub";
const CONFIG_FILE: &str = "config.toml";
const DEFAULT_PROMPT: &str = "minihub> ";

/// Top-level project configuration loaded from `.minihub/config.toml`.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    /// `[actor]` section.
    #[serde(default)]
    pub actor: ActorConfig,
    /// `[shell]` section.
    #[serde(default)]
    pub shell: ShellConfig,
}

impl ProjectConfig {
    /// Load configuration from the nearest `.minihub` directory at or above `start`.
    ///
    /// Returns defaults when no configuration file exists.
    ///
    /// # Errors
    /// Fails when the file found cannot be read, parsed or validated.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self> {
        find_config(start.as_ref())
            .map_or_else(|| Ok(Self::default()), |path| Self::from_file(&path))
    }

    /// Load configuration from a known working directory.
    ///
    /// # Errors
    /// Fails when an existing file cannot be read, parsed or validated.
    pub fn from_workdir(workdir: impl AsRef<Path>) -> Result<Self> {
        let config_path = workdir.as_ref().join(CONFIG_DIR).join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(&config_path)
    }

    /// Load configuration from an explicit file path.
    ///
    /// # Errors
    /// Fails when the file is missing, is not valid TOML, or sets an empty prompt.
    pub fn from_file(config_path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", config_path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.shell.prompt.is_empty() {
            bail!("shell.prompt must not be empty");
        }
        Ok(())
    }
}

fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}

/// Default identity recorded in the activity history.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct ActorConfig {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
}

/// Interactive shell settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ShellConfig {
    /// Prompt printed before each line.
    pub prompt: String,
    /// Echo each command before its reply.
    pub echo: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_owned(),
            echo: false,
        }
    }
}
