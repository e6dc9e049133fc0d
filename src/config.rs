//! Configuration for uastd.
//!
//! Configuration lives in a YAML file (`uastd.yaml`). Every field is
//! optional; a missing file means builtin drivers only and default timeouts.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::{ConfigProvisioner, Version};
use crate::lang::{Classifier, Language};
use crate::uast::Mode;

/// Default file names searched in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["uastd.yaml", ".uastd.yaml"];

/// Default driver call timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Driver call timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Extraction mode used when a request does not name one
    #[serde(default)]
    pub mode: Mode,
    /// Whether the bundled tree-sitter drivers are offered (default: true)
    #[serde(default = "default_true")]
    pub builtin_drivers: bool,
    /// Glob patterns forcing a language, checked before extension rules
    #[serde(default)]
    pub languages: Vec<LanguageOverride>,
    /// Out-of-process drivers
    #[serde(default)]
    pub drivers: Vec<DriverConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            mode: Mode::default(),
            builtin_drivers: true,
            languages: Vec::new(),
            drivers: Vec::new(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_true() -> bool {
    true
}

/// Force files matching `pattern` to be classified as `language`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LanguageOverride {
    pub pattern: String,
    pub language: String,
}

/// An out-of-process driver declaration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DriverConfig {
    pub language: String,
    pub version: String,
    #[serde(flatten)]
    pub transport: Transport,
    /// Driver accepts one call at a time; calls are queued client-side
    #[serde(default)]
    pub single_flight: bool,
}

/// How a configured driver is reached.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "transport", rename_all = "lowercase")]
pub enum Transport {
    Http { url: String },
    Process { command: Vec<String> },
}

impl Config {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        // An empty file is a valid, all-defaults configuration.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Driver call timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Build the classifier, including glob overrides.
    pub fn classifier(&self) -> anyhow::Result<Classifier> {
        let overrides = self
            .languages
            .iter()
            .map(|o| Ok((o.pattern.clone(), Language::resolve(&o.language)?)))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Classifier::with_overrides(overrides)
    }

    /// Build the provisioner for the configured drivers.
    pub fn provisioner(&self) -> anyhow::Result<ConfigProvisioner> {
        ConfigProvisioner::new(&self.drivers, self.builtin_drivers)
    }
}

/// Locate the configuration file: explicit path, working directory, then
/// the platform config directory. Returns `None` when no file exists.
pub fn discover(explicit: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("config file not found: {}", path.display());
        }
        return Ok(Some(path.to_path_buf()));
    }

    for name in DEFAULT_CONFIG_NAMES {
        let path = PathBuf::from(name);
        if path.exists() {
            return Ok(Some(path));
        }
    }

    let user = ProjectDirs::from("", "", "uastd").map(|dirs| dirs.config_dir().join("uastd.yaml"));
    Ok(user.filter(|p| p.exists()))
}

/// Discover and parse the configuration, falling back to defaults.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<Config> {
    match discover(explicit)? {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let config = Config::parse_file(&path)
                .map_err(|e| anyhow::anyhow!("error parsing {}: {}", path.display(), e))?;
            validate(&config)?;
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Check a configuration for values serde cannot reject on its own.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if config.timeout_ms == 0 {
        anyhow::bail!("timeout_ms must be greater than zero");
    }

    for o in &config.languages {
        if o.pattern.trim().is_empty() {
            anyhow::bail!("language override for {:?} has an empty pattern", o.language);
        }
        Language::resolve(&o.language)
            .map_err(|e| anyhow::anyhow!("language override {:?}: {}", o.pattern, e))?;
    }

    let mut seen = HashSet::new();
    for d in &config.drivers {
        let language = Language::resolve(&d.language)
            .map_err(|e| anyhow::anyhow!("driver entry: {}", e))?;
        let version = Version::parse(&d.version)
            .map_err(|e| anyhow::anyhow!("{} driver: {}", language, e))?;
        match &d.transport {
            Transport::Http { url } => {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    anyhow::bail!("{} driver: url must start with http:// or https://", language);
                }
            }
            Transport::Process { command } => {
                if command.first().map_or(true, |p| p.trim().is_empty()) {
                    anyhow::bail!("{} driver: command must name an executable", language);
                }
            }
        }
        if !seen.insert((language.clone(), version.clone())) {
            anyhow::bail!("{} driver {} is declared twice", language, version);
        }
    }

    Ok(())
}
