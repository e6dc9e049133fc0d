//! Driver provisioning.
//!
//! A provisioner brings a driver for a language up (or locates it) and
//! reports where it can be reached. The catalog calls it during `install`.

use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;

use super::Version;
use crate::config::{DriverConfig, Transport};
use crate::driver::{DriverClient, Endpoint};
use crate::lang::Language;

/// Errors raised while provisioning a driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProvisionError {
    #[error("no driver available for {0}")]
    Unsupported(Language),
    #[error("{language} driver {requested} is not available (available: {available})")]
    VersionUnavailable {
        language: Language,
        requested: Version,
        available: String,
    },
    #[error("failed to start {language} driver: {reason}")]
    StartFailed { language: Language, reason: String },
}

/// A driver that is up and reachable.
#[derive(Debug, Clone)]
pub struct Provisioned {
    pub version: Version,
    pub endpoint: Endpoint,
    /// Whether the driver handles one call at a time.
    pub single_flight: bool,
}

/// Brings drivers up and checks on them.
#[async_trait]
pub trait Provisioner: Send + Sync {
    /// Make sure a driver for `language` is running, at `version` when given
    /// (the provisioner's default version otherwise).
    async fn ensure_running(
        &self,
        language: &Language,
        version: Option<&Version>,
    ) -> Result<Provisioned, ProvisionError>;

    /// Whether the driver at `endpoint` accepts calls.
    async fn health_check(&self, endpoint: &Endpoint) -> bool {
        match DriverClient::connect(endpoint, false) {
            Ok(client) => match client.health_check().await {
                Ok(()) => true,
                Err(e) => {
                    tracing::debug!(%endpoint, error = %e, "health check failed");
                    false
                }
            },
            Err(e) => {
                tracing::debug!(%endpoint, error = %e, "cannot connect for health check");
                false
            }
        }
    }

    /// Release a driver that is no longer referenced by the catalog.
    async fn stop(&self, _endpoint: &Endpoint) {}

    /// Languages this provisioner can install, sorted.
    fn available(&self) -> Vec<Language>;
}

/// Provisioner for the bundled tree-sitter grammars.
#[derive(Debug, Default, Clone)]
pub struct BuiltinProvisioner;

impl BuiltinProvisioner {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "tree-sitter")]
#[async_trait]
impl Provisioner for BuiltinProvisioner {
    async fn ensure_running(
        &self,
        language: &Language,
        version: Option<&Version>,
    ) -> Result<Provisioned, ProvisionError> {
        use crate::driver::treesitter;
        use std::sync::Arc;

        let grammar = treesitter::builtin(language)
            .ok_or_else(|| ProvisionError::Unsupported(language.clone()))?;
        let bundled = Version::parse(grammar.version).map_err(|e| ProvisionError::StartFailed {
            language: language.clone(),
            reason: e.to_string(),
        })?;
        if let Some(requested) = version {
            if *requested != bundled {
                return Err(ProvisionError::VersionUnavailable {
                    language: language.clone(),
                    requested: requested.clone(),
                    available: bundled.to_string(),
                });
            }
        }

        Ok(Provisioned {
            version: bundled,
            endpoint: Endpoint::in_process(grammar.language, Arc::new(grammar.driver())),
            single_flight: false,
        })
    }

    fn available(&self) -> Vec<Language> {
        crate::driver::treesitter::BUILTIN_GRAMMARS
            .iter()
            .map(|g| Language::canonical(g.language))
            .collect()
    }
}

#[cfg(not(feature = "tree-sitter"))]
#[async_trait]
impl Provisioner for BuiltinProvisioner {
    async fn ensure_running(
        &self,
        language: &Language,
        _version: Option<&Version>,
    ) -> Result<Provisioned, ProvisionError> {
        Err(ProvisionError::Unsupported(language.clone()))
    }

    fn available(&self) -> Vec<Language> {
        Vec::new()
    }
}

/// Provisioner for drivers declared in the configuration file.
///
/// Configured drivers take precedence; languages without a configured entry
/// fall back to the builtin grammars when enabled.
pub struct ConfigProvisioner {
    /// Declared drivers per language, in declaration order (first is default).
    drivers: BTreeMap<Language, Vec<(Version, Provisioned)>>,
    builtin: Option<BuiltinProvisioner>,
}

impl ConfigProvisioner {
    pub fn new(drivers: &[DriverConfig], builtin: bool) -> anyhow::Result<Self> {
        let mut table: BTreeMap<Language, Vec<(Version, Provisioned)>> = BTreeMap::new();
        for entry in drivers {
            let language = Language::resolve(&entry.language)?;
            let version = Version::parse(&entry.version)?;
            let endpoint = match &entry.transport {
                Transport::Http { url } => Endpoint::Http { url: url.clone() },
                Transport::Process { command } => {
                    let (program, args) = command
                        .split_first()
                        .ok_or_else(|| anyhow::anyhow!("{} driver has an empty command", language))?;
                    Endpoint::Process {
                        program: program.into(),
                        args: args.to_vec(),
                    }
                }
            };
            let provisioned = Provisioned {
                version: version.clone(),
                endpoint,
                single_flight: entry.single_flight,
            };
            table.entry(language).or_default().push((version, provisioned));
        }

        Ok(Self {
            drivers: table,
            builtin: builtin.then(BuiltinProvisioner::new),
        })
    }
}

#[async_trait]
impl Provisioner for ConfigProvisioner {
    async fn ensure_running(
        &self,
        language: &Language,
        version: Option<&Version>,
    ) -> Result<Provisioned, ProvisionError> {
        let Some(entries) = self.drivers.get(language) else {
            return match &self.builtin {
                Some(builtin) => builtin.ensure_running(language, version).await,
                None => Err(ProvisionError::Unsupported(language.clone())),
            };
        };

        let found = match version {
            None => entries.first(),
            Some(requested) => entries.iter().find(|(v, _)| v == requested),
        };
        match found {
            Some((_, provisioned)) => Ok(provisioned.clone()),
            None => Err(ProvisionError::VersionUnavailable {
                language: language.clone(),
                requested: version.cloned().unwrap_or_else(|| entries[0].0.clone()),
                available: entries
                    .iter()
                    .map(|(v, _)| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    fn available(&self) -> Vec<Language> {
        let mut langs: Vec<Language> = self.drivers.keys().cloned().collect();
        if let Some(builtin) = &self.builtin {
            langs.extend(builtin.available());
        }
        langs.sort();
        langs.dedup();
        langs
    }
}
