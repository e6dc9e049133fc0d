//! Driver catalog.
//!
//! The catalog maps each language to its single active driver record. It is
//! an explicit object with its own lifecycle: build it at startup with a
//! provisioner, hand it to the dispatcher, and call `shutdown` when done.
//!
//! Reads (`list`, `get`) take a short read lock on the record map and never
//! wait on provisioning. Installs and removals of the same language are
//! serialized; the new record is published with a single map insert, so a
//! reader sees either the old record or the new one.

pub mod provision;
mod version;

pub use provision::{BuiltinProvisioner, ConfigProvisioner, ProvisionError, Provisioned, Provisioner};
pub use version::{Version, VersionError};

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use thiserror::Error;

use crate::driver::{ClientError, DriverClient, Endpoint};
use crate::lang::Language;

/// Errors raised by catalog operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("no driver installed for {0}")]
    NotInstalled(Language),
    #[error(transparent)]
    Provision(#[from] ProvisionError),
    #[error("{language} driver at {endpoint} failed its health check")]
    HealthCheckFailed { language: Language, endpoint: String },
    #[error("cannot connect to {language} driver: {source}")]
    Connect {
        language: Language,
        source: ClientError,
    },
}

/// Health of an installed driver as last observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallStatus {
    Ready,
    Unhealthy,
}

impl InstallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallStatus::Ready => "ready",
            InstallStatus::Unhealthy => "unhealthy",
        }
    }
}

impl fmt::Display for InstallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An installed driver.
///
/// Records are immutable apart from their status; an upgrade publishes a new
/// record. Requests holding the old record keep using its client until they
/// finish.
pub struct DriverRecord {
    language: Language,
    version: Version,
    endpoint: Endpoint,
    healthy: AtomicBool,
    client: DriverClient,
}

impl DriverRecord {
    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn status(&self) -> InstallStatus {
        if self.healthy.load(Ordering::Acquire) {
            InstallStatus::Ready
        } else {
            InstallStatus::Unhealthy
        }
    }

    /// Client bound to this record's endpoint.
    pub fn client(&self) -> &DriverClient {
        &self.client
    }
}

impl fmt::Debug for DriverRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverRecord")
            .field("language", &self.language)
            .field("version", &self.version)
            .field("endpoint", &self.endpoint)
            .field("status", &self.status())
            .finish()
    }
}

/// Registry of installed drivers.
pub struct Catalog {
    provisioner: Arc<dyn Provisioner>,
    records: RwLock<BTreeMap<Language, Arc<DriverRecord>>>,
    /// One lock per language, held across provisioning.
    install_locks: Mutex<HashMap<Language, Arc<tokio::sync::Mutex<()>>>>,
}

impl Catalog {
    pub fn new(provisioner: Arc<dyn Provisioner>) -> Self {
        Self {
            provisioner,
            records: RwLock::new(BTreeMap::new()),
            install_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn provisioner(&self) -> &Arc<dyn Provisioner> {
        &self.provisioner
    }

    /// Installed drivers, sorted by language.
    pub fn list(&self) -> Vec<Arc<DriverRecord>> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        records.values().cloned().collect()
    }

    /// Look up the driver for `language`. Never installs anything.
    pub fn get(&self, language: &Language) -> Result<Arc<DriverRecord>, CatalogError> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        records
            .get(language)
            .cloned()
            .ok_or_else(|| CatalogError::NotInstalled(language.clone()))
    }

    /// Install the driver for `language`, at `version` or the provisioner's
    /// default.
    ///
    /// Installing the version that is already active is a no-op. A different
    /// version replaces the record once the new driver passes its health
    /// check; on failure the catalog is left as it was.
    pub async fn install(
        &self,
        language: &Language,
        version: Option<Version>,
    ) -> Result<Arc<DriverRecord>, CatalogError> {
        let lock = self.install_lock(language);
        let result = {
            let _guard = lock.lock().await;
            self.install_locked(language, version).await
        };
        self.release_install_lock(language, lock);
        result
    }

    async fn install_locked(
        &self,
        language: &Language,
        version: Option<Version>,
    ) -> Result<Arc<DriverRecord>, CatalogError> {
        let current = self.get(language).ok();
        if let Some(existing) = &current {
            let same_version = version.as_ref().map_or(true, |v| v == existing.version());
            if same_version && existing.status() == InstallStatus::Ready {
                tracing::debug!(%language, version = %existing.version(), "driver already installed");
                return Ok(Arc::clone(existing));
            }
        }

        let provisioned = self
            .provisioner
            .ensure_running(language, version.as_ref())
            .await?;

        if !self.provisioner.health_check(&provisioned.endpoint).await {
            let reused = current
                .as_ref()
                .map_or(false, |old| old.endpoint().same_as(&provisioned.endpoint));
            if !reused {
                self.provisioner.stop(&provisioned.endpoint).await;
            }
            return Err(CatalogError::HealthCheckFailed {
                language: language.clone(),
                endpoint: provisioned.endpoint.to_string(),
            });
        }

        let client = DriverClient::connect(&provisioned.endpoint, provisioned.single_flight)
            .map_err(|source| CatalogError::Connect {
                language: language.clone(),
                source,
            })?;
        let record = Arc::new(DriverRecord {
            language: language.clone(),
            version: provisioned.version,
            endpoint: provisioned.endpoint,
            healthy: AtomicBool::new(true),
            client,
        });

        let previous = {
            let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
            records.insert(language.clone(), Arc::clone(&record))
        };

        match &previous {
            Some(old) => tracing::info!(
                %language,
                from = %old.version(),
                to = %record.version(),
                endpoint = %record.endpoint(),
                "driver replaced"
            ),
            None => tracing::info!(
                %language,
                version = %record.version(),
                endpoint = %record.endpoint(),
                "driver installed"
            ),
        }
        if let Some(old) = previous {
            if !old.endpoint().same_as(record.endpoint()) {
                self.provisioner.stop(old.endpoint()).await;
            }
        }

        Ok(record)
    }

    /// Uninstall the driver for `language`.
    pub async fn remove(&self, language: &Language) -> Result<(), CatalogError> {
        let lock = self.install_lock(language);
        let result = {
            let _guard = lock.lock().await;
            self.remove_locked(language).await
        };
        self.release_install_lock(language, lock);
        result
    }

    async fn remove_locked(&self, language: &Language) -> Result<(), CatalogError> {
        let removed = {
            let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
            records.remove(language)
        };
        let record = removed.ok_or_else(|| CatalogError::NotInstalled(language.clone()))?;
        tracing::info!(%language, version = %record.version(), "driver removed");
        self.provisioner.stop(record.endpoint()).await;
        Ok(())
    }

    /// Re-run the health check of an installed driver and record the result.
    pub async fn verify(&self, language: &Language) -> Result<InstallStatus, CatalogError> {
        let record = self.get(language)?;
        let healthy = self.provisioner.health_check(record.endpoint()).await;
        record.healthy.store(healthy, Ordering::Release);
        if !healthy {
            tracing::warn!(%language, endpoint = %record.endpoint(), "driver failed health check");
        }
        Ok(record.status())
    }

    /// Remove every record and release its driver.
    pub async fn shutdown(&self) {
        let drained = {
            let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *records)
        };
        for (language, record) in drained {
            tracing::debug!(%language, endpoint = %record.endpoint(), "stopping driver");
            self.provisioner.stop(record.endpoint()).await;
        }
        let mut locks = self.install_locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    fn install_lock(&self, language: &Language) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.install_locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(language.clone()).or_default())
    }

    /// Give back a lock taken with `install_lock`, dropping the map entry
    /// once no other task holds or waits on it.
    fn release_install_lock(&self, language: &Language, lock: Arc<tokio::sync::Mutex<()>>) {
        drop(lock);
        let mut locks = self.install_locks.lock().unwrap_or_else(PoisonError::into_inner);
        if locks.get(language).is_some_and(|l| Arc::strong_count(l) == 1) {
            locks.remove(language);
        }
    }
}
