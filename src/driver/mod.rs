//! Driver clients.
//!
//! A driver is an external (or in-process) parser for one language. Every
//! transport implements the same `Driver` capability; `DriverClient` binds one
//! driver instance and enforces the call timeout and, for drivers that only
//! accept one call at a time, per-endpoint serialization.
//!
//! Transports:
//! - `http`: long-running driver service speaking JSON over HTTP
//! - `process`: one subprocess per call, JSON over stdin/stdout
//! - `treesitter`: builtin in-process tree-sitter grammars

pub mod http;
pub mod process;
#[cfg(feature = "tree-sitter")]
pub mod treesitter;
mod wire;

pub use wire::{WireRequest, WireResponse, WireStatus};

use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::lang::Language;

/// Timeout applied to health checks.
pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors that can occur while talking to a driver.
///
/// The kinds are never conflated: an unreachable peer, a peer that did not
/// answer in time, a peer that answered garbage and a peer that refused the
/// input each need a different reaction from the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("driver unavailable: {0}")]
    Unavailable(String),
    #[error("driver call timed out after {0:?}")]
    Timeout(Duration),
    #[error("malformed driver response: {0}")]
    Protocol(String),
    #[error("driver rejected the input: {0}")]
    Rejected(String),
}

/// Driver-specific parse output.
///
/// A raw node is a JSON object with a `type` string, optional `children`
/// array, optional `token` string, optional `start`/`end` positions
/// (`{offset, line, col}`) and any number of driver-specific fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTree(serde_json::Value);

impl RawTree {
    pub fn new(root: serde_json::Value) -> Self {
        Self(root)
    }

    pub fn root(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Parser capability exposed by every driver transport.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Parse `content` as `language` and return the driver's native tree.
    async fn parse(&self, content: &[u8], language: &Language) -> Result<RawTree, ClientError>;

    /// Check that the driver can accept calls.
    async fn health_check(&self) -> Result<(), ClientError> {
        Ok(())
    }
}

/// Where a driver instance can be reached.
#[derive(Clone)]
pub enum Endpoint {
    /// Driver living inside this process (builtin grammars, tests).
    InProcess {
        name: String,
        driver: Arc<dyn Driver>,
    },
    /// Driver service reachable over HTTP.
    Http { url: String },
    /// Driver executable spawned once per call.
    Process { program: PathBuf, args: Vec<String> },
}

impl Endpoint {
    pub fn in_process(name: impl Into<String>, driver: Arc<dyn Driver>) -> Self {
        Endpoint::InProcess {
            name: name.into(),
            driver,
        }
    }

    /// Build a driver instance bound to this endpoint.
    pub fn connect(&self) -> Result<Arc<dyn Driver>, ClientError> {
        match self {
            Endpoint::InProcess { driver, .. } => Ok(Arc::clone(driver)),
            Endpoint::Http { url } => Ok(Arc::new(http::HttpDriver::new(url)?)),
            Endpoint::Process { program, args } => {
                Ok(Arc::new(process::ProcessDriver::new(program.clone(), args.clone())))
            }
        }
    }

    /// Whether two endpoints address the same driver instance.
    pub fn same_as(&self, other: &Endpoint) -> bool {
        match (self, other) {
            (Endpoint::InProcess { driver: a, .. }, Endpoint::InProcess { driver: b, .. }) => {
                Arc::ptr_eq(a, b)
            }
            (Endpoint::Http { url: a }, Endpoint::Http { url: b }) => a == b,
            (
                Endpoint::Process { program: pa, args: aa },
                Endpoint::Process { program: pb, args: ab },
            ) => pa == pb && aa == ab,
            _ => false,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::InProcess { name, .. } => write!(f, "builtin://{}", name),
            Endpoint::Http { url } => f.write_str(url),
            Endpoint::Process { program, args } => {
                write!(f, "exec:{}", program.display())?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Endpoint({})", self)
    }
}

/// Client bound to one driver instance.
///
/// Cloning is cheap; clones share the driver and the serialization gate.
#[derive(Clone)]
pub struct DriverClient {
    endpoint: Endpoint,
    driver: Arc<dyn Driver>,
    /// Present when the driver accepts a single call at a time.
    gate: Option<Arc<Mutex<()>>>,
}

impl DriverClient {
    /// Connect to `endpoint`. With `single_flight`, concurrent calls through
    /// this client (and its clones) are queued instead of overlapping.
    pub fn connect(endpoint: &Endpoint, single_flight: bool) -> Result<Self, ClientError> {
        let driver = endpoint.connect()?;
        Ok(Self {
            endpoint: endpoint.clone(),
            driver,
            gate: single_flight.then(|| Arc::new(Mutex::new(()))),
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Perform one parse call, bounded by `timeout`.
    ///
    /// When the deadline passes the in-flight call is dropped, which aborts
    /// the request (or kills the driver process) and releases the gate.
    pub async fn parse(
        &self,
        content: &[u8],
        language: &Language,
        timeout: Duration,
    ) -> Result<RawTree, ClientError> {
        let call = async {
            let _turn = match &self.gate {
                Some(gate) => Some(gate.lock().await),
                None => None,
            };
            self.driver.parse(content, language).await
        };

        match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::debug!(endpoint = %self.endpoint, ?timeout, "driver call timed out");
                Err(ClientError::Timeout(timeout))
            }
        }
    }

    /// Run the driver's health check, bounded by `HEALTH_CHECK_TIMEOUT`.
    pub async fn health_check(&self) -> Result<(), ClientError> {
        match tokio::time::timeout(HEALTH_CHECK_TIMEOUT, self.driver.health_check()).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout(HEALTH_CHECK_TIMEOUT)),
        }
    }
}

impl fmt::Debug for DriverClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverClient")
            .field("endpoint", &self.endpoint)
            .field("single_flight", &self.gate.is_some())
            .finish()
    }
}
