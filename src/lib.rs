//! uastd - language detection and UAST extraction front end.
//!
//! uastd routes a source file to a parser driver for its language and
//! reshapes the driver's output into a Universal AST (UAST) under one of
//! three extraction modes.
//!
//! # Architecture
//!
//! A request flows through the components in this order:
//!
//! - `lang`: canonical language identifiers and the classifier
//! - `catalog`: installed drivers, one active version per language
//! - `driver`: the `Driver` capability, its transports and `DriverClient`
//! - `uast`: the node model, extraction modes and the normalizer
//! - `query`: path queries over a normalized tree
//! - `dispatch`: the engine tying the above together, with typed errors
//!
//! `config`, `report` and `cli` make up the command-line tool.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use uastd::{BuiltinProvisioner, Catalog, Classifier, Dispatcher, Language, Mode, ParseRequest};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let catalog = Arc::new(Catalog::new(Arc::new(BuiltinProvisioner::new())));
//! catalog.install(&Language::resolve("python")?, None).await?;
//!
//! let dispatcher = Dispatcher::new(catalog, Classifier::new());
//! let request = ParseRequest::file("hello.py").with_mode(Mode::Semantic);
//! let response = dispatcher.dispatch(&request).await?;
//! println!("{}", serde_json::to_string_pretty(&response)?);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod driver;
pub mod lang;
pub mod query;
pub mod report;
pub mod uast;

pub use catalog::{
    BuiltinProvisioner, Catalog, CatalogError, ConfigProvisioner, DriverRecord, InstallStatus,
    ProvisionError, Provisioned, Provisioner, Version,
};
pub use config::Config;
pub use dispatch::{DispatchError, Dispatcher, ErrorKind, Output, ParseRequest, ParseResponse, Source};
pub use driver::{ClientError, Driver, DriverClient, Endpoint, RawTree};
pub use lang::{Classifier, Language};
pub use query::{Query, QueryError};
pub use uast::{normalize, Mode, Node, NormalizeError, Role};
