//! Dispatch engine.
//!
//! Runs one parse request through
//! `Reading -> Classifying -> ResolvingDriver -> CallingDriver -> Normalizing
//! -> Querying`. Each request ends in exactly one outcome: a response or a
//! typed error. Nothing is retried here; callers decide, using
//! `DispatchError::is_transient`.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::catalog::{Catalog, Version};
use crate::driver::ClientError;
use crate::lang::{Classifier, Language};
use crate::query::{Query, QueryError};
use crate::uast::{normalize, Mode, Node, NormalizeError};

/// Driver call deadline used when a request does not set one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the source code comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    /// Content supplied by the caller; `name` is used for classification.
    Inline { name: PathBuf, content: Vec<u8> },
}

/// A single parse request. Build it, then hand it to `Dispatcher::dispatch`.
#[derive(Debug, Clone)]
pub struct ParseRequest {
    source: Source,
    language: Option<Language>,
    mode: Mode,
    query: Option<String>,
    timeout: Duration,
}

impl ParseRequest {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(Source::Path(path.into()))
    }

    pub fn inline(name: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        Self::new(Source::Inline {
            name: name.into(),
            content: content.into(),
        })
    }

    fn new(source: Source) -> Self {
        Self {
            source,
            language: None,
            mode: Mode::default(),
            query: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Skip classification and use this language.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Filter the normalized tree with a path query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Path used for classification and reporting.
    pub fn path(&self) -> &Path {
        match &self.source {
            Source::Path(path) => path,
            Source::Inline { name, .. } => name,
        }
    }

    pub fn language(&self) -> Option<&Language> {
        self.language.as_ref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Dispatch states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Reading,
    Classifying,
    ResolvingDriver,
    CallingDriver,
    Normalizing,
    Querying,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Reading => "reading",
            Stage::Classifying => "classifying",
            Stage::ResolvingDriver => "resolving-driver",
            Stage::CallingDriver => "calling-driver",
            Stage::Normalizing => "normalizing",
            Stage::Querying => "querying",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identifier of a dispatch failure, for programs and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    InputUnreadable,
    LanguageNotDetected,
    DriverNotInstalled,
    DriverUnavailable,
    DriverTimeout,
    DriverRejected,
    DriverProtocol,
    NormalizationIncomplete,
    QueryError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InputUnreadable => "input-unreadable",
            ErrorKind::LanguageNotDetected => "language-not-detected",
            ErrorKind::DriverNotInstalled => "driver-not-installed",
            ErrorKind::DriverUnavailable => "driver-unavailable",
            ErrorKind::DriverTimeout => "driver-timeout",
            ErrorKind::DriverRejected => "driver-rejected",
            ErrorKind::DriverProtocol => "driver-protocol",
            ErrorKind::NormalizationIncomplete => "normalization-incomplete",
            ErrorKind::QueryError => "query-error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a parse request failed.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("cannot read {}: {source}", .path.display())]
    InputUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not detect the language of {}", .0.display())]
    LanguageNotDetected(PathBuf),
    #[error("no driver installed for {0}")]
    DriverNotInstalled(Language),
    #[error("{language} driver is unavailable: {reason}")]
    DriverUnavailable { language: Language, reason: String },
    #[error("{language} driver did not answer within {timeout:?}")]
    DriverTimeout { language: Language, timeout: Duration },
    #[error("{language} driver rejected the input: {reason}")]
    DriverRejected { language: Language, reason: String },
    #[error("{language} driver sent a malformed response: {reason}")]
    DriverProtocol { language: Language, reason: String },
    #[error("{language} tree cannot be normalized in {mode} mode: {source}")]
    NormalizationIncomplete {
        language: Language,
        mode: Mode,
        source: NormalizeError,
    },
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl DispatchError {
    fn from_client(language: Language, err: ClientError) -> Self {
        match err {
            ClientError::Unavailable(reason) => DispatchError::DriverUnavailable { language, reason },
            ClientError::Timeout(timeout) => DispatchError::DriverTimeout { language, timeout },
            ClientError::Protocol(reason) => DispatchError::DriverProtocol { language, reason },
            ClientError::Rejected(reason) => DispatchError::DriverRejected { language, reason },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::InputUnreadable { .. } => ErrorKind::InputUnreadable,
            DispatchError::LanguageNotDetected(_) => ErrorKind::LanguageNotDetected,
            DispatchError::DriverNotInstalled(_) => ErrorKind::DriverNotInstalled,
            DispatchError::DriverUnavailable { .. } => ErrorKind::DriverUnavailable,
            DispatchError::DriverTimeout { .. } => ErrorKind::DriverTimeout,
            DispatchError::DriverRejected { .. } => ErrorKind::DriverRejected,
            DispatchError::DriverProtocol { .. } => ErrorKind::DriverProtocol,
            DispatchError::NormalizationIncomplete { .. } => ErrorKind::NormalizationIncomplete,
            DispatchError::Query(_) => ErrorKind::QueryError,
        }
    }

    /// Whether re-issuing the same request later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::DriverUnavailable | ErrorKind::DriverTimeout
        )
    }

    /// What the user can do about it.
    pub fn hint(&self) -> &'static str {
        match self.kind() {
            ErrorKind::InputUnreadable => "check that the file exists and is readable",
            ErrorKind::LanguageNotDetected => "pass the language explicitly with --lang",
            ErrorKind::DriverNotInstalled => {
                "the language is not supported by any installed driver; declare one in uastd.yaml"
            }
            ErrorKind::DriverUnavailable => "the driver is installed but not responding; retry later",
            ErrorKind::DriverTimeout => "retry, or raise the timeout with --timeout-ms",
            ErrorKind::DriverRejected => "the input is not valid for this language; fix the source",
            ErrorKind::DriverProtocol => "the driver is broken; upgrade or reinstall it",
            ErrorKind::NormalizationIncomplete => {
                "the driver produced a malformed tree; try --mode semantic"
            }
            ErrorKind::QueryError => "fix the query syntax",
        }
    }
}

/// Result of a parse request: the whole tree, or the query matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Output {
    Tree(Node),
    Matches(Vec<Node>),
}

/// A successful parse.
#[derive(Debug, Clone, Serialize)]
pub struct ParseResponse {
    pub path: PathBuf,
    pub language: Language,
    pub version: Version,
    pub mode: Mode,
    #[serde(flatten)]
    pub output: Output,
}

/// Orchestrates classifier, catalog, driver client and normalizer.
///
/// Holds no per-request state; one dispatcher serves any number of
/// concurrent requests.
pub struct Dispatcher {
    catalog: Arc<Catalog>,
    classifier: Classifier,
}

impl Dispatcher {
    pub fn new(catalog: Arc<Catalog>, classifier: Classifier) -> Self {
        Self { catalog, classifier }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub async fn dispatch(&self, request: &ParseRequest) -> Result<ParseResponse, DispatchError> {
        let path = request.path().display().to_string();
        let result = self.run(request).await;
        match &result {
            Ok(response) => tracing::debug!(
                %path,
                language = %response.language,
                mode = %response.mode,
                "dispatch done"
            ),
            Err(e) => tracing::warn!(%path, kind = %e.kind(), error = %e, "dispatch failed"),
        }
        result
    }

    async fn run(&self, request: &ParseRequest) -> Result<ParseResponse, DispatchError> {
        // Reject bad syntax before any driver work is done.
        let query = request.query().map(Query::parse).transpose()?;
        let path = request.path();

        enter(path, Stage::Reading);
        let content = match request.source() {
            Source::Path(p) => {
                tokio::fs::read(p)
                    .await
                    .map_err(|source| DispatchError::InputUnreadable {
                        path: p.clone(),
                        source,
                    })?
            }
            Source::Inline { content, .. } => content.clone(),
        };

        enter(path, Stage::Classifying);
        let language = match request.language() {
            Some(language) => language.clone(),
            None => self
                .classifier
                .classify(path, Some(&content))
                .ok_or_else(|| DispatchError::LanguageNotDetected(path.to_path_buf()))?,
        };

        enter(path, Stage::ResolvingDriver);
        let record = self
            .catalog
            .get(&language)
            .map_err(|_| DispatchError::DriverNotInstalled(language.clone()))?;

        enter(path, Stage::CallingDriver);
        let raw = record
            .client()
            .parse(&content, &language, request.timeout())
            .await
            .map_err(|e| DispatchError::from_client(language.clone(), e))?;

        enter(path, Stage::Normalizing);
        let tree = normalize(&raw, request.mode(), &language).map_err(|source| {
            DispatchError::NormalizationIncomplete {
                language: language.clone(),
                mode: request.mode(),
                source,
            }
        })?;

        let output = match query {
            Some(query) => {
                enter(path, Stage::Querying);
                Output::Matches(query.select(&tree).into_iter().cloned().collect())
            }
            None => Output::Tree(tree),
        };

        Ok(ParseResponse {
            path: path.to_path_buf(),
            language,
            version: record.version().clone(),
            mode: request.mode(),
            output,
        })
    }
}

fn enter(path: &Path, stage: Stage) {
    tracing::debug!(path = %path.display(), %stage, "dispatch stage");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ProvisionError, Provisioned, Provisioner};
    use crate::driver::{Driver, Endpoint, RawTree};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::BTreeMap;

    /// Answers every call with a fixed outcome.
    struct FixedDriver(Result<serde_json::Value, ClientError>);

    #[async_trait]
    impl Driver for FixedDriver {
        async fn parse(&self, _content: &[u8], _language: &Language) -> Result<RawTree, ClientError> {
            self.0.clone().map(RawTree::new)
        }
    }

    fn fixed(outcome: Result<serde_json::Value, ClientError>) -> Arc<dyn Driver> {
        Arc::new(FixedDriver(outcome))
    }

    struct SleepyDriver;

    #[async_trait]
    impl Driver for SleepyDriver {
        async fn parse(&self, _content: &[u8], _language: &Language) -> Result<RawTree, ClientError> {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(RawTree::new(json!({"type": "module"})))
        }
    }

    struct StaticProvisioner(BTreeMap<Language, Arc<dyn Driver>>);

    #[async_trait]
    impl Provisioner for StaticProvisioner {
        async fn ensure_running(
            &self,
            language: &Language,
            _version: Option<&Version>,
        ) -> Result<Provisioned, ProvisionError> {
            let driver = self
                .0
                .get(language)
                .ok_or_else(|| ProvisionError::Unsupported(language.clone()))?;
            Ok(Provisioned {
                version: Version::parse("v1.0.0").unwrap(),
                endpoint: Endpoint::in_process(language.as_str(), Arc::clone(driver)),
                single_flight: false,
            })
        }

        fn available(&self) -> Vec<Language> {
            self.0.keys().cloned().collect()
        }
    }

    fn lang(name: &str) -> Language {
        Language::resolve(name).unwrap()
    }

    fn module() -> serde_json::Value {
        json!({
            "type": "module",
            "children": [
                {"type": "expression_statement", "children": [
                    {"type": "call", "children": [
                        {"type": "identifier", "token": "print"}
                    ]}
                ]}
            ]
        })
    }

    async fn dispatcher(drivers: Vec<(&str, Arc<dyn Driver>)>) -> Dispatcher {
        let table = drivers.into_iter().map(|(n, d)| (lang(n), d)).collect();
        let catalog = Arc::new(Catalog::new(Arc::new(StaticProvisioner(table))));
        for language in catalog.provisioner().available() {
            catalog.install(&language, None).await.unwrap();
        }
        Dispatcher::new(catalog, Classifier::new())
    }

    #[tokio::test]
    async fn test_inline_request_native() {
        let d = dispatcher(vec![("python", fixed(Ok(module())))]).await;
        let response = d
            .dispatch(&ParseRequest::inline("hello.py", "print()"))
            .await
            .unwrap();
        assert_eq!(response.language, lang("python"));
        assert_eq!(response.version.as_str(), "v1.0.0");
        assert_eq!(response.mode, Mode::Native);
        match response.output {
            Output::Tree(root) => {
                assert_eq!(root.kind, "module");
                assert_eq!(root.children[0].kind, "expression_statement");
            }
            other => panic!("expected a tree, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_not_detected_vs_not_installed() {
        let d = dispatcher(vec![("python", fixed(Ok(module())))]).await;

        let err = d
            .dispatch(&ParseRequest::inline("notes", "just words"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LanguageNotDetected);

        let err = d
            .dispatch(&ParseRequest::inline("hello.rb", "puts 'hi'"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DriverNotInstalled);
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_override_skips_classification() {
        let d = dispatcher(vec![("python", fixed(Ok(module())))]).await;
        let request = ParseRequest::inline("notes", "x").with_language(lang("py"));
        let response = d.dispatch(&request).await.unwrap();
        assert_eq!(response.language, lang("python"));

        // The override wins even over a recognizable extension.
        let request = ParseRequest::inline("main.go", "package main").with_language(lang("python"));
        assert_eq!(d.dispatch(&request).await.unwrap().language, lang("python"));
    }

    #[tokio::test]
    async fn test_driver_errors_keep_their_kind() {
        let cases: Vec<(&str, ClientError, ErrorKind, bool)> = vec![
            ("go", ClientError::Unavailable("refused".into()), ErrorKind::DriverUnavailable, true),
            ("java", ClientError::Rejected("bad input".into()), ErrorKind::DriverRejected, false),
            ("rust", ClientError::Protocol("not json".into()), ErrorKind::DriverProtocol, false),
        ];
        let drivers = cases
            .iter()
            .map(|(name, err, _, _)| (*name, fixed(Err(err.clone()))))
            .collect();
        let d = dispatcher(drivers).await;

        for (name, _, kind, transient) in cases {
            let request = ParseRequest::inline("input", "x").with_language(lang(name));
            let err = d.dispatch(&request).await.unwrap_err();
            assert_eq!(err.kind(), kind, "{}", name);
            assert_eq!(err.is_transient(), transient, "{}", name);
        }
    }

    #[tokio::test]
    async fn test_timeout_leaves_record_usable() {
        let d = dispatcher(vec![("python", Arc::new(SleepyDriver) as Arc<dyn Driver>)]).await;
        let request = ParseRequest::inline("slow.py", "x").with_timeout(Duration::from_millis(20));

        let err = d.dispatch(&request).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DriverTimeout);
        assert!(err.is_transient());

        let record = d.catalog().get(&lang("python")).unwrap();
        assert_eq!(record.version().as_str(), "v1.0.0");
        let err = d.dispatch(&request).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DriverTimeout);
    }

    #[tokio::test]
    async fn test_malformed_tree_by_mode() {
        let broken = json!({"type": "module", "children": [{"token": "x"}]});
        let d = dispatcher(vec![("python", fixed(Ok(broken)))]).await;

        for mode in [Mode::Native, Mode::Annotated] {
            let request = ParseRequest::inline("a.py", "x").with_mode(mode);
            let err = d.dispatch(&request).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NormalizationIncomplete);
        }
        let request = ParseRequest::inline("a.py", "x").with_mode(Mode::Semantic);
        assert!(d.dispatch(&request).await.is_ok());
    }

    #[tokio::test]
    async fn test_query_applied_after_normalization() {
        let d = dispatcher(vec![("python", fixed(Ok(module())))]).await;

        let request = ParseRequest::inline("a.py", "x").with_query("//call/identifier");
        match d.dispatch(&request).await.unwrap().output {
            Output::Matches(nodes) => {
                assert_eq!(nodes.len(), 1);
                assert_eq!(nodes[0].token.as_deref(), Some("print"));
            }
            other => panic!("expected matches, got {:?}", other),
        }

        // Semantic kinds replace native ones before the query runs.
        let request = ParseRequest::inline("a.py", "x")
            .with_mode(Mode::Semantic)
            .with_query("//call");
        match d.dispatch(&request).await.unwrap().output {
            Output::Matches(nodes) => assert_eq!(nodes.len(), 1),
            other => panic!("expected matches, got {:?}", other),
        }

        let request = ParseRequest::inline("a.py", "x").with_query("//nothing");
        assert_eq!(
            d.dispatch(&request).await.unwrap().output,
            Output::Matches(Vec::new())
        );

        let request = ParseRequest::inline("a.py", "x").with_query("//call[");
        let err = d.dispatch(&request).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::QueryError);
    }

    #[tokio::test]
    async fn test_unreadable_file() {
        let d = dispatcher(vec![]).await;
        let err = d
            .dispatch(&ParseRequest::file("/definitely/not/here.py"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputUnreadable);
    }

    #[test]
    fn test_every_kind_has_a_distinct_code() {
        let kinds = [
            ErrorKind::InputUnreadable,
            ErrorKind::LanguageNotDetected,
            ErrorKind::DriverNotInstalled,
            ErrorKind::DriverUnavailable,
            ErrorKind::DriverTimeout,
            ErrorKind::DriverRejected,
            ErrorKind::DriverProtocol,
            ErrorKind::NormalizationIncomplete,
            ErrorKind::QueryError,
        ];
        let codes: std::collections::HashSet<_> = kinds.iter().map(|k| k.as_str()).collect();
        assert_eq!(codes.len(), kinds.len());
        for kind in kinds {
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.as_str());
        }
    }

    #[test]
    fn test_response_serialization() {
        let response = ParseResponse {
            path: PathBuf::from("a.py"),
            language: lang("python"),
            version: Version::parse("1.0").unwrap(),
            mode: Mode::Semantic,
            output: Output::Matches(vec![Node::new("call")]),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["language"], "python");
        assert_eq!(json["version"], "v1.0");
        assert_eq!(json["mode"], "semantic");
        assert_eq!(json["matches"][0]["@type"], "call");
    }
}
