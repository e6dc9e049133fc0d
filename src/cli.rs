//! Command-line interface for uastd.

use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use walkdir::WalkDir;

use crate::catalog::{Catalog, CatalogError, ProvisionError};
use crate::config::{self, Config};
use crate::dispatch::{DispatchError, Dispatcher, ErrorKind, ParseRequest};
use crate::lang::{Classifier, Language, SAMPLE_LEN};
use crate::report::{self, Format};
use crate::uast::Mode;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;
pub const EXIT_TRANSIENT: i32 = 3;

/// Language detection and UAST extraction through per-language parser drivers.
#[derive(Parser)]
#[command(name = "uastd")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to configuration YAML file (default: auto-discover)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect language drivers
    Drivers {
        #[command(subcommand)]
        command: DriversCommand,
    },
    /// Detect the language of files
    Lang(LangArgs),
    /// Parse a file and print its UAST as JSON
    #[command(visible_alias = "parse")]
    Uast(UastArgs),
}

#[derive(Subcommand)]
pub enum DriversCommand {
    /// List installed drivers
    List(ListArgs),
}

/// Arguments for `drivers list`.
#[derive(Args)]
pub struct ListArgs {
    /// Output format: table or json
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

/// Arguments for the lang command.
#[derive(Args)]
pub struct LangArgs {
    /// Files or directories to classify
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

/// Arguments for the uast command.
#[derive(Args)]
pub struct UastArgs {
    /// File to parse
    pub path: PathBuf,

    /// Language of the file (skips detection)
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Extraction mode: native, annotated, or semantic
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Path query applied to the normalized tree (e.g. //call)
    #[arg(short, long)]
    pub query: Option<String>,

    /// Driver call timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

/// Load the configuration, reporting problems the way every command does.
fn load_config(explicit: Option<&Path>) -> Option<Config> {
    match config::load(explicit) {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("Error: {}", e);
            None
        }
    }
}

fn build_catalog(config: &Config) -> anyhow::Result<Arc<Catalog>> {
    let provisioner = config.provisioner()?;
    Ok(Arc::new(Catalog::new(Arc::new(provisioner))))
}

/// Install drivers for `languages` concurrently. Failures are logged and
/// leave the language uninstalled.
async fn bootstrap(catalog: &Catalog, languages: &[Language]) -> Vec<(Language, CatalogError)> {
    let installs = languages.iter().map(|language| async move {
        let result = catalog.install(language, None).await;
        (language.clone(), result)
    });

    let mut failures = Vec::new();
    for (language, result) in futures::future::join_all(installs).await {
        if let Err(e) = result {
            tracing::warn!(%language, error = %e, "driver install failed");
            failures.push((language, e));
        }
    }
    failures
}

/// Read the first `SAMPLE_LEN` bytes of a file.
fn read_sample(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut sample = Vec::with_capacity(SAMPLE_LEN);
    File::open(path)?
        .take(SAMPLE_LEN as u64)
        .read_to_end(&mut sample)?;
    Ok(sample)
}

/// Files under a directory, skipping hidden and vendored directories.
fn collect_files(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            let skipped = name.starts_with('.') || name == "node_modules" || name == "vendor" || name == "target";
            !(e.depth() > 0 && e.file_type().is_dir() && skipped)
        })
    {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn exit_code(err: &DispatchError) -> i32 {
    if err.is_transient() {
        EXIT_TRANSIENT
    } else if err.kind() == ErrorKind::QueryError {
        EXIT_ERROR
    } else {
        EXIT_FAILED
    }
}

/// Run `drivers list`.
pub fn run_drivers_list(args: &ListArgs, config_path: Option<&Path>) -> anyhow::Result<i32> {
    let format = match args.format.parse::<Format>() {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    let Some(config) = load_config(config_path) else {
        return Ok(EXIT_ERROR);
    };

    let catalog = build_catalog(&config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let rows = runtime.block_on(async {
        let available = catalog.provisioner().available();
        bootstrap(&catalog, &available).await;
        let rows = report::driver_rows(&catalog.list());
        catalog.shutdown().await;
        rows
    });

    match format {
        Format::Json => report::write_drivers_json(&rows)?,
        Format::Table => report::write_drivers_table(&rows),
    }
    Ok(EXIT_SUCCESS)
}

/// Run the lang command.
pub fn run_lang(args: &LangArgs, config_path: Option<&Path>) -> anyhow::Result<i32> {
    let Some(config) = load_config(config_path) else {
        return Ok(EXIT_ERROR);
    };
    let classifier = config.classifier()?;
    let stdout = std::io::stdout();
    lang(&mut stdout.lock(), &classifier, &args.paths)
}

/// Classify `paths`, writing one line per file. A file argument prints the
/// bare language identifier; files found inside directories are prefixed
/// with their path.
fn lang<W: Write>(out: &mut W, classifier: &Classifier, paths: &[PathBuf]) -> anyhow::Result<i32> {
    let mut undetected = false;
    for path in paths {
        let metadata = match std::fs::metadata(path) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("Error: cannot access {}: {}", path.display(), e);
                return Ok(EXIT_ERROR);
            }
        };

        if metadata.is_dir() {
            // Inside directories only recognized files are listed.
            for file in collect_files(path)? {
                if let Some(language) = detect(classifier, &file) {
                    report::write_detection(out, &file, &language)?;
                }
            }
        } else {
            match detect(classifier, path) {
                Some(language) => report::write_language(out, &language)?,
                None => {
                    eprintln!("Error: language not detected for {}", path.display());
                    undetected = true;
                }
            }
        }
    }

    Ok(if undetected { EXIT_FAILED } else { EXIT_SUCCESS })
}

fn detect(classifier: &Classifier, path: &Path) -> Option<Language> {
    let sample = match read_sample(path) {
        Ok(sample) => Some(sample),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "classifying by name only");
            None
        }
    };
    classifier.classify(path, sample.as_deref())
}

/// Run the uast command.
pub fn run_uast(args: &UastArgs, config_path: Option<&Path>) -> anyhow::Result<i32> {
    let Some(config) = load_config(config_path) else {
        return Ok(EXIT_ERROR);
    };

    let mode = match args.mode.as_deref() {
        Some(m) => match m.parse::<Mode>() {
            Ok(mode) => mode,
            Err(e) => {
                eprintln!("Error: {}", e);
                return Ok(EXIT_ERROR);
            }
        },
        None => config.mode,
    };
    let language = match args.lang.as_deref().map(Language::resolve).transpose() {
        Ok(language) => language,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    let timeout = match args.timeout_ms {
        Some(0) => {
            eprintln!("Error: --timeout-ms must be greater than zero");
            return Ok(EXIT_ERROR);
        }
        Some(ms) => Duration::from_millis(ms),
        None => config.timeout(),
    };

    let mut request = ParseRequest::file(&args.path)
        .with_mode(mode)
        .with_timeout(timeout);
    if let Some(language) = &language {
        request = request.with_language(language.clone());
    }
    if let Some(query) = &args.query {
        request = request.with_query(query.clone());
    }

    let classifier = config.classifier()?;
    // Only the driver this file needs is brought up.
    let target = language.or_else(|| detect(&classifier, &args.path));
    let catalog = build_catalog(&config)?;
    let dispatcher = Dispatcher::new(Arc::clone(&catalog), classifier);

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(async {
        if let Some(target) = &target {
            if catalog.provisioner().available().contains(target) {
                if let Some((language, err)) = bootstrap(&catalog, std::slice::from_ref(target)).await.pop() {
                    if !matches!(err, CatalogError::Provision(ProvisionError::Unsupported(_))) {
                        catalog.shutdown().await;
                        return Err(DispatchError::DriverUnavailable {
                            language,
                            reason: err.to_string(),
                        });
                    }
                }
            }
        }
        let result = dispatcher.dispatch(&request).await;
        catalog.shutdown().await;
        result
    });

    match result {
        Ok(response) => {
            report::write_response(&response)?;
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            report::write_error(&e);
            Ok(exit_code(&e))
        }
    }
}
