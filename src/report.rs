//! Output formatting for uastd.
//!
//! Supports two output formats:
//! - Table: aligned, colored terminal output for humans
//! - JSON: structured output for programs
//!
//! UAST output is always JSON; errors always go to stderr.

use colored::*;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::catalog::{DriverRecord, InstallStatus};
use crate::dispatch::{DispatchError, ParseResponse};
use crate::lang::Language;

/// Output format for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Table,
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(Format::Table),
            "json" => Ok(Format::Json),
            other => Err(format!("invalid format {:?}, must be 'table' or 'json'", other)),
        }
    }
}

/// One line of the drivers listing.
#[derive(Debug, Clone, Serialize)]
pub struct DriverRow {
    pub language: String,
    pub version: String,
    pub endpoint: String,
    pub status: InstallStatus,
}

impl From<&DriverRecord> for DriverRow {
    fn from(record: &DriverRecord) -> Self {
        Self {
            language: record.language().to_string(),
            version: record.version().to_string(),
            endpoint: record.endpoint().to_string(),
            status: record.status(),
        }
    }
}

pub fn driver_rows(records: &[Arc<DriverRecord>]) -> Vec<DriverRow> {
    records.iter().map(|r| DriverRow::from(r.as_ref())).collect()
}

const HEADER: [&str; 4] = ["LANGUAGE", "VERSION", "ENDPOINT", "STATUS"];

/// Render the drivers table without colors.
pub fn format_drivers_table(rows: &[DriverRow]) -> String {
    let mut widths = HEADER.map(str::len);
    for row in rows {
        widths[0] = widths[0].max(row.language.len());
        widths[1] = widths[1].max(row.version.len());
        widths[2] = widths[2].max(row.endpoint.len());
    }

    let mut out = format!(
        "{:<w0$}  {:<w1$}  {:<w2$}  {}\n",
        HEADER[0],
        HEADER[1],
        HEADER[2],
        HEADER[3],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
    );
    for row in rows {
        out.push_str(&format!(
            "{:<w0$}  {:<w1$}  {:<w2$}  {}\n",
            row.language,
            row.version,
            row.endpoint,
            row.status,
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        ));
    }
    out
}

pub fn write_drivers_table(rows: &[DriverRow]) {
    if rows.is_empty() {
        println!("{}", "No drivers installed.".dimmed());
        return;
    }

    let table = format_drivers_table(rows);
    let mut lines = table.lines();
    if let Some(header) = lines.next() {
        println!("{}", header.bold());
    }
    for (line, row) in lines.zip(rows) {
        // Status is the last column, so coloring it does not break alignment.
        let cut = line.len() - row.status.as_str().len();
        let status = match row.status {
            InstallStatus::Ready => row.status.as_str().green(),
            InstallStatus::Unhealthy => row.status.as_str().red(),
        };
        println!("{}{}", &line[..cut], status);
    }
}

pub fn write_drivers_json(rows: &[DriverRow]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(rows)?);
    Ok(())
}

/// Print the language of a single file: the bare identifier, so scripts can
/// consume it.
pub fn write_language<W: Write>(out: &mut W, language: &Language) -> io::Result<()> {
    writeln!(out, "{}", language)
}

/// Print one file found while walking a directory.
pub fn write_detection<W: Write>(out: &mut W, path: &Path, language: &Language) -> io::Result<()> {
    writeln!(out, "{}: {}", path.display(), language.as_str().cyan())
}

pub fn write_response(response: &ParseResponse) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}

/// Render a dispatch failure for humans: what failed, which kind, what to do.
pub fn format_error(err: &DispatchError) -> String {
    let mut out = format!("{} [{}]: {}", "Error".red().bold(), err.kind(), err);
    out.push_str(&format!("\n  {} {}", "hint:".dimmed(), err.hint()));
    if err.is_transient() {
        out.push_str(&format!("\n  {}", "this failure is transient; retrying may succeed".yellow()));
    }
    out
}

pub fn write_error(err: &DispatchError) {
    eprintln!("{}", format_error(err));
}
