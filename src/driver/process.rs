//! Subprocess driver transport.
//!
//! Each call spawns the driver executable, writes one `WireRequest` to its
//! stdin, closes it, and reads one `WireResponse` from stdout. The child is
//! killed if the call is dropped (timeout or caller cancellation).

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::wire::{self, WireRequest};
use super::{ClientError, Driver, RawTree};
use crate::lang::Language;

/// Driver executable invoked once per parse.
pub struct ProcessDriver {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessDriver {
    pub fn new(program: PathBuf, args: Vec<String>) -> Self {
        Self { program, args }
    }
}

#[async_trait]
impl Driver for ProcessDriver {
    async fn parse(&self, content: &[u8], language: &Language) -> Result<RawTree, ClientError> {
        let request = WireRequest::new(language, content).to_bytes()?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ClientError::Unavailable(format!(
                    "failed to start {}: {}",
                    self.program.display(),
                    e
                ))
            })?;

        let stdin = child.stdin.take();
        let write = async move {
            if let Some(mut stdin) = stdin {
                // A driver may exit before reading everything; its reply decides.
                if let Err(e) = stdin.write_all(&request).await {
                    tracing::debug!(error = %e, "driver closed stdin early");
                }
            }
        };
        let (_, output) = tokio::join!(write, child.wait_with_output());
        let output = output.map_err(|e| {
            ClientError::Unavailable(format!("lost driver {}: {}", self.program.display(), e))
        })?;

        if output.stdout.iter().all(u8::is_ascii_whitespace) {
            return Err(ClientError::Unavailable(format!(
                "{} exited with {} without a response: {}",
                self.program.display(),
                output.status,
                wire::snippet(&output.stderr)
            )));
        }

        if !output.status.success() {
            tracing::debug!(status = %output.status, "driver exited unsuccessfully after replying");
        }
        wire::decode_response(&output.stdout)
    }

    async fn health_check(&self) -> Result<(), ClientError> {
        if resolve_program(&self.program).is_some() {
            Ok(())
        } else {
            Err(ClientError::Unavailable(format!(
                "driver executable {} not found",
                self.program.display()
            )))
        }
    }
}

/// Locate an executable the way the OS would when spawning it.
fn resolve_program(program: &Path) -> Option<PathBuf> {
    if program.components().count() > 1 {
        return program.is_file().then(|| program.to_path_buf());
    }
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}
