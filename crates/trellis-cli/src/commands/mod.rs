//! CLI command implementations

pub mod completions;
pub mod config;
pub mod connectivity;
pub mod inspect;
pub mod order;
pub mod path;
pub mod traverse;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use trellis_core::{AdjacencyList, CancelToken};

/// Graph input shared by every analysis command
#[derive(Args)]
pub struct GraphInput {
    /// Graph description file ("-" reads stdin)
    pub file: PathBuf,
}

impl GraphInput {
    pub fn read(&self) -> anyhow::Result<String> {
        read_input(&self.file)
    }

    pub fn adjacency(&self) -> anyhow::Result<AdjacencyList> {
        let text = self.read()?;
        AdjacencyList::from_text(&text).with_context(|| invalid_graph(&self.file))
    }
}

/// Read a graph description from a file, or stdin for `-`
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read graph from stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read graph file {}", path.display()))
}

/// Context message for errors raised while analyzing `path`
pub fn invalid_graph(path: &Path) -> String {
    if path == Path::new("-") {
        "Invalid graph on stdin".to_string()
    } else {
        format!("Invalid graph in {}", path.display())
    }
}

/// Run `f` with a token that a watchdog thread cancels after `limit_ms`
///
/// The watchdog exits as soon as `f` returns.
pub fn with_time_limit<T>(
    limit_ms: u64,
    f: impl FnOnce(&CancelToken) -> trellis_core::Result<T>,
) -> trellis_core::Result<T> {
    let token = CancelToken::new();
    let watchdog = token.clone();
    let (done_tx, done_rx) = mpsc::channel::<()>();

    let handle = thread::spawn(move || {
        if let Err(RecvTimeoutError::Timeout) = done_rx.recv_timeout(Duration::from_millis(limit_ms)) {
            tracing::warn!("Time limit of {} ms reached, cancelling", limit_ms);
            watchdog.cancel();
        }
    });

    let result = f(&token);
    drop(done_tx);
    if handle.join().is_err() {
        tracing::warn!("Time limit watchdog panicked");
    }
    result
}
