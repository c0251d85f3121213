//! # srcnotes Library
//!
//! Collects the C++ headers and sources (`.h`, `.cpp`) found below
//! `src/<subdir>` into a single plain-text notes file. Every file is preceded
//! by a banner naming its path relative to the working directory:
//!
//! ```text
//! // =================================================================================
//! // Filename:    src/math/Vector2.h
//! // =================================================================================
//!
//! <file content>
//!
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use srcnotes::{Config, Outcome, run_notes};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::new(std::env::current_dir()?, "math");
//!
//!     if let Outcome::Completed(summary) = run_notes(&config).await? {
//!         println!("{} files", summary.found_files);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod filewalker;
pub mod utils;
pub mod writer;

pub use cli::Config;
pub use filewalker::collect_sources;
pub use writer::{EntryOutcome, NotesWriter};

use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::BufWriter;
use utils::{display_path, normalize_path};

/// Totals reported after a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Matched files, unreadable ones included.
    pub found_files: usize,
    pub unreadable_files: usize,
    /// Absolute path of the notes file.
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed(RunSummary),
    /// The search directory does not exist; nothing was written.
    MissingSearchRoot(PathBuf),
}

/// Aggregate every source file below the configured search root into the
/// notes file.
///
/// A missing search directory is an expected outcome, not an error. Errors
/// are returned only when the notes file cannot be created or written.
pub async fn run_notes(config: &Config) -> Result<Outcome> {
    let search_root = config.search_root();

    if !search_root.is_dir() {
        let requested = config.requested_path();
        println!(
            "\n[ERROR] Directory not found: '{}'",
            requested.to_string_lossy().replace('\\', "/")
        );
        println!("Please make sure you are running this tool from your project's root directory.");
        return Ok(Outcome::MissingSearchRoot(requested));
    }

    println!("\nSearching in: '{}'", normalize_path(&search_root).display());

    let output_path = normalize_path(&config.working_dir.join(&config.output_path));
    let summary = write_notes(config, &search_root, &output_path)
        .await
        .with_context(|| {
            format!(
                "Could not write to output file '{}'",
                config.output_path.display()
            )
        })?;

    println!(
        "\nSuccess! Found and aggregated {} files.",
        summary.found_files
    );
    println!("Output saved to: '{}'", summary.output_path.display());

    Ok(Outcome::Completed(summary))
}

async fn write_notes(
    config: &Config,
    search_root: &Path,
    output_path: &Path,
) -> Result<RunSummary> {
    let file = File::create(output_path).await?;
    let mut notes = NotesWriter::new(BufWriter::new(file));

    let entries = collect_sources(search_root, Some(output_path))?;

    let mut found_files = 0;
    let mut unreadable_files = 0;

    for entry in entries {
        found_files += 1;
        let display = display_path(entry.path(), &config.working_dir);
        println!("  -> Copying '{display}'...");

        if let EntryOutcome::Unreadable(err) = notes.write_entry(entry.path(), &display).await? {
            unreadable_files += 1;
            debug!("Unreadable source file {}: {err:?}", entry.path().display());
            println!("  [WARNING] Could not read file '{display}': {err}");
        }
    }

    notes.flush().await?;
    info!(
        "Wrote {found_files} files ({unreadable_files} unreadable) to {}",
        output_path.display()
    );

    Ok(RunSummary {
        found_files,
        unreadable_files,
        output_path: output_path.to_path_buf(),
    })
}
