use crate::utils::{decode_permissive, normalize_newlines};
use anyhow::{Context, Result};
use log::debug;
use memmap2::MmapOptions;
use std::fs::File as StdFile;
use std::io;
use std::path::Path;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

/// Delimiter line above and below the `Filename:` line of every banner.
pub const BANNER_RULE: &str =
    "// =================================================================================";

/// What happened to a single source file.
#[derive(Debug)]
pub enum EntryOutcome {
    /// Content was copied into the notes.
    Copied { bytes: usize },
    /// The file could not be read; an error comment took its place.
    Unreadable(io::Error),
}

pub struct NotesWriter<W: AsyncWrite + Unpin> {
    writer: BufWriter<W>,
}

impl<W: AsyncWrite + Unpin> NotesWriter<W> {
    pub fn new(writer: BufWriter<W>) -> Self {
        Self { writer }
    }

    /// Writes the banner for `display`, then the file content or, when the
    /// file can't be read, an inline error comment.
    ///
    /// Only failures to write the output are returned as errors.
    pub async fn write_entry(&mut self, path: &Path, display: &str) -> Result<EntryOutcome> {
        debug!("Writing file: {display}");

        self.write_banner(display).await?;

        let outcome = match read_source(path) {
            Ok(content) => {
                self.writer
                    .write_all(content.as_bytes())
                    .await
                    .with_context(|| format!("Failed to write content of {display}"))?;
                self.writer
                    .write_all(b"\n\n")
                    .await
                    .with_context(|| format!("Failed to write spacing after {display}"))?;
                EntryOutcome::Copied {
                    bytes: content.len(),
                }
            }
            Err(err) => {
                self.writer
                    .write_all(format!("// ERROR: Could not read file. Reason: {err}\n\n").as_bytes())
                    .await
                    .with_context(|| format!("Failed to write error note for {display}"))?;
                EntryOutcome::Unreadable(err)
            }
        };

        debug!("Finished: {display}");
        Ok(outcome)
    }

    pub async fn write_banner(&mut self, display: &str) -> Result<()> {
        let banner = format!("{BANNER_RULE}\n// Filename:    {display}\n{BANNER_RULE}\n\n");
        self.writer
            .write_all(banner.as_bytes())
            .await
            .with_context(|| format!("Failed to write banner for {display}"))
    }

    pub async fn flush(&mut self) -> Result<()> {
        self.writer.flush().await.context("Failed to flush output")
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

/// Reads a whole source file as text, dropping invalid UTF-8 sequences and
/// folding `\r\n`/`\r` line endings into `\n`.
pub fn read_source(path: &Path) -> io::Result<String> {
    let file = StdFile::open(path)?;

    if file.metadata()?.len() == 0 {
        debug!("File '{}' is empty", path.display());
        return Ok(String::new());
    }

    // SAFETY: the mapping is read once and dropped before returning. A file
    // truncated by another process while mapped is outside what we support.
    let mmap = unsafe { MmapOptions::new().map(&file)? };

    Ok(normalize_newlines(decode_permissive(&mmap)))
}
