//! Shard sources: where a shard's rows come from.
//!
//! A shard file with content yields one row per non-blank line. A zero-byte
//! shard file yields exactly one row, read from its filename, because the
//! dump tool encodes small rows into the name instead of the body.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{ConsolidateError, Result};
use crate::row::split_row;

/// One shard file, classified by size when opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShardSource {
    /// Non-empty file: rows are its lines.
    Content(PathBuf),
    /// Zero-byte file: the filename is the row.
    FileName(PathBuf),
}

impl ShardSource {
    /// Classifies `path` by its current size.
    pub fn open(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path).map_err(|e| ConsolidateError::Metadata {
            path: path.to_path_buf(),
            source: e,
        })?;

        if metadata.len() > 0 {
            Ok(Self::Content(path.to_path_buf()))
        } else {
            Ok(Self::FileName(path.to_path_buf()))
        }
    }

    /// Path of the underlying shard file.
    pub fn path(&self) -> &Path {
        match self {
            Self::Content(path) | Self::FileName(path) => path,
        }
    }

    /// Short label for logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Content(_) => "content",
            Self::FileName(_) => "filename",
        }
    }

    /// Returns an iterator over the comma-split rows of this shard.
    pub fn rows(&self) -> Result<ShardRows> {
        match self {
            Self::Content(path) => {
                let file = File::open(path).map_err(|e| ConsolidateError::FileRead {
                    path: path.clone(),
                    source: e,
                })?;
                Ok(ShardRows::Lines(LineRows::new(
                    BufReader::new(file),
                    path.clone(),
                )))
            }
            Self::FileName(path) => {
                let row = path
                    .file_name()
                    .map(|name| split_row(&name.to_string_lossy()));
                Ok(ShardRows::Name(row))
            }
        }
    }
}

/// Rows produced by a [`ShardSource`].
pub enum ShardRows {
    Lines(LineRows<BufReader<File>>),
    Name(Option<Vec<String>>),
}

impl Iterator for ShardRows {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Lines(lines) => lines.next(),
            Self::Name(row) => row.take().map(Ok),
        }
    }
}

/// Splits a reader into non-blank, comma-split rows.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. Invalid UTF-8 is replaced
/// rather than rejected.
pub struct LineRows<R> {
    reader: R,
    path: PathBuf,
    buf: Vec<u8>,
    pending: VecDeque<String>,
    done: bool,
}

impl<R: BufRead> LineRows<R> {
    pub fn new(reader: R, path: PathBuf) -> Self {
        Self {
            reader,
            path,
            buf: Vec::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }

    fn fill(&mut self) -> Result<()> {
        while self.pending.is_empty() && !self.done {
            self.buf.clear();
            let read = self
                .reader
                .read_until(b'\n', &mut self.buf)
                .map_err(|e| ConsolidateError::FileRead {
                    path: self.path.clone(),
                    source: e,
                })?;
            if read == 0 {
                self.done = true;
                break;
            }
            for segment in self.buf.split(|b| *b == b'\n' || *b == b'\r') {
                if !segment.is_empty() {
                    self.pending
                        .push_back(String::from_utf8_lossy(segment).into_owned());
                }
            }
        }
        Ok(())
    }
}

impl<R: BufRead> Iterator for LineRows<R> {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Err(err) = self.fill() {
            self.done = true;
            return Some(Err(err));
        }
        self.pending.pop_front().map(|line| Ok(split_row(&line)))
    }
}
