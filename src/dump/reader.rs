//! Forward-only line stream over a dump
//!
//! The underlying handle is owned by the reader and closed when it is
//! dropped, whether the pass completed or stopped on an error. Lines are
//! split on raw bytes; a line that is not valid UTF-8 is handed back as a
//! [`LineError`] so the caller can skip it and keep reading.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_stream::{wrappers::SplitStream, StreamExt};

use crate::error::{AppError, AppResult, LineError};

/// Decoded line text, or why the line could not be decoded
pub type DumpLine = Result<String, LineError>;

const READ_BUFFER_SIZE: usize = 256 * 1024;

pub struct DumpReader<R> {
    path: PathBuf,
    lines: SplitStream<R>,
    line_number: u64,
}

impl DumpReader<BufReader<File>> {
    /// Open a dump file for a single pass
    pub async fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).await.map_err(|source| AppError::StreamOpen {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Opened dump {}", path.display());
        Ok(Self::new(path, BufReader::with_capacity(READ_BUFFER_SIZE, file)))
    }
}

impl<R: AsyncBufRead + Unpin> DumpReader<R> {
    /// Wrap an already open source; `path` is only used in messages
    pub fn new(path: impl Into<PathBuf>, reader: R) -> Self {
        Self {
            path: path.into(),
            lines: SplitStream::new(reader.split(b'\n')),
            line_number: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Next line with its 1-based number, `None` at end of input.
    ///
    /// Only I/O failures are fatal; undecodable content is returned as an
    /// `Err` line.
    pub async fn next_line(&mut self) -> AppResult<Option<(u64, DumpLine)>> {
        match self.lines.next().await {
            Some(Ok(mut bytes)) => {
                self.line_number += 1;
                if bytes.last() == Some(&b'\r') {
                    bytes.pop();
                }
                let line = String::from_utf8(bytes)
                    .map_err(|e| LineError::Parse(format!("invalid UTF-8: {}", e.utf8_error())));
                Ok(Some((self.line_number, line)))
            }
            Some(Err(source)) => Err(AppError::StreamRead {
                path: self.path.clone(),
                line: self.line_number + 1,
                source,
            }),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_numbers_lines_from_one() {
        let input: &[u8] = b"first\nsecond\n\nfourth";
        let mut reader = DumpReader::new("memory", input);

        assert_eq!(reader.next_line().await.unwrap(), Some((1, Ok("first".to_string()))));
        assert_eq!(reader.next_line().await.unwrap(), Some((2, Ok("second".to_string()))));
        assert_eq!(reader.next_line().await.unwrap(), Some((3, Ok(String::new()))));
        assert_eq!(reader.next_line().await.unwrap(), Some((4, Ok("fourth".to_string()))));
        assert_eq!(reader.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        let err = DumpReader::open("/nonexistent/catalog-loader/authors.txt")
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::StreamOpen { .. }));
    }

    #[tokio::test]
    async fn test_crlf_line_endings_are_trimmed() {
        let input: &[u8] = b"one\r\ntwo\r\n";
        let mut reader = DumpReader::new("memory", input);

        assert_eq!(reader.next_line().await.unwrap(), Some((1, Ok("one".to_string()))));
        assert_eq!(reader.next_line().await.unwrap(), Some((2, Ok("two".to_string()))));
        assert_eq!(reader.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_end_the_stream() {
        let input: &[u8] = b"ok\n\xff\xfe\nafter\n";
        let mut reader = DumpReader::new("memory", input);

        assert_eq!(reader.next_line().await.unwrap(), Some((1, Ok("ok".to_string()))));
        let (number, line) = reader.next_line().await.unwrap().unwrap();
        assert_eq!(number, 2);
        assert!(matches!(line, Err(LineError::Parse(_))));
        assert_eq!(reader.next_line().await.unwrap(), Some((3, Ok("after".to_string()))));
        assert_eq!(reader.next_line().await.unwrap(), None);
    }
}
