//! Streaming line access over newline-delimited files.
//!
//! Both operations read the file in fixed-size chunks, so a word list of any
//! size is handled with a constant amount of memory:
//!
//! - [`count_lines`] scans the whole file once and counts delimiter bytes.
//! - [`extract_line`] scans only up to the end of the requested line and stops
//!   reading as soon as it has passed it.
//!
//! Lines are numbered from 1. A file always has at least one line: a file with
//! `n` delimiter bytes has `n + 1` lines, even when it is empty or ends with a
//! trailing delimiter (in which case the last line is empty).

use std::io;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// The byte separating lines
pub const DELIMITER: u8 = b'\n';

/// Size of the read buffer used when streaming a file
const CHUNK_SIZE: usize = 64 * 1024;

/// Count the lines of a file.
///
/// The count starts at 1 and is incremented for each delimiter byte, so a
/// zero-byte file has one line and `"a\nb\n"` has three.
pub async fn count_lines(path: &Path) -> io::Result<usize> {
    let mut file = File::open(path).await?;
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut count = 1usize;

    loop {
        let n = file.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        count += buf[..n].iter().filter(|&&b| b == DELIMITER).count();
    }

    tracing::debug!("Counted {} lines in {}", count, path.display());
    Ok(count)
}

/// Extract the text of line `target` (1-based) from a file.
///
/// The returned text never contains the delimiter and is not trimmed. Reading
/// stops as soon as the line has been passed. Asking for a line past the end of
/// the file yields an empty string rather than an error.
///
/// The line is decoded as UTF-8, with invalid sequences replaced by U+FFFD.
/// Because the delimiter is a single ASCII byte it can never occur inside a
/// multi-byte sequence, so scanning raw bytes finds the same boundaries as
/// scanning decoded characters.
pub async fn extract_line(path: &Path, target: usize) -> io::Result<String> {
    let mut file = File::open(path).await?;
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut scanner = LineScanner::new(target);

    loop {
        let n = file.read(&mut buf).await?;
        if n == 0 || scanner.feed(&buf[..n]) {
            break;
        }
    }

    Ok(scanner.finish())
}

/// Incremental state of a single-line extraction.
///
/// Fed one chunk at a time; kept separate from the I/O loop so chunk boundaries
/// can be exercised directly.
#[derive(Debug)]
struct LineScanner {
    target: usize,
    current: usize,
    line: Vec<u8>,
}

impl LineScanner {
    fn new(target: usize) -> Self {
        Self {
            target,
            current: 1,
            line: Vec::new(),
        }
    }

    /// Consume a chunk. Returns `true` once the target line is complete and no
    /// further input is needed.
    fn feed(&mut self, chunk: &[u8]) -> bool {
        let mut rest = chunk;

        while !rest.is_empty() {
            if self.current > self.target {
                return true;
            }

            match rest.iter().position(|&b| b == DELIMITER) {
                Some(pos) => {
                    if self.current == self.target {
                        self.line.extend_from_slice(&rest[..pos]);
                    }
                    self.current += 1;
                    rest = &rest[pos + 1..];
                }
                None => {
                    if self.current == self.target {
                        self.line.extend_from_slice(rest);
                    }
                    break;
                }
            }
        }

        self.current > self.target
    }

    fn finish(self) -> String {
        match String::from_utf8(self.line) {
            Ok(line) => line,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }
    }
}
