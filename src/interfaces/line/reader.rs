use super::codec;
use crate::domain::account::Account;
use crate::error::{LedgerError, Result};
use std::io::{BufRead, BufReader, Read};

/// Reads accounts from a line-oriented ledger source.
///
/// This reader wraps any `Read` source and provides an iterator over
/// `Result<Account>`, decoding one ledger line at a time. Blank lines are
/// skipped; each remaining line either decodes or yields the decode error,
/// so callers decide how to treat malformed records.
pub struct LedgerReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> LedgerReader<R> {
    /// Creates a new `LedgerReader` from any `Read` source (e.g., File).
    pub fn new(source: R) -> Self {
        Self {
            reader: BufReader::new(source),
        }
    }

    /// Returns an iterator that lazily reads and decodes accounts.
    ///
    /// This allows scanning large ledgers in a streaming fashion without
    /// loading the entire file into memory.
    pub fn accounts(self) -> impl Iterator<Item = Result<Account>> {
        self.reader.lines().filter_map(|line| match line {
            Ok(line) if line.is_empty() => None,
            Ok(line) => Some(codec::decode(&line)),
            Err(e) => Some(Err(LedgerError::IoError(e))),
        })
    }
}
