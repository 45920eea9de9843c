use super::codec;
use crate::domain::account::Account;
use crate::error::Result;
use std::io::{BufWriter, Write};

/// Writes accounts to a line-oriented ledger target.
pub struct LedgerWriter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> LedgerWriter<W> {
    /// Creates a new `LedgerWriter` over any `Write` target (e.g., File).
    pub fn new(target: W) -> Self {
        Self {
            writer: BufWriter::new(target),
        }
    }

    /// Encodes the account and appends it as one line.
    pub fn write_account(&mut self, account: &Account) -> Result<()> {
        let line = codec::encode(account)?;
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    /// Appends a pre-rendered line verbatim.
    ///
    /// Used by the rewrite path to carry lines it could not decode through
    /// unchanged.
    pub fn write_raw(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    /// Flushes buffered lines to the underlying target.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
