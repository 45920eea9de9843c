use crate::domain::account::{Account, AccountNumber};
use crate::domain::ports::LedgerStore;
use crate::error::{LedgerError, Result};
use crate::interfaces::line::codec;
use crate::interfaces::line::reader::LedgerReader;
use crate::interfaces::line::writer::LedgerWriter;
use async_trait::async_trait;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// How many fresh account numbers `create` tries before giving up.
const MAX_NUMBER_ATTEMPTS: usize = 100;

/// The flat-file ledger store, the system of record for all accounts.
///
/// One account per line in creation order, encoded by the line codec.
/// `create` appends; `update` rewrites the whole file through a temp file
/// in the same directory followed by an atomic rename, so a failed rewrite
/// never truncates the original.
///
/// There is no cross-process locking: two processes writing the same
/// ledger race with last-writer-wins semantics. The store targets a single
/// interactive operator.
pub struct FileLedgerStore {
    path: PathBuf,
}

enum RewriteLine {
    Account(Account),
    /// A line the codec could not decode, carried through unchanged.
    Raw(String),
}

impl FileLedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the ledger lives in; the rewrite temp file must be created
    /// here so the final rename stays on one filesystem.
    fn ledger_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Scans the ledger for the first line whose account number matches.
    ///
    /// An absent file means no accounts exist yet. Malformed lines are
    /// skipped with a warning so one corrupt record cannot block every
    /// lookup behind it.
    fn scan(&self, number: &str) -> Result<Option<Account>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        for result in LedgerReader::new(file).accounts() {
            match result {
                Ok(account) if account.number == number => return Ok(Some(account)),
                Ok(_) => {}
                Err(LedgerError::MalformedRecord(reason)) => {
                    tracing::warn!(%reason, "skipping malformed ledger line");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(None)
    }

    fn allocate_account_number(&self) -> Result<AccountNumber> {
        for _ in 0..MAX_NUMBER_ATTEMPTS {
            let candidate = AccountNumber::generate();
            if self.scan(candidate.as_str())?.is_none() {
                return Ok(candidate);
            }
        }
        Err(LedgerError::InternalError(Box::new(std::io::Error::other(
            "exhausted account number candidates",
        ))))
    }
}

#[async_trait]
impl LedgerStore for FileLedgerStore {
    async fn create(&self, name: &str, surname: &str) -> Result<Account> {
        let number = self.allocate_account_number()?;
        let account = Account::new(number, name, surname);

        // Encode before opening so a validation failure cannot touch the file.
        let line = codec::encode(&account)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;

        Ok(account)
    }

    async fn find_by_account_number(&self, number: &str) -> Result<Option<Account>> {
        self.scan(number)
    }

    async fn update(&self, account: &Account) -> Result<()> {
        let file = File::open(&self.path)?;

        let mut lines = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            match codec::decode(&line) {
                Ok(mut existing) => {
                    if existing.number == account.number {
                        // Identity fields keep their stored values.
                        existing.balance = account.balance;
                        existing.transactions = account.transactions.clone();
                    }
                    lines.push(RewriteLine::Account(existing));
                }
                Err(LedgerError::MalformedRecord(reason)) => {
                    tracing::warn!(%reason, "preserving undecodable ledger line in rewrite");
                    lines.push(RewriteLine::Raw(line));
                }
                Err(e) => return Err(e),
            }
        }

        let temp = NamedTempFile::new_in(self.ledger_dir())?;
        let mut writer = LedgerWriter::new(temp.as_file());
        for line in &lines {
            match line {
                RewriteLine::Account(existing) => writer.write_account(existing)?,
                RewriteLine::Raw(raw) => writer.write_raw(raw)?,
            }
        }
        writer.flush()?;
        drop(writer);

        temp.persist(&self.path)
            .map_err(|e| LedgerError::IoError(e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::{Amount, Balance};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> FileLedgerStore {
        FileLedgerStore::new(dir.path().join("accounts.txt"))
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let created = store.create("John", "Smith").await.unwrap();
        let found = store
            .find_by_account_number(created.number.as_str())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.number, created.number);
        assert_eq!(found.name, "John");
        assert_eq!(found.surname, "Smith");
        assert_eq!(found.balance, Balance::ZERO);
        assert!(found.transactions.is_empty());
    }

    #[tokio::test]
    async fn test_find_on_absent_file_is_not_found() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let result = store.find_by_account_number("0000000000").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_find_unknown_number_in_populated_store() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store.create("John", "Smith").await.unwrap();

        let result = store.find_by_account_number("0000000000").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_create_appends_rather_than_truncates() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let first = store.create("John", "Smith").await.unwrap();
        let second = store.create("Jane", "Doe").await.unwrap();

        assert!(
            store
                .find_by_account_number(first.number.as_str())
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            store
                .find_by_account_number(second.number.as_str())
                .await
                .unwrap()
                .is_some()
        );

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[tokio::test]
    async fn test_create_rejects_delimiter_in_name_without_touching_file() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let result = store.create("Jane,Marie", "Doe").await;

        assert!(matches!(result, Err(LedgerError::ValidationError(_))));
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_update_replaces_only_the_matching_line() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let mut first = store.create("John", "Smith").await.unwrap();
        let second = store.create("Jane", "Doe").await.unwrap();
        let second_line_before = std::fs::read_to_string(store.path())
            .unwrap()
            .lines()
            .nth(1)
            .unwrap()
            .to_string();

        first.deposit(Amount::new(dec!(75.5)).unwrap());
        store.update(&first).await.unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        // Original line order is preserved and the other account is untouched.
        assert!(lines[0].starts_with(first.number.as_str()));
        assert_eq!(lines[1], second_line_before);

        let reloaded = store
            .find_by_account_number(first.number.as_str())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.balance, Balance::new(dec!(75.5)));
        assert_eq!(reloaded.transactions, vec!["Deposit R75.5"]);

        let untouched = store
            .find_by_account_number(second.number.as_str())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(untouched.balance, Balance::ZERO);
    }

    #[tokio::test]
    async fn test_update_keeps_stored_identity_fields() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let mut account = store.create("John", "Smith").await.unwrap();
        account.name = "Renamed".to_string();
        account.deposit(Amount::new(dec!(1.0)).unwrap());
        store.update(&account).await.unwrap();

        let reloaded = store
            .find_by_account_number(account.number.as_str())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.name, "John");
        assert_eq!(reloaded.balance, Balance::new(dec!(1.0)));
    }

    #[tokio::test]
    async fn test_update_on_absent_file_is_a_persistence_error() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let account = Account::new(AccountNumber::generate(), "John", "Smith");

        let result = store.update(&account).await;
        assert!(matches!(result, Err(LedgerError::IoError(_))));
    }

    #[tokio::test]
    async fn test_scan_skips_malformed_lines() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            "garbage without delimiters\n1234567890,Jane,Doe,10.0,\n",
        )
        .unwrap();

        let found = store
            .find_by_account_number("1234567890")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "Jane");
    }

    #[tokio::test]
    async fn test_update_preserves_malformed_lines_verbatim() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            "garbage without delimiters\n1234567890,Jane,Doe,10.0,\n",
        )
        .unwrap();

        let mut account = store
            .find_by_account_number("1234567890")
            .await
            .unwrap()
            .unwrap();
        account.deposit(Amount::new(dec!(5.0)).unwrap());
        store.update(&account).await.unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "garbage without delimiters");
        assert_eq!(lines[1], "1234567890,Jane,Doe,15.0,Deposit R5.0");
    }

    #[tokio::test]
    async fn test_update_with_no_matching_line_rewrites_unchanged() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store.create("John", "Smith").await.unwrap();
        let before = std::fs::read_to_string(store.path()).unwrap();

        let stranger = Account::new(AccountNumber::from("0000000000"), "No", "One");
        store.update(&stranger).await.unwrap();

        let after = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(before, after);
    }
}
