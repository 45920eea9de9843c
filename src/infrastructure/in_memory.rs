use crate::domain::account::{Account, AccountNumber};
use crate::domain::ports::LedgerStore;
use crate::error::{LedgerError, Result};
use crate::interfaces::line::codec;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// How many fresh account numbers `create` tries before giving up.
const MAX_NUMBER_ATTEMPTS: usize = 100;

/// A thread-safe in-memory ledger store.
///
/// Accounts live in a `Vec` so creation order is preserved exactly like the
/// flat file. Ideal for tests and for wiring the shell without touching
/// disk; applies the same encode-time validation as the file store so the
/// two adapters are interchangeable.
#[derive(Default, Clone)]
pub struct InMemoryLedgerStore {
    accounts: Arc<RwLock<Vec<Account>>>,
}

impl InMemoryLedgerStore {
    /// Creates a new, empty in-memory ledger store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn create(&self, name: &str, surname: &str) -> Result<Account> {
        let mut accounts = self.accounts.write().await;

        let mut number = None;
        for _ in 0..MAX_NUMBER_ATTEMPTS {
            let candidate = AccountNumber::generate();
            if accounts.iter().all(|a| a.number != candidate) {
                number = Some(candidate);
                break;
            }
        }
        let number = number.ok_or_else(|| {
            LedgerError::InternalError(Box::new(std::io::Error::other(
                "exhausted account number candidates",
            )))
        })?;

        let account = Account::new(number, name, surname);
        codec::encode(&account)?;
        accounts.push(account.clone());
        Ok(account)
    }

    async fn find_by_account_number(&self, number: &str) -> Result<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| a.number == number).cloned())
    }

    async fn update(&self, account: &Account) -> Result<()> {
        codec::encode(account)?;
        let mut accounts = self.accounts.write().await;
        if let Some(existing) = accounts.iter_mut().find(|a| a.number == account.number) {
            existing.balance = account.balance;
            existing.transactions = account.transactions.clone();
        }
        Ok(())
    }
}
