use crate::domain::account::{Account, Amount, Balance};
use crate::domain::ports::LedgerStore;
use crate::error::Result;

/// One authenticated session over a single account.
///
/// `Session` owns the logged-in account and borrows the store; it is the
/// explicit replacement for a process-wide "current account" variable.
/// Every mutation is awaited through the store before the next operation
/// observes it, keeping the file and the in-memory account in step.
pub struct Session<'a> {
    account: Account,
    store: &'a dyn LedgerStore,
}

impl<'a> Session<'a> {
    /// Opens a session for an account obtained from create or login.
    pub fn new(account: Account, store: &'a dyn LedgerStore) -> Self {
        Self { account, store }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn balance(&self) -> Balance {
        self.account.balance
    }

    pub fn transactions(&self) -> &[String] {
        &self.account.transactions
    }

    /// Adds the amount to the balance, records the transaction entry, and
    /// persists the account.
    pub async fn deposit(&mut self, amount: Amount) -> Result<Balance> {
        self.account.deposit(amount);
        self.store.update(&self.account).await?;
        Ok(self.account.balance)
    }

    /// Subtracts the amount if covered by the balance, records the
    /// transaction entry, and persists the account. Amounts above the
    /// balance are a validation error and mutate nothing.
    pub async fn withdraw(&mut self, amount: Amount) -> Result<Balance> {
        self.account.withdraw(amount)?;
        self.store.update(&self.account).await?;
        Ok(self.account.balance)
    }
}
