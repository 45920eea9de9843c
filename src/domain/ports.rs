use super::account::Account;
use crate::error::Result;
use async_trait::async_trait;

/// Storage port for the account ledger.
///
/// A store owns the full account universe. Lookups by an unknown number are
/// a normal outcome (`Ok(None)`), never an error.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Builds a new account with a freshly allocated number and a zero
    /// balance, and durably appends it to the ledger.
    async fn create(&self, name: &str, surname: &str) -> Result<Account>;

    /// Returns the first account whose number matches, scanning in
    /// creation order.
    async fn find_by_account_number(&self, number: &str) -> Result<Option<Account>>;

    /// Durably replaces the stored balance and transaction log of the
    /// account with the matching number. Identity fields (name, surname)
    /// are immutable and keep their stored values.
    async fn update(&self, account: &Account) -> Result<()>;
}

pub type LedgerStoreBox = Box<dyn LedgerStore>;
