use crate::error::LedgerError;
use rand::Rng;
use rust_decimal::Decimal;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Represents the monetary balance of an account.
///
/// This is a wrapper around `rust_decimal::Decimal` to enforce domain-specific rules
/// and provide type safety for financial calculations.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Balance(pub Decimal);

/// Represents a positive monetary amount for deposits and withdrawals.
///
/// Ensures that operation amounts are always positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, LedgerError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(LedgerError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = LedgerError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl From<Amount> for Balance {
    fn from(amount: Amount) -> Self {
        Self(amount.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// Implement basic arithmetic for Balance to make it a usable Value Object
impl Add for Balance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Balance {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Balance {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Balance {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// A 10-digit account number, the sole lookup key for the ledger.
///
/// Freshly generated numbers always match `[1-9][0-9]{9}`. Numbers decoded
/// from the ledger file are accepted as-is, so lookups against legacy data
/// keep working.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountNumber(String);

const ACCOUNT_NUMBER_MIN: u64 = 1_000_000_000;
const ACCOUNT_NUMBER_MAX: u64 = 9_999_999_999;

impl AccountNumber {
    /// Generates a pseudo-random 10-digit account number.
    ///
    /// Uniqueness is not guaranteed here; the store probes for collisions
    /// before accepting a candidate.
    pub fn generate() -> Self {
        let number = rand::thread_rng().gen_range(ACCOUNT_NUMBER_MIN..=ACCOUNT_NUMBER_MAX);
        Self(number.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountNumber {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AccountNumber {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<&str> for AccountNumber {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single account: identity, balance, and its append-only transaction log.
///
/// `number`, `name` and `surname` are set at creation and never modified.
/// Transaction entries are free-text display strings in insertion order.
#[derive(Debug, PartialEq, Clone)]
pub struct Account {
    pub number: AccountNumber,
    pub name: String,
    pub surname: String,
    pub balance: Balance,
    pub transactions: Vec<String>,
}

impl Account {
    /// Creates a fresh account with a zero balance and no transactions.
    pub fn new(number: AccountNumber, name: impl Into<String>, surname: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
            surname: surname.into(),
            balance: Balance::ZERO,
            transactions: Vec::new(),
        }
    }

    /// Adds the amount to the balance and records a `Deposit R{amount}` entry.
    pub fn deposit(&mut self, amount: Amount) {
        self.balance += amount.into();
        self.transactions.push(format!("Deposit R{}", amount));
    }

    /// Subtracts the amount if covered by the balance and records a
    /// `Withdraw R{amount}` entry. Amounts above the balance leave the
    /// account untouched.
    pub fn withdraw(&mut self, amount: Amount) -> Result<(), LedgerError> {
        if Balance::from(amount) > self.balance {
            return Err(LedgerError::ValidationError(
                "Insufficient funds".to_string(),
            ));
        }
        self.balance -= amount.into();
        self.transactions.push(format!("Withdraw R{}", amount));
        Ok(())
    }
}
