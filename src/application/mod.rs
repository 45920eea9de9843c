//! Application layer containing the session orchestration.
//!
//! This module defines the `Session` object that replaces a process-wide
//! "current account" variable: it owns the logged-in account and drives
//! every balance-affecting operation through the ledger store.

pub mod session;
