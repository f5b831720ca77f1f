//! Expense splitting for groups: members log shared expenses and the ledger
//! works out who owes what and the payments that settle everybody up.
pub mod balance;
pub mod error;
pub mod ledger;
pub mod presentation;
pub mod routes;
pub mod schemas;
pub mod settings;
pub mod settlement;
pub mod store;

#[cfg(test)]
mod test_utils;

pub use balance::{compute_balances, Balance};
pub use error::LedgerError;
pub use ledger::Ledger;
pub use settlement::{compute_settlements, Settlement};
pub use store::{LedgerStore, MemoryStore};
