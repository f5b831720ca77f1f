//! Errors raised while ingesting data into the ledger.
//!
//! The balance and settlement computations never fail; only the store
//! boundary rejects input:
//!
//! - [`GroupNotFound`] when an id does not reference a stored group.
//! - [`UnknownPayer`] when an expense payer is not a member of its group.
//! - [`InvalidAmount`] when an amount is not a finite value greater than 0.
//! - [`MissingField`] when a required field is blank.
//!
//!  [`GroupNotFound`]: LedgerError::GroupNotFound
//!  [`UnknownPayer`]: LedgerError::UnknownPayer
//!  [`InvalidAmount`]: LedgerError::InvalidAmount
//!  [`MissingField`]: LedgerError::MissingField
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("\"{0}\" group not found!")]
    GroupNotFound(String),
    #[error("\"{payer}\" is not a member of group \"{group}\"")]
    UnknownPayer { payer: String, group: String },
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Missing field: {0}")]
    MissingField(&'static str),
}
