//! Shared building blocks: findings, code lists, numeric derivation,
//! configuration and message texts.

pub mod codes;
mod config;
pub mod countries;
pub mod derive;
mod error;
pub mod messages;
pub mod units;

pub use codes::{CodeLists, PaymentMeansCode, ProcessProfile, StandardCodeLists, TaxScheme};
pub use config::*;
pub use error::*;
pub use messages::{Language, Text};
