//! Semantic model of ebInterface 4.2 invoices.
//!
//! Reductions, surcharges and other VAT-able taxes are one closed enum,
//! [`Adjustment`], on line and document level.

mod builder;
mod types;

pub use builder::*;
pub use types::*;
