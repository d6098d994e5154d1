//! Semantic model of UBL 2.0/2.1 invoices and credit notes.
//!
//! Only the elements the converters read or write are modelled. Elements
//! that are mandatory in the UBL schema (line extension amount, allowance
//! amount, payable amount, tax scheme id) are plain values; everything the
//! converter has to check for presence is an `Option`. Binding this model to
//! XML is left to the caller.

mod types;

pub use types::*;
