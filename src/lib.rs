//! # ebiconv
//!
//! Conversion between UBL 2.1 / Peppol BIS invoices and the Austrian
//! ebInterface 4.2 format, with business-rule validation on the way in.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Both formats are plain in-memory models with serde support; binding them
//! to XML is left to the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use ebiconv::core::{ConverterConfig, ErrorList};
//! use ebiconv::ebinterface::{DocumentType, EbiInvoiceBuilder};
//! use ebiconv::from_ubl::UblToEbInterfaceConverter;
//! use ebiconv::to_ubl::EbInterfaceToUblConverter;
//! use rust_decimal_macros::dec;
//!
//! let invoice = EbiInvoiceBuilder::new(DocumentType::Invoice, "ERP")
//!     .currency("EUR")
//!     .invoice_number("RE-2024-001")
//!     .invoice_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
//!     .totals(dec!(120.00), dec!(120.00))
//!     .build();
//!
//! let ubl = EbInterfaceToUblConverter::new().convert(&invoice);
//!
//! let mut errors = ErrorList::new();
//! let converter = UblToEbInterfaceConverter::new(ConverterConfig::default());
//! let back = converter.convert(&ubl, &mut errors)?.unwrap();
//! assert_eq!(back.invoice_number.as_deref(), Some("RE-2024-001"));
//! assert_eq!(back.payable_amount, dec!(120.00));
//! // No parties and no VAT summary: the document is not usable.
//! assert!(errors.contains_error());
//! # Ok::<(), ebiconv::core::ConvertError>(())
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Both document models, code lists, derivation rules, findings |
//! | `from-ubl` (default) | UBL → ebInterface converter with validation |
//! | `to-ubl` (default) | ebInterface → UBL converter |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod ebinterface;

#[cfg(feature = "core")]
pub mod ubl;

#[cfg(feature = "from-ubl")]
pub mod from_ubl;

#[cfg(feature = "to-ubl")]
pub mod to_ubl;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;

#[cfg(feature = "from-ubl")]
pub use crate::from_ubl::{ConversionHook, UblToEbInterfaceConverter};

#[cfg(feature = "to-ubl")]
pub use crate::to_ubl::EbInterfaceToUblConverter;
