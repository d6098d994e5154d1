use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Faults raised for contract violations by the caller.
///
/// Data-quality problems in the documents themselves are never reported
/// through this type; they end up in an [`ErrorList`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// The error list handed to a conversion already contained entries.
    #[error("invalid argument: the error list must be empty on entry, found {0} entries")]
    NonEmptyErrorList(usize),

    /// Converter configuration is unusable.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Severity of a single finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ErrorLevel {
    /// Recovered locally with a documented default.
    Warn,
    /// The produced document must not be used.
    Error,
}

impl std::fmt::Display for ErrorLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warn => f.write_str("WARN"),
            Self::Error => f.write_str("ERROR"),
        }
    }
}

/// Which part of the document a finding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// UBL version and profile identifiers.
    Envelope,
    /// Invoice number, issue date and other header fields.
    Header,
    /// Biller, invoice recipient or ordering party.
    Party,
    /// Tax subtotals and the VAT summary.
    Tax,
    /// Payment means, payment terms and account data.
    Payment,
    /// Invoice or credit note lines.
    Line,
    /// Document level allowances and charges.
    GlobalAdjustment,
    /// Legal monetary totals.
    Monetary,
    /// Delivery date or period.
    Delivery,
}

/// A single finding with severity, field path and message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub level: ErrorLevel,
    pub kind: ErrorKind,
    /// Slash-separated path into the source document (e.g. "InvoiceLine[2]/ID").
    pub field: String,
    /// Human-readable description in the configured display locale.
    pub message: String,
}

impl std::fmt::Display for ErrorEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.field, self.message)
    }
}

impl ErrorEntry {
    pub fn warn(kind: ErrorKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: ErrorLevel::Warn,
            kind,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn error(kind: ErrorKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: ErrorLevel::Error,
            kind,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == ErrorLevel::Error
    }
}

/// Insertion-ordered collection of findings for one conversion.
///
/// One fresh list per conversion call; it is threaded by `&mut` through every
/// mapping step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorList {
    entries: Vec<ErrorEntry>,
}

impl ErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ErrorEntry) {
        self.entries.push(entry);
    }

    pub fn warn(&mut self, kind: ErrorKind, field: impl Into<String>, message: impl Into<String>) {
        self.push(ErrorEntry::warn(kind, field, message));
    }

    pub fn error(&mut self, kind: ErrorKind, field: impl Into<String>, message: impl Into<String>) {
        self.push(ErrorEntry::error(kind, field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ErrorEntry> {
        self.entries.iter()
    }

    /// True if at least one entry has [`ErrorLevel::Error`].
    pub fn contains_error(&self) -> bool {
        self.entries.iter().any(ErrorEntry::is_error)
    }

    /// Highest severity present, `None` for an empty list.
    pub fn most_severe(&self) -> Option<ErrorLevel> {
        self.entries.iter().map(|e| e.level).max()
    }

    pub fn errors(&self) -> impl Iterator<Item = &ErrorEntry> {
        self.entries.iter().filter(|e| e.level == ErrorLevel::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ErrorEntry> {
        self.entries.iter().filter(|e| e.level == ErrorLevel::Warn)
    }

    /// All entries of the given kind, in insertion order.
    pub fn of_kind(&self, kind: ErrorKind) -> impl Iterator<Item = &ErrorEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a ErrorEntry;
    type IntoIter = std::slice::Iter<'a, ErrorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl std::fmt::Display for ErrorList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_no_severity() {
        let list = ErrorList::new();
        assert!(list.is_empty());
        assert!(!list.contains_error());
        assert_eq!(list.most_severe(), None);
    }

    #[test]
    fn keeps_insertion_order() {
        let mut list = ErrorList::new();
        list.warn(ErrorKind::Line, "InvoiceLine[0]/ID", "first");
        list.error(ErrorKind::Tax, "TaxTotal[0]", "second");
        list.warn(ErrorKind::Party, "AccountingSupplierParty", "third");

        let messages: Vec<_> = list.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["first", "second", "third"]);
        assert!(list.contains_error());
        assert_eq!(list.most_severe(), Some(ErrorLevel::Error));
        assert_eq!(list.errors().count(), 1);
        assert_eq!(list.warnings().count(), 2);
    }

    #[test]
    fn warn_only_is_not_an_error() {
        let mut list = ErrorList::new();
        list.warn(ErrorKind::Line, "InvoiceLine[0]/InvoicedQuantity", "defaulted");
        assert!(!list.contains_error());
        assert_eq!(list.most_severe(), Some(ErrorLevel::Warn));
    }

    #[test]
    fn display_format() {
        let entry = ErrorEntry::error(ErrorKind::Envelope, "UBLVersionID", "missing");
        assert_eq!(entry.to_string(), "[ERROR] UBLVersionID: missing");
    }

    #[test]
    fn filter_by_kind() {
        let mut list = ErrorList::new();
        list.warn(ErrorKind::Payment, "PaymentMeans[0]", "a");
        list.error(ErrorKind::Tax, "TaxTotal[0]", "b");
        list.error(ErrorKind::Payment, "PaymentMeans[1]", "c");
        assert_eq!(list.of_kind(ErrorKind::Payment).count(), 2);
    }
}
