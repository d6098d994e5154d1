//! UBL 2.x / Peppol BIS → ebInterface 4.2 conversion.
//!
//! [`UblToEbInterfaceConverter::convert`] maps one document section after
//! the other and records every data-quality problem in the caller's
//! [`ErrorList`]. Only envelope errors (UBL version, profile) stop the
//! conversion; with any other ERROR the document is still returned and the
//! caller must treat it as unusable.
//!
//! ```
//! use ebiconv::core::{ConverterConfig, ErrorList};
//! use ebiconv::from_ubl::UblToEbInterfaceConverter;
//! use ebiconv::ubl::UblDocument;
//!
//! let converter = UblToEbInterfaceConverter::new(ConverterConfig::default());
//! let mut errors = ErrorList::new();
//! // An empty document fails the envelope check.
//! let result = converter.convert(&UblDocument::default(), &mut errors).unwrap();
//! assert!(result.is_none());
//! assert!(errors.contains_error());
//! ```

mod allowances;
mod consistency;
mod delivery;
mod header;
mod lines;
mod party;
mod payment;
mod tax;

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::core::derive::round_money;
use crate::core::{
    CodeLists, ConvertError, ConverterConfig, ErrorKind, ErrorList, Language, StandardCodeLists,
    Text,
};
use crate::ebinterface::{EbiInvoice, ListLineItem};
use crate::ubl::{InvoiceLine, UblDocument};

pub use tax::{SchemedId, TaxCategoryKey, TaxCategoryPercentageMap};

/// `GeneratingSystem` written into every produced document.
pub const GENERATING_SYSTEM: &str = "UBL 2.1 to ebInterface 4.2";

/// Placeholder VAT identification number for parties without one.
pub const PLACEHOLDER_VAT_ID: &str = "ATU00000000";

/// Email address used for billers that have none.
pub const FAKE_BILLER_EMAIL: &str = "no-email-address-provided@peppol.eu";

/// Customization points invoked while a document is converted.
///
/// Both callbacks may change the produced objects in place. They cannot
/// fail the conversion.
pub trait ConversionHook: Send + Sync {
    /// Called after a line has been mapped, before it is added to the document.
    fn on_line_mapped(&self, _source: &InvoiceLine, _target: &mut ListLineItem) {}

    /// Called once with the assembled document.
    fn on_document_mapped(&self, _source: &UblDocument, _target: &mut EbiInvoice) {}
}

/// Converts UBL invoices and credit notes to ebInterface 4.2.
///
/// Immutable after construction; one instance can serve concurrent
/// conversions as long as every call gets its own [`ErrorList`].
#[derive(Clone)]
pub struct UblToEbInterfaceConverter {
    config: ConverterConfig,
    code_lists: Arc<dyn CodeLists>,
    hook: Option<Arc<dyn ConversionHook>>,
}

impl std::fmt::Debug for UblToEbInterfaceConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UblToEbInterfaceConverter")
            .field("config", &self.config)
            .field("hook", &self.hook.is_some())
            .finish_non_exhaustive()
    }
}

impl UblToEbInterfaceConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            config,
            code_lists: Arc::new(StandardCodeLists),
            hook: None,
        }
    }

    /// Replace the built-in code lists.
    pub fn with_code_lists(mut self, code_lists: Arc<dyn CodeLists>) -> Self {
        self.code_lists = code_lists;
        self
    }

    /// Install a [`ConversionHook`].
    pub fn with_hook(mut self, hook: Arc<dyn ConversionHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert `doc`, appending all findings to `errors`.
    ///
    /// Returns `Ok(None)` if the envelope check fails. `errors` must be
    /// empty on entry, otherwise [`ConvertError::NonEmptyErrorList`] is
    /// returned and nothing is converted.
    pub fn convert(
        &self,
        doc: &UblDocument,
        errors: &mut ErrorList,
    ) -> Result<Option<EbiInvoice>, ConvertError> {
        if !errors.is_empty() {
            return Err(ConvertError::NonEmptyErrorList(errors.len()));
        }

        let ctx = MappingContext {
            config: &self.config,
            code_lists: self.code_lists.as_ref(),
            language: self.config.display_language(),
        };
        debug!(number = ?doc.id, kind = ?doc.kind, strict = self.config.strict_erb, "converting UBL document");

        consistency::check(doc, &ctx, errors);
        if errors.contains_error() {
            warn!(number = ?doc.id, errors = errors.len(), "envelope check failed, no document produced");
            return Ok(None);
        }

        let header = header::map_header(doc, &ctx, errors);

        let biller = party::map_biller(doc, &ctx, errors);
        let mut recipient = party::map_invoice_recipient(doc, &ctx, errors);
        let ordering_party =
            party::map_ordering_party(doc, recipient.party.internal_id.as_deref(), &ctx, errors);

        let order_reference = header::map_order_reference(doc, &ctx, errors);
        let order_id = order_reference.as_ref().map(|r| r.order_id.clone());
        recipient.order_reference = order_reference;

        let tax = tax::map_tax(doc, &ctx, errors);
        let lines = lines::map_lines(
            doc,
            &tax.percentages,
            order_id.as_deref(),
            self.hook.as_deref(),
            &ctx,
            errors,
        );
        debug!(lines = lines.len(), vat_items = tax.tax.vat_items.len(), "lines mapped");

        if tax.tax.vat_items.is_empty() {
            ctx.error(errors, ErrorKind::Tax, doc.kind.line_element(), Text::VatItemMissing);
        }

        let adjustments = allowances::map_global_adjustments(doc, &lines, &ctx, errors);

        let (total_gross, payable) = map_monetary_totals(doc, &ctx, errors);
        let payment = payment::map_payment(doc, payable, &ctx, errors);
        let delivery = delivery::map_document_delivery(doc, &ctx, errors);

        let mut builder = header
            .into_builder()
            .biller(biller)
            .invoice_recipient(recipient)
            .line_items(lines)
            .reductions_and_surcharges(adjustments)
            .tax(tax.tax)
            .totals(total_gross, payable);
        if let Some(ordering_party) = ordering_party {
            builder = builder.ordering_party(ordering_party);
        }
        if let Some(method) = payment.method {
            builder = builder.payment_method(method);
        }
        if let Some(conditions) = payment.conditions {
            builder = builder.payment_conditions(conditions);
        }
        if let Some(delivery) = delivery {
            builder = builder.delivery(delivery);
        }
        let mut invoice = builder.build();

        if let Some(hook) = &self.hook {
            hook.on_document_mapped(doc, &mut invoice);
        }

        debug!(
            number = ?invoice.invoice_number,
            findings = errors.len(),
            has_errors = errors.contains_error(),
            "conversion finished"
        );
        Ok(Some(invoice))
    }
}

/// Read-only state shared by the section mappers of one conversion.
pub(crate) struct MappingContext<'a> {
    pub config: &'a ConverterConfig,
    pub code_lists: &'a dyn CodeLists,
    pub language: Language,
}

impl MappingContext<'_> {
    pub fn warn(&self, errors: &mut ErrorList, kind: ErrorKind, field: impl Into<String>, text: Text) {
        errors.warn(kind, field, text.render(self.language));
    }

    pub fn error(&self, errors: &mut ErrorList, kind: ErrorKind, field: impl Into<String>, text: Text) {
        errors.error(kind, field, text.render(self.language));
    }
}

/// Total gross and payable amount, both at money scale.
fn map_monetary_totals(
    doc: &UblDocument,
    ctx: &MappingContext<'_>,
    errors: &mut ErrorList,
) -> (Decimal, Decimal) {
    let totals = &doc.legal_monetary_total;
    if totals.prepaid_amount.is_some_and(|p| !p.is_zero()) {
        ctx.error(
            errors,
            ErrorKind::Monetary,
            format!("{}/LegalMonetaryTotal/PrepaidAmount", doc.kind.root_element()),
            Text::PrepaidNotSupported,
        );
    }
    let total_gross = round_money(totals.tax_inclusive_amount.unwrap_or(totals.payable_amount));
    (total_gross, round_money(totals.payable_amount))
}

/// Trimmed value, `None` if blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// Non-blank trimmed values joined by newlines, `None` if nothing is left.
pub(crate) fn join_lines<'a>(values: impl IntoIterator<Item = &'a String>) -> Option<String> {
    let parts: Vec<&str> = values
        .into_iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join("\n"))
}

/// First `max` characters of `value`, and whether anything was cut.
pub(crate) fn truncate_chars(value: &str, max: usize) -> (String, bool) {
    if value.chars().count() > max {
        (value.chars().take(max).collect(), true)
    } else {
        (value.to_string(), false)
    }
}
