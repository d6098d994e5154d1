//! ebInterface 4.2 → UBL 2.1 / Peppol BIS conversion.
//!
//! The reverse direction never fails and collects no findings. It is lossy:
//! payment terms, discounts and the language are not written.
//!
//! ```
//! use ebiconv::ebinterface::{DocumentType, EbiInvoiceBuilder};
//! use ebiconv::to_ubl::EbInterfaceToUblConverter;
//! use ebiconv::ubl::DocumentKind;
//! use rust_decimal_macros::dec;
//!
//! let invoice = EbiInvoiceBuilder::new(DocumentType::CreditMemo, "ERP")
//!     .invoice_number("GS-17")
//!     .totals(dec!(120), dec!(120))
//!     .build();
//! let doc = EbInterfaceToUblConverter::new().convert(&invoice);
//! assert_eq!(doc.kind, DocumentKind::CreditNote);
//! assert_eq!(doc.type_code.as_deref(), Some("381"));
//! ```

mod lines;
mod party;
mod tax;

use std::sync::Arc;

use tracing::debug;

use crate::core::codes::{CANCELLED_ORIGINAL_DOCUMENT, PEPPOL_BILLING_PROFILE_ID, RELATED_DOCUMENT};
use crate::core::derive::checked_sum;
use crate::core::{CodeLists, StandardCodeLists};
use crate::ebinterface::{DocumentLink, EbiInvoice, PaymentMethodKind};
use crate::ubl::{
    DocumentKind, DocumentReference, FinancialAccount, Identifier, MonetaryTotal, OrderReference,
    PaymentMeans, UblDocument,
};

/// UBL version written into every produced document.
pub const UBL_VERSION: &str = "2.1";

/// Peppol BIS Billing 3.0 customization identifier.
pub const PEPPOL_BILLING_CUSTOMIZATION_ID: &str =
    "urn:cen.eu:en16931:2017#compliant#urn:fdc:peppol.eu:2017:poacc:billing:3.0";

/// UNCL 4461 "debit transfer", used for bank transactions.
const BANK_TRANSFER_MEANS_CODE: &str = "31";
/// UNCL 4461 "direct debit".
const DIRECT_DEBIT_MEANS_CODE: &str = "49";

/// Converts ebInterface 4.2 invoices to UBL.
#[derive(Clone)]
pub struct EbInterfaceToUblConverter {
    code_lists: Arc<dyn CodeLists>,
}

impl std::fmt::Debug for EbInterfaceToUblConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EbInterfaceToUblConverter").finish_non_exhaustive()
    }
}

impl Default for EbInterfaceToUblConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl EbInterfaceToUblConverter {
    pub fn new() -> Self {
        Self {
            code_lists: Arc::new(StandardCodeLists),
        }
    }

    /// Replace the built-in code lists.
    pub fn with_code_lists(mut self, code_lists: Arc<dyn CodeLists>) -> Self {
        self.code_lists = code_lists;
        self
    }

    pub fn convert(&self, invoice: &EbiInvoice) -> UblDocument {
        debug!(number = ?invoice.invoice_number, document_type = ?invoice.document_type, "converting ebInterface document");

        let kind = if invoice.document_type.is_credit() {
            DocumentKind::CreditNote
        } else {
            DocumentKind::Invoice
        };

        let mut doc = UblDocument {
            kind,
            ubl_version_id: Some(UBL_VERSION.to_string()),
            customization_id: Some(PEPPOL_BILLING_CUSTOMIZATION_ID.to_string()),
            profile_id: Some(PEPPOL_BILLING_PROFILE_ID.to_string()),
            id: invoice.invoice_number.clone(),
            copy_indicator: invoice.is_duplicate,
            issue_date: invoice.invoice_date,
            type_code: Some(invoice.document_type.uncl1001_code().to_string()),
            notes: invoice.comment.iter().filter(|c| has_text(c)).cloned().collect(),
            document_currency_code: invoice.invoice_currency.clone(),
            ..Default::default()
        };

        doc.additional_document_references = invoice
            .cancelled_original_document
            .iter()
            .map(|link| document_reference(link, CANCELLED_ORIGINAL_DOCUMENT))
            .chain(
                invoice
                    .related_documents
                    .iter()
                    .map(|link| document_reference(link, RELATED_DOCUMENT)),
            )
            .collect();

        if let Some(delivery) = &invoice.delivery {
            doc.deliveries.push(party::map_delivery(delivery));
            if let Some(period) = &delivery.period {
                doc.invoice_periods.push(party::map_period(period));
            }
        }

        map_parties(invoice, &mut doc);

        let code_lists = self.code_lists.as_ref();
        doc.lines = invoice
            .line_items
            .iter()
            .enumerate()
            .map(|(i, line)| lines::map_line(line, i, code_lists))
            .chain(
                invoice
                    .below_the_line_items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| lines::map_below_the_line(item, i)),
            )
            .collect();

        doc.allowance_charges = invoice
            .reductions_and_surcharges
            .iter()
            .map(lines::map_adjustment)
            .collect();
        doc.tax_totals.push(tax::map_tax_total(&invoice.tax));
        doc.legal_monetary_total = map_monetary_total(invoice);
        doc.payment_means.extend(map_payment_means(invoice));

        debug!(number = ?doc.id, lines = doc.lines.len(), "conversion finished");
        doc
    }
}

fn map_parties(invoice: &EbiInvoice, doc: &mut UblDocument) {
    doc.accounting_supplier_party = party::map_supplier(&invoice.biller);
    doc.contract_document_references
        .extend(party::contract_references(&invoice.biller));

    let recipient = &invoice.invoice_recipient;
    doc.accounting_customer_party = party::map_customer(&recipient.party);
    doc.order_reference = recipient.order_reference.as_ref().map(|r| OrderReference {
        id: Some(r.order_id.clone()),
        issue_date: r.reference_date,
    });

    if let Some(ordering_party) = &invoice.ordering_party {
        doc.buyer_customer_party = Some(party::map_buyer(ordering_party));
        doc.contract_document_references
            .extend(party::contract_references(ordering_party));
    }
}

fn document_reference(link: &DocumentLink, document_type: &str) -> DocumentReference {
    DocumentReference {
        id: Some(Identifier::new(link.invoice_number.clone())),
        issue_date: link.invoice_date,
        document_type_code: link.document_type.map(|t| t.uncl1001_code().to_string()),
        document_type: Some(document_type.to_string()),
        descriptions: link.comment.iter().filter(|c| has_text(c)).cloned().collect(),
    }
}

/// Totals over all lines including below-the-line items. Allowances and
/// charges without a computable amount are left out of their totals. A sum
/// outside the decimal range is left unset.
fn map_monetary_total(invoice: &EbiInvoice) -> MonetaryTotal {
    let line_sum = checked_sum(
        invoice
            .line_items
            .iter()
            .map(|l| l.line_item_amount)
            .chain(invoice.below_the_line_items.iter().map(|b| b.line_item_amount)),
    )
    .ok();

    let adjustment_sum = |surcharge: bool| {
        checked_sum(
            invoice
                .reductions_and_surcharges
                .iter()
                .filter(|a| a.is_surcharge() == surcharge)
                .filter_map(lines::adjustment_amount),
        )
        .ok()
    };

    MonetaryTotal {
        line_extension_amount: line_sum,
        tax_exclusive_amount: line_sum,
        tax_inclusive_amount: Some(invoice.total_gross_amount),
        allowance_total_amount: adjustment_sum(false),
        charge_total_amount: adjustment_sum(true),
        prepaid_amount: None,
        payable_amount: invoice.payable_amount,
    }
}

fn map_payment_means(invoice: &EbiInvoice) -> Option<PaymentMeans> {
    let method = invoice.payment_method.as_ref()?;
    let mut means = PaymentMeans {
        payment_due_date: invoice.payment_conditions.as_ref().map(|c| c.due_date),
        instruction_notes: method.comment.iter().filter(|c| has_text(c)).cloned().collect(),
        ..Default::default()
    };
    match &method.kind {
        PaymentMethodKind::UniversalBankTransaction(transaction) => {
            let account = &transaction.beneficiary_account;
            means.payment_means_code = Some(BANK_TRANSFER_MEANS_CODE.to_string());
            means.payment_ids = transaction.payment_reference.iter().cloned().collect();
            means.payee_financial_account = Some(FinancialAccount {
                id: account.iban.clone(),
                name: account.bank_account_owner.clone(),
                financial_institution_id: account.bic.clone(),
            });
        }
        PaymentMethodKind::DirectDebit => {
            means.payment_means_code = Some(DIRECT_DEBIT_MEANS_CODE.to_string());
        }
        PaymentMethodKind::NoPayment => return None,
    }
    Some(means)
}

fn has_text(value: &str) -> bool {
    !value.trim().is_empty()
}
