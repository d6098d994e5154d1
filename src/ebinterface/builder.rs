use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::*;

/// Assembles an [`EbiInvoice`] from independently produced sections.
///
/// Every section is set exactly once; the converter computes the sections
/// in order and merges them here at the end.
///
/// ```
/// use ebiconv::ebinterface::*;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let invoice = EbiInvoiceBuilder::new(DocumentType::Invoice, "UBL 2.1 to ebInterface 4.2")
///     .currency("EUR")
///     .invoice_number("RE-2024-001")
///     .invoice_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
///     .totals(dec!(120.00), dec!(120.00))
///     .build();
/// assert_eq!(invoice.payable_amount, dec!(120.00));
/// ```
#[derive(Debug)]
pub struct EbiInvoiceBuilder {
    invoice: EbiInvoice,
}

impl EbiInvoiceBuilder {
    pub fn new(document_type: DocumentType, generating_system: impl Into<String>) -> Self {
        Self {
            invoice: EbiInvoice {
                document_type,
                generating_system: generating_system.into(),
                ..Default::default()
            },
        }
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.invoice.invoice_currency = Some(code.into());
        self
    }

    pub fn language(mut self, code: impl Into<String>) -> Self {
        self.invoice.language = Some(code.into());
        self
    }

    pub fn duplicate(mut self, is_duplicate: bool) -> Self {
        self.invoice.is_duplicate = Some(is_duplicate);
        self
    }

    pub fn invoice_number(mut self, number: impl Into<String>) -> Self {
        self.invoice.invoice_number = Some(number.into());
        self
    }

    pub fn invoice_date(mut self, date: NaiveDate) -> Self {
        self.invoice.invoice_date = Some(date);
        self
    }

    pub fn cancelled_original_document(mut self, document: DocumentLink) -> Self {
        self.invoice.cancelled_original_document = Some(document);
        self
    }

    pub fn related_documents(mut self, documents: Vec<DocumentLink>) -> Self {
        self.invoice.related_documents = documents;
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.invoice.comment = Some(comment.into());
        self
    }

    pub fn biller(mut self, biller: Party) -> Self {
        self.invoice.biller = biller;
        self
    }

    pub fn invoice_recipient(mut self, recipient: InvoiceRecipient) -> Self {
        self.invoice.invoice_recipient = recipient;
        self
    }

    pub fn ordering_party(mut self, party: Party) -> Self {
        self.invoice.ordering_party = Some(party);
        self
    }

    pub fn line_items(mut self, lines: Vec<ListLineItem>) -> Self {
        self.invoice.line_items = lines;
        self
    }

    pub fn add_line(mut self, line: ListLineItem) -> Self {
        self.invoice.line_items.push(line);
        self
    }

    pub fn below_the_line_items(mut self, items: Vec<BelowTheLineItem>) -> Self {
        self.invoice.below_the_line_items = items;
        self
    }

    pub fn reductions_and_surcharges(mut self, adjustments: Vec<Adjustment>) -> Self {
        self.invoice.reductions_and_surcharges = adjustments;
        self
    }

    pub fn tax(mut self, tax: Tax) -> Self {
        self.invoice.tax = tax;
        self
    }

    /// Total gross amount and payable amount.
    pub fn totals(mut self, total_gross: Decimal, payable: Decimal) -> Self {
        self.invoice.total_gross_amount = total_gross;
        self.invoice.payable_amount = payable;
        self
    }

    pub fn payment_method(mut self, method: PaymentMethod) -> Self {
        self.invoice.payment_method = Some(method);
        self
    }

    pub fn payment_conditions(mut self, conditions: PaymentConditions) -> Self {
        self.invoice.payment_conditions = Some(conditions);
        self
    }

    pub fn delivery(mut self, delivery: Delivery) -> Self {
        self.invoice.delivery = Some(delivery);
        self
    }

    pub fn build(self) -> EbiInvoice {
        self.invoice
    }
}
