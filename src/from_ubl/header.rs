//! Document header: type, identification, related documents and the
//! recipient's order reference.

use chrono::NaiveDate;

use crate::core::codes::CANCELLED_ORIGINAL_DOCUMENT;
use crate::core::{ErrorKind, ErrorList, Text};
use crate::ebinterface::{DocumentLink, DocumentType, EbiInvoiceBuilder, OrderReference};
use crate::ubl::{DocumentKind, DocumentReference, UblDocument};

use super::{GENERATING_SYSTEM, MappingContext, join_lines, non_blank, truncate_chars};

/// Maximum length of `OrderID` in E-RECHNUNG.GV.AT.
const ORDER_REFERENCE_MAX_LENGTH: usize = 35;

#[derive(Debug, Default)]
pub(crate) struct Header {
    pub document_type: DocumentType,
    currency: Option<String>,
    number: Option<String>,
    date: Option<NaiveDate>,
    duplicate: Option<bool>,
    language: Option<&'static str>,
    cancelled_original: Option<DocumentLink>,
    related: Vec<DocumentLink>,
    comment: Option<String>,
}

impl Header {
    pub fn into_builder(self) -> EbiInvoiceBuilder {
        let mut builder = EbiInvoiceBuilder::new(self.document_type, GENERATING_SYSTEM)
            .related_documents(self.related);
        if let Some(currency) = self.currency {
            builder = builder.currency(currency);
        }
        if let Some(number) = self.number {
            builder = builder.invoice_number(number);
        }
        if let Some(date) = self.date {
            builder = builder.invoice_date(date);
        }
        if let Some(duplicate) = self.duplicate {
            builder = builder.duplicate(duplicate);
        }
        if let Some(language) = self.language {
            builder = builder.language(language);
        }
        if let Some(cancelled) = self.cancelled_original {
            builder = builder.cancelled_original_document(cancelled);
        }
        if let Some(comment) = self.comment {
            builder = builder.comment(comment);
        }
        builder
    }
}

pub(crate) fn map_header(doc: &UblDocument, ctx: &MappingContext<'_>, errors: &mut ErrorList) -> Header {
    let number = non_blank(doc.id.as_deref());
    if number.is_none() {
        ctx.error(errors, ErrorKind::Header, "ID", Text::MissingInvoiceNumber);
    }
    if doc.issue_date.is_none() {
        ctx.error(errors, ErrorKind::Header, "IssueDate", Text::MissingInvoiceDate);
    }

    let (cancelled_original, related) = map_document_links(doc);

    Header {
        document_type: document_type(doc),
        currency: non_blank(doc.document_currency_code.as_deref()),
        number,
        date: doc.issue_date,
        duplicate: doc.copy_indicator,
        language: ctx.config.document_language(),
        cancelled_original,
        related,
        comment: join_lines(&doc.notes),
    }
}

fn document_type(doc: &UblDocument) -> DocumentType {
    match doc.kind {
        DocumentKind::CreditNote => DocumentType::CreditMemo,
        DocumentKind::Invoice => doc
            .type_code
            .as_deref()
            .and_then(DocumentType::from_uncl1001_code)
            .unwrap_or(DocumentType::Invoice),
    }
}

/// Cancelled original document and related documents.
fn map_document_links(doc: &UblDocument) -> (Option<DocumentLink>, Vec<DocumentLink>) {
    let mut cancelled = None;
    let mut related = Vec::new();

    for billing in &doc.billing_references {
        let referenced = [
            (&billing.invoice_document_reference, DocumentType::Invoice),
            (&billing.credit_note_document_reference, DocumentType::CreditMemo),
        ];
        for (reference, document_type) in referenced {
            if let Some(link) = reference.as_ref().and_then(|r| document_link(r, Some(document_type))) {
                related.push(link);
            }
        }
    }

    for reference in &doc.additional_document_references {
        let Some(link) = document_link(reference, None) else {
            continue;
        };
        let is_cancelled = reference
            .document_type
            .as_deref()
            .is_some_and(|t| t.trim() == CANCELLED_ORIGINAL_DOCUMENT);
        if is_cancelled && cancelled.is_none() {
            cancelled = Some(link);
        } else {
            related.push(link);
        }
    }

    let others = doc
        .despatch_document_references
        .iter()
        .chain(&doc.receipt_document_references)
        .chain(&doc.contract_document_references);
    related.extend(others.filter_map(|r| document_link(r, None)));

    (cancelled, related)
}

fn document_link(reference: &DocumentReference, document_type: Option<DocumentType>) -> Option<DocumentLink> {
    let number = non_blank(reference.id.as_ref().map(|id| id.value.as_str()))?;
    let document_type = document_type.or_else(|| {
        reference
            .document_type_code
            .as_deref()
            .and_then(DocumentType::from_uncl1001_code)
    });
    Some(DocumentLink {
        invoice_number: number,
        invoice_date: reference.issue_date,
        document_type,
        comment: join_lines(&reference.descriptions),
    })
}

/// The recipient's order reference.
///
/// In strict mode the order ID is mandatory and cut to 35 characters.
pub(crate) fn map_order_reference(
    doc: &UblDocument,
    ctx: &MappingContext<'_>,
    errors: &mut ErrorList,
) -> Option<OrderReference> {
    let order = doc.order_reference.as_ref();
    let id = non_blank(order.and_then(|o| o.id.as_deref()));
    let strict = ctx.config.strict_erb;

    let Some(id) = id else {
        if strict {
            ctx.error(errors, ErrorKind::Header, "OrderReference/ID", Text::OrderReferenceMissing);
        }
        return None;
    };

    let order_id = if strict {
        let (cut, truncated) = truncate_chars(&id, ORDER_REFERENCE_MAX_LENGTH);
        if truncated {
            ctx.warn(
                errors,
                ErrorKind::Header,
                "OrderReference/ID",
                Text::OrderReferenceTooLong(id.clone(), ORDER_REFERENCE_MAX_LENGTH),
            );
        }
        cut
    } else {
        id
    };

    Some(OrderReference {
        order_id,
        reference_date: order.and_then(|o| o.issue_date),
    })
}
