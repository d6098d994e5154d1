use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// ebInterface 4.2 `Invoice` root element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EbiInvoice {
    pub generating_system: String,
    pub document_type: DocumentType,
    /// ISO 4217 currency code.
    pub invoice_currency: Option<String>,
    /// ISO 639-2 language code.
    pub language: Option<String>,
    pub is_duplicate: Option<bool>,
    pub invoice_number: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub cancelled_original_document: Option<DocumentLink>,
    pub related_documents: Vec<DocumentLink>,
    pub delivery: Option<Delivery>,
    pub biller: Party,
    pub invoice_recipient: InvoiceRecipient,
    pub ordering_party: Option<Party>,
    pub line_items: Vec<ListLineItem>,
    pub below_the_line_items: Vec<BelowTheLineItem>,
    /// Document level `ReductionAndSurchargeDetails`.
    pub reductions_and_surcharges: Vec<Adjustment>,
    pub tax: Tax,
    pub total_gross_amount: Decimal,
    pub payable_amount: Decimal,
    pub payment_method: Option<PaymentMethod>,
    pub payment_conditions: Option<PaymentConditions>,
    pub comment: Option<String>,
}

/// `DocumentTypeType` of ebInterface 4.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocumentType {
    #[default]
    Invoice,
    CreditMemo,
    FinalSettlement,
    InvoiceForAdvancePayment,
    InvoiceForPartialDelivery,
    SelfBilling,
    SubsequentCredit,
    SubsequentDebit,
}

impl DocumentType {
    /// UNCL 1001 document type code used on the UBL side.
    pub fn uncl1001_code(&self) -> &'static str {
        match self {
            Self::Invoice | Self::FinalSettlement | Self::InvoiceForPartialDelivery => "380",
            Self::CreditMemo | Self::SubsequentCredit => "381",
            Self::SubsequentDebit => "383",
            Self::InvoiceForAdvancePayment => "386",
            Self::SelfBilling => "389",
        }
    }

    /// Best match for a UNCL 1001 code.
    pub fn from_uncl1001_code(code: &str) -> Option<Self> {
        match code.trim() {
            "380" => Some(Self::Invoice),
            "381" => Some(Self::CreditMemo),
            "383" => Some(Self::SubsequentDebit),
            "386" => Some(Self::InvoiceForAdvancePayment),
            "389" => Some(Self::SelfBilling),
            _ => None,
        }
    }

    pub fn is_credit(&self) -> bool {
        matches!(self, Self::CreditMemo | Self::SubsequentCredit)
    }
}

/// `CancelledOriginalDocument` or `RelatedDocument`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLink {
    pub invoice_number: String,
    pub invoice_date: Option<NaiveDate>,
    pub document_type: Option<DocumentType>,
    pub comment: Option<String>,
}

/// Biller, invoice recipient or ordering party.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub vat_identification_number: String,
    /// `InvoiceRecipientsBillerID`, `BillersInvoiceRecipientID` or
    /// `BillersOrderingPartyID`, depending on the role.
    pub internal_id: Option<String>,
    pub further_identifications: Vec<FurtherIdentification>,
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecipient {
    #[serde(flatten)]
    pub party: Party,
    pub order_reference: Option<OrderReference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurtherIdentification {
    pub identification_type: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub name: Option<String>,
    pub street: Option<String>,
    pub po_box: Option<String>,
    pub town: Option<String>,
    pub zip: Option<String>,
    /// ISO 3166-1 alpha-2.
    pub country_code: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReference {
    pub order_id: String,
    pub reference_date: Option<NaiveDate>,
}

/// `InvoiceRecipientsOrderReference` of a line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReferenceDetail {
    pub order_id: Option<String>,
    pub reference_date: Option<NaiveDate>,
    pub order_position_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListLineItem {
    pub position_number: Option<u64>,
    pub descriptions: Vec<String>,
    pub quantity: Quantity,
    pub unit_price: UnitPrice,
    pub vat_rate: Decimal,
    /// `TaxCode` attribute of the VAT rate.
    pub tax_code: Option<String>,
    /// Set instead of a rate for exempt lines.
    pub tax_exemption: Option<String>,
    pub line_item_amount: Decimal,
    pub reductions_and_surcharges: Vec<Adjustment>,
    pub recipients_order_reference: Option<OrderReferenceDetail>,
    pub delivery: Option<Delivery>,
    pub article_numbers: Vec<ArticleNumber>,
    pub additional_information: Option<AdditionalInformation>,
}

/// Issuer of an article number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArticleNumberType {
    Pzn,
    Gtin,
    InvoiceRecipientsArticleNumber,
    BillersArticleNumber,
}

impl ArticleNumberType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pzn => "PZN",
            Self::Gtin => "GTIN",
            Self::InvoiceRecipientsArticleNumber => "InvoiceRecipientsArticleNumber",
            Self::BillersArticleNumber => "BillersArticleNumber",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleNumber {
    pub value: String,
    pub kind: Option<ArticleNumberType>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub value: String,
    pub schema: Option<String>,
}

/// Product details of a line beyond its description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalInformation {
    pub serial_numbers: Vec<String>,
    pub charge_numbers: Vec<String>,
    pub classifications: Vec<Classification>,
    pub alternative_quantity: Option<Quantity>,
    pub size: Option<String>,
    pub weight: Option<Quantity>,
    pub boxes: Option<u32>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    pub unit: String,
    pub value: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPrice {
    pub value: Decimal,
    /// Number of units `value` refers to; one if absent.
    pub base_quantity: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BelowTheLineItem {
    pub description: String,
    pub line_item_amount: Decimal,
}

/// One entry of a reduction-and-surcharge list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Adjustment {
    Reduction(AdjustmentEntry),
    Surcharge(AdjustmentEntry),
    OtherVatableTax(OtherVatableTax),
}

impl Adjustment {
    /// Whether the entry increases the amount it applies to.
    pub fn is_surcharge(&self) -> bool {
        !matches!(self, Self::Reduction(_))
    }

    pub fn base_amount(&self) -> Decimal {
        match self {
            Self::Reduction(e) | Self::Surcharge(e) => e.base_amount,
            Self::OtherVatableTax(t) => t.base_amount,
        }
    }

    pub fn percentage(&self) -> Option<Decimal> {
        match self {
            Self::Reduction(e) | Self::Surcharge(e) => e.percentage,
            Self::OtherVatableTax(t) => t.percentage,
        }
    }

    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Self::Reduction(e) | Self::Surcharge(e) => e.amount,
            Self::OtherVatableTax(t) => t.amount,
        }
    }

    pub fn comment(&self) -> Option<&str> {
        match self {
            Self::Reduction(e) | Self::Surcharge(e) => e.comment.as_deref(),
            Self::OtherVatableTax(t) => t.comment.as_deref(),
        }
    }

    pub fn vat_rate(&self) -> Option<Decimal> {
        match self {
            Self::Reduction(e) | Self::Surcharge(e) => e.vat_rate,
            Self::OtherVatableTax(t) => t.vat_rate,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentEntry {
    pub base_amount: Decimal,
    pub percentage: Option<Decimal>,
    pub amount: Option<Decimal>,
    pub comment: Option<String>,
    /// Only used on document level.
    pub vat_rate: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherVatableTax {
    pub tax_id: Option<String>,
    pub base_amount: Decimal,
    pub percentage: Option<Decimal>,
    pub amount: Option<Decimal>,
    pub comment: Option<String>,
    pub vat_rate: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tax {
    pub vat_items: Vec<VatItem>,
    pub other_taxes: Vec<OtherTax>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatItem {
    pub taxed_amount: Decimal,
    pub vat_rate: Decimal,
    pub tax_code: Option<String>,
    pub tax_exemption: Option<String>,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherTax {
    pub comment: Option<String>,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub comment: Option<String>,
    pub kind: PaymentMethodKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethodKind {
    UniversalBankTransaction(BankTransaction),
    DirectDebit,
    NoPayment,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankTransaction {
    pub payment_reference: Option<String>,
    pub beneficiary_account: Account,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub bic: Option<String>,
    pub iban: Option<String>,
    pub bank_account_owner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConditions {
    pub due_date: NaiveDate,
    pub discounts: Vec<Discount>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    pub payment_date: NaiveDate,
    pub percentage: Decimal,
    pub amount: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub date: Option<NaiveDate>,
    pub period: Option<Period>,
    pub address: Option<Address>,
}

impl Delivery {
    /// A delivery needs either a date or a period to be written.
    pub fn has_date_or_period(&self) -> bool {
        self.date.is_some() || self.period.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn document_type_codes() {
        assert_eq!(DocumentType::Invoice.uncl1001_code(), "380");
        assert_eq!(DocumentType::CreditMemo.uncl1001_code(), "381");
        assert_eq!(DocumentType::SelfBilling.uncl1001_code(), "389");
        assert_eq!(DocumentType::from_uncl1001_code(" 386 "), Some(DocumentType::InvoiceForAdvancePayment));
        assert_eq!(DocumentType::from_uncl1001_code("326"), None);
        assert!(DocumentType::SubsequentCredit.is_credit());
        assert!(!DocumentType::FinalSettlement.is_credit());
    }

    #[test]
    fn adjustment_accessors() {
        let reduction = Adjustment::Reduction(AdjustmentEntry {
            base_amount: dec!(100),
            percentage: Some(dec!(10)),
            amount: Some(dec!(10)),
            comment: Some("Rabatt".into()),
            vat_rate: None,
        });
        assert!(!reduction.is_surcharge());
        assert_eq!(reduction.amount(), Some(dec!(10)));
        assert_eq!(reduction.comment(), Some("Rabatt"));

        let tax = Adjustment::OtherVatableTax(OtherVatableTax {
            tax_id: Some("ENV".into()),
            base_amount: dec!(50),
            ..Default::default()
        });
        assert!(tax.is_surcharge());
        assert_eq!(tax.base_amount(), dec!(50));
        assert_eq!(tax.percentage(), None);
    }
}
