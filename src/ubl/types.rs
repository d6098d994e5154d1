use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Root element of the UBL document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DocumentKind {
    #[default]
    Invoice,
    CreditNote,
}

impl DocumentKind {
    /// Element name of the document lines (`InvoiceLine` / `CreditNoteLine`).
    pub fn line_element(&self) -> &'static str {
        match self {
            Self::Invoice => "InvoiceLine",
            Self::CreditNote => "CreditNoteLine",
        }
    }

    /// Element name of the line quantity (`InvoicedQuantity` / `CreditedQuantity`).
    pub fn quantity_element(&self) -> &'static str {
        match self {
            Self::Invoice => "InvoicedQuantity",
            Self::CreditNote => "CreditedQuantity",
        }
    }

    /// Root element name, used as field path for document-wide findings.
    pub fn root_element(&self) -> &'static str {
        match self {
            Self::Invoice => "Invoice",
            Self::CreditNote => "CreditNote",
        }
    }
}

/// UBL `Invoice` or `CreditNote`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UblDocument {
    pub kind: DocumentKind,
    /// cbc:UBLVersionID
    pub ubl_version_id: Option<String>,
    /// cbc:CustomizationID
    pub customization_id: Option<String>,
    /// cbc:ProfileID (Peppol process identifier).
    pub profile_id: Option<String>,
    /// cbc:ID, the document number.
    pub id: Option<String>,
    pub copy_indicator: Option<bool>,
    pub issue_date: Option<NaiveDate>,
    /// cbc:InvoiceTypeCode / cbc:CreditNoteTypeCode (UNCL 1001).
    pub type_code: Option<String>,
    pub notes: Vec<String>,
    pub document_currency_code: Option<String>,
    pub invoice_periods: Vec<Period>,
    pub order_reference: Option<OrderReference>,
    pub billing_references: Vec<BillingReference>,
    pub despatch_document_references: Vec<DocumentReference>,
    pub receipt_document_references: Vec<DocumentReference>,
    pub contract_document_references: Vec<DocumentReference>,
    pub additional_document_references: Vec<DocumentReference>,
    pub accounting_supplier_party: SupplierParty,
    pub accounting_customer_party: CustomerParty,
    pub buyer_customer_party: Option<CustomerParty>,
    pub payee_party: Option<Party>,
    pub deliveries: Vec<Delivery>,
    pub payment_means: Vec<PaymentMeans>,
    pub payment_terms: Vec<PaymentTerms>,
    pub allowance_charges: Vec<AllowanceCharge>,
    pub tax_totals: Vec<TaxTotal>,
    pub legal_monetary_total: MonetaryTotal,
    /// cac:InvoiceLine / cac:CreditNoteLine
    pub lines: Vec<InvoiceLine>,
}

/// An identifier with optional `schemeID` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    pub value: String,
    pub scheme_id: Option<String>,
}

impl Identifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            scheme_id: None,
        }
    }

    pub fn with_scheme(value: impl Into<String>, scheme_id: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            scheme_id: Some(scheme_id.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReference {
    pub id: Option<String>,
    pub issue_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReference {
    pub id: Option<Identifier>,
    pub issue_date: Option<NaiveDate>,
    pub document_type_code: Option<String>,
    /// cbc:DocumentType, free text.
    pub document_type: Option<String>,
    pub descriptions: Vec<String>,
}

/// cac:BillingReference, reduced to the referenced invoice or credit note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingReference {
    pub invoice_document_reference: Option<DocumentReference>,
    pub credit_note_document_reference: Option<DocumentReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierParty {
    /// The customer's identifier for the supplier.
    pub customer_assigned_account_id: Option<String>,
    pub additional_account_ids: Vec<Identifier>,
    pub party: Option<Party>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerParty {
    /// The supplier's identifier for the customer.
    pub supplier_assigned_account_id: Option<String>,
    pub additional_account_ids: Vec<Identifier>,
    pub party: Option<Party>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub endpoint_id: Option<Identifier>,
    /// cac:PartyIdentification/cbc:ID
    pub identifications: Vec<Identifier>,
    /// cac:PartyName/cbc:Name
    pub names: Vec<String>,
    pub postal_address: Option<Address>,
    pub tax_schemes: Vec<PartyTaxScheme>,
    pub legal_entities: Vec<PartyLegalEntity>,
    pub contact: Option<Contact>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyTaxScheme {
    pub company_id: Option<String>,
    pub tax_scheme: TaxSchemeRef,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyLegalEntity {
    pub registration_name: Option<String>,
    pub company_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street_name: Option<String>,
    pub additional_street_name: Option<String>,
    pub building_number: Option<String>,
    pub postbox: Option<String>,
    pub city_name: Option<String>,
    pub postal_zone: Option<String>,
    pub country_subentity: Option<String>,
    /// cac:Country/cbc:IdentificationCode (ISO 3166-1 alpha-2).
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: Option<String>,
    pub telephone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub actual_delivery_date: Option<NaiveDate>,
    /// cac:DeliveryLocation/cac:Address
    pub location_address: Option<Address>,
    /// cac:DeliveryParty/cac:PartyName/cbc:Name
    pub delivery_party_name: Option<String>,
    pub requested_delivery_period: Option<Period>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMeans {
    /// UNCL 4461 code.
    pub payment_means_code: Option<String>,
    pub payment_due_date: Option<NaiveDate>,
    pub payment_channel_code: Option<String>,
    pub instruction_notes: Vec<String>,
    pub payment_ids: Vec<String>,
    pub payee_financial_account: Option<FinancialAccount>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialAccount {
    /// Account identifier, the IBAN for Peppol.
    pub id: Option<String>,
    pub name: Option<String>,
    /// cac:FinancialInstitutionBranch/cac:FinancialInstitution/cbc:ID.
    /// `Some` whenever the institution element is present, even if empty.
    pub financial_institution_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTerms {
    pub notes: Vec<String>,
    pub settlement_discount_percent: Option<Decimal>,
    pub penalty_surcharge_percent: Option<Decimal>,
    pub amount: Option<Decimal>,
    pub settlement_period: Option<Period>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceCharge {
    /// `true` for a charge, `false` for an allowance.
    pub charge_indicator: bool,
    pub reason_code: Option<String>,
    pub reasons: Vec<String>,
    pub multiplier_factor_numeric: Option<Decimal>,
    pub amount: Decimal,
    pub base_amount: Option<Decimal>,
    pub tax_categories: Vec<TaxCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTotal {
    pub tax_amount: Option<Decimal>,
    pub subtotals: Vec<TaxSubtotal>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSubtotal {
    pub taxable_amount: Option<Decimal>,
    pub tax_amount: Option<Decimal>,
    pub category: TaxCategory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCategory {
    /// UNCL 5305 category code (S, E, Z, ...).
    pub id: Option<Identifier>,
    pub name: Option<String>,
    pub percent: Option<Decimal>,
    pub exemption_reasons: Vec<String>,
    pub tax_scheme: TaxSchemeRef,
}

impl TaxCategory {
    /// Category `id` of the VAT scheme.
    pub fn vat(id: &str, percent: Option<Decimal>) -> Self {
        Self {
            id: Some(Identifier::new(id)),
            percent,
            tax_scheme: TaxSchemeRef::vat(),
            ..Default::default()
        }
    }
}

/// cac:TaxScheme
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSchemeRef {
    pub id: Identifier,
    pub name: Option<String>,
}

impl TaxSchemeRef {
    pub fn new(id: &str) -> Self {
        Self {
            id: Identifier::new(id),
            name: None,
        }
    }

    pub fn vat() -> Self {
        Self::new(crate::core::codes::VAT_TAX_SCHEME_ID)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonetaryTotal {
    pub line_extension_amount: Option<Decimal>,
    pub tax_exclusive_amount: Option<Decimal>,
    pub tax_inclusive_amount: Option<Decimal>,
    pub allowance_total_amount: Option<Decimal>,
    pub charge_total_amount: Option<Decimal>,
    pub prepaid_amount: Option<Decimal>,
    pub payable_amount: Decimal,
}

/// `InvoiceLine` or `CreditNoteLine`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub id: Option<String>,
    pub notes: Vec<String>,
    /// cbc:InvoicedQuantity / cbc:CreditedQuantity
    pub quantity: Option<Quantity>,
    pub line_extension_amount: Decimal,
    pub order_line_references: Vec<OrderLineReference>,
    pub deliveries: Vec<Delivery>,
    pub allowance_charges: Vec<AllowanceCharge>,
    pub tax_totals: Vec<TaxTotal>,
    pub item: Item,
    pub price: Option<Price>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: Decimal,
    /// UN/ECE Rec 20 unit code.
    pub unit_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineReference {
    pub line_id: Option<String>,
    pub order_reference: Option<OrderReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: Option<String>,
    pub descriptions: Vec<String>,
    pub manufacturers_item_identifications: Vec<ItemIdentification>,
    pub commodity_classifications: Vec<CommodityClassification>,
    pub classified_tax_categories: Vec<TaxCategory>,
    pub additional_item_properties: Vec<ItemProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemIdentification {
    pub id: String,
    /// cac:IssuerParty/cac:PartyIdentification/cbc:ID
    pub issuer_party_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommodityClassification {
    /// cbc:ItemClassificationCode
    pub item_classification_code: String,
    /// `name` attribute of the classification code.
    pub name: Option<String>,
}

/// cac:AdditionalItemProperty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemProperty {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub price_amount: Decimal,
    pub base_quantity: Option<Decimal>,
}
