//! Business code lists consulted during conversion.
//!
//! The converters only talk to the [`CodeLists`] trait, so callers can plug
//! in a complete registry. [`StandardCodeLists`] covers the subset needed
//! for Peppol BIS invoices: UN/ECE 5153 tax schemes, the predefined Peppol
//! process identifiers, UNCL 4461 payment means and UN/ECE Rec 20 units.

use serde::{Deserialize, Serialize};

use super::units;

/// Tax scheme identifier of value added tax (UN/ECE 5153).
pub const VAT_TAX_SCHEME_ID: &str = "VAT";

/// UN/ECE 5153 tax scheme identifier used for "other taxes".
pub const OTHER_TAX_SCHEME_ID: &str = "OTH";

/// Peppol BIS Billing 3.0 profile identifier.
pub const PEPPOL_BILLING_PROFILE_ID: &str = "urn:fdc:peppol.eu:2017:poacc:billing:01:1.0";

/// Peppol BIS v2 "invoice only" profile identifier.
pub const PEPPOL_INVOICE_ONLY_PROFILE_ID: &str = "urn:www.cenbii.eu:profile:bii04:ver2.0";

/// Unit code used when a line carries no unit ("one", UN/ECE Rec 20).
pub const DEFAULT_UNIT_CODE: &str = "C62";

/// `cbc:DocumentType` of an additional document reference that points to the
/// cancelled original document.
pub const CANCELLED_ORIGINAL_DOCUMENT: &str = "CancelledOriginalDocument";

/// `cbc:DocumentType` of an additional document reference to any other
/// related document.
pub const RELATED_DOCUMENT: &str = "RelatedDocument";

/// A resolved tax scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxScheme {
    /// UN/ECE 5153 code (e.g. "VAT").
    pub id: &'static str,
    /// Human-readable description.
    pub name: &'static str,
}

impl TaxScheme {
    /// The single supported VAT scheme.
    pub const VAT: Self = Self {
        id: VAT_TAX_SCHEME_ID,
        name: "Value added tax",
    };

    pub fn is_vat(&self) -> bool {
        self.id == VAT_TAX_SCHEME_ID
    }
}

/// A resolved Peppol process (profile) identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessProfile {
    pub id: &'static str,
    pub name: &'static str,
}

/// UNCL 4461 payment means codes relevant to the converters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMeansCode {
    /// 1: Instrument not defined.
    NotDefined,
    /// 10: Cash.
    Cash,
    /// 20: Cheque.
    Cheque,
    /// 30: Credit transfer.
    CreditTransfer,
    /// 31: Debit transfer.
    DebitTransfer,
    /// 42: Payment to bank account.
    PaymentToBankAccount,
    /// 48: Bank card.
    BankCard,
    /// 49: Direct debit.
    DirectDebit,
    /// 57: Standing agreement.
    StandingAgreement,
    /// 58: SEPA credit transfer.
    SepaCreditTransfer,
    /// 59: SEPA direct debit.
    SepaDirectDebit,
    /// 97: Clearing between partners.
    ClearingBetweenPartners,
    /// Other code value.
    Other(u16),
}

impl PaymentMeansCode {
    pub fn code(&self) -> u16 {
        match self {
            Self::NotDefined => 1,
            Self::Cash => 10,
            Self::Cheque => 20,
            Self::CreditTransfer => 30,
            Self::DebitTransfer => 31,
            Self::PaymentToBankAccount => 42,
            Self::BankCard => 48,
            Self::DirectDebit => 49,
            Self::StandingAgreement => 57,
            Self::SepaCreditTransfer => 58,
            Self::SepaDirectDebit => 59,
            Self::ClearingBetweenPartners => 97,
            Self::Other(c) => *c,
        }
    }

    /// Parse from UNCL 4461 numeric code.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::NotDefined,
            10 => Self::Cash,
            20 => Self::Cheque,
            30 => Self::CreditTransfer,
            31 => Self::DebitTransfer,
            42 => Self::PaymentToBankAccount,
            48 => Self::BankCard,
            49 => Self::DirectDebit,
            57 => Self::StandingAgreement,
            58 => Self::SepaCreditTransfer,
            59 => Self::SepaDirectDebit,
            97 => Self::ClearingBetweenPartners,
            c => Self::Other(c),
        }
    }

    /// Means that are paid by transfer to the biller's bank account.
    pub fn is_bank_transfer(&self) -> bool {
        matches!(
            self,
            Self::CreditTransfer | Self::DebitTransfer | Self::PaymentToBankAccount
        )
    }
}

/// Lookup of standardized business codes.
///
/// Implementations must be cheap to query and free of side effects; one
/// instance is shared read-only by concurrent conversions.
pub trait CodeLists: Send + Sync {
    /// Resolve a UN/ECE 5153 tax scheme identifier.
    fn resolve_tax_scheme(&self, id: &str) -> Option<TaxScheme>;

    /// Resolve a Peppol process identifier (UBL `ProfileID`).
    fn resolve_process_profile(&self, id: &str) -> Option<ProcessProfile>;

    /// Resolve a UNCL 4461 payment means code.
    fn resolve_payment_means_code(&self, code: &str) -> Option<PaymentMeansCode>;

    /// Resolve a UN/ECE Rec 20 unit of measure code.
    fn resolve_unit_of_measure(&self, code: &str) -> Option<&'static str>;
}

/// Built-in code lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCodeLists;

impl CodeLists for StandardCodeLists {
    fn resolve_tax_scheme(&self, id: &str) -> Option<TaxScheme> {
        TAX_SCHEMES
            .binary_search_by(|(code, _)| (*code).cmp(id))
            .ok()
            .map(|i| TaxScheme {
                id: TAX_SCHEMES[i].0,
                name: TAX_SCHEMES[i].1,
            })
    }

    fn resolve_process_profile(&self, id: &str) -> Option<ProcessProfile> {
        PROCESS_PROFILES
            .iter()
            .find(|(pid, _)| *pid == id)
            .map(|(pid, name)| ProcessProfile { id: pid, name })
    }

    fn resolve_payment_means_code(&self, code: &str) -> Option<PaymentMeansCode> {
        let n: u16 = code.parse().ok()?;
        (1..=97).contains(&n).then(|| PaymentMeansCode::from_code(n))
    }

    fn resolve_unit_of_measure(&self, code: &str) -> Option<&'static str> {
        units::lookup_unit_code(code)
    }
}

/// UN/ECE 5153 duty/tax/fee type codes. Sorted for binary search.
static TAX_SCHEMES: &[(&str, &str)] = &[
    ("AAA", "Petroleum tax"),
    ("AAB", "Provisional countervailing duty cash"),
    ("AAC", "Provisional countervailing duty bond"),
    ("AAD", "Tobacco tax"),
    ("AAE", "Energy fee"),
    ("AAF", "Coffee tax"),
    ("AAG", "Harmonised sales tax, Canadian"),
    ("AAH", "Quebec sales tax"),
    ("AAI", "Canadian provincial sales tax"),
    ("AAJ", "Tax on replacement part"),
    ("AAK", "Mineral oil tax"),
    ("AAL", "Special tax"),
    ("ADD", "Anti-dumping duty"),
    ("BOL", "Stamp duty (Imposta di Bollo)"),
    ("CAP", "Agricultural levy"),
    ("CAR", "Car tax"),
    ("COC", "Paper consortium tax"),
    ("CST", "Commodity specific tax"),
    ("CUD", "Customs duty"),
    ("CVD", "Countervailing duty"),
    ("ENV", "Environmental tax"),
    ("EXC", "Excise duty"),
    ("EXP", "Agricultural export rebate"),
    ("FET", "Federal excise tax"),
    ("FRE", "Free"),
    ("GCN", "General construction tax"),
    ("GST", "Goods and services tax"),
    ("ILL", "Illuminants tax"),
    ("IMP", "Import tax"),
    ("IND", "Individual tax"),
    ("LAC", "Business license fee"),
    ("LCN", "Local construction tax"),
    ("LDP", "Light dues payable"),
    ("LOC", "Local sales taxes"),
    ("LST", "Lust tax"),
    ("MCA", "Monetary compensatory amount"),
    ("MCD", "Miscellaneous cash deposit"),
    ("OTH", "Other taxes"),
    ("PDB", "Provisional duty bond"),
    ("PDC", "Provisional duty cash"),
    ("PRF", "Preference duty"),
    ("SCN", "Special construction tax"),
    ("SSS", "Shifted social securities"),
    ("STT", "State/provincial sales tax"),
    ("SUP", "Suspended duty"),
    ("SUR", "Surtax"),
    ("SWT", "Shifted wage tax"),
    ("TAC", "Alcohol mark tax"),
    ("TOT", "Total"),
    ("TOX", "Turnover tax"),
    ("TTA", "Tonnage taxes"),
    ("VAD", "Valuation deposit"),
    ("VAT", "Value added tax"),
];

/// Predefined Peppol process identifiers usable for invoices and credit notes.
static PROCESS_PROFILES: &[(&str, &str)] = &[
    ("urn:www.cenbii.eu:profile:bii04:ver1.0", "BIS 4a Invoice only (v1)"),
    ("urn:www.cenbii.eu:profile:bii05:ver1.0", "BIS 5a Billing (v1)"),
    ("urn:www.cenbii.eu:profile:bii04:ver2.0", "BIS 4a Invoice only"),
    ("urn:www.cenbii.eu:profile:bii05:ver2.0", "BIS 5a Billing"),
    ("urn:www.cenbii.eu:profile:bii06:ver2.0", "BIS 6a Procurement"),
    ("urn:www.cenbii.eu:profile:bii28:ver2.0", "BIS 28a Ordering"),
    ("urn:www.cenbii.eu:profile:bii30:ver2.0", "BIS 30a Despatch advice"),
    (PEPPOL_BILLING_PROFILE_ID, "BIS Billing 3.0"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vat_scheme_resolves() {
        let scheme = StandardCodeLists.resolve_tax_scheme("VAT").unwrap();
        assert!(scheme.is_vat());
        assert_eq!(scheme, TaxScheme::VAT);
    }

    #[test]
    fn other_scheme_is_not_vat() {
        let scheme = StandardCodeLists.resolve_tax_scheme("ENV").unwrap();
        assert!(!scheme.is_vat());
        assert_eq!(scheme.name, "Environmental tax");
    }

    #[test]
    fn unknown_scheme() {
        assert!(StandardCodeLists.resolve_tax_scheme("XYZ").is_none());
        assert!(StandardCodeLists.resolve_tax_scheme("vat").is_none());
    }

    #[test]
    fn tax_schemes_sorted() {
        for window in TAX_SCHEMES.windows(2) {
            assert!(window[0].0 < window[1].0, "{} >= {}", window[0].0, window[1].0);
        }
    }

    #[test]
    fn process_profiles() {
        assert!(
            StandardCodeLists
                .resolve_process_profile(PEPPOL_INVOICE_ONLY_PROFILE_ID)
                .is_some()
        );
        assert!(
            StandardCodeLists
                .resolve_process_profile(PEPPOL_BILLING_PROFILE_ID)
                .is_some()
        );
        assert!(StandardCodeLists.resolve_process_profile("urn:foo").is_none());
    }

    #[test]
    fn payment_means() {
        let lists = StandardCodeLists;
        assert_eq!(
            lists.resolve_payment_means_code("31"),
            Some(PaymentMeansCode::DebitTransfer)
        );
        assert_eq!(
            lists.resolve_payment_means_code("49"),
            Some(PaymentMeansCode::DirectDebit)
        );
        assert_eq!(
            lists.resolve_payment_means_code("68"),
            Some(PaymentMeansCode::Other(68))
        );
        assert_eq!(lists.resolve_payment_means_code("0"), None);
        assert_eq!(lists.resolve_payment_means_code("ZZZ"), None);
        assert_eq!(lists.resolve_payment_means_code(""), None);
    }

    #[test]
    fn payment_means_roundtrip_codes() {
        for code in [1u16, 10, 20, 30, 31, 42, 48, 49, 57, 58, 59, 97, 68] {
            assert_eq!(PaymentMeansCode::from_code(code).code(), code);
        }
    }

    #[test]
    fn bank_transfer_classification() {
        assert!(PaymentMeansCode::CreditTransfer.is_bank_transfer());
        assert!(PaymentMeansCode::DebitTransfer.is_bank_transfer());
        assert!(PaymentMeansCode::PaymentToBankAccount.is_bank_transfer());
        assert!(!PaymentMeansCode::DirectDebit.is_bank_transfer());
        assert!(!PaymentMeansCode::SepaCreditTransfer.is_bank_transfer());
    }

    #[test]
    fn units_resolve() {
        assert_eq!(StandardCodeLists.resolve_unit_of_measure("HUR"), Some("HUR"));
        assert_eq!(StandardCodeLists.resolve_unit_of_measure("PIECE"), None);
    }
}
