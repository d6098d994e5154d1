//! Texts of all conversion findings, in English and German.

use rust_decimal::Decimal;

/// Language a finding is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    German,
}

impl Language {
    /// Pick the language from a BCP 47 style locale ("de-AT", "en_GB", "de").
    ///
    /// German for the `de` language subtag, English for everything else.
    pub fn from_locale(locale: &str) -> Self {
        match primary_subtag(locale) {
            Some(tag) if tag.eq_ignore_ascii_case("de") => Self::German,
            _ => Self::English,
        }
    }
}

/// Language subtag of a locale string.
pub(crate) fn primary_subtag(locale: &str) -> Option<&str> {
    locale
        .trim()
        .split(['-', '_'])
        .next()
        .filter(|tag| !tag.is_empty())
}

/// A finding text together with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Text {
    // Envelope
    NoUblVersion,
    InvalidUblVersion(String),
    NoProfileId,
    InvalidProfileId(String),

    // Header
    MissingInvoiceNumber,
    MissingInvoiceDate,
    OrderReferenceMissing,
    OrderReferenceTooLong(String, usize),

    // Parties
    BillerVatMissing,
    InvoiceRecipientVatMissing,
    OrderingPartyVatMissing,
    BillerPartyMissing,
    InvoiceRecipientPartyMissing,
    OrderingPartyPartyMissing,
    OrderingPartyIdMissing,
    PartyNameMissing,
    AddressMissing,
    AddressTownMissing,
    AddressZipMissing,
    AddressCountryMissing,
    UnknownCountryCode(String),

    // Tax
    MissingTaxCategoryId,
    UnsupportedTaxScheme(String),
    TaxPercentMissing,
    TaxableAmountMissing,
    TaxAmountMissing,
    VatItemMissing,

    // Lines
    LineTaxPercentageNotFound(Decimal),
    InvalidPositionNumber(String, u64),
    MissingUnit(String),
    UnknownUnit(String),
    MissingQuantity(Decimal),
    OrderLineReferenceIdEmpty,

    // Document level allowances and charges
    AllowanceChargeNoTaxRate,

    // Monetary totals
    PrepaidNotSupported,

    // Payment
    PaymentIdTooLong(String, usize),
    BicInvalid(String),
    IbanMissing,
    IbanTooLong(String, usize),
    IbanMalformed(String),
    UnsupportedChannelCode(String),
    UnsupportedPaymentMeans(String),
    NoPaymentMethod,
    SettlementPeriodMissing,
    PenaltyNotSupported,
    DiscountWithoutDueDate,

    // Delivery
    NoDeliveryDate,

    // Any section
    ArithmeticOverflow,
}

impl Text {
    pub fn render(&self, language: Language) -> String {
        match language {
            Language::English => self.english(),
            Language::German => self.german(),
        }
    }

    fn english(&self) -> String {
        match self {
            Self::NoUblVersion => {
                "No UBLVersionID present. It must be '2.0' or '2.1'.".into()
            }
            Self::InvalidUblVersion(v) => {
                format!("Invalid UBLVersionID value '{v}' present. It must be '2.0' or '2.1'.")
            }
            Self::NoProfileId => "No ProfileID present.".into(),
            Self::InvalidProfileId(v) => format!("Invalid ProfileID value '{v}' present."),
            Self::MissingInvoiceNumber => "The invoice number is missing.".into(),
            Self::MissingInvoiceDate => "The invoice date is missing.".into(),
            Self::OrderReferenceMissing => {
                "The order reference is mandatory for E-RECHNUNG.GV.AT.".into()
            }
            Self::OrderReferenceTooLong(v, max) => format!(
                "The order reference '{v}' is too long and was cut to {max} characters."
            ),
            Self::BillerVatMissing => {
                "Failed to get biller VAT identification number. Using a placeholder.".into()
            }
            Self::InvoiceRecipientVatMissing => {
                "Failed to get invoice recipient VAT identification number. Using a placeholder."
                    .into()
            }
            Self::OrderingPartyVatMissing => {
                "Failed to get ordering party VAT identification number. Using a placeholder."
                    .into()
            }
            Self::BillerPartyMissing => "The biller party is missing.".into(),
            Self::InvoiceRecipientPartyMissing => "The invoice recipient party is missing.".into(),
            Self::OrderingPartyPartyMissing => "The ordering party is missing.".into(),
            Self::OrderingPartyIdMissing => {
                "Failed to get the supplier assigned account ID of the ordering party.".into()
            }
            Self::PartyNameMissing => "The party has no name.".into(),
            Self::AddressMissing => "The party has no postal address.".into(),
            Self::AddressTownMissing => "The address has no town.".into(),
            Self::AddressZipMissing => "The address has no ZIP code.".into(),
            Self::AddressCountryMissing => "The address has no country code.".into(),
            Self::UnknownCountryCode(c) => format!("The country code '{c}' is unknown."),
            Self::MissingTaxCategoryId => "The tax category has no ID.".into(),
            Self::UnsupportedTaxScheme(s) => format!("The tax scheme '{s}' is not supported."),
            Self::TaxPercentMissing => "The tax percentage is missing.".into(),
            Self::TaxableAmountMissing => "The taxable amount is missing.".into(),
            Self::TaxAmountMissing => "The tax amount is missing.".into(),
            Self::VatItemMissing => "No VAT item could be determined.".into(),
            Self::LineTaxPercentageNotFound(p) => {
                format!("No tax percentage found for the line. Defaulting to {p}%.")
            }
            Self::InvalidPositionNumber(v, n) => {
                format!("The line ID '{v}' is not a valid position number. Using position number {n}.")
            }
            Self::MissingUnit(u) => format!("The line has no unit code. Defaulting to '{u}'."),
            Self::UnknownUnit(u) => format!("The unit code '{u}' is unknown."),
            Self::MissingQuantity(q) => format!("The line has no quantity. Defaulting to {q}."),
            Self::OrderLineReferenceIdEmpty => "The order line reference ID is empty.".into(),
            Self::AllowanceChargeNoTaxRate => {
                "The allowance or charge has no tax percentage.".into()
            }
            Self::PrepaidNotSupported => "Prepaid amounts are not supported.".into(),
            Self::PaymentIdTooLong(v, max) => {
                format!("The payment reference '{v}' is too long and was cut to {max} characters.")
            }
            Self::BicInvalid(v) => format!("The BIC '{v}' is invalid and was dropped."),
            Self::IbanMissing => "The IBAN is missing.".into(),
            Self::IbanTooLong(v, max) => {
                format!("The IBAN '{v}' is too long and was cut to {max} characters.")
            }
            Self::IbanMalformed(v) => format!("The IBAN '{v}' does not look like an IBAN."),
            Self::UnsupportedChannelCode(c) => {
                format!("The payment channel code '{c}' is not supported.")
            }
            Self::UnsupportedPaymentMeans(c) => format!(
                "The payment means code '{c}' is not supported. Use 30, 31 or 42 for bank transfer or 49 for direct debit."
            ),
            Self::NoPaymentMethod => {
                "A payment method is mandatory for E-RECHNUNG.GV.AT.".into()
            }
            Self::SettlementPeriodMissing => {
                "The settlement discount has no settlement period end date and was dropped.".into()
            }
            Self::PenaltyNotSupported => "Penalty surcharges are not supported.".into(),
            Self::DiscountWithoutDueDate => "Discounts require a payment due date.".into(),
            Self::NoDeliveryDate => {
                "A delivery date or period is mandatory for E-RECHNUNG.GV.AT.".into()
            }
            Self::ArithmeticOverflow => {
                "The value could not be computed because it exceeds the supported number range."
                    .into()
            }
        }
    }

    fn german(&self) -> String {
        match self {
            Self::NoUblVersion => {
                "Keine UBLVersionID angegeben. Erlaubt sind '2.0' oder '2.1'.".into()
            }
            Self::InvalidUblVersion(v) => format!(
                "Ungültige UBLVersionID '{v}' angegeben. Erlaubt sind '2.0' oder '2.1'."
            ),
            Self::NoProfileId => "Keine ProfileID angegeben.".into(),
            Self::InvalidProfileId(v) => format!("Ungültige ProfileID '{v}' angegeben."),
            Self::MissingInvoiceNumber => "Die Rechnungsnummer fehlt.".into(),
            Self::MissingInvoiceDate => "Das Rechnungsdatum fehlt.".into(),
            Self::OrderReferenceMissing => {
                "Die Auftragsreferenz ist für E-RECHNUNG.GV.AT verpflichtend.".into()
            }
            Self::OrderReferenceTooLong(v, max) => format!(
                "Die Auftragsreferenz '{v}' ist zu lang und wurde auf {max} Zeichen gekürzt."
            ),
            Self::BillerVatMissing => {
                "Die UID-Nummer des Rechnungsstellers fehlt. Es wird ein Platzhalter verwendet."
                    .into()
            }
            Self::InvoiceRecipientVatMissing => {
                "Die UID-Nummer des Rechnungsempfängers fehlt. Es wird ein Platzhalter verwendet."
                    .into()
            }
            Self::OrderingPartyVatMissing => {
                "Die UID-Nummer des Auftraggebers fehlt. Es wird ein Platzhalter verwendet.".into()
            }
            Self::BillerPartyMissing => "Der Rechnungssteller fehlt.".into(),
            Self::InvoiceRecipientPartyMissing => "Der Rechnungsempfänger fehlt.".into(),
            Self::OrderingPartyPartyMissing => "Der Auftraggeber fehlt.".into(),
            Self::OrderingPartyIdMissing => {
                "Die Kundennummer des Auftraggebers beim Rechnungssteller fehlt.".into()
            }
            Self::PartyNameMissing => "Der Partei fehlt ein Name.".into(),
            Self::AddressMissing => "Der Partei fehlt eine Postadresse.".into(),
            Self::AddressTownMissing => "Der Adresse fehlt der Ort.".into(),
            Self::AddressZipMissing => "Der Adresse fehlt die Postleitzahl.".into(),
            Self::AddressCountryMissing => "Der Adresse fehlt der Ländercode.".into(),
            Self::UnknownCountryCode(c) => format!("Der Ländercode '{c}' ist unbekannt."),
            Self::MissingTaxCategoryId => "Der Steuerkategorie fehlt die ID.".into(),
            Self::UnsupportedTaxScheme(s) => {
                format!("Das Steuerschema '{s}' wird nicht unterstützt.")
            }
            Self::TaxPercentMissing => "Der Steuersatz fehlt.".into(),
            Self::TaxableAmountMissing => "Der steuerpflichtige Betrag fehlt.".into(),
            Self::TaxAmountMissing => "Der Steuerbetrag fehlt.".into(),
            Self::VatItemMissing => "Es konnte kein Umsatzsteuer-Eintrag ermittelt werden.".into(),
            Self::LineTaxPercentageNotFound(p) => {
                format!("Für die Zeile wurde kein Steuersatz gefunden. Es wird {p}% verwendet.")
            }
            Self::InvalidPositionNumber(v, n) => format!(
                "Die Zeilen-ID '{v}' ist keine gültige Positionsnummer. Es wird die Positionsnummer {n} verwendet."
            ),
            Self::MissingUnit(u) => {
                format!("Der Zeile fehlt die Mengeneinheit. Es wird '{u}' verwendet.")
            }
            Self::UnknownUnit(u) => format!("Die Mengeneinheit '{u}' ist unbekannt."),
            Self::MissingQuantity(q) => {
                format!("Der Zeile fehlt die Menge. Es wird {q} verwendet.")
            }
            Self::OrderLineReferenceIdEmpty => "Die Bestellpositionsnummer ist leer.".into(),
            Self::AllowanceChargeNoTaxRate => {
                "Dem Zu- oder Abschlag fehlt der Steuersatz.".into()
            }
            Self::PrepaidNotSupported => "Vorausbezahlte Beträge werden nicht unterstützt.".into(),
            Self::PaymentIdTooLong(v, max) => format!(
                "Die Zahlungsreferenz '{v}' ist zu lang und wurde auf {max} Zeichen gekürzt."
            ),
            Self::BicInvalid(v) => format!("Der BIC '{v}' ist ungültig und wurde entfernt."),
            Self::IbanMissing => "Der IBAN fehlt.".into(),
            Self::IbanTooLong(v, max) => {
                format!("Der IBAN '{v}' ist zu lang und wurde auf {max} Zeichen gekürzt.")
            }
            Self::IbanMalformed(v) => format!("Der IBAN '{v}' hat kein gültiges Format."),
            Self::UnsupportedChannelCode(c) => {
                format!("Der Zahlungskanal '{c}' wird nicht unterstützt.")
            }
            Self::UnsupportedPaymentMeans(c) => format!(
                "Die Zahlungsart '{c}' wird nicht unterstützt. Erlaubt sind 30, 31 oder 42 für Überweisung und 49 für Lastschrift."
            ),
            Self::NoPaymentMethod => {
                "Eine Zahlungsart ist für E-RECHNUNG.GV.AT verpflichtend.".into()
            }
            Self::SettlementPeriodMissing => {
                "Dem Skonto fehlt das Enddatum der Skontofrist. Es wurde ignoriert.".into()
            }
            Self::PenaltyNotSupported => "Verzugszuschläge werden nicht unterstützt.".into(),
            Self::DiscountWithoutDueDate => "Skonti erfordern ein Fälligkeitsdatum.".into(),
            Self::NoDeliveryDate => {
                "Ein Lieferdatum oder Leistungszeitraum ist für E-RECHNUNG.GV.AT verpflichtend."
                    .into()
            }
            Self::ArithmeticOverflow => {
                "Der Wert konnte nicht berechnet werden, weil er den unterstützten Zahlenbereich überschreitet."
                    .into()
            }
        }
    }
}
