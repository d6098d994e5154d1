//! Biller, invoice recipient and ordering party.

use crate::core::codes::VAT_TAX_SCHEME_ID;
use crate::core::countries::is_known_country_code;
use crate::core::{ErrorKind, ErrorList, Text};
use crate::ebinterface::{Address, FurtherIdentification, InvoiceRecipient, Party};
use crate::ubl::{self, Identifier, UblDocument};

use super::{FAKE_BILLER_EMAIL, MappingContext, PLACEHOLDER_VAT_ID, non_blank};

const BILLER_PATH: &str = "AccountingSupplierParty/Party";
const RECIPIENT_PATH: &str = "AccountingCustomerParty/Party";
const ORDERING_PARTY_PATH: &str = "BuyerCustomerParty/Party";

/// Identification type of additional account IDs without a scheme.
const CONSOLIDATOR_ID_TYPE: &str = "Consolidator";
/// Identification type of contract references without a scheme.
const CONTRACT_ID_TYPE: &str = "Contract";

#[derive(Clone, Copy)]
enum Role {
    Biller,
    InvoiceRecipient,
    OrderingParty,
}

impl Role {
    fn path(self) -> &'static str {
        match self {
            Self::Biller => BILLER_PATH,
            Self::InvoiceRecipient => RECIPIENT_PATH,
            Self::OrderingParty => ORDERING_PARTY_PATH,
        }
    }

    fn vat_missing(self) -> Text {
        match self {
            Self::Biller => Text::BillerVatMissing,
            Self::InvoiceRecipient => Text::InvoiceRecipientVatMissing,
            Self::OrderingParty => Text::OrderingPartyVatMissing,
        }
    }

    fn party_missing(self) -> Text {
        match self {
            Self::Biller => Text::BillerPartyMissing,
            Self::InvoiceRecipient => Text::InvoiceRecipientPartyMissing,
            Self::OrderingParty => Text::OrderingPartyPartyMissing,
        }
    }
}

pub(crate) fn map_biller(doc: &UblDocument, ctx: &MappingContext<'_>, errors: &mut ErrorList) -> Party {
    let supplier = &doc.accounting_supplier_party;
    let Some(source) = supplier.party.as_ref() else {
        return missing_party(Role::Biller, ctx, errors);
    };

    let mut party = map_common(source, Role::Biller, ctx, errors);
    party.internal_id = resolve_internal_id(&[
        supplier.customer_assigned_account_id.as_deref(),
        first_identification(source),
    ]);
    party.further_identifications = further_identifications(&supplier.additional_account_ids, CONSOLIDATOR_ID_TYPE)
        .chain(
            doc.contract_document_references
                .iter()
                .filter_map(|r| r.id.as_ref())
                .filter_map(|id| further_identification(id, CONTRACT_ID_TYPE)),
        )
        .collect();

    if let Some(address) = party.address.as_mut() {
        address.email.get_or_insert_with(|| FAKE_BILLER_EMAIL.to_string());
    }
    party
}

pub(crate) fn map_invoice_recipient(
    doc: &UblDocument,
    ctx: &MappingContext<'_>,
    errors: &mut ErrorList,
) -> InvoiceRecipient {
    let customer = &doc.accounting_customer_party;
    let party = match customer.party.as_ref() {
        Some(source) => {
            let mut party = map_common(source, Role::InvoiceRecipient, ctx, errors);
            party.internal_id = resolve_internal_id(&[
                customer.supplier_assigned_account_id.as_deref(),
                first_identification(source),
            ]);
            party.further_identifications =
                further_identifications(&customer.additional_account_ids, CONSOLIDATOR_ID_TYPE).collect();
            party
        }
        None => missing_party(Role::InvoiceRecipient, ctx, errors),
    };
    InvoiceRecipient {
        party,
        order_reference: None,
    }
}

/// The ordering party, if the document names a buyer customer party.
///
/// Its internal ID falls back to the invoice recipient's ID and is the only
/// party ID that is mandatory.
pub(crate) fn map_ordering_party(
    doc: &UblDocument,
    recipient_id: Option<&str>,
    ctx: &MappingContext<'_>,
    errors: &mut ErrorList,
) -> Option<Party> {
    let buyer = doc.buyer_customer_party.as_ref()?;
    let Some(source) = buyer.party.as_ref() else {
        return Some(missing_party(Role::OrderingParty, ctx, errors));
    };

    let mut party = map_common(source, Role::OrderingParty, ctx, errors);
    party.internal_id = resolve_internal_id(&[
        buyer.supplier_assigned_account_id.as_deref(),
        first_identification(source),
        recipient_id,
    ]);
    if party.internal_id.is_none() {
        ctx.error(
            errors,
            ErrorKind::Party,
            "BuyerCustomerParty/SupplierAssignedAccountID",
            Text::OrderingPartyIdMissing,
        );
    }
    party.further_identifications =
        further_identifications(&buyer.additional_account_ids, CONSOLIDATOR_ID_TYPE).collect();
    Some(party)
}

fn missing_party(role: Role, ctx: &MappingContext<'_>, errors: &mut ErrorList) -> Party {
    ctx.error(errors, ErrorKind::Party, role.path(), role.party_missing());
    Party {
        vat_identification_number: PLACEHOLDER_VAT_ID.to_string(),
        ..Default::default()
    }
}

/// VAT ID and address, shared by all roles.
fn map_common(source: &ubl::Party, role: Role, ctx: &MappingContext<'_>, errors: &mut ErrorList) -> Party {
    let vat_identification_number = match vat_id(source) {
        Some(id) => id,
        None => {
            ctx.warn(
                errors,
                ErrorKind::Party,
                format!("{}/PartyTaxScheme", role.path()),
                role.vat_missing(),
            );
            PLACEHOLDER_VAT_ID.to_string()
        }
    };
    Party {
        vat_identification_number,
        internal_id: None,
        further_identifications: Vec::new(),
        address: map_address(source, role.path(), ctx, errors),
    }
}

/// Company ID of the first VAT party tax scheme.
fn vat_id(source: &ubl::Party) -> Option<String> {
    source
        .tax_schemes
        .iter()
        .filter(|s| s.tax_scheme.id.value.trim() == VAT_TAX_SCHEME_ID)
        .find_map(|s| non_blank(s.company_id.as_deref()))
}

fn first_identification(source: &ubl::Party) -> Option<&str> {
    source
        .identifications
        .iter()
        .map(|id| id.value.as_str())
        .find(|v| !v.trim().is_empty())
}

/// First non-blank candidate.
fn resolve_internal_id(candidates: &[Option<&str>]) -> Option<String> {
    candidates.iter().find_map(|c| non_blank(*c))
}

fn further_identifications<'a>(
    ids: &'a [Identifier],
    default_type: &'static str,
) -> impl Iterator<Item = FurtherIdentification> + 'a {
    ids.iter().filter_map(move |id| further_identification(id, default_type))
}

fn further_identification(id: &Identifier, default_type: &str) -> Option<FurtherIdentification> {
    let value = non_blank(Some(id.value.as_str()))?;
    let identification_type = non_blank(id.scheme_id.as_deref()).unwrap_or_else(|| default_type.to_string());
    Some(FurtherIdentification {
        identification_type,
        value,
    })
}

fn map_address(
    source: &ubl::Party,
    path: &str,
    ctx: &MappingContext<'_>,
    errors: &mut ErrorList,
) -> Option<Address> {
    let name = source
        .names
        .iter()
        .find_map(|n| non_blank(Some(n.as_str())))
        .or_else(|| {
            source
                .legal_entities
                .iter()
                .find_map(|e| non_blank(e.registration_name.as_deref()))
        });
    if name.is_none() {
        ctx.error(errors, ErrorKind::Party, format!("{path}/PartyName"), Text::PartyNameMissing);
    }

    let Some(postal) = source.postal_address.as_ref() else {
        ctx.error(errors, ErrorKind::Party, format!("{path}/PostalAddress"), Text::AddressMissing);
        return None;
    };
    let mut address = map_postal_address(postal, &format!("{path}/PostalAddress"), ErrorKind::Party, ctx, errors);
    address.name = name;

    if let Some(contact) = &source.contact {
        address.contact = non_blank(contact.name.as_deref());
        address.phone = non_blank(contact.telephone.as_deref());
        address.email = non_blank(contact.email.as_deref());
    }
    Some(address)
}

/// Postal address without name and contact details. Also used for delivery
/// locations.
pub(crate) fn map_postal_address(
    postal: &ubl::Address,
    path: &str,
    kind: ErrorKind,
    ctx: &MappingContext<'_>,
    errors: &mut ErrorList,
) -> Address {
    let street = match (
        non_blank(postal.street_name.as_deref()),
        non_blank(postal.building_number.as_deref()),
    ) {
        (Some(street), Some(number)) => Some(format!("{street} {number}")),
        (street, None) => street,
        (None, number) => number,
    };

    let town = non_blank(postal.city_name.as_deref());
    if town.is_none() {
        ctx.error(errors, kind, format!("{path}/CityName"), Text::AddressTownMissing);
    }
    let zip = non_blank(postal.postal_zone.as_deref());
    if zip.is_none() {
        ctx.error(errors, kind, format!("{path}/PostalZone"), Text::AddressZipMissing);
    }

    let country_code = non_blank(postal.country_code.as_deref());
    match &country_code {
        None => ctx.error(
            errors,
            kind,
            format!("{path}/Country/IdentificationCode"),
            Text::AddressCountryMissing,
        ),
        Some(code) if !is_known_country_code(code) => ctx.warn(
            errors,
            kind,
            format!("{path}/Country/IdentificationCode"),
            Text::UnknownCountryCode(code.clone()),
        ),
        Some(_) => {}
    }

    Address {
        street,
        po_box: non_blank(postal.postbox.as_deref()),
        town,
        zip,
        country_code,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConverterConfig, ErrorLevel, Language, StandardCodeLists};
    use crate::ubl::{Contact, CustomerParty, DocumentReference, PartyTaxScheme, TaxSchemeRef};

    fn ctx(config: &ConverterConfig) -> MappingContext<'_> {
        MappingContext {
            config,
            code_lists: &StandardCodeLists,
            language: Language::English,
        }
    }

    fn source_party(name: &str, vat: Option<&str>) -> ubl::Party {
        ubl::Party {
            names: vec![name.into()],
            postal_address: Some(ubl::Address {
                street_name: Some("Hauptstraße".into()),
                building_number: Some("1".into()),
                city_name: Some("Wien".into()),
                postal_zone: Some("1010".into()),
                country_code: Some("AT".into()),
                ..Default::default()
            }),
            tax_schemes: vat
                .map(|v| PartyTaxScheme {
                    company_id: Some(v.into()),
                    tax_scheme: TaxSchemeRef::vat(),
                })
                .into_iter()
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn biller_with_vat_and_contract_reference() {
        let config = ConverterConfig::default();
        let mut doc = UblDocument::default();
        doc.accounting_supplier_party.party = Some(source_party("Lieferant GmbH", Some("ATU12345678")));
        doc.accounting_supplier_party.customer_assigned_account_id = Some("L-42".into());
        doc.contract_document_references = vec![DocumentReference {
            id: Some(Identifier::new("V-2024-7")),
            ..Default::default()
        }];

        let mut errors = ErrorList::new();
        let biller = map_biller(&doc, &ctx(&config), &mut errors);

        assert!(errors.is_empty(), "{errors}");
        assert_eq!(biller.vat_identification_number, "ATU12345678");
        assert_eq!(biller.internal_id.as_deref(), Some("L-42"));
        assert_eq!(biller.further_identifications[0].identification_type, "Contract");
        let address = biller.address.unwrap();
        assert_eq!(address.street.as_deref(), Some("Hauptstraße 1"));
        assert_eq!(address.email.as_deref(), Some(FAKE_BILLER_EMAIL));
    }

    #[test]
    fn missing_vat_uses_placeholder() {
        let config = ConverterConfig::default();
        let mut doc = UblDocument::default();
        doc.accounting_customer_party.party = Some(source_party("Kunde AG", None));

        let mut errors = ErrorList::new();
        let recipient = map_invoice_recipient(&doc, &ctx(&config), &mut errors);

        assert_eq!(recipient.party.vat_identification_number, PLACEHOLDER_VAT_ID);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.most_severe(), Some(ErrorLevel::Warn));
    }

    #[test]
    fn ordering_party_falls_back_to_recipient_id() {
        let config = ConverterConfig::default();
        let mut doc = UblDocument::default();
        doc.buyer_customer_party = Some(CustomerParty {
            party: Some(source_party("Besteller", Some("ATU99999999"))),
            ..Default::default()
        });

        let mut errors = ErrorList::new();
        let party = map_ordering_party(&doc, Some("K-1"), &ctx(&config), &mut errors).unwrap();
        assert_eq!(party.internal_id.as_deref(), Some("K-1"));
        assert!(errors.is_empty());

        let party = map_ordering_party(&doc, None, &ctx(&config), &mut errors).unwrap();
        assert!(party.internal_id.is_none());
        assert_eq!(errors.errors().count(), 1);
    }

    #[test]
    fn no_buyer_means_no_ordering_party() {
        let config = ConverterConfig::default();
        let mut errors = ErrorList::new();
        assert!(map_ordering_party(&UblDocument::default(), None, &ctx(&config), &mut errors).is_none());
        assert!(errors.is_empty());
    }

    #[test]
    fn address_requires_town_zip_country() {
        let config = ConverterConfig::default();
        let mut errors = ErrorList::new();
        let postal = ubl::Address {
            country_code: Some("XX".into()),
            ..Default::default()
        };
        let address = map_postal_address(&postal, "P", ErrorKind::Party, &ctx(&config), &mut errors);
        assert_eq!(address.country_code.as_deref(), Some("XX"));
        assert_eq!(errors.errors().count(), 2);
        assert_eq!(errors.warnings().count(), 1);
    }

    #[test]
    fn contact_details_are_copied() {
        let config = ConverterConfig::default();
        let mut source = source_party("", Some("ATU1"));
        source.legal_entities = vec![ubl::PartyLegalEntity {
            registration_name: Some("Rechtlicher Name".into()),
            company_id: None,
        }];
        source.contact = Some(Contact {
            name: Some("Max".into()),
            telephone: Some("+43 1 234".into()),
            email: Some("max@example.at".into()),
        });
        let mut errors = ErrorList::new();
        let address = map_address(&source, "P", &ctx(&config), &mut errors).unwrap();
        assert!(errors.is_empty());
        assert_eq!(address.name.as_deref(), Some("Rechtlicher Name"));
        assert_eq!(address.email.as_deref(), Some("max@example.at"));
        assert_eq!(address.phone.as_deref(), Some("+43 1 234"));
    }
}
