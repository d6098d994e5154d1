//! Parties, addresses and deliveries on the UBL side.

use crate::ebinterface::{self, FurtherIdentification};
use crate::ubl::{
    Address, Contact, CustomerParty, Delivery, DocumentReference, Identifier, Party, PartyLegalEntity,
    PartyTaxScheme, Period, SupplierParty, TaxSchemeRef,
};

use super::has_text;

pub(crate) fn map_supplier(biller: &ebinterface::Party) -> SupplierParty {
    SupplierParty {
        customer_assigned_account_id: biller.internal_id.clone(),
        additional_account_ids: Vec::new(),
        party: Some(map_party(biller)),
    }
}

/// Invoice recipient. Further identifications become additional account
/// IDs with the identification type as scheme.
pub(crate) fn map_customer(source: &ebinterface::Party) -> CustomerParty {
    CustomerParty {
        supplier_assigned_account_id: source.internal_id.clone(),
        additional_account_ids: source.further_identifications.iter().map(schemed_id).collect(),
        party: Some(map_party(source)),
    }
}

/// Buyer party; its further identifications go to contract references.
pub(crate) fn map_buyer(source: &ebinterface::Party) -> CustomerParty {
    CustomerParty {
        supplier_assigned_account_id: source.internal_id.clone(),
        additional_account_ids: Vec::new(),
        party: Some(map_party(source)),
    }
}

/// Contract references carrying the further identifications of `source`.
pub(crate) fn contract_references(source: &ebinterface::Party) -> impl Iterator<Item = DocumentReference> + '_ {
    source.further_identifications.iter().map(|id| DocumentReference {
        id: Some(schemed_id(id)),
        ..Default::default()
    })
}

fn schemed_id(id: &FurtherIdentification) -> Identifier {
    Identifier::with_scheme(id.value.clone(), id.identification_type.clone())
}

fn map_party(source: &ebinterface::Party) -> Party {
    let mut party = Party {
        identifications: source.internal_id.iter().map(Identifier::new).collect(),
        ..Default::default()
    };

    if has_text(&source.vat_identification_number) {
        party.tax_schemes.push(PartyTaxScheme {
            company_id: Some(source.vat_identification_number.clone()),
            tax_scheme: TaxSchemeRef::vat(),
        });
    }

    if let Some(address) = &source.address {
        if let Some(name) = address.name.as_ref().filter(|n| has_text(n)) {
            party.names.push(name.clone());
            party.legal_entities.push(PartyLegalEntity {
                registration_name: Some(name.clone()),
                company_id: None,
            });
        }
        party.postal_address = Some(map_address(address));
        let contact = Contact {
            name: address.contact.clone(),
            telephone: address.phone.clone(),
            email: address.email.clone(),
        };
        if contact != Contact::default() {
            party.contact = Some(contact);
        }
    }
    party
}

pub(crate) fn map_address(source: &ebinterface::Address) -> Address {
    Address {
        street_name: source.street.clone(),
        postbox: source.po_box.clone(),
        city_name: source.town.clone(),
        postal_zone: source.zip.clone(),
        country_code: source.country_code.clone(),
        ..Default::default()
    }
}

/// Delivery with date, requested period and location. The address name
/// becomes the delivery party.
pub(crate) fn map_delivery(source: &ebinterface::Delivery) -> Delivery {
    Delivery {
        actual_delivery_date: source.date,
        location_address: source.address.as_ref().map(map_address),
        delivery_party_name: source.address.as_ref().and_then(|a| a.name.clone()),
        requested_delivery_period: source.period.as_ref().map(map_period),
    }
}

pub(crate) fn map_period(source: &ebinterface::Period) -> Period {
    Period {
        start_date: Some(source.from_date),
        end_date: Some(source.to_date),
    }
}
