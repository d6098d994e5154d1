//! Known-bad documents: each one passes the envelope check, is still
//! converted, and is flagged with at least one ERROR.

#![cfg(feature = "from-ubl")]

use chrono::NaiveDate;
use ebiconv::core::codes::PEPPOL_BILLING_PROFILE_ID;
use ebiconv::core::*;
use ebiconv::from_ubl::UblToEbInterfaceConverter;
use ebiconv::ubl::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn english() -> ConverterConfig {
    ConverterConfigBuilder::new()
        .display_locale("en")
        .build()
        .unwrap()
}

fn party(name: &str, vat_id: &str) -> Party {
    Party {
        names: vec![name.into()],
        postal_address: Some(Address {
            street_name: Some("Ringstraße 5".into()),
            city_name: Some("Linz".into()),
            postal_zone: Some("4020".into()),
            country_code: Some("AT".into()),
            ..Default::default()
        }),
        tax_schemes: vec![PartyTaxScheme {
            company_id: Some(vat_id.into()),
            tax_scheme: TaxSchemeRef::vat(),
        }],
        ..Default::default()
    }
}

fn base_invoice() -> UblDocument {
    UblDocument {
        ubl_version_id: Some("2.1".into()),
        profile_id: Some(PEPPOL_BILLING_PROFILE_ID.into()),
        id: Some("RE-77".into()),
        issue_date: Some(date(2024, 5, 2)),
        document_currency_code: Some("EUR".into()),
        accounting_supplier_party: SupplierParty {
            party: Some(party("Lieferant GmbH", "ATU11111111")),
            ..Default::default()
        },
        accounting_customer_party: CustomerParty {
            party: Some(party("Kunde OG", "ATU22222222")),
            ..Default::default()
        },
        payment_means: vec![PaymentMeans {
            payment_means_code: Some("31".into()),
            payment_due_date: Some(date(2024, 6, 1)),
            payee_financial_account: Some(FinancialAccount {
                id: Some("AT483200000012345864".into()),
                ..Default::default()
            }),
            ..Default::default()
        }],
        tax_totals: vec![TaxTotal {
            tax_amount: Some(dec!(10.00)),
            subtotals: vec![TaxSubtotal {
                taxable_amount: Some(dec!(50.00)),
                tax_amount: Some(dec!(10.00)),
                category: TaxCategory::vat("S", Some(dec!(20))),
            }],
        }],
        legal_monetary_total: MonetaryTotal {
            line_extension_amount: Some(dec!(50.00)),
            tax_inclusive_amount: Some(dec!(60.00)),
            payable_amount: dec!(60.00),
            ..Default::default()
        },
        lines: vec![InvoiceLine {
            id: Some("1".into()),
            quantity: Some(Quantity {
                value: dec!(2),
                unit_code: Some("C62".into()),
            }),
            line_extension_amount: dec!(50.00),
            item: Item {
                name: Some("Ware".into()),
                classified_tax_categories: vec![TaxCategory::vat("S", Some(dec!(20)))],
                ..Default::default()
            },
            ..Default::default()
        }],
        ..Default::default()
    }
}

type Breakage = fn(&mut UblDocument);

fn fixture(name: &'static str, kind: ErrorKind, breakage: Breakage) -> (&'static str, ErrorKind, Breakage) {
    (name, kind, breakage)
}

fn bad_fixtures() -> Vec<(&'static str, ErrorKind, Breakage)> {
    vec![
        fixture("missing invoice number", ErrorKind::Header, |doc| doc.id = None),
        fixture("biller without postal address", ErrorKind::Party, |doc| {
            if let Some(p) = doc.accounting_supplier_party.party.as_mut() {
                p.postal_address = None;
            }
        }),
        fixture("recipient address without town", ErrorKind::Party, |doc| {
            if let Some(address) = doc
                .accounting_customer_party
                .party
                .as_mut()
                .and_then(|p| p.postal_address.as_mut())
            {
                address.city_name = None;
            }
        }),
        fixture("unsupported tax scheme", ErrorKind::Tax, |doc| {
            doc.tax_totals[0].subtotals[0].category.tax_scheme = TaxSchemeRef::new("XYZ");
        }),
        fixture("tax category without ID", ErrorKind::Tax, |doc| {
            doc.tax_totals[0].subtotals[0].category.id = None;
        }),
        fixture("bank transfer without IBAN", ErrorKind::Payment, |doc| {
            doc.payment_means[0].payee_financial_account = None;
        }),
        fixture("invalid BIC", ErrorKind::Payment, |doc| {
            if let Some(account) = doc.payment_means[0].payee_financial_account.as_mut() {
                account.financial_institution_id = Some("NOT A BIC".into());
            }
        }),
        fixture("cash payment", ErrorKind::Payment, |doc| {
            doc.payment_means[0].payment_means_code = Some("10".into());
        }),
        fixture("discount without due date", ErrorKind::Payment, |doc| {
            doc.payment_means[0].payment_due_date = None;
            doc.payment_terms.push(PaymentTerms {
                settlement_discount_percent: Some(dec!(2)),
                settlement_period: Some(Period {
                    start_date: None,
                    end_date: Some(date(2024, 5, 16)),
                }),
                ..Default::default()
            });
        }),
        fixture("prepaid amount", ErrorKind::Monetary, |doc| {
            doc.legal_monetary_total.prepaid_amount = Some(dec!(10));
        }),
        fixture("document allowance without VAT rate", ErrorKind::GlobalAdjustment, |doc| {
            doc.allowance_charges.push(AllowanceCharge {
                charge_indicator: false,
                amount: dec!(5),
                ..Default::default()
            });
        }),
        fixture("blank order line reference", ErrorKind::Line, |doc| {
            doc.lines[0].order_line_references.push(OrderLineReference {
                line_id: Some("   ".into()),
                order_reference: None,
            });
        }),
        fixture("delivery location without country", ErrorKind::Delivery, |doc| {
            doc.deliveries.push(Delivery {
                actual_delivery_date: Some(date(2024, 5, 1)),
                location_address: Some(Address {
                    city_name: Some("Linz".into()),
                    postal_zone: Some("4020".into()),
                    ..Default::default()
                }),
                ..Default::default()
            });
        }),
    ]
}

#[test]
fn base_invoice_is_clean() {
    let mut errors = ErrorList::new();
    let invoice = UblToEbInterfaceConverter::new(english())
        .convert(&base_invoice(), &mut errors)
        .unwrap();
    assert!(invoice.is_some());
    assert!(errors.is_empty(), "{errors}");
}

#[test]
fn every_bad_fixture_is_flagged() {
    let converter = UblToEbInterfaceConverter::new(english());
    for (name, kind, breakage) in bad_fixtures() {
        let mut doc = base_invoice();
        breakage(&mut doc);

        let mut errors = ErrorList::new();
        let invoice = converter.convert(&doc, &mut errors).unwrap();

        assert!(invoice.is_some(), "{name}: document not returned");
        assert!(errors.contains_error(), "{name}: no error in\n{errors}");
        assert_eq!(errors.most_severe(), Some(ErrorLevel::Error), "{name}");
        assert!(
            errors.of_kind(kind).any(|e| e.is_error()),
            "{name}: no {kind:?} error in\n{errors}"
        );
    }
}

#[test]
fn findings_serialize_for_the_caller() {
    let mut doc = base_invoice();
    doc.legal_monetary_total.prepaid_amount = Some(dec!(10));
    let mut errors = ErrorList::new();
    UblToEbInterfaceConverter::new(english())
        .convert(&doc, &mut errors)
        .unwrap();

    let json = serde_json::to_value(&errors).unwrap();
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["level"], "Error");
    assert_eq!(entries[0]["kind"], "Monetary");
}

// ---------------------------------------------------------------------------
// Snapshot tests (insta)
// ---------------------------------------------------------------------------

#[test]
fn empty_document_findings_snapshot() {
    let doc = UblDocument {
        ubl_version_id: Some("2.1".into()),
        profile_id: Some(PEPPOL_BILLING_PROFILE_ID.into()),
        ..Default::default()
    };
    let mut errors = ErrorList::new();
    UblToEbInterfaceConverter::new(english())
        .convert(&doc, &mut errors)
        .unwrap();
    insta::assert_snapshot!("empty_document_findings", errors.to_string());
}
