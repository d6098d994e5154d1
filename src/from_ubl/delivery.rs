//! Delivery on document and line level.

use crate::core::{ErrorKind, ErrorList, Text};
use crate::ebinterface::{Delivery, Period};
use crate::ubl::{self, UblDocument};

use super::party::map_postal_address;
use super::{MappingContext, non_blank};

/// Delivery date and location of one UBL delivery.
///
/// The address is named after the delivery party, else after the customer.
pub(crate) fn map_delivery(
    doc: &UblDocument,
    delivery: &ubl::Delivery,
    path: &str,
    ctx: &MappingContext<'_>,
    errors: &mut ErrorList,
) -> Delivery {
    let address = delivery.location_address.as_ref().map(|location| {
        let mut address = map_postal_address(
            location,
            &format!("{path}/DeliveryLocation/Address"),
            ErrorKind::Delivery,
            ctx,
            errors,
        );
        address.name = non_blank(delivery.delivery_party_name.as_deref()).or_else(|| {
            doc.accounting_customer_party
                .party
                .as_ref()
                .and_then(|p| p.names.iter().find_map(|n| non_blank(Some(n.as_str()))))
        });
        address
    });

    Delivery {
        date: delivery.actual_delivery_date,
        period: None,
        address,
    }
}

/// Document delivery: the first delivery with a date, completed by the
/// first invoice period.
///
/// A period with start and end replaces the date; a start date alone is only
/// used when no delivery date is known. Without date and period there is no
/// delivery, which strict mode reports.
pub(crate) fn map_document_delivery(
    doc: &UblDocument,
    ctx: &MappingContext<'_>,
    errors: &mut ErrorList,
) -> Option<Delivery> {
    let mut delivery = doc
        .deliveries
        .iter()
        .enumerate()
        .find(|(_, d)| d.actual_delivery_date.is_some())
        .map(|(i, d)| map_delivery(doc, d, &format!("Delivery[{}]", i + 1), ctx, errors))
        .unwrap_or_default();

    if let Some(period) = doc.invoice_periods.first() {
        match (period.start_date, period.end_date) {
            (Some(start), None) => {
                delivery.date.get_or_insert(start);
            }
            (Some(from_date), Some(to_date)) => {
                delivery.period = Some(Period { from_date, to_date });
                delivery.date = None;
            }
            _ => {}
        }
    }

    if delivery.has_date_or_period() {
        Some(delivery)
    } else {
        if ctx.config.strict_erb {
            ctx.error(errors, ErrorKind::Delivery, doc.kind.root_element(), Text::NoDeliveryDate);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConverterConfig, Language, StandardCodeLists};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn run(doc: &UblDocument, strict: bool) -> (Option<Delivery>, ErrorList) {
        let config = ConverterConfig {
            strict_erb: strict,
            ..Default::default()
        };
        let ctx = MappingContext {
            config: &config,
            code_lists: &StandardCodeLists,
            language: Language::English,
        };
        let mut errors = ErrorList::new();
        let delivery = map_document_delivery(doc, &ctx, &mut errors);
        (delivery, errors)
    }

    #[test]
    fn first_dated_delivery_with_address() {
        let mut doc = UblDocument {
            deliveries: vec![
                ubl::Delivery::default(),
                ubl::Delivery {
                    actual_delivery_date: Some(date(2024, 6, 10)),
                    location_address: Some(ubl::Address {
                        city_name: Some("Graz".into()),
                        postal_zone: Some("8010".into()),
                        country_code: Some("AT".into()),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        doc.accounting_customer_party.party = Some(ubl::Party {
            names: vec!["Kunde AG".into()],
            ..Default::default()
        });
        let (delivery, errors) = run(&doc, false);
        let delivery = delivery.unwrap();
        assert!(errors.is_empty(), "{errors}");
        assert_eq!(delivery.date, Some(date(2024, 6, 10)));
        assert_eq!(delivery.address.unwrap().name.as_deref(), Some("Kunde AG"));
    }

    #[test]
    fn invoice_period_start_only_fills_missing_date() {
        let doc = UblDocument {
            invoice_periods: vec![ubl::Period {
                start_date: Some(date(2024, 6, 1)),
                end_date: None,
            }],
            ..Default::default()
        };
        let (delivery, _) = run(&doc, false);
        assert_eq!(delivery.unwrap().date, Some(date(2024, 6, 1)));
    }

    #[test]
    fn invoice_period_replaces_date() {
        let doc = UblDocument {
            deliveries: vec![ubl::Delivery {
                actual_delivery_date: Some(date(2024, 6, 10)),
                ..Default::default()
            }],
            invoice_periods: vec![ubl::Period {
                start_date: Some(date(2024, 6, 1)),
                end_date: Some(date(2024, 6, 30)),
            }],
            ..Default::default()
        };
        let delivery = run(&doc, false).0.unwrap();
        assert!(delivery.date.is_none());
        assert_eq!(
            delivery.period,
            Some(Period {
                from_date: date(2024, 6, 1),
                to_date: date(2024, 6, 30)
            })
        );
    }

    #[test]
    fn strict_requires_delivery() {
        let (delivery, errors) = run(&UblDocument::default(), true);
        assert!(delivery.is_none());
        assert_eq!(errors.len(), 1);
        let (_, errors) = run(&UblDocument::default(), false);
        assert!(errors.is_empty());
    }
}
