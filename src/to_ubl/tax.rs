//! Tax total of the produced document.

use crate::core::codes::OTHER_TAX_SCHEME_ID;
use crate::core::derive::checked_sum;
use crate::ebinterface::Tax;
use crate::ubl::{TaxCategory, TaxSchemeRef, TaxSubtotal, TaxTotal};

use super::has_text;
use super::lines::vat_category;

/// One subtotal per VAT item and per other tax; the total is their sum.
///
/// Other taxes carry no category code, only the `OTH` scheme named after
/// the tax's comment.
pub(crate) fn map_tax_total(tax: &Tax) -> TaxTotal {
    let mut subtotals = Vec::with_capacity(tax.vat_items.len() + tax.other_taxes.len());

    for item in &tax.vat_items {
        subtotals.push(TaxSubtotal {
            taxable_amount: Some(item.taxed_amount),
            tax_amount: Some(item.amount),
            category: vat_category(item.vat_rate, item.tax_code.as_deref(), item.tax_exemption.as_deref()),
        });
    }

    for other in &tax.other_taxes {
        let mut scheme = TaxSchemeRef::new(OTHER_TAX_SCHEME_ID);
        scheme.name = other.comment.clone().filter(|c| has_text(c));
        subtotals.push(TaxSubtotal {
            taxable_amount: None,
            tax_amount: Some(other.amount),
            category: TaxCategory {
                tax_scheme: scheme,
                ..Default::default()
            },
        });
    }

    let sum = checked_sum(
        tax.vat_items
            .iter()
            .map(|i| i.amount)
            .chain(tax.other_taxes.iter().map(|t| t.amount)),
    );

    TaxTotal {
        tax_amount: sum.ok(),
        subtotals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ebinterface::{OtherTax, VatItem};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn vat_and_other_taxes() {
        let tax = Tax {
            vat_items: vec![
                VatItem {
                    taxed_amount: dec!(100),
                    vat_rate: dec!(20),
                    tax_code: None,
                    tax_exemption: None,
                    amount: dec!(20),
                },
                VatItem {
                    taxed_amount: dec!(50),
                    vat_rate: Decimal::ZERO,
                    tax_code: None,
                    tax_exemption: Some("steuerfrei".into()),
                    amount: Decimal::ZERO,
                },
            ],
            other_taxes: vec![OtherTax {
                comment: Some("Ortstaxe".into()),
                amount: dec!(2.50),
            }],
        };
        let total = map_tax_total(&tax);
        assert_eq!(total.tax_amount, Some(dec!(22.50)));
        assert_eq!(total.subtotals.len(), 3);

        let standard = &total.subtotals[0];
        assert_eq!(standard.category.id.as_ref().unwrap().value, "S");
        assert_eq!(standard.taxable_amount, Some(dec!(100)));

        let exempt = &total.subtotals[1].category;
        assert_eq!(exempt.id.as_ref().unwrap().value, "E");
        assert_eq!(exempt.exemption_reasons, vec!["steuerfrei".to_string()]);

        let other = &total.subtotals[2];
        assert!(other.category.id.is_none());
        assert_eq!(other.category.tax_scheme.id.value, "OTH");
        assert_eq!(other.category.tax_scheme.name.as_deref(), Some("Ortstaxe"));
        assert_eq!(other.tax_amount, Some(dec!(2.50)));
    }

    #[test]
    fn empty_tax_sums_to_zero() {
        let total = map_tax_total(&Tax::default());
        assert!(total.subtotals.is_empty());
        assert_eq!(total.tax_amount, Some(Decimal::ZERO));
    }
}
