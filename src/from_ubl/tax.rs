//! Tax summary: VAT items, other taxes and the percentage lookup used by
//! the line mapper.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::derive::{Overflow, TaxTriple, round_money};
use crate::core::{ErrorKind, ErrorList, Text};
use crate::ebinterface::{OtherTax, Tax, VatItem};
use crate::ubl::{Identifier, TaxCategory, UblDocument};

use super::{MappingContext, non_blank};

/// An identifier value together with its `schemeID`, both trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemedId {
    pub value: String,
    pub scheme_id: Option<String>,
}

impl From<&Identifier> for SchemedId {
    fn from(id: &Identifier) -> Self {
        Self {
            value: id.value.trim().to_string(),
            scheme_id: id
                .scheme_id
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }
}

/// Identity of a tax category across the document: tax scheme plus
/// category code, each with its scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxCategoryKey {
    pub tax_scheme: SchemedId,
    pub tax_category: SchemedId,
}

impl TaxCategoryKey {
    /// Key of `category`, `None` if the category has no ID.
    pub fn of(category: &TaxCategory) -> Option<Self> {
        let id = category.id.as_ref().filter(|id| !id.value.trim().is_empty())?;
        Some(Self {
            tax_scheme: SchemedId::from(&category.tax_scheme.id),
            tax_category: SchemedId::from(id),
        })
    }
}

/// Percentage of every tax category named in the tax summary.
pub type TaxCategoryPercentageMap = HashMap<TaxCategoryKey, Option<Decimal>>;

#[derive(Debug, Default)]
pub(crate) struct TaxMapping {
    pub tax: Tax,
    pub percentages: TaxCategoryPercentageMap,
}

pub(crate) fn map_tax(doc: &UblDocument, ctx: &MappingContext<'_>, errors: &mut ErrorList) -> TaxMapping {
    let mut mapping = TaxMapping::default();

    for (i, total) in doc.tax_totals.iter().enumerate() {
        for (j, subtotal) in total.subtotals.iter().enumerate() {
            let path = format!("TaxTotal[{}]/TaxSubtotal[{}]", i + 1, j + 1);
            let category = &subtotal.category;

            let Some(key) = TaxCategoryKey::of(category) else {
                // Only this subtotal is skipped, the rest of the total is still read.
                ctx.error(errors, ErrorKind::Tax, format!("{path}/TaxCategory/ID"), Text::MissingTaxCategoryId);
                continue;
            };

            let triple = match TaxTriple::new(subtotal.tax_amount, subtotal.taxable_amount, category.percent).derive() {
                Ok(triple) => triple,
                Err(Overflow) => {
                    ctx.error(errors, ErrorKind::Tax, path, Text::ArithmeticOverflow);
                    mapping.percentages.insert(key, category.percent);
                    continue;
                }
            };
            mapping.percentages.insert(key.clone(), triple.percentage);

            let scheme_id = key.tax_scheme.value.as_str();
            let Some(scheme) = ctx.code_lists.resolve_tax_scheme(scheme_id) else {
                ctx.error(
                    errors,
                    ErrorKind::Tax,
                    format!("{path}/TaxCategory/TaxScheme/ID"),
                    Text::UnsupportedTaxScheme(scheme_id.to_string()),
                );
                continue;
            };

            if scheme.is_vat() {
                if let Some(item) = vat_item(&triple, category, &path, ctx, errors) {
                    mapping.tax.vat_items.push(item);
                }
            } else {
                match triple.amount {
                    Some(amount) => mapping.tax.other_taxes.push(OtherTax {
                        comment: Some(scheme_id.to_string()),
                        amount: round_money(amount),
                    }),
                    None => ctx.error(errors, ErrorKind::Tax, format!("{path}/TaxAmount"), Text::TaxAmountMissing),
                }
            }
        }
    }
    mapping
}

fn vat_item(
    triple: &TaxTriple,
    category: &TaxCategory,
    path: &str,
    ctx: &MappingContext<'_>,
    errors: &mut ErrorList,
) -> Option<VatItem> {
    let Some(percentage) = triple.percentage else {
        ctx.error(errors, ErrorKind::Tax, format!("{path}/TaxCategory/Percent"), Text::TaxPercentMissing);
        return None;
    };
    let Some(base) = triple.taxable_base else {
        ctx.error(errors, ErrorKind::Tax, format!("{path}/TaxableAmount"), Text::TaxableAmountMissing);
        return None;
    };
    let amount = triple.amount.unwrap_or_default();
    Some(VatItem {
        taxed_amount: round_money(base),
        vat_rate: percentage,
        tax_code: non_blank(category.name.as_deref()),
        tax_exemption: None,
        amount: round_money(amount),
    })
}
