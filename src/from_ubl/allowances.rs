//! Document level allowances and charges.

use rust_decimal::Decimal;

use crate::core::derive::{Overflow, checked_add, checked_mul, checked_sub, checked_sum};
use crate::core::{ErrorKind, ErrorList, Text};
use crate::ebinterface::{Adjustment, AdjustmentEntry, ListLineItem};
use crate::ubl::{AllowanceCharge, UblDocument};

use super::{MappingContext, join_lines, non_blank};

/// Free text of an allowance or charge: its reasons, else its reason code.
pub(crate) fn allowance_comment(charge: &AllowanceCharge) -> Option<String> {
    join_lines(&charge.reasons).or_else(|| non_blank(charge.reason_code.as_deref()))
}

/// Map the document allowances and charges.
///
/// Unlike on line level every entry keeps its own direction. The running
/// base starts at the sum of all lines.
pub(crate) fn map_global_adjustments(
    doc: &UblDocument,
    lines: &[ListLineItem],
    ctx: &MappingContext<'_>,
    errors: &mut ErrorList,
) -> Vec<Adjustment> {
    if doc.allowance_charges.is_empty() {
        return Vec::new();
    }

    let root = doc.kind.root_element();
    let mut running_base = match doc.legal_monetary_total.line_extension_amount {
        Some(total) => Some(total),
        None => checked_sum(lines.iter().map(|l| l.line_item_amount)).ok(),
    };
    if running_base.is_none() {
        ctx.error(
            errors,
            ErrorKind::GlobalAdjustment,
            format!("{root}/LegalMonetaryTotal/LineExtensionAmount"),
            Text::ArithmeticOverflow,
        );
    }

    let mut out = Vec::with_capacity(doc.allowance_charges.len());
    for (index, charge) in doc.allowance_charges.iter().enumerate() {
        let path = format!("{root}/AllowanceCharge[{}]", index + 1);
        let vat_rate = charge.tax_categories.iter().find_map(|c| c.percent);
        if vat_rate.is_none() {
            ctx.error(errors, ErrorKind::GlobalAdjustment, path.clone(), Text::AllowanceChargeNoTaxRate);
        }

        let percentage = match charge
            .multiplier_factor_numeric
            .map(|m| checked_mul(m, Decimal::ONE_HUNDRED))
            .transpose()
        {
            Ok(percentage) => percentage,
            Err(Overflow) => {
                ctx.error(
                    errors,
                    ErrorKind::GlobalAdjustment,
                    format!("{path}/MultiplierFactorNumeric"),
                    Text::ArithmeticOverflow,
                );
                None
            }
        };

        let entry = AdjustmentEntry {
            base_amount: charge.base_amount.or(running_base).unwrap_or_default(),
            percentage,
            amount: Some(charge.amount),
            comment: allowance_comment(charge),
            vat_rate,
        };

        if let Some(base) = running_base {
            let moved = if charge.charge_indicator {
                checked_add(base, charge.amount)
            } else {
                checked_sub(base, charge.amount)
            };
            running_base = moved.ok();
            if running_base.is_none() {
                ctx.error(
                    errors,
                    ErrorKind::GlobalAdjustment,
                    format!("{path}/Amount"),
                    Text::ArithmeticOverflow,
                );
            }
        }

        out.push(if charge.charge_indicator {
            Adjustment::Surcharge(entry)
        } else {
            Adjustment::Reduction(entry)
        });
    }
    out
}
