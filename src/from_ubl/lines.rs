//! Invoice lines to `ListLineItem`s.

use rust_decimal::Decimal;

use crate::core::codes::{DEFAULT_UNIT_CODE, VAT_TAX_SCHEME_ID};
use crate::core::derive::{Overflow, checked_add, checked_mul, checked_sub, price_per_unit, round_money, unit_price_from};
use crate::core::{ErrorKind, ErrorList, Text};
use crate::ebinterface::{Adjustment, AdjustmentEntry, ListLineItem, OrderReferenceDetail, Quantity, UnitPrice};
use crate::ubl::{AllowanceCharge, InvoiceLine, TaxCategory, UblDocument};

use super::allowances::allowance_comment;
use super::delivery::map_delivery;
use super::tax::{TaxCategoryKey, TaxCategoryPercentageMap};
use super::{ConversionHook, MappingContext, non_blank};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

pub(crate) fn map_lines(
    doc: &UblDocument,
    percentages: &TaxCategoryPercentageMap,
    order_id: Option<&str>,
    hook: Option<&dyn ConversionHook>,
    ctx: &MappingContext<'_>,
    errors: &mut ErrorList,
) -> Vec<ListLineItem> {
    let mut items = Vec::with_capacity(doc.lines.len());
    for (index, line) in doc.lines.iter().enumerate() {
        let path = format!("{}[{}]", doc.kind.line_element(), index + 1);
        let mut item = map_line(doc, line, index, &path, percentages, order_id, ctx, errors);
        if let Some(hook) = hook {
            hook.on_line_mapped(line, &mut item);
        }
        items.push(item);
    }
    items
}

#[allow(clippy::too_many_arguments)]
fn map_line(
    doc: &UblDocument,
    line: &InvoiceLine,
    index: usize,
    path: &str,
    percentages: &TaxCategoryPercentageMap,
    order_id: Option<&str>,
    ctx: &MappingContext<'_>,
    errors: &mut ErrorList,
) -> ListLineItem {
    let tax_category = line_tax_category(line);
    let vat_rate = match tax_category.and_then(|c| line_percentage(c, percentages)) {
        Some(rate) => rate,
        None => {
            ctx.warn(
                errors,
                ErrorKind::Line,
                format!("{path}/Item/ClassifiedTaxCategory"),
                Text::LineTaxPercentageNotFound(Decimal::ZERO),
            );
            Decimal::ZERO
        }
    };

    let position_number = position_number(line, index, path, ctx, errors);
    let quantity = map_quantity(doc, line, path, ctx, errors);
    let unit_price = map_unit_price(line, quantity.value, path, ctx, errors);

    let start_base = match price_per_unit(unit_price.value, unit_price.base_quantity)
        .and_then(|per_unit| checked_mul(quantity.value, per_unit))
    {
        Ok(base) => base,
        Err(Overflow) => {
            ctx.error(errors, ErrorKind::Line, format!("{path}/Price"), Text::ArithmeticOverflow);
            Decimal::ZERO
        }
    };

    ListLineItem {
        position_number: Some(position_number),
        descriptions: descriptions(line),
        quantity,
        unit_price,
        vat_rate,
        tax_code: non_blank(tax_category.and_then(|c| c.name.as_deref())),
        tax_exemption: None,
        line_item_amount: round_money(line.line_extension_amount),
        reductions_and_surcharges: map_line_adjustments(&line.allowance_charges, start_base, path, ctx, errors),
        recipients_order_reference: map_order_line_reference(line, order_id, path, ctx, errors),
        delivery: line
            .deliveries
            .first()
            .filter(|d| d.actual_delivery_date.is_some())
            .map(|d| map_delivery(doc, d, &format!("{path}/Delivery[1]"), ctx, errors)),
        article_numbers: Vec::new(),
        additional_information: None,
    }
}

/// First classified tax category, else the first VAT category of the
/// line's own tax subtotals.
fn line_tax_category(line: &InvoiceLine) -> Option<&TaxCategory> {
    line.item.classified_tax_categories.first().or_else(|| {
        line.tax_totals
            .iter()
            .flat_map(|t| &t.subtotals)
            .map(|s| &s.category)
            .find(|c| c.tax_scheme.id.value.trim() == VAT_TAX_SCHEME_ID)
    })
}

/// Percentage of the category itself, else the one recorded in the tax summary.
fn line_percentage(category: &TaxCategory, percentages: &TaxCategoryPercentageMap) -> Option<Decimal> {
    category.percent.or_else(|| {
        TaxCategoryKey::of(category)
            .and_then(|key| percentages.get(&key).copied())
            .flatten()
    })
}

fn position_number(
    line: &InvoiceLine,
    index: usize,
    path: &str,
    ctx: &MappingContext<'_>,
    errors: &mut ErrorList,
) -> u64 {
    let raw = line.id.as_deref().map(str::trim).unwrap_or_default();
    match raw.parse::<u64>() {
        Ok(n) => n,
        Err(_) => {
            let fallback = index as u64 + 1;
            ctx.warn(
                errors,
                ErrorKind::Line,
                format!("{path}/ID"),
                Text::InvalidPositionNumber(raw.to_string(), fallback),
            );
            fallback
        }
    }
}

fn map_quantity(
    doc: &UblDocument,
    line: &InvoiceLine,
    path: &str,
    ctx: &MappingContext<'_>,
    errors: &mut ErrorList,
) -> Quantity {
    let quantity_path = format!("{path}/{}", doc.kind.quantity_element());

    let unit = match non_blank(line.quantity.as_ref().and_then(|q| q.unit_code.as_deref())) {
        Some(unit) => {
            if ctx.code_lists.resolve_unit_of_measure(&unit).is_none() {
                ctx.warn(
                    errors,
                    ErrorKind::Line,
                    format!("{quantity_path}/UnitCode"),
                    Text::UnknownUnit(unit.clone()),
                );
            }
            unit
        }
        None => {
            ctx.warn(
                errors,
                ErrorKind::Line,
                format!("{quantity_path}/UnitCode"),
                Text::MissingUnit(DEFAULT_UNIT_CODE.to_string()),
            );
            DEFAULT_UNIT_CODE.to_string()
        }
    };

    let value = match &line.quantity {
        Some(q) => q.value,
        None => {
            ctx.warn(errors, ErrorKind::Line, quantity_path, Text::MissingQuantity(Decimal::ONE));
            Decimal::ONE
        }
    };

    Quantity { unit, value }
}

/// Explicit price, else the line amount divided by the quantity.
///
/// A quotient out of range is reported on the missing price and becomes zero.
fn map_unit_price(
    line: &InvoiceLine,
    quantity: Decimal,
    path: &str,
    ctx: &MappingContext<'_>,
    errors: &mut ErrorList,
) -> UnitPrice {
    match &line.price {
        Some(price) => UnitPrice {
            value: if price.base_quantity.is_some_and(|bq| bq.is_zero()) {
                Decimal::ZERO
            } else {
                price.price_amount
            },
            base_quantity: price.base_quantity,
        },
        None => UnitPrice {
            value: unit_price_from(line.line_extension_amount, quantity).unwrap_or_else(|Overflow| {
                ctx.error(errors, ErrorKind::Line, format!("{path}/Price"), Text::ArithmeticOverflow);
                Decimal::ZERO
            }),
            base_quantity: None,
        },
    }
}

/// Item descriptions (or the item name) followed by the line notes.
fn descriptions(line: &InvoiceLine) -> Vec<String> {
    let mut out: Vec<String> = line
        .item
        .descriptions
        .iter()
        .filter_map(|d| non_blank(Some(d.as_str())))
        .collect();
    if out.is_empty() {
        out.extend(non_blank(line.item.name.as_deref()));
    }
    out.extend(line.notes.iter().filter_map(|n| non_blank(Some(n.as_str()))));
    out
}

/// Line level reductions and surcharges.
///
/// A line holds either reductions or surcharges. The first entry decides
/// which; entries of the other direction are kept with negated amount and
/// percentage. The base amount of entries without one is the running line
/// base, which starts at `start_base` and moves by every entry's amount.
/// Once the running base leaves the decimal range it is reported and later
/// entries without their own base get zero.
pub(crate) fn map_line_adjustments(
    charges: &[AllowanceCharge],
    start_base: Decimal,
    path: &str,
    ctx: &MappingContext<'_>,
    errors: &mut ErrorList,
) -> Vec<Adjustment> {
    let Some(first) = charges.first() else {
        return Vec::new();
    };
    let surcharge = first.charge_indicator;
    let mut running_base = Some(start_base);
    let mut out = Vec::with_capacity(charges.len());

    for (index, charge) in charges.iter().enumerate() {
        let charge_path = format!("{path}/AllowanceCharge[{}]", index + 1);
        let flip = |value: Decimal| {
            if charge.charge_indicator != surcharge {
                -value
            } else {
                value
            }
        };
        let amount = flip(charge.amount);

        let percentage = match charge.multiplier_factor_numeric.map(|m| checked_mul(m, HUNDRED)).transpose() {
            Ok(percentage) => percentage.map(flip),
            Err(Overflow) => {
                ctx.error(
                    errors,
                    ErrorKind::Line,
                    format!("{charge_path}/MultiplierFactorNumeric"),
                    Text::ArithmeticOverflow,
                );
                None
            }
        };

        let entry = AdjustmentEntry {
            base_amount: charge.base_amount.or(running_base).unwrap_or_default(),
            percentage,
            amount: Some(amount),
            comment: allowance_comment(charge),
            vat_rate: None,
        };

        if let Some(base) = running_base {
            let moved = if surcharge {
                checked_add(base, amount)
            } else {
                checked_sub(base, amount)
            };
            running_base = moved.ok();
            if running_base.is_none() {
                ctx.error(errors, ErrorKind::Line, format!("{charge_path}/Amount"), Text::ArithmeticOverflow);
            }
        }

        out.push(if surcharge {
            Adjustment::Surcharge(entry)
        } else {
            Adjustment::Reduction(entry)
        });
    }
    out
}

fn map_order_line_reference(
    line: &InvoiceLine,
    document_order_id: Option<&str>,
    path: &str,
    ctx: &MappingContext<'_>,
    errors: &mut ErrorList,
) -> Option<OrderReferenceDetail> {
    let reference = line
        .order_line_references
        .iter()
        .find(|r| r.line_id.as_deref().is_some_and(|id| !id.is_empty()))?;

    let order_position_number = non_blank(reference.line_id.as_deref());
    if order_position_number.is_none() {
        ctx.error(
            errors,
            ErrorKind::Line,
            format!("{path}/OrderLineReference/LineID"),
            Text::OrderLineReferenceIdEmpty,
        );
    }

    let own_order = reference.order_reference.as_ref();
    Some(OrderReferenceDetail {
        order_id: non_blank(own_order.and_then(|o| o.id.as_deref())).or_else(|| document_order_id.map(str::to_string)),
        reference_date: own_order.and_then(|o| o.issue_date),
        order_position_number,
    })
}
