//! Invoice lines, below-the-line items and allowances/charges.

use rust_decimal::Decimal;

use crate::core::CodeLists;
use crate::core::codes::DEFAULT_UNIT_CODE;
use crate::core::derive::{checked_mul, round_money};
use crate::ebinterface::{Adjustment, BelowTheLineItem, ListLineItem, OrderReferenceDetail};
use crate::ubl::{
    AllowanceCharge, CommodityClassification, InvoiceLine, Item, ItemIdentification, ItemProperty, OrderLineReference,
    OrderReference, Price, Quantity, TaxCategory,
};

use super::has_text;

const BELOW_THE_LINE_NOTE: &str = "BelowTheLineItem";
const BELOW_THE_LINE_EXEMPTION: &str = "BelowTheLine - tax already handled";

/// VAT category of a line: exempt (`E`) with its reason, else standard
/// rated (`S`) named after the tax code.
pub(crate) fn vat_category(vat_rate: Decimal, tax_code: Option<&str>, exemption: Option<&str>) -> TaxCategory {
    match exemption {
        Some(reason) => {
            let mut category = TaxCategory::vat("E", Some(Decimal::ZERO));
            if has_text(reason) {
                category.exemption_reasons.push(reason.to_string());
            }
            category
        }
        None => {
            let mut category = TaxCategory::vat("S", Some(vat_rate));
            category.name = tax_code.filter(|c| has_text(c)).map(str::to_string);
            category
        }
    }
}

pub(crate) fn map_line(source: &ListLineItem, index: usize, code_lists: &dyn CodeLists) -> InvoiceLine {
    let id = source
        .position_number
        .map_or_else(|| (index + 1).to_string(), |n| n.to_string());
    let unit_code = code_lists
        .resolve_unit_of_measure(source.quantity.unit.trim())
        .unwrap_or(DEFAULT_UNIT_CODE);

    InvoiceLine {
        id: Some(id),
        notes: Vec::new(),
        quantity: Some(Quantity {
            value: source.quantity.value,
            unit_code: Some(unit_code.to_string()),
        }),
        line_extension_amount: source.line_item_amount,
        order_line_references: source
            .recipients_order_reference
            .as_ref()
            .and_then(map_order_line_reference)
            .into_iter()
            .collect(),
        deliveries: source.delivery.iter().map(super::party::map_delivery).collect(),
        allowance_charges: source.reductions_and_surcharges.iter().map(map_adjustment).collect(),
        tax_totals: Vec::new(),
        item: map_item(source),
        price: Some(Price {
            price_amount: source.unit_price.value,
            base_quantity: source.unit_price.base_quantity,
        }),
    }
}

/// Article numbers become manufacturer identifications issued by their
/// type; the additional information becomes commodity classifications and
/// named item properties.
fn map_item(source: &ListLineItem) -> Item {
    let mut item = Item {
        name: source.descriptions.first().cloned(),
        descriptions: source.descriptions.clone(),
        manufacturers_item_identifications: source
            .article_numbers
            .iter()
            .filter(|a| has_text(&a.value))
            .map(|a| ItemIdentification {
                id: a.value.clone(),
                issuer_party_id: a.kind.map(|k| k.as_str().to_string()),
            })
            .collect(),
        classified_tax_categories: vec![vat_category(
            source.vat_rate,
            source.tax_code.as_deref(),
            source.tax_exemption.as_deref(),
        )],
        ..Default::default()
    };

    let Some(info) = &source.additional_information else {
        return item;
    };
    let mut property = |name: &str, value: String| {
        item.additional_item_properties.push(ItemProperty {
            name: name.to_string(),
            value,
        });
    };
    for serial in &info.serial_numbers {
        property("SerialNumber", serial.clone());
    }
    for charge in &info.charge_numbers {
        property("ChargeNumber", charge.clone());
    }
    if let Some(quantity) = &info.alternative_quantity {
        property("AlternativeQuantity", quantity.value.to_string());
    }
    if let Some(size) = &info.size {
        property("Size", size.clone());
    }
    if let Some(weight) = &info.weight {
        property("Weight", weight.value.to_string());
    }
    if let Some(boxes) = info.boxes {
        property("Boxes", boxes.to_string());
    }
    if let Some(color) = &info.color {
        property("Color", color.clone());
    }
    item.commodity_classifications = info
        .classifications
        .iter()
        .map(|c| CommodityClassification {
            item_classification_code: c.value.clone(),
            name: c.schema.clone(),
        })
        .collect();
    item
}

/// A below-the-line item as a tax exempt line with ID `BTL<n>`.
pub(crate) fn map_below_the_line(source: &BelowTheLineItem, index: usize) -> InvoiceLine {
    let mut category = TaxCategory::vat("E", Some(Decimal::ZERO));
    category.exemption_reasons.push(BELOW_THE_LINE_EXEMPTION.to_string());

    InvoiceLine {
        id: Some(format!("BTL{}", index + 1)),
        notes: vec![BELOW_THE_LINE_NOTE.to_string()],
        quantity: Some(Quantity {
            value: Decimal::ONE,
            unit_code: Some(DEFAULT_UNIT_CODE.to_string()),
        }),
        line_extension_amount: source.line_item_amount,
        item: Item {
            descriptions: has_text(&source.description)
                .then(|| source.description.clone())
                .into_iter()
                .collect(),
            classified_tax_categories: vec![category],
            ..Default::default()
        },
        price: Some(Price {
            price_amount: source.line_item_amount,
            base_quantity: Some(Decimal::ONE),
        }),
        ..Default::default()
    }
}

fn map_order_line_reference(source: &OrderReferenceDetail) -> Option<OrderLineReference> {
    let order_reference = (source.order_id.is_some() || source.reference_date.is_some()).then(|| OrderReference {
        id: source.order_id.clone(),
        issue_date: source.reference_date,
    });
    if order_reference.is_none() && source.order_position_number.is_none() {
        return None;
    }
    Some(OrderLineReference {
        line_id: source.order_position_number.clone(),
        order_reference,
    })
}

/// Explicit amount of an adjustment, else base × percentage. `None` when
/// neither is known or the product leaves the decimal range.
pub(crate) fn adjustment_amount(adjustment: &Adjustment) -> Option<Decimal> {
    adjustment.amount().or_else(|| {
        let product = checked_mul(adjustment.base_amount(), adjustment.percentage()?).ok()?;
        Some(round_money(product / Decimal::ONE_HUNDRED))
    })
}

/// Reductions become allowances, surcharges and other VAT-able taxes
/// charges. The tax ID of another tax is kept as reason code.
pub(crate) fn map_adjustment(adjustment: &Adjustment) -> AllowanceCharge {
    let reason_code = match adjustment {
        Adjustment::OtherVatableTax(tax) => tax.tax_id.clone().filter(|id| has_text(id)),
        _ => None,
    };
    let mut charge = AllowanceCharge {
        charge_indicator: adjustment.is_surcharge(),
        reason_code,
        reasons: adjustment
            .comment()
            .filter(|c| has_text(c))
            .map(str::to_string)
            .into_iter()
            .collect(),
        multiplier_factor_numeric: adjustment.percentage().map(|p| p / Decimal::ONE_HUNDRED),
        amount: adjustment_amount(adjustment).unwrap_or_default(),
        base_amount: Some(adjustment.base_amount()),
        tax_categories: Vec::new(),
    };
    if let Some(rate) = adjustment.vat_rate() {
        charge.tax_categories.push(TaxCategory::vat("S", Some(rate)));
    }
    charge
}
