//! Payment method and payment conditions.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::codes::PaymentMeansCode;
use crate::core::{ErrorKind, ErrorList, Text};
use crate::ebinterface::{
    Account, BankTransaction, Discount, PaymentConditions, PaymentMethod, PaymentMethodKind,
};
use crate::ubl::{PaymentMeans, UblDocument};

use super::{MappingContext, join_lines, non_blank, truncate_chars};

const IBAN_MAX_LENGTH: usize = 34;
const PAYMENT_REFERENCE_MAX_LENGTH: usize = 35;
const PAYMENT_CHANNEL_CODE_IBAN: &str = "IBAN";

#[derive(Debug, Default)]
pub(crate) struct PaymentMapping {
    pub method: Option<PaymentMethod>,
    pub conditions: Option<PaymentConditions>,
}

pub(crate) fn map_payment(
    doc: &UblDocument,
    payable: Decimal,
    ctx: &MappingContext<'_>,
    errors: &mut ErrorList,
) -> PaymentMapping {
    let (method, due_date) = map_payment_method(doc, payable, ctx, errors);
    if ctx.config.strict_erb && method.is_none() {
        ctx.error(errors, ErrorKind::Payment, doc.kind.root_element(), Text::NoPaymentMethod);
    }
    PaymentMapping {
        method,
        conditions: map_payment_conditions(doc, due_date, ctx, errors),
    }
}

/// First supported payment means wins. The due date is only taken from a
/// bank transfer or direct debit.
fn map_payment_method(
    doc: &UblDocument,
    payable: Decimal,
    ctx: &MappingContext<'_>,
    errors: &mut ErrorList,
) -> (Option<PaymentMethod>, Option<NaiveDate>) {
    for (index, means) in doc.payment_means.iter().enumerate() {
        let path = format!("PaymentMeans[{}]", index + 1);
        let raw_code = means.payment_means_code.as_deref().map(str::trim).unwrap_or_default();
        let code = ctx.code_lists.resolve_payment_means_code(raw_code);

        match code {
            Some(code) if code.is_bank_transfer() => {
                let channel = non_blank(means.payment_channel_code.as_deref());
                match channel.as_deref() {
                    None | Some(PAYMENT_CHANNEL_CODE_IBAN) => {
                        let transaction = bank_transaction(doc, means, &path, ctx, errors);
                        let method = PaymentMethod {
                            comment: join_lines(&means.instruction_notes),
                            kind: PaymentMethodKind::UniversalBankTransaction(transaction),
                        };
                        return (Some(method), means.payment_due_date);
                    }
                    Some(other) => ctx.warn(
                        errors,
                        ErrorKind::Payment,
                        path,
                        Text::UnsupportedChannelCode(other.to_string()),
                    ),
                }
            }
            Some(PaymentMeansCode::DirectDebit) => {
                let method = PaymentMethod {
                    comment: join_lines(&means.instruction_notes),
                    kind: PaymentMethodKind::DirectDebit,
                };
                return (Some(method), means.payment_due_date);
            }
            _ if payable.is_zero() => {
                let method = PaymentMethod {
                    comment: join_lines(&means.instruction_notes),
                    kind: PaymentMethodKind::NoPayment,
                };
                return (Some(method), None);
            }
            _ => ctx.error(
                errors,
                ErrorKind::Payment,
                path,
                Text::UnsupportedPaymentMeans(raw_code.to_string()),
            ),
        }
    }
    (None, None)
}

fn bank_transaction(
    doc: &UblDocument,
    means: &PaymentMeans,
    path: &str,
    ctx: &MappingContext<'_>,
    errors: &mut ErrorList,
) -> BankTransaction {
    // Every ID is checked; the last non-blank one is the reference.
    let mut payment_reference = None;
    for (i, id) in means.payment_ids.iter().enumerate() {
        let Some(id) = non_blank(Some(id.as_str())) else {
            continue;
        };
        let (cut, truncated) = truncate_chars(&id, PAYMENT_REFERENCE_MAX_LENGTH);
        if truncated {
            ctx.warn(
                errors,
                ErrorKind::Payment,
                format!("{path}/PaymentID[{}]", i + 1),
                Text::PaymentIdTooLong(id, PAYMENT_REFERENCE_MAX_LENGTH),
            );
        }
        payment_reference = Some(cut);
    }

    let account = means.payee_financial_account.as_ref();

    let bic = account
        .and_then(|a| a.financial_institution_id.as_deref())
        .map(str::trim)
        .and_then(|bic| {
            if is_valid_bic(bic) {
                Some(bic.to_string())
            } else {
                ctx.error(
                    errors,
                    ErrorKind::Payment,
                    format!("{path}/PayeeFinancialAccount/FinancialInstitutionBranch/FinancialInstitution/ID"),
                    Text::BicInvalid(bic.to_string()),
                );
                None
            }
        });

    let iban_path = format!("{path}/PayeeFinancialAccount/ID");
    let iban = match non_blank(account.and_then(|a| a.id.as_deref())) {
        None => {
            ctx.error(errors, ErrorKind::Payment, iban_path, Text::IbanMissing);
            None
        }
        Some(iban) => {
            let (cut, truncated) = truncate_chars(&iban, IBAN_MAX_LENGTH);
            if truncated {
                ctx.warn(
                    errors,
                    ErrorKind::Payment,
                    iban_path.as_str(),
                    Text::IbanTooLong(iban.clone(), IBAN_MAX_LENGTH),
                );
            }
            if !looks_like_iban(&cut) {
                ctx.warn(errors, ErrorKind::Payment, iban_path, Text::IbanMalformed(cut.clone()));
            }
            Some(cut)
        }
    };

    BankTransaction {
        payment_reference,
        beneficiary_account: Account {
            bic,
            iban,
            bank_account_owner: bank_account_owner(doc),
        },
    }
}

/// Payee party name, else supplier party name.
fn bank_account_owner(doc: &UblDocument) -> Option<String> {
    let first_name = |party: Option<&crate::ubl::Party>| {
        party.and_then(|p| p.names.iter().find_map(|n| non_blank(Some(n.as_str()))))
    };
    first_name(doc.payee_party.as_ref()).or_else(|| first_name(doc.accounting_supplier_party.party.as_ref()))
}

/// 8 or 11 ASCII alphanumerics.
fn is_valid_bic(bic: &str) -> bool {
    matches!(bic.len(), 8 | 11) && bic.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Two letters, two digits, then alphanumerics.
fn looks_like_iban(iban: &str) -> bool {
    let bytes = iban.as_bytes();
    bytes.len() > 4
        && bytes[..2].iter().all(u8::is_ascii_alphabetic)
        && bytes[2..4].iter().all(u8::is_ascii_digit)
        && bytes[4..].iter().all(u8::is_ascii_alphanumeric)
}

fn map_payment_conditions(
    doc: &UblDocument,
    due_date: Option<NaiveDate>,
    ctx: &MappingContext<'_>,
    errors: &mut ErrorList,
) -> Option<PaymentConditions> {
    let mut discounts = Vec::new();
    let mut notes = Vec::new();

    for (index, terms) in doc.payment_terms.iter().enumerate() {
        let path = format!("PaymentTerms[{}]", index + 1);
        if let Some(percentage) = terms.settlement_discount_percent {
            match terms.settlement_period.as_ref().and_then(|p| p.end_date) {
                Some(payment_date) => {
                    notes.extend(terms.notes.iter().filter_map(|n| non_blank(Some(n.as_str()))));
                    discounts.push(Discount {
                        payment_date,
                        percentage,
                        amount: terms.amount,
                    });
                }
                None => ctx.warn(
                    errors,
                    ErrorKind::Payment,
                    format!("{path}/SettlementPeriod"),
                    Text::SettlementPeriodMissing,
                ),
            }
        } else if terms.penalty_surcharge_percent.is_some() {
            ctx.warn(errors, ErrorKind::Payment, path, Text::PenaltyNotSupported);
        }
    }

    let Some(due_date) = due_date else {
        if !discounts.is_empty() {
            ctx.error(
                errors,
                ErrorKind::Payment,
                "PaymentMeans/PaymentDueDate",
                Text::DiscountWithoutDueDate,
            );
        }
        return None;
    };

    Some(PaymentConditions {
        due_date,
        discounts,
        comment: join_lines(&notes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConverterConfig, Language, StandardCodeLists};
    use crate::ubl::{FinancialAccount, PaymentTerms, Period};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn run(doc: &UblDocument, payable: Decimal, strict: bool) -> (PaymentMapping, ErrorList) {
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
        let mapping = map_payment(doc, payable, &ctx, &mut errors);
        (mapping, errors)
    }

    fn transfer(code: &str, channel: Option<&str>) -> PaymentMeans {
        PaymentMeans {
            payment_means_code: Some(code.into()),
            payment_due_date: Some(date(2024, 7, 15)),
            payment_channel_code: channel.map(Into::into),
            instruction_notes: vec!["Bitte überweisen".into()],
            payment_ids: vec!["".into(), "RE-2024-001".into()],
            payee_financial_account: Some(FinancialAccount {
                id: Some("AT611904300234573201".into()),
                name: None,
                financial_institution_id: Some("BKAUATWW".into()),
            }),
        }
    }

    #[test]
    fn bank_transfer() {
        let mut doc = UblDocument {
            payment_means: vec![transfer("30", None)],
            ..Default::default()
        };
        doc.accounting_supplier_party.party = Some(crate::ubl::Party {
            names: vec!["Lieferant GmbH".into()],
            ..Default::default()
        });
        let (mapping, errors) = run(&doc, dec!(120), false);
        assert!(errors.is_empty(), "{errors}");

        let method = mapping.method.unwrap();
        assert_eq!(method.comment.as_deref(), Some("Bitte überweisen"));
        let PaymentMethodKind::UniversalBankTransaction(t) = method.kind else {
            panic!("expected bank transaction");
        };
        assert_eq!(t.payment_reference.as_deref(), Some("RE-2024-001"));
        assert_eq!(t.beneficiary_account.bic.as_deref(), Some("BKAUATWW"));
        assert_eq!(t.beneficiary_account.bank_account_owner.as_deref(), Some("Lieferant GmbH"));
        assert_eq!(mapping.conditions.unwrap().due_date, date(2024, 7, 15));
    }

    #[test]
    fn unsupported_channel_code_is_skipped() {
        let doc = UblDocument {
            payment_means: vec![transfer("31", Some("ZZZ"))],
            ..Default::default()
        };
        let (mapping, errors) = run(&doc, dec!(120), false);
        assert!(mapping.method.is_none());
        assert!(mapping.conditions.is_none());
        assert_eq!(errors.len(), 1);
        assert!(!errors.contains_error());
    }

    #[test]
    fn next_means_after_unsupported_channel() {
        let doc = UblDocument {
            payment_means: vec![transfer("31", Some("ZZZ")), transfer("49", None)],
            ..Default::default()
        };
        let (mapping, _) = run(&doc, dec!(120), false);
        assert_eq!(mapping.method.unwrap().kind, PaymentMethodKind::DirectDebit);
    }

    #[test]
    fn bad_bic_is_dropped_and_long_reference_cut() {
        let mut means = transfer("42", Some("IBAN"));
        means.payment_ids = vec!["R".repeat(40)];
        if let Some(account) = means.payee_financial_account.as_mut() {
            account.financial_institution_id = Some("BKAU-ATW".into());
        }
        let doc = UblDocument {
            payment_means: vec![means],
            ..Default::default()
        };
        let (mapping, errors) = run(&doc, dec!(1), false);
        let Some(PaymentMethod {
            kind: PaymentMethodKind::UniversalBankTransaction(t),
            ..
        }) = mapping.method
        else {
            panic!("expected bank transaction");
        };
        assert!(t.beneficiary_account.bic.is_none());
        assert_eq!(t.payment_reference.map(|r| r.len()), Some(35));
        assert_eq!(errors.errors().count(), 1);
        assert_eq!(errors.warnings().count(), 1);
    }

    #[test]
    fn last_non_blank_payment_id_wins() {
        let mut means = transfer("30", None);
        means.payment_ids = vec!["ERSTE".into(), "R".repeat(40), " LETZTE ".into(), "  ".into()];
        let doc = UblDocument {
            payment_means: vec![means],
            ..Default::default()
        };
        let (mapping, errors) = run(&doc, dec!(1), false);
        let PaymentMethodKind::UniversalBankTransaction(t) = mapping.method.unwrap().kind else {
            panic!("expected bank transaction");
        };
        assert_eq!(t.payment_reference.as_deref(), Some("LETZTE"));
        let warnings: Vec<_> = errors.warnings().map(|w| w.field.as_str()).collect();
        assert_eq!(warnings, ["PaymentMeans[1]/PaymentID[2]"]);
    }

    #[test]
    fn missing_and_malformed_iban() {
        let mut means = transfer("30", None);
        means.payee_financial_account = None;
        let doc = UblDocument {
            payment_means: vec![means],
            ..Default::default()
        };
        let (_, errors) = run(&doc, dec!(1), false);
        assert_eq!(errors.iter().next().unwrap().field, "PaymentMeans[1]/PayeeFinancialAccount/ID");
        assert!(errors.contains_error());

        assert!(looks_like_iban("DE89370400440532013000"));
        assert!(!looks_like_iban("1234AT"));
    }

    #[test]
    fn zero_payable_means_no_payment() {
        let doc = UblDocument {
            payment_means: vec![transfer("1", None)],
            ..Default::default()
        };
        let (mapping, errors) = run(&doc, Decimal::ZERO, false);
        assert_eq!(mapping.method.unwrap().kind, PaymentMethodKind::NoPayment);
        assert!(mapping.conditions.is_none());
        assert!(errors.is_empty());

        let (mapping, errors) = run(&doc, dec!(5), false);
        assert!(mapping.method.is_none());
        assert!(errors.contains_error());
    }

    #[test]
    fn strict_requires_payment_method() {
        let (_, errors) = run(&UblDocument::default(), dec!(5), true);
        assert_eq!(errors.errors().next().unwrap().field, "Invoice");
        let (_, errors) = run(&UblDocument::default(), dec!(5), false);
        assert!(errors.is_empty());
    }

    #[test]
    fn discounts_and_penalties() {
        let doc = UblDocument {
            payment_means: vec![transfer("30", None)],
            payment_terms: vec![
                PaymentTerms {
                    notes: vec!["2% Skonto".into()],
                    settlement_discount_percent: Some(dec!(2)),
                    settlement_period: Some(Period {
                        start_date: None,
                        end_date: Some(date(2024, 7, 1)),
                    }),
                    ..Default::default()
                },
                PaymentTerms {
                    notes: vec!["ignored".into()],
                    settlement_discount_percent: Some(dec!(3)),
                    ..Default::default()
                },
                PaymentTerms {
                    penalty_surcharge_percent: Some(dec!(5)),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let (mapping, errors) = run(&doc, dec!(100), false);
        let conditions = mapping.conditions.unwrap();
        assert_eq!(conditions.discounts.len(), 1);
        assert_eq!(conditions.discounts[0].percentage, dec!(2));
        assert_eq!(conditions.comment.as_deref(), Some("2% Skonto"));
        assert_eq!(errors.warnings().count(), 2);
    }

    #[test]
    fn discount_without_due_date() {
        let mut means = transfer("30", None);
        means.payment_due_date = None;
        let doc = UblDocument {
            payment_means: vec![means],
            payment_terms: vec![PaymentTerms {
                settlement_discount_percent: Some(dec!(2)),
                settlement_period: Some(Period {
                    start_date: None,
                    end_date: Some(date(2024, 7, 1)),
                }),
                ..Default::default()
            }],
            ..Default::default()
        };
        let (mapping, errors) = run(&doc, dec!(100), false);
        assert!(mapping.conditions.is_none());
        assert_eq!(errors.errors().next().unwrap().field, "PaymentMeans/PaymentDueDate");
    }

    #[test]
    fn bic_shapes() {
        assert!(is_valid_bic("BKAUATWW"));
        assert!(is_valid_bic("BKAUATWWXXX"));
        assert!(!is_valid_bic("BKAUAT"));
        assert!(!is_valid_bic(""));
    }
}
