//! # Payment Method Rules
//!
//! The static rule table: one immutable record per [`PaymentMethod`].
//!
//! ## Rule Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Method            Modifier range   Points   Additional items           │
//! │  ────────────────  ──────────────   ──────   ─────────────────────────  │
//! │  CASH              0.90 ..= 1.00    0.05     (none)                     │
//! │  CASH_ON_DELIVERY  1.00 ..= 1.02    0.05     courier ∈ {YAMATO,SAGAWA}  │
//! │  VISA              0.95 ..= 1.00    0.03     last4 = 4 digits           │
//! │  MASTERCARD        0.95 ..= 1.00    0.03     last4 = 4 digits           │
//! │  AMEX              0.98 ..= 1.01    0.02     last4 = 4 digits           │
//! │  JCB               0.95 ..= 1.00    0.05     last4 = 4 digits           │
//! │  LINE_PAY          1.00 ..= 1.00    0.01     (none)                     │
//! │  PAYPAY            1.00 ..= 1.00    0.01     (none)                     │
//! │  POINTS            1.00 ..= 1.00    0.00     (none)                     │
//! │  GRAB_PAY          1.00 ..= 1.00    0.01     (none)                     │
//! │  BANK_TRANSFER     1.00 ..= 1.00    0.00     {bank, accountNumber}      │
//! │  CHEQUE            0.90 ..= 1.00    0.00     {bank, chequeNumber}       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Additional item checks are built from three combinators ([`ItemRule`]):
//! emptiness, an exact key set, or a single constrained field.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{AdditionalItems, PaymentMethod};

// =============================================================================
// Combinators
// =============================================================================

/// Constraint on the value of a single additional item field.
#[derive(Debug, Clone, Copy)]
pub enum FieldCheck {
    /// Value must equal one of the listed strings.
    OneOf(&'static [&'static str]),
    /// Value must fully match the pattern.
    Pattern(&'static LazyLock<Regex>),
}

impl FieldCheck {
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            FieldCheck::OneOf(allowed) => allowed.contains(&value),
            FieldCheck::Pattern(pattern) => pattern.is_match(value),
        }
    }
}

/// Schema for the additional items of one payment method.
#[derive(Debug, Clone, Copy)]
pub enum ItemRule {
    /// No additional items allowed.
    Empty,
    /// Exactly this set of keys, any values.
    ExactKeys(&'static [&'static str]),
    /// Exactly one key, whose value must pass `check`.
    SingleField {
        key: &'static str,
        check: FieldCheck,
    },
}

impl ItemRule {
    /// True when `items` satisfies the schema.
    pub fn accepts(&self, items: &AdditionalItems) -> bool {
        match self {
            ItemRule::Empty => items.is_empty(),
            ItemRule::ExactKeys(keys) => {
                items.len() == keys.len() && keys.iter().all(|key| items.contains_key(*key))
            }
            ItemRule::SingleField { key, check } => {
                items.len() == 1 && items.get(*key).is_some_and(|value| check.accepts(value))
            }
        }
    }
}

// =============================================================================
// Payment Method Rule
// =============================================================================

/// Pricing and validation configuration for one payment method.
#[derive(Debug, Clone, Copy)]
pub struct PaymentMethodRule {
    /// Lowest accepted price modifier (inclusive).
    pub modifier_min: Decimal,
    /// Highest accepted price modifier (inclusive).
    pub modifier_max: Decimal,
    /// Fraction of the base price awarded as points.
    pub points_rate: Decimal,
    pub additional_items: ItemRule,
}

impl PaymentMethodRule {
    /// Inclusive range check.
    pub fn accepts_modifier(&self, modifier: Decimal) -> bool {
        self.modifier_min <= modifier && modifier <= self.modifier_max
    }

    pub fn accepts_items(&self, items: &AdditionalItems) -> bool {
        self.additional_items.accepts(items)
    }
}

// =============================================================================
// Rule Table
// =============================================================================

static LAST4: LazyLock<Regex> = LazyLock::new(|| {
    // ASCII digits only; `\d` would also admit other Unicode digits
    Regex::new(r"^[0-9]{4}$").expect("last4 pattern is a valid regex")
});

const COURIERS: &[&str] = &["YAMATO", "SAGAWA"];

static CASH: PaymentMethodRule = PaymentMethodRule {
    modifier_min: dec!(0.90),
    modifier_max: dec!(1.00),
    points_rate: dec!(0.05),
    additional_items: ItemRule::Empty,
};

static CASH_ON_DELIVERY: PaymentMethodRule = PaymentMethodRule {
    modifier_min: dec!(1.00),
    modifier_max: dec!(1.02),
    points_rate: dec!(0.05),
    additional_items: ItemRule::SingleField {
        key: "courier",
        check: FieldCheck::OneOf(COURIERS),
    },
};

static VISA: PaymentMethodRule = PaymentMethodRule {
    modifier_min: dec!(0.95),
    modifier_max: dec!(1.00),
    points_rate: dec!(0.03),
    additional_items: ItemRule::SingleField {
        key: "last4",
        check: FieldCheck::Pattern(&LAST4),
    },
};

static MASTERCARD: PaymentMethodRule = PaymentMethodRule {
    modifier_min: dec!(0.95),
    modifier_max: dec!(1.00),
    points_rate: dec!(0.03),
    additional_items: ItemRule::SingleField {
        key: "last4",
        check: FieldCheck::Pattern(&LAST4),
    },
};

static AMEX: PaymentMethodRule = PaymentMethodRule {
    modifier_min: dec!(0.98),
    modifier_max: dec!(1.01),
    points_rate: dec!(0.02),
    additional_items: ItemRule::SingleField {
        key: "last4",
        check: FieldCheck::Pattern(&LAST4),
    },
};

static JCB: PaymentMethodRule = PaymentMethodRule {
    modifier_min: dec!(0.95),
    modifier_max: dec!(1.00),
    points_rate: dec!(0.05),
    additional_items: ItemRule::SingleField {
        key: "last4",
        check: FieldCheck::Pattern(&LAST4),
    },
};

static E_WALLET: PaymentMethodRule = PaymentMethodRule {
    modifier_min: dec!(1.00),
    modifier_max: dec!(1.00),
    points_rate: dec!(0.01),
    additional_items: ItemRule::Empty,
};

static POINTS: PaymentMethodRule = PaymentMethodRule {
    modifier_min: dec!(1.00),
    modifier_max: dec!(1.00),
    points_rate: dec!(0.00),
    additional_items: ItemRule::Empty,
};

static BANK_TRANSFER: PaymentMethodRule = PaymentMethodRule {
    modifier_min: dec!(1.00),
    modifier_max: dec!(1.00),
    points_rate: dec!(0.00),
    additional_items: ItemRule::ExactKeys(&["bank", "accountNumber"]),
};

static CHEQUE: PaymentMethodRule = PaymentMethodRule {
    modifier_min: dec!(0.90),
    modifier_max: dec!(1.00),
    points_rate: dec!(0.00),
    additional_items: ItemRule::ExactKeys(&["bank", "chequeNumber"]),
};

/// Looks up the rule for a payment method.
pub fn rule_for(method: PaymentMethod) -> &'static PaymentMethodRule {
    match method {
        PaymentMethod::Cash => &CASH,
        PaymentMethod::CashOnDelivery => &CASH_ON_DELIVERY,
        PaymentMethod::Visa => &VISA,
        PaymentMethod::Mastercard => &MASTERCARD,
        PaymentMethod::Amex => &AMEX,
        PaymentMethod::Jcb => &JCB,
        PaymentMethod::LinePay | PaymentMethod::Paypay | PaymentMethod::GrabPay => &E_WALLET,
        PaymentMethod::Points => &POINTS,
        PaymentMethod::BankTransfer => &BANK_TRANSFER,
        PaymentMethod::Cheque => &CHEQUE,
    }
}

impl PaymentMethod {
    /// Shorthand for [`rule_for`].
    pub fn rule(self) -> &'static PaymentMethodRule {
        rule_for(self)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn items(pairs: &[(&str, &str)]) -> AdditionalItems {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_every_range_is_ordered() {
        for method in PaymentMethod::ALL {
            let rule = rule_for(method);
            assert!(rule.modifier_min <= rule.modifier_max, "{method}");
        }
    }

    #[test]
    fn test_points_rates() {
        assert_eq!(rule_for(PaymentMethod::Cash).points_rate, dec!(0.05));
        assert_eq!(rule_for(PaymentMethod::Visa).points_rate, dec!(0.03));
        assert_eq!(rule_for(PaymentMethod::Mastercard).points_rate, dec!(0.03));
        assert_eq!(rule_for(PaymentMethod::Amex).points_rate, dec!(0.02));
        assert_eq!(rule_for(PaymentMethod::Jcb).points_rate, dec!(0.05));
        assert_eq!(rule_for(PaymentMethod::GrabPay).points_rate, dec!(0.01));
        assert!(rule_for(PaymentMethod::Points).points_rate.is_zero());
        assert!(rule_for(PaymentMethod::Cheque).points_rate.is_zero());
    }

    #[test]
    fn test_modifier_range_is_inclusive() {
        let rule = rule_for(PaymentMethod::Amex);
        assert!(rule.accepts_modifier(dec!(0.98)));
        assert!(rule.accepts_modifier(dec!(1.01)));
        assert!(!rule.accepts_modifier(dec!(0.979)));
        assert!(!rule.accepts_modifier(dec!(1.011)));

        let wallet = rule_for(PaymentMethod::Paypay);
        assert!(wallet.accepts_modifier(dec!(1)));
        assert!(!wallet.accepts_modifier(dec!(0.99)));
    }

    #[test]
    fn test_empty_rule() {
        assert!(ItemRule::Empty.accepts(&items(&[])));
        assert!(!ItemRule::Empty.accepts(&items(&[("note", "x")])));
    }

    #[test]
    fn test_exact_keys_rule() {
        let rule = rule_for(PaymentMethod::BankTransfer).additional_items;
        assert!(rule.accepts(&items(&[("bank", "MUFG"), ("accountNumber", "123")])));
        assert!(rule.accepts(&items(&[("accountNumber", "123"), ("bank", "MUFG")])));
        assert!(!rule.accepts(&items(&[("bank", "MUFG")])));
        assert!(!rule.accepts(&items(&[
            ("bank", "MUFG"),
            ("accountNumber", "123"),
            ("extra", "1"),
        ])));
    }

    #[test]
    fn test_last4_rule() {
        let rule = rule_for(PaymentMethod::Visa).additional_items;
        assert!(rule.accepts(&items(&[("last4", "1234")])));
        assert!(!rule.accepts(&items(&[("last4", "123")])));
        assert!(!rule.accepts(&items(&[("last4", "12345")])));
        assert!(!rule.accepts(&items(&[("last4", "12a4")])));
        // non-ASCII digits are rejected
        assert!(!rule.accepts(&items(&[("last4", "١٢٣٤")])));
        assert!(!rule.accepts(&items(&[("last4", "1234"), ("name", "A")])));
        assert!(!rule.accepts(&items(&[])));
    }

    #[test]
    fn test_courier_rule() {
        let rule = rule_for(PaymentMethod::CashOnDelivery).additional_items;
        assert!(rule.accepts(&items(&[("courier", "YAMATO")])));
        assert!(rule.accepts(&items(&[("courier", "SAGAWA")])));
        assert!(!rule.accepts(&items(&[("courier", "yamato")])));
        assert!(!rule.accepts(&items(&[("courier", "FEDEX")])));
        assert!(!rule.accepts(&items(&[("carrier", "YAMATO")])));
    }
}
