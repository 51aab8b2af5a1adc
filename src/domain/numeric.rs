//! Numeric coercion policy
//!
//! Every number that enters the journal (typed PnL, typed initial equity,
//! values read back from storage) goes through the same permissive rule:
//! anything that is not a finite decimal becomes zero. Nothing here returns
//! an error.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;
use std::str::FromStr;

/// Coerce free-form text into a decimal. Blank or unparseable input is zero.
pub fn coerce_decimal(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or(Decimal::ZERO)
}

/// Coerce an arbitrary JSON value into a decimal.
pub fn coerce_value(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => coerce_decimal(&n.to_string()),
        Value::String(s) => coerce_decimal(s),
        Value::Bool(true) => Decimal::ONE,
        _ => Decimal::ZERO,
    }
}

/// Sum that clamps at `Decimal::MAX` / `Decimal::MIN` instead of overflowing.
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

/// Quotient that never panics: a zero divisor gives zero, overflow clamps to
/// the bound with the quotient's sign.
pub fn saturating_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or_else(|| {
        if numerator.is_sign_negative() == denominator.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

/// Serde adapter: numbers are written as exact JSON numbers and read back
/// leniently.
pub mod lenient {
    use super::*;
    use serde::Serialize;
    use serde_json::Number;

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match Number::from_str(&value.normalize().to_string()) {
            Ok(number) => number.serialize(serializer),
            Err(_) => serializer.serialize_f64(value.to_f64().unwrap_or(0.0)),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().map(coerce_value).unwrap_or(Decimal::ZERO))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde::{Deserialize, Serialize};

    #[test]
    fn test_coerce_plain_and_signed() {
        assert_eq!(coerce_decimal("125.5"), dec!(125.5));
        assert_eq!(coerce_decimal("  -40 "), dec!(-40));
        assert_eq!(coerce_decimal("+7"), dec!(7));
    }

    #[test]
    fn test_coerce_scientific() {
        assert_eq!(coerce_decimal("1e3"), dec!(1000));
        assert_eq!(coerce_decimal("2.5E-1"), dec!(0.25));
    }

    #[test]
    fn test_invalid_input_degrades_to_zero() {
        assert_eq!(coerce_decimal(""), Decimal::ZERO);
        assert_eq!(coerce_decimal("   "), Decimal::ZERO);
        assert_eq!(coerce_decimal("abc"), Decimal::ZERO);
        assert_eq!(coerce_decimal("1,000"), Decimal::ZERO);
        assert_eq!(coerce_decimal("NaN"), Decimal::ZERO);
    }

    #[derive(Serialize, Deserialize)]
    struct Holder {
        #[serde(with = "lenient", default)]
        amount: Decimal,
    }

    #[test]
    fn test_lenient_deserialize_accepts_loose_json() {
        let cases = [
            (r#"{"amount": 12.5}"#, dec!(12.5)),
            (r#"{"amount": "-3"}"#, dec!(-3)),
            (r#"{"amount": null}"#, Decimal::ZERO),
            (r#"{"amount": "oops"}"#, Decimal::ZERO),
            (r#"{"amount": [1, 2]}"#, Decimal::ZERO),
            (r#"{}"#, Decimal::ZERO),
        ];

        for (json, expected) in cases {
            let holder: Holder = serde_json::from_str(json).unwrap();
            assert_eq!(holder.amount, expected, "input {json}");
        }
    }

    #[test]
    fn test_lenient_serialize_writes_number() {
        let json = serde_json::to_string(&Holder { amount: dec!(-80) }).unwrap();
        assert_eq!(json, r#"{"amount":-80}"#);
        let json = serde_json::to_string(&Holder { amount: dec!(0.50) }).unwrap();
        assert_eq!(json, r#"{"amount":0.5}"#);
    }

    #[test]
    fn test_lenient_round_trip_keeps_every_digit() {
        for amount in [dec!(123456789.123456789123), Decimal::MAX, Decimal::MIN, dec!(-0.0000001)] {
            let json = serde_json::to_string(&Holder { amount }).unwrap();
            let back: Holder = serde_json::from_str(&json).unwrap();
            assert_eq!(back.amount, amount, "json {json}");
        }
    }

    #[test]
    fn test_saturating_helpers() {
        assert_eq!(saturating_sum([Decimal::MAX, dec!(1)]), Decimal::MAX);
        assert_eq!(saturating_sum([Decimal::MIN, dec!(-1)]), Decimal::MIN);
        assert_eq!(saturating_sum([dec!(1.5), dec!(-0.5)]), dec!(1));

        assert_eq!(saturating_div(dec!(5), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(saturating_div(Decimal::MAX, dec!(0.1)), Decimal::MAX);
        assert_eq!(saturating_div(Decimal::MIN, dec!(0.1)), Decimal::MIN);
        assert_eq!(saturating_div(dec!(-1), dec!(4)), dec!(-0.25));
    }
}
