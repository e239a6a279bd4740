// ABOUTME: Scalar configuration codecs for strings, booleans, numbers, and durations
// ABOUTME: Canonical encodings chosen so every parsed value survives a round trip
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ConfigValue;
use crate::errors::{RuntimeConfigError, RuntimeConfigResult};
use std::fmt::Write;
use std::time::Duration;

impl ConfigValue for String {
    fn type_name() -> &'static str {
        "string"
    }

    fn parse_value(raw: &str) -> RuntimeConfigResult<Self> {
        Ok(raw.to_owned())
    }

    fn encode(&self) -> String {
        self.clone()
    }
}

impl ConfigValue for bool {
    fn type_name() -> &'static str {
        "bool"
    }

    fn parse_value(raw: &str) -> RuntimeConfigResult<Self> {
        match raw {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
            _ => Err(RuntimeConfigError::invalid_value(
                Self::type_name(),
                raw,
                "expected true or false",
            )),
        }
    }

    fn encode(&self) -> String {
        self.to_string()
    }
}

macro_rules! numeric_config_value {
    ($ty:ty, $name:literal) => {
        impl ConfigValue for $ty {
            fn type_name() -> &'static str {
                $name
            }

            fn parse_value(raw: &str) -> RuntimeConfigResult<Self> {
                raw.trim()
                    .parse::<$ty>()
                    .map_err(|e| RuntimeConfigError::invalid_value($name, raw, e))
            }

            fn encode(&self) -> String {
                self.to_string()
            }
        }
    };
}

numeric_config_value!(i64, "int64");
numeric_config_value!(u64, "uint64");

impl ConfigValue for f64 {
    fn type_name() -> &'static str {
        "float64"
    }

    /// Non-finite values have no stable text form and are rejected
    fn parse_value(raw: &str) -> RuntimeConfigResult<Self> {
        let value = raw
            .trim()
            .parse::<Self>()
            .map_err(|e| RuntimeConfigError::invalid_value(Self::type_name(), raw, e))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(RuntimeConfigError::invalid_value(
                Self::type_name(),
                raw,
                "expected a finite number",
            ))
        }
    }

    fn encode(&self) -> String {
        self.to_string()
    }
}

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

/// Units ordered largest first; the encoder relies on this order
const DURATION_UNITS: [(&str, u128); 6] = [
    ("h", NANOS_PER_HOUR),
    ("m", NANOS_PER_MINUTE),
    ("s", NANOS_PER_SECOND),
    ("ms", NANOS_PER_MILLI),
    ("us", NANOS_PER_MICRO),
    ("ns", 1),
];

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "µs" | "μs" => Some(NANOS_PER_MICRO),
        _ => DURATION_UNITS
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, nanos)| *nanos),
    }
}

fn parse_duration(raw: &str) -> Result<Duration, String> {
    let input = raw.trim();
    if input.is_empty() {
        return Err("empty duration".to_owned());
    }
    if input == "0" {
        return Ok(Duration::ZERO);
    }

    let mut total: u128 = 0;
    let mut rest = input;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(|| format!("missing unit in duration {input:?}"))?;
        if number_len == 0 {
            return Err(format!("expected number in duration {input:?}"));
        }
        let (number, after_number) = rest.split_at(number_len);
        let unit_len = after_number
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after_number.len());
        let (unit, remainder) = after_number.split_at(unit_len);

        let scale = unit_nanos(unit).ok_or_else(|| format!("unknown unit {unit:?}"))?;
        total = total
            .checked_add(scale_component(number, scale)?)
            .ok_or_else(|| "duration overflows".to_owned())?;
        rest = remainder;
    }

    let secs = u64::try_from(total / NANOS_PER_SECOND).map_err(|_| "duration overflows")?;
    Ok(Duration::new(secs, (total % NANOS_PER_SECOND) as u32))
}

/// Scale a decimal literal such as `1.5` by a unit size in nanoseconds
fn scale_component(number: &str, scale: u128) -> Result<u128, String> {
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(format!("invalid number {number:?}"));
    }
    let whole_value: u128 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| format!("invalid number {number:?}"))?
    };
    let nanos = whole_value
        .checked_mul(scale)
        .ok_or_else(|| "duration overflows".to_owned())?;

    let mut divisor = 1u128;
    let mut fraction_value = 0u128;
    for digit in fraction.chars() {
        let d = digit
            .to_digit(10)
            .ok_or_else(|| format!("invalid number {number:?}"))?;
        // Digits beyond nanosecond precision cannot change the result
        if divisor >= 1_000_000_000_000_000_000 {
            break;
        }
        fraction_value = fraction_value * 10 + u128::from(d);
        divisor *= 10;
    }
    nanos
        .checked_add(fraction_value * scale / divisor)
        .ok_or_else(|| "duration overflows".to_owned())
}

fn encode_duration(duration: Duration) -> String {
    let mut remaining = duration.as_nanos();
    if remaining == 0 {
        return "0s".to_owned();
    }

    let mut out = String::new();
    for (unit, nanos) in DURATION_UNITS {
        let count = remaining / nanos;
        if count > 0 {
            let _ = write!(out, "{count}{unit}");
            remaining %= nanos;
        }
    }
    out
}

impl ConfigValue for Duration {
    fn type_name() -> &'static str {
        "duration"
    }

    fn parse_value(raw: &str) -> RuntimeConfigResult<Self> {
        parse_duration(raw).map_err(|reason| {
            RuntimeConfigError::invalid_value(Self::type_name(), raw, reason)
        })
    }

    fn encode(&self) -> String {
        encode_duration(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_is_identity() {
        let value = String::parse_value("system@dev.coder.com").unwrap();
        assert_eq!(value.encode(), "system@dev.coder.com");
        assert_eq!(String::default().encode(), "");
    }

    #[test]
    fn test_bool_accepts_common_spellings() {
        for raw in ["1", "t", "TRUE", "True"] {
            assert!(bool::parse_value(raw).unwrap(), "{raw}");
        }
        for raw in ["0", "f", "FALSE", "False"] {
            assert!(!bool::parse_value(raw).unwrap(), "{raw}");
        }
        assert_eq!(true.encode(), "true");
        assert!(bool::parse_value("yes").unwrap_err().is_invalid_value());
    }

    #[test]
    fn test_float_rejects_words() {
        let err = f64::parse_value("hello").unwrap_err();
        assert!(err.is_invalid_value());
        assert!(err.to_string().contains("float64"));
        assert!(err.to_string().contains("hello"));

        let parsed = f64::parse_value("91.1234").unwrap();
        assert_eq!(parsed.encode(), "91.1234");
        assert!((f64::parse_value(&parsed.encode()).unwrap() - parsed).abs() < f64::EPSILON);
    }

    #[test]
    fn test_float_rejects_non_finite() {
        for raw in ["NaN", "nan", "inf", "-inf", "infinity", "1e400"] {
            assert!(f64::parse_value(raw).unwrap_err().is_invalid_value(), "{raw}");
        }
    }

    #[test]
    fn test_integers() {
        assert_eq!(i64::parse_value("-42").unwrap(), -42);
        assert!(u64::parse_value("-42").is_err());
        assert_eq!(u64::default().encode(), "0");
    }

    #[test]
    fn test_duration_parsing() {
        assert_eq!(Duration::parse_value("90s").unwrap(), Duration::from_secs(90));
        assert_eq!(
            Duration::parse_value("1h30m").unwrap(),
            Duration::from_secs(5400)
        );
        assert_eq!(
            Duration::parse_value("1.5s").unwrap(),
            Duration::from_millis(1500)
        );
        assert_eq!(
            Duration::parse_value("250ms").unwrap(),
            Duration::from_millis(250)
        );
        assert_eq!(Duration::parse_value("0").unwrap(), Duration::ZERO);
        assert!(Duration::parse_value("10").is_err());
        assert!(Duration::parse_value("5 parsecs").is_err());
        assert!(Duration::parse_value("").is_err());
    }

    #[test]
    fn test_duration_overflow_is_invalid_value() {
        for raw in [
            "94522879700260684295381835.999999999999999999h",
            "340282366920938463463374607431768211455ns1ns",
            "99999999999999999999999999999h",
            "18446744073709551616s",
        ] {
            let err = Duration::parse_value(raw).unwrap_err();
            assert!(err.is_invalid_value(), "{raw}");
            assert!(err.to_string().contains("overflows"), "{raw}");
        }
    }

    #[test]
    fn test_duration_canonical_form() {
        assert_eq!(Duration::from_secs(90).encode(), "1m30s");
        assert_eq!(Duration::from_millis(1500).encode(), "1s500ms");
        assert_eq!(Duration::ZERO.encode(), "0s");

        let odd = Duration::new(3_725, 1_002_003);
        assert_eq!(Duration::parse_value(&odd.encode()).unwrap(), odd);
    }
}
