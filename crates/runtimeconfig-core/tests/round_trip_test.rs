// ABOUTME: Property tests for the value codecs
// ABOUTME: Every value a codec can produce must read back unchanged from its encoded form
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use proptest::prelude::*;
use runtimeconfig_core::{ConfigValue, HostPort, Json, StringArray};
use std::collections::BTreeMap;
use std::time::Duration;

fn round_trip<T: ConfigValue>(value: &T) -> T {
    T::parse_value(&value.encode()).unwrap()
}

fn host_port() -> impl Strategy<Value = HostPort> {
    // Brackets never appear in a parsed host; colons force the bracketed form
    ("[a-z0-9.:-]{0,24}", "[a-z0-9]{0,6}").prop_map(|(host, port)| HostPort::new(host, port))
}

proptest! {
    #[test]
    fn test_string_round_trip(value in "\\PC*") {
        prop_assert_eq!(round_trip(&value), value);
    }

    #[test]
    fn test_bool_round_trip(value in any::<bool>()) {
        prop_assert_eq!(round_trip(&value), value);
    }

    #[test]
    fn test_finite_float_round_trip(
        value in any::<f64>().prop_filter("finite", |v| v.is_finite())
    ) {
        prop_assert_eq!(round_trip(&value).to_bits(), value.to_bits());
    }

    #[test]
    fn test_integer_round_trip(signed in any::<i64>(), unsigned in any::<u64>()) {
        prop_assert_eq!(round_trip(&signed), signed);
        prop_assert_eq!(round_trip(&unsigned), unsigned);
    }

    #[test]
    fn test_duration_round_trip(secs in any::<u64>(), nanos in 0u32..1_000_000_000) {
        let value = Duration::new(secs, nanos);
        prop_assert_eq!(round_trip(&value), value);
    }

    #[test]
    fn test_huge_duration_never_panics(
        whole in "[0-9]{1,45}",
        fraction in "[0-9]{0,40}",
        unit in prop::sample::select(vec!["h", "m", "s", "ms", "us", "ns"]),
    ) {
        let raw = format!("{whole}.{fraction}{unit}");
        if let Err(e) = Duration::parse_value(&raw) {
            prop_assert!(e.is_invalid_value(), "{raw}: {e}");
        }
    }

    #[test]
    fn test_string_array_round_trip(
        value in prop::collection::vec("[a-z ,\"]{0,8}", 0..6)
    ) {
        let value: StringArray = value;
        prop_assert_eq!(round_trip(&value), value);
    }

    #[test]
    fn test_host_port_round_trip(value in host_port()) {
        prop_assert_eq!(round_trip(&value), value);
    }

    #[test]
    fn test_json_map_round_trip(
        map in prop::collection::btree_map("\\PC{0,8}", "\\PC{0,12}", 0..8)
    ) {
        let value: Json<BTreeMap<String, String>> = Json::new(map);
        prop_assert_eq!(round_trip(&value), value);
    }
}
