// ABOUTME: Typed value codec contract for configuration fields
// ABOUTME: Parse-from-string, canonical encoding, and the object-safe option binding trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Typed Value Codecs
//!
//! Every configuration field is backed by a type implementing [`ConfigValue`]:
//! a default constructor, a fallible parser, and a total canonical encoder.
//! Implementations must satisfy the round-trip law
//! `parse_value(&v.encode()) == v` for every `v` produced by `parse_value`
//! or `Default::default`.
//!
//! [`OptionTarget`] is the object-safe view of the same capability, used when a
//! heterogeneous set of fields is bound to startup options.

/// Host and port pair (`host:port`)
pub mod host_port;
/// Structured values encoded as JSON
pub mod json;
/// Scalar codecs: strings, booleans, numbers, durations
pub mod scalar;
/// Comma-separated string lists
pub mod string_array;

pub use host_port::HostPort;
pub use json::Json;
pub use string_array::StringArray;

use crate::errors::RuntimeConfigResult;

/// Codec contract for a configuration value type
///
/// # Examples
///
/// ```rust
/// use runtimeconfig_core::values::{ConfigValue, HostPort};
///
/// let hp = HostPort::parse_value("localhost:1234").unwrap();
/// assert_eq!(hp.host, "localhost");
/// assert_eq!(hp.encode(), "localhost:1234");
/// ```
pub trait ConfigValue: Default + Clone + Send + Sync + 'static {
    /// Name of the type as reported in parse errors
    fn type_name() -> &'static str;

    /// Parse a value from its string form
    ///
    /// # Errors
    ///
    /// Returns `RuntimeConfigError::InvalidValue` naming the input and type
    /// when `raw` is malformed.
    fn parse_value(raw: &str) -> RuntimeConfigResult<Self>;

    /// Canonical string form; never fails for a well-formed value
    fn encode(&self) -> String;

    /// Replace this value with one parsed from `raw`
    ///
    /// Wrapper types override this to update only the part of themselves that
    /// option binding owns.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeConfigError::InvalidValue` when `raw` is malformed; `self`
    /// is left untouched in that case.
    fn assign_from(&mut self, raw: &str) -> RuntimeConfigResult<()> {
        *self = Self::parse_value(raw)?;
        Ok(())
    }
}

/// Object-safe binding target for startup options
pub trait OptionTarget: Send + Sync {
    /// Apply a default or environment-provided string
    ///
    /// # Errors
    ///
    /// Returns `RuntimeConfigError::InvalidValue` when `raw` is malformed.
    fn assign(&mut self, raw: &str) -> RuntimeConfigResult<()>;

    /// Current value in canonical string form
    fn render(&self) -> String;

    /// Name of the underlying value type
    fn value_type(&self) -> &'static str;
}

impl<T: ConfigValue> OptionTarget for T {
    fn assign(&mut self, raw: &str) -> RuntimeConfigResult<()> {
        self.assign_from(raw)
    }

    fn render(&self) -> String {
        self.encode()
    }

    fn value_type(&self) -> &'static str {
        T::type_name()
    }
}
