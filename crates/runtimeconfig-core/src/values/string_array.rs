// ABOUTME: Comma-separated string list codec with CSV-style quoting
// ABOUTME: Elements containing commas or quotes are quoted so they survive a round trip
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ConfigValue;
use crate::errors::{RuntimeConfigError, RuntimeConfigResult};
use std::mem;

/// List of strings written as a single comma-separated line
pub type StringArray = Vec<String>;

fn needs_quoting(field: &str) -> bool {
    field.contains([',', '"', '\n', '\r'])
}

fn split_fields(raw: &str) -> Result<Vec<String>, &'static str> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars().peekable();
    let mut in_quotes = false;
    let mut field_was_quoted = false;

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    current.push('"');
                }
                '"' => in_quotes = false,
                _ => current.push(c),
            }
            continue;
        }
        match c {
            ',' => {
                fields.push(mem::take(&mut current));
                field_was_quoted = false;
            }
            '"' if current.is_empty() && !field_was_quoted => {
                in_quotes = true;
                field_was_quoted = true;
            }
            '"' => return Err("bare quote in unquoted field"),
            _ if field_was_quoted => return Err("text after closing quote"),
            _ => current.push(c),
        }
    }

    if in_quotes {
        return Err("unterminated quoted field");
    }
    fields.push(current);
    Ok(fields)
}

impl ConfigValue for Vec<String> {
    fn type_name() -> &'static str {
        "string-array"
    }

    fn parse_value(raw: &str) -> RuntimeConfigResult<Self> {
        if raw.is_empty() {
            return Ok(Vec::new());
        }
        split_fields(raw)
            .map_err(|reason| RuntimeConfigError::invalid_value(Self::type_name(), raw, reason))
    }

    fn encode(&self) -> String {
        // A lone empty element must be quoted, otherwise it reads back as an empty list
        if let [only] = self.as_slice() {
            if only.is_empty() {
                return "\"\"".to_owned();
            }
        }
        self.iter()
            .map(|field| {
                if needs_quoting(field) {
                    format!("\"{}\"", field.replace('"', "\"\""))
                } else {
                    field.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_list() {
        let parsed = StringArray::parse_value("pestle,mortar").unwrap();
        assert_eq!(parsed, vec!["pestle".to_owned(), "mortar".to_owned()]);
        assert_eq!(parsed.encode(), "pestle,mortar");
    }

    #[test]
    fn test_empty_input_is_empty_list() {
        assert!(StringArray::parse_value("").unwrap().is_empty());
        assert_eq!(StringArray::default().encode(), "");
    }

    #[test]
    fn test_quoted_elements_round_trip() {
        let value = vec![
            "a,b".to_owned(),
            "say \"hi\"".to_owned(),
            String::new(),
            "plain".to_owned(),
        ];
        let encoded = value.encode();
        assert_eq!(encoded, "\"a,b\",\"say \"\"hi\"\"\",,plain");
        assert_eq!(StringArray::parse_value(&encoded).unwrap(), value);
    }

    #[test]
    fn test_single_empty_element() {
        let value = vec![String::new()];
        assert_eq!(StringArray::parse_value(&value.encode()).unwrap(), value);
    }

    #[test]
    fn test_malformed_quotes() {
        assert!(StringArray::parse_value("\"open").is_err());
        assert!(StringArray::parse_value("a\"b").is_err());
        assert!(StringArray::parse_value("\"a\"b").is_err());
    }
}
