use crate::error::CanonicalError;
use model::records::{key::RowKey, row::Row};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// How a row is folded into its [`RowKey`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalMode {
    /// Values only, ordered by column name. Two rows whose sorted value
    /// sequences coincide share a key even if their column names differ.
    #[default]
    Values,
    /// `name=value` pairs ordered by column name.
    NamedPairs,
}

impl FromStr for CanonicalMode {
    type Err = CanonicalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "values" => Ok(CanonicalMode::Values),
            "named" | "named_pairs" => Ok(CanonicalMode::NamedPairs),
            other => Err(CanonicalError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for CanonicalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalMode::Values => f.write_str("values"),
            CanonicalMode::NamedPairs => f.write_str("named"),
        }
    }
}

/// Maps rows to deterministic string keys, independent of the order in
/// which the executor yielded the columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyCanonicalizer {
    mode: CanonicalMode,
}

impl KeyCanonicalizer {
    pub fn new(mode: CanonicalMode) -> Self {
        Self { mode }
    }

    pub fn canonicalize(&self, row: &Row) -> RowKey {
        let mut fields: Vec<_> = row.field_values.iter().collect();
        fields.sort_by(|a, b| a.name.cmp(&b.name));

        let parts: Vec<String> = match self.mode {
            CanonicalMode::Values => fields.iter().map(|f| f.value.to_string()).collect(),
            CanonicalMode::NamedPairs => fields
                .iter()
                .map(|f| format!("{}={}", f.name, f.value))
                .collect(),
        };

        RowKey::new(parts.join(" "))
    }
}

/// Value-only canonical key of `row`.
pub fn canonicalize(row: &Row) -> RowKey {
    KeyCanonicalizer::default().canonicalize(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::value::Value;

    fn row(fields: &[(&str, Value)]) -> Row {
        fields.iter().cloned().collect()
    }

    #[test]
    fn test_values_sorted_by_column_name() {
        let r = row(&[("val", Value::from("x")), ("id", Value::Int(1))]);
        assert_eq!(canonicalize(&r).as_str(), "1 x");
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let a = row(&[
            ("id", Value::Int(7)),
            ("name", Value::from("ann")),
            ("active", Value::Boolean(true)),
        ]);
        let b = row(&[
            ("active", Value::Boolean(true)),
            ("id", Value::Int(7)),
            ("name", Value::from("ann")),
        ]);

        for mode in [CanonicalMode::Values, CanonicalMode::NamedPairs] {
            let canon = KeyCanonicalizer::new(mode);
            assert_eq!(canon.canonicalize(&a), canon.canonicalize(&b));
        }
    }

    #[test]
    fn test_different_values_give_different_keys() {
        let a = row(&[("id", Value::Int(1)), ("val", Value::from("x"))]);
        let b = row(&[("id", Value::Int(1)), ("val", Value::from("y"))]);
        let c = row(&[("id", Value::Int(2)), ("val", Value::from("x"))]);

        assert_ne!(canonicalize(&a), canonicalize(&b));
        assert_ne!(canonicalize(&a), canonicalize(&c));
    }

    #[test]
    fn test_known_collision_in_values_mode() {
        // Value-only keys ignore column names: these structurally different
        // rows sort to the same value sequence and therefore collide.
        let a = row(&[("id", Value::Int(1)), ("val", Value::from("x"))]);
        let b = row(&[("key", Value::Int(1)), ("name", Value::from("x"))]);
        assert_eq!(canonicalize(&a), canonicalize(&b));

        let named = KeyCanonicalizer::new(CanonicalMode::NamedPairs);
        assert_ne!(named.canonicalize(&a), named.canonicalize(&b));
    }

    #[test]
    fn test_known_collision_with_embedded_separator() {
        let a = row(&[("a", Value::from("x y"))]);
        let b = row(&[("a", Value::from("x")), ("b", Value::from("y"))]);
        assert_eq!(canonicalize(&a), canonicalize(&b));
    }

    #[test]
    fn test_named_pairs_format() {
        let r = row(&[("val", Value::from("x")), ("id", Value::Int(1))]);
        let named = KeyCanonicalizer::new(CanonicalMode::NamedPairs);
        let key = named.canonicalize(&r);
        assert_eq!(key.as_str(), "id=1 val=x");
    }

    #[test]
    fn test_empty_row() {
        assert_eq!(canonicalize(&Row::default()).as_str(), "");
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("values".parse(), Ok(CanonicalMode::Values));
        assert_eq!("Named".parse(), Ok(CanonicalMode::NamedPairs));
        assert_eq!(
            "hash".parse::<CanonicalMode>(),
            Err(CanonicalError::UnknownMode("hash".into()))
        );
    }
}
