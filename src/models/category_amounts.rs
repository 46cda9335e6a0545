use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{AppError, AppResult};

/// Category label to amount, in the order the provider sent them.
///
/// The order fixes pie slice order and the line chart axis, so this is a
/// list of pairs rather than a hash map. Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryAmounts {
    entries: Vec<(String, f64)>,
}

impl CategoryAmounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from pairs. Later duplicates of a label are ignored.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut amounts = Self::new();
        for (label, value) in pairs {
            let label = label.into();
            if amounts.get(&label).is_none() {
                amounts.entries.push((label, value));
            }
        }
        amounts
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| *v)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), *v))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }

    /// Rejects negative or non-finite amounts.
    pub fn validate(&self) -> AppResult<()> {
        match self.entries.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            Some((label, value)) => Err(AppError::InvalidInput(format!(
                "amount for '{}' must be a non-negative number, got {}",
                label, value
            ))),
            None => Ok(()),
        }
    }
}

impl Serialize for CategoryAmounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

struct CategoryAmountsVisitor;

impl<'de> Visitor<'de> for CategoryAmountsVisitor {
    type Value = CategoryAmounts;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object mapping category labels to amounts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut amounts = CategoryAmounts::new();
        while let Some((label, value)) = access.next_entry::<String, f64>()? {
            if amounts.contains(&label) {
                return Err(de::Error::custom(format!("duplicate category '{}'", label)));
            }
            amounts.entries.push((label, value));
        }
        Ok(amounts)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(CategoryAmounts::new())
    }
}

impl<'de> Deserialize<'de> for CategoryAmounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CategoryAmountsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_keeps_document_order() {
        let amounts: CategoryAmounts =
            serde_json::from_str(r#"{"Rent": 1200, "Food": 300.5, "Bills": 90}"#).unwrap();
        let labels: Vec<&str> = amounts.labels().collect();
        assert_eq!(labels, vec!["Rent", "Food", "Bills"]);
        assert_eq!(amounts.get("Food"), Some(300.5));
    }

    #[test]
    fn test_serialize_keeps_insertion_order() {
        let amounts = CategoryAmounts::from_pairs([("Zoo", 1.0), ("Apple", 2.0)]);
        assert_eq!(
            serde_json::to_string(&amounts).unwrap(),
            r#"{"Zoo":1.0,"Apple":2.0}"#
        );
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let result: Result<CategoryAmounts, _> = serde_json::from_str(r#"{"A": 1, "A": 2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_null_is_empty() {
        let amounts: CategoryAmounts = serde_json::from_str("null").unwrap();
        assert!(amounts.is_empty());
    }

    #[test]
    fn test_validate_rejects_negative() {
        let amounts = CategoryAmounts::from_pairs([("Food", 10.0), ("Refund", -5.0)]);
        assert!(matches!(
            amounts.validate(),
            Err(AppError::InvalidInput(msg)) if msg.contains("Refund")
        ));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let amounts = CategoryAmounts::from_pairs([("Food", f64::NAN)]);
        assert!(amounts.validate().is_err());
    }
}
