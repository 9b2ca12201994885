use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Free-text fields that keep autocomplete history.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum SuggestionField {
    Component,
    SubComponent,
    Manpower,
    Material,
}

/// Distinct values seen per field, in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuggestionRegistry {
    values: BTreeMap<SuggestionField, Vec<String>>,
}

impl Default for SuggestionRegistry {
    fn default() -> Self {
        Self {
            values: SuggestionField::iter().map(|f| (f, Vec::new())).collect(),
        }
    }
}

impl SuggestionRegistry {
    /// Records a value unless it is blank or already known. Returns whether it
    /// was added.
    pub fn register(&mut self, field: SuggestionField, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }
        let known = self.values.entry(field).or_default();
        if known.iter().any(|v| v == value) {
            return false;
        }
        known.push(value.to_string());
        true
    }

    pub fn register_all<'a, I>(&mut self, field: SuggestionField, values: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for value in values {
            self.register(field, value);
        }
    }

    pub fn values(&self, field: SuggestionField) -> &[String] {
        self.values.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_only_new_values() {
        let mut registry = SuggestionRegistry::default();
        assert!(registry.register(SuggestionField::Manpower, "Budi"));
        assert!(!registry.register(SuggestionField::Manpower, "Budi"));
        assert!(!registry.register(SuggestionField::Manpower, "   "));
        assert!(registry.register(SuggestionField::Material, "Budi"));
        assert_eq!(registry.values(SuggestionField::Manpower), ["Budi"]);
    }

    #[test]
    fn persists_as_field_keyed_object() {
        let mut registry = SuggestionRegistry::default();
        registry.register(SuggestionField::SubComponent, "Radiator");
        let json = serde_json::to_value(&registry).unwrap();
        assert_eq!(json["subComponent"][0], "Radiator");
        assert_eq!(json["component"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn tolerates_missing_fields_when_loading() {
        let registry: SuggestionRegistry =
            serde_json::from_str(r#"{"manpower":["Sari"]}"#).unwrap();
        assert_eq!(registry.values(SuggestionField::Manpower), ["Sari"]);
        assert!(registry.values(SuggestionField::Material).is_empty());
    }
}
