//! Attribute metadata and values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity types the catalog can describe attributes for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// Catalog products (simple and composite)
    CatalogProduct,
}

impl EntityType {
    /// Catalog entity type code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CatalogProduct => "catalog_product",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scope at which an attribute value may differ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AttributeScope {
    /// One value for the whole catalog
    #[default]
    Global,
    /// One value per website
    Website,
    /// One value per store view
    Store,
}

impl AttributeScope {
    /// Returns true if values may be overridden below the admin scope
    pub fn is_scoped(&self) -> bool {
        !matches!(self, Self::Global)
    }
}

/// Exportable attribute description
///
/// Built once per run from catalog metadata plus the fixed stock-item list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    /// Attribute code, used verbatim as the column name
    pub code: String,

    /// Value scope
    #[serde(default)]
    pub scope: AttributeScope,

    /// Multi-select values are joined by `,` in a dedicated column and by
    /// `|` inside the additional attributes cell
    #[serde(default)]
    pub multi_valued: bool,

    /// User-defined attributes are exported inside `additional_attributes`
    /// instead of a dedicated column
    #[serde(default)]
    pub user_defined: bool,
}

impl AttributeDescriptor {
    /// Creates a global, single-valued, system attribute
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            scope: AttributeScope::Global,
            multi_valued: false,
            user_defined: false,
        }
    }

    /// Sets the scope
    pub fn with_scope(mut self, scope: AttributeScope) -> Self {
        self.scope = scope;
        self
    }

    /// Marks the attribute as multi-valued
    pub fn multi_valued(mut self) -> Self {
        self.multi_valued = true;
        self
    }

    /// Marks the attribute as user-defined
    pub fn user_defined(mut self) -> Self {
        self.user_defined = true;
        self
    }
}

/// Raw attribute value as stored in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Single scalar value, already rendered as text
    Text(String),
    /// Multi-select values
    Multi(Vec<String>),
}

impl AttributeValue {
    /// Renders the value for a CSV cell
    pub fn render(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Multi(values) => values.join(","),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_builder() {
        let descriptor = AttributeDescriptor::new("color")
            .with_scope(AttributeScope::Store)
            .multi_valued()
            .user_defined();

        assert_eq!(descriptor.code, "color");
        assert_eq!(descriptor.scope, AttributeScope::Store);
        assert!(descriptor.multi_valued);
        assert!(descriptor.user_defined);
    }

    #[test]
    fn test_scope_is_scoped() {
        assert!(!AttributeScope::Global.is_scoped());
        assert!(AttributeScope::Website.is_scoped());
        assert!(AttributeScope::Store.is_scoped());
    }

    #[test]
    fn test_value_render() {
        assert_eq!(AttributeValue::from("Red").render(), "Red");
        let multi = AttributeValue::Multi(vec!["Red".to_string(), "Blue".to_string()]);
        assert_eq!(multi.render(), "Red,Blue");
    }

    #[test]
    fn test_value_deserializes_untagged() {
        let text: AttributeValue = serde_json::from_str("\"10.00\"").unwrap();
        assert_eq!(text, AttributeValue::Text("10.00".to_string()));
        let multi: AttributeValue = serde_json::from_str("[\"a\",\"b\"]").unwrap();
        assert_eq!(
            multi,
            AttributeValue::Multi(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_descriptor_defaults_from_json() {
        let descriptor: AttributeDescriptor = serde_json::from_str(r#"{"code":"name"}"#).unwrap();
        assert_eq!(descriptor, AttributeDescriptor::new("name"));
    }
}
