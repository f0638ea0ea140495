//! Composite cell codec
//!
//! A composite cell is a `|`-joined sequence of option groups; each group is
//! a `,`-joined sequence of `key=value` pairs. Values that would break the
//! grammar are wrapped in `"` with inner quotes doubled; keys are never
//! wrapped and must not contain reserved characters.
//!
//! ```
//! use catalog_export::core::codec::{
//!     Enclosure, MultiValueDecoder, MultiValueEncoder, OptionGroup,
//! };
//!
//! let groups = vec![
//!     OptionGroup::new().with("name", "Color").with("option_title", "Red"),
//!     OptionGroup::new().with("name", "Color").with("option_title", "Red, dark"),
//! ];
//!
//! let cell = MultiValueEncoder::new(Enclosure::Minimal).encode(&groups).unwrap();
//! assert_eq!(
//!     cell,
//!     "name=Color,option_title=Red|name=Color,option_title=\"Red, dark\""
//! );
//! assert_eq!(MultiValueDecoder::new().decode(&cell).unwrap(), groups);
//! ```

pub mod decoder;
pub mod encoder;

pub use decoder::MultiValueDecoder;
pub use encoder::MultiValueEncoder;

use serde::{Deserialize, Serialize};

/// Separator between option groups
pub const GROUP_SEPARATOR: char = '|';
/// Separator between pairs inside a group
pub const PAIR_SEPARATOR: char = ',';
/// Separator between a key and its value
pub const KEY_VALUE_SEPARATOR: char = '=';
/// Value enclosure character
pub const ENCLOSURE: char = '"';

/// Kind of composite cell; decides which key every group must carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeFormat {
    CustomOptions,
    AdditionalAttributes,
    Variations,
    VariationLabels,
    TierPrices,
}

impl CompositeFormat {
    /// Key every group of this format must carry
    pub fn required_key(&self) -> Option<&'static str> {
        match self {
            Self::CustomOptions => Some("name"),
            Self::Variations => Some("sku"),
            Self::TierPrices => Some("qty"),
            Self::AdditionalAttributes | Self::VariationLabels => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CustomOptions => "custom_options",
            Self::AdditionalAttributes => "additional_attributes",
            Self::Variations => "configurable_variations",
            Self::VariationLabels => "configurable_variation_labels",
            Self::TierPrices => "tier_prices",
        }
    }
}

/// When composite values are wrapped in quotes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Enclosure {
    /// Only values that contain a separator or start with a quote
    #[default]
    Minimal,
    /// Every value
    Always,
}

impl From<bool> for Enclosure {
    /// Maps the fields-enclosure flag
    fn from(fields_enclosure: bool) -> Self {
        if fields_enclosure {
            Self::Always
        } else {
            Self::Minimal
        }
    }
}

/// Ordered `key=value` pairs of one option group
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OptionGroup {
    pairs: Vec<(String, String)>,
}

impl OptionGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pair, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Appends a pair
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Value of the first pair with the given key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OptionGroup {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
