//! Export request parameters
//!
//! Callers hand in the loosely typed request form (`fields_enclosure` plus an
//! `export_filter` map); [`ExportParameters::parse`] turns it into a
//! validated [`FilterSpec`].

use crate::config::ExportConfig;
use crate::core::attributes::ExportHeader;
use crate::domain::{AttributeRange, CategoryId, ExportError, FilterSpec, Result, StockStatusFilter};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const CATEGORY_IDS: &str = "category_ids";
pub const QUANTITY_AND_STOCK_STATUS: &str = "quantity_and_stock_status";

/// One `export_filter` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    /// `[from, to]`; an empty bound is open
    Range([String; 2]),
}

/// Unvalidated export request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawExportParameters {
    #[serde(default)]
    pub fields_enclosure: bool,

    #[serde(default)]
    pub export_filter: BTreeMap<String, FilterValue>,
}

impl RawExportParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields_enclosure(mut self, enabled: bool) -> Self {
        self.fields_enclosure = enabled;
        self
    }

    pub fn filter_text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.export_filter
            .insert(key.into(), FilterValue::Text(value.into()));
        self
    }

    pub fn filter_range(
        mut self,
        code: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.export_filter
            .insert(code.into(), FilterValue::Range([from.into(), to.into()]));
        self
    }

    /// Request form of the configured export settings
    pub fn from_config(config: &ExportConfig) -> Self {
        let mut raw = Self::new().fields_enclosure(config.fields_enclosure);

        if !config.filter.category_ids.is_empty() {
            let ids: Vec<String> = config
                .filter
                .category_ids
                .iter()
                .map(|id| id.to_string())
                .collect();
            raw = raw.filter_text(CATEGORY_IDS, ids.join(","));
        }
        if !config.filter.quantity_and_stock_status.is_empty() {
            raw = raw.filter_text(
                QUANTITY_AND_STOCK_STATUS,
                config.filter.quantity_and_stock_status.as_str(),
            );
        }
        for (code, [from, to]) in &config.filter.ranges {
            raw = raw.filter_range(code.as_str(), from.as_str(), to.as_str());
        }
        raw
    }
}

/// Validated export request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportParameters {
    pub fields_enclosure: bool,
    pub filter: FilterSpec,
}

impl ExportParameters {
    /// Validates the request form
    ///
    /// Unknown text keys are ignored. A range whose bounds are both empty
    /// places no restriction and is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Validation`] for a malformed `category_ids`
    /// list or stock status, or when either of them is given as a range.
    pub fn parse(raw: &RawExportParameters) -> Result<Self> {
        let mut filter = FilterSpec::default();

        for (key, value) in &raw.export_filter {
            match (key.as_str(), value) {
                (CATEGORY_IDS, FilterValue::Text(text)) => {
                    filter.category_ids = parse_category_ids(text)?;
                }
                (QUANTITY_AND_STOCK_STATUS, FilterValue::Text(text)) => {
                    filter.stock_status = text
                        .parse::<StockStatusFilter>()
                        .map_err(ExportError::Validation)?;
                }
                (CATEGORY_IDS | QUANTITY_AND_STOCK_STATUS, FilterValue::Range(_)) => {
                    return Err(ExportError::Validation(format!(
                        "Filter '{}' does not accept a range",
                        key
                    )));
                }
                (_, FilterValue::Range([from, to])) => {
                    if from.trim().is_empty() && to.trim().is_empty() {
                        continue;
                    }
                    filter
                        .attribute_ranges
                        .insert(key.clone(), AttributeRange::new(from.trim(), to.trim()));
                }
                (_, FilterValue::Text(_)) => {
                    tracing::debug!(key = %key, "Ignoring unknown export filter key");
                }
            }
        }

        Ok(Self {
            fields_enclosure: raw.fields_enclosure,
            filter,
        })
    }

    /// Drops ranges on codes that are not exported catalog attributes
    pub fn prune_ranges(&mut self, header: &ExportHeader) {
        self.filter.attribute_ranges.retain(|code, _| {
            let known = header.attribute(code).is_some();
            if !known {
                tracing::warn!(attribute = %code, "Ignoring range filter on unknown attribute");
            }
            known
        });
    }
}

/// `""` means no restriction
fn parse_category_ids(text: &str) -> Result<Option<BTreeSet<CategoryId>>> {
    if text.trim().is_empty() {
        return Ok(None);
    }

    text.split(',')
        .map(|part| {
            part.trim().parse::<u64>().map(CategoryId::new).map_err(|e| {
                ExportError::Validation(format!("Invalid category id '{}': {}", part.trim(), e))
            })
        })
        .collect::<Result<BTreeSet<_>>>()
        .map(Some)
}
