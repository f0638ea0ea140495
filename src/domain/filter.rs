//! Declarative entity filter
//!
//! Applied at cursor construction and immutable for the run.

use super::ids::CategoryId;
use super::product::{Product, StockItem};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

/// Stock status restriction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StockStatusFilter {
    /// No restriction
    #[default]
    Any,
    InStock,
    OutOfStock,
}

impl StockStatusFilter {
    pub fn matches(&self, stock: &StockItem) -> bool {
        match self {
            Self::Any => true,
            Self::InStock => stock.is_in_stock,
            Self::OutOfStock => !stock.is_in_stock,
        }
    }
}

impl FromStr for StockStatusFilter {
    type Err = String;

    /// Parses the request form: `""` any, `"1"` in stock, `"0"` out of stock
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Ok(Self::Any),
            "1" => Ok(Self::InStock),
            "0" => Ok(Self::OutOfStock),
            other => Err(format!(
                "Invalid quantity_and_stock_status '{other}'. Must be '', '1' or '0'"
            )),
        }
    }
}

/// Inclusive attribute range; an empty bound is open
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AttributeRange {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
}

impl AttributeRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Checks a rendered value against both bounds.
    ///
    /// Numeric comparison is used when the value and the bound both parse as
    /// numbers, lexical comparison otherwise.
    pub fn contains(&self, value: &str) -> bool {
        let lower_ok = self.from.is_empty() || compare(value, &self.from) != Ordering::Less;
        let upper_ok = self.to.is_empty() || compare(value, &self.to) != Ordering::Greater;
        lower_ok && upper_ok
    }
}

fn compare(value: &str, bound: &str) -> Ordering {
    match (value.trim().parse::<f64>(), bound.trim().parse::<f64>()) {
        (Ok(v), Ok(b)) => v.partial_cmp(&b).unwrap_or(Ordering::Equal),
        _ => value.cmp(bound),
    }
}

/// Entity filter specification
///
/// # Examples
///
/// ```
/// use catalog_export::domain::filter::{FilterSpec, StockStatusFilter};
/// use catalog_export::domain::product::{ProductBuilder, StockItem};
///
/// let filter = FilterSpec::default()
///     .with_categories([2, 13])
///     .with_stock_status(StockStatusFilter::InStock);
///
/// let product = ProductBuilder::new(1, "simple").category(13).build();
/// assert!(filter.matches(&product, &StockItem::in_stock(10.0)));
/// assert!(!filter.matches(&product, &StockItem::out_of_stock()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterSpec {
    /// OR semantics; `None` means no restriction
    #[serde(default)]
    pub category_ids: Option<BTreeSet<CategoryId>>,

    #[serde(default)]
    pub stock_status: StockStatusFilter,

    #[serde(default)]
    pub attribute_ranges: BTreeMap<String, AttributeRange>,
}

impl FilterSpec {
    pub fn with_categories(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.category_ids = Some(ids.into_iter().map(CategoryId::new).collect());
        self
    }

    pub fn with_stock_status(mut self, status: StockStatusFilter) -> Self {
        self.stock_status = status;
        self
    }

    pub fn with_range(mut self, code: impl Into<String>, range: AttributeRange) -> Self {
        self.attribute_ranges.insert(code.into(), range);
        self
    }

    /// Returns true if no restriction is set
    pub fn is_unrestricted(&self) -> bool {
        self.category_ids.is_none()
            && self.stock_status == StockStatusFilter::Any
            && self.attribute_ranges.is_empty()
    }

    /// Evaluates the filter against a product and its stock record.
    ///
    /// Ranges are checked against admin-scope values; a product without a
    /// value for a ranged attribute is excluded.
    pub fn matches(&self, product: &Product, stock: &StockItem) -> bool {
        if let Some(categories) = &self.category_ids {
            if product.category_ids.is_disjoint(categories) {
                return false;
            }
        }

        if !self.stock_status.matches(stock) {
            return false;
        }

        self.attribute_ranges.iter().all(|(code, range)| {
            product
                .value(code)
                .map(|value| range.contains(&value.render()))
                .unwrap_or(false)
        })
    }
}
