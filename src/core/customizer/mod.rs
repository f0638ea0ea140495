//! Row customizers
//!
//! Pluggable hooks that add computed columns to product rows. The default
//! product customizer chain adds product links, configurable variations and
//! tier prices.

pub mod composite;
pub mod configurable;
pub mod links;
pub mod tier_price;
pub mod traits;

pub use composite::CompositeRowCustomizer;
pub use configurable::ConfigurableVariationsCustomizer;
pub use links::ProductLinksCustomizer;
pub use tier_price::TierPriceCustomizer;
pub use traits::RowCustomizer;

/// Customizer chain used for catalog products unless one is supplied
pub fn default_product_customizer() -> CompositeRowCustomizer {
    CompositeRowCustomizer::new()
        .with(Box::new(ProductLinksCustomizer::new()))
        .with(Box::new(ConfigurableVariationsCustomizer::new()))
        .with(Box::new(TierPriceCustomizer::new()))
}
