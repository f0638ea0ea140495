//! Domain identifier types
//!
//! Newtype wrappers for catalog identifiers. Product, store, website and
//! category ids are all plain integers in the catalog storage; wrapping them
//! keeps a store id from ever being passed where a website id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident($inner:ty), $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name($inner);

        impl $name {
            /// Wraps a raw identifier
            pub const fn new(id: $inner) -> Self {
                Self(id)
            }

            /// Returns the raw identifier
            pub const fn get(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<$inner>()
                    .map(Self)
                    .map_err(|e| format!("Invalid {} '{}': {}", $label, s, e))
            }
        }

        impl From<$inner> for $name {
            fn from(id: $inner) -> Self {
                Self(id)
            }
        }
    };
}

numeric_id!(
    /// Product entity identifier
    ///
    /// ```
    /// use catalog_export::domain::ids::ProductId;
    /// use std::str::FromStr;
    ///
    /// let id = ProductId::from_str("42").unwrap();
    /// assert_eq!(id.get(), 42);
    /// ```
    ProductId(u64),
    "product id"
);

numeric_id!(
    /// Store view identifier; `0` is the admin (global) scope
    StoreId(u32),
    "store id"
);

numeric_id!(
    /// Website identifier; `0` is the admin website
    WebsiteId(u32),
    "website id"
);

numeric_id!(
    /// Category identifier
    CategoryId(u64),
    "category id"
);

impl StoreId {
    /// The admin store view, which carries default (global) values
    pub const ADMIN: StoreId = StoreId(0);

    /// Returns true for the admin store view
    pub fn is_admin(self) -> bool {
        self == Self::ADMIN
    }
}
