use core::str::FromStr;

use serde::{Deserialize, Serialize};

use plantpal_core::{DomainError, DomainResult, Money, ProductId};

macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Human-readable label, also used in persisted data and query parameters.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| {
                        DomainError::validation(format!(
                            "unknown {}: {s:?}",
                            stringify!($name)
                        ))
                    })
            }
        }
    };
}

labelled_enum! {
    /// Product category.
    pub enum Category {
        AirPurifying => "Air Purifying",
        LowMaintenance => "Low Maintenance",
        PetFriendly => "Pet Friendly",
        Succulents => "Succulents",
        Hanging => "Hanging",
        DeskPlants => "Desk Plants",
        StatementPlants => "Statement Plants",
    }
}

labelled_enum! {
    /// How much attention a plant needs.
    pub enum CareLevel {
        Easy => "Easy",
        Medium => "Medium",
        Hard => "Hard",
    }
}

labelled_enum! {
    /// How much light a plant needs.
    pub enum LightNeeds {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
}

/// Care instructions shown on the product detail view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CareGuide {
    pub light: String,
    pub water: String,
    pub humidity: String,
    pub temperature: String,
    pub fertilizer: String,
}

/// Catalog record. Products never change once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    /// Pre-discount price; only used to show a discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    pub image: String,
    pub description: String,
    pub short_description: String,
    pub category: Category,
    pub care_level: CareLevel,
    pub light_needs: LightNeeds,
    pub watering: String,
    pub pot_size: String,
    pub height: String,
    /// 0.0 to 5.0
    pub rating: f32,
    pub reviews: u32,
    pub in_stock: bool,
    pub features: Vec<String>,
    pub care_guide: CareGuide,
}

impl Product {
    /// Whole-percent discount relative to the original price, rounded half up.
    ///
    /// `None` when there is no original price or it is not above the price.
    pub fn discount_percent(&self) -> Option<u8> {
        let original = u128::from(self.original_price?.cents());
        let price = u128::from(self.price.cents());
        if original <= price {
            return None;
        }
        let off = (original - price) * 200 + original;
        u8::try_from(off / (original * 2)).ok()
    }

    /// Case-insensitive substring match against name, description or category.
    ///
    /// `needle_lower` must already be lowercased; an empty needle matches.
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || self.name.to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
            || self.category.as_str().to_lowercase().contains(needle_lower)
    }

    pub(crate) fn validate(&self) -> DomainResult<()> {
        if self.id.as_str().trim().is_empty() {
            return Err(DomainError::invalid_id("product id cannot be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "product {}: name cannot be empty",
                self.id
            )));
        }
        if self.price.is_zero() {
            return Err(DomainError::validation(format!(
                "product {}: price must be positive",
                self.id
            )));
        }
        if let Some(original) = self.original_price {
            if original < self.price {
                return Err(DomainError::invariant(format!(
                    "product {}: original price {original} is below price {}",
                    self.id, self.price
                )));
            }
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(DomainError::validation(format!(
                "product {}: rating {} outside 0-5",
                self.id, self.rating
            )));
        }
        Ok(())
    }
}
