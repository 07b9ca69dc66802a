//! Menu Product Model

use serde::{Deserialize, Serialize};

/// Product category; determines the preparation sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCategory {
    Food,
    Drink,
    Dessert,
}

/// Preparation sector. Kitchen handles food and dessert, bar handles
/// drinks; every line item routes to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sector {
    Kitchen,
    Bar,
}

impl ProductCategory {
    pub const fn sector(self) -> Sector {
        match self {
            Self::Food | Self::Dessert => Sector::Kitchen,
            Self::Drink => Sector::Bar,
        }
    }
}

/// Menu product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuProduct {
    pub id: String,
    pub name: String,
    /// Price in currency unit
    pub price: f64,
    pub category: ProductCategory,
    /// Estimated preparation time in minutes
    pub prep_minutes: u32,
}
