use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Units available for sale. Signed so that an oversold product stays observable.
    pub count_in_stock: i64,
    pub category: String,
    pub is_featured: bool,
    pub date_created: DateTime<Utc>,
}

/// Payload for creating a new product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub count_in_stock: i64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub is_featured: bool,
}

/// Payload for updating catalog fields. Stock moves only through product actions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub is_featured: Option<bool>,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal, count_in_stock: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            count_in_stock,
            category: String::new(),
            is_featured: false,
            date_created: Utc::now(),
        }
    }

    /// True when the product belongs to one of the given categories.
    pub fn in_any_category(&self, categories: &[&str]) -> bool {
        categories.iter().any(|c| *c == self.category)
    }
}

impl ProductCreate {
    pub fn new(name: impl Into<String>, price: Decimal, count_in_stock: i64) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            price,
            count_in_stock,
            category: String::new(),
            is_featured: false,
        }
    }
}
