use serde::{Deserialize, Serialize};

use super::Product;

/// One product and quantity entry, owned by exactly one order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    pub quantity: u32,
    pub product: String,
}

/// Payload for recording a new line item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LineItemCreate {
    pub product: String,
    pub quantity: u32,
}

/// A line item joined with the current state of its product.
///
/// `product` is `None` when the product has been deleted since the item was recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemDetail {
    pub id: String,
    pub quantity: u32,
    pub product: Option<Product>,
}

impl LineItemDetail {
    pub fn new(item: LineItem, product: Option<Product>) -> Self {
        Self {
            id: item.id,
            quantity: item.quantity,
            product,
        }
    }
}
