use chrono::Utc;
use rust_decimal::Decimal;

use super::actions::{ProductAction, ProductActionResult, StockReservation};
use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductPatch};

impl Entity for Product {
    type Id = String;
    type CreateParams = ProductCreate;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;

    const COLLECTION: &'static str = "products";

    /// Creates a new Product from creation parameters.
    ///
    /// Rejects a blank name, a negative price or a negative stock count.
    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, String> {
        if params.name.trim().is_empty() {
            return Err("Product name is required".to_string());
        }
        if params.price < Decimal::ZERO {
            return Err(format!("Price must not be negative: {}", params.price));
        }
        if params.count_in_stock < 0 {
            return Err(format!("Stock must not be negative: {}", params.count_in_stock));
        }
        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            price: params.price,
            count_in_stock: params.count_in_stock,
            category: params.category,
            is_featured: params.is_featured,
            date_created: Utc::now(),
        })
    }

    /// Applies catalog field changes. Nothing is written if any field is invalid.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), String> {
        if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err("Product name is required".to_string());
        }
        if let Some(price) = patch.price.filter(|p| *p < Decimal::ZERO) {
            return Err(format!("Price must not be negative: {price}"));
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(is_featured) = patch.is_featured {
            self.is_featured = is_featured;
        }
        Ok(())
    }

    /// Handles product-specific actions.
    ///
    /// `SetStock` writes whatever it is given, including negative values;
    /// `ReserveStock` is the only check-and-decrement performed inside the actor.
    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, String> {
        match action {
            ProductAction::SetStock(count) => {
                self.count_in_stock = count;
                Ok(ProductActionResult::SetStock(self.clone()))
            }
            ProductAction::ReserveStock(amount) => {
                let amount = i64::from(amount);
                let reservation = if self.count_in_stock >= amount {
                    self.count_in_stock -= amount;
                    StockReservation::Reserved {
                        remaining: self.count_in_stock,
                    }
                } else {
                    StockReservation::Insufficient {
                        available: self.count_in_stock,
                    }
                };
                Ok(ProductActionResult::ReserveStock(reservation))
            }
            ProductAction::Restock(amount) => {
                self.count_in_stock += i64::from(amount);
                Ok(ProductActionResult::Restock(self.count_in_stock))
            }
        }
    }
}
