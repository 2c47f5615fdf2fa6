use tracing::{debug, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::domain::{Product, ProductCreate, ProductPatch};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError, StockReservation};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product);

fn unexpected(result: &ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("Unexpected result: {result:?}"))
}

impl ProductClient {
    /// Creates the product and returns it as stored.
    #[instrument(skip(self, params), fields(product_name = %params.name))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        let id = self.inner.create(params).await?;
        let product = self
            .inner
            .get(id.clone())
            .await?
            .ok_or(ProductError::NotFound(id))?;
        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Changes catalog fields and returns the updated product.
    #[instrument(skip(self, patch))]
    pub async fn update_product(&self, id: String, patch: ProductPatch) -> Result<Product, ProductError> {
        debug!("Sending request");
        let product = self.inner.update(id, patch).await?;
        info!(product_id = %product.id, "Product updated");
        Ok(product)
    }

    /// Lists products, keeping only those in one of `categories` when given.
    #[instrument(skip(self))]
    pub async fn list_filtered(&self, categories: Option<&[&str]>) -> Result<Vec<Product>, ProductError> {
        let products = self.list_products().await?;
        Ok(match categories {
            Some(categories) => products.into_iter().filter(|p| p.in_any_category(categories)).collect(),
            None => products,
        })
    }

    #[instrument(skip(self))]
    pub async fn list_featured(&self) -> Result<Vec<Product>, ProductError> {
        let products = self.list_products().await?;
        Ok(products.into_iter().filter(|p| p.is_featured).collect())
    }

    /// Overwrites the stock count and returns the updated product.
    #[instrument(skip(self))]
    pub async fn set_stock(&self, id: String, count: i64) -> Result<Product, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::SetStock(count)).await? {
            ProductActionResult::SetStock(product) => {
                if product.count_in_stock < 0 {
                    warn!(product_id = %product.id, stock = product.count_in_stock, "Stock went negative");
                }
                Ok(product)
            }
            other => Err(unexpected(&other)),
        }
    }

    /// Decrements stock only if enough is available, returning what remains.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: String, quantity: u32) -> Result<i64, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id.clone(), ProductAction::ReserveStock(quantity)).await? {
            ProductActionResult::ReserveStock(StockReservation::Reserved { remaining }) => Ok(remaining),
            ProductActionResult::ReserveStock(StockReservation::Insufficient { available }) => {
                Err(ProductError::InsufficientStock {
                    product_id: id,
                    requested: quantity,
                    available,
                })
            }
            other => Err(unexpected(&other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn restock(&self, id: String, quantity: u32) -> Result<i64, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::Restock(quantity)).await? {
            ProductActionResult::Restock(level) => Ok(level),
            other => Err(unexpected(&other)),
        }
    }
}
