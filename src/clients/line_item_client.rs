use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::clients::ProductClient;
use crate::domain::{LineItem, LineItemCreate, LineItemDetail};
use crate::line_item_actor::LineItemError;

/// Client for the line item ledger.
///
/// Joined lookups go to the product actor through the embedded [`ProductClient`].
#[derive(Clone)]
pub struct LineItemClient {
    inner: ResourceClient<LineItem>,
    product_client: ProductClient,
}

impl_client_methods!(LineItemClient, LineItem, LineItemError, line_item);

impl LineItemClient {
    pub fn new(inner: ResourceClient<LineItem>, product_client: ProductClient) -> Self {
        Self { inner, product_client }
    }

    /// Records a line item and returns its id.
    #[instrument(skip(self))]
    pub async fn create_line_item(&self, product: String, quantity: u32) -> Result<String, LineItemError> {
        debug!("Sending request");
        Ok(self.inner.create(LineItemCreate { product, quantity }).await?)
    }

    /// Fetches a line item together with the current state of its product.
    #[instrument(skip(self))]
    pub async fn get_line_item_with_product(&self, id: String) -> Result<LineItemDetail, LineItemError> {
        debug!("Sending request");
        let item = self
            .inner
            .get(id.clone())
            .await?
            .ok_or(LineItemError::NotFound(id))?;
        let product = self
            .product_client
            .get_product(item.product.clone())
            .await
            .map_err(|e| LineItemError::ActorCommunicationError(e.to_string()))?;
        Ok(LineItemDetail::new(item, product))
    }
}
