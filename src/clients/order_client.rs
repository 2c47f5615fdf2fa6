use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{debug, error, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::app_system::{OrderSettings, StockPolicy};
use crate::clients::{LineItemClient, ProductClient, UserClient};
use crate::domain::{
    LineItemDetail, Order, OrderCreate, OrderOwner, OrderPatch, OrderView, PlaceOrder, Product, ShippingInfo,
    STATUS_PENDING,
};
use crate::line_item_actor::LineItemError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::pricing;

const MISSING_FIELDS: &str = "Missing required fields: shippingAddress1, city, zip, country, phone, or orderItems";
const INCOMPLETE_LINE: &str = "Each order item must include both a quantity and a product ID.";

/// One cart line that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLine {
    pub product_id: String,
    pub quantity: u32,
}

/// An order request that passed validation and the stock pre-check, ready to commit.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedOrder {
    pub shipping: ShippingInfo,
    pub status: String,
    pub lines: Vec<ValidatedLine>,
}

/// Writes made by a commit so far, in the order they happened.
#[derive(Debug, Default)]
struct CommitLog {
    line_items: Vec<String>,
    stock_taken: Vec<(String, u32)>,
}

/// Client for interacting with the Order actor.
///
/// This client handles the order placement workflow, coordinating the product,
/// line item and order stores. None of the steps are retried.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    user_client: UserClient,
    product_client: ProductClient,
    line_item_client: LineItemClient,
    settings: OrderSettings,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        user_client: UserClient,
        product_client: ProductClient,
        line_item_client: LineItemClient,
        settings: OrderSettings,
    ) -> Self {
        Self {
            inner,
            user_client,
            product_client,
            line_item_client,
            settings,
        }
    }

    /// Places an order for `requester`.
    ///
    /// Validation and the stock pre-check happen before any write. Once the
    /// commit has started, a failure leaves earlier line items and stock changes
    /// in place unless compensation is enabled.
    #[instrument(skip(self, request), fields(user_id = %requester))]
    pub async fn place_order(&self, requester: &str, request: PlaceOrder) -> Result<Order, OrderError> {
        info!("Processing place_order request");
        let validated = self.validate_order(request).await?;
        self.commit_order(requester, validated).await
    }

    /// Validation phase: request shape, product existence, stock levels. No writes.
    #[instrument(skip(self, request))]
    pub async fn validate_order(&self, request: PlaceOrder) -> Result<ValidatedOrder, OrderError> {
        let validated = validate_request(request)?;

        for line in &validated.lines {
            let product = self
                .product_client
                .get_product(line.product_id.clone())
                .await?
                .ok_or_else(|| OrderError::ProductNotFound(line.product_id.clone()))?;

            if product.count_in_stock < i64::from(line.quantity) {
                warn!(
                    product_id = %product.id,
                    available = product.count_in_stock,
                    requested = line.quantity,
                    "Insufficient stock"
                );
                return Err(OrderError::InsufficientStock {
                    product_id: product.id,
                    available: product.count_in_stock,
                    requested: line.quantity,
                });
            }
        }

        debug!(lines = validated.lines.len(), "Order validated");
        Ok(validated)
    }

    /// Commit phase: line items, stock, total, order. Sequential, one store call per step.
    #[instrument(skip(self, validated), fields(user_id = %requester, lines = validated.lines.len()))]
    pub async fn commit_order(&self, requester: &str, validated: ValidatedOrder) -> Result<Order, OrderError> {
        let mut log = CommitLog::default();
        match self.run_commit(requester, validated, &mut log).await {
            Ok(order) => {
                info!(order_id = %order.id, total_price = %order.total_price, "Order placed");
                Ok(order)
            }
            Err(e) => {
                error!(
                    error = %e,
                    line_items = log.line_items.len(),
                    stock_changes = log.stock_taken.len(),
                    "Order commit failed"
                );
                if self.settings.compensate_on_failure {
                    self.compensate(log).await;
                } else if !log.line_items.is_empty() {
                    warn!(line_item_ids = ?log.line_items, "Partial commit left in place");
                }
                Err(e)
            }
        }
    }

    async fn run_commit(
        &self,
        requester: &str,
        validated: ValidatedOrder,
        log: &mut CommitLog,
    ) -> Result<Order, OrderError> {
        for line in &validated.lines {
            let item_id = self
                .line_item_client
                .create_line_item(line.product_id.clone(), line.quantity)
                .await?;
            log.line_items.push(item_id.clone());

            let product = self.line_item_product(item_id).await?;
            self.take_stock(&product, line.quantity).await?;
            log.stock_taken.push((product.id, line.quantity));
        }

        let total_price = self.price_line_items(&log.line_items).await?;

        let params = OrderCreate {
            order_items: log.line_items.clone(),
            shipping: validated.shipping,
            status: validated.status,
            total_price,
            user: requester.to_string(),
        };
        let id = self.inner.create(params).await?;
        self.inner
            .get(id.clone())
            .await?
            .ok_or_else(|| OrderError::Internal(format!("Order {id} missing after creation")))
    }

    async fn line_item_product(&self, item_id: String) -> Result<Product, OrderError> {
        self.line_item_client
            .get_line_item_with_product(item_id)
            .await?
            .product
            .ok_or_else(|| OrderError::Internal("Product not found".to_string()))
    }

    /// A product that vanishes here is an internal failure: a line item already exists.
    async fn take_stock(&self, product: &Product, quantity: u32) -> Result<(), OrderError> {
        let result = match self.settings.stock_policy {
            StockPolicy::ReadModifyWrite => {
                let updated = product.count_in_stock - i64::from(quantity);
                self.product_client.set_stock(product.id.clone(), updated).await.map(|_| ())
            }
            StockPolicy::AtomicReserve => self
                .product_client
                .reserve_stock(product.id.clone(), quantity)
                .await
                .map(|_| ()),
        };
        result.map_err(|e| match e {
            ProductError::NotFound(_) => OrderError::Internal("Product not found".to_string()),
            other => other.into(),
        })
    }

    /// Re-reads each line item with its product's current price and sums the subtotals.
    async fn price_line_items(&self, item_ids: &[String]) -> Result<Decimal, OrderError> {
        let mut subtotals = Vec::with_capacity(item_ids.len());
        for item_id in item_ids {
            let detail = self.line_item_client.get_line_item_with_product(item_id.clone()).await?;
            let price = detail
                .product
                .map(|p| p.price)
                .ok_or_else(|| OrderError::Internal("Product not found".to_string()))?;
            let subtotal = pricing::line_subtotal(price, detail.quantity)
                .ok_or_else(|| OrderError::Internal("Line subtotal overflow".to_string()))?;
            subtotals.push(subtotal);
        }
        pricing::order_total(subtotals).ok_or_else(|| OrderError::Internal("Order total overflow".to_string()))
    }

    /// Undoes a partial commit in reverse order. Best-effort: failures are logged and skipped.
    async fn compensate(&self, log: CommitLog) {
        for (product_id, quantity) in log.stock_taken.into_iter().rev() {
            if let Err(e) = self.product_client.restock(product_id.clone(), quantity).await {
                warn!(product_id = %product_id, error = %e, "Failed to restore stock");
            }
        }
        for item_id in log.line_items.into_iter().rev() {
            if let Err(e) = self.line_item_client.delete_line_item(item_id.clone()).await {
                warn!(line_item_id = %item_id, error = %e, "Failed to delete line item");
            }
        }
        info!("Partial commit rolled back");
    }

    /// Overwrites an order's status with whatever string is supplied.
    #[instrument(skip(self))]
    pub async fn set_order_status(&self, id: String, status: String) -> Result<Order, OrderError> {
        info!("Processing set_order_status request");
        Ok(self.inner.update(id, OrderPatch { status }).await?)
    }

    /// Deletes an order, then each of its line items.
    ///
    /// Line item deletion is best-effort: a failure is logged and the rest continue.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: String) -> Result<Order, OrderError> {
        info!("Processing delete_order request");
        let order = self.inner.delete(id).await?;
        for item_id in &order.order_items {
            if let Err(e) = self.line_item_client.delete_line_item(item_id.clone()).await {
                warn!(line_item_id = %item_id, error = %e, "Failed to delete line item");
            }
        }
        Ok(order)
    }

    /// Single order with its owner resolved and each line item expanded with its product.
    ///
    /// Line items that no longer exist are left out.
    #[instrument(skip(self))]
    pub async fn get_order(&self, id: String) -> Result<OrderView<LineItemDetail>, OrderError> {
        debug!("Sending request");
        let order = self
            .inner
            .get(id.clone())
            .await?
            .ok_or(OrderError::NotFound(id))?;

        let mut items = Vec::with_capacity(order.order_items.len());
        for item_id in &order.order_items {
            match self.line_item_client.get_line_item_with_product(item_id.clone()).await {
                Ok(detail) => items.push(detail),
                Err(LineItemError::NotFound(_)) => debug!(line_item_id = %item_id, "Dangling line item"),
                Err(e) => return Err(e.into()),
            }
        }

        let owner = self.resolve_owner(&order.user).await?;
        Ok(OrderView::new(order, items, owner))
    }

    /// Every order with its owner resolved. Line items stay as ids.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<OrderView<String>>, OrderError> {
        debug!("Sending request");
        let orders = self.inner.list().await?;

        let mut owners: HashMap<String, OrderOwner> = HashMap::new();
        let mut views = Vec::with_capacity(orders.len());
        for order in orders {
            let owner = match owners.get(&order.user) {
                Some(owner) => owner.clone(),
                None => {
                    let owner = self.resolve_owner(&order.user).await?;
                    owners.insert(order.user.clone(), owner.clone());
                    owner
                }
            };
            let items = order.order_items.clone();
            views.push(OrderView::new(order, items, owner));
        }
        Ok(views)
    }

    async fn resolve_owner(&self, user_id: &str) -> Result<OrderOwner, OrderError> {
        let name = self
            .user_client
            .get_user(user_id.to_string())
            .await?
            .map(|user| user.name);
        Ok(OrderOwner {
            id: user_id.to_string(),
            name,
        })
    }
}

/// Checks the request shape and normalises it. Pure; touches no store.
pub fn validate_request(request: PlaceOrder) -> Result<ValidatedOrder, OrderError> {
    fn required(value: Option<String>) -> Result<String, OrderError> {
        value
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| OrderError::ValidationError(MISSING_FIELDS.to_string()))
    }

    let shipping = ShippingInfo {
        shipping_address1: required(request.shipping_address1)?,
        shipping_address2: request.shipping_address2.filter(|v| !v.trim().is_empty()),
        city: required(request.city)?,
        zip: required(request.zip)?,
        country: required(request.country)?,
        phone: required(request.phone)?,
    };

    let cart = request
        .order_items
        .filter(|items| !items.is_empty())
        .ok_or_else(|| OrderError::ValidationError(MISSING_FIELDS.to_string()))?;

    let lines = cart
        .into_iter()
        .map(|line| {
            let product_id = line.product.filter(|p| !p.trim().is_empty());
            let quantity = line.quantity.and_then(|q| u32::try_from(q).ok()).filter(|q| *q > 0);
            match (product_id, quantity) {
                (Some(product_id), Some(quantity)) => Ok(ValidatedLine { product_id, quantity }),
                _ => Err(OrderError::ValidationError(INCOMPLETE_LINE.to_string())),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let status = request
        .status
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| STATUS_PENDING.to_string());

    Ok(ValidatedOrder { shipping, status, lines })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CartLine;

    fn shipping() -> ShippingInfo {
        ShippingInfo::new("1 Main St", "Springfield", "12345", "US", "555-0100")
    }

    #[test]
    fn test_valid_request_defaults_status() {
        let validated = validate_request(PlaceOrder::new(shipping(), &[("p1", 2), ("p2", 1)])).unwrap();
        assert_eq!(validated.status, STATUS_PENDING);
        assert_eq!(
            validated.lines,
            vec![
                ValidatedLine { product_id: "p1".into(), quantity: 2 },
                ValidatedLine { product_id: "p2".into(), quantity: 1 },
            ]
        );
    }

    #[test]
    fn test_caller_status_kept() {
        let mut request = PlaceOrder::new(shipping(), &[("p1", 1)]);
        request.status = Some("awaiting-payment".into());
        assert_eq!(validate_request(request).unwrap().status, "awaiting-payment");
    }

    #[test]
    fn test_missing_shipping_or_cart() {
        let mut request = PlaceOrder::new(shipping(), &[("p1", 1)]);
        request.city = Some("   ".into());
        assert_eq!(
            validate_request(request),
            Err(OrderError::ValidationError(MISSING_FIELDS.to_string()))
        );

        let request = PlaceOrder::new(shipping(), &[]);
        assert_eq!(
            validate_request(request),
            Err(OrderError::ValidationError(MISSING_FIELDS.to_string()))
        );

        let mut request = PlaceOrder::new(shipping(), &[("p1", 1)]);
        request.order_items = None;
        assert!(matches!(validate_request(request), Err(OrderError::ValidationError(_))));
    }

    #[test]
    fn test_incomplete_lines() {
        for line in [
            CartLine { product: None, quantity: Some(1) },
            CartLine { product: Some("p1".into()), quantity: None },
            CartLine { product: Some("p1".into()), quantity: Some(0) },
            CartLine { product: Some("p1".into()), quantity: Some(-2) },
        ] {
            let mut request = PlaceOrder::new(shipping(), &[]);
            request.order_items = Some(vec![line]);
            assert_eq!(
                validate_request(request),
                Err(OrderError::ValidationError(INCOMPLETE_LINE.to_string()))
            );
        }
    }
}
