use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Status given to an order when the caller does not supply one.
pub const STATUS_PENDING: &str = "pending";

/// Where an order ships to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub shipping_address1: String,
    #[serde(default)]
    pub shipping_address2: Option<String>,
    pub city: String,
    pub zip: String,
    pub country: String,
    pub phone: String,
}

/// Represents a customer order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Line item ids in the order they were created.
    pub order_items: Vec<String>,
    #[serde(flatten)]
    pub shipping: ShippingInfo,
    pub status: String,
    /// Computed once when the order is placed.
    pub total_price: Decimal,
    pub user: String,
    pub date_ordered: DateTime<Utc>,
}

/// Payload for persisting a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub order_items: Vec<String>,
    pub shipping: ShippingInfo,
    pub status: String,
    pub total_price: Decimal,
    pub user: String,
}

/// Payload for changing an order's status.
#[derive(Debug, Clone)]
pub struct OrderPatch {
    pub status: String,
}

/// A cart line as received from the client. Both fields are optional so that
/// missing values can be reported instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartLine {
    pub product: Option<String>,
    pub quantity: Option<i64>,
}

/// Order placement request as received from the client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrder {
    pub shipping_address1: Option<String>,
    pub shipping_address2: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
    pub order_items: Option<Vec<CartLine>>,
}

/// Owner of an order as shown to readers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderOwner {
    pub id: String,
    /// `None` when the user no longer exists.
    pub name: Option<String>,
}

/// Read model of an order with the owner resolved. `L` is the line item
/// representation: ids for listings, [`LineItemDetail`](super::LineItemDetail) for a single order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView<L> {
    pub id: String,
    pub order_items: Vec<L>,
    #[serde(flatten)]
    pub shipping: ShippingInfo,
    pub status: String,
    pub total_price: Decimal,
    pub user: OrderOwner,
    pub date_ordered: DateTime<Utc>,
}

impl<L> OrderView<L> {
    pub fn new(order: Order, order_items: Vec<L>, user: OrderOwner) -> Self {
        Self {
            id: order.id,
            order_items,
            shipping: order.shipping,
            status: order.status,
            total_price: order.total_price,
            user,
            date_ordered: order.date_ordered,
        }
    }
}

impl ShippingInfo {
    pub fn new(
        shipping_address1: impl Into<String>,
        city: impl Into<String>,
        zip: impl Into<String>,
        country: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            shipping_address1: shipping_address1.into(),
            shipping_address2: None,
            city: city.into(),
            zip: zip.into(),
            country: country.into(),
            phone: phone.into(),
        }
    }
}

impl PlaceOrder {
    /// Builds a request for the given shipping details and `(product, quantity)` lines.
    pub fn new(shipping: ShippingInfo, lines: &[(&str, i64)]) -> Self {
        Self {
            shipping_address1: Some(shipping.shipping_address1),
            shipping_address2: shipping.shipping_address2,
            city: Some(shipping.city),
            zip: Some(shipping.zip),
            country: Some(shipping.country),
            phone: Some(shipping.phone),
            status: None,
            order_items: Some(
                lines
                    .iter()
                    .map(|(product, quantity)| CartLine {
                        product: Some((*product).to_string()),
                        quantity: Some(*quantity),
                    })
                    .collect(),
            ),
        }
    }
}
