//! Typed clients over the resource actors. The order client also hosts the
//! order placement workflow.

#[macro_use]
mod macros;

pub mod line_item_client;
pub mod order_client;
pub mod product_client;
pub mod user_client;

pub use line_item_client::LineItemClient;
pub use order_client::{OrderClient, ValidatedLine, ValidatedOrder};
pub use product_client::ProductClient;
pub use user_client::UserClient;
