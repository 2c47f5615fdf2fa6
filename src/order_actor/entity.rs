use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderPatch};

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = OrderPatch;
    type Action = ();
    type ActionResult = ();

    const COLLECTION: &'static str = "orders";

    /// Creates a new Order from creation parameters, stamped with the current time.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, String> {
        Ok(Self {
            id,
            order_items: params.order_items,
            shipping: params.shipping,
            status: params.status,
            total_price: params.total_price,
            user: params.user,
            date_ordered: Utc::now(),
        })
    }

    /// Overwrites the status verbatim. Any string is accepted.
    fn on_update(&mut self, patch: OrderPatch) -> Result<(), String> {
        self.status = patch.status;
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
