use crate::actor_framework::Entity;
use crate::domain::{LineItem, LineItemCreate};

impl Entity for LineItem {
    type Id = String;
    type CreateParams = LineItemCreate;
    type Patch = ();
    type Action = ();
    type ActionResult = ();

    const COLLECTION: &'static str = "line_items";

    fn from_create_params(id: String, params: LineItemCreate) -> Result<Self, String> {
        if params.quantity == 0 {
            return Err("Quantity must be positive".to_string());
        }
        Ok(Self {
            id,
            quantity: params.quantity,
            product: params.product,
        })
    }

    /// Line items are immutable once recorded.
    fn on_update(&mut self, _patch: ()) -> Result<(), String> {
        Err(format!("Line item {} is immutable", self.id))
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
