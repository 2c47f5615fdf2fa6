use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

use super::OrderSettings;
use crate::actor_framework::{Entity, ResourceActor, ResourceClient};
use crate::clients::{LineItemClient, OrderClient, ProductClient, UserClient};
use crate::domain::{LineItem, Order, Product, User};

/// The main application system that orchestrates all actors.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct OrderSystem {
    pub order_client: OrderClient,
    pub user_client: UserClient,
    pub product_client: ProductClient,
    pub line_item_client: LineItemClient,
    handles: Vec<JoinHandle<()>>,
}

fn spawn_store<T>(buffer_size: usize, handles: &mut Vec<JoinHandle<()>>) -> ResourceClient<T>
where
    T: Entity<Id = String>,
{
    let (actor, client) = ResourceActor::<T>::new(buffer_size, || Uuid::new_v4().to_string());
    handles.push(tokio::spawn(actor.run()));
    client
}

impl OrderSystem {
    pub fn new(buffer_size: usize, settings: OrderSettings) -> Self {
        info!(
            stock_policy = %settings.stock_policy,
            compensate_on_failure = settings.compensate_on_failure,
            "Starting order system"
        );
        let mut handles = Vec::with_capacity(4);

        let user_client = UserClient::new(spawn_store::<User>(buffer_size, &mut handles));
        let product_client = ProductClient::new(spawn_store::<Product>(buffer_size, &mut handles));
        let line_item_client =
            LineItemClient::new(spawn_store::<LineItem>(buffer_size, &mut handles), product_client.clone());
        let order_client = OrderClient::new(
            spawn_store::<Order>(buffer_size, &mut handles),
            user_client.clone(),
            product_client.clone(),
            line_item_client.clone(),
            settings,
        );

        Self {
            order_client,
            user_client,
            product_client,
            line_item_client,
            handles,
        }
    }

    /// Drops this system's clients and waits for every actor to stop.
    ///
    /// Actors stop once all clones of their client are gone, so callers must
    /// drop any clones they handed out (e.g. to the HTTP state) first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        let Self {
            order_client,
            user_client,
            product_client,
            line_item_client,
            handles,
        } = self;
        drop(order_client);
        drop(line_item_client);
        drop(user_client);
        drop(product_client);

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
