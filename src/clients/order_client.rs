use tracing::{error, info, instrument, warn};
use crate::domain::{visible_orders, Order, OrderCreate, OrderForm, OwnerScope, Viewer};
use crate::order_actor::OrderError;
use crate::actor_framework::ResourceClient;

/// Client for the order repository actor.
///
/// Applies the viewer's permissions before forwarding create, update and
/// delete intents.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl_basic_client!(OrderClient, Order, OrderError, order);

impl OrderClient {
    #[instrument(skip(self, viewer, form), fields(user_id = %viewer.user_id, order_code = %form.order_id))]
    pub async fn create_order(&self, viewer: &Viewer, form: OrderForm) -> Result<String, OrderError> {
        info!("Processing create_order request");
        let params = OrderCreate {
            user_id: viewer.user_id.clone(),
            user_email: Some(viewer.email.clone()).filter(|email| !email.is_empty()),
            form,
        };
        let id = self.inner.create(params).await.map_err(OrderError::from)?;
        info!(order_id = %id, "Order created");
        Ok(id)
    }

    #[instrument(skip(self, viewer, form), fields(user_id = %viewer.user_id))]
    pub async fn update_order(&self, viewer: &Viewer, id: String, form: OrderForm) -> Result<Order, OrderError> {
        info!("Processing update_order request");
        self.authorize(viewer, &id).await?;
        let order = self.inner.update(id, form).await.map_err(|e| {
            error!(error = %e, "Order update failed");
            OrderError::from(e)
        })?;
        info!(status = %order.status, "Order updated");
        Ok(order)
    }

    #[instrument(skip(self, viewer), fields(user_id = %viewer.user_id))]
    pub async fn delete_order(&self, viewer: &Viewer, id: String) -> Result<(), OrderError> {
        info!("Processing delete_order request");
        self.authorize(viewer, &id).await?;
        self.inner.delete(id).await.map_err(OrderError::from)?;
        info!("Order deleted");
        Ok(())
    }

    /// Orders visible to `viewer` under `scope`, newest first.
    #[instrument(skip(self, viewer), fields(user_id = %viewer.user_id))]
    pub async fn list_orders(&self, viewer: &Viewer, scope: &OwnerScope) -> Result<Vec<Order>, OrderError> {
        let snapshot = self.inner.list().await.map_err(OrderError::from)?;
        Ok(visible_orders(viewer, scope, &snapshot))
    }

    /// Owners never change, so checking before the mutation is race-free.
    async fn authorize(&self, viewer: &Viewer, id: &str) -> Result<Order, OrderError> {
        let order = self.get_order(id.to_string()).await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;
        if !viewer.can_modify(&order) {
            warn!(owner = %order.user_id, "Viewer does not own this order");
            return Err(OrderError::Forbidden(id.to_string()));
        }
        Ok(order)
    }
}
