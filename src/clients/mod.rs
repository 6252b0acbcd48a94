use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};
use crate::dashboard::{DashboardError, DashboardView};
use crate::domain::OwnerScope;
use crate::messages::DashboardRequest;

#[macro_use]
mod macros;
mod order_client;

pub use order_client::OrderClient;

// =============================================================================
// Macro for message-enum clients (DashboardClient uses this)
// =============================================================================

macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| <$error_type>::ActorCommunicationError("Actor closed".to_string()))?;

                response.await.map_err(|_| <$error_type>::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}

// =============================================================================
// Dashboard Client
// =============================================================================

/// Handle to a running dashboard service.
#[derive(Clone)]
pub struct DashboardClient {
    sender: mpsc::Sender<DashboardRequest>,
    views: watch::Receiver<Arc<DashboardView>>,
}

impl DashboardClient {
    pub fn new(sender: mpsc::Sender<DashboardRequest>, views: watch::Receiver<Arc<DashboardView>>) -> Self {
        Self { sender, views }
    }

    /// Receiver that is notified every time the view is recomputed.
    pub fn watch(&self) -> watch::Receiver<Arc<DashboardView>> {
        self.views.clone()
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), DashboardError> {
        debug!("Sending shutdown");
        self.sender.send(DashboardRequest::Shutdown)
            .await
            .map_err(|_| DashboardError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(DashboardClient => fn apply_date_range(start: String, end: String) -> Arc<DashboardView> as DashboardRequest::ApplyDateRange, Error = DashboardError);
client_method!(DashboardClient => fn clear_date_range() -> Arc<DashboardView> as DashboardRequest::ClearDateRange, Error = DashboardError);
client_method!(DashboardClient => fn select_owner(scope: OwnerScope) -> Arc<DashboardView> as DashboardRequest::SelectOwner, Error = DashboardError);
client_method!(DashboardClient => fn current_view() -> Arc<DashboardView> as DashboardRequest::CurrentView, Error = DashboardError);
