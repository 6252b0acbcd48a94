use std::fs;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::actor_framework::ResourceActor;
use crate::clients::{DashboardClient, OrderClient};
use crate::dashboard::DashboardService;
use crate::domain::{Order, OrderForm, Viewer};
use super::config::DashboardConfig;
use super::error::SystemError;

/// The application system: the order repository plus any open dashboards.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct DashboardSystem {
    pub order_client: OrderClient,
    config: DashboardConfig,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl DashboardSystem {
    pub fn new(config: DashboardConfig) -> Self {
        let next_order_id = || Uuid::new_v4().simple().to_string();
        Self::with_id_generator(config, next_order_id)
    }

    /// Same as [`DashboardSystem::new`] with a custom ID source, for deterministic tests.
    pub fn with_id_generator(
        config: DashboardConfig,
        next_order_id: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        info!(
            admin_email = %config.admin_email,
            target = config.policy.target,
            "Starting dashboard system"
        );
        let (order_actor, order_resource_client) =
            ResourceActor::<Order>::new(config.channel_buffer, next_order_id);
        let order_client = OrderClient::new(order_resource_client);
        let order_handle = tokio::spawn(order_actor.run());

        Self {
            order_client,
            config,
            handles: vec![order_handle],
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Identity for a signed-in user, with the admin flag taken from config.
    pub fn viewer(&self, user_id: impl Into<String>, email: impl Into<String>) -> Viewer {
        Viewer::new(user_id, email, &self.config.admin_email)
    }

    /// Starts a dashboard service for `viewer`, subscribed to live order snapshots.
    pub fn open_dashboard(&mut self, viewer: Viewer) -> DashboardClient {
        let (service, client) = DashboardService::new(
            self.config.channel_buffer,
            viewer,
            self.config.policy,
            self.order_client.subscribe_orders(),
        );
        self.handles.push(tokio::spawn(service.run()));
        client
    }

    /// Creates the orders listed in the configured seed file, owned by `viewer`.
    ///
    /// Returns the number of orders created; zero when no seed file is configured.
    #[instrument(skip(self, viewer), fields(user_id = %viewer.user_id))]
    pub async fn load_seed(&self, viewer: &Viewer) -> Result<usize, SystemError> {
        let Some(path) = self.config.seed_file.clone() else {
            return Ok(0);
        };
        let shown = path.display().to_string();
        let raw = fs::read_to_string(&path).map_err(|source| SystemError::SeedRead {
            path: shown.clone(),
            source,
        })?;
        let forms: Vec<OrderForm> = serde_json::from_str(&raw)
            .map_err(|source| SystemError::SeedParse { path: shown.clone(), source })?;

        for form in &forms {
            self.order_client.create_order(viewer, form.clone()).await?;
        }
        info!(count = forms.len(), path = %shown, "Seed orders loaded");
        Ok(forms.len())
    }

    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        // Dropping the order client closes the repository channel; dashboards
        // stop once the repository's snapshot channel closes.
        drop(self.order_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::TaskFailed(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
