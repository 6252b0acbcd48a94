use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument};

use crate::actor_framework::Snapshot;
use crate::clients::DashboardClient;
use crate::domain::{Order, OwnerScope, Viewer};
use crate::messages::{DashboardRequest, ServiceResponse};
use crate::metrics::{DateRange, MetricsPolicy};
use super::{DashboardError, DashboardView};

// =============================================================================
// DASHBOARD SERVICE
// =============================================================================

/// Keeps one viewer's dashboard in sync with the order repository.
///
/// Every repository snapshot and every filter change triggers a full
/// synchronous recompute, published on a watch channel.
pub struct DashboardService {
    receiver: mpsc::Receiver<DashboardRequest>,
    orders: watch::Receiver<Snapshot<Order>>,
    views: watch::Sender<Arc<DashboardView>>,
    viewer: Viewer,
    scope: OwnerScope,
    range: DateRange,
    policy: MetricsPolicy,
}

impl DashboardService {
    pub fn new(
        buffer_size: usize,
        viewer: Viewer,
        policy: MetricsPolicy,
        mut orders: watch::Receiver<Snapshot<Order>>,
    ) -> (Self, DashboardClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let scope = OwnerScope::All;
        let range = DateRange::all();
        let initial = {
            let snapshot = orders.borrow_and_update();
            DashboardView::build(&viewer, &scope, &range, &policy, &snapshot)
        };
        let (views, view_rx) = watch::channel(Arc::new(initial));
        let service = Self {
            receiver,
            orders,
            views,
            viewer,
            scope,
            range,
            policy,
        };
        (service, DashboardClient::new(sender, view_rx))
    }

    #[instrument(name = "dashboard_service", skip(self), fields(user_id = %self.viewer.user_id, admin = self.viewer.is_admin))]
    pub async fn run(mut self) {
        info!("DashboardService starting");
        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(DashboardRequest::Shutdown) | None => {
                        info!("DashboardService shutting down");
                        break;
                    }
                    Some(request) => self.handle_request(request),
                },
                changed = self.orders.changed() => {
                    if changed.is_err() {
                        info!("Order repository closed");
                        break;
                    }
                    self.handle_snapshot();
                }
            }
        }
        info!("DashboardService stopped");
    }

    fn handle_request(&mut self, request: DashboardRequest) {
        match request {
            DashboardRequest::ApplyDateRange { start, end, respond_to } => {
                self.handle_apply_date_range(start, end, respond_to);
            }
            DashboardRequest::ClearDateRange { respond_to } => {
                self.handle_apply_date_range(String::new(), String::new(), respond_to);
            }
            DashboardRequest::SelectOwner { scope, respond_to } => {
                self.handle_select_owner(scope, respond_to);
            }
            DashboardRequest::CurrentView { respond_to } => {
                let _ = respond_to.send(Ok(self.views.borrow().clone()));
            }
            DashboardRequest::Shutdown => {}
        }
    }

    #[instrument(skip(self, respond_to))]
    fn handle_apply_date_range(
        &mut self,
        start: String,
        end: String,
        respond_to: ServiceResponse<Arc<DashboardView>, DashboardError>,
    ) {
        debug!("Processing apply_date_range request");
        self.range = DateRange::between(start, end);
        let view = self.recompute();
        info!(filter = %view.range.describe(), orders = view.orders.len(), "Date range applied");
        let _ = respond_to.send(Ok(view));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_select_owner(
        &mut self,
        scope: OwnerScope,
        respond_to: ServiceResponse<Arc<DashboardView>, DashboardError>,
    ) {
        debug!("Processing select_owner request");
        // Regular users stay pinned to their own orders; the request is a no-op for them.
        self.scope = self.viewer.effective_scope(&scope);
        let view = self.recompute();
        let _ = respond_to.send(Ok(view));
    }

    fn handle_snapshot(&mut self) {
        let view = self.recompute();
        debug!(
            orders = view.orders.len(),
            fee_sum = view.target.broker_fee_sum,
            "Recomputed after repository change"
        );
    }

    fn recompute(&mut self) -> Arc<DashboardView> {
        let view = {
            let snapshot = self.orders.borrow_and_update();
            let view = DashboardView::build(
                &self.viewer,
                &self.scope,
                &self.range,
                &self.policy,
                &snapshot,
            );
            Arc::new(view)
        };
        self.views.send_replace(view.clone());
        view
    }
}
