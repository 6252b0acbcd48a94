use std::sync::Arc;
use tokio::sync::oneshot;
use crate::dashboard::{DashboardError, DashboardView};
use crate::domain::OwnerScope;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed messages for the dashboard service. Each variant includes parameters
/// and a oneshot channel for the recomputed view.
#[derive(Debug)]
pub enum DashboardRequest {
    ApplyDateRange {
        start: String,
        end: String,
        respond_to: ServiceResponse<Arc<DashboardView>, DashboardError>,
    },
    ClearDateRange {
        respond_to: ServiceResponse<Arc<DashboardView>, DashboardError>,
    },
    SelectOwner {
        scope: OwnerScope,
        respond_to: ServiceResponse<Arc<DashboardView>, DashboardError>,
    },
    CurrentView {
        respond_to: ServiceResponse<Arc<DashboardView>, DashboardError>,
    },
    Shutdown,
}
