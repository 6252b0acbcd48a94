use crate::domain::{Order, OrderStatus};

/// Per-status tally of an order set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashboardStats {
    pub posted_count: usize,
    pub on_hold_count: usize,
    pub in_progress_count: usize,
    pub dispatched_count: usize,
    pub completed_count: usize,
    pub canceled_count: usize,
    pub total_count: usize,
    /// Canceled orders as a percentage of all orders; 0 for an empty set.
    pub cancellation_rate: f64,
}

impl DashboardStats {
    pub fn count(&self, status: OrderStatus) -> usize {
        match status {
            OrderStatus::Posted => self.posted_count,
            OrderStatus::OnHold => self.on_hold_count,
            OrderStatus::InProgress => self.in_progress_count,
            OrderStatus::Dispatched => self.dispatched_count,
            OrderStatus::Completed => self.completed_count,
            OrderStatus::Canceled => self.canceled_count,
        }
    }

    fn count_mut(&mut self, status: OrderStatus) -> &mut usize {
        match status {
            OrderStatus::Posted => &mut self.posted_count,
            OrderStatus::OnHold => &mut self.on_hold_count,
            OrderStatus::InProgress => &mut self.in_progress_count,
            OrderStatus::Dispatched => &mut self.dispatched_count,
            OrderStatus::Completed => &mut self.completed_count,
            OrderStatus::Canceled => &mut self.canceled_count,
        }
    }
}

pub fn compute_stats(orders: &[Order]) -> DashboardStats {
    let mut stats = DashboardStats::default();
    for order in orders {
        *stats.count_mut(order.status) += 1;
    }
    stats.total_count = orders.len();
    stats.cancellation_rate = if stats.total_count > 0 {
        stats.canceled_count as f64 / stats.total_count as f64 * 100.0
    } else {
        0.0
    };
    stats
}
