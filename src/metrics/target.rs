use crate::domain::Order;
use super::policy::MetricsPolicy;

/// Progress of the earning broker fees toward the policy target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetProgress {
    pub broker_fee_sum: f64,
    pub target: f64,
    /// Never negative.
    pub remaining: f64,
    /// Uncapped; exceeds 100 once the target is passed.
    pub percentage_complete: f64,
}

impl TargetProgress {
    /// Percentage clamped for a progress bar.
    pub fn bar_percentage(&self) -> f64 {
        self.percentage_complete.clamp(0.0, 100.0)
    }
}

pub fn compute_target_progress(orders: &[Order], policy: &MetricsPolicy) -> TargetProgress {
    let broker_fee_sum: f64 = orders
        .iter()
        .filter(|order| order.status.counts_toward_target())
        .map(Order::broker_fee_or_zero)
        .sum();
    progress_for_sum(broker_fee_sum, policy)
}

pub(crate) fn progress_for_sum(broker_fee_sum: f64, policy: &MetricsPolicy) -> TargetProgress {
    let target = policy.target;
    let percentage_complete = if target > 0.0 {
        broker_fee_sum / target * 100.0
    } else {
        0.0
    };
    TargetProgress {
        broker_fee_sum,
        target,
        remaining: (target - broker_fee_sum).max(0.0),
        percentage_complete,
    }
}
