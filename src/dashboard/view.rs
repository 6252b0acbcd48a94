use crate::domain::{visible_orders, Order, OwnerScope, Viewer};
use crate::metrics::{
    compute_salary, compute_stats, compute_target_progress, filter_by_date_range, DashboardStats,
    DateRange, MetricsPolicy, SalaryCalculation, TargetProgress,
};

/// An entry in the admin's owner picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerOption {
    pub user_id: String,
    pub label: String,
}

/// Everything the presentation layer renders for one viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub range: DateRange,
    pub scope: OwnerScope,
    /// Scoped and date-filtered orders, newest first.
    pub orders: Vec<Order>,
    pub stats: DashboardStats,
    pub target: TargetProgress,
    pub salary: SalaryCalculation,
    pub owners: Vec<OwnerOption>,
}

impl DashboardView {
    /// Scope, then filter, then derive every metric from the same subset.
    ///
    /// The status summary honours the date range just like target progress.
    pub fn build(
        viewer: &Viewer,
        scope: &OwnerScope,
        range: &DateRange,
        policy: &MetricsPolicy,
        snapshot: &[Order],
    ) -> Self {
        let scope = viewer.effective_scope(scope);
        let scoped = visible_orders(viewer, &scope, snapshot);
        let orders = filter_by_date_range(&scoped, &range.start, &range.end);
        let stats = compute_stats(&orders);
        let target = compute_target_progress(&orders, policy);
        let salary = compute_salary(&target, policy);
        let owners = owner_options(viewer, &visible_orders(viewer, &OwnerScope::All, snapshot));

        Self {
            range: range.clone(),
            scope,
            orders,
            stats,
            target,
            salary,
            owners,
        }
    }
}

/// Distinct owners in first-seen order, each with the best available label.
pub fn owner_options(viewer: &Viewer, orders: &[Order]) -> Vec<OwnerOption> {
    let mut options: Vec<OwnerOption> = Vec::new();
    for order in orders {
        if options.iter().any(|option| option.user_id == order.user_id) {
            continue;
        }
        let label = orders
            .iter()
            .filter(|o| o.user_id == order.user_id)
            .find_map(|o| o.user_email.clone().filter(|email| !email.is_empty()))
            .or_else(|| (order.user_id == viewer.user_id).then(|| viewer.email.clone()))
            .unwrap_or_else(|| fallback_label(&order.user_id));
        options.push(OwnerOption {
            user_id: order.user_id.clone(),
            label,
        });
    }
    options
}

fn fallback_label(user_id: &str) -> String {
    let prefix: String = user_id.chars().take(8).collect();
    format!("User-{prefix}")
}
