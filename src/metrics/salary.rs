use super::policy::MetricsPolicy;
use super::target::TargetProgress;

#[derive(Debug, Clone, PartialEq)]
pub struct SalaryCalculation {
    pub amount: f64,
    /// Human-readable description of the tier that was applied.
    pub calculation: String,
    pub target_achieved: bool,
}

/// Tiered commission on the broker-fee sum.
///
/// At or above the target: `base_bonus + achieved_rate * sum`.
/// Below it: `under_rate * sum`.
pub fn compute_salary(progress: &TargetProgress, policy: &MetricsPolicy) -> SalaryCalculation {
    let sum = progress.broker_fee_sum;
    if sum >= policy.target {
        SalaryCalculation {
            amount: policy.base_bonus + policy.achieved_rate * sum,
            calculation: policy.achieved_explanation(),
            target_achieved: true,
        }
    } else {
        SalaryCalculation {
            amount: policy.under_rate * sum,
            calculation: policy.under_explanation(),
            target_achieved: false,
        }
    }
}
