/// Commission policy used by the target and salary computations.
///
/// The defaults are the brokerage's fixed policy. Other values exist for
/// tests and for configuration overrides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsPolicy {
    /// Broker-fee sum that switches to the target-achieved tier.
    pub target: f64,
    /// Flat amount added once the target is reached.
    pub base_bonus: f64,
    /// Commission rate applied once the target is reached.
    pub achieved_rate: f64,
    /// Commission rate applied below the target.
    pub under_rate: f64,
}

pub const DEFAULT_TARGET: f64 = 2300.0;
pub const DEFAULT_BASE_BONUS: f64 = 250.0;
pub const DEFAULT_ACHIEVED_RATE: f64 = 0.10;
pub const DEFAULT_UNDER_RATE: f64 = 0.20;

impl Default for MetricsPolicy {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET,
            base_bonus: DEFAULT_BASE_BONUS,
            achieved_rate: DEFAULT_ACHIEVED_RATE,
            under_rate: DEFAULT_UNDER_RATE,
        }
    }
}

impl MetricsPolicy {
    pub fn with_target(self, target: f64) -> Self {
        Self { target, ..self }
    }

    pub fn achieved_explanation(&self) -> String {
        format!(
            "{}% commission + {} base (target achieved)",
            format_rate(self.achieved_rate),
            format_label_amount(self.base_bonus)
        )
    }

    pub fn under_explanation(&self) -> String {
        format!(
            "{}% commission (under {} target)",
            format_rate(self.under_rate),
            format_label_amount(self.target)
        )
    }
}

/// Two-decimal display form, e.g. `$2,300.50`.
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${}.{:02}", group_thousands(cents / 100), cents % 100)
}

/// Like [`format_money`] but drops a zero cents part, e.g. `$2,300`.
fn format_label_amount(amount: f64) -> String {
    let money = format_money(amount);
    if money.ends_with(".00") {
        money[..money.len() - 3].to_string()
    } else {
        money
    }
}

fn format_rate(rate: f64) -> String {
    let percent = rate * 100.0;
    if (percent - percent.round()).abs() < 1e-9 {
        format!("{}", percent.round() as i64)
    } else {
        format!("{percent:.1}")
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_explanations() {
        let policy = MetricsPolicy::default();
        assert_eq!(policy.achieved_explanation(), "10% commission + $250 base (target achieved)");
        assert_eq!(policy.under_explanation(), "20% commission (under $2,300 target)");
    }

    #[test]
    fn test_explanations_follow_policy_values() {
        let policy = MetricsPolicy {
            target: 1500.0,
            base_bonus: 99.5,
            achieved_rate: 0.125,
            under_rate: 0.15,
        };
        assert_eq!(policy.achieved_explanation(), "12.5% commission + $99.50 base (target achieved)");
        assert_eq!(policy.under_explanation(), "15% commission (under $1,500 target)");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(480.05), "$480.05");
        assert_eq!(format_money(2300.5), "$2,300.50");
        assert_eq!(format_money(1234567.891), "$1,234,567.89");
        assert_eq!(format_money(-12.0), "-$12.00");
    }
}
