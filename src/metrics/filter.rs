use crate::domain::{is_calendar_date, Order};

/// Inclusive dispatch-day range. Empty bounds mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// A range filters only when both bounds are set.
    pub fn is_active(&self) -> bool {
        !self.start.is_empty() && !self.end.is_empty()
    }

    /// Whether `day` passes this range.
    ///
    /// Comparison is lexical, which equals chronological order for
    /// well-formed `YYYY-MM-DD` values. Anything malformed, on either side,
    /// never matches.
    pub fn contains(&self, day: &str) -> bool {
        if !self.is_active() {
            return true;
        }
        let well_formed = [day, self.start.as_str(), self.end.as_str()]
            .into_iter()
            .all(is_calendar_date);
        if !well_formed {
            return false;
        }
        self.start.as_str() <= day && day <= self.end.as_str()
    }

    pub fn apply(&self, orders: &[Order]) -> Vec<Order> {
        orders
            .iter()
            .filter(|order| self.contains(&order.dispatch_day))
            .cloned()
            .collect()
    }

    pub fn describe(&self) -> String {
        if self.is_active() {
            format!("Showing data from {} to {}", self.start, self.end)
        } else {
            "Showing all data - apply date filter to narrow results".to_string()
        }
    }
}

/// Orders whose dispatch day falls within `[start, end]`, in input order.
pub fn filter_by_date_range(orders: &[Order], start: &str, end: &str) -> Vec<Order> {
    DateRange::between(start, end).apply(orders)
}
