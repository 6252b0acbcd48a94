use super::order::Order;

/// The authenticated user looking at the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: String,
    pub email: String,
    pub is_admin: bool,
}

impl Viewer {
    /// Builds a viewer, granting admin rights when `email` matches `admin_email`.
    pub fn new(user_id: impl Into<String>, email: impl Into<String>, admin_email: &str) -> Self {
        let email = email.into();
        // Case-insensitive, so "Admin@Admin.com" signs in as the admin too.
        let is_admin = !admin_email.is_empty() && email.eq_ignore_ascii_case(admin_email);
        Self {
            user_id: user_id.into(),
            email,
            is_admin,
        }
    }

    /// Admins may edit or delete any order, everyone else only their own.
    pub fn can_modify(&self, order: &Order) -> bool {
        self.is_admin || order.user_id == self.user_id
    }

    /// The scope actually applied for this viewer.
    ///
    /// Regular users are pinned to their own orders whatever they ask for.
    pub fn effective_scope(&self, requested: &OwnerScope) -> OwnerScope {
        if self.is_admin {
            requested.clone()
        } else {
            OwnerScope::Owner(self.user_id.clone())
        }
    }
}

/// Which owners' orders a query returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OwnerScope {
    #[default]
    All,
    Owner(String),
}

impl OwnerScope {
    pub fn admits(&self, order: &Order) -> bool {
        match self {
            OwnerScope::All => true,
            OwnerScope::Owner(user_id) => &order.user_id == user_id,
        }
    }
}

/// Orders the viewer may see under the requested scope, in input order.
pub fn visible_orders(viewer: &Viewer, requested: &OwnerScope, orders: &[Order]) -> Vec<Order> {
    let scope = viewer.effective_scope(requested);
    orders.iter().filter(|order| scope.admits(order)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrderForm, OrderStatus};
    use chrono::Utc;

    fn owned_by(id: &str, user_id: &str) -> Order {
        Order::from_form(id, user_id, None, OrderForm::new(id, OrderStatus::Posted), Utc::now())
    }

    #[test]
    fn test_admin_flag_comes_from_configured_email() {
        assert!(Viewer::new("u1", "Admin@Admin.com", "admin@admin.com").is_admin);
        assert!(!Viewer::new("u2", "driver@example.com", "admin@admin.com").is_admin);
        assert!(!Viewer::new("u3", "", "").is_admin);
    }

    #[test]
    fn test_regular_user_only_sees_own_orders() {
        let viewer = Viewer::new("u1", "a@example.com", "admin@admin.com");
        let orders = vec![owned_by("o1", "u1"), owned_by("o2", "u2"), owned_by("o3", "u1")];

        let visible = visible_orders(&viewer, &OwnerScope::All, &orders);
        let ids: Vec<&str> = visible.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["o1", "o3"]);

        let snooping = visible_orders(&viewer, &OwnerScope::Owner("u2".into()), &orders);
        assert!(snooping.iter().all(|o| o.user_id == "u1"));
    }

    #[test]
    fn test_admin_can_select_an_owner() {
        let admin = Viewer::new("root", "admin@admin.com", "admin@admin.com");
        let orders = vec![owned_by("o1", "u1"), owned_by("o2", "u2")];

        assert_eq!(visible_orders(&admin, &OwnerScope::All, &orders).len(), 2);
        let picked = visible_orders(&admin, &OwnerScope::Owner("u2".into()), &orders);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].id, "o2");
    }

    #[test]
    fn test_modify_permission() {
        let order = owned_by("o1", "u1");
        assert!(Viewer::new("u1", "a@example.com", "admin@admin.com").can_modify(&order));
        assert!(!Viewer::new("u2", "b@example.com", "admin@admin.com").can_modify(&order));
        assert!(Viewer::new("root", "admin@admin.com", "admin@admin.com").can_modify(&order));
    }
}
