mod domain;
mod clients;
mod messages;
mod metrics;
mod dashboard;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod order_actor;

use tracing::{error, info, Instrument};
use crate::app_system::{setup_tracing, DashboardConfig, DashboardSystem};
use crate::dashboard::DashboardView;
use crate::domain::{OrderForm, OrderStatus, OwnerScope, Viewer};
use crate::metrics::format_money;
use crate::order_actor::OrderError;

fn log_view(title: &str, view: &DashboardView) {
    let by_status = OrderStatus::ALL
        .iter()
        .map(|status| format!("{}={}", status, view.stats.count(*status)))
        .collect::<Vec<_>>()
        .join(" ");
    info!(
        title,
        filter = %view.range.describe(),
        total = view.stats.total_count,
        by_status = %by_status,
        cancellation_rate = %format!("{:.1}%", view.stats.cancellation_rate),
        "Orders overview"
    );
    info!(
        title,
        broker_fees = %format_money(view.target.broker_fee_sum),
        target = %format_money(view.target.target),
        remaining = %format_money(view.target.remaining),
        progress = %format!("{:.2}%", view.target.percentage_complete),
        bar = view.target.bar_percentage(),
        "Target progress"
    );
    info!(
        title,
        salary = %format_money(view.salary.amount),
        achieved = view.salary.target_achieved,
        calculation = %view.salary.calculation,
        "Salary calculation"
    );
}

fn demo_orders() -> Vec<OrderForm> {
    vec![
        OrderForm::new("FLX-1001", OrderStatus::Completed)
            .customer("Dana Ruiz", "555-0101")
            .pickup_window("2024-05-01", "2024-05-03")
            .dispatch_on("2024-05-02")
            .booked_on("2024-04-25")
            .fees(500.0, 1900.0),
        OrderForm::new("FLX-1002", OrderStatus::Dispatched)
            .customer("Sam Okafor", "555-0102")
            .pickup_window("2024-05-10", "2024-05-12")
            .dispatch_on("2024-05-11")
            .booked_on("2024-05-01")
            .fees(1800.50, 5200.0),
        OrderForm::new("FLX-1003", OrderStatus::Posted)
            .customer("Lee Park", "555-0103")
            .pickup_window("2024-06-02", "2024-06-04")
            .dispatch_on("2024-06-03")
            .booked_on("2024-05-20")
            .fees(350.0, 1400.0),
        OrderForm::new("FLX-1004", OrderStatus::Canceled)
            .customer("Ari Cohen", "555-0104")
            .pickup_window("2024-05-14", "2024-05-16")
            .dispatch_on("2024-05-15")
            .booked_on("2024-05-05")
            .fees(420.0, 1600.0),
    ]
}

async fn seed_orders(system: &DashboardSystem, viewer: &Viewer) -> Result<(), String> {
    let loaded = system.load_seed(viewer).await.map_err(|e| e.to_string())?;
    if loaded > 0 {
        return Ok(());
    }
    for form in demo_orders() {
        system.order_client.create_order(viewer, form).await.map_err(|e| e.to_string())?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = DashboardConfig::from_env().map_err(|e| e.to_string())?;
    info!("Starting dispatch tracker");

    let mut system = DashboardSystem::new(config);
    let driver = system.viewer("uid-driver-0001", "driver@example.com");
    let admin = system.viewer("uid-admin", system.config().admin_email.clone());

    let span = tracing::info_span!("seeding");
    seed_orders(&system, &driver).instrument(span).await?;

    let dashboard = system.open_dashboard(admin.clone());
    let mut views = dashboard.watch();

    let view = dashboard.current_view().await.map_err(|e| e.to_string())?;
    log_view("all orders", &view);

    let view = dashboard
        .apply_date_range("2024-05-01".to_string(), "2024-05-12".to_string())
        .await
        .map_err(|e| e.to_string())?;
    log_view("early May", &view);

    // Anything published so far is already logged.
    let _ = views.borrow_and_update();

    // Edit an order and let the live subscription deliver the new numbers.
    let span = tracing::info_span!("order_edit");
    let edit_result = async {
        let orders = system.order_client.list_orders(&admin, &OwnerScope::All).await?;
        let Some(order) = orders.iter().find(|o| o.status == OrderStatus::Canceled) else {
            return Ok(false);
        };
        let form = OrderForm {
            status: OrderStatus::Completed,
            dispatch_day: "2024-05-12".into(),
            ..order.to_form()
        };
        system.order_client.update_order(&admin, order.id.clone(), form).await?;
        Ok::<bool, OrderError>(true)
    }
    .instrument(span)
    .await;

    match edit_result {
        Ok(true) => {
            if views.changed().await.is_ok() {
                let view = views.borrow_and_update().clone();
                log_view("after edit", &view);
            }
        }
        Ok(false) => info!("No canceled order to edit"),
        Err(e) => error!(error = %e, "Order edit failed"),
    }

    let view = dashboard
        .select_owner(OwnerScope::Owner(driver.user_id.clone()))
        .await
        .map_err(|e| e.to_string())?;
    log_view("driver only", &view);

    dashboard.shutdown().await.map_err(|e| e.to_string())?;
    drop(views);

    // Shutdown system gracefully
    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Application completed successfully");
    Ok(())
}
