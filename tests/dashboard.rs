mod common;

use chrono::{Datelike, Duration, Utc};
use common::{create_product, insert_order_at, order_request, test_state};
use microsite_api::services::{dashboard_service, order_service};

#[tokio::test]
async fn three_orders_today_sum_their_final_amounts() -> anyhow::Result<()> {
    let state = test_state().await?;
    let now = Utc::now();
    for amount in [50, 75, 125] {
        insert_order_at(&state, amount, now).await?;
    }

    let stats = dashboard_service::dashboard_stats(&state, &now)
        .await?
        .data
        .expect("stats");
    assert_eq!(stats.today_orders, 3);
    assert_eq!(stats.today_revenue, 250);
    assert_eq!(stats.pending_orders, 3);
    assert_eq!(stats.month_orders, 3);
    assert_eq!(stats.month_revenue, 250);
    Ok(())
}

#[tokio::test]
async fn empty_database_reports_zeroes() -> anyhow::Result<()> {
    let state = test_state().await?;
    let stats = dashboard_service::dashboard_stats(&state, &Utc::now())
        .await?
        .data
        .expect("stats");
    assert_eq!(stats.today_orders, 0);
    assert_eq!(stats.today_revenue, 0);
    assert_eq!(stats.active_products, 0);
    assert_eq!(stats.pending_reviews, 0);
    Ok(())
}

#[tokio::test]
async fn orders_from_yesterday_are_not_today() -> anyhow::Result<()> {
    let state = test_state().await?;
    let now = Utc::now();
    insert_order_at(&state, 500, now - Duration::days(1)).await?;
    insert_order_at(&state, 40, now).await?;

    let stats = dashboard_service::dashboard_stats(&state, &now)
        .await?
        .data
        .expect("stats");
    assert_eq!(stats.today_orders, 1);
    assert_eq!(stats.today_revenue, 40);
    Ok(())
}

#[tokio::test]
async fn last_month_is_outside_the_month_window() -> anyhow::Result<()> {
    let state = test_state().await?;
    let now = Utc::now();
    let month_start = now
        .date_naive()
        .with_day(1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("first of month")
        .and_utc();
    insert_order_at(&state, 900, month_start - Duration::hours(1)).await?;

    let stats = dashboard_service::dashboard_stats(&state, &now)
        .await?
        .data
        .expect("stats");
    assert_eq!(stats.month_orders, 0);
    assert_eq!(stats.month_revenue, 0);

    insert_order_at(&state, 40, month_start).await?;
    let stats = dashboard_service::dashboard_stats(&state, &now)
        .await?
        .data
        .expect("stats");
    assert_eq!(stats.month_orders, 1);
    assert_eq!(stats.month_revenue, 40);
    Ok(())
}

#[tokio::test]
async fn active_products_are_counted() -> anyhow::Result<()> {
    let state = test_state().await?;
    let widget = create_product(&state, "Widget", 100, 10).await?;
    create_product(&state, "Gadget", 300, 10).await?;
    order_service::create_order(&state, None, order_request(&[(widget.id, 1)])).await?;

    let stats = dashboard_service::dashboard_stats(&state, &Utc::now())
        .await?
        .data
        .expect("stats");
    assert_eq!(stats.active_products, 2);
    assert_eq!(stats.today_revenue, 100);
    Ok(())
}

#[tokio::test]
async fn revenue_series_is_zero_filled_and_ascending() -> anyhow::Result<()> {
    let state = test_state().await?;
    let now = Utc::now();
    insert_order_at(&state, 300, now - Duration::days(2)).await?;
    insert_order_at(&state, 20, now).await?;
    insert_order_at(&state, 30, now).await?;
    // Outside a three-day window.
    insert_order_at(&state, 999, now - Duration::days(5)).await?;

    let points = dashboard_service::revenue_series(&state, &now, Some(3))
        .await?
        .data
        .expect("series")
        .points;

    let today = now.date_naive();
    assert_eq!(points.len(), 3);
    assert_eq!(points[0].date, today - Duration::days(2));
    assert_eq!(points[0].revenue, 300);
    assert_eq!(points[1].revenue, 0);
    assert_eq!(points[2].date, today);
    assert_eq!(points[2].revenue, 50);
    Ok(())
}

#[tokio::test]
async fn revenue_days_default_and_clamp() -> anyhow::Result<()> {
    let state = test_state().await?;
    let now = Utc::now();

    let default = dashboard_service::revenue_series(&state, &now, None).await?;
    assert_eq!(default.data.expect("series").points.len(), 7);

    let clamped = dashboard_service::revenue_series(&state, &now, Some(1_000)).await?;
    assert_eq!(clamped.data.expect("series").points.len(), 90);

    let at_least_one = dashboard_service::revenue_series(&state, &now, Some(0)).await?;
    assert_eq!(at_least_one.data.expect("series").points.len(), 1);
    Ok(())
}

#[tokio::test]
async fn recent_orders_are_newest_first() -> anyhow::Result<()> {
    let state = test_state().await?;
    let now = Utc::now();
    insert_order_at(&state, 10, now - Duration::hours(2)).await?;
    insert_order_at(&state, 20, now).await?;

    let orders = dashboard_service::recent_orders(&state, 1)
        .await?
        .data
        .expect("orders")
        .items;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].final_amount, 20);
    Ok(())
}
