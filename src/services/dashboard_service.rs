use std::collections::BTreeMap;

use chrono::{
    DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, NaiveTime, TimeZone, Utc,
};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::{
    dto::{
        dashboard::{DashboardStats, RevenueSeries},
        orders::OrderList,
    },
    entity::{
        orders::{Column as OrderCol, Entity as Orders},
        products::{Column as ProdCol, Entity as Products},
        reviews::{Column as ReviewCol, Entity as Reviews},
    },
    error::{AppError, AppResult},
    models::{OrderStatus, RecordStatus, RevenuePoint, ReviewStatus},
    response::{ApiResponse, Meta},
    services::order_service::order_from_entity,
    state::AppState,
};

pub const MAX_REVENUE_DAYS: u32 = 90;

/// Headline counters for the admin dashboard.
///
/// "Today" and "this month" are calendar periods in the time zone of `now`.
/// Revenue sums `final_amount` over every order created in the period.
pub async fn dashboard_stats<Tz: TimeZone>(
    state: &AppState,
    now: &DateTime<Tz>,
) -> AppResult<ApiResponse<DashboardStats>> {
    let stats = collect_stats(&state.orm, now).await?;
    Ok(ApiResponse::success("Dashboard", stats, Some(Meta::empty())))
}

pub(crate) async fn collect_stats<C: ConnectionTrait, Tz: TimeZone>(
    db: &C,
    now: &DateTime<Tz>,
) -> AppResult<DashboardStats> {
    let tz = now.timezone();
    let today = now.date_naive();
    let tomorrow = next_day(today)?;
    let month_start = today.with_day0(0).ok_or_else(|| invalid_date(today))?;
    let next_month = month_start
        .checked_add_months(Months::new(1))
        .ok_or_else(|| invalid_date(month_start))?;

    let (today_orders, today_revenue) =
        window_totals(db, day_start(&tz, today)?, day_start(&tz, tomorrow)?).await?;
    let (month_orders, month_revenue) =
        window_totals(db, day_start(&tz, month_start)?, day_start(&tz, next_month)?).await?;

    let pending_orders = Orders::find()
        .filter(OrderCol::Status.eq(OrderStatus::Pending.as_str()))
        .count(db)
        .await?;
    let active_products = Products::find()
        .filter(ProdCol::Status.eq(RecordStatus::Active.as_str()))
        .count(db)
        .await?;
    let pending_reviews = Reviews::find()
        .filter(ReviewCol::Status.eq(ReviewStatus::Pending.as_str()))
        .count(db)
        .await?;

    Ok(DashboardStats {
        today_orders,
        today_revenue,
        month_orders,
        month_revenue,
        pending_orders,
        active_products,
        pending_reviews,
    })
}

/// Daily revenue for the last `days` calendar days, today included.
/// Days without orders are reported as zero.
pub async fn revenue_series<Tz: TimeZone>(
    state: &AppState,
    now: &DateTime<Tz>,
    days: Option<u32>,
) -> AppResult<ApiResponse<RevenueSeries>> {
    let days = days
        .unwrap_or(state.config.revenue_chart_days)
        .clamp(1, MAX_REVENUE_DAYS);
    let points = collect_revenue(&state.orm, now, days).await?;
    Ok(ApiResponse::success(
        "Revenue",
        RevenueSeries { points },
        Some(Meta::empty()),
    ))
}

pub(crate) async fn collect_revenue<C: ConnectionTrait, Tz: TimeZone>(
    db: &C,
    now: &DateTime<Tz>,
    days: u32,
) -> AppResult<Vec<RevenuePoint>> {
    let tz = now.timezone();
    let today = now.date_naive();
    let first_day = today
        .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
        .ok_or_else(|| invalid_date(today))?;

    let rows: Vec<(DateTime<FixedOffset>, i64)> = Orders::find()
        .select_only()
        .column(OrderCol::CreatedAt)
        .column(OrderCol::FinalAmount)
        .filter(OrderCol::CreatedAt.gte(day_start(&tz, first_day)?))
        .filter(OrderCol::CreatedAt.lt(day_start(&tz, next_day(today)?)?))
        .into_tuple()
        .all(db)
        .await?;

    let entries = rows
        .into_iter()
        .map(|(created_at, amount)| (created_at.with_timezone(&tz).date_naive(), amount));
    Ok(bucket_revenue(entries, first_day, days))
}

pub async fn recent_orders(state: &AppState, limit: u64) -> AppResult<ApiResponse<OrderList>> {
    let items = Orders::find()
        .order_by_desc(OrderCol::CreatedAt)
        .limit(limit)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();
    Ok(ApiResponse::success(
        "Recent orders",
        OrderList { items },
        Some(Meta::empty()),
    ))
}

// Amounts are summed here rather than with SQL SUM: Postgres widens SUM(BIGINT)
// to NUMERIC, which does not decode into i64.
async fn window_totals<C: ConnectionTrait>(
    db: &C,
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
) -> AppResult<(u64, i64)> {
    let amounts: Vec<i64> = Orders::find()
        .select_only()
        .column(OrderCol::FinalAmount)
        .filter(OrderCol::CreatedAt.gte(start))
        .filter(OrderCol::CreatedAt.lt(end))
        .into_tuple()
        .all(db)
        .await?;
    Ok((amounts.len() as u64, amounts.iter().sum()))
}

pub(crate) fn bucket_revenue(
    entries: impl IntoIterator<Item = (NaiveDate, i64)>,
    first_day: NaiveDate,
    days: u32,
) -> Vec<RevenuePoint> {
    let mut buckets: BTreeMap<NaiveDate, i64> = first_day
        .iter_days()
        .take(days as usize)
        .map(|date| (date, 0))
        .collect();
    for (date, amount) in entries {
        if let Some(total) = buckets.get_mut(&date) {
            *total += amount;
        }
    }
    buckets
        .into_iter()
        .map(|(date, revenue)| RevenuePoint { date, revenue })
        .collect()
}

/// Local midnight of `date` as a UTC instant, matching how timestamps are stored.
fn day_start<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> AppResult<DateTime<FixedOffset>> {
    let midnight = date.and_time(NaiveTime::MIN);
    let local = tz
        .from_local_datetime(&midnight)
        .earliest()
        .ok_or_else(|| invalid_date(date))?;
    Ok(local.with_timezone(&Utc).fixed_offset())
}

fn next_day(date: NaiveDate) -> AppResult<NaiveDate> {
    date.succ_opt().ok_or_else(|| invalid_date(date))
}

fn invalid_date(date: NaiveDate) -> AppError {
    AppError::Internal(anyhow::anyhow!("date out of range near {date}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn bucket_revenue_zero_fills_missing_days() {
        let entries = vec![
            (date(2026, 10, 15), 50),
            (date(2026, 10, 15), 25),
            (date(2026, 10, 17), 125),
            // outside the window
            (date(2026, 10, 10), 999),
        ];
        let points = bucket_revenue(entries, date(2026, 10, 15), 3);
        assert_eq!(
            points,
            vec![
                RevenuePoint { date: date(2026, 10, 15), revenue: 75 },
                RevenuePoint { date: date(2026, 10, 16), revenue: 0 },
                RevenuePoint { date: date(2026, 10, 17), revenue: 125 },
            ]
        );
    }

    #[test]
    fn day_start_is_midnight_in_the_given_zone() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let start = day_start(&ist, date(2026, 10, 17)).unwrap();
        assert_eq!(start.to_rfc3339(), "2026-10-16T18:30:00+00:00");
    }
}
