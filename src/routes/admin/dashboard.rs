use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::Local;

use crate::{
    dto::{
        dashboard::{DashboardStats, RecentOrdersQuery, RevenueQuery, RevenueSeries},
        orders::OrderList,
    },
    error::AppResult,
    middleware::auth::AdminUser,
    response::ApiResponse,
    services::dashboard_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(stats))
        .route("/dashboard/revenue", get(revenue))
        .route("/dashboard/recent-orders", get(recent_orders))
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "Headline counters", body = ApiResponse<DashboardStats>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn stats(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    let resp = dashboard_service::dashboard_stats(&state, &Local::now()).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard/revenue",
    params(("days" = Option<u32>, Query, description = "Days to chart, default 7, at most 90")),
    responses(
        (status = 200, description = "Daily revenue, oldest first", body = ApiResponse<RevenueSeries>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn revenue(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<RevenueQuery>,
) -> AppResult<Json<ApiResponse<RevenueSeries>>> {
    let resp = dashboard_service::revenue_series(&state, &Local::now(), query.days).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard/recent-orders",
    params(("limit" = Option<u64>, Query, description = "Number of orders, default 10")),
    responses(
        (status = 200, description = "Latest orders", body = ApiResponse<OrderList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn recent_orders(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<RecentOrdersQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = dashboard_service::recent_orders(&state, query.limit()).await?;
    Ok(Json(resp))
}
