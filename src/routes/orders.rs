use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::orders::{CreateOrderRequest, OrderList, OrderWithItems},
    error::AppResult,
    middleware::auth::{AuthUser, MaybeAuthUser},
    response::ApiResponse,
    routes::params::Pagination,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_order))
        .route("/mine", get(my_orders))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = ApiResponse<OrderWithItems>),
        (status = 400, description = "Empty cart, unknown product, price mismatch or insufficient stock"),
        (status = 401, description = "Invalid bearer token")
    ),
    security((), ("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderWithItems>>)> {
    let resp = order_service::create_order(&state, user.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/orders/mine",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "Orders of the logged-in user", body = ApiResponse<OrderList>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn my_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_user_orders(&state, &user, pagination).await?;
    Ok(Json(resp))
}
