use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::reviews::{CreateReviewRequest, ReviewList},
    error::AppResult,
    middleware::client::ClientMeta,
    models::Review,
    response::ApiResponse,
    services::review_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_reviews).post(submit_review))
}

#[utoipa::path(
    get,
    path = "/api/reviews",
    responses((status = 200, description = "Approved reviews, newest first", body = ApiResponse<ReviewList>)),
    tag = "Reviews"
)]
pub async fn list_reviews(State(state): State<AppState>) -> AppResult<Json<ApiResponse<ReviewList>>> {
    let resp = review_service::list_approved(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review submitted for moderation", body = ApiResponse<Review>),
        (status = 400, description = "Missing fields or rating outside 1..=5")
    ),
    tag = "Reviews"
)]
pub async fn submit_review(
    State(state): State<AppState>,
    client: ClientMeta,
    Json(payload): Json<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Review>>)> {
    let resp = review_service::submit_review(&state, client.ip_address, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
