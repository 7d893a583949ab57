use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::post,
};

use crate::{
    dto::leads::{CreateFreeWebsiteRequest, CreateInquiryRequest},
    error::AppResult,
    models::{FreeWebsiteRequest, Inquiry},
    response::ApiResponse,
    services::lead_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/inquiries", post(create_inquiry))
        .route("/free-website-requests", post(create_free_website_request))
}

#[utoipa::path(
    post,
    path = "/api/inquiries",
    request_body = CreateInquiryRequest,
    responses(
        (status = 201, description = "Inquiry submitted", body = ApiResponse<Inquiry>),
        (status = 400, description = "No products selected")
    ),
    tag = "Leads"
)]
pub async fn create_inquiry(
    State(state): State<AppState>,
    Json(payload): Json<CreateInquiryRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Inquiry>>)> {
    let resp = lead_service::create_inquiry(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/free-website-requests",
    request_body = CreateFreeWebsiteRequest,
    responses(
        (status = 201, description = "Request submitted", body = ApiResponse<FreeWebsiteRequest>),
        (status = 400, description = "Name and mobile are required")
    ),
    tag = "Leads"
)]
pub async fn create_free_website_request(
    State(state): State<AppState>,
    Json(payload): Json<CreateFreeWebsiteRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<FreeWebsiteRequest>>)> {
    let resp = lead_service::create_free_website_request(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
