use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    dto::{
        leads::{FreeWebsiteRequestList, InquiryList, UpdateLeadStatusRequest},
        reviews::{ReviewList, UpdateReviewStatusRequest},
    },
    error::AppResult,
    middleware::auth::AdminUser,
    models::{FreeWebsiteRequest, Inquiry, Review},
    response::ApiResponse,
    routes::params::StatusQuery,
    services::{lead_service, review_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reviews", get(list_reviews))
        .route("/reviews/{id}/status", patch(update_review_status))
        .route("/reviews/{id}", get(get_review).delete(delete_review))
        .route("/inquiries", get(list_inquiries))
        .route("/inquiries/{id}", get(get_inquiry).delete(delete_inquiry))
        .route("/inquiries/{id}/status", patch(update_inquiry_status))
        .route("/free-website-requests", get(list_free_website_requests))
        .route(
            "/free-website-requests/{id}",
            get(get_free_website_request).delete(delete_free_website_request),
        )
        .route(
            "/free-website-requests/{id}/status",
            patch(update_free_website_request_status),
        )
}

#[utoipa::path(
    get,
    path = "/api/admin/reviews",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "pending, approved, rejected or all")
    ),
    responses((status = 200, description = "List reviews", body = ApiResponse<ReviewList>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<ApiResponse<ReviewList>>> {
    let resp = review_service::admin_list_reviews(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/reviews/{id}",
    params(("id" = Uuid, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Get review", body = ApiResponse<Review>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_review(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Review>>> {
    let resp = review_service::get_review(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/reviews/{id}/status",
    params(("id" = Uuid, Path, description = "Review ID")),
    request_body = UpdateReviewStatusRequest,
    responses(
        (status = 200, description = "Moderate review", body = ApiResponse<Review>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_review_status(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateReviewStatusRequest>,
) -> AppResult<Json<ApiResponse<Review>>> {
    let resp = review_service::update_review_status(&state, &admin, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/reviews/{id}",
    params(("id" = Uuid, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Delete review"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_review(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = review_service::delete_review(&state, &admin, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/inquiries",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "pending, contacted, closed or all")
    ),
    responses((status = 200, description = "List inquirys", body = ApiResponse<InquiryList>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_inquiries(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<ApiResponse<InquiryList>>> {
    let resp = lead_service::list_inquiries(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/inquiries/{id}",
    params(("id" = Uuid, Path, description = "Inquiry ID")),
    responses(
        (status = 200, description = "Get inquiry", body = ApiResponse<Inquiry>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_inquiry(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Inquiry>>> {
    let resp = lead_service::get_inquiry(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/inquiries/{id}/status",
    params(("id" = Uuid, Path, description = "Inquiry ID")),
    request_body = UpdateLeadStatusRequest,
    responses(
        (status = 200, description = "Update inquiry status", body = ApiResponse<Inquiry>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_inquiry_status(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLeadStatusRequest>,
) -> AppResult<Json<ApiResponse<Inquiry>>> {
    let resp = lead_service::update_inquiry_status(&state, &admin, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/inquiries/{id}",
    params(("id" = Uuid, Path, description = "Inquiry ID")),
    responses(
        (status = 200, description = "Delete inquiry"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_inquiry(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = lead_service::delete_inquiry(&state, &admin, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/free-website-requests",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "pending, contacted, closed or all")
    ),
    responses((status = 200, description = "List free website requests", body = ApiResponse<FreeWebsiteRequestList>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_free_website_requests(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<ApiResponse<FreeWebsiteRequestList>>> {
    let resp = lead_service::list_free_website_requests(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/free-website-requests/{id}",
    params(("id" = Uuid, Path, description = "Free website request ID")),
    responses(
        (status = 200, description = "Get free website request", body = ApiResponse<FreeWebsiteRequest>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_free_website_request(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<FreeWebsiteRequest>>> {
    let resp = lead_service::get_free_website_request(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/free-website-requests/{id}/status",
    params(("id" = Uuid, Path, description = "Free website request ID")),
    request_body = UpdateLeadStatusRequest,
    responses(
        (status = 200, description = "Update free website request status", body = ApiResponse<FreeWebsiteRequest>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_free_website_request_status(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLeadStatusRequest>,
) -> AppResult<Json<ApiResponse<FreeWebsiteRequest>>> {
    let resp = lead_service::update_free_website_request_status(&state, &admin, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/free-website-requests/{id}",
    params(("id" = Uuid, Path, description = "Free website request ID")),
    responses(
        (status = 200, description = "Delete free website request"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_free_website_request(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = lead_service::delete_free_website_request(&state, &admin, id).await?;
    Ok(Json(resp))
}
