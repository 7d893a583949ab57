use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::content::{BannerList, GalleryList, PdfList, VideoList},
    error::AppResult,
    response::ApiResponse,
    routes::params::BannerQuery,
    services::content_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/banners", get(list_banners))
        .route("/gallery", get(list_gallery))
        .route("/videos", get(list_videos))
        .route("/pdfs", get(list_pdfs))
}

#[utoipa::path(
    get,
    path = "/api/banners",
    params(("position" = Option<String>, Query, description = "Slot: top, bottom or both")),
    responses((status = 200, description = "Active banners", body = ApiResponse<BannerList>)),
    tag = "Content"
)]
pub async fn list_banners(
    State(state): State<AppState>,
    Query(query): Query<BannerQuery>,
) -> AppResult<Json<ApiResponse<BannerList>>> {
    let resp = content_service::list_banners(&state, query.position).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/gallery",
    responses((status = 200, description = "Active gallery images", body = ApiResponse<GalleryList>)),
    tag = "Content"
)]
pub async fn list_gallery(State(state): State<AppState>) -> AppResult<Json<ApiResponse<GalleryList>>> {
    let resp = content_service::list_gallery(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/videos",
    responses((status = 200, description = "Active videos", body = ApiResponse<VideoList>)),
    tag = "Content"
)]
pub async fn list_videos(State(state): State<AppState>) -> AppResult<Json<ApiResponse<VideoList>>> {
    let resp = content_service::list_videos(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/pdfs",
    responses((status = 200, description = "Active PDFs", body = ApiResponse<PdfList>)),
    tag = "Content"
)]
pub async fn list_pdfs(State(state): State<AppState>) -> AppResult<Json<ApiResponse<PdfList>>> {
    let resp = content_service::list_pdfs(&state).await?;
    Ok(Json(resp))
}
