use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::content::{
        BannerList, BannerPayload, GalleryList, GalleryPayload, PdfList, PdfPayload, VideoList,
        VideoPayload,
    },
    error::AppResult,
    middleware::auth::AdminUser,
    models::{Banner, GalleryItem, Pdf, Video},
    response::ApiResponse,
    routes::params::StatusQuery,
    services::content_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/banners", get(list_banners).post(create_banner))
        .route(
            "/banners/{id}",
            get(get_banner).put(update_banner).delete(delete_banner),
        )
        .route("/gallery", get(list_gallery).post(create_gallery_item))
        .route(
            "/gallery/{id}",
            get(get_gallery_item).put(update_gallery_item).delete(delete_gallery_item),
        )
        .route("/videos", get(list_videos).post(create_video))
        .route(
            "/videos/{id}",
            get(get_video).put(update_video).delete(delete_video),
        )
        .route("/pdfs", get(list_pdfs).post(create_pdf))
        .route(
            "/pdfs/{id}",
            get(get_pdf).put(update_pdf).delete(delete_pdf),
        )
}


#[utoipa::path(
    get,
    path = "/api/admin/banners",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "active, inactive or all")
    ),
    responses((status = 200, description = "List banners", body = ApiResponse<BannerList>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_banners(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<ApiResponse<BannerList>>> {
    let resp = content_service::admin_list_banners(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/banners",
    request_body = BannerPayload,
    responses(
        (status = 201, description = "Create banner", body = ApiResponse<Banner>),
        (status = 400, description = "Missing required fields")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_banner(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<BannerPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<Banner>>)> {
    let resp = content_service::create_banner(&state, &admin, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/admin/banners/{id}",
    params(("id" = Uuid, Path, description = "Banner ID")),
    responses(
        (status = 200, description = "Get banner", body = ApiResponse<Banner>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_banner(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Banner>>> {
    let resp = content_service::get_banner(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/banners/{id}",
    params(("id" = Uuid, Path, description = "Banner ID")),
    request_body = BannerPayload,
    responses(
        (status = 200, description = "Replace banner", body = ApiResponse<Banner>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_banner(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<BannerPayload>,
) -> AppResult<Json<ApiResponse<Banner>>> {
    let resp = content_service::update_banner(&state, &admin, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/banners/{id}",
    params(("id" = Uuid, Path, description = "Banner ID")),
    responses(
        (status = 200, description = "Delete banner"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_banner(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = content_service::delete_banner(&state, &admin, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/gallery",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "active, inactive or all")
    ),
    responses((status = 200, description = "List gallery", body = ApiResponse<GalleryList>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_gallery(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<ApiResponse<GalleryList>>> {
    let resp = content_service::admin_list_gallery(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/gallery",
    request_body = GalleryPayload,
    responses(
        (status = 201, description = "Create gallery item", body = ApiResponse<GalleryItem>),
        (status = 400, description = "Missing required fields")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_gallery_item(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<GalleryPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<GalleryItem>>)> {
    let resp = content_service::create_gallery_item(&state, &admin, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/admin/gallery/{id}",
    params(("id" = Uuid, Path, description = "Gallery item ID")),
    responses(
        (status = 200, description = "Get gallery item", body = ApiResponse<GalleryItem>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_gallery_item(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<GalleryItem>>> {
    let resp = content_service::get_gallery_item(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/gallery/{id}",
    params(("id" = Uuid, Path, description = "Gallery item ID")),
    request_body = GalleryPayload,
    responses(
        (status = 200, description = "Replace gallery item", body = ApiResponse<GalleryItem>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_gallery_item(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<GalleryPayload>,
) -> AppResult<Json<ApiResponse<GalleryItem>>> {
    let resp = content_service::update_gallery_item(&state, &admin, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/gallery/{id}",
    params(("id" = Uuid, Path, description = "Gallery item ID")),
    responses(
        (status = 200, description = "Delete gallery item"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_gallery_item(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = content_service::delete_gallery_item(&state, &admin, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/videos",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "active, inactive or all")
    ),
    responses((status = 200, description = "List videos", body = ApiResponse<VideoList>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_videos(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<ApiResponse<VideoList>>> {
    let resp = content_service::admin_list_videos(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/videos",
    request_body = VideoPayload,
    responses(
        (status = 201, description = "Create video", body = ApiResponse<Video>),
        (status = 400, description = "Missing required fields")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_video(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<VideoPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<Video>>)> {
    let resp = content_service::create_video(&state, &admin, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/admin/videos/{id}",
    params(("id" = Uuid, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Get video", body = ApiResponse<Video>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_video(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Video>>> {
    let resp = content_service::get_video(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/videos/{id}",
    params(("id" = Uuid, Path, description = "Video ID")),
    request_body = VideoPayload,
    responses(
        (status = 200, description = "Replace video", body = ApiResponse<Video>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_video(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<VideoPayload>,
) -> AppResult<Json<ApiResponse<Video>>> {
    let resp = content_service::update_video(&state, &admin, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/videos/{id}",
    params(("id" = Uuid, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Delete video"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_video(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = content_service::delete_video(&state, &admin, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/pdfs",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "active, inactive or all")
    ),
    responses((status = 200, description = "List pdfs", body = ApiResponse<PdfList>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_pdfs(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<ApiResponse<PdfList>>> {
    let resp = content_service::admin_list_pdfs(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/pdfs",
    request_body = PdfPayload,
    responses(
        (status = 201, description = "Create PDF", body = ApiResponse<Pdf>),
        (status = 400, description = "Missing required fields")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_pdf(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<PdfPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<Pdf>>)> {
    let resp = content_service::create_pdf(&state, &admin, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/admin/pdfs/{id}",
    params(("id" = Uuid, Path, description = "PDF ID")),
    responses(
        (status = 200, description = "Get PDF", body = ApiResponse<Pdf>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_pdf(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Pdf>>> {
    let resp = content_service::get_pdf(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/pdfs/{id}",
    params(("id" = Uuid, Path, description = "PDF ID")),
    request_body = PdfPayload,
    responses(
        (status = 200, description = "Replace PDF", body = ApiResponse<Pdf>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_pdf(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PdfPayload>,
) -> AppResult<Json<ApiResponse<Pdf>>> {
    let resp = content_service::update_pdf(&state, &admin, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/pdfs/{id}",
    params(("id" = Uuid, Path, description = "PDF ID")),
    responses(
        (status = 200, description = "Delete PDF"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_pdf(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = content_service::delete_pdf(&state, &admin, id).await?;
    Ok(Json(resp))
}
