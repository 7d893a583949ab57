//! Banners, gallery, videos and PDFs: the microsite's display content.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::content::{
        BannerList, BannerPayload, GalleryList, GalleryPayload, PdfList, PdfPayload, VideoList,
        VideoPayload,
    },
    entity::{banners, gallery, pdfs, videos},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Banner, BannerPosition, GalleryItem, Pdf, RecordStatus, Video},
    response::{ApiResponse, Meta},
    routes::params::StatusQuery,
    services::fetch_page,
    state::AppState,
};

pub const PUBLIC_GALLERY_LIMIT: u64 = 20;

fn require(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(())
}

fn status_or_active(status: Option<RecordStatus>) -> String {
    status.unwrap_or(RecordStatus::Active).as_str().to_string()
}

async fn audit_content(state: &AppState, actor: &AuthUser, action: &str, resource: &str, id: Uuid) {
    audit::record(
        &state.orm,
        Some(actor.user_id),
        action,
        resource,
        serde_json::json!({ "id": id }),
    )
    .await;
}

fn deleted() -> ApiResponse<serde_json::Value> {
    ApiResponse::success("Deleted", serde_json::json!({}), Some(Meta::empty()))
}

// ---- banners ----

/// Active banners for a page slot. A banner placed on `both` shows in every slot.
pub async fn list_banners(
    state: &AppState,
    position: Option<BannerPosition>,
) -> AppResult<ApiResponse<BannerList>> {
    let mut finder = banners::Entity::find()
        .filter(banners::Column::Status.eq(RecordStatus::Active.as_str()));
    if let Some(position) = position {
        finder = finder.filter(
            Condition::any()
                .add(banners::Column::Position.eq(position.as_str()))
                .add(banners::Column::Position.eq(BannerPosition::Both.as_str())),
        );
    }

    let items = finder
        .order_by_asc(banners::Column::SortOrder)
        .order_by_desc(banners::Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(banner_from_entity)
        .collect();
    Ok(ApiResponse::success("Banners", BannerList { items }, Some(Meta::empty())))
}

pub async fn admin_list_banners(
    state: &AppState,
    query: StatusQuery,
) -> AppResult<ApiResponse<BannerList>> {
    let mut finder = banners::Entity::find();
    if let Some(status) = query.status_filter() {
        finder = finder.filter(banners::Column::Status.eq(status));
    }
    let finder = finder
        .order_by_asc(banners::Column::SortOrder)
        .order_by_desc(banners::Column::CreatedAt);

    let (rows, meta) = fetch_page(&state.orm, finder, &query.pagination()).await?;
    let items = rows.into_iter().map(banner_from_entity).collect();
    Ok(ApiResponse::success("Banners", BannerList { items }, Some(meta)))
}

pub async fn get_banner(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Banner>> {
    let banner = banners::Entity::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Banner", banner_from_entity(banner), Some(Meta::empty())))
}

pub async fn create_banner(
    state: &AppState,
    actor: &AuthUser,
    payload: BannerPayload,
) -> AppResult<ApiResponse<Banner>> {
    require("title", &payload.title)?;
    require("image_url", &payload.image_url)?;

    let banner = banners::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title),
        image_url: Set(payload.image_url),
        link_url: Set(payload.link_url),
        position: Set(payload.position.as_str().into()),
        status: Set(status_or_active(payload.status)),
        sort_order: Set(payload.sort_order.unwrap_or(0)),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(&state.orm)
    .await?;

    audit_content(state, actor, "banner_create", "banners", banner.id).await;
    Ok(ApiResponse::success("Banner created", banner_from_entity(banner), Some(Meta::empty())))
}

pub async fn update_banner(
    state: &AppState,
    actor: &AuthUser,
    id: Uuid,
    payload: BannerPayload,
) -> AppResult<ApiResponse<Banner>> {
    require("title", &payload.title)?;
    require("image_url", &payload.image_url)?;

    let existing = banners::Entity::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut active: banners::ActiveModel = existing.into();
    active.title = Set(payload.title);
    active.image_url = Set(payload.image_url);
    active.link_url = Set(payload.link_url);
    active.position = Set(payload.position.as_str().into());
    if let Some(status) = payload.status {
        active.status = Set(status.as_str().into());
    }
    if let Some(sort_order) = payload.sort_order {
        active.sort_order = Set(sort_order);
    }
    let banner = active.update(&state.orm).await?;

    audit_content(state, actor, "banner_update", "banners", banner.id).await;
    Ok(ApiResponse::success("Updated", banner_from_entity(banner), Some(Meta::empty())))
}

pub async fn delete_banner(
    state: &AppState,
    actor: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = banners::Entity::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    audit_content(state, actor, "banner_delete", "banners", id).await;
    Ok(deleted())
}

fn banner_from_entity(model: banners::Model) -> Banner {
    Banner {
        id: model.id,
        title: model.title,
        image_url: model.image_url,
        link_url: model.link_url,
        position: model.position,
        status: model.status,
        sort_order: model.sort_order,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

// ---- gallery ----

pub async fn list_gallery(state: &AppState) -> AppResult<ApiResponse<GalleryList>> {
    let items = gallery::Entity::find()
        .filter(gallery::Column::Status.eq(RecordStatus::Active.as_str()))
        .order_by_asc(gallery::Column::SortOrder)
        .order_by_desc(gallery::Column::CreatedAt)
        .limit(PUBLIC_GALLERY_LIMIT)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(gallery_from_entity)
        .collect();
    Ok(ApiResponse::success("Gallery", GalleryList { items }, Some(Meta::empty())))
}

pub async fn admin_list_gallery(
    state: &AppState,
    query: StatusQuery,
) -> AppResult<ApiResponse<GalleryList>> {
    let mut finder = gallery::Entity::find();
    if let Some(status) = query.status_filter() {
        finder = finder.filter(gallery::Column::Status.eq(status));
    }
    let finder = finder
        .order_by_asc(gallery::Column::SortOrder)
        .order_by_desc(gallery::Column::CreatedAt);

    let (rows, meta) = fetch_page(&state.orm, finder, &query.pagination()).await?;
    let items = rows.into_iter().map(gallery_from_entity).collect();
    Ok(ApiResponse::success("Gallery", GalleryList { items }, Some(meta)))
}

pub async fn get_gallery_item(state: &AppState, id: Uuid) -> AppResult<ApiResponse<GalleryItem>> {
    let item = gallery::Entity::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Gallery item", gallery_from_entity(item), Some(Meta::empty())))
}

pub async fn create_gallery_item(
    state: &AppState,
    actor: &AuthUser,
    payload: GalleryPayload,
) -> AppResult<ApiResponse<GalleryItem>> {
    require("title", &payload.title)?;
    require("image_url", &payload.image_url)?;

    let item = gallery::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title),
        image_url: Set(payload.image_url),
        thumbnail_url: Set(payload.thumbnail_url),
        description: Set(payload.description),
        alt_text: Set(payload.alt_text),
        status: Set(status_or_active(payload.status)),
        sort_order: Set(payload.sort_order.unwrap_or(0)),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(&state.orm)
    .await?;

    audit_content(state, actor, "gallery_create", "gallery", item.id).await;
    Ok(ApiResponse::success("Gallery item created", gallery_from_entity(item), Some(Meta::empty())))
}

pub async fn update_gallery_item(
    state: &AppState,
    actor: &AuthUser,
    id: Uuid,
    payload: GalleryPayload,
) -> AppResult<ApiResponse<GalleryItem>> {
    require("title", &payload.title)?;
    require("image_url", &payload.image_url)?;

    let existing = gallery::Entity::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut active: gallery::ActiveModel = existing.into();
    active.title = Set(payload.title);
    active.image_url = Set(payload.image_url);
    active.thumbnail_url = Set(payload.thumbnail_url);
    active.description = Set(payload.description);
    active.alt_text = Set(payload.alt_text);
    if let Some(status) = payload.status {
        active.status = Set(status.as_str().into());
    }
    if let Some(sort_order) = payload.sort_order {
        active.sort_order = Set(sort_order);
    }
    let item = active.update(&state.orm).await?;

    audit_content(state, actor, "gallery_update", "gallery", item.id).await;
    Ok(ApiResponse::success("Updated", gallery_from_entity(item), Some(Meta::empty())))
}

pub async fn delete_gallery_item(
    state: &AppState,
    actor: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = gallery::Entity::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    audit_content(state, actor, "gallery_delete", "gallery", id).await;
    Ok(deleted())
}

fn gallery_from_entity(model: gallery::Model) -> GalleryItem {
    GalleryItem {
        id: model.id,
        title: model.title,
        image_url: model.image_url,
        thumbnail_url: model.thumbnail_url,
        description: model.description,
        alt_text: model.alt_text,
        status: model.status,
        sort_order: model.sort_order,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

// ---- videos ----

pub async fn list_videos(state: &AppState) -> AppResult<ApiResponse<VideoList>> {
    let items = videos::Entity::find()
        .filter(videos::Column::Status.eq(RecordStatus::Active.as_str()))
        .order_by_asc(videos::Column::SortOrder)
        .order_by_desc(videos::Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(video_from_entity)
        .collect();
    Ok(ApiResponse::success("Videos", VideoList { items }, Some(Meta::empty())))
}

pub async fn admin_list_videos(
    state: &AppState,
    query: StatusQuery,
) -> AppResult<ApiResponse<VideoList>> {
    let mut finder = videos::Entity::find();
    if let Some(status) = query.status_filter() {
        finder = finder.filter(videos::Column::Status.eq(status));
    }
    let finder = finder
        .order_by_asc(videos::Column::SortOrder)
        .order_by_desc(videos::Column::CreatedAt);

    let (rows, meta) = fetch_page(&state.orm, finder, &query.pagination()).await?;
    let items = rows.into_iter().map(video_from_entity).collect();
    Ok(ApiResponse::success("Videos", VideoList { items }, Some(meta)))
}

pub async fn get_video(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Video>> {
    let video = videos::Entity::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Video", video_from_entity(video), Some(Meta::empty())))
}

pub async fn create_video(
    state: &AppState,
    actor: &AuthUser,
    payload: VideoPayload,
) -> AppResult<ApiResponse<Video>> {
    require("title", &payload.title)?;
    require("youtube_url", &payload.youtube_url)?;

    let video = videos::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title),
        youtube_url: Set(payload.youtube_url),
        embed_code: Set(payload.embed_code),
        description: Set(payload.description),
        status: Set(status_or_active(payload.status)),
        sort_order: Set(payload.sort_order.unwrap_or(0)),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(&state.orm)
    .await?;

    audit_content(state, actor, "video_create", "videos", video.id).await;
    Ok(ApiResponse::success("Video created", video_from_entity(video), Some(Meta::empty())))
}

pub async fn update_video(
    state: &AppState,
    actor: &AuthUser,
    id: Uuid,
    payload: VideoPayload,
) -> AppResult<ApiResponse<Video>> {
    require("title", &payload.title)?;
    require("youtube_url", &payload.youtube_url)?;

    let existing = videos::Entity::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut active: videos::ActiveModel = existing.into();
    active.title = Set(payload.title);
    active.youtube_url = Set(payload.youtube_url);
    active.embed_code = Set(payload.embed_code);
    active.description = Set(payload.description);
    if let Some(status) = payload.status {
        active.status = Set(status.as_str().into());
    }
    if let Some(sort_order) = payload.sort_order {
        active.sort_order = Set(sort_order);
    }
    let video = active.update(&state.orm).await?;

    audit_content(state, actor, "video_update", "videos", video.id).await;
    Ok(ApiResponse::success("Updated", video_from_entity(video), Some(Meta::empty())))
}

pub async fn delete_video(
    state: &AppState,
    actor: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = videos::Entity::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    audit_content(state, actor, "video_delete", "videos", id).await;
    Ok(deleted())
}

fn video_from_entity(model: videos::Model) -> Video {
    Video {
        id: model.id,
        title: model.title,
        youtube_url: model.youtube_url,
        embed_code: model.embed_code,
        description: model.description,
        status: model.status,
        sort_order: model.sort_order,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

// ---- pdfs ----

pub async fn list_pdfs(state: &AppState) -> AppResult<ApiResponse<PdfList>> {
    let items = pdfs::Entity::find()
        .filter(pdfs::Column::Status.eq(RecordStatus::Active.as_str()))
        .order_by_asc(pdfs::Column::SortOrder)
        .order_by_desc(pdfs::Column::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(pdf_from_entity)
        .collect();
    Ok(ApiResponse::success("PDFs", PdfList { items }, Some(Meta::empty())))
}

pub async fn admin_list_pdfs(
    state: &AppState,
    query: StatusQuery,
) -> AppResult<ApiResponse<PdfList>> {
    let mut finder = pdfs::Entity::find();
    if let Some(status) = query.status_filter() {
        finder = finder.filter(pdfs::Column::Status.eq(status));
    }
    let finder = finder
        .order_by_asc(pdfs::Column::SortOrder)
        .order_by_desc(pdfs::Column::CreatedAt);

    let (rows, meta) = fetch_page(&state.orm, finder, &query.pagination()).await?;
    let items = rows.into_iter().map(pdf_from_entity).collect();
    Ok(ApiResponse::success("PDFs", PdfList { items }, Some(meta)))
}

pub async fn get_pdf(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Pdf>> {
    let pdf = pdfs::Entity::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("PDF", pdf_from_entity(pdf), Some(Meta::empty())))
}

pub async fn create_pdf(
    state: &AppState,
    actor: &AuthUser,
    payload: PdfPayload,
) -> AppResult<ApiResponse<Pdf>> {
    require("title", &payload.title)?;
    require("file_url", &payload.file_url)?;
    if payload.file_size.is_some_and(|size| size < 0) {
        return Err(AppError::bad_request("file_size must not be negative"));
    }

    let pdf = pdfs::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title),
        description: Set(payload.description),
        file_url: Set(payload.file_url),
        file_size: Set(payload.file_size),
        status: Set(status_or_active(payload.status)),
        sort_order: Set(payload.sort_order.unwrap_or(0)),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(&state.orm)
    .await?;

    audit_content(state, actor, "pdf_create", "pdfs", pdf.id).await;
    Ok(ApiResponse::success("PDF created", pdf_from_entity(pdf), Some(Meta::empty())))
}

pub async fn update_pdf(
    state: &AppState,
    actor: &AuthUser,
    id: Uuid,
    payload: PdfPayload,
) -> AppResult<ApiResponse<Pdf>> {
    require("title", &payload.title)?;
    require("file_url", &payload.file_url)?;
    if payload.file_size.is_some_and(|size| size < 0) {
        return Err(AppError::bad_request("file_size must not be negative"));
    }

    let existing = pdfs::Entity::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut active: pdfs::ActiveModel = existing.into();
    active.title = Set(payload.title);
    active.description = Set(payload.description);
    active.file_url = Set(payload.file_url);
    active.file_size = Set(payload.file_size);
    if let Some(status) = payload.status {
        active.status = Set(status.as_str().into());
    }
    if let Some(sort_order) = payload.sort_order {
        active.sort_order = Set(sort_order);
    }
    let pdf = active.update(&state.orm).await?;

    audit_content(state, actor, "pdf_update", "pdfs", pdf.id).await;
    Ok(ApiResponse::success("Updated", pdf_from_entity(pdf), Some(Meta::empty())))
}

pub async fn delete_pdf(
    state: &AppState,
    actor: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = pdfs::Entity::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    audit_content(state, actor, "pdf_delete", "pdfs", id).await;
    Ok(deleted())
}

fn pdf_from_entity(model: pdfs::Model) -> Pdf {
    Pdf {
        id: model.id,
        title: model.title,
        description: model.description,
        file_url: model.file_url,
        file_size: model.file_size,
        status: model.status,
        sort_order: model.sort_order,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
