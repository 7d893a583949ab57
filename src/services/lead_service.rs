//! Inbound leads: product inquiries and free-website requests.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit,
    dto::leads::{
        CreateFreeWebsiteRequest, CreateInquiryRequest, FreeWebsiteRequestList, InquiryList,
        UpdateLeadStatusRequest,
    },
    entity::{free_website_requests, inquiries},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{FreeWebsiteRequest, Inquiry, LeadStatus},
    response::{ApiResponse, Meta},
    routes::params::StatusQuery,
    services::fetch_page,
    state::AppState,
};

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub async fn create_inquiry(
    state: &AppState,
    payload: CreateInquiryRequest,
) -> AppResult<ApiResponse<Inquiry>> {
    if payload.products.is_empty() {
        return Err(AppError::bad_request("Select at least one product"));
    }
    if payload.products.iter().any(|p| p.title.trim().is_empty()) {
        return Err(AppError::bad_request("product title is required"));
    }
    if payload.products.iter().any(|p| p.quantity.is_some_and(|q| q <= 0)) {
        return Err(AppError::bad_request("quantity must be greater than 0"));
    }
    let products = serde_json::to_value(&payload.products)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;

    let inquiry = inquiries::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_name: Set(non_blank(payload.user_name)),
        user_phone: Set(non_blank(payload.user_phone)),
        user_email: Set(non_blank(payload.user_email)),
        products: Set(products),
        message: Set(non_blank(payload.message)),
        status: Set(LeadStatus::Pending.as_str().into()),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(inquiry_id = %inquiry.id, "inquiry received");

    Ok(ApiResponse::success(
        "Inquiry submitted",
        inquiry_from_entity(inquiry),
        Some(Meta::empty()),
    ))
}

pub async fn list_inquiries(
    state: &AppState,
    query: StatusQuery,
) -> AppResult<ApiResponse<InquiryList>> {
    let mut finder = inquiries::Entity::find();
    if let Some(status) = query.status_filter() {
        finder = finder.filter(inquiries::Column::Status.eq(status));
    }
    let finder = finder.order_by_desc(inquiries::Column::CreatedAt);

    let (rows, meta) = fetch_page(&state.orm, finder, &query.pagination()).await?;
    let items = rows.into_iter().map(inquiry_from_entity).collect();
    Ok(ApiResponse::success("Inquiries", InquiryList { items }, Some(meta)))
}

pub async fn get_inquiry(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Inquiry>> {
    let inquiry = inquiries::Entity::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "Inquiry",
        inquiry_from_entity(inquiry),
        Some(Meta::empty()),
    ))
}

pub async fn update_inquiry_status(
    state: &AppState,
    actor: &AuthUser,
    id: Uuid,
    payload: UpdateLeadStatusRequest,
) -> AppResult<ApiResponse<Inquiry>> {
    let existing = inquiries::Entity::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut active: inquiries::ActiveModel = existing.into();
    active.status = Set(payload.status.as_str().into());
    let inquiry = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(actor.user_id),
        "inquiry_status_update",
        "inquiries",
        serde_json::json!({ "inquiry_id": inquiry.id, "status": inquiry.status }),
    )
    .await;

    Ok(ApiResponse::success(
        "Inquiry updated",
        inquiry_from_entity(inquiry),
        Some(Meta::empty()),
    ))
}

pub async fn delete_inquiry(
    state: &AppState,
    actor: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = inquiries::Entity::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    audit::record(
        &state.orm,
        Some(actor.user_id),
        "inquiry_delete",
        "inquiries",
        serde_json::json!({ "inquiry_id": id }),
    )
    .await;
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn inquiry_from_entity(model: inquiries::Model) -> Inquiry {
    Inquiry {
        id: model.id,
        user_name: model.user_name,
        user_phone: model.user_phone,
        user_email: model.user_email,
        products: model.products,
        message: model.message,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

pub async fn create_free_website_request(
    state: &AppState,
    payload: CreateFreeWebsiteRequest,
) -> AppResult<ApiResponse<FreeWebsiteRequest>> {
    let name = payload.name.trim();
    let mobile = payload.mobile.trim();
    if name.is_empty() || mobile.is_empty() {
        return Err(AppError::bad_request("Name and mobile are required"));
    }

    let request = free_website_requests::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        mobile: Set(mobile.to_string()),
        email: Set(non_blank(payload.email)),
        business_details: Set(non_blank(payload.business_details)),
        status: Set(LeadStatus::Pending.as_str().into()),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(request_id = %request.id, "free website request received");

    Ok(ApiResponse::success(
        "Request submitted",
        free_website_request_from_entity(request),
        Some(Meta::empty()),
    ))
}

pub async fn list_free_website_requests(
    state: &AppState,
    query: StatusQuery,
) -> AppResult<ApiResponse<FreeWebsiteRequestList>> {
    let mut finder = free_website_requests::Entity::find();
    if let Some(status) = query.status_filter() {
        finder = finder.filter(free_website_requests::Column::Status.eq(status));
    }
    let finder = finder.order_by_desc(free_website_requests::Column::CreatedAt);

    let (rows, meta) = fetch_page(&state.orm, finder, &query.pagination()).await?;
    let items = rows
        .into_iter()
        .map(free_website_request_from_entity)
        .collect();
    Ok(ApiResponse::success(
        "Free website requests",
        FreeWebsiteRequestList { items },
        Some(meta),
    ))
}

pub async fn get_free_website_request(
    state: &AppState,
    id: Uuid,
) -> AppResult<ApiResponse<FreeWebsiteRequest>> {
    let request = free_website_requests::Entity::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "Free website request",
        free_website_request_from_entity(request),
        Some(Meta::empty()),
    ))
}

pub async fn update_free_website_request_status(
    state: &AppState,
    actor: &AuthUser,
    id: Uuid,
    payload: UpdateLeadStatusRequest,
) -> AppResult<ApiResponse<FreeWebsiteRequest>> {
    let existing = free_website_requests::Entity::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut active: free_website_requests::ActiveModel = existing.into();
    active.status = Set(payload.status.as_str().into());
    let request = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(actor.user_id),
        "free_website_request_status_update",
        "free_website_requests",
        serde_json::json!({ "request_id": request.id, "status": request.status }),
    )
    .await;

    Ok(ApiResponse::success(
        "Request updated",
        free_website_request_from_entity(request),
        Some(Meta::empty()),
    ))
}

pub async fn delete_free_website_request(
    state: &AppState,
    actor: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = free_website_requests::Entity::delete_by_id(id)
        .exec(&state.orm)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    audit::record(
        &state.orm,
        Some(actor.user_id),
        "free_website_request_delete",
        "free_website_requests",
        serde_json::json!({ "request_id": id }),
    )
    .await;
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn free_website_request_from_entity(model: free_website_requests::Model) -> FreeWebsiteRequest {
    FreeWebsiteRequest {
        id: model.id,
        name: model.name,
        mobile: model.mobile,
        email: model.email,
        business_details: model.business_details,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
