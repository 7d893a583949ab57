use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post, put},
};
use uuid::Uuid;

use crate::{
    dto::{
        auth::{
            AdminList, BypassTokenResponse, CreateAdminRequest, UpdateAdminRequest,
            UpdateUserStatusRequest, UserList,
        },
        settings::{SettingsMap, UpsertSettingRequest},
    },
    error::AppResult,
    middleware::auth::AdminUser,
    models::{Admin, User},
    response::ApiResponse,
    routes::params::StatusQuery,
    services::{auth_service, settings_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user).delete(delete_user))
        .route("/users/{id}/status", patch(update_user_status))
        .route("/admins", get(list_admins).post(create_admin))
        .route(
            "/admins/{id}",
            get(get_admin).patch(update_admin).delete(delete_admin),
        )
        .route("/bypass-tokens", post(issue_bypass_token))
        .route("/settings/{key}", put(upsert_setting))
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "active, inactive or all")
    ),
    responses((status = 200, description = "List users", body = ApiResponse<UserList>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<ApiResponse<UserList>>> {
    let resp = auth_service::list_users(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Get user", body = ApiResponse<User>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = auth_service::get_user(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}/status",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserStatusRequest,
    responses(
        (status = 200, description = "Activate or deactivate user", body = ApiResponse<User>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_user_status(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserStatusRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = auth_service::update_user_status(&state, &admin, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Delete user"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = auth_service::delete_user(&state, &admin, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/admins",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "active, inactive or all")
    ),
    responses((status = 200, description = "List admins", body = ApiResponse<AdminList>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_admins(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<StatusQuery>,
) -> AppResult<Json<ApiResponse<AdminList>>> {
    let resp = auth_service::list_admins(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/admins/{id}",
    params(("id" = Uuid, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Get admin", body = ApiResponse<Admin>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn get_admin(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Admin>>> {
    let resp = auth_service::get_admin(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/admins/{id}",
    params(("id" = Uuid, Path, description = "Admin ID")),
    request_body = UpdateAdminRequest,
    responses(
        (status = 200, description = "Update admin email, role or status", body = ApiResponse<Admin>),
        (status = 400, description = "Invalid role, or change to own role/status"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_admin(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAdminRequest>,
) -> AppResult<Json<ApiResponse<Admin>>> {
    let resp = auth_service::update_admin(&state, &admin, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/admins",
    request_body = CreateAdminRequest,
    responses(
        (status = 201, description = "Create admin", body = ApiResponse<Admin>),
        (status = 409, description = "Username already taken")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_admin(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<CreateAdminRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Admin>>)> {
    let resp = auth_service::create_admin(&state, &admin, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/admins/{id}",
    params(("id" = Uuid, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Delete admin"),
        (status = 400, description = "Cannot delete own account"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_admin(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = auth_service::delete_admin(&state, &admin, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/bypass-tokens",
    responses(
        (status = 201, description = "Single-use login token", body = ApiResponse<BypassTokenResponse>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn issue_bypass_token(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> AppResult<(StatusCode, Json<ApiResponse<BypassTokenResponse>>)> {
    let resp = auth_service::issue_bypass_token(&state, &admin).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/admin/settings/{key}",
    params(("key" = String, Path, description = "Setting key")),
    request_body = UpsertSettingRequest,
    responses((status = 200, description = "Create or replace a setting", body = ApiResponse<SettingsMap>)),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn upsert_setting(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(key): Path<String>,
    Json(payload): Json<UpsertSettingRequest>,
) -> AppResult<Json<ApiResponse<SettingsMap>>> {
    let resp = settings_service::upsert_setting(&state, &admin, key, payload).await?;
    Ok(Json(resp))
}
