use axum::{
    Json, Router,
    extract::State,
    http::header,
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    dto::settings::{RecordVisitRequest, SettingsMap, VisitCount},
    error::AppResult,
    middleware::client::ClientMeta,
    response::ApiResponse,
    services::settings_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/settings", get(list_settings))
        .route("/vcard", get(download_vcard))
        .route("/visits", post(record_visit))
}

#[utoipa::path(
    get,
    path = "/api/settings",
    responses((status = 200, description = "All site settings as a key/value map", body = ApiResponse<SettingsMap>)),
    tag = "Site"
)]
pub async fn list_settings(State(state): State<AppState>) -> AppResult<Json<ApiResponse<SettingsMap>>> {
    let resp = settings_service::list_settings(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/vcard",
    responses((status = 200, description = "Contact card", body = String, content_type = "text/vcard")),
    tag = "Site"
)]
pub async fn download_vcard(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let card = settings_service::vcard(&state).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/vcard; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"contact.vcf\""),
        ],
        card,
    ))
}

#[utoipa::path(
    post,
    path = "/api/visits",
    request_body = RecordVisitRequest,
    responses((status = 200, description = "Visit recorded; returns the page's visit count", body = ApiResponse<VisitCount>)),
    tag = "Site"
)]
pub async fn record_visit(
    State(state): State<AppState>,
    client: ClientMeta,
    Json(payload): Json<RecordVisitRequest>,
) -> AppResult<Json<ApiResponse<VisitCount>>> {
    let resp =
        settings_service::record_visit(&state, client.ip_address, client.user_agent, payload).await?;
    Ok(Json(resp))
}
