use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::settings::{RecordVisitRequest, SettingsMap, UpsertSettingRequest, VisitCount},
    entity::{
        site_settings::{ActiveModel as SettingActive, Entity as SiteSettings},
        visits::{ActiveModel as VisitActive, Column as VisitCol, Entity as Visits},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub const HOME_PAGE: &str = "home";
pub const VIEW_COUNT_KEY: &str = "view_count";
const MAX_SETTING_KEY_LEN: usize = 100;

pub async fn load_settings<C: ConnectionTrait>(db: &C) -> AppResult<BTreeMap<String, String>> {
    let settings = SiteSettings::find()
        .all(db)
        .await?
        .into_iter()
        .map(|s| (s.setting_key, s.setting_value))
        .collect();
    Ok(settings)
}

pub async fn list_settings(state: &AppState) -> AppResult<ApiResponse<SettingsMap>> {
    let settings = load_settings(&state.orm).await?;
    Ok(ApiResponse::success("Settings", SettingsMap { settings }, Some(Meta::empty())))
}

pub async fn upsert_setting(
    state: &AppState,
    actor: &AuthUser,
    key: String,
    payload: UpsertSettingRequest,
) -> AppResult<ApiResponse<SettingsMap>> {
    let key = key.trim();
    if key.is_empty() || key.len() > MAX_SETTING_KEY_LEN {
        return Err(AppError::bad_request("invalid setting key"));
    }
    put_setting(&state.orm, key, payload.value).await?;

    audit::record(
        &state.orm,
        Some(actor.user_id),
        "setting_update",
        "site_settings",
        serde_json::json!({ "key": key }),
    )
    .await;

    let settings = load_settings(&state.orm).await?;
    Ok(ApiResponse::success(
        "Setting saved",
        SettingsMap { settings },
        Some(Meta::empty()),
    ))
}

pub async fn put_setting<C: ConnectionTrait>(
    db: &C,
    key: &str,
    value: String,
) -> AppResult<()> {
    match SiteSettings::find_by_id(key.to_string()).one(db).await? {
        Some(existing) => {
            let mut active: SettingActive = existing.into();
            active.setting_value = Set(value);
            active.update(db).await?;
        }
        None => {
            SettingActive {
                setting_key: Set(key.to_string()),
                setting_value: Set(value),
            }
            .insert(db)
            .await?;
        }
    }
    Ok(())
}

/// Contact card for the microsite owner, built from site settings.
pub async fn vcard(state: &AppState) -> AppResult<String> {
    let settings = load_settings(&state.orm).await?;
    Ok(render_vcard(&settings))
}

pub fn render_vcard(settings: &BTreeMap<String, String>) -> String {
    let field = |key: &str, default: &str| -> String {
        let value = settings
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .unwrap_or(default);
        // A stray line break would start a new vCard property.
        value.replace(['\r', '\n'], " ")
    };

    [
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("FN:{}", field("director_name", "Demo User")),
        format!("TITLE:{}", field("director_title", "Founder")),
        format!("ORG:{}", field("company_name", "Demo Company")),
        format!("TEL:+91-{}", field("contact_phone1", "9876543210")),
        format!("EMAIL:{}", field("contact_email", "info@demo.com")),
        format!("ADR:;;{};;;India;", field("contact_address", "Demo City")),
        format!("URL:{}", field("website_url", "https://demo.com")),
        "END:VCARD".to_string(),
    ]
    .join("\r\n")
}

/// Record a page visit and return how many visits the page has had.
/// Home page visits also refresh the public `view_count` setting.
pub async fn record_visit(
    state: &AppState,
    ip_address: Option<String>,
    user_agent: Option<String>,
    payload: RecordVisitRequest,
) -> AppResult<ApiResponse<VisitCount>> {
    let page = payload
        .page
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| HOME_PAGE.to_string());

    VisitActive {
        id: Set(Uuid::new_v4()),
        page: Set(page.clone()),
        ip_address: Set(ip_address),
        user_agent: Set(user_agent),
        referer: Set(payload.referer),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(&state.orm)
    .await?;

    let count = Visits::find()
        .filter(VisitCol::Page.eq(page.as_str()))
        .count(&state.orm)
        .await?;
    if page == HOME_PAGE {
        put_setting(&state.orm, VIEW_COUNT_KEY, count.to_string()).await?;
    }

    Ok(ApiResponse::success(
        "Visit recorded",
        VisitCount { page, count },
        Some(Meta::empty()),
    ))
}
