use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use password_hash::rand_core::{OsRng, RngCore};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};
use sea_orm::sea_query::Expr;
use uuid::Uuid;

use crate::{
    audit,
    dto::auth::{
        AdminList, AdminLoginRequest, BypassTokenResponse, CreateAdminRequest, LoginRequest,
        LoginResponse, RedeemBypassRequest, RegisterRequest, UpdateAdminRequest,
        UpdateUserStatusRequest, UserList,
    },
    entity::{
        admin_bypass_tokens::{
            ActiveModel as BypassActive, Column as BypassCol, Entity as BypassTokens,
        },
        admins::{ActiveModel as AdminActive, Column as AdminCol, Entity as Admins, Model as AdminModel},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ROLE_ADMIN, ROLE_SUPER_ADMIN, ROLE_USER, issue_token},
    models::{Admin, RecordStatus, User},
    response::{ApiResponse, Meta},
    routes::params::StatusQuery,
    services::fetch_page,
    state::AppState,
};

pub const MIN_PASSWORD_LEN: usize = 6;
const BYPASS_TOKEN_BYTES: usize = 32;

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

fn require(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(())
}

fn check_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    require("name", &payload.name)?;
    require("username", &payload.username)?;
    require("email", &payload.email)?;
    check_password(&payload.password)?;

    let username = payload.username.trim().to_string();
    let email = payload.email.trim().to_lowercase();

    let exist = Users::find()
        .filter(
            Condition::any()
                .add(UserCol::Username.eq(username.as_str()))
                .add(UserCol::Email.eq(email.as_str())),
        )
        .one(&state.orm)
        .await?;
    if exist.is_some() {
        return Err(AppError::Conflict(
            "Username or email is already taken".to_string(),
        ));
    }

    let user = UserActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name.trim().to_string()),
        username: Set(username),
        email: Set(email),
        phone: Set(payload.phone.filter(|p| !p.trim().is_empty())),
        password_hash: Set(hash_password(&payload.password)?),
        status: Set(RecordStatus::Active.as_str().into()),
        last_login: Set(None),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        Some(user.id),
        "user_register",
        "users",
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "User created",
        user_from_entity(user),
        Some(Meta::empty()),
    ))
}

/// Log a storefront user in by username or email.
pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let login = payload.login.trim();
    let user = Users::find()
        .filter(
            Condition::any()
                .add(UserCol::Username.eq(login))
                .add(UserCol::Email.eq(login.to_lowercase())),
        )
        .filter(UserCol::Status.eq(RecordStatus::Active.as_str()))
        .one(&state.orm)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&user.password_hash, &payload.password)? {
        return Err(AppError::Unauthorized);
    }

    let token = issue_token(
        &state.config.jwt_secret,
        user.id,
        ROLE_USER,
        state.config.jwt_ttl_hours,
    )?;

    let user_id = user.id;
    let mut active: UserActive = user.into();
    active.last_login = Set(Some(Utc::now().fixed_offset()));
    active.update(&state.orm).await?;

    tracing::info!(user_id = %user_id, "user logged in");

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse { token },
        Some(Meta::empty()),
    ))
}

pub async fn login_admin(
    state: &AppState,
    payload: AdminLoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let admin = Admins::find()
        .filter(AdminCol::Username.eq(payload.username.trim()))
        .filter(AdminCol::Status.eq(RecordStatus::Active.as_str()))
        .one(&state.orm)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&admin.password_hash, &payload.password)? {
        tracing::warn!(username = %admin.username, "admin login failed");
        return Err(AppError::Unauthorized);
    }

    let token = admin_session(state, admin).await?;
    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse { token },
        Some(Meta::empty()),
    ))
}

async fn admin_session(state: &AppState, admin: AdminModel) -> AppResult<String> {
    let token = issue_token(
        &state.config.jwt_secret,
        admin.id,
        &admin.role,
        state.config.jwt_ttl_hours,
    )?;

    let admin_id = admin.id;
    let mut active: AdminActive = admin.into();
    active.last_login = Set(Some(Utc::now().fixed_offset()));
    active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(admin_id),
        "admin_login",
        "admins",
        serde_json::json!({ "admin_id": admin_id }),
    )
    .await;

    Ok(token)
}

/// Issue a single-use login token for the calling admin.
pub async fn issue_bypass_token(
    state: &AppState,
    actor: &AuthUser,
) -> AppResult<ApiResponse<BypassTokenResponse>> {
    let now = Utc::now();
    let expires_at = now
        .checked_add_signed(Duration::minutes(state.config.bypass_token_ttl_minutes))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;
    let token = random_token();

    BypassActive {
        id: Set(Uuid::new_v4()),
        admin_id: Set(actor.user_id),
        token: Set(token.clone()),
        expires_at: Set(expires_at.fixed_offset()),
        used: Set(false),
        created_at: Set(now.fixed_offset()),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        Some(actor.user_id),
        "bypass_token_issue",
        "admin_bypass_tokens",
        serde_json::json!({ "expires_at": expires_at }),
    )
    .await;

    Ok(ApiResponse::success(
        "Bypass token issued",
        BypassTokenResponse { token, expires_at },
        Some(Meta::empty()),
    ))
}

/// Exchange a bypass token for an admin session.
///
/// The token is claimed with one conditional update, so two concurrent
/// redemptions of the same token cannot both succeed.
pub async fn redeem_bypass_token(
    state: &AppState,
    payload: RedeemBypassRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let token = payload.token.trim();
    if token.is_empty() {
        return Err(AppError::Unauthorized);
    }

    let claimed = BypassTokens::update_many()
        .col_expr(BypassCol::Used, Expr::value(true))
        .filter(BypassCol::Token.eq(token))
        .filter(BypassCol::Used.eq(false))
        .filter(BypassCol::ExpiresAt.gt(Utc::now().fixed_offset()))
        .exec(&state.orm)
        .await?;
    if claimed.rows_affected != 1 {
        return Err(AppError::Unauthorized);
    }

    let record = BypassTokens::find()
        .filter(BypassCol::Token.eq(token))
        .one(&state.orm)
        .await?
        .ok_or(AppError::Unauthorized)?;
    let admin = Admins::find_by_id(record.admin_id)
        .filter(AdminCol::Status.eq(RecordStatus::Active.as_str()))
        .one(&state.orm)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let token = admin_session(state, admin).await?;
    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse { token },
        Some(Meta::empty()),
    ))
}

fn random_token() -> String {
    let mut bytes = [0u8; BYPASS_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

pub async fn list_users(state: &AppState, query: StatusQuery) -> AppResult<ApiResponse<UserList>> {
    let mut finder = Users::find();
    if let Some(status) = query.status_filter() {
        finder = finder.filter(UserCol::Status.eq(status));
    }
    let finder = finder.order_by_desc(UserCol::CreatedAt);

    let (rows, meta) = fetch_page(&state.orm, finder, &query.pagination()).await?;
    let items = rows.into_iter().map(user_from_entity).collect();
    Ok(ApiResponse::success("Users", UserList { items }, Some(meta)))
}

pub async fn get_user(state: &AppState, id: Uuid) -> AppResult<ApiResponse<User>> {
    let user = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "User",
        user_from_entity(user),
        Some(Meta::empty()),
    ))
}

pub async fn update_user_status(
    state: &AppState,
    actor: &AuthUser,
    id: Uuid,
    payload: UpdateUserStatusRequest,
) -> AppResult<ApiResponse<User>> {
    let existing = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut active: UserActive = existing.into();
    active.status = Set(payload.status.as_str().into());
    let user = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(actor.user_id),
        "user_status_update",
        "users",
        serde_json::json!({ "user_id": user.id, "status": user.status }),
    )
    .await;

    Ok(ApiResponse::success(
        "User updated",
        user_from_entity(user),
        Some(Meta::empty()),
    ))
}

pub async fn delete_user(
    state: &AppState,
    actor: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Users::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    audit::record(
        &state.orm,
        Some(actor.user_id),
        "user_delete",
        "users",
        serde_json::json!({ "user_id": id }),
    )
    .await;
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn list_admins(
    state: &AppState,
    query: StatusQuery,
) -> AppResult<ApiResponse<AdminList>> {
    let mut finder = Admins::find();
    if let Some(status) = query.status_filter() {
        finder = finder.filter(AdminCol::Status.eq(status));
    }
    let finder = finder.order_by_asc(AdminCol::CreatedAt);

    let (rows, meta) = fetch_page(&state.orm, finder, &query.pagination()).await?;
    let items = rows.into_iter().map(admin_from_entity).collect();
    Ok(ApiResponse::success("Admins", AdminList { items }, Some(meta)))
}

pub async fn get_admin(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Admin>> {
    let admin = Admins::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "Admin",
        admin_from_entity(admin),
        Some(Meta::empty()),
    ))
}

fn check_role(role: &str) -> AppResult<()> {
    if role != ROLE_ADMIN && role != ROLE_SUPER_ADMIN {
        return Err(AppError::BadRequest(format!("invalid role '{role}'")));
    }
    Ok(())
}

/// Change an admin's email, role or status. Admins cannot demote or
/// deactivate themselves.
pub async fn update_admin(
    state: &AppState,
    actor: &AuthUser,
    id: Uuid,
    payload: UpdateAdminRequest,
) -> AppResult<ApiResponse<Admin>> {
    if let Some(role) = payload.role.as_deref() {
        check_role(role)?;
    }
    if actor.user_id == id
        && (payload.status == Some(RecordStatus::Inactive)
            || payload.role.as_deref().is_some_and(|r| r != actor.role))
    {
        return Err(AppError::bad_request(
            "You cannot change your own role or status",
        ));
    }

    let existing = Admins::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut active: AdminActive = existing.into();
    if let Some(email) = payload.email.as_deref().map(str::trim) {
        require("email", email)?;
        active.email = Set(email.to_lowercase());
    }
    if let Some(role) = payload.role {
        active.role = Set(role);
    }
    if let Some(status) = payload.status {
        active.status = Set(status.as_str().into());
    }
    let admin = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(actor.user_id),
        "admin_update",
        "admins",
        serde_json::json!({ "admin_id": admin.id, "role": admin.role, "status": admin.status }),
    )
    .await;

    Ok(ApiResponse::success(
        "Admin updated",
        admin_from_entity(admin),
        Some(Meta::empty()),
    ))
}

pub async fn create_admin(
    state: &AppState,
    actor: &AuthUser,
    payload: CreateAdminRequest,
) -> AppResult<ApiResponse<Admin>> {
    require("username", &payload.username)?;
    require("email", &payload.email)?;
    check_password(&payload.password)?;

    let role = payload.role.as_deref().unwrap_or(ROLE_ADMIN);
    check_role(role)?;

    let username = payload.username.trim().to_string();
    let exist = Admins::find()
        .filter(AdminCol::Username.eq(username.as_str()))
        .one(&state.orm)
        .await?;
    if exist.is_some() {
        return Err(AppError::Conflict("Username is already taken".to_string()));
    }

    let admin = AdminActive {
        id: Set(Uuid::new_v4()),
        username: Set(username),
        email: Set(payload.email.trim().to_lowercase()),
        password_hash: Set(hash_password(&payload.password)?),
        role: Set(role.to_string()),
        status: Set(RecordStatus::Active.as_str().into()),
        last_login: Set(None),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.orm,
        Some(actor.user_id),
        "admin_create",
        "admins",
        serde_json::json!({ "admin_id": admin.id, "role": admin.role }),
    )
    .await;

    Ok(ApiResponse::success(
        "Admin created",
        admin_from_entity(admin),
        Some(Meta::empty()),
    ))
}

pub async fn delete_admin(
    state: &AppState,
    actor: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if actor.user_id == id {
        return Err(AppError::bad_request("You cannot delete your own account"));
    }
    let result = Admins::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    audit::record(
        &state.orm,
        Some(actor.user_id),
        "admin_delete",
        "admins",
        serde_json::json!({ "admin_id": id }),
    )
    .await;
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        name: model.name,
        username: model.username,
        email: model.email,
        phone: model.phone,
        status: model.status,
        last_login: model.last_login.map(|at| at.with_timezone(&Utc)),
        created_at: model.created_at.with_timezone(&Utc),
    }
}

fn admin_from_entity(model: AdminModel) -> Admin {
    Admin {
        id: model.id,
        username: model.username,
        email: model.email,
        role: model.role,
        status: model.status,
        last_login: model.last_login.map(|at| at.with_timezone(&Utc)),
        created_at: model.created_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_round_trips() {
        let hash = hash_password("s3cret-pass").unwrap();
        assert!(verify_password(&hash, "s3cret-pass").unwrap());
        assert!(!verify_password(&hash, "wrong").unwrap());
    }

    #[test]
    fn bypass_tokens_are_64_hex_chars() {
        let token = random_token();
        assert_eq!(token.len(), BYPASS_TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, random_token());
    }

    #[test]
    fn short_passwords_are_rejected() {
        assert!(check_password("12345").is_err());
        assert!(check_password("123456").is_ok());
    }
}
