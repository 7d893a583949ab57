use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    dto::auth::Claims,
    entity::{admins, users},
    error::{AppError, AppResult},
    models::RecordStatus,
    state::AppState,
};

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN || self.role == ROLE_SUPER_ADMIN
    }
}

/// Bearer credentials when present; guests pass through as `None`.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

/// An authenticated caller holding an admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    if !user.is_admin() {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn issue_token(secret: &str, subject: Uuid, role: &str, ttl_hours: i64) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(ttl_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: subject.to_string(),
        role: role.to_string(),
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    Ok(format!("Bearer {}", token))
}

pub fn verify_token(secret: &str, token: &str) -> Result<AuthUser, AppError> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized)?;

    let user_id = Uuid::parse_str(&decoded.claims.sub).map_err(|_| AppError::Unauthorized)?;

    Ok(AuthUser {
        user_id,
        role: decoded.claims.role,
    })
}

fn bearer_token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AppError::BadRequest("Invalid Authorization header".into()))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::BadRequest("Invalid Authorization scheme".into()))?;

    Ok(Some(token.trim()))
}

/// Re-check a verified token against the account it names. Deleted or
/// deactivated accounts are rejected, and admins get their current role.
pub async fn current_account(state: &AppState, claims: AuthUser) -> AppResult<AuthUser> {
    let active = RecordStatus::Active.as_str();
    if claims.is_admin() {
        let admin = admins::Entity::find_by_id(claims.user_id)
            .filter(admins::Column::Status.eq(active))
            .one(&state.orm)
            .await?
            .ok_or(AppError::Unauthorized)?;
        return Ok(AuthUser {
            user_id: admin.id,
            role: admin.role,
        });
    }

    users::Entity::find_by_id(claims.user_id)
        .filter(users::Column::Status.eq(active))
        .one(&state.orm)
        .await?
        .ok_or(AppError::Unauthorized)?;
    Ok(claims)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?.ok_or(AppError::Unauthorized)?;
        let claims = verify_token(&state.config.jwt_secret, token)?;
        current_account(state, claims).await
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts)? else {
            return Ok(MaybeAuthUser(None));
        };
        let claims = verify_token(&state.config.jwt_secret, token)?;
        Ok(MaybeAuthUser(Some(current_account(state, claims).await?)))
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        ensure_admin(&user)?;
        Ok(AdminUser(user))
    }
}
