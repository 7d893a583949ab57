use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Admin, RecordStatus, User};

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
}

/// `login` accepts either the username or the email address.
#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct CreateAdminRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

/// Partial update; omitted fields keep their value.
#[derive(Deserialize, Debug, ToSchema)]
pub struct UpdateAdminRequest {
    pub email: Option<String>,
    pub role: Option<String>,
    pub status: Option<RecordStatus>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BypassTokenResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct RedeemBypassRequest {
    pub token: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct UpdateUserStatusRequest {
    pub status: RecordStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserList {
    pub items: Vec<User>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminList {
    pub items: Vec<Admin>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}
