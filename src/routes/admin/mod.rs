//! Back-office endpoints. Every handler takes an [`AdminUser`], so a missing
//! token is rejected with 401 and a non-admin role with 403.
//!
//! [`AdminUser`]: crate::middleware::auth::AdminUser

use axum::Router;

use crate::state::AppState;

pub mod accounts;
pub mod catalog;
pub mod content;
pub mod dashboard;
pub mod moderation;
pub mod orders;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(dashboard::router())
        .merge(orders::router())
        .merge(catalog::router())
        .merge(content::router())
        .merge(moderation::router())
        .merge(accounts::router())
}
