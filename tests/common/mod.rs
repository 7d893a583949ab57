#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use microsite_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::{
        auth::RegisterRequest,
        orders::{CartLine, CreateOrderRequest},
    },
    entity::{admins, products},
    middleware::auth::{AuthUser, ROLE_ADMIN, ROLE_USER, issue_token},
    routes::app,
    services::auth_service::{self, hash_password},
    state::AppState,
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-secret";

/// Fresh application state over a private in-memory SQLite database.
pub async fn test_state() -> anyhow::Result<AppState> {
    let config = AppConfig::for_database("sqlite::memory:", JWT_SECRET);
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(orm, config))
}

pub async fn create_product(
    state: &AppState,
    title: &str,
    price: i64,
    stock: i32,
) -> anyhow::Result<products::Model> {
    let product = products::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title.to_string()),
        description: Set(None),
        price: Set(price),
        discount_price: Set(None),
        stock: Set(stock),
        image_url: Set(None),
        inquiry_only: Set(false),
        status: Set("active".to_string()),
        sort_order: Set(0),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(&state.orm)
    .await?;
    Ok(product)
}

pub async fn product_stock(state: &AppState, id: Uuid) -> anyhow::Result<i32> {
    let product = products::Entity::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| anyhow::anyhow!("product {id} missing"))?;
    Ok(product.stock)
}

/// Persist an admin account and return the matching authenticated caller.
pub async fn create_admin(
    state: &AppState,
    username: &str,
    password: &str,
) -> anyhow::Result<AuthUser> {
    let admin = admins::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        email: Set(format!("{username}@example.com")),
        password_hash: Set(hash_password(password)?),
        role: Set(ROLE_ADMIN.to_string()),
        status: Set("active".to_string()),
        last_login: Set(None),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(&state.orm)
    .await?;
    Ok(AuthUser {
        user_id: admin.id,
        role: admin.role,
    })
}

/// Register a storefront user and return the matching authenticated caller.
pub async fn create_user(state: &AppState, username: &str) -> anyhow::Result<AuthUser> {
    let user = auth_service::register_user(
        state,
        RegisterRequest {
            name: username.to_string(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            phone: None,
            password: "password1".to_string(),
        },
    )
    .await?
    .data
    .ok_or_else(|| anyhow::anyhow!("registration returned no user"))?;
    Ok(AuthUser {
        user_id: user.id,
        role: ROLE_USER.to_string(),
    })
}

/// `Authorization` header value for a caller.
pub fn bearer_for(caller: &AuthUser) -> anyhow::Result<String> {
    Ok(issue_token(JWT_SECRET, caller.user_id, &caller.role, 1)?)
}

pub fn order_request(lines: &[(Uuid, i32)]) -> CreateOrderRequest {
    CreateOrderRequest {
        items: lines
            .iter()
            .map(|&(product_id, quantity)| CartLine {
                product_id,
                quantity,
                unit_price: None,
            })
            .collect(),
        user_name: Some("Guest Buyer".into()),
        user_phone: Some("9876543210".into()),
        user_email: None,
        total_amount: None,
        final_amount: None,
    }
}

/// Insert an order row directly, bypassing checkout, at a chosen instant.
pub async fn insert_order_at(
    state: &AppState,
    final_amount: i64,
    at: DateTime<Utc>,
) -> anyhow::Result<()> {
    use microsite_api::entity::orders;

    let id = Uuid::new_v4();
    orders::ActiveModel {
        id: Set(id),
        order_number: Set(format!("ORD-TEST-{}", id.simple())),
        user_id: Set(None),
        user_name: Set(None),
        user_phone: Set(None),
        user_email: Set(None),
        total_amount: Set(final_amount),
        final_amount: Set(final_amount),
        status: Set("pending".to_string()),
        payment_status: Set("pending".to_string()),
        created_at: Set(at.fixed_offset()),
        updated_at: Set(at.fixed_offset()),
    }
    .insert(&state.orm)
    .await?;
    Ok(())
}

/// Send one request through the router and decode the JSON body.
pub async fn send(
    router: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = router.oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, json))
}

pub fn router(state: &AppState) -> Router {
    app(state.clone())
}
