mod common;

use chrono::{Duration, Utc};
use common::{create_admin, test_state};
use microsite_api::{
    dto::auth::{
        AdminLoginRequest, CreateAdminRequest, LoginRequest, RedeemBypassRequest, RegisterRequest,
        UpdateAdminRequest,
    },
    entity::admin_bypass_tokens,
    error::AppError,
    middleware::auth::{ROLE_ADMIN, ROLE_SUPER_ADMIN, ROLE_USER, verify_token},
    models::RecordStatus,
    routes::params::StatusQuery,
    services::auth_service,
};
use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

fn registration(username: &str, email: &str) -> RegisterRequest {
    RegisterRequest {
        name: "Asha Rao".into(),
        username: username.into(),
        email: email.into(),
        phone: None,
        password: "secret99".into(),
    }
}

fn bearer(token: &str) -> &str {
    token.strip_prefix("Bearer ").unwrap_or(token)
}

#[tokio::test]
async fn registered_user_logs_in_by_username_or_email() -> anyhow::Result<()> {
    let state = test_state().await?;
    let user = auth_service::register_user(&state, registration("asha", "Asha@Example.com"))
        .await?
        .data
        .expect("user");
    assert_eq!(user.email, "asha@example.com");

    for login in ["asha", "ASHA@example.com"] {
        let token = auth_service::login_user(
            &state,
            LoginRequest {
                login: login.into(),
                password: "secret99".into(),
            },
        )
        .await?
        .data
        .expect("token")
        .token;
        let caller = verify_token(&state.config.jwt_secret, bearer(&token))?;
        assert_eq!(caller.user_id, user.id);
        assert_eq!(caller.role, ROLE_USER);
    }
    Ok(())
}

#[tokio::test]
async fn wrong_password_is_unauthorized() -> anyhow::Result<()> {
    let state = test_state().await?;
    auth_service::register_user(&state, registration("asha", "asha@example.com")).await?;

    let result = auth_service::login_user(
        &state,
        LoginRequest {
            login: "asha".into(),
            password: "not-it".into(),
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::Unauthorized)));
    Ok(())
}

#[tokio::test]
async fn duplicate_registration_conflicts() -> anyhow::Result<()> {
    let state = test_state().await?;
    auth_service::register_user(&state, registration("asha", "asha@example.com")).await?;

    let same_email = auth_service::register_user(&state, registration("other", "ASHA@example.com")).await;
    assert!(matches!(same_email, Err(AppError::Conflict(_))));

    let short_password = auth_service::register_user(
        &state,
        RegisterRequest {
            password: "123".into(),
            ..registration("third", "third@example.com")
        },
    )
    .await;
    assert!(matches!(short_password, Err(AppError::BadRequest(_))));
    Ok(())
}

#[tokio::test]
async fn admin_login_issues_admin_token() -> anyhow::Result<()> {
    let state = test_state().await?;
    let admin = create_admin(&state, "boss", "password1").await?;

    let token = auth_service::login_admin(
        &state,
        AdminLoginRequest {
            username: "boss".into(),
            password: "password1".into(),
        },
    )
    .await?
    .data
    .expect("token")
    .token;
    let caller = verify_token(&state.config.jwt_secret, bearer(&token))?;
    assert_eq!(caller.user_id, admin.user_id);
    assert_eq!(caller.role, ROLE_ADMIN);

    let bad = auth_service::login_admin(
        &state,
        AdminLoginRequest {
            username: "boss".into(),
            password: "password2".into(),
        },
    )
    .await;
    assert!(matches!(bad, Err(AppError::Unauthorized)));
    Ok(())
}

#[tokio::test]
async fn bypass_token_is_single_use() -> anyhow::Result<()> {
    let state = test_state().await?;
    let admin = create_admin(&state, "boss", "password1").await?;

    let issued = auth_service::issue_bypass_token(&state, &admin)
        .await?
        .data
        .expect("bypass token");
    assert_eq!(issued.token.len(), 64);

    let session = auth_service::redeem_bypass_token(
        &state,
        RedeemBypassRequest {
            token: issued.token.clone(),
        },
    )
    .await?
    .data
    .expect("session");
    let caller = verify_token(&state.config.jwt_secret, bearer(&session.token))?;
    assert_eq!(caller.user_id, admin.user_id);

    let replay = auth_service::redeem_bypass_token(
        &state,
        RedeemBypassRequest {
            token: issued.token,
        },
    )
    .await;
    assert!(matches!(replay, Err(AppError::Unauthorized)));
    Ok(())
}

#[tokio::test]
async fn unknown_bypass_token_is_unauthorized() -> anyhow::Result<()> {
    let state = test_state().await?;
    let result = auth_service::redeem_bypass_token(
        &state,
        RedeemBypassRequest {
            token: "deadbeef".into(),
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::Unauthorized)));
    Ok(())
}

#[tokio::test]
async fn admins_cannot_delete_themselves() -> anyhow::Result<()> {
    let state = test_state().await?;
    let admin = create_admin(&state, "boss", "password1").await?;

    let result = auth_service::delete_admin(&state, &admin, admin.user_id).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let created = auth_service::create_admin(
        &state,
        &admin,
        CreateAdminRequest {
            username: "helper".into(),
            email: "helper@example.com".into(),
            password: "password2".into(),
            role: None,
        },
    )
    .await?
    .data
    .expect("admin");
    assert_eq!(created.role, ROLE_ADMIN);

    let duplicate = auth_service::create_admin(
        &state,
        &admin,
        CreateAdminRequest {
            username: "helper".into(),
            email: "other@example.com".into(),
            password: "password2".into(),
            role: None,
        },
    )
    .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    auth_service::delete_admin(&state, &admin, created.id).await?;
    let admins = auth_service::list_admins(&state, StatusQuery::default())
        .await?
        .data
        .expect("admins");
    assert_eq!(admins.items.len(), 1);
    Ok(())
}

#[tokio::test]
async fn expired_bypass_token_is_unauthorized() -> anyhow::Result<()> {
    let state = test_state().await?;
    let admin = create_admin(&state, "boss", "password1").await?;
    let now = Utc::now();

    admin_bypass_tokens::ActiveModel {
        id: Set(Uuid::new_v4()),
        admin_id: Set(admin.user_id),
        token: Set("ab".repeat(32)),
        expires_at: Set((now - Duration::minutes(1)).fixed_offset()),
        used: Set(false),
        created_at: Set((now - Duration::hours(1)).fixed_offset()),
    }
    .insert(&state.orm)
    .await?;

    let result = auth_service::redeem_bypass_token(
        &state,
        RedeemBypassRequest {
            token: "ab".repeat(32),
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::Unauthorized)));
    Ok(())
}

fn admin_update(role: Option<&str>, status: Option<RecordStatus>) -> UpdateAdminRequest {
    UpdateAdminRequest {
        email: None,
        role: role.map(str::to_string),
        status,
    }
}

#[tokio::test]
async fn admin_role_and_status_can_be_changed() -> anyhow::Result<()> {
    let state = test_state().await?;
    let owner = create_admin(&state, "owner", "password1").await?;
    let helper = create_admin(&state, "helper", "password1").await?;

    let promoted = auth_service::update_admin(
        &state,
        &owner,
        helper.user_id,
        admin_update(Some(ROLE_SUPER_ADMIN), None),
    )
    .await?
    .data
    .expect("admin");
    assert_eq!(promoted.role, ROLE_SUPER_ADMIN);

    auth_service::update_admin(
        &state,
        &owner,
        helper.user_id,
        admin_update(None, Some(RecordStatus::Inactive)),
    )
    .await?;
    let fetched = auth_service::get_admin(&state, helper.user_id)
        .await?
        .data
        .expect("admin");
    assert_eq!(fetched.status, "inactive");
    assert_eq!(fetched.role, ROLE_SUPER_ADMIN);

    let active = auth_service::list_admins(
        &state,
        StatusQuery {
            status: Some("active".into()),
            ..StatusQuery::default()
        },
    )
    .await?;
    let items = active.data.expect("admins").items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].username, "owner");
    assert_eq!(active.meta.and_then(|m| m.total), Some(1));

    let inactive_login = auth_service::login_admin(
        &state,
        AdminLoginRequest {
            username: "helper".into(),
            password: "password1".into(),
        },
    )
    .await;
    assert!(matches!(inactive_login, Err(AppError::Unauthorized)));
    Ok(())
}

#[tokio::test]
async fn admin_update_rejects_bad_input() -> anyhow::Result<()> {
    let state = test_state().await?;
    let owner = create_admin(&state, "owner", "password1").await?;

    let bad_role =
        auth_service::update_admin(&state, &owner, owner.user_id, admin_update(Some("root"), None))
            .await;
    assert!(matches!(bad_role, Err(AppError::BadRequest(_))));

    let self_disable = auth_service::update_admin(
        &state,
        &owner,
        owner.user_id,
        admin_update(None, Some(RecordStatus::Inactive)),
    )
    .await;
    assert!(matches!(self_disable, Err(AppError::BadRequest(_))));

    let missing = auth_service::update_admin(
        &state,
        &owner,
        Uuid::new_v4(),
        admin_update(Some(ROLE_ADMIN), None),
    )
    .await;
    assert!(matches!(missing, Err(AppError::NotFound)));

    let lookup = auth_service::get_admin(&state, Uuid::new_v4()).await;
    assert!(matches!(lookup, Err(AppError::NotFound)));
    Ok(())
}
