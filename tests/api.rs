mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use common::{bearer_for, create_admin, create_product, create_user, router, send, test_state};
use http_body_util::BodyExt;
use microsite_api::{
    dto::auth::UpdateUserStatusRequest,
    models::RecordStatus,
    routes::params::MAX_PAGE,
    services::auth_service,
};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn guest_checkout_returns_created() -> anyhow::Result<()> {
    let state = test_state().await?;
    let widget = create_product(&state, "Widget", 100, 10).await?;

    let (status, body) = send(
        router(&state),
        "POST",
        "/api/orders",
        None,
        Some(json!({
            "items": [{ "product_id": widget.id, "quantity": 2 }],
            "user_name": "Guest",
            "user_phone": "9876543210"
        })),
    )
    .await?;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["order"]["final_amount"], 200);
    assert_eq!(body["data"]["items"][0]["product_title"], "Widget");
    Ok(())
}

#[tokio::test]
async fn empty_cart_is_a_bad_request() -> anyhow::Result<()> {
    let state = test_state().await?;
    let (status, body) = send(
        router(&state),
        "POST",
        "/api/orders",
        None,
        Some(json!({ "items": [] })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    Ok(())
}

#[tokio::test]
async fn dashboard_requires_an_admin() -> anyhow::Result<()> {
    let state = test_state().await?;

    let (status, _) = send(router(&state), "GET", "/api/admin/dashboard", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let user = create_user(&state, "asha").await?;
    let user_token = bearer_for(&user)?;
    let (status, _) = send(
        router(&state),
        "GET",
        "/api/admin/dashboard",
        Some(&user_token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = create_admin(&state, "boss", "password1").await?;
    let admin_token = bearer_for(&admin)?;
    let (status, body) = send(
        router(&state),
        "GET",
        "/api/admin/dashboard",
        Some(&admin_token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["today_orders"], 0);
    Ok(())
}

#[tokio::test]
async fn admin_login_then_revenue_series() -> anyhow::Result<()> {
    let state = test_state().await?;
    create_admin(&state, "boss", "password1").await?;

    let (status, body) = send(
        router(&state),
        "POST",
        "/api/auth/admin/login",
        None,
        Some(json!({ "username": "boss", "password": "password1" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("missing token"))?
        .to_string();

    let (status, body) = send(
        router(&state),
        "GET",
        "/api/admin/dashboard/revenue?days=5",
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(5));
    Ok(())
}

#[tokio::test]
async fn review_submission_is_created() -> anyhow::Result<()> {
    let state = test_state().await?;
    let (status, body) = send(
        router(&state),
        "POST",
        "/api/reviews",
        None,
        Some(json!({ "name": "Asha", "rating": 4, "comment": "Lovely cards" })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "pending");

    let (status, body) = send(router(&state), "GET", "/api/reviews", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(0));
    Ok(())
}

#[tokio::test]
async fn vcard_is_served_as_text() -> anyhow::Result<()> {
    let state = test_state().await?;
    let response = router(&state)
        .oneshot(Request::builder().uri("/api/vcard").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/vcard"));

    let bytes = response.into_body().collect().await?.to_bytes();
    let card = String::from_utf8(bytes.to_vec())?;
    assert!(card.starts_with("BEGIN:VCARD\r\n"));
    assert!(card.ends_with("END:VCARD"));
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_not_found() -> anyhow::Result<()> {
    let state = test_state().await?;
    let (status, body) = send(router(&state), "GET", "/api/nope", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    Ok(())
}

#[tokio::test]
async fn deleted_admin_token_loses_access() -> anyhow::Result<()> {
    let state = test_state().await?;
    let owner = create_admin(&state, "owner", "password1").await?;
    let helper = create_admin(&state, "helper", "password1").await?;
    let helper_token = bearer_for(&helper)?;

    let (status, _) = send(
        router(&state),
        "GET",
        "/api/admin/dashboard",
        Some(&helper_token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    auth_service::delete_admin(&state, &owner, helper.user_id).await?;

    let (status, _) = send(
        router(&state),
        "GET",
        "/api/admin/dashboard",
        Some(&helper_token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn deactivated_admin_token_loses_access() -> anyhow::Result<()> {
    let state = test_state().await?;
    let owner = create_admin(&state, "owner", "password1").await?;
    let helper = create_admin(&state, "helper", "password1").await?;

    let (status, body) = send(
        router(&state),
        "PATCH",
        &format!("/api/admin/admins/{}", helper.user_id),
        Some(&bearer_for(&owner)?),
        Some(json!({ "status": "inactive" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "inactive");

    let (status, _) = send(
        router(&state),
        "GET",
        "/api/admin/orders",
        Some(&bearer_for(&helper)?),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn deactivated_user_cannot_list_orders() -> anyhow::Result<()> {
    let state = test_state().await?;
    let admin = create_admin(&state, "boss", "password1").await?;
    let user = create_user(&state, "asha").await?;
    let token = bearer_for(&user)?;

    let (status, _) = send(router(&state), "GET", "/api/orders/mine", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);

    auth_service::update_user_status(
        &state,
        &admin,
        user.user_id,
        UpdateUserStatusRequest {
            status: RecordStatus::Inactive,
        },
    )
    .await?;

    let (status, _) = send(router(&state), "GET", "/api/orders/mine", Some(&token), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn huge_page_number_is_served() -> anyhow::Result<()> {
    let state = test_state().await?;
    create_product(&state, "Widget", 100, 10).await?;

    let (status, body) = send(
        router(&state),
        "GET",
        "/api/products?page=9223372036854775807",
        None,
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["page"], MAX_PAGE);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
    Ok(())
}

#[tokio::test]
async fn unpaged_lists_carry_empty_meta() -> anyhow::Result<()> {
    let state = test_state().await?;
    for uri in ["/api/settings", "/api/reviews", "/api/banners", "/api/gallery"] {
        let (status, body) = send(router(&state), "GET", uri, None, None).await?;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(body["meta"].is_object(), "{uri} meta: {}", body["meta"]);
        assert!(body["meta"]["page"].is_null(), "{uri}");
    }
    Ok(())
}

#[tokio::test]
async fn stock_is_adjusted_by_delta() -> anyhow::Result<()> {
    let state = test_state().await?;
    let admin = create_admin(&state, "boss", "password1").await?;
    let token = bearer_for(&admin)?;
    let widget = create_product(&state, "Widget", 100, 10).await?;
    let uri = format!("/api/admin/products/{}/stock", widget.id);

    let (status, body) = send(
        router(&state),
        "PATCH",
        &uri,
        Some(&token),
        Some(json!({ "delta": 5 })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["stock"], 15);

    let (status, _) = send(
        router(&state),
        "PATCH",
        &uri,
        Some(&token),
        Some(json!({ "delta": -16 })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}
