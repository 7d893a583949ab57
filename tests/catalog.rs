mod common;

use common::{create_admin, order_request, product_stock, test_state};
use microsite_api::{
    dto::{
        content::BannerPayload,
        leads::{CreateFreeWebsiteRequest, CreateInquiryRequest, InquiryProduct, UpdateLeadStatusRequest},
        products::{AdjustStockRequest, ProductPayload, UpdateProductRequest},
        reviews::{CreateReviewRequest, UpdateReviewStatusRequest},
        settings::{RecordVisitRequest, UpsertSettingRequest},
    },
    error::AppError,
    models::{BannerPosition, LeadStatus, RecordStatus, ReviewStatus},
    routes::params::{ProductQuery, ProductSortBy, SortOrder, StatusQuery},
    services::{content_service, lead_service, order_service, product_service, review_service, settings_service},
};

fn product(title: &str, price: i64) -> ProductPayload {
    ProductPayload {
        title: title.into(),
        description: Some(format!("{title} description")),
        price,
        discount_price: None,
        stock: 10,
        image_url: None,
        inquiry_only: false,
        status: None,
        sort_order: None,
    }
}

#[tokio::test]
async fn storefront_hides_inactive_products() -> anyhow::Result<()> {
    let state = test_state().await?;
    let admin = create_admin(&state, "boss", "password1").await?;

    product_service::create_product(&state, &admin, product("Brochure", 500)).await?;
    let hidden = product_service::create_product(
        &state,
        &admin,
        ProductPayload {
            status: Some(RecordStatus::Inactive),
            ..product("Draft", 700)
        },
    )
    .await?
    .data
    .expect("product");

    let listed = product_service::list_products(&state, ProductQuery::default())
        .await?
        .data
        .expect("products")
        .items;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Brochure");

    let lookup = product_service::get_product(&state, hidden.id).await;
    assert!(matches!(lookup, Err(AppError::NotFound)));

    let all = product_service::admin_list_products(&state, StatusQuery::default())
        .await?
        .data
        .expect("products")
        .items;
    assert_eq!(all.len(), 2);
    Ok(())
}

#[tokio::test]
async fn product_search_and_price_sort() -> anyhow::Result<()> {
    let state = test_state().await?;
    let admin = create_admin(&state, "boss", "password1").await?;
    for (title, price) in [("Visiting Card", 300), ("Letterhead", 900), ("Card Holder", 150)] {
        product_service::create_product(&state, &admin, product(title, price)).await?;
    }

    let found = product_service::list_products(
        &state,
        ProductQuery {
            q: Some("Card".into()),
            sort_by: Some(ProductSortBy::Price),
            sort_order: Some(SortOrder::Desc),
            ..ProductQuery::default()
        },
    )
    .await?
    .data
    .expect("products")
    .items;
    let titles: Vec<_> = found.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Visiting Card", "Card Holder"]);

    let cheap = product_service::list_products(
        &state,
        ProductQuery {
            max_price: Some(300),
            ..ProductQuery::default()
        },
    )
    .await?
    .data
    .expect("products")
    .items;
    assert_eq!(cheap.len(), 2);
    Ok(())
}

#[tokio::test]
async fn discount_must_not_exceed_price() -> anyhow::Result<()> {
    let state = test_state().await?;
    let admin = create_admin(&state, "boss", "password1").await?;
    let result = product_service::create_product(
        &state,
        &admin,
        ProductPayload {
            discount_price: Some(900),
            ..product("Pen", 500)
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
    Ok(())
}

#[tokio::test]
async fn discounted_and_inquiry_only_products_at_checkout() -> anyhow::Result<()> {
    let state = test_state().await?;
    let admin = create_admin(&state, "boss", "password1").await?;
    let sale = product_service::create_product(
        &state,
        &admin,
        ProductPayload {
            discount_price: Some(400),
            ..product("Sale", 500)
        },
    )
    .await?
    .data
    .expect("product");
    let quote = product_service::create_product(
        &state,
        &admin,
        ProductPayload {
            inquiry_only: true,
            ..product("Custom Print", 0)
        },
    )
    .await?
    .data
    .expect("product");

    let order = order_service::create_order(&state, None, order_request(&[(sale.id, 2)]))
        .await?
        .data
        .expect("order");
    assert_eq!(order.order.final_amount, 800);

    let rejected = order_service::create_order(&state, None, order_request(&[(quote.id, 1)])).await;
    assert!(matches!(rejected, Err(AppError::BadRequest(msg)) if msg.contains("inquiry only")));
    Ok(())
}

#[tokio::test]
async fn review_moderation_controls_visibility() -> anyhow::Result<()> {
    let state = test_state().await?;
    let admin = create_admin(&state, "boss", "password1").await?;

    let review = review_service::submit_review(
        &state,
        Some("203.0.113.9".into()),
        CreateReviewRequest {
            name: "Asha".into(),
            email: None,
            phone: None,
            rating: 5,
            comment: "Quick delivery".into(),
        },
    )
    .await?
    .data
    .expect("review");
    assert_eq!(review.status, "pending");
    let fetched = review_service::get_review(&state, review.id)
        .await?
        .data
        .expect("review");
    assert_eq!(fetched.comment, "Quick delivery");
    assert_eq!(review.ip_address.as_deref(), Some("203.0.113.9"));
    assert!(review_service::list_approved(&state).await?.data.expect("reviews").items.is_empty());

    let approved = review_service::update_review_status(
        &state,
        &admin,
        review.id,
        UpdateReviewStatusRequest {
            status: ReviewStatus::Approved,
        },
    )
    .await?
    .data
    .expect("review");
    assert!(approved.approved_at.is_some());
    assert_eq!(review_service::list_approved(&state).await?.data.expect("reviews").items.len(), 1);

    let rejected = review_service::update_review_status(
        &state,
        &admin,
        review.id,
        UpdateReviewStatusRequest {
            status: ReviewStatus::Rejected,
        },
    )
    .await?
    .data
    .expect("review");
    assert!(rejected.approved_at.is_none());
    assert!(review_service::list_approved(&state).await?.data.expect("reviews").items.is_empty());
    Ok(())
}

#[tokio::test]
async fn missing_review_is_not_found() -> anyhow::Result<()> {
    let state = test_state().await?;
    let result = review_service::get_review(&state, uuid::Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound)));
    Ok(())
}

#[tokio::test]
async fn product_edit_keeps_stock_sold_meanwhile() -> anyhow::Result<()> {
    let state = test_state().await?;
    let admin = create_admin(&state, "boss", "password1").await?;
    let widget = product_service::create_product(&state, &admin, product("Widget", 100))
        .await?
        .data
        .expect("product");

    // A checkout lands between the admin opening and saving the edit form.
    order_service::create_order(&state, None, order_request(&[(widget.id, 3)])).await?;

    let edited = product_service::update_product(
        &state,
        &admin,
        widget.id,
        UpdateProductRequest {
            title: "Widget Pro".into(),
            description: None,
            price: 120,
            discount_price: None,
            image_url: None,
            inquiry_only: false,
            status: None,
            sort_order: Some(2),
        },
    )
    .await?
    .data
    .expect("product");
    assert_eq!(edited.title, "Widget Pro");
    assert_eq!(edited.price, 120);
    assert_eq!(edited.stock, 7);
    assert_eq!(product_stock(&state, widget.id).await?, 7);
    Ok(())
}

#[tokio::test]
async fn stock_adjustments_never_go_negative() -> anyhow::Result<()> {
    let state = test_state().await?;
    let admin = create_admin(&state, "boss", "password1").await?;
    let widget = product_service::create_product(&state, &admin, product("Widget", 100))
        .await?
        .data
        .expect("product");

    let restocked =
        product_service::adjust_stock(&state, &admin, widget.id, AdjustStockRequest { delta: 5 })
            .await?
            .data
            .expect("product");
    assert_eq!(restocked.stock, 15);

    let written_off =
        product_service::adjust_stock(&state, &admin, widget.id, AdjustStockRequest { delta: -15 })
            .await?
            .data
            .expect("product");
    assert_eq!(written_off.stock, 0);

    let below_zero =
        product_service::adjust_stock(&state, &admin, widget.id, AdjustStockRequest { delta: -1 })
            .await;
    assert!(matches!(below_zero, Err(AppError::BadRequest(_))));

    let zero =
        product_service::adjust_stock(&state, &admin, widget.id, AdjustStockRequest { delta: 0 })
            .await;
    assert!(matches!(zero, Err(AppError::BadRequest(_))));

    let missing = product_service::adjust_stock(
        &state,
        &admin,
        uuid::Uuid::new_v4(),
        AdjustStockRequest { delta: 1 },
    )
    .await;
    assert!(matches!(missing, Err(AppError::NotFound)));

    assert_eq!(product_stock(&state, widget.id).await?, 0);
    Ok(())
}

#[tokio::test]
async fn price_filters_use_the_discounted_price() -> anyhow::Result<()> {
    let state = test_state().await?;
    let admin = create_admin(&state, "boss", "password1").await?;
    product_service::create_product(
        &state,
        &admin,
        ProductPayload {
            discount_price: Some(200),
            ..product("On Sale", 1_000)
        },
    )
    .await?;
    product_service::create_product(&state, &admin, product("Full Price", 500)).await?;

    let under_300 = product_service::list_products(
        &state,
        ProductQuery {
            max_price: Some(300),
            ..ProductQuery::default()
        },
    )
    .await?
    .data
    .expect("products")
    .items;
    let titles: Vec<_> = under_300.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["On Sale"]);

    let from_400 = product_service::list_products(
        &state,
        ProductQuery {
            min_price: Some(400),
            ..ProductQuery::default()
        },
    )
    .await?
    .data
    .expect("products")
    .items;
    let titles: Vec<_> = from_400.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Full Price"]);

    let cheapest_first = product_service::list_products(
        &state,
        ProductQuery {
            sort_by: Some(ProductSortBy::Price),
            sort_order: Some(SortOrder::Asc),
            ..ProductQuery::default()
        },
    )
    .await?
    .data
    .expect("products")
    .items;
    assert_eq!(cheapest_first[0].title, "On Sale");
    Ok(())
}

fn banner(title: &str, position: BannerPosition) -> BannerPayload {
    BannerPayload {
        title: title.into(),
        image_url: format!("https://cdn.example.com/{title}.jpg"),
        link_url: None,
        position,
        status: None,
        sort_order: None,
    }
}

#[tokio::test]
async fn banner_position_includes_both() -> anyhow::Result<()> {
    let state = test_state().await?;
    let admin = create_admin(&state, "boss", "password1").await?;
    content_service::create_banner(&state, &admin, banner("top", BannerPosition::Top)).await?;
    content_service::create_banner(&state, &admin, banner("bottom", BannerPosition::Bottom)).await?;
    content_service::create_banner(&state, &admin, banner("everywhere", BannerPosition::Both)).await?;

    let top = content_service::list_banners(&state, Some(BannerPosition::Top))
        .await?
        .data
        .expect("banners")
        .items;
    let mut titles: Vec<_> = top.iter().map(|b| b.title.as_str()).collect();
    titles.sort_unstable();
    assert_eq!(titles, ["everywhere", "top"]);

    let all = content_service::list_banners(&state, None).await?.data.expect("banners").items;
    assert_eq!(all.len(), 3);
    Ok(())
}

#[tokio::test]
async fn settings_upsert_and_vcard() -> anyhow::Result<()> {
    let state = test_state().await?;
    let admin = create_admin(&state, "boss", "password1").await?;

    for value in ["Acme Prints", "Acme Print House"] {
        settings_service::upsert_setting(
            &state,
            &admin,
            "company_name".into(),
            UpsertSettingRequest { value: value.into() },
        )
        .await?;
    }

    let settings = settings_service::list_settings(&state).await?.data.expect("settings").settings;
    assert_eq!(settings.len(), 1);
    assert_eq!(settings["company_name"], "Acme Print House");

    let card = settings_service::vcard(&state).await?;
    assert!(card.contains("ORG:Acme Print House\r\n"));
    assert!(card.contains("FN:Demo User"));

    let blank_key = settings_service::upsert_setting(
        &state,
        &admin,
        "  ".into(),
        UpsertSettingRequest { value: "x".into() },
    )
    .await;
    assert!(matches!(blank_key, Err(AppError::BadRequest(_))));
    Ok(())
}

#[tokio::test]
async fn home_visits_refresh_view_count() -> anyhow::Result<()> {
    let state = test_state().await?;

    for _ in 0..2 {
        settings_service::record_visit(&state, None, None, RecordVisitRequest::default()).await?;
    }
    let other = settings_service::record_visit(
        &state,
        Some("198.51.100.7".into()),
        Some("curl/8".into()),
        RecordVisitRequest {
            page: Some("products".into()),
            referer: None,
        },
    )
    .await?
    .data
    .expect("visit");
    assert_eq!(other.page, "products");
    assert_eq!(other.count, 1);

    let settings = settings_service::list_settings(&state).await?.data.expect("settings").settings;
    assert_eq!(settings[settings_service::VIEW_COUNT_KEY], "2");
    Ok(())
}

#[tokio::test]
async fn inquiries_and_free_website_requests() -> anyhow::Result<()> {
    let state = test_state().await?;
    let admin = create_admin(&state, "boss", "password1").await?;

    let empty = lead_service::create_inquiry(
        &state,
        CreateInquiryRequest {
            products: vec![],
            message: None,
            user_name: None,
            user_phone: None,
            user_email: None,
        },
    )
    .await;
    assert!(matches!(empty, Err(AppError::BadRequest(_))));

    let inquiry = lead_service::create_inquiry(
        &state,
        CreateInquiryRequest {
            products: vec![InquiryProduct {
                product_id: None,
                title: "Custom Print".into(),
                price: None,
                quantity: Some(500),
            }],
            message: Some("Need a quote".into()),
            user_name: Some("Ravi".into()),
            user_phone: Some("9000000000".into()),
            user_email: None,
        },
    )
    .await?
    .data
    .expect("inquiry");
    assert_eq!(inquiry.status, "pending");
    assert_eq!(inquiry.products[0]["title"], "Custom Print");

    let contacted = lead_service::update_inquiry_status(
        &state,
        &admin,
        inquiry.id,
        UpdateLeadStatusRequest {
            status: LeadStatus::Contacted,
        },
    )
    .await?
    .data
    .expect("inquiry");
    assert_eq!(contacted.status, "contacted");

    let missing_mobile = lead_service::create_free_website_request(
        &state,
        CreateFreeWebsiteRequest {
            name: "Ravi".into(),
            mobile: " ".into(),
            email: None,
            business_details: None,
        },
    )
    .await;
    assert!(matches!(missing_mobile, Err(AppError::BadRequest(_))));

    lead_service::create_free_website_request(
        &state,
        CreateFreeWebsiteRequest {
            name: "Ravi".into(),
            mobile: "9000000000".into(),
            email: None,
            business_details: Some("Bakery".into()),
        },
    )
    .await?;
    let pending = lead_service::list_free_website_requests(
        &state,
        StatusQuery {
            status: Some("pending".into()),
            ..StatusQuery::default()
        },
    )
    .await?;
    assert_eq!(pending.data.expect("requests").items.len(), 1);
    assert_eq!(pending.meta.and_then(|m| m.total), Some(1));
    Ok(())
}
