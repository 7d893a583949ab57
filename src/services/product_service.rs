use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    Order, QueryOrder, QuerySelect, Select, Set,
};
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use uuid::Uuid;

use crate::{
    audit,
    dto::products::{AdjustStockRequest, ProductList, ProductPayload, UpdateProductRequest},
    entity::products::{ActiveModel, Column, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Product, RecordStatus},
    response::{ApiResponse, Meta},
    routes::params::{ProductQuery, ProductSortBy, SortOrder, StatusQuery},
    state::AppState,
};

/// Storefront listing: active products only.
pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all().add(Column::Status.eq(RecordStatus::Active.as_str()));

    if let Some(search) = query.q.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        condition = condition.add(
            Condition::any()
                .add(Column::Title.contains(search))
                .add(Column::Description.contains(search)),
        );
    }
    if let Some(min_price) = query.min_price {
        condition = condition.add(Expr::expr(effective_price()).gte(min_price));
    }
    if let Some(max_price) = query.max_price {
        condition = condition.add(Expr::expr(effective_price()).lte(max_price));
    }

    let finder = sorted(
        Products::find().filter(condition),
        query.sort_by.unwrap_or(ProductSortBy::Position),
        query.sort_order.unwrap_or(SortOrder::Asc),
    );

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

/// Unit price a customer pays: the discount price when one is set.
fn effective_price() -> SimpleExpr {
    Func::coalesce([
        Expr::col(Column::DiscountPrice).into(),
        Expr::col(Column::Price).into(),
    ])
    .into()
}

fn sorted(finder: Select<Products>, sort_by: ProductSortBy, order: SortOrder) -> Select<Products> {
    let order = match order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    };
    match sort_by {
        ProductSortBy::Position => finder
            .order_by_asc(Column::SortOrder)
            .order_by_desc(Column::CreatedAt),
        ProductSortBy::CreatedAt => finder.order_by(Column::CreatedAt, order),
        ProductSortBy::Price => finder.order_by(effective_price(), order),
        ProductSortBy::Title => finder.order_by(Column::Title, order),
    }
}

/// Storefront lookup; inactive products are reported as missing.
pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let product = Products::find_by_id(id)
        .filter(Column::Status.eq(RecordStatus::Active.as_str()))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "Product",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

pub async fn admin_list_products(
    state: &AppState,
    query: StatusQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = query.pagination().normalize();
    let mut finder = Products::find();
    if let Some(status) = query.status_filter() {
        finder = finder.filter(Column::Status.eq(status));
    }
    let finder = sorted(finder, ProductSortBy::Position, SortOrder::Asc);

    let total = finder.clone().count(&state.orm).await? as i64;
    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn admin_get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success(
        "Product",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

pub async fn create_product(
    state: &AppState,
    actor: &AuthUser,
    payload: ProductPayload,
) -> AppResult<ApiResponse<Product>> {
    validate_product(&payload)?;

    let active = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title.trim().to_string()),
        description: Set(payload.description),
        price: Set(payload.price),
        discount_price: Set(payload.discount_price),
        stock: Set(payload.stock),
        image_url: Set(payload.image_url),
        inquiry_only: Set(payload.inquiry_only),
        status: Set(payload.status.unwrap_or(RecordStatus::Active).as_str().into()),
        sort_order: Set(payload.sort_order.unwrap_or(0)),
        created_at: Set(Utc::now().fixed_offset()),
    };
    let product = active.insert(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(actor.user_id),
        "product_create",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Product created",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

/// Replace the catalog fields of an existing product; stock is left alone.
pub async fn update_product(
    state: &AppState,
    actor: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    validate_pricing(&payload.title, payload.price, payload.discount_price)?;

    let existing = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = existing.into();
    active.title = Set(payload.title.trim().to_string());
    active.description = Set(payload.description);
    active.price = Set(payload.price);
    active.discount_price = Set(payload.discount_price);
    active.image_url = Set(payload.image_url);
    active.inquiry_only = Set(payload.inquiry_only);
    if let Some(status) = payload.status {
        active.status = Set(status.as_str().into());
    }
    if let Some(sort_order) = payload.sort_order {
        active.sort_order = Set(sort_order);
    }
    let product = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(actor.user_id),
        "product_update",
        "products",
        serde_json::json!({ "product_id": product.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Updated",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

/// Apply a stock delta in one guarded update, so it composes with
/// concurrent checkouts and never takes stock below zero.
pub async fn adjust_stock(
    state: &AppState,
    actor: &AuthUser,
    id: Uuid,
    payload: AdjustStockRequest,
) -> AppResult<ApiResponse<Product>> {
    let delta = payload.delta;
    if delta == 0 {
        return Err(AppError::bad_request("delta must not be zero"));
    }

    let result = Products::update_many()
        .col_expr(Column::Stock, Expr::col(Column::Stock).add(delta))
        .filter(Column::Id.eq(id))
        .filter(Column::Stock.gte(-i64::from(delta)))
        .filter(Column::Stock.lte(i64::from(i32::MAX) - i64::from(delta)))
        .exec(&state.orm)
        .await?;

    let product = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    if result.rows_affected == 0 {
        return Err(AppError::BadRequest(format!(
            "Cannot change stock of {} by {delta}",
            product.title
        )));
    }

    tracing::info!(product_id = %id, delta, stock = product.stock, "stock adjusted");
    audit::record(
        &state.orm,
        Some(actor.user_id),
        "product_stock_adjust",
        "products",
        serde_json::json!({ "product_id": id, "delta": delta, "stock": product.stock }),
    )
    .await;

    Ok(ApiResponse::success(
        "Stock updated",
        product_from_entity(product),
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    actor: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Products::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    audit::record(
        &state.orm,
        Some(actor.user_id),
        "product_delete",
        "products",
        serde_json::json!({ "product_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

fn validate_product(payload: &ProductPayload) -> AppResult<()> {
    validate_pricing(&payload.title, payload.price, payload.discount_price)?;
    if payload.stock < 0 {
        return Err(AppError::bad_request("stock must not be negative"));
    }
    Ok(())
}

fn validate_pricing(title: &str, price: i64, discount_price: Option<i64>) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::bad_request("title is required"));
    }
    if price < 0 {
        return Err(AppError::bad_request("price must not be negative"));
    }
    match discount_price {
        Some(discount) if discount < 0 => {
            Err(AppError::bad_request("discount_price must not be negative"))
        }
        Some(discount) if discount > price => Err(AppError::bad_request(
            "discount_price must not exceed price",
        )),
        _ => Ok(()),
    }
}

pub(crate) fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        title: model.title,
        description: model.description,
        price: model.price,
        discount_price: model.discount_price,
        stock: model.stock,
        image_url: model.image_url,
        inquiry_only: model.inquiry_only,
        status: model.status,
        sort_order: model.sort_order,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(price: i64, discount: Option<i64>, stock: i32) -> ProductPayload {
        ProductPayload {
            title: "Widget".into(),
            description: None,
            price,
            discount_price: discount,
            stock,
            image_url: None,
            inquiry_only: false,
            status: None,
            sort_order: None,
        }
    }

    #[test]
    fn discount_may_not_exceed_price() {
        assert!(validate_product(&payload(100, Some(80), 1)).is_ok());
        assert!(validate_product(&payload(100, Some(100), 1)).is_ok());
        assert!(validate_product(&payload(100, Some(120), 1)).is_err());
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(validate_product(&payload(-1, None, 1)).is_err());
        assert!(validate_product(&payload(100, None, -5)).is_err());
        assert!(validate_product(&payload(100, Some(-1), 1)).is_err());
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut p = payload(100, None, 1);
        p.title = "   ".into();
        assert!(validate_product(&p).is_err());
    }
}
