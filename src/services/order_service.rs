use std::collections::HashMap;

use chrono::{DateTime, Local, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::orders::{
        CartLine, CreateOrderRequest, OrderList, OrderWithItems, UpdateOrderStatusRequest,
        UpdatePaymentStatusRequest,
    },
    entity::{
        order_items::{
            ActiveModel as OrderItemActive, Column as OrderItemCol, Entity as OrderItems,
            Model as OrderItemModel,
        },
        orders::{ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel},
        products::{Column as ProdCol, Entity as Products, Model as ProductModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ROLE_USER},
    models::{Order, OrderItem, OrderStatus, PaymentStatus, RecordStatus},
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, Pagination, SortOrder},
    state::AppState,
};

/// A cart line priced against the catalog at checkout time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PricedLine {
    pub product_id: Uuid,
    pub title: String,
    pub quantity: i32,
    pub unit_price: i64,
    pub total_price: i64,
}

/// Place an order for the submitted cart.
///
/// Prices come from the catalog, not the client: a submitted unit price or
/// total that disagrees with the recomputed one rejects the request. The order
/// row, its items and the stock decrements commit together or not at all.
pub async fn create_order(
    state: &AppState,
    user: Option<&AuthUser>,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    validate_order_request(&payload)?;

    // Only storefront accounts own orders; admins placing test orders stay guests.
    let user_id = user.filter(|u| u.role == ROLE_USER).map(|u| u.user_id);

    let txn = state.orm.begin().await?;
    let result = insert_order(&txn, user_id, &payload).await;
    let created = match result {
        Ok(created) => created,
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!(error = %rollback_err, "order rollback failed");
            }
            tracing::warn!(error = %err, "order creation aborted");
            return Err(err);
        }
    };
    txn.commit().await?;

    tracing::info!(
        order_id = %created.order.id,
        order_number = %created.order.order_number,
        final_amount = created.order.final_amount,
        items = created.items.len(),
        "order created"
    );

    audit::record(
        &state.orm,
        user_id,
        "order_create",
        "orders",
        serde_json::json!({
            "order_id": created.order.id,
            "order_number": created.order.order_number,
        }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order placed",
        created,
        Some(Meta::empty()),
    ))
}

async fn insert_order<C: ConnectionTrait>(
    txn: &C,
    user_id: Option<Uuid>,
    payload: &CreateOrderRequest,
) -> AppResult<OrderWithItems> {
    let ids: Vec<Uuid> = payload.items.iter().map(|line| line.product_id).collect();
    let products: HashMap<Uuid, ProductModel> = Products::find()
        .filter(ProdCol::Id.is_in(ids))
        .all(txn)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let lines = price_lines(&payload.items, &products)?;
    let total_amount = order_total(&lines)?;
    check_claimed_amount("total_amount", payload.total_amount, total_amount)?;
    check_claimed_amount("final_amount", payload.final_amount, total_amount)?;

    let now = Utc::now();
    let order_id = Uuid::new_v4();
    let order = OrderActive {
        id: Set(order_id),
        order_number: Set(build_order_number(order_id, now)),
        user_id: Set(user_id),
        user_name: Set(clean_contact(payload.user_name.as_deref())),
        user_phone: Set(clean_contact(payload.user_phone.as_deref())),
        user_email: Set(clean_contact(payload.user_email.as_deref())),
        total_amount: Set(total_amount),
        final_amount: Set(total_amount),
        status: Set(OrderStatus::Pending.as_str().into()),
        payment_status: Set(PaymentStatus::Pending.as_str().into()),
        created_at: Set(now.fixed_offset()),
        updated_at: Set(now.fixed_offset()),
    }
    .insert(txn)
    .await?;

    let mut items = Vec::with_capacity(lines.len());
    for line in &lines {
        let item = OrderItemActive {
            id: Set(Uuid::new_v4()),
            order_id: Set(order.id),
            product_id: Set(Some(line.product_id)),
            product_title: Set(line.title.clone()),
            quantity: Set(line.quantity),
            unit_price: Set(line.unit_price),
            total_price: Set(line.total_price),
            created_at: Set(now.fixed_offset()),
        }
        .insert(txn)
        .await?;

        reserve_stock(txn, line).await?;
        items.push(order_item_from_entity(item));
    }

    Ok(OrderWithItems {
        order: order_from_entity(order),
        items,
    })
}

/// Conditional decrement: concurrent checkouts can never push stock below zero.
async fn reserve_stock<C: ConnectionTrait>(txn: &C, line: &PricedLine) -> AppResult<()> {
    let result = Products::update_many()
        .col_expr(ProdCol::Stock, Expr::col(ProdCol::Stock).sub(line.quantity))
        .filter(ProdCol::Id.eq(line.product_id))
        .filter(ProdCol::Stock.gte(line.quantity))
        .exec(txn)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::BadRequest(format!(
            "Insufficient stock for {}",
            line.title
        )));
    }
    Ok(())
}

fn validate_order_request(payload: &CreateOrderRequest) -> AppResult<()> {
    if payload.items.is_empty() {
        return Err(AppError::bad_request("Cart is empty"));
    }
    for line in &payload.items {
        if line.quantity <= 0 {
            return Err(AppError::bad_request("quantity must be greater than 0"));
        }
        if line.unit_price.is_some_and(|p| p < 0) {
            return Err(AppError::bad_request("unit_price must not be negative"));
        }
    }
    if payload.total_amount.is_some_and(|t| t < 0) || payload.final_amount.is_some_and(|t| t < 0) {
        return Err(AppError::bad_request("amounts must not be negative"));
    }
    Ok(())
}

pub(crate) fn price_lines(
    lines: &[CartLine],
    products: &HashMap<Uuid, ProductModel>,
) -> AppResult<Vec<PricedLine>> {
    lines
        .iter()
        .map(|line| {
            let product = products.get(&line.product_id).ok_or_else(|| {
                AppError::BadRequest(format!("Product {} not found", line.product_id))
            })?;
            if product.status != RecordStatus::Active.as_str() {
                return Err(AppError::BadRequest(format!(
                    "{} is not available",
                    product.title
                )));
            }
            if product.inquiry_only {
                return Err(AppError::BadRequest(format!(
                    "{} is available on inquiry only",
                    product.title
                )));
            }

            let unit_price = product.discount_price.unwrap_or(product.price);
            if line.unit_price.is_some_and(|claimed| claimed != unit_price) {
                return Err(AppError::BadRequest(format!(
                    "Price mismatch for {}",
                    product.title
                )));
            }
            let total_price = unit_price
                .checked_mul(i64::from(line.quantity))
                .ok_or_else(|| AppError::bad_request("line total out of range"))?;

            Ok(PricedLine {
                product_id: product.id,
                title: product.title.clone(),
                quantity: line.quantity,
                unit_price,
                total_price,
            })
        })
        .collect()
}

pub(crate) fn order_total(lines: &[PricedLine]) -> AppResult<i64> {
    lines.iter().try_fold(0_i64, |acc, line| {
        acc.checked_add(line.total_price)
            .ok_or_else(|| AppError::bad_request("order total out of range"))
    })
}

fn check_claimed_amount(field: &str, claimed: Option<i64>, computed: i64) -> AppResult<()> {
    match claimed {
        Some(value) if value != computed => Err(AppError::BadRequest(format!(
            "Price mismatch: {field} is {value}, expected {computed}"
        ))),
        _ => Ok(()),
    }
}

fn clean_contact(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// `ORD-<local date>-<first 8 hex digits of the order id>`.
pub(crate) fn build_order_number(order_id: Uuid, at: DateTime<Utc>) -> String {
    let date = at.with_timezone(&Local).format("%Y%m%d");
    let suffix = order_id.simple().to_string();
    let short = &suffix[..8];
    format!("ORD-{}-{}", date, short.to_uppercase())
}

pub async fn list_orders(
    state: &AppState,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = query.pagination().normalize();

    let mut finder = Orders::find();
    if let Some(status) = query.status.as_ref().filter(|s| !s.is_empty()) {
        finder = finder.filter(OrderCol::Status.eq(status.clone()));
    }

    let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);
    finder = match sort_order {
        SortOrder::Asc => finder.order_by_asc(OrderCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(OrderCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Orders",
        OrderList { items: orders },
        Some(meta),
    ))
}

pub async fn list_user_orders(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<OrderList>> {
    let (page, limit, offset) = pagination.normalize();
    let finder = Orders::find()
        .filter(OrderCol::UserId.eq(user.user_id))
        .order_by_desc(OrderCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;
    let orders = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Ok",
        OrderList { items: orders },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_order(state: &AppState, id: Uuid) -> AppResult<ApiResponse<OrderWithItems>> {
    let order = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order.id))
        .order_by_asc(OrderItemCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(order_item_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Order found",
        OrderWithItems {
            order: order_from_entity(order),
            items,
        },
        Some(Meta::empty()),
    ))
}

pub async fn update_order_status(
    state: &AppState,
    actor: &AuthUser,
    id: Uuid,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    let txn = state.orm.begin().await?;
    let result = change_status(&txn, id, payload.status).await;
    let order = match result {
        Ok(order) => order,
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!(error = %rollback_err, "status rollback failed");
            }
            return Err(err);
        }
    };
    txn.commit().await?;

    audit::record(
        &state.orm,
        Some(actor.user_id),
        "order_status_update",
        "orders",
        serde_json::json!({ "order_id": order.id, "status": order.status }),
    )
    .await;

    Ok(ApiResponse::success(
        "Order updated",
        order_from_entity(order),
        Some(Meta::empty()),
    ))
}

async fn change_status<C: ConnectionTrait>(
    txn: &C,
    id: Uuid,
    next: OrderStatus,
) -> AppResult<OrderModel> {
    let order = Orders::find_by_id(id)
        .one(txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let current: OrderStatus = order.status.parse().map_err(|_| {
        AppError::Internal(anyhow::anyhow!(
            "order {} has unknown status {}",
            order.id,
            order.status
        ))
    })?;
    if current == next {
        return Ok(order);
    }
    if !current.can_transition_to(next) {
        return Err(AppError::BadRequest(format!(
            "Cannot change order from {current} to {next}"
        )));
    }

    // Guarded on the status we read, so a concurrent change is detected instead of overwritten.
    let result = Orders::update_many()
        .col_expr(OrderCol::Status, Expr::value(next.as_str()))
        .col_expr(OrderCol::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
        .filter(OrderCol::Id.eq(id))
        .filter(OrderCol::Status.eq(current.as_str()))
        .exec(txn)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::Conflict("order status changed concurrently".into()));
    }

    if next == OrderStatus::Cancelled {
        restore_stock(txn, id).await?;
    }

    Orders::find_by_id(id)
        .one(txn)
        .await?
        .ok_or(AppError::NotFound)
}

async fn restore_stock<C: ConnectionTrait>(txn: &C, order_id: Uuid) -> AppResult<()> {
    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order_id))
        .all(txn)
        .await?;

    for item in items {
        // Items of products deleted since the order have nothing to restock.
        let Some(product_id) = item.product_id else {
            continue;
        };
        Products::update_many()
            .col_expr(ProdCol::Stock, Expr::col(ProdCol::Stock).add(item.quantity))
            .filter(ProdCol::Id.eq(product_id))
            .exec(txn)
            .await?;
    }
    Ok(())
}

pub async fn update_payment_status(
    state: &AppState,
    actor: &AuthUser,
    id: Uuid,
    payload: UpdatePaymentStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    let existing = Orders::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: OrderActive = existing.into();
    active.payment_status = Set(payload.payment_status.as_str().into());
    active.updated_at = Set(Utc::now().fixed_offset());
    let order = active.update(&state.orm).await?;

    audit::record(
        &state.orm,
        Some(actor.user_id),
        "order_payment_update",
        "orders",
        serde_json::json!({ "order_id": order.id, "payment_status": order.payment_status }),
    )
    .await;

    Ok(ApiResponse::success(
        "Payment status updated",
        order_from_entity(order),
        Some(Meta::empty()),
    ))
}

pub(crate) fn order_from_entity(model: OrderModel) -> Order {
    Order {
        id: model.id,
        order_number: model.order_number,
        user_id: model.user_id,
        user_name: model.user_name,
        user_phone: model.user_phone,
        user_email: model.user_email,
        total_amount: model.total_amount,
        final_amount: model.final_amount,
        status: model.status,
        payment_status: model.payment_status,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn order_item_from_entity(model: OrderItemModel) -> OrderItem {
    OrderItem {
        id: model.id,
        order_id: model.order_id,
        product_id: model.product_id,
        product_title: model.product_title,
        quantity: model.quantity,
        unit_price: model.unit_price,
        total_price: model.total_price,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(title: &str, price: i64, discount: Option<i64>) -> ProductModel {
        ProductModel {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            price,
            discount_price: discount,
            stock: 10,
            image_url: None,
            inquiry_only: false,
            status: "active".into(),
            sort_order: 0,
            created_at: Utc::now().fixed_offset(),
        }
    }

    fn catalog(items: Vec<ProductModel>) -> HashMap<Uuid, ProductModel> {
        items.into_iter().map(|p| (p.id, p)).collect()
    }

    fn line(product_id: Uuid, quantity: i32, unit_price: Option<i64>) -> CartLine {
        CartLine {
            product_id,
            quantity,
            unit_price,
        }
    }

    #[test]
    fn prices_lines_from_catalog_with_discount() {
        let widget = product("Widget", 100, None);
        let gadget = product("Gadget", 500, Some(450));
        let lines = vec![line(widget.id, 2, None), line(gadget.id, 1, Some(450))];
        let products = catalog(vec![widget, gadget]);

        let priced = price_lines(&lines, &products).unwrap();
        assert_eq!(priced[0].total_price, 200);
        assert_eq!(priced[1].unit_price, 450);
        assert_eq!(order_total(&priced).unwrap(), 650);
    }

    #[test]
    fn rejects_tampered_unit_price() {
        let widget = product("Widget", 100, None);
        let lines = vec![line(widget.id, 1, Some(1))];
        let products = catalog(vec![widget]);
        assert!(matches!(
            price_lines(&lines, &products),
            Err(AppError::BadRequest(msg)) if msg.contains("Price mismatch")
        ));
    }

    #[test]
    fn rejects_inquiry_only_and_inactive_products() {
        let mut inquiry = product("Custom", 100, None);
        inquiry.inquiry_only = true;
        let mut hidden = product("Hidden", 100, None);
        hidden.status = "inactive".into();
        let inquiry_line = vec![line(inquiry.id, 1, None)];
        let hidden_line = vec![line(hidden.id, 1, None)];
        let products = catalog(vec![inquiry, hidden]);

        assert!(price_lines(&inquiry_line, &products).is_err());
        assert!(price_lines(&hidden_line, &products).is_err());
    }

    #[test]
    fn claimed_total_must_match() {
        assert!(check_claimed_amount("total_amount", None, 200).is_ok());
        assert!(check_claimed_amount("total_amount", Some(200), 200).is_ok());
        assert!(check_claimed_amount("total_amount", Some(199), 200).is_err());
    }

    #[test]
    fn order_number_carries_date_and_id_prefix() {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let number = build_order_number(id, now);
        let date = now.with_timezone(&Local).format("%Y%m%d").to_string();
        let prefix = id.simple().to_string()[..8].to_uppercase();
        assert_eq!(number, format!("ORD-{date}-{prefix}"));
    }

    #[test]
    fn empty_cart_is_rejected_before_any_io() {
        let payload = CreateOrderRequest {
            items: vec![],
            user_name: None,
            user_phone: None,
            user_email: None,
            total_amount: None,
            final_amount: None,
        };
        assert!(matches!(
            validate_order_request(&payload),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn blank_contact_fields_become_none() {
        assert_eq!(clean_contact(Some("  ")), None);
        assert_eq!(clean_contact(Some(" Asha ")), Some("Asha".into()));
    }
}
