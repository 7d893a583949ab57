use sea_orm::{EntityTrait, PaginatorTrait, QuerySelect, Select};

use crate::{db::OrmConn, error::AppResult, response::Meta, routes::params::Pagination};

pub mod auth_service;
pub mod content_service;
pub mod dashboard_service;
pub mod lead_service;
pub mod order_service;
pub mod product_service;
pub mod review_service;
pub mod settings_service;

/// Run `finder` for one page and report the page position alongside the rows.
pub(crate) async fn fetch_page<E>(
    db: &OrmConn,
    finder: Select<E>,
    pagination: &Pagination,
) -> AppResult<(Vec<E::Model>, Meta)>
where
    E: EntityTrait,
    E::Model: Sync,
{
    let (page, limit, offset) = pagination.normalize();
    let total = finder.clone().count(db).await? as i64;
    let rows = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(db)
        .await?;
    Ok((rows, Meta::new(page, limit, total)))
}
