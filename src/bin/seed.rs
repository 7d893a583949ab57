use chrono::Utc;
use microsite_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{
        admins::{self, Entity as Admins},
        products::{self, Entity as Products},
        site_settings::Entity as SiteSettings,
    },
    middleware::auth::ROLE_SUPER_ADMIN,
    models::RecordStatus,
    services::{auth_service::hash_password, settings_service::put_setting},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let username = std::env::var("SEED_ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
    // No default password.
    let password = std::env::var("SEED_ADMIN_PASSWORD")
        .map_err(|_| anyhow::anyhow!("SEED_ADMIN_PASSWORD is not set"))?;

    let admin_id = ensure_admin(&orm, &username, &password).await?;
    seed_products(&orm).await?;
    seed_settings(&orm).await?;

    tracing::info!(%admin_id, "seed completed");
    Ok(())
}

async fn ensure_admin(
    orm: &DatabaseConnection,
    username: &str,
    password: &str,
) -> anyhow::Result<Uuid> {
    if let Some(existing) = Admins::find()
        .filter(admins::Column::Username.eq(username))
        .one(orm)
        .await?
    {
        tracing::info!(username, "admin already present");
        return Ok(existing.id);
    }

    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let admin = admins::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(username.to_string()),
        email: Set(format!("{username}@localhost")),
        password_hash: Set(password_hash),
        role: Set(ROLE_SUPER_ADMIN.to_string()),
        status: Set(RecordStatus::Active.as_str().to_string()),
        last_login: Set(None),
        created_at: Set(Utc::now().fixed_offset()),
    }
    .insert(orm)
    .await?;

    tracing::info!(username, "admin created");
    Ok(admin.id)
}

async fn seed_products(orm: &DatabaseConnection) -> anyhow::Result<()> {
    // (title, description, price in paise, discount price, stock, inquiry only)
    let catalog = vec![
        ("Business Card Design", "Single-sided visiting card design", 49_900, Some(39_900), 100, false),
        ("Logo Design", "Three concepts with two revisions", 299_900, None, 50, false),
        ("Digital Visiting Card", "Shareable microsite with contact actions", 99_900, Some(79_900), 200, false),
        ("Custom Website", "Tailored business website, priced on request", 0, None, 0, true),
    ];

    for (position, (title, description, price, discount, stock, inquiry_only)) in
        catalog.into_iter().enumerate()
    {
        let exists = Products::find()
            .filter(products::Column::Title.eq(title))
            .one(orm)
            .await?
            .is_some();
        if exists {
            continue;
        }

        products::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title.to_string()),
            description: Set(Some(description.to_string())),
            price: Set(price),
            discount_price: Set(discount),
            stock: Set(stock),
            image_url: Set(None),
            inquiry_only: Set(inquiry_only),
            status: Set(RecordStatus::Active.as_str().to_string()),
            sort_order: Set(position as i32),
            created_at: Set(Utc::now().fixed_offset()),
        }
        .insert(orm)
        .await?;
    }

    tracing::info!("seeded products");
    Ok(())
}

async fn seed_settings(orm: &DatabaseConnection) -> anyhow::Result<()> {
    let defaults = [
        ("company_name", "Demo Company"),
        ("director_name", "Demo User"),
        ("director_title", "Founder"),
        ("contact_phone1", "9876543210"),
        ("contact_email", "info@demo.com"),
        ("contact_address", "Demo City"),
        ("website_url", "https://demo.com"),
        ("view_count", "0"),
    ];

    for (key, value) in defaults {
        // Keep values an admin has already edited.
        if SiteSettings::find_by_id(key.to_string()).one(orm).await?.is_some() {
            continue;
        }
        put_setting(orm, key, value.to_string())
            .await
            .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    }

    tracing::info!("seeded settings");
    Ok(())
}
