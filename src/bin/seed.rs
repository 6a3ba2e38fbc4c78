use butterflyblue_api::{
    config::DatabaseConfig,
    db::{create_orm_conn, run_migrations},
    entity::{
        design_products::{self, DesignStatus},
        products, users,
    },
    services::auth_service::hash_password,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let database = DatabaseConfig::from_env();
    let orm = create_orm_conn(&database.url, database.encryption_key.as_deref()).await?;
    run_migrations(&orm).await?;

    let admin_id = ensure_user(&orm, "admin@butterflyblue.shop", "admin-password", true).await?;
    let user_id =
        ensure_user(&orm, "customer@butterflyblue.shop", "customer-password", false).await?;
    let tee_id = seed_products(&orm).await?;
    seed_design(&orm, tee_id).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    orm: &DatabaseConnection,
    email: &str,
    password: &str,
    is_admin: bool,
) -> anyhow::Result<i32> {
    if let Some(existing) = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(orm)
        .await?
    {
        println!("User {email} already exists");
        return Ok(existing.id);
    }

    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let user = users::ActiveModel {
        email: Set(email.to_string()),
        password_hash: Set(password_hash),
        is_admin: Set(is_admin),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(orm)
    .await?;

    println!("Ensured user {email} (admin={is_admin})");
    Ok(user.id)
}

/// Inserts the sample catalog once. Returns the id of the tee.
async fn seed_products(orm: &DatabaseConnection) -> anyhow::Result<i32> {
    let catalog = [
        ("Faith Over Fear Tee", "Soft cotton tee with a butterfly motif", 2499),
        ("Blue Butterfly Mug", "11oz ceramic mug", 1499),
        ("Grace Hoodie", "Heavyweight pullover hoodie", 3999),
    ];

    let mut tee_id = None;
    for (name, description, price_cents) in catalog {
        let existing = products::Entity::find()
            .filter(products::Column::Name.eq(name))
            .one(orm)
            .await?;
        let product = match existing {
            Some(p) => p,
            None => {
                products::ActiveModel {
                    name: Set(name.to_string()),
                    description: Set(Some(description.to_string())),
                    price_cents: Set(price_cents),
                    last_synced: Set(None),
                    created_at: Set(Utc::now()),
                    ..Default::default()
                }
                .insert(orm)
                .await?
            }
        };
        tee_id.get_or_insert(product.id);
    }

    println!("Seeded products");
    tee_id.ok_or_else(|| anyhow::anyhow!("catalog is empty"))
}

async fn seed_design(orm: &DatabaseConnection, product_id: i32) -> anyhow::Result<()> {
    let exists = design_products::Entity::find()
        .filter(design_products::Column::ProductId.eq(product_id))
        .one(orm)
        .await?
        .is_some();
    if exists {
        return Ok(());
    }

    let now = Utc::now();
    design_products::ActiveModel {
        product_id: Set(Some(product_id)),
        title: Set("Faith Over Fear Tee".to_string()),
        description: Set(Some("Faith-inspired apparel".to_string())),
        price_cents: Set(2499),
        design_params: Set(serde_json::json!({
            "blueprint_id": 6,
            "print_provider_id": 99,
            "variants": [{ "id": 12100 }, { "id": 12101 }, { "id": 12102 }],
            "print_areas": [{
                "variant_ids": [12100, 12101, 12102],
                "placeholders": [{
                    "position": "front",
                    "images": [{
                        "id": "butterfly-front",
                        "x": 0.5,
                        "y": 0.5,
                        "scale": 1.0,
                        "angle": 0
                    }]
                }]
            }],
            "tags": ["faith", "butterfly"],
            "product_type": "T-Shirt"
        })),
        status: Set(DesignStatus::Draft),
        fulfillment_product_id: Set(None),
        storefront_product_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(orm)
    .await?;

    println!("Seeded design for product {product_id}");
    Ok(())
}
