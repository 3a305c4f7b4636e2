use axum_restaurant_api::{config::AppConfig, db::create_pool, services::auth_service};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let admin_id = ensure_account(&pool, "admin", "admin@example.com", "admin123", true).await?;
    let user_id = ensure_account(&pool, "customer", "user@example.com", "user123", false).await?;
    seed_menu(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_account(
    pool: &sqlx::PgPool,
    username: &str,
    email: &str,
    password: &str,
    is_admin: bool,
) -> anyhow::Result<Uuid> {
    let password_hash = auth_service::hash_password(password)?;

    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, username, email, password_hash, is_admin)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET is_admin = EXCLUDED.is_admin
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(is_admin)
    .fetch_one(pool)
    .await?;

    println!("Ensured user {email} (admin={is_admin})");
    Ok(user_id)
}

async fn seed_menu(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let items = vec![
        (
            "Margherita Pizza",
            "Tomato, mozzarella and fresh basil",
            10.0,
            Some("images/margherita.jpg"),
        ),
        (
            "Spaghetti Carbonara",
            "Pancetta, egg yolk and pecorino",
            12.5,
            Some("images/carbonara.jpg"),
        ),
        (
            "Caesar Salad",
            "Romaine, parmesan and croutons",
            8.0,
            Some("images/caesar.jpg"),
        ),
        ("Tiramisu", "Espresso-soaked ladyfingers and mascarpone", 6.5, None),
    ];

    for (name, description, price, image_url) in items {
        // Names are not unique in the schema, so guard by hand to stay idempotent.
        let existing: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM menu_items WHERE name = $1")
                .bind(name)
                .fetch_optional(pool)
                .await?;
        if existing.is_some() {
            continue;
        }

        sqlx::query(
            r#"
            INSERT INTO menu_items (id, name, description, price, image_url)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(image_url)
        .execute(pool)
        .await?;
    }

    println!("Seeded menu items");
    Ok(())
}
