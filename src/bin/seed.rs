//! Database seeding tool
//!
//! Wipes catalog data (respecting foreign-key order), then inserts the
//! sample books from `data/books.json` and the default system config.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;

use readnest_server::config::AppConfig;

const ADMIN_EMAIL: &str = "admin@readnest.app";
const ADMIN_PASSWORD: &str = "admin123!";

#[derive(Deserialize)]
struct SeedBook {
    title: String,
    author: String,
    genre: String,
    rating: i32,
    total_copies: i32,
    description: String,
    summary: String,
    cover_url: String,
    cover_color: String,
    video_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().expect("Failed to load configuration");

    tracing_subscriber::fmt()
        .with_env_filter("readnest_server=info,seed=info")
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("seeding data ...");

    // Clear existing data - children first to respect foreign keys
    tracing::info!("Deleting borrow records...");
    sqlx::query("DELETE FROM borrow_records").execute(&pool).await?;

    tracing::info!("Deleting books...");
    sqlx::query("DELETE FROM books").execute(&pool).await?;

    tracing::info!("Deleting system config...");
    sqlx::query("DELETE FROM system_config").execute(&pool).await?;

    tracing::info!("Seeding books...");
    let books: Vec<SeedBook> = serde_json::from_str(include_str!("../../data/books.json"))?;
    for book in &books {
        sqlx::query(
            r#"
            INSERT INTO books (title, author, genre, rating, total_copies, available_copies,
                               description, summary, cover_url, cover_color, video_url)
            VALUES ($1, $2, $3, $4, $5, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(book.rating)
        .bind(book.total_copies)
        .bind(&book.description)
        .bind(&book.summary)
        .bind(&book.cover_url)
        .bind(&book.cover_color)
        .bind(&book.video_url)
        .execute(&pool)
        .await?;
    }

    tracing::info!("Seeding system config...");
    sqlx::query(
        "INSERT INTO system_config (key, value, description) VALUES ($1, $2, $3)",
    )
    .bind("max_books_allowed")
    .bind("5")
    .bind("Maximum number of books a user can borrow at once")
    .execute(&pool)
    .await?;

    // Ensure the default admin account exists (left alone if present)
    let admin_exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(ADMIN_EMAIL)
            .fetch_one(&pool)
            .await?;

    if !admin_exists {
        tracing::info!("Seeding admin account...");
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(ADMIN_PASSWORD.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash admin password: {}", e))?
            .to_string();

        sqlx::query(
            r#"
            INSERT INTO users (full_name, email, password, university_id, university_card,
                               role, status)
            VALUES ($1, $2, $3, 0, '', 'ADMIN', 'APPROVED')
            "#,
        )
        .bind("Library Admin")
        .bind(ADMIN_EMAIL)
        .bind(&hash)
        .execute(&pool)
        .await?;
    }

    tracing::info!("Seeding completed: {} books", books.len());

    Ok(())
}
