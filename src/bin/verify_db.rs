use sqlx::sqlite::SqlitePool;

use taskboard::infrastructure::db;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:taskboard.db".into());

    let pool = SqlitePool::connect(&database_url).await?;

    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE '_sqlx%' ORDER BY name",
    )
    .fetch_all(&pool)
    .await?;

    println!("Tables: {}", tables.join(", "));

    let (boards, tasks): (i64, i64) = sqlx::query_as(
        "SELECT (SELECT count(*) FROM boards), (SELECT count(*) FROM tasks)",
    )
    .fetch_one(&pool)
    .await?;

    println!("Boards: {}, tasks: {}", boards, tasks);

    let stray: i64 = sqlx::query_scalar(
        "SELECT count(*) FROM tasks t LEFT JOIN boards b ON b.id = t.board_id WHERE b.id IS NULL",
    )
    .fetch_one(&pool)
    .await?;

    println!("Tasks without a board: {}", stray);

    println!("Journal mode: {}", db::verify_wal_mode(&pool).await?);

    Ok(())
}
