use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::info;

pub async fn init_db(database_url: &str, max_connections: u32) -> Result<MySqlPool, sqlx::Error> {
    let pool = MySqlPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    info!(max_connections, "Database pool ready");
    Ok(pool)
}
