// src/db.rs
use crate::{
    config::Config,
    error::{AppError, AppResult},
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tower_sessions_sqlx_store::SqliteStore;

pub async fn create_db_pool(config: &Config) -> AppResult<SqlitePool> {
    tracing::info!("Ligando à base de dados: {}", config.database_url);

    // Criar se não existir; as foreign keys ficam ativas (padrão do sqlx)
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    Ok(pool)
}

/// Executa os ficheiros SQL de ./migrations (embutidos no binário).
pub async fn run_migrations(pool: &SqlitePool) -> AppResult<()> {
    tracing::info!("Executando migrações da base de dados...");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Migrações concluídas.");
    Ok(())
}

/// Store das sessões na mesma base de dados, tabela `sessions`.
pub async fn create_session_store(pool: &SqlitePool) -> AppResult<SqliteStore> {
    let store = SqliteStore::new(pool.clone())
        .with_table_name("sessions")
        .map_err(|e| AppError::SessionError(format!("Nome de tabela inválido: {}", e)))?;
    store.migrate().await?;
    Ok(store)
}
