// src/main.rs

// --- Declaração dos Módulos ---
mod config;
mod db;
mod error;
mod flash;
mod models;
mod services;
mod state;
mod templates;
mod web;

#[cfg(test)]
mod tests;

use crate::{config::Config, state::AppState};
use axum::serve;
use std::env;
use tokio::net::TcpListener;
use tower_sessions::ExpiredDeletion;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuração do Logging (Tracing) ---
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                env::var("RUST_LOG")
                    .unwrap_or_else(|_| {
                        "portal_escolar=debug,tower_http=info,sqlx=warn,tower_sessions=info".into()
                    })
                    .into()
            }),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("🚀 Iniciando o Portal Escolar...");

    let config = Config::from_env()?;

    // --- Base de Dados ---
    let db_pool = db::create_db_pool(&config).await.map_err(|e| {
        tracing::error!("❌ Falha crítica ao inicializar a base de dados: {}", e);
        anyhow::anyhow!("Falha ao conectar/migrar DB: {}", e)
    })?;

    // --- Pasta de uploads ---
    tokio::fs::create_dir_all(&config.upload_folder).await.map_err(|e| {
        anyhow::anyhow!("Falha ao criar pasta de uploads {}: {}", config.upload_folder.display(), e)
    })?;
    tracing::info!("📁 Uploads em {}", config.upload_folder.display());

    // --- Sessões ---
    let session_store = db::create_session_store(&db_pool)
        .await
        .map_err(|e| anyhow::anyhow!("Falha ao criar session store: {}", e))?;

    let session_store_clone = session_store.clone();
    tokio::spawn(async move {
        if let Err(e) = session_store_clone
            .continuously_delete_expired(tokio::time::Duration::from_secs(60 * 60))
            .await
        {
            tracing::error!("Erro na task de limpeza de sessões: {:?}", e);
        }
    });
    tracing::info!("🧹 Tarefa de limpeza de sessões iniciada.");

    let bind_addr = config.bind_addr;
    let app_state = AppState::new(db_pool, config);

    let listener = TcpListener::bind(bind_addr).await.map_err(|e| {
        tracing::error!("❌ Falha ao iniciar listener em {}: {}", bind_addr, e);
        e
    })?;
    tracing::info!("📡 Servidor escutando em http://{}", bind_addr);

    let app = web::routes::create_app(app_state, session_store);

    if let Err(e) = serve(listener, app.into_make_service()).await {
        tracing::error!("❌ Erro fatal no servidor: {}", e);
        return Err(e.into());
    }

    Ok(())
}
