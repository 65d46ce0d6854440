// src/state.rs
use crate::config::Config;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_cookies::Key;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub config: Arc<Config>,
    // Chave das cookies assinadas (mensagens flash)
    pub cookie_key: Key,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: Config) -> Self {
        let cookie_key = match config.session_secret.as_deref() {
            Some(secret) if secret.len() >= 64 => Key::from(secret.as_bytes()),
            Some(_) => {
                tracing::warn!("⚠️ SESSION_SECRET tem menos de 64 bytes, usando uma chave aleatória.");
                Key::generate()
            }
            None => {
                tracing::warn!("⚠️ SESSION_SECRET não definida, usando uma chave aleatória (cookies não sobrevivem a um reinício).");
                Key::generate()
            }
        };

        AppState {
            db_pool,
            config: Arc::new(config),
            cookie_key,
        }
    }
}

// Permite extrair o pool da DB diretamente
impl axum::extract::FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> SqlitePool {
        state.db_pool.clone()
    }
}

impl axum::extract::FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Key {
        state.cookie_key.clone()
    }
}
