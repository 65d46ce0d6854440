// src/config.rs
use anyhow::Context;
use std::{env, net::SocketAddr, path::PathBuf, str::FromStr};

/// Configuração da aplicação, lida uma vez no arranque a partir do ambiente (.env incluído).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub upload_folder: PathBuf,
    pub bind_addr: SocketAddr,
    // None => chave aleatória por processo
    pub session_secret: Option<String>,
    pub bcrypt_cost: u32,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://school.db".to_string()),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,
            upload_folder: env::var("UPLOAD_FOLDER")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static/uploads")),
            bind_addr: parse_var("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?,
            session_secret: env::var("SESSION_SECRET").ok().filter(|s| !s.is_empty()),
            bcrypt_cost: parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", 50 * 1024 * 1024)?,
        })
    }
}

// Lê uma variável opcional; presente mas inválida é erro de arranque.
fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Valor inválido para {}: '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}
