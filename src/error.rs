// src/error.rs
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de I/O: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Erro ao renderizar template: {0}")]
    TemplateError(#[from] askama::Error),

    #[error("Erro ao processar password")]
    PasswordHashingError,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Utilizador '{0}' já existe")]
    UsernameTaken(String),

    #[error("Já existe outro material com o ficheiro '{0}'")]
    FileNameTaken(String),

    #[error("{0} não encontrado(a)")]
    NotFound(&'static str),

    #[error("Dados inválidos: {0}")]
    Validation(String),

    #[error("Erro na sessão: {0}")]
    SessionError(String),

    #[error("Erro interno inesperado")]
    InternalServerError,
}

impl AppError {
    /// Violação de UNIQUE no SQLite (corridas check-then-insert).
    pub fn is_unique_violation(&self) -> bool {
        match self {
            AppError::SqlxError(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
            _ => false,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("Erro processado: {:?}", self);

        let (status, user_message) = match self {
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao aceder aos dados.")
            }
            AppError::IoError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao aceder aos ficheiros."),
            AppError::PasswordHashingError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao processar credenciais.")
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Nome de usuário ou senha incorretos.")
            }
            AppError::UsernameTaken(_) => (StatusCode::CONFLICT, "Usuário já existe."),
            AppError::FileNameTaken(_) => (StatusCode::CONFLICT, "Nome de arquivo já em uso."),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Registo não encontrado."),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Dados inválidos."),
            AppError::SessionError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro na gestão da sua sessão.")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado."),
        };

        (status, Html(format!(r#"
            <!DOCTYPE html><html><head><title>Erro</title><style>body{{font-family:sans-serif;}}</style></head>
            <body><h1>Erro {status_code}</h1><p>{message}</p><a href="/">Voltar</a></body></html>
         "#, status_code = status.as_u16(), message = user_message))).into_response()
    }
}

pub type AppResult<T = ()> = Result<T, AppError>;
