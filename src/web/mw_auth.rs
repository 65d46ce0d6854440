// src/web/mw_auth.rs
use crate::{
    error::AppError,
    flash::Flash,
    models::user::{Role, User},
    services::user_service,
    state::AppState,
};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

/// Chave da sessão onde fica o id do utilizador autenticado.
pub const USER_ID_KEY: &str = "user_id";

/// Utilizador autenticado do pedido atual, posto nas extensões por `require_auth`.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        CurrentUser { id: user.id, username: user.username, role: user.role }
    }
}

/// Resolve o utilizador da sessão, se houver.
pub async fn current_user(state: &AppState, session: &Session) -> Result<Option<CurrentUser>, AppError> {
    let user_id = session
        .get::<i64>(USER_ID_KEY)
        .await
        .map_err(|e| AppError::SessionError(format!("Erro ao verificar sessão: {}", e)))?;

    let Some(user_id) = user_id else {
        return Ok(None);
    };

    match user_service::find_user_by_id(&state.db_pool, user_id).await? {
        Some(user) => Ok(Some(user.into())),
        None => {
            // Sessão aponta para um utilizador que já não existe
            tracing::warn!("Sessão com user_id {} inexistente, limpando sessão.", user_id);
            session
                .flush()
                .await
                .map_err(|e| AppError::SessionError(format!("Falha ao limpar sessão: {}", e)))?;
            Ok(None)
        }
    }
}

// Middleware que verifica se o utilizador está logado
pub async fn require_auth(
    State(state): State<AppState>,
    session: Session,
    flash: Flash,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match current_user(&state, &session).await? {
        Some(user) => {
            tracing::debug!("Autenticação MW: '{}' ({}) autenticado.", user.username, user.role);
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        None => {
            tracing::debug!("Autenticação MW: não autenticado, redirecionando para /login");
            flash.error("Faça login para continuar.");
            Ok(Redirect::to("/login").into_response())
        }
    }
}
