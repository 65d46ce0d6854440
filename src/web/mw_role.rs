// src/web/mw_role.rs
use crate::{
    flash::Flash,
    models::user::Role,
    state::AppState,
    web::mw_auth::CurrentUser,
};
use axum::{
    extract::{Extension, FromRef, Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Key;

/// Estado do middleware de perfil: a role exigida pelo grupo de rotas.
#[derive(Clone)]
pub struct RoleGuard {
    pub required: Role,
    cookie_key: Key,
}

impl RoleGuard {
    pub fn new(state: &AppState, required: Role) -> Self {
        RoleGuard { required, cookie_key: state.cookie_key.clone() }
    }
}

impl FromRef<RoleGuard> for Key {
    fn from_ref(guard: &RoleGuard) -> Key {
        guard.cookie_key.clone()
    }
}

/// Só deixa passar utilizadores com a role do grupo.
/// Corre depois de `require_auth`, que põe o `CurrentUser` nas extensões.
pub async fn require_role(
    State(guard): State<RoleGuard>,
    Extension(user): Extension<CurrentUser>,
    flash: Flash,
    request: Request,
    next: Next,
) -> Response {
    if user.role == guard.required {
        return next.run(request).await;
    }

    tracing::warn!(
        "Role MW: acesso negado a '{}' ({}) em {} (exige {}).",
        user.username,
        user.role,
        request.uri().path(),
        guard.required
    );
    flash.error("Acesso negado!");
    Redirect::to("/").into_response()
}
