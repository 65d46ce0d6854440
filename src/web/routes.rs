// src/web/routes.rs
use crate::{
    models::user::Role,
    state::AppState,
    web::{
        aluno_handlers, auth_handlers, material_handlers, mensagem_handlers, mw_auth,
        mw_role::{self, RoleGuard},
        professor_handlers, turma_handlers,
    },
};
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use time::Duration;
use tower::ServiceBuilder;
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

pub fn create_router(app_state: AppState) -> Router {
    // --- Rotas Públicas ---
    let public_routes = Router::new()
        .route("/", get(auth_handlers::index))
        .route("/register", get(auth_handlers::show_register_form).post(auth_handlers::handle_register))
        .route("/login", get(auth_handlers::show_login_form).post(auth_handlers::handle_login));

    // --- Rotas de Professor ---
    let professor_routes = Router::new()
        .route(
            "/professor",
            get(professor_handlers::professor_page).post(professor_handlers::handle_create_turma),
        )
        .route(
            "/upload",
            post(professor_handlers::handle_upload)
                .layer(DefaultBodyLimit::max(app_state.config.max_upload_bytes)),
        )
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(&app_state, Role::Professor),
            mw_role::require_role,
        ));

    // --- Rotas de Aluno ---
    let aluno_routes = Router::new()
        .route("/aluno", get(aluno_handlers::aluno_page))
        .route("/favoritas", get(aluno_handlers::favoritas_page))
        .route("/favoritar/{turma_id}", post(aluno_handlers::handle_favoritar))
        .route_layer(middleware::from_fn_with_state(
            RoleGuard::new(&app_state, Role::Aluno),
            mw_role::require_role,
        ));

    // --- Rotas Autenticadas ---
    // require_auth corre antes do require_role dos grupos juntados aqui
    let authenticated_routes = Router::new()
        .route("/logout", get(auth_handlers::handle_logout))
        .route("/turma/{nome}", get(turma_handlers::turma_page))
        .route("/editar_material/{id}", post(material_handlers::handle_editar_material))
        .route("/enviar_mensagem", post(mensagem_handlers::handle_enviar_mensagem))
        .route("/buscar_turmas", get(turma_handlers::buscar_turmas_page))
        .route("/mensagens", get(mensagem_handlers::mensagens_page))
        .merge(professor_routes)
        .merge(aluno_routes)
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            mw_auth::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .with_state(app_state)
}

/// Router completo com as camadas de tracing, cookies e sessão.
pub fn create_app(app_state: AppState, session_store: SqliteStore) -> Router {
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)));

    create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CookieManagerLayer::new())
            .layer(session_layer),
    )
}
