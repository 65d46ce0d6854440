// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    flash::Flash,
    models::user::{LoginForm, RegisterForm, Role},
    services::{auth_service, user_service},
    state::AppState,
    templates::{render, IndexPage, LoginPage, RegisterPage},
    web::mw_auth::{current_user, USER_ID_KEY},
};
use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

// GET /
pub async fn index(flash: Flash) -> AppResult<Response> {
    let template = IndexPage { flashes: flash.take() };
    Ok(render(&template)?.into_response())
}

// GET /register
pub async fn show_register_form(flash: Flash) -> AppResult<Response> {
    let template = RegisterPage { flashes: flash.take() };
    Ok(render(&template)?.into_response())
}

// POST /register
pub async fn handle_register(
    State(state): State<AppState>,
    flash: Flash,
    Form(form): Form<RegisterForm>,
) -> AppResult<Redirect> {
    let username = form.username.trim();
    tracing::info!("POST /register: pedido de registo para '{}'", username);

    if username.is_empty() || form.password.is_empty() {
        flash.error("Preencha todos os campos.");
        return Ok(Redirect::to("/register"));
    }

    let Ok(role) = form.role.parse::<Role>() else {
        tracing::warn!("Registo falhou: perfil inválido '{}'", form.role);
        flash.error("Perfil inválido.");
        return Ok(Redirect::to("/register"));
    };

    if form.password != form.confirm_password {
        flash.error("As senhas não coincidem!");
        return Ok(Redirect::to("/register"));
    }

    match user_service::create_user(
        &state.db_pool,
        username,
        &form.password,
        role,
        state.config.bcrypt_cost,
    )
    .await
    {
        Ok(_) => {
            flash.success("Registro concluído! Você pode fazer login agora.");
            Ok(Redirect::to("/login"))
        }
        Err(AppError::UsernameTaken(_)) => {
            flash.error("Usuário já existe. Escolha outro nome de usuário.");
            Ok(Redirect::to("/register"))
        }
        Err(e) => Err(e),
    }
}

// GET /login
pub async fn show_login_form(
    State(state): State<AppState>,
    session: Session,
    flash: Flash,
) -> AppResult<Response> {
    if let Some(user) = current_user(&state, &session).await? {
        tracing::debug!("GET /login: '{}' já logado, redirecionando", user.username);
        return Ok(Redirect::to(user.role.home()).into_response());
    }

    let template = LoginPage { flashes: flash.take() };
    Ok(render(&template)?.into_response())
}

// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    flash: Flash,
    Form(form): Form<LoginForm>,
) -> AppResult<Redirect> {
    tracing::info!("Tentativa de login para: {}", form.username);

    let user = match auth_service::authenticate(&state.db_pool, form.username.trim(), &form.password).await {
        Ok(user) => user,
        Err(AppError::InvalidCredentials) => {
            flash.error("Nome de usuário ou senha incorretos.");
            return Ok(Redirect::to("/login"));
        }
        Err(e) => return Err(e),
    };

    // Novo ID de sessão a cada login
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao rodar ID: {}", e)))?;
    session
        .insert(USER_ID_KEY, user.id)
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao inserir na sessão: {}", e)))?;

    tracing::info!("✅ Login bem-sucedido para: {} ({})", user.username, user.role);
    Ok(Redirect::to(user.role.home()))
}

// GET /logout
pub async fn handle_logout(session: Session) -> AppResult<Redirect> {
    let user_id: Option<i64> = session.get(USER_ID_KEY).await.ok().flatten();

    session
        .delete()
        .await
        .map_err(|e| AppError::SessionError(format!("Falha ao apagar sessão: {}", e)))?;

    if let Some(id) = user_id {
        tracing::info!("🚪 Utilizador {} desligado.", id);
    }
    Ok(Redirect::to("/"))
}
