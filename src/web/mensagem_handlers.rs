// src/web/mensagem_handlers.rs
use crate::{
    error::{AppError, AppResult},
    flash::Flash,
    models::mensagem::EnviarMensagemForm,
    services::mensagem_service,
    state::AppState,
    templates::{render, MensagensPage},
    web::mw_auth::CurrentUser,
};
use axum::{
    extract::{Extension, Form, State},
    response::{Html, Redirect},
};

// POST /enviar_mensagem
pub async fn handle_enviar_mensagem(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    flash: Flash,
    Form(form): Form<EnviarMensagemForm>,
) -> AppResult<Redirect> {
    match mensagem_service::enviar_mensagem(&state.db_pool, user.id, &form.destinatario, &form.mensagem).await {
        Ok(_) => flash.success("Mensagem enviada com sucesso!"),
        Err(AppError::NotFound(_)) => flash.error("Destinatário não encontrado."),
        Err(AppError::Validation(_)) => flash.error("A mensagem não pode estar vazia."),
        Err(e) => return Err(e),
    }
    Ok(Redirect::to(user.role.home()))
}

// GET /mensagens
pub async fn mensagens_page(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    flash: Flash,
) -> AppResult<Html<String>> {
    let mensagens = mensagem_service::listar_recebidas(&state.db_pool, user.id).await?;
    render(&MensagensPage { flashes: flash.take(), mensagens })
}
