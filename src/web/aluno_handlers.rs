// src/web/aluno_handlers.rs
use crate::{
    error::{AppError, AppResult},
    flash::Flash,
    models::{favorito::FavoritarOutcome, pagina::PaginaQuery},
    services::{favorito_service, turma_service},
    state::AppState,
    templates::{render, AlunoPage, FavoritasPage},
    web::mw_auth::CurrentUser,
};
use axum::{
    extract::{Extension, Path, Query, State},
    response::{Html, Redirect},
};

// GET /aluno - todas as turmas, paginadas
pub async fn aluno_page(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    flash: Flash,
    Query(query): Query<PaginaQuery>,
) -> AppResult<Html<String>> {
    let turmas = turma_service::listar_turmas(&state.db_pool, query.page()).await?;
    render(&AlunoPage { flashes: flash.take(), username: user.username, turmas })
}

// GET /favoritas
pub async fn favoritas_page(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    flash: Flash,
    Query(query): Query<PaginaQuery>,
) -> AppResult<Html<String>> {
    let turmas = favorito_service::listar_favoritas(&state.db_pool, user.id, query.page()).await?;
    tracing::debug!("GET /favoritas: '{}' tem {} favoritas", user.username, turmas.total);
    render(&FavoritasPage { flashes: flash.take(), turmas })
}

// POST /favoritar/{turma_id}
pub async fn handle_favoritar(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    flash: Flash,
    Path(turma_id): Path<i64>,
) -> AppResult<Redirect> {
    match favorito_service::favoritar(&state.db_pool, user.id, turma_id).await {
        Ok(FavoritarOutcome::Criado) => flash.success("Turma favoritada com sucesso!"),
        Ok(FavoritarOutcome::JaExistia) => flash.warning("Você já favoritou esta turma."),
        Err(AppError::NotFound(_)) => flash.error("Turma não encontrada."),
        Err(e) => return Err(e),
    }
    Ok(Redirect::to("/aluno"))
}
