// src/web/turma_handlers.rs
use crate::{
    error::AppResult,
    flash::Flash,
    models::{turma::BuscaParams, user::Role},
    services::{material_service, turma_service, user_service},
    state::AppState,
    templates::{render, TurmaPage, TurmasEncontradasPage},
    web::mw_auth::CurrentUser,
};
use axum::{
    extract::{Extension, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};

// GET /turma/{nome}
pub async fn turma_page(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    flash: Flash,
    Path(nome): Path<String>,
) -> AppResult<Response> {
    let Some(turma) = turma_service::find_turma_by_name(&state.db_pool, &nome).await? else {
        tracing::debug!("GET /turma: '{}' não existe", nome);
        flash.error("Turma não encontrada.");
        return Ok(Redirect::to(user.role.home()).into_response());
    };

    let materiais = material_service::listar_materiais(&state.db_pool, turma.id).await?;

    let pode_editar = match user.role {
        Role::Professor => user_service::find_professor_by_user_id(&state.db_pool, user.id)
            .await?
            .is_some_and(|p| p.id == turma.professor_id),
        Role::Aluno => false,
    };

    let template = TurmaPage { flashes: flash.take(), turma, materiais, pode_editar };
    Ok(render(&template)?.into_response())
}

// GET /buscar_turmas?nome_turma=...
pub async fn buscar_turmas_page(
    State(state): State<AppState>,
    flash: Flash,
    Query(params): Query<BuscaParams>,
) -> AppResult<Response> {
    let termo = params.nome_turma.unwrap_or_default();
    let turmas = turma_service::buscar_turmas(&state.db_pool, &termo).await?;
    tracing::debug!("Busca '{}': {} turmas", termo, turmas.len());

    let template = TurmasEncontradasPage { flashes: flash.take(), termo, turmas };
    Ok(render(&template)?.into_response())
}
