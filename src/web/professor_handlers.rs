// src/web/professor_handlers.rs
use crate::{
    error::{AppError, AppResult},
    flash::Flash,
    models::{
        pagina::PaginaQuery,
        turma::NovaTurmaForm,
        user::Professor,
    },
    services::{material_service, turma_service, user_service},
    state::AppState,
    templates::{render, ProfessorPage},
    web::mw_auth::CurrentUser,
};
use axum::{
    extract::{multipart::MultipartError, Extension, Form, Multipart, Query, State},
    response::{Html, Redirect},
};
use sqlx::SqlitePool;

/// Perfil de professor do utilizador atual. O registo cria-o sempre,
/// por isso a ausência é um erro interno.
pub async fn professor_do_user(db_pool: &SqlitePool, user: &CurrentUser) -> AppResult<Professor> {
    user_service::find_professor_by_user_id(db_pool, user.id)
        .await?
        .ok_or_else(|| {
            tracing::error!("CRÍTICO: professor '{}' sem perfil em professors!", user.username);
            AppError::InternalServerError
        })
}

// GET /professor
pub async fn professor_page(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    flash: Flash,
    Query(query): Query<PaginaQuery>,
) -> AppResult<Html<String>> {
    let professor = professor_do_user(&state.db_pool, &user).await?;
    let page = query.page();
    tracing::debug!(
        "GET /professor: '{}' (user {}, perfil {}) página {}",
        professor.name,
        professor.user_id,
        professor.id,
        page
    );

    let turmas = turma_service::listar_turmas_do_professor(&state.db_pool, professor.id, page).await?;
    let todas_turmas = turma_service::todas_turmas_do_professor(&state.db_pool, professor.id).await?;

    render(&ProfessorPage {
        flashes: flash.take(),
        username: user.username,
        turmas,
        todas_turmas,
    })
}

// POST /professor - cria uma turma
pub async fn handle_create_turma(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    flash: Flash,
    Form(form): Form<NovaTurmaForm>,
) -> AppResult<Redirect> {
    if form.class_name.trim().is_empty() {
        flash.error("Informe o nome da turma.");
        return Ok(Redirect::to("/professor"));
    }

    let professor = professor_do_user(&state.db_pool, &user).await?;
    turma_service::criar_turma(&state.db_pool, professor.id, &form.class_name).await?;
    flash.success("Turma criada com sucesso!");
    Ok(Redirect::to("/professor"))
}

/// Campos do formulário de upload, já lidos para memória.
#[derive(Default)]
struct FormularioUpload {
    turma: Option<String>,
    tipo: Option<String>,
    arquivo: Option<(String, Vec<u8>)>,
}

async fn ler_formulario_upload(multipart: &mut Multipart) -> Result<FormularioUpload, MultipartError> {
    let mut form = FormularioUpload::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "turma" => form.turma = Some(field.text().await?),
            "tipo" => form.tipo = Some(field.text().await?),
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                // Browsers enviam a parte 'file' com nome vazio quando nada foi escolhido
                if !filename.trim().is_empty() {
                    form.arquivo = Some((filename, bytes.to_vec()));
                }
            }
            _ => continue,
        }
    }
    Ok(form)
}

// POST /upload (multipart: turma, tipo, file)
pub async fn handle_upload(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    flash: Flash,
    mut multipart: Multipart,
) -> AppResult<Redirect> {
    // Lê tudo para memória antes de validar: nada é gravado sem turma válida.
    // Corpo acima do limite ou mal formado acaba aqui.
    let FormularioUpload { turma: turma_raw, tipo, arquivo } = match ler_formulario_upload(&mut multipart).await {
        Ok(form) => form,
        Err(e) => {
            tracing::warn!("Upload de '{}' com corpo inválido: {}", user.username, e);
            flash.error(format!("Erro ao enviar o material: {}", e.body_text()));
            return Ok(Redirect::to("/professor"));
        }
    };

    let Some(turma_raw) = turma_raw.filter(|t| !t.trim().is_empty()) else {
        tracing::warn!("Upload de '{}' sem turma.", user.username);
        flash.error("Erro: O campo turma não foi enviado");
        return Ok(Redirect::to("/professor"));
    };

    let professor = professor_do_user(&state.db_pool, &user).await?;
    let turma = match turma_raw.trim().parse::<i64>() {
        Ok(turma_id) => turma_service::find_turma_by_id(&state.db_pool, turma_id).await?,
        Err(_) => None,
    };
    let Some(turma) = turma.filter(|t| t.professor_id == professor.id) else {
        tracing::warn!("Upload de '{}' para turma inválida '{}'.", user.username, turma_raw);
        flash.error("Turma não encontrada.");
        return Ok(Redirect::to("/professor"));
    };

    let Some((filename, bytes)) = arquivo else {
        flash.error("Nenhum arquivo selecionado.");
        return Ok(Redirect::to("/professor"));
    };

    let tipo = tipo.filter(|t| !t.trim().is_empty());
    match material_service::salvar_material(
        &state.db_pool,
        &state.config.upload_folder,
        turma.id,
        &filename,
        tipo.as_deref(),
        &bytes,
    )
    .await
    {
        Ok(_) => flash.success("Material enviado com sucesso!"),
        Err(e) => {
            tracing::error!("Erro ao enviar material '{}' para turma {}: {:?}", filename, turma.id, e);
            flash.error(format!("Erro ao enviar o material: {}", e));
        }
    }

    Ok(Redirect::to("/professor"))
}
