// src/web/material_handlers.rs
use crate::{
    error::{AppError, AppResult},
    flash::Flash,
    models::material::EditarMaterialForm,
    services::material_service,
    state::AppState,
    web::mw_auth::CurrentUser,
};
use axum::{
    extract::{Extension, Form, Path, State},
    response::Redirect,
};

// POST /editar_material/{id}
/// Aberto a qualquer utilizador autenticado, como as restantes rotas partilhadas;
/// o formulário só aparece ao dono da turma, mas o servidor não o exige.
pub async fn handle_editar_material(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    flash: Flash,
    Path(id): Path<i64>,
    Form(form): Form<EditarMaterialForm>,
) -> AppResult<Redirect> {
    let Some(material) = material_service::find_material_by_id(&state.db_pool, id).await? else {
        flash.error("Material não encontrado.");
        return Ok(Redirect::to(user.role.home()));
    };

    match material_service::editar_material(
        &state.db_pool,
        &state.config.upload_folder,
        &material,
        form.novo_nome.as_deref(),
        form.tipo.as_deref(),
    )
    .await
    {
        Ok(_) => flash.success("Material editado com sucesso!"),
        Err(AppError::NotFound(_)) => flash.error("Material não encontrado."),
        Err(AppError::Validation(_)) => flash.error("Nome de arquivo inválido."),
        Err(AppError::FileNameTaken(nome)) => {
            flash.error(format!("Já existe outro material com o nome '{}'.", nome))
        }
        Err(e) => return Err(e),
    }
    Ok(Redirect::to(user.role.home()))
}
