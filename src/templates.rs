// src/templates.rs
use crate::{
    error::AppResult,
    flash::FlashMessage,
    models::{
        material::Material,
        mensagem::MensagemRecebida,
        pagina::Pagina,
        turma::Turma,
    },
};
use askama::Template;
use axum::response::Html;

/// Renderiza um template askama numa resposta HTML.
pub fn render<T: Template>(template: &T) -> AppResult<Html<String>> {
    Ok(Html(template.render()?))
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub flashes: Vec<FlashMessage>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub flashes: Vec<FlashMessage>,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub flashes: Vec<FlashMessage>,
}

#[derive(Template)]
#[template(path = "professor.html")]
pub struct ProfessorPage {
    pub flashes: Vec<FlashMessage>,
    pub username: String,
    pub turmas: Pagina<Turma>,
    // Seletor do formulário de upload: todas as turmas do professor
    pub todas_turmas: Vec<Turma>,
}

#[derive(Template)]
#[template(path = "aluno.html")]
pub struct AlunoPage {
    pub flashes: Vec<FlashMessage>,
    pub username: String,
    pub turmas: Pagina<Turma>,
}

#[derive(Template)]
#[template(path = "favoritas.html")]
pub struct FavoritasPage {
    pub flashes: Vec<FlashMessage>,
    pub turmas: Pagina<Turma>,
}

#[derive(Template)]
#[template(path = "turma.html")]
pub struct TurmaPage {
    pub flashes: Vec<FlashMessage>,
    pub turma: Turma,
    pub materiais: Vec<Material>,
    // Só o dono da turma vê o formulário de edição
    pub pode_editar: bool,
}

#[derive(Template)]
#[template(path = "turmas_encontradas.html")]
pub struct TurmasEncontradasPage {
    pub flashes: Vec<FlashMessage>,
    pub termo: String,
    pub turmas: Vec<Turma>,
}

#[derive(Template)]
#[template(path = "mensagens.html")]
pub struct MensagensPage {
    pub flashes: Vec<FlashMessage>,
    pub mensagens: Vec<MensagemRecebida>,
}
