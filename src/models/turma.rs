// src/models/turma.rs
use serde::Deserialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Turma {
    pub id: i64,
    pub name: String,
    pub professor_id: i64,
}

impl Turma {
    /// Link para a página da turma (a rota usa o nome, não o id).
    pub fn link(&self) -> String {
        format!("/turma/{}", urlencoding::encode(&self.name))
    }
}

#[derive(Debug, Deserialize)]
pub struct NovaTurmaForm {
    #[serde(default)]
    pub class_name: String,
}

#[derive(Debug, Deserialize)]
pub struct BuscaParams {
    pub nome_turma: Option<String>,
}
