// src/models/material.rs
use serde::Deserialize;
use sqlx::FromRow;

/// Ficheiro enviado por um professor e associado a uma turma.
/// `tipo` é texto livre vindo do formulário (PDF, Vídeo, Outro).
#[derive(Debug, Clone, FromRow)]
pub struct Material {
    pub id: i64,
    pub filename: String,
    pub tipo: Option<String>,
    pub turma_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct EditarMaterialForm {
    pub novo_nome: Option<String>,
    pub tipo: Option<String>,
}

impl Material {
    pub fn tipo_label(&self) -> &str {
        self.tipo.as_deref().unwrap_or("Outro")
    }
}
