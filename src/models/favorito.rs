// src/models/favorito.rs
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Favorito {
    pub id: i64,
    pub aluno_id: i64,
    pub turma_id: i64,
}

/// Resultado de favoritar: a segunda tentativa não altera nada.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoritarOutcome {
    Criado,
    JaExistia,
}
