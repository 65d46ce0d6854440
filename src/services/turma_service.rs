// src/services/turma_service.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        pagina::{Pagina, POR_PAGINA},
        turma::Turma,
    },
};
use sqlx::SqlitePool;

pub async fn criar_turma(db_pool: &SqlitePool, professor_id: i64, name: &str) -> AppResult<Turma> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("nome da turma vazio".to_string()));
    }

    let turma = sqlx::query_as::<_, Turma>(
        "INSERT INTO turmas (name, professor_id) VALUES (?1, ?2) RETURNING id, name, professor_id",
    )
    .bind(name)
    .bind(professor_id)
    .fetch_one(db_pool)
    .await?;

    tracing::info!("✅ Turma '{}' (id {}) criada pelo professor {}", turma.name, turma.id, professor_id);
    Ok(turma)
}

pub async fn find_turma_by_id(db_pool: &SqlitePool, turma_id: i64) -> AppResult<Option<Turma>> {
    let turma = sqlx::query_as::<_, Turma>("SELECT id, name, professor_id FROM turmas WHERE id = ?1")
        .bind(turma_id)
        .fetch_optional(db_pool)
        .await?;
    Ok(turma)
}

/// Os nomes não são únicos: devolve a primeira turma (menor id) com este nome.
pub async fn find_turma_by_name(db_pool: &SqlitePool, name: &str) -> AppResult<Option<Turma>> {
    tracing::debug!("Buscando turma por nome: {}", name);
    let turma = sqlx::query_as::<_, Turma>(
        "SELECT id, name, professor_id FROM turmas WHERE name = ?1 ORDER BY id ASC LIMIT 1",
    )
    .bind(name)
    .fetch_optional(db_pool)
    .await?;
    Ok(turma)
}

/// Turmas de um professor, paginadas.
pub async fn listar_turmas_do_professor(
    db_pool: &SqlitePool,
    professor_id: i64,
    page: i64,
) -> AppResult<Pagina<Turma>> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM turmas WHERE professor_id = ?1")
        .bind(professor_id)
        .fetch_one(db_pool)
        .await?;

    let items = sqlx::query_as::<_, Turma>(
        r#"
        SELECT id, name, professor_id FROM turmas
        WHERE professor_id = ?1
        ORDER BY id ASC
        LIMIT ?2 OFFSET ?3
        "#,
    )
    .bind(professor_id)
    .bind(POR_PAGINA)
    .bind(Pagina::<Turma>::offset(page, POR_PAGINA))
    .fetch_all(db_pool)
    .await?;

    Ok(Pagina { items, page, per_page: POR_PAGINA, total })
}

/// Todas as turmas de um professor (para o seletor do formulário de upload).
pub async fn todas_turmas_do_professor(db_pool: &SqlitePool, professor_id: i64) -> AppResult<Vec<Turma>> {
    let turmas = sqlx::query_as::<_, Turma>(
        "SELECT id, name, professor_id FROM turmas WHERE professor_id = ?1 ORDER BY name ASC, id ASC",
    )
    .bind(professor_id)
    .fetch_all(db_pool)
    .await?;
    Ok(turmas)
}

/// Todas as turmas, paginadas (página do aluno).
pub async fn listar_turmas(db_pool: &SqlitePool, page: i64) -> AppResult<Pagina<Turma>> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM turmas")
        .fetch_one(db_pool)
        .await?;

    let items = sqlx::query_as::<_, Turma>(
        "SELECT id, name, professor_id FROM turmas ORDER BY id ASC LIMIT ?1 OFFSET ?2",
    )
    .bind(POR_PAGINA)
    .bind(Pagina::<Turma>::offset(page, POR_PAGINA))
    .fetch_all(db_pool)
    .await?;

    Ok(Pagina { items, page, per_page: POR_PAGINA, total })
}

/// Busca de turmas por nome: substring, sem distinguir maiúsculas (também nas
/// letras acentuadas, que o LIKE do SQLite não dobra). Termo vazio não devolve nada.
pub async fn buscar_turmas(db_pool: &SqlitePool, termo: &str) -> AppResult<Vec<Turma>> {
    let termo = termo.trim().to_lowercase();
    if termo.is_empty() {
        return Ok(Vec::new());
    }

    let turmas = sqlx::query_as::<_, Turma>(
        "SELECT id, name, professor_id FROM turmas ORDER BY name ASC, id ASC",
    )
    .fetch_all(db_pool)
    .await?;

    let encontradas: Vec<Turma> = turmas
        .into_iter()
        .filter(|t| t.name.to_lowercase().contains(&termo))
        .collect();
    tracing::debug!("Busca '{}': {} turma(s)", termo, encontradas.len());
    Ok(encontradas)
}
