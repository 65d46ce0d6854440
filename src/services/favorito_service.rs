// src/services/favorito_service.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        favorito::{FavoritarOutcome, Favorito},
        pagina::{Pagina, POR_PAGINA},
        turma::Turma,
    },
    services::turma_service,
};
use sqlx::SqlitePool;

pub async fn find_favorito(
    db_pool: &SqlitePool,
    aluno_id: i64,
    turma_id: i64,
) -> AppResult<Option<Favorito>> {
    let favorito = sqlx::query_as::<_, Favorito>(
        "SELECT id, aluno_id, turma_id FROM favoritos WHERE aluno_id = ?1 AND turma_id = ?2",
    )
    .bind(aluno_id)
    .bind(turma_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(favorito)
}

/// Marca uma turma como favorita. Repetir é um no-op (`JaExistia`).
pub async fn favoritar(db_pool: &SqlitePool, aluno_id: i64, turma_id: i64) -> AppResult<FavoritarOutcome> {
    if turma_service::find_turma_by_id(db_pool, turma_id).await?.is_none() {
        return Err(AppError::NotFound("Turma"));
    }

    if let Some(favorito) = find_favorito(db_pool, aluno_id, turma_id).await? {
        tracing::debug!(
            "Aluno {} já tinha a turma {} nos favoritos (favorito {}).",
            favorito.aluno_id,
            favorito.turma_id,
            favorito.id
        );
        return Ok(FavoritarOutcome::JaExistia);
    }

    inserir_favorito(db_pool, aluno_id, turma_id).await
}

/// O INSERT em si; um UNIQUE violado (pedido concorrente) conta como já existente.
async fn inserir_favorito(db_pool: &SqlitePool, aluno_id: i64, turma_id: i64) -> AppResult<FavoritarOutcome> {
    let inserted = sqlx::query("INSERT INTO favoritos (aluno_id, turma_id) VALUES (?1, ?2)")
        .bind(aluno_id)
        .bind(turma_id)
        .execute(db_pool)
        .await
        .map_err(AppError::from);

    match inserted {
        Ok(_) => {
            tracing::info!("⭐ Aluno {} favoritou a turma {}", aluno_id, turma_id);
            Ok(FavoritarOutcome::Criado)
        }
        Err(e) if e.is_unique_violation() => {
            tracing::debug!("Favorito ({}, {}) inserido por outro pedido.", aluno_id, turma_id);
            Ok(FavoritarOutcome::JaExistia)
        }
        Err(e) => Err(e),
    }
}

/// Turmas favoritas de um aluno, paginadas. Sem favoritos devolve uma página vazia.
pub async fn listar_favoritas(db_pool: &SqlitePool, aluno_id: i64, page: i64) -> AppResult<Pagina<Turma>> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favoritos WHERE aluno_id = ?1")
        .bind(aluno_id)
        .fetch_one(db_pool)
        .await?;

    if total == 0 {
        return Ok(Pagina::vazia(page));
    }

    let items = sqlx::query_as::<_, Turma>(
        r#"
        SELECT t.id, t.name, t.professor_id
        FROM favoritos f
        JOIN turmas t ON t.id = f.turma_id
        WHERE f.aluno_id = ?1
        ORDER BY t.id ASC
        LIMIT ?2 OFFSET ?3
        "#,
    )
    .bind(aluno_id)
    .bind(POR_PAGINA)
    .bind(Pagina::<Turma>::offset(page, POR_PAGINA))
    .fetch_all(db_pool)
    .await?;

    Ok(Pagina { items, page, per_page: POR_PAGINA, total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::user::Role,
        services::user_service,
        tests::{seed_professor, test_pool},
    };

    #[tokio::test]
    async fn favoriting_twice_keeps_one_row() {
        let pool = test_pool().await;
        let (_, prof) = seed_professor(&pool, "ana").await;
        let turma = turma_service::criar_turma(&pool, prof.id, "Matemática").await.unwrap();
        let aluno = user_service::create_user(&pool, "bia", "pw", Role::Aluno, 4).await.unwrap();

        assert_eq!(favoritar(&pool, aluno.id, turma.id).await.unwrap(), FavoritarOutcome::Criado);
        assert_eq!(favoritar(&pool, aluno.id, turma.id).await.unwrap(), FavoritarOutcome::JaExistia);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favoritos")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn concurrent_insert_is_reported_as_existing() {
        let pool = test_pool().await;
        let (_, prof) = seed_professor(&pool, "ana").await;
        let turma = turma_service::criar_turma(&pool, prof.id, "Matemática").await.unwrap();
        let aluno = user_service::create_user(&pool, "bia", "pw", Role::Aluno, 4).await.unwrap();

        sqlx::query("INSERT INTO favoritos (aluno_id, turma_id) VALUES (?1, ?2)")
            .bind(aluno.id)
            .bind(turma.id)
            .execute(&pool)
            .await
            .unwrap();

        let outcome = inserir_favorito(&pool, aluno.id, turma.id).await.unwrap();
        assert_eq!(outcome, FavoritarOutcome::JaExistia);
    }

    #[tokio::test]
    async fn favoriting_a_missing_class_is_not_found() {
        let pool = test_pool().await;
        let aluno = user_service::create_user(&pool, "bia", "pw", Role::Aluno, 4).await.unwrap();
        let err = favoritar(&pool, aluno.id, 42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound("Turma")));
    }

    #[tokio::test]
    async fn favorites_resolve_to_classes() {
        let pool = test_pool().await;
        let (_, prof) = seed_professor(&pool, "ana").await;
        let a = turma_service::criar_turma(&pool, prof.id, "A").await.unwrap();
        turma_service::criar_turma(&pool, prof.id, "B").await.unwrap();
        let c = turma_service::criar_turma(&pool, prof.id, "C").await.unwrap();
        let aluno = user_service::create_user(&pool, "bia", "pw", Role::Aluno, 4).await.unwrap();

        let vazia = listar_favoritas(&pool, aluno.id, 1).await.unwrap();
        assert!(vazia.items.is_empty());
        assert_eq!(vazia.total, 0);

        favoritar(&pool, aluno.id, c.id).await.unwrap();
        favoritar(&pool, aluno.id, a.id).await.unwrap();

        let pagina = listar_favoritas(&pool, aluno.id, 1).await.unwrap();
        let names: Vec<_> = pagina.items.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["A", "C"]);
    }
}
