// src/services/user_service.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{Professor, Role, User},
    services::auth_service,
};
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "id, username, password_hash, role, created_at";

pub async fn find_user_by_id(db_pool: &SqlitePool, user_id: i64) -> AppResult<Option<User>> {
    tracing::debug!("Buscando utilizador por ID: {}", user_id);
    let user = sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))
        .bind(user_id)
        .fetch_optional(db_pool)
        .await?;
    Ok(user)
}

pub async fn find_user_by_username(db_pool: &SqlitePool, username: &str) -> AppResult<Option<User>> {
    tracing::debug!("Buscando utilizador por username: {}", username);
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = ?1"
    ))
    .bind(username)
    .fetch_optional(db_pool)
    .await?;

    if user.is_some() {
        tracing::debug!("Utilizador '{}' encontrado.", username);
    } else {
        tracing::debug!("Utilizador '{}' não encontrado.", username);
    }
    Ok(user)
}

/// Perfil de professor associado a um utilizador.
pub async fn find_professor_by_user_id(
    db_pool: &SqlitePool,
    user_id: i64,
) -> AppResult<Option<Professor>> {
    let professor = sqlx::query_as::<_, Professor>(
        "SELECT id, user_id, name FROM professors WHERE user_id = ?1",
    )
    .bind(user_id)
    .fetch_optional(db_pool)
    .await?;
    Ok(professor)
}

/// Regista um utilizador. Para professores cria também o perfil em `professors`,
/// na mesma transação.
pub async fn create_user(
    db_pool: &SqlitePool,
    username: &str,
    raw_password: &str,
    role: Role,
    bcrypt_cost: u32,
) -> AppResult<User> {
    tracing::info!("Tentando criar utilizador '{}' ({})", username, role);

    if find_user_by_username(db_pool, username).await?.is_some() {
        tracing::warn!("Falha ao criar user: '{}' já existe.", username);
        return Err(AppError::UsernameTaken(username.to_string()));
    }

    let password_hash = auth_service::hash_password(raw_password, bcrypt_cost).await?;
    insert_user(db_pool, username, &password_hash, role).await
}

/// Os INSERTs do registo, sem a verificação prévia do username.
async fn insert_user(db_pool: &SqlitePool, username: &str, password_hash: &str, role: Role) -> AppResult<User> {
    let mut tx = db_pool.begin().await?;

    let inserted = sqlx::query("INSERT INTO users (username, password_hash, role) VALUES (?1, ?2, ?3)")
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .execute(&mut *tx)
        .await;

    let user_id = match inserted {
        Ok(result) => result.last_insert_rowid(),
        Err(e) => {
            let err = AppError::from(e);
            tx.rollback().await?;
            // Outro pedido registou o mesmo username entre a verificação e o INSERT
            if err.is_unique_violation() {
                tracing::warn!("Falha ao criar user: '{}' já existe (UNIQUE).", username);
                return Err(AppError::UsernameTaken(username.to_string()));
            }
            return Err(err);
        }
    };

    if role == Role::Professor {
        sqlx::query("INSERT INTO professors (user_id, name) VALUES (?1, ?2)")
            .bind(user_id)
            .bind(username)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    let user = find_user_by_id(db_pool, user_id)
        .await?
        .ok_or(AppError::InternalServerError)?;
    tracing::info!(
        "✅ Utilizador '{}' criado com sucesso (id {}, {:?}).",
        user.username,
        user.id,
        user.created_at
    );
    Ok(user)
}
