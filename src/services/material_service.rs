// src/services/material_service.rs
use crate::{
    error::{AppError, AppResult},
    models::material::Material,
};
use sqlx::{SqliteConnection, SqlitePool};
use std::path::{Path, PathBuf};

/// Reduz o nome enviado pelo browser ao último componente do caminho.
/// Devolve None para nomes vazios ou que são só diretórios ("..", "/").
pub fn nome_de_ficheiro(raw: &str) -> Option<String> {
    // Alguns browsers enviam o caminho completo do Windows
    let raw = raw.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(raw).trim();
    Path::new(raw)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty() && *n != "." && *n != "..")
        .map(str::to_string)
}

fn caminho(upload_folder: &Path, filename: &str) -> PathBuf {
    upload_folder.join(filename)
}

/// Grava o ficheiro na pasta de uploads (sobrescreve se já existir) e cria o registo.
pub async fn salvar_material(
    db_pool: &SqlitePool,
    upload_folder: &Path,
    turma_id: i64,
    filename: &str,
    tipo: Option<&str>,
    bytes: &[u8],
) -> AppResult<Material> {
    let filename = nome_de_ficheiro(filename)
        .ok_or_else(|| AppError::Validation("nome de ficheiro inválido".to_string()))?;

    let destino = caminho(upload_folder, &filename);
    tracing::debug!("Gravando {} bytes em {}", bytes.len(), destino.display());
    tokio::fs::write(&destino, bytes).await?;

    let material = sqlx::query_as::<_, Material>(
        "INSERT INTO materials (filename, tipo, turma_id) VALUES (?1, ?2, ?3) RETURNING id, filename, tipo, turma_id",
    )
    .bind(&filename)
    .bind(tipo)
    .bind(turma_id)
    .fetch_one(db_pool)
    .await?;

    tracing::info!("📎 Material '{}' (id {}) adicionado à turma {}", material.filename, material.id, turma_id);
    Ok(material)
}

pub async fn find_material_by_id(db_pool: &SqlitePool, id: i64) -> AppResult<Option<Material>> {
    let material = sqlx::query_as::<_, Material>(
        "SELECT id, filename, tipo, turma_id FROM materials WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(db_pool)
    .await?;
    Ok(material)
}

pub async fn listar_materiais(db_pool: &SqlitePool, turma_id: i64) -> AppResult<Vec<Material>> {
    let materiais = sqlx::query_as::<_, Material>(
        "SELECT id, filename, tipo, turma_id FROM materials WHERE turma_id = ?1 ORDER BY id ASC",
    )
    .bind(turma_id)
    .fetch_all(db_pool)
    .await?;
    Ok(materiais)
}

/// Outros materiais (além de `excluir_id`) que apontam para este ficheiro.
async fn outras_referencias(
    conn: &mut SqliteConnection,
    filename: &str,
    excluir_id: i64,
) -> AppResult<i64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM materials WHERE filename = ?1 AND id <> ?2")
        .bind(filename)
        .bind(excluir_id)
        .fetch_one(conn)
        .await?;
    Ok(total)
}

/// Edita um material. Campos vazios ficam como estão; um novo nome renomeia
/// também o ficheiro na pasta de uploads.
///
/// Vários materiais podem partilhar o mesmo ficheiro (uploads com o mesmo nome):
/// nesse caso o ficheiro é copiado em vez de movido. Um nome já usado por outro
/// material é recusado com `FileNameTaken`. O registo é atualizado numa transação
/// que só é confirmada depois do passo no disco.
pub async fn editar_material(
    db_pool: &SqlitePool,
    upload_folder: &Path,
    material: &Material,
    novo_nome: Option<&str>,
    tipo: Option<&str>,
) -> AppResult<Material> {
    let novo_nome = match novo_nome.map(str::trim).filter(|n| !n.is_empty()) {
        Some(raw) => Some(
            nome_de_ficheiro(raw)
                .ok_or_else(|| AppError::Validation("nome de ficheiro inválido".to_string()))?,
        ),
        None => None,
    };
    let tipo = tipo.map(str::trim).filter(|t| !t.is_empty());

    let filename = novo_nome.unwrap_or_else(|| material.filename.clone());
    let tipo = tipo.map(str::to_string).or_else(|| material.tipo.clone());
    let renomear = filename != material.filename;

    let mut tx = db_pool.begin().await?;

    if renomear && outras_referencias(&mut tx, &filename, material.id).await? > 0 {
        tracing::warn!("Material {}: '{}' já pertence a outro material.", material.id, filename);
        return Err(AppError::FileNameTaken(filename));
    }

    let atualizado = sqlx::query_as::<_, Material>(
        "UPDATE materials SET filename = ?1, tipo = ?2 WHERE id = ?3 RETURNING id, filename, tipo, turma_id",
    )
    .bind(&filename)
    .bind(&tipo)
    .bind(material.id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AppError::NotFound("Material"))?;

    if renomear {
        let origem = caminho(upload_folder, &material.filename);
        let destino = caminho(upload_folder, &filename);
        let partilhado = outras_referencias(&mut tx, &material.filename, material.id).await? > 0;

        // Se falhar, o Drop da transação desfaz o UPDATE
        if !tokio::fs::try_exists(&origem).await? {
            tracing::warn!("Ficheiro {} não existe, renomeando só o registo.", origem.display());
        } else if partilhado {
            tracing::debug!("{} é partilhado, copiando para {}", origem.display(), destino.display());
            tokio::fs::copy(&origem, &destino).await?;
        } else {
            tokio::fs::rename(&origem, &destino).await?;
        }
    }

    tx.commit().await?;

    tracing::info!(
        "✏️ Material {} da turma {} editado: '{}' ({:?})",
        atualizado.id,
        atualizado.turma_id,
        atualizado.filename,
        atualizado.tipo
    );
    Ok(atualizado)
}
