// src/services/mensagem_service.rs
use crate::{
    error::{AppError, AppResult},
    models::mensagem::{Mensagem, MensagemRecebida},
    services::user_service,
};
use sqlx::SqlitePool;

/// Entrega uma mensagem a outro utilizador, identificado pelo username.
pub async fn enviar_mensagem(
    db_pool: &SqlitePool,
    remetente_id: i64,
    destinatario: &str,
    conteudo: &str,
) -> AppResult<Mensagem> {
    let conteudo = conteudo.trim();
    if conteudo.is_empty() {
        return Err(AppError::Validation("mensagem vazia".to_string()));
    }

    let destinatario = user_service::find_user_by_username(db_pool, destinatario.trim())
        .await?
        .ok_or(AppError::NotFound("Destinatário"))?;

    let mensagem = sqlx::query_as::<_, Mensagem>(
        r#"
        INSERT INTO mensagens (remetente_id, destinatario_id, conteudo)
        VALUES (?1, ?2, ?3)
        RETURNING id, remetente_id, destinatario_id, conteudo, enviada_em
        "#,
    )
    .bind(remetente_id)
    .bind(destinatario.id)
    .bind(conteudo)
    .fetch_one(db_pool)
    .await?;

    tracing::info!(
        "✉️ Mensagem {} de {} para {} ('{}') em {}",
        mensagem.id,
        mensagem.remetente_id,
        mensagem.destinatario_id,
        destinatario.username,
        mensagem.enviada_em
    );
    Ok(mensagem)
}

/// Caixa de entrada, mais recentes primeiro.
pub async fn listar_recebidas(db_pool: &SqlitePool, user_id: i64) -> AppResult<Vec<MensagemRecebida>> {
    let mensagens = sqlx::query_as::<_, MensagemRecebida>(
        r#"
        SELECT m.id, u.username AS remetente, m.conteudo, m.enviada_em
        FROM mensagens m
        JOIN users u ON u.id = m.remetente_id
        WHERE m.destinatario_id = ?1
        ORDER BY m.enviada_em DESC, m.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db_pool)
    .await?;
    Ok(mensagens)
}
