// src/models/mensagem.rs
use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Mensagem {
    pub id: i64,
    pub remetente_id: i64,
    pub destinatario_id: i64,
    pub conteudo: String,
    pub enviada_em: NaiveDateTime,
}

/// Linha da caixa de entrada, com o username de quem enviou.
#[derive(Debug, Clone, FromRow)]
pub struct MensagemRecebida {
    pub id: i64,
    pub remetente: String,
    pub conteudo: String,
    pub enviada_em: NaiveDateTime,
}

impl MensagemRecebida {
    pub fn enviada_em_formatada(&self) -> String {
        self.enviada_em.format("%d/%m/%Y %H:%M").to_string()
    }
}

#[derive(Debug, Deserialize)]
pub struct EnviarMensagemForm {
    #[serde(default)]
    pub destinatario: String,
    #[serde(default)]
    pub mensagem: String,
}
