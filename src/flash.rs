// src/flash.rs
//! Mensagens flash: avisos de uma só leitura guardados numa cookie assinada.
//!
//! Um handler acumula mensagens com [`Flash::success`] / [`Flash::error`] e
//! redireciona; a página seguinte consome-as com [`Flash::take`].

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tower_cookies::{Cookie, Cookies, Key};

const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Warning,
    Error,
}

impl fmt::Display for FlashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FlashKind::Success => "success",
            FlashKind::Warning => "warning",
            FlashKind::Error => "error",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub message: String,
}

/// Extrator com acesso à cookie de flash do pedido atual.
#[derive(Clone)]
pub struct Flash {
    cookies: Cookies,
    key: Key,
}

impl Flash {
    pub fn new(cookies: Cookies, key: Key) -> Self {
        Flash { cookies, key }
    }

    pub fn push(&self, kind: FlashKind, message: impl Into<String>) {
        let mut pending = self.read();
        pending.push(FlashMessage { kind, message: message.into() });

        let json = match serde_json::to_string(&pending) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Falha ao serializar mensagens flash: {:?}", e);
                return;
            }
        };
        // Valores de cookie não aceitam aspas nem vírgulas
        let value = urlencoding::encode(&json).into_owned();
        let cookie = Cookie::build((FLASH_COOKIE, value))
            .path("/")
            .http_only(true)
            .build();
        self.cookies.signed(&self.key).add(cookie);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(FlashKind::Success, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(FlashKind::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(FlashKind::Error, message);
    }

    /// Devolve as mensagens pendentes e apaga a cookie.
    pub fn take(&self) -> Vec<FlashMessage> {
        let messages = self.read();
        if !messages.is_empty() {
            self.cookies
                .signed(&self.key)
                .remove(Cookie::build((FLASH_COOKIE, "")).path("/").build());
        }
        messages
    }

    fn read(&self) -> Vec<FlashMessage> {
        let Some(cookie) = self.cookies.signed(&self.key).get(FLASH_COOKIE) else {
            return Vec::new();
        };
        urlencoding::decode(cookie.value())
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_else(|| {
                tracing::warn!("Cookie de flash ilegível, descartada.");
                Vec::new()
            })
    }
}

impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state).await?;
        Ok(Flash::new(cookies, Key::from_ref(state)))
    }
}
