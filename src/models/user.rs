// src/models/user.rs
use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::FromRow;
use std::{fmt, str::FromStr};

/// Os dois perfis do portal, guardados como TEXT ('professor' / 'aluno').
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Professor,
    Aluno,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Professor => "professor",
            Role::Aluno => "aluno",
        }
    }

    /// Página inicial de cada perfil, destino do login e dos redirects.
    pub fn home(&self) -> &'static str {
        match self {
            Role::Professor => "/professor",
            Role::Aluno => "/aluno",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "professor" => Ok(Role::Professor),
            "aluno" => Ok(Role::Aluno),
            _ => Err(()),
        }
    }
}

// Representa um utilizador lido da tabela 'users'
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, FromRow)]
pub struct Professor {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
}

// Struct para dados do formulário de login
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub role: String,
}
