// src/tests/mod.rs
//! Utilitários de teste: base de dados em memória, pasta temporária e um
//! cliente HTTP sobre o router completo (com cookies entre pedidos).

mod auth_test;
mod turma_test;

use crate::{
    config::Config,
    db,
    models::user::{Professor, Role, User},
    services::user_service,
    state::AppState,
    web::routes::create_app,
};
use axum::{
    body::Body,
    http::{
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        Method, Request, StatusCode,
    },
    response::Response,
    Router,
};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::{collections::BTreeMap, str::FromStr};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;
use tower_cookies::Cookie;

const TEST_BCRYPT_COST: u32 = 4;

/// Pool SQLite em memória com as migrações aplicadas.
/// Uma só conexão: a base em memória vive enquanto ela estiver aberta.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    db::run_migrations(&pool).await.unwrap();
    pool
}

pub async fn seed_professor(pool: &SqlitePool, username: &str) -> (User, Professor) {
    let user = user_service::create_user(pool, username, "pw", Role::Professor, TEST_BCRYPT_COST)
        .await
        .unwrap();
    let professor = user_service::find_professor_by_user_id(pool, user.id)
        .await
        .unwrap()
        .unwrap();
    (user, professor)
}

/// Pasta de uploads vazia? (nada foi gravado)
pub fn dir_is_empty(dir: &TempDir) -> bool {
    std::fs::read_dir(dir.path()).unwrap().next().is_none()
}

/// Cliente de teste: guarda as cookies das respostas e reenvia-as, como um browser.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    pub uploads: TempDir,
    cookies: BTreeMap<String, String>,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = test_pool().await;
        let uploads = tempdir().unwrap();
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 1,
            upload_folder: uploads.path().to_path_buf(),
            bind_addr: ([127, 0, 0, 1], 0).into(),
            session_secret: None,
            bcrypt_cost: TEST_BCRYPT_COST,
            max_upload_bytes: 1024 * 1024,
        };
        let state = AppState::new(pool.clone(), config);
        let store = db::create_session_store(&pool).await.unwrap();
        let router = create_app(state.clone(), store);

        TestApp { router, state, uploads, cookies: BTreeMap::new() }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.state.db_pool
    }

    pub fn has_cookie(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    pub async fn send(&mut self, method: Method, uri: &str, content_type: Option<&str>, body: Body) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        if !self.cookies.is_empty() {
            let header = self
                .cookies
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(COOKIE, header);
        }

        let response = self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        self.store_cookies(&response);
        response
    }

    fn store_cookies(&mut self, response: &Response) {
        for value in response.headers().get_all(SET_COOKIE) {
            let cookie = Cookie::parse(value.to_str().unwrap().to_string()).unwrap();
            let expired = cookie.max_age().is_some_and(|age| age.is_zero() || age.is_negative());
            if expired || cookie.value().is_empty() {
                self.cookies.remove(cookie.name());
            } else {
                self.cookies.insert(cookie.name().to_string(), cookie.value().to_string());
            }
        }
    }

    pub async fn get(&mut self, uri: &str) -> Response {
        self.send(Method::GET, uri, None, Body::empty()).await
    }

    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> Response {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        self.send(Method::POST, uri, Some("application/x-www-form-urlencoded"), Body::from(body))
            .await
    }

    pub async fn post_multipart(
        &mut self,
        uri: &str,
        fields: &[(&str, &str)],
        file: Option<(&str, &[u8])>,
    ) -> Response {
        const BOUNDARY: &str = "----portal-escolar-boundary";
        let mut body: Vec<u8> = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((filename, bytes)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let content_type = format!("multipart/form-data; boundary={BOUNDARY}");
        self.send(Method::POST, uri, Some(content_type.as_str()), Body::from(body)).await
    }

    pub async fn register(&mut self, username: &str, password: &str, role: &str) -> Response {
        self.post_form(
            "/register",
            &[
                ("username", username),
                ("password", password),
                ("confirm_password", password),
                ("role", role),
            ],
        )
        .await
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Response {
        self.post_form("/login", &[("username", username), ("password", password)]).await
    }

    /// Regista e faz login; devolve o id do utilizador.
    pub async fn sign_in(&mut self, username: &str, role: &str) -> i64 {
        self.register(username, "pw", role).await;
        let response = self.login(username, "pw").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        user_service::find_user_by_username(self.pool(), username)
            .await
            .unwrap()
            .unwrap()
            .id
    }

    /// Segue para outro utilizador no mesmo "browser".
    pub fn clear_cookies(&mut self) {
        self.cookies.clear();
    }
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
