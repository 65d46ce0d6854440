// src/tests/auth_test.rs
use super::{body_text, count, location, TestApp};
use axum::http::StatusCode;

#[tokio::test]
async fn register_then_login_redirects_by_role() {
    let mut app = TestApp::new().await;

    let response = app.register("ana", "segredo", "professor").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let page = body_text(app.get("/login").await).await;
    assert!(page.contains("Registro concluído! Você pode fazer login agora."));

    let response = app.login("ana", "segredo").await;
    assert_eq!(location(&response), "/professor");
    assert!(app.has_cookie("id"));

    app.clear_cookies();
    app.register("bia", "segredo", "aluno").await;
    let response = app.login("bia", "segredo").await;
    assert_eq!(location(&response), "/aluno");
}

#[tokio::test]
async fn duplicate_username_is_rejected_without_a_second_row() {
    let mut app = TestApp::new().await;
    app.register("ana", "pw1", "aluno").await;

    let response = app.register("ana", "pw2", "professor").await;
    assert_eq!(location(&response), "/register");
    assert_eq!(count(app.pool(), "users").await, 1);
    assert_eq!(count(app.pool(), "professors").await, 0);

    let page = body_text(app.get("/register").await).await;
    assert!(page.contains("Usuário já existe. Escolha outro nome de usuário."));
}

#[tokio::test]
async fn password_confirmation_must_match() {
    let mut app = TestApp::new().await;
    let response = app
        .post_form(
            "/register",
            &[
                ("username", "ana"),
                ("password", "um"),
                ("confirm_password", "dois"),
                ("role", "aluno"),
            ],
        )
        .await;
    assert_eq!(location(&response), "/register");
    assert_eq!(count(app.pool(), "users").await, 0);

    let page = body_text(app.get("/register").await).await;
    assert!(page.contains("As senhas não coincidem!"));
}

#[tokio::test]
async fn unknown_role_is_rejected() {
    let mut app = TestApp::new().await;
    let response = app.register("ana", "pw", "diretor").await;
    assert_eq!(location(&response), "/register");
    assert_eq!(count(app.pool(), "users").await, 0);
}

#[tokio::test]
async fn wrong_password_establishes_no_session() {
    let mut app = TestApp::new().await;
    app.register("ana", "certa", "aluno").await;

    let response = app.login("ana", "errada").await;
    assert_eq!(location(&response), "/login");
    assert!(!app.has_cookie("id"));

    let page = body_text(app.get("/login").await).await;
    assert!(page.contains("Nome de usuário ou senha incorretos."));

    let response = app.get("/aluno").await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn unknown_user_gets_the_same_message() {
    let mut app = TestApp::new().await;
    let response = app.login("fantasma", "pw").await;
    assert_eq!(location(&response), "/login");
    assert!(!app.has_cookie("id"));
}

#[tokio::test]
async fn logged_in_user_skips_the_login_form() {
    let mut app = TestApp::new().await;
    app.sign_in("bia", "aluno").await;

    let response = app.get("/login").await;
    assert_eq!(location(&response), "/aluno");
}

#[tokio::test]
async fn logout_ends_the_session() {
    let mut app = TestApp::new().await;
    app.sign_in("bia", "aluno").await;
    assert_eq!(app.get("/aluno").await.status(), StatusCode::OK);

    let response = app.get("/logout").await;
    assert_eq!(location(&response), "/");

    let response = app.get("/aluno").await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn protected_routes_require_login() {
    let mut app = TestApp::new().await;
    for uri in ["/professor", "/aluno", "/favoritas", "/turma/x", "/buscar_turmas", "/mensagens", "/logout"] {
        let response = app.get(uri).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/login", "{uri}");
    }

    let page = body_text(app.get("/login").await).await;
    assert!(page.contains("Faça login para continuar."));
}

#[tokio::test]
async fn roles_are_enforced_per_route_group() {
    let mut app = TestApp::new().await;
    app.sign_in("bia", "aluno").await;

    let response = app.get("/professor").await;
    assert_eq!(location(&response), "/");
    let response = app.post_form("/professor", &[("class_name", "Intrusa")]).await;
    assert_eq!(location(&response), "/");
    assert_eq!(count(app.pool(), "turmas").await, 0);

    let page = body_text(app.get("/").await).await;
    assert!(page.contains("Acesso negado!"));

    app.clear_cookies();
    app.sign_in("ana", "professor").await;
    for uri in ["/aluno", "/favoritas"] {
        assert_eq!(location(&app.get(uri).await), "/", "{uri}");
    }
    let response = app.post_form("/favoritar/1", &[]).await;
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn flash_is_shown_only_once() {
    let mut app = TestApp::new().await;
    app.login("ninguem", "pw").await;

    let first = body_text(app.get("/login").await).await;
    assert!(first.contains("Nome de usuário ou senha incorretos."));

    let second = body_text(app.get("/login").await).await;
    assert!(!second.contains("Nome de usuário ou senha incorretos."));
}
