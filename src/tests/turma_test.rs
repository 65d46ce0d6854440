// src/tests/turma_test.rs
use super::{body_text, location, seed_professor, TestApp};
use crate::services::{material_service, turma_service};
use axum::http::StatusCode;

#[tokio::test]
async fn class_page_lists_materials_by_name() {
    let mut app = TestApp::new().await;
    let (_, prof) = seed_professor(app.pool(), "ana").await;
    let turma = turma_service::criar_turma(app.pool(), prof.id, "Ciencias Naturais").await.unwrap();
    material_service::salvar_material(app.pool(), app.uploads.path(), turma.id, "celula.pdf", Some("PDF"), b"x")
        .await
        .unwrap();
    app.sign_in("bia", "aluno").await;

    let response = app.get("/turma/Ciencias%20Naturais").await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("Ciencias Naturais"));
    assert!(page.contains("celula.pdf"));
    // Alunos não veem o formulário de edição
    assert!(!page.contains("/editar_material/"));
}

#[tokio::test]
async fn missing_class_redirects_home_with_flash() {
    let mut app = TestApp::new().await;
    app.sign_in("bia", "aluno").await;

    let response = app.get("/turma/Inexistente").await;
    assert_eq!(location(&response), "/aluno");
    let page = body_text(app.get("/aluno").await).await;
    assert!(page.contains("Turma não encontrada."));
}

#[tokio::test]
async fn search_matches_case_insensitively() {
    let mut app = TestApp::new().await;
    let (_, prof) = seed_professor(app.pool(), "ana").await;
    turma_service::criar_turma(app.pool(), prof.id, "Matematica Basica").await.unwrap();
    turma_service::criar_turma(app.pool(), prof.id, "Portugues").await.unwrap();
    app.sign_in("ana2", "professor").await;

    let page = body_text(app.get("/buscar_turmas?nome_turma=MATEM").await).await;
    assert!(page.contains("Matematica Basica"));
    assert!(!page.contains("Portugues"));

    let page = body_text(app.get("/buscar_turmas").await).await;
    assert!(page.contains("Nenhuma turma encontrada."));
}
