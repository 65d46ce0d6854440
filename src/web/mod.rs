// src/web/mod.rs
pub mod aluno_handlers;
pub mod auth_handlers;
pub mod material_handlers;
pub mod mensagem_handlers;
pub mod mw_auth;
pub mod mw_role;
pub mod professor_handlers;
pub mod routes;
pub mod turma_handlers;
