pub mod auth_service;
pub mod favorito_service;
pub mod material_service;
pub mod mensagem_service;
pub mod turma_service;
pub mod user_service;
