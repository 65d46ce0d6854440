pub mod favorito;
pub mod material;
pub mod mensagem;
pub mod pagina;
pub mod turma;
pub mod user;
