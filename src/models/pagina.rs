// src/models/pagina.rs
use serde::Deserialize;

/// Turmas por página nas listagens.
pub const POR_PAGINA: i64 = 5;

/// Uma página de resultados de uma listagem.
#[derive(Debug, Clone)]
pub struct Pagina<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
}

impl<T> Pagina<T> {
    pub fn vazia(page: i64) -> Self {
        Pagina { items: Vec::new(), page, per_page: POR_PAGINA, total: 0 }
    }

    pub fn offset(page: i64, per_page: i64) -> i64 {
        (page.max(1) - 1) * per_page
    }

    pub fn pages(&self) -> i64 {
        if self.per_page <= 0 {
            return 0;
        }
        (self.total + self.per_page - 1) / self.per_page
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages()
    }

    pub fn prev_num(&self) -> i64 {
        (self.page - 1).max(1)
    }

    pub fn next_num(&self) -> i64 {
        self.page + 1
    }
}

/// Query string `?page=N`. Valores ausentes, inválidos ou < 1 valem 1.
#[derive(Debug, Default, Deserialize)]
pub struct PaginaQuery {
    pub page: Option<String>,
}

impl PaginaQuery {
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }
}
