use crate::shared::response::{JsonApiLinks, JsonApiMeta};
use axum::http::Uri;
use serde::Deserialize;
use utoipa::ToSchema;

/// `page[number]` / `page[size]` query parameters
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PageParams {
    #[serde(default = "default_page_number")]
    pub number: i64,
    #[serde(default = "default_page_size")]
    pub size: i64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            number: default_page_number(),
            size: default_page_size(),
        }
    }
}

fn default_page_number() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

impl PageParams {
    /// Clamp to sane bounds: page >= 1, 1 <= size <= 100
    pub fn normalized(&self) -> Self {
        Self {
            number: self.number.max(1),
            size: self.size.clamp(1, 100),
        }
    }

    pub fn limit(&self) -> i64 {
        self.normalized().size
    }

    pub fn offset(&self) -> i64 {
        let page = self.normalized();
        (page.number - 1).saturating_mul(page.size)
    }

    pub fn meta(&self, total: i64) -> JsonApiMeta {
        let page = self.normalized();
        JsonApiMeta {
            total,
            page: page.number,
            per_page: page.size,
        }
    }
}

/// Pagination link builder that generates JSON:API compliant pagination links
pub struct PaginationLinkBuilder {
    base_url: String,
    page_number: i64,
    page_size: i64,
    total_pages: i64,
}

impl PaginationLinkBuilder {
    /// Create a new pagination link builder from a URI
    /// Automatically extracts the path from the URI
    pub fn from_uri(uri: &Uri, page_number: i64, page_size: i64, total: i64) -> Self {
        Self::new(uri.path(), page_number, page_size, total)
    }

    pub fn new(base_url: impl Into<String>, page_number: i64, page_size: i64, total: i64) -> Self {
        let total_pages = if total > 0 {
            (total - 1) / page_size.max(1) + 1
        } else {
            0
        };

        Self {
            base_url: base_url.into(),
            page_number,
            page_size,
            total_pages,
        }
    }

    pub fn build(self) -> JsonApiLinks {
        let mut links = JsonApiLinks::new()
            .with_self(self.page_link(self.page_number))
            .with_first(self.page_link(1));

        if self.total_pages > 0 {
            links = links.with_last(self.page_link(self.total_pages));
        }

        if self.page_number > 1 {
            links = links.with_prev(self.page_link(self.page_number.saturating_sub(1)));
        }

        if self.page_number < self.total_pages {
            links = links.with_next(self.page_link(self.page_number.saturating_add(1)));
        }

        links
    }

    fn page_link(&self, page: i64) -> String {
        format!(
            "{}?page[number]={}&page[size]={}",
            self.base_url, page, self.page_size
        )
    }
}
