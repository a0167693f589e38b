use std::sync::Arc;

use tracing::{debug, info};

use super::parse::{self, WorkDetail};
use super::query;
use super::transport::{HttpResponse, Transport};
use crate::error::CatalogError;
use crate::state::data::Book;
use crate::state::store::SearchRequest;

/// Issues catalog requests and turns the responses into local records
#[derive(Clone)]
pub struct CatalogClient {
    transport: Arc<dyn Transport>,
}

impl CatalogClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// GET a path and insist on a 200
    async fn get_ok(&self, path: &str) -> Result<HttpResponse, CatalogError> {
        let response = self.transport.get(path).await?;
        if !response.is_ok() {
            return Err(CatalogError::Status { path: path.to_string(), status: response.status });
        }
        Ok(response)
    }

    /// Run one search and merge the favorite/note overlays from the request
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<Book>, CatalogError> {
        let path = query::search_path(&request.params);
        let response = self.get_ok(&path).await?;

        let mut books = parse::parse_search(&path, &response.body)?;
        for book in &mut books {
            book.apply_overlays(&request.favorites, &request.saved_notes);
        }

        info!("📚 Search \"{}\" returned {} books", request.params.query, books.len());
        Ok(books)
    }

    /// Title and author keys of a work
    pub async fn work_detail(&self, key: &str) -> Result<WorkDetail, CatalogError> {
        let path = query::work_path(key);
        let response = self.get_ok(&path).await?;
        parse::parse_work(&path, &response.body)
    }

    /// Display name of an author, `None` if the document has no name
    pub async fn author_name(&self, author_key: &str) -> Result<Option<String>, CatalogError> {
        let path = query::author_path(author_key);
        let response = self.get_ok(&path).await?;
        let name = parse::parse_author_name(&path, &response.body)?;
        if name.is_none() {
            debug!("Author {} has no name", author_key);
        }
        Ok(name)
    }
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient").finish_non_exhaustive()
    }
}
