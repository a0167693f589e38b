//! Favorites detail resolver
//!
//! Builds the list shown in the favorites view. Favorites already present in
//! the current results are reused; every other key costs one work request
//! plus one request per listed author, issued one after another.

use tracing::{debug, warn};

use super::client::CatalogClient;
use crate::error::CatalogError;
use crate::state::data::{Book, Favorites, SavedNotes};

#[derive(Clone)]
pub struct FavoritesResolver {
    client: CatalogClient,
}

impl FavoritesResolver {
    pub fn new(client: CatalogClient) -> Self {
        Self { client }
    }

    /// Resolve every favorite key into a displayable book.
    ///
    /// A favorite whose work document cannot be fetched or decoded is left
    /// out of this refresh.
    pub async fn resolve(
        &self,
        favorites: &Favorites,
        current_books: &[Book],
        saved_notes: &SavedNotes,
    ) -> Vec<Book> {
        let mut resolved: Vec<Book> = current_books
            .iter()
            .filter(|book| book.is_favorite)
            .cloned()
            .collect();

        for key in favorites.keys() {
            if resolved.iter().any(|book| &book.key == key) {
                continue;
            }

            match self.fetch_favorite(key).await {
                Ok(mut book) => {
                    book.note = saved_notes.get(key).cloned();
                    resolved.push(book);
                }
                Err(e) => warn!("Error loading favorite {}: {}", key, e),
            }
        }

        resolved
    }

    async fn fetch_favorite(&self, key: &str) -> Result<Book, CatalogError> {
        let work = self.client.work_detail(key).await?;

        let mut author_names = Vec::with_capacity(work.author_keys.len());
        for author_key in &work.author_keys {
            match self.client.author_name(author_key).await {
                Ok(Some(name)) => author_names.push(name),
                Ok(None) => {}
                Err(e) => debug!("Skipping author {} of {}: {}", author_key, key, e),
            }
        }

        Ok(Book {
            key: key.to_string(),
            title: work.title,
            author_names,
            is_favorite: true,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::transport::testing::FakeTransport;
    use crate::catalog::transport::HttpResponse;
    use crate::state::data::Note;

    fn resolver(transport: Arc<FakeTransport>) -> FavoritesResolver {
        FavoritesResolver::new(CatalogClient::new(transport))
    }

    fn book(key: &str, is_favorite: bool) -> Book {
        Book { key: key.into(), title: format!("Title of {}", key), is_favorite, ..Default::default() }
    }

    #[tokio::test]
    async fn test_missing_favorite_fetches_work_then_each_author() {
        let transport = Arc::new(
            FakeTransport::new()
                .respond(
                    "/works/OL2W.json",
                    HttpResponse::ok(r#"{"title": "Children of Dune", "authors": [
                        {"author": {"key": "/authors/OL1A"}},
                        {"author": {"key": "/authors/OL2A"}}
                    ]}"#),
                )
                .respond("/authors/OL1A.json", HttpResponse::ok(r#"{"name": "Frank Herbert"}"#))
                .respond("/authors/OL2A.json", HttpResponse::ok(r#"{"name": "Brian Herbert"}"#)),
        );
        let favorites = Favorites::from_keys(["/works/OL1W", "/works/OL2W"]);
        let current = vec![book("/works/OL1W", true), book("/works/OL3W", false)];

        let resolved = resolver(transport.clone()).resolve(&favorites, &current, &SavedNotes::new()).await;

        assert_eq!(
            transport.requests(),
            ["/works/OL2W.json", "/authors/OL1A.json", "/authors/OL2A.json"]
        );
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].key, "/works/OL1W");
        assert_eq!(resolved[1].title, "Children of Dune");
        assert_eq!(resolved[1].author_names, ["Frank Herbert", "Brian Herbert"]);
        assert!(resolved[1].is_favorite);
    }

    #[tokio::test]
    async fn test_no_requests_when_all_favorites_are_present() {
        let transport = Arc::new(FakeTransport::new());
        let favorites = Favorites::from_keys(["/works/OL1W"]);
        let current = vec![book("/works/OL1W", true)];

        let resolved = resolver(transport.clone()).resolve(&favorites, &current, &SavedNotes::new()).await;

        assert!(transport.requests().is_empty());
        assert_eq!(resolved, current);
    }

    #[tokio::test]
    async fn test_failed_work_request_omits_favorite() {
        let transport = Arc::new(
            FakeTransport::new()
                .respond("/works/OL5W.json", HttpResponse { status: 404, body: String::new() })
                .respond("/works/OL6W.json", HttpResponse::ok("garbage"))
                .respond("/works/OL7W.json", HttpResponse::ok(r#"{"title": "Kept"}"#)),
        );
        let favorites = Favorites::from_keys(["/works/OL5W", "/works/OL6W", "/works/OL7W"]);

        let resolved = resolver(transport).resolve(&favorites, &[], &SavedNotes::new()).await;

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].title, "Kept");
        assert!(resolved[0].author_names.is_empty());
    }

    #[tokio::test]
    async fn test_failed_author_request_keeps_work() {
        let transport = Arc::new(
            FakeTransport::new()
                .respond(
                    "/works/OL1W.json",
                    HttpResponse::ok(r#"{"title": "Dune", "authors": [{"author": {"key": "/authors/OL404A"}}]}"#),
                ),
        );
        let favorites = Favorites::from_keys(["/works/OL1W"]);

        let resolved = resolver(transport.clone()).resolve(&favorites, &[], &SavedNotes::new()).await;

        assert_eq!(transport.requests(), ["/works/OL1W.json", "/authors/OL404A.json"]);
        assert_eq!(resolved.len(), 1);
        assert!(resolved[0].author_names.is_empty());
    }

    #[tokio::test]
    async fn test_resolved_favorite_carries_saved_note() {
        let transport = Arc::new(
            FakeTransport::new().respond("/works/OL1W.json", HttpResponse::ok(r#"{"title": "Dune"}"#)),
        );
        let note = Note { note: "reread".into(), date: "2024-01-01".into() };
        let mut notes = SavedNotes::new();
        notes.insert("/works/OL1W".into(), note.clone());

        let resolved = resolver(transport)
            .resolve(&Favorites::from_keys(["/works/OL1W"]), &[], &notes)
            .await;

        assert_eq!(resolved[0].note, Some(note));
    }
}
