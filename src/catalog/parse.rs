//! Decoding of Open Library JSON documents into local records

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::CatalogError;
use crate::state::data::Book;

/// One element of the search response's `docs` array
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct SearchDoc {
    key: Option<String>,
    title: Option<String>,
    author_name: Option<Vec<String>>,
    first_publish_year: Option<i32>,
    edition_count: Option<i32>,
    language: Value,
    subject: Value,
    want_to_read_count: Option<i32>,
    currently_reading_count: Option<i32>,
    already_read_count: Option<i32>,
}

impl SearchDoc {
    /// Records without a key or title are not books we can show
    fn into_book(self) -> Option<Book> {
        Some(Book {
            key: self.key?,
            title: self.title?,
            author_names: self.author_name.unwrap_or_default(),
            first_publish_year: self.first_publish_year.unwrap_or_default(),
            edition_count: self.edition_count.unwrap_or_default(),
            is_favorite: false,
            language: join_list(&self.language),
            subject: join_list(&self.subject),
            want_to_read_count: self.want_to_read_count.unwrap_or_default(),
            currently_reading_count: self.currently_reading_count.unwrap_or_default(),
            already_read_count: self.already_read_count.unwrap_or_default(),
            note: None,
        })
    }
}

/// Join the string elements of a JSON array with ", "; anything else is ""
fn join_list(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        _ => String::new(),
    }
}

/// Decode a search response body.
///
/// A body that is not JSON fails the whole response. A missing `docs` array
/// means no results. Individual records that are incomplete or mistyped are
/// skipped.
pub fn parse_search(path: &str, body: &str) -> Result<Vec<Book>, CatalogError> {
    let root: Value = serde_json::from_str(body)
        .map_err(|source| CatalogError::Json { path: path.to_string(), source })?;

    let Some(docs) = root.get("docs").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    let mut books = Vec::with_capacity(docs.len());
    for (index, doc) in docs.iter().enumerate() {
        match SearchDoc::deserialize(doc) {
            Ok(doc) => match doc.into_book() {
                Some(book) => books.push(book),
                None => debug!("Skipping doc {}: missing key or title", index),
            },
            Err(e) => debug!("Skipping doc {}: {}", index, e),
        }
    }

    Ok(books)
}

/// The parts of a work document the favorites view needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkDetail {
    pub title: String,
    /// Author keys in listed order, e.g. "/authors/OL23919A"
    pub author_keys: Vec<String>,
}

pub fn parse_work(path: &str, body: &str) -> Result<WorkDetail, CatalogError> {
    let root: Value = serde_json::from_str(body)
        .map_err(|source| CatalogError::Json { path: path.to_string(), source })?;

    let title = root
        .get("title")
        .and_then(Value::as_str)
        .ok_or_else(|| CatalogError::MissingField { path: path.to_string(), field: "title" })?
        .to_string();

    // "authors": [{"author": {"key": "/authors/..."}, "type": {...}}, ...]
    let author_keys = root
        .get("authors")
        .and_then(Value::as_array)
        .map(|authors| {
            authors
                .iter()
                .filter_map(|entry| entry.get("author")?.get("key")?.as_str())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(WorkDetail { title, author_keys })
}

/// Display name from an author document, if it has one
pub fn parse_author_name(path: &str, body: &str) -> Result<Option<String>, CatalogError> {
    let root: Value = serde_json::from_str(body)
        .map_err(|source| CatalogError::Json { path: path.to_string(), source })?;
    Ok(root.get("name").and_then(Value::as_str).map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_doc_gets_zero_defaults() {
        let books = parse_search("/s", r#"{"docs": [{"key": "/works/OL1W", "title": "Dune"}]}"#).unwrap();
        assert_eq!(books.len(), 1);
        let book = &books[0];
        assert_eq!(book.key, "/works/OL1W");
        assert_eq!(book.title, "Dune");
        assert_eq!(book.first_publish_year, 0);
        assert!(book.author_names.is_empty());
        assert_eq!(book.language, "");
        assert_eq!(book.want_to_read_count, 0);
    }

    #[test]
    fn test_full_doc() {
        let body = r#"{"numFound": 1, "docs": [{
            "key": "/works/OL893415W",
            "title": "Dune",
            "author_name": ["Frank Herbert"],
            "first_publish_year": 1965,
            "edition_count": 92,
            "cover_i": 11481354,
            "language": ["eng", "spa", "eng"],
            "subject": ["Science fiction", "Deserts"],
            "want_to_read_count": 1500,
            "currently_reading_count": 200,
            "already_read_count": 900
        }]}"#;
        let book = parse_search("/s", body).unwrap().remove(0);
        assert_eq!(book.author_names, ["Frank Herbert"]);
        assert_eq!(book.first_publish_year, 1965);
        assert_eq!(book.edition_count, 92);
        assert_eq!(book.language, "eng, spa, eng");
        assert_eq!(book.subject, "Science fiction, Deserts");
        assert_eq!(book.want_to_read_count, 1500);
        assert_eq!(book.currently_reading_count, 200);
        assert_eq!(book.already_read_count, 900);
    }

    #[test]
    fn test_docs_without_key_or_title_are_skipped() {
        let body = r#"{"docs": [
            {"title": "No key"},
            {"key": "/works/OL2W"},
            {"key": null, "title": "Null key"},
            {"key": "/works/OL3W", "title": "Kept"},
            {"key": "/works/OL4W", "title": "Bad year", "first_publish_year": "soon"}
        ]}"#;
        let books = parse_search("/s", body).unwrap();
        let keys: Vec<_> = books.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, ["/works/OL3W"]);
    }

    #[test]
    fn test_missing_docs_is_empty() {
        assert!(parse_search("/s", r#"{"numFound": 0}"#).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_is_error() {
        let err = parse_search("/s", "<html>").unwrap_err();
        assert!(matches!(err, CatalogError::Json { .. }));
    }

    #[test]
    fn test_non_array_language_is_ignored() {
        let books = parse_search("/s", r#"{"docs": [{"key": "k", "title": "t", "language": "eng"}]}"#).unwrap();
        assert_eq!(books[0].language, "");
    }

    #[test]
    fn test_parse_work() {
        let body = r#"{
            "title": "Dune",
            "authors": [
                {"author": {"key": "/authors/OL79034A"}, "type": {"key": "/type/author_role"}},
                {"type": {"key": "/type/author_role"}},
                {"author": {"key": "/authors/OL2A"}}
            ]
        }"#;
        let work = parse_work("/works/OL1W.json", body).unwrap();
        assert_eq!(work.title, "Dune");
        assert_eq!(work.author_keys, ["/authors/OL79034A", "/authors/OL2A"]);
    }

    #[test]
    fn test_work_without_title_is_error() {
        let err = parse_work("/works/OL1W.json", r#"{"authors": []}"#).unwrap_err();
        assert!(matches!(err, CatalogError::MissingField { field: "title", .. }));
    }

    #[test]
    fn test_parse_author_name() {
        assert_eq!(
            parse_author_name("/a.json", r#"{"name": "Frank Herbert"}"#).unwrap(),
            Some("Frank Herbert".to_string())
        );
        assert_eq!(parse_author_name("/a.json", r#"{"key": "/authors/OL1A"}"#).unwrap(), None);
    }
}
