//! Request paths for the Open Library endpoints

use crate::state::data::SearchParams;

/// Fields requested from the search endpoint
pub const SEARCH_FIELDS: &str = "key,title,author_name,first_publish_year,edition_count,cover_i,language,subject,want_to_read_count,currently_reading_count,already_read_count";

const WORKS_PREFIX: &str = "/works/";

/// `/search.json?title=<q>&limit=<n>&page=<p>&fields=...`
pub fn search_path(params: &SearchParams) -> String {
    format!(
        "/search.json?{}={}&limit={}&page={}&fields={}",
        params.search_type.param(),
        urlencoding::encode(&params.query),
        params.results_per_page,
        params.current_page,
        SEARCH_FIELDS,
    )
}

/// `/works/<id>.json`, accepting either a bare id or a full work key
pub fn work_path(key: &str) -> String {
    let id = key.strip_prefix(WORKS_PREFIX).unwrap_or(key);
    format!("{}{}.json", WORKS_PREFIX, id)
}

/// Author keys are already paths ("/authors/OL23919A")
pub fn author_path(author_key: &str) -> String {
    format!("{}.json", author_key)
}
