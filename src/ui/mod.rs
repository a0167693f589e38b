/// Widgets for the main window
///
/// - `search.rs` - search bar, paging and results-per-page controls
/// - `results.rs` - the search results table
/// - `popup.rs` - note editor and book details panels
/// - `favorites.rs` - the favorites view

pub mod favorites;
pub mod popup;
pub mod results;
pub mod search;

/// Year column shows a dash when the catalog has no date
pub fn year_label(year: i32) -> String {
    if year > 0 {
        year.to_string()
    } else {
        "-".to_string()
    }
}
