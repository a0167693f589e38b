//! Shared data structures for the application state
//!
//! These structs represent the data model that flows between
//! the catalog layer, the persistence layer and the UI layer.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_RESULTS_PER_PAGE, MAX_RESULTS_PER_PAGE, MIN_RESULTS_PER_PAGE};

/// A user's note on a book
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Note {
    /// Free text content
    pub note: String,
    /// When the note was last written, e.g. "Sat Oct 18 14:02:11 2026"
    pub date: String,
}

impl Note {
    /// Create a note stamped with the current local time
    pub fn now(text: impl Into<String>) -> Self {
        Self {
            note: text.into(),
            date: Local::now().format("%a %b %e %H:%M:%S %Y").to_string(),
        }
    }
}

/// Durable notes, keyed by catalog key
pub type SavedNotes = BTreeMap<String, Note>;

/// A single book as shown in the result table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Book {
    /// Catalog key, e.g. "/works/OL45804W"
    pub key: String,
    pub title: String,
    pub author_names: Vec<String>,
    /// 0 when unknown
    pub first_publish_year: i32,
    pub edition_count: i32,
    /// Derived from the favorites list, never persisted on the book
    pub is_favorite: bool,
    /// Languages joined with ", "
    pub language: String,
    /// Subjects joined with ", "
    pub subject: String,
    pub want_to_read_count: i32,
    pub currently_reading_count: i32,
    pub already_read_count: i32,
    /// Transient copy of the saved note for this key
    pub note: Option<Note>,
}

impl Book {
    /// Re-derive the favorite flag and note overlay from the durable stores
    pub fn apply_overlays(&mut self, favorites: &Favorites, notes: &SavedNotes) {
        self.is_favorite = favorites.contains(&self.key);
        self.note = notes.get(&self.key).cloned();
    }

    /// First listed author, if any
    pub fn primary_author(&self) -> Option<&str> {
        self.author_names.first().map(String::as_str)
    }
}

/// Which catalog field the query text is matched against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SearchType {
    #[default]
    Title,
    Author,
}

impl SearchType {
    pub const ALL: [SearchType; 2] = [SearchType::Title, SearchType::Author];

    /// Query parameter name used by the search endpoint
    pub fn param(self) -> &'static str {
        match self {
            SearchType::Title => "title",
            SearchType::Author => "author",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchType::Title => write!(f, "Title"),
            SearchType::Author => write!(f, "Author"),
        }
    }
}

/// Everything the catalog client needs to build a search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub search_type: SearchType,
    pub results_per_page: u32,
    pub current_page: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: String::new(),
            search_type: SearchType::Title,
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
            current_page: 1,
        }
    }
}

impl SearchParams {
    pub fn set_results_per_page(&mut self, value: u32) {
        self.results_per_page = value.clamp(MIN_RESULTS_PER_PAGE, MAX_RESULTS_PER_PAGE);
    }
}

/// Favorite keys in insertion order, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    keys: Vec<String>,
}

impl Favorites {
    /// Build from persisted keys, dropping blanks and repeats
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut favorites = Self::default();
        for key in keys {
            let key = key.into();
            if !key.is_empty() {
                favorites.add(key);
            }
        }
        favorites
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Append a key; returns false if it was already present
    pub fn add(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        if self.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Remove a key; returns false if it was not present
    pub fn remove(&mut self, key: &str) -> bool {
        match self.keys.iter().position(|k| k == key) {
            Some(index) => {
                self.keys.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
