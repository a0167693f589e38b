//! Presentation state driven by the UI once per event or frame
//!
//! Holds the UI's private state (search box text, note edit buffers, open
//! popup, favorites view cache) and applies user actions to the shared store.
//! Every mutation that touches favorites keeps the favorites list and the
//! `is_favorite` flag of the result list in agreement.

use std::collections::HashMap;

use tracing::info;

use crate::state::data::{Book, Favorites, Note, SavedNotes, SearchType};
use crate::state::store::Store;

/// Which per-book popup is showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Popup {
    Notes(String),
    Details(String),
}

/// Cached contents of the favorites view
#[derive(Debug, Default)]
pub struct FavoritesPanel {
    pub open: bool,
    pub books: Vec<Book>,
    pub loading: bool,
    needs_refresh: bool,
}

/// Inputs for one favorites refresh, copied out of the store
#[derive(Debug, Clone)]
pub struct FavoritesJob {
    pub favorites: Favorites,
    pub books: Vec<Book>,
    pub saved_notes: SavedNotes,
}

#[derive(Debug)]
pub struct Session {
    store: Store,
    search_input: String,
    status: String,
    has_results: bool,
    note_buffers: HashMap<String, String>,
    popup: Option<Popup>,
    favorites: FavoritesPanel,
}

impl Session {
    pub fn new(store: Store) -> Self {
        let status = store.with_data(|data| {
            if data.favorites.is_empty() {
                "Ready.".to_string()
            } else {
                format!("Ready. {} favorites saved.", data.favorites.len())
            }
        });
        Self {
            store,
            search_input: String::new(),
            status,
            has_results: false,
            note_buffers: HashMap::new(),
            popup: None,
            favorites: FavoritesPanel { needs_refresh: true, ..Default::default() },
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    // ========== Search ==========

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn set_search_input(&mut self, text: String) {
        self.search_input = text;
    }

    /// Start a search for the current input from the first page
    pub fn submit_search(&mut self) {
        let query = self.search_input.trim().to_string();
        if query.is_empty() {
            return;
        }
        self.status = format!("Searching for \"{}\"...", query);
        self.store.with_data_mut(|data| {
            data.search.query = query;
            data.search.current_page = 1;
        });
        self.store.request_download();
    }

    pub fn set_search_type(&mut self, search_type: SearchType) {
        self.store.with_data_mut(|data| data.search.search_type = search_type);
    }

    pub fn set_results_per_page(&mut self, value: u32) {
        self.store.with_data_mut(|data| data.search.set_results_per_page(value));
    }

    pub fn next_page(&mut self) {
        self.change_page(|page| page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.change_page(|page| page.saturating_sub(1).max(1));
    }

    /// Re-issue the current search on another page
    fn change_page(&mut self, step: impl FnOnce(u32) -> u32) {
        let changed = self.store.with_data_mut(|data| {
            if data.search.query.is_empty() {
                return false;
            }
            let page = step(data.search.current_page);
            let changed = page != data.search.current_page;
            data.search.current_page = page;
            changed
        });
        if changed {
            self.status = "Loading page...".to_string();
            self.store.request_download();
        }
    }

    /// Per-frame poll of the worker's signal; true when new results arrived
    pub fn tick(&mut self) -> bool {
        if !self.store.take_data_ready() {
            return false;
        }
        let (count, page) = self
            .store
            .with_data(|data| (data.books.len(), data.search.current_page));
        self.has_results = true;
        self.status = format!("Found {} books (page {}).", count, page);
        true
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Books to render; empty until the first search has completed
    pub fn books(&self) -> Vec<Book> {
        if self.has_results {
            self.store.books()
        } else {
            Vec::new()
        }
    }

    // ========== Favorites ==========

    pub fn toggle_favorite(&mut self, key: &str, on: bool) {
        self.store.with_data_mut(|data| {
            if on {
                data.favorites.add(key);
            } else {
                data.favorites.remove(key);
            }
            data.set_book_favorite(key, on);
        });
        self.favorites.needs_refresh = true;
    }

    /// Open the favorites view; returns a refresh job when the cache is stale
    pub fn open_favorites(&mut self) -> Option<FavoritesJob> {
        self.favorites.open = true;
        if !self.favorites.needs_refresh || self.favorites.loading {
            return None;
        }
        self.favorites.loading = true;
        Some(self.store.with_data(|data| FavoritesJob {
            favorites: data.favorites.clone(),
            books: data.books.clone(),
            saved_notes: data.saved_notes.clone(),
        }))
    }

    pub fn apply_resolved_favorites(&mut self, books: Vec<Book>) {
        self.favorites.loading = false;
        if !self.favorites.open {
            return;
        }
        self.favorites.books = books;
        self.favorites.needs_refresh = false;
    }

    /// Remove a favorite from the favorites list, the result list flag and
    /// the view, all at once
    pub fn remove_favorite_from_view(&mut self, key: &str) {
        let removed = self.store.with_data_mut(|data| {
            let removed = data.favorites.remove(key);
            if removed {
                data.set_book_favorite(key, false);
            }
            removed
        });
        if removed {
            self.favorites.books.retain(|book| book.key != key);
            self.favorites.needs_refresh = true;
            info!("Removed favorite {}", key);
        }
    }

    pub fn close_favorites(&mut self) {
        self.favorites.open = false;
        self.favorites.needs_refresh = true;
    }

    pub fn favorites_panel(&self) -> &FavoritesPanel {
        &self.favorites
    }

    // ========== Notes and details ==========

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    /// Open the note editor, seeding its buffer from the book or saved notes
    pub fn open_note(&mut self, key: &str) {
        self.popup = Some(Popup::Notes(key.to_string()));
        if self.note_buffers.contains_key(key) {
            return;
        }
        let text = self.store.with_data_mut(|data| {
            let saved = data.saved_notes.get(key).cloned();
            let book = data.books.iter_mut().find(|b| b.key == key);
            match (book, saved) {
                (Some(book), saved) => {
                    if book.note.is_none() {
                        book.note = saved;
                    }
                    book.note.as_ref().map(|n| n.note.clone())
                }
                (None, saved) => saved.map(|n| n.note),
            }
        });
        self.note_buffers.insert(key.to_string(), text.unwrap_or_default());
    }

    pub fn note_buffer(&self, key: &str) -> &str {
        self.note_buffers.get(key).map(String::as_str).unwrap_or_default()
    }

    /// Store an edit as a freshly dated note, both durably and on the book
    pub fn edit_note(&mut self, key: &str, text: String) {
        let note = Note::now(text.clone());
        self.note_buffers.insert(key.to_string(), text);
        self.store.with_data_mut(|data| {
            if let Some(book) = data.books.iter_mut().find(|b| b.key == key) {
                book.note = Some(note.clone());
            }
            data.saved_notes.insert(key.to_string(), note);
        });
    }

    pub fn open_details(&mut self, key: &str) {
        self.popup = Some(Popup::Details(key.to_string()));
    }

    pub fn close_popup(&mut self) {
        self.popup = None;
    }

    /// Look up a book by key in the current results or the favorites view
    pub fn find_book(&self, key: &str) -> Option<Book> {
        self.store
            .with_data(|data| data.books.iter().find(|b| b.key == key).cloned())
            .or_else(|| self.favorites.books.iter().find(|b| b.key == key).cloned())
    }

    // ========== Shutdown ==========

    pub fn request_exit(&mut self) {
        self.status = "Shutting down...".to_string();
        self.store.request_exit();
    }
}
