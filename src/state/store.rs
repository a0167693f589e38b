//! Shared state between the presentation loop and the catalog worker
//!
//! Signal flags are atomics with a single writer each:
//! - `start_download` and `exit` are raised by the presentation loop
//! - `data_ready` is raised, and `start_download` cleared, by the worker
//!
//! The containers sit behind one mutex. Critical sections are short and a
//! guard is never held across a network request.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use super::data::{Book, Favorites, SavedNotes, SearchParams};

/// Mutable containers guarded by the store lock
#[derive(Debug, Default)]
pub struct StoreData {
    pub search: SearchParams,
    /// Replaced wholesale on every successful fetch
    pub books: Vec<Book>,
    pub favorites: Favorites,
    /// Durable source of truth for notes
    pub saved_notes: SavedNotes,
}

impl StoreData {
    /// Flip the favorite flag of a book in the result list, if present
    pub fn set_book_favorite(&mut self, key: &str, on: bool) {
        if let Some(book) = self.books.iter_mut().find(|b| b.key == key) {
            book.is_favorite = on;
        }
    }
}

/// What the worker copies out of the store before issuing a search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub params: SearchParams,
    pub favorites: Favorites,
    pub saved_notes: SavedNotes,
}

#[derive(Debug, Default)]
pub struct SharedStore {
    exit: AtomicBool,
    start_download: AtomicBool,
    data_ready: AtomicBool,
    data: Mutex<StoreData>,
}

pub type Store = Arc<SharedStore>;

impl SharedStore {
    pub fn new(favorites: Favorites, saved_notes: SavedNotes) -> Store {
        Arc::new(Self {
            data: Mutex::new(StoreData { favorites, saved_notes, ..Default::default() }),
            ..Default::default()
        })
    }

    fn lock(&self) -> MutexGuard<'_, StoreData> {
        // Poisoning only means a holder panicked; the containers are still usable.
        self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run a closure with read access to the containers
    pub fn with_data<R>(&self, f: impl FnOnce(&StoreData) -> R) -> R {
        f(&self.lock())
    }

    /// Run a closure with write access to the containers
    pub fn with_data_mut<R>(&self, f: impl FnOnce(&mut StoreData) -> R) -> R {
        f(&mut self.lock())
    }

    // ========== Signals ==========

    pub fn request_exit(&self) {
        self.exit.store(true, Ordering::Release);
    }

    pub fn exit_requested(&self) -> bool {
        self.exit.load(Ordering::Acquire)
    }

    pub fn request_download(&self) {
        self.start_download.store(true, Ordering::Release);
    }

    pub fn download_requested(&self) -> bool {
        self.start_download.load(Ordering::Acquire)
    }

    /// Clear the download signal so a new search can be issued
    pub fn finish_download(&self) {
        self.start_download.store(false, Ordering::Release);
    }

    /// Poll and clear `data_ready`; called once per frame
    pub fn take_data_ready(&self) -> bool {
        self.data_ready.swap(false, Ordering::AcqRel)
    }

    // ========== Worker side ==========

    /// Copy out the inputs of one search
    pub fn snapshot_request(&self) -> SearchRequest {
        self.with_data(|data| SearchRequest {
            params: data.search.clone(),
            favorites: data.favorites.clone(),
            saved_notes: data.saved_notes.clone(),
        })
    }

    /// Replace the result list and raise `data_ready`.
    ///
    /// Favorite flags and notes are re-derived under the lock, since the
    /// user may have changed them while the request was in flight.
    pub fn publish_results(&self, mut books: Vec<Book>) {
        self.with_data_mut(|data| {
            for book in &mut books {
                book.apply_overlays(&data.favorites, &data.saved_notes);
            }
            data.books = books;
        });
        self.data_ready.store(true, Ordering::Release);
    }

    // ========== Read helpers ==========

    pub fn books(&self) -> Vec<Book> {
        self.with_data(|data| data.books.clone())
    }

    pub fn favorites(&self) -> Favorites {
        self.with_data(|data| data.favorites.clone())
    }

    pub fn saved_notes(&self) -> SavedNotes {
        self.with_data(|data| data.saved_notes.clone())
    }

    pub fn search_params(&self) -> SearchParams {
        self.with_data(|data| data.search.clone())
    }
}
