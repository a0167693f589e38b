/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The store shared by the UI and the catalog worker (store.rs)
/// - Favorites and notes files on disk (library.rs)

pub mod data;
pub mod library;
pub mod store;
