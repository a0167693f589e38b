/// Open Library catalog access
///
/// - `transport.rs` - GET seam and the reqwest implementation
/// - `query.rs` - request paths
/// - `parse.rs` - JSON documents to local records
/// - `client.rs` - search, work and author lookups
/// - `worker.rs` - the long-lived task serving search requests
/// - `favorites.rs` - detail lookups for the favorites view

pub mod client;
pub mod favorites;
pub mod parse;
pub mod query;
pub mod transport;
pub mod worker;

pub use client::CatalogClient;
pub use favorites::FavoritesResolver;
