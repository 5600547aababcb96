pub mod providers;
pub mod trending;

pub use providers::{tmdb::TmdbProvider, MovieProvider};
pub use trending::{appwrite::AppwriteStore, TrendingStore};
