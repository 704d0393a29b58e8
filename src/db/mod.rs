mod cache;
mod schema;

pub use cache::ContentCache;
