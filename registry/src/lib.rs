mod cache;

pub use cache::CacheStats;
pub use cache::UniquenessCache;
