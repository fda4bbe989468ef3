mod answer_cache;
mod store;

pub use answer_cache::AnswerCache;
#[cfg(test)]
pub use store::MemoryStore;
#[allow(unused_imports)]
pub use store::{CacheStore, FileStore, PersistenceError};
