//! 模型发现缓存：按凭证哈希隔离、写入后一天过期的内存缓存。
//!
//! # Discovery Cache
//!
//! Avoids redundant model-list calls. Entries are keyed by the SHA-256 of the
//! caller's credential, live for [`DISCOVERY_CACHE_TTL`] after insertion, and
//! are never evicted explicitly otherwise.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`DiscoveryCache`] | Concurrent key → (payload, inserted_at) store |
//! | [`CacheKey`] | Hashed credential |
//! | [`Clock`] | Time source; [`ManualClock`] makes expiry testable |
//! | [`CacheStats`] | Hit/miss/insert counters |
//!
//! ## Example
//!
//! ```rust
//! use openai_connector::cache::{CacheKey, DiscoveryCache};
//! use openai_connector::Credential;
//! use serde_json::json;
//!
//! let cache = DiscoveryCache::new();
//! let key = CacheKey::from_credential(&Credential::bearer("sk-test"));
//! cache.insert(&key, json!({"data": []}));
//! assert!(cache.get(&key).is_some());
//! ```

mod clock;
mod key;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use key::CacheKey;
pub use store::{CacheStats, DiscoveryCache, DISCOVERY_CACHE_TTL};
