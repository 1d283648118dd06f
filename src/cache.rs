use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use sha2::Digest as _;

use crate::content::ParsedContent;
use crate::resume::ResumeParser;

/// SHA-256 of the document text, hex encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentKey(String);

impl ContentKey {
    pub fn of(text: &str) -> Self {
        let mut hasher = sha2::Sha256::new();
        hasher.update(text.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait ContentCache: Send + Sync {
    fn get(&self, key: &ContentKey) -> Option<Arc<ParsedContent>>;
    fn insert(&self, key: ContentKey, content: Arc<ParsedContent>);
    /// Drops the oldest inserted entry and returns its key.
    fn evict_oldest(&self) -> Option<ContentKey>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Holds at most `capacity` entries; inserting into a full cache evicts the
/// oldest entry first.
#[derive(Debug)]
pub struct BoundedContentCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

#[derive(Debug, Default)]
struct CacheInner {
    order: VecDeque<ContentKey>,
    entries: HashMap<ContentKey, Arc<ParsedContent>>,
}

impl BoundedContentCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(CacheInner::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        // Entries are immutable once stored, so a poisoned lock still guards consistent data.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CacheInner {
    fn evict_oldest(&mut self) -> Option<ContentKey> {
        let key = self.order.pop_front()?;
        self.entries.remove(&key);
        Some(key)
    }
}

impl ContentCache for BoundedContentCache {
    fn get(&self, key: &ContentKey) -> Option<Arc<ParsedContent>> {
        self.lock().entries.get(key).cloned()
    }

    fn insert(&self, key: ContentKey, content: Arc<ParsedContent>) {
        let mut inner = self.lock();
        if inner.entries.contains_key(&key) {
            inner.entries.insert(key, content);
            return;
        }
        while inner.entries.len() >= self.capacity {
            if inner.evict_oldest().is_none() {
                break;
            }
        }
        inner.order.push_back(key.clone());
        inner.entries.insert(key, content);
    }

    fn evict_oldest(&self) -> Option<ContentKey> {
        self.lock().evict_oldest()
    }

    fn len(&self) -> usize {
        self.lock().entries.len()
    }
}

/// Parser fronted by a caller-owned cache. Lookup and the parse on a miss run
/// under one lock, so a given content is parsed at most once while cached.
pub struct CachedParser {
    parser: ResumeParser,
    cache: Arc<dyn ContentCache>,
    parse_lock: Mutex<()>,
}

impl CachedParser {
    pub fn new(parser: ResumeParser, cache: Arc<dyn ContentCache>) -> Self {
        Self {
            parser,
            cache,
            parse_lock: Mutex::new(()),
        }
    }

    pub fn cache(&self) -> &Arc<dyn ContentCache> {
        &self.cache
    }

    pub fn parser(&self) -> &ResumeParser {
        &self.parser
    }

    pub fn parse(&self, text: &str) -> Arc<ParsedContent> {
        let key = ContentKey::of(text);
        let _guard = self
            .parse_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(content) = self.cache.get(&key) {
            tracing::debug!(key = %key, "resume cache hit");
            return content;
        }
        tracing::debug!(key = %key, "resume cache miss; parsing");
        let content = Arc::new(self.parser.parse(text));
        self.cache.insert(key, Arc::clone(&content));
        content
    }
}
