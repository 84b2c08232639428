//! Text embedders
//!
//! An [`Embedder`] maps free text to a dense vector. Sentence-embedding
//! models plug in behind this trait; [`HashEmbedder`] is a deterministic,
//! dependency-free implementation built from hashed character trigrams and
//! words, and [`CachedEmbedder`] memoises any embedder so the query text is
//! embedded once per ranking batch.

use crate::EmbedError;
use ahash::AHashMap;
use parking_lot::RwLock;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// Default dimension for hashed text embeddings
pub const DEFAULT_EMBEDDING_DIM: usize = 256;

/// Default number of texts kept by [`CachedEmbedder`]
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Maps text to a dense vector
///
/// Implementations must support concurrent read-only inference; the ranker
/// calls `embed` from several threads at once.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError>;

    /// Dimension of every vector this embedder produces
    fn dim(&self) -> usize;
}

impl<E: Embedder + ?Sized> Embedder for std::sync::Arc<E> {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        (**self).embed(text)
    }

    fn dim(&self) -> usize {
        (**self).dim()
    }
}

/// Hash-based text embedder
///
/// Character trigrams and whole words are hashed into a fixed number of
/// buckets and the result is normalized to unit length. Texts sharing many
/// words and word fragments land close together.
#[derive(Debug, Clone, Copy)]
pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_EMBEDDING_DIM)
    }
}

impl Embedder for HashEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let mut vector = vec![0.0f32; self.dim];
        let normalized = text.to_lowercase();

        for trigram in generate_trigrams(&normalized) {
            vector[bucket(&trigram, self.dim)] += 1.0;
        }

        // Words contribute more than fragments
        for word in normalized.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
            vector[bucket(word, self.dim)] += 2.0;
        }

        let magnitude: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for v in &mut vector {
                *v /= magnitude;
            }
        }

        Ok(vector)
    }

    fn dim(&self) -> usize {
        self.dim
    }
}

fn bucket<T: Hash + ?Sized>(value: &T, dim: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    (hasher.finish() as usize) % dim
}

/// Generate character trigrams from a string
fn generate_trigrams(s: &str) -> HashSet<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return HashSet::new();
    }
    let padded = format!("  {trimmed}  ");
    let chars: Vec<char> = padded.chars().collect();

    chars.windows(3).map(|w| w.iter().collect::<String>()).collect()
}

/// Thread-safe memoising wrapper around another embedder
///
/// Holds at most `capacity` texts. When a new text arrives at a full cache
/// the cache is cleared first, so a long-lived embedder keeps caching the
/// texts of recent requests.
pub struct CachedEmbedder<E> {
    inner: E,
    cache: RwLock<AHashMap<String, Vec<f32>>>,
    capacity: usize,
}

impl<E: Embedder> CachedEmbedder<E> {
    pub fn new(inner: E) -> Self {
        Self::with_capacity(inner, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(inner: E, capacity: usize) -> Self {
        Self {
            inner,
            cache: RwLock::new(AHashMap::new()),
            capacity,
        }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Number of texts currently cached
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    pub fn clear(&self) {
        self.cache.write().clear();
    }
}

impl<E: Embedder> Embedder for CachedEmbedder<E> {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        if let Some(hit) = self.cache.read().get(text) {
            return Ok(hit.clone());
        }

        // Failures are not cached so a transient backend error can recover
        let vector = self.inner.embed(text)?;

        if self.capacity == 0 {
            return Ok(vector);
        }
        let mut cache = self.cache.write();
        if cache.len() >= self.capacity && !cache.contains_key(text) {
            tracing::debug!(capacity = self.capacity, "embedding cache full, clearing");
            cache.clear();
        }
        cache.insert(text.to_string(), vector.clone());
        Ok(vector)
    }

    fn dim(&self) -> usize {
        self.inner.dim()
    }
}

impl<E: std::fmt::Debug> std::fmt::Debug for CachedEmbedder<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedEmbedder")
            .field("inner", &self.inner)
            .field("cached", &self.cache.read().len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
