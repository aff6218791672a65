use std::collections::HashMap;

/// Maximum number of entries sent to the translator in one call.
pub const CHUNK_SIZE: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub key: String,
    pub value: String,
}

/// Ordered key/value pairs collected during one run.
///
/// Keys are unique. Inserting an existing key replaces its value and keeps
/// its original position.
#[derive(Debug, Clone, Default)]
pub struct ExtractionBatch {
    entries: Vec<BatchEntry>,
    index: HashMap<String, usize>,
}

impl ExtractionBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut batch = Self::new();
        batch.insert(key, value);
        batch
    }

    /// Insert a pair. Returns the value it replaced, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].value, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push(BatchEntry { key, value });
                None
            }
        }
    }

    pub fn extend(&mut self, other: ExtractionBatch) {
        for entry in other.entries {
            self.insert(entry.key, entry.value);
        }
    }

    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Split into chunks of at most `size` entries.
    ///
    /// Keys and values travel together, so chunk `i` of keys and chunk `i` of
    /// values always line up.
    pub fn chunks(&self, size: usize) -> impl Iterator<Item = &[BatchEntry]> {
        self.entries.chunks(size.max(1))
    }
}
