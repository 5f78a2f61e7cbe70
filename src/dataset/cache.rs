use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;

#[derive(Debug, Serialize, Deserialize)]
struct CachedPage {
    match_id: u32,
    page: String,
}

/// Raw match pages keyed by match id, kept across runs so a match is only
/// downloaded once.
///
/// Entries are never evicted or replaced: once a page is stored for an id,
/// later inserts for that id are ignored.
#[derive(Debug, Clone, Default)]
pub struct PageCache {
    pages: BTreeMap<u32, String>,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a cache file written by [`PageCache::save`]. A missing file is an
    /// empty cache.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "no stored pages found");
            return Ok(Self::new());
        }
        let mut reader = csv::Reader::from_path(path)?;
        let mut cache = Self::new();
        for entry in reader.deserialize() {
            let CachedPage { match_id, page } = entry?;
            cache.insert(match_id, page);
        }
        info!(path = %path.display(), pages = cache.len(), "loaded stored pages");
        Ok(cache)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = csv::Writer::from_path(path.as_ref())?;
        for (&match_id, page) in &self.pages {
            writer.serialize(CachedPage {
                match_id,
                page: page.clone(),
            })?;
        }
        writer.flush()?;
        debug!(path = %path.as_ref().display(), pages = self.len(), "saved stored pages");
        Ok(())
    }

    pub fn get(&self, match_id: u32) -> Option<&str> {
        self.pages.get(&match_id).map(String::as_str)
    }

    pub fn contains(&self, match_id: u32) -> bool {
        self.pages.contains_key(&match_id)
    }

    /// Store `page` for `match_id` unless a page is already stored. Returns
    /// whether the page was added.
    pub fn insert(&mut self, match_id: u32, page: String) -> bool {
        if self.pages.contains_key(&match_id) {
            return false;
        }
        self.pages.insert(match_id, page);
        true
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
