use std::collections::HashMap;

use super::models::CompanyInfo;

/// Session-scoped link → company info map.
///
/// Entries are write-once: once a link is populated it is never replaced, even
/// if the remote metadata changes. Call [`MetadataCache::clear`] to start a new
/// session.
#[derive(Debug, Clone, Default)]
pub struct MetadataCache {
    entries: HashMap<String, CompanyInfo>,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, link: &str) -> Option<&CompanyInfo> {
        self.entries.get(link)
    }

    pub fn contains(&self, link: &str) -> bool {
        self.entries.contains_key(link)
    }

    /// Insert unless `link` is already present. Returns whether it was inserted.
    pub fn insert_if_absent(&mut self, link: String, info: CompanyInfo) -> bool {
        use std::collections::hash_map::Entry;
        match self.entries.entry(link) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(info);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached links in sorted order.
    pub fn links(&self) -> Vec<String> {
        let mut links: Vec<String> = self.entries.keys().cloned().collect();
        links.sort();
        links
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
