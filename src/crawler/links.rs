use std::collections::HashSet;

/// The detail-page URLs discovered during one query's pagination walk
///
/// Insertion-ordered and deduplicated by exact string equality; listing
/// pages repeat links across loads, and a link must be processed once. The
/// set is append-only during the walk and consumed by value by the detail
/// pipeline.
#[derive(Debug, Default)]
pub struct LinkSet {
    links: Vec<String>,
    seen: HashSet<String>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a URL; returns false (and keeps the set unchanged) if the
    /// exact URL is already present
    pub fn insert(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.seen.contains(&url) {
            return false;
        }
        self.seen.insert(url.clone());
        self.links.push(url);
        true
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.links.iter().map(String::as_str)
    }
}

impl IntoIterator for LinkSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.into_iter()
    }
}
