//! Location search suggestions.
//!
//! Holds the geocoding hits for the current query and which one is
//! highlighted for keyboard selection.

use crate::data::snapshot::GeoLocation;

/// Ordered search hits with a highlighted entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SuggestionList {
    items: Vec<GeoLocation>,
    active: Option<usize>,
}

impl SuggestionList {
    /// Create a list highlighting the first hit, if any.
    pub fn new(items: Vec<GeoLocation>) -> Self {
        let active = if items.is_empty() { None } else { Some(0) };
        Self { items, active }
    }

    /// All hits, in provider order.
    pub fn items(&self) -> &[GeoLocation] {
        &self.items
    }

    /// Number of hits.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if there are no hits.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the highlighted hit.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// The highlighted hit.
    pub fn active(&self) -> Option<&GeoLocation> {
        self.active.and_then(|i| self.items.get(i))
    }

    /// Move the highlight down, wrapping to the top.
    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let len = self.items.len();
        self.active = Some(self.active.map_or(0, |i| (i + 1) % len));
    }

    /// Move the highlight up, wrapping to the bottom.
    pub fn select_previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let len = self.items.len();
        self.active = Some(self.active.map_or(len - 1, |i| (i + len - 1) % len));
    }

    /// Drop all hits.
    pub fn clear(&mut self) {
        self.items.clear();
        self.active = None;
    }
}
