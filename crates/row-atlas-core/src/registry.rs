use crate::model::AssetEntry;

/// Append-only, ordered collection of entries awaiting (or after) packing.
///
/// Keys are not deduplicated; lookups resolve to the first match in the
/// current order.
#[derive(Debug, Default)]
pub(crate) struct AssetRegistry {
    entries: Vec<AssetEntry>,
}

impl AssetRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, entry: AssetEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn find_by_key(&self, key: &str) -> Option<&AssetEntry> {
        self.entries.iter().find(|e| e.key() == key)
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, AssetEntry> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, AssetEntry> {
        self.entries.iter_mut()
    }

    /// Rearranges entries so that position `i` holds the entry previously at `order[i]`.
    /// `order` must be a permutation of `0..len()`.
    pub(crate) fn apply_order(&mut self, order: &[usize]) {
        debug_assert_eq!(order.len(), self.entries.len());
        let mut taken: Vec<Option<AssetEntry>> =
            std::mem::take(&mut self.entries).into_iter().map(Some).collect();
        self.entries = order
            .iter()
            .filter_map(|&i| taken.get_mut(i).and_then(Option::take))
            .collect();
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
