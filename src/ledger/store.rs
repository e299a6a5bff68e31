use uuid::Uuid;

use crate::domain::LedgerEntry;

/// Ordered entries of the loaded period. Insertion order is display order.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Vec<LedgerEntry>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<LedgerEntry>) -> Self {
        let mut store = Self::new();
        store.replace_all(entries);
        store
    }

    /// Discards the current entries and takes `entries` wholesale.
    pub fn replace_all(&mut self, entries: Vec<LedgerEntry>) {
        self.entries = entries;
    }

    /// Replaces the entry matching `editing_id` in place, or prepends `entry`
    /// under a freshly generated id. Returns the id of the stored entry.
    pub fn upsert(&mut self, mut entry: LedgerEntry, editing_id: Option<&str>) -> String {
        let target = editing_id.and_then(|id| {
            self.entries
                .iter()
                .position(|existing| existing.id == id)
                .map(|position| (position, id.to_string()))
        });
        if let Some((position, id)) = target {
            entry.id = id.clone();
            self.entries[position] = entry;
            return id;
        }
        let id = self.fresh_id();
        entry.id = id.clone();
        self.entries.insert(0, entry);
        id
    }

    /// Removes the entry with `id`; unknown ids leave the store untouched.
    pub fn remove(&mut self, id: &str) -> Option<LedgerEntry> {
        let position = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(position))
    }

    pub fn get(&self, id: &str) -> Option<&LedgerEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn fresh_id(&self) -> String {
        loop {
            let candidate = Uuid::new_v4().simple().to_string();
            if !self.contains(&candidate) {
                return candidate;
            }
        }
    }
}
