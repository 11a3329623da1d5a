use std::{
    collections::{HashMap, HashSet, hash_map::Entry},
    sync::{PoisonError, RwLock},
};

use crate::domain::ingredient::entities::{IngredientKey, IngredientRecord};

pub type IngredientMap = HashMap<IngredientKey, IngredientRecord>;

/// Process-wide ingredient lookup table.
///
/// Reads are concurrent. The only write path is [`KnowledgeBase::insert_if_absent`],
/// which never replaces curated data.
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    entries: RwLock<IngredientMap>,
}

impl KnowledgeBase {
    pub fn new(entries: IngredientMap) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    pub fn get(&self, key: &IngredientKey) -> Option<IngredientRecord> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn contains(&self, key: &IngredientKey) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the current table, so classification never holds the lock.
    pub fn snapshot(&self) -> IngredientMap {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Distinct keys absent from the table, in first-seen order.
    pub fn missing_keys(&self, keys: &[IngredientKey]) -> Vec<IngredientKey> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut seen = HashSet::new();

        keys.iter()
            .filter(|key| !entries.contains_key(*key) && seen.insert(*key))
            .cloned()
            .collect()
    }

    /// Inserts `record` unless `key` is already known. Returns whether it inserted.
    pub fn insert_if_absent(&self, key: IngredientKey, record: IngredientRecord) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        match entries.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }
}

/// Folds `new_entries` into `existing`; a key already in `existing` keeps its record.
pub fn merge(mut existing: IngredientMap, new_entries: IngredientMap) -> IngredientMap {
    for (key, record) in new_entries {
        existing.entry(key).or_insert(record);
    }
    existing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ingredient::entities::RiskLevel;
    use std::sync::Arc;

    fn key(raw: &str) -> IngredientKey {
        IngredientKey::normalize(raw).unwrap()
    }

    fn record(name: &str, risk_level: RiskLevel) -> IngredientRecord {
        IngredientRecord::new(name, risk_level, "", Vec::<String>::new())
    }

    #[test]
    fn test_insert_if_absent_keeps_curated_record() {
        let curated = record("Глицерин", RiskLevel::Low);
        let kb = KnowledgeBase::new(HashMap::from([(key("Glycerin"), curated.clone())]));

        let inserted = kb.insert_if_absent(key("Glycerin"), record("Glycerin", RiskLevel::High));

        assert!(!inserted);
        assert_eq!(kb.get(&key("Glycerin")), Some(curated));
    }

    #[test]
    fn test_insert_if_absent_adds_new_key() {
        let kb = KnowledgeBase::default();

        assert!(kb.insert_if_absent(key("Panthenol"), record("Пантенол", RiskLevel::Low)));
        assert!(kb.contains(&key("Panthenol")));
        assert_eq!(kb.len(), 1);
    }

    #[test]
    fn test_concurrent_inserts_of_same_key_store_one_record() {
        let kb = Arc::new(KnowledgeBase::default());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let kb = Arc::clone(&kb);
                std::thread::spawn(move || {
                    kb.insert_if_absent(key("Niacinamide"), record("Ниацинамид", RiskLevel::Low))
                })
            })
            .collect();

        let inserted = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|inserted| *inserted)
            .count();

        assert_eq!(inserted, 1);
        assert_eq!(kb.len(), 1);
    }

    #[test]
    fn test_merge_first_occurrence_wins() {
        let first = HashMap::from([(key("Aqua"), record("Вода", RiskLevel::Low))]);
        let second = HashMap::from([
            (key("Aqua"), record("Water", RiskLevel::Medium)),
            (key("Glycerin"), record("Глицерин", RiskLevel::Low)),
        ]);

        let merged = merge(first, second);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[&key("Aqua")].display_name, "Вода");
        assert_eq!(merged[&key("Glycerin")].display_name, "Глицерин");
    }

    #[test]
    fn test_missing_keys_are_distinct_and_ordered() {
        let kb = KnowledgeBase::new(HashMap::from([(key("Aqua"), record("Вода", RiskLevel::Low))]));
        let keys = vec![key("Zinc"), key("Aqua"), key("Biotin"), key("Zinc")];

        assert_eq!(kb.missing_keys(&keys), vec![key("Zinc"), key("Biotin")]);
    }
}
