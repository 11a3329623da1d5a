use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use crate::domain::{
    common::entities::app_errors::CoreError,
    ingredient::{
        entities::{IngredientKey, IngredientRecord},
        knowledge_base::{IngredientMap, merge},
        ports::KnowledgeBaseSource,
    },
};

/// UTF-8 JSON object mapping ingredient keys to records.
#[derive(Debug, Clone)]
pub struct JsonDatasetSource {
    path: PathBuf,
}

impl JsonDatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl KnowledgeBaseSource for JsonDatasetSource {
    fn load(&self) -> Result<IngredientMap, CoreError> {
        let entries = read_dataset(&self.path)?;
        info!(path = %self.path.display(), entries = entries.len(), "knowledge base loaded");
        Ok(entries)
    }
}

fn read_dataset(path: &Path) -> Result<IngredientMap, CoreError> {
    let content = fs::read_to_string(path).map_err(|e| {
        CoreError::KnowledgeBaseLoad(format!("failed to read {}: {}", path.display(), e))
    })?;

    parse_dataset(&content)
        .map_err(|e| CoreError::KnowledgeBaseLoad(format!("{}: {}", path.display(), e)))
}

/// Parses a dataset, re-normalizing every key.
///
/// Keys are visited in sorted order, so spelling variants of one ingredient
/// inside a single file resolve deterministically to the first one.
fn parse_dataset(content: &str) -> Result<IngredientMap, String> {
    let raw: BTreeMap<String, IngredientRecord> =
        serde_json::from_str(content).map_err(|e| format!("malformed dataset: {e}"))?;

    let mut entries = IngredientMap::with_capacity(raw.len());
    for (raw_key, record) in raw {
        let key = IngredientKey::normalize(&raw_key)
            .ok_or_else(|| format!("key '{raw_key}' has no ingredient characters"))?;

        if entries.contains_key(&key) {
            warn!(raw_key = %raw_key, key = %key, "duplicate spelling in dataset ignored");
            continue;
        }
        entries.insert(key, record);
    }

    Ok(entries)
}

#[derive(Debug, Clone)]
pub struct AssembledDataset {
    pub entries: IngredientMap,
    /// Keys dropped because an earlier source already defined them.
    pub duplicates: usize,
}

/// Merges dataset shards in the given order; the first source defining a key wins.
pub fn assemble(sources: &[PathBuf]) -> Result<AssembledDataset, CoreError> {
    let mut entries = IngredientMap::new();
    let mut duplicates = 0;

    for source in sources {
        let shard = read_dataset(source)?;
        let before = entries.len();
        let shard_len = shard.len();

        entries = merge(entries, shard);
        duplicates += before + shard_len - entries.len();

        info!(source = %source.display(), entries = shard_len, "dataset shard merged");
    }

    Ok(AssembledDataset {
        entries,
        duplicates,
    })
}

/// Writes `entries` as pretty-printed JSON with sorted keys.
pub fn write_dataset(path: &Path, entries: &IngredientMap) -> Result<(), CoreError> {
    let sorted: BTreeMap<&str, &IngredientRecord> = entries
        .iter()
        .map(|(key, record)| (key.as_str(), record))
        .collect();

    let json = serde_json::to_string_pretty(&sorted)
        .map_err(|e| CoreError::Invalid(format!("failed to serialize dataset: {e}")))?;

    fs::write(path, json).map_err(|e| {
        CoreError::Invalid(format!("failed to write {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ingredient::entities::RiskLevel;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn key(raw: &str) -> IngredientKey {
        IngredientKey::normalize(raw).unwrap()
    }

    #[test]
    fn test_load_dataset_normalizes_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "db.json",
            r#"{
                "SODIUM_LAURETH_SULFATE": {"name_ru": "Лауретсульфат натрия", "risk_level": "high", "notes": "ПАВ", "bad_for": ["сухие волосы"]},
                "Cetearyl Alcohol": {"name_ru": "Цетеариловый спирт", "risk_level": "low", "notes": "Эмолент", "bad_for": []}
            }"#,
        );

        let entries = JsonDatasetSource::new(&path).load().unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[&key("Sodium Laureth Sulfate")].risk_level, RiskLevel::High);
        assert!(entries.contains_key(&key("CETEARYL_ALCOHOL")));
    }

    #[test]
    fn test_missing_file_is_load_failure() {
        let err = JsonDatasetSource::new("/nonexistent/ingredients_db.json")
            .load()
            .unwrap_err();

        assert!(matches!(err, CoreError::KnowledgeBaseLoad(_)));
    }

    #[test]
    fn test_malformed_file_is_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "db.json", r#"{"AQUA": {"name_ru": "Вода"}}"#);

        let err = JsonDatasetSource::new(&path).load().unwrap_err();

        assert!(matches!(err, CoreError::KnowledgeBaseLoad(_)));
    }

    #[test]
    fn test_assemble_respects_source_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = write(
            dir.path(),
            "part1.json",
            r#"{"AQUA": {"name_ru": "Вода", "risk_level": "low"}}"#,
        );
        let second = write(
            dir.path(),
            "part2.json",
            r#"{
                "AQUA": {"name_ru": "Вода (дубль)", "risk_level": "medium"},
                "GLYCERIN": {"name_ru": "Глицерин", "risk_level": "low"}
            }"#,
        );

        let assembled = assemble(&[first.clone(), second.clone()]).unwrap();
        assert_eq!(assembled.entries.len(), 2);
        assert_eq!(assembled.duplicates, 1);
        assert_eq!(assembled.entries[&key("Aqua")].display_name, "Вода");

        let reversed = assemble(&[second, first]).unwrap();
        assert_eq!(reversed.entries[&key("Aqua")].display_name, "Вода (дубль)");
    }

    #[test]
    fn test_written_dataset_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let source = write(
            dir.path(),
            "part1.json",
            r#"{"Glycerin": {"name_ru": "Глицерин", "risk_level": "low", "notes": "Увлажнитель"}}"#,
        );
        let output = dir.path().join("ingredients_db.json");

        let assembled = assemble(&[source]).unwrap();
        write_dataset(&output, &assembled.entries).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains("\"GLYCERIN\""));
        assert!(content.contains("\"name_ru\""));
        assert_eq!(JsonDatasetSource::new(&output).load().unwrap(), assembled.entries);
    }
}
