//! The prompt catalog maps assistant names to system prompt text. It
//! is loaded once at startup from a JSON object and read-only after
//! that; the keys become the selectable assistant list.
use std::fs;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Default)]
pub struct PromptCatalog {
    entries: Vec<(String, String)>,
}

impl PromptCatalog {
    /// Loads the catalog from a JSON file. A missing or malformed file
    /// is an error since the assistant list can't be populated.
    pub fn load(path: &str) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read prompt file {}", path))?;
        Self::from_json(&raw).with_context(|| format!("Invalid prompt file {}", path))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        // serde_json's preserve_order feature keeps the file's key
        // order so the assistant list renders the way it was written
        let map: Map<String, Value> = serde_json::from_str(raw)?;
        let mut entries = Vec::with_capacity(map.len());
        for (name, value) in map {
            let Value::String(text) = value else {
                bail!("Prompt for {:?} must be a string", name);
            };
            entries.push((name, text));
        }
        Ok(Self { entries })
    }

    /// The selectable assistant names, in file order.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, text)| text.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_from_json_preserves_file_order() {
        let catalog = PromptCatalog::from_json(
            r#"{"Translator": "Translate.", "Coach": "Encourage.", "Archivist": "Cite sources."}"#,
        )
        .unwrap();
        assert_eq!(catalog.names(), vec!["Translator", "Coach", "Archivist"]);
    }

    #[test]
    fn test_get_returns_the_prompt_text() {
        let catalog = PromptCatalog::from_json(r#"{"Translator": "Translate."}"#).unwrap();
        assert_eq!(catalog.get("Translator"), Some("Translate."));
        assert_eq!(catalog.get("Pirate"), None);
    }

    #[test]
    fn test_from_json_rejects_non_string_prompts() {
        let result = PromptCatalog::from_json(r#"{"Translator": 42}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_json_rejects_malformed_json() {
        assert!(PromptCatalog::from_json("not json").is_err());
    }

    #[test]
    fn test_load_errors_on_missing_file() {
        let result = PromptCatalog::load("/nonexistent/prompt.json");
        assert!(result.unwrap_err().to_string().contains("prompt file"));
    }

    #[test]
    fn test_load_reads_a_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"Translator": "Translate."}"#).unwrap();

        let catalog = PromptCatalog::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(catalog.names(), vec!["Translator"]);
    }
}
