//! Card catalog loaded from a directory of JSON records.
//!
//! Layout: `CARDS_DIR/<verb>/<card>.json`, plus any `*.json` directly under
//! `CARDS_DIR`. The card id is the file stem.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use conjugation_core::{Severity, TrainingExample};
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Cards directory {path} unreadable: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// All cards, keyed by id.
#[derive(Debug, Default)]
pub struct Catalog {
    cards: BTreeMap<String, TrainingExample>,
}

impl Catalog {
    /// Load every card under `dir`. Files that fail to parse are skipped.
    pub async fn load(dir: &Path) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        let unreadable = |source: std::io::Error| CatalogError::Unreadable {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        let mut entries = fs::read_dir(dir).await.map_err(unreadable)?;
        while let Some(entry) = entries.next_entry().await.map_err(unreadable)? {
            let path = entry.path();
            if path.is_dir() {
                files.extend(json_files(&path).await);
            } else if is_json(&path) {
                files.push(path);
            }
        }
        files.sort();

        for path in files {
            catalog.load_file(&path).await;
        }

        tracing::info!("Loaded {} cards from {}", catalog.len(), dir.display());
        Ok(catalog)
    }

    /// Build a catalog from in-memory records.
    pub fn from_examples(examples: impl IntoIterator<Item = (String, TrainingExample)>) -> Self {
        let mut catalog = Self::default();
        for (id, example) in examples {
            catalog.insert(id, example);
        }
        catalog
    }

    async fn load_file(&mut self, path: &Path) {
        let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
            return;
        };

        let json = match fs::read_to_string(path).await {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "skipping unreadable card");
                return;
            }
        };

        match TrainingExample::from_json(&json) {
            Ok(example) => self.insert(id.to_string(), example),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "skipping malformed card");
            }
        }
    }

    fn insert(&mut self, id: String, example: TrainingExample) {
        if self.cards.contains_key(&id) {
            tracing::warn!(card = %id, "skipping duplicate card id");
            return;
        }
        for issue in example.validate() {
            match issue.severity() {
                Severity::Error => tracing::warn!(card = %id, ?issue, "card failed validation"),
                Severity::Warning => tracing::debug!(card = %id, ?issue, "card validation warning"),
            }
        }
        self.cards.insert(id, example);
    }

    pub fn get(&self, id: &str) -> Option<&TrainingExample> {
        self.cards.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TrainingExample)> {
        self.cards.iter().map(|(id, example)| (id.as_str(), example))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

async fn json_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let Ok(mut entries) = fs::read_dir(dir).await else {
        tracing::warn!(dir = %dir.display(), "skipping unreadable verb directory");
        return files;
    };
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        if path.is_file() && is_json(&path) {
            files.push(path);
        }
    }
    files
}
