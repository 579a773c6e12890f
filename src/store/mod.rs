//! The recipe store.
//!
//! Holds the normalized, read-only list of recipes for the lifetime of the
//! process. Datasets are JSON or YAML arrays of raw recipe records; loading
//! normalizes every record and never fails on a malformed entry.

use crate::model::{RawRecipe, RawRecord, Recipe};
use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

const BUNDLED_DATASET: &str = include_str!("../../data/bangladeshi_recipes.json");
const DATASET_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Errors that can occur while loading a dataset.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read dataset file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON dataset: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse YAML dataset: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Unsupported dataset format: {0}")]
    UnsupportedFormat(Utf8PathBuf),

    #[error("Dataset directory does not exist: {0}")]
    DirectoryNotFound(Utf8PathBuf),

    #[error("Failed to read directory: {0}")]
    GlobError(#[from] glob::GlobError),

    #[error("Failed to create glob pattern: {0}")]
    PatternError(#[from] glob::PatternError),

    #[error("Path contains invalid UTF-8: {0}")]
    NonUtf8Path(String),
}

/// Read-only, ordered collection of normalized recipes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeStore {
    recipes: Vec<Recipe>,
}

impl RecipeStore {
    /// Builds a store from already-deserialized raw recipes.
    ///
    /// Ids are assigned from each record's one-indexed position.
    pub fn from_raw(raw: Vec<RawRecipe>) -> Self {
        let mut recipes = Vec::with_capacity(raw.len());
        for (idx, record) in raw.into_iter().enumerate() {
            recipes.push(normalize_record(idx + 1, record));
        }
        RecipeStore { recipes }
    }

    /// Loads a store from a JSON array of recipe records.
    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let records: Vec<RawRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records, 0))
    }

    /// Loads a store from a YAML sequence of recipe records.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, StoreError> {
        let records: Vec<RawRecord> = serde_yaml::from_str(yaml)?;
        Ok(Self::from_records(records, 0))
    }

    /// Loads the dataset compiled into the library.
    pub fn bundled() -> Result<Self, StoreError> {
        Self::from_json_str(BUNDLED_DATASET)
    }

    /// Loads a single dataset file, choosing the parser by extension.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnsupportedFormat` for extensions other than
    /// `json`, `yaml` and `yml`, and I/O or parse errors otherwise.
    pub fn from_path(path: &Utf8Path) -> Result<Self, StoreError> {
        let records = read_records(path)?;
        let store = Self::from_records(records, 0);
        log::info!("Loaded {} recipes from {}", store.len(), path);
        Ok(store)
    }

    /// Loads every dataset file below `dir`.
    ///
    /// Files are discovered recursively, loaded in sorted path order and
    /// concatenated. Ids keep counting across files.
    pub fn from_dir(dir: &Utf8Path) -> Result<Self, StoreError> {
        if !dir.is_dir() {
            return Err(StoreError::DirectoryNotFound(dir.to_path_buf()));
        }

        let mut paths = Vec::new();
        for ext in DATASET_EXTENSIONS {
            let pattern = dir.join(format!("**/*.{ext}"));
            for entry in glob::glob(pattern.as_str())? {
                let path = entry?;
                let path = Utf8PathBuf::from_path_buf(path)
                    .map_err(|p| StoreError::NonUtf8Path(p.display().to_string()))?;
                paths.push(path);
            }
        }
        paths.sort();

        let mut store = RecipeStore::default();
        let mut consumed = 0;
        for path in paths {
            let records = read_records(&path)?;
            let count = records.len();
            store
                .recipes
                .extend(Self::from_records(records, consumed).recipes);
            consumed += count;
        }

        log::info!(
            "Loaded {} recipes from {} records under {}",
            store.len(),
            consumed,
            dir
        );
        Ok(store)
    }

    /// All recipes, in dataset order.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Looks a recipe up by its stable id.
    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Serializes the store back into the dataset format.
    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.recipes)?)
    }

    fn from_records(records: Vec<RawRecord>, offset: usize) -> Self {
        let mut recipes = Vec::with_capacity(records.len());
        for (idx, record) in records.into_iter().enumerate() {
            let position = offset + idx + 1;
            match record {
                RawRecord::Recipe(raw) => recipes.push(normalize_record(position, raw)),
                RawRecord::Invalid(_) => {
                    log::warn!("Skipping dataset record {position}: not a recipe");
                }
            }
        }
        RecipeStore { recipes }
    }
}

fn normalize_record(position: usize, raw: RawRecipe) -> Recipe {
    let (recipe, dropped) = Recipe::from_raw(position.to_string(), raw);
    if dropped > 0 {
        log::warn!(
            "Dropped {} malformed instruction(s) from recipe {} ({})",
            dropped,
            recipe.id,
            recipe.title
        );
    }
    recipe
}

fn read_records(path: &Utf8Path) -> Result<Vec<RawRecord>, StoreError> {
    let format = path
        .extension()
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| StoreError::UnsupportedFormat(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path)?;
    match format.as_str() {
        "json" => Ok(serde_json::from_str(&content)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
        _ => Err(StoreError::UnsupportedFormat(path.to_path_buf())),
    }
}
