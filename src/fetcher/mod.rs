//! Recipe lookup by name.
//!
//! This module provides the best-effort title lookup used to start a
//! cooking session, and the error taxonomy every lookup failure is
//! reported through.

use crate::config::Locale;
use crate::store::{RecipeStore, StoreError};
use crate::Recipe;
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Reasons a lookup can fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Query is blank")]
    InvalidInput,

    #[error("No recipe found for \"{query}\"")]
    NotFound { query: String },

    #[error("Recipe found for \"{query}\" is incomplete")]
    IncompleteRecipe { query: String },

    #[error("Unexpected fault during lookup: {0}")]
    UnexpectedFault(String),
}

impl From<StoreError> for LookupError {
    fn from(e: StoreError) -> Self {
        LookupError::UnexpectedFault(e.to_string())
    }
}

impl LookupError {
    /// Human-readable message for the person at the stove.
    pub fn user_message(&self, locale: Locale) -> String {
        match (self, locale) {
            (LookupError::InvalidInput, Locale::Bengali) => {
                "অনুগ্রহ করে একটি রেসিপির নাম লিখুন।".to_string()
            }
            (LookupError::InvalidInput, Locale::English) => {
                "Please enter a recipe name.".to_string()
            }
            (LookupError::NotFound { query }, Locale::Bengali) => format!(
                "\"{query}\" এর জন্য একটি রেসিপি খুঁজে পাওয়া যায়নি। অনুগ্রহ করে রেসিপি তালিকায় এটি অনুসন্ধান করার চেষ্টা করুন।"
            ),
            (LookupError::NotFound { query }, Locale::English) => format!(
                "Could not find a recipe for \"{query}\". Try searching for it in the recipe list."
            ),
            (LookupError::IncompleteRecipe { query }, Locale::Bengali) => format!(
                "\"{query}\" এর জন্য একটি সম্পূর্ণ রেসিপি খুঁজে পাওয়া যায়নি। অনুগ্রহ করে অন্য একটি চেষ্টা করুন।"
            ),
            (LookupError::IncompleteRecipe { query }, Locale::English) => format!(
                "Could not find a complete recipe for \"{query}\". Please try another one."
            ),
            (LookupError::UnexpectedFault(_), Locale::Bengali) => {
                "একটি অপ্রত্যাশিত ত্রুটি ঘটেছে। অনুগ্রহ করে পরে আবার চেষ্টা করুন।".to_string()
            }
            (LookupError::UnexpectedFault(_), Locale::English) => {
                "An unexpected error occurred. Please try again later.".to_string()
            }
        }
    }
}

/// Returns the first recipe whose title contains `query`, ignoring case.
///
/// Surrounding whitespace in the query is ignored.
///
/// # Errors
///
/// - `LookupError::InvalidInput` if the query is blank
/// - `LookupError::NotFound` if no title matches
/// - `LookupError::IncompleteRecipe` if the first match has no ingredients
///   or no instructions
pub fn find_by_name<'a>(store: &'a RecipeStore, query: &str) -> Result<&'a Recipe, LookupError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(LookupError::InvalidInput);
    }

    let query_lower = query.to_lowercase();
    let recipe = store
        .recipes()
        .iter()
        .find(|recipe| recipe.title.to_lowercase().contains(&query_lower))
        .ok_or_else(|| LookupError::NotFound {
            query: query.to_string(),
        })?;

    if !recipe.is_complete() {
        return Err(LookupError::IncompleteRecipe {
            query: query.to_string(),
        });
    }

    Ok(recipe)
}

/// Loads a dataset file and looks a recipe up in it.
///
/// Any failure to load the dataset is reported as
/// `LookupError::UnexpectedFault`.
///
/// # Examples
///
/// ```no_run
/// use recipe_guide::get_recipe;
/// use camino::Utf8Path;
///
/// let recipe = get_recipe(Utf8Path::new("recipes.json"), "কাচ্চি")?;
/// println!("{}", recipe.title);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn get_recipe(dataset: &Utf8Path, query: &str) -> Result<Recipe, LookupError> {
    let store = RecipeStore::from_path(dataset)?;
    find_by_name(&store, query).cloned()
}

/// Something a cooking session can look recipes up in.
pub trait RecipeLookup {
    fn lookup(&self, query: &str) -> Result<Recipe, LookupError>;
}

impl RecipeLookup for RecipeStore {
    fn lookup(&self, query: &str) -> Result<Recipe, LookupError> {
        find_by_name(self, query).cloned()
    }
}

impl<T: RecipeLookup + ?Sized> RecipeLookup for &T {
    fn lookup(&self, query: &str) -> Result<Recipe, LookupError> {
        (**self).lookup(query)
    }
}

impl<T: RecipeLookup + ?Sized> RecipeLookup for Arc<T> {
    fn lookup(&self, query: &str) -> Result<Recipe, LookupError> {
        (**self).lookup(query)
    }
}

/// A dataset file that is re-read on every lookup.
///
/// Edits to the file show up in the next lookup without a restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFile(pub Utf8PathBuf);

impl RecipeLookup for DatasetFile {
    fn lookup(&self, query: &str) -> Result<Recipe, LookupError> {
        get_recipe(&self.0, query)
    }
}
