//! UniFFI bindings for cross-platform support (iOS, Android).
//!
//! This module provides FFI-safe types and functions for use with UniFFI.
//! Complex types are converted to simpler representations suitable for FFI.

use crate::config::Locale;
use crate::fetcher::{find_by_name, LookupError};
use crate::search::{list_all, search, RecipeSummary};
use crate::session::{CookingGuide, Phase, SessionSnapshot};
use crate::store::{RecipeStore, StoreError};
use crate::timer::{format_countdown as format_countdown_internal, parse_duration_seconds, TimerState};
use crate::{Recipe, Step};
use camino::Utf8Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum GuideError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Recipe not found: {message}")]
    NotFound { message: String },

    #[error("Incomplete recipe: {message}")]
    IncompleteRecipe { message: String },

    #[error("Dataset error: {message}")]
    DatasetError { message: String },
}

impl From<StoreError> for GuideError {
    fn from(e: StoreError) -> Self {
        GuideError::DatasetError {
            message: e.to_string(),
        }
    }
}

impl From<LookupError> for GuideError {
    fn from(e: LookupError) -> Self {
        let message = e.to_string();
        match e {
            LookupError::InvalidInput => GuideError::InvalidInput { message },
            LookupError::NotFound { .. } => GuideError::NotFound { message },
            LookupError::IncompleteRecipe { .. } => GuideError::IncompleteRecipe { message },
            LookupError::UnexpectedFault(_) => GuideError::DatasetError { message },
        }
    }
}

/// Language for user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiLocale {
    Bengali,
    English,
}

impl From<FfiLocale> for Locale {
    fn from(l: FfiLocale) -> Self {
        match l {
            FfiLocale::Bengali => Locale::Bengali,
            FfiLocale::English => Locale::English,
        }
    }
}

/// Session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiPhase {
    Idle,
    Searching,
    Summary,
    Cooking,
    Finished,
    Error,
}

impl From<Phase> for FfiPhase {
    fn from(p: Phase) -> Self {
        match p {
            Phase::Idle => FfiPhase::Idle,
            Phase::Searching => FfiPhase::Searching,
            Phase::Summary => FfiPhase::Summary,
            Phase::Cooking => FfiPhase::Cooking,
            Phase::Finished => FfiPhase::Finished,
            Phase::Error => FfiPhase::Error,
        }
    }
}

/// One instruction step.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStep {
    /// One-indexed step number
    pub order: u32,
    pub description: String,
    pub time_hint: Option<String>,
}

impl From<&Step> for FfiStep {
    fn from(s: &Step) -> Self {
        FfiStep {
            order: s.order,
            description: s.description.clone(),
            time_hint: s.time_hint.clone(),
        }
    }
}

/// FFI-safe representation of a recipe.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecipe {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<FfiStep>,
}

impl From<&Recipe> for FfiRecipe {
    fn from(r: &Recipe) -> Self {
        FfiRecipe {
            id: r.id.clone(),
            title: r.title.clone(),
            description: r.description.clone(),
            image_url: r.image_url.clone(),
            ingredients: r.ingredients.clone(),
            instructions: r.instructions.iter().map(FfiStep::from).collect(),
        }
    }
}

/// FFI-safe representation of a recipe summary.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecipeSummary {
    pub id: String,
    pub name: String,
    pub ingredients: Vec<String>,
    pub total_time_minutes: u32,
}

impl From<RecipeSummary> for FfiRecipeSummary {
    fn from(s: RecipeSummary) -> Self {
        FfiRecipeSummary {
            id: s.id,
            name: s.name,
            ingredients: s.ingredients,
            total_time_minutes: s.total_time_minutes,
        }
    }
}

/// FFI-safe representation of a step timer.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTimer {
    pub total_seconds: u64,
    pub remaining_seconds: u64,
    pub running: bool,
    /// Remaining time as MM:SS
    pub display: String,
}

impl From<&TimerState> for FfiTimer {
    fn from(t: &TimerState) -> Self {
        FfiTimer {
            total_seconds: t.total_seconds,
            remaining_seconds: t.remaining_seconds,
            running: t.running,
            display: t.format_remaining(),
        }
    }
}

/// Everything a host UI needs to render the current session.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSnapshot {
    pub phase: FfiPhase,
    pub query: Option<String>,
    pub recipe: Option<FfiRecipe>,
    pub step_index: u32,
    pub step_count: u32,
    pub current_step: Option<FfiStep>,
    pub timer: Option<FfiTimer>,
    /// Pass this to `tick` once per second while set
    pub timer_generation: Option<u64>,
    pub finish_requested: bool,
    pub error_message: Option<String>,
    pub progress_percent: u32,
}

impl From<SessionSnapshot> for FfiSnapshot {
    fn from(s: SessionSnapshot) -> Self {
        FfiSnapshot {
            phase: s.phase.into(),
            query: s.query,
            recipe: s.recipe.as_ref().map(FfiRecipe::from),
            step_index: u32::try_from(s.step_index).unwrap_or(u32::MAX),
            step_count: u32::try_from(s.step_count).unwrap_or(u32::MAX),
            current_step: s.current_step.as_ref().map(FfiStep::from),
            timer: s.timer.as_ref().map(FfiTimer::from),
            timer_generation: s.timer_generation,
            finish_requested: s.finish_requested,
            error_message: s.error_message,
            progress_percent: s.progress_percent,
        }
    }
}

/// A loaded recipe catalog.
#[derive(uniffi::Object)]
pub struct FfiRecipeCatalog {
    inner: Arc<RecipeStore>,
}

#[uniffi::export]
impl FfiRecipeCatalog {
    /// Loads the dataset bundled with the library.
    #[uniffi::constructor]
    pub fn bundled() -> Result<Arc<Self>, GuideError> {
        Ok(Self::wrap(RecipeStore::bundled()?))
    }

    /// Loads a dataset file (.json, .yaml, .yml) or a directory of them.
    #[uniffi::constructor]
    pub fn from_path(path: String) -> Result<Arc<Self>, GuideError> {
        let path = Utf8Path::new(&path);
        let store = if path.is_dir() {
            RecipeStore::from_dir(path)?
        } else {
            RecipeStore::from_path(path)?
        };
        Ok(Self::wrap(store))
    }

    /// Loads a dataset from a JSON string.
    #[uniffi::constructor]
    pub fn from_json(json: String) -> Result<Arc<Self>, GuideError> {
        Ok(Self::wrap(RecipeStore::from_json_str(&json)?))
    }

    /// Number of recipes in the catalog.
    pub fn count(&self) -> u32 {
        u32::try_from(self.inner.len()).unwrap_or(u32::MAX)
    }

    /// Returns the first complete recipe whose title contains `query`.
    pub fn find_by_name(&self, query: String) -> Result<FfiRecipe, GuideError> {
        Ok(FfiRecipe::from(find_by_name(&self.inner, &query)?))
    }

    /// Gets a recipe by id.
    pub fn get(&self, id: String) -> Option<FfiRecipe> {
        self.inner.get(&id).map(FfiRecipe::from)
    }

    /// Summaries of all recipes in dataset order.
    pub fn list_all(&self) -> Vec<FfiRecipeSummary> {
        list_all(&self.inner).into_iter().map(Into::into).collect()
    }

    /// Summaries of recipes matching `term` in title, description or ingredients.
    pub fn search(&self, term: String) -> Vec<FfiRecipeSummary> {
        search(&self.inner, &term).into_iter().map(Into::into).collect()
    }

    /// Starts a new cooking session against this catalog.
    pub fn start_session(&self, locale: FfiLocale) -> Arc<FfiCookingGuide> {
        Arc::new(FfiCookingGuide {
            inner: Mutex::new(CookingGuide::new(Arc::clone(&self.inner), locale.into())),
        })
    }
}

impl FfiRecipeCatalog {
    fn wrap(store: RecipeStore) -> Arc<Self> {
        Arc::new(FfiRecipeCatalog {
            inner: Arc::new(store),
        })
    }
}

/// A cooking session. Every call returns the new snapshot.
///
/// The host is responsible for calling `tick` once per second with the
/// snapshot's `timer_generation` while it is set.
#[derive(uniffi::Object)]
pub struct FfiCookingGuide {
    inner: Mutex<CookingGuide<Arc<RecipeStore>>>,
}

#[uniffi::export]
impl FfiCookingGuide {
    pub fn snapshot(&self) -> FfiSnapshot {
        self.guide().snapshot().into()
    }

    pub fn submit_query(&self, text: String) -> FfiSnapshot {
        self.apply(|g| g.submit_query(&text))
    }

    pub fn confirm_start(&self) -> FfiSnapshot {
        self.apply(|g| g.confirm_start())
    }

    pub fn go_back(&self) -> FfiSnapshot {
        self.apply(|g| g.go_back())
    }

    pub fn advance_step(&self) -> FfiSnapshot {
        self.apply(|g| g.advance_step())
    }

    pub fn retreat_step(&self) -> FfiSnapshot {
        self.apply(|g| g.retreat_step())
    }

    pub fn confirm_finish(&self) -> FfiSnapshot {
        self.apply(|g| g.confirm_finish())
    }

    pub fn cancel_finish(&self) -> FfiSnapshot {
        self.apply(|g| g.cancel_finish())
    }

    pub fn toggle_timer(&self) -> FfiSnapshot {
        self.apply(|g| g.toggle_timer())
    }

    pub fn tick(&self, generation: u64) -> FfiSnapshot {
        self.apply(|g| g.tick(generation))
    }

    pub fn reset(&self) -> FfiSnapshot {
        self.apply(|g| g.reset())
    }
}

impl FfiCookingGuide {
    fn guide(&self) -> MutexGuard<'_, CookingGuide<Arc<RecipeStore>>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    // Tick scheduling is read back from the snapshot, so effects are dropped.
    fn apply<F, R>(&self, op: F) -> FfiSnapshot
    where
        F: FnOnce(&mut CookingGuide<Arc<RecipeStore>>) -> R,
    {
        let mut guide = self.guide();
        op(&mut *guide);
        guide.snapshot().into()
    }
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Seconds of the first duration named in a step's text, if any.
#[uniffi::export]
pub fn parse_step_duration(text: String) -> Option<u64> {
    parse_duration_seconds(&text)
}

/// Formats seconds as MM:SS.
#[uniffi::export]
pub fn format_countdown(seconds: u64) -> String {
    format_countdown_internal(seconds)
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
