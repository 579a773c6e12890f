//! The cooking session state machine.
//!
//! A session moves through `idle → searching → summary → cooking →
//! finished`, or to `error` when a lookup fails. [`update`] is the pure
//! transition function; [`CookingGuide`] wraps it, runs lookups
//! synchronously and hands tick scheduling back to the host.
//!
//! Tick schedules are identified by a generation number. Every timer gets a
//! new one, so a tick that was already in flight when the user changed
//! steps can never touch the next step's countdown.

mod effect;
mod msg;
mod state;
mod update;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{Phase, SessionSnapshot, SessionState};
pub use update::update;

use crate::config::Locale;
use crate::fetcher::RecipeLookup;

/// Drives one session against a recipe source.
///
/// Each operation returns the effects the host still has to carry out:
/// starting or stopping a tick schedule, or showing the finish
/// confirmation. Lookups never escape; they are resolved before the call
/// returns, so the session is never left in `searching`.
///
/// # Examples
///
/// ```
/// use recipe_guide::{CookingGuide, Locale, Phase, RecipeStore};
///
/// let store = RecipeStore::bundled()?;
/// let mut guide = CookingGuide::new(&store, Locale::Bengali);
/// guide.submit_query("কাচ্চি");
/// assert_eq!(guide.snapshot().phase, Phase::Summary);
/// guide.confirm_start();
/// assert_eq!(guide.snapshot().step_index, 0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct CookingGuide<L> {
    source: L,
    locale: Locale,
    state: SessionState,
}

impl<L: RecipeLookup> CookingGuide<L> {
    pub fn new(source: L, locale: Locale) -> Self {
        CookingGuide {
            source,
            locale,
            state: SessionState::new(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.snapshot()
    }

    /// Applies a message and resolves any lookups it triggers.
    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let mut pending = vec![msg];
        let mut host_effects = Vec::new();

        while let Some(msg) = pending.pop() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;

            for effect in effects {
                match effect {
                    Effect::Lookup { query } => pending.push(self.resolve(&query)),
                    other => host_effects.push(other),
                }
            }
        }

        host_effects
    }

    pub fn submit_query(&mut self, text: &str) -> Vec<Effect> {
        self.dispatch(Msg::QuerySubmitted(text.to_string()))
    }

    pub fn confirm_start(&mut self) -> Vec<Effect> {
        self.dispatch(Msg::StartConfirmed)
    }

    pub fn go_back(&mut self) -> Vec<Effect> {
        self.dispatch(Msg::BackRequested)
    }

    pub fn advance_step(&mut self) -> Vec<Effect> {
        self.dispatch(Msg::NextStep)
    }

    pub fn retreat_step(&mut self) -> Vec<Effect> {
        self.dispatch(Msg::PreviousStep)
    }

    pub fn confirm_finish(&mut self) -> Vec<Effect> {
        self.dispatch(Msg::FinishConfirmed)
    }

    pub fn cancel_finish(&mut self) -> Vec<Effect> {
        self.dispatch(Msg::FinishCancelled)
    }

    pub fn toggle_timer(&mut self) -> Vec<Effect> {
        self.dispatch(Msg::TimerToggled)
    }

    pub fn tick(&mut self, generation: u64) -> Vec<Effect> {
        self.dispatch(Msg::Tick { generation })
    }

    pub fn reset(&mut self) -> Vec<Effect> {
        self.dispatch(Msg::ResetRequested)
    }

    fn resolve(&self, query: &str) -> Msg {
        match self.source.lookup(query) {
            Ok(recipe) => {
                log::info!("Found recipe {} ({}) for {:?}", recipe.id, recipe.title, query);
                Msg::LookupSucceeded(recipe)
            }
            Err(e) => {
                log::warn!("Lookup for {:?} failed: {}", query, e);
                Msg::LookupFailed(e.user_message(self.locale))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::{DatasetFile, LookupError};
    use crate::{Recipe, RecipeStore};
    use camino::Utf8PathBuf;
    use indoc::indoc;

    fn setup_test_store() -> RecipeStore {
        RecipeStore::from_json_str(indoc! {r#"
            [
                {
                    "title": "Kacchi Biryani",
                    "ingredients": ["Mutton", "Rice", "Yogurt"],
                    "instructions": ["Marinate 30 minutes", "Cook", "Serve"]
                },
                {
                    "title": "Plain Rice",
                    "ingredients": [],
                    "instructions": ["Boil"]
                }
            ]"#})
        .unwrap()
    }

    struct FailingSource;

    impl RecipeLookup for FailingSource {
        fn lookup(&self, _query: &str) -> Result<Recipe, LookupError> {
            Err(LookupError::UnexpectedFault("dataset went away".to_string()))
        }
    }

    #[test]
    fn test_submit_resolves_to_summary() {
        let store = setup_test_store();
        let mut guide = CookingGuide::new(&store, Locale::English);
        let effects = guide.submit_query("Kacchi");

        assert!(effects.is_empty());
        let snapshot = guide.snapshot();
        assert_eq!(snapshot.phase, Phase::Summary);
        assert_eq!(snapshot.recipe.unwrap().title, "Kacchi Biryani");
    }

    #[test]
    fn test_submit_resolves_to_error_with_message() {
        let store = setup_test_store();
        let mut guide = CookingGuide::new(&store, Locale::English);
        guide.submit_query("Pizza");

        let snapshot = guide.snapshot();
        assert_eq!(snapshot.phase, Phase::Error);
        assert!(snapshot.error_message.unwrap().contains("\"Pizza\""));
    }

    #[test]
    fn test_incomplete_recipe_is_an_error() {
        let store = setup_test_store();
        let mut guide = CookingGuide::new(&store, Locale::Bengali);
        guide.submit_query("rice");

        let snapshot = guide.snapshot();
        assert_eq!(snapshot.phase, Phase::Error);
        assert_eq!(
            snapshot.error_message.as_deref(),
            Some(
                LookupError::IncompleteRecipe {
                    query: "rice".to_string()
                }
                .user_message(Locale::Bengali)
                .as_str()
            )
        );
    }

    #[test]
    fn test_unexpected_fault_is_an_error() {
        let mut guide = CookingGuide::new(FailingSource, Locale::English);
        guide.submit_query("anything");
        assert_eq!(guide.snapshot().phase, Phase::Error);
        assert_eq!(
            guide.snapshot().error_message.as_deref(),
            Some("An unexpected error occurred. Please try again later.")
        );
    }

    #[test]
    fn test_missing_dataset_file_is_an_error() {
        let source = DatasetFile(Utf8PathBuf::from("/nonexistent/recipes.json"));
        let mut guide = CookingGuide::new(source, Locale::English);
        guide.submit_query("Kacchi");
        assert_eq!(guide.snapshot().phase, Phase::Error);
    }

    #[test]
    fn test_never_left_searching() {
        let store = setup_test_store();
        for query in ["Kacchi", "Pizza", "rice", "   "] {
            let mut guide = CookingGuide::new(&store, Locale::English);
            guide.submit_query(query);
            assert_ne!(guide.snapshot().phase, Phase::Searching);
        }
    }

    #[test]
    fn test_retry_requires_reset() {
        let store = setup_test_store();
        let mut guide = CookingGuide::new(&store, Locale::English);
        guide.submit_query("Pizza");
        guide.submit_query("Kacchi");
        assert_eq!(guide.snapshot().phase, Phase::Error);

        guide.reset();
        guide.submit_query("Kacchi");
        assert_eq!(guide.snapshot().phase, Phase::Summary);
    }

    #[test]
    fn test_cooking_returns_tick_effects() {
        let store = setup_test_store();
        let mut guide = CookingGuide::new(&store, Locale::English);
        guide.submit_query("Kacchi");

        assert_eq!(
            guide.confirm_start(),
            vec![Effect::StartTicking { generation: 1 }]
        );
        guide.tick(1);
        assert_eq!(guide.snapshot().timer.unwrap().remaining_seconds, 1799);

        assert_eq!(
            guide.advance_step(),
            vec![Effect::StopTicking { generation: 1 }]
        );
        assert!(guide.snapshot().timer.is_none());
    }
}
