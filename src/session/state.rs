use crate::timer::TimerState;
use crate::{Recipe, Step};
use serde::Serialize;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Searching,
    Summary,
    Cooking,
    Finished,
    Error,
}

/// The state of one user's walkthrough. Mutated only by [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    phase: Phase,
    query: Option<String>,
    recipe: Option<Recipe>,
    step_index: usize,
    timer: Option<TimerState>,
    timer_generation: u64,
    finish_requested: bool,
    error_message: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn recipe(&self) -> Option<&Recipe> {
        self.recipe.as_ref()
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn timer(&self) -> Option<&TimerState> {
        self.timer.as_ref()
    }

    pub fn finish_requested(&self) -> bool {
        self.finish_requested
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Read-only copy of everything a UI needs to render.
    pub fn snapshot(&self) -> SessionSnapshot {
        let step_count = self.recipe.as_ref().map_or(0, Recipe::step_count);
        let current_step = match self.phase {
            Phase::Cooking | Phase::Finished => self
                .recipe
                .as_ref()
                .and_then(|r| r.step(self.step_index))
                .cloned(),
            _ => None,
        };
        let progress_percent = if current_step.is_some() && step_count > 0 {
            (((self.step_index + 1) * 100) / step_count) as u32
        } else {
            0
        };

        SessionSnapshot {
            phase: self.phase,
            query: self.query.clone(),
            recipe: self.recipe.clone(),
            step_index: self.step_index,
            step_count,
            current_step,
            timer: self.timer,
            timer_generation: self.timer.map(|_| self.timer_generation),
            finish_requested: self.finish_requested,
            error_message: self.error_message.clone(),
            progress_percent,
        }
    }

    pub(super) fn begin_search(&mut self, query: String) {
        self.phase = Phase::Searching;
        self.query = Some(query);
        self.error_message = None;
    }

    pub(super) fn show_summary(&mut self, recipe: Recipe) {
        self.phase = Phase::Summary;
        self.recipe = Some(recipe);
    }

    pub(super) fn fail(&mut self, message: String) {
        self.phase = Phase::Error;
        self.recipe = None;
        self.error_message = Some(message);
    }

    pub(super) fn start_cooking(&mut self) {
        self.phase = Phase::Cooking;
        self.step_index = 0;
        self.finish_requested = false;
    }

    pub(super) fn set_step_index(&mut self, index: usize) {
        self.step_index = index;
    }

    pub(super) fn set_finish_requested(&mut self, requested: bool) {
        self.finish_requested = requested;
    }

    pub(super) fn finish(&mut self) {
        self.phase = Phase::Finished;
        self.finish_requested = false;
    }

    pub(super) fn timer_generation(&self) -> u64 {
        self.timer_generation
    }

    pub(super) fn timer_mut(&mut self) -> Option<&mut TimerState> {
        self.timer.as_mut()
    }

    /// Attaches a timer under a fresh generation and returns the generation.
    pub(super) fn attach_timer(&mut self, timer: TimerState) -> u64 {
        self.timer_generation += 1;
        self.timer = Some(timer);
        self.timer_generation
    }

    /// Drops the current timer, returning the generation it ran under.
    pub(super) fn detach_timer(&mut self) -> Option<u64> {
        self.timer.take().map(|_| self.timer_generation)
    }

    /// Back to idle. The generation counter survives so that ticks from a
    /// discarded session can never match a later one.
    pub(super) fn clear(&mut self) {
        *self = SessionState {
            timer_generation: self.timer_generation,
            ..SessionState::default()
        };
    }
}

/// Observable view of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub query: Option<String>,
    pub recipe: Option<Recipe>,
    pub step_index: usize,
    pub step_count: usize,
    /// The step being cooked; `None` outside cooking and finished
    pub current_step: Option<Step>,
    pub timer: Option<TimerState>,
    /// Generation to tag ticks with while a timer is attached
    pub timer_generation: Option<u64>,
    pub finish_requested: bool,
    pub error_message: Option<String>,
    pub progress_percent: u32,
}
