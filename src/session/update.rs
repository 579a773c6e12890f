use super::{Effect, Msg, Phase, SessionState};
use crate::timer::TimerState;

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages that do not apply to the current phase leave the state
/// unchanged and produce no effects.
pub fn update(mut state: SessionState, msg: Msg) -> (SessionState, Vec<Effect>) {
    let before = state.phase();
    let effects = match msg {
        Msg::QuerySubmitted(text) => {
            let query = text.trim();
            if state.phase() != Phase::Idle || query.is_empty() {
                return (state, Vec::new());
            }
            state.begin_search(query.to_string());
            vec![Effect::Lookup {
                query: query.to_string(),
            }]
        }
        Msg::LookupSucceeded(recipe) => {
            if state.phase() == Phase::Searching {
                state.show_summary(recipe);
            }
            Vec::new()
        }
        Msg::LookupFailed(message) => {
            if state.phase() == Phase::Searching {
                state.fail(message);
            }
            Vec::new()
        }
        Msg::StartConfirmed => {
            if state.phase() == Phase::Summary {
                state.start_cooking();
                enter_step(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::BackRequested => {
            if state.phase() == Phase::Summary {
                state.clear();
            }
            Vec::new()
        }
        Msg::NextStep => {
            if state.phase() != Phase::Cooking {
                return (state, Vec::new());
            }
            let last = state.recipe().and_then(|r| r.last_step_index()).unwrap_or(0);
            if state.step_index() < last {
                let mut effects = leave_step(&mut state);
                state.set_step_index(state.step_index() + 1);
                effects.extend(enter_step(&mut state));
                effects
            } else {
                state.set_finish_requested(true);
                vec![Effect::ConfirmFinish]
            }
        }
        Msg::PreviousStep => {
            if state.phase() != Phase::Cooking || state.step_index() == 0 {
                return (state, Vec::new());
            }
            state.set_finish_requested(false);
            let mut effects = leave_step(&mut state);
            state.set_step_index(state.step_index() - 1);
            effects.extend(enter_step(&mut state));
            effects
        }
        Msg::FinishConfirmed => {
            if state.phase() == Phase::Cooking && state.finish_requested() {
                let effects = leave_step(&mut state);
                state.finish();
                effects
            } else {
                Vec::new()
            }
        }
        Msg::FinishCancelled => {
            if state.phase() == Phase::Cooking {
                state.set_finish_requested(false);
            }
            Vec::new()
        }
        Msg::TimerToggled => {
            if state.phase() == Phase::Cooking {
                if let Some(timer) = state.timer_mut() {
                    timer.toggle();
                    log::debug!("Timer running={}", timer.running);
                }
            }
            Vec::new()
        }
        Msg::Tick { generation } => apply_tick(&mut state, generation),
        Msg::ResetRequested => {
            if matches!(state.phase(), Phase::Finished | Phase::Error) {
                state.clear();
            }
            Vec::new()
        }
    };

    if state.phase() != before {
        log::debug!("Session {:?} -> {:?}", before, state.phase());
    }
    (state, effects)
}

/// Re-evaluates the current step's text and attaches a timer if it names a
/// duration.
fn enter_step(state: &mut SessionState) -> Vec<Effect> {
    let timer = state
        .recipe()
        .and_then(|r| r.step(state.step_index()))
        .and_then(|step| TimerState::for_text(&step.description));

    match timer {
        Some(timer) => {
            let total = timer.total_seconds;
            let generation = state.attach_timer(timer);
            log::debug!(
                "Step {} timer {}s (generation {})",
                state.step_index() + 1,
                total,
                generation
            );
            vec![Effect::StartTicking { generation }]
        }
        None => Vec::new(),
    }
}

/// Discards the current step's timer and cancels its tick schedule.
fn leave_step(state: &mut SessionState) -> Vec<Effect> {
    state
        .detach_timer()
        .map(|generation| vec![Effect::StopTicking { generation }])
        .unwrap_or_default()
}

fn apply_tick(state: &mut SessionState, generation: u64) -> Vec<Effect> {
    if state.phase() != Phase::Cooking || generation != state.timer_generation() {
        log::trace!("Ignoring stale tick for generation {generation}");
        return Vec::new();
    }
    let Some(timer) = state.timer_mut() else {
        return Vec::new();
    };
    if timer.tick() && timer.is_expired() && !timer.running {
        log::debug!("Timer for generation {generation} finished");
        return vec![Effect::StopTicking { generation }];
    }
    Vec::new()
}
