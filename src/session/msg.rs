use crate::Recipe;

/// Everything that can happen to a cooking session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User submitted a recipe name.
    QuerySubmitted(String),
    /// The lookup requested by `Effect::Lookup` found a usable recipe.
    LookupSucceeded(Recipe),
    /// The lookup failed; carries the message to show.
    LookupFailed(String),
    /// User chose to start cooking from the summary.
    StartConfirmed,
    /// User left the summary without cooking.
    BackRequested,
    /// User asked for the next step.
    NextStep,
    /// User asked for the previous step.
    PreviousStep,
    /// User answered "yes" to the finish confirmation.
    FinishConfirmed,
    /// User answered "no" to the finish confirmation.
    FinishCancelled,
    /// User paused or resumed the step timer.
    TimerToggled,
    /// One second elapsed for the tick schedule of `generation`.
    Tick { generation: u64 },
    /// User chose to start over from the finished or error screen.
    ResetRequested,
}
