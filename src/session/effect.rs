/// Work the host must carry out after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Look up a recipe and answer with `LookupSucceeded` or `LookupFailed`.
    Lookup { query: String },
    /// Begin sending `Msg::Tick { generation }` once per second.
    StartTicking { generation: u64 },
    /// Stop the tick schedule of `generation`.
    StopTicking { generation: u64 },
    /// Ask the user whether to finish the session.
    ConfirmFinish,
}
