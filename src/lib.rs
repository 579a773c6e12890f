pub mod config;
pub mod fetcher;
pub mod ffi;
pub mod logging;
pub mod model;
pub mod search;
pub mod session;
pub mod store;
pub mod ticker;
pub mod timer;

pub use config::{GuideConfig, Locale};
pub use fetcher::{find_by_name, get_recipe, DatasetFile, LookupError, RecipeLookup};
pub use model::*;
pub use search::{list_all, parse_minutes, search, to_summary, RecipeSummary};
pub use session::{update, CookingGuide, Effect, Msg, Phase, SessionSnapshot, SessionState};
pub use store::{RecipeStore, StoreError};
pub use ticker::Ticker;
pub use timer::{format_countdown, parse_duration, TimerState};

uniffi::setup_scaffolding!();
