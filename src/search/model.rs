use crate::Recipe;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// A lightweight projection of a recipe for listing and search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeSummary {
    pub id: String,
    pub name: String,
    pub ingredients: Vec<String>,
    /// Best-effort total of the steps' minute hints. Not a guarantee.
    pub total_time_minutes: u32,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        to_summary(recipe)
    }
}

/// Projects a recipe into its summary.
///
/// The total time sums [`parse_minutes`] over every step's time hint; steps
/// without a recognizable hint contribute nothing.
pub fn to_summary(recipe: &Recipe) -> RecipeSummary {
    let total_time_minutes = recipe
        .instructions
        .iter()
        .filter_map(|step| step.time_hint.as_deref())
        .map(parse_minutes)
        .fold(0u32, u32::saturating_add);

    RecipeSummary {
        id: recipe.id.clone(),
        name: recipe.title.clone(),
        ingredients: recipe.ingredients.clone(),
        total_time_minutes,
    }
}

fn minutes_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)([0-9০-৯]+)\s*(?:মিনিট|minutes?\b|min\b)")
            .expect("minute hint pattern is valid")
    })
}

/// Extracts the first integer immediately followed by a minute unit.
///
/// Accepts ASCII and Bengali digits. Returns 0 when the hint has no
/// recognizable minute value.
pub fn parse_minutes(hint: &str) -> u32 {
    minutes_regex()
        .captures(hint)
        .and_then(|caps| parse_number(&caps[1]))
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}

/// Parses a run of ASCII or Bengali digits.
pub(crate) fn parse_number(digits: &str) -> Option<u64> {
    digits.chars().try_fold(0u64, |acc, c| {
        let digit = match c {
            '0'..='9' => c as u32 - '0' as u32,
            '০'..='৯' => c as u32 - '০' as u32,
            _ => return None,
        };
        acc.checked_mul(10)?.checked_add(u64::from(digit))
    })
}
