use super::raw::{RawInstruction, RawRecipe};
use serde::{Deserialize, Serialize};

/// One instruction within a recipe's ordered instruction sequence.
///
/// Serializes with the dataset's field names (`step`, `time_needed`) so a
/// normalized recipe can be written back out and loaded again unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// One-indexed position of the step
    #[serde(rename = "step")]
    pub order: u32,
    /// The instruction text shown to the cook
    pub description: String,
    /// Free-text duration hint, e.g. "২০ মিনিট"
    #[serde(
        rename = "time_needed",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub time_hint: Option<String>,
}

impl Step {
    /// Normalizes one raw instruction entry found at `position` (one-indexed).
    ///
    /// Bare strings become a step at `position`. Structured entries keep
    /// their own `step` number when it is a positive integer. Entries without
    /// a non-blank string description yield `None`.
    pub fn from_raw(position: u32, raw: &RawInstruction) -> Option<Self> {
        match raw {
            RawInstruction::Text(text) if text.trim().is_empty() => None,
            RawInstruction::Text(text) => Some(Step {
                order: position,
                description: text.clone(),
                time_hint: None,
            }),
            RawInstruction::Structured {
                step,
                description: Some(description),
                time_needed,
            } if !description.trim().is_empty() => {
                let order = step
                    .as_ref()
                    .and_then(|v| v.as_u64())
                    .filter(|n| *n >= 1)
                    .and_then(|n| u32::try_from(n).ok())
                    .unwrap_or(position);
                Some(Step {
                    order,
                    description: description.clone(),
                    time_hint: time_needed.clone(),
                })
            }
            RawInstruction::Structured { .. } | RawInstruction::Malformed(_) => None,
        }
    }
}

/// A titled dish with ingredients and ordered instructions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Stable identifier: the record's one-indexed position in the dataset
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<Step>,
}

impl Recipe {
    /// Builds a normalized recipe from a raw record.
    ///
    /// Returns the recipe together with the number of instruction entries
    /// that were dropped for lacking a description.
    pub(crate) fn from_raw(id: String, raw: RawRecipe) -> (Self, usize) {
        let total = raw.instructions.len();
        let instructions: Vec<Step> = raw
            .instructions
            .iter()
            .enumerate()
            .filter_map(|(idx, inst)| {
                let position = u32::try_from(idx + 1).unwrap_or(u32::MAX);
                Step::from_raw(position, inst)
            })
            .collect();
        let dropped = total - instructions.len();

        (
            Recipe {
                id,
                title: raw.title,
                description: raw.description,
                image_url: raw.image_url,
                ingredients: raw.ingredients,
                instructions,
            },
            dropped,
        )
    }

    /// A recipe is usable for cooking only when it has at least one
    /// ingredient and at least one instruction.
    pub fn is_complete(&self) -> bool {
        !self.ingredients.is_empty() && !self.instructions.is_empty()
    }

    /// Number of instruction steps.
    pub fn step_count(&self) -> usize {
        self.instructions.len()
    }

    /// Returns the step at a zero-based index.
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.instructions.get(index)
    }

    /// Index of the final step, or `None` for a recipe without instructions.
    pub fn last_step_index(&self) -> Option<usize> {
        self.instructions.len().checked_sub(1)
    }
}
