use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A recipe record as it appears in a dataset file.
///
/// Only `title` is mandatory. Everything else defaults to empty so that a
/// sparse record still loads and is later judged by [`crate::Recipe::is_complete`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecipe {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<RawInstruction>,
}

/// One entry of a raw `instructions` array.
///
/// Datasets mix bare strings and structured objects. Anything that is
/// neither ends up in [`RawInstruction::Malformed`] instead of failing the
/// whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInstruction {
    Text(String),
    Structured {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time_needed: Option<String>,
    },
    #[serde(skip_serializing)]
    Malformed(Value),
}

/// A slot in a dataset array: either a recipe record or something that
/// could not be read as one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawRecord {
    Recipe(RawRecipe),
    Invalid(IgnoredAny),
}
