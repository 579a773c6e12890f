//! Recipe data types.
//!
//! [`RawRecipe`] and [`RawInstruction`] mirror the loosely structured
//! dataset input. [`Recipe`] and [`Step`] are the normalized form held by
//! the [`crate::RecipeStore`].

mod raw;
mod recipe;

pub use raw::{RawInstruction, RawRecipe};
pub(crate) use raw::RawRecord;
pub use recipe::{Recipe, Step};
