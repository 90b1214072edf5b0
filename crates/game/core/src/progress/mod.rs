//! Content revealed as the game unfolds: the lost-page wheel, village page
//! slots, and the recipe stages with their shared generator.
mod lost_pages;
mod recipe;
mod village;

pub use lost_pages::{LostPage, LostPagesGenerator};
pub use recipe::{Recipe, RecipeGenerator};
pub use village::{Village, VillagePage};
