// src/recipe/mod.rs - Recipe book listing and the drag-and-drop composer

mod book;
mod composer;

pub use book::RecipeBook;
pub use composer::{fetch_sources, submit_recipe, ComposerPhase, DragPayload, RecipeComposer, RecipeIngredientRef};
