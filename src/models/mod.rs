// src/models/mod.rs - Wire types exchanged with the REST backend

mod calendar;
mod de;
mod ingredient;
mod recipe;
mod stats;
mod stock;
mod team;

pub use calendar::{CalendarEvent, NewCalendarEvent};
pub use ingredient::{Ingredient, IngredientKind};
pub use recipe::{
    Recipe, RecipeIngredientLine, RecipeIngredientPayload, RecipeKind, RecipePayload,
    RecipeStepLine,
};
pub use stats::{StockCounts, StockHistoryPoint};
pub use stock::{
    ActionTone, ExecuteFullRecipe, ExecuteProcessedRecipe, NewStockLot, StockAction, StockLogEntry,
    StockLot, StockLotPatch,
};
pub use team::{MemberPayload, Restaurant, Role, TeamMember};
