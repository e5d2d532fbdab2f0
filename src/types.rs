// src/types.rs

/// Backend record identifier (stock lots, ingredients, recipes, users, events).
pub type RecordId = i64;
