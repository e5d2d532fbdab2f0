// src/ui/router.rs
use crate::models::RecipeKind;
use crate::ui::{
    layout::Shell,
    pages::{
        Calendar as CalendarPage, Dashboard as DashboardPage, Inventory as InventoryPage,
        NotFound as NotFoundPage, RecipeBuilder, Recipes as RecipesPage, Team as TeamPage,
        Testing as TestingPage,
    },
};
use dioxus::prelude::*;
#[allow(unused_imports)]
use dioxus_router::prelude::*;

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/")]
        Dashboard {},
        #[route("/inventory")]
        Inventory {},
        #[route("/recipes")]
        Recipes {},
        #[route("/recipe-builder/new/:kind")]
        RecipeBuilderNew { kind: String },
        #[route("/recipe-builder/:id")]
        RecipeBuilderEdit { id: i64 },
        #[route("/team")]
        Team {},
        #[route("/calendar")]
        Calendar {},
        #[route("/testing")]
        Testing {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl Route {
    pub fn new_recipe(kind: RecipeKind) -> Self {
        Route::RecipeBuilderNew {
            kind: kind.slug().to_string(),
        }
    }
}

#[component]
pub fn Dashboard() -> Element {
    rsx! { DashboardPage {} }
}

#[component]
pub fn Inventory() -> Element {
    rsx! { InventoryPage {} }
}

#[component]
pub fn Recipes() -> Element {
    rsx! { RecipesPage {} }
}

/// Unknown kinds fall through to the not-found page.
#[component]
pub fn RecipeBuilderNew(kind: String) -> Element {
    match RecipeKind::from_slug(&kind) {
        Some(kind) => rsx! { RecipeBuilder { kind: Some(kind), id: None } },
        None => rsx! { NotFoundPage { path: format!("recipe-builder/new/{}", kind) } },
    }
}

#[component]
pub fn RecipeBuilderEdit(id: i64) -> Element {
    rsx! { RecipeBuilder { kind: None, id: Some(id) } }
}

#[component]
pub fn Team() -> Element {
    rsx! { TeamPage {} }
}

#[component]
pub fn Calendar() -> Element {
    rsx! { CalendarPage {} }
}

#[component]
pub fn Testing() -> Element {
    rsx! { TestingPage {} }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    rsx! { NotFoundPage { path: segments.join("/") } }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_route_parsing() {
        assert_eq!(Route::from_str("/inventory").ok(), Some(Route::Inventory {}));
        assert_eq!(
            Route::from_str("/recipe-builder/12").ok(),
            Some(Route::RecipeBuilderEdit { id: 12 })
        );
        assert_eq!(
            Route::from_str("/recipe-builder/new/processed").ok(),
            Some(Route::RecipeBuilderNew { kind: "processed".to_string() })
        );
    }

    #[test]
    fn test_route_display() {
        assert_eq!(Route::new_recipe(RecipeKind::FullRecipe).to_string(), "/recipe-builder/new/full");
        assert_eq!(Route::Team {}.to_string(), "/team");
    }
}
