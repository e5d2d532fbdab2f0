// src/ui/pages/recipe_builder.rs - Drag-and-drop recipe composer

use dioxus::prelude::*;

use crate::api::ApiClient;
use crate::models::{Ingredient, IngredientKind, RecipeKind};
use crate::recipe::{fetch_sources, submit_recipe, ComposerPhase, DragPayload, RecipeComposer};
use crate::types::RecordId;
use crate::ui::components::{AlertBanner, Badge, DANGER_BUTTON, INPUT, PRIMARY_BUTTON, SECONDARY_BUTTON};
use crate::ui::pages::{Card, EmptyState, PageWrapper};
use crate::ui::router::Route;
use crate::ui::state::use_services;

async fn load(api: ApiClient, mut composer: Signal<RecipeComposer>) {
    let id = composer.peek().id();
    let (catalog, recipe) = fetch_sources(&api, id).await;
    composer.write().apply_loaded(catalog, recipe);
}

/// Returns true once the backend accepted the recipe.
async fn save(api: ApiClient, mut composer: Signal<RecipeComposer>) -> bool {
    let started = composer.write().begin_save();
    let Ok(payload) = started else {
        return false;
    };
    let id = composer.peek().id();
    let result = submit_recipe(&api, id, &payload).await;
    composer.write().finish_save(result).is_ok()
}

fn kind_badge_class(kind: IngredientKind) -> &'static str {
    match kind {
        IngredientKind::Raw => "bg-green-100 text-green-800",
        IngredientKind::Processed => "bg-purple-100 text-purple-800",
    }
}

/// Hover details for processed ingredients.
fn ingredient_details(ingredient: &Ingredient) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(description) = ingredient.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(description.to_string());
    }
    if !ingredient.sub_ingredients.is_empty() {
        lines.push(format!("Ingredients: {}", ingredient.sub_ingredients.join(", ")));
    }
    if !ingredient.allergens.is_empty() {
        lines.push(format!("Allergens: {}", ingredient.allergens.join(", ")));
    }
    if let Some(shelf_life) = ingredient.shelf_life.as_deref() {
        lines.push(format!("Shelf life: {}", shelf_life));
    }
    lines
}

#[component]
pub fn RecipeBuilder(kind: Option<RecipeKind>, id: Option<RecordId>) -> Element {
    let services = use_services();
    let nav = navigator();
    let mut composer = use_signal(move || match id {
        Some(id) => RecipeComposer::edit_recipe(id),
        None => RecipeComposer::new_recipe(kind.unwrap_or(RecipeKind::Processed)),
    });
    let dragging = use_signal(|| None::<DragPayload>);

    let api = services.api.clone();
    use_future(move || load(api.clone(), composer));
    let retry_api = services.api.clone();

    let current = composer.read();
    let phase = current.phase();
    let title = match current.id() {
        Some(_) => format!("Edit {} recipe", current.kind().label()),
        None => format!("New {} recipe", current.kind().label()),
    };

    let page_actions = rsx! {
        div {
            class: "flex items-center space-x-3",
            Badge { text: phase.to_string() }
            Link { to: Route::Recipes {}, class: SECONDARY_BUTTON, "Cancel" }
            button {
                r#type: "button",
                class: PRIMARY_BUTTON,
                disabled: phase != ComposerPhase::Ready,
                onclick: move |_| {
                    let api = services.api.clone();
                    spawn(async move {
                        if save(api, composer).await {
                            nav.push(Route::Recipes {});
                        }
                    });
                },
                if phase == ComposerPhase::Saving { "Saving..." } else { "Save" }
            }
        }
    };

    rsx! {
        PageWrapper {
            title,
            actions: Some(page_actions),

            if let Some(message) = current.error() {
                AlertBanner {
                    message: message.to_string(),
                    on_dismiss: move |_| composer.write().dismiss_error(),
                }
            }

            if phase == ComposerPhase::Loading {
                if current.load_failed() {
                    div {
                        class: "flex items-center space-x-3",
                        p { class: "text-sm text-gray-500", "The recipe could not be loaded." }
                        button {
                            r#type: "button",
                            class: SECONDARY_BUTTON,
                            onclick: move |_| {
                                if composer.write().retry_load() {
                                    spawn(load(retry_api.clone(), composer));
                                }
                            },
                            "Retry"
                        }
                    }
                } else {
                    p { class: "text-sm text-gray-500", "Loading..." }
                }
            } else {
                DishName { composer }
                div {
                    class: "grid grid-cols-1 gap-6 lg:grid-cols-3",
                    CatalogPanel { composer, dragging }
                    div {
                        class: "lg:col-span-2 space-y-6",
                        IngredientDropZone { composer, dragging }
                        StepsEditor { composer }
                    }
                }
            }
        }
    }
}

/// Double-click the name to edit it. Enter or blur commits, Escape cancels.
#[component]
fn DishName(composer: Signal<RecipeComposer>) -> Element {
    let mut composer = composer;
    let current = composer.read();

    if let Some(draft) = current.rename_draft() {
        let draft = draft.to_string();
        return rsx! {
            input {
                class: "{INPUT} text-xl font-semibold",
                value: "{draft}",
                autofocus: true,
                oninput: move |evt: FormEvent| composer.write().set_rename_draft(evt.value()),
                onkeydown: move |evt: KeyboardEvent| match evt.key() {
                    Key::Enter => composer.write().commit_rename(),
                    Key::Escape => composer.write().cancel_rename(),
                    _ => {}
                },
                onblur: move |_| composer.write().commit_rename(),
            }
        };
    }

    rsx! {
        h2 {
            class: "text-xl font-semibold text-gray-900 cursor-text",
            title: "Double-click to rename",
            ondoubleclick: move |_| composer.write().begin_rename(),
            "{current.name()}"
        }
    }
}

#[component]
fn CatalogPanel(composer: Signal<RecipeComposer>, dragging: Signal<Option<DragPayload>>) -> Element {
    let mut composer = composer;
    let mut dragging = dragging;
    let current = composer.read();
    let query = current.query().to_string();

    rsx! {
        Card {
            title: "Ingredients".to_string(),
            input {
                class: INPUT,
                r#type: "search",
                placeholder: "Search ingredients...",
                value: "{query}",
                oninput: move |evt: FormEvent| composer.write().set_query(evt.value()),
            }
            ul {
                class: "mt-4 space-y-2 max-h-96 overflow-y-auto",
                for ingredient in current.filtered_catalog() {
                    li {
                        key: "{ingredient.id}",
                        class: "group relative flex items-center justify-between rounded border border-gray-200 px-3 py-2 text-sm cursor-move hover:bg-gray-50",
                        draggable: "true",
                        ondragstart: {
                            let id = ingredient.id;
                            move |_| {
                                let payload = composer.peek().begin_drag(id);
                                dragging.set(payload);
                            }
                        },
                        ondragend: move |_| dragging.set(None),
                        span { "{ingredient.name}" }
                        Badge {
                            text: ingredient.kind.badge().to_string(),
                            class: kind_badge_class(ingredient.kind).to_string()
                        }
                        if !ingredient.is_raw() {
                            div {
                                class: "hidden group-hover:block absolute left-0 top-full z-10 mt-1 w-64 rounded bg-gray-800 p-2 text-xs text-white shadow-lg",
                                for (index, line) in ingredient_details(ingredient).into_iter().enumerate() {
                                    p { key: "{index}", "{line}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn IngredientDropZone(composer: Signal<RecipeComposer>, dragging: Signal<Option<DragPayload>>) -> Element {
    let mut composer = composer;
    let mut dragging = dragging;
    let current = composer.read();
    let lines = current.ingredients();

    rsx! {
        Card {
            title: "Recipe ingredients".to_string(),
            div {
                class: "min-h-32 rounded-lg border-2 border-dashed border-gray-300 p-4",
                ondragover: move |evt: DragEvent| evt.prevent_default(),
                ondrop: move |evt: DragEvent| {
                    evt.prevent_default();
                    if let Some(payload) = dragging.take() {
                        let name = payload.ingredient().name.clone();
                        if !composer.write().drop_ingredient(payload) {
                            tracing::debug!(%name, "drop rejected");
                        }
                    }
                },

                if lines.is_empty() {
                    EmptyState {
                        icon: "🧺".to_string(),
                        title: "No ingredients yet".to_string(),
                        description: "Drag ingredients here from the list.".to_string()
                    }
                } else {
                    table {
                        class: "min-w-full text-sm",
                        tbody {
                            for line in lines.iter() {
                                tr {
                                    key: "{line.id()}",
                                    class: "border-t border-gray-100 first:border-t-0",
                                    td {
                                        class: "py-2 pr-4",
                                        Badge {
                                            text: line.ingredient.kind.badge().to_string(),
                                            class: kind_badge_class(line.ingredient.kind).to_string()
                                        }
                                        span { class: "ml-2 font-medium", "{line.ingredient.name}" }
                                    }
                                    td {
                                        class: "py-2 pr-4 w-32",
                                        input {
                                            class: INPUT,
                                            r#type: "number",
                                            min: "0",
                                            step: "any",
                                            value: "{line.required_amount}",
                                            oninput: {
                                                let id = line.id();
                                                move |evt: FormEvent| {
                                                    let amount = evt.value().parse::<f64>().unwrap_or(0.0);
                                                    composer.write().set_required_amount(id, amount);
                                                }
                                            },
                                        }
                                    }
                                    td { class: "py-2 pr-4 text-gray-500", "{line.unit}" }
                                    td {
                                        class: "py-2 text-right",
                                        button {
                                            r#type: "button",
                                            class: DANGER_BUTTON,
                                            onclick: {
                                                let id = line.id();
                                                move |_| composer.write().remove_ingredient(id)
                                            },
                                            "Remove"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn StepsEditor(composer: Signal<RecipeComposer>) -> Element {
    let mut composer = composer;
    let current = composer.read();

    rsx! {
        Card {
            title: "Steps".to_string(),
            actions: Some(rsx! {
                button {
                    r#type: "button",
                    class: SECONDARY_BUTTON,
                    onclick: move |_| composer.write().add_step(),
                    "Add step"
                }
            }),
            ol {
                class: "space-y-3",
                for (index, step) in current.steps().iter().enumerate() {
                    li {
                        key: "{index}",
                        class: "flex items-start space-x-3",
                        span { class: "mt-2 w-6 text-sm font-semibold text-gray-500", "{index + 1}." }
                        textarea {
                            class: INPUT,
                            rows: "2",
                            value: "{step}",
                            oninput: move |evt: FormEvent| composer.write().edit_step(index, evt.value()),
                        }
                        button {
                            r#type: "button",
                            class: DANGER_BUTTON,
                            onclick: move |_| composer.write().delete_step(index),
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}
