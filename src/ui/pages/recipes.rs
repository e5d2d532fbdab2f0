// src/ui/pages/recipes.rs - Processed and full recipe lists

use dioxus::prelude::*;

use crate::api::ApiClient;
use crate::models::RecipeKind;
use crate::recipe::RecipeBook;
use crate::ui::components::{AlertBanner, Modal, DANGER_BUTTON, INPUT, PRIMARY_BUTTON, SECONDARY_BUTTON};
use crate::ui::pages::{Card, EmptyState, PageWrapper};
use crate::ui::router::Route;
use crate::ui::state::use_services;

async fn load(api: ApiClient, mut book: Signal<RecipeBook>) {
    book.write().begin_load();
    let result = api.list_recipes().await;
    book.write().apply_recipes(result);
}

async fn confirm_delete(api: ApiClient, mut book: Signal<RecipeBook>) {
    let Some(id) = book.write().take_pending_delete() else {
        return;
    };
    let result = api.delete_recipe(id).await;
    let deleted = book.write().apply_delete(id, result);
    if deleted {
        load(api, book).await;
    }
}

#[component]
pub fn Recipes() -> Element {
    let services = use_services();
    let book = use_signal(RecipeBook::new);

    let api = services.api.clone();
    use_future(move || load(api.clone(), book));

    let error = book.read().error().map(str::to_string);

    rsx! {
        PageWrapper {
            title: "Recipes".to_string(),
            subtitle: Some("Processed preparations and full dishes".to_string()),

            if let Some(message) = error {
                AlertBanner { message }
            }

            div {
                class: "grid grid-cols-1 gap-6 lg:grid-cols-2",
                RecipeList { book, kind: RecipeKind::Processed }
                RecipeList { book, kind: RecipeKind::FullRecipe }
            }

            DeleteRecipeModal { book }
        }
    }
}

#[component]
fn RecipeList(book: Signal<RecipeBook>, kind: RecipeKind) -> Element {
    let mut book = book;
    let current = book.read();
    let recipes = current.list(kind);
    let query = current.query(kind).to_string();
    let title = format!("{} recipes", kind.label());

    rsx! {
        Card {
            title,
            actions: Some(rsx! {
                Link {
                    to: Route::new_recipe(kind),
                    class: PRIMARY_BUTTON,
                    "New"
                }
            }),

            input {
                class: INPUT,
                r#type: "search",
                placeholder: "Search recipes...",
                value: "{query}",
                oninput: move |evt: FormEvent| book.write().set_query(kind, evt.value()),
            }

            if current.is_loading() && current.all().is_empty() {
                p { class: "mt-4 text-sm text-gray-500", "Loading..." }
            } else if recipes.is_empty() {
                EmptyState {
                    icon: "📖".to_string(),
                    title: "No recipes".to_string(),
                    description: "Nothing matches this list yet.".to_string()
                }
            } else {
                ul {
                    class: "mt-4 divide-y divide-gray-100",
                    for (index, recipe) in recipes.iter().enumerate() {
                        li {
                            key: "{index}",
                            class: "flex items-center justify-between py-2",
                            span { class: "text-sm font-medium text-gray-900", "{recipe.name}" }
                            if let Some(id) = recipe.id {
                                div {
                                    class: "flex items-center space-x-2",
                                    Link {
                                        to: Route::RecipeBuilderEdit { id },
                                        class: SECONDARY_BUTTON,
                                        "Edit"
                                    }
                                    button {
                                        r#type: "button",
                                        class: DANGER_BUTTON,
                                        onclick: move |_| book.write().request_delete(id),
                                        "Delete"
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
fn DeleteRecipeModal(book: Signal<RecipeBook>) -> Element {
    let services = use_services();
    let mut book = book;
    let Some(name) = book.read().pending_delete().map(|r| r.name.clone()) else {
        return rsx! {};
    };

    let footer = rsx! {
        button {
            r#type: "button",
            class: SECONDARY_BUTTON,
            onclick: move |_| book.write().cancel_delete(),
            "Cancel"
        }
        button {
            r#type: "button",
            class: DANGER_BUTTON,
            onclick: move |_| {
                spawn(confirm_delete(services.api.clone(), book));
            },
            "Delete"
        }
    };

    rsx! {
        Modal {
            title: "Delete recipe".to_string(),
            on_close: move |_| book.write().cancel_delete(),
            footer: Some(footer),
            p {
                class: "text-sm text-gray-700",
                "Are you sure you want to delete \"{name}\"? This cannot be undone."
            }
        }
    }
}
