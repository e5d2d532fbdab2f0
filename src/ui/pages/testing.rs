// src/ui/pages/testing.rs - Manual stock and recipe actions

use chrono::Utc;
use dioxus::prelude::*;

use crate::api::ApiClient;
use crate::models::Recipe;
use crate::testing::{fetch_options, MessageTone, TestingPanel};
use crate::types::RecordId;
use crate::ui::components::{AlertBanner, AlertTone, INPUT, PRIMARY_BUTTON};
use crate::ui::pages::{Card, PageWrapper};
use crate::ui::state::use_services;

async fn load(api: ApiClient, mut panel: Signal<TestingPanel>) {
    let (ingredients, recipes) = fetch_options(&api).await;
    panel.write().apply_options(ingredients, recipes);
}

async fn add_stock(api: ApiClient, mut panel: Signal<TestingPanel>) {
    let built = panel.peek().build_add_stock(Utc::now());
    match built {
        Ok(lot) => {
            let result = api.create_stock(&lot).await;
            panel.write().apply_add_stock(result);
        }
        Err(e) => panel.write().report_error(&e),
    }
}

async fn execute_processed(api: ApiClient, mut panel: Signal<TestingPanel>) {
    let built = panel.peek().build_processed();
    match built {
        Ok(command) => {
            let result = api.execute_processed_recipe(&command).await;
            panel.write().apply_processed(result);
        }
        Err(e) => panel.write().report_error(&e),
    }
}

async fn execute_full(api: ApiClient, mut panel: Signal<TestingPanel>) {
    let built = panel.peek().build_full();
    match built {
        Ok(command) => {
            let result = api.execute_full_recipe(&command).await;
            panel.write().apply_full(result);
        }
        Err(e) => panel.write().report_error(&e),
    }
}

fn selected_value(id: Option<RecordId>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

#[component]
pub fn Testing() -> Element {
    let services = use_services();
    let expiry_days = services.ui.stock_expiry_days;
    let mut panel = use_signal(move || TestingPanel::new(expiry_days));

    let api = services.api.clone();
    use_future(move || load(api.clone(), panel));

    let current = panel.read();
    let message = current.message().cloned();

    rsx! {
        PageWrapper {
            title: "Testing".to_string(),
            subtitle: Some("Add stock and run recipes against the backend".to_string()),

            if let Some(message) = message {
                AlertBanner {
                    message: message.text,
                    tone: match message.tone {
                        MessageTone::Success => AlertTone::Success,
                        MessageTone::Error => AlertTone::Danger,
                    },
                    on_dismiss: move |_| panel.write().clear_message(),
                }
            }

            div {
                class: "grid grid-cols-1 gap-6 lg:grid-cols-3",
                AddStockCard { panel }
                ProcessedRecipeCard { panel }
                FullRecipeCard { panel }
            }
        }
    }
}

#[component]
fn AddStockCard(panel: Signal<TestingPanel>) -> Element {
    let services = use_services();
    let mut panel = panel;
    let current = panel.read();
    let form = &current.add_stock;
    let selected = selected_value(form.ingredient_id);
    let unit = current
        .selected_ingredient()
        .map(|i| i.unit.clone())
        .unwrap_or_default();

    rsx! {
        Card {
            title: "Add stock".to_string(),
            div {
                class: "space-y-3",
                select {
                    class: INPUT,
                    onchange: move |evt: FormEvent| panel.write().add_stock.ingredient_id = evt.value().parse().ok(),
                    option { value: "", selected: selected.is_empty(), "Select an ingredient" }
                    for ingredient in current.raw_ingredients().iter() {
                        option {
                            key: "{ingredient.id}",
                            value: "{ingredient.id}",
                            selected: ingredient.id.to_string() == selected,
                            "{ingredient.name}"
                        }
                    }
                }
                input {
                    class: INPUT,
                    r#type: "number",
                    step: "any",
                    placeholder: if unit.is_empty() { "Amount".to_string() } else { format!("Amount ({})", unit) },
                    value: "{form.amount}",
                    oninput: move |evt: FormEvent| panel.write().add_stock.amount = evt.value(),
                }
                input {
                    class: INPUT,
                    r#type: "number",
                    step: "any",
                    placeholder: "Cost",
                    value: "{form.cost}",
                    oninput: move |evt: FormEvent| panel.write().add_stock.cost = evt.value(),
                }
                button {
                    r#type: "button",
                    class: PRIMARY_BUTTON,
                    onclick: move |_| {
                        spawn(add_stock(services.api.clone(), panel));
                    },
                    "Add stock"
                }
            }
        }
    }
}

#[component]
fn RecipeOptions(recipes: Vec<Recipe>, selected: String) -> Element {
    rsx! {
        option { value: "", selected: selected.is_empty(), "Select a recipe" }
        for recipe in recipes.iter().filter(|r| r.id.is_some()) {
            option {
                key: "{recipe.name}",
                value: selected_value(recipe.id),
                selected: selected_value(recipe.id) == selected,
                "{recipe.name}"
            }
        }
    }
}

#[component]
fn ProcessedRecipeCard(panel: Signal<TestingPanel>) -> Element {
    let services = use_services();
    let mut panel = panel;
    let current = panel.read();
    let form = &current.processed;
    let selected = selected_value(form.recipe_id);

    rsx! {
        Card {
            title: "Execute processed recipe".to_string(),
            div {
                class: "space-y-3",
                select {
                    class: INPUT,
                    onchange: move |evt: FormEvent| panel.write().processed.recipe_id = evt.value().parse().ok(),
                    RecipeOptions { recipes: current.processed_recipes().to_vec(), selected }
                }
                input {
                    class: INPUT,
                    r#type: "number",
                    step: "any",
                    placeholder: "Quantity",
                    value: "{form.quantity}",
                    oninput: move |evt: FormEvent| panel.write().processed.quantity = evt.value(),
                }
                button {
                    r#type: "button",
                    class: PRIMARY_BUTTON,
                    onclick: move |_| {
                        spawn(execute_processed(services.api.clone(), panel));
                    },
                    "Execute"
                }
            }
        }
    }
}

#[component]
fn FullRecipeCard(panel: Signal<TestingPanel>) -> Element {
    let services = use_services();
    let mut panel = panel;
    let current = panel.read();
    let form = &current.full;
    let selected = selected_value(form.recipe_id);

    rsx! {
        Card {
            title: "Execute full recipe".to_string(),
            div {
                class: "space-y-3",
                select {
                    class: INPUT,
                    onchange: move |evt: FormEvent| panel.write().full.recipe_id = evt.value().parse().ok(),
                    RecipeOptions { recipes: current.full_recipes().to_vec(), selected }
                }
                input {
                    class: INPUT,
                    r#type: "number",
                    step: "any",
                    placeholder: "Quantity",
                    value: "{form.quantity}",
                    oninput: move |evt: FormEvent| panel.write().full.quantity = evt.value(),
                }
                input {
                    class: INPUT,
                    r#type: "number",
                    step: "any",
                    placeholder: "Sale price",
                    value: "{form.sale_price}",
                    oninput: move |evt: FormEvent| panel.write().full.sale_price = evt.value(),
                }
                button {
                    r#type: "button",
                    class: PRIMARY_BUTTON,
                    onclick: move |_| {
                        spawn(execute_full(services.api.clone(), panel));
                    },
                    "Execute and record sale"
                }
            }
        }
    }
}
