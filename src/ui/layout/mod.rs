// src/ui/layout/mod.rs - Application shell: sidebar navigation around the routed page

use dioxus::prelude::*;
#[allow(unused_imports)]
use dioxus_router::prelude::*;

use crate::ui::router::Route;

/// Navigation entry
#[derive(Debug, Clone, PartialEq)]
pub struct NavItem {
    pub label: &'static str,
    pub icon: &'static str,
    pub route: Route,
}

pub fn navigation_items() -> Vec<NavItem> {
    vec![
        NavItem { label: "Dashboard", icon: "📊", route: Route::Dashboard {} },
        NavItem { label: "Inventory", icon: "📦", route: Route::Inventory {} },
        NavItem { label: "Recipes", icon: "📖", route: Route::Recipes {} },
        NavItem { label: "Team", icon: "👥", route: Route::Team {} },
        NavItem { label: "Calendar", icon: "📅", route: Route::Calendar {} },
        NavItem { label: "Testing", icon: "🧪", route: Route::Testing {} },
    ]
}

/// Builder routes highlight the Recipes entry.
fn is_active(item: &Route, current: &Route) -> bool {
    match (item, current) {
        (Route::Recipes {}, Route::RecipeBuilderNew { .. } | Route::RecipeBuilderEdit { .. }) => true,
        _ => item == current,
    }
}

#[component]
pub fn Shell() -> Element {
    let current = use_route::<Route>();
    let version = crate::VERSION;

    rsx! {
        div {
            class: "min-h-screen flex bg-gray-50",
            aside {
                class: "w-56 flex-shrink-0 bg-gray-900 text-gray-100 flex flex-col",
                div {
                    class: "px-4 py-5 text-lg font-semibold border-b border-gray-800",
                    "🍳 Kitchen Ops"
                }
                nav {
                    class: "flex-1 px-2 py-4 space-y-1",
                    for item in navigation_items() {
                        Link {
                            key: "{item.label}",
                            to: item.route.clone(),
                            class: if is_active(&item.route, &current) {
                                "flex items-center px-3 py-2 rounded-md text-sm font-medium bg-gray-800 text-white"
                            } else {
                                "flex items-center px-3 py-2 rounded-md text-sm font-medium text-gray-300 hover:bg-gray-700 hover:text-white"
                            },
                            span { class: "mr-3", "{item.icon}" }
                            "{item.label}"
                        }
                    }
                }
                div {
                    class: "px-4 py-3 text-xs text-gray-500 border-t border-gray-800",
                    "v{version}"
                }
            }
            main {
                class: "flex-1 p-6 overflow-y-auto",
                Outlet::<Route> {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_routes_highlight_recipes() {
        let recipes = Route::Recipes {};
        assert!(is_active(&recipes, &Route::RecipeBuilderEdit { id: 4 }));
        assert!(is_active(&recipes, &Route::RecipeBuilderNew { kind: "full".to_string() }));
        assert!(!is_active(&Route::Team {}, &Route::Calendar {}));
    }

    #[test]
    fn test_navigation_covers_every_page() {
        assert_eq!(navigation_items().len(), 6);
    }
}
