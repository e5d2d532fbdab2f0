// src/ui/pages/team.rs - Team members table with add/edit/delete

use dioxus::prelude::*;

use crate::api::ApiClient;
use crate::models::Role;
use crate::team::{fetch_roster, save_member, TeamRoster};
use crate::ui::components::{AlertBanner, Badge, Modal, DANGER_BUTTON, INPUT, PRIMARY_BUTTON, SECONDARY_BUTTON};
use crate::ui::pages::{Card, EmptyState, PageWrapper};
use crate::ui::state::use_services;

async fn load(api: ApiClient, mut roster: Signal<TeamRoster>) {
    let (members, restaurants) = fetch_roster(&api).await;
    roster.write().apply_loaded(members, restaurants);
}

async fn submit(api: ApiClient, mut roster: Signal<TeamRoster>) {
    let started = roster.write().begin_submit();
    let Ok((editing, payload)) = started else {
        return;
    };
    let result = save_member(&api, editing, &payload).await;
    let saved = roster.write().apply_submit(result);
    if saved {
        let members = api.list_users().await;
        roster.write().apply_members(members);
    }
}

async fn confirm_delete(api: ApiClient, mut roster: Signal<TeamRoster>) {
    let Some(id) = roster.write().take_pending_delete() else {
        return;
    };
    let result = api.delete_user(id).await;
    let deleted = roster.write().apply_delete(id, result);
    if deleted {
        let members = api.list_users().await;
        roster.write().apply_members(members);
    }
}

fn role_badge_class(role: Role) -> &'static str {
    match role {
        Role::Manager => "bg-purple-100 text-purple-800",
        Role::Chef => "bg-orange-100 text-orange-800",
        Role::Waiter => "bg-blue-100 text-blue-800",
    }
}

#[component]
pub fn Team() -> Element {
    let services = use_services();
    let mut roster = use_signal(TeamRoster::new);

    let api = services.api.clone();
    use_future(move || load(api.clone(), roster));

    let current = roster.read();

    let page_actions = rsx! {
        button {
            r#type: "button",
            class: PRIMARY_BUTTON,
            onclick: move |_| roster.write().open_add(),
            "Add member"
        }
    };

    rsx! {
        PageWrapper {
            title: "Team".to_string(),
            subtitle: Some("Who works where, and in which role".to_string()),
            actions: Some(page_actions),

            if let Some(message) = current.error() {
                AlertBanner { message: message.to_string() }
            }

            Card {
                title: "Members".to_string(),
                if current.is_loading() {
                    p { class: "text-sm text-gray-500", "Loading..." }
                } else if current.members().is_empty() {
                    EmptyState {
                        icon: "👥".to_string(),
                        title: "No team members".to_string(),
                        description: "Add the first member of the team.".to_string()
                    }
                } else {
                    table {
                        class: "min-w-full text-sm",
                        thead {
                            tr {
                                class: "text-left text-gray-500",
                                th { class: "py-2 pr-4", "Name" }
                                th { class: "py-2 pr-4", "Login ID" }
                                th { class: "py-2 pr-4", "Role" }
                                th { class: "py-2 pr-4", "Restaurant" }
                                th { class: "py-2", "" }
                            }
                        }
                        tbody {
                            for member in current.members().iter() {
                                tr {
                                    key: "{member.id}",
                                    class: "border-t border-gray-100",
                                    td { class: "py-2 pr-4 font-medium", "{member.name}" }
                                    td { class: "py-2 pr-4", "{member.login_id}" }
                                    td {
                                        class: "py-2 pr-4",
                                        Badge {
                                            text: member.role.to_string(),
                                            class: role_badge_class(member.role).to_string()
                                        }
                                    }
                                    td {
                                        class: "py-2 pr-4 text-gray-500",
                                        {current.restaurant_name(member.restaurant_id).unwrap_or("-").to_string()}
                                    }
                                    td {
                                        class: "py-2 text-right space-x-2",
                                        button {
                                            r#type: "button",
                                            class: SECONDARY_BUTTON,
                                            onclick: {
                                                let id = member.id;
                                                move |_| roster.write().open_edit(id)
                                            },
                                            "Edit"
                                        }
                                        button {
                                            r#type: "button",
                                            class: DANGER_BUTTON,
                                            onclick: {
                                                let id = member.id;
                                                move |_| roster.write().request_delete(id)
                                            },
                                            "Delete"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            MemberFormModal { roster }
            DeleteMemberModal { roster }
        }
    }
}

#[component]
fn MemberFormModal(roster: Signal<TeamRoster>) -> Element {
    let services = use_services();
    let mut roster = roster;
    let current = roster.read();
    let Some(form) = current.form() else {
        return rsx! {};
    };
    let title = if form.is_new() { "Add team member" } else { "Edit team member" };
    let selected_role = form.role.map(Role::as_str).unwrap_or("");
    let selected_restaurant = form.restaurant_id.map(|id| id.to_string()).unwrap_or_default();

    let footer = rsx! {
        button {
            r#type: "button",
            class: SECONDARY_BUTTON,
            onclick: move |_| roster.write().close_form(),
            "Cancel"
        }
        button {
            r#type: "button",
            class: PRIMARY_BUTTON,
            onclick: move |_| {
                spawn(submit(services.api.clone(), roster));
            },
            "Save"
        }
    };

    rsx! {
        Modal {
            title: title.to_string(),
            on_close: move |_| roster.write().close_form(),
            footer: Some(footer),

            div {
                class: "space-y-4",
                label {
                    class: "block text-sm font-medium text-gray-700",
                    "Name"
                    input {
                        class: INPUT,
                        value: "{form.name}",
                        oninput: move |evt: FormEvent| {
                            if let Some(form) = roster.write().form_mut() {
                                form.name = evt.value();
                            }
                        },
                    }
                }
                label {
                    class: "block text-sm font-medium text-gray-700",
                    "Login ID"
                    input {
                        class: INPUT,
                        value: "{form.login_id}",
                        oninput: move |evt: FormEvent| {
                            if let Some(form) = roster.write().form_mut() {
                                form.login_id = evt.value();
                            }
                        },
                    }
                }
                label {
                    class: "block text-sm font-medium text-gray-700",
                    "Role"
                    select {
                        class: INPUT,
                        onchange: move |evt: FormEvent| {
                            if let Some(form) = roster.write().form_mut() {
                                form.role = evt.value().parse::<Role>().ok();
                            }
                        },
                        option { value: "", selected: selected_role.is_empty(), "Select a role" }
                        for role in Role::ALL {
                            option {
                                key: "{role}",
                                value: role.as_str(),
                                selected: role.as_str() == selected_role,
                                "{role}"
                            }
                        }
                    }
                }
                if form.is_new() {
                    label {
                        class: "block text-sm font-medium text-gray-700",
                        "Password"
                        input {
                            class: INPUT,
                            r#type: "password",
                            value: "{form.password}",
                            oninput: move |evt: FormEvent| {
                                if let Some(form) = roster.write().form_mut() {
                                    form.password = evt.value();
                                }
                            },
                        }
                    }
                }
                label {
                    class: "block text-sm font-medium text-gray-700",
                    "Restaurant"
                    select {
                        class: INPUT,
                        onchange: move |evt: FormEvent| {
                            if let Some(form) = roster.write().form_mut() {
                                form.restaurant_id = evt.value().parse().ok();
                            }
                        },
                        option { value: "", selected: selected_restaurant.is_empty(), "No restaurant" }
                        for restaurant in current.restaurants().iter() {
                            option {
                                key: "{restaurant.id}",
                                value: "{restaurant.id}",
                                selected: restaurant.id.to_string() == selected_restaurant,
                                "{restaurant.name}"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn DeleteMemberModal(roster: Signal<TeamRoster>) -> Element {
    let services = use_services();
    let mut roster = roster;
    let Some(name) = roster.read().pending_delete().map(|m| m.name.clone()) else {
        return rsx! {};
    };

    let footer = rsx! {
        button {
            r#type: "button",
            class: SECONDARY_BUTTON,
            onclick: move |_| roster.write().cancel_delete(),
            "Cancel"
        }
        button {
            r#type: "button",
            class: DANGER_BUTTON,
            onclick: move |_| {
                spawn(confirm_delete(services.api.clone(), roster));
            },
            "Delete"
        }
    };

    rsx! {
        Modal {
            title: "Delete team member".to_string(),
            on_close: move |_| roster.write().cancel_delete(),
            footer: Some(footer),
            p {
                class: "text-sm text-gray-700",
                "Remove {name} from the team?"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_role_has_its_own_badge() {
        let classes: Vec<&str> = Role::ALL.iter().map(|r| role_badge_class(*r)).collect();
        assert_eq!(classes.len(), 3);
        assert_ne!(classes[0], classes[1]);
        assert_ne!(classes[1], classes[2]);
    }
}
