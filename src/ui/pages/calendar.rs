// src/ui/pages/calendar.rs - Month/week calendar of kitchen events

use chrono::{Datelike, Local, NaiveDate};
use dioxus::prelude::*;

use crate::api::ApiClient;
use crate::calendar::{date_key, CalendarMode, CalendarView, WEEKDAY_LABELS};
use crate::ui::components::{AlertBanner, Modal, INPUT, PRIMARY_BUTTON, SECONDARY_BUTTON};
use crate::ui::pages::{Card, PageWrapper};
use crate::ui::state::use_services;

async fn load(api: ApiClient, mut calendar: Signal<CalendarView>) {
    let result = api.list_events().await;
    calendar.write().apply_events(result);
}

async fn add_event(api: ApiClient, mut calendar: Signal<CalendarView>) {
    let Some(event) = calendar.peek().pending_event() else {
        return;
    };
    let result = api.create_event(&event).await;
    calendar.write().apply_created(result);
}

fn mode_button_class(active: bool) -> &'static str {
    if active {
        "px-3 py-1 text-sm font-medium rounded-md bg-blue-600 text-white"
    } else {
        "px-3 py-1 text-sm font-medium rounded-md bg-white text-gray-700 border border-gray-300 hover:bg-gray-50"
    }
}

fn day_cell_class(selected: bool, in_month: bool, today: bool) -> String {
    let mut class = String::from("h-24 p-1 border border-gray-100 text-left align-top cursor-pointer overflow-hidden");
    if selected {
        class.push_str(" bg-blue-50 ring-2 ring-blue-400");
    } else if !in_month {
        class.push_str(" bg-gray-50 text-gray-400");
    } else {
        class.push_str(" bg-white hover:bg-gray-50");
    }
    if today {
        class.push_str(" font-bold");
    }
    class
}

#[component]
pub fn Calendar() -> Element {
    let services = use_services();
    let mut calendar = use_signal(|| CalendarView::new(Local::now().date_naive()));

    let api = services.api.clone();
    use_future(move || load(api.clone(), calendar));

    let current = calendar.read();
    let mode = current.mode();
    let selected = current.selected();

    rsx! {
        PageWrapper {
            title: "Calendar".to_string(),
            subtitle: Some("Double-click a day to add an event".to_string()),

            if let Some(message) = current.error() {
                AlertBanner { message: message.to_string() }
            }

            Card {
                title: current.title(),
                actions: Some(rsx! {
                    div {
                        class: "flex items-center space-x-2",
                        button {
                            r#type: "button",
                            class: SECONDARY_BUTTON,
                            onclick: move |_| calendar.write().previous_month(),
                            "‹"
                        }
                        button {
                            r#type: "button",
                            class: SECONDARY_BUTTON,
                            onclick: move |_| calendar.write().next_month(),
                            "›"
                        }
                        button {
                            r#type: "button",
                            class: mode_button_class(mode == CalendarMode::Month),
                            onclick: move |_| calendar.write().set_mode(CalendarMode::Month),
                            "Month"
                        }
                        button {
                            r#type: "button",
                            class: mode_button_class(mode == CalendarMode::Week),
                            onclick: move |_| calendar.write().set_mode(CalendarMode::Week),
                            "Week"
                        }
                    }
                }),

                table {
                    class: "w-full table-fixed border-collapse",
                    thead {
                        tr {
                            for label in WEEKDAY_LABELS {
                                th { key: "{label}", class: "py-2 text-xs font-medium text-gray-500", "{label}" }
                            }
                        }
                    }
                    tbody {
                        for week in current.weeks() {
                            tr {
                                key: "{date_key(week[0])}",
                                for day in week {
                                    DayCell {
                                        key: "{date_key(day)}",
                                        calendar,
                                        date: day,
                                        selected: day == selected,
                                    }
                                }
                            }
                        }
                    }
                }
            }

            Card {
                title: format!("Events on {}", current.selected_label()),
                if current.events_on(selected).is_empty() {
                    p { class: "text-sm text-gray-500", "No events." }
                } else {
                    ul {
                        class: "list-disc pl-5 space-y-1 text-sm",
                        for (index, title) in current.events_on(selected).iter().enumerate() {
                            li { key: "{index}", "{title}" }
                        }
                    }
                }
            }

            NewEventModal { calendar }
        }
    }
}

#[component]
fn DayCell(calendar: Signal<CalendarView>, date: NaiveDate, selected: bool) -> Element {
    let mut calendar = calendar;
    let current = calendar.read();
    let in_month = current.in_current_month(date);
    let today = date == Local::now().date_naive();
    let day = date.day();

    rsx! {
        td {
            class: day_cell_class(selected, in_month, today),
            onclick: move |_| calendar.write().select(date),
            ondoubleclick: move |_| calendar.write().open_new_event(date),
            div { class: "text-xs", "{day}" }
            for (index, title) in current.events_on(date).iter().enumerate() {
                div {
                    key: "{index}",
                    class: "mt-1 truncate rounded bg-blue-100 px-1 text-xs text-blue-800",
                    "{title}"
                }
            }
        }
    }
}

#[component]
fn NewEventModal(calendar: Signal<CalendarView>) -> Element {
    let services = use_services();
    let mut calendar = calendar;
    let current = calendar.read();
    let Some(draft) = current.draft().map(str::to_string) else {
        return rsx! {};
    };
    let can_add = current.pending_event().is_some();
    let title = format!("New event on {}", current.selected_label());

    let footer = rsx! {
        button {
            r#type: "button",
            class: SECONDARY_BUTTON,
            onclick: move |_| calendar.write().cancel_new_event(),
            "Cancel"
        }
        button {
            r#type: "button",
            class: PRIMARY_BUTTON,
            disabled: !can_add,
            onclick: move |_| {
                spawn(add_event(services.api.clone(), calendar));
            },
            "Add event"
        }
    };

    rsx! {
        Modal {
            title,
            on_close: move |_| calendar.write().cancel_new_event(),
            footer: Some(footer),
            input {
                class: INPUT,
                placeholder: "Event title",
                value: "{draft}",
                autofocus: true,
                oninput: move |evt: FormEvent| calendar.write().set_draft(evt.value()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_cell_class_variants() {
        assert!(day_cell_class(true, true, false).contains("ring-2"));
        assert!(day_cell_class(false, false, false).contains("text-gray-400"));
        assert!(day_cell_class(false, true, true).contains("font-bold"));
    }
}
