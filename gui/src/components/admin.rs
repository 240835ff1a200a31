// Admin console: users table with create/edit/delete, click log and click statistics.
#![allow(non_snake_case)]
use crate::config::theme::ThemePalette;
use crate::services::EngineClient;
use crate::state::AdminConsoleState;
use dioxus::prelude::*;
use engine::admin::{AdminClient, FormMessage};
use shared::admin::StatsPeriod;
use std::sync::Arc;

const BAR_WIDTH_PX: f64 = 320.0;

#[component]
pub fn AdminConsole(palette: ThemePalette) -> Element {
    let engine = use_context::<EngineClient>();
    let client: Signal<Arc<AdminClient>> = use_signal(|| engine.admin.clone());
    let mut state = use_signal(AdminConsoleState::default);
    let mut pending_delete = use_signal(|| None::<i64>);

    let reload_users = move || {
        spawn(async move {
            let client = client.read().clone();
            match client.list_users().await {
                Ok(users) => state.write().set_users(&users),
                Err(e) => tracing::warn!(error = %e, "Failed to load users."),
            }
        });
    };
    let reload_clicks = move || {
        spawn(async move {
            let client = client.read().clone();
            match client.list_clicks().await {
                Ok(logs) => state.write().set_clicks(&logs),
                Err(e) => tracing::warn!(error = %e, "Failed to load click log."),
            }
        });
    };
    let reload_stats = move |period: StatsPeriod| {
        spawn(async move {
            let client = client.read().clone();
            match client.click_stats(period).await {
                Ok(stats) => state.write().set_stats(period, &stats),
                Err(e) => tracing::warn!(error = %e, period = %period, "Failed to load click stats."),
            }
        });
    };

    use_hook(move || {
        reload_users();
        reload_clicks();
        reload_stats(StatsPeriod::default());
    });

    let submit_create = move |_| {
        let parsed = state.read().new_user.to_request();
        let request = match parsed {
            Ok(request) => request,
            Err(e) => {
                state.write().create_message = Some(FormMessage::Failure(e.to_string()));
                return;
            }
        };
        spawn(async move {
            let client = client.read().clone();
            let result = client.create_user(&request).await;
            if state.write().apply_create_result(&result) {
                reload_users();
            }
        });
    };

    let submit_edit = move |_| {
        let submission = state.write().edit_submission();
        let Some((id, request)) = submission else {
            return;
        };
        spawn(async move {
            let client = client.read().clone();
            let result = client.update_user(id, &request).await;
            if state.write().apply_update_result(&result) {
                reload_users();
            }
        });
    };

    let mut confirm_delete = move |id: i64| {
        pending_delete.set(None);
        spawn(async move {
            let client = client.read().clone();
            let result = client.delete_user(id).await;
            if state.write().apply_delete_result(&result) {
                reload_users();
            }
        });
    };

    let snapshot = state.read().clone();
    let user_rows = snapshot.users.iter().map(|row| {
        let id = row.id;
        let deleting = *pending_delete.read() == Some(id);
        rsx! {
            tr {
                key: "{id}",
                td { "{row.id}" }
                td { "{row.email}" }
                td { "{row.username}" }
                td { "{row.admin}" }
                td { "{row.expires}" }
                td { "{row.last_analysis}" }
                td {
                    button { onclick: move |_| state.write().begin_edit(id), "Edit" }
                    if deleting {
                        button { onclick: move |_| confirm_delete(id), "Confirm delete" }
                        button { onclick: move |_| pending_delete.set(None), "Cancel" }
                    } else {
                        button { onclick: move |_| pending_delete.set(Some(id)), "Delete" }
                    }
                }
            }
        }
    });
    let click_rows = snapshot.clicks.iter().map(|row| {
        rsx! {
            tr {
                key: "{row.id}",
                td { "{row.id}" }
                td { "{row.who}" }
                td { "{row.button}" }
                td { "{row.clicked_at}" }
            }
        }
    });
    let stats = &snapshot.stats;
    let scale = if stats.max_total == 0 { 0.0 } else { BAR_WIDTH_PX / stats.max_total as f64 };
    let stat_rows = stats.labels.iter().enumerate().map(|(i, label)| {
        let telegram = stats.series.first().and_then(|s| s.values.get(i)).copied().unwrap_or(0);
        let purchase = stats.series.get(1).and_then(|s| s.values.get(i)).copied().unwrap_or(0);
        let total = stats.series.get(2).and_then(|s| s.values.get(i)).copied().unwrap_or(0);
        let telegram_px = telegram as f64 * scale;
        let purchase_px = purchase as f64 * scale;
        rsx! {
            tr {
                key: "{label}",
                td { "{label}" }
                td {
                    div {
                        style: "display: flex; height: 14px;",
                        div { style: "width: {telegram_px:.0}px; background: rgba(42,139,242,0.8);" }
                        div { style: "width: {purchase_px:.0}px; background: rgba(255,212,0,0.9);" }
                    }
                }
                td { "{telegram}" }
                td { "{purchase}" }
                td { "{total}" }
            }
        }
    });
    let period_options = StatsPeriod::ALL.iter().map(|period| {
        let value = period.as_str();
        rsx! { option { value: "{value}", selected: *period == snapshot.period, "{value}" } }
    });

    let form = snapshot.new_user.clone();
    let create_message = snapshot.create_message.clone().map(|message| {
        let color = if message.is_success() { "green" } else { palette.danger.as_str() };
        rsx! { p { style: "color: {color};", "{message.text()}" } }
    });
    let edit_panel = snapshot.editing.clone().map(|(id, edit)| {
        rsx! {
            div {
                class: "edit-user",
                h4 { "Edit user {id} (leave blank to keep)" }
                input {
                    placeholder: "New username",
                    value: "{edit.username}",
                    oninput: move |evt| {
                        if let Some((_, form)) = state.write().editing.as_mut() {
                            form.username = evt.value();
                        }
                    }
                }
                input {
                    placeholder: "New email",
                    value: "{edit.email}",
                    oninput: move |evt| {
                        if let Some((_, form)) = state.write().editing.as_mut() {
                            form.email = evt.value();
                        }
                    }
                }
                input {
                    placeholder: "New password",
                    r#type: "password",
                    value: "{edit.password}",
                    oninput: move |evt| {
                        if let Some((_, form)) = state.write().editing.as_mut() {
                            form.password = evt.value();
                        }
                    }
                }
                button { onclick: submit_edit, "Save" }
                button { onclick: move |_| state.write().cancel_edit(), "Cancel" }
            }
        }
    });
    let alert = snapshot.alert.clone().map(|message| {
        rsx! {
            div {
                class: "admin-alert",
                style: "color: {palette.danger};",
                "{message}"
                button { onclick: move |_| state.write().alert = None, "OK" }
            }
        }
    });

    rsx! {
        div {
            class: "admin-console",
            style: "display: flex; flex-direction: column; gap: 20px;",
            {alert}
            section {
                h3 { "Create user" }
                input { placeholder: "Email", value: "{form.email}", oninput: move |evt| state.write().new_user.email = evt.value() }
                input { placeholder: "Username", value: "{form.username}", oninput: move |evt| state.write().new_user.username = evt.value() }
                input { placeholder: "Password", r#type: "password", value: "{form.password}", oninput: move |evt| state.write().new_user.password = evt.value() }
                label {
                    input {
                        r#type: "checkbox",
                        checked: form.is_admin,
                        oninput: move |_| {
                            let current = state.read().new_user.is_admin;
                            state.write().new_user.is_admin = !current;
                        }
                    }
                    "Admin"
                }
                label {
                    input {
                        r#type: "checkbox",
                        checked: form.lifetime,
                        oninput: move |_| {
                            let current = state.read().new_user.lifetime;
                            state.write().new_user.set_lifetime(!current);
                        }
                    }
                    "Lifetime"
                }
                input {
                    r#type: "datetime-local",
                    disabled: form.lifetime,
                    value: "{form.expires_input}",
                    oninput: move |evt| state.write().new_user.expires_input = evt.value()
                }
                button { onclick: submit_create, "Create" }
                {create_message}
            }
            {edit_panel}
            section {
                h3 { "Users" }
                table {
                    thead { tr { th { "ID" } th { "Email" } th { "Username" } th { "Admin" } th { "Expires" } th { "Last analysis" } th { "" } } }
                    tbody { {user_rows} }
                }
            }
            section {
                h3 { "Clicks" }
                select {
                    onchange: move |evt| match evt.value().parse::<StatsPeriod>() {
                        Ok(period) => reload_stats(period),
                        Err(e) => tracing::warn!(error = %e, "Ignoring stats period."),
                    },
                    {period_options}
                }
                table {
                    thead { tr { th { "Period" } th { "" } th { "Telegram" } th { "Purchase" } th { "Total" } } }
                    tbody { {stat_rows} }
                }
                table {
                    thead { tr { th { "ID" } th { "User" } th { "Button" } th { "When" } } }
                    tbody { {click_rows} }
                }
            }
        }
    }
}
