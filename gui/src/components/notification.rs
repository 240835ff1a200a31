// Blocking notification: alerts and "open link" prompts after a tracked click.
#![allow(non_snake_case)]
use crate::config::theme::ThemePalette;
use dioxus::prelude::*;
use engine::dashboard::Notification;

#[component]
pub fn NotificationModal(notification: Notification, palette: ThemePalette, on_dismiss: EventHandler<()>) -> Element {
    let body = match &notification {
        Notification::Alert(message) => rsx! { p { "{message}" } },
        Notification::OpenLink { button, url } => {
            let label = format!("Open {}", button.as_str());
            rsx! {
                p { "Click registered." }
                a {
                    href: "{url}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    onclick: move |_| on_dismiss.call(()),
                    "{label}"
                }
            }
        }
    };

    rsx! {
        div {
            class: "modal-backdrop",
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.6); display: flex; align-items: center; justify-content: center;",
            div {
                class: "modal",
                style: "background: {palette.surface}; color: {palette.foreground}; padding: 20px 24px; border-radius: 8px; min-width: 280px;",
                {body}
                div {
                    style: "margin-top: 16px; text-align: right;",
                    button { onclick: move |_| on_dismiss.call(()), "OK" }
                }
            }
        }
    }
}
