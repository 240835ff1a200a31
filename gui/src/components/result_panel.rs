// Scripted analysis result shown in place of the chart after the reveal.
#![allow(non_snake_case)]
use crate::config::theme::ThemePalette;
use dioxus::prelude::*;
use engine::dashboard::AnalysisView;

#[component]
pub fn ResultPanel(analysis: AnalysisView, palette: ThemePalette) -> Element {
    let lines = analysis.lines.iter().map(|line| rsx! { div { class: "analysis-line", "{line}" } });
    rsx! {
        div {
            class: "analysis-box",
            style: "background: {palette.surface}; padding: 20px; border-radius: 8px; font-size: 16px;",
            div {
                style: "font-weight: 800; color: {palette.accent}; font-size: 18px; margin-bottom: 8px;",
                "{analysis.headline}"
            }
            {lines}
            div { style: "margin-top: 12px;", "{analysis.reentry_note}" }
            div {
                style: "margin-top: 12px;",
                a { href: "{analysis.signup_url}", target: "_blank", rel: "noopener noreferrer", "{analysis.signup_label}" }
            }
        }
    }
}
