use crate::format::format_today;

use chrono::Local;
use dioxus::prelude::*;

#[component]
pub fn Header() -> Element {
    let today = format_today(Local::now().date_naive());

    rsx! {
        header { class: "header",
            img { src: "/logo.svg", alt: "Podcastr" }
            p { "O melhor para você ouvir, sempre" }
            span { "{today}" }
        }
    }
}
