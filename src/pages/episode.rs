use crate::api::{ApiClient, Error};
use crate::app::Route;
use crate::cache::{load_episode, EpisodeCache};
use crate::episode::Episode;
use crate::store::{use_player, PlayerContext};

use dioxus::prelude::*;

#[component]
pub fn EpisodeDetail(slug: String) -> Element {
    let client = use_context::<ApiClient>();
    let cache = use_context::<Signal<EpisodeCache>>();
    let player = use_player();

    let episode = use_resource(use_reactive((&slug,), move |(slug,)| {
        let client = client.clone();
        async move { load_episode(client, cache, slug).await }
    }));

    match &*episode.read() {
        None => rsx! {
            div { class: "episode", p { class: "loading", "Carregando episódio..." } }
        },
        Some(Ok(episode)) => episode_page(episode, player),
        Some(Err(Error::NotFound(id))) => {
            tracing::info!(id = %id, "Episode not found.");
            not_found()
        }
        Some(Err(error)) => {
            tracing::error!(%error, "Failed to load episode.");
            rsx! {
                div { class: "episode",
                    p { class: "error", "Não foi possível carregar o episódio." }
                    Link { to: Route::Home {}, "Voltar para Home" }
                }
            }
        }
    }
}

fn not_found() -> Element {
    rsx! {
        document::Title { "Episódio não encontrado | Podcastr" }
        div { class: "episode",
            h1 { "Episódio não encontrado" }
            Link { to: Route::Home {}, "Voltar para Home" }
        }
    }
}

fn episode_page(episode: &Episode, player: PlayerContext) -> Element {
    let playable = episode.clone();

    rsx! {
        document::Title { "{episode.title} | Podcastr" }
        div { class: "episode",
            div { class: "thumbnail-container",
                Link { to: Route::Home {},
                    button { r#type: "button",
                        img { src: "/arrow-left.svg", alt: "Voltar" }
                    }
                }
                img { src: "{episode.thumbnail}", alt: "{episode.title}", width: "700", height: "160" }
                button {
                    r#type: "button",
                    onclick: move |_| player.play(playable.clone()),
                    img { src: "/play.svg", alt: "Tocar episódio" }
                }
            }

            header {
                h1 { "{episode.title}" }
                span { "{episode.members}" }
                span { "{episode.published_at}" }
                span { "{episode.duration_as_string}" }
            }

            if let Some(description) = &episode.description {
                div { class: "description", dangerous_inner_html: "{description}" }
            }
        }
    }
}
