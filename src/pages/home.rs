use crate::api::{ApiClient, EpisodeFilter};
use crate::app::Route;
use crate::config::Config;
use crate::episode::Episode;
use crate::store::{use_player, PlayerContext};

use std::rc::Rc;

use dioxus::prelude::*;

/// How many of the newest episodes get a card instead of a table row.
const LATEST_COUNT: usize = 2;

#[component]
pub fn Home() -> Element {
    let config = use_context::<Config>();
    let client = use_context::<ApiClient>();
    let player = use_player();

    let limit = config.list_limit;
    let episodes = use_resource(move || {
        let client = client.clone();
        async move { client.fetch_episode_list(&EpisodeFilter::latest(limit)).await }
    });

    let content = match &*episodes.read() {
        None => rsx! {
            p { class: "loading", "Carregando episódios..." }
        },
        Some(Err(error)) => {
            tracing::error!(%error, "Failed to load episodes.");
            rsx! {
                p { class: "error", "Não foi possível carregar os episódios." }
            }
        }
        Some(Ok(episodes)) => episode_lists(Rc::new(episodes.clone()), player),
    };

    rsx! {
        document::Title { "Home | Podcastr" }
        div { class: "homepage", {content} }
    }
}

/// Newest episodes as cards, the rest as a table. Both play from the same queue.
fn episode_lists(playlist: Rc<Vec<Episode>>, player: PlayerContext) -> Element {
    let split = LATEST_COUNT.min(playlist.len());

    let cards = playlist[..split].iter().enumerate().map(|(index, episode)| {
        let playlist = playlist.clone();
        let onplay = move |_: MouseEvent| player.play_list(playlist.to_vec(), index);

        rsx! {
            li { key: "{episode.id}",
                img { src: "{episode.thumbnail}", alt: "{episode.title}", width: "192", height: "192" }
                div { class: "episode-details",
                    Link { to: Route::EpisodeDetail { slug: episode.id.clone() }, "{episode.title}" }
                    p { "{episode.members}" }
                    span { "{episode.published_at}" }
                    span { "{episode.duration_as_string}" }
                }
                button { r#type: "button", onclick: onplay,
                    img { src: "/play-green.svg", alt: "Tocar episódio" }
                }
            }
        }
    });

    let rows = playlist[split..].iter().enumerate().map(|(offset, episode)| {
        let playlist = playlist.clone();
        let index = split + offset;
        let onplay = move |_: MouseEvent| player.play_list(playlist.to_vec(), index);

        rsx! {
            tr { key: "{episode.id}",
                td { style: "width: 72px",
                    img { src: "{episode.thumbnail}", alt: "{episode.title}", width: "120", height: "120" }
                }
                td {
                    Link { to: Route::EpisodeDetail { slug: episode.id.clone() }, "{episode.title}" }
                }
                td { "{episode.members}" }
                td { style: "width: 100px", "{episode.published_at}" }
                td { "{episode.duration_as_string}" }
                td {
                    button { r#type: "button", onclick: onplay,
                        img { src: "/play-green.svg", alt: "Tocar episódio" }
                    }
                }
            }
        }
    });

    rsx! {
        section { class: "latest-episodes",
            h2 { "Últimos lançamentos" }
            ul { {cards} }
        }
        section { class: "all-episodes",
            h2 { "Todos episódios" }
            table {
                thead {
                    tr {
                        th {}
                        th { "Podcast" }
                        th { "Integrantes" }
                        th { "Data" }
                        th { "Duração" }
                        th {}
                    }
                }
                tbody { {rows} }
            }
        }
    }
}
