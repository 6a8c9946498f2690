use crate::api::ApiClient;
use crate::breakpoint::{use_viewport, use_viewport_provider};
use crate::cache::{prerender, EpisodeCache};
use crate::components::{Header, Player};
use crate::config::Config;
use crate::pages::{EpisodeDetail, Home};
use crate::store::{use_player, use_player_provider};

use dioxus::prelude::*;

#[derive(Clone, Debug, PartialEq, Routable)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[route("/episodes/:slug")]
        EpisodeDetail { slug: String },
}

/// Root component: installs the shared contexts and the router.
#[component]
pub fn App() -> Element {
    let config = use_context_provider(Config::from_env);
    let client = use_context_provider(|| ApiClient::new(&config));
    let cache = use_context_provider(|| Signal::new(EpisodeCache::new(config.revalidate)));
    use_player_provider();
    use_viewport_provider(config.breakpoint);

    let prerendered = config.prerendered_episodes;
    use_hook(move || {
        spawn(async move {
            if let Err(error) = prerender(client, cache, prerendered).await {
                tracing::error!(%error, "Prerendering episode pages failed.");
            }
        });
    });

    rsx! {
        Router::<Route> {}
    }
}

/// Page frame. On narrow viewports the full screen player replaces the page.
#[component]
fn Shell() -> Element {
    let viewport = use_viewport();
    let player = use_player();

    let is_full = player.state.read().is_full();
    let show_page = !(viewport.is_narrow() && is_full);

    frame(
        show_page,
        rsx! {
            Header {}
            Outlet::<Route> {}
        },
        rsx! {
            Player {}
        },
    )
}

/// The player keeps one slot whatever the layout, so it is never remounted by a
/// breakpoint crossing or a full screen toggle.
pub(crate) fn frame(show_page: bool, page: Element, player: Element) -> Element {
    rsx! {
        div { class: "wrapper",
            if show_page {
                main { {page} }
            }
            {player}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    thread_local! {
        static MOUNTS: Cell<usize> = const { Cell::new(0) };
        static SHOW_PAGE: Cell<Option<Signal<bool>>> = const { Cell::new(None) };
    }

    #[component]
    fn Counted() -> Element {
        use_hook(|| MOUNTS.with(|mounts| mounts.set(mounts.get() + 1)));

        rsx! {
            audio { id: "counted" }
        }
    }

    #[component]
    fn Frame() -> Element {
        let show_page = use_signal(|| true);
        SHOW_PAGE.with(|cell| cell.set(Some(show_page)));

        frame(
            show_page(),
            rsx! {
                p { "page" }
            },
            rsx! {
                Counted {}
            },
        )
    }

    #[test]
    fn hiding_the_page_keeps_the_player_mounted() {
        let mut dom = VirtualDom::new(Frame);
        dom.rebuild_in_place();
        assert_eq!(MOUNTS.with(Cell::get), 1);

        for show in [false, true, false] {
            dom.in_runtime(|| {
                let mut show_page = SHOW_PAGE.with(Cell::get).unwrap();
                show_page.set(show);
            });
            dom.render_immediate_to_vec();
        }

        assert_eq!(MOUNTS.with(Cell::get), 1);
    }
}
