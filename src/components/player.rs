use crate::breakpoint::use_viewport;
use crate::episode::Episode;
use crate::format::format_duration;
use crate::media::{self, AudioElement, AUDIO_ELEMENT_ID};
use crate::store::{use_player, PlayerContext, PlayerState};

use dioxus::prelude::*;

/// Everything the two layouts render, derived from the store and the progress.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerView {
    pub episode: Option<Episode>,
    pub progress: u64,
    pub is_playing: bool,
    pub is_looping: bool,
    pub is_shuffling: bool,
    pub is_full: bool,
    pub has_next: bool,
    pub has_previous: bool,
    pub can_shuffle: bool,
}

impl PlayerView {
    pub fn new(state: &PlayerState, progress: u64) -> Self {
        Self {
            episode: state.current_episode().cloned(),
            progress,
            is_playing: state.is_playing(),
            is_looping: state.is_looping(),
            is_shuffling: state.is_shuffling(),
            is_full: state.is_full(),
            has_next: state.has_next(),
            has_previous: state.has_previous(),
            can_shuffle: state.can_shuffle(),
        }
    }

    pub fn progress_label(&self) -> String {
        format_duration(self.progress)
    }

    pub fn duration(&self) -> u64 {
        self.episode.as_ref().map_or(0, |episode| episode.duration)
    }

    pub fn duration_label(&self) -> String {
        format_duration(self.duration())
    }

    pub fn next_disabled(&self) -> bool {
        self.episode.is_none() || !self.has_next
    }

    pub fn previous_disabled(&self) -> bool {
        self.episode.is_none() || !self.has_previous
    }
}

/// User intents forwarded from either layout into the store and the audio element.
#[derive(Clone, Copy, PartialEq)]
pub struct PlayerActions {
    player: PlayerContext,
    progress: Signal<u64>,
}

impl PlayerActions {
    pub fn toggle_play(self) {
        self.player.toggle_play();
    }

    pub fn toggle_loop(self) {
        self.player.toggle_loop();
    }

    pub fn toggle_shuffle(self) {
        self.player.toggle_shuffle();
    }

    pub fn play_next(self) {
        self.player.play_next();
    }

    pub fn play_previous(self) {
        self.player.play_previous();
    }

    pub fn toggle_full_player(self) {
        self.player.toggle_full_player();
    }

    pub fn seek(mut self, seconds: u64) {
        match AudioElement::find() {
            Some(audio) => self.progress.set(media::handle_seek(&audio, seconds)),
            None => tracing::debug!(seconds, "Seek without audio element."),
        }
    }

    fn seek_input(self, event: FormEvent) {
        match event.value().parse::<f64>() {
            Ok(seconds) if seconds >= 0. => self.seek(seconds.trunc() as u64),
            _ => tracing::debug!(value = %event.value(), "Ignoring slider value."),
        }
    }

    fn loaded_metadata(mut self) {
        if let Some(audio) = AudioElement::find() {
            self.progress.set(media::on_loaded_metadata(&audio));
        }
    }

    fn time_update(mut self) {
        if let Some(audio) = AudioElement::find() {
            let progress = media::on_time_update(&audio);
            if *self.progress.peek() != progress {
                self.progress.set(progress);
            }
        }
    }

    fn ended(self) {
        let mut state = self.player.state;
        media::handle_episode_ended(&mut state.write());
    }
}

/// The persistent player. Picks the layout from the viewport width.
#[component]
pub fn Player() -> Element {
    let viewport = use_viewport();

    let player = use_player();
    let progress = use_signal(|| 0u64);
    let actions = PlayerActions { player, progress };

    media::use_playing_sync(player, AudioElement::find);

    let view = PlayerView::new(&player.state.read(), progress());

    let layout = if viewport.is_narrow() {
        responsive_layout(&view, actions)
    } else {
        standard_layout(&view, actions)
    };

    // The audio element sits outside both layouts so switching them never reloads it.
    rsx! {
        {audio(&view, actions)}
        {layout}
    }
}

fn audio(view: &PlayerView, actions: PlayerActions) -> Element {
    let Some(episode) = &view.episode else {
        return rsx! {};
    };

    rsx! {
        audio {
            id: AUDIO_ELEMENT_ID,
            src: "{episode.url}",
            autoplay: true,
            r#loop: view.is_looping,
            onended: move |_| actions.ended(),
            onplay: move |_| actions.player.set_playing_state(true),
            onpause: move |_| actions.player.set_playing_state(false),
            onloadedmetadata: move |_| actions.loaded_metadata(),
            ontimeupdate: move |_| actions.time_update(),
        }
    }
}

fn slider(view: &PlayerView, actions: PlayerActions) -> Element {
    if view.episode.is_none() {
        return rsx! {
            div { class: "empty-slider" }
        };
    }

    rsx! {
        input {
            class: "slider",
            r#type: "range",
            min: "0",
            max: "{view.duration()}",
            step: "1",
            value: "{view.progress}",
            oninput: move |event| actions.seek_input(event),
        }
    }
}

fn progress(view: &PlayerView, actions: PlayerActions) -> Element {
    rsx! {
        div { class: "progress",
            span { "{view.progress_label()}" }
            div { class: "slider-container", {slider(view, actions)} }
            span { "{view.duration_label()}" }
        }
    }
}

fn play_button(view: &PlayerView, actions: PlayerActions) -> Element {
    rsx! {
        button {
            r#type: "button",
            class: "play-button",
            disabled: view.episode.is_none(),
            onclick: move |_| actions.toggle_play(),
            if view.is_playing {
                img { src: "/pause.svg", alt: "Pausar" }
            } else {
                img { src: "/play.svg", alt: "Tocar" }
            }
        }
    }
}

fn skip_buttons(view: &PlayerView, actions: PlayerActions) -> Element {
    rsx! {
        button {
            r#type: "button",
            disabled: view.previous_disabled(),
            onclick: move |_| actions.play_previous(),
            img { src: "/play-previous.svg", alt: "Tocar anterior" }
        }
        {play_button(view, actions)}
        button {
            r#type: "button",
            disabled: view.next_disabled(),
            onclick: move |_| actions.play_next(),
            img { src: "/play-next.svg", alt: "Tocar próxima" }
        }
    }
}

fn transport(view: &PlayerView, actions: PlayerActions) -> Element {
    rsx! {
        div { class: "buttons",
            button {
                r#type: "button",
                class: if view.is_shuffling { "is-active" },
                disabled: !view.can_shuffle,
                onclick: move |_| actions.toggle_shuffle(),
                img { src: "/shuffle.svg", alt: "Embaralhar" }
            }
            {skip_buttons(view, actions)}
            button {
                r#type: "button",
                class: if view.is_looping { "is-active" },
                disabled: view.episode.is_none(),
                onclick: move |_| actions.toggle_loop(),
                img { src: "/repeat.svg", alt: "Repetir" }
            }
        }
    }
}

/// Docked player bar for wide viewports.
pub fn standard_layout(view: &PlayerView, actions: PlayerActions) -> Element {
    rsx! {
        div { class: "player-container",
            header {
                img { src: "/playing.svg", alt: "Tocando agora" }
                strong { "Tocando agora" }
            }

            if let Some(episode) = &view.episode {
                div { class: "current-episode",
                    img { src: "{episode.thumbnail}", alt: "{episode.title}", width: "592", height: "592" }
                    strong { "{episode.title}" }
                    span { "{episode.members}" }
                }
            } else {
                div { class: "empty-player",
                    strong { "Selecione um podcast para ouvir" }
                }
            }

            footer { class: if view.episode.is_none() { "empty" },
                {progress(view, actions)}
                {transport(view, actions)}
            }
        }
    }
}

/// Narrow viewports: a collapsed bar, or the full screen player when requested.
pub fn responsive_layout(view: &PlayerView, actions: PlayerActions) -> Element {
    let Some(episode) = &view.episode else {
        return rsx! {
            div { class: "player-container-responsive",
                div {
                    class: "empty-player-responsive",
                    onclick: move |_| actions.toggle_full_player(),
                }
            }
        };
    };

    if !view.is_full {
        return rsx! {
            div { class: "player-container-responsive",
                div { class: "current-episode-responsive",
                    img { src: "{episode.thumbnail}", alt: "{episode.title}", width: "64", height: "64" }
                    strong {
                        onclick: move |_| actions.toggle_full_player(),
                        "{episode.title}"
                    }
                }
                footer {
                    div { class: "buttons-responsive", {skip_buttons(view, actions)} }
                }
            }
        };
    }

    rsx! {
        div { class: "full-player",
            div {
                class: "back-button",
                onclick: move |_| actions.toggle_full_player(),
                button { r#type: "button",
                    img { src: "/arrow-left.svg", alt: "Voltar" }
                }
                span { "Voltar para Home" }
            }
            div { class: "current-episode-footer",
                img { src: "{episode.thumbnail}", alt: "{episode.title}", width: "592", height: "592" }
                strong { "{episode.title}" }
                span { "{episode.members}" }
            }
            footer {
                {progress(view, actions)}
                {transport(view, actions)}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::episode::fixtures::{episode_with_duration, queue};

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn state() -> PlayerState {
        PlayerState::with_rng(SmallRng::seed_from_u64(9))
    }

    #[test]
    fn empty_player_disables_controls() {
        let view = PlayerView::new(&state(), 0);

        assert!(view.episode.is_none());
        assert!(view.next_disabled());
        assert!(view.previous_disabled());
        assert!(!view.can_shuffle);
        assert_eq!(view.progress_label(), "00:00:00");
        assert_eq!(view.duration_label(), "00:00:00");
    }

    #[test]
    fn single_episode_cannot_shuffle() {
        let mut state = state();
        state.play(episode_with_duration("a", 125));

        let view = PlayerView::new(&state, 65);

        assert!(!view.can_shuffle);
        assert!(view.next_disabled());
        assert_eq!(view.progress_label(), "00:01:05");
        assert_eq!(view.duration_label(), "00:02:05");
    }

    #[test]
    fn queue_enables_skips() {
        let mut state = state();
        state.play_list(queue(3), 1);

        let view = PlayerView::new(&state, 0);

        assert!(view.can_shuffle);
        assert!(!view.next_disabled());
        assert!(!view.previous_disabled());
        assert!(view.is_playing);
    }

    #[test]
    fn layout_flag_is_carried() {
        let mut state = state();
        state.toggle_full_player();

        assert!(PlayerView::new(&state, 0).is_full);
    }
}
