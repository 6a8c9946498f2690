use crate::store::{PlayerContext, PlayerState};

use dioxus::prelude::*;

use wasm_bindgen::JsCast;
use web_sys::HtmlAudioElement;

/// DOM id of the one audio element the player renders.
pub const AUDIO_ELEMENT_ID: &str = "podcastr-audio";

/// The parts of a media element the player drives.
pub trait MediaElement {
    fn play(&self);
    fn pause(&self);
    /// Playback position in seconds.
    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64);
}

/// The `<audio>` element rendered by the player component.
pub struct AudioElement {
    inner: HtmlAudioElement,
}

impl AudioElement {
    /// Looks up the player's audio element. `None` while no episode is loaded, since the
    /// element is only mounted with a source.
    pub fn find() -> Option<Self> {
        let inner = web_sys::window()?
            .document()?
            .get_element_by_id(AUDIO_ELEMENT_ID)?
            .dyn_into::<HtmlAudioElement>()
            .ok()?;

        Some(Self { inner })
    }
}

impl MediaElement for AudioElement {
    fn play(&self) {
        // The returned promise is left alone; autoplay rejections surface as `pause`.
        if let Err(error) = self.inner.play() {
            tracing::error!(?error, "Audio play failed.");
        }
    }

    fn pause(&self) {
        if let Err(error) = self.inner.pause() {
            tracing::error!(?error, "Audio pause failed.");
        }
    }

    fn current_time(&self) -> f64 {
        self.inner.current_time()
    }

    fn set_current_time(&self, seconds: f64) {
        self.inner.set_current_time(seconds);
    }
}

/// Pushes the store's play/pause flag to the element.
pub fn sync_playing(media: &impl MediaElement, playing: bool) {
    if playing {
        media.play();
    } else {
        media.pause();
    }
}

/// Keeps the element's play/pause state in line with the store.
///
/// Only flips of `is_playing` reach the element; other store writes are filtered by the memo.
pub fn use_playing_sync<M, F>(player: PlayerContext, find: F)
where
    M: MediaElement + 'static,
    F: Fn() -> Option<M> + 'static,
{
    let is_playing = use_memo(move || player.state.read().is_playing());

    use_effect(move || {
        let playing = is_playing();

        match find() {
            Some(media) => sync_playing(&media, playing),
            None => tracing::debug!(playing, "No audio element to sync."),
        }
    });
}

/// A new source is ready: rewind and reset the progress.
pub fn on_loaded_metadata(media: &impl MediaElement) -> u64 {
    media.set_current_time(0.);
    0
}

/// Whole seconds elapsed, from the element's native time updates.
pub fn on_time_update(media: &impl MediaElement) -> u64 {
    let time = media.current_time();

    if time.is_finite() && time > 0. {
        time.trunc() as u64
    } else {
        0
    }
}

/// Moves playback to `seconds` and returns the progress to display right away.
pub fn handle_seek(media: &impl MediaElement, seconds: u64) -> u64 {
    media.set_current_time(seconds as f64);
    seconds
}

/// End of track: advance when possible, otherwise tear the player down.
pub fn handle_episode_ended(state: &mut PlayerState) {
    if state.has_next() {
        state.play_next();
    } else {
        state.clear_player_state();
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakeMedia;
    use super::*;
    use crate::components::player::PlayerView;
    use crate::episode::fixtures::{episode, episode_with_duration, queue};
    use crate::store::use_player;

    use std::cell::Cell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    thread_local! {
        static MEDIA: Rc<FakeMedia> = Rc::new(FakeMedia::default());
        static PLAYER: Cell<Option<PlayerContext>> = const { Cell::new(None) };
        static RENDERS: Cell<usize> = const { Cell::new(0) };
    }

    #[component]
    fn Readout() -> Element {
        let player = use_player();
        RENDERS.with(|renders| renders.set(renders.get() + 1));
        let playing = player.state.read().is_playing();

        rsx! {
            span { "{playing}" }
        }
    }

    #[component]
    fn SyncHarness() -> Element {
        let player = use_context_provider(|| PlayerContext {
            state: Signal::new(PlayerState::with_rng(SmallRng::seed_from_u64(5))),
        });
        PLAYER.with(|cell| cell.set(Some(player)));

        use_playing_sync(player, || Some(MEDIA.with(Rc::clone)));

        rsx! {
            Readout {}
        }
    }

    fn settle(dom: &mut VirtualDom) {
        for _ in 0..4 {
            dom.render_immediate_to_vec();
        }
    }

    fn with_player(dom: &VirtualDom, f: impl FnOnce(PlayerContext)) {
        dom.in_runtime(|| f(PLAYER.with(Cell::get).unwrap()));
    }

    fn calls() -> (usize, usize) {
        MEDIA.with(|media| (media.play_calls.get(), media.pause_calls.get()))
    }

    fn state() -> PlayerState {
        PlayerState::with_rng(SmallRng::seed_from_u64(3))
    }

    #[test]
    fn plays_a_whole_episode_then_clears() {
        let media = FakeMedia::default();
        let mut state = state();
        state.play(episode_with_duration("short", 125));

        media.advance_to(12.5);
        let mut progress = on_loaded_metadata(&media);
        assert_eq!(progress, 0);
        assert_eq!(media.current_time(), 0.);

        for second in 0..125 {
            media.advance_to(second as f64 + 0.4);
            progress = on_time_update(&media);

            assert_eq!(progress, second);
            if second == 65 {
                assert_eq!(PlayerView::new(&state, progress).progress_label(), "00:01:05");
            }
        }

        handle_episode_ended(&mut state);

        assert!(state.current_episode().is_none());
        assert_eq!(state.current_index(), None);
        assert!(!state.is_playing());
    }

    #[test]
    fn ended_advances_through_queue() {
        let mut state = state();
        state.play_list(queue(2), 0);

        handle_episode_ended(&mut state);
        assert_eq!(state.current_index(), Some(1));

        handle_episode_ended(&mut state);
        assert_eq!(state.current_index(), None);
    }

    #[test]
    fn seek_updates_progress_immediately() {
        let media = FakeMedia::default();
        let mut state = state();
        state.play(episode_with_duration("long", 300));

        media.advance_to(120.);
        let progress = handle_seek(&media, 40);
        let view = PlayerView::new(&state, progress);

        assert_eq!(view.progress_label(), "00:00:40");
        assert_eq!(view.duration_label(), "00:05:00");
        assert_eq!(media.current_time(), 40.);
    }

    #[test]
    fn sync_follows_flag() {
        let media = FakeMedia::default();

        sync_playing(&media, true);
        assert!(media.playing.get());

        sync_playing(&media, false);
        assert!(!media.playing.get());
        assert_eq!(media.play_calls.get(), 1);
        assert_eq!(media.pause_calls.get(), 1);
    }

    #[test]
    fn odd_times_read_as_zero() {
        let media = FakeMedia::default();

        media.advance_to(f64::NAN);
        assert_eq!(on_time_update(&media), 0);

        media.advance_to(-1.);
        assert_eq!(on_time_update(&media), 0);
    }

    #[test]
    fn store_flips_reach_the_element() {
        let mut dom = VirtualDom::new(SyncHarness);
        dom.rebuild_in_place();
        settle(&mut dom);

        let (plays, pauses) = calls();
        assert_eq!(plays, 0);

        with_player(&dom, |player| player.play(episode("a")));
        settle(&mut dom);
        assert_eq!(calls(), (1, pauses));
        assert!(MEDIA.with(|media| media.playing.get()));

        with_player(&dom, |player| player.toggle_play());
        settle(&mut dom);
        assert_eq!(calls(), (1, pauses + 1));
        assert!(!MEDIA.with(|media| media.playing.get()));
    }

    #[test]
    fn echoed_playing_state_is_ignored() {
        let mut dom = VirtualDom::new(SyncHarness);
        dom.rebuild_in_place();

        with_player(&dom, |player| player.play(episode("a")));
        settle(&mut dom);

        let renders = RENDERS.with(Cell::get);
        let before = calls();

        // The element reports the play we just asked for.
        with_player(&dom, |player| player.set_playing_state(true));
        settle(&mut dom);

        assert_eq!(RENDERS.with(Cell::get), renders);
        assert_eq!(calls(), before);

        // A pause coming from the element itself is mirrored once.
        with_player(&dom, |player| player.set_playing_state(false));
        settle(&mut dom);

        assert_eq!(RENDERS.with(Cell::get), renders + 1);
        assert_eq!(calls(), (before.0, before.1 + 1));
    }
}
