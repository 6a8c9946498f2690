use crate::episode::Episode;
use crate::queue;

use dioxus::prelude::*;

use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Session scoped player state: the queue, the transport flags and the full screen flag.
///
/// All mutation goes through the methods below. Callers are expected to respect
/// [`PlayerState::has_next`] and [`PlayerState::has_previous`]; moves that are not
/// eligible leave the state untouched.
#[derive(Clone, Debug)]
pub struct PlayerState {
    episodes: Vec<Episode>,
    current: Option<usize>,

    is_playing: bool,
    is_looping: bool,
    is_shuffling: bool,

    /// Full screen player on narrow viewports.
    is_full: bool,

    rng: SmallRng,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rng(rng: SmallRng) -> Self {
        Self {
            episodes: Vec::new(),
            current: None,
            is_playing: false,
            is_looping: false,
            is_shuffling: false,
            is_full: false,
            rng,
        }
    }

    /// Plays a single episode, replacing whatever was queued.
    pub fn play(&mut self, episode: Episode) {
        tracing::info!(id = %episode.id, "Playing episode.");

        self.episodes = vec![episode];
        self.current = Some(0);
        self.is_playing = true;
    }

    /// Replaces the queue with `episodes` and starts at `index`.
    pub fn play_list(&mut self, episodes: Vec<Episode>, index: usize) {
        if episodes.is_empty() {
            tracing::debug!("Ignoring empty play list.");
            self.clear_player_state();
            return;
        }

        let index = index.min(episodes.len() - 1);

        tracing::info!(index, len = episodes.len(), "Playing list.");

        self.episodes = episodes;
        self.current = Some(index);
        self.is_playing = true;
    }

    pub fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
    }

    pub fn toggle_loop(&mut self) {
        self.is_looping = !self.is_looping;
    }

    pub fn toggle_shuffle(&mut self) {
        self.is_shuffling = !self.is_shuffling;
    }

    /// Mirrors play/pause events reported by the media element itself.
    pub fn set_playing_state(&mut self, playing: bool) {
        self.is_playing = playing;
    }

    pub fn play_next(&mut self) {
        match queue::next_index(
            self.episodes.len(),
            self.current,
            self.is_shuffling,
            &mut self.rng,
        ) {
            Some(index) => self.current = Some(index),
            None => tracing::debug!(current = ?self.current, "No next episode."),
        }
    }

    pub fn play_previous(&mut self) {
        match queue::previous_index(
            self.episodes.len(),
            self.current,
            self.is_shuffling,
            &mut self.rng,
        ) {
            Some(index) => self.current = Some(index),
            None => tracing::debug!(current = ?self.current, "No previous episode."),
        }
    }

    pub fn has_next(&self) -> bool {
        queue::has_next(self.episodes.len(), self.current, self.is_shuffling)
    }

    pub fn has_previous(&self) -> bool {
        queue::has_previous(self.episodes.len(), self.current, self.is_shuffling)
    }

    /// Empties the queue and resets the transport flags.
    pub fn clear_player_state(&mut self) {
        tracing::info!("Clearing player.");

        self.episodes.clear();
        self.current = None;
        self.is_playing = false;
        self.is_looping = false;
        self.is_shuffling = false;
    }

    pub fn toggle_full_player(&mut self) {
        self.is_full = !self.is_full;
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.current.and_then(|index| self.episodes.get(index))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// Shuffling only makes sense with something loaded and more than one entry.
    pub fn can_shuffle(&self) -> bool {
        self.current_episode().is_some() && self.episodes.len() > 1
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    pub fn is_shuffling(&self) -> bool {
        self.is_shuffling
    }

    pub fn is_full(&self) -> bool {
        self.is_full
    }
}

/// Shared handle to the player state, provided once at the root of the app.
#[derive(Clone, Copy, PartialEq)]
pub struct PlayerContext {
    pub state: Signal<PlayerState>,
}

impl PlayerContext {
    pub fn play(mut self, episode: Episode) {
        self.state.write().play(episode);
    }

    pub fn play_list(mut self, episodes: Vec<Episode>, index: usize) {
        self.state.write().play_list(episodes, index);
    }

    pub fn toggle_play(mut self) {
        self.state.write().toggle_play();
    }

    pub fn toggle_loop(mut self) {
        self.state.write().toggle_loop();
    }

    pub fn toggle_shuffle(mut self) {
        self.state.write().toggle_shuffle();
    }

    pub fn set_playing_state(mut self, playing: bool) {
        // Native events echo our own play/pause calls; skip writes that change nothing.
        if self.state.peek().is_playing() != playing {
            self.state.write().set_playing_state(playing);
        }
    }

    pub fn play_next(mut self) {
        self.state.write().play_next();
    }

    pub fn play_previous(mut self) {
        self.state.write().play_previous();
    }

    pub fn clear_player_state(mut self) {
        self.state.write().clear_player_state();
    }

    pub fn toggle_full_player(mut self) {
        self.state.write().toggle_full_player();
    }
}

/// Creates the player state and exposes it to every descendant.
pub fn use_player_provider() -> PlayerContext {
    use_context_provider(|| PlayerContext {
        state: Signal::new(PlayerState::new()),
    })
}

pub fn use_player() -> PlayerContext {
    use_context::<PlayerContext>()
}
