//! In-memory episode page cache.
//!
//! The most recently published episodes are fetched ahead of time; everything else is
//! fetched the first time its page is opened. Entries older than the revalidation
//! window are still served, but the page refreshes them in the background.

use crate::api::{ApiClient, EpisodeFilter, Error};
use crate::episode::Episode;

use core::time::Duration;
use std::collections::HashMap;

use dioxus::prelude::*;

/// Milliseconds since the epoch, from the browser clock.
pub fn now() -> Duration {
    Duration::from_millis(js_sys::Date::now() as u64)
}

#[derive(Clone, Debug)]
struct Entry {
    episode: Episode,
    fetched_at: Duration,
}

/// What the cache holds for an id.
#[derive(Clone, Debug, PartialEq)]
pub enum Lookup {
    Fresh(Episode),
    /// Servable, but due for a refresh.
    Stale(Episode),
    Missing,
}

#[derive(Clone, Debug)]
pub struct EpisodeCache {
    revalidate: Duration,
    entries: HashMap<String, Entry>,
}

impl EpisodeCache {
    pub fn new(revalidate: Duration) -> Self {
        Self {
            revalidate,
            entries: HashMap::new(),
        }
    }

    pub fn lookup(&self, id: &str, now: Duration) -> Lookup {
        let Some(entry) = self.entries.get(id) else {
            return Lookup::Missing;
        };

        if now.saturating_sub(entry.fetched_at) < self.revalidate {
            Lookup::Fresh(entry.episode.clone())
        } else {
            Lookup::Stale(entry.episode.clone())
        }
    }

    pub fn insert(&mut self, episode: Episode, now: Duration) {
        self.entries.insert(
            episode.id.clone(),
            Entry {
                episode,
                fetched_at: now,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Ids of the `count` most recently published episodes.
pub async fn recent_ids(client: &ApiClient, count: usize) -> Result<Vec<String>, Error> {
    let episodes = client
        .fetch_episode_list(&EpisodeFilter::latest(count))
        .await?;

    Ok(episodes.into_iter().map(|episode| episode.id).collect())
}

/// Warms the cache with the detail records of the most recent episodes.
pub async fn prerender(
    client: ApiClient,
    mut cache: Signal<EpisodeCache>,
    count: usize,
) -> Result<(), Error> {
    let ids = recent_ids(&client, count).await?;

    let episodes = futures::future::try_join_all(
        ids.iter().map(|id| client.fetch_episode_detail(id)),
    )
    .await?;

    let fetched_at = now();
    let mut cache = cache.write();
    for episode in episodes {
        cache.insert(episode, fetched_at);
    }

    tracing::info!(count = cache.len(), "Prerendered episode pages.");

    Ok(())
}

/// Resolves an episode page: from the cache when possible, otherwise from the API.
///
/// Stale entries are returned at once and refreshed on a background task.
pub async fn load_episode(
    client: ApiClient,
    mut cache: Signal<EpisodeCache>,
    id: String,
) -> Result<Episode, Error> {
    let lookup = cache.peek().lookup(&id, now());

    match lookup {
        Lookup::Fresh(episode) => Ok(episode),
        Lookup::Stale(episode) => {
            tracing::info!(id = %id, "Revalidating episode page.");

            spawn(async move {
                match client.fetch_episode_detail(&id).await {
                    Ok(episode) => cache.write().insert(episode, now()),
                    Err(error) => tracing::error!(%error, id = %id, "Revalidation failed."),
                }
            });

            Ok(episode)
        }
        Lookup::Missing => {
            let episode = client.fetch_episode_detail(&id).await?;
            cache.write().insert(episode.clone(), now());

            Ok(episode)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::episode::fixtures::episode;

    const DAY: Duration = Duration::from_secs(86_400);

    #[test]
    fn unknown_ids_are_missing() {
        let cache = EpisodeCache::new(DAY);

        assert_eq!(cache.lookup("nope", Duration::ZERO), Lookup::Missing);
        assert!(cache.is_empty());
    }

    #[test]
    fn entries_go_stale_after_window() {
        let mut cache = EpisodeCache::new(DAY);
        let start = Duration::from_secs(1_000);
        cache.insert(episode("a"), start);

        assert_eq!(
            cache.lookup("a", start + DAY - Duration::from_secs(1)),
            Lookup::Fresh(episode("a"))
        );
        assert_eq!(cache.lookup("a", start + DAY), Lookup::Stale(episode("a")));
    }

    #[test]
    fn insert_refreshes_entry() {
        let mut cache = EpisodeCache::new(DAY);
        cache.insert(episode("a"), Duration::ZERO);
        cache.insert(episode("a"), DAY * 2);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.lookup("a", DAY * 2), Lookup::Fresh(episode("a")));
    }

    #[test]
    fn clock_going_backwards_counts_as_fresh() {
        let mut cache = EpisodeCache::new(DAY);
        cache.insert(episode("a"), DAY);

        assert_eq!(cache.lookup("a", Duration::ZERO), Lookup::Fresh(episode("a")));
    }
}
