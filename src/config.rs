use core::time::Duration;

use url::Url;

lazy_static::lazy_static! {
    static ref DEFAULT_API_URL: Url = Url::parse("http://localhost:3333/").unwrap();
}

/// Application settings, provided to the component tree as a context.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Base URL of the episodes API.
    pub api_url: Url,
    /// Viewport width, in logical pixels, at or below which the responsive layout is used.
    pub breakpoint: u32,
    /// How many episodes the home page requests.
    pub list_limit: usize,
    /// How many of the most recently published episodes are fetched ahead of time.
    pub prerendered_episodes: usize,
    /// Age after which a cached episode page is refreshed.
    pub revalidate: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.clone(),
            breakpoint: 600,
            list_limit: 12,
            prerendered_episodes: 2,
            revalidate: Duration::from_secs(60 * 60 * 24),
        }
    }
}

impl Config {
    /// Builds the configuration, honouring a `PODCASTR_API_URL` set at build time.
    pub fn from_env() -> Self {
        let config = Self::default();

        match option_env!("PODCASTR_API_URL") {
            Some(raw) => config.with_api_url(raw),
            None => config,
        }
    }

    /// Replaces the API URL, keeping the default when `raw` does not parse.
    pub fn with_api_url(mut self, raw: &str) -> Self {
        // Relative joins drop the last path segment unless the base ends with a slash.
        let raw = if raw.ends_with('/') {
            raw.to_string()
        } else {
            format!("{raw}/")
        };

        match Url::parse(&raw) {
            Ok(url) => self.api_url = url,
            Err(error) => tracing::error!(?error, raw, "Ignoring invalid api url."),
        }

        self
    }
}
